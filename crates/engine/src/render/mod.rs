//! Viewport rasterization: grid renderer, frame budget, resumable jobs

mod budget;
mod grid;
mod job;

pub use budget::FrameBudget;
pub use grid::{adaptive_step, render, RenderStats, HIGH_DENSITY, LOW_DENSITY, MAX_STEP_PX};
pub use job::{JobState, RenderJob};
