//! Resumable block rendering
//!
//! The block-fill loop as an explicit state machine, driven by an external
//! scheduler: each `step` call renders a band of block rows and yields.
//! A completed job writes exactly the pixels a one-shot block render would.

use std::sync::Arc;
use std::time::{Duration, Instant};

use scattermap_colormap::rgba;
use scattermap_core::{Domain, Error, Result, Surface, ViewTransform, Viewport};

use crate::field::Field;
use crate::params::{RenderMode, RenderParams};
use crate::render::grid::{eval_block, BlockGrid, RenderStats};

/// Progress of a resumable render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    NotStarted,
    InProgress { next_block_row: usize },
    Done,
}

/// A block-mode render split into cooperative steps.
///
/// Inputs are captured as an immutable snapshot at construction; the job
/// never observes later changes to caller state. Pixels written by earlier
/// steps are never revisited, so an abandoned job simply leaves a partial
/// raster that the next full render overwrites.
#[derive(Debug)]
pub struct RenderJob {
    field: Arc<Field>,
    params: RenderParams,
    transform: ViewTransform,
    grid: BlockGrid,
    state: JobState,
    evaluations: usize,
    elapsed: Duration,
}

impl RenderJob {
    /// Snapshot the inputs and validate parameters up front.
    pub fn new(
        field: Arc<Field>,
        params: RenderParams,
        domain: Domain,
        viewport: Viewport,
    ) -> Result<Self> {
        params.validate()?;
        let transform =
            ViewTransform::from_domain(&domain, viewport.width as f64, viewport.height as f64);
        let grid = BlockGrid::new(&viewport, params.grid_step_px);
        Ok(Self {
            field,
            params,
            transform,
            grid,
            state: JobState::NotStarted,
            evaluations: 0,
            elapsed: Duration::ZERO,
        })
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == JobState::Done
    }

    /// Render up to `max_block_rows` block rows into `surface`, advancing
    /// the state machine. Returns the state after the step.
    ///
    /// The surface must stay the same object (or at least the same size)
    /// across the steps of one job.
    pub fn step<S: Surface>(&mut self, surface: &mut S, max_block_rows: usize) -> Result<JobState> {
        if self.state == JobState::Done || max_block_rows == 0 {
            return Ok(self.state);
        }

        if surface.width() != self.grid.dev_width || surface.height() != self.grid.dev_height {
            return Err(Error::SurfaceSizeMismatch {
                expected_width: self.grid.dev_width,
                expected_height: self.grid.dev_height,
                actual_width: surface.width(),
                actual_height: surface.height(),
            });
        }

        let start_row = match self.state {
            JobState::NotStarted => {
                if self.field.is_empty() {
                    surface.clear();
                    self.state = JobState::Done;
                    return Ok(self.state);
                }
                0
            }
            JobState::InProgress { next_block_row } => next_block_row,
            JobState::Done => unreachable!(),
        };

        let timer = Instant::now();
        let end_row = (start_row + max_block_rows).min(self.grid.rows);

        for row in start_row..end_row {
            for col in 0..self.grid.cols {
                let v = eval_block(&self.field, &self.params, &self.transform, &self.grid, row, col);
                self.evaluations += 1;
                if v.is_nan() {
                    continue;
                }
                let (x, y, w, h) = self.grid.block(row, col);
                surface.write_block(
                    x,
                    y,
                    w,
                    h,
                    rgba(self.params.scheme, self.params.clamp, v, self.params.alpha),
                );
            }
        }

        self.elapsed += timer.elapsed();
        self.state = if end_row >= self.grid.rows {
            JobState::Done
        } else {
            JobState::InProgress {
                next_block_row: end_row,
            }
        };
        Ok(self.state)
    }

    /// Drive the job to completion in one call.
    pub fn run_to_completion<S: Surface>(&mut self, surface: &mut S) -> Result<RenderStats> {
        while !self.is_done() {
            self.step(surface, self.grid.rows.max(1))?;
        }
        self.stats()
            .ok_or_else(|| Error::Other("render job did not reach completion".into()))
    }

    /// Accumulated stats; `Some` once the job is done.
    pub fn stats(&self) -> Option<RenderStats> {
        if !self.is_done() {
            return None;
        }
        Some(RenderStats {
            elapsed: self.elapsed,
            evaluations: self.evaluations,
            step_px: self.params.grid_step_px,
            over_budget: false,
        })
    }

    /// The render mode this job implements.
    pub fn mode(&self) -> RenderMode {
        RenderMode::Blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::grid::render;
    use scattermap_colormap::{ColorScheme, ValueRange};
    use scattermap_core::{PixelSurface, Point2};

    fn test_inputs() -> (Arc<Field>, RenderParams, Domain, Viewport) {
        let field = Arc::new(
            Field::new(
                vec![
                    Point2::new(0.0, 0.0),
                    Point2::new(10.0, 0.0),
                    Point2::new(5.0, 10.0),
                ],
                vec![1.0, 5.0, 3.0],
            )
            .unwrap(),
        );
        let params = RenderParams {
            k: 3,
            power: 2.0,
            grid_step_px: 4,
            clamp: ValueRange::new(1.0, 5.0),
            alpha: 1.0,
            scheme: ColorScheme::Turbo,
        };
        let domain = Domain::new([0.0, 10.0], [0.0, 10.0]);
        let viewport = Viewport::new(30, 30, 1.0);
        (field, params, domain, viewport)
    }

    #[test]
    fn state_machine_transitions() {
        let (field, params, domain, viewport) = test_inputs();
        let mut job = RenderJob::new(field, params, domain, viewport).unwrap();
        let mut surface = PixelSurface::new(30, 30);

        assert_eq!(job.state(), JobState::NotStarted);
        assert!(job.stats().is_none());

        // 30px viewport at step 4 -> 8 block rows
        let s = job.step(&mut surface, 3).unwrap();
        assert_eq!(s, JobState::InProgress { next_block_row: 3 });
        let s = job.step(&mut surface, 3).unwrap();
        assert_eq!(s, JobState::InProgress { next_block_row: 6 });
        let s = job.step(&mut surface, 3).unwrap();
        assert_eq!(s, JobState::Done);
        assert!(job.stats().is_some());

        // Stepping a finished job is a no-op
        assert_eq!(job.step(&mut surface, 3).unwrap(), JobState::Done);
    }

    #[test]
    fn incremental_output_matches_one_shot_render() {
        let (field, params, domain, viewport) = test_inputs();

        let mut one_shot = PixelSurface::new(30, 30);
        render(
            &field,
            &params,
            &domain,
            &viewport,
            RenderMode::Blocks,
            None,
            &mut one_shot,
        )
        .unwrap();

        let mut stepped = PixelSurface::new(30, 30);
        let mut job = RenderJob::new(field, params, domain, viewport).unwrap();
        while !job.is_done() {
            job.step(&mut stepped, 2).unwrap();
        }

        assert_eq!(stepped.data(), one_shot.data());
    }

    #[test]
    fn empty_field_completes_immediately_transparent() {
        let (_, params, domain, viewport) = test_inputs();
        let mut job =
            RenderJob::new(Arc::new(Field::empty()), params, domain, viewport).unwrap();
        let mut surface = PixelSurface::new(30, 30);
        surface.write_block(0, 0, 30, 30, [255; 4]);

        assert_eq!(job.step(&mut surface, 1).unwrap(), JobState::Done);
        assert!(surface.data().iter().all(|&b| b == 0));
        assert_eq!(job.stats().unwrap().evaluations, 0);
    }

    #[test]
    fn invalid_params_rejected_at_construction() {
        let (field, params, domain, viewport) = test_inputs();
        let bad = RenderParams { power: -1.0, ..params };
        assert!(RenderJob::new(field, bad, domain, viewport).is_err());
    }

    #[test]
    fn wrong_surface_size_is_rejected() {
        let (field, params, domain, viewport) = test_inputs();
        let mut job = RenderJob::new(field, params, domain, viewport).unwrap();
        let mut surface = PixelSurface::new(8, 8);
        assert!(job.step(&mut surface, 1).is_err());
    }

    #[test]
    fn run_to_completion_yields_stats() {
        let (field, params, domain, viewport) = test_inputs();
        let mut job = RenderJob::new(field, params, domain, viewport).unwrap();
        let mut surface = PixelSurface::new(30, 30);
        let stats = job.run_to_completion(&mut surface).unwrap();
        assert_eq!(stats.evaluations, 8 * 8);
    }
}
