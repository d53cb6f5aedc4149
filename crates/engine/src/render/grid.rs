//! Viewport rasterization
//!
//! Orchestrates spatial index, KNN, Shepard interpolation and colormap into
//! a full-viewport RGBA raster. Two strategies: block fill (one evaluation
//! per `grid_step_px` cell, solid blocks) and bilinear smoothing (coarse
//! evaluation lattice, per-pixel blending before clamp + colormap).

use std::time::{Duration, Instant};

use ndarray::Array2;
use rayon::prelude::*;
use scattermap_colormap::rgba;
use scattermap_core::{Domain, Error, Point2, Result, Surface, ViewTransform, Viewport};
use tracing::debug;

use crate::field::Field;
use crate::params::{RenderMode, RenderParams};
use crate::render::budget::FrameBudget;
use crate::shepard;
use crate::spatial::k_nearest;

/// Upper bound on the evaluation stride in CSS pixels.
pub const MAX_STEP_PX: u32 = 64;

/// Point density (points per CSS pixel of viewport area) below which the
/// stride is coarsened.
pub const LOW_DENSITY: f64 = 1e-4;

/// Point density above which the stride is refined.
pub const HIGH_DENSITY: f64 = 1e-2;

/// Outcome of a completed render. Advisory only; the frame it describes has
/// already been written in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Wall-clock rasterization time
    pub elapsed: Duration,
    /// Number of Shepard evaluations performed
    pub evaluations: usize,
    /// Stride actually used, in CSS pixels
    pub step_px: u32,
    /// Whether the frame overran the supplied budget
    pub over_budget: bool,
}

/// Density-adaptive stride selection: sparse fields get a coarser (faster)
/// stride, dense fields a finer one, both within `[1, MAX_STEP_PX]`.
pub fn adaptive_step(base_step: u32, n_points: usize, viewport: &Viewport) -> u32 {
    let area = viewport.css_area();
    if area <= 0.0 {
        return base_step.max(1);
    }

    let density = n_points as f64 / area;
    if density < LOW_DENSITY {
        base_step.saturating_mul(2).min(MAX_STEP_PX)
    } else if density > HIGH_DENSITY {
        (base_step / 2).max(1)
    } else {
        base_step.max(1)
    }
}

/// Geometry of the block lattice covering a viewport at device resolution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockGrid {
    pub dev_width: usize,
    pub dev_height: usize,
    /// Stride in device pixels
    pub step: usize,
    /// Block rows covering the viewport
    pub rows: usize,
    /// Block columns covering the viewport
    pub cols: usize,
    pub dpr: f64,
}

impl BlockGrid {
    pub fn new(viewport: &Viewport, grid_step_px: u32) -> Self {
        let dev_width = viewport.device_width();
        let dev_height = viewport.device_height();
        let step = ((grid_step_px as f64 * viewport.device_pixel_ratio).round() as usize).max(1);
        Self {
            dev_width,
            dev_height,
            step,
            rows: dev_height.div_ceil(step),
            cols: dev_width.div_ceil(step),
            dpr: viewport.device_pixel_ratio,
        }
    }

    /// Device-pixel rectangle of the block at (row, col), clipped at the
    /// right/bottom viewport edges.
    pub fn block(&self, row: usize, col: usize) -> (usize, usize, usize, usize) {
        let x = col * self.step;
        let y = row * self.step;
        let w = self.step.min(self.dev_width - x);
        let h = self.step.min(self.dev_height - y);
        (x, y, w, h)
    }
}

/// Shepard estimate at the center of one block. NaN marks "no data".
pub(crate) fn eval_block(
    field: &Field,
    params: &RenderParams,
    transform: &ViewTransform,
    grid: &BlockGrid,
    row: usize,
    col: usize,
) -> f64 {
    let (x, y, w, h) = grid.block(row, col);
    let cx = (x as f64 + w as f64 * 0.5) / grid.dpr;
    let cy = (y as f64 + h as f64 * 0.5) / grid.dpr;
    let q = transform.screen_to_data(Point2::new(cx, cy));

    let neighbors = k_nearest(field.index(), q.x, q.y, params.k);
    shepard::estimate(&neighbors, field.values(), params.power).unwrap_or(f64::NAN)
}

/// Rasterize a full viewport into `surface`.
///
/// Structural errors (invalid parameters, surface size mismatch) are
/// rejected before any pixel write, leaving the surface untouched. An empty
/// field clears the surface to fully transparent and succeeds. The budget,
/// when given, is advisory: the frame always runs to completion and the
/// overrun is reported through [`RenderStats`].
pub fn render<S: Surface>(
    field: &Field,
    params: &RenderParams,
    domain: &Domain,
    viewport: &Viewport,
    mode: RenderMode,
    budget: Option<&FrameBudget>,
    surface: &mut S,
) -> Result<RenderStats> {
    params.validate()?;

    let (dev_w, dev_h) = (viewport.device_width(), viewport.device_height());
    if surface.width() != dev_w || surface.height() != dev_h {
        return Err(Error::SurfaceSizeMismatch {
            expected_width: dev_w,
            expected_height: dev_h,
            actual_width: surface.width(),
            actual_height: surface.height(),
        });
    }

    let started = Instant::now();

    if field.is_empty() {
        surface.clear();
        return Ok(finish(started, 0, params.grid_step_px, budget, mode));
    }

    let transform =
        ViewTransform::from_domain(domain, viewport.width as f64, viewport.height as f64);

    let evaluations = match mode {
        RenderMode::Blocks => render_blocks(field, params, &transform, viewport, surface),
        RenderMode::Smooth => render_smooth(field, params, &transform, viewport, surface)?,
    };

    Ok(finish(started, evaluations, params.grid_step_px, budget, mode))
}

fn finish(
    started: Instant,
    evaluations: usize,
    step_px: u32,
    budget: Option<&FrameBudget>,
    mode: RenderMode,
) -> RenderStats {
    let elapsed = started.elapsed();
    let over_budget = budget.is_some_and(|b| b.is_exceeded(elapsed));
    if over_budget {
        debug!(?elapsed, ?mode, "frame budget exceeded");
    } else {
        debug!(?elapsed, ?mode, evaluations, "render complete");
    }
    RenderStats {
        elapsed,
        evaluations,
        step_px,
        over_budget,
    }
}

/// Block-fill mode: one evaluation per block, flood the block.
fn render_blocks<S: Surface>(
    field: &Field,
    params: &RenderParams,
    transform: &ViewTransform,
    viewport: &Viewport,
    surface: &mut S,
) -> usize {
    let grid = BlockGrid::new(viewport, params.grid_step_px);
    field.index(); // build outside the parallel region

    let values: Vec<f64> = (0..grid.rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_values = vec![f64::NAN; grid.cols];
            for (col, slot) in row_values.iter_mut().enumerate() {
                *slot = eval_block(field, params, transform, &grid, row, col);
            }
            row_values
        })
        .collect();

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let v = values[row * grid.cols + col];
            if v.is_nan() {
                continue;
            }
            let (x, y, w, h) = grid.block(row, col);
            surface.write_block(x, y, w, h, rgba(params.scheme, params.clamp, v, params.alpha));
        }
    }

    grid.rows * grid.cols
}

/// Smooth mode: evaluate a coarse node lattice, then bilinearly blend the
/// four enclosing node values per pixel before clamp + colormap.
fn render_smooth<S: Surface>(
    field: &Field,
    params: &RenderParams,
    transform: &ViewTransform,
    viewport: &Viewport,
    surface: &mut S,
) -> Result<usize> {
    let grid = BlockGrid::new(viewport, params.grid_step_px);
    field.index();

    // One node past the block count on each axis so every pixel center has
    // four enclosing nodes.
    let node_rows = grid.rows + 1;
    let node_cols = grid.cols + 1;

    let flat: Vec<f64> = (0..node_rows)
        .into_par_iter()
        .flat_map(|j| {
            let mut row_values = vec![f64::NAN; node_cols];
            for (i, slot) in row_values.iter_mut().enumerate() {
                let cx = (i * grid.step) as f64 / grid.dpr;
                let cy = (j * grid.step) as f64 / grid.dpr;
                let q = transform.screen_to_data(Point2::new(cx, cy));
                let neighbors = k_nearest(field.index(), q.x, q.y, params.k);
                *slot = shepard::estimate(&neighbors, field.values(), params.power)
                    .unwrap_or(f64::NAN);
            }
            row_values
        })
        .collect();

    let lattice = Array2::from_shape_vec((node_rows, node_cols), flat)
        .map_err(|e| Error::Other(format!("lattice shape: {e}")))?;

    let step = grid.step as f64;
    for y in 0..grid.dev_height {
        let fy = (y as f64 + 0.5) / step;
        let j = (fy as usize).min(node_rows - 2);
        let ty = fy - j as f64;

        for x in 0..grid.dev_width {
            let fx = (x as f64 + 0.5) / step;
            let i = (fx as usize).min(node_cols - 2);
            let tx = fx - i as f64;

            let v00 = lattice[(j, i)];
            let v10 = lattice[(j, i + 1)];
            let v01 = lattice[(j + 1, i)];
            let v11 = lattice[(j + 1, i + 1)];
            if v00.is_nan() || v10.is_nan() || v01.is_nan() || v11.is_nan() {
                continue;
            }

            let top = v00 * (1.0 - tx) + v10 * tx;
            let bottom = v01 * (1.0 - tx) + v11 * tx;
            let v = top * (1.0 - ty) + bottom * ty;

            surface.write_pixel(x, y, rgba(params.scheme, params.clamp, v, params.alpha));
        }
    }

    Ok(node_rows * node_cols)
}
