//! Parallel Whitted-style renderer.
//!
//! Rows are traced independently on the rayon pool, each with its own
//! seeded RNG, so a given seed always produces the same image regardless of
//! how rows are scheduled. Finished rows are written to the canvas on the
//! calling thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use lumen_core::Canvas;
use lumen_math::Color;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;

use crate::{Camera, RenderResult, World, DEFAULT_RECURSION_DEPTH};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Bounces allowed for reflection and refraction rays
    pub max_depth: u32,
    /// Base seed for per-row RNGs
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_RECURSION_DEPTH,
            seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Color of a single pixel.
///
/// Focal samples are averaged per sub-pixel offset, then the sub-pixel
/// results are averaged. A supersampling level of 1 shoots through the
/// pixel centre.
pub fn render_pixel(
    world: &World,
    camera: &Camera,
    px: usize,
    py: usize,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<Color> {
    let samples = camera.supersampling();
    let focal_samples = camera.focal_samples();

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples {
        let (u, v) = if samples == 1 {
            (0.5, 0.5)
        } else {
            (rng.gen::<f64>(), rng.gen::<f64>())
        };

        let mut focal_color = Color::ZERO;
        for _ in 0..focal_samples {
            let ray = camera.ray_for_pixel(px, py, u, v, rng);
            focal_color += world.color_at(&ray, config.max_depth)?;
        }
        pixel_color += focal_color / focal_samples as f64;
    }

    Ok(pixel_color / samples as f64)
}

/// Trace one row. Returns `None` if cancelled before the row completed.
fn render_row(
    world: &World,
    camera: &Camera,
    y: usize,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> RenderResult<Option<Vec<Color>>> {
    if cancel.load(Ordering::Relaxed) {
        return Ok(None);
    }

    let mut rng = StdRng::seed_from_u64(config.seed ^ y as u64);
    let mut pixels = Vec::with_capacity(camera.hsize());
    for x in 0..camera.hsize() {
        if cancel.load(Ordering::Relaxed) {
            return Ok(None);
        }
        pixels.push(render_pixel(world, camera, x, y, config, &mut rng)?);
    }

    log::debug!("Row {} done", y);
    Ok(Some(pixels))
}

/// Render `world` through `camera`.
///
/// Setting `cancel` stops the render early: rows that finished are kept and
/// the rest of the canvas stays black.
pub fn render(
    world: &World,
    camera: &Camera,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> RenderResult<Canvas> {
    let (width, height) = (camera.hsize(), camera.vsize());
    log::info!(
        "Rendering {}x{} ({} shapes, {} lights, depth {})",
        width,
        height,
        world.shapes.len(),
        world.lights.len(),
        config.max_depth
    );
    let start = Instant::now();

    let rows: Vec<Option<Vec<Color>>> = (0..height)
        .into_par_iter()
        .map(|y| render_row(world, camera, y, config, cancel))
        .collect::<RenderResult<_>>()?;

    let mut canvas = Canvas::new(width as u32, height as u32);
    let mut finished = 0;
    for (y, row) in rows.iter().enumerate() {
        if let Some(pixels) = row {
            canvas.put_row(y as u32, pixels)?;
            finished += 1;
        }
    }

    if finished < height {
        log::warn!("Render cancelled: {}/{} rows finished", finished, height);
    } else {
        log::info!("Render finished in {:.2?}", start.elapsed());
    }
    Ok(canvas)
}
