//! Point and rectangular area lights.
//!
//! Every light is a grid of sample points, computed once at construction.
//! A point light is the one-cell grid with zero-length edges.

use lumen_math::{Color, Point, Vector};
use rand::{Rng, RngCore};

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    corner: Point,
    uvec: Vector,
    usteps: u32,
    vvec: Vector,
    vsteps: u32,
    intensity: Color,
    jitter: bool,
    samples: Vec<Point>,
}

impl Light {
    pub fn point(position: Point, intensity: Color) -> Self {
        Self {
            corner: position,
            uvec: Vector::ZERO,
            usteps: 1,
            vvec: Vector::ZERO,
            vsteps: 1,
            intensity,
            jitter: false,
            samples: vec![position],
        }
    }

    /// Area light spanning `corner + [0, 1]·uvec + [0, 1]·vvec`, sampled at
    /// the centre of each of its `usteps × vsteps` cells.
    pub fn area(
        corner: Point,
        uvec: Vector,
        usteps: u32,
        vvec: Vector,
        vsteps: u32,
        intensity: Color,
    ) -> Self {
        let mut light = Self::grid(corner, uvec, usteps, vvec, vsteps, intensity, false);
        light.samples = light.cells().map(|(u, v)| light.point_at(u, v)).collect();
        light
    }

    /// Area light with each sample placed randomly inside its cell.
    pub fn area_jittered(
        corner: Point,
        uvec: Vector,
        usteps: u32,
        vvec: Vector,
        vsteps: u32,
        intensity: Color,
        rng: &mut dyn RngCore,
    ) -> Self {
        let mut light = Self::grid(corner, uvec, usteps, vvec, vsteps, intensity, true);
        light.samples = light
            .cells()
            .map(|(u, v)| light.cell_point(u as f64 + rng.gen::<f64>(), v as f64 + rng.gen::<f64>()))
            .collect();
        light
    }

    fn grid(
        corner: Point,
        uvec: Vector,
        usteps: u32,
        vvec: Vector,
        vsteps: u32,
        intensity: Color,
        jitter: bool,
    ) -> Self {
        let usteps = usteps.max(1);
        let vsteps = vsteps.max(1);
        Self {
            corner,
            uvec,
            usteps,
            vvec,
            vsteps,
            intensity,
            jitter,
            samples: Vec::with_capacity((usteps * vsteps) as usize),
        }
    }

    /// Cell indices, v outer and u inner.
    fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        let usteps = self.usteps;
        (0..self.vsteps).flat_map(move |v| (0..usteps).map(move |u| (u, v)))
    }

    fn cell_point(&self, u: f64, v: f64) -> Point {
        self.corner + self.uvec * (u / self.usteps as f64) + self.vvec * (v / self.vsteps as f64)
    }

    /// Centre of cell `(u, v)`.
    pub fn point_at(&self, u: u32, v: u32) -> Point {
        self.cell_point(u as f64 + 0.5, v as f64 + 0.5)
    }

    /// Precomputed sample positions.
    pub fn samples(&self) -> &[Point] {
        &self.samples
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Corner of an area light, or the position of a point light.
    pub fn position(&self) -> Point {
        self.corner
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }

    pub fn is_jittered(&self) -> bool {
        self.jitter
    }

    pub fn usteps(&self) -> u32 {
        self.usteps
    }

    pub fn vsteps(&self) -> u32 {
        self.vsteps
    }
}
