//! Lumen math - homogeneous tuples, matrices, transforms and bounds.
//!
//! All geometry is double precision. glam's `DVec3`/`DMat4` do the heavy
//! lifting; the types here add the point/vector distinction, checked
//! general-size matrices and the cached-inverse transform used by shapes.

// Re-export glam for convenience
pub use glam::{DMat4, DVec3, DVec4};

mod bounds;
mod error;
mod matrix;
mod ray;
mod transform;
mod tuple;

pub use bounds::{slab, BoundingBox};
pub use error::{MathError, MathResult};
pub use matrix::Matrix;
pub use ray::Ray;
pub use transform::Transform;
pub use tuple::{vec_approx_eq, Color, Point, Tuple, Vector};

/// Tolerance for float comparisons and surface offsets.
pub const EPSILON: f64 = 0.00001;

/// Float equality within `EPSILON`; equal infinities compare equal.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() < EPSILON
}

/// Floored modulo: the result has the sign of `d`.
#[inline]
pub fn float_mod(v: f64, d: f64) -> f64 {
    v - d * (v / d).floor()
}
