// Affine transforms with cached inverses.
//
// A `Transform` owns its matrix, the inverse and the inverse-transpose. All
// three are computed together on construction so they can never drift apart.

use std::ops::Mul;

use glam::{DMat4, DVec3, DVec4};

use crate::{BoundingBox, MathError, MathResult, Matrix, Point, Ray, Vector};

/// A 4x4 transform together with its cached inverse and inverse-transpose.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: DMat4,
    inverse: DMat4,
    inverse_transpose: DMat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: DMat4::IDENTITY,
        inverse: DMat4::IDENTITY,
        inverse_transpose: DMat4::IDENTITY,
    };

    fn from_parts(matrix: DMat4, inverse: DMat4) -> Self {
        Self {
            matrix,
            inverse,
            inverse_transpose: inverse.transpose(),
        }
    }

    /// Wrap an arbitrary matrix. Fails if it cannot be inverted.
    pub fn new(matrix: DMat4) -> MathResult<Self> {
        let det = matrix.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(MathError::Singular);
        }
        Ok(Self::from_parts(matrix, matrix.inverse()))
    }

    /// Build from a general `Matrix`, inverting it by cofactor expansion.
    pub fn from_matrix(matrix: &Matrix) -> MathResult<Self> {
        let inverse = matrix.inverse()?;
        Ok(Self::from_parts(matrix.to_dmat4()?, inverse.to_dmat4()?))
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let offset = DVec3::new(x, y, z);
        Self::from_parts(DMat4::from_translation(offset), DMat4::from_translation(-offset))
    }

    /// Fails on a zero or non-finite factor, which would flatten space.
    pub fn scaling(x: f64, y: f64, z: f64) -> MathResult<Self> {
        let s = DVec3::new(x, y, z);
        if !s.is_finite() || s.cmpeq(DVec3::ZERO).any() {
            return Err(MathError::Singular);
        }
        Ok(Self::from_parts(DMat4::from_scale(s), DMat4::from_scale(s.recip())))
    }

    pub fn rotation_x(radians: f64) -> Self {
        Self::from_parts(DMat4::from_rotation_x(radians), DMat4::from_rotation_x(-radians))
    }

    pub fn rotation_y(radians: f64) -> Self {
        Self::from_parts(DMat4::from_rotation_y(radians), DMat4::from_rotation_y(-radians))
    }

    pub fn rotation_z(radians: f64) -> Self {
        Self::from_parts(DMat4::from_rotation_z(radians), DMat4::from_rotation_z(-radians))
    }

    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> MathResult<Self> {
        Self::from_matrix(&Matrix::shearing(xy, xz, yx, yz, zx, zy))
    }

    #[inline]
    pub fn matrix(&self) -> &DMat4 {
        &self.matrix
    }

    #[inline]
    pub fn inverse(&self) -> &DMat4 {
        &self.inverse
    }

    #[inline]
    pub fn inverse_transpose(&self) -> &DMat4 {
        &self.inverse_transpose
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == DMat4::IDENTITY
    }

    #[inline]
    pub fn apply_point(&self, p: Point) -> Point {
        Point(self.matrix.transform_point3(p.0))
    }

    #[inline]
    pub fn apply_vector(&self, v: Vector) -> Vector {
        Vector(self.matrix.transform_vector3(v.0))
    }

    #[inline]
    pub fn inverse_point(&self, p: Point) -> Point {
        Point(self.inverse.transform_point3(p.0))
    }

    #[inline]
    pub fn inverse_vector(&self, v: Vector) -> Vector {
        Vector(self.inverse.transform_vector3(v.0))
    }

    /// Take a ray from parent space into this transform's local space.
    #[inline]
    pub fn inverse_ray(&self, ray: &Ray) -> Ray {
        Ray::new(self.inverse_point(ray.origin), self.inverse_vector(ray.direction))
    }

    /// Carry a local-space normal into parent space.
    ///
    /// Uses the inverse-transpose, drops the translated w and renormalizes.
    pub fn normal_to_parent(&self, normal: Vector) -> Vector {
        let n = self.inverse_transpose * DVec4::new(normal.0.x, normal.0.y, normal.0.z, 0.0);
        Vector(n.truncate()).normalize()
    }

    /// Parent-space box of a local-space box.
    pub fn apply_bounds(&self, bounds: &BoundingBox) -> BoundingBox {
        bounds.transform(&self.matrix)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `a * b` applies `b` first, matching matrix order.
impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform::from_parts(self.matrix * rhs.matrix, rhs.inverse * self.inverse)
    }
}
