//! Homogeneous tuples and the typed point/vector pair built on top of them.
//!
//! `Tuple` is the checked 4-component form: every operation that could
//! leave `w` outside `[0, 1]` returns a `MathError`. The renderer works with
//! `Point` and `Vector` instead, which only implement the valid operations,
//! so adding two points or negating a point does not compile.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use glam::{DVec3, DVec4};

use crate::{approx_eq, MathError, MathResult, EPSILON};

/// RGB color. The fourth homogeneous channel is never stored.
pub type Color = DVec3;

/// A raw homogeneous `(x, y, z, w)` tuple.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tuple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Tuple {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 1.0)
    }

    pub const fn vector(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 0.0)
    }

    pub fn is_point(&self) -> bool {
        approx_eq(self.w, 1.0)
    }

    pub fn is_vector(&self) -> bool {
        approx_eq(self.w, 0.0)
    }

    /// Component by index (0 = x .. 3 = w).
    pub fn get(&self, index: usize) -> MathResult<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(MathError::IndexOutOfRange(index)),
        }
    }

    pub fn set(&mut self, index: usize, value: f64) -> MathResult<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            3 => self.w = value,
            _ => return Err(MathError::IndexOutOfRange(index)),
        }
        Ok(())
    }

    /// Rejects `w` outside `[0, 1]`, allowing `EPSILON` of drift on either side.
    pub fn validated(self) -> MathResult<Self> {
        if self.w < -EPSILON || self.w > 1.0 + EPSILON {
            Err(MathError::InvalidW(self.w))
        } else {
            Ok(self)
        }
    }

    pub fn checked_add(self, rhs: Tuple) -> MathResult<Tuple> {
        Tuple::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w).validated()
    }

    pub fn checked_sub(self, rhs: Tuple) -> MathResult<Tuple> {
        Tuple::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w).validated()
    }

    pub fn checked_neg(self) -> MathResult<Tuple> {
        if !self.is_vector() {
            return Err(MathError::PointOperation("negate"));
        }
        Ok(Tuple::new(-self.x, -self.y, -self.z, 0.0))
    }

    pub fn checked_scale(self, s: f64) -> MathResult<Tuple> {
        if !self.is_vector() {
            return Err(MathError::PointOperation("scale"));
        }
        Ok(Tuple::new(self.x * s, self.y * s, self.z * s, 0.0))
    }

    pub fn checked_div(self, s: f64) -> MathResult<Tuple> {
        if !self.is_vector() {
            return Err(MathError::PointOperation("divide"));
        }
        Ok(Tuple::new(self.x / s, self.y / s, self.z / s, 0.0))
    }

    pub fn approx_eq(&self, other: &Tuple) -> bool {
        approx_eq(self.x, other.x)
            && approx_eq(self.y, other.y)
            && approx_eq(self.z, other.z)
            && approx_eq(self.w, other.w)
    }
}

impl From<DVec4> for Tuple {
    fn from(v: DVec4) -> Self {
        Tuple::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Tuple> for DVec4 {
    fn from(t: Tuple) -> Self {
        DVec4::new(t.x, t.y, t.z, t.w)
    }
}

impl From<Point> for Tuple {
    fn from(p: Point) -> Self {
        Tuple::point(p.0.x, p.0.y, p.0.z)
    }
}

impl From<Vector> for Tuple {
    fn from(v: Vector) -> Self {
        Tuple::vector(v.0.x, v.0.y, v.0.z)
    }
}

impl TryFrom<Tuple> for Point {
    type Error = MathError;

    fn try_from(t: Tuple) -> MathResult<Self> {
        if t.is_point() {
            Ok(Point::new(t.x, t.y, t.z))
        } else {
            Err(MathError::InvalidW(t.w))
        }
    }
}

impl TryFrom<Tuple> for Vector {
    type Error = MathError;

    fn try_from(t: Tuple) -> MathResult<Self> {
        if t.is_vector() {
            Ok(Vector::new(t.x, t.y, t.z))
        } else {
            Err(MathError::InvalidW(t.w))
        }
    }
}

/// A position in space (`w = 1`).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point(pub DVec3);

impl Point {
    pub const ORIGIN: Point = Point(DVec3::ZERO);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn approx_eq(&self, other: &Point) -> bool {
        vec_approx_eq(self.0, other.0)
    }
}

/// A direction or displacement (`w = 0`).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vector(pub DVec3);

impl Vector {
    pub const ZERO: Vector = Vector(DVec3::ZERO);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn dot(&self, rhs: Vector) -> f64 {
        self.0.dot(rhs.0)
    }

    #[inline]
    pub fn cross(&self, rhs: Vector) -> Vector {
        Vector(self.0.cross(rhs.0))
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.0.length()
    }

    #[inline]
    pub fn normalize(&self) -> Vector {
        Vector(self.0.normalize())
    }

    /// Reflect this vector around `normal`.
    pub fn reflect(&self, normal: Vector) -> Vector {
        *self - normal * 2.0 * self.dot(normal)
    }

    pub fn approx_eq(&self, other: &Vector) -> bool {
        vec_approx_eq(self.0, other.0)
    }
}

/// Component-wise `approx_eq` for raw glam vectors (also used for colors).
pub fn vec_approx_eq(a: DVec3, b: DVec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, rhs: Vector) -> Point {
        Point(self.0 - rhs.0)
    }
}

impl Sub<Point> for Point {
    type Output = Vector;
    fn sub(self, rhs: Point) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.0 += rhs.0;
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        Vector(self.0 * rhs)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector {
        Vector(rhs.0 * self)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;
    fn div(self, rhs: f64) -> Vector {
        Vector(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_kinds() {
        assert!(Tuple::point(4.3, -4.2, 3.1).is_point());
        assert!(!Tuple::point(4.3, -4.2, 3.1).is_vector());
        assert!(Tuple::vector(4.3, -4.2, 3.1).is_vector());
    }

    #[test]
    fn test_tuple_index() {
        let mut t = Tuple::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(t.get(2), Ok(3.0));
        assert_eq!(t.get(4), Err(MathError::IndexOutOfRange(4)));
        t.set(0, 5.0).unwrap();
        assert_eq!(t.x, 5.0);
        assert!(t.set(7, 1.0).is_err());
    }

    #[test]
    fn test_point_plus_vector_is_point() {
        let p = Tuple::point(3.0, -2.0, 5.0);
        let v = Tuple::vector(-2.0, 3.0, 1.0);
        let sum = p.checked_add(v).unwrap();
        assert!(sum.approx_eq(&Tuple::point(1.0, 1.0, 6.0)));
    }

    #[test]
    fn test_point_plus_point_fails() {
        let p = Tuple::point(3.0, -2.0, 5.0);
        assert_eq!(p.checked_add(p), Err(MathError::InvalidW(2.0)));
    }

    #[test]
    fn test_vector_minus_point_fails() {
        let p = Tuple::point(3.0, 2.0, 1.0);
        let v = Tuple::vector(5.0, 6.0, 7.0);
        assert!(v.checked_sub(p).is_err());
        assert!(p.checked_sub(v).unwrap().is_point());
        assert!(p.checked_sub(p).unwrap().is_vector());
    }

    #[test]
    fn test_point_negate_and_scale_fail() {
        let p = Tuple::point(1.0, -2.0, 3.0);
        assert!(p.checked_neg().is_err());
        assert!(p.checked_scale(3.5).is_err());
        assert!(p.checked_div(2.0).is_err());

        let v = Tuple::vector(1.0, -2.0, 3.0);
        assert!(v.checked_neg().unwrap().approx_eq(&Tuple::vector(-1.0, 2.0, -3.0)));
        assert!(v.checked_scale(0.5).unwrap().approx_eq(&Tuple::vector(0.5, -1.0, 1.5)));
    }

    #[test]
    fn test_w_drift_is_tolerated() {
        let drifted = Tuple::new(1.0, 2.0, 3.0, 1.0 + EPSILON / 2.0);
        assert!(drifted.validated().is_ok());
        assert!(Point::try_from(drifted).is_ok());

        let broken = Tuple::new(1.0, 2.0, 3.0, 1.1);
        assert!(broken.validated().is_err());
    }

    #[test]
    fn test_typed_conversions() {
        let p: Tuple = Point::new(1.0, 2.0, 3.0).into();
        assert_eq!(p.w, 1.0);
        assert!(Vector::try_from(p).is_err());
        let v: Tuple = Vector::new(1.0, 2.0, 3.0).into();
        assert_eq!(v.w, 0.0);
    }

    #[test]
    fn test_vector_ops() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(2.0, 3.0, 4.0);
        assert_eq!(a.dot(b), 20.0);
        assert_eq!(a.cross(b), Vector::new(-1.0, 2.0, -1.0));
        assert_eq!(b.cross(a), Vector::new(1.0, -2.0, 1.0));
        assert!((Vector::new(1.0, 2.0, 3.0).magnitude() - 14.0_f64.sqrt()).abs() < 1e-9);
        assert!((a.normalize().magnitude() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_arithmetic() {
        let p1 = Point::new(3.0, 2.0, 1.0);
        let p2 = Point::new(5.0, 6.0, 7.0);
        assert_eq!(p1 - p2, Vector::new(-2.0, -4.0, -6.0));
        assert_eq!(p1 - Vector::new(5.0, 6.0, 7.0), Point::new(-2.0, -4.0, -6.0));
    }

    #[test]
    fn test_reflect() {
        let v = Vector::new(1.0, -1.0, 0.0);
        let n = Vector::new(0.0, 1.0, 0.0);
        assert_eq!(v.reflect(n), Vector::new(1.0, 1.0, 0.0));

        let v = Vector::new(0.0, -1.0, 0.0);
        let h = 2.0_f64.sqrt() / 2.0;
        let n = Vector::new(h, h, 0.0);
        assert!(v.reflect(n).approx_eq(&Vector::new(1.0, 0.0, 0.0)));
    }
}
