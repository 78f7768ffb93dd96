//! Radius-1 cylinder around the y axis, optionally truncated and capped.

use lumen_math::{BoundingBox, Point, Ray, Vector, EPSILON};

use crate::{Intersection, Intersections, ShapeId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub min: f64,
    pub max: f64,
    pub closed: bool,
}

impl Default for Cylinder {
    fn default() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            closed: false,
        }
    }
}

impl Cylinder {
    pub fn new(min: f64, max: f64, closed: bool) -> Self {
        Self { min, max, closed }
    }

    pub fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Intersections) {
        let (o, d) = (ray.origin, ray.direction);
        let a = d.x() * d.x() + d.z() * d.z();

        // Parallel to the axis: only the caps can be hit
        if a.abs() < EPSILON {
            self.intersect_caps(ray, id, xs);
            return;
        }

        let b = 2.0 * o.x() * d.x() + 2.0 * o.z() * d.z();
        let c = o.x() * o.x() + o.z() * o.z() - 1.0;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return;
        }

        let root = discriminant.sqrt();
        let mut t0 = (-b - root) / (2.0 * a);
        let mut t1 = (-b + root) / (2.0 * a);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        for t in [t0, t1] {
            let y = o.y() + t * d.y();
            if self.min < y && y < self.max {
                xs.insert(Intersection::new(t, id));
            }
        }

        self.intersect_caps(ray, id, xs);
    }

    fn intersect_caps(&self, ray: &Ray, id: ShapeId, xs: &mut Intersections) {
        if !self.closed || ray.direction.y().abs() < EPSILON {
            return;
        }
        for cap in [self.min, self.max] {
            let t = (cap - ray.origin.y()) / ray.direction.y();
            if within_radius(ray, t, 1.0) {
                xs.insert(Intersection::new(t, id));
            }
        }
    }

    pub fn local_normal_at(&self, point: Point) -> Vector {
        let dist = point.x() * point.x() + point.z() * point.z();
        if dist < 1.0 && point.y() >= self.max - EPSILON {
            Vector::new(0.0, 1.0, 0.0)
        } else if dist < 1.0 && point.y() <= self.min + EPSILON {
            Vector::new(0.0, -1.0, 0.0)
        } else {
            Vector::new(point.x(), 0.0, point.z())
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(Point::new(-1.0, self.min, -1.0), Point::new(1.0, self.max, 1.0))
    }
}

/// Whether the ray at `t` lies within `radius_sq` of the y axis.
pub(crate) fn within_radius(ray: &Ray, t: f64, radius_sq: f64) -> bool {
    let x = ray.origin.x() + t * ray.direction.x();
    let z = ray.origin.z() + t * ray.direction.z();
    x * x + z * z <= radius_sq
}
