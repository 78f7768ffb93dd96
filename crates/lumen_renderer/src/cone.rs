//! Double-napped cone around the y axis with its apex at the origin.

use lumen_math::{BoundingBox, Point, Ray, Vector, EPSILON};

use crate::cylinder::within_radius;
use crate::{Intersection, Intersections, ShapeId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    pub min: f64,
    pub max: f64,
    pub closed: bool,
}

impl Default for Cone {
    fn default() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            closed: false,
        }
    }
}

impl Cone {
    pub fn new(min: f64, max: f64, closed: bool) -> Self {
        Self { min, max, closed }
    }

    pub fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Intersections) {
        let (o, d) = (ray.origin, ray.direction);
        let a = d.x() * d.x() - d.y() * d.y() + d.z() * d.z();
        let b = 2.0 * (o.x() * d.x() - o.y() * d.y() + o.z() * d.z());
        let c = o.x() * o.x() - o.y() * o.y() + o.z() * o.z();

        self.intersect_caps(ray, id, xs);

        // Parallel to one nappe: at most a single side hit
        if a.abs() < EPSILON {
            if b.abs() >= EPSILON {
                xs.insert(Intersection::new(-c / (2.0 * b), id));
            }
            return;
        }

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
    }

    fn intersect_caps(&self, ray: &Ray, id: ShapeId, xs: &mut Intersections) {
        if !self.closed || ray.direction.y().abs() < EPSILON {
            return;
        }
        for cap in [self.min, self.max] {
            let t = (cap - ray.origin.y()) / ray.direction.y();
            if within_radius(ray, t, cap * cap) {
                xs.insert(Intersection::new(t, id));
            }
        }
    }

    pub fn local_normal_at(&self, point: Point) -> Vector {
        let dist = point.x() * point.x() + point.z() * point.z();
        if dist < self.max * self.max && point.y() >= self.max - EPSILON {
            return Vector::new(0.0, 1.0, 0.0);
        }
        if dist < self.min * self.min && point.y() <= self.min + EPSILON {
            return Vector::new(0.0, -1.0, 0.0);
        }

        let mut y = dist.sqrt();
        if point.y() > 0.0 {
            y = -y;
        }
        Vector::new(point.x(), y, point.z())
    }

    pub fn bounds(&self) -> BoundingBox {
        let limit = self.min.abs().max(self.max.abs());
        BoundingBox::new(
            Point::new(-limit, self.min, -limit),
            Point::new(limit, self.max, limit),
        )
    }
}
