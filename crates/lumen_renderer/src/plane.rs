//! Infinite xz plane through the object-space origin.

use lumen_math::{BoundingBox, Point, Ray, Vector, EPSILON};

use crate::{Intersection, Intersections, ShapeId};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Plane;

impl Plane {
    pub fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Intersections) {
        if ray.direction.y().abs() < EPSILON {
            return;
        }
        let t = -ray.origin.y() / ray.direction.y();
        xs.insert(Intersection::new(t, id));
    }

    pub fn local_normal_at(&self, _point: Point) -> Vector {
        Vector::new(0.0, 1.0, 0.0)
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            Point::new(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY),
            Point::new(f64::INFINITY, 0.0, f64::INFINITY),
        )
    }
}
