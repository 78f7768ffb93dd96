//! Axis-aligned cube spanning `[-1, 1]` on every axis.

use lumen_math::{slab, BoundingBox, Point, Ray, Vector};

use crate::{Intersection, Intersections, ShapeId};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cube;

impl Cube {
    pub fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Intersections) {
        let (xtmin, xtmax) = slab(-1.0, 1.0, ray.origin.x(), ray.direction.x());
        let (ytmin, ytmax) = slab(-1.0, 1.0, ray.origin.y(), ray.direction.y());
        let (ztmin, ztmax) = slab(-1.0, 1.0, ray.origin.z(), ray.direction.z());

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);
        if tmin > tmax {
            return;
        }

        xs.insert(Intersection::new(tmin, id));
        xs.insert(Intersection::new(tmax, id));
    }

    pub fn local_normal_at(&self, point: Point) -> Vector {
        let (ax, ay, az) = (point.x().abs(), point.y().abs(), point.z().abs());
        let maxc = ax.max(ay).max(az);

        if maxc == ax {
            Vector::new(point.x(), 0.0, 0.0)
        } else if maxc == ay {
            Vector::new(0.0, point.y(), 0.0)
        } else {
            Vector::new(0.0, 0.0, point.z())
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0))
    }
}
