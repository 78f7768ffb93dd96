//! Unit sphere centred on the object-space origin.

use lumen_math::{BoundingBox, Point, Ray, Vector};

use crate::{Intersection, Intersections, ShapeId};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sphere;

impl Sphere {
    pub fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Intersections) {
        let sphere_to_ray = ray.origin - Point::ORIGIN;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(sphere_to_ray);
        let c = sphere_to_ray.dot(sphere_to_ray) - 1.0;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return;
        }

        let (t0, t1) = if discriminant == 0.0 {
            let t = -0.5 * b / a;
            (t, t)
        } else {
            // Avoid cancellation between b and the root
            let root = discriminant.sqrt();
            let q = if b > 0.0 {
                -0.5 * (b + root)
            } else {
                -0.5 * (b - root)
            };
            let (t0, t1) = (q / a, c / q);
            if t0 > t1 {
                (t1, t0)
            } else {
                (t0, t1)
            }
        };

        xs.insert(Intersection::new(t0, id));
        xs.insert(Intersection::new(t1, id));
    }

    pub fn local_normal_at(&self, point: Point) -> Vector {
        point - Point::ORIGIN
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0))
    }
}
