//! Flat and smooth triangles.
//!
//! Intersection is Möller–Trumbore against precomputed edges. A smooth
//! triangle carries one normal per vertex and blends them with the
//! barycentric `(u, v)` recorded on the hit.

use lumen_math::{BoundingBox, Point, Ray, Vector, EPSILON};

use crate::{Intersection, Intersections, ShapeId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    e1: Vector,
    e2: Vector,
    normal: Vector,
    vertex_normals: Option<[Vector; 3]>,
}

impl Triangle {
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal: e2.cross(e1).normalize(),
            vertex_normals: None,
        }
    }

    /// A triangle whose shading normal is interpolated from `n1..n3`.
    pub fn smooth(p1: Point, p2: Point, p3: Point, n1: Vector, n2: Vector, n3: Vector) -> Self {
        Self {
            vertex_normals: Some([n1, n2, n3]),
            ..Self::new(p1, p2, p3)
        }
    }

    pub fn e1(&self) -> Vector {
        self.e1
    }

    pub fn e2(&self) -> Vector {
        self.e2
    }

    /// Geometric (flat) normal.
    pub fn normal(&self) -> Vector {
        self.normal
    }

    pub fn vertex_normals(&self) -> Option<&[Vector; 3]> {
        self.vertex_normals.as_ref()
    }

    pub fn is_smooth(&self) -> bool {
        self.vertex_normals.is_some()
    }

    pub fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Intersections) {
        let dir_cross_e2 = ray.direction.cross(self.e2);
        let det = self.e1.dot(dir_cross_e2);
        if det.abs() < EPSILON {
            return;
        }

        let f = 1.0 / det;
        let p1_to_origin = ray.origin - self.p1;
        let u = f * p1_to_origin.dot(dir_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return;
        }

        let origin_cross_e1 = p1_to_origin.cross(self.e1);
        let v = f * ray.direction.dot(origin_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return;
        }

        let t = f * self.e2.dot(origin_cross_e1);
        xs.insert(Intersection::with_uv(t, id, u, v));
    }

    pub fn local_normal_at(&self, _point: Point, hit: &Intersection) -> Vector {
        match &self.vertex_normals {
            Some([n1, n2, n3]) => *n2 * hit.u + *n3 * hit.v + *n1 * (1.0 - hit.u - hit.v),
            None => self.normal,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        let mut b = BoundingBox::EMPTY;
        b.add_point(self.p1);
        b.add_point(self.p2);
        b.add_point(self.p3);
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> Triangle {
        Triangle::new(
            Point::new(0.0, 1.0, 0.0),
            Point::new(-1.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
        )
    }

    fn smooth_tri() -> Triangle {
        Triangle::smooth(
            Point::new(0.0, 1.0, 0.0),
            Point::new(-1.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Vector::new(0.0, 1.0, 0.0),
            Vector::new(-1.0, 0.0, 0.0),
            Vector::new(1.0, 0.0, 0.0),
        )
    }

    fn hits(t: &Triangle, origin: Point, direction: Vector) -> Intersections {
        let mut xs = Intersections::new();
        t.local_intersect(&Ray::new(origin, direction), ShapeId::from_index(0), &mut xs);
        xs
    }

    #[test]
    fn test_construction_precomputes_edges_and_normal() {
        let t = tri();
        assert_eq!(t.e1(), Vector::new(-1.0, -1.0, 0.0));
        assert_eq!(t.e2(), Vector::new(1.0, -1.0, 0.0));
        assert_eq!(t.normal(), Vector::new(0.0, 0.0, -1.0));
        assert!(!t.is_smooth());
    }

    #[test]
    fn test_flat_normal_everywhere() {
        let t = tri();
        let hit = Intersection::new(1.0, ShapeId::from_index(0));
        for p in [
            Point::new(0.0, 0.5, 0.0),
            Point::new(-0.5, 0.75, 0.0),
            Point::new(0.5, 0.25, 0.0),
        ] {
            assert_eq!(t.local_normal_at(p, &hit), t.normal());
        }
    }

    #[test]
    fn test_parallel_ray_misses() {
        let xs = hits(&tri(), Point::new(0.0, -1.0, -2.0), Vector::new(0.0, 1.0, 0.0));
        assert!(xs.is_empty());
    }

    #[test]
    fn test_ray_misses_each_edge() {
        let t = tri();
        let dir = Vector::new(0.0, 0.0, 1.0);
        assert!(hits(&t, Point::new(1.0, 1.0, -2.0), dir).is_empty());
        assert!(hits(&t, Point::new(-1.0, 1.0, -2.0), dir).is_empty());
        assert!(hits(&t, Point::new(0.0, -1.0, -2.0), dir).is_empty());
    }

    #[test]
    fn test_ray_strikes_triangle() {
        let xs = hits(&tri(), Point::new(0.0, 0.5, -2.0), Vector::new(0.0, 0.0, 1.0));
        assert_eq!(xs.len(), 1);
        assert!((xs[0].t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_smooth_hit_stores_uv() {
        let xs = hits(&smooth_tri(), Point::new(-0.2, 0.3, -2.0), Vector::new(0.0, 0.0, 1.0));
        assert!((xs[0].u - 0.45).abs() < 1e-4);
        assert!((xs[0].v - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_smooth_normal_interpolates() {
        let t = smooth_tri();
        let hit = Intersection::with_uv(1.0, ShapeId::from_index(0), 0.45, 0.25);
        let n = t.local_normal_at(Point::ORIGIN, &hit).normalize();
        assert!(n.approx_eq(&Vector::new(-0.5547, 0.83205, 0.0)));
    }

    #[test]
    fn test_bounds_enclose_vertices() {
        let t = Triangle::new(
            Point::new(-3.0, 7.0, 2.0),
            Point::new(6.0, 2.0, -4.0),
            Point::new(2.0, -1.0, -1.0),
        );
        let b = t.bounds();
        assert_eq!(b.min, Point::new(-3.0, -1.0, -4.0));
        assert_eq!(b.max, Point::new(6.0, 7.0, 2.0));
    }
}
