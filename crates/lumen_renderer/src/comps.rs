//! Shading state precomputed once per hit.

use lumen_math::{Point, Ray, Vector, EPSILON};

use crate::{Intersection, Intersections, RenderResult, ShapeId, Shapes};

/// Everything `shade_hit` needs about a hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comps {
    pub t: f64,
    pub object: ShapeId,
    pub point: Point,
    pub eyev: Vector,
    pub normalv: Vector,
    pub inside: bool,
    pub reflectv: Vector,
    /// `point` nudged along the normal, used for shadow and reflection rays.
    pub over_point: Point,
    /// `point` nudged against the normal, used for refraction rays.
    pub under_point: Point,
    /// Refractive index of the medium the ray leaves.
    pub n1: f64,
    /// Refractive index of the medium the ray enters.
    pub n2: f64,
}

impl Comps {
    /// Prepare shading state for `hit`, which must be one of `xs`.
    ///
    /// `xs` is walked up to the hit to find which objects the ray is inside
    /// of on either side of the surface.
    pub fn prepare(
        hit: &Intersection,
        ray: &Ray,
        xs: &Intersections,
        shapes: &Shapes,
    ) -> RenderResult<Self> {
        let point = ray.position(hit.t);
        let eyev = -ray.direction;
        let mut normalv = shapes.normal_at(hit.object, point, hit)?;
        let inside = normalv.dot(eyev) < 0.0;
        if inside {
            normalv = -normalv;
        }
        let reflectv = ray.direction.reflect(normalv);
        let (n1, n2) = refractive_indices(hit, xs, shapes);

        Ok(Self {
            t: hit.t,
            object: hit.object,
            point,
            eyev,
            normalv,
            inside,
            reflectv,
            over_point: point + normalv * EPSILON,
            under_point: point - normalv * EPSILON,
            n1,
            n2,
        })
    }

    /// Schlick approximation of the Fresnel reflectance.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eyev.dot(self.normalv);
        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n * n * (1.0 - cos * cos);
            if sin2_t > 1.0 {
                return 1.0;
            }
            cos = (1.0 - sin2_t).sqrt();
        }
        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

fn refractive_indices(hit: &Intersection, xs: &Intersections, shapes: &Shapes) -> (f64, f64) {
    let index_of = |containers: &[ShapeId]| {
        containers
            .last()
            .map_or(1.0, |&id| shapes.material(id).refractive_index)
    };

    let mut containers: Vec<ShapeId> = Vec::new();
    let mut n1 = 1.0;
    for i in xs {
        let is_hit = i == hit;
        if is_hit {
            n1 = index_of(&containers);
        }
        match containers.iter().position(|&c| c == i.object) {
            Some(pos) => {
                containers.remove(pos);
            }
            None => containers.push(i.object),
        }
        if is_hit {
            return (n1, index_of(&containers));
        }
    }
    (n1, 1.0)
}
