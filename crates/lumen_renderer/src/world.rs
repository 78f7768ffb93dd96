//! The scene: shape arena, root shapes and lights, plus the recursive
//! shading that turns a ray into a color.

use lumen_math::{approx_eq, Color, Point, Ray, Transform};

use crate::{Comps, Intersections, Light, Material, RenderResult, Shape, ShapeId, Shapes};

/// Recursion budget for reflection and refraction rays.
pub const DEFAULT_RECURSION_DEPTH: u32 = 4;

#[derive(Debug, Clone, Default)]
pub struct World {
    pub shapes: Shapes,
    pub roots: Vec<ShapeId>,
    pub lights: Vec<Light>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two concentric spheres lit from the upper left.
    pub fn default_scene() -> RenderResult<Self> {
        let mut world = Self::new();
        let material = Material::default()
            .with_color(Color::new(0.8, 1.0, 0.6))
            .with_diffuse(0.7)
            .with_specular(0.2);
        world.add(Shape::sphere().with_material(material));
        world.add(Shape::sphere().with_transform(Transform::scaling(0.5, 0.5, 0.5)?));
        world.add_light(Light::point(Point::new(-10.0, 10.0, -10.0), Color::ONE));
        Ok(world)
    }

    /// Add a shape to the arena and make it a root of the scene.
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = self.shapes.add(shape);
        self.roots.push(id);
        id
    }

    /// Make an existing arena shape a root of the scene.
    pub fn add_root(&mut self, id: ShapeId) {
        self.roots.push(id);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// All intersections of `ray` with every root, in `t` order.
    pub fn intersect(&self, ray: &Ray) -> Intersections {
        let mut xs = Intersections::new();
        for &root in &self.roots {
            self.shapes.intersect(root, ray, &mut xs);
        }
        xs
    }

    /// Color seen along `ray`, with `remaining` bounces left for
    /// reflection and refraction.
    pub fn color_at(&self, ray: &Ray, remaining: u32) -> RenderResult<Color> {
        let xs = self.intersect(ray);
        match xs.hit() {
            Some(hit) => {
                let comps = Comps::prepare(hit, ray, &xs, &self.shapes)?;
                self.shade_hit(&comps, remaining)
            }
            None => Ok(Color::ZERO),
        }
    }

    pub fn shade_hit(&self, comps: &Comps, remaining: u32) -> RenderResult<Color> {
        let material = self.shapes.material(comps.object);

        let mut surface = Color::ZERO;
        for light in &self.lights {
            let intensity = self.light_intensity_at(comps.over_point, light);
            surface += material.lighting(
                &self.shapes,
                comps.object,
                light,
                comps.over_point,
                comps.eyev,
                comps.normalv,
                intensity,
            );
        }

        let reflected = self.reflected_color(comps, remaining)?;
        let refracted = self.refracted_color(comps, remaining)?;

        if material.reflective > 0.0 && material.transparency > 0.0 {
            let reflectance = comps.schlick();
            Ok(surface + reflected * reflectance + refracted * (1.0 - reflectance))
        } else {
            Ok(surface + reflected + refracted)
        }
    }

    pub fn reflected_color(&self, comps: &Comps, remaining: u32) -> RenderResult<Color> {
        let reflective = self.shapes.material(comps.object).reflective;
        if remaining == 0 || approx_eq(reflective, 0.0) {
            return Ok(Color::ZERO);
        }
        let ray = Ray::new(comps.over_point, comps.reflectv);
        Ok(self.color_at(&ray, remaining - 1)? * reflective)
    }

    pub fn refracted_color(&self, comps: &Comps, remaining: u32) -> RenderResult<Color> {
        let transparency = self.shapes.material(comps.object).transparency;
        if remaining == 0 || transparency == 0.0 {
            return Ok(Color::ZERO);
        }

        // Snell's law; sin²(θt) > 1 is total internal reflection
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(comps.normalv);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            return Ok(Color::ZERO);
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t) - comps.eyev * n_ratio;
        let ray = Ray::new(comps.under_point, direction);
        Ok(self.color_at(&ray, remaining - 1)? * transparency)
    }

    /// Whether something that casts shadows sits between `point` and `light_position`.
    pub fn is_shadowed(&self, point: Point, light_position: Point) -> bool {
        let v = light_position - point;
        let distance = v.magnitude();
        let ray = Ray::new(point, v.normalize());
        let xs = self.intersect(&ray);
        xs.hit()
            .is_some_and(|hit| hit.t < distance && self.shapes[hit.object].casts_shadow())
    }

    /// Fraction of `light`'s samples visible from `point`.
    pub fn light_intensity_at(&self, point: Point, light: &Light) -> f64 {
        let visible = light
            .samples()
            .iter()
            .filter(|&&sample| !self.is_shadowed(point, sample))
            .count();
        visible as f64 / light.sample_count() as f64
    }
}
