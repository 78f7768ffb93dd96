//! Surface material and the Phong lighting model.

use lumen_math::{approx_eq, Color, Point, Vector};

use crate::{Light, Pattern, ShapeId, Shapes};

/// Phong surface description plus the reflection and refraction terms used
/// by the recursive tracer.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    /// Overrides `color` when set.
    pub pattern: Option<Pattern>,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ONE,
            pattern: None,
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    /// Fully transparent glass with the usual index of 1.5.
    pub fn glass() -> Self {
        Self::default()
            .with_transparency(1.0)
            .with_refractive_index(1.5)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_ambient(mut self, ambient: f64) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_diffuse(mut self, diffuse: f64) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_specular(mut self, specular: f64) -> Self {
        self.specular = specular;
        self
    }

    pub fn with_shininess(mut self, shininess: f64) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_reflective(mut self, reflective: f64) -> Self {
        self.reflective = reflective;
        self
    }

    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency;
        self
    }

    pub fn with_refractive_index(mut self, refractive_index: f64) -> Self {
        self.refractive_index = refractive_index;
        self
    }

    /// Phong shading of `point` on `object` lit by `light`.
    ///
    /// `intensity` is the unshadowed fraction of the light in `[0, 1]`. The
    /// ambient term is added once; diffuse and specular are averaged over the
    /// light's samples and scaled by `intensity`.
    #[allow(clippy::too_many_arguments)]
    pub fn lighting(
        &self,
        shapes: &Shapes,
        object: ShapeId,
        light: &Light,
        point: Point,
        eyev: Vector,
        normalv: Vector,
        intensity: f64,
    ) -> Color {
        let color = match &self.pattern {
            Some(pattern) => pattern.pattern_at_shape(shapes, object, point),
            None => self.color,
        };
        let effective = color * light.intensity();
        let ambient = effective * self.ambient;

        let mut sum = Color::ZERO;
        for &sample in light.samples() {
            let lightv = (sample - point).normalize();
            let light_dot_normal = lightv.dot(normalv);
            if light_dot_normal < 0.0 || approx_eq(intensity, 0.0) {
                continue;
            }
            sum += effective * self.diffuse * light_dot_normal;

            let reflectv = (-lightv).reflect(normalv);
            let reflect_dot_eye = reflectv.dot(eyev);
            if reflect_dot_eye > 0.0 {
                let factor = reflect_dot_eye.powf(self.shininess);
                sum += light.intensity() * self.specular * factor;
            }
        }

        ambient + sum / light.sample_count() as f64 * intensity
    }
}
