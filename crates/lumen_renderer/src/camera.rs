//! Pinhole camera with optional focal blur.

use lumen_math::{Matrix, Point, Ray, Transform, Vector};
use rand::{Rng, RngCore};

use crate::RenderResult;

/// Camera that maps canvas pixels to world-space rays.
///
/// The image plane sits `focal_length` in front of the eye. With a positive
/// aperture the ray origin is jittered across a square lens, so objects on
/// the image plane stay sharp and everything else blurs.
#[derive(Debug, Clone)]
pub struct Camera {
    hsize: usize,
    vsize: usize,
    field_of_view: f64,
    transform: Transform,

    // Lens
    aperture: f64,
    focal_length: f64,
    focal_samples: usize,
    supersampling: usize,

    // Derived from size, field of view and focal length
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}

impl Camera {
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Self {
        let mut camera = Self {
            hsize,
            vsize,
            field_of_view,
            transform: Transform::IDENTITY,
            aperture: 0.0,
            focal_length: 1.0,
            focal_samples: 4,
            supersampling: 1,
            half_width: 0.0,
            half_height: 0.0,
            pixel_size: 0.0,
        };
        camera.update_pixel_size();
        camera
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Point the camera from `from` towards `to`.
    pub fn with_view(mut self, from: Point, to: Point, up: Vector) -> RenderResult<Self> {
        self.transform = view_transform(from, to, up)?;
        Ok(self)
    }

    pub fn with_field_of_view(mut self, field_of_view: f64) -> Self {
        self.field_of_view = field_of_view;
        self.update_pixel_size();
        self
    }

    pub fn with_aperture(mut self, radius: f64) -> Self {
        self.aperture = radius;
        self
    }

    pub fn with_focal_length(mut self, focal_length: f64) -> Self {
        self.focal_length = focal_length;
        self.update_pixel_size();
        self
    }

    pub fn with_focal_samples(mut self, samples: usize) -> Self {
        self.focal_samples = samples.max(1);
        self
    }

    pub fn with_supersampling(mut self, level: usize) -> Self {
        self.supersampling = level.max(1);
        self
    }

    fn update_pixel_size(&mut self) {
        let half_view = (self.field_of_view / 2.0).tan() * self.focal_length;
        let aspect = self.hsize as f64 / self.vsize as f64;
        if aspect >= 1.0 {
            self.half_width = half_view;
            self.half_height = half_view / aspect;
        } else {
            self.half_width = half_view * aspect;
            self.half_height = half_view;
        }
        self.pixel_size = self.half_width * 2.0 / self.hsize as f64;
    }

    pub fn hsize(&self) -> usize {
        self.hsize
    }

    pub fn vsize(&self) -> usize {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn aperture(&self) -> f64 {
        self.aperture
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// Rays per pixel sample. Without an aperture every ray is identical,
    /// so only one is needed.
    pub fn focal_samples(&self) -> usize {
        if self.aperture > 0.0 {
            self.focal_samples
        } else {
            1
        }
    }

    pub fn supersampling(&self) -> usize {
        self.supersampling
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// World-space ray through pixel `(px, py)` at sub-pixel offset `(u, v)`.
    ///
    /// `rng` is only drawn from when the camera has an aperture.
    pub fn ray_for_pixel(&self, px: usize, py: usize, u: f64, v: f64, rng: &mut dyn RngCore) -> Ray {
        let world_x = self.half_width - (px as f64 + u) * self.pixel_size;
        let world_y = self.half_height - (py as f64 + v) * self.pixel_size;

        let pixel = self
            .transform
            .inverse_point(Point::new(world_x, world_y, -self.focal_length));

        let origin = if self.aperture > 0.0 {
            let r = self.aperture;
            let lens = Point::new(rng.gen_range(-r..=r), rng.gen_range(-r..=r), 0.0);
            self.transform.inverse_point(lens)
        } else {
            self.transform.inverse_point(Point::ORIGIN)
        };

        Ray::new(origin, (pixel - origin).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600, 1.05)
    }
}

/// World-to-eye transform for an eye at `from` looking at `to`.
pub fn view_transform(from: Point, to: Point, up: Vector) -> RenderResult<Transform> {
    let forward = (to - from).normalize();
    let left = forward.cross(up.normalize());
    let true_up = left.cross(forward);

    #[rustfmt::skip]
    let orientation = Matrix::from_rows(4, 4, &[
        left.x(),     left.y(),     left.z(),     0.0,
        true_up.x(),  true_up.y(),  true_up.z(),  0.0,
        -forward.x(), -forward.y(), -forward.z(), 0.0,
        0.0,          0.0,          0.0,          1.0,
    ])?;
    let m = orientation.multiply(&Matrix::translation(-from.x(), -from.y(), -from.z()))?;
    Ok(Transform::from_matrix(&m)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

    fn matrix_of(t: &Transform) -> Matrix {
        Matrix::from(*t.matrix())
    }

    #[test]
    fn test_default_camera() {
        let c = Camera::default();
        assert_eq!(c.hsize(), 800);
        assert_eq!(c.vsize(), 600);
        assert_eq!(c.field_of_view(), 1.05);
        assert_eq!(c.focal_length(), 1.0);
        assert_eq!(c.supersampling(), 1);
        assert!(c.transform().is_identity());
    }

    #[test]
    fn test_focal_samples_need_aperture() {
        let c = Camera::default().with_focal_samples(8);
        assert_eq!(c.focal_samples(), 1);
        let c = c.with_aperture(0.05);
        assert_eq!(c.focal_samples(), 8);
    }

    #[test]
    fn test_pixel_size_horizontal_canvas() {
        let c = Camera::new(200, 125, FRAC_PI_2);
        assert!(approx_eq(c.pixel_size(), 0.01));
    }

    #[test]
    fn test_pixel_size_vertical_canvas() {
        let c = Camera::new(125, 200, FRAC_PI_2);
        assert!(approx_eq(c.pixel_size(), 0.01));
    }

    #[test]
    fn test_ray_through_center_of_canvas() {
        let c = Camera::new(201, 101, FRAC_PI_2);
        let mut rng = StdRng::seed_from_u64(42);
        let r = c.ray_for_pixel(100, 50, 0.5, 0.5, &mut rng);
        assert!(r.origin.approx_eq(&Point::ORIGIN));
        assert!(r.direction.approx_eq(&Vector::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_ray_through_corner_of_canvas() {
        let c = Camera::new(201, 101, FRAC_PI_2);
        let mut rng = StdRng::seed_from_u64(42);
        let r = c.ray_for_pixel(0, 0, 0.5, 0.5, &mut rng);
        assert!(r.origin.approx_eq(&Point::ORIGIN));
        assert!((r.direction - Vector::new(0.66519, 0.33259, -0.66851)).magnitude() < 1e-4);
    }

    #[test]
    fn test_ray_when_camera_is_transformed() {
        let c = Camera::new(201, 101, FRAC_PI_2).with_transform(
            Transform::rotation_y(FRAC_PI_4) * Transform::translation(0.0, -2.0, 5.0),
        );
        let mut rng = StdRng::seed_from_u64(42);
        let r = c.ray_for_pixel(100, 50, 0.5, 0.5, &mut rng);
        assert!(r.origin.approx_eq(&Point::new(0.0, 2.0, -5.0)));
        assert!(r
            .direction
            .approx_eq(&Vector::new(FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2)));
    }

    #[test]
    fn test_aperture_jitters_origin_within_lens() {
        let c = Camera::new(201, 101, FRAC_PI_2).with_aperture(0.1);
        let mut rng = StdRng::seed_from_u64(42);
        let center = c.ray_for_pixel(100, 50, 0.5, 0.5, &mut rng);
        for _ in 0..32 {
            let r = c.ray_for_pixel(100, 50, 0.5, 0.5, &mut rng);
            assert!(r.origin.x().abs() <= 0.1 && r.origin.y().abs() <= 0.1);
            assert!(approx_eq(r.origin.z(), 0.0));
            // Every lens sample still passes through the same image-plane point
            let hit = r.position(1.0 / -r.direction.z());
            assert!(hit.approx_eq(&center.position(1.0 / -center.direction.z())));
        }
    }

    #[test]
    fn test_view_transform_default_orientation() {
        let t = view_transform(Point::ORIGIN, Point::new(0.0, 0.0, -1.0), Vector::new(0.0, 1.0, 0.0))
            .unwrap();
        assert!(matrix_of(&t).approx_eq(&Matrix::identity(4)));
    }

    #[test]
    fn test_view_transform_looking_positive_z() {
        let t = view_transform(Point::ORIGIN, Point::new(0.0, 0.0, 1.0), Vector::new(0.0, 1.0, 0.0))
            .unwrap();
        assert!(matrix_of(&t).approx_eq(&Matrix::scaling(-1.0, 1.0, -1.0)));
    }

    #[test]
    fn test_view_transform_moves_the_world() {
        let t = view_transform(Point::new(0.0, 0.0, 8.0), Point::ORIGIN, Vector::new(0.0, 1.0, 0.0))
            .unwrap();
        assert!(matrix_of(&t).approx_eq(&Matrix::translation(0.0, 0.0, -8.0)));
    }

    #[test]
    fn test_view_transform_arbitrary() {
        let t = view_transform(
            Point::new(1.0, 3.0, 2.0),
            Point::new(4.0, -2.0, 8.0),
            Vector::new(1.0, 1.0, 0.0),
        )
        .unwrap();
        #[rustfmt::skip]
        let expected = Matrix::from_rows(4, 4, &[
            -0.50709, 0.50709, 0.67612, -2.36643,
            0.76772, 0.60609, 0.12122, -2.82843,
            -0.35857, 0.59761, -0.71714, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
        .unwrap();
        let actual = matrix_of(&t);
        for row in 0..4 {
            for col in 0..4 {
                let (a, e) = (actual.get(row, col).unwrap(), expected.get(row, col).unwrap());
                assert!((a - e).abs() < 1e-4, "[{row}][{col}] {a} != {e}");
            }
        }
    }
}
