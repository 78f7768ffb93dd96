use glam::{DMat4, DVec3};

use crate::{Point, Ray};

/// Axis-aligned bounding box used by groups and the BVH builder.
///
/// The empty box has `min = +inf` and `max = -inf`, so the first `add_*`
/// establishes real bounds. Infinite extents are legal (planes, open
/// cylinders) and survive transforms and slab tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub const EMPTY: BoundingBox = BoundingBox {
        min: Point(DVec3::INFINITY),
        max: Point(DVec3::NEG_INFINITY),
    };

    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x() > self.max.x() || self.min.y() > self.max.y() || self.min.z() > self.max.z()
    }

    /// Grow to include a point.
    ///
    /// Compares component by component, so NaN coordinates are ignored.
    pub fn add_point(&mut self, p: Point) {
        let (min, max) = (&mut self.min.0, &mut self.max.0);
        for i in 0..3 {
            if p.0[i] < min[i] {
                min[i] = p.0[i];
            }
            if p.0[i] > max[i] {
                max[i] = p.0[i];
            }
        }
    }

    /// Grow to include another box.
    pub fn add_box(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.add_point(other.min);
        self.add_point(other.max);
    }

    /// Inclusive containment test.
    pub fn contains_point(&self, p: Point) -> bool {
        (0..3).all(|i| self.min.0[i] <= p.0[i] && p.0[i] <= self.max.0[i])
    }

    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    pub fn center(&self) -> Point {
        Point((self.min.0 + self.max.0) * 0.5)
    }

    /// The 8 corners of the box.
    pub fn corners(&self) -> [Point; 8] {
        let (a, b) = (self.min.0, self.max.0);
        [
            Point::new(a.x, a.y, a.z),
            Point::new(a.x, a.y, b.z),
            Point::new(a.x, b.y, a.z),
            Point::new(a.x, b.y, b.z),
            Point::new(b.x, a.y, a.z),
            Point::new(b.x, a.y, b.z),
            Point::new(b.x, b.y, a.z),
            Point::new(b.x, b.y, b.z),
        ]
    }

    /// Bounds of this box after applying `m`.
    ///
    /// Transforms all 8 corners and takes their union, since an axis-aligned
    /// box does not stay axis-aligned under rotation or shear.
    pub fn transform(&self, m: &DMat4) -> BoundingBox {
        if self.is_empty() {
            return BoundingBox::EMPTY;
        }
        let mut out = BoundingBox::EMPTY;
        for corner in self.corners() {
            out.add_point(Point(transform_corner(m, corner.0)));
        }
        out
    }

    /// Bisect along the longest axis (ties: x, then y, then z).
    ///
    /// Returns `(min..mid_max, mid_min..max)`; the halves share the seam.
    pub fn split(&self) -> (BoundingBox, BoundingBox) {
        let d = self.max.0 - self.min.0;
        let greatest = d.x.max(d.y).max(d.z);

        let mut mid_min = self.min.0;
        let mut mid_max = self.max.0;
        if d.x == greatest {
            mid_min.x = self.min.0.x + d.x / 2.0;
            mid_max.x = mid_min.x;
        } else if d.y == greatest {
            mid_min.y = self.min.0.y + d.y / 2.0;
            mid_max.y = mid_min.y;
        } else {
            mid_min.z = self.min.0.z + d.z / 2.0;
            mid_max.z = mid_min.z;
        }

        (
            BoundingBox::new(self.min, Point(mid_max)),
            BoundingBox::new(Point(mid_min), self.max),
        )
    }

    /// Slab test against a ray in the same space as the box.
    pub fn intersects(&self, ray: &Ray) -> bool {
        let (xmin, xmax) = slab(self.min.x(), self.max.x(), ray.origin.x(), ray.direction.x());
        let (ymin, ymax) = slab(self.min.y(), self.max.y(), ray.origin.y(), ray.direction.y());
        let (zmin, zmax) = slab(self.min.z(), self.max.z(), ray.origin.z(), ray.direction.z());

        let tmin = xmin.max(ymin).max(zmin);
        let tmax = xmax.min(ymax).min(zmax);
        tmin <= tmax
    }

    pub fn approx_eq(&self, other: &BoundingBox) -> bool {
        self.min.approx_eq(&other.min) && self.max.approx_eq(&other.max)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Entry and exit `t` of a ray against the slab `[min, max]` on one axis.
///
/// A zero direction divides to +/-inf, which the min/max folding handles.
pub fn slab(min: f64, max: f64, origin: f64, direction: f64) -> (f64, f64) {
    let t0 = (min - origin) / direction;
    let t1 = (max - origin) / direction;
    if t0 > t1 {
        (t1, t0)
    } else {
        (t0, t1)
    }
}

// Zero coefficients are skipped so infinite extents do not turn into NaN.
fn transform_corner(m: &DMat4, c: DVec3) -> DVec3 {
    let mut out = m.w_axis.truncate();
    for (axis, value) in [(m.x_axis, c.x), (m.y_axis, c.y), (m.z_axis, c.z)] {
        for i in 0..3 {
            if axis[i] != 0.0 {
                out[i] += axis[i] * value;
            }
        }
    }
    out
}
