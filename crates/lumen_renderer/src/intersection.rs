//! Ray/shape hits and the ordered collection they are gathered into.

use std::ops::Index;

use crate::ShapeId;

/// A single ray/surface crossing.
///
/// `u` and `v` are only meaningful for triangles, where they hold the
/// barycentric coordinates used for smooth normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub object: ShapeId,
    pub u: f64,
    pub v: f64,
}

impl Intersection {
    pub fn new(t: f64, object: ShapeId) -> Self {
        Self {
            t,
            object,
            u: 0.0,
            v: 0.0,
        }
    }

    pub fn with_uv(t: f64, object: ShapeId, u: f64, v: f64) -> Self {
        Self { t, object, u, v }
    }
}

/// Intersections sorted by `t`. Equal `t` values keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct Intersections {
    items: Vec<Intersection>,
}

impl Intersections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hit: Intersection) {
        let at = self.items.partition_point(|x| x.t <= hit.t);
        self.items.insert(at, hit);
    }

    /// Merge another sorted collection into this one.
    pub fn extend(&mut self, other: Intersections) {
        for hit in other.items {
            self.insert(hit);
        }
    }

    /// The closest intersection in front of the ray origin.
    pub fn hit(&self) -> Option<&Intersection> {
        self.items.iter().find(|x| x.t > 0.0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intersection> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Intersection] {
        &self.items
    }
}

impl Index<usize> for Intersections {
    type Output = Intersection;

    fn index(&self, index: usize) -> &Intersection {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Intersections {
    type Item = &'a Intersection;
    type IntoIter = std::slice::Iter<'a, Intersection>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Intersection> for Intersections {
    fn from_iter<I: IntoIterator<Item = Intersection>>(iter: I) -> Self {
        let mut xs = Intersections::new();
        for hit in iter {
            xs.insert(hit);
        }
        xs
    }
}
