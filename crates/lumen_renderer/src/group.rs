//! Groups and the median-split bounding volume hierarchy built from them.
//!
//! A group keeps the union of its children's bounds in its own object
//! space and skips all of them when a ray misses that box. `divide` turns a
//! flat group into a tree of such boxes by repeatedly bisecting the box
//! along its longest axis.

use lumen_math::{BoundingBox, Ray};

use crate::{Geometry, Intersections, Shape, ShapeId, Shapes};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    children: Vec<ShapeId>,
}

impl Group {
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    pub(crate) fn push(&mut self, child: ShapeId) {
        self.children.push(child);
    }

    pub(crate) fn local_intersect(
        &self,
        shapes: &Shapes,
        bbox: &BoundingBox,
        ray: &Ray,
        xs: &mut Intersections,
    ) {
        if !bbox.intersects(ray) {
            return;
        }
        for &child in &self.children {
            shapes.intersect(child, ray, xs);
        }
    }
}

impl Shapes {
    /// Split the children of a group into those that fit entirely in the
    /// left or right half of its bounds.
    ///
    /// Moved children are removed from the group and detached; children
    /// straddling the split stay where they are.
    pub fn partition_children(&mut self, id: ShapeId) -> (Vec<ShapeId>, Vec<ShapeId>) {
        let children = match self[id].geometry() {
            Geometry::Group(g) => g.children.clone(),
            _ => return (Vec::new(), Vec::new()),
        };
        let (left_box, right_box) = self[id].bounds().split();

        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut remaining = Vec::new();
        for child in children {
            let b = self[child].parent_bounds();
            if left_box.contains_box(&b) {
                left.push(child);
            } else if right_box.contains_box(&b) {
                right.push(child);
            } else {
                remaining.push(child);
            }
        }

        if let Geometry::Group(g) = self.geometry_mut(id) {
            g.children = remaining;
        }
        for &child in left.iter().chain(right.iter()) {
            self.detach(child);
        }
        (left, right)
    }

    /// Wrap `children` in a new group attached under `parent`.
    pub fn make_subgroup(&mut self, parent: ShapeId, children: Vec<ShapeId>) -> ShapeId {
        let sub = self.add(Shape::group());
        for child in children {
            self.attach(sub, child);
        }
        self.attach(parent, sub);
        sub
    }

    /// Build a bounding volume hierarchy below `id`.
    ///
    /// Any group with at least `threshold` children is partitioned and
    /// the non-empty halves become subgroups. Recurses into every child,
    /// including both operands of a CSG node.
    pub fn divide(&mut self, id: ShapeId, threshold: usize) {
        let bounds = self[id].bounds();
        // A zero-size box splits into two copies of itself and never terminates
        let splittable = bounds.min != bounds.max;
        if splittable
            && matches!(self[id].geometry(), Geometry::Group(g) if g.children.len() >= threshold)
        {
            let (left, right) = self.partition_children(id);
            if !left.is_empty() {
                self.make_subgroup(id, left);
            }
            if !right.is_empty() {
                self.make_subgroup(id, right);
            }
        }

        let children = self.children(id).to_vec();
        for child in children {
            self.divide(child, threshold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Intersection;
    use lumen_math::{Point, Transform, Vector};

    fn sphere_at(shapes: &mut Shapes, x: f64, y: f64, z: f64) -> ShapeId {
        shapes.add(Shape::sphere().with_transform(Transform::translation(x, y, z)))
    }

    fn group_of(shapes: &mut Shapes, children: &[ShapeId]) -> ShapeId {
        let g = shapes.add(Shape::group());
        for &c in children {
            shapes.add_child(g, c).unwrap();
        }
        g
    }

    fn only_child_groups(shapes: &Shapes, id: ShapeId) -> Vec<Vec<ShapeId>> {
        shapes
            .children(id)
            .iter()
            .map(|&c| shapes.children(c).to_vec())
            .collect()
    }

    #[test]
    fn test_new_group_is_empty() {
        let mut shapes = Shapes::new();
        let g = shapes.add(Shape::group());
        assert!(shapes.children(g).is_empty());
        assert!(shapes[g].bounds().is_empty());
    }

    #[test]
    fn test_empty_group_has_no_hits() {
        let mut shapes = Shapes::new();
        let g = shapes.add(Shape::group());
        let mut xs = Intersections::new();
        let r = Ray::new(Point::ORIGIN, Vector::new(0.0, 0.0, 1.0));
        shapes.intersect(g, &r, &mut xs);
        assert!(xs.is_empty());
    }

    #[test]
    fn test_intersect_nonempty_group() {
        let mut shapes = Shapes::new();
        let s1 = shapes.add(Shape::sphere());
        let s2 = sphere_at(&mut shapes, 0.0, 0.0, -3.0);
        let s3 = sphere_at(&mut shapes, 5.0, 0.0, 0.0);
        let g = group_of(&mut shapes, &[s1, s2, s3]);

        let mut xs = Intersections::new();
        let r = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));
        shapes.intersect(g, &r, &mut xs);
        let objects: Vec<ShapeId> = xs.iter().map(|x| x.object).collect();
        assert_eq!(objects, vec![s2, s2, s1, s1]);
    }

    #[test]
    fn test_intersect_transformed_group() {
        let mut shapes = Shapes::new();
        let s = sphere_at(&mut shapes, 5.0, 0.0, 0.0);
        let g = shapes.add(Shape::group().with_transform(Transform::scaling(2.0, 2.0, 2.0).unwrap()));
        shapes.add_child(g, s).unwrap();

        let mut xs = Intersections::new();
        let r = Ray::new(Point::new(10.0, 0.0, -10.0), Vector::new(0.0, 0.0, 1.0));
        shapes.intersect(g, &r, &mut xs);
        assert_eq!(xs.len(), 2);
    }

    #[test]
    fn test_ray_missing_box_skips_children() {
        let mut shapes = Shapes::new();
        let s = shapes.add(Shape::sphere());
        let g = group_of(&mut shapes, &[s]);
        let mut xs = Intersections::new();
        let r = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 1.0, 0.0));
        shapes.intersect(g, &r, &mut xs);
        assert!(xs.is_empty());
    }

    #[test]
    fn test_group_bounds_contain_children() {
        let mut shapes = Shapes::new();
        let s = shapes.add(
            Shape::sphere().with_transform(
                Transform::translation(2.0, 5.0, -3.0) * Transform::scaling(2.0, 2.0, 2.0).unwrap(),
            ),
        );
        let c = shapes.add(
            Shape::cylinder(crate::Cylinder::new(-2.0, 2.0, false)).with_transform(
                Transform::translation(-4.0, -1.0, 4.0) * Transform::scaling(0.5, 1.0, 0.5).unwrap(),
            ),
        );
        let g = group_of(&mut shapes, &[s, c]);
        let b = shapes[g].bounds();
        assert!(b.approx_eq(&BoundingBox::new(
            Point::new(-4.5, -3.0, -5.0),
            Point::new(4.0, 7.0, 4.5)
        )));
    }

    #[test]
    fn test_partition_children() {
        let mut shapes = Shapes::new();
        let s1 = sphere_at(&mut shapes, -2.0, 0.0, 0.0);
        let s2 = sphere_at(&mut shapes, 2.0, 0.0, 0.0);
        let s3 = shapes.add(Shape::sphere());
        let g = group_of(&mut shapes, &[s1, s2, s3]);

        let (left, right) = shapes.partition_children(g);
        assert_eq!(shapes.children(g), &[s3]);
        assert_eq!(left, vec![s1]);
        assert_eq!(right, vec![s2]);
        assert!(shapes[s1].parent().is_none());
        assert_eq!(shapes[s3].parent(), Some(g));
    }

    #[test]
    fn test_make_subgroup() {
        let mut shapes = Shapes::new();
        let s1 = shapes.add(Shape::sphere());
        let s2 = shapes.add(Shape::sphere());
        let g = shapes.add(Shape::group());
        let sub = shapes.make_subgroup(g, vec![s1, s2]);
        assert_eq!(shapes.children(g), &[sub]);
        assert_eq!(shapes.children(sub), &[s1, s2]);
        assert_eq!(shapes[s1].parent(), Some(sub));
    }

    #[test]
    fn test_divide_partitions_children() {
        let mut shapes = Shapes::new();
        let s1 = sphere_at(&mut shapes, -2.0, -2.0, 0.0);
        let s2 = sphere_at(&mut shapes, -2.0, 2.0, 0.0);
        let s3 = shapes.add(Shape::sphere().with_transform(Transform::scaling(4.0, 4.0, 4.0).unwrap()));
        let g = group_of(&mut shapes, &[s1, s2, s3]);

        shapes.divide(g, 1);

        let top = shapes.children(g).to_vec();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], s3);
        let sub = top[1];
        assert_eq!(only_child_groups(&shapes, sub), vec![vec![s1], vec![s2]]);
    }

    #[test]
    fn test_divide_with_too_few_children() {
        let mut shapes = Shapes::new();
        let s1 = sphere_at(&mut shapes, -2.0, 0.0, 0.0);
        let s2 = sphere_at(&mut shapes, 2.0, 1.0, 0.0);
        let s3 = sphere_at(&mut shapes, 2.0, -1.0, 0.0);
        let sub = group_of(&mut shapes, &[s1, s2, s3]);
        let s4 = shapes.add(Shape::sphere());
        let g = group_of(&mut shapes, &[sub, s4]);

        shapes.divide(g, 3);

        assert_eq!(shapes.children(g), &[sub, s4]);
        assert_eq!(only_child_groups(&shapes, sub), vec![vec![s1], vec![s2, s3]]);
    }

    #[test]
    fn test_divide_keeps_hits() {
        let mut shapes = Shapes::new();
        let mut ids = Vec::new();
        for i in 0..8 {
            ids.push(sphere_at(&mut shapes, i as f64 * 3.0, 0.0, 0.0));
        }
        let g = group_of(&mut shapes, &ids);
        let r = Ray::new(Point::new(9.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));

        let mut before = Intersections::new();
        shapes.intersect(g, &r, &mut before);
        shapes.divide(g, 2);
        let mut after = Intersections::new();
        shapes.intersect(g, &r, &mut after);

        let collect = |xs: &Intersections| xs.iter().copied().collect::<Vec<Intersection>>();
        assert_eq!(collect(&before), collect(&after));
        assert_eq!(after.len(), 2);
        assert_eq!(after[0].object, ids[3]);
    }
}
