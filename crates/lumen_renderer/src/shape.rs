//! Scene-graph storage.
//!
//! Every shape lives in a [`Shapes`] arena and is addressed by a
//! [`ShapeId`]. Composites (groups and CSG nodes) list their children by id
//! and children point back at their parent by id, so the graph has no
//! reference cycles and can be shared read-only across render threads.
//!
//! Building is two-phase: `add` a shape to get its id, then `add_child` to
//! attach it. A child's transform should be final before it is attached,
//! because its bounds are folded into every ancestor at that moment.

use std::ops::{Index, IndexMut};

use lumen_math::{BoundingBox, Point, Ray, Transform, Vector};

use crate::{
    Cone, Csg, CsgOp, Cube, Cylinder, Group, Intersection, Intersections, Material, Plane,
    RenderError, RenderResult, Sphere, Triangle,
};

/// Handle to a shape inside a [`Shapes`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(usize);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// The closed set of shape kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Sphere(Sphere),
    Plane(Plane),
    Cube(Cube),
    Cylinder(Cylinder),
    Cone(Cone),
    Triangle(Triangle),
    Group(Group),
    Csg(Csg),
}

/// A node in the scene graph.
#[derive(Debug, Clone)]
pub struct Shape {
    geometry: Geometry,
    transform: Transform,
    material: Material,
    material_set: bool,
    casts_shadow: bool,
    parent: Option<ShapeId>,
    /// Object-space bounds of all descendants (composites only).
    bbox: BoundingBox,
}

impl Shape {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            transform: Transform::IDENTITY,
            material: Material::default(),
            material_set: false,
            casts_shadow: true,
            parent: None,
            bbox: BoundingBox::EMPTY,
        }
    }

    pub fn sphere() -> Self {
        Self::new(Geometry::Sphere(Sphere))
    }

    pub fn plane() -> Self {
        Self::new(Geometry::Plane(Plane))
    }

    pub fn cube() -> Self {
        Self::new(Geometry::Cube(Cube))
    }

    pub fn cylinder(cylinder: Cylinder) -> Self {
        Self::new(Geometry::Cylinder(cylinder))
    }

    pub fn cone(cone: Cone) -> Self {
        Self::new(Geometry::Cone(cone))
    }

    pub fn triangle(triangle: Triangle) -> Self {
        Self::new(Geometry::Triangle(triangle))
    }

    pub fn group() -> Self {
        Self::new(Geometry::Group(Group::default()))
    }

    pub fn csg(op: CsgOp) -> Self {
        Self::new(Geometry::Csg(Csg::new(op)))
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.set_material(material);
        self
    }

    pub fn with_shadow(mut self, casts_shadow: bool) -> Self {
        self.casts_shadow = casts_shadow;
        self
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Give this shape its own material, overriding anything inherited.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.material_set = true;
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Whether a material was set on this shape directly.
    pub fn has_own_material(&self) -> bool {
        self.material_set
    }

    pub fn casts_shadow(&self) -> bool {
        self.casts_shadow
    }

    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.geometry, Geometry::Group(_) | Geometry::Csg(_))
    }

    /// Object-space bounds.
    pub fn bounds(&self) -> BoundingBox {
        match &self.geometry {
            Geometry::Sphere(s) => s.bounds(),
            Geometry::Plane(p) => p.bounds(),
            Geometry::Cube(c) => c.bounds(),
            Geometry::Cylinder(c) => c.bounds(),
            Geometry::Cone(c) => c.bounds(),
            Geometry::Triangle(t) => t.bounds(),
            Geometry::Group(_) | Geometry::Csg(_) => self.bbox,
        }
    }

    /// Bounds in the parent's space.
    pub fn parent_bounds(&self) -> BoundingBox {
        self.transform.apply_bounds(&self.bounds())
    }
}

/// Arena owning every shape of a scene.
#[derive(Debug, Clone, Default)]
pub struct Shapes {
    nodes: Vec<Shape>,
}

impl Shapes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: Shape) -> ShapeId {
        self.nodes.push(shape);
        ShapeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.nodes.get(id.0)
    }

    /// Direct children of a composite; empty for primitives.
    pub fn children(&self, id: ShapeId) -> &[ShapeId] {
        match &self[id].geometry {
            Geometry::Group(g) => g.children(),
            Geometry::Csg(c) => c.operands(),
            _ => &[],
        }
    }

    /// Attach `child` under `parent` and grow every ancestor's bounds.
    ///
    /// A CSG node accepts exactly two operands: left first, then right.
    pub fn add_child(&mut self, parent: ShapeId, child: ShapeId) -> RenderResult<()> {
        if let Some(existing) = self[child].parent {
            return Err(RenderError::AlreadyAttached {
                child,
                parent: existing,
            });
        }
        match &self[parent].geometry {
            Geometry::Group(_) => {}
            Geometry::Csg(c) if c.operands().len() >= 2 => return Err(RenderError::CsgFull(parent)),
            Geometry::Csg(_) => {}
            _ => return Err(RenderError::NotComposite(parent)),
        }
        if self.includes(child, parent) {
            return Err(RenderError::Cycle { child, parent });
        }

        self.attach(parent, child);
        Ok(())
    }

    /// Link without validation. Callers guarantee `parent` is a composite
    /// with room and `child` is detached.
    pub(crate) fn attach(&mut self, parent: ShapeId, child: ShapeId) {
        match &mut self.nodes[parent.0].geometry {
            Geometry::Group(g) => g.push(child),
            Geometry::Csg(c) => c.push(child),
            _ => return,
        }
        self.nodes[child.0].parent = Some(parent);

        let mut bounds = self.nodes[child.0].parent_bounds();
        let mut current = Some(parent);
        while let Some(id) = current {
            let node = &mut self.nodes[id.0];
            node.bbox.add_box(&bounds);
            bounds = node.transform.apply_bounds(&bounds);
            current = node.parent;
        }
    }

    pub(crate) fn geometry_mut(&mut self, id: ShapeId) -> &mut Geometry {
        &mut self.nodes[id.0].geometry
    }

    pub(crate) fn detach(&mut self, child: ShapeId) {
        self.nodes[child.0].parent = None;
    }

    /// Whether `other` is `id` or one of its descendants.
    pub fn includes(&self, id: ShapeId, other: ShapeId) -> bool {
        id == other || self.children(id).iter().any(|&c| self.includes(c, other))
    }

    /// Intersect a world- (or parent-) space ray with the shape and its subtree.
    pub fn intersect(&self, id: ShapeId, ray: &Ray, xs: &mut Intersections) {
        let shape = &self[id];
        let local = shape.transform.inverse_ray(ray);
        match &shape.geometry {
            Geometry::Sphere(s) => s.local_intersect(&local, id, xs),
            Geometry::Plane(p) => p.local_intersect(&local, id, xs),
            Geometry::Cube(c) => c.local_intersect(&local, id, xs),
            Geometry::Cylinder(c) => c.local_intersect(&local, id, xs),
            Geometry::Cone(c) => c.local_intersect(&local, id, xs),
            Geometry::Triangle(t) => t.local_intersect(&local, id, xs),
            Geometry::Group(g) => g.local_intersect(self, &shape.bbox, &local, xs),
            Geometry::Csg(c) => c.local_intersect(self, &shape.bbox, &local, xs),
        }
    }

    /// World-space surface normal of a primitive.
    pub fn normal_at(&self, id: ShapeId, world_point: Point, hit: &Intersection) -> RenderResult<Vector> {
        let local_point = self.world_to_object(id, world_point);
        let local_normal = match &self[id].geometry {
            Geometry::Sphere(s) => s.local_normal_at(local_point),
            Geometry::Plane(p) => p.local_normal_at(local_point),
            Geometry::Cube(c) => c.local_normal_at(local_point),
            Geometry::Cylinder(c) => c.local_normal_at(local_point),
            Geometry::Cone(c) => c.local_normal_at(local_point),
            Geometry::Triangle(t) => t.local_normal_at(local_point, hit),
            Geometry::Group(_) | Geometry::Csg(_) => {
                return Err(RenderError::CompositeNormal(id));
            }
        };
        Ok(self.normal_to_world(id, local_normal))
    }

    /// Undo every transform from the root down to `id`.
    pub fn world_to_object(&self, id: ShapeId, point: Point) -> Point {
        let shape = &self[id];
        let point = match shape.parent {
            Some(parent) => self.world_to_object(parent, point),
            None => point,
        };
        shape.transform.inverse_point(point)
    }

    /// Carry an object-space normal up through every ancestor to world space.
    pub fn normal_to_world(&self, id: ShapeId, normal: Vector) -> Vector {
        let shape = &self[id];
        let normal = shape.transform.normal_to_parent(normal);
        match shape.parent {
            Some(parent) => self.normal_to_world(parent, normal),
            None => normal,
        }
    }

    /// Effective material: the shape's own, else the nearest ancestor's,
    /// else the default the shape was created with.
    pub fn material(&self, id: ShapeId) -> &Material {
        let shape = &self[id];
        if shape.material_set {
            return &shape.material;
        }
        let mut current = shape.parent;
        while let Some(pid) = current {
            let ancestor = &self[pid];
            if ancestor.material_set {
                return &ancestor.material;
            }
            current = ancestor.parent;
        }
        &shape.material
    }
}

impl Index<ShapeId> for Shapes {
    type Output = Shape;

    fn index(&self, id: ShapeId) -> &Shape {
        &self.nodes[id.0]
    }
}

impl IndexMut<ShapeId> for Shapes {
    fn index_mut(&mut self, id: ShapeId) -> &mut Shape {
        &mut self.nodes[id.0]
    }
}
