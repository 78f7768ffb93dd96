//! Constructive solid geometry.
//!
//! A CSG node combines a left and a right operand. Both are intersected,
//! the hits are merged in `t` order, and a small state machine tracking
//! whether the ray is currently inside each operand decides which hits lie
//! on the surface of the combined solid.

use lumen_math::{BoundingBox, Ray};

use crate::{Intersections, ShapeId, Shapes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOp {
    Union,
    Intersect,
    Difference,
}

impl CsgOp {
    /// Whether a hit survives, given which operand was hit and whether the
    /// ray is currently inside the left and right operands.
    pub fn intersection_allowed(self, lhit: bool, inl: bool, inr: bool) -> bool {
        match self {
            CsgOp::Union => (lhit && !inr) || (!lhit && !inl),
            CsgOp::Intersect => (lhit && inr) || (!lhit && inl),
            CsgOp::Difference => (lhit && !inr) || (!lhit && inl),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Csg {
    op: CsgOp,
    operands: Vec<ShapeId>,
}

impl Csg {
    pub fn new(op: CsgOp) -> Self {
        Self {
            op,
            operands: Vec::with_capacity(2),
        }
    }

    pub fn op(&self) -> CsgOp {
        self.op
    }

    pub fn left(&self) -> Option<ShapeId> {
        self.operands.first().copied()
    }

    pub fn right(&self) -> Option<ShapeId> {
        self.operands.get(1).copied()
    }

    pub fn operands(&self) -> &[ShapeId] {
        &self.operands
    }

    pub(crate) fn push(&mut self, operand: ShapeId) {
        self.operands.push(operand);
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
        let mut all = Intersections::new();
        for &operand in &self.operands {
            shapes.intersect(operand, ray, &mut all);
        }
        for hit in self.filter(shapes, &all).iter() {
            xs.insert(*hit);
        }
    }

    /// Keep only the hits on the boundary of the combined solid.
    ///
    /// A missing operand behaves as an empty solid.
    pub fn filter(&self, shapes: &Shapes, xs: &Intersections) -> Intersections {
        let mut inl = false;
        let mut inr = false;
        let mut out = Intersections::new();

        for hit in xs {
            let lhit = self
                .left()
                .is_some_and(|left| shapes.includes(left, hit.object));
            if self.op.intersection_allowed(lhit, inl, inr) {
                out.insert(*hit);
            }
            if lhit {
                inl = !inl;
            } else {
                inr = !inr;
            }
        }
        out
    }
}
