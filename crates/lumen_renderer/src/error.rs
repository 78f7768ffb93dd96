use lumen_core::{CanvasError, MeshError};
use lumen_math::MathError;
use thiserror::Error;

use crate::ShapeId;

/// Errors raised while building or rendering a scene.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Groups and CSG nodes have no surface of their own.
    #[error("normal requested on composite shape {0:?}")]
    CompositeNormal(ShapeId),

    #[error("CSG node {0:?} already has two operands")]
    CsgFull(ShapeId),

    #[error("shape {0:?} cannot hold children")]
    NotComposite(ShapeId),

    #[error("shape {child:?} is already attached to {parent:?}")]
    AlreadyAttached { child: ShapeId, parent: ShapeId },

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { child: ShapeId, parent: ShapeId },
}

pub type RenderResult<T> = Result<T, RenderError>;
