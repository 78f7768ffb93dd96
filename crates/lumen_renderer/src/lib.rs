//! Lumen Renderer - Whitted-style CPU ray tracing
//!
//! A recursive ray tracer with Phong shading, reflection, refraction and
//! soft shadows from area lights.
//!
//! - **Shapes** live in a [`Shapes`] arena and are addressed by [`ShapeId`].
//!   Groups and CSG nodes hold child ids; every shape knows its parent.
//! - **Groups** carry bounding boxes and can be [`divided`](Shapes::divide)
//!   into a bounding volume hierarchy.
//! - **Materials** combine a Phong model with patterns and UV textures.
//! - **Rendering** traces rows in parallel and writes into a
//!   [`lumen_core::Canvas`].

mod camera;
mod comps;
mod cone;
mod csg;
mod cube;
mod cylinder;
mod error;
mod group;
mod intersection;
mod light;
mod material;
mod obj;
mod pattern;
mod plane;
mod renderer;
mod shape;
mod sphere;
mod triangle;
pub mod uv;
mod world;

pub use camera::{view_transform, Camera};
pub use comps::Comps;
pub use cone::Cone;
pub use csg::{Csg, CsgOp};
pub use cube::Cube;
pub use cylinder::Cylinder;
pub use error::{RenderError, RenderResult};
pub use group::Group;
pub use intersection::{Intersection, Intersections};
pub use light::Light;
pub use material::Material;
pub use obj::{import_meshes, MESH_DIVIDE_THRESHOLD};
pub use pattern::{Pattern, PatternKind};
pub use plane::Plane;
pub use renderer::{render, render_pixel, RenderConfig};
pub use shape::{Geometry, Shape, ShapeId, Shapes};
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use uv::{CubeFace, CubeMap, UvMapping, UvPattern, UvPoint};
pub use world::{World, DEFAULT_RECURSION_DEPTH};

/// Re-export the math types used throughout the public API
pub use lumen_math::{BoundingBox, Color, Point, Ray, Transform, Vector};
