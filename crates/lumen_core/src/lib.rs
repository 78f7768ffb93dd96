//! Lumen Core - pixel storage and geometry import for the ray tracer.
//!
//! This crate provides:
//!
//! - **Canvas**: the render target and backing store for image textures
//! - **Textures**: a path-keyed cache so images are resident before tracing
//! - **Meshes**: OBJ loading into plain triangle index buffers
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::mesh::load_obj;
//!
//! let meshes = load_obj("teapot.obj")?;
//! println!("Loaded {} meshes", meshes.len());
//! ```

pub mod canvas;
pub mod mesh;
pub mod texture;

// Re-export commonly used types
pub use canvas::{Canvas, CanvasError, CanvasResult};
pub use mesh::{load_obj, parse_obj, Mesh, MeshError, MeshResult};
pub use texture::TextureCache;
