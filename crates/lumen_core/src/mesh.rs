//! Triangle mesh geometry and OBJ loading.
//!
//! Meshes are plain index buffers. The renderer turns them into triangle
//! groups; this module only deals with getting the data off disk.

use std::io::BufRead;
use std::path::Path;

use glam::DVec3;
use lumen_math::{BoundingBox, Point};
use thiserror::Error;

/// Errors that can occur during mesh loading.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("OBJ load error: {0}")]
    Load(#[from] tobj::LoadError),

    #[error("no geometry found in {0}")]
    Empty(String),

    #[error("mesh '{name}' has {normals} normals for {positions} vertices")]
    NormalCount {
        name: String,
        normals: usize,
        positions: usize,
    },
}

pub type MeshResult<T> = Result<T, MeshError>;

/// A mesh consisting of vertex positions, optional normals, and triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Object or group name from the source file
    pub name: String,

    /// Vertex positions (one per vertex)
    pub positions: Vec<DVec3>,

    /// Vertex normals, aligned with `positions` when present
    pub normals: Option<Vec<DVec3>>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    pub bounds: BoundingBox,
}

impl Mesh {
    /// Create a new mesh from positions and indices, optionally with normals.
    ///
    /// Normals must pair up one-to-one with positions.
    pub fn new(
        name: impl Into<String>,
        positions: Vec<DVec3>,
        indices: Vec<u32>,
        normals: Option<Vec<DVec3>>,
    ) -> MeshResult<Self> {
        let name = name.into();
        if let Some(normals) = &normals {
            if normals.len() != positions.len() {
                return Err(MeshError::NormalCount {
                    name,
                    normals: normals.len(),
                    positions: positions.len(),
                });
            }
        }
        let bounds = Self::compute_bounds(&positions);
        Ok(Self {
            name,
            positions,
            normals,
            indices,
            bounds,
        })
    }

    fn compute_bounds(positions: &[DVec3]) -> BoundingBox {
        let mut bounds = BoundingBox::EMPTY;
        for pos in positions {
            bounds.add_point(Point(*pos));
        }
        bounds
    }

    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Triangles as `[p1, p2, p3]` position triplets, skipping bad indices.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let count = self.positions.len();
        self.indices.chunks_exact(3).filter_map(move |face| {
            let tri = [face[0] as usize, face[1] as usize, face[2] as usize];
            if tri.iter().all(|&i| i < count) {
                Some(tri)
            } else {
                log::warn!("Invalid triangle indices {:?}, vertex count: {}", tri, count);
                None
            }
        })
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load every object/group in an OBJ file as a separate mesh.
///
/// Polygons are fan-triangulated. Materials are ignored.
pub fn load_obj(path: impl AsRef<Path>) -> MeshResult<Vec<Mesh>> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let meshes = convert_models(models, &path.display().to_string())?;
    log::info!(
        "Loaded {} mesh(es), {} triangles from {}",
        meshes.len(),
        meshes.iter().map(Mesh::triangle_count).sum::<usize>(),
        path.display()
    );
    Ok(meshes)
}

/// Parse OBJ text from any buffered reader.
pub fn parse_obj<R: BufRead>(reader: &mut R) -> MeshResult<Vec<Mesh>> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| Ok(Default::default()))?;
    convert_models(models, "<buffer>")
}

fn convert_models(models: Vec<tobj::Model>, source: &str) -> MeshResult<Vec<Mesh>> {
    let meshes = models
        .into_iter()
        .filter(|m| !m.mesh.indices.is_empty())
        .map(|model| {
            let mesh = model.mesh;
            let positions = to_dvec3(&mesh.positions);
            let normals = if mesh.normals.len() == mesh.positions.len() {
                Some(to_dvec3(&mesh.normals))
            } else {
                None
            };
            Mesh::new(model.name, positions, mesh.indices, normals)
        })
        .collect::<MeshResult<Vec<_>>>()?;

    if meshes.is_empty() {
        return Err(MeshError::Empty(source.to_string()));
    }
    Ok(meshes)
}

fn to_dvec3(flat: &[f32]) -> Vec<DVec3> {
    flat.chunks_exact(3)
        .map(|c| DVec3::new(c[0] as f64, c[1] as f64, c[2] as f64))
        .collect()
}
