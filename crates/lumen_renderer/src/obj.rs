//! Turn loaded meshes into triangle groups.

use lumen_core::{Mesh, MeshError};
use lumen_math::{Point, Vector};

use crate::{RenderResult, Shape, ShapeId, Triangle, World};

/// Children per group above which the imported hierarchy is subdivided.
pub const MESH_DIVIDE_THRESHOLD: usize = 4;

fn triangle(mesh: &Mesh, [a, b, c]: [usize; 3]) -> Triangle {
    let p = |i: usize| Point(mesh.positions[i]);
    match &mesh.normals {
        Some(normals) if normals.len() == mesh.positions.len() => {
            let n = |i: usize| Vector(normals[i]);
            Triangle::smooth(p(a), p(b), p(c), n(a), n(b), n(c))
        }
        _ => Triangle::new(p(a), p(b), p(c)),
    }
}

/// Add `meshes` to `world` as one root group with a subgroup per mesh.
///
/// Meshes with vertex normals produce smooth triangles. The finished group
/// is divided once so large meshes get a bounding volume hierarchy.
pub fn import_meshes(world: &mut World, meshes: &[Mesh]) -> RenderResult<ShapeId> {
    let root = world.shapes.add(Shape::group());
    let mut triangles = 0;

    for mesh in meshes {
        let group = world.shapes.add(Shape::group());
        for tri in mesh.triangles() {
            let id = world.shapes.add(Shape::triangle(triangle(mesh, tri)));
            world.shapes.add_child(group, id)?;
            triangles += 1;
        }
        log::debug!(
            "Mesh '{}': {} triangles{}",
            mesh.name,
            world.shapes.children(group).len(),
            if mesh.has_normals() { ", smooth" } else { "" }
        );
        world.shapes.add_child(root, group)?;
    }

    if triangles == 0 {
        return Err(MeshError::Empty(format!("{} mesh(es)", meshes.len())).into());
    }

    world.shapes.divide(root, MESH_DIVIDE_THRESHOLD);
    world.add_root(root);
    log::info!(
        "Imported {} triangles from {} mesh(es), {} shapes after divide",
        triangles,
        meshes.len(),
        world.shapes.len()
    );
    Ok(root)
}
