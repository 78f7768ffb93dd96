//! Built-in scenes.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::path::Path;

use anyhow::Result;
use lumen_core::{load_obj, TextureCache};
use lumen_math::{Color, Point, Transform, Vector};
use lumen_renderer::{
    import_meshes, Cone, CsgOp, Cylinder, Light, Material, Pattern, Shape, UvMapping, UvPattern,
    World,
};

fn floor_material(textures: &mut TextureCache, floor_texture: Option<&str>) -> Result<Material> {
    let pattern = match floor_texture {
        Some(path) => {
            let image = textures.load(path)?;
            Pattern::texture_map(UvPattern::Image(image), UvMapping::Planar)
                .with_transform(Transform::scaling(4.0, 4.0, 4.0)?)
        }
        None => Pattern::checker(Color::splat(0.85), Color::splat(0.15)),
    };
    Ok(Material::default()
        .with_pattern(pattern)
        .with_specular(0.0)
        .with_reflective(0.15))
}

fn lights(world: &mut World) {
    world.add_light(Light::area(
        Point::new(-6.0, 8.0, -8.0),
        Vector::new(2.0, 0.0, 0.0),
        4,
        Vector::new(0.0, 2.0, 0.0),
        4,
        Color::splat(0.9),
    ));
}

/// A floor, a glass sphere, a mirror, a striped cone and a CSG lens.
pub fn demo_scene(textures: &mut TextureCache, floor_texture: Option<&str>) -> Result<World> {
    let mut world = World::new();
    world.add(Shape::plane().with_material(floor_material(textures, floor_texture)?));

    world.add(
        Shape::sphere()
            .with_transform(Transform::translation(-1.2, 1.0, 0.0))
            .with_material(
                Material::glass()
                    .with_color(Color::splat(0.05))
                    .with_diffuse(0.1)
                    .with_reflective(0.9)
                    .with_shininess(300.0),
            ),
    );

    world.add(
        Shape::sphere()
            .with_transform(Transform::translation(1.4, 0.6, 1.5) * Transform::scaling(0.6, 0.6, 0.6)?)
            .with_material(
                Material::default()
                    .with_color(Color::new(0.7, 0.7, 0.8))
                    .with_diffuse(0.2)
                    .with_reflective(0.8),
            ),
    );

    let rings = Pattern::ring(Color::new(0.9, 0.3, 0.2), Color::new(0.95, 0.85, 0.6))
        .with_transform(Transform::scaling(0.15, 0.15, 0.15)?);
    world.add(
        Shape::cone(Cone::new(-1.0, 0.0, true))
            .with_transform(
                Transform::translation(1.8, 1.0, -0.6) * Transform::scaling(0.5, 1.0, 0.5)?,
            )
            .with_material(Material::default().with_pattern(rings)),
    );

    // Intersection of two spheres: a biconvex lens standing on its edge
    let lens = world.shapes.add(
        Shape::csg(CsgOp::Intersect)
            .with_transform(
                Transform::translation(0.3, 0.7, -1.4)
                    * Transform::rotation_y(FRAC_PI_4)
                    * Transform::scaling(0.7, 0.7, 0.7)?,
            )
            .with_material(Material::default().with_color(Color::new(0.2, 0.6, 0.3))),
    );
    let a = world
        .shapes
        .add(Shape::sphere().with_transform(Transform::translation(0.0, 0.0, -0.7)));
    let b = world
        .shapes
        .add(Shape::sphere().with_transform(Transform::translation(0.0, 0.0, 0.7)));
    world.shapes.add_child(lens, a)?;
    world.shapes.add_child(lens, b)?;
    world.add_root(lens);

    let stripes = Pattern::stripe(Color::new(0.2, 0.3, 0.8), Color::ONE)
        .with_transform(Transform::rotation_z(FRAC_PI_2) * Transform::scaling(0.2, 0.2, 0.2)?);
    world.add(
        Shape::cylinder(Cylinder::new(0.0, 0.4, true))
            .with_transform(Transform::translation(-2.4, 0.0, -1.6) * Transform::scaling(0.4, 1.0, 0.4)?)
            .with_material(Material::default().with_pattern(stripes)),
    );

    lights(&mut world);
    log::info!(
        "Built demo scene: {} shapes, {} lights",
        world.shapes.len(),
        world.lights.len()
    );
    Ok(world)
}

/// An OBJ model standing on the demo floor.
pub fn obj_scene(
    path: &Path,
    textures: &mut TextureCache,
    floor_texture: Option<&str>,
) -> Result<World> {
    let meshes = load_obj(path)?;
    let mut world = World::new();
    world.add(Shape::plane().with_material(floor_material(textures, floor_texture)?));
    let model = import_meshes(&mut world, &meshes)?;

    // Rest the model on the floor
    let bounds = world.shapes[model].bounds();
    if !bounds.is_empty() {
        world.shapes[model].set_transform(Transform::translation(0.0, -bounds.min.y(), 0.0));
    }

    lights(&mut world);
    Ok(world)
}
