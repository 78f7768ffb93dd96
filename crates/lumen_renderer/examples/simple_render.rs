//! Simple ray tracer example.
//!
//! Renders a checkered floor with a glass sphere, a mirror sphere, a striped
//! cylinder and a CSG die, lit by a soft area light. Saves to PNG.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};
use std::sync::atomic::AtomicBool;

use lumen_renderer::{
    render, Camera, Color, CsgOp, Cylinder, Light, Material, Pattern, Point, RenderConfig,
    RenderResult, Shape, Transform, Vector, World,
};

fn main() -> RenderResult<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let world = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new(400, 200, FRAC_PI_3)
        .with_view(
            Point::new(0.0, 2.5, -6.0),
            Point::new(0.0, 0.75, 0.0),
            Vector::new(0.0, 1.0, 0.0),
        )?
        .with_supersampling(2);

    let config = RenderConfig::default().with_seed(7);
    let cancel = AtomicBool::new(false);
    let canvas = render(&world, &camera, &config, &cancel)?;

    let filename = "simple_render.png";
    canvas.save(filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> RenderResult<World> {
    let mut world = World::new();

    let checker = Pattern::checker(Color::splat(0.9), Color::splat(0.2));
    world.add(
        Shape::plane().with_material(
            Material::default()
                .with_pattern(checker)
                .with_specular(0.0)
                .with_reflective(0.1),
        ),
    );

    world.add(
        Shape::sphere()
            .with_transform(Transform::translation(-1.5, 1.0, 0.5))
            .with_material(
                Material::glass()
                    .with_color(Color::splat(0.1))
                    .with_reflective(0.9)
                    .with_shininess(300.0),
            ),
    );

    world.add(
        Shape::sphere()
            .with_transform(Transform::translation(1.5, 0.75, 1.0) * Transform::scaling(0.75, 0.75, 0.75)?)
            .with_material(
                Material::default()
                    .with_color(Color::new(0.6, 0.6, 0.7))
                    .with_diffuse(0.3)
                    .with_reflective(0.7),
            ),
    );

    let stripes = Pattern::stripe(Color::new(0.8, 0.2, 0.1), Color::new(0.9, 0.8, 0.3))
        .with_transform(Transform::rotation_z(FRAC_PI_2) * Transform::scaling(0.1, 0.1, 0.1)?);
    world.add(
        Shape::cylinder(Cylinder::new(0.0, 1.5, true))
            .with_transform(Transform::translation(0.0, 0.0, 2.5) * Transform::scaling(0.5, 1.0, 0.5)?)
            .with_material(Material::default().with_pattern(stripes)),
    );

    // Cube with a sphere carved out of it
    let die = world.shapes.add(
        Shape::csg(CsgOp::Difference)
            .with_transform(
                Transform::translation(0.2, 0.4, -1.5)
                    * Transform::rotation_y(FRAC_PI_4)
                    * Transform::scaling(0.4, 0.4, 0.4)?,
            )
            .with_material(Material::default().with_color(Color::new(0.2, 0.5, 0.9))),
    );
    let cube = world.shapes.add(Shape::cube());
    let hole = world
        .shapes
        .add(Shape::sphere().with_transform(Transform::scaling(1.3, 1.3, 1.3)?));
    world.shapes.add_child(die, cube)?;
    world.shapes.add_child(die, hole)?;
    world.add_root(die);

    world.add_light(Light::area(
        Point::new(-5.0, 6.0, -5.0),
        Vector::new(2.0, 0.0, 0.0),
        4,
        Vector::new(0.0, 2.0, 0.0),
        4,
        Color::ONE,
    ));

    Ok(world)
}
