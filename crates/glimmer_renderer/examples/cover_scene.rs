//! Showcase scene example.
//!
//! Renders glass, mirrors, patterns, and a grouped ring of spheres
//! under an area light, then saves the result to PPM format.

use anyhow::Context;
use glimmer_renderer::{
    rotation_z, scaling, translation, Camera, Canvas, Color, Light, Material, Pattern, Point,
    Shape, SuperSample, Vector, World,
};
use std::f64::consts::{FRAC_PI_3, FRAC_PI_4, TAU};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Build the scene
    let start = std::time::Instant::now();
    let world = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    // Set up camera
    let camera = Camera::new(800, 400, FRAC_PI_3)
        .looking(
            Point::new(0.0, 2.5, -7.0),
            Point::new(0.0, 1.0, 0.0),
            Vector::new(0.0, 1.0, 0.0),
        )
        .with_seed(42);

    println!("Rendering {}x{}...", camera.hsize(), camera.vsize());

    // Render
    let start = std::time::Instant::now();
    let image = camera.render(&world, &SuperSample::new(2));
    println!("Rendered in {:?}", start.elapsed());

    let stats = world.stats.snapshot();
    println!(
        "{} primary rays, {} secondary, {} shadow",
        stats.primary_rays, stats.secondary_rays, stats.shadow_rays
    );

    // Save as PPM
    let filename = "cover.ppm";
    save_ppm(&image, filename).with_context(|| format!("failed to save {filename}"))?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> World {
    let mut world = World::new();

    // Checkered floor
    world.add_shape(
        Shape::plane().with_material(
            Material::new()
                .with_pattern(Pattern::checkers(
                    Color::new(0.85, 0.85, 0.85),
                    Color::new(0.25, 0.3, 0.35),
                ))
                .with_reflective(0.1)
                .with_specular(0.2),
        ),
    );

    // Glass centerpiece
    world.add_shape(Shape::glass_sphere().with_transform(translation(0.0, 1.0, 0.0)));

    // Mirror sphere off to the left
    world.add_shape(
        Shape::sphere()
            .with_transform(translation(-2.5, 1.0, 1.5))
            .with_material(
                Material::new()
                    .with_color(Color::new(0.3, 0.3, 0.35))
                    .with_reflective(0.8)
                    .with_diffuse(0.4)
                    .with_specular(1.0)
                    .with_shininess(400.0),
            ),
    );

    // Striped sphere to the right
    world.add_shape(
        Shape::sphere()
            .with_transform(translation(2.5, 1.0, 1.0))
            .with_material(
                Material::new().with_pattern(
                    Pattern::stripe(Color::new(0.9, 0.4, 0.2), Color::new(0.95, 0.85, 0.6))
                        .with_transform(scaling(0.25, 0.25, 0.25) * rotation_z(FRAC_PI_4)),
                ),
            ),
    );

    // Ring of small gradient spheres, gathered under one group so the
    // BVH can prune them
    let group = world.add_shape(Shape::group());
    for i in 0..12 {
        let angle = f64::from(i) * TAU / 12.0;
        let s = world.add_shape(
            Shape::sphere()
                .with_transform(
                    translation(4.5 * angle.cos(), 0.33, 4.5 * angle.sin())
                        * scaling(0.33, 0.33, 0.33),
                )
                .with_material(
                    Material::new().with_pattern(Pattern::gradient(
                        Color::new(0.2, 0.5, 0.9),
                        Color::new(0.9, 0.3, 0.5),
                    )),
                ),
        );
        world.add_child(group, s);
    }
    world.divide(group, 4);

    // Soft key light plus a dim point fill
    world.add_light(Light::area_light(
        Point::new(-6.0, 8.0, -6.0),
        Vector::new(2.0, 0.0, 0.0),
        4,
        Vector::new(0.0, 2.0, 0.0),
        4,
        Color::new(0.9, 0.9, 0.9),
    ));
    world.add_light(Light::point_light(
        Point::new(8.0, 6.0, -8.0),
        Color::new(0.2, 0.2, 0.25),
    ));

    println!("Created {} shapes", world.shape_count());
    world
}

fn save_ppm(image: &Canvas, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let c = image.get(x, y);
            writeln!(
                writer,
                "{} {} {}",
                channel(c.r()),
                channel(c.g()),
                channel(c.b())
            )?;
        }
    }

    Ok(())
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
