//! Built-in demo scenes.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use lumen_core::sampling::{gen_f32, gen_range_f32, random_vec3};
use lumen_core::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};
use lumen_math::{Color, Vec3};
use lumen_renderer::{
    Background, Bvh, Camera, Dielectric, DiffuseLight, HittableList, Lambertian, Material, Metal,
    Planar, Sphere,
};
use rand::RngCore;

use crate::cli::SceneKind;

/// Everything needed to render a scene except the output settings.
pub struct Scene {
    pub world: Bvh,
    /// Positioned camera; resolution is applied by the caller
    pub camera: Camera,
    pub aspect_ratio: f32,
    pub background: Background,
}

/// Build the requested scene, drawing all randomness from `rng`.
pub fn build(kind: SceneKind, texture: &Path, rng: &mut dyn RngCore) -> Result<Scene> {
    let (list, camera, aspect_ratio, background) = match kind {
        SceneKind::Spheres => bouncing_spheres(rng),
        SceneKind::Checkers => checkered_spheres(),
        SceneKind::Perlin => perlin_spheres(rng),
        SceneKind::Earth => earth(texture),
        SceneKind::Quads => quads(),
        SceneKind::SimpleLight => simple_light(rng),
    };

    log::info!("Scene {:?}: {} primitives", kind, list.len());

    Ok(Scene {
        world: Bvh::from_list(list, rng)?,
        camera,
        aspect_ratio,
        background,
    })
}

type SceneParts = (HittableList, Camera, f32, Background);

const WIDESCREEN: f32 = 16.0 / 9.0;

/// Camera at (13, 2, 3) looking at the origin with a narrow field of view.
fn default_camera() -> Camera {
    Camera::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
}

fn random_color(rng: &mut dyn RngCore, min: f32, max: f32) -> Color {
    random_vec3(rng, min, max)
}

fn bouncing_spheres(rng: &mut dyn RngCore) -> SceneParts {
    let mut world = HittableList::new();

    let checker = Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::with_texture(checker)),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            // Keep clear of the large glass sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                let center2 = center + Vec3::new(0.0, gen_range_f32(rng, 0.0, 0.5), 0.0);
                world.add(Box::new(Sphere::moving(
                    center,
                    center2,
                    0.2,
                    Arc::new(Lambertian::new(albedo)),
                )));
            } else if choose_mat < 0.95 {
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                world.add(Box::new(Sphere::new(center, 0.2, Arc::new(Metal::new(albedo, fuzz)))));
            } else {
                world.add(Box::new(Sphere::new(center, 0.2, Arc::new(Dielectric::new(1.5)))));
            }
        }
    }

    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let camera = default_camera().with_lens(20.0, 0.6, 10.0);
    (world, camera, WIDESCREEN, Background::Sky)
}

fn checkered_spheres() -> SceneParts {
    let mut world = HittableList::new();

    let checker: Arc<dyn Material> = Arc::new(Lambertian::with_texture(Arc::new(
        CheckerTexture::from_colors(0.32, Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9)),
    )));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, -10.0, 0.0), 10.0, checker.clone())));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, 10.0, 0.0), 10.0, checker)));

    (world, default_camera(), WIDESCREEN, Background::Sky)
}

fn perlin_list(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();

    let marble: Arc<dyn Material> =
        Arc::new(Lambertian::with_texture(Arc::new(NoiseTexture::new(4.0, rng))));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, marble.clone())));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, marble)));

    world
}

fn perlin_spheres(rng: &mut dyn RngCore) -> SceneParts {
    (perlin_list(rng), default_camera(), WIDESCREEN, Background::Sky)
}

fn earth(texture: &Path) -> SceneParts {
    let surface: Arc<dyn Texture> = match ImageTexture::open(texture) {
        Ok(image) => Arc::new(image),
        Err(err) => {
            log::warn!(
                "Could not load {}: {}; using a flat color instead",
                texture.display(),
                err
            );
            Arc::new(SolidColor::rgb(0.2, 0.4, 0.8))
        }
    };

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(
        Vec3::ZERO,
        2.0,
        Arc::new(Lambertian::with_texture(surface)),
    )));

    let camera = Camera::new()
        .with_position(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);
    (world, camera, WIDESCREEN, Background::Sky)
}

fn quads() -> SceneParts {
    let mut world = HittableList::new();

    let solid = |r, g, b| -> Arc<dyn Material> { Arc::new(Lambertian::new(Color::new(r, g, b))) };

    // Left red, back green, right blue, upper orange, lower teal
    world.add(Box::new(Planar::quad(
        Vec3::new(-3.0, -2.0, 5.0),
        Vec3::new(0.0, 0.0, -4.0),
        Vec3::new(0.0, 4.0, 0.0),
        solid(1.0, 0.2, 0.2),
    )));
    world.add(Box::new(Planar::quad(
        Vec3::new(-2.0, -2.0, 0.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        solid(0.2, 1.0, 0.2),
    )));
    world.add(Box::new(Planar::quad(
        Vec3::new(3.0, -2.0, 1.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(0.0, 4.0, 0.0),
        solid(0.2, 0.2, 1.0),
    )));
    world.add(Box::new(Planar::quad(
        Vec3::new(-2.0, 3.0, 1.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
        solid(1.0, 0.5, 0.0),
    )));
    world.add(Box::new(Planar::quad(
        Vec3::new(-2.0, -3.0, 5.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -4.0),
        solid(0.2, 0.8, 0.8),
    )));

    let camera = Camera::new()
        .with_position(Vec3::new(0.0, 0.0, 9.0), Vec3::ZERO, Vec3::Y)
        .with_lens(80.0, 0.0, 10.0);
    (world, camera, 1.0, Background::Sky)
}

fn simple_light(rng: &mut dyn RngCore) -> SceneParts {
    let mut world = perlin_list(rng);

    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(4.0)));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, 7.0, 0.0), 2.0, light.clone())));
    world.add(Box::new(Planar::quad(
        Vec3::new(3.0, 1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        light,
    )));

    let camera = Camera::new()
        .with_position(Vec3::new(26.0, 3.0, 6.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);
    (world, camera, WIDESCREEN, Background::Solid(Color::ZERO))
}
