//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Emission from lights and a configurable background
//! - Anti-aliasing via multi-sampling

use std::time::Instant;

use crate::{
    error::RenderResult,
    hittable::{HitRecord, Hittable},
    output::Framebuffer,
    Camera,
};
use lumen_math::{Color, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Nearest accepted hit distance; avoids self-intersection ("shadow acne").
const MIN_HIT_DISTANCE: f32 = 0.001;

/// What a ray sees when it escapes the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Vertical gradient from white (looking down) to light blue (looking up)
    Sky,
    /// A single color; black makes lights the only illumination
    Solid(Color),
}

impl Background {
    /// Color seen along `ray` when it hits nothing.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Sky => sky_gradient(ray),
            Background::Solid(color) => *color,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Sky
    }
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Color for rays that leave the scene
    pub background: Background,
    /// Seed for all per-pixel randomness; a random one is picked when unset
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            background: Background::Sky,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// The configured seed, or a fresh random one. Logged either way so a
    /// render can be reproduced.
    pub fn resolve_seed(&self) -> u64 {
        let seed = self.seed.unwrap_or_else(rand::random);
        log::info!("Render seed: {}", seed);
        seed
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and accumulating color.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(MIN_HIT_DISTANCE, f32::INFINITY), &mut rec) {
        return background.color(ray);
    }

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            let scattered_color = ray_color(&scatter.scattered, world, depth - 1, background, rng);
            emission + scatter.attenuation * scattered_color
        }
        None => emission,
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
///
/// Returns the average of `samples_per_pixel` linear samples.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.samples_per_pixel.max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, &config.background, rng);
    }

    pixel_color / samples as f32
}

/// Render the entire scene on the current thread, scanline by scanline.
///
/// Randomness comes from a `StdRng` seeded with [`RenderConfig::resolve_seed`].
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> RenderResult<Framebuffer> {
    let mut rng = StdRng::seed_from_u64(config.resolve_seed());
    render_with_rng(camera, world, config, &mut rng)
}

/// Like [`render`], drawing every random number from `rng`.
pub fn render_with_rng(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<Framebuffer> {
    camera.ensure_initialized()?;

    let width = camera.image_width;
    let height = camera.image_height;
    log::info!(
        "Rendering {}x{} at {} spp, max depth {}",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth
    );

    let start = Instant::now();
    let mut image = Framebuffer::new(width, height);

    for y in 0..height {
        log::trace!("Scanlines remaining: {}", height - y);
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, color);
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}
