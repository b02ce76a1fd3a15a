//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. Each bucket draws from its own
//! generator seeded by the render seed and the bucket index, so the image
//! for a given seed does not depend on thread count or scheduling.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::{
    error::RenderResult,
    hittable::Hittable,
    output::Framebuffer,
    renderer::{render_pixel, RenderConfig},
    Camera,
};
use lumen_math::Color;

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in row-major bucket order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Cover a `width` x `height` image with buckets in row-major order.
/// Buckets on the right and bottom edges are cropped to fit.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    for y in (0..height).step_by(bucket_size as usize) {
        for x in (0..width).step_by(bucket_size as usize) {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    buckets
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    seed: u64,
) -> Vec<Color> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(bucket.index as u64));
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, world, global_x, global_y, config, &mut rng));
        }
    }

    pixels
}

/// Render the scene across all rayon worker threads.
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> RenderResult<Framebuffer> {
    render_parallel_with_bucket_size(camera, world, config, DEFAULT_BUCKET_SIZE)
}

/// [`render_parallel`] with an explicit bucket size.
pub fn render_parallel_with_bucket_size(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    bucket_size: u32,
) -> RenderResult<Framebuffer> {
    camera.ensure_initialized()?;

    let seed = config.resolve_seed();
    let buckets = generate_buckets(camera.image_width, camera.image_height, bucket_size);
    log::info!(
        "Rendering {}x{} in {} buckets on {} threads, {} spp",
        camera.image_width,
        camera.image_height,
        buckets.len(),
        rayon::current_num_threads(),
        config.samples_per_pixel
    );

    let start = Instant::now();
    let results: Vec<(Bucket, Vec<Color>)> = buckets
        .par_iter()
        .map(|bucket| (*bucket, render_bucket(bucket, camera, world, config, seed)))
        .collect();

    let mut image = Framebuffer::new(camera.image_width, camera.image_height);
    for (bucket, pixels) in results {
        log::trace!("Bucket {} done", bucket.index);
        for (i, color) in pixels.into_iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            image.set(bucket.x + local_x, bucket.y + local_y, color);
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}
