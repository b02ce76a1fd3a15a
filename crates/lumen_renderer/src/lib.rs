//! Lumen renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer for offline rendering. Scenes are built from
//! [`Hittable`] primitives carrying shared [`Material`]s, usually wrapped in a
//! [`Bvh`], and rendered through a [`Camera`] into a [`Framebuffer`].
//!
//! ```ignore
//! let mut camera = Camera::new()
//!     .with_aspect_ratio(400, 16.0 / 9.0)
//!     .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
//! camera.initialize()?;
//!
//! let world = Bvh::from_list(objects, &mut rng)?;
//! let image = render_parallel(&camera, &world, &RenderConfig::default())?;
//! image.save("out.png")?;
//! ```

mod bucket;
mod bvh;
mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod planar;
mod renderer;
mod sphere;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, render_parallel_with_bucket_size, Bucket,
    DEFAULT_BUCKET_SIZE,
};
pub use bvh::Bvh;
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, DiffuseLight, Lambertian, Material, Metal, Scatter};
pub use output::{color_to_rgb, linear_to_gamma, Framebuffer};
pub use planar::{Boundary, Planar};
pub use renderer::{ray_color, render, render_pixel, render_with_rng, Background, RenderConfig};
pub use sphere::Sphere;

/// Re-export common math types from lumen_math
pub use lumen_math::{Aabb, Color, Interval, Ray, Vec3};
