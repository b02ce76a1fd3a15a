//! Camera for ray generation.

use crate::error::{RenderError, RenderResult};
use lumen_core::sampling::{gen_f32, random_in_unit_disk};
use lumen_math::{Ray, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// Configure it with the `with_*` builders, then call [`Camera::initialize`]
/// before asking for rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,
    /// Width over height when the height was derived from it
    aspect_ratio: Option<f32>,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,          // Vertical field of view in degrees
    defocus_angle: f32, // Variation angle of rays through each pixel
    focus_dist: f32,    // Distance from camera to plane of perfect focus

    // Cached computed values (set by initialize())
    initialized: bool,
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            aspect_ratio: None,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            initialized: false,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self.aspect_ratio = None;
        self.initialized = false;
        self
    }

    /// Set the image width and derive the height from `aspect_ratio`
    /// (width over height). The height is at least one pixel.
    ///
    /// A non-finite or non-positive ratio is rejected by [`Camera::initialize`].
    pub fn with_aspect_ratio(self, width: u32, aspect_ratio: f32) -> Self {
        let height = ((width as f32 / aspect_ratio) as u32).max(1);
        let mut camera = self.with_resolution(width, height);
        camera.aspect_ratio = Some(aspect_ratio);
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.initialized = false;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self.initialized = false;
        self
    }

    /// Validate the settings and cache the viewport geometry.
    pub fn initialize(&mut self) -> RenderResult<()> {
        if let Some(ratio) = self.aspect_ratio {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(RenderError::InvalidCamera(format!(
                    "aspect ratio {ratio} must be finite and positive"
                )));
            }
        }
        if self.image_width.checked_mul(self.image_height).is_none() {
            return Err(RenderError::InvalidCamera(format!(
                "resolution {}x{} has too many pixels",
                self.image_width, self.image_height
            )));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::InvalidCamera(format!(
                "resolution {}x{} has no pixels",
                self.image_width, self.image_height
            )));
        }
        if self.look_from == self.look_at {
            return Err(RenderError::InvalidCamera(
                "look_from and look_at are the same point".to_string(),
            ));
        }

        self.center = self.look_from;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Calculate viewport vectors
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        // Calculate upper left pixel location
        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;

        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Fail unless [`Camera::initialize`] has run since the last change.
    pub(crate) fn ensure_initialized(&self) -> RenderResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(RenderError::InvalidCamera(
                "camera used before initialize()".to_string(),
            ))
        }
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The ray starts at the camera center, or on the defocus disk when the
    /// defocus angle is positive, and passes through a random point inside
    /// the pixel. Its time is uniform in `[0, 1)`.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        let ray_direction = pixel_sample - ray_origin;
        let ray_time = gen_f32(rng);

        Ray::new(ray_origin, ray_direction).with_time(ray_time)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn looking_down_z(width: u32, height: u32) -> Camera {
        Camera::new()
            .with_resolution(width, height)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
    }

    #[test]
    fn test_camera_initialize() {
        let mut camera = looking_down_z(800, 600);
        assert!(!camera.is_initialized());

        camera.initialize().unwrap();

        assert!(camera.is_initialized());
        assert_eq!(camera.center, Vec3::ZERO);
        assert!((camera.w - Vec3::Z).length() < 0.001);
        assert!((camera.u - Vec3::X).length() < 0.001);
        assert!((camera.v - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_camera_rejects_zero_resolution() {
        let mut camera = looking_down_z(0, 10);
        assert!(matches!(camera.initialize(), Err(RenderError::InvalidCamera(_))));
    }

    #[test]
    fn test_camera_rejects_degenerate_view() {
        let mut camera = Camera::new().with_position(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert!(matches!(camera.initialize(), Err(RenderError::InvalidCamera(_))));
    }

    #[test]
    fn test_builder_invalidates_initialization() {
        let mut camera = looking_down_z(10, 10);
        camera.initialize().unwrap();
        let camera = camera.with_lens(40.0, 0.0, 1.0);
        assert!(camera.ensure_initialized().is_err());
    }

    #[test]
    fn test_aspect_ratio_height() {
        let camera = Camera::new().with_aspect_ratio(400, 2.0);
        assert_eq!(camera.image_width, 400);
        assert_eq!(camera.image_height, 200);

        let camera = Camera::new().with_aspect_ratio(4, 10.0);
        assert_eq!(camera.image_height, 1);
    }

    #[test]
    fn test_camera_rejects_bad_aspect_ratio() {
        for ratio in [0.0, -1.5, f32::INFINITY, f32::NAN] {
            let mut camera = Camera::new().with_aspect_ratio(400, ratio);
            assert!(
                matches!(camera.initialize(), Err(RenderError::InvalidCamera(_))),
                "ratio {ratio}"
            );
        }

        // An explicit resolution replaces the bad ratio
        let mut camera = Camera::new()
            .with_aspect_ratio(400, 0.0)
            .with_resolution(40, 20);
        assert!(camera.initialize().is_ok());
    }

    #[test]
    fn test_camera_rejects_oversized_resolution() {
        let mut camera = looking_down_z(u32::MAX, 2);
        assert!(matches!(camera.initialize(), Err(RenderError::InvalidCamera(_))));

        let mut camera = looking_down_z(65_536, 65_536);
        assert!(camera.initialize().is_err());
    }

    #[test]
    fn test_camera_ray_direction() {
        let mut camera = looking_down_z(100, 100);
        camera.initialize().unwrap();

        let mut rng = StdRng::seed_from_u64(42);

        // Center ray should point roughly towards -Z
        let ray = camera.get_ray(50, 50, &mut rng);
        assert!(ray.direction.z < 0.0);
        assert!(ray.direction.x.abs() < 0.03);
        assert!(ray.direction.y.abs() < 0.03);
        assert!((0.0..1.0).contains(&ray.time));

        // Pixel (0, 0) is the top left corner
        let corner = camera.get_ray(0, 0, &mut rng);
        assert!(corner.direction.x < 0.0);
        assert!(corner.direction.y > 0.0);
    }

    #[test]
    fn test_defocus_rays_converge_on_focus_plane() {
        let mut camera = Camera::new()
            .with_resolution(11, 11)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(30.0, 10.0, 4.0);
        camera.initialize().unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let ray = camera.get_ray(5, 5, &mut rng);
            // Origin on the lens disk, never behind or in front of it
            assert!(ray.origin.z.abs() < 1e-6);
            // Every sample through the center pixel lands near the focus point
            let t = -4.0 / ray.direction.z;
            let p = ray.at(t);
            assert!(p.x.abs() < 0.15 && p.y.abs() < 0.15, "landed at {p:?}");
        }
    }
}
