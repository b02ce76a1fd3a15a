//! Textures: spatially varying colors sampled by materials.
//!
//! A texture maps surface coordinates `(u, v)` and the hit point `p` to a
//! linear color. Textures are shared between materials through `Arc`.

use std::path::Path;
use std::sync::Arc;

use lumen_math::{Color, Interval, Vec3};
use rand::RngCore;
use thiserror::Error;

use crate::{Image, Perlin};

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidData { expected: usize, actual: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Anything that can be sampled for a color at a surface point.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A constant color.
#[derive(Clone, Copy, Debug)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.color
    }
}

/// A 3D checkerboard alternating between two sub-textures.
///
/// The cell is chosen from the hit point, not the surface coordinates, so
/// the pattern is continuous across primitives.
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let x = (self.inv_scale * p.x).floor() as i32;
        let y = (self.inv_scale * p.y).floor() as i32;
        let z = (self.inv_scale * p.z).floor() as i32;

        if (x + y + z).rem_euclid(2) == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Solid cyan, returned when an image texture has no pixel data.
const DEBUG_CYAN: Color = Color::new(0.0, 1.0, 1.0);

/// A texture backed by an image, sampled with nearest-pixel lookup.
pub struct ImageTexture {
    image: Image,
}

impl ImageTexture {
    pub fn new(image: Image) -> Self {
        Self { image }
    }

    /// Load the image at `path`.
    pub fn open(path: impl AsRef<Path>) -> TextureResult<Self> {
        Ok(Self::new(Image::load(path)?))
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        if self.image.height() == 0 {
            return DEBUG_CYAN;
        }

        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        // Flip V to image coordinates
        let v = 1.0 - unit.clamp(v);

        let i = (u * self.image.width() as f32) as u32;
        let j = (v * self.image.height() as f32) as u32;
        let pixel = self.image.pixel_data(i, j);

        Color::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}

/// Octaves of turbulence summed by [`NoiseTexture`].
const TURBULENCE_DEPTH: u32 = 7;

/// Marble-like procedural texture driven by Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(scale: f32, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        let s = self.scale * p;
        let phase = self.scale * p.z + 10.0 * self.noise.turb(s, TURBULENCE_DEPTH);
        Color::ONE * 0.5 * (1.0 + phase.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_solid_color() {
        let tex = SolidColor::rgb(1.0, 0.5, 0.0);
        assert_eq!(tex.value(0.3, 0.7, Vec3::new(9.0, 9.0, 9.0)), Color::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_checker_alternates() {
        let even = Color::new(1.0, 1.0, 1.0);
        let odd = Color::new(0.0, 0.0, 0.0);
        let tex = CheckerTexture::from_colors(1.0, even, odd);

        assert_eq!(tex.value(0.0, 0.0, Vec3::new(0.5, 0.5, 0.5)), even);
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(1.5, 0.5, 0.5)), odd);
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(1.5, 1.5, 0.5)), even);
        // Negative cells keep alternating across the origin
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(-0.5, 0.5, 0.5)), odd);
    }

    #[test]
    fn test_checker_scale() {
        let tex = CheckerTexture::from_colors(2.0, Color::ONE, Color::ZERO);
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(1.9, 0.1, 0.1)), Color::ONE);
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(2.1, 0.1, 0.1)), Color::ZERO);
    }

    #[test]
    fn test_image_texture_lookup() {
        // 2x2: top row red/green, bottom row blue/white
        let image = Image::from_rgb8(
            2,
            2,
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255],
        )
        .unwrap();
        let tex = ImageTexture::new(image);

        // v = 1 is the top of the image
        assert_eq!(tex.value(0.0, 1.0, Vec3::ZERO), Color::new(1.0, 0.0, 0.0));
        assert_eq!(tex.value(0.9, 0.9, Vec3::ZERO), Color::new(0.0, 1.0, 0.0));
        assert_eq!(tex.value(0.1, 0.1, Vec3::ZERO), Color::new(0.0, 0.0, 1.0));
        // Out of range coordinates clamp to the edge
        assert_eq!(tex.value(5.0, -5.0, Vec3::ZERO), Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_image_texture_without_data_is_cyan() {
        let tex = ImageTexture::new(Image::default());
        assert_eq!(tex.value(0.5, 0.5, Vec3::ZERO), DEBUG_CYAN);
    }

    #[test]
    fn test_noise_texture_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let tex = NoiseTexture::new(4.0, &mut rng);

        for i in 0..100 {
            let c = tex.value(0.0, 0.0, Vec3::new(i as f32 * 0.1, 0.3, i as f32 * -0.2));
            assert!(c.x >= 0.0 && c.x <= 1.0);
            assert_eq!(c.x, c.y);
            assert_eq!(c.y, c.z);
        }
    }
}
