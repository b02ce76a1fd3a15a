//! Framebuffer and image output.
//!
//! Pixels are stored as linear colors. Conversion to 8-bit applies gamma 2
//! and clamps to `[0, 0.999]` so that `1.0` maps to 255 rather than wrapping.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::RenderResult;
use lumen_math::{Color, Interval};

/// Linear intensities above this map to 255.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to_byte = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Image buffer holding linear colors in row-major order, top row first.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Gamma-corrected RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb(*c)).collect()
    }

    /// Write the buffer as a plain-text PPM (`P3`) image.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> RenderResult<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;

        for color in &self.pixels {
            let [r, g, b] = color_to_rgb(*color);
            writeln!(out, "{r} {g} {b}")?;
        }

        out.flush()?;
        Ok(())
    }

    /// Save to `path`. `.ppm` files are written as `P3`; any other
    /// extension is encoded by the `image` crate (PNG, JPEG, ...).
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let file = File::create(path)?;
            self.write_ppm(BufWriter::new(file))?;
        } else {
            image::save_buffer(
                path,
                &self.to_rgb8(),
                self.width,
                self.height,
                image::ColorType::Rgb8,
            )?;
        }

        log::info!("Wrote {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_boundaries() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        // Out of range values clamp instead of wrapping
        assert_eq!(color_to_rgb(Color::new(-3.0, 7.0, f32::INFINITY)), [0, 255, 255]);
        // 0.25 linear is 0.5 after gamma
        assert_eq!(color_to_rgb(Color::splat(0.25)), [128, 128, 128]);
    }

    #[test]
    fn test_framebuffer_get_set() {
        let mut fb = Framebuffer::new(3, 2);
        fb.set(2, 1, Color::new(0.1, 0.2, 0.3));
        assert_eq!(fb.get(2, 1), Color::new(0.1, 0.2, 0.3));
        assert_eq!(fb.pixels[5], Color::new(0.1, 0.2, 0.3));
        assert_eq!(fb.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_framebuffer_index_does_not_wrap() {
        // No rows allocated; only the index arithmetic is exercised
        let fb = Framebuffer::new(100_000, 0);
        assert_eq!(fb.index(5, 50_000), 5_000_000_005);
    }

    #[test]
    fn test_write_ppm() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set(0, 0, Color::ONE);

        let mut out = Vec::new();
        fb.write_ppm(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "P3\n2 1\n255\n255 255 255\n0 0 0\n");
    }

    #[test]
    fn test_save_ppm_and_png() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set(1, 1, Color::new(1.0, 0.0, 0.0));
        let dir = std::env::temp_dir().join(format!("lumen_output_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let ppm = dir.join("out.ppm");
        fb.save(&ppm).unwrap();
        assert!(std::fs::read_to_string(&ppm).unwrap().starts_with("P3\n2 2\n"));

        let png = dir.join("out.png");
        fb.save(&png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(1, 1).0, [255, 0, 0]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
