//! 8-bit RGB images used as texture sources.

use std::path::Path;

use crate::{TextureError, TextureResult};

/// Returned for lookups into an image without pixel data.
const MAGENTA: [u8; 3] = [255, 0, 255];

/// A decoded RGB image, row-major, three bytes per pixel.
#[derive(Clone, Debug, Default)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Load an image file in any format the `image` crate can decode.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|e| {
            TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        log::debug!("Loaded image: {} ({}x{})", path.display(), width, height);

        Ok(Self {
            width,
            height,
            data: rgb.into_raw(),
        })
    }

    /// Wrap raw RGB8 bytes. `data` must hold `width * height * 3` bytes.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> TextureResult<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(TextureError::InvalidData {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// RGB bytes of pixel `(x, y)`; coordinates are clamped into the image.
    pub fn pixel_data(&self, x: u32, y: u32) -> [u8; 3] {
        if self.is_empty() {
            return MAGENTA;
        }
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let idx = (y * self.width as usize + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}
