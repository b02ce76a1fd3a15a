//! Lumen core - surface appearance inputs for the renderer.
//!
//! This crate provides:
//!
//! - **Textures**: [`SolidColor`], [`CheckerTexture`], [`ImageTexture`],
//!   [`NoiseTexture`] behind the [`Texture`] trait
//! - **Images**: decoded RGB8 pixel data ([`Image`])
//! - **Noise**: Perlin gradient noise with turbulence ([`Perlin`])
//! - **Sampling**: random vector helpers driven by an explicit RNG
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{ImageTexture, Texture};
//!
//! let earth = ImageTexture::open("earthmap.jpg")?;
//! let color = earth.value(0.5, 0.5, Vec3::ZERO);
//! ```

mod perlin;
mod raster;
pub mod sampling;
mod texture;

pub use perlin::Perlin;
pub use raster::Image;
pub use texture::{
    CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture, TextureError, TextureResult,
};
