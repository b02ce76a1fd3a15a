use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Random small spheres, some motion blurred, on a checkered ground
    Spheres,
    /// Two large checkered spheres
    Checkers,
    /// Perlin marble ground and sphere
    Perlin,
    /// Image-textured globe (see --texture)
    Earth,
    /// Five colored quads
    Quads,
    /// Perlin spheres lit only by emissive quad and sphere
    SimpleLight,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Offline CPU path tracer", version)]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "spheres")]
    pub scene: SceneKind,

    /// Image width in pixels
    #[arg(long, default_value = "400")]
    pub width: u32,

    /// Width over height; defaults to the scene's own aspect ratio
    #[arg(long)]
    pub aspect: Option<f32>,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100")]
    pub samples: u32,

    /// Maximum number of ray bounces
    #[arg(long, default_value = "50")]
    pub depth: u32,

    /// Seed for scene generation and sampling; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render buckets on all cores instead of one scanline at a time
    #[arg(long, short = 'p')]
    pub parallel: bool,

    /// Image used by the earth scene
    #[arg(long, default_value = "earthmap.jpg")]
    pub texture: PathBuf,

    /// Output file path (.ppm for plain PPM, any other extension via the image crate)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["lumen"]);
        assert_eq!(args.scene, SceneKind::Spheres);
        assert_eq!(args.width, 400);
        assert_eq!(args.samples, 100);
        assert_eq!(args.depth, 50);
        assert!(args.aspect.is_none());
        assert!(args.seed.is_none());
        assert!(!args.parallel);
        assert_eq!(args.output, PathBuf::from("image.ppm"));
    }

    #[test]
    fn test_scene_and_levels() {
        let args = Args::parse_from([
            "lumen",
            "--scene",
            "simple-light",
            "--seed",
            "42",
            "-p",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.scene, SceneKind::SimpleLight);
        assert_eq!(args.seed, Some(42));
        assert!(args.parallel);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_unknown_scene() {
        assert!(Args::try_parse_from(["lumen", "--scene", "teapot"]).is_err());
    }
}
