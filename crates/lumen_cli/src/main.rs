use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;

use lumen_renderer::{render, render_parallel, RenderConfig};

mod cli;
mod scenes;

use cli::Args;

/// Initialize the logger; `RUST_LOG` still applies per-module filters.
fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    // One seed drives both scene generation and sampling
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let scene = scenes::build(args.scene, &args.texture, &mut rng)
        .with_context(|| format!("Failed to build scene {:?}", args.scene))?;

    let aspect_ratio = args.aspect.unwrap_or(scene.aspect_ratio);
    let mut camera = scene.camera.with_aspect_ratio(args.width, aspect_ratio);
    camera.initialize().context("Invalid camera settings")?;

    let config = RenderConfig {
        samples_per_pixel: args.samples,
        max_depth: args.depth,
        background: scene.background,
        seed: Some(seed),
    };

    let image = if args.parallel {
        render_parallel(&camera, &scene.world, &config)
    } else {
        render(&camera, &scene.world, &config)
    }
    .context("Render failed")?;

    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
