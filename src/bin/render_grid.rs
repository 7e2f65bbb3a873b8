//! Render a biome grid to SVG.
//!
//! Usage: cargo run --release --bin render_grid -- [OPTIONS]
//!
//! Options:
//!   --width <CELLS>      Generated grid width (default: 64)
//!   --height <CELLS>     Generated grid height (default: 48)
//!   --seed <SEED>        Biome noise and overlay seed (default: 12345)
//!   --grid <PATH>        Load the grid from JSON rows instead of generating it
//!   --config <PATH>      Render config JSON
//!   --styles <PATH>      Biome style overrides JSON
//!   --frames <N>         Frames to render (default: 30)
//!   --corruption <L>     Corruption level in [0, 1] (default: 0.6)
//!   --infection <R>      Radius of an infection blob at the grid centre (default: 8)
//!   --out <PATH>         Output SVG of the last frame (default: "biomes.svg")
//!   --dedup              Emit each shared region edge once

use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use biomescape::core::logging;
use biomescape::core::time::AnimationClock;
use biomescape::core::types::Result;
use biomescape::math::Viewport;
use biomescape::render::{BiomeRenderer, RenderConfig, SvgSurface};
use biomescape::style::{Rgba, StyleTable};
use biomescape::terrain::{BiomeGrid, BiomeMap, BiomeType};

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let width = parse_usize_arg(&args, "--width").unwrap_or(64);
    let height = parse_usize_arg(&args, "--height").unwrap_or(48);
    let seed = parse_u32_arg(&args, "--seed").unwrap_or(12345);
    let frames = parse_usize_arg(&args, "--frames").unwrap_or(30).max(1);
    let corruption = parse_f32_arg(&args, "--corruption").unwrap_or(0.6);
    let out = PathBuf::from(parse_str_arg(&args, "--out").unwrap_or_else(|| "biomes.svg".to_string()));

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => RenderConfig::load(&PathBuf::from(path))?,
        None => RenderConfig::default(),
    };
    if args.iter().any(|a| a == "--dedup") {
        config.dedup_transitions = true;
    }
    let styles = match parse_str_arg(&args, "--styles") {
        Some(path) => StyleTable::load(&PathBuf::from(path))?,
        None => StyleTable::default(),
    };
    let mut grid = match parse_str_arg(&args, "--grid") {
        Some(path) => BiomeGrid::load(&PathBuf::from(path))?,
        None => BiomeMap::new(seed).generate_grid(width, height),
    };
    let infection = parse_f32_arg(&args, "--infection").unwrap_or(8.0);
    infect(&mut grid, infection);

    println!("=== Biomescape Grid Renderer ===");
    println!("Grid:       {} x {} cells", grid.width(), grid.height());
    println!("Tile size:  {}", config.tile_size);
    println!("Frames:     {}", frames);
    println!("Corruption: {}", corruption);
    println!();

    let tile_size = config.tile_size;
    let mut renderer = BiomeRenderer::new(config, styles)?;
    renderer.set_grid(&grid);
    println!("Regions:    {}", renderer.regions().len());

    let viewport = Viewport::from_bounds(0.0, 0.0, grid.width() as f32, grid.height() as f32);
    let mut surface = SvgSurface::new(grid.width() as f32 * tile_size, grid.height() as f32 * tile_size)
        .with_background(Rgba::rgb(0xff, 0xff, 0xff));
    let mut clock = AnimationClock::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);

    for frame in 0..frames {
        surface.clear();
        let stats = renderer.render_frame(&viewport, &clock, corruption, &mut surface, &mut rng)?;
        if frame % 10 == 0 || frame + 1 == frames {
            println!(
                "  frame {:>4}: {:.2} ms avg, {} regions, {} entities, {} shapes",
                frame,
                stats.frame_time_ms,
                stats.regions_rendered,
                stats.entities_rendered,
                surface.elements()
            );
        }
        clock.tick();
    }

    surface.save(&out)?;
    println!();
    println!("Wrote {}", out.display());
    Ok(())
}

/// Paint concentric infection rings (core, heavy, normal) around the grid centre
fn infect(grid: &mut BiomeGrid, radius: f32) {
    if radius <= 0.0 {
        return;
    }
    let (cx, cy) = (grid.width() as f32 / 2.0, grid.height() as f32 / 2.0);
    let r = radius.ceil() as i32;
    for y in (cy as i32 - r)..=(cy as i32 + r) {
        for x in (cx as i32 - r)..=(cx as i32 + r) {
            let d = ((x as f32 + 0.5 - cx).powi(2) + (y as f32 + 0.5 - cy).powi(2)).sqrt() / radius;
            let biome = if d < 0.35 {
                BiomeType::InfectedCore
            } else if d < 0.7 {
                BiomeType::InfectedHeavy
            } else if d <= 1.0 {
                BiomeType::InfectedNormal
            } else {
                continue;
            };
            grid.set(x, y, biome);
        }
    }
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
