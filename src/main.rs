//! Sprite Swarm - headless runner
//!
//! Runs the swarm for a fixed number of frames without a window and reports
//! per-frame update timing, the way the windowed host prints it.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sprite_swarm::core::config::SwarmConfig;
use sprite_swarm::core::error::Result;
use sprite_swarm::ecs::world::World;
use sprite_swarm::render::metrics::FrameMetrics;
use sprite_swarm::render::sprite::{SpritePosition, SpriteVisual};
use sprite_swarm::spatial::grid::CellAddressing;

/// Headless sprite swarm runner
#[derive(Parser, Debug)]
#[command(name = "sprite_swarm")]
#[command(about = "Run the sprite swarm simulation headless and report frame timings")]
struct Args {
    /// TOML config file; unset keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Fixed timestep per frame in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Override regular population size
    #[arg(long)]
    regular: Option<usize>,

    /// Override hazard population size
    #[arg(long)]
    hazards: Option<usize>,

    /// Out-of-grid cell handling: wrap or clamp
    #[arg(long)]
    addressing: Option<CellAddressing>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    frames: u64,
    sprites: usize,
    regular: usize,
    hazards: usize,
    avg_update_ms: f32,
    min_update_ms: f32,
    max_update_ms: f32,
    total_contacts: u64,
    recolored: usize,
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sprite_swarm=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SwarmConfig::load(path)?,
        None => SwarmConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(regular) = args.regular {
        config.regular_count = regular;
    }
    if let Some(hazards) = args.hazards {
        config.hazard_count = hazards;
    }
    if let Some(addressing) = args.addressing {
        config.addressing = addressing;
    }

    let mut world = World::new(config)?;
    world.initialize()?;

    let total = world.config.total_count();
    let mut positions = vec![SpritePosition::default(); total];
    let mut visuals = vec![SpriteVisual::default(); total];
    let mut metrics = FrameMetrics::new();
    let mut total_contacts = 0u64;

    let mut time = 0.0f64;
    for frame in 0..args.frames {
        metrics.begin_frame();
        let count = world.update(&mut positions, &mut visuals, time, args.dt)?;
        metrics.end_frame(count, world.last_contacts);

        total_contacts += world.last_contacts as u64;
        time += args.dt as f64;

        if frame % 60 == 59 {
            tracing::info!(frame = frame + 1, "{}", metrics.summary());
        }
    }

    let recolored = visuals[..world.regular_count()]
        .iter()
        .filter(|v| (v.r, v.g, v.b) != (255, 255, 255))
        .count();

    let summary = RunSummary {
        frames: args.frames,
        sprites: metrics.sprite_count,
        regular: world.regular_count(),
        hazards: world.hazard_count(),
        avg_update_ms: metrics.avg_frame_time_ms(),
        min_update_ms: metrics.min_frame_time_ms(),
        max_update_ms: metrics.max_frame_time_ms(),
        total_contacts,
        recolored,
        seed: world.config.seed,
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("=== SPRITE SWARM ===");
        println!("Frames:      {}", summary.frames);
        println!(
            "Sprites:     {} ({} regular, {} hazards)",
            summary.sprites, summary.regular, summary.hazards
        );
        println!(
            "Update time: {:.2}ms avg, {:.2}ms min, {:.2}ms max (last 120 frames)",
            summary.avg_update_ms, summary.min_update_ms, summary.max_update_ms
        );
        println!("Contacts:    {}", summary.total_contacts);
        println!("Recolored:   {}", summary.recolored);
    }

    world.destroy();
    Ok(())
}
