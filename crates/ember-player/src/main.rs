//! Ember Player - scripted demo session
//!
//! Replays a deterministic input script through the demo game on a headless
//! stage and prints a short session summary.
//!
//! Usage:
//!   ember-player [--config <player.toml>] [--ticks <n>] [--seed <n>]

use anyhow::{Context, Result};
use clap::Parser;
use ember_player::{new_scheduler, PlayerConfig};
use ember_runtime::{HeadlessStage, KeyCode};

#[derive(Parser)]
#[command(name = "ember-player")]
#[command(about = "Ember demo player - replay a scripted session through the tick loop")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<String>,

    /// Override the number of ticks to run
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the stage RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

/// The canned input track: start the game, fly around, fire twice, pause.
fn script_input(stage: &mut HeadlessStage, tick: u64) {
    match tick {
        5 => stage.press_key(KeyCode::Space),
        7 => stage.release_key(KeyCode::Space),
        10 => stage.press_key(KeyCode::ArrowRight),
        20 | 45 => stage.press_key(KeyCode::KeyZ),
        22 | 47 => stage.release_key(KeyCode::KeyZ),
        30 => stage.press_key(KeyCode::ShiftLeft),
        40 => {
            stage.release_key(KeyCode::ShiftLeft);
            stage.release_key(KeyCode::ArrowRight);
            stage.press_key(KeyCode::ArrowDown);
        }
        60 => {
            stage.release_key(KeyCode::ArrowDown);
            stage.press_key(KeyCode::Escape);
        }
        65 => stage.release_key(KeyCode::Escape),
        _ => {}
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlayerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path))?,
        None => PlayerConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    log::debug!("resolved config: {:?}", config);

    println!(
        "Playfield: {}x{}  view: {}x{}  seed: {}",
        config.playfield.width,
        config.playfield.height,
        config.view.width,
        config.view.height,
        config.seed
    );

    let mut scheduler = new_scheduler(&config);
    let mut draw_calls = 0usize;
    for tick in 0..config.ticks {
        script_input(scheduler.stage_mut(), tick);
        scheduler.tick();
        draw_calls += scheduler.stage_mut().drain_draw_calls().len();
        scheduler.stage_mut().input.end_frame();
    }

    println!();
    println!("Ran {} ticks", scheduler.ticks());
    println!("Active states: {:?}", scheduler.states().active_states());
    println!("Live entities: {}", scheduler.entities().len());
    if let Some(player) = scheduler.entities().get("player") {
        println!("Player at X:{:.0} Y:{:.0}", player.pos.x, player.pos.y);
    }
    let bullets = scheduler
        .entities()
        .iter()
        .filter(|e| e.name().starts_with("bullet"))
        .count();
    println!("Bullets in flight: {}", bullets);
    println!("Draw calls recorded: {}", draw_calls);

    Ok(())
}
