#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Cube Defence level headlessly.

mod log_visuals;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use cube_defence_core::{Defaults, Face, LevelSpec, TileAddress};
use cube_defence_level::Level;
use cube_defence_rendering::{format_play_time, Hud, HudAction, VisualBridge};
use cube_defence_world::query;
use log::{info, warn};

use crate::log_visuals::LogVisuals;

const DEMO_LEVEL: &str = include_str!("../levels/demo.toml");

/// Command-line arguments accepted by the simulator.
#[derive(Debug, Parser)]
#[command(name = "cube-defence", version, about = "Plays a Cube Defence level headlessly")]
struct CliArgs {
    /// Level description in TOML; the bundled demo level is used when omitted.
    #[arg(long, value_name = "FILE")]
    level: Option<PathBuf>,

    /// Gameplay defaults in TOML; unset fields keep their stock values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Simulated seconds to run before giving up.
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Length of a single simulated frame in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 16)]
    tick_ms: u64,

    /// Seconds of play between presses of the next-wave button.
    #[arg(long, value_name = "SECONDS", default_value_t = 20.0)]
    wave_interval: f32,

    /// Tile to buy a defender on before the level starts, as FACE:ROW:COLUMN.
    #[arg(long = "defender", value_name = "TILE", value_parser = parse_tile)]
    defenders: Vec<TileAddress>,
}

/// Outcome of a headless session.
#[derive(Debug, PartialEq)]
struct Summary {
    won: bool,
    play_time: Duration,
    coins: u32,
    released_waves: usize,
    total_waves: usize,
    invaders_left: usize,
    defenders_left: usize,
    visuals_spawned: usize,
    visuals_live: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let spec = load_level(&args)?;
    let defaults = load_defaults(&args)?;
    let summary = run(&args, &spec, defaults)?;
    print_summary(&summary);
    Ok(())
}

fn load_level(args: &CliArgs) -> Result<LevelSpec> {
    let Some(path) = &args.level else {
        return toml::from_str(DEMO_LEVEL).context("failed to parse the bundled demo level");
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read level {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("failed to parse level {}", path.display()))
}

fn load_defaults(args: &CliArgs) -> Result<Defaults> {
    let Some(path) = &args.config else {
        return Ok(Defaults::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("failed to parse config {}", path.display()))
}

fn run(args: &CliArgs, spec: &LevelSpec, defaults: Defaults) -> Result<Summary> {
    anyhow::ensure!(args.tick_ms > 0, "--tick-ms must be positive");
    let limit = Duration::try_from_secs_f32(args.seconds.max(0.0))
        .with_context(|| format!("--seconds {} is not a usable duration", args.seconds))?;
    let wave_interval = Duration::try_from_secs_f32(args.wave_interval.max(0.0))
        .with_context(|| {
            format!(
                "--wave-interval {} is not a usable duration",
                args.wave_interval
            )
        })?;
    let mut level = Level::new(spec, defaults).context("failed to build level")?;
    let mut hud = Hud::build().context("failed to build HUD")?;
    let mut bridge = VisualBridge::default();
    let mut visuals = LogVisuals::default();
    info!(
        "playing a {} cube with {} waves",
        query::cube(level.world()).dimensions(),
        level.waves().len()
    );

    bridge.build_cube(query::cube(level.world()), &mut visuals);
    for tile in &args.defenders {
        if !hud.open_store(*tile)? {
            continue;
        }
        if let Some(HudAction::BuyDefender(tile)) = hud.press_store()? {
            if let Err(error) = level.purchase_defender(tile) {
                warn!("could not buy a defender on {tile}: {error}");
            }
        }
    }

    press_play(&mut hud, &mut level)?;
    let dt = Duration::from_millis(args.tick_ms);
    let mut next_press = wave_interval;
    let mut elapsed = Duration::ZERO;

    while elapsed < limit && !level.is_won() {
        let events = level.tick(dt);
        bridge.handle(&events, &mut visuals);
        bridge.sync(level.world(), &mut visuals);
        hud.set_timer(level.play_time())?;
        hud.set_coins(level.coin_balance())?;

        if level.play_time() >= next_press && level.released_waves() < level.waves().len() {
            press_play(&mut hud, &mut level)?;
            next_press = level.play_time().saturating_add(wave_interval);
        }
        elapsed = elapsed.saturating_add(dt);
    }
    hud.set_paused(level.is_paused())?;

    let world = level.world();
    Ok(Summary {
        won: level.is_won(),
        play_time: level.play_time(),
        coins: level.coin_balance(),
        released_waves: level.released_waves(),
        total_waves: level.waves().len(),
        invaders_left: query::invader_view(world).iter().count(),
        defenders_left: query::defender_view(world).iter().count(),
        visuals_spawned: visuals.spawned(),
        visuals_live: visuals.live(),
    })
}

fn press_play(hud: &mut Hud, level: &mut Level) -> Result<()> {
    match hud.press_play()? {
        HudAction::StartLevel => level.start(),
        HudAction::NextWave => {
            if !level.start_next_wave() {
                info!("no waves left to release");
            }
        }
        HudAction::BuyDefender(_) => {}
    }
    Ok(())
}

fn print_summary(summary: &Summary) {
    let outcome = if summary.won { "won" } else { "unfinished" };
    println!("level {outcome} after {}", format_play_time(summary.play_time));
    println!(
        "waves released: {}/{}",
        summary.released_waves, summary.total_waves
    );
    println!("coins: ${}", summary.coins);
    println!(
        "invaders left: {}, defenders left: {}",
        summary.invaders_left, summary.defenders_left
    );
    println!(
        "visuals: {} spawned, {} live",
        summary.visuals_spawned, summary.visuals_live
    );
}

fn parse_tile(value: &str) -> Result<TileAddress, String> {
    let mut parts = value.split(':');
    let (Some(face), Some(row), Some(column), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected FACE:ROW:COLUMN, got {value}"));
    };
    let face = Face::ALL
        .into_iter()
        .find(|candidate| candidate.name().eq_ignore_ascii_case(face))
        .ok_or_else(|| format!("unknown face {face}"))?;
    let row = row
        .parse()
        .map_err(|error| format!("invalid row {row}: {error}"))?;
    let column = column
        .parse()
        .map_err(|error| format!("invalid column {column}: {error}"))?;
    Ok(TileAddress::new(face, row, column))
}
