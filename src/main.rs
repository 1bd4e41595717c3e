//! Neon Barrage headless runner
//!
//! Drives one seeded run with the scripted autopilot, logging HUD progress and
//! optionally streaming JSON snapshots to stdout for an external renderer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use neon_barrage::Tuning;
use neon_barrage::autopilot;
use neon_barrage::consts::TICKS_PER_SECOND;
use neon_barrage::sim::{GameEvent, GamePhase, GameState, tick};

/// Seconds between HUD log lines
const HUD_LOG_INTERVAL_SECS: u64 = 10;

#[derive(Parser, Debug)]
#[command(name = "neon-barrage")]
#[command(about = "Run the Neon Barrage simulation headless with a scripted pilot")]
struct Cli {
    /// Seed for the run's RNG streams
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Stop after this many ticks if the pilot is still alive
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,
    /// Balance table (JSON); missing keys fall back to the defaults
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print a JSON snapshot every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    snapshot_every: u64,
}

/// Cue counts over the run, as an audio/haptics host would see them
#[derive(Debug, Default)]
struct CueTally {
    shots: u64,
    explosions: u64,
    crashes: u64,
    pickups: u64,
    haptic_ms: u64,
}

impl CueTally {
    fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::PlayerShot => self.shots += 1,
            GameEvent::Explosion => self.explosions += 1,
            GameEvent::Crash => self.crashes += 1,
            GameEvent::PowerUp => self.pickups += 1,
            GameEvent::Haptic { millis } => self.haptic_ms += u64::from(millis),
            GameEvent::EnemyShot
            | GameEvent::LaserCharge
            | GameEvent::BombThrow
            | GameEvent::ScreenFlash
            | GameEvent::GameOver => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let mut state = GameState::with_tuning(cli.seed, tuning);
    state.start_run();

    let tps = u64::from(TICKS_PER_SECOND);
    let mut cues = CueTally::default();

    while state.phase == GamePhase::Playing && state.time_ticks < cli.ticks {
        let now_ms = state.time_ticks as f64 * 1000.0 / tps as f64;
        let input = autopilot::plan(&state, now_ms);
        tick(&mut state, &input);

        for event in state.drain_events() {
            cues.record(event);
        }

        if cli.snapshot_every > 0 && state.time_ticks.is_multiple_of(cli.snapshot_every) {
            let json = serde_json::to_string(&state).context("failed to serialize snapshot")?;
            println!("{json}");
        }

        if state.time_ticks.is_multiple_of(tps * HUD_LOG_INTERVAL_SECS) {
            let hud = state.hud();
            log::info!(
                "t={}s hp={}/{} score={} enemies={} shield={}s multishot={}s",
                state.time_ticks / tps,
                hud.hp,
                hud.max_hp,
                hud.score,
                state.enemies.len(),
                hud.shield_secs,
                hud.multishot_secs
            );
        }
    }

    let hud = state.hud();
    log::info!("Run finished: {:?}", cues);
    println!(
        "seed={} ticks={} score={} hp={}/{} game_over={}",
        cli.seed, state.time_ticks, hud.score, hud.hp, hud.max_hp, hud.game_over
    );
    Ok(())
}
