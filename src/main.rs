//! Terminal runner (default binary).
//!
//! Reads [`AppConfig`] from the environment, logs to a file, and runs the frame loop:
//! crossterm input, one gravity step per frame from the system clock, particles from
//! the drained cell events, then a diffed redraw.

use std::fs::File;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use blockfall::config::LOG_FILTER_VAR;
use blockfall::core::{GameSnapshot, GameState, SystemClock};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{Effects, ParticleField, Renderer, TerminalRenderer, Viewport};
use blockfall::types::GameEvent;
use blockfall::AppConfig;

/// How long the GAME OVER banner stays up, in frames.
const BANNER_FRAMES: u32 = 120;

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config);

    let mut term = TerminalRenderer::stdout()?;
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file so output never lands on the game screen.
fn init_logging(config: &AppConfig) {
    let Some(path) = &config.log_path else {
        return;
    };
    let Ok(file) = File::create(path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut game = GameState::with_config(config.game_config());
    let mut clock = SystemClock::new();
    let mut particles = ParticleField::from_entropy();
    let mut snap = GameSnapshot::default();
    let mut banner_frames = 0u32;

    let frame = config.frame_duration();
    let mut last_frame = Instant::now();

    info!(
        seed = ?config.seed,
        gravity_ms = config.gravity_interval_ms,
        frame_ms = config.frame_ms,
        "Starting blockfall"
    );

    loop {
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release && should_quit(key) => {
                    info!(score = game.score(), "Quit requested");
                    return Ok(());
                }
                Event::Key(key) => {
                    if let Some(action) = handle_key_event(key) {
                        let applied = game.apply_action(action);
                        debug!(action = action.as_str(), applied, "Input");
                    }
                }
                Event::Resize(w, h) => term.resize(Viewport::new(w, h)),
                _ => {}
            }
        }

        if last_frame.elapsed() < frame {
            continue;
        }
        last_frame = Instant::now();

        game.advance(&mut clock);
        for event in game.drain_events() {
            match event {
                GameEvent::Cell(cell) => particles.emit(&cell),
                GameEvent::GameOver => banner_frames = BANNER_FRAMES,
                GameEvent::LinesCleared { .. } | GameEvent::ScoreChanged(_) => {}
            }
        }
        particles.step();

        game.snapshot_into(&mut snap);
        let effects = Effects {
            particles: particles.particles(),
            banner: (banner_frames > 0).then_some("GAME OVER"),
        };
        banner_frames = banner_frames.saturating_sub(1);

        if let Err(err) = term.present(&snap, &effects) {
            warn!(error = %err, "Frame present failed");
            return Err(err);
        }
    }
}
