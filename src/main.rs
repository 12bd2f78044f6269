//! Terminal memory game runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from the
//! term crate. Configuration comes from `MEMORY_*` environment variables;
//! logs go to the file named by `MEMORY_LOG_PATH`, if any.

use std::fs::File;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_memory::core::{GameConfig, GameSession, GameSnapshot};
use tui_memory::input::{handle_key_event, should_quit, Cursor};
use tui_memory::term::{FrameBuffer, GameView, TermPresenter, TerminalRenderer, Viewport};
use tui_memory::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    init_tracing()?;
    let config = load_config()?;
    info!(seed = config.seed, cards = config.card_count(), "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let session = result?;
    let snap = session.snapshot();
    let line = serde_json::json!({
        "status": snap.status,
        "generation": snap.generation,
        "moveCount": snap.move_count,
        "starRating": snap.star_rating,
        "elapsedSeconds": snap.elapsed_seconds,
        "clock": session.timer().reading(),
        "pairsMatched": snap.matched_count() / 2,
        "pairsTotal": snap.cards.len() / 2,
    });
    println!("{line}");
    Ok(())
}

/// Log to `MEMORY_LOG_PATH` when set; the terminal itself is owned by the game.
fn init_tracing() -> Result<()> {
    let Ok(path) = std::env::var("MEMORY_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn load_config() -> Result<GameConfig> {
    let config = GameConfig::from_env().context("invalid MEMORY_* configuration")?;
    if std::env::var_os("MEMORY_SEED").is_some() {
        return Ok(config);
    }
    Ok(config.with_seed(rand::random()))
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<GameSession<TermPresenter>> {
    let card_count = config.card_count();
    let mut session = GameSession::new(config, TermPresenter::new(card_count))?;
    session.start();

    let view = GameView::default();
    let mut cursor = Cursor::new(card_count);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut redraw = true;

    loop {
        // Render.
        if session.presenter_mut().take_dirty() || redraw {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            session.snapshot_into(&mut snap);
            view.render_into(
                &snap,
                session.presenter(),
                Some(cursor.index()),
                Viewport::new(w, h),
                &mut fb,
            );
            term.draw_swap(&mut fb)?;
            redraw = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(session);
                    }
                    match handle_key_event(key) {
                        Some(GameAction::Select) => {
                            // Rejected selections are logged by the session.
                            let _ = session.select_card(cursor.index());
                        }
                        Some(GameAction::Restart) => {
                            session.presenter_mut().reset();
                            session.restart();
                            cursor.reset();
                        }
                        Some(action) => {
                            cursor.apply(action);
                        }
                        None => {}
                    }
                    redraw = true;
                }
                Event::Resize(..) => {
                    term.invalidate();
                    redraw = true;
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let elapsed_ms = take_elapsed_ms(&mut last_tick, Instant::now());
            session.tick(elapsed_ms);
        }
    }
}

/// Whole milliseconds between `last` and `now`.
///
/// `last` moves forward by exactly the returned amount, so frame overrun and
/// sub-millisecond remainders carry into the next tick instead of being lost.
fn take_elapsed_ms(last: &mut Instant, now: Instant) -> u32 {
    let ms = now
        .saturating_duration_since(*last)
        .as_millis()
        .min(u128::from(u32::MAX)) as u32;
    *last += Duration::from_millis(u64::from(ms));
    ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slow_frames_are_not_truncated() {
        let start = Instant::now();
        let mut last = start;

        assert_eq!(take_elapsed_ms(&mut last, start + Duration::from_millis(40)), 40);
        assert_eq!(last, start + Duration::from_millis(40));
    }

    #[test]
    fn test_sub_millisecond_remainder_carries() {
        let start = Instant::now();
        let mut last = start;
        let mut total = 0;

        // 0.6ms past each frame boundary adds up to whole milliseconds.
        for frame in 1..=10u64 {
            let now = start + Duration::from_micros(frame * 16_600);
            total += take_elapsed_ms(&mut last, now);
        }
        assert_eq!(total, 166);
    }

    #[test]
    fn test_clock_behind_last_tick_yields_zero() {
        let start = Instant::now();
        let mut last = start + Duration::from_millis(5);
        assert_eq!(take_elapsed_ms(&mut last, start), 0);
    }
}
