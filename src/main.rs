//! Terminal blockfall runner (default binary).
//!
//! Drives the game from a fixed frame loop: key events are polled with a
//! timeout until the next frame, then gravity ticks, freeze events feed the
//! effects, and the frame is rendered through the diffing framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use blockfall::config::{init_logging, Config};
use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, should_quit, SoftDropLatch};
use blockfall::term::{Effects, FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::GameAction;

fn main() -> Result<()> {
    let config = Config::from_args();
    init_logging(&config)?;
    info!(seed = config.seed, frame_ms = config.frame_ms, "blockfall launching");

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, &config));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Feed any pending freeze event to the effects.
fn drain_lock_event(game: &mut GameState, effects: &mut Effects) {
    if let Some(event) = game.take_last_event() {
        debug!(
            kind = event.kind.as_str(),
            lines = event.lines_cleared(),
            points = event.line_clear_score,
            bonus = event.drop_bonus,
            game_over = event.game_over,
            "lock event"
        );
        effects.on_lock(&event);
    }
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let mut game = GameState::new(config.seed);
    let mut effects = Effects::new(config.seed ^ 0x5bd1_e995, config.effects);
    let mut latch = SoftDropLatch::new().with_release_events(term.key_releases());
    let view = GameView::default().with_ghost(config.show_ghost);
    info!(key_releases = term.key_releases(), "terminal ready");

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(config.frame_ms);
    let mut next_frame = Instant::now();
    let mut last_frame_ms = now_ms();

    loop {
        // Input with timeout until the next frame.
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    // Down drives fast gravity through the latch, never a direct move.
                    if latch.handle_key(key.code, key.kind, now_ms()) {
                        continue;
                    }
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if let Some(action) = handle_key_event(key) {
                        if action == GameAction::Start {
                            effects.clear();
                            latch.reset();
                        }
                        game.apply_action(action);
                        drain_lock_event(&mut game, &mut effects);
                    }
                }
                Event::Resize(w, h) => {
                    debug!(w, h, "terminal resized");
                    term.invalidate();
                }
                _ => {}
            }
            if Instant::now() < next_frame {
                continue;
            }
        }

        let frame_start = Instant::now();
        next_frame += frame;
        if next_frame < frame_start {
            next_frame = frame_start + frame;
        }

        // Gravity.
        let now = now_ms();
        game.set_soft_drop(latch.update(now));
        game.tick(now);
        drain_lock_event(&mut game, &mut effects);

        effects.update(now.saturating_sub(last_frame_ms) as u32);
        last_frame_ms = now;

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into_with_effects(&snap, Some(&effects), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}
