//! Terminal runner (default binary).
//!
//! Drives one `GameState` at a fixed 50ms tick: poll key events until the next
//! deadline, sample the held buttons, tick the engine, render the snapshot
//! through the framebuffer renderer.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{CoreEvent, GameSnapshot, GameState};
use blockfall::input::{should_quit, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

const GAME_OVER_BANNER_MS: u64 = 1000;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term));

    // Always try to restore terminal state.
    let restored = term.exit();
    result.and(restored)
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game_state = GameState::new(wall_clock_seed());
    game_state.start(0);

    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;
    let tick_duration = Duration::from_millis(TICK_MS);
    let mut next_tick = clock + tick_duration;
    let mut banner_until: Option<u64> = None;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game_state.snapshot_into(&mut snap);
        let banner = banner_until
            .filter(|&until| now_ms() < until)
            .map(|_| "GAME OVER");
        view.render_into_with_banner(&snap, banner, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next tick deadline.
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if timeout.is_zero() || !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        input.handle_key_press(key.code, now_ms());
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        next_tick += tick_duration;
        let now = now_ms();
        let held = input.sample(now);
        game_state.tick(now, held);

        if let Some(CoreEvent::GameOver { .. }) = game_state.take_last_event() {
            input.reset();
            banner_until = Some(now + GAME_OVER_BANNER_MS);
        }

        // Fell behind (suspended terminal, slow draw): resync instead of bursting.
        let current = Instant::now();
        if next_tick < current {
            next_tick = current + tick_duration;
        }
    }
}
