//! Terminal Snake runner (default binary).
//!
//! Wires the keyboard, the session and the renderer together: key events are
//! mapped to session commands, the wall-clock scheduler's deadline bounds the
//! input-poll timeout, and every loop iteration redraws from a fresh
//! snapshot.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_snake::core::{GameSession, SessionEvent, WallScheduler};
use tui_snake::input::{map_key, should_quit};
use tui_snake::term::{GameView, TerminalRenderer, Viewport};
use tui_snake::types::GameCommand;

/// Poll timeout while no tick is pending (idle or paused).
const IDLE_POLL_MS: u64 = 100;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = parse_seed(&args)?.unwrap_or_else(time_seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Parse the optional `--seed <u32>` argument fixing the apple sequence.
fn parse_seed(args: &[String]) -> Result<Option<u32>> {
    let mut seed = None;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(seed)
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut session = GameSession::new(WallScheduler::new(), seed);
    let view = GameView::default();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&session.snapshot(), Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until the next tick deadline.
        let timeout = match session.scheduler().deadline() {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => Duration::from_millis(IDLE_POLL_MS),
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }

                    match map_key(key) {
                        Some(GameCommand::Turn(direction)) => {
                            if session.running() && !session.game_over() {
                                session.request_direction(direction);
                            } else if !session.game_over() {
                                // A direction key starts a fresh run headed
                                // that way.
                                session.start_with(direction);
                            }
                        }
                        Some(GameCommand::ToggleStatus) => session.toggle_status(),
                        Some(GameCommand::Reset) => session.reset(),
                        None => {}
                    }
                }
            }
        }

        // Tick.
        if let Some(handle) = session.scheduler_mut().poll_fired() {
            session.timer_fired(handle);
        }

        if let Some(SessionEvent::GameOver { .. }) = session.take_last_event() {
            term.bell()?;
        }
    }
}
