//! Session module - tick scheduling, score and record, lifecycle
//!
//! `GameSession` ties together the board, the speed curve, the RNG and a
//! tick scheduler. It is generic over the scheduler so the terminal runner
//! can use wall-clock timers while tests drive ticks by hand.
//!
//! Lifecycle per game: Idle -> Running <-> Paused -> GameOver -> (reset) ->
//! Idle. Idle and Paused both suspend ticking; GameOver is terminal until an
//! explicit reset builds a fresh board.

use std::time::Duration;

use crate::core::board::{Board, MoveStatus};
use crate::core::rng::SimpleRng;
use crate::core::scheduler::{TickScheduler, TimerHandle};
use crate::core::snapshot::GameSnapshot;
use crate::core::timing::tick_interval_ms;
use crate::types::Direction;

/// Lifecycle notification for the presentation collaborator.
///
/// Consumed through [`GameSession::take_last_event`]; set exactly once per
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    GameOver { score: u32 },
}

/// One running game plus the process-lifetime record
#[derive(Debug)]
pub struct GameSession<S: TickScheduler> {
    board: Board,
    scheduler: S,
    rng: SimpleRng,
    pending_tick: Option<TimerHandle>,
    score: u32,
    record: u32,
    running: bool,
    paused: bool,
    game_over: bool,
    won: bool,
    last_event: Option<SessionEvent>,
}

impl<S: TickScheduler> GameSession<S> {
    /// Create a session in the idle, paused state
    pub fn new(scheduler: S, seed: u32) -> Self {
        Self {
            board: Board::new(Direction::Right),
            scheduler,
            rng: SimpleRng::new(seed),
            pending_tick: None,
            score: 0,
            record: 0,
            running: false,
            paused: true,
            game_over: false,
            won: false,
            last_event: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn record(&self) -> u32 {
        self.record
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn direction(&self) -> Direction {
        self.board.direction()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Take and clear the last lifecycle event
    pub fn take_last_event(&mut self) -> Option<SessionEvent> {
        self.last_event.take()
    }

    /// Flip paused/running.
    ///
    /// Resuming a session that is not running performs an implicit reset
    /// first (this is how a finished game restarts). Pausing cancels the
    /// pending tick without losing state.
    pub fn toggle_status(&mut self) {
        self.paused = !self.paused;

        if self.paused {
            self.cancel_pending();
        } else {
            if !self.running {
                self.reset_board();
                self.running = true;
            }
            self.schedule_tick();
        }
    }

    /// Start a fresh run with the snake oriented per `direction`
    pub fn start_with(&mut self, direction: Direction) {
        self.cancel_pending();
        self.board = Board::new(direction);
        self.score = 0;
        self.game_over = false;
        self.won = false;
        self.last_event = None;
        self.running = true;
        self.paused = false;
        self.schedule_tick();
    }

    /// Discard the current game and return to the idle, paused state.
    /// The record survives.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.reset_board();
        self.running = false;
        self.paused = true;
    }

    fn reset_board(&mut self) {
        self.board = Board::new(Direction::Right);
        self.score = 0;
        self.game_over = false;
        self.won = false;
        self.last_event = None;
    }

    /// Forward a direction-change request to the board.
    ///
    /// Ignored entirely once the session is in GameOver.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.game_over {
            return false;
        }
        self.board.change_direction(direction)
    }

    /// React to a fired timer.
    ///
    /// Anything but the pending handle is a stale firing from before a
    /// cancel or reset and is ignored, so a cancelled tick can never run
    /// against a reinitialized board.
    pub fn timer_fired(&mut self, handle: TimerHandle) {
        if self.pending_tick != Some(handle) {
            return;
        }
        self.pending_tick = None;

        if self.paused || self.game_over {
            return;
        }
        self.step();
    }

    /// One simulation tick: move, maybe grow, maybe end, reschedule.
    fn step(&mut self) {
        let mv = self.board.compute_next_head();

        match mv.status {
            MoveStatus::Blocked(_) => {
                self.finish_game(false);
            }
            MoveStatus::Advance => {
                self.board.advance(&mv, false);
                self.schedule_tick();
            }
            MoveStatus::AdvanceAndGrow => {
                self.board.advance(&mv, true);
                self.score += 1;
                if self.score > self.record {
                    self.record = self.score;
                }
                if self.board.respawn_apple(&mut self.rng) {
                    self.schedule_tick();
                } else {
                    // Snake covers the whole board: nothing left to eat.
                    self.finish_game(true);
                }
            }
        }
    }

    fn finish_game(&mut self, won: bool) {
        self.game_over = true;
        self.won = won;
        self.running = false;
        self.paused = true;
        if self.score > self.record {
            self.record = self.score;
        }
        self.last_event = Some(SessionEvent::GameOver { score: self.score });
    }

    fn schedule_tick(&mut self) {
        self.cancel_pending();
        let delay = Duration::from_millis(u64::from(tick_interval_ms(self.score)));
        self.pending_tick = Some(self.scheduler.schedule(delay));
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.direction = self.board.direction();
        out.score = self.score;
        out.record = self.record;
        out.snake_len = self.board.snake_len();
        out.paused = self.paused;
        out.running = self.running;
        out.game_over = self.game_over;
        out.won = self.won;
        out.tick_interval_ms = tick_interval_ms(self.score);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
