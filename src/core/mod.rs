//! Core module - pure game logic with no I/O dependencies
//!
//! This module contains the board rules, session lifecycle, timing curve and
//! scheduling abstraction. It never touches the terminal: the presentation
//! layer reads it through [`snapshot::GameSnapshot`] and drives it through
//! commands and timer firings, which is what makes the whole game testable
//! without wall-clock waits.

pub mod board;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod timing;

// Re-export commonly used types
pub use board::{Board, Collision, HeadMove, MoveStatus, Position, Segment};
pub use rng::SimpleRng;
pub use scheduler::{ManualScheduler, TickScheduler, TimerHandle, WallScheduler};
pub use session::{GameSession, SessionEvent};
pub use snapshot::GameSnapshot;
pub use timing::tick_interval_ms;
