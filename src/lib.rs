//! Terminal Snake.
//!
//! A timed grid simulation: a snake moves on a fixed 15x15 board, grows by
//! consuming apples, and the game ends on collision with a wall or itself.
//! The `core` module owns all rules and timing and is fully deterministic;
//! `input` and `term` are thin terminal collaborators around it.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
