//! Keyboard input module.

pub mod map;

pub use map::{map_key, should_quit};
