//! Terminal rendering module.
//!
//! A small, game-oriented rendering layer: the game view draws a session
//! snapshot into a styled-cell framebuffer, and the renderer flushes that
//! buffer to a raw-mode terminal. The core never sees any of this.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{head_glyph, GameView, Viewport};
pub use renderer::TerminalRenderer;
