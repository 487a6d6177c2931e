//! Plain-data view of a session, consumed by the presentation layer.

use crate::types::{Direction, BOARD_SIZE};

/// Everything a renderer needs for one frame.
///
/// Cell codes in `board`: 0 empty, 1 snake body, 2 snake head, 3 apple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    /// Head orientation, for visual rotation of the head glyph
    pub direction: Direction,
    pub score: u32,
    pub record: u32,
    pub snake_len: usize,
    pub paused: bool,
    pub running: bool,
    pub game_over: bool,
    pub won: bool,
    pub tick_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        self.direction = Direction::Right;
        self.score = 0;
        self.record = 0;
        self.snake_len = 0;
        self.paused = true;
        self.running = false;
        self.game_over = false;
        self.won = false;
        self.tick_interval_ms = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            direction: Direction::Right,
            score: 0,
            record: 0,
            snake_len: 0,
            paused: true,
            running: false,
            game_over: false,
            won: false,
            tick_interval_ms: 0,
        };
        s.clear();
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_paused_and_empty() {
        let snap = GameSnapshot::default();
        assert!(snap.paused);
        assert!(!snap.playable());
        assert_eq!(snap.board, [[0u8; 15]; 15]);
    }

    #[test]
    fn test_playable_requires_running_unpaused() {
        let mut snap = GameSnapshot::default();
        snap.paused = false;
        assert!(snap.playable());
        snap.game_over = true;
        assert!(!snap.playable());
    }
}
