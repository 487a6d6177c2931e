//! Board module - manages the game grid and the snake
//!
//! The board is a 15x15 grid where each cell is empty or holds a snake
//! segment or the apple. Cells are stored in a flat array, row-major order.
//! The snake is an ordered segment list, tail at index 0 and head last; the
//! cell grid is rebuilt from the segment list after every advance.
//! Coordinates: (row, col), both ranging 0..14.

use arrayvec::ArrayVec;

use crate::core::rng::SimpleRng;
use crate::types::{
    Cell, Direction, Occupant, APPLE_START, BOARD_SIZE, SNAKE_START_COL, SNAKE_START_ROW,
    START_SNAKE_LEN,
};

/// Total number of cells on the board
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A cell coordinate, signed so out-of-bounds candidates are representable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Position one step away in the given direction
    pub fn stepped(&self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    pub fn in_bounds(&self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE as i8 && self.col >= 0 && self.col < BOARD_SIZE as i8
    }
}

/// One unit of the snake body: where it is now, and where it will be after
/// the following tick (precomputed lookahead)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub current: Position,
    pub next: Position,
}

/// What the head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

/// Outcome of a head-move computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    Blocked(Collision),
    Advance,
    AdvanceAndGrow,
}

/// Candidate head move for the upcoming tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadMove {
    pub current: Position,
    pub next: Position,
    pub status: MoveStatus,
}

/// Authoritative grid state: snake, apple, direction and the per-tick
/// direction-change latch
#[derive(Debug, Clone)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; CELL_COUNT],
    /// Tail at index 0, head at the last index
    snake: ArrayVec<Segment, CELL_COUNT>,
    apple: Position,
    direction: Direction,
    can_change_direction: bool,
}

impl Board {
    /// Build the default board: a 4-segment snake lying horizontally at the
    /// start row with the head oriented per `direction`, and the apple at
    /// its fixed default location.
    pub fn new(direction: Direction) -> Self {
        let mut snake = ArrayVec::new();
        for i in 0..START_SNAKE_LEN {
            let current = Position::new(SNAKE_START_ROW, SNAKE_START_COL + i as i8);
            let next = if i + 1 == START_SNAKE_LEN {
                current.stepped(direction)
            } else {
                Position::new(SNAKE_START_ROW, SNAKE_START_COL + i as i8 + 1)
            };
            snake.push(Segment { current, next });
        }

        let mut board = Self {
            cells: [None; CELL_COUNT],
            snake,
            apple: Position::new(APPLE_START.0, APPLE_START.1),
            direction,
            can_change_direction: true,
        };
        board.rebuild_cells();
        board
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_SIZE as i8 || col < 0 || col >= BOARD_SIZE as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_SIZE as usize) + (col as usize))
    }

    /// Get cell at (row, col); None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    fn set(&mut self, row: i8, col: i8, cell: Cell) {
        if let Some(idx) = Self::index(row, col) {
            self.cells[idx] = cell;
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn apple(&self) -> Position {
        self.apple
    }

    pub fn head(&self) -> Position {
        // The snake always has at least its starting segments.
        self.snake[self.snake.len() - 1].current
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.snake
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Compute the candidate head cell for the current direction.
    ///
    /// Reads the board as it stands before any mutation for this tick: the
    /// tail cell still counts as occupied even though it is about to move.
    pub fn compute_next_head(&self) -> HeadMove {
        let current = self.head().stepped(self.direction);
        let next = current.stepped(self.direction);

        let status = match Self::index(current.row, current.col) {
            None => MoveStatus::Blocked(Collision::Wall),
            Some(idx) => match self.cells[idx] {
                Some(Occupant::SnakeBody) | Some(Occupant::SnakeHead) => {
                    MoveStatus::Blocked(Collision::Body)
                }
                Some(Occupant::Apple) => MoveStatus::AdvanceAndGrow,
                None => MoveStatus::Advance,
            },
        };

        HeadMove {
            current,
            next,
            status,
        }
    }

    /// Advance the snake one cell: every segment inherits the position data
    /// of its neighbor closer to the head, and a new head segment is
    /// appended at the computed position. When growing, the old tail is
    /// reinserted instead of being dropped (net length +1).
    ///
    /// Returns the segment that was (or would have been) dropped. Opens the
    /// direction-change latch for the next tick.
    pub fn advance(&mut self, mv: &HeadMove, grow: bool) -> Segment {
        let dropped = self.snake[0];

        let mut rebuilt: ArrayVec<Segment, CELL_COUNT> = ArrayVec::new();
        for segment in self.snake.iter().skip(1) {
            rebuilt.push(*segment);
        }
        rebuilt.push(Segment {
            current: mv.current,
            next: mv.next,
        });
        if grow {
            rebuilt.insert(0, dropped);
        }
        self.snake = rebuilt;

        self.rebuild_cells();
        self.can_change_direction = true;

        dropped
    }

    /// Rebuild the cell grid wholesale from the segment list.
    ///
    /// The apple is re-marked only if its cell is still free; after a
    /// consumption tick the head sits there until `respawn_apple` runs.
    fn rebuild_cells(&mut self) {
        self.cells = [None; CELL_COUNT];

        let head_index = self.snake.len() - 1;
        for (i, segment) in self.snake.iter().enumerate() {
            let occupant = if i == head_index {
                Occupant::SnakeHead
            } else {
                Occupant::SnakeBody
            };
            if let Some(idx) = Self::index(segment.current.row, segment.current.col) {
                self.cells[idx] = Some(occupant);
            }
        }

        if let Some(idx) = Self::index(self.apple.row, self.apple.col) {
            if self.cells[idx].is_none() {
                self.cells[idx] = Some(Occupant::Apple);
            }
        }
    }

    /// Place the apple on a uniformly random empty cell by rejection
    /// sampling.
    ///
    /// Returns false when the snake covers the whole board and no empty
    /// cell exists; the caller treats that as completing the game.
    pub fn respawn_apple(&mut self, rng: &mut SimpleRng) -> bool {
        if self.snake.len() >= CELL_COUNT {
            return false;
        }

        loop {
            let row = rng.next_range(BOARD_SIZE as u32) as i8;
            let col = rng.next_range(BOARD_SIZE as u32) as i8;
            if self.get(row, col) == Some(None) {
                self.apple = Position::new(row, col);
                self.set(row, col, Some(Occupant::Apple));
                return true;
            }
        }
    }

    /// Apply a direction-change request.
    ///
    /// Accepted iff the request differs from the current direction and its
    /// opposite, and no change has been accepted yet this tick. On
    /// acceptance the direction updates immediately (it is used for the
    /// collision check even before the tick fires) and the latch closes
    /// until the next tick begins.
    pub fn change_direction(&mut self, requested: Direction) -> bool {
        if !self.can_change_direction
            || requested == self.direction
            || requested == self.direction.opposite()
        {
            return false;
        }

        self.direction = requested;
        self.can_change_direction = false;
        true
    }

    /// Write the grid as u8 codes: 0 empty, 1 body, 2 head, 3 apple
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_SIZE as usize]; BOARD_SIZE as usize]) {
        for row in 0..BOARD_SIZE as usize {
            for col in 0..BOARD_SIZE as usize {
                out[row][col] = match self.cells[row * BOARD_SIZE as usize + col] {
                    None => 0,
                    Some(Occupant::SnakeBody) => 1,
                    Some(Occupant::SnakeHead) => 2,
                    Some(Occupant::Apple) => 3,
                };
            }
        }
    }

    /// Build a board from explicit segments for scenario setups
    #[cfg(test)]
    pub fn from_segments(segments: &[Segment], apple: Position, direction: Direction) -> Self {
        let mut snake = ArrayVec::new();
        for segment in segments {
            snake.push(*segment);
        }
        let mut board = Self {
            cells: [None; CELL_COUNT],
            snake,
            apple,
            direction,
            can_change_direction: true,
        };
        board.rebuild_cells();
        board
    }

    #[cfg(test)]
    pub fn apple_cell_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Some(Occupant::Apple))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}
