//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crossterm::style::Color;

use crate::core::GameSnapshot;
use crate::term::fb::{CellStyle, FrameBuffer};
use crate::types::{Direction, BOARD_SIZE};

/// Snapshot cell codes, as written by `Board::write_u8_grid`.
const CODE_BODY: u8 = 1;
const CODE_HEAD: u8 = 2;
const CODE_APPLE: u8 = 3;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the Snake board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render a session snapshot into a framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_px_w = (BOARD_SIZE as u16) * self.cell_w;
        let board_px_h = (BOARD_SIZE as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let field = CellStyle {
            fg: Color::Rgb {
                r: 90,
                g: 100,
                b: 90,
            },
            bg: Color::Rgb {
                r: 24,
                g: 32,
                b: 24,
            },
            bold: false,
        };
        let border = CellStyle {
            fg: Color::Rgb {
                r: 200,
                g: 200,
                b: 200,
            },
            bg: Color::Rgb { r: 0, g: 0, b: 0 },
            bold: false,
        };

        // Background for the play area.
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', field);

        // Border.
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Entities.
        for row in 0..BOARD_SIZE as usize {
            for col in 0..BOARD_SIZE as usize {
                match snap.board[row][col] {
                    CODE_BODY => self.draw_cell(
                        &mut fb,
                        start_x,
                        start_y,
                        col as u16,
                        row as u16,
                        '█',
                        body_style(field),
                    ),
                    CODE_HEAD => self.draw_cell(
                        &mut fb,
                        start_x,
                        start_y,
                        col as u16,
                        row as u16,
                        head_glyph(snap.direction),
                        head_style(field),
                    ),
                    CODE_APPLE => self.draw_cell(
                        &mut fb,
                        start_x,
                        start_y,
                        col as u16,
                        row as u16,
                        '●',
                        apple_style(field),
                    ),
                    _ => self.draw_cell(
                        &mut fb,
                        start_x,
                        start_y,
                        col as u16,
                        row as u16,
                        '·',
                        field,
                    ),
                }
            }
        }

        // Side panel (score/record/speed).
        self.draw_side_panel(&mut fb, snap, viewport, start_x, start_y, frame_w);

        // Overlays.
        if snap.game_over {
            let text = if snap.won { "YOU WIN" } else { "GAME OVER" };
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, text);
        } else if snap.paused && snap.running {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if !snap.running {
            self.draw_overlay_text(
                &mut fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                "PRESS SPACE OR AN ARROW KEY",
            );
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            fg: Color::Rgb {
                r: 220,
                g: 220,
                b: 220,
            },
            bg: Color::Rgb { r: 0, g: 0, b: 0 },
            bold: true,
        };
        let value = CellStyle {
            fg: Color::Rgb {
                r: 200,
                g: 200,
                b: 200,
            },
            bg: Color::Rgb { r: 0, g: 0, b: 0 },
            bold: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", snap.score), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "RECORD", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", snap.record), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}ms", snap.tick_interval_ms), value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "arrows/wasd move", value);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "space pause", value);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "r reset  q quit", value);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Color::Rgb {
                r: 255,
                g: 255,
                b: 255,
            },
            bg: Color::Rgb { r: 0, g: 0, b: 0 },
            bold: true,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Head glyph rotated to match the direction of travel.
pub fn head_glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => '▲',
        Direction::Down => '▼',
        Direction::Left => '◀',
        Direction::Right => '▶',
    }
}

fn body_style(field: CellStyle) -> CellStyle {
    CellStyle {
        fg: Color::Rgb {
            r: 100,
            g: 220,
            b: 120,
        },
        bold: false,
        ..field
    }
}

fn head_style(field: CellStyle) -> CellStyle {
    CellStyle {
        fg: Color::Rgb {
            r: 160,
            g: 255,
            b: 170,
        },
        bold: true,
        ..field
    }
}

fn apple_style(field: CellStyle) -> CellStyle {
    CellStyle {
        fg: Color::Rgb {
            r: 220,
            g: 80,
            b: 80,
        },
        bold: false,
        ..field
    }
}
