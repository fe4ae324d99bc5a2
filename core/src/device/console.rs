//! Text console overlay.
//!
//! A 30x20 grid of character cells over the 240x160 LCD (8x8 font). The
//! program side is a byte stream, exposed through [`core::fmt::Write`]:
//! printable ASCII advances the cursor, `\n` starts the next row, and the
//! `ESC [ row ; col H` sequence repositions the cursor — the only control
//! sequence the diagnostics use. Malformed sequences are discarded.
//!
//! The host side reads cells back for rendering and tests; `render` draws
//! the whole grid into an RGB24 framebuffer with the embedded font.

use core::fmt;

use crate::device::font;

/// Character columns (240 / 8).
pub const COLS: usize = 30;
/// Character rows (160 / 8).
pub const ROWS: usize = 20;

/// LCD width in pixels.
pub const WIDTH: usize = COLS * font::GLYPH_WIDTH;
/// LCD height in pixels.
pub const HEIGHT: usize = ROWS * font::GLYPH_HEIGHT;

const FG: [u8; 3] = [0xE0, 0xE0, 0xE0];
const BG: [u8; 3] = [0x10, 0x18, 0x30];

/// Escape sequence parser state.
#[derive(Clone, Copy)]
enum EscState {
    Ground,
    /// Saw ESC, waiting for '['.
    Escape,
    /// Inside `ESC [ row ; col H`. `col` is None until the ';'.
    Csi { row: u16, col: Option<u16> },
}

pub struct TextConsole {
    cells: [[u8; COLS]; ROWS],
    cursor_row: usize,
    cursor_col: usize,
    esc: EscState,
}

impl TextConsole {
    /// A blank console with the cursor at the top-left cell.
    pub fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            cursor_row: 0,
            cursor_col: 0,
            esc: EscState::Ground,
        }
    }

    /// Blank every cell and home the cursor.
    pub fn clear(&mut self) {
        self.cells = [[b' '; COLS]; ROWS];
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.esc = EscState::Ground;
    }

    /// Feed one byte of the output stream.
    pub fn write_byte(&mut self, byte: u8) {
        match self.esc {
            EscState::Ground => match byte {
                0x1B => self.esc = EscState::Escape,
                b'\n' => {
                    self.cursor_col = 0;
                    self.cursor_row = (self.cursor_row + 1) % ROWS;
                }
                0x20..=0x7E => {
                    self.cells[self.cursor_row][self.cursor_col] = byte;
                    self.cursor_col += 1;
                    if self.cursor_col == COLS {
                        self.cursor_col = 0;
                        self.cursor_row = (self.cursor_row + 1) % ROWS;
                    }
                }
                _ => {}
            },
            EscState::Escape => {
                self.esc = if byte == b'[' {
                    EscState::Csi { row: 0, col: None }
                } else {
                    EscState::Ground
                };
            }
            EscState::Csi { row, col } => match byte {
                b'0'..=b'9' => {
                    let digit = (byte - b'0') as u16;
                    self.esc = match col {
                        None => EscState::Csi {
                            row: row.saturating_mul(10).saturating_add(digit),
                            col: None,
                        },
                        Some(c) => EscState::Csi {
                            row,
                            col: Some(c.saturating_mul(10).saturating_add(digit)),
                        },
                    };
                }
                b';' if col.is_none() => {
                    self.esc = EscState::Csi { row, col: Some(0) };
                }
                b'H' => {
                    // Out-of-range coordinates clamp to the last cell.
                    self.cursor_row = (row as usize).min(ROWS - 1);
                    self.cursor_col = (col.unwrap_or(0) as usize).min(COLS - 1);
                    self.esc = EscState::Ground;
                }
                _ => self.esc = EscState::Ground,
            },
        }
    }

    /// The character stored at a cell.
    pub fn char_at(&self, row: usize, col: usize) -> char {
        self.cells[row][col] as char
    }

    /// One row's characters as a string (trailing spaces included).
    pub fn row_text(&self, row: usize) -> String {
        self.cells[row].iter().map(|&b| b as char).collect()
    }

    /// Draw the grid into an RGB24 pixel buffer of at least
    /// `WIDTH * HEIGHT * 3` bytes, left-to-right, top-to-bottom.
    pub fn render(&self, buffer: &mut [u8]) {
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &ch) in cells.iter().enumerate() {
                let glyph = font::glyph(ch);
                let x0 = col * font::GLYPH_WIDTH;
                let y0 = row * font::GLYPH_HEIGHT;
                for (gy, &bits) in glyph.iter().enumerate() {
                    let line = ((y0 + gy) * WIDTH + x0) * 3;
                    for gx in 0..font::GLYPH_WIDTH {
                        let color = if bits & (0x80 >> gx) != 0 { FG } else { BG };
                        let offset = line + gx * 3;
                        buffer[offset..offset + 3].copy_from_slice(&color);
                    }
                }
            }
        }
    }
}

impl Default for TextConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for TextConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            self.write_byte(byte);
        }
        Ok(())
    }
}
