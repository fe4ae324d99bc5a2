//! Measured frame-rate overlay, drawn with the devkit's own 8x8 font
//! at the bottom-right corner of the framebuffer.

use keylight_core::device::console::{HEIGHT, WIDTH};
use keylight_core::device::font;

const COLOR: [u8; 3] = [0x60, 0xFF, 0x60];

/// Draw a frame-rate string (e.g. "59.7") onto the RGB24 framebuffer.
pub fn draw_fps(buffer: &mut [u8], text: &str) {
    let y0 = HEIGHT - font::GLYPH_HEIGHT - 1;
    let x0 = WIDTH.saturating_sub(text.len() * font::GLYPH_WIDTH + 1);

    for (ci, ch) in text.bytes().enumerate() {
        let glyph = font::glyph(ch);
        let gx = x0 + ci * font::GLYPH_WIDTH;

        for (row, &bits) in glyph.iter().enumerate() {
            let py = y0 + row;
            for col in 0..font::GLYPH_WIDTH {
                if bits & (0x80 >> col) != 0 {
                    let offset = (py * WIDTH + gx + col) * 3;
                    if offset + 2 < buffer.len() {
                        buffer[offset..offset + 3].copy_from_slice(&COLOR);
                    }
                }
            }
        }
    }
}
