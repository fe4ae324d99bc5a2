//! 8x8 bitmap font for the text console.
//!
//! Each glyph is 8 bytes, one per row, MSB = leftmost pixel. Coverage is
//! what the diagnostics and the frame-rate overlay print: letters, digits,
//! and a little punctuation. Unknown characters render as space.

pub const GLYPH_WIDTH: usize = 8;
pub const GLYPH_HEIGHT: usize = 8;

const BLANK: [u8; 8] = [0x00; 8];

#[rustfmt::skip]
static FONT: &[(u8, [u8; 8])] = &[
    (b'A', [0x18, 0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x00]),
    (b'B', [0x7C, 0x66, 0x66, 0x7C, 0x66, 0x66, 0x7C, 0x00]),
    (b'C', [0x3C, 0x66, 0x60, 0x60, 0x60, 0x66, 0x3C, 0x00]),
    (b'D', [0x78, 0x6C, 0x66, 0x66, 0x66, 0x6C, 0x78, 0x00]),
    (b'E', [0x7E, 0x60, 0x60, 0x7C, 0x60, 0x60, 0x7E, 0x00]),
    (b'F', [0x7E, 0x60, 0x60, 0x7C, 0x60, 0x60, 0x60, 0x00]),
    (b'G', [0x3C, 0x66, 0x60, 0x6E, 0x66, 0x66, 0x3C, 0x00]),
    (b'H', [0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00]),
    (b'I', [0x3C, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00]),
    (b'J', [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x6C, 0x38, 0x00]),
    (b'K', [0x66, 0x6C, 0x78, 0x70, 0x78, 0x6C, 0x66, 0x00]),
    (b'L', [0x60, 0x60, 0x60, 0x60, 0x60, 0x60, 0x7E, 0x00]),
    (b'M', [0x63, 0x77, 0x7F, 0x6B, 0x63, 0x63, 0x63, 0x00]),
    (b'N', [0x66, 0x76, 0x7E, 0x7E, 0x6E, 0x66, 0x66, 0x00]),
    (b'O', [0x3C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00]),
    (b'P', [0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0x00]),
    (b'Q', [0x3C, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x0E, 0x00]),
    (b'R', [0x7C, 0x66, 0x66, 0x7C, 0x78, 0x6C, 0x66, 0x00]),
    (b'S', [0x3C, 0x66, 0x60, 0x3C, 0x06, 0x66, 0x3C, 0x00]),
    (b'T', [0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00]),
    (b'U', [0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00]),
    (b'V', [0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00]),
    (b'W', [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00]),
    (b'X', [0x66, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x66, 0x00]),
    (b'Y', [0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x00]),
    (b'Z', [0x7E, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x7E, 0x00]),
    (b'a', [0x00, 0x00, 0x3C, 0x06, 0x3E, 0x66, 0x3E, 0x00]),
    (b'b', [0x60, 0x60, 0x7C, 0x66, 0x66, 0x66, 0x7C, 0x00]),
    (b'c', [0x00, 0x00, 0x3C, 0x66, 0x60, 0x66, 0x3C, 0x00]),
    (b'd', [0x06, 0x06, 0x3E, 0x66, 0x66, 0x66, 0x3E, 0x00]),
    (b'e', [0x00, 0x00, 0x3C, 0x66, 0x7E, 0x60, 0x3C, 0x00]),
    (b'f', [0x1C, 0x30, 0x7C, 0x30, 0x30, 0x30, 0x30, 0x00]),
    (b'g', [0x00, 0x00, 0x3E, 0x66, 0x66, 0x3E, 0x06, 0x7C]),
    (b'h', [0x60, 0x60, 0x7C, 0x66, 0x66, 0x66, 0x66, 0x00]),
    (b'i', [0x18, 0x00, 0x38, 0x18, 0x18, 0x18, 0x3C, 0x00]),
    (b'j', [0x0C, 0x00, 0x1C, 0x0C, 0x0C, 0x0C, 0x6C, 0x38]),
    (b'k', [0x60, 0x60, 0x66, 0x6C, 0x78, 0x6C, 0x66, 0x00]),
    (b'l', [0x38, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00]),
    (b'm', [0x00, 0x00, 0x66, 0x7F, 0x7F, 0x6B, 0x63, 0x00]),
    (b'n', [0x00, 0x00, 0x7C, 0x66, 0x66, 0x66, 0x66, 0x00]),
    (b'o', [0x00, 0x00, 0x3C, 0x66, 0x66, 0x66, 0x3C, 0x00]),
    (b'p', [0x00, 0x00, 0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60]),
    (b'q', [0x00, 0x00, 0x3E, 0x66, 0x66, 0x3E, 0x06, 0x06]),
    (b'r', [0x00, 0x00, 0x7C, 0x66, 0x60, 0x60, 0x60, 0x00]),
    (b's', [0x00, 0x00, 0x3E, 0x60, 0x3C, 0x06, 0x7C, 0x00]),
    (b't', [0x18, 0x18, 0x7E, 0x18, 0x18, 0x18, 0x0E, 0x00]),
    (b'u', [0x00, 0x00, 0x66, 0x66, 0x66, 0x66, 0x3E, 0x00]),
    (b'v', [0x00, 0x00, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00]),
    (b'w', [0x00, 0x00, 0x63, 0x6B, 0x7F, 0x3E, 0x36, 0x00]),
    (b'x', [0x00, 0x00, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x00]),
    (b'y', [0x00, 0x00, 0x66, 0x66, 0x66, 0x3E, 0x0C, 0x78]),
    (b'z', [0x00, 0x00, 0x7E, 0x0C, 0x18, 0x30, 0x7E, 0x00]),
    (b'0', [0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00]),
    (b'1', [0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00]),
    (b'2', [0x3C, 0x66, 0x06, 0x0C, 0x30, 0x60, 0x7E, 0x00]),
    (b'3', [0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00]),
    (b'4', [0x0C, 0x1C, 0x3C, 0x6C, 0x7E, 0x0C, 0x0C, 0x00]),
    (b'5', [0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00]),
    (b'6', [0x3C, 0x66, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00]),
    (b'7', [0x7E, 0x06, 0x0C, 0x18, 0x30, 0x30, 0x30, 0x00]),
    (b'8', [0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00]),
    (b'9', [0x3C, 0x66, 0x66, 0x3E, 0x06, 0x66, 0x3C, 0x00]),
    (b'.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00]),
    (b':', [0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x00, 0x00]),
    (b'-', [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00]),
    (b'!', [0x18, 0x18, 0x18, 0x18, 0x18, 0x00, 0x18, 0x00]),
];

/// Look up the glyph rows for a byte. Unknown bytes render blank.
pub fn glyph(ch: u8) -> &'static [u8; 8] {
    for (c, data) in FONT {
        if *c == ch {
            return data;
        }
    }
    &BLANK
}
