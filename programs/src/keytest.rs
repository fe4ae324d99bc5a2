//! Key tester: prints every button's pressed/released state.
//!
//! One status row per button, starting at console row 4. Each frame the
//! keypad register is decoded and diffed against the previous frame's
//! snapshot; only rows whose button changed are rewritten, as a full row
//! (`<label> PRESSED ` / `<label> RELEASED`) at column 0.

use std::fmt::Write;

use keylight_core::core::handheld::{Handheld, Program};
use keylight_core::core::input::KeyState;

use crate::registry::ProgramEntry;

/// Console row of the first button's status line.
const FIRST_STATUS_ROW: usize = 4;

pub struct KeyTest {
    prev: KeyState,
}

impl KeyTest {
    pub fn new() -> Self {
        Self {
            // Seeded all-held so the first frame paints every row.
            prev: KeyState::all_pressed(),
        }
    }
}

impl Default for KeyTest {
    fn default() -> Self {
        Self::new()
    }
}

impl Program for KeyTest {
    fn init(&mut self, hw: &mut Handheld) {
        let _ = write!(hw.console, "\x1b[0;0HKey Tester");
        let _ = write!(hw.console, "\x1b[1;0HHold any button");
    }

    fn frame(&mut self, hw: &mut Handheld) {
        let keys = KeyState::from_raw(hw.keypad.raw());

        for (button, pressed) in keys.changed_from(&self.prev) {
            let row = FIRST_STATUS_ROW + button.index();
            let status = if pressed { "PRESSED " } else { "RELEASED" };
            let _ = write!(hw.console, "\x1b[{row};0H{} {status}", button.label());
        }

        self.prev = keys;
    }
}

fn create() -> Box<dyn Program> {
    Box::new(KeyTest::new())
}

inventory::submit! {
    ProgramEntry::new("keytest", "Keylight Key Tester", create)
}
