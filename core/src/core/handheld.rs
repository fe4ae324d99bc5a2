//! The devkit hardware bundle and the program seam.

use crate::device::console::TextConsole;
use crate::device::keypad::Keypad;
use crate::device::mixer::Mixer;

/// The handheld development kit as a program sees it: keypad register,
/// text console, audio mixer. Owned by the host runner (or a test), which
/// also owns the frame clock; devices never pace themselves.
pub struct Handheld {
    pub keypad: Keypad,
    pub console: TextConsole,
    pub mixer: Mixer,
}

impl Handheld {
    /// Power-on state: all buttons released, console blank, mixer idle.
    pub fn new() -> Self {
        Self {
            keypad: Keypad::new(),
            console: TextConsole::new(),
            mixer: Mixer::new(),
        }
    }
}

impl Default for Handheld {
    fn default() -> Self {
        Self::new()
    }
}

/// Interface every diagnostic program implements.
///
/// The runner (SDL frontend or test harness) owns the frame clock: it calls
/// `init` once, then `frame` exactly once per vertical blank. A program is
/// strictly sequential within a frame and holds no references into the
/// hardware between frames — all retained state (e.g. the previous key
/// snapshot) lives in the program value itself.
pub trait Program {
    /// One-time setup: paint static console text, start background audio.
    fn init(&mut self, hw: &mut Handheld);

    /// Run one video frame's worth of work.
    fn frame(&mut self, hw: &mut Handheld);

    /// Whether the runner should open an audio output for this program.
    fn uses_audio(&self) -> bool {
        false
    }
}
