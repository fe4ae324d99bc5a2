//! Keypad input register.
//!
//! Models the KEYINPUT-style register: one bit per physical button in the
//! low ten bits, active-low (0 = held). The host side latches button events
//! via `set_button`; the program side samples the whole register with `raw`
//! once per frame (the key-scan). Reads are infallible by design — this is
//! a hardware register, not an I/O channel.

use crate::core::input::Button;

/// Value of the register with every button released (low ten bits set).
const ALL_RELEASED: u16 = 0x03FF;

pub struct Keypad {
    raw: u16,
}

impl Keypad {
    /// Power-on state: no buttons held.
    pub fn new() -> Self {
        Self { raw: ALL_RELEASED }
    }

    /// Latch a button transition from the host. Active-low: pressing
    /// clears the button's bit, releasing sets it.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.raw &= !button.bit();
        } else {
            self.raw |= button.bit();
        }
    }

    /// Sample the register (the key-scan).
    pub fn raw(&self) -> u16 {
        self.raw
    }

    /// Reset to power-on state.
    pub fn reset(&mut self) {
        self.raw = ALL_RELEASED;
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
