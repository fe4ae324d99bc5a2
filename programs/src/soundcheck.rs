//! Sound check: key status column plus mixer effects.
//!
//! Same per-frame diffing as the key tester, but the button labels are
//! painted once at init and only the status word (`Pressed ` /
//! `Released`) is rewritten, at column 7. Holding A keeps a looping siren
//! effect alive; holding B does the same with a one-shot boom. Background
//! music starts once at init and loops until power-off.

use std::fmt::Write;

use keylight_core::core::handheld::{Handheld, Program};
use keylight_core::core::input::{Button, KeyState};
use keylight_core::device::mixer::{EffectHandle, MIX_RATE, SoundEffect};
use keylight_core::device::soundbank::{self, MOD_DRIVELOOP, SFX_BOOM, SFX_SIREN};

use crate::registry::ProgramEntry;

/// Console row of the first button's status line.
const FIRST_STATUS_ROW: usize = 4;
/// Column where the status word goes, past the 6-char label.
const STATUS_COL: usize = 7;
/// Mixer channels requested at init.
const CHANNELS: usize = 8;

const SIREN: SoundEffect = SoundEffect {
    id: SFX_SIREN,
    rate: 1 << 10,
    volume: 255,
    panning: 255,
};

const BOOM: SoundEffect = SoundEffect {
    id: SFX_BOOM,
    rate: 1 << 10,
    volume: 255,
    panning: 255,
};

pub struct SoundCheck {
    prev: KeyState,
    siren: Option<EffectHandle>,
    boom: Option<EffectHandle>,
}

impl SoundCheck {
    pub fn new() -> Self {
        Self {
            // Seeded all-held so the first frame paints every status word.
            prev: KeyState::all_pressed(),
            siren: None,
            boom: None,
        }
    }
}

impl Default for SoundCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Program for SoundCheck {
    fn init(&mut self, hw: &mut Handheld) {
        let _ = write!(hw.console, "\x1b[0;0HSound Check");
        let _ = write!(hw.console, "\x1b[1;0HHold A for siren");
        let _ = write!(hw.console, "\x1b[2;0HHold B for boom");

        for button in Button::ALL {
            let row = FIRST_STATUS_ROW + button.index();
            let _ = write!(hw.console, "\x1b[{row};0H{}", button.label());
        }

        hw.mixer.init(soundbank::bring_up_bank(MIX_RATE), CHANNELS);
        hw.mixer.module_start(MOD_DRIVELOOP, true);
    }

    fn frame(&mut self, hw: &mut Handheld) {
        // Mixer first: render the elapsed frame's audio before new triggers.
        hw.mixer.frame();

        let keys = KeyState::from_raw(hw.keypad.raw());

        for (button, pressed) in keys.changed_from(&self.prev) {
            let row = FIRST_STATUS_ROW + button.index();
            let status = if pressed { "Pressed " } else { "Released" };
            let _ = write!(hw.console, "\x1b[{row};{STATUS_COL}H{status}");
        }

        match (keys.pressed(Button::A), self.siren) {
            (true, None) => self.siren = Some(hw.mixer.effect_start(&SIREN)),
            (false, Some(handle)) => {
                hw.mixer.effect_cancel(handle);
                self.siren = None;
            }
            _ => {}
        }

        match (keys.pressed(Button::B), self.boom) {
            (true, None) => self.boom = Some(hw.mixer.effect_start(&BOOM)),
            (false, Some(handle)) => {
                // The boom may have already played out; cancel is then a no-op.
                hw.mixer.effect_cancel(handle);
                self.boom = None;
            }
            _ => {}
        }

        self.prev = keys;
    }

    fn uses_audio(&self) -> bool {
        true
    }
}

fn create() -> Box<dyn Program> {
    Box::new(SoundCheck::new())
}

inventory::submit! {
    ProgramEntry::new("soundcheck", "Keylight Sound Check", create)
}
