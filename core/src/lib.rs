pub mod core;
pub mod device;

pub mod prelude {
    pub use crate::core::handheld::{Handheld, Program};
    pub use crate::core::input::{Button, KeyState};
    pub use crate::device::console::TextConsole;
    pub use crate::device::keypad::Keypad;
    pub use crate::device::mixer::{EffectHandle, Mixer, SoundEffect};
}
