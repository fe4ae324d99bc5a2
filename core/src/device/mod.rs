pub mod console;
pub mod font;
pub mod keypad;
pub mod mixer;
pub mod soundbank;

pub use console::TextConsole;
pub use keypad::Keypad;
pub use mixer::{EffectHandle, Mixer, SoundEffect};
pub use soundbank::SoundBank;
