pub mod handheld;
pub mod input;

pub use handheld::{Handheld, Program};
pub use input::{Button, KeyState};
