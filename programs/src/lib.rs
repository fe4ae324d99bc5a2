pub mod keytest;
pub mod registry;
pub mod soundcheck;

pub use keytest::KeyTest;
pub use soundcheck::SoundCheck;
