use std::collections::HashMap;

use keylight_core::core::input::Button;
use sdl2::keyboard::Scancode;

/// Maps SDL scancodes to handheld buttons.
pub struct KeyMap {
    map: HashMap<Scancode, Button>,
}

impl KeyMap {
    /// Look up the handheld button for a scancode.
    pub fn get(&self, scancode: Scancode) -> Option<Button> {
        self.map.get(&scancode).copied()
    }
}

/// Default bindings, laid out like the usual handheld emulator scheme:
/// X/Z for A/B, arrows for the pad, Enter/RShift for Start/Select,
/// S/A for the shoulder buttons.
pub fn default_key_map() -> KeyMap {
    let mut map = HashMap::new();
    map.insert(Scancode::X, Button::A);
    map.insert(Scancode::Z, Button::B);
    map.insert(Scancode::RShift, Button::Select);
    map.insert(Scancode::Return, Button::Start);
    map.insert(Scancode::Right, Button::Right);
    map.insert(Scancode::Left, Button::Left);
    map.insert(Scancode::Up, Button::Up);
    map.insert(Scancode::Down, Button::Down);
    map.insert(Scancode::S, Button::R);
    map.insert(Scancode::A, Button::L);
    KeyMap { map }
}
