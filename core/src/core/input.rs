//! Button enumeration and per-frame key state snapshots.
//!
//! The handheld has ten physical buttons wired to the low ten bits of the
//! keypad register, active-low (bit clear = held). Programs never touch the
//! raw register directly; they decode it into a [`KeyState`] once per frame
//! and diff against the previous frame's snapshot.

/// The ten physical buttons, in keypad register bit order.
///
/// `Button::ALL[i]` always occupies register bit `i` and snapshot slot `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Right,
    Left,
    Up,
    Down,
    R,
    L,
}

impl Button {
    /// Number of physical buttons.
    pub const COUNT: usize = 10;

    /// All buttons in register bit order.
    pub const ALL: [Button; Button::COUNT] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Right,
        Button::Left,
        Button::Up,
        Button::Down,
        Button::R,
        Button::L,
    ];

    /// Snapshot slot / register bit index for this button.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Register bit mask for this button.
    pub fn bit(self) -> u16 {
        1 << self.index()
    }

    /// Fixed-width display label (6 characters, space-padded) used by the
    /// diagnostic console overlays.
    pub fn label(self) -> &'static str {
        match self {
            Button::A => "A     ",
            Button::B => "B     ",
            Button::Select => "Select",
            Button::Start => "Start ",
            Button::Right => "Right ",
            Button::Left => "Left  ",
            Button::Up => "Up    ",
            Button::Down => "Down  ",
            Button::R => "R     ",
            Button::L => "L     ",
        }
    }
}

/// One frame's decoded button state: `true` = held.
///
/// Rebuilt in full from the keypad register every frame; the only retained
/// copy is the previous frame's snapshot, kept for diffing and replaced
/// wholesale each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    pressed: [bool; Button::COUNT],
}

impl KeyState {
    /// All buttons released.
    pub fn all_released() -> Self {
        Self {
            pressed: [false; Button::COUNT],
        }
    }

    /// All buttons held. Diagnostic programs seed their previous-frame
    /// snapshot with this so the first frame paints every status row.
    pub fn all_pressed() -> Self {
        Self {
            pressed: [true; Button::COUNT],
        }
    }

    /// Decode a raw keypad register value. The register is active-low:
    /// a clear bit means the button is held.
    pub fn from_raw(raw: u16) -> Self {
        let mut pressed = [false; Button::COUNT];
        for button in Button::ALL {
            pressed[button.index()] = raw & button.bit() == 0;
        }
        Self { pressed }
    }

    /// Is this button held in this snapshot?
    pub fn pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    /// Buttons whose state differs from `prev`, in enumeration order,
    /// paired with their state in `self`.
    pub fn changed_from<'a>(
        &'a self,
        prev: &'a KeyState,
    ) -> impl Iterator<Item = (Button, bool)> + 'a {
        Button::ALL
            .into_iter()
            .filter(move |b| self.pressed[b.index()] != prev.pressed[b.index()])
            .map(move |b| (b, self.pressed[b.index()]))
    }
}
