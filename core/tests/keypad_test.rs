use keylight_core::core::input::{Button, KeyState};
use keylight_core::device::keypad::Keypad;

// ---- Register model ----

#[test]
fn power_on_state_all_released() {
    let keypad = Keypad::new();
    // Active-low: all ten bits set means nothing is held.
    assert_eq!(keypad.raw(), 0x03FF);
}

#[test]
fn press_clears_the_button_bit() {
    let mut keypad = Keypad::new();
    keypad.set_button(Button::A, true);
    assert_eq!(keypad.raw(), 0x03FF & !Button::A.bit());
}

#[test]
fn release_sets_the_button_bit_back() {
    let mut keypad = Keypad::new();
    keypad.set_button(Button::Start, true);
    keypad.set_button(Button::Start, false);
    assert_eq!(keypad.raw(), 0x03FF);
}

#[test]
fn multiple_buttons_latch_independently() {
    let mut keypad = Keypad::new();
    keypad.set_button(Button::Up, true);
    keypad.set_button(Button::L, true);
    let raw = keypad.raw();
    assert_eq!(raw & Button::Up.bit(), 0);
    assert_eq!(raw & Button::L.bit(), 0);
    assert_ne!(raw & Button::A.bit(), 0);
}

#[test]
fn reset_releases_everything() {
    let mut keypad = Keypad::new();
    for button in Button::ALL {
        keypad.set_button(button, true);
    }
    keypad.reset();
    assert_eq!(keypad.raw(), 0x03FF);
}

// ---- Enumeration invariants ----

#[test]
fn ten_buttons_index_aligned() {
    assert_eq!(Button::COUNT, 10);
    assert_eq!(Button::ALL.len(), Button::COUNT);
    for (i, button) in Button::ALL.into_iter().enumerate() {
        assert_eq!(button.index(), i, "slot {i} misaligned");
        assert_eq!(button.bit(), 1 << i);
    }
}

#[test]
fn labels_are_six_characters() {
    for button in Button::ALL {
        assert_eq!(button.label().len(), 6, "{button:?}");
    }
}

#[test]
fn label_table_matches_enumeration_order() {
    let labels: Vec<_> = Button::ALL.iter().map(|b| b.label()).collect();
    assert_eq!(
        labels,
        [
            "A     ", "B     ", "Select", "Start ", "Right ", "Left  ", "Up    ", "Down  ",
            "R     ", "L     ",
        ]
    );
}

// ---- Snapshot decoding ----

#[test]
fn all_bits_set_decodes_to_nothing_pressed() {
    let state = KeyState::from_raw(0x03FF);
    assert_eq!(state, KeyState::all_released());
}

#[test]
fn clear_bit_decodes_to_pressed() {
    // Active-low: B's bit clear means B is held.
    let state = KeyState::from_raw(0x03FF & !Button::B.bit());
    assert!(state.pressed(Button::B));
    for button in Button::ALL {
        if button != Button::B {
            assert!(!state.pressed(button), "{button:?} should be released");
        }
    }
}

#[test]
fn all_bits_clear_decodes_to_everything_pressed() {
    assert_eq!(KeyState::from_raw(0), KeyState::all_pressed());
}

#[test]
fn diff_reports_only_changed_slots_in_order() {
    let prev = KeyState::from_raw(0x03FF & !Button::A.bit());
    let next = KeyState::from_raw(0x03FF & !Button::Down.bit());

    let changes: Vec<_> = next.changed_from(&prev).collect();
    assert_eq!(changes, [(Button::A, false), (Button::Down, true)]);
}

#[test]
fn identical_snapshots_diff_to_nothing() {
    let state = KeyState::from_raw(0x03FF & !Button::R.bit());
    assert_eq!(state.changed_from(&state).count(), 0);
}
