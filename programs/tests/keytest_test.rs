use keylight_core::core::handheld::{Handheld, Program};
use keylight_core::core::input::Button;
use keylight_programs::KeyTest;

/// Console row of the first button's status line.
const FIRST_STATUS_ROW: usize = 4;

fn booted() -> (KeyTest, Handheld) {
    let mut program = KeyTest::new();
    let mut hw = Handheld::new();
    program.init(&mut hw);
    (program, hw)
}

fn status_rows(hw: &Handheld) -> Vec<String> {
    (0..Button::COUNT)
        .map(|i| hw.console.row_text(FIRST_STATUS_ROW + i))
        .collect()
}

// ---- First frame ----

#[test]
fn first_frame_paints_every_row_released() {
    let (mut program, mut hw) = booted();
    program.frame(&mut hw);

    for (i, row) in status_rows(&hw).iter().enumerate() {
        assert!(
            row.contains("RELEASED"),
            "row for slot {i} not painted: {row:?}"
        );
    }
}

#[test]
fn rows_lead_with_the_button_label() {
    let (mut program, mut hw) = booted();
    program.frame(&mut hw);

    for (button, row) in Button::ALL.into_iter().zip(status_rows(&hw)) {
        assert!(
            row.starts_with(button.label()),
            "slot {} reads {row:?}",
            button.index()
        );
    }
}

// ---- Steady state ----

#[test]
fn unchanged_input_writes_nothing() {
    let (mut program, mut hw) = booted();
    program.frame(&mut hw);
    let before = status_rows(&hw);

    program.frame(&mut hw);
    program.frame(&mut hw);
    assert_eq!(status_rows(&hw), before);
}

// ---- Transitions ----

#[test]
fn pressing_a_updates_exactly_one_row() {
    let (mut program, mut hw) = booted();
    program.frame(&mut hw);
    let before = status_rows(&hw);

    hw.keypad.set_button(Button::A, true);
    program.frame(&mut hw);

    let after = status_rows(&hw);
    assert!(after[0].contains("PRESSED"), "slot 0 reads {:?}", after[0]);
    for i in 1..Button::COUNT {
        assert_eq!(after[i], before[i], "slot {i} changed unexpectedly");
    }
}

#[test]
fn release_is_reported_on_the_following_frame() {
    let (mut program, mut hw) = booted();
    program.frame(&mut hw);

    hw.keypad.set_button(Button::Left, true);
    program.frame(&mut hw);
    assert!(status_rows(&hw)[Button::Left.index()].contains("PRESSED"));

    hw.keypad.set_button(Button::Left, false);
    program.frame(&mut hw);
    assert!(status_rows(&hw)[Button::Left.index()].contains("RELEASED"));
}

#[test]
fn press_and_release_between_frames_is_invisible() {
    let (mut program, mut hw) = booted();
    program.frame(&mut hw);
    let before = status_rows(&hw);

    // The button goes down and back up without a frame in between;
    // once-per-frame sampling cannot see it.
    hw.keypad.set_button(Button::B, true);
    hw.keypad.set_button(Button::B, false);
    program.frame(&mut hw);

    assert_eq!(status_rows(&hw), before);
}

#[test]
fn held_button_reports_once_not_every_frame() {
    use std::fmt::Write;

    let (mut program, mut hw) = booted();
    program.frame(&mut hw);

    hw.keypad.set_button(Button::R, true);
    program.frame(&mut hw);

    // Scribble over the row, then run more held frames: the program must
    // not rewrite a row whose button did not change.
    let row = FIRST_STATUS_ROW + Button::R.index();
    write!(hw.console, "\x1b[{row};0Hx").unwrap();
    for _ in 0..5 {
        program.frame(&mut hw);
    }
    assert_eq!(hw.console.char_at(row, 0), 'x');
}
