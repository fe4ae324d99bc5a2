use keylight_core::device::mixer::{MIX_RATE, Mixer, SAMPLES_PER_FRAME, SoundEffect};
use keylight_core::device::soundbank::{self, MOD_DRIVELOOP, SFX_BOOM, SFX_SIREN};

const SIREN: SoundEffect = SoundEffect {
    id: SFX_SIREN,
    rate: 1 << 10,
    volume: 255,
    panning: 128,
};

const BOOM: SoundEffect = SoundEffect {
    id: SFX_BOOM,
    rate: 1 << 10,
    volume: 255,
    panning: 128,
};

fn mixer_with_channels(channels: usize) -> Mixer {
    let mut mixer = Mixer::new();
    mixer.init(soundbank::bring_up_bank(MIX_RATE), channels);
    mixer
}

fn drain(mixer: &mut Mixer) -> Vec<i16> {
    let mut buffer = vec![0i16; SAMPLES_PER_FRAME * 2 * 16];
    let n = mixer.fill_audio(&mut buffer);
    buffer.truncate(n);
    buffer
}

// ---- Bank layout ----

#[test]
fn bank_ids_resolve_to_the_expected_content() {
    let bank = soundbank::bring_up_bank(MIX_RATE);
    assert!(bank.sample(SFX_SIREN).looping);
    assert!(!bank.sample(SFX_BOOM).looping);
    assert!(!bank.module(MOD_DRIVELOOP).rows.is_empty());
}

// ---- Initialization ----

#[test]
fn frame_is_a_noop_before_init() {
    let mut mixer = Mixer::new();
    mixer.frame();
    assert!(drain(&mut mixer).is_empty());
}

#[test]
fn module_start_is_ignored_before_init() {
    let mut mixer = Mixer::new();
    mixer.module_start(MOD_DRIVELOOP, true);
    assert!(!mixer.module_active());
}

// ---- Frame rendering ----

#[test]
fn one_frame_yields_exactly_264_stereo_pairs() {
    let mut mixer = mixer_with_channels(8);
    mixer.frame();
    assert_eq!(drain(&mut mixer).len(), SAMPLES_PER_FRAME * 2);
}

#[test]
fn silent_mixer_renders_zeros() {
    let mut mixer = mixer_with_channels(8);
    mixer.frame();
    assert!(drain(&mut mixer).iter().all(|&s| s == 0));
}

#[test]
fn active_effect_produces_nonzero_samples() {
    let mut mixer = mixer_with_channels(8);
    mixer.effect_start(&SIREN);
    mixer.frame();
    assert!(drain(&mut mixer).iter().any(|&s| s != 0));
}

#[test]
fn fill_audio_never_splits_a_stereo_pair() {
    let mut mixer = mixer_with_channels(8);
    mixer.frame();

    // An odd-length buffer gets a whole number of pairs; the stray
    // slot stays untouched.
    let mut chunk = vec![0x7777i16; 99];
    assert_eq!(mixer.fill_audio(&mut chunk), 98);
    assert_eq!(chunk[98], 0x7777);

    // The rest drains on left/right alignment.
    assert_eq!(drain(&mut mixer).len(), SAMPLES_PER_FRAME * 2 - 98);
}

#[test]
fn fill_audio_drains_incrementally() {
    let mut mixer = mixer_with_channels(8);
    mixer.frame();
    let mut chunk = vec![0i16; 100];
    assert_eq!(mixer.fill_audio(&mut chunk), 100);
    assert_eq!(drain(&mut mixer).len(), SAMPLES_PER_FRAME * 2 - 100);
}

// ---- Effect handles ----

#[test]
fn start_and_cancel_bump_the_counters() {
    let mut mixer = mixer_with_channels(8);
    let handle = mixer.effect_start(&SIREN);
    assert_eq!(mixer.effects_started(), 1);
    assert_eq!(mixer.effects_canceled(), 0);

    mixer.effect_cancel(handle);
    assert_eq!(mixer.effects_canceled(), 1);
}

#[test]
fn cancel_through_a_stale_handle_is_a_noop() {
    let mut mixer = mixer_with_channels(8);
    let handle = mixer.effect_start(&SIREN);
    mixer.effect_cancel(handle);
    mixer.effect_cancel(handle);
    assert_eq!(mixer.effects_canceled(), 1);
}

#[test]
fn cancel_after_a_one_shot_finishes_is_a_noop() {
    let mut mixer = mixer_with_channels(8);
    let handle = mixer.effect_start(&BOOM);
    // The boom is a quarter second; 30 frames is over half a second.
    for _ in 0..30 {
        mixer.frame();
        drain(&mut mixer);
    }
    mixer.effect_cancel(handle);
    assert_eq!(mixer.effects_canceled(), 0);
}

#[test]
fn canceled_effect_goes_silent() {
    let mut mixer = mixer_with_channels(8);
    let handle = mixer.effect_start(&SIREN);
    mixer.frame();
    drain(&mut mixer);

    mixer.effect_cancel(handle);
    mixer.frame();
    assert!(drain(&mut mixer).iter().all(|&s| s == 0));
}

#[test]
fn exhausted_channels_reuse_the_oldest_slot() {
    let mut mixer = mixer_with_channels(2);
    let first = mixer.effect_start(&SIREN);
    let second = mixer.effect_start(&SIREN);
    let third = mixer.effect_start(&SIREN);
    assert_eq!(mixer.effects_started(), 3);

    // The first channel was stolen, so its handle is stale.
    mixer.effect_cancel(first);
    assert_eq!(mixer.effects_canceled(), 0);

    mixer.effect_cancel(second);
    mixer.effect_cancel(third);
    assert_eq!(mixer.effects_canceled(), 2);
}

// ---- Module playback ----

#[test]
fn looping_module_keeps_playing() {
    let mut mixer = mixer_with_channels(8);
    mixer.module_start(MOD_DRIVELOOP, true);
    assert!(mixer.module_active());

    // Well past one full pattern (16 rows x 15 frames).
    for _ in 0..600 {
        mixer.frame();
        drain(&mut mixer);
    }
    assert!(mixer.module_active());
}

#[test]
fn one_shot_module_stops_at_the_end() {
    let mut mixer = mixer_with_channels(8);
    mixer.module_start(MOD_DRIVELOOP, false);
    for _ in 0..600 {
        mixer.frame();
        drain(&mut mixer);
    }
    assert!(!mixer.module_active());
}

#[test]
fn module_renders_audio() {
    let mut mixer = mixer_with_channels(8);
    mixer.module_start(MOD_DRIVELOOP, true);
    mixer.frame();
    assert!(drain(&mut mixer).iter().any(|&s| s != 0));
}
