//! Software audio mixer, maxmod-shaped.
//!
//! The mixer is vblank-locked: `frame()` renders exactly one video frame's
//! worth of interleaved stereo samples into an internal buffer, which the
//! host drains with `fill_audio`. Effects are allocated onto a fixed set of
//! channels and identified by (slot, serial) handles, so a stale handle's
//! cancel is a no-op. The background module plays on its own voices and
//! never competes with effects for channels.
//!
//! Playback is .10 fixed-point resampling through bank PCM: rate 1024 plays
//! a sample at its recorded pitch. Volume is 0-255, panning 0-255 with 128
//! center, split linearly between the stereo sides.

pub use crate::device::soundbank::SampleId;
use crate::device::soundbank::{MODULE_VOICES, Module, ModuleId, SoundBank};

/// Mixer output rate in Hz. Locked to the vblank: 264 sample pairs per
/// frame at 59.7275 frames per second.
pub const MIX_RATE: u32 = 15_768;

/// Stereo sample pairs rendered per video frame.
pub const SAMPLES_PER_FRAME: usize = 264;

/// Video frame rate of the handheld's LCD.
pub const FRAME_RATE_HZ: f64 = 59.7275;

/// A sound effect as the diagnostics describe one: which bank sample to
/// play and how.
#[derive(Debug, Clone, Copy)]
pub struct SoundEffect {
    pub id: SampleId,
    /// .10 fixed-point pitch (1024 = recorded pitch).
    pub rate: u32,
    pub volume: u8,
    pub panning: u8,
}

/// Opaque handle to a started effect, retained only to cancel it.
///
/// The serial makes handles single-use: once the channel is reallocated,
/// cancels through an old handle do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectHandle {
    slot: usize,
    serial: u32,
}

/// Playback head over one bank sample.
#[derive(Default, Clone, Copy)]
struct Voice {
    active: bool,
    sample: SampleId,
    /// .10 fixed-point position into the sample's PCM.
    phase: u64,
    rate: u32,
    volume: u8,
    panning: u8,
}

impl Voice {
    fn trigger(&mut self, sample: SampleId, rate: u32, volume: u8, panning: u8) {
        self.active = true;
        self.sample = sample;
        self.phase = 0;
        self.rate = rate;
        self.volume = volume;
        self.panning = panning;
    }

    /// Produce one (left, right) contribution and advance the play head.
    fn step(&mut self, bank: &SoundBank) -> (i32, i32) {
        if !self.active {
            return (0, 0);
        }
        let sample = bank.sample(self.sample);
        let len = sample.pcm.len() as u64;
        if len == 0 {
            self.active = false;
            return (0, 0);
        }

        let mut index = self.phase >> 10;
        if index >= len {
            if sample.looping {
                self.phase %= len << 10;
                index = self.phase >> 10;
            } else {
                self.active = false;
                return (0, 0);
            }
        }

        let value = sample.pcm[index as usize] as i32 * self.volume as i32 / 255;
        let pan = self.panning as i32;
        let left = value * (255 - pan) / 255;
        let right = value * pan / 255;
        self.phase += self.rate as u64;
        (left, right)
    }
}

/// One effect channel: a voice plus its handle bookkeeping.
#[derive(Default, Clone, Copy)]
struct Channel {
    voice: Voice,
    serial: u32,
}

/// Module playback position.
struct ModuleState {
    module: ModuleId,
    looping: bool,
    playing: bool,
    row: usize,
    frame_in_row: u32,
    voices: [Voice; MODULE_VOICES],
}

pub struct Mixer {
    bank: Option<SoundBank>,
    channels: Vec<Channel>,
    module: Option<ModuleState>,
    out: Vec<i16>,
    next_serial: u32,
    effects_started: u64,
    effects_canceled: u64,
}

impl Mixer {
    /// An uninitialized mixer. Everything is a no-op until `init`.
    pub fn new() -> Self {
        Self {
            bank: None,
            channels: Vec::new(),
            module: None,
            out: Vec::with_capacity(SAMPLES_PER_FRAME * 4),
            next_serial: 0,
            effects_started: 0,
            effects_canceled: 0,
        }
    }

    /// Load a sound bank and allocate effect channels.
    pub fn init(&mut self, bank: SoundBank, channels: usize) {
        self.bank = Some(bank);
        self.channels = vec![Channel::default(); channels];
        self.module = None;
        self.out.clear();
    }

    /// Start a module from the bank. Replaces any module already playing.
    /// Ignored before `init`.
    pub fn module_start(&mut self, id: ModuleId, looping: bool) {
        if self.bank.is_none() {
            return;
        }
        self.module = Some(ModuleState {
            module: id,
            looping,
            playing: true,
            row: 0,
            frame_in_row: 0,
            voices: [Voice::default(); MODULE_VOICES],
        });
    }

    /// Is a module currently playing?
    pub fn module_active(&self) -> bool {
        self.module.as_ref().is_some_and(|m| m.playing)
    }

    /// Start a sound effect, reusing the oldest channel if none is free.
    /// Returns the handle used to cancel it later.
    pub fn effect_start(&mut self, fx: &SoundEffect) -> EffectHandle {
        if self.channels.is_empty() {
            // Not initialized: hand out a handle that can never match.
            return EffectHandle { slot: 0, serial: 0 };
        }

        let slot = self
            .channels
            .iter()
            .position(|ch| !ch.voice.active)
            .unwrap_or_else(|| {
                // All busy: steal the channel with the oldest allocation.
                self.channels
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, ch)| ch.serial)
                    .map(|(i, _)| i)
                    .unwrap_or(0)
            });

        self.next_serial += 1;
        let serial = self.next_serial;
        let ch = &mut self.channels[slot];
        ch.serial = serial;
        ch.voice.trigger(fx.id, fx.rate, fx.volume, fx.panning);
        self.effects_started += 1;
        EffectHandle { slot, serial }
    }

    /// Stop the effect a handle refers to. A stale handle (channel since
    /// reallocated, or effect already finished) is silently ignored.
    pub fn effect_cancel(&mut self, handle: EffectHandle) {
        if let Some(ch) = self.channels.get_mut(handle.slot)
            && ch.serial == handle.serial
            && ch.voice.active
        {
            ch.voice.active = false;
            self.effects_canceled += 1;
        }
    }

    /// Render one video frame of audio: 264 interleaved stereo pairs.
    /// A no-op until `init` has loaded a bank.
    pub fn frame(&mut self) {
        let Some(bank) = &self.bank else { return };

        if let Some(state) = &mut self.module {
            step_module(state, bank);
        }

        for _ in 0..SAMPLES_PER_FRAME {
            let mut left = 0i32;
            let mut right = 0i32;
            for ch in &mut self.channels {
                let (l, r) = ch.voice.step(bank);
                left += l;
                right += r;
            }
            if let Some(state) = &mut self.module {
                for voice in &mut state.voices {
                    let (l, r) = voice.step(bank);
                    left += l;
                    right += r;
                }
            }
            self.out
                .push(left.clamp(i16::MIN as i32, i16::MAX as i32) as i16);
            self.out
                .push(right.clamp(i16::MIN as i32, i16::MAX as i32) as i16);
        }
    }

    /// Drain rendered samples into the provided buffer. Returns the number
    /// of i16 samples written, rounded down to a whole number of stereo
    /// pairs (an odd-length buffer's last slot is left untouched).
    pub fn fill_audio(&mut self, buffer: &mut [i16]) -> usize {
        let n = buffer.len().min(self.out.len()) & !1;
        buffer[..n].copy_from_slice(&self.out[..n]);
        self.out.drain(..n);
        n
    }

    /// Total effects started since power-on.
    pub fn effects_started(&self) -> u64 {
        self.effects_started
    }

    /// Total effects canceled through a live handle since power-on.
    pub fn effects_canceled(&self) -> u64 {
        self.effects_canceled
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance module playback by one video frame, triggering the next row's
/// notes when its frame counter elapses.
fn step_module(state: &mut ModuleState, bank: &SoundBank) {
    if !state.playing {
        return;
    }
    let module: &Module = bank.module(state.module);
    if module.rows.is_empty() {
        state.playing = false;
        return;
    }

    if state.frame_in_row == 0 {
        for (voice, cell) in state.voices.iter_mut().zip(&module.rows[state.row]) {
            if let Some(note) = cell {
                voice.trigger(note.sample, note.rate, note.volume, note.panning);
            }
        }
    }

    state.frame_in_row += 1;
    if state.frame_in_row >= module.frames_per_row {
        state.frame_in_row = 0;
        state.row += 1;
        if state.row >= module.rows.len() {
            if state.looping {
                state.row = 0;
            } else {
                state.playing = false;
                for voice in &mut state.voices {
                    voice.active = false;
                }
            }
        }
    }
}
