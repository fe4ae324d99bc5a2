//! Sound bank: the preloaded samples and modules the mixer plays from.
//!
//! On real hardware this is a binary blob baked into the ROM. The host
//! build has no blob, so the bring-up bank is synthesized procedurally at
//! startup: a two-tone siren, a noise-burst boom, and a small three-voice
//! looping module for background music.

/// Index of a PCM sample within a bank.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SampleId(pub usize);

/// Index of a module (pattern song) within a bank.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModuleId(pub usize);

/// Mono 16-bit PCM at the mixer rate. Looping samples repeat from the
/// start when the play head runs off the end; one-shots fall silent.
pub struct Sample {
    pub pcm: Vec<i16>,
    pub looping: bool,
}

/// Voices in a module pattern.
pub const MODULE_VOICES: usize = 3;

/// One voice's trigger in a pattern row. A note replaces whatever the
/// voice was playing; an empty cell lets it keep ringing.
#[derive(Clone, Copy)]
pub struct Note {
    pub sample: SampleId,
    /// .10 fixed-point pitch (1024 = recorded pitch).
    pub rate: u32,
    pub volume: u8,
    pub panning: u8,
}

/// A compact pattern song: rows of voice triggers stepped at a fixed
/// number of video frames per row.
pub struct Module {
    pub frames_per_row: u32,
    pub rows: Vec<[Option<Note>; MODULE_VOICES]>,
}

pub struct SoundBank {
    pub samples: Vec<Sample>,
    pub modules: Vec<Module>,
}

impl SoundBank {
    pub fn sample(&self, id: SampleId) -> &Sample {
        &self.samples[id.0]
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.0]
    }
}

// ---------------------------------------------------------------------------
// Bring-up bank layout
// ---------------------------------------------------------------------------

/// Looping two-tone siren, held while button A is down.
pub const SFX_SIREN: SampleId = SampleId(0);
/// One-shot noise burst, fired while button B is down.
pub const SFX_BOOM: SampleId = SampleId(1);
/// Background music module, started once at program init.
pub const MOD_DRIVELOOP: ModuleId = ModuleId(0);

const MOD_BASS: SampleId = SampleId(2);
const MOD_LEAD: SampleId = SampleId(3);
const MOD_HAT: SampleId = SampleId(4);

/// Synthesize the bring-up bank at the given mixer rate.
pub fn bring_up_bank(mix_rate: u32) -> SoundBank {
    let samples = vec![
        siren(mix_rate),
        boom(mix_rate),
        square_cycle(mix_rate, 110.0, 5200),
        triangle_cycle(mix_rate, 440.0, 4200),
        hat(mix_rate),
    ];
    SoundBank {
        samples,
        modules: vec![driveloop()],
    }
}

/// Two-tone square siren: half a second at 880 Hz, half at 660 Hz, looping.
fn siren(mix_rate: u32) -> Sample {
    let half = (mix_rate / 2) as usize;
    let mut pcm = Vec::with_capacity(half * 2);
    for freq in [880.0, 660.0] {
        let period = mix_rate as f64 / freq;
        for n in 0..half {
            let phase = (n as f64 / period).fract();
            pcm.push(if phase < 0.5 { 6000 } else { -6000 });
        }
    }
    Sample { pcm, looping: true }
}

/// Decaying LFSR noise burst, roughly a quarter second.
fn boom(mix_rate: u32) -> Sample {
    let len = (mix_rate / 4) as usize;
    let mut lfsr: u16 = 0xACE1;
    let mut pcm = Vec::with_capacity(len);
    for n in 0..len {
        let bit = (lfsr ^ (lfsr >> 2) ^ (lfsr >> 3) ^ (lfsr >> 5)) & 1;
        lfsr = (lfsr >> 1) | (bit << 15);
        let raw = if lfsr & 1 != 0 { 9000i32 } else { -9000i32 };
        let gain = (len - n) as i32;
        pcm.push((raw * gain / len as i32) as i16);
    }
    Sample {
        pcm,
        looping: false,
    }
}

/// One period of a square wave at `freq`, for looped playback.
fn square_cycle(mix_rate: u32, freq: f64, amp: i16) -> Sample {
    let period = (mix_rate as f64 / freq).round() as usize;
    let pcm = (0..period)
        .map(|n| if n < period / 2 { amp } else { -amp })
        .collect();
    Sample { pcm, looping: true }
}

/// One period of a triangle wave at `freq`, for looped playback.
fn triangle_cycle(mix_rate: u32, freq: f64, amp: i16) -> Sample {
    let period = (mix_rate as f64 / freq).round() as usize;
    let pcm = (0..period)
        .map(|n| {
            let phase = n as f64 / period as f64;
            let tri = if phase < 0.5 {
                4.0 * phase - 1.0
            } else {
                3.0 - 4.0 * phase
            };
            (tri * amp as f64) as i16
        })
        .collect();
    Sample { pcm, looping: true }
}

/// Short one-shot noise tick for the percussion voice.
fn hat(mix_rate: u32) -> Sample {
    let len = (mix_rate / 30) as usize;
    let mut lfsr: u16 = 0xBEEF;
    let mut pcm = Vec::with_capacity(len);
    for n in 0..len {
        let bit = (lfsr ^ (lfsr >> 1)) & 1;
        lfsr = (lfsr >> 1) | (bit << 15);
        let raw = if lfsr & 1 != 0 { 3000i32 } else { -3000i32 };
        pcm.push((raw * (len - n) as i32 / len as i32) as i16);
    }
    Sample {
        pcm,
        looping: false,
    }
}

/// Sixteen-row bass/lead/hat loop at ~4 rows per second.
fn driveloop() -> Module {
    // .10 fixed-point pitch ratios relative to the recorded cycle.
    const UNISON: u32 = 1 << 10;
    const FOURTH: u32 = UNISON * 4 / 3;
    const FIFTH: u32 = UNISON * 3 / 2;
    const OCTAVE: u32 = UNISON * 2;

    let bass = |rate| Note {
        sample: MOD_BASS,
        rate,
        volume: 170,
        panning: 128,
    };
    let lead = |rate| Note {
        sample: MOD_LEAD,
        rate,
        volume: 120,
        panning: 96,
    };
    let tick = Note {
        sample: MOD_HAT,
        rate: UNISON,
        volume: 90,
        panning: 176,
    };

    let mut rows: Vec<[Option<Note>; MODULE_VOICES]> = vec![[None; MODULE_VOICES]; 16];
    for (i, row) in rows.iter_mut().enumerate() {
        row[0] = match i {
            0 | 4 => Some(bass(UNISON)),
            8 => Some(bass(FOURTH)),
            12 => Some(bass(FIFTH)),
            _ => None,
        };
        row[1] = match i {
            0 => Some(lead(UNISON)),
            6 => Some(lead(FIFTH)),
            10 => Some(lead(OCTAVE)),
            14 => Some(lead(FOURTH)),
            _ => None,
        };
        if i % 2 == 0 {
            row[2] = Some(tick);
        }
    }

    Module {
        frames_per_row: 15,
        rows,
    }
}
