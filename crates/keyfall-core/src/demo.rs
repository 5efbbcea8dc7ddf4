use rand::prelude::*;

use crate::score::RawNote;

/// Default five-note scale centered around middle C.
pub const C_MAJOR_PENTATONIC: &[i32] = &[0, 2, 4, 7, 9, 12];
/// Natural minor, relative semitone degrees.
pub const AEOLIAN: &[i32] = &[0, 2, 3, 5, 7, 8, 10, 12];

/// One generated part: how often it plays and in which register.
#[derive(Clone, Debug)]
pub struct DemoVoice {
    pub trigger_probability: f32,
    pub octave_offset: i32,
    pub base_duration: f64,
}

/// Tempo and pitch material for the generator.
///
/// - `bpm` sets the eighth-note grid spacing
/// - `scale` is the allowed degree set, as semitone offsets
/// - `root_midi` is the tonal center (60 = C4)
#[derive(Clone, Debug)]
pub struct DemoParams {
    pub bpm: f32,
    pub scale: &'static [i32],
    pub root_midi: i32,
}

impl Default for DemoParams {
    fn default() -> Self {
        Self {
            bpm: 110.0,
            scale: C_MAJOR_PENTATONIC,
            root_midi: 60,
        }
    }
}

/// Bass, middle and upper parts, so both hands get notes.
pub fn default_voices() -> Vec<DemoVoice> {
    vec![
        DemoVoice {
            trigger_probability: 0.5,
            octave_offset: -2,
            base_duration: 0.9,
        },
        DemoVoice {
            trigger_probability: 0.6,
            octave_offset: 0,
            base_duration: 0.3,
        },
        DemoVoice {
            trigger_probability: 0.35,
            octave_offset: 1,
            base_duration: 0.5,
        },
    ]
}

/// Seeded random score generator on an eighth-note grid.
///
/// Each voice owns an RNG derived from the base seed, so the same seed always
/// yields the same score. Voice `i` becomes track `i` of the output.
pub struct DemoComposer {
    pub voices: Vec<DemoVoice>,
    pub params: DemoParams,
    rngs: Vec<StdRng>,
}

impl DemoComposer {
    pub fn new(voices: Vec<DemoVoice>, params: DemoParams, seed: u64) -> Self {
        let rngs = (0..voices.len())
            .map(|i| {
                let mix = seed ^ (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                StdRng::seed_from_u64(mix)
            })
            .collect::<Vec<_>>();
        Self {
            voices,
            params,
            rngs,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(default_voices(), DemoParams::default(), seed)
    }

    /// Generate `length_secs` of music as raw score tuples.
    pub fn compose(&mut self, length_secs: f64) -> Vec<RawNote> {
        let step = 60.0 / f64::from(self.params.bpm) / 2.0;
        let steps = (length_secs / step).floor().max(0.0) as u64;
        let mut counters = vec![0u32; self.voices.len()];
        let mut out = Vec::new();
        for s in 0..steps {
            let onset = s as f64 * step;
            for (i, voice) in self.voices.iter().enumerate() {
                let rng = &mut self.rngs[i];
                if rng.gen::<f32>() >= voice.trigger_probability {
                    continue;
                }
                let degree = *self.params.scale.choose(rng).unwrap_or(&0);
                let pitch = self.params.root_midi + degree + voice.octave_offset * 12;
                let velocity = 0.4 + rng.gen::<f32>() * 0.6;
                let duration = voice.base_duration + f64::from(rng.gen::<f32>()) * 0.2;
                out.push(RawNote {
                    track: i as u32,
                    index: counters[i],
                    pitch,
                    onset_secs: onset,
                    duration_secs: duration.min(length_secs - onset).max(0.05),
                    velocity,
                });
                counters[i] += 1;
            }
        }
        out
    }
}
