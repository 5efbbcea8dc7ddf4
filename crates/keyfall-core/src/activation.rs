//! Which pitches are sounding at a given clock value.
//!
//! Recomputed from scratch every tick: there is no diff against the previous
//! frame, so a repeated or re-struck key is not debounced here. Emission code
//! must throttle on its own.

use smallvec::SmallVec;

use crate::layout::Lane;
use crate::score::{NoteEvent, NoteList};

/// One sounding pitch. When several notes on the same pitch overlap, the
/// loudest velocity and the latest onset win.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveKey {
    pub pitch: u8,
    pub velocity: f32,
    pub color: [f32; 3],
    pub lane: Lane,
    pub latest_onset: f64,
}

/// Active pitch set, ascending by pitch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivePitches {
    keys: SmallVec<[ActiveKey; 16]>,
}

impl ActivePitches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, pitch: u8) -> bool {
        self.get(pitch).is_some()
    }

    pub fn get(&self, pitch: u8) -> Option<&ActiveKey> {
        self.keys
            .binary_search_by_key(&pitch, |k| k.pitch)
            .ok()
            .map(|i| &self.keys[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveKey> {
        self.keys.iter()
    }

    pub fn pitches(&self) -> impl Iterator<Item = u8> + '_ {
        self.keys.iter().map(|k| k.pitch)
    }

    fn merge(&mut self, note: &NoteEvent) {
        match self.keys.binary_search_by_key(&note.pitch, |k| k.pitch) {
            Ok(i) => {
                let key = &mut self.keys[i];
                key.velocity = key.velocity.max(note.velocity);
                if note.onset >= key.latest_onset {
                    key.latest_onset = note.onset;
                    key.color = note.color;
                }
            }
            Err(i) => self.keys.insert(
                i,
                ActiveKey {
                    pitch: note.pitch,
                    velocity: note.velocity,
                    color: note.color,
                    lane: note.lane,
                    latest_onset: note.onset,
                },
            ),
        }
    }
}

/// `onset <= t < onset + duration`
#[inline]
pub fn is_sounding(note: &NoteEvent, t: f64) -> bool {
    note.onset <= t && t < note.end()
}

/// Fill `out` with the pitches sounding at `t`.
pub fn active_pitches_into(t: f64, notes: &NoteList, out: &mut ActivePitches) {
    out.clear();
    let from = t - notes.max_duration() - 1e-9;
    for note in notes.onsets_between(from, t) {
        if is_sounding(note, t) {
            out.merge(note);
        }
    }
}

pub fn active_pitches(t: f64, notes: &NoteList) -> ActivePitches {
    let mut out = ActivePitches::new();
    active_pitches_into(t, notes, &mut out);
    out
}
