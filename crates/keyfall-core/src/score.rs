//! Score ingestion and the immutable, onset-sorted note list.
//!
//! Raw tuples are validated once in [`Score::from_raw`]; everything
//! downstream of a [`NoteList`] can assume in-range pitches, positive
//! durations and finite times.

use std::fmt;
use std::sync::Arc;

use fnv::FnvHashSet;

use crate::error::ScoreError;
use crate::layout::{is_supported_pitch, Hand, KeyboardLayout, Lane};

/// Composite identity of a note: source track plus position within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId {
    pub track: u32,
    pub index: u32,
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}n{}", self.track, self.index)
    }
}

/// A note tuple as handed over by the score parser.
///
/// Fields:
/// - `track`, `index`: identity; the pair must be unique within a score
/// - `pitch`: MIDI note number, 21..=108
/// - `onset_secs`: start time in seconds, >= 0
/// - `duration_secs`: length in seconds, > 0
/// - `velocity`: loudness 0..1 (out-of-range values are clamped)
#[derive(Clone, Debug, PartialEq)]
pub struct RawNote {
    pub track: u32,
    pub index: u32,
    pub pitch: i32,
    pub onset_secs: f64,
    pub duration_secs: f64,
    pub velocity: f32,
}

/// Validated note, still without layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreNote {
    pub id: NoteId,
    pub pitch: u8,
    pub onset: f64,
    pub duration: f64,
    pub velocity: f32,
}

/// A validated score in input order.
#[derive(Clone, Debug, Default)]
pub struct Score {
    notes: Vec<ScoreNote>,
    clamped_velocities: usize,
}

impl Score {
    /// Validate a batch of raw notes. The first malformed note aborts the load.
    pub fn from_raw(raw: &[RawNote]) -> Result<Self, ScoreError> {
        let mut seen = FnvHashSet::default();
        seen.reserve(raw.len());
        let mut notes = Vec::with_capacity(raw.len());
        let mut clamped_velocities = 0usize;

        for (index, r) in raw.iter().enumerate() {
            if !is_supported_pitch(r.pitch) {
                return Err(ScoreError::PitchOutOfRange {
                    index,
                    pitch: r.pitch,
                });
            }
            if !r.onset_secs.is_finite() || r.onset_secs < 0.0 {
                return Err(ScoreError::InvalidOnset {
                    index,
                    onset: r.onset_secs,
                });
            }
            if !r.duration_secs.is_finite() || r.duration_secs <= 0.0 {
                return Err(ScoreError::InvalidDuration {
                    index,
                    duration: r.duration_secs,
                });
            }
            if r.velocity.is_nan() {
                return Err(ScoreError::InvalidVelocity { index });
            }
            let velocity = r.velocity.clamp(0.0, 1.0);
            if velocity != r.velocity {
                clamped_velocities += 1;
            }
            let id = NoteId {
                track: r.track,
                index: r.index,
            };
            if !seen.insert(id) {
                return Err(ScoreError::DuplicateId { id });
            }
            notes.push(ScoreNote {
                id,
                pitch: r.pitch as u8,
                onset: r.onset_secs,
                duration: r.duration_secs,
                velocity,
            });
        }

        if clamped_velocities > 0 {
            log::warn!("[score] clamped {clamped_velocities} velocities into 0..1");
        }
        Ok(Self {
            notes,
            clamped_velocities,
        })
    }

    pub fn notes(&self) -> &[ScoreNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn clamped_velocities(&self) -> usize {
        self.clamped_velocities
    }

    /// Time at which the last note stops sounding.
    pub fn end_time(&self) -> f64 {
        self.notes
            .iter()
            .map(|n| n.onset + n.duration)
            .fold(0.0, f64::max)
    }
}

/// Which hand's notes are displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandFilter {
    #[default]
    Both,
    Left,
    Right,
}

impl HandFilter {
    #[inline]
    pub fn admits(self, hand: Hand) -> bool {
        match self {
            HandFilter::Both => true,
            HandFilter::Left => hand == Hand::Left,
            HandFilter::Right => hand == Hand::Right,
        }
    }
}

/// A note with its lane and color resolved. Immutable once derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteEvent {
    pub id: NoteId,
    pub pitch: u8,
    pub onset: f64,
    pub duration: f64,
    pub velocity: f32,
    pub lane: Lane,
    pub hand: Hand,
    pub color: [f32; 3],
}

impl NoteEvent {
    #[inline]
    pub fn end(&self) -> f64 {
        self.onset + self.duration
    }
}

/// Onset-sorted notes for one (score, hand filter) pair.
///
/// Cloning shares the underlying slice, so a render thread and a metrics
/// consumer can read the same list without locking. A new filter or score
/// always produces a new list; an existing one is never modified.
#[derive(Clone, Debug)]
pub struct NoteList {
    notes: Arc<[NoteEvent]>,
    max_duration: f64,
}

impl NoteList {
    pub fn empty() -> Self {
        Self {
            notes: Arc::from(Vec::<NoteEvent>::new()),
            max_duration: 0.0,
        }
    }

    /// Filter by hand, attach lanes and colors, then stable-sort by onset so
    /// equal onsets keep their input order.
    pub fn derive(score: &Score, filter: HandFilter, layout: &KeyboardLayout) -> Self {
        let mut notes: Vec<NoteEvent> = score
            .notes()
            .iter()
            .filter_map(|n| {
                let hand = layout.hand(n.pitch);
                if !filter.admits(hand) {
                    return None;
                }
                let lane = layout.lane(n.pitch)?;
                Some(NoteEvent {
                    id: n.id,
                    pitch: n.pitch,
                    onset: n.onset,
                    duration: n.duration,
                    velocity: n.velocity,
                    lane,
                    hand,
                    color: layout.hand_color(hand),
                })
            })
            .collect();
        notes.sort_by(|a, b| a.onset.total_cmp(&b.onset));
        let max_duration = notes.iter().map(|n| n.duration).fold(0.0, f64::max);
        log::debug!(
            "[score] derived {} of {} notes for {:?}",
            notes.len(),
            score.len(),
            filter
        );
        Self {
            notes: Arc::from(notes),
            max_duration,
        }
    }

    pub fn notes(&self) -> &[NoteEvent] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Notes whose onset lies in `[from, to]`, found by binary search.
    ///
    /// Any note that sounds or is visible within a window must have its onset
    /// in a range bounded by the window and `max_duration`, so callers use this
    /// to skip the rest of the list.
    pub fn onsets_between(&self, from: f64, to: f64) -> &[NoteEvent] {
        let lo = self.notes.partition_point(|n| n.onset < from);
        let hi = self.notes.partition_point(|n| n.onset <= to);
        if lo >= hi {
            &[]
        } else {
            &self.notes[lo..hi]
        }
    }

    /// True when both lists share the same backing slice.
    pub fn ptr_eq(&self, other: &NoteList) -> bool {
        Arc::ptr_eq(&self.notes, &other.notes)
    }
}

impl Default for NoteList {
    fn default() -> Self {
        Self::empty()
    }
}
