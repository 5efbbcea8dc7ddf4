//! Visible-window filtering and per-view note placement.
//!
//! Both views share one [`ViewProjection`]: the window test, extent and lane
//! offsets are identical, only the travel axis and the recede clipping differ.
//! Placement is a pure function of `(note, t)`; nothing is carried between
//! calls, so a seek needs no reset.

use glam::Vec3;

use crate::config::MotionConfig;
use crate::layout::Lane;
use crate::score::{NoteEvent, NoteId, NoteList};

/// Projection strategy: notes fall down the Y axis onto the keyboard, or
/// start at negative z and travel along +Z toward a keyboard plane at z = 0
/// (seen top-down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Fall,
    Recede,
}

/// A visible note resolved to a box in world space.
///
/// `size` is the full box size (x = lane width). `extent` repeats the size
/// along the travel axis: Y for [`ViewMode::Fall`], Z for [`ViewMode::Recede`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub id: NoteId,
    pub pitch: u8,
    pub center: Vec3,
    pub size: Vec3,
    pub extent: f32,
    pub color: [f32; 3],
    pub velocity: f32,
    pub is_black: bool,
    /// Seconds until onset; negative once the note has started.
    pub time_to_hit: f64,
}

impl Placement {
    /// Edge of the block nearest the keyboard along the travel axis.
    pub fn leading_edge(&self, mode: ViewMode) -> f32 {
        match mode {
            ViewMode::Fall => self.center.y - self.extent * 0.5,
            ViewMode::Recede => self.center.z + self.extent * 0.5,
        }
    }
}

/// Window test shared by both views: the note starts within `look_ahead`
/// seconds and its tail has not been gone for longer than `grace`.
#[inline]
pub fn in_window(onset: f64, duration: f64, t: f64, look_ahead: f64, grace: f64) -> bool {
    let until = onset - t;
    until <= look_ahead && until + duration >= -grace
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewProjection {
    mode: ViewMode,
    motion: MotionConfig,
    look_ahead: f64,
}

impl ViewProjection {
    pub fn new(mode: ViewMode, motion: &MotionConfig) -> Self {
        Self {
            mode,
            motion: motion.clone(),
            look_ahead: motion.look_ahead_secs(),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn look_ahead_secs(&self) -> f64 {
        self.look_ahead
    }

    /// Point where notes in `lane` meet the keyboard; effects spawn here.
    pub fn hit_point(&self, lane: &Lane) -> Vec3 {
        let m = &self.motion;
        let lift = if lane.is_black { m.black_key_lift } else { 0.0 };
        match self.mode {
            ViewMode::Fall => Vec3::new(lane.x, m.hit_line_height, -lift),
            ViewMode::Recede => Vec3::new(lane.x, lift, 0.0),
        }
    }

    /// Place one note at time `t`, or `None` when it is not visible.
    pub fn place(&self, note: &NoteEvent, t: f64) -> Option<Placement> {
        let m = &self.motion;
        if !in_window(note.onset, note.duration, t, self.look_ahead, m.trailing_grace_secs) {
            return None;
        }
        let until = note.onset - t;
        let travel = until as f32 * m.speed;
        let full = m.full_extent(note.duration);
        let lift = if note.lane.is_black {
            m.black_key_lift
        } else {
            0.0
        };

        let (center, size, extent) = match self.mode {
            ViewMode::Fall => {
                let y = m.hit_line_height + travel + full * 0.5;
                // black lanes sit behind the white ones
                let center = Vec3::new(note.lane.x, y, -lift);
                (center, Vec3::new(note.lane.width, full, m.note_depth), full)
            }
            ViewMode::Recede => {
                let (lead_z, extent) = if until < 0.0 {
                    let elapsed = (-until) as f32;
                    (0.0, (full - elapsed * m.speed).max(0.0))
                } else {
                    (-travel, full)
                };
                if extent <= 0.0 {
                    return None;
                }
                let center = Vec3::new(note.lane.x, lift, lead_z - extent * 0.5);
                (center, Vec3::new(note.lane.width, m.note_depth, extent), extent)
            }
        };

        Some(Placement {
            id: note.id,
            pitch: note.pitch,
            center,
            size,
            extent,
            color: note.color,
            velocity: note.velocity,
            is_black: note.lane.is_black,
            time_to_hit: until,
        })
    }

    /// Replace `out` with every visible note at `t`, in onset order.
    ///
    /// Only notes whose onset can still be in the window are scanned; the
    /// lower bound comes from the longest note in the list.
    pub fn visible_into(&self, notes: &NoteList, t: f64, out: &mut Vec<Placement>) {
        out.clear();
        // widened slightly so rounding never drops a note on the boundary;
        // `place` applies the exact test
        let from = t - notes.max_duration() - self.motion.trailing_grace_secs - 1e-9;
        let to = t + self.look_ahead + 1e-9;
        out.extend(
            notes
                .onsets_between(from, to)
                .iter()
                .filter_map(|n| self.place(n, t)),
        );
    }

    pub fn visible(&self, notes: &NoteList, t: f64) -> Vec<Placement> {
        let mut out = Vec::new();
        self.visible_into(notes, t, &mut out);
        out
    }
}
