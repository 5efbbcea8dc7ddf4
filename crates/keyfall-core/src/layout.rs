//! Pitch to keyboard-lane mapping.
//!
//! Lanes depend only on pitch and key geometry, so a [`KeyboardLayout`] is
//! built once per configuration and shared by every note of a score.

use crate::config::LayoutConfig;
use crate::constants::{BLACK_PITCH_CLASSES, KEY_COUNT, MAX_PITCH, MIN_PITCH, WHITE_KEY_COUNT};

/// Horizontal lane of one key. `x` is the lane center; the keyboard is
/// centered on x = 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lane {
    pub x: f32,
    pub width: f32,
    pub is_black: bool,
}

/// Which hand a pitch is assigned to by the split threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    #[inline]
    pub fn for_pitch(pitch: u8, split: u8) -> Self {
        if pitch < split {
            Hand::Left
        } else {
            Hand::Right
        }
    }
}

#[inline]
pub fn is_supported_pitch(pitch: i32) -> bool {
    (i32::from(MIN_PITCH)..=i32::from(MAX_PITCH)).contains(&pitch)
}

#[inline]
pub fn is_black_key(pitch: u8) -> bool {
    BLACK_PITCH_CLASSES.contains(&(pitch % 12))
}

/// Number of white keys strictly below `pitch` within the supported range.
pub fn white_keys_below(pitch: u8) -> usize {
    (MIN_PITCH..pitch.min(MAX_PITCH + 1))
        .filter(|p| !is_black_key(*p))
        .count()
}

/// Resolve the lane for `pitch`, or `None` outside A0..=C8.
///
/// White keys sit at `index * width + width / 2` from the left edge. A black
/// key is centered on the boundary between its two white neighbours, which is
/// half a slot left of the next white key, and is narrower by `black_ratio`.
pub fn resolve_lane(pitch: u8, white_key_width: f32, black_ratio: f32) -> Option<Lane> {
    if !is_supported_pitch(i32::from(pitch)) {
        return None;
    }
    let left_edge = -(WHITE_KEY_COUNT as f32) * white_key_width * 0.5;
    let index = white_keys_below(pitch) as f32;
    let lane = if is_black_key(pitch) {
        Lane {
            x: left_edge + index * white_key_width,
            width: white_key_width * black_ratio,
            is_black: true,
        }
    } else {
        Lane {
            x: left_edge + index * white_key_width + white_key_width * 0.5,
            width: white_key_width,
            is_black: false,
        }
    };
    Some(lane)
}

/// Cached lanes for all 88 keys plus the hand palette.
#[derive(Clone, Debug)]
pub struct KeyboardLayout {
    lanes: [Lane; KEY_COUNT],
    hand_split_pitch: u8,
    left_color: [f32; 3],
    right_color: [f32; 3],
    total_width: f32,
}

impl KeyboardLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        let mut lanes = [Lane {
            x: 0.0,
            width: 0.0,
            is_black: false,
        }; KEY_COUNT];
        for (slot, pitch) in lanes.iter_mut().zip(MIN_PITCH..=MAX_PITCH) {
            if let Some(lane) =
                resolve_lane(pitch, config.white_key_width, config.black_key_width_ratio)
            {
                *slot = lane;
            }
        }
        Self {
            lanes,
            hand_split_pitch: config.hand_split_pitch,
            left_color: config.left_color,
            right_color: config.right_color,
            total_width: WHITE_KEY_COUNT as f32 * config.white_key_width,
        }
    }

    #[inline]
    pub fn lane(&self, pitch: u8) -> Option<Lane> {
        if pitch < MIN_PITCH {
            return None;
        }
        self.lanes.get(usize::from(pitch - MIN_PITCH)).copied()
    }

    #[inline]
    pub fn hand(&self, pitch: u8) -> Hand {
        Hand::for_pitch(pitch, self.hand_split_pitch)
    }

    pub fn hand_color(&self, hand: Hand) -> [f32; 3] {
        match hand {
            Hand::Left => self.left_color,
            Hand::Right => self.right_color,
        }
    }

    /// Width of the whole keyboard in world units.
    pub fn total_width(&self) -> f32 {
        self.total_width
    }

    /// All keys as `(pitch, lane)`, low to high. Used to draw the keyboard itself.
    pub fn keys(&self) -> impl Iterator<Item = (u8, Lane)> + '_ {
        (MIN_PITCH..=MAX_PITCH).zip(self.lanes.iter().copied())
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}
