//! Tunable parameters for the visualizer core.
//!
//! Every group has a `Default` built from `constants.rs`. Call
//! [`VisualizerConfig::validate`] once when a configuration is accepted; the
//! per-tick code assumes a validated config and does not re-check it.

use crate::constants::*;
use crate::error::ConfigError;

/// Keyboard geometry and hand coloring.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub white_key_width: f32,
    pub black_key_width_ratio: f32,
    pub hand_split_pitch: u8,
    pub left_color: [f32; 3],
    pub right_color: [f32; 3],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            white_key_width: WHITE_KEY_WIDTH,
            black_key_width_ratio: BLACK_KEY_WIDTH_RATIO,
            hand_split_pitch: HAND_SPLIT_PITCH,
            left_color: LEFT_HAND_COLOR,
            right_color: RIGHT_HAND_COLOR,
        }
    }
}

/// How notes travel toward the keyboard.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    /// World units travelled per second of score time.
    pub speed: f32,
    /// Distance from spawn edge to the keyboard plane.
    pub fall_distance: f32,
    /// How long a note's tail stays renderable after it has passed.
    pub trailing_grace_secs: f64,
    pub note_gap: f32,
    pub min_note_extent: f32,
    pub hit_line_height: f32,
    pub note_depth: f32,
    pub black_key_lift: f32,
}

impl MotionConfig {
    /// Look-ahead window W in seconds.
    #[inline]
    pub fn look_ahead_secs(&self) -> f64 {
        f64::from(self.fall_distance) / f64::from(self.speed)
    }

    /// Rendered extent along the travel axis before any clipping.
    #[inline]
    pub fn full_extent(&self, duration_secs: f64) -> f32 {
        (duration_secs as f32 * self.speed - self.note_gap).max(self.min_note_extent)
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: NOTE_SPEED,
            fall_distance: FALL_DISTANCE,
            trailing_grace_secs: TRAILING_GRACE_SECS,
            note_gap: NOTE_GAP,
            min_note_extent: MIN_NOTE_EXTENT,
            hit_line_height: HIT_LINE_HEIGHT,
            note_depth: NOTE_DEPTH,
            black_key_lift: BLACK_KEY_LIFT,
        }
    }
}

/// Pool capacities, physics and emission throttles.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectsConfig {
    pub particle_capacity: usize,
    pub sparkle_capacity: usize,
    pub particle_fade_rate: f32,
    pub sparkle_fade_rate: f32,
    pub particle_gravity: f32,
    pub sparkle_buoyancy: f32,
    pub onset_burst_particles: usize,
    pub onset_burst_sparkles: usize,
    pub sustain_particles_per_sec: f32,
    pub sustain_sparkles_per_sec: f32,
    pub max_spawn_per_pitch_per_tick: usize,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            particle_capacity: PARTICLE_CAPACITY,
            sparkle_capacity: SPARKLE_CAPACITY,
            particle_fade_rate: PARTICLE_FADE_RATE,
            sparkle_fade_rate: SPARKLE_FADE_RATE,
            particle_gravity: PARTICLE_GRAVITY,
            sparkle_buoyancy: SPARKLE_BUOYANCY,
            onset_burst_particles: ONSET_BURST_PARTICLES,
            onset_burst_sparkles: ONSET_BURST_SPARKLES,
            sustain_particles_per_sec: SUSTAIN_PARTICLES_PER_SEC,
            sustain_sparkles_per_sec: SUSTAIN_SPARKLES_PER_SEC,
            max_spawn_per_pitch_per_tick: MAX_SPAWN_PER_PITCH_PER_TICK,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub transition_secs: f32,
    pub blend_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            transition_secs: CAMERA_TRANSITION_SECS,
            blend_rate: CAMERA_BLEND_RATE,
        }
    }
}

/// Top-level configuration handed to the frame driver.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub layout: LayoutConfig,
    pub motion: MotionConfig,
    pub effects: EffectsConfig,
    pub camera: CameraConfig,
    /// Seed for effect jitter; equal seeds give equal effect streams.
    pub seed: u64,
    /// Flush both effect pools when the clock seeks.
    pub clear_effects_on_seek: bool,
    /// A forward clock step counts as playback while it stays within
    /// `dt * max_playback_rate + seek_jump_secs`.
    pub seek_jump_secs: f64,
    pub max_playback_rate: f64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            motion: MotionConfig::default(),
            effects: EffectsConfig::default(),
            camera: CameraConfig::default(),
            seed: 42,
            clear_effects_on_seek: true,
            seek_jump_secs: SEEK_JUMP_SECS,
            max_playback_rate: MAX_PLAYBACK_RATE,
        }
    }
}

impl VisualizerConfig {
    /// Largest forward clock step that still counts as playback for a frame
    /// of `dt` seconds.
    pub fn max_playback_step(&self, dt: f32) -> f64 {
        f64::from(dt.max(0.0)) * self.max_playback_rate + self.seek_jump_secs
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.layout;
        positive("layout.white_key_width", l.white_key_width)?;
        positive("layout.black_key_width_ratio", l.black_key_width_ratio)?;
        // black keys must fit between their white neighbours
        if l.black_key_width_ratio > 1.0 {
            return Err(ConfigError::TooLarge {
                field: "layout.black_key_width_ratio",
                value: f64::from(l.black_key_width_ratio),
                max: 1.0,
            });
        }
        if !(MIN_PITCH..=MAX_PITCH).contains(&l.hand_split_pitch) {
            return Err(ConfigError::HandSplitOutOfRange(l.hand_split_pitch));
        }

        let m = &self.motion;
        positive("motion.speed", m.speed)?;
        positive("motion.fall_distance", m.fall_distance)?;
        positive("motion.note_depth", m.note_depth)?;
        non_negative("motion.trailing_grace_secs", m.trailing_grace_secs as f32)?;
        non_negative("motion.note_gap", m.note_gap)?;
        non_negative("motion.min_note_extent", m.min_note_extent)?;
        finite("motion.hit_line_height", m.hit_line_height)?;
        finite("motion.black_key_lift", m.black_key_lift)?;

        let e = &self.effects;
        if e.particle_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "effects.particle_capacity",
            });
        }
        if e.sparkle_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "effects.sparkle_capacity",
            });
        }
        positive("effects.particle_fade_rate", e.particle_fade_rate)?;
        positive("effects.sparkle_fade_rate", e.sparkle_fade_rate)?;
        non_negative("effects.sustain_particles_per_sec", e.sustain_particles_per_sec)?;
        non_negative("effects.sustain_sparkles_per_sec", e.sustain_sparkles_per_sec)?;

        positive("camera.transition_secs", self.camera.transition_secs)?;
        positive("camera.blend_rate", self.camera.blend_rate)?;

        positive("seek_jump_secs", self.seek_jump_secs as f32)?;
        positive("max_playback_rate", self.max_playback_rate as f32)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this comparison too
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive {
            field,
            value: f64::from(value),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative {
            field,
            value: f64::from(value),
        })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite {
            field,
            value: f64::from(value),
        })
    }
}
