pub mod activation;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod demo;
pub mod effects;
pub mod error;
pub mod layout;
pub mod score;
pub mod window;

pub use activation::{active_pitches, active_pitches_into, is_sounding, ActiveKey, ActivePitches};
pub use camera::{
    target_pose, CameraContext, CameraController, CameraPose, CameraState, InputPolicy,
};
pub use clock::{ClockStep, ClockTime};
pub use config::{CameraConfig, EffectsConfig, LayoutConfig, MotionConfig, VisualizerConfig};
pub use effects::{
    Effect, EffectInstance, Particle, ParticlePool, Pool, PoolPhysics, SpawnOrigin, Sparkle,
    SparklePool,
};
pub use error::{ClockError, ConfigError, ScoreError};
pub use layout::{resolve_lane, Hand, KeyboardLayout, Lane};
pub use score::{HandFilter, NoteEvent, NoteId, NoteList, RawNote, Score, ScoreNote};
pub use window::{in_window, Placement, ViewMode, ViewProjection};
