// Shared layout/motion/effect tuning constants. `VisualizerConfig::default()`
// is built from these.

// Keyboard range (88 keys, A0..C8)
pub const MIN_PITCH: u8 = 21;
pub const MAX_PITCH: u8 = 108;
pub const KEY_COUNT: usize = (MAX_PITCH - MIN_PITCH + 1) as usize;
pub const WHITE_KEY_COUNT: usize = 52;
pub const BLACK_KEY_COUNT: usize = 36;

// Pitch classes that are sharps/flats
pub const BLACK_PITCH_CLASSES: [u8; 5] = [1, 3, 6, 8, 10];

// Lane geometry (world units)
pub const WHITE_KEY_WIDTH: f32 = 1.0;
pub const BLACK_KEY_WIDTH_RATIO: f32 = 0.65;

// Hand split: pitch < HAND_SPLIT_PITCH is the left hand
pub const HAND_SPLIT_PITCH: u8 = 60;
pub const LEFT_HAND_COLOR: [f32; 3] = [0.25, 0.55, 0.95]; // blue-ish
pub const RIGHT_HAND_COLOR: [f32; 3] = [0.35, 0.9, 0.5]; // green-ish

// Note motion
pub const NOTE_SPEED: f32 = 25.0; // world units per second
pub const FALL_DISTANCE: f32 = 40.0; // look-ahead = FALL_DISTANCE / NOTE_SPEED
pub const TRAILING_GRACE_SECS: f64 = 0.5;
pub const NOTE_GAP: f32 = 0.1; // separation between consecutive same-lane notes
pub const MIN_NOTE_EXTENT: f32 = 0.25;
pub const HIT_LINE_HEIGHT: f32 = 0.0; // keyboard top in the fall view
pub const NOTE_DEPTH: f32 = 0.6; // block thickness across the travel axis
pub const BLACK_KEY_LIFT: f32 = 0.3; // black lanes sit slightly above/ahead of white ones

// Effect pools
pub const PARTICLE_CAPACITY: usize = 600;
pub const SPARKLE_CAPACITY: usize = 200;
pub const PARTICLE_FADE_RATE: f32 = 1.0;
pub const SPARKLE_FADE_RATE: f32 = 1.4;
pub const PARTICLE_GRAVITY: f32 = -18.0;
pub const SPARKLE_BUOYANCY: f32 = 1.5;
pub const PARTICLE_SPEED_RANGE: (f32, f32) = (3.0, 8.0);
pub const PARTICLE_SIZE_RANGE: (f32, f32) = (0.08, 0.22);
pub const PARTICLE_LIFE_RANGE: (f32, f32) = (0.4, 0.9);
pub const SPARKLE_SPEED_RANGE: (f32, f32) = (0.5, 2.0);
pub const SPARKLE_SIZE_RANGE: (f32, f32) = (0.15, 0.4);
pub const SPARKLE_LIFE_RANGE: (f32, f32) = (0.3, 0.7);
pub const SPARKLE_SPIN_RANGE: (f32, f32) = (-6.0, 6.0); // radians per second

// Emission (per active pitch)
pub const ONSET_BURST_PARTICLES: usize = 8;
pub const ONSET_BURST_SPARKLES: usize = 3;
pub const SUSTAIN_PARTICLES_PER_SEC: f32 = 30.0;
pub const SUSTAIN_SPARKLES_PER_SEC: f32 = 6.0;
pub const MAX_SPAWN_PER_PITCH_PER_TICK: usize = 2;

// Camera
pub const CAMERA_TRANSITION_SECS: f32 = 2.0;
pub const CAMERA_BLEND_RATE: f32 = 3.0; // per second
pub const CAMERA_FOVY_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 500.0;

// Clock
pub const SEEK_JUMP_SECS: f64 = 0.5; // slack over the expected advance before a step is a seek
pub const MAX_PLAYBACK_RATE: f64 = 2.0; // fastest transport rate treated as normal playback
