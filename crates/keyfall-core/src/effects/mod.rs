//! Transient visual effects: key-press particles and sparkles.
//!
//! Each kind lives in a fixed-capacity [`Pool`]. Spawns beyond capacity are
//! dropped, and members are removed in place once their life runs out, so
//! there is no allocation after construction.

mod particle;
mod pool;
mod sparkle;

pub use particle::Particle;
pub use pool::Pool;
pub use sparkle::Sparkle;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;

use crate::config::EffectsConfig;

/// Per-pool constant forces and fade speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoolPhysics {
    pub acceleration: Vec3,
    /// Life lost per second of `advance` time.
    pub fade_rate: f32,
}

/// Where and how a batch of effects is emitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnOrigin {
    pub position: Vec3,
    pub color: [f32; 3],
    /// Scales spawn speed and size, typically the note velocity.
    pub intensity: f32,
}

/// Draw-submission record for one live effect.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct EffectInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
    pub rotation: f32,
}

/// A pool member. Implementors are plain `Copy` data so slots can be reused.
pub trait Effect: Copy + Default {
    /// Build one member from `origin` with randomized jitter.
    fn jittered<R: Rng + ?Sized>(origin: &SpawnOrigin, rng: &mut R) -> Self;

    /// Remaining life; the pool removes members at or below zero.
    fn life(&self) -> f32;

    fn integrate(&mut self, dt: f32, physics: &PoolPhysics);

    fn instance(&self) -> EffectInstance;
}

pub type ParticlePool = Pool<Particle>;
pub type SparklePool = Pool<Sparkle>;

impl Pool<Particle> {
    pub fn particles(config: &EffectsConfig) -> Self {
        Pool::new(
            config.particle_capacity,
            PoolPhysics {
                acceleration: Vec3::new(0.0, config.particle_gravity, 0.0),
                fade_rate: config.particle_fade_rate,
            },
        )
    }
}

impl Pool<Sparkle> {
    pub fn sparkles(config: &EffectsConfig) -> Self {
        Pool::new(
            config.sparkle_capacity,
            PoolPhysics {
                acceleration: Vec3::new(0.0, config.sparkle_buoyancy, 0.0),
                fade_rate: config.sparkle_fade_rate,
            },
        )
    }
}

/// `size * life / max_life`, clamped so a dead member never renders negative.
#[inline]
pub(crate) fn fade_scale(size: f32, life: f32, max_life: f32) -> f32 {
    if max_life <= 0.0 {
        return 0.0;
    }
    size * (life / max_life).clamp(0.0, 1.0)
}

#[inline]
pub(crate) fn sample<R: Rng + ?Sized>(rng: &mut R, range: (f32, f32)) -> f32 {
    if range.1 > range.0 {
        rng.gen_range(range.0..range.1)
    } else {
        range.0
    }
}
