use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use super::{fade_scale, sample, Effect, EffectInstance, Particle, PoolPhysics, SpawnOrigin};
use crate::constants::{
    SPARKLE_LIFE_RANGE, SPARKLE_SIZE_RANGE, SPARKLE_SPEED_RANGE, SPARKLE_SPIN_RANGE,
};

/// Spinning glint around a pressed key.
///
/// Sparkles drift in the XY plane only. In the recede view Z is the note
/// travel axis, so sparkles float where they were spawned instead of
/// following the notes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sparkle {
    pub body: Particle,
    pub rotation: f32,
    pub angular_velocity: f32,
}

impl Effect for Sparkle {
    fn jittered<R: Rng + ?Sized>(origin: &SpawnOrigin, rng: &mut R) -> Self {
        let intensity = origin.intensity.clamp(0.25, 1.0);
        // upper half-circle: sideways or up, never down into the keys
        let angle = rng.gen_range(0.0..PI);
        let speed = sample(rng, SPARKLE_SPEED_RANGE) * intensity;
        let life = sample(rng, SPARKLE_LIFE_RANGE);
        Self {
            body: Particle {
                position: origin.position,
                velocity: Vec3::new(angle.cos(), angle.sin(), 0.0) * speed,
                color: origin.color,
                life,
                max_life: life,
                size: sample(rng, SPARKLE_SIZE_RANGE),
            },
            rotation: rng.gen_range(0.0..PI),
            angular_velocity: sample(rng, SPARKLE_SPIN_RANGE),
        }
    }

    fn life(&self) -> f32 {
        self.body.life
    }

    fn integrate(&mut self, dt: f32, physics: &PoolPhysics) {
        self.body.integrate(dt, physics);
        self.rotation += self.angular_velocity * dt;
    }

    fn instance(&self) -> EffectInstance {
        EffectInstance {
            rotation: self.rotation,
            scale: fade_scale(self.body.size, self.body.life, self.body.max_life),
            ..self.body.instance()
        }
    }
}
