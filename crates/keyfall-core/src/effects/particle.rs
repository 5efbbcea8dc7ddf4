use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use super::{fade_scale, sample, Effect, EffectInstance, PoolPhysics, SpawnOrigin};
use crate::constants::{PARTICLE_LIFE_RANGE, PARTICLE_SIZE_RANGE, PARTICLE_SPEED_RANGE};

// Horizontal spread of the upward spray relative to its vertical component
const SPRAY_SPREAD: f32 = 0.6;

/// Spark sprayed upward from a pressed key, pulled back down by gravity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: [f32; 3],
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    pub fn scale(&self) -> f32 {
        fade_scale(self.size, self.life, self.max_life)
    }
}

impl Effect for Particle {
    fn jittered<R: Rng + ?Sized>(origin: &SpawnOrigin, rng: &mut R) -> Self {
        let intensity = origin.intensity.clamp(0.25, 1.0);
        let angle = rng.gen_range(0.0..TAU);
        let spread = rng.gen_range(0.0..SPRAY_SPREAD);
        let dir = Vec3::new(angle.cos() * spread, 1.0, angle.sin() * spread).normalize();
        let speed = sample(rng, PARTICLE_SPEED_RANGE) * intensity;
        let life = sample(rng, PARTICLE_LIFE_RANGE);
        Self {
            position: origin.position,
            velocity: dir * speed,
            color: origin.color,
            life,
            max_life: life,
            size: sample(rng, PARTICLE_SIZE_RANGE),
        }
    }

    fn life(&self) -> f32 {
        self.life
    }

    fn integrate(&mut self, dt: f32, physics: &PoolPhysics) {
        self.life -= dt * physics.fade_rate;
        self.velocity += physics.acceleration * dt;
        self.position += self.velocity * dt;
    }

    fn instance(&self) -> EffectInstance {
        let [r, g, b] = self.color;
        EffectInstance {
            position: self.position.to_array(),
            scale: self.scale(),
            color: [r, g, b, (self.life / self.max_life).clamp(0.0, 1.0)],
            rotation: 0.0,
        }
    }
}
