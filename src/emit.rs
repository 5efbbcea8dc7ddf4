use rand::Rng;

use keyfall_core::{
    ActivePitches, EffectsConfig, NoteList, ParticlePool, SpawnOrigin, SparklePool,
    ViewProjection,
};

/// Spawn requests for one tick, applied before the pools advance.
pub(crate) struct Emission<'a> {
    pub notes: &'a NoteList,
    pub active: &'a ActivePitches,
    pub projection: &'a ViewProjection,
    pub effects: &'a EffectsConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub bursts: usize,
    pub particles: usize,
    pub sparkles: usize,
}

impl Emission<'_> {
    /// One burst for every note whose onset lies in `(from, to]`.
    pub fn onset_bursts<R: Rng + ?Sized>(
        &self,
        from: f64,
        to: f64,
        particles: &mut ParticlePool,
        sparkles: &mut SparklePool,
        rng: &mut R,
        stats: &mut EmitStats,
    ) {
        for note in self.notes.onsets_between(from, to) {
            if note.onset <= from {
                continue;
            }
            let origin = SpawnOrigin {
                position: self.projection.hit_point(&note.lane),
                color: note.color,
                intensity: note.velocity,
            };
            stats.bursts += 1;
            stats.particles += particles.spawn(&origin, self.effects.onset_burst_particles, rng);
            stats.sparkles += sparkles.spawn(&origin, self.effects.onset_burst_sparkles, rng);
        }
    }

    /// Continuous emission for held keys: `rate * dt` per pitch on average,
    /// never more than `max_spawn_per_pitch_per_tick` per pitch.
    pub fn sustain<R: Rng + ?Sized>(
        &self,
        dt: f32,
        particles: &mut ParticlePool,
        sparkles: &mut SparklePool,
        rng: &mut R,
        stats: &mut EmitStats,
    ) {
        let cap = self.effects.max_spawn_per_pitch_per_tick;
        for key in self.active.iter() {
            let origin = SpawnOrigin {
                position: self.projection.hit_point(&key.lane),
                color: key.color,
                intensity: key.velocity,
            };
            let n = stochastic_count(self.effects.sustain_particles_per_sec * dt, rng).min(cap);
            stats.particles += particles.spawn(&origin, n, rng);
            let n = stochastic_count(self.effects.sustain_sparkles_per_sec * dt, rng).min(cap);
            stats.sparkles += sparkles.spawn(&origin, n, rng);
        }
    }
}

/// Round `expected` down, then up with probability equal to its fraction, so
/// the mean count per second does not depend on the frame rate.
pub(crate) fn stochastic_count<R: Rng + ?Sized>(expected: f32, rng: &mut R) -> usize {
    if expected.is_nan() || expected <= 0.0 {
        return 0;
    }
    let whole = expected.floor();
    let extra = usize::from(rng.gen::<f32>() < expected - whole);
    whole as usize + extra
}
