use rand::Rng;

use super::{Effect, EffectInstance, PoolPhysics, SpawnOrigin};

/// Fixed-capacity arena with a live-count cursor.
///
/// Slots `[0, live)` hold live members in no particular order. Removal swaps
/// the dead member with the last live one, so `advance` never shifts or
/// reallocates.
#[derive(Clone, Debug)]
pub struct Pool<T: Effect> {
    slots: Vec<T>,
    live: usize,
    physics: PoolPhysics,
}

impl<T: Effect> Pool<T> {
    pub fn new(capacity: usize, physics: PoolPhysics) -> Self {
        Self {
            slots: vec![T::default(); capacity],
            live: 0,
            physics,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn remaining(&self) -> usize {
        self.slots.len() - self.live
    }

    pub fn physics(&self) -> &PoolPhysics {
        &self.physics
    }

    /// Insert one member. Returns `false` (and drops it) when full.
    pub fn push(&mut self, effect: T) -> bool {
        if self.live >= self.slots.len() {
            return false;
        }
        self.slots[self.live] = effect;
        self.live += 1;
        true
    }

    /// Spawn up to `count` jittered members; the excess over the remaining
    /// capacity is silently dropped. Returns how many were added.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        origin: &SpawnOrigin,
        count: usize,
        rng: &mut R,
    ) -> usize {
        let n = count.min(self.remaining());
        for _ in 0..n {
            let effect = T::jittered(origin, rng);
            self.slots[self.live] = effect;
            self.live += 1;
        }
        n
    }

    /// Integrate every live member by `dt` seconds and drop the expired ones.
    pub fn advance(&mut self, dt: f32) {
        // also maps NaN to 0
        let dt = dt.max(0.0);
        let mut i = self.live;
        while i > 0 {
            i -= 1;
            self.slots[i].integrate(dt, &self.physics);
            if self.slots[i].life() <= 0.0 {
                self.live -= 1;
                self.slots.swap(i, self.live);
            }
        }
    }

    pub fn clear(&mut self) {
        self.live = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots[..self.live].iter()
    }

    /// Append one draw record per live member to `out`.
    pub fn instances_into(&self, out: &mut Vec<EffectInstance>) {
        out.extend(self.iter().map(Effect::instance));
    }
}
