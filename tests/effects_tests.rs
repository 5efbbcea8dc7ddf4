// Host-side tests for the particle and sparkle pools.
// Spawn jitter is random, so values are checked against their ranges.

use glam::Vec3;
use keyfall_core::constants::*;
use keyfall_core::{
    Effect, EffectsConfig, Particle, ParticlePool, Pool, PoolPhysics, SpawnOrigin, Sparkle,
    SparklePool,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn origin() -> SpawnOrigin {
    SpawnOrigin {
        position: Vec3::new(1.0, 0.0, -0.5),
        color: [0.2, 0.4, 0.6],
        intensity: 1.0,
    }
}

fn still_physics() -> PoolPhysics {
    PoolPhysics {
        acceleration: Vec3::ZERO,
        fade_rate: 1.0,
    }
}

#[test]
fn pool_never_exceeds_capacity() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut pool: Pool<Particle> = Pool::new(10, still_physics());
    assert_eq!(pool.spawn(&origin(), 5, &mut rng), 5);
    assert_eq!(pool.len(), 5);
    let added = pool.spawn(&origin(), 50, &mut rng);
    assert_eq!(added, 5, "only the remaining capacity is filled");
    assert_eq!(pool.len(), 10);
    assert_eq!(pool.capacity(), 10);
    assert_eq!(pool.spawn(&origin(), 3, &mut rng), 0, "full pool drops silently");
    assert!(!pool.push(Particle::default()));
    assert_eq!(pool.len(), 10);
}

#[test]
fn particle_jitter_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..500 {
        let p = Particle::jittered(&origin(), &mut rng);
        let speed = p.velocity.length();
        assert!(speed >= PARTICLE_SPEED_RANGE.0 - 1e-4 && speed <= PARTICLE_SPEED_RANGE.1 + 1e-4);
        assert!(p.velocity.y > 0.0, "particles spray upward");
        assert!(p.size >= PARTICLE_SIZE_RANGE.0 && p.size <= PARTICLE_SIZE_RANGE.1);
        assert!(p.life >= PARTICLE_LIFE_RANGE.0 && p.life <= PARTICLE_LIFE_RANGE.1);
        assert_eq!(p.life, p.max_life);
        assert_eq!(p.position, origin().position);
    }
}

#[test]
fn sparkle_jitter_stays_in_range_and_floats() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        let s = Sparkle::jittered(&origin(), &mut rng);
        let speed = s.body.velocity.length();
        assert!(speed >= SPARKLE_SPEED_RANGE.0 - 1e-4 && speed <= SPARKLE_SPEED_RANGE.1 + 1e-4);
        assert_eq!(s.body.velocity.z, 0.0, "no motion along the travel axis");
        assert!(s.body.velocity.y >= 0.0);
        assert!(
            s.angular_velocity >= SPARKLE_SPIN_RANGE.0 && s.angular_velocity <= SPARKLE_SPIN_RANGE.1
        );
    }
}

#[test]
fn advance_integrates_and_fades_linearly() {
    let physics = PoolPhysics {
        acceleration: Vec3::new(0.0, -10.0, 0.0),
        fade_rate: 2.0,
    };
    let mut pool: Pool<Particle> = Pool::new(4, physics);
    pool.push(Particle {
        position: Vec3::ZERO,
        velocity: Vec3::new(1.0, 5.0, 0.0),
        color: [1.0; 3],
        life: 1.0,
        max_life: 1.0,
        size: 0.5,
    });
    pool.advance(0.1);
    let p = *pool.iter().next().expect("still alive");
    assert!((p.life - 0.8).abs() < 1e-6);
    assert!((p.velocity.y - 4.0).abs() < 1e-5);
    assert!((p.position.x - 0.1).abs() < 1e-6);
    assert!((p.position.y - 0.4).abs() < 1e-5);
    assert!((p.scale() - 0.4).abs() < 1e-6, "scale = size * life / max_life");
    let inst = p.instance();
    assert!((inst.color[3] - 0.8).abs() < 1e-6);
    assert_eq!(inst.rotation, 0.0);
}

#[test]
fn expired_members_are_removed_in_place() {
    let mut pool: Pool<Particle> = Pool::new(8, still_physics());
    for life in [0.05, 0.5, 0.05, 0.5, 0.05] {
        pool.push(Particle {
            life,
            max_life: life,
            size: 1.0,
            ..Particle::default()
        });
    }
    pool.advance(0.1);
    assert_eq!(pool.len(), 2);
    assert!(pool.iter().all(|p| p.life > 0.0));
    // freed slots are reusable
    let mut rng = StdRng::seed_from_u64(4);
    assert_eq!(pool.spawn(&origin(), 100, &mut rng), 6);
    assert_eq!(pool.len(), 8);
}

#[test]
fn everything_expires_eventually() {
    let mut rng = StdRng::seed_from_u64(5);
    let config = EffectsConfig::default();
    let mut particles = ParticlePool::particles(&config);
    let mut sparkles = SparklePool::sparkles(&config);
    particles.spawn(&origin(), 100, &mut rng);
    sparkles.spawn(&origin(), 100, &mut rng);
    for _ in 0..120 {
        particles.advance(1.0 / 60.0);
        sparkles.advance(1.0 / 60.0);
    }
    assert!(particles.is_empty());
    assert!(sparkles.is_empty());
}

#[test]
fn sparkle_rotation_integrates() {
    let mut pool: Pool<Sparkle> = Pool::new(1, still_physics());
    pool.push(Sparkle {
        body: Particle {
            life: 1.0,
            max_life: 1.0,
            size: 1.0,
            ..Particle::default()
        },
        rotation: 0.5,
        angular_velocity: 2.0,
    });
    pool.advance(0.25);
    let s = pool.iter().next().unwrap();
    assert!((s.rotation - 1.0).abs() < 1e-6);
    let inst = s.instance();
    assert!((inst.rotation - 1.0).abs() < 1e-6);
    assert!((inst.scale - 0.75).abs() < 1e-6);
}

#[test]
fn negative_or_nan_dt_is_ignored() {
    let mut pool: Pool<Particle> = Pool::new(1, still_physics());
    pool.push(Particle {
        life: 1.0,
        max_life: 1.0,
        size: 1.0,
        ..Particle::default()
    });
    pool.advance(-1.0);
    pool.advance(f32::NAN);
    assert_eq!(pool.iter().next().unwrap().life, 1.0);
}

#[test]
fn clear_empties_without_shrinking() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut pool = ParticlePool::particles(&EffectsConfig::default());
    pool.spawn(&origin(), 20, &mut rng);
    pool.clear();
    assert!(pool.is_empty());
    assert_eq!(pool.capacity(), PARTICLE_CAPACITY);
}

#[test]
fn instances_are_plain_bytes() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut pool = SparklePool::sparkles(&EffectsConfig::default());
    pool.spawn(&origin(), 3, &mut rng);
    let mut out = Vec::new();
    pool.instances_into(&mut out);
    assert_eq!(out.len(), 3);
    let bytes: &[u8] = bytemuck::cast_slice(&out);
    assert_eq!(bytes.len(), 3 * std::mem::size_of::<keyfall_core::EffectInstance>());
}
