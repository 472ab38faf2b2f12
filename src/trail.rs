//! Ephemeral trail pool.
//!
//! Trail particles spawn probabilistically on pointer movement and fade out
//! over a fixed number of frames. Dead entries are removed by a compaction
//! pass each step, before the renderer next reads the set.

use crate::config::EffectConfig;
use crate::particle::TrailParticle;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;

/// Pool of live trail particles.
#[derive(Debug, Default)]
pub struct TrailPool {
    particles: Vec<TrailParticle>,
}

impl TrailPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maybe spawn one trail particle at a jittered pointer position.
    /// Called per pointer-move event, not per frame, so spawn density
    /// tracks input cadence.
    pub fn spawn(&mut self, at: Vec2, config: &EffectConfig, rng: &mut SmallRng) {
        if rng.gen::<f32>() >= config.trail_spawn_chance {
            return;
        }
        let j = config.trail_jitter;
        let jitter = Vec2::new(rng.gen_range(-j..=j), rng.gen_range(-j..=j));
        self.particles.push(TrailParticle {
            position: at + jitter,
            size: 1.0 + rng.gen::<f32>() * config.trail_size,
            life: 1.0,
        });
    }

    /// Decay all particles and compact away the dead ones.
    pub fn update(&mut self, config: &EffectConfig) {
        for p in &mut self.particles {
            p.life -= config.trail_decay;
            p.size *= config.trail_shrink;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn particles(&self) -> &[TrailParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn always_spawn() -> EffectConfig {
        let mut config = EffectConfig::coin_2d();
        config.trail_spawn_chance = 1.0;
        config
    }

    #[test]
    fn test_life_strictly_decreases() {
        let config = always_spawn();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut pool = TrailPool::new();
        pool.spawn(Vec2::new(10.0, 10.0), &config, &mut rng);

        let mut last = pool.particles()[0].life;
        while !pool.is_empty() {
            pool.update(&config);
            if let Some(p) = pool.particles().first() {
                assert!((last - p.life - config.trail_decay).abs() < 1e-6);
                last = p.life;
            }
        }
    }

    #[test]
    fn test_dead_particles_compact_out() {
        let config = always_spawn();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut pool = TrailPool::new();
        pool.spawn(Vec2::ZERO, &config, &mut rng);

        // life 1.0, decay 0.08: gone on the 13th update (life 0.04 -> -0.04).
        for _ in 0..12 {
            pool.update(&config);
            assert_eq!(pool.len(), 1);
        }
        pool.update(&config);
        assert!(pool.is_empty());
        // Only live particles ever remain in the set.
        assert!(pool.particles().iter().all(|p| p.life > 0.0));
    }

    #[test]
    fn test_spawn_respects_chance() {
        let mut config = always_spawn();
        config.trail_spawn_chance = 0.0;
        let mut rng = SmallRng::seed_from_u64(3);
        let mut pool = TrailPool::new();
        for _ in 0..100 {
            pool.spawn(Vec2::ZERO, &config, &mut rng);
        }
        assert!(pool.is_empty());
    }

    #[test]
    fn test_spawn_jitters_around_pointer() {
        let config = always_spawn();
        let mut rng = SmallRng::seed_from_u64(4);
        let mut pool = TrailPool::new();
        let at = Vec2::new(50.0, 60.0);
        for _ in 0..50 {
            pool.spawn(at, &config, &mut rng);
        }
        for p in pool.particles() {
            assert!((p.position - at).abs().max_element() <= config.trail_jitter);
            assert!(p.size >= 1.0 && p.size <= 1.0 + config.trail_size);
        }
    }
}
