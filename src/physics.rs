//! Per-frame force integration.
//!
//! Each particle runs a fixed stage order every step: pointer repulsion,
//! spring return toward home, damping, explicit Euler integration, then
//! displacement classification. The order is load-bearing: both forces
//! accumulate into velocity before damping removes energy, and the
//! displacement state is derived from the post-integration position so the
//! render mode never lags a frame behind.

use crate::config::EffectConfig;
use crate::particle::Particle;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;

/// Current input location. Passed into every step as a plain value; the
/// simulation holds no global input state.
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    /// Screen-space pointer position. Off-screen values are accepted as-is;
    /// forces attenuate to zero beyond the repulsion radius.
    pub position: Vec2,
    /// False until the first pointer event arrives.
    pub active: bool,
}

impl PointerState {
    /// Parked far off-screen so an inactive pointer exerts no force.
    pub const PARKED: Vec2 = Vec2::new(-5000.0, -5000.0);

    pub fn new() -> Self {
        Self {
            position: Self::PARKED,
            active: false,
        }
    }

    /// Record a pointer movement.
    pub fn moved(&mut self, position: Vec2) {
        self.position = position;
        self.active = true;
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance one particle by one frame.
///
/// `rng` feeds the angular scatter jitter and is only consulted when the
/// config enables it, so the flat variant stays fully deterministic.
pub fn integrate(
    particle: &mut Particle,
    pointer: &PointerState,
    config: &EffectConfig,
    rng: &mut SmallRng,
) {
    // Repulsion. A pointer exactly on the particle has no direction to
    // push along; skip it rather than divide by zero.
    let delta = pointer.position - particle.position;
    let dist_sq = delta.length_squared();
    let radius = config.repulsion_radius * particle.radius_scale;
    if dist_sq > 0.0 && dist_sq < radius * radius {
        let distance = dist_sq.sqrt();
        let falloff = ((radius - distance) / radius).powf(config.repulsion_exponent);
        let strength = config.repulsion_strength * falloff;
        let mut angle = delta.y.atan2(delta.x);
        if config.repulsion_jitter > 0.0 {
            angle += rng.gen_range(-config.repulsion_jitter..config.repulsion_jitter);
        }
        particle.velocity -= Vec2::from_angle(angle) * strength;
    }

    // Spring return toward home.
    let to_home = particle.home - particle.position;
    particle.velocity += to_home * (config.return_speed + particle.noise * 0.01);

    // Damping, unconditionally, after both forces.
    particle.velocity *= config.friction;

    // Explicit Euler.
    particle.position += particle.velocity;

    // Displacement classification, from the post-integration position.
    let threshold = config.displace_threshold;
    particle.displaced = particle.position.distance_squared(particle.home) > threshold * threshold;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Material;
    use glam::Vec3;
    use rand::SeedableRng;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle::uniform(Vec3::new(x, y, 0.0), Material::Face, Vec3::ONE, Vec3::X)
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0)
    }

    #[test]
    fn test_rest_state_is_a_fixpoint() {
        // Pointer far away, zero velocity, position at home: one step
        // changes nothing within tolerance.
        let config = EffectConfig::coin_2d();
        let mut p = particle_at(100.0, 100.0);
        let pointer = PointerState::new();

        integrate(&mut p, &pointer, &config, &mut rng());

        assert!(p.position.distance(p.home) < 1e-5);
        assert!(p.velocity.length() < 1e-5);
        assert!(!p.displaced);
    }

    #[test]
    fn test_base_never_changes() {
        let config = EffectConfig::coin_2d();
        let mut p = particle_at(100.0, 100.0);
        let base = p.base;
        let mut pointer = PointerState::new();
        pointer.moved(Vec2::new(102.0, 101.0));

        for _ in 0..500 {
            integrate(&mut p, &pointer, &config, &mut rng());
        }
        assert_eq!(p.base, base);
        assert_eq!(p.home, base.truncate());
    }

    #[test]
    fn test_pointer_inside_radius_repels() {
        let config = EffectConfig::coin_2d();
        let mut p = particle_at(100.0, 100.0);
        let mut pointer = PointerState::new();
        pointer.moved(Vec2::new(110.0, 100.0));

        integrate(&mut p, &pointer, &config, &mut rng());

        // Pushed away along -x, not toward the pointer.
        assert!(p.position.x < 100.0);
        assert!(p.velocity.x < 0.0);
    }

    #[test]
    fn test_pointer_at_particle_is_degenerate_but_finite() {
        // Distance exactly zero: no repulsion direction, no NaN.
        let config = EffectConfig::coin_2d();
        let mut p = particle_at(100.0, 100.0);
        let mut pointer = PointerState::new();
        pointer.moved(Vec2::new(100.0, 100.0));

        integrate(&mut p, &pointer, &config, &mut rng());

        assert!(p.position.is_finite());
        assert!(p.velocity.is_finite());
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_beyond_radius_no_force() {
        let config = EffectConfig::coin_2d();
        let mut p = particle_at(100.0, 100.0);
        let mut pointer = PointerState::new();
        pointer.moved(Vec2::new(100.0 + config.repulsion_radius + 1.0, 100.0));

        integrate(&mut p, &pointer, &config, &mut rng());

        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_displacement_tracks_threshold_after_every_step() {
        let config = EffectConfig::coin_2d();
        let mut p = particle_at(200.0, 200.0);
        let mut pointer = PointerState::new();
        pointer.moved(Vec2::new(205.0, 200.0));

        let mut rng = rng();
        for _ in 0..200 {
            integrate(&mut p, &pointer, &config, &mut rng);
            let expected = p.distance_from_home() > config.displace_threshold;
            assert_eq!(p.displaced, expected);
        }
    }

    #[test]
    fn test_converges_to_home_with_far_pointer() {
        // Kicked particle settles back to home: spring-damped stable
        // equilibrium.
        let config = EffectConfig::coin_2d();
        let mut p = particle_at(100.0, 100.0);
        p.position += Vec2::new(50.0, -30.0);
        p.velocity = Vec2::new(12.0, 7.0);
        let pointer = PointerState::new();

        let mut rng = rng();
        for _ in 0..1000 {
            integrate(&mut p, &pointer, &config, &mut rng);
        }
        assert!(p.distance_from_home() < 1e-3);
        assert!(!p.displaced);
    }

    #[test]
    fn test_jitter_disabled_is_deterministic() {
        let config = EffectConfig::coin_2d();
        let mut pointer = PointerState::new();
        pointer.moved(Vec2::new(104.0, 98.0));

        let run = |seed: u64| {
            let mut p = particle_at(100.0, 100.0);
            let mut rng = SmallRng::seed_from_u64(seed);
            for _ in 0..50 {
                integrate(&mut p, &pointer, &config, &mut rng);
            }
            p.position
        };
        // With jitter disabled, the RNG is never consulted.
        assert_eq!(run(1), run(2));
    }

    #[test]
    fn test_organic_radius_scale_shrinks_influence() {
        let config = EffectConfig::coin_3d();
        let mut p = particle_at(100.0, 100.0);
        p.radius_scale = 0.25;
        let mut pointer = PointerState::new();
        // Inside the global radius, outside this particle's scaled radius.
        pointer.moved(Vec2::new(100.0 + config.repulsion_radius * 0.5, 100.0));

        integrate(&mut p, &pointer, &config, &mut rng());
        assert_eq!(p.velocity, Vec2::ZERO);
    }
}
