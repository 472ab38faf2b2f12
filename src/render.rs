//! Frame flattening.
//!
//! The CPU side of the renderer turns the current simulation state into a
//! flat list of [`QuadInstance`] records: backdrop grid lines, one square
//! per settled particle, a cross or debris glyph per displaced particle,
//! and a fading square per live trail particle. The GPU side draws the
//! whole list with a single instanced pipeline; an empty list is a valid
//! frame (clean background).

use crate::config::EffectConfig;
use crate::field::ParticleField;
use crate::particle::Particle;
use crate::trail::TrailPool;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};
use std::f32::consts::FRAC_PI_4;

/// One rotated, colored quad in screen space.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct QuadInstance {
    pub center: [f32; 2],
    pub half_size: [f32; 2],
    pub rotation: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl QuadInstance {
    fn new(center: Vec2, half_size: Vec2, rotation: f32, color: Vec4) -> Self {
        Self {
            center: center.to_array(),
            half_size: half_size.to_array(),
            rotation,
            _pad: 0.0,
            color: color.to_array(),
        }
    }

    fn square(center: Vec2, size: f32, color: Vec4) -> Self {
        Self::new(center, Vec2::splat(size / 2.0), 0.0, color)
    }
}

/// Flatten one frame into quads, in paint order.
pub fn frame_instances(
    field: &ParticleField,
    trails: &TrailPool,
    config: &EffectConfig,
    viewport: Vec2,
) -> Vec<QuadInstance> {
    let mut out = Vec::with_capacity(field.len() + trails.len() + 64);
    grid_instances(viewport, config, &mut out);
    for particle in field.particles() {
        particle_instances(particle, config, &mut out);
    }
    trail_instances(trails, config, &mut out);
    out
}

/// Faint full-viewport grid lines, drawn first so everything paints over
/// them.
fn grid_instances(viewport: Vec2, config: &EffectConfig, out: &mut Vec<QuadInstance>) {
    let spacing = config.grid_line_spacing;
    if spacing <= 0.0 || viewport.x <= 0.0 || viewport.y <= 0.0 {
        return;
    }
    let color = config.palette.grid_line;
    let mut x = 0.0;
    while x <= viewport.x {
        out.push(QuadInstance::new(
            Vec2::new(x, viewport.y / 2.0),
            Vec2::new(0.5, viewport.y / 2.0),
            0.0,
            color,
        ));
        x += spacing;
    }
    let mut y = 0.0;
    while y <= viewport.y {
        out.push(QuadInstance::new(
            Vec2::new(viewport.x / 2.0, y),
            Vec2::new(viewport.x / 2.0, 0.5),
            0.0,
            color,
        ));
        y += spacing;
    }
}

/// One settled particle is a filled square; a displaced one becomes a cross
/// (flat variant) or a five-bit debris glyph rotated to its velocity
/// heading (depth variant).
fn particle_instances(particle: &Particle, config: &EffectConfig, out: &mut Vec<QuadInstance>) {
    let size = (config.pixel_size * particle.scale).max(0.1);

    if !particle.displaced {
        out.push(QuadInstance::square(
            particle.position,
            size,
            particle.color.extend(1.0),
        ));
        return;
    }

    if config.has_depth() {
        // Pixelated debris: center bit plus four corner bits, rotated to
        // the velocity heading, in the particle's randomized hot color.
        let arm = size * 0.6 * particle.debris_scale;
        let bit = arm * 0.5;
        let rotation = particle.velocity.y.atan2(particle.velocity.x);
        let color = particle.debris_color.extend(1.0);
        let spin = Vec2::from_angle(rotation);
        for offset in [
            Vec2::ZERO,
            Vec2::new(-arm, -arm),
            Vec2::new(arm, -arm),
            Vec2::new(-arm, arm),
            Vec2::new(arm, arm),
        ] {
            out.push(QuadInstance::new(
                particle.position + spin.rotate(offset),
                Vec2::splat(bit / 2.0),
                rotation,
                color,
            ));
        }
    } else {
        // Fixed-color X: two thin bars at +-45 degrees.
        let arm = 3.0;
        let half_length = arm * std::f32::consts::SQRT_2;
        let half_width = 0.75;
        let color = particle.debris_color.extend(1.0);
        for rotation in [FRAC_PI_4, -FRAC_PI_4] {
            out.push(QuadInstance::new(
                particle.position,
                Vec2::new(half_length, half_width),
                rotation,
                color,
            ));
        }
    }
}

/// Trail dust: small squares with alpha driven by remaining life.
fn trail_instances(trails: &TrailPool, config: &EffectConfig, out: &mut Vec<QuadInstance>) {
    let color = config.palette.trail;
    for p in trails.particles() {
        out.push(QuadInstance::square(
            p.position,
            p.size,
            color.extend(p.life.clamp(0.0, 1.0)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{Material, Silhouette};
    use glam::Vec3;
    use image::{Rgba, RgbaImage};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn grid_count(viewport: Vec2, spacing: f32) -> usize {
        ((viewport.x / spacing).floor() + (viewport.y / spacing).floor() + 2.0) as usize
    }

    #[test]
    fn test_empty_field_renders_grid_only() {
        let config = EffectConfig::coin_2d();
        let viewport = Vec2::new(200.0, 100.0);
        let instances = frame_instances(
            &ParticleField::default(),
            &TrailPool::new(),
            &config,
            viewport,
        );
        assert_eq!(instances.len(), grid_count(viewport, config.grid_line_spacing));
    }

    #[test]
    fn test_settled_particle_is_one_square() {
        let mut config = EffectConfig::coin_2d();
        config.grid_line_spacing = 0.0;
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([0, 255, 0, 255]));
        let silhouette = Silhouette::from_image(&image);
        let mut rng = SmallRng::seed_from_u64(1);
        let field = ParticleField::build(&silhouette, &config, Vec2::new(100.0, 100.0), &mut rng);

        let instances = frame_instances(&field, &TrailPool::new(), &config, Vec2::new(100.0, 100.0));
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].half_size, [config.pixel_size / 2.0; 2]);
        assert_eq!(instances[0].color[3], 1.0);
    }

    #[test]
    fn test_displaced_particle_flat_cross() {
        let mut config = EffectConfig::coin_2d();
        config.grid_line_spacing = 0.0;
        let mut p = Particle::uniform(Vec3::new(50.0, 50.0, 0.0), Material::Face, Vec3::ONE, Vec3::X);
        p.displaced = true;

        let mut out = Vec::new();
        particle_instances(&p, &config, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].rotation, FRAC_PI_4);
        assert_eq!(out[1].rotation, -FRAC_PI_4);
        // Flat debris uses the fixed cross color carried by the particle.
        assert_eq!(out[0].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_displaced_particle_depth_debris() {
        let config = EffectConfig::coin_3d();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut p = Particle::organic(Vec3::ZERO, Material::Face, Vec3::ONE, &mut rng);
        p.position = Vec2::new(50.0, 50.0);
        p.velocity = Vec2::new(1.0, 0.0);
        p.displaced = true;

        let mut out = Vec::new();
        particle_instances(&p, &config, &mut out);
        assert_eq!(out.len(), 5);
        let debris = p.debris_color.extend(1.0).to_array();
        assert!(out.iter().all(|i| i.color == debris));
        // First bit sits at the particle center.
        assert_eq!(out[0].center, [50.0, 50.0]);
    }

    #[test]
    fn test_trail_alpha_is_life() {
        let mut config = EffectConfig::coin_2d();
        config.grid_line_spacing = 0.0;
        config.trail_spawn_chance = 1.0;
        let mut rng = SmallRng::seed_from_u64(1);
        let mut trails = TrailPool::new();
        trails.spawn(Vec2::new(10.0, 10.0), &config, &mut rng);
        trails.update(&config);

        let instances = frame_instances(&ParticleField::default(), &trails, &config, Vec2::ZERO);
        assert_eq!(instances.len(), 1);
        let expected = 1.0 - config.trail_decay;
        assert!((instances[0].color[3] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_perspective_scale_floors_at_minimum() {
        let config = EffectConfig::coin_3d();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut p = Particle::organic(Vec3::ZERO, Material::Face, Vec3::ONE, &mut rng);
        p.scale = 0.0;

        let mut out = Vec::new();
        particle_instances(&p, &config, &mut out);
        assert_eq!(out[0].half_size, [0.05; 2]);
    }
}
