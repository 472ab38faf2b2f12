//! Particle data model.
//!
//! Each particle represents one rasterized pixel of the target shape. The
//! base coordinate is fixed at field-construction time and never changes;
//! everything else is per-frame kinetic state.

use crate::raster::Material;
use crate::visuals;
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::Rng;

/// A simulated point mass anchored to one silhouette cell.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Fixed origin in world space (z = 0 in the flat variant). Immutable
    /// for the particle's lifetime.
    pub base: Vec3,
    /// Resting target in screen space. Static in the flat variant; rewritten
    /// every frame by the projection stage in the depth variant.
    pub home: Vec2,
    /// Current screen position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Material classification from the rasterizer.
    pub material: Material,
    /// Resolved fill color.
    pub color: Vec3,
    /// True when far enough from home to render as debris. Derived state,
    /// recomputed after every integration step.
    pub displaced: bool,
    /// View-space depth, used only for paint ordering in the depth variant.
    pub depth: f32,
    /// Perspective size factor (1.0 in the flat variant).
    pub scale: f32,
    /// Small per-particle bias on the spring coefficient.
    pub noise: f32,
    /// Randomized debris size factor (0.5 - 1.2).
    pub debris_scale: f32,
    /// Randomized hot debris color.
    pub debris_color: Vec3,
    /// Individual multiplier on the repulsion radius. Varying this per
    /// particle keeps the repulsion void jagged instead of circular.
    pub radius_scale: f32,
}

impl Particle {
    /// A particle with no per-particle randomness, used by the flat variant.
    /// Debris renders with the fixed `cross` color.
    pub fn uniform(base: Vec3, material: Material, color: Vec3, cross: Vec3) -> Self {
        Self {
            base,
            home: base.truncate(),
            position: base.truncate(),
            velocity: Vec2::ZERO,
            material,
            color,
            displaced: false,
            depth: 0.0,
            scale: 1.0,
            noise: 0.0,
            debris_scale: 1.0,
            debris_color: cross,
            radius_scale: 1.0,
        }
    }

    /// A particle with construction-time randomized constants, used by the
    /// depth variant. Identical update code then produces non-uniform,
    /// organic-looking group behavior.
    pub fn organic(base: Vec3, material: Material, color: Vec3, rng: &mut SmallRng) -> Self {
        Self {
            base,
            home: base.truncate(),
            position: base.truncate(),
            velocity: Vec2::ZERO,
            material,
            color,
            displaced: false,
            depth: 0.0,
            scale: 1.0,
            noise: rng.gen_range(0.0..0.2),
            debris_scale: rng.gen_range(0.5..1.2),
            debris_color: visuals::debris_color(rng),
            radius_scale: rng.gen_range(0.25..1.4),
        }
    }

    /// Distance from the current position to home.
    pub fn distance_from_home(&self) -> f32 {
        self.position.distance(self.home)
    }
}

/// Ephemeral dust mark spawned on pointer movement.
#[derive(Debug, Clone)]
pub struct TrailParticle {
    /// Fixed at creation, jittered from the pointer coordinate.
    pub position: Vec2,
    /// Rendered side length in pixels.
    pub size: f32,
    /// Remaining life in `(0, 1]`; drives render alpha.
    pub life: f32,
}
