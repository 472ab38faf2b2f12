//! Particle field construction.
//!
//! A field is built in one pass from a classified silhouette and fully
//! replaces any previous field; a rebuild (viewport resize) is the only
//! operation that changes the particle population.

use crate::config::EffectConfig;
use crate::particle::Particle;
use crate::raster::{Material, Silhouette};
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;

/// A collection of point-mass particles, one (or several, in the depth
/// variant) per populated silhouette cell.
#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Build a field for the given viewport. Zero-sized viewports and empty
    /// silhouettes degrade to an empty field.
    pub fn build(
        silhouette: &Silhouette,
        config: &EffectConfig,
        viewport: Vec2,
        rng: &mut SmallRng,
    ) -> Self {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return Self::default();
        }
        match &config.depth {
            None => Self::build_flat(silhouette, config, viewport),
            Some(depth) => Self::build_layered(silhouette, config, viewport, depth.layer_spacing, rng),
        }
    }

    /// Flat variant: one particle per cell, homes centered on the viewport.
    fn build_flat(silhouette: &Silhouette, config: &EffectConfig, viewport: Vec2) -> Self {
        let spacing = config.grid_spacing;
        let dims = Vec2::new(silhouette.cols() as f32, silhouette.rows() as f32);
        let start = (viewport - dims * spacing) / 2.0;
        let palette = &config.palette;

        let particles = silhouette
            .iter()
            .map(|(x, y, material)| {
                let pos = start + Vec2::new(x as f32, y as f32) * spacing;
                let color = match material {
                    Material::Face => palette.face,
                    Material::Shadow => palette.shadow,
                    Material::Highlight => palette.highlight,
                    Material::Symbol => palette.symbol,
                };
                Particle::uniform(pos.extend(0.0), material, color, palette.cross)
            })
            .collect();

        Self { particles }
    }

    /// Depth variant: symbol cells get one raised particle, other cells a
    /// front and a back face particle, and boundary cells three rim
    /// particles spanning the depth range to fake coin thickness. Bases are
    /// centered on the origin; screen positions start at viewport center so
    /// the first projected frame blooms outward.
    fn build_layered(
        silhouette: &Silhouette,
        config: &EffectConfig,
        viewport: Vec2,
        layer_spacing: f32,
        rng: &mut SmallRng,
    ) -> Self {
        let spacing = config.grid_spacing;
        let dims = Vec2::new(silhouette.cols() as f32, silhouette.rows() as f32);
        let start = -dims * spacing / 2.0;
        let center = viewport / 2.0;
        let palette = &config.palette;

        let mut particles = Vec::new();
        let mut push = |base: Vec3, material: Material, color: Vec3, rng: &mut SmallRng| {
            let mut p = Particle::organic(base, material, color, rng);
            p.position = base.truncate() + center;
            p.home = p.position;
            particles.push(p);
        };

        for (x, y, material) in silhouette.iter() {
            let cell = start + Vec2::new(x as f32, y as f32) * spacing;
            if material == Material::Symbol {
                push(cell.extend(layer_spacing * 3.0), material, palette.symbol, rng);
            } else {
                push(cell.extend(layer_spacing * 2.0), material, palette.face, rng);
                push(cell.extend(-layer_spacing * 2.0), material, palette.shadow, rng);
            }
            if silhouette.is_edge(x, y) {
                for z in -1..=1 {
                    push(
                        cell.extend(z as f32 * layer_spacing),
                        material,
                        palette.rim,
                        rng,
                    );
                }
            }
        }

        Self { particles }
    }

    /// Stable sort by ascending view depth, re-run every frame in the depth
    /// variant before rendering.
    pub fn sort_by_depth(&mut self) {
        self.particles.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
