//! Effect orchestration.
//!
//! [`Effect`] owns all per-session state: the particle field, the trail
//! pool, the view rotation, the config, and the seeded RNG. The host loop
//! feeds it pointer events and calls [`Effect::step`] once per frame;
//! everything in between is synchronous CPU math.

use crate::config::EffectConfig;
use crate::field::ParticleField;
use crate::physics::{self, PointerState};
use crate::projection::{Projector, ViewRotation};
use crate::raster::Silhouette;
use crate::render::{self, QuadInstance};
use crate::trail::TrailPool;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// One running effect instance.
pub struct Effect {
    config: EffectConfig,
    silhouette: Silhouette,
    field: ParticleField,
    trails: TrailPool,
    rotation: Option<ViewRotation>,
    viewport: Vec2,
    rng: SmallRng,
}

impl Effect {
    /// Build an effect for the given viewport. The seed drives every
    /// randomized constant, so equal seeds reproduce exact fields.
    pub fn new(silhouette: Silhouette, config: EffectConfig, viewport: Vec2, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let field = ParticleField::build(&silhouette, &config, viewport, &mut rng);
        let rotation = config
            .depth
            .as_ref()
            .map(|d| ViewRotation::new(d.rotation_ease));
        Self {
            config,
            silhouette,
            field,
            trails: TrailPool::new(),
            rotation,
            viewport,
            rng,
        }
    }

    /// Rebuild the field for a new viewport. The fresh field is built
    /// completely before the old one is dropped, so no frame ever observes
    /// a partially rebuilt population.
    pub fn rebuild(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        let field = ParticleField::build(&self.silhouette, &self.config, viewport, &mut self.rng);
        self.field = field;
    }

    /// Record a pointer movement: maybe spawn a trail particle and, in the
    /// depth variant, retarget the view rotation.
    pub fn pointer_moved(&mut self, pointer: &PointerState) {
        self.trails
            .spawn(pointer.position, &self.config, &mut self.rng);
        if let (Some(rotation), Some(depth)) = (&mut self.rotation, &self.config.depth) {
            rotation.retarget(pointer.position, self.viewport, depth.max_tilt);
        }
    }

    /// Advance the simulation by one frame.
    ///
    /// Stage order: rotation easing, projection and depth sort (depth
    /// variant only), force integration per particle, trail decay and
    /// compaction.
    pub fn step(&mut self, pointer: &PointerState) {
        if let (Some(rotation), Some(depth)) = (&mut self.rotation, &self.config.depth) {
            rotation.update();
            let projector = Projector::new(rotation, self.viewport / 2.0, depth.perspective);
            for p in self.field.particles_mut() {
                let projected = projector.project(p.base);
                p.home = projected.home;
                p.depth = projected.depth;
                p.scale = projected.scale;
            }
            self.field.sort_by_depth();
        }

        for p in self.field.particles_mut() {
            physics::integrate(p, pointer, &self.config, &mut self.rng);
        }

        self.trails.update(&self.config);
    }

    /// Flatten the current state into render quads.
    pub fn instances(&self) -> Vec<QuadInstance> {
        render::frame_instances(&self.field, &self.trails, &self.config, self.viewport)
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn trails(&self) -> &TrailPool {
        &self.trails
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }
}
