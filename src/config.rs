//! Effect constants.
//!
//! Every effect is a static set of named numeric constants plus a palette;
//! nothing here mutates at runtime. The two built-in presets reproduce the
//! tuning of the flat and volumetric coin effects.

use crate::visuals::Palette;

/// Extra constants for the depth (3D) variant. When present, particle homes
/// are re-projected every frame and the field is depth-sorted before
/// rendering.
#[derive(Debug, Clone)]
pub struct DepthConfig {
    /// Distance between Z layers, in world units.
    pub layer_spacing: f32,
    /// Perspective focal length for the projection divide.
    pub perspective: f32,
    /// Lerp factor easing pitch/yaw toward their targets each frame.
    pub rotation_ease: f32,
    /// Maximum tilt (radians-ish scalar) reached at the viewport edge.
    pub max_tilt: f32,
}

/// All tunables for one effect.
#[derive(Debug, Clone)]
pub struct EffectConfig {
    /// Side length of a rendered particle square, in pixels.
    pub pixel_size: f32,
    /// Distance between neighboring grid cells, in pixels.
    pub grid_spacing: f32,
    /// Base radius of pointer influence, in pixels. Scaled per particle by
    /// its interaction scalar in the depth preset.
    pub repulsion_radius: f32,
    /// Peak repulsion force at zero distance.
    pub repulsion_strength: f32,
    /// Falloff exponent: 2.0 gives a calm wide push, 1.5 a sharper
    /// near-field spike.
    pub repulsion_exponent: f32,
    /// Uniform angular jitter (radians) added to the repulsion direction;
    /// zero disables jitter entirely.
    pub repulsion_jitter: f32,
    /// Spring coefficient pulling a particle back to its home position.
    pub return_speed: f32,
    /// Velocity damping factor applied every frame, after force
    /// accumulation.
    pub friction: f32,
    /// Distance from home beyond which a particle renders as debris.
    pub displace_threshold: f32,
    /// Life removed from each trail particle per frame.
    pub trail_decay: f32,
    /// Probability of spawning a trail particle per pointer-move event.
    pub trail_spawn_chance: f32,
    /// Position jitter applied to newly spawned trail particles, in pixels.
    pub trail_jitter: f32,
    /// Maximum randomized extra size of a trail particle, in pixels.
    pub trail_size: f32,
    /// Per-frame multiplier shrinking trail particles (1.0 = no shrink).
    pub trail_shrink: f32,
    /// Spacing of the backdrop grid lines, in pixels.
    pub grid_line_spacing: f32,
    /// Effect colors.
    pub palette: Palette,
    /// Depth-variant constants; `None` selects the flat variant.
    pub depth: Option<DepthConfig>,
}

impl EffectConfig {
    /// Flat coin preset: wide soft repulsion, quick trail fade.
    pub fn coin_2d() -> Self {
        Self {
            pixel_size: 8.0,
            grid_spacing: 10.0,
            repulsion_radius: 70.0,
            repulsion_strength: 15.0,
            repulsion_exponent: 2.0,
            repulsion_jitter: 0.0,
            return_speed: 0.08,
            friction: 0.82,
            displace_threshold: 4.0,
            trail_decay: 0.08,
            trail_spawn_chance: 0.5,
            trail_jitter: 3.0,
            trail_size: 2.0,
            trail_shrink: 1.0,
            grid_line_spacing: 20.0,
            palette: Palette::coin_2d(),
            depth: None,
        }
    }

    /// Volumetric coin preset: tight strong repulsion with scatter jitter,
    /// layered depth and eased rotation.
    pub fn coin_3d() -> Self {
        Self {
            pixel_size: 10.0,
            grid_spacing: 11.0,
            repulsion_radius: 60.0,
            repulsion_strength: 80.0,
            repulsion_exponent: 1.5,
            repulsion_jitter: 0.25,
            return_speed: 0.08,
            friction: 0.86,
            displace_threshold: 5.0,
            trail_decay: 0.05,
            trail_spawn_chance: 0.6,
            trail_jitter: 5.0,
            trail_size: 3.0,
            trail_shrink: 0.95,
            grid_line_spacing: 40.0,
            palette: Palette::coin_3d(),
            depth: Some(DepthConfig {
                layer_spacing: 9.0,
                perspective: 1000.0,
                rotation_ease: 0.08,
                max_tilt: 0.6,
            }),
        }
    }

    /// Whether this effect runs the projection and depth-sort stage.
    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }
}
