//! # pixelfield
//!
//! Cursor-reactive pixel particle effects: a shape silhouette is rasterized
//! into a grid of point-mass particles that flee the pointer, spring back
//! to their home positions, and shatter into debris glyphs when displaced.
//! The depth variant adds layered 3D bases, pointer-driven rotation, and
//! painter's-algorithm depth sorting.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pixelfield::prelude::*;
//!
//! fn main() -> Result<(), EffectError> {
//!     pixelfield::run(Silhouette::coin_3d(), EffectConfig::coin_3d(), 42)
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Silhouettes
//!
//! A [`Silhouette`] is a low-resolution classified bitmap: one rasterization
//! pass over a marker-channel stencil yields a multi-material grid (face,
//! shadow, highlight, symbol). Built-in coin stencils are provided; any
//! RGBA image following the marker convention loads via
//! [`Silhouette::from_path`].
//!
//! ### The simulation step
//!
//! [`Effect::step`] advances every particle through a fixed stage order:
//! pointer repulsion with non-linear falloff, spring return toward home,
//! velocity damping, Euler integration, and displacement classification.
//! The pointer is a plain value passed into each step, so runs are
//! deterministic for a fixed seed and input sequence.
//!
//! ### Rendering
//!
//! Each frame flattens into a list of colored, rotated quads drawn by one
//! instanced pipeline over an opaque clear. There is no accumulation
//! buffer; the background repaints every frame.

pub mod app;
pub mod config;
pub mod effect;
pub mod error;
pub mod field;
pub mod gpu;
pub mod particle;
pub mod physics;
pub mod projection;
pub mod raster;
pub mod render;
pub mod shader;
pub mod time;
pub mod trail;
pub mod visuals;

pub use app::run;
pub use config::{DepthConfig, EffectConfig};
pub use effect::Effect;
pub use error::{EffectError, GpuError, SilhouetteError};
pub use field::ParticleField;
pub use glam::{Vec2, Vec3};
pub use particle::{Particle, TrailParticle};
pub use physics::PointerState;
pub use raster::{Material, Silhouette, Stencil};
pub use visuals::Palette;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use pixelfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{run, run_titled};
    pub use crate::config::{DepthConfig, EffectConfig};
    pub use crate::effect::Effect;
    pub use crate::error::{EffectError, GpuError, SilhouetteError};
    pub use crate::field::ParticleField;
    pub use crate::physics::PointerState;
    pub use crate::raster::{Material, Silhouette, Stencil};
    pub use crate::time::Time;
    pub use crate::visuals::Palette;
    pub use crate::{Vec2, Vec3};
}
