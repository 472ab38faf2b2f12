//! View rotation, perspective projection, and depth ordering.
//!
//! The depth variant rotates each particle's fixed 3D base coordinate by
//! smoothed pitch/yaw angles, perspective-projects it to a screen-space home
//! position, and keeps the view-space depth as the paint-order key. The
//! whole field is re-sorted every frame; at a few hundred particles the
//! O(n log n) re-sort is cheaper than any memoization would be worth.

use glam::{Vec2, Vec3};

/// Pitch/yaw view angles, each eased toward a pointer-derived target.
#[derive(Debug, Clone)]
pub struct ViewRotation {
    pub pitch: f32,
    pub yaw: f32,
    target_pitch: f32,
    target_yaw: f32,
    ease: f32,
}

impl ViewRotation {
    pub fn new(ease: f32) -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            target_pitch: 0.0,
            target_yaw: 0.0,
            ease,
        }
    }

    /// Derive new target angles from a pointer position: full tilt at the
    /// viewport edges, none at the center.
    pub fn retarget(&mut self, pointer: Vec2, viewport: Vec2, max_tilt: f32) {
        let center = viewport / 2.0;
        if center.x <= 0.0 || center.y <= 0.0 {
            return;
        }
        self.target_yaw = (pointer.x - center.x) / center.x * max_tilt;
        self.target_pitch = -((pointer.y - center.y) / center.y) * max_tilt;
    }

    /// Ease both angles toward their targets by the lerp factor.
    pub fn update(&mut self) {
        self.pitch += (self.target_pitch - self.pitch) * self.ease;
        self.yaw += (self.target_yaw - self.yaw) * self.ease;
    }
}

/// Result of projecting one base coordinate.
#[derive(Debug, Clone, Copy)]
pub struct Projected {
    /// Screen-space home position.
    pub home: Vec2,
    /// View-space depth; ascending order paints the frame correctly.
    pub depth: f32,
    /// Perspective size factor for the rendered quad.
    pub scale: f32,
}

/// Per-frame projector with the rotation trigonometry evaluated once.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    sin_pitch: f32,
    cos_pitch: f32,
    sin_yaw: f32,
    cos_yaw: f32,
    center: Vec2,
    focal: f32,
}

impl Projector {
    pub fn new(rotation: &ViewRotation, center: Vec2, focal: f32) -> Self {
        let (sin_pitch, cos_pitch) = rotation.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = rotation.yaw.sin_cos();
        Self {
            sin_pitch,
            cos_pitch,
            sin_yaw,
            cos_yaw,
            center,
            focal,
        }
    }

    /// Rotate `base` by yaw then pitch and perspective-divide.
    pub fn project(&self, base: Vec3) -> Projected {
        let x1 = base.x * self.cos_yaw - base.z * self.sin_yaw;
        let z1 = base.z * self.cos_yaw + base.x * self.sin_yaw;
        let y1 = base.y * self.cos_pitch - z1 * self.sin_pitch;
        let z2 = z1 * self.cos_pitch + base.y * self.sin_pitch;

        let scale = self.focal / (self.focal + z2);
        Projected {
            home: self.center + Vec2::new(x1, y1) * scale,
            depth: z2,
            scale,
        }
    }
}
