//! Visual configuration for effect rendering.
//!
//! Each effect carries a [`Palette`] of named colors, separate from the
//! physics constants that control how particles move. Palettes for the two
//! built-in coin effects are provided as constructors.

use glam::{Vec3, Vec4};
use rand::rngs::SmallRng;
use rand::Rng;

/// Named colors for one effect.
///
/// All colors are linear-ish RGB in `0.0..=1.0`. The grid line color carries
/// its own alpha because the depth preset draws it nearly transparent.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Opaque background fill, repainted every frame.
    pub background: Vec3,
    /// Faint backdrop grid lines (RGBA).
    pub grid_line: Vec4,
    /// Coin face pixels.
    pub face: Vec3,
    /// Shadow (flat preset) or back-face (depth preset) pixels.
    pub shadow: Vec3,
    /// Highlight arc pixels.
    pub highlight: Vec3,
    /// Currency symbol pixels.
    pub symbol: Vec3,
    /// Rim pixels filling the coin edge (depth preset only).
    pub rim: Vec3,
    /// Trail dust marks.
    pub trail: Vec3,
    /// Cross glyph for displaced particles (flat preset only; the depth
    /// preset samples a randomized hot color per particle instead).
    pub cross: Vec3,
}

impl Palette {
    /// Warm orange palette of the flat coin effect.
    pub fn coin_2d() -> Self {
        Self {
            background: rgb(0xffffff),
            grid_line: rgb(0xf2f2f2).extend(1.0),
            face: rgb(0xff884d),
            shadow: rgb(0xe05030),
            highlight: rgb(0xffccaa),
            symbol: rgb(0xffffff),
            rim: rgb(0xe05030),
            trail: rgb(0xff884d),
            cross: rgb(0xff4400),
        }
    }

    /// Official-orange palette of the depth coin effect.
    pub fn coin_3d() -> Self {
        Self {
            background: rgb(0xffffff),
            grid_line: Vec3::ZERO.extend(0.03),
            face: rgb(0xf7931a),
            shadow: rgb(0xd67d0f),
            highlight: rgb(0xf7931a),
            symbol: rgb(0xffffff),
            rim: rgb(0xb06305),
            trail: rgb(0xf7931a),
            // Depth debris is colored per particle; the cross only shows
            // when this palette is paired with a flat config.
            cross: rgb(0xf7931a),
        }
    }
}

/// Expand a `0xRRGGBB` literal into a color vector.
pub fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Sample a randomized "hot" debris color: hue 0-45 (red through yellow),
/// near-full saturation, lightness 40-80%.
pub fn debris_color(rng: &mut SmallRng) -> Vec3 {
    let hue = rng.gen_range(0.0..45.0);
    let sat = rng.gen_range(0.90..1.0);
    let light = rng.gen_range(0.40..0.80);
    hsl_to_rgb(hue, sat, light)
}

/// Convert HSL (hue in degrees, saturation/lightness in `0..=1`) to RGB.
pub fn hsl_to_rgb(hue: f32, sat: f32, light: f32) -> Vec3 {
    let c = (1.0 - (2.0 * light - 1.0).abs()) * sat;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = light - c / 2.0;
    Vec3::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_rgb_expansion() {
        let c = rgb(0xff8000);
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
        assert!(c.z.abs() < 1e-6);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((red - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);

        let green = hsl_to_rgb(120.0, 1.0, 0.5);
        assert!((green - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-5);

        // Zero saturation collapses to gray regardless of hue.
        let gray = hsl_to_rgb(200.0, 0.0, 0.5);
        assert!((gray - Vec3::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_debris_color_is_hot() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let c = debris_color(&mut rng);
            // Hue 0-45 at high saturation: red channel dominates blue.
            assert!(c.x > c.z);
            assert!((0.0..=1.0).contains(&c.x));
            assert!((0.0..=1.0).contains(&c.y));
            assert!((0.0..=1.0).contains(&c.z));
        }
    }

    #[test]
    fn test_seeded_debris_color_reproducible() {
        let a = debris_color(&mut SmallRng::seed_from_u64(42));
        let b = debris_color(&mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
