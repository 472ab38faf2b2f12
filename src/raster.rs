//! Silhouette rasterization.
//!
//! A coin shape is drawn once into a low-resolution offscreen bitmap using
//! pure color channels as layer markers (red = shadow, green = face,
//! red+green = highlight, blue = symbol). One read-back pass then classifies
//! every sufficiently opaque pixel into a [`Material`], so a single
//! rasterization produces a multi-material particle field without any vector
//! geometry surviving past this stage.
//!
//! This stage is fully deterministic: the same stencil at the same
//! resolution always yields the same silhouette.

use crate::error::SilhouetteError;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Classification threshold for the alpha channel (0-255).
const ALPHA_THRESHOLD: u8 = 100;

/// Classification threshold for each color channel (0-255).
const CHANNEL_THRESHOLD: u8 = 100;

/// Material layer a populated cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Main coin face.
    Face,
    /// Drop shadow / depth edge.
    Shadow,
    /// Bright highlight arc.
    Highlight,
    /// Currency symbol.
    Symbol,
}

impl Material {
    /// Marker color written into the stencil for this material.
    fn marker(self) -> Rgba<u8> {
        match self {
            Material::Shadow => Rgba([255, 0, 0, 255]),
            Material::Face => Rgba([0, 255, 0, 255]),
            Material::Highlight => Rgba([255, 255, 0, 255]),
            Material::Symbol => Rgba([0, 0, 255, 255]),
        }
    }
}

/// Classify one RGBA pixel into a material.
///
/// Returns `None` for transparent pixels. Channel priority is fixed:
/// blue wins over the red+green highlight combination, which wins over
/// plain green (face), which wins over plain red (shadow). Later draw
/// calls into the stencil overwrite earlier ones, so priority only
/// matters for blended or hand-authored images.
pub fn classify(pixel: Rgba<u8>) -> Option<Material> {
    let [r, g, b, a] = pixel.0;
    if a <= ALPHA_THRESHOLD {
        return None;
    }
    if b > CHANNEL_THRESHOLD {
        Some(Material::Symbol)
    } else if r > CHANNEL_THRESHOLD && g > CHANNEL_THRESHOLD {
        Some(Material::Highlight)
    } else if g > CHANNEL_THRESHOLD {
        Some(Material::Face)
    } else if r > CHANNEL_THRESHOLD {
        Some(Material::Shadow)
    } else {
        None
    }
}

/// Low-resolution offscreen canvas holding material markers.
pub struct Stencil {
    image: RgbaImage,
}

impl Stencil {
    /// Create a fully transparent stencil of the given grid resolution.
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            image: RgbaImage::new(cols, rows),
        }
    }

    fn plot(&mut self, x: i32, y: i32, material: Material) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, material.marker());
        }
    }

    /// Fill a tilted ellipse centered at `(cx, cy)` with radii `(rx, ry)`,
    /// rotated by `tilt` radians.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, tilt: f32, material: Material) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let extent = rx.max(ry).ceil() as i32 + 1;
        let (sin, cos) = tilt.sin_cos();
        for dy in -extent..=extent {
            for dx in -extent..=extent {
                let px = dx as f32;
                let py = dy as f32;
                // Inverse-rotate into the ellipse frame.
                let ex = px * cos + py * sin;
                let ey = -px * sin + py * cos;
                if (ex / rx).powi(2) + (ey / ry).powi(2) <= 1.0 {
                    self.plot((cx + px).round() as i32, (cy + py).round() as i32, material);
                }
            }
        }
    }

    /// Stroke an elliptical arc from parameter angle `a0` to `a1` with the
    /// given stroke width, on a tilted ellipse like [`Self::fill_ellipse`].
    pub fn stroke_arc(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        tilt: f32,
        a0: f32,
        a1: f32,
        width: f32,
        material: Material,
    ) {
        let (sin, cos) = tilt.sin_cos();
        let half = (width / 2.0).max(0.5);
        let steps = (((a1 - a0).abs() * rx.max(ry)) as usize).max(8);
        for i in 0..=steps {
            let t = a0 + (a1 - a0) * i as f32 / steps as f32;
            let ex = rx * t.cos();
            let ey = ry * t.sin();
            let px = cx + ex * cos - ey * sin;
            let py = cy + ex * sin + ey * cos;
            // Dab a small disc at each sample to honor the stroke width.
            let r = half.ceil() as i32;
            for dy in -r..=r {
                for dx in -r..=r {
                    if (dx * dx + dy * dy) as f32 <= half * half + 0.25 {
                        self.plot(px.round() as i32 + dx, py.round() as i32 + dy, material);
                    }
                }
            }
        }
    }

    /// Stamp a bitmap glyph mask centered at `(cx, cy)`, scaled and rotated.
    ///
    /// The mask is a slice of rows where `'#'` marks a filled cell. Stamping
    /// inverse-maps every stencil pixel in the glyph's bounding box back into
    /// mask space, so rotated stamps have no holes.
    pub fn stamp_glyph(
        &mut self,
        mask: &[&str],
        cx: f32,
        cy: f32,
        scale: f32,
        angle: f32,
        material: Material,
    ) {
        let mask_h = mask.len();
        let mask_w = mask.iter().map(|row| row.len()).max().unwrap_or(0);
        if mask_h == 0 || mask_w == 0 || scale <= 0.0 {
            return;
        }
        let half_w = mask_w as f32 / 2.0;
        let half_h = mask_h as f32 / 2.0;
        let extent = ((half_w.max(half_h) * scale) * 1.5).ceil() as i32 + 1;
        let (sin, cos) = angle.sin_cos();
        for dy in -extent..=extent {
            for dx in -extent..=extent {
                let px = dx as f32;
                let py = dy as f32;
                // Inverse-rotate, then inverse-scale into mask space.
                let mx = (px * cos + py * sin) / scale + half_w;
                let my = (-px * sin + py * cos) / scale + half_h;
                if mx < 0.0 || my < 0.0 {
                    continue;
                }
                let (mx, my) = (mx as usize, my as usize);
                if my < mask_h && mask[my].as_bytes().get(mx) == Some(&b'#') {
                    self.plot((cx + px).round() as i32, (cy + py).round() as i32, material);
                }
            }
        }
    }

    /// Consume the stencil and classify it into a silhouette.
    pub fn into_silhouette(self) -> Silhouette {
        Silhouette::from_image(&self.image)
    }
}

/// Blocky bitcoin glyph: a bold "B" with the two bar strokes punched
/// through top and bottom, sized for a roughly 44-cell stencil.
const BITCOIN_GLYPH: &[&str] = &[
    "   ##  ##  ",
    "   ##  ##  ",
    " ######### ",
    " ##########",
    " ##     ###",
    " ##      ##",
    " ##     ###",
    " ######### ",
    " ######### ",
    " ##     ###",
    " ##      ##",
    " ##      ##",
    " ##     ###",
    " ##########",
    " ######### ",
    "   ##  ##  ",
    "   ##  ##  ",
];

/// A classified grid of materials, one cell per stencil pixel.
#[derive(Debug, Clone)]
pub struct Silhouette {
    cols: u32,
    rows: u32,
    cells: Vec<Option<Material>>,
}

impl Silhouette {
    /// Classify an RGBA image into a silhouette, one cell per pixel.
    pub fn from_image(image: &RgbaImage) -> Self {
        let (cols, rows) = image.dimensions();
        let cells = image.pixels().map(|p| classify(*p)).collect();
        Self { cols, rows, cells }
    }

    /// Load and classify a silhouette image from disk.
    ///
    /// The image is expected to use the same channel-marker convention as
    /// the built-in stencils.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SilhouetteError> {
        let image = image::open(path.as_ref())?.into_rgba8();
        Ok(Self::from_image(&image))
    }

    /// The flat coin: tilted shadow and face ellipses, a highlight arc on
    /// the upper-left rim, and the rotated currency symbol.
    pub fn coin_2d() -> Self {
        let (cols, rows) = (44u32, 44u32);
        let cx = cols as f32 / 2.0;
        let cy = rows as f32 / 2.0;
        let tilt = std::f32::consts::FRAC_PI_4;

        let mut stencil = Stencil::new(cols, rows);
        // Depth shadow sits down-right of the face.
        stencil.fill_ellipse(cx + 2.0, cy + 2.0, 16.0, 14.0, tilt, Material::Shadow);
        stencil.fill_ellipse(cx - 1.0, cy - 1.0, 16.0, 14.0, tilt, Material::Face);
        stencil.stroke_arc(cx - 1.0, cy - 1.0, 14.0, 12.0, tilt, 3.2, 4.7, 2.0, Material::Highlight);
        stencil.stamp_glyph(
            BITCOIN_GLYPH,
            cx - 1.0,
            cy,
            1.0,
            std::f32::consts::FRAC_PI_8,
            Material::Symbol,
        );
        stencil.into_silhouette()
    }

    /// The volumetric coin: a plain disc plus the upright currency symbol.
    /// Depth layers and the rim are added at field-construction time.
    pub fn coin_3d() -> Self {
        let (cols, rows) = (46u32, 46u32);
        let cx = cols as f32 / 2.0;
        let cy = rows as f32 / 2.0;

        let mut stencil = Stencil::new(cols, rows);
        stencil.fill_ellipse(cx, cy, 19.0, 19.0, 0.0, Material::Face);
        stencil.stamp_glyph(BITCOIN_GLYPH, cx, cy + 2.0, 1.15, 0.0, Material::Symbol);
        stencil.into_silhouette()
    }

    /// Grid width in cells.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Grid height in cells.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Material of the cell at `(x, y)`, if populated.
    pub fn material(&self, x: u32, y: u32) -> Option<Material> {
        if x < self.cols && y < self.rows {
            self.cells[(y * self.cols + x) as usize]
        } else {
            None
        }
    }

    /// Whether the cell at `(x, y)` is populated. Out-of-bounds cells count
    /// as unpopulated.
    pub fn populated(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.material(x as u32, y as u32).is_some()
    }

    /// A populated cell is a boundary cell when any of its four orthogonal
    /// neighbors is unpopulated.
    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        let (x, y) = (x as i64, y as i64);
        !self.populated(x + 1, y)
            || !self.populated(x - 1, y)
            || !self.populated(x, y + 1)
            || !self.populated(x, y - 1)
    }

    /// Iterate populated cells as `(x, y, material)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, Material)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|m| (i as u32 % cols, i as u32 / cols, m)))
    }

    /// Number of populated cells.
    pub fn populated_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// True when no cell classified as opaque.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        // Blue wins over everything.
        assert_eq!(classify(Rgba([255, 255, 255, 255])), Some(Material::Symbol));
        assert_eq!(classify(Rgba([255, 255, 0, 255])), Some(Material::Highlight));
        assert_eq!(classify(Rgba([0, 255, 0, 255])), Some(Material::Face));
        assert_eq!(classify(Rgba([255, 0, 0, 255])), Some(Material::Shadow));
        // Transparent or channel-less pixels are unpopulated.
        assert_eq!(classify(Rgba([255, 0, 0, 100])), None);
        assert_eq!(classify(Rgba([0, 0, 0, 255])), None);
    }

    #[test]
    fn test_single_green_pixel_scenario() {
        // A 4x4 bitmap with one fully opaque pure-green pixel at (1, 1)
        // classifies to exactly one Face cell at that grid position.
        let mut image = RgbaImage::new(4, 4);
        image.put_pixel(1, 1, Rgba([0, 255, 0, 255]));
        let silhouette = Silhouette::from_image(&image);

        assert_eq!(silhouette.populated_count(), 1);
        assert_eq!(silhouette.material(1, 1), Some(Material::Face));
        let cells: Vec<_> = silhouette.iter().collect();
        assert_eq!(cells, vec![(1, 1, Material::Face)]);
    }

    #[test]
    fn test_empty_image_yields_empty_silhouette() {
        let silhouette = Silhouette::from_image(&RgbaImage::new(8, 8));
        assert!(silhouette.is_empty());
        assert_eq!(silhouette.populated_count(), 0);
    }

    #[test]
    fn test_edge_detection() {
        // A lone pixel is its own edge; interior of a 3x3 block is not.
        let mut image = RgbaImage::new(5, 5);
        for y in 1..4 {
            for x in 1..4 {
                image.put_pixel(x, y, Rgba([0, 255, 0, 255]));
            }
        }
        let silhouette = Silhouette::from_image(&image);
        assert!(!silhouette.is_edge(2, 2));
        assert!(silhouette.is_edge(1, 1));
        assert!(silhouette.is_edge(3, 2));
    }

    #[test]
    fn test_edge_at_bitmap_border() {
        // A populated cell on the bitmap border has an out-of-bounds
        // neighbor, which counts as unpopulated.
        let mut image = RgbaImage::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                image.put_pixel(x, y, Rgba([0, 255, 0, 255]));
            }
        }
        let silhouette = Silhouette::from_image(&image);
        assert!(silhouette.is_edge(0, 1));
        assert!(!silhouette.is_edge(1, 1));
    }

    #[test]
    fn test_coin_2d_has_all_materials() {
        let coin = Silhouette::coin_2d();
        assert!(!coin.is_empty());
        let has = |m: Material| coin.iter().any(|(_, _, cell)| cell == m);
        assert!(has(Material::Face));
        assert!(has(Material::Shadow));
        assert!(has(Material::Highlight));
        assert!(has(Material::Symbol));
    }

    #[test]
    fn test_coin_3d_deterministic() {
        let a = Silhouette::coin_3d();
        let b = Silhouette::coin_3d();
        assert_eq!(a.populated_count(), b.populated_count());
        assert!(a.iter().eq(b.iter()));
        // Disc plus symbol, nothing classified as shadow or highlight.
        assert!(a.iter().all(|(_, _, m)| matches!(m, Material::Face | Material::Symbol)));
    }

    #[test]
    fn test_fill_ellipse_clips_to_bounds() {
        let mut stencil = Stencil::new(8, 8);
        stencil.fill_ellipse(0.0, 0.0, 20.0, 20.0, 0.0, Material::Face);
        let silhouette = stencil.into_silhouette();
        // Everything inside the canvas is filled, nothing panicked.
        assert_eq!(silhouette.populated_count(), 64);
    }
}
