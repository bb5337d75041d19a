//! CPU canvas rasterizing glyphs into an RGBA image.
//!
//! Coverage comes from `fontdue`; shading, shadow and color filtering are
//! evaluated per pixel in premultiplied space and composited src-over.

use image::{Rgba, RgbaImage};

use crate::coords::Vec2;
use crate::paint::{BlendMode, Color, GlyphPaint};
use crate::Canvas;

/// 8-bit coverage mask with its placement in canvas pixels.
struct Mask {
    width: usize,
    height: usize,
    coverage: Vec<f32>,
}

impl Mask {
    fn from_bitmap(width: usize, height: usize, bitmap: &[u8]) -> Self {
        Self {
            width,
            height,
            coverage: bitmap.iter().map(|&c| c as f32 / 255.0).collect(),
        }
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> f32 {
        self.coverage[y * self.width + x]
    }

    /// Separable box blur evaluated over `clip` only.
    ///
    /// The full result extends `radius` past the source on every side;
    /// `clip` is a window of that grown area, in its coordinates, and the
    /// returned mask covers exactly that window. Both passes read prefix
    /// sums, so the cost is independent of `radius`.
    fn box_blur(&self, radius: usize, clip: Region) -> Mask {
        let span = radius * 2;
        let window = (span + 1) as f32;
        let mut prefix = Vec::with_capacity(self.width.max(self.height) + 1);

        // One row per source row; rows outside the source blur to zero.
        let mut horizontal = vec![0.0f32; self.height * clip.width];
        for sy in 0..self.height {
            prefix_sums(&mut prefix, (0..self.width).map(|sx| self.at(sx, sy)));
            for cx in 0..clip.width {
                horizontal[sy * clip.width + cx] = window_sum(&prefix, clip.x + cx, span) / window;
            }
        }

        let mut out = vec![0.0f32; clip.width * clip.height];
        for cx in 0..clip.width {
            prefix_sums(&mut prefix, (0..self.height).map(|sy| horizontal[sy * clip.width + cx]));
            for cy in 0..clip.height {
                out[cy * clip.width + cx] = window_sum(&prefix, clip.y + cy, span) / window;
            }
        }

        Mask { width: clip.width, height: clip.height, coverage: out }
    }
}

/// Window of mask cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Region {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

fn prefix_sums(out: &mut Vec<f32>, values: impl Iterator<Item = f32>) {
    out.clear();
    out.push(0.0);
    let mut acc = 0.0;
    for v in values {
        acc += v;
        out.push(acc);
    }
}

/// Sum of `values[end - span ..= end]`, clamped to the values behind `prefix`.
fn window_sum(prefix: &[f32], end: usize, span: usize) -> f32 {
    let len = prefix.len() - 1;
    let lo = end.saturating_sub(span);
    if lo >= len {
        return 0.0;
    }
    let hi = end.min(len - 1);
    prefix[hi + 1] - prefix[lo]
}

/// Wider kernels leave no visible coverage.
const MAX_BLUR_RADIUS: usize = 1 << 16;

/// Canvas backed by an `image::RgbaImage`.
///
/// Pixels are stored straight-alpha as `image` expects; blending converts to
/// premultiplied and back.
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Creates a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height) }
    }

    /// Creates a canvas pre-filled with `background`.
    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, Rgba(background.to_rgba8())) }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Reads a pixel back as a premultiplied color.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width() && y < self.height()).then(|| {
            let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
            Color::from_srgb_u8(r, g, b, a)
        })
    }

    /// Composites `src` over the pixel at `(x, y)`. Out-of-range writes are dropped.
    pub fn blend_pixel(&mut self, x: i64, y: i64, src: Color) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
        let dst = Color::from_srgb_u8(r, g, b, a);
        let out = BlendMode::SrcOver.blend(src, dst);
        self.image.put_pixel(x, y, Rgba(out.to_rgba8()));
    }

    /// Part of a `width`×`height` block placed at `(x, y)` that lands on the
    /// canvas, in block-local cells.
    fn visible_region(&self, x: i64, y: i64, width: i64, height: i64) -> Option<Region> {
        let (x0, y0) = (x.max(0), y.max(0));
        let x1 = (x + width).min(self.width() as i64);
        let y1 = (y + height).min(self.height() as i64);
        (x0 < x1 && y0 < y1).then(|| Region {
            x: (x0 - x) as usize,
            y: (y0 - y) as usize,
            width: (x1 - x0) as usize,
            height: (y1 - y0) as usize,
        })
    }

    fn fill_mask(&mut self, mask: &Mask, ox: i64, oy: i64, shade: impl Fn(Vec2) -> Color) {
        for my in 0..mask.height {
            for mx in 0..mask.width {
                let cov = mask.at(mx, my);
                if cov <= 0.0 {
                    continue;
                }
                let px = ox + mx as i64;
                let py = oy + my as i64;
                let color = shade(Vec2::new(px as f32 + 0.5, py as f32 + 0.5));
                self.blend_pixel(px, py, color.scale_alpha(cov));
            }
        }
    }
}

impl Canvas for RasterCanvas {
    fn draw_glyph(&mut self, glyph: char, x: f32, baseline: f32, paint: &GlyphPaint) {
        let Some(typeface) = paint.typeface.as_ref() else {
            log::trace!("raster: no typeface for U+{:04X}, skipped", glyph as u32);
            return;
        };
        if paint.text_size <= 0.0 {
            return;
        }

        let (metrics, bitmap) = typeface.rasterize(glyph, paint.text_size);
        if metrics.width == 0 || metrics.height == 0 {
            return;
        }
        let mask = Mask::from_bitmap(metrics.width, metrics.height, &bitmap);

        // Centered on the advance, like center-aligned text.
        let left = x - metrics.advance_width * 0.5 + metrics.xmin as f32;
        let top = baseline - (metrics.ymin as f32 + metrics.height as f32);
        let alpha = paint.alpha_factor();

        let shadow = paint.shadow;
        if shadow.is_visible() {
            let r = (shadow.radius.max(0.0).ceil() as usize).min(MAX_BLUR_RADIUS);
            let sx = (left + shadow.dx).round() as i64 - r as i64;
            let sy = (top + shadow.dy).round() as i64 - r as i64;
            let grown_w = (mask.width + r * 2) as i64;
            let grown_h = (mask.height + r * 2) as i64;
            if let Some(clip) = self.visible_region(sx, sy, grown_w, grown_h) {
                let blurred = mask.box_blur(r, clip);
                let color = shadow.color.scale_alpha(alpha);
                self.fill_mask(&blurred, sx + clip.x as i64, sy + clip.y as i64, |_| color);
            }
        }

        let shader = paint.shader.as_deref();
        let filter = paint.color_filter;
        let base = paint.color;
        self.fill_mask(&mask, left.round() as i64, top.round() as i64, |p| {
            let src = shader.map_or(base, |s| s.eval(p)).scale_alpha(alpha);
            match filter {
                Some(f) => f.apply(src),
                None => src,
            }
        });
    }
}
