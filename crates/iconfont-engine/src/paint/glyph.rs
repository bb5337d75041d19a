use std::rc::Rc;

use crate::text::{TextBounds, Typeface};

use super::{Color, ColorFilter, Shader};

/// Drop shadow painted beneath a glyph.
///
/// A shadow with a non-positive radius or a transparent color is not drawn.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ShadowLayer {
    pub radius: f32,
    pub dx: f32,
    pub dy: f32,
    pub color: Color,
}

impl ShadowLayer {
    #[inline]
    pub const fn new(radius: f32, dx: f32, dy: f32, color: Color) -> Self {
        Self { radius, dx, dy, color }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.radius > 0.0 && !self.color.is_transparent()
    }
}

/// Resolved paint for a single glyph draw.
///
/// `shader`, when present, replaces `color` as the fill source. `alpha`
/// multiplies whichever source is used. `color_filter` runs last.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphPaint {
    pub color: Color,
    pub alpha: u8,
    pub typeface: Option<Typeface>,
    /// Font size in logical pixels.
    pub text_size: f32,
    pub shadow: ShadowLayer,
    pub shader: Option<Rc<Shader>>,
    pub color_filter: Option<ColorFilter>,
}

impl Default for GlyphPaint {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            alpha: 255,
            typeface: None,
            text_size: 0.0,
            shadow: ShadowLayer::default(),
            shader: None,
            color_filter: None,
        }
    }
}

impl GlyphPaint {
    /// Sets all four shadow parameters at once.
    #[inline]
    pub fn set_shadow_layer(&mut self, radius: f32, dx: f32, dy: f32, color: Color) {
        self.shadow = ShadowLayer::new(radius, dx, dy, color);
    }

    #[inline]
    pub fn alpha_factor(&self) -> f32 {
        self.alpha as f32 / 255.0
    }

    /// Measures `glyph` at the current text size.
    ///
    /// Without a typeface the bounds are empty.
    pub fn text_bounds(&self, glyph: char) -> TextBounds {
        self.typeface
            .as_ref()
            .map(|t| t.text_bounds(glyph, self.text_size))
            .unwrap_or_default()
    }
}
