//! Paint model shared between drawables and canvases.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - paint sources (solid, linear/radial/sweep gradients)
//! - color filters and the resolved per-glyph paint
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod filter;
pub mod glyph;
pub mod gradient;

pub use color::Color;
pub use filter::{BlendMode, ColorFilter};
pub use glyph::{GlyphPaint, ShadowLayer};
pub use gradient::{ColorStop, LinearGradient, RadialGradient, Shader, SpreadMode, SweepGradient};
