use crate::coords::Vec2;
use crate::paint::GlyphPaint;

/// Glyph draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphCmd {
    pub glyph: char,
    /// Horizontal center of the advance, vertical baseline.
    pub origin: Vec2,
    /// Snapshot of the paint at record time.
    pub paint: GlyphPaint,
}

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new variant here
/// - add the matching method to `Canvas`
/// - record it in `DrawList` and rasterize it in `RasterCanvas`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Glyph(GlyphCmd),
}
