use crate::paint::GlyphPaint;

/// Drawing surface a glyph drawable paints into.
///
/// `x` is the horizontal center of the glyph's advance and `baseline` the text
/// baseline, both in logical pixels. The paint carries everything else
/// (size, typeface, color, shader, shadow, filter), already resolved by the
/// caller.
pub trait Canvas {
    fn draw_glyph(&mut self, glyph: char, x: f32, baseline: f32, paint: &GlyphPaint);
}
