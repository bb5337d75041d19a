use crate::coords::Vec2;
use crate::paint::GlyphPaint;
use crate::Canvas;

use super::{DrawCmd, GlyphCmd};

/// Canvas that records draw calls instead of producing pixels.
///
/// `push()` is O(1). Replaying a list into another canvas reproduces the
/// same calls in insertion order.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    /// Iterates recorded glyph commands.
    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphCmd> {
        self.items.iter().map(|cmd| match cmd {
            DrawCmd::Glyph(g) => g,
        })
    }

    /// Replays every recorded command into `canvas`.
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for cmd in &self.items {
            match cmd {
                DrawCmd::Glyph(g) => canvas.draw_glyph(g.glyph, g.origin.x, g.origin.y, &g.paint),
            }
        }
    }
}

impl Canvas for DrawList {
    fn draw_glyph(&mut self, glyph: char, x: f32, baseline: f32, paint: &GlyphPaint) {
        self.push(DrawCmd::Glyph(GlyphCmd {
            glyph,
            origin: Vec2::new(x, baseline),
            paint: paint.clone(),
        }));
    }
}
