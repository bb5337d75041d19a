use std::fmt;
use std::sync::Arc;

/// Error returned by [`Typeface::from_bytes`].
#[derive(Debug, Clone, PartialEq)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Glyph ink bounds relative to the pen position on the baseline.
///
/// Follows the usual text convention: `top` is negative above the baseline,
/// `bottom` is positive below it (the descent).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TextBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl TextBounds {
    #[inline]
    pub fn width(self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.bottom - self.top
    }
}

struct Face {
    name: String,
    font: fontdue::Font,
}

/// Shared, immutable font face.
///
/// Cloning is cheap; clones compare equal because they point at the same
/// parsed face. The handle is `Send + Sync` so faces can be parsed on a
/// loader thread and handed to the main thread.
#[derive(Clone)]
pub struct Typeface {
    face: Arc<Face>,
}

impl Typeface {
    /// Parses a TrueType or OpenType font from raw bytes.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self::from_face(name.into(), font))
    }

    fn from_face(name: String, font: fontdue::Font) -> Self {
        Self { face: Arc::new(Face { name, font }) }
    }

    pub fn name(&self) -> &str {
        &self.face.name
    }

    /// Returns true when the face maps `glyph` to a real glyph (not `.notdef`).
    pub fn has_glyph(&self, glyph: char) -> bool {
        self.face.font.lookup_glyph_index(glyph) != 0
    }

    /// Ink bounds of `glyph` at `size` logical pixels.
    pub fn text_bounds(&self, glyph: char, size: f32) -> TextBounds {
        let m = self.face.font.metrics(glyph, size.max(0.0));
        let left = m.xmin as f32;
        let bottom = -(m.ymin as f32);
        TextBounds {
            left,
            top: bottom - m.height as f32,
            right: left + m.width as f32,
            bottom,
        }
    }

    /// Horizontal advance of `glyph` at `size`.
    pub fn advance(&self, glyph: char, size: f32) -> f32 {
        self.face.font.metrics(glyph, size.max(0.0)).advance_width
    }

    /// Rasterizes `glyph` into an 8-bit coverage bitmap.
    pub(crate) fn rasterize(&self, glyph: char, size: f32) -> (fontdue::Metrics, Vec<u8>) {
        self.face.font.rasterize(glyph, size.max(0.0))
    }

    /// Number of live handles to the underlying face.
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.face)
    }

    /// Downgrades to a handle that does not keep the face alive.
    pub fn downgrade(&self) -> WeakTypeface {
        WeakTypeface(Arc::downgrade(&self.face))
    }
}

impl PartialEq for Typeface {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.face, &other.face)
    }
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typeface").field("name", &self.face.name).finish()
    }
}

/// Weak counterpart of [`Typeface`], for caches that must not pin a face.
#[derive(Clone, Default)]
pub struct WeakTypeface(std::sync::Weak<Face>);

impl WeakTypeface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upgrade(&self) -> Option<Typeface> {
        self.0.upgrade().map(|face| Typeface { face })
    }
}

impl fmt::Debug for WeakTypeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WeakTypeface").field(&(self.0.strong_count() > 0)).finish()
    }
}
