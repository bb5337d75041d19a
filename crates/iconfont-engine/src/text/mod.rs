//! Typefaces and glyph measurement.
//!
//! Faces are parsed and measured with `fontdue`.

mod typeface;

pub use typeface::{FontLoadError, TextBounds, Typeface, WeakTypeface};
