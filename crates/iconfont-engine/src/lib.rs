//! Iconfont engine crate.
//!
//! Renderer-agnostic building blocks used by the glyph drawable: geometry,
//! paint sources, typefaces and the canvases a drawable paints into.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod scene;
pub mod text;

mod canvas;

pub use canvas::Canvas;
