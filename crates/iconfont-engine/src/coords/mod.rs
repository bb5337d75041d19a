//! Coordinate and geometry types shared by drawables and canvases.
//!
//! Canonical space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down

mod insets;
mod rect;
mod vec2;

pub use insets::Insets;
pub use rect::Rect;
pub use vec2::Vec2;
