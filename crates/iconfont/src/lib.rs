//! Icon-font glyph drawables.
//!
//! A [`GlyphDrawable`] renders one character of an icon font as a scalable,
//! tintable image. Drawables are inflated from `<icon-font>` elements
//! through an [`IconFont`] context, which owns the code cache, the bundled
//! assets and the background font loader:
//!
//! ```no_run
//! use iconfont::{IconFont, IconFontConfig};
//! use iconfont_engine::coords::Rect;
//! use iconfont_engine::raster::RasterCanvas;
//!
//! let ctx = IconFont::new(IconFontConfig::default().with_asset_root("assets"));
//! let mut icon = ctx.inflate_str(r##"<icon-font code="e001" color="#ff2196f3"/>"##)?;
//! ctx.dispatch_pending();
//!
//! let mut canvas = RasterCanvas::new(48, 48);
//! icon.paint(&mut canvas, Rect::new(0.0, 0.0, 48.0, 48.0));
//! # Ok::<(), iconfont::InflateError>(())
//! ```

pub mod assets;
pub mod code_cache;
pub mod config;
pub mod font;
pub mod gradient;
pub mod inflate;
pub mod state;
pub mod tint;

mod context;
mod drawable;
mod error;

pub use assets::{AssetCache, IconManifest};
pub use code_cache::CodeCache;
pub use config::IconFontConfig;
pub use context::IconFont;
pub use drawable::{GlyphDrawable, Opacity};
pub use error::{AssetError, InflateError};
pub use inflate::{AttributeMap, AttributeSource};
pub use state::{GlyphState, GradientError, GradientKind, GradientState, Orientation};
pub use tint::{ColorStateList, StateSet};
