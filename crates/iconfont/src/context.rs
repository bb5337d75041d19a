use std::cell::{Ref, RefCell};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::assets::AssetCache;
use crate::code_cache::CodeCache;
use crate::config::IconFontConfig;
use crate::drawable::GlyphDrawable;
use crate::error::InflateError;
use crate::font::{DirectoryResolver, FontLoader, FontResolver};
use crate::inflate::{self, AttributeSource, Inflated};
use crate::state::GlyphState;

/// Owns the caches and the font loader every drawable is built against.
///
/// One `IconFont` lives on the main thread for the lifetime of the host and
/// is passed by reference wherever drawables are inflated. The host calls
/// [`dispatch_pending`](Self::dispatch_pending) from its event loop so that
/// fonts requested during inflation reach their drawables.
#[derive(Debug)]
pub struct IconFont {
    config: IconFontConfig,
    codes: RefCell<CodeCache>,
    assets: AssetCache,
    fonts: FontLoader,
}

impl IconFont {
    /// Font resources are resolved from `config.font_root`.
    pub fn new(config: IconFontConfig) -> Self {
        let resolver = Arc::new(DirectoryResolver::new(config.font_root()));
        Self::with_resolver(config, resolver)
    }

    pub fn with_resolver(config: IconFontConfig, resolver: Arc<dyn FontResolver>) -> Self {
        log::debug!(
            "iconfont: assets under {}, fonts under {}",
            config.asset_root.display(),
            config.font_root().display()
        );
        Self {
            codes: RefCell::new(CodeCache::new(config.code_cache_capacity)),
            assets: AssetCache::new(&config),
            fonts: FontLoader::new(resolver),
            config,
        }
    }

    pub fn config(&self) -> &IconFontConfig {
        &self.config
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    pub fn fonts(&self) -> &FontLoader {
        &self.fonts
    }

    pub fn code_cache(&self) -> Ref<'_, CodeCache> {
        self.codes.borrow()
    }

    /// Decodes a hexadecimal code literal through the shared cache.
    pub fn decode(&self, literal: &str) -> Result<char, InflateError> {
        self.codes.borrow_mut().get(literal)
    }

    pub(crate) fn parse<S: AttributeSource>(&self, base: &GlyphState, src: &S) -> Result<Inflated, InflateError> {
        inflate::inflate_state(base, src, &mut self.codes.borrow_mut(), self.config.density)
    }

    /// Inflates a drawable from an `<icon-font>` document.
    pub fn inflate_str(&self, xml: &str) -> Result<GlyphDrawable, InflateError> {
        let doc = roxmltree::Document::parse(xml)?;
        let mut drawable = GlyphDrawable::new();
        drawable.inflate(self, &doc.root_element())?;
        Ok(drawable)
    }

    pub fn inflate_file(&self, path: impl AsRef<Path>) -> Result<GlyphDrawable, InflateError> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path)
            .map_err(|source| InflateError::Io { path: path.to_path_buf(), source })?;
        self.inflate_str(&xml)
    }

    /// Drawable for a named icon of the bundled font.
    ///
    /// `None` unless both the icon manifest and the bundled typeface load.
    pub fn asset_icon(&self, name: &str) -> Option<GlyphDrawable> {
        let code = self.assets.icon_code(name)?;
        let typeface = self.assets.typeface()?;
        let mut state = GlyphState::default();
        state.code = Some(code);
        state.paint.typeface = Some(typeface);
        Some(GlyphDrawable::from_state(Rc::new(state)))
    }

    /// Delivers finished font loads to their drawables. Never blocks.
    pub fn dispatch_pending(&self) -> usize {
        self.fonts.dispatch_pending()
    }

    /// Blocks until every outstanding font load has been delivered or
    /// `timeout` passes without progress.
    pub fn wait_for_fonts(&self, timeout: Duration) -> usize {
        let mut delivered = self.fonts.dispatch_pending();
        while self.fonts.pending() > 0 {
            let n = self.fonts.wait_and_dispatch(timeout);
            if n == 0 {
                log::warn!("{} font loads still pending after {timeout:?}", self.fonts.pending());
                break;
            }
            delivered += n;
        }
        delivered
    }
}

impl Default for IconFont {
    fn default() -> Self {
        Self::new(IconFontConfig::default())
    }
}
