use std::path::{Path, PathBuf};

/// Default bundled typeface, relative to the asset root.
pub const DEFAULT_TYPEFACE_ASSET: &str = "icon_font/typeface.ttf";
/// Default icon-name → code-point manifest, relative to the asset root.
pub const DEFAULT_METADATA_ASSET: &str = "icon_font/metadata.json";
/// Capacity of the code-literal cache.
pub const DEFAULT_CODE_CACHE_CAPACITY: usize = 128;

/// Configuration for an [`IconFont`](crate::IconFont) context.
///
/// Build with `IconFontConfig::default()` and the `with_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct IconFontConfig {
    /// Directory holding bundled assets.
    pub asset_root: PathBuf,
    /// Bundled typeface path, relative to `asset_root`.
    pub typeface_asset: PathBuf,
    /// Icon manifest path, relative to `asset_root`.
    pub metadata_asset: PathBuf,
    /// Resource directory; `@font/name` resolves under `<font_root>/font/`.
    pub font_root: PathBuf,
    /// Pixels per `dp`.
    pub density: f32,
    pub code_cache_capacity: usize,
}

impl Default for IconFontConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            typeface_asset: PathBuf::from(DEFAULT_TYPEFACE_ASSET),
            metadata_asset: PathBuf::from(DEFAULT_METADATA_ASSET),
            font_root: PathBuf::from("res"),
            density: 1.0,
            code_cache_capacity: DEFAULT_CODE_CACHE_CAPACITY,
        }
    }
}

impl IconFontConfig {
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    pub fn with_font_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.font_root = root.into();
        self
    }

    /// Non-positive or non-finite densities are ignored.
    pub fn with_density(mut self, density: f32) -> Self {
        if density.is_finite() && density > 0.0 {
            self.density = density;
        }
        self
    }

    pub fn with_code_cache_capacity(mut self, capacity: usize) -> Self {
        self.code_cache_capacity = capacity.max(1);
        self
    }

    pub fn typeface_path(&self) -> PathBuf {
        self.asset_root.join(&self.typeface_asset)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.asset_root.join(&self.metadata_asset)
    }

    pub fn font_root(&self) -> &Path {
        &self.font_root
    }
}
