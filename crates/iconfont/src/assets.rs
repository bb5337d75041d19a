use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use iconfont_engine::text::{Typeface, WeakTypeface};
use serde::Deserialize;

use crate::code_cache::parse_code;
use crate::config::IconFontConfig;
use crate::error::AssetError;

/// Icon manifest written by the font build next to the bundled typeface.
///
/// `icons` maps icon names to hexadecimal code literals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IconManifest {
    #[serde(default)]
    pub icons: BTreeMap<String, String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub fonts: Vec<String>,
}

impl IconManifest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug)]
struct IconTable {
    codes: HashMap<String, char>,
    version: Option<String>,
}

impl IconTable {
    fn from_manifest(manifest: IconManifest) -> Self {
        let codes = manifest
            .icons
            .into_iter()
            .filter_map(|(name, literal)| match parse_code(&literal) {
                Ok(code) => Some((name, code)),
                Err(e) => {
                    log::warn!("icon {name:?}: {e}");
                    None
                }
            })
            .collect();
        Self { codes, version: manifest.version }
    }
}

/// Bundled typeface and icon table.
///
/// The typeface is held weakly: it stays loaded while some drawable uses it
/// and is read from disk again after the last user drops it. The icon table
/// is kept once it loads; a failed load is retried on the next lookup.
#[derive(Debug)]
pub struct AssetCache {
    typeface_path: PathBuf,
    metadata_path: PathBuf,
    typeface: RefCell<WeakTypeface>,
    icons: RefCell<Option<Rc<IconTable>>>,
}

impl AssetCache {
    pub fn new(config: &IconFontConfig) -> Self {
        Self::with_paths(config.typeface_path(), config.metadata_path())
    }

    pub fn with_paths(typeface_path: impl Into<PathBuf>, metadata_path: impl Into<PathBuf>) -> Self {
        Self {
            typeface_path: typeface_path.into(),
            metadata_path: metadata_path.into(),
            typeface: RefCell::new(WeakTypeface::new()),
            icons: RefCell::new(None),
        }
    }

    pub fn typeface_path(&self) -> &Path {
        &self.typeface_path
    }

    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }

    /// Returns the bundled typeface, loading it if no live handle exists.
    pub fn typeface(&self) -> Option<Typeface> {
        if let Some(face) = self.typeface.borrow().upgrade() {
            return Some(face);
        }
        match self.load_typeface() {
            Ok(face) => {
                *self.typeface.borrow_mut() = face.downgrade();
                Some(face)
            }
            Err(e) => {
                log::debug!("default typeface unavailable: {e}");
                None
            }
        }
    }

    /// True while some handle keeps the bundled typeface alive.
    pub fn typeface_is_loaded(&self) -> bool {
        self.typeface.borrow().upgrade().is_some()
    }

    fn load_typeface(&self) -> Result<Typeface, AssetError> {
        let bytes = read(&self.typeface_path)?;
        let face = Typeface::from_bytes(self.typeface_path.display().to_string(), &bytes)?;
        log::debug!("loaded default typeface from {}", self.typeface_path.display());
        Ok(face)
    }

    /// Code point of the icon called `name`.
    pub fn icon_code(&self, name: &str) -> Option<char> {
        self.icons().and_then(|t| t.codes.get(name).copied())
    }

    /// All icon names, sorted.
    pub fn icon_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .icons()
            .map(|t| t.codes.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn manifest_version(&self) -> Option<String> {
        self.icons().and_then(|t| t.version.clone())
    }

    fn icons(&self) -> Option<Rc<IconTable>> {
        if let Some(table) = self.icons.borrow().as_ref() {
            return Some(Rc::clone(table));
        }
        match self.load_icons() {
            Ok(table) => {
                let table = Rc::new(table);
                *self.icons.borrow_mut() = Some(Rc::clone(&table));
                Some(table)
            }
            Err(e) => {
                log::debug!("icon manifest unavailable: {e}");
                None
            }
        }
    }

    fn load_icons(&self) -> Result<IconTable, AssetError> {
        let bytes = read(&self.metadata_path)?;
        let manifest: IconManifest = serde_json::from_slice(&bytes)
            .map_err(|source| AssetError::Manifest { path: self.metadata_path.clone(), source })?;
        let table = IconTable::from_manifest(manifest);
        log::debug!("loaded {} icons from {}", table.codes.len(), self.metadata_path.display());
        Ok(table)
    }
}

fn read(path: &Path) -> Result<Vec<u8>, AssetError> {
    fs::read(path).map_err(|source| AssetError::Io { path: path.to_path_buf(), source })
}
