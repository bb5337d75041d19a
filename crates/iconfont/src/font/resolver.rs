use std::path::{Path, PathBuf};

use super::{FontLoadError, ResourceRef};

/// Source of raw font bytes for resource references.
///
/// Called from loader threads, hence `Send + Sync`.
pub trait FontResolver: Send + Sync {
    fn load(&self, font: &ResourceRef) -> Result<Vec<u8>, FontLoadError>;
}

/// Resolves `@font/name` to `<root>/font/name.ttf` (or `.otf`).
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    const EXTENSIONS: &'static [&'static str] = &["ttf", "otf"];

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, font: &ResourceRef) -> impl Iterator<Item = PathBuf> + '_ {
        let dir = self.root.join(&font.kind);
        let name = font.name.clone();
        Self::EXTENSIONS.iter().map(move |ext| dir.join(format!("{name}.{ext}")))
    }
}

impl FontResolver for DirectoryResolver {
    fn load(&self, font: &ResourceRef) -> Result<Vec<u8>, FontLoadError> {
        if !font.is_font() {
            return Err(FontLoadError(format!("{font} is not a font resource")));
        }
        for path in self.candidates(font) {
            match std::fs::read(&path) {
                Ok(bytes) => return Ok(bytes),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(FontLoadError(format!("{}: {e}", path.display()))),
            }
        }
        Err(FontLoadError(format!("{font} not found under {}", self.root.display())))
    }
}
