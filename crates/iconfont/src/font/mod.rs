//! Font resources and their asynchronous loading.
//!
//! Faces are resolved and parsed on a background thread; results come back
//! to whichever thread calls [`FontLoader::dispatch_pending`], which the host
//! treats as its main thread.

mod loader;
mod resolver;
mod resource;
mod slot;

pub use loader::{FontLoader, FontResult};
pub use resolver::{DirectoryResolver, FontResolver};
pub use resource::ResourceRef;
pub use slot::{RequestSlot, RequestToken};

pub use iconfont_engine::text::FontLoadError;
