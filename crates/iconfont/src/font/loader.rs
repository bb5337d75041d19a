use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use iconfont_engine::text::Typeface;

use super::{FontLoadError, FontResolver, ResourceRef};

/// Outcome of one font request.
pub type FontResult = Result<Typeface, FontLoadError>;

type Callback = Box<dyn FnOnce(FontResult)>;

/// Loads font resources off the main thread.
///
/// Each [`request`](Self::request) resolves and parses on its own worker
/// thread. Callbacks never run on the worker: results queue up until the
/// owning thread calls [`dispatch_pending`](Self::dispatch_pending), which
/// runs each callback exactly once, in completion order.
pub struct FontLoader {
    resolver: Arc<dyn FontResolver>,
    sender: Sender<(u64, FontResult)>,
    receiver: Receiver<(u64, FontResult)>,
    callbacks: RefCell<HashMap<u64, Callback>>,
    next_id: Cell<u64>,
}

impl FontLoader {
    pub fn new(resolver: Arc<dyn FontResolver>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            resolver,
            sender,
            receiver,
            callbacks: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }

    /// Starts loading `font`. `callback` runs on a later dispatch.
    pub fn request(&self, font: &ResourceRef, callback: impl FnOnce(FontResult) + 'static) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.callbacks.borrow_mut().insert(id, Box::new(callback));

        let resolver = Arc::clone(&self.resolver);
        let sender = self.sender.clone();
        let font = font.clone();
        log::debug!("font request #{id}: {font}");

        let spawned = thread::Builder::new()
            .name("iconfont-font-loader".into())
            .spawn(move || {
                let result = resolver
                    .load(&font)
                    .and_then(|bytes| Typeface::from_bytes(font.to_string(), &bytes));
                // The loader may be gone by now; nobody is left to notify.
                let _ = sender.send((id, result));
            });

        if let Err(e) = spawned {
            let _ = self.sender.send((id, Err(FontLoadError(format!("loader thread: {e}")))));
        }
    }

    /// Requests whose callback has not run yet.
    pub fn pending(&self) -> usize {
        self.callbacks.borrow().len()
    }

    /// Runs callbacks for every result that has arrived. Never blocks.
    pub fn dispatch_pending(&self) -> usize {
        let mut delivered = 0;
        while let Ok((id, result)) = self.receiver.try_recv() {
            delivered += usize::from(self.deliver(id, result));
        }
        delivered
    }

    /// Waits up to `timeout` for at least one result, then dispatches
    /// everything that has arrived.
    pub fn wait_and_dispatch(&self, timeout: Duration) -> usize {
        if self.pending() == 0 {
            return 0;
        }
        match self.receiver.recv_timeout(timeout) {
            Ok((id, result)) => usize::from(self.deliver(id, result)) + self.dispatch_pending(),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => 0,
        }
    }

    fn deliver(&self, id: u64, result: FontResult) -> bool {
        let callback = self.callbacks.borrow_mut().remove(&id);
        match callback {
            Some(callback) => {
                if let Err(e) = &result {
                    log::debug!("font request #{id} failed: {e}");
                }
                callback(result);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for FontLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLoader").field("pending", &self.pending()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::font::DirectoryResolver;

    const WAIT: Duration = Duration::from_secs(5);

    struct Garbage;

    impl FontResolver for Garbage {
        fn load(&self, _: &ResourceRef) -> Result<Vec<u8>, FontLoadError> {
            Ok(b"definitely not a font".to_vec())
        }
    }

    #[test]
    fn callback_waits_for_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FontLoader::new(Arc::new(DirectoryResolver::new(dir.path())));
        let seen = Rc::new(RefCell::new(None));

        let sink = Rc::clone(&seen);
        loader.request(&ResourceRef::font("missing"), move |r| {
            *sink.borrow_mut() = Some(r.is_err());
        });
        assert_eq!(loader.pending(), 1);
        assert!(seen.borrow().is_none());

        assert_eq!(loader.wait_and_dispatch(WAIT), 1);
        assert_eq!(*seen.borrow(), Some(true));
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn parse_failure_is_reported() {
        let loader = FontLoader::new(Arc::new(Garbage));
        let seen = Rc::new(Cell::new(false));
        let sink = Rc::clone(&seen);
        loader.request(&ResourceRef::font("x"), move |r| {
            sink.set(matches!(r, Err(FontLoadError(_))));
        });
        loader.wait_and_dispatch(WAIT);
        assert!(seen.get());
    }

    #[test]
    fn each_request_gets_exactly_one_result() {
        let loader = FontLoader::new(Arc::new(Garbage));
        let count = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let c = Rc::clone(&count);
            loader.request(&ResourceRef::font("x"), move |_| c.set(c.get() + 1));
        }
        let mut delivered = 0;
        while loader.pending() > 0 {
            delivered += loader.wait_and_dispatch(WAIT);
        }
        assert_eq!(delivered, 3);
        assert_eq!(count.get(), 3);
        assert_eq!(loader.dispatch_pending(), 0);
    }

    #[test]
    fn idle_wait_returns_immediately() {
        let loader = FontLoader::new(Arc::new(Garbage));
        assert_eq!(loader.wait_and_dispatch(WAIT), 0);
    }
}
