/// Identifies one request issued through a [`RequestSlot`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RequestToken(u64);

/// Single-slot request guard: the latest request wins.
///
/// Every [`begin`](Self::begin) supersedes the previous request, so a result
/// arriving with an older token is discarded. An accepted result is held
/// until [`take`](Self::take) hands it out once.
#[derive(Debug)]
pub struct RequestSlot<T> {
    generation: u64,
    in_flight: bool,
    ready: Option<T>,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self { generation: 0, in_flight: false, ready: None }
    }
}

impl<T> RequestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, invalidating any outstanding one.
    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.in_flight = true;
        self.ready = None;
        RequestToken(self.generation)
    }

    /// Drops interest in the outstanding request and any unclaimed result.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.in_flight = false;
        self.ready = None;
    }

    /// Offers a result for `token`.
    ///
    /// Returns false (and drops `value`) when the token is stale or the
    /// request already completed. `None` completes the request without a
    /// value.
    pub fn complete(&mut self, token: RequestToken, value: Option<T>) -> bool {
        if !self.in_flight || token.0 != self.generation {
            return false;
        }
        self.in_flight = false;
        self.ready = value;
        true
    }

    pub fn take(&mut self) -> Option<T> {
        self.ready.take()
    }

    pub fn peek(&self) -> Option<&T> {
        self.ready.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_token_is_accepted_once() {
        let mut slot = RequestSlot::new();
        let t = slot.begin();
        assert!(slot.is_pending());
        assert!(slot.complete(t, Some("face")));
        assert!(!slot.complete(t, Some("again")));
        assert_eq!(slot.take(), Some("face"));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn superseded_request_is_discarded() {
        let mut slot = RequestSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(!slot.complete(first, Some(1)));
        assert!(slot.is_pending());
        assert!(slot.complete(second, Some(2)));
        assert_eq!(slot.take(), Some(2));
    }

    #[test]
    fn late_result_after_cancel_is_discarded() {
        let mut slot = RequestSlot::new();
        let t = slot.begin();
        slot.cancel();
        assert!(!slot.complete(t, Some(1)));
        assert_eq!(slot.peek(), None);
    }

    #[test]
    fn failure_completes_without_value() {
        let mut slot: RequestSlot<u8> = RequestSlot::new();
        let t = slot.begin();
        assert!(slot.complete(t, None));
        assert!(!slot.is_pending());
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn begin_clears_unclaimed_result() {
        let mut slot = RequestSlot::new();
        let t = slot.begin();
        slot.complete(t, Some(1));
        slot.begin();
        assert_eq!(slot.peek(), None);
    }
}
