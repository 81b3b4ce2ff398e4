use std::cell::{Cell, RefCell};

/// Handle returned by [`Signal::subscribe`]. Pass it back to
/// [`Signal::unsubscribe`] when the observing surface goes away; dropping
/// it without unsubscribing leaves the observer registered.
#[derive(Debug)]
pub(crate) struct Subscription {
    id: u64,
}

/// A typed, synchronous publish-subscribe point. Observers run in
/// subscription order on the emitting thread; there is no queueing and no
/// coalescing, one emit produces one notification pass.
///
/// Single-threaded by design. Observers must not subscribe or unsubscribe
/// from inside a callback.
pub(crate) struct Signal<T> {
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(u64, Box<dyn FnMut(&T)>)>>,
}

impl<T> Signal<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    #[must_use = "keep the subscription to unsubscribe on teardown"]
    pub(crate) fn subscribe(&self, observer: impl FnMut(&T) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Box::new(observer)));
        Subscription { id }
    }

    pub(crate) fn unsubscribe(&self, subscription: Subscription) {
        self.subscribers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription.id);
    }

    pub(crate) fn emit(&self, event: &T) {
        for (_, observer) in self.subscribers.borrow_mut().iter_mut() {
            observer(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
