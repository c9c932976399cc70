use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

type Callback = Box<dyn FnMut(usize)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
    // Ids unsubscribed while `entries` was taken out for a dispatch
    removed: Vec<u64>,
    dispatching: bool,
}

/// Ordered list of index-change observers.
///
/// Observers run in registration order. A panicking observer is reported and
/// skipped; the others still run. Observers may unsubscribe themselves (or
/// each other) from inside a notification.
#[derive(Default)]
pub struct ObserverList {
    inner: Rc<RefCell<Registry>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(usize) + 'static,
    {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, Box::new(observer)));

        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every observer.
    pub fn clear(&self) {
        let mut registry = self.inner.borrow_mut();
        if registry.dispatching {
            let ids: Vec<u64> = registry.entries.iter().map(|(id, _)| *id).collect();
            registry.removed.extend(ids);
        }
        registry.entries.clear();
    }

    /// Invokes every observer with `index`. Returns how many observers panicked.
    pub fn notify(&self, index: usize) -> usize {
        let mut entries = {
            let mut registry = self.inner.borrow_mut();
            registry.dispatching = true;
            std::mem::take(&mut registry.entries)
        };

        let mut failures = 0;
        for (id, observer) in entries.iter_mut() {
            if self.inner.borrow().removed.contains(id) {
                continue;
            }
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| observer(index))) {
                failures += 1;
                tracing::error!(
                    observer = *id,
                    index,
                    "slide observer panicked: {}",
                    panic_message(payload.as_ref())
                );
            }
        }

        let mut registry = self.inner.borrow_mut();
        let removed = std::mem::take(&mut registry.removed);
        entries.retain(|(id, _)| !removed.contains(id));
        // Observers subscribed during the dispatch go after the existing ones
        entries.append(&mut registry.entries);
        registry.entries = entries;
        registry.dispatching = false;

        failures
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.len())
            .finish()
    }
}

/// Handle returned by `on_change`; call [`Subscription::unsubscribe`] to
/// stop receiving notifications. Dropping the handle keeps the observer.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        if registry.dispatching {
            registry.removed.push(self.id);
        }
        registry.entries.retain(|(id, _)| *id != self.id);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
