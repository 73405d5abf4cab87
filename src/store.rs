//! Reactive value container shared by the device directory and wallet
//! stores.
//!
//! Mirrors the store contract the desktop UI binds to: `set`/`update`
//! replace the value and then call every listener synchronously, in
//! registration order, with the new value. Subscribing invokes the
//! listener immediately with the current value. Every write notifies;
//! there is no equality check.
//!
//! Listeners run outside the internal locks, so a listener may read,
//! write, subscribe, or unsubscribe re-entrantly. A listener removed
//! while a notification is in flight can still observe that one
//! notification.

use std::sync::{Arc, Mutex, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

struct Shared<T> {
    value: Mutex<T>,
    registry: Mutex<Registry<T>>,
}

pub struct Store<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: Mutex::new(initial),
                registry: Mutex::new(Registry {
                    next_id: 0,
                    entries: Vec::new(),
                }),
            }),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.shared.value.lock().unwrap().clone()
    }

    /// Replace the value and notify all listeners with it.
    pub fn set(&self, value: T) {
        let snapshot = {
            let mut guard = self.shared.value.lock().unwrap();
            *guard = value;
            guard.clone()
        };
        self.notify(&snapshot);
    }

    /// Mutate the value in place and notify all listeners with the result.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let snapshot = {
            let mut guard = self.shared.value.lock().unwrap();
            f(&mut guard);
            guard.clone()
        };
        self.notify(&snapshot);
    }

    /// Register `listener` and immediately invoke it with the current
    /// value. Dropping the returned [`Subscription`] unregisters it.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription<T> {
        let listener: Listener<T> = Arc::new(listener);
        let id = {
            let mut registry = self.shared.registry.lock().unwrap();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, Arc::clone(&listener)));
            id
        };
        let current = self.get();
        listener(&current);
        Subscription {
            shared: Arc::downgrade(&self.shared),
            id,
        }
    }

    fn notify(&self, snapshot: &T) {
        // Clone the listener list so callbacks run without the registry
        // lock held and may re-enter the store.
        let listeners: Vec<Listener<T>> = {
            let registry = self.shared.registry.lock().unwrap();
            registry.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in listeners {
            listener(snapshot);
        }
    }
}

/// Guard for a registered listener. Unregisters on drop or via
/// [`Subscription::unsubscribe`].
pub struct Subscription<T> {
    shared: Weak<Shared<T>>,
    id: u64,
}

impl<T> Subscription<T> {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            let mut registry = shared.registry.lock().unwrap();
            registry.entries.retain(|(id, _)| *id != self.id);
        }
    }
}
