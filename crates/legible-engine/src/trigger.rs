//! Recompute triggers.
//!
//! The host owns a [`TriggerRegistry`] and calls [`TriggerRegistry::fire`] when
//! something the colors depend on changes (style mutation, window resize,
//! elements added or removed). Listeners hold a [`Subscription`]; dropping it
//! unregisters the callback, so a listener can never outlive its owner.
//!
//! # Threading
//!
//! Single-threaded by construction (`Rc`/`RefCell`). Callbacks run
//! synchronously inside `fire`, one after the other.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// What changed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TriggerKind {
    /// The gradient source string may have changed.
    GradientChanged,
    /// The viewport width changed.
    ViewportResized,
    /// Elements were added to or removed from dynamic coloring.
    TargetsChanged,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 3] = [
        TriggerKind::GradientChanged,
        TriggerKind::ViewportResized,
        TriggerKind::TargetsChanged,
    ];
}

type Callback = Rc<dyn Fn(TriggerKind)>;

struct Entry {
    id: u64,
    kind: TriggerKind,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

// ── TriggerRegistry ───────────────────────────────────────────────────────

/// Callback registry keyed by [`TriggerKind`].
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct TriggerRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for `kind`. The callback stays registered until the
    /// returned [`Subscription`] is dropped or released.
    pub fn register<F>(&self, kind: TriggerKind, callback: F) -> Subscription
    where
        F: Fn(TriggerKind) + 'static,
    {
        let mut reg = self.inner.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.entries.push(Entry { id, kind, callback: Rc::new(callback) });
        log::trace!("trigger subscription {id} registered for {kind:?}");

        Subscription {
            registry: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Invokes every callback registered for `kind`, in registration order.
    ///
    /// Returns the number of callbacks invoked. The registry is not borrowed
    /// while callbacks run, so a callback may register, release, or fire.
    pub fn fire(&self, kind: TriggerKind) -> usize {
        let callbacks: Vec<Callback> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| Rc::clone(&e.callback))
            .collect();

        for callback in &callbacks {
            callback(kind);
        }
        callbacks.len()
    }

    pub fn subscriber_count(&self, kind: TriggerKind) -> usize {
        self.inner.borrow().entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}

// ── Subscription ──────────────────────────────────────────────────────────

/// Unregister handle returned by [`TriggerRegistry::register`].
#[must_use = "dropping a Subscription unregisters its callback immediately"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: Option<u64>,
}

impl Subscription {
    /// Unregisters the callback now. Same as dropping the handle.
    pub fn release(mut self) {
        self.unregister();
    }

    /// False once released, or when the registry itself is gone.
    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.registry.strong_count() > 0
    }

    fn unregister(&mut self) {
        let Some(id) = self.id.take() else { return };
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().entries.retain(|e| e.id != id);
            log::trace!("trigger subscription {id} released");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unregister();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
