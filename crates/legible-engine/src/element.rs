//! Element identity and the per-pass target descriptor.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::coords::Rect;

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

// ── ElementId ─────────────────────────────────────────────────────────────

/// Stable identity of a colored element.
///
/// Color state is keyed by this id, so it must stay the same for as long as the
/// element exists, independently of where the element is laid out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocate a new, process-unique id.
    pub fn new() -> Self {
        ElementId(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap an id owned by the caller (e.g. a DOM node handle or widget key).
    ///
    /// Mixing raw ids with [`ElementId::new`] may collide; pick one scheme per
    /// controller.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        ElementId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

// ── Target ────────────────────────────────────────────────────────────────

/// One element as reported by the environment for the current pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Target {
    pub id: ElementId,
    pub rect: Rect,
    /// Whether this element takes its colors from the gradient. Elements that
    /// opt out receive the static fallback colors.
    pub dynamic: bool,
}

impl Target {
    #[inline]
    pub const fn new(id: ElementId, rect: Rect) -> Self {
        Self { id, rect, dynamic: true }
    }

    #[inline]
    pub const fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }
}
