//! Geometry consumed by the controller.
//!
//! Canonical space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Only the horizontal axis matters for color assignment; vertical fields are
//! carried so callers can pass layout rectangles through unchanged.

mod rect;
mod viewport;

pub use rect::Rect;
pub use viewport::Viewport;
