//! Legible engine: keeps text and borders readable over a gradient background.
//!
//! The color math lives in [`legible_paint`]; this crate owns the stateful
//! side: the [`ReactiveColorController`](controller::ReactiveColorController),
//! the trigger plumbing that drives it, its configuration, and logging setup.
//!
//! # Quick start
//!
//! ```rust
//! use legible_engine::prelude::*;
//!
//! let scene = SceneSnapshot {
//!     gradient_source: Some("linear-gradient(to right, #000 0%, #fff 100%)".into()),
//!     viewport_width: 1000.0,
//!     targets: vec![Target::new(ElementId::from_raw(1), Rect::horizontal(0.0, 100.0, 32.0))],
//! };
//!
//! let mut controller = ReactiveColorController::new(scene, ControllerConfig::default());
//! controller.recompute(TriggerKind::TargetsChanged);
//! assert_eq!(controller.state(ElementId::from_raw(1)).unwrap().text_color, "#ffffff");
//! ```

pub mod config;
pub mod controller;
pub mod coords;
pub mod element;
pub mod logging;
pub mod trigger;

/// Everything needed to wire a controller into a host.
pub mod prelude {
    pub use crate::config::{ContrastPalette, ControllerConfig, FallbackColors};
    pub use crate::controller::{
        ActiveController, ColorEnvironment, ColorSink, ElementColorState, GradientCache,
        PassSummary, ReactiveColorController, SceneSnapshot,
    };
    pub use crate::coords::{Rect, Viewport};
    pub use crate::element::{ElementId, Target};
    pub use crate::logging::{init_logging, LoggingConfig};
    pub use crate::trigger::{Subscription, TriggerKind, TriggerRegistry};

    pub use legible_paint::{Contrast, Rgb};
}
