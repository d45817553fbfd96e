//! statboard: coordinated statistical dashboard engine.
//!
//! A brushable attack/defense scatter drives a selection state machine; every
//! selection change re-derives a bar chart of averages, a radar chart and a
//! summary line. Rendering goes through backend-agnostic frames so the state
//! and view logic stay testable without a display.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{DashboardConfig, DashboardEngine, OverviewChart};
pub use error::{ChartError, ChartResult};
