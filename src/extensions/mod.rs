//! Optional hooks around the dashboard engine.
//!
//! Extensions observe engine events; they never sit on the selection path.

pub mod plugins;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
