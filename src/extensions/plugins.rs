use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub records_len: usize,
    pub selection_len: usize,
    pub mode: InteractionMode,
    pub brush_active: bool,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PluginEvent {
    /// Emitted after every accepted selection transition, even when the
    /// selection contents are unchanged.
    SelectionChanged {
        selection_len: usize,
        mode: InteractionMode,
    },
    ModeChanged {
        from: InteractionMode,
        to: InteractionMode,
    },
    BrushCleared,
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read engine context without mutating the
/// selection directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
