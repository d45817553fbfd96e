//! Selection state machine driven by explicit scatter interaction events.
//!
//! The state is the pair `(selection, mode)`. Every accepted event produces a
//! [`SelectionTransition`] that callers use to recompute dependent views.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::RecordId;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Rectangular brush is active; clicks replace the selection.
    #[default]
    Brush,
    /// Brush is hidden; clicks toggle membership.
    MultiClick,
}

/// Closed rectangle in scatter-local pixels. Corners are normalized so that
/// `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> ChartResult<Self> {
        if !x0.is_finite() || !y0.is_finite() || !x1.is_finite() || !y1.is_finite() {
            return Err(ChartError::InvalidData(
                "brush corners must be finite".to_owned(),
            ));
        }
        Ok(Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        })
    }

    /// Inclusive on all four edges.
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y1 - self.y0
    }
}

/// Projected scatter point as seen by hit-testing and brushing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Position of the record in dataset iteration order.
    pub index: usize,
    pub id: RecordId,
    pub cx: f64,
    pub cy: f64,
    /// Unselected radius used for hit-testing.
    pub radius: f64,
}

/// Returns the first point (in dataset order) whose base circle contains
/// `(x, y)`. Overlaps resolve to the earliest point, not the nearest.
#[must_use]
pub fn hit_test(points: &[ScatterPoint], x: f64, y: f64, radius: f64) -> Option<&ScatterPoint> {
    let radius_sq = radius * radius;
    points.iter().find(|point| {
        let dx = x - point.cx;
        let dy = y - point.cy;
        dx * dx + dy * dy <= radius_sq
    })
}

/// Interaction events consumed by [`SelectionState::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// Drag gesture finished; `None` for an empty drag.
    BrushEnd(Option<BrushRect>),
    PointClick(RecordId),
    /// Click inside the scatter that hit no point.
    BackgroundClick,
    Reset,
}

impl SelectionEvent {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SelectionEvent::BrushEnd(_) => "brush_end",
            SelectionEvent::PointClick(_) => "point_click",
            SelectionEvent::BackgroundClick => "background_click",
            SelectionEvent::Reset => "reset",
        }
    }
}

/// Outcome of one accepted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionTransition {
    pub mode_before: InteractionMode,
    pub mode_after: InteractionMode,
    pub selection_len: usize,
    /// An on-screen brush rectangle was removed by this event.
    pub brush_cleared: bool,
}

impl SelectionTransition {
    #[must_use]
    pub fn mode_changed(self) -> bool {
        self.mode_before != self.mode_after
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    selection: IndexSet<RecordId>,
    mode: InteractionMode,
    active_brush: Option<BrushRect>,
}

impl SelectionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn selection(&self) -> &IndexSet<RecordId> {
        &self.selection
    }

    #[must_use]
    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selection.contains(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Brush rectangle currently drawn, if any.
    #[must_use]
    pub fn active_brush(&self) -> Option<BrushRect> {
        self.active_brush
    }

    /// The brush affordance is shown exactly in brush mode.
    #[must_use]
    pub fn brush_enabled(&self) -> bool {
        self.mode == InteractionMode::Brush
    }

    /// Applies one event against the projected scatter points.
    ///
    /// Returns `Ok(None)` when the event does not apply in the current mode
    /// (a background click while brushing). A click on an id absent from
    /// `points` fails and leaves the state untouched.
    pub fn apply(
        &mut self,
        event: &SelectionEvent,
        points: &[ScatterPoint],
    ) -> ChartResult<Option<SelectionTransition>> {
        let mode_before = self.mode;
        let had_brush = self.active_brush.is_some();

        match event {
            SelectionEvent::BrushEnd(rect) => {
                self.mode = InteractionMode::Brush;
                self.active_brush = *rect;
                self.selection = match rect {
                    Some(rect) => points
                        .iter()
                        .filter(|point| rect.contains(point.cx, point.cy))
                        .map(|point| point.id.clone())
                        .collect(),
                    None => IndexSet::new(),
                };
            }
            SelectionEvent::PointClick(id) => {
                if !points.iter().any(|point| &point.id == id) {
                    return Err(ChartError::UnknownRecord(id.to_string()));
                }
                self.active_brush = None;
                match self.mode {
                    InteractionMode::Brush => {
                        self.selection.clear();
                        self.selection.insert(id.clone());
                        self.mode = InteractionMode::MultiClick;
                    }
                    InteractionMode::MultiClick => {
                        if !self.selection.shift_remove(id) {
                            self.selection.insert(id.clone());
                        }
                        if self.selection.is_empty() {
                            self.mode = InteractionMode::Brush;
                        }
                    }
                }
            }
            SelectionEvent::BackgroundClick => {
                if self.mode != InteractionMode::MultiClick {
                    trace!("background click ignored in brush mode");
                    return Ok(None);
                }
                self.selection.clear();
                self.mode = InteractionMode::Brush;
            }
            SelectionEvent::Reset => {
                self.selection.clear();
                self.mode = InteractionMode::Brush;
                self.active_brush = None;
            }
        }

        let transition = SelectionTransition {
            mode_before,
            mode_after: self.mode,
            selection_len: self.selection.len(),
            brush_cleared: had_brush && self.active_brush.is_none(),
        };
        debug!(
            event = event.kind(),
            mode_before = ?transition.mode_before,
            mode_after = ?transition.mode_after,
            selection_len = transition.selection_len,
            "selection transition"
        );
        Ok(Some(transition))
    }
}
