use crate::core::RadarGeometry;
use crate::render::Renderer;

use super::dashboard_frame_builder::DashboardScene;
use super::radar_frame_builder::radar_geometry;
use super::{DashboardEngine, RadarPolygon, record_tooltip};

pub const RESET_BUTTON_TOOLTIP: &str = "Reset all selections and return to the default view";

/// Pointer distance from a radar outline that still counts as hovering it.
const OUTLINE_HOVER_PX: f64 = 3.0;

impl<R: Renderer> DashboardEngine<R> {
    /// Hover text for whatever is drawn under `(x, y)` in canvas pixels.
    ///
    /// Hovering follows the frame: the topmost scatter circle at its displayed
    /// radius, bars at their current animated height, and radar outlines (the
    /// polygons are unfilled, so their interiors show nothing).
    #[must_use]
    pub fn tooltip_at(&self, x: f64, y: f64) -> Option<String> {
        if self.layout.reset_button.contains(x, y) {
            return Some(RESET_BUTTON_TOOLTIP.to_owned());
        }
        let scene = self.scene();
        scene
            .point_tooltip(x, y)
            .or_else(|| scene.bar_tooltip(x, y))
            .or_else(|| {
                let geometry = radar_geometry(&self.layout.radar, self.views.radar.domain);
                radar_outline_tooltip(geometry, &self.views.radar.polygons, x, y)
            })
    }
}

impl DashboardScene<'_> {
    fn point_tooltip(&self, x: f64, y: f64) -> Option<String> {
        let (local_x, local_y) = self.layout.scatter.to_local(x, y);
        self.projection
            .points
            .iter()
            .rev()
            .find(|point| {
                let radius = if self.selection.is_selected(&point.id) {
                    self.config.selected_point_radius
                } else {
                    point.radius
                };
                within_circle((point.cx, point.cy), radius, local_x, local_y)
            })
            .and_then(|point| self.dataset.get_index(point.index))
            .map(record_tooltip)
    }

    fn bar_tooltip(&self, x: f64, y: f64) -> Option<String> {
        let slot = self
            .bar_slots()
            .ok()?
            .into_iter()
            .find(|slot| slot.rect.height > 0.0 && slot.rect.contains(x, y))?;
        self.views
            .bar
            .entries
            .get(slot.index)
            .map(|entry| entry.tooltip.clone())
    }
}

/// Tooltip of the topmost radar polygon whose outline passes near `(x, y)`.
pub(crate) fn radar_outline_tooltip(
    geometry: RadarGeometry,
    polygons: &[RadarPolygon],
    x: f64,
    y: f64,
) -> Option<String> {
    polygons
        .iter()
        .rev()
        .find(|polygon| {
            let vertices = geometry.polygon(&polygon.values);
            distance_to_outline(&vertices, x, y) <= OUTLINE_HOVER_PX
        })
        .map(|polygon| polygon.tooltip.clone())
}

pub(crate) fn within_circle(center: (f64, f64), radius: f64, x: f64, y: f64) -> bool {
    let dx = x - center.0;
    let dy = y - center.1;
    dx * dx + dy * dy <= radius * radius
}

/// Even-odd containment test for a closed polygon.
pub(crate) fn polygon_contains(points: &[(f64, f64)], x: f64, y: f64) -> bool {
    let Some(&last) = points.last() else {
        return false;
    };
    let mut inside = false;
    let mut previous = last;
    for &current in points {
        let (x1, y1) = current;
        let (x0, y0) = previous;
        if (y1 > y) != (y0 > y) && x < (x0 - x1) * (y - y1) / (y0 - y1) + x1 {
            inside = !inside;
        }
        previous = current;
    }
    inside
}

/// Shortest distance from `(x, y)` to the closed outline through `points`.
pub(crate) fn distance_to_outline(points: &[(f64, f64)], x: f64, y: f64) -> f64 {
    let Some(&last) = points.last() else {
        return f64::INFINITY;
    };
    let mut previous = last;
    let mut best = f64::INFINITY;
    for &current in points {
        best = best.min(distance_to_segment(previous, current, x, y));
        previous = current;
    }
    best
}

fn distance_to_segment(start: (f64, f64), end: (f64, f64), x: f64, y: f64) -> f64 {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq > 0.0 {
        (((x - start.0) * dx + (y - start.1) * dy) / length_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (px, py) = (start.0 + t * dx, start.1 + t * dy);
    ((x - px).powi(2) + (y - py).powi(2)).sqrt()
}
