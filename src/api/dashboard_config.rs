use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Public dashboard bootstrap configuration.
///
/// Serializable so hosts can persist or ship chart setup as JSON; every field
/// except the viewport falls back to its default when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub viewport: Viewport,
    #[serde(default = "default_top_margin")]
    pub top_margin: f64,
    #[serde(default = "default_point_radius")]
    pub point_radius: f64,
    #[serde(default = "default_notable_point_radius")]
    pub notable_point_radius: f64,
    #[serde(default = "default_selected_point_radius")]
    pub selected_point_radius: f64,
    #[serde(default = "default_summary_name_limit")]
    pub summary_name_limit: usize,
    #[serde(default = "default_radar_levels")]
    pub radar_levels: usize,
    #[serde(default = "default_bar_transition_ms")]
    pub bar_transition_ms: f64,
}

impl DashboardConfig {
    /// Creates a config for a canvas of the given size with default styling.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            top_margin: default_top_margin(),
            point_radius: default_point_radius(),
            notable_point_radius: default_notable_point_radius(),
            selected_point_radius: default_selected_point_radius(),
            summary_name_limit: default_summary_name_limit(),
            radar_levels: default_radar_levels(),
            bar_transition_ms: default_bar_transition_ms(),
        }
    }

    /// Canvas sized from a window's inner size, minus the fixed top margin.
    #[must_use]
    pub fn for_window(inner_width: u32, inner_height: u32) -> Self {
        let margin = default_top_margin() as u32;
        Self::new(Viewport::new(
            inner_width,
            inner_height.saturating_sub(margin),
        ))
    }

    #[must_use]
    pub fn with_point_radii(mut self, base: f64, notable: f64, selected: f64) -> Self {
        self.point_radius = base;
        self.notable_point_radius = notable;
        self.selected_point_radius = selected;
        self
    }

    #[must_use]
    pub fn with_summary_name_limit(mut self, limit: usize) -> Self {
        self.summary_name_limit = limit;
        self
    }

    #[must_use]
    pub fn with_bar_transition_ms(mut self, duration_ms: f64) -> Self {
        self.bar_transition_ms = duration_ms;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.top_margin.is_finite() || self.top_margin < 0.0 {
            return Err(ChartError::InvalidData(
                "top margin must be finite and >= 0".to_owned(),
            ));
        }
        for (name, radius) in [
            ("point radius", self.point_radius),
            ("notable point radius", self.notable_point_radius),
            ("selected point radius", self.selected_point_radius),
        ] {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.summary_name_limit == 0 {
            return Err(ChartError::InvalidData(
                "summary name limit must be > 0".to_owned(),
            ));
        }
        if self.radar_levels == 0 {
            return Err(ChartError::InvalidData(
                "radar levels must be > 0".to_owned(),
            ));
        }
        if !self.bar_transition_ms.is_finite() || self.bar_transition_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "bar transition duration must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_top_margin() -> f64 {
    10.0
}

fn default_point_radius() -> f64 {
    4.0
}

fn default_notable_point_radius() -> f64 {
    5.0
}

fn default_selected_point_radius() -> f64 {
    6.0
}

fn default_summary_name_limit() -> usize {
    10
}

fn default_radar_levels() -> usize {
    5
}

fn default_bar_transition_ms() -> f64 {
    300.0
}
