use serde::{Deserialize, Serialize};

use crate::core::{PlotRect, Viewport};

const LEGEND_ESTIMATED_HEIGHT: f64 = 70.0;
const PLOT_GAP: f64 = 20.0;
const COLUMN_GAP: f64 = 40.0;
const RESET_BUTTON_WIDTH: f64 = 100.0;
const RESET_BUTTON_HEIGHT: f64 = 30.0;
const RESET_BUTTON_PADDING: f64 = 20.0;
const LEGEND_ITEM_WIDTH: f64 = 100.0;
const LEGEND_MAX_ROWS: usize = 2;

/// Outer margins around a plot's inner area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

const RADAR_MARGINS: Margins = Margins::new(35.0, 20.0, 10.0, 70.0);
const LOWER_LEFT_MARGINS: Margins = Margins::new(0.0, 20.0, 50.0, 70.0);
const SCATTER_RIGHT_MARGINS: Margins = Margins::new(50.0, 50.0, 60.0, 70.0);
const STREAM_MARGINS: Margins = Margins::new(30.0, 50.0, 60.0, 70.0);

/// Radar block: plot area plus its polygon center and outer radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarArea {
    pub area: PlotRect,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Top-left of the per-generation swatch legend.
    pub legend_x: f64,
    pub legend_y: f64,
}

impl RadarArea {
    fn new(area: PlotRect, radius_share: f64) -> Self {
        Self {
            area,
            center_x: area.x + area.width / 2.0,
            center_y: area.y + area.height / 2.0 + 5.0,
            radius: area.width.min(area.height) / 2.0 * radius_share,
            legend_x: area.x + area.width - 60.0 - 10.0,
            legend_y: area.y - RADAR_MARGINS.top / 2.0 + 25.0,
        }
    }
}

/// Grid placement for the category legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendLayout {
    pub x: f64,
    pub y: f64,
    pub item_width: f64,
    pub items_per_row: usize,
    pub max_rows: usize,
}

impl LegendLayout {
    fn new(canvas_width: f64, x: f64, y: f64) -> Self {
        let usable = (canvas_width - x * 2.0).max(0.0);
        let items_per_row = ((usable / LEGEND_ITEM_WIDTH).floor() as usize).max(1);
        Self {
            x,
            y,
            item_width: LEGEND_ITEM_WIDTH,
            items_per_row,
            max_rows: LEGEND_MAX_ROWS,
        }
    }

    #[must_use]
    pub fn capacity(self) -> usize {
        self.items_per_row * self.max_rows
    }

    /// Top-left of legend item `index`, `None` once the rows are exhausted.
    #[must_use]
    pub fn item_origin(self, index: usize) -> Option<(f64, f64)> {
        let row = index / self.items_per_row;
        if row >= self.max_rows {
            return None;
        }
        let column = index % self.items_per_row;
        Some((
            self.x + column as f64 * self.item_width,
            self.y + row as f64 * 20.0,
        ))
    }
}

/// Interactive page: radar top-left, bar graph bottom-left, brushable scatter
/// on the right, summary line under the scatter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardLayout {
    pub viewport: Viewport,
    pub radar: RadarArea,
    pub bar: PlotRect,
    pub scatter: PlotRect,
    pub summary_x: f64,
    pub summary_y: f64,
    pub legend: LegendLayout,
    pub reset_button: PlotRect,
}

impl DashboardLayout {
    #[must_use]
    pub fn compute(viewport: Viewport, top_margin: f64) -> Self {
        let width = f64::from(viewport.width);
        let base_height = f64::from(viewport.height) - top_margin - LEGEND_ESTIMATED_HEIGHT;

        let radar = radar_area(width, base_height, top_margin, 0.80);

        let bar_margins = LOWER_LEFT_MARGINS;
        let bar_height = 240.0_f64
            .max(base_height / 2.0 - bar_margins.top - bar_margins.bottom - PLOT_GAP / 2.0);
        let bar = PlotRect::new(
            bar_margins.left,
            radar.area.bottom() + RADAR_MARGINS.bottom + PLOT_GAP + bar_margins.top,
            radar.area.width,
            bar_height,
        );

        let m = SCATTER_RIGHT_MARGINS;
        let block_left = radar.area.right() + RADAR_MARGINS.right + COLUMN_GAP;
        let scatter_width = 370.0_f64.max(width - block_left - m.left - m.right - 20.0);
        let scatter_height = 330.0_f64.max(base_height * 0.85 - m.top - m.bottom);
        let block_height = scatter_height + m.top + m.bottom;
        let block_top =
            (top_margin + m.top).max(top_margin + (base_height - block_height) / 2.0);
        let scatter = PlotRect::new(
            block_left + m.left,
            block_top + m.top,
            scatter_width,
            scatter_height,
        );

        let summary_y = block_top + block_height + 30.0;
        let left_bottom = bar.bottom() + bar_margins.bottom;
        let right_bottom = (block_top + block_height).max(summary_y + 20.0);
        let legend = LegendLayout::new(
            width,
            bar_margins.left,
            left_bottom.max(right_bottom) + 25.0,
        );

        let reset_button = PlotRect::new(
            width - RESET_BUTTON_WIDTH - RESET_BUTTON_PADDING,
            top_margin,
            RESET_BUTTON_WIDTH,
            RESET_BUTTON_HEIGHT,
        );

        Self {
            viewport,
            radar,
            bar,
            scatter,
            summary_x: scatter.x,
            summary_y,
            legend,
            reset_button,
        }
    }
}

/// Static page: radar top-left, scatter bottom-left, streamgraph right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverviewLayout {
    pub viewport: Viewport,
    pub radar: RadarArea,
    pub scatter: PlotRect,
    pub stream: PlotRect,
    pub legend: LegendLayout,
}

impl OverviewLayout {
    #[must_use]
    pub fn compute(viewport: Viewport, top_margin: f64) -> Self {
        let width = f64::from(viewport.width);
        let base_height = f64::from(viewport.height) - top_margin - LEGEND_ESTIMATED_HEIGHT;

        let radar = radar_area(width, base_height, top_margin, 0.85);

        let scatter_margins = LOWER_LEFT_MARGINS;
        let scatter_height = 240.0_f64.max(
            base_height / 2.0 - scatter_margins.top - scatter_margins.bottom - PLOT_GAP / 2.0,
        );
        let scatter = PlotRect::new(
            scatter_margins.left,
            radar.area.bottom() + RADAR_MARGINS.bottom + PLOT_GAP + scatter_margins.top,
            radar.area.width,
            scatter_height,
        );

        let m = STREAM_MARGINS;
        let block_left = radar.area.right() + RADAR_MARGINS.right + COLUMN_GAP;
        let stream_width = 370.0_f64.max(width - block_left - m.left - m.right - 20.0);
        let stream_height = 330.0_f64.max(base_height * 0.85 - m.top - m.bottom);
        let block_height = stream_height + m.top + m.bottom;
        let block_top =
            (top_margin + m.top).max(top_margin + (base_height - block_height) / 2.0);
        let stream = PlotRect::new(
            block_left + m.left,
            block_top + m.top,
            stream_width,
            stream_height,
        );

        let left_bottom = scatter.bottom() + scatter_margins.bottom;
        let right_bottom = stream.bottom() + m.bottom;
        let legend = LegendLayout::new(
            width,
            scatter_margins.left,
            left_bottom.max(right_bottom) + 25.0,
        );

        Self {
            viewport,
            radar,
            scatter,
            stream,
            legend,
        }
    }
}

fn radar_area(width: f64, base_height: f64, top_margin: f64, radius_share: f64) -> RadarArea {
    let m = RADAR_MARGINS;
    let area_width = 330.0_f64.max(width * 0.38 - m.left - m.right);
    let area_height = 270.0_f64.max(base_height / 2.0 - m.top - m.bottom - PLOT_GAP / 2.0);
    RadarArea::new(
        PlotRect::new(m.left, top_margin + m.top, area_width, area_height),
        radius_share,
    )
}
