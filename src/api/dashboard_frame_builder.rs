use crate::core::{BandScale, Dataset, LinearScale, PlotRect};
use crate::error::ChartResult;
use crate::interaction::SelectionState;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::axis_frame_builder::{
    append_bottom_axis, append_bottom_title, append_left_axis, append_left_title,
    append_plot_title,
};
use super::legend_frame_builder::append_category_legend;
use super::palette::{
    BRUSH_FILL, BUTTON_BORDER, BUTTON_FILL, INK, TEXT, category_color, stat_color,
};
use super::radar_frame_builder::{
    append_radar_grid, append_radar_legend, append_radar_polygons, radar_geometry,
};
use super::{BarViewModel, DashboardConfig, DashboardLayout, ScatterProjection, ViewModels};

pub const SCATTER_TITLE_BRUSH: &str = "Attack vs. Defense (Click or Drag to Select)";
pub const SCATTER_TITLE_MULTI_CLICK: &str = "Attack vs. Defense (Multi-Click Select Mode)";
pub const SUMMARY_PREFIX: &str = "selected: ";
pub const RESET_BUTTON_LABEL: &str = "Reset View";

const BAR_PADDING: f64 = 0.2;
const UNSELECTED_POINT_ALPHA: f64 = 0.6;
const SELECTED_STROKE_WIDTH: f64 = 1.5;
const AXIS_TICKS: usize = 5;

/// One drawn bar in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BarSlot {
    pub index: usize,
    pub rect: PlotRect,
}

/// Everything one dashboard draw pass reads. Nothing here is mutated.
pub(crate) struct DashboardScene<'a> {
    pub dataset: &'a Dataset,
    pub config: &'a DashboardConfig,
    pub layout: &'a DashboardLayout,
    pub projection: &'a ScatterProjection,
    pub selection: &'a SelectionState,
    pub views: &'a ViewModels,
    /// Bar heights currently on screen, in value units.
    pub bar_heights: &'a [f64],
}

impl DashboardScene<'_> {
    pub(crate) fn build(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.layout.viewport);
        self.append_radar(&mut frame);
        self.append_bars(&mut frame)?;
        self.append_scatter(&mut frame);
        self.append_summary(&mut frame);
        append_category_legend(&mut frame, self.layout.legend, self.dataset.categories());
        self.append_reset_button(&mut frame);
        Ok(frame)
    }

    fn append_radar(&self, frame: &mut RenderFrame) {
        let radar = &self.views.radar;
        let area = &self.layout.radar;
        let geometry = radar_geometry(area, radar.domain);
        append_plot_title(frame, area.area, 26.0, &radar.title);
        append_radar_grid(frame, geometry, self.config.radar_levels);
        append_radar_polygons(frame, geometry, &radar.polygons);
        if radar.legend_visible {
            append_radar_legend(frame, area, &radar.polygons);
        }
    }

    /// On-screen rectangle of every bar, following the displayed heights.
    pub(crate) fn bar_slots(&self) -> ChartResult<Vec<BarSlot>> {
        let bar: &BarViewModel = &self.views.bar;
        let plot = self.layout.bar;
        let bands = BandScale::new(bar.entries.len(), (0.0, plot.width), BAR_PADDING)?;
        let y_scale = LinearScale::from_zero(bar.y_max, (plot.height, 0.0));

        let slots = (0..bar.entries.len())
            .filter_map(|index| {
                let band_start = bands.band_start(index)?;
                let height_value = self.bar_heights.get(index).copied().unwrap_or(0.0);
                let top = plot.y + y_scale.apply(height_value.max(0.0)).clamp(0.0, plot.height);
                let x = plot.x + band_start;
                Some(BarSlot {
                    index,
                    rect: PlotRect::new(x, top, bands.bandwidth(), plot.bottom() - top),
                })
            })
            .collect();
        Ok(slots)
    }

    fn append_bars(&self, frame: &mut RenderFrame) -> ChartResult<()> {
        let bar: &BarViewModel = &self.views.bar;
        let plot = self.layout.bar;
        let y_scale = LinearScale::from_zero(bar.y_max, (plot.height, 0.0));

        append_plot_title(frame, plot, 36.0, &bar.title);
        append_left_axis(frame, plot, y_scale, AXIS_TICKS);
        append_left_title(frame, plot, 64.0, "Average Value");
        frame.lines.push(LinePrimitive::new(
            plot.x,
            plot.bottom(),
            plot.right(),
            plot.bottom(),
            1.0,
            INK,
        ));

        for slot in self.bar_slots()? {
            let Some(entry) = bar.entries.get(slot.index) else {
                continue;
            };
            let rect = slot.rect;
            frame.rects.push(RectPrimitive::new(
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                stat_color(entry.key),
            ));

            let center = rect.x + rect.width / 2.0;
            let value_label = entry.value_label();
            if !value_label.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    value_label,
                    center,
                    rect.y - 15.0,
                    10.0,
                    TEXT,
                    TextHAlign::Center,
                ));
            }
            frame.texts.push(TextPrimitive::new(
                entry.label.clone(),
                center,
                plot.bottom() + 4.0,
                10.0,
                TEXT,
                TextHAlign::Center,
            ));
        }
        Ok(())
    }

    fn append_scatter(&self, frame: &mut RenderFrame) {
        let plot = self.layout.scatter;
        let projection = self.projection;

        let title = if self.selection.brush_enabled() {
            SCATTER_TITLE_BRUSH
        } else {
            SCATTER_TITLE_MULTI_CLICK
        };
        append_plot_title(frame, plot, 31.0, title);
        append_bottom_axis(frame, plot, projection.x_scale, AXIS_TICKS);
        append_bottom_title(frame, plot, 45.0, "Attack");
        append_left_axis(frame, plot, projection.y_scale, AXIS_TICKS);
        append_left_title(frame, plot, 64.0, "Defense");

        for point in &projection.points {
            let category = self
                .dataset
                .get_index(point.index)
                .map_or("", |record| record.category.as_str());
            let fill = category_color(category);
            let circle = if self.selection.is_selected(&point.id) {
                CirclePrimitive::new(
                    plot.x + point.cx,
                    plot.y + point.cy,
                    self.config.selected_point_radius,
                    fill,
                )
                .with_stroke(SELECTED_STROKE_WIDTH, INK)
            } else {
                CirclePrimitive::new(
                    plot.x + point.cx,
                    plot.y + point.cy,
                    point.radius,
                    fill.with_alpha(UNSELECTED_POINT_ALPHA),
                )
            };
            frame.circles.push(circle);
        }

        if self.selection.brush_enabled() {
            if let Some(brush) = self.selection.active_brush() {
                frame.rects.push(
                    RectPrimitive::new(
                        plot.x + brush.x0,
                        plot.y + brush.y0,
                        brush.width(),
                        brush.height(),
                        BRUSH_FILL,
                    )
                    .with_border(1.0, Color::rgb(1.0, 1.0, 1.0)),
                );
            }
        }
    }

    fn append_summary(&self, frame: &mut RenderFrame) {
        frame.texts.push(TextPrimitive::new(
            format!("{SUMMARY_PREFIX}{}", self.views.summary.text),
            self.layout.summary_x,
            self.layout.summary_y - 14.0,
            14.0,
            TEXT,
            TextHAlign::Left,
        ));
    }

    fn append_reset_button(&self, frame: &mut RenderFrame) {
        let button: PlotRect = self.layout.reset_button;
        frame.rects.push(
            RectPrimitive::new(button.x, button.y, button.width, button.height, BUTTON_FILL)
                .with_border(1.0, BUTTON_BORDER)
                .with_corner_radius(5.0),
        );
        frame.texts.push(TextPrimitive::new(
            RESET_BUTTON_LABEL,
            button.x + button.width / 2.0,
            button.y + button.height / 2.0 - 7.0,
            12.0,
            TEXT,
            TextHAlign::Center,
        ));
    }
}
