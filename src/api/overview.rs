//! Static overview page: generation radar, attack/defense scatter and a
//! streamgraph of category counts per generation. Built once, no interaction.

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::core::{
    Dataset, LinearScale, PlotRect, PointScale, RadarScaleDomain, Record, StackedStream,
    StatKey, StreamLayer, StreamTable, stack_stream,
};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, LinePrimitive, PolygonPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

use super::axis_frame_builder::{
    append_bottom_axis, append_bottom_title, append_left_axis, append_left_title,
    append_plot_title,
};
use super::legend_frame_builder::append_category_legend;
use super::palette::{INK, TEXT, category_color};
use super::radar_frame_builder::{
    append_radar_grid, append_radar_legend, append_radar_polygons, radar_geometry,
};
use super::tooltip_resolver::{polygon_contains, radar_outline_tooltip, within_circle};
use super::{DashboardConfig, OverviewLayout, RadarViewModel, ScatterProjection, radar_view};

pub const OVERVIEW_SCATTER_TITLE: &str = "Attack vs. Defense";
pub const STREAM_TITLE: &str = "Types over Generations";

/// Base point radius on the overview scatter; notable records use the
/// configured notable radius.
pub const OVERVIEW_POINT_RADIUS: f64 = 3.0;
const POINT_ALPHA: f64 = 0.7;
const STREAM_ALPHA: f64 = 0.85;

#[derive(Debug, Clone)]
pub struct OverviewChart {
    dataset: Dataset,
    config: DashboardConfig,
    layout: OverviewLayout,
}

impl OverviewChart {
    pub fn new(dataset: Dataset, config: DashboardConfig) -> ChartResult<Self> {
        config.validate()?;
        let layout = OverviewLayout::compute(config.viewport, config.top_margin);
        Ok(Self {
            dataset,
            config,
            layout,
        })
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn layout(&self) -> &OverviewLayout {
        &self.layout
    }

    /// Generation averages on a ten-step domain.
    #[must_use]
    pub fn radar_view(&self) -> RadarViewModel {
        let mut view = radar_view(&self.dataset, &[]);
        let raw_max = view
            .polygons
            .iter()
            .flat_map(|polygon| polygon.values.iter().flatten())
            .copied()
            .map(OrderedFloat)
            .max()
            .map_or(0.0, |value| value.0);
        view.domain = RadarScaleDomain::overview(raw_max);
        view
    }

    #[must_use]
    pub fn scatter(&self) -> ScatterProjection {
        let notable_radius = self.config.notable_point_radius;
        ScatterProjection::project(
            &self.dataset,
            self.layout.scatter.width,
            self.layout.scatter.height,
            |record| {
                if record.is_notable {
                    notable_radius
                } else {
                    OVERVIEW_POINT_RADIUS
                }
            },
        )
    }

    #[must_use]
    pub fn stream(&self) -> StackedStream {
        stack_stream(&StreamTable::from_dataset(&self.dataset))
    }

    pub fn build_frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.layout.viewport);

        let radar = self.radar_view();
        let area = &self.layout.radar;
        let geometry = radar_geometry(area, radar.domain);
        append_plot_title(&mut frame, area.area, 26.0, &radar.title);
        append_radar_grid(&mut frame, geometry, self.config.radar_levels);
        append_radar_polygons(&mut frame, geometry, &radar.polygons);
        append_radar_legend(&mut frame, area, &radar.polygons);

        self.append_scatter(&mut frame);
        let stream = self.stream();
        self.append_stream(&mut frame, &stream)?;
        append_category_legend(&mut frame, self.layout.legend, self.dataset.categories());

        debug!(
            polygons = frame.polygons.len(),
            circles = frame.circles.len(),
            layers = stream.layers.len(),
            "overview frame built"
        );
        Ok(frame)
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_frame()?;
        renderer.render(&frame)
    }

    /// Hover text for the element under `(x, y)` in canvas pixels: a scatter
    /// point, a stream layer (its category) or a generation outline.
    pub fn tooltip_at(&self, x: f64, y: f64) -> ChartResult<Option<String>> {
        let plot = self.layout.scatter;
        let (local_x, local_y) = plot.to_local(x, y);
        let projection = self.scatter();
        let point = projection
            .points
            .iter()
            .rev()
            .find(|point| within_circle((point.cx, point.cy), point.radius, local_x, local_y));
        if let Some(record) = point.and_then(|point| self.dataset.get_index(point.index)) {
            return Ok(Some(overview_point_tooltip(record)));
        }

        let stream = self.stream();
        let layer = self
            .stream_outlines(&stream)?
            .into_iter()
            .rev()
            .find(|(_, points)| polygon_contains(points, x, y));
        if let Some((layer, _)) = layer {
            return Ok(Some(layer.category.clone()));
        }

        let radar = self.radar_view();
        let geometry = radar_geometry(&self.layout.radar, radar.domain);
        Ok(radar_outline_tooltip(geometry, &radar.polygons, x, y))
    }

    /// Canvas outline of every stream layer, bottom layer first. Empty when
    /// fewer than two generations exist.
    fn stream_outlines<'a>(
        &self,
        stream: &'a StackedStream,
    ) -> ChartResult<Vec<(&'a StreamLayer, Vec<(f64, f64)>)>> {
        let plot: PlotRect = self.layout.stream;
        let columns = stream.generations.len();
        if columns < 2 {
            return Ok(Vec::new());
        }
        let x_scale = PointScale::new(columns, (0.0, plot.width));
        let (low, high) = stream.extent();
        let y_scale = if high > low {
            LinearScale::new((low, high), (plot.height, 0.0))?
        } else {
            LinearScale::from_zero(1.0, (plot.height, 0.0))
        };

        let mut layers: Vec<&StreamLayer> = stream.layers.iter().collect();
        layers.sort_by_key(|layer| layer.order);
        let outlines = layers
            .into_iter()
            .map(|layer| {
                let mut points = Vec::with_capacity(columns * 2);
                for (column, band) in layer.bands.iter().enumerate() {
                    if let Some(x) = x_scale.position(column) {
                        points.push((plot.x + x, plot.y + y_scale.apply(band.y1)));
                    }
                }
                for (column, band) in layer.bands.iter().enumerate().rev() {
                    if let Some(x) = x_scale.position(column) {
                        points.push((plot.x + x, plot.y + y_scale.apply(band.y0)));
                    }
                }
                (layer, points)
            })
            .collect();
        Ok(outlines)
    }

    fn append_scatter(&self, frame: &mut RenderFrame) {
        let plot = self.layout.scatter;
        let projection = self.scatter();
        append_plot_title(frame, plot, 20.0, OVERVIEW_SCATTER_TITLE);
        append_bottom_axis(frame, plot, projection.x_scale, 5);
        append_bottom_title(frame, plot, 45.0, "Attack");
        append_left_axis(frame, plot, projection.y_scale, 5);
        append_left_title(frame, plot, 64.0, "Defense");

        for (point, record) in projection.points.iter().zip(self.dataset.records()) {
            frame.circles.push(CirclePrimitive::new(
                plot.x + point.cx,
                plot.y + point.cy,
                point.radius,
                category_color(&record.category).with_alpha(POINT_ALPHA),
            ));
        }
    }

    fn append_stream(&self, frame: &mut RenderFrame, stream: &StackedStream) -> ChartResult<()> {
        let plot: PlotRect = self.layout.stream;
        append_plot_title(frame, plot, 10.0, STREAM_TITLE);
        append_left_title(frame, plot, 50.0, "Count");

        let x_scale = PointScale::new(stream.generations.len(), (0.0, plot.width));
        frame.lines.push(LinePrimitive::new(
            plot.x,
            plot.bottom(),
            plot.right(),
            plot.bottom(),
            1.0,
            INK,
        ));
        for (column, generation) in stream.generations.iter().enumerate() {
            let Some(x) = x_scale.position(column) else {
                continue;
            };
            frame.texts.push(TextPrimitive::new(
                generation.to_string(),
                plot.x + x,
                plot.bottom() + 6.0,
                10.0,
                TEXT,
                TextHAlign::Center,
            ));
        }
        append_bottom_title(frame, plot, 45.0, "Generation");

        for (layer, points) in self.stream_outlines(stream)? {
            frame.polygons.push(PolygonPrimitive::filled(
                points,
                category_color(&layer.category).with_alpha(STREAM_ALPHA),
            ));
        }
        Ok(())
    }
}

/// `"{name}\nType: {category}\nAttack: {a}\nDefense: {d}"`, plus a
/// `(Legendary)` line for notable records.
#[must_use]
pub fn overview_point_tooltip(record: &Record) -> String {
    let mut text = format!(
        "{}\nType: {}\nAttack: {}\nDefense: {}",
        record.name,
        record.category,
        record.stat_or_zero(StatKey::Attack),
        record.stat_or_zero(StatKey::Defense)
    );
    if record.is_notable {
        text.push_str("\n(Legendary)");
    }
    text
}
