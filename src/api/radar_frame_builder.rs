use std::f64::consts::TAU;

use crate::core::labels::stat_label;
use crate::core::{RadarGeometry, RadarScaleDomain, StatKey};
use crate::render::{
    Color, LinePrimitive, PolygonPrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::layout::RadarArea;
use super::palette::{GRID, TEXT, category_color, generation_color};
use super::view_models::{RadarColorKey, RadarPolygon};

const RING_SEGMENTS: usize = 72;
const LABEL_RADIUS_FACTOR: f64 = 1.10;
const POLYGON_STROKE_WIDTH: f64 = 2.0;
const POLYGON_ALPHA: f64 = 0.7;
const LEGEND_SWATCH: f64 = 10.0;
const LEGEND_ROW_HEIGHT: f64 = 15.0;

#[must_use]
pub(crate) fn radar_geometry(area: &RadarArea, domain: RadarScaleDomain) -> RadarGeometry {
    RadarGeometry {
        center_x: area.center_x,
        center_y: area.center_y,
        radius: area.radius,
        domain,
    }
}

#[must_use]
pub(crate) fn radar_color(key: &RadarColorKey) -> Color {
    match key {
        RadarColorKey::Generation(position) => generation_color(*position),
        RadarColorKey::Category(category) => category_color(category),
    }
}

/// Dashed rings, one spoke per axis and the axis labels.
pub(crate) fn append_radar_grid(frame: &mut RenderFrame, geometry: RadarGeometry, levels: usize) {
    for ring_radius in geometry.grid_radii(levels) {
        if ring_radius <= 0.0 {
            continue;
        }
        let ring: Vec<(f64, f64)> = (0..RING_SEGMENTS)
            .map(|segment| {
                let angle = TAU * segment as f64 / RING_SEGMENTS as f64;
                (
                    geometry.center_x + ring_radius * angle.cos(),
                    geometry.center_y + ring_radius * angle.sin(),
                )
            })
            .collect();
        frame
            .polygons
            .push(PolygonPrimitive::stroked(ring, 0.5, GRID).with_dash(2.0));
    }

    for (axis, key) in StatKey::RADAR.iter().enumerate() {
        let (x, y) = geometry.point_at(axis, geometry.domain.max);
        frame.lines.push(LinePrimitive::new(
            geometry.center_x,
            geometry.center_y,
            x,
            y,
            1.0,
            GRID,
        ));

        let (label_x, label_y) = geometry.point_at(axis, geometry.domain.max * LABEL_RADIUS_FACTOR);
        frame.texts.push(TextPrimitive::new(
            stat_label(*key),
            label_x,
            label_y - 5.0,
            10.0,
            TEXT,
            TextHAlign::Center,
        ));
    }
}

pub(crate) fn append_radar_polygons(
    frame: &mut RenderFrame,
    geometry: RadarGeometry,
    polygons: &[RadarPolygon],
) {
    for polygon in polygons {
        let color = radar_color(&polygon.color_key).with_alpha(POLYGON_ALPHA);
        let vertices = geometry.polygon(&polygon.values).into_vec();
        frame.polygons.push(PolygonPrimitive::stroked(
            vertices,
            POLYGON_STROKE_WIDTH,
            color,
        ));
    }
}

/// Swatch plus label per polygon, stacked under the legend origin.
pub(crate) fn append_radar_legend(
    frame: &mut RenderFrame,
    area: &RadarArea,
    polygons: &[RadarPolygon],
) {
    for (row, polygon) in polygons.iter().enumerate() {
        if polygon.label.is_empty() {
            continue;
        }
        let y = area.legend_y + row as f64 * LEGEND_ROW_HEIGHT;
        frame.rects.push(RectPrimitive::new(
            area.legend_x,
            y,
            LEGEND_SWATCH,
            LEGEND_SWATCH,
            radar_color(&polygon.color_key),
        ));
        frame.texts.push(TextPrimitive::new(
            polygon.label.clone(),
            area.legend_x + LEGEND_SWATCH + 5.0,
            y - 1.0,
            10.0,
            TEXT,
            TextHAlign::Left,
        ));
    }
}
