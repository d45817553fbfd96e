use statboard::api::{DashboardLayout, OverviewLayout};
use statboard::core::{PlotRect, Viewport};

fn overlaps(a: PlotRect, b: PlotRect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

#[test]
fn dashboard_regions_do_not_overlap() {
    let layout = DashboardLayout::compute(Viewport::new(1280, 900), 10.0);

    assert!(!overlaps(layout.radar.area, layout.bar));
    assert!(!overlaps(layout.radar.area, layout.scatter));
    assert!(!overlaps(layout.bar, layout.scatter));
    assert!(layout.radar.area.bottom() < layout.bar.y);
    assert!(layout.scatter.x > layout.radar.area.right());
}

#[test]
fn dashboard_respects_minimum_plot_sizes() {
    let layout = DashboardLayout::compute(Viewport::new(400, 300), 10.0);

    assert!(layout.radar.area.width >= 330.0);
    assert!(layout.radar.area.height >= 270.0);
    assert!(layout.bar.height >= 240.0);
    assert!(layout.scatter.width >= 370.0);
    assert!(layout.scatter.height >= 330.0);
}

#[test]
fn radar_center_and_radius_follow_the_area() {
    let layout = DashboardLayout::compute(Viewport::new(1280, 900), 10.0);
    let radar = layout.radar;

    assert_eq!(radar.center_x, radar.area.x + radar.area.width / 2.0);
    let expected_radius = radar.area.width.min(radar.area.height) / 2.0 * 0.8;
    assert!((radar.radius - expected_radius).abs() <= 1e-9);
}

#[test]
fn reset_button_sits_top_right() {
    let layout = DashboardLayout::compute(Viewport::new(1280, 900), 10.0);
    let button = layout.reset_button;

    assert_eq!(button, PlotRect::new(1160.0, 10.0, 100.0, 30.0));
    assert!(button.contains(1210.0, 25.0));
    assert!(!button.contains(1100.0, 25.0));
}

#[test]
fn summary_sits_below_scatter() {
    let layout = DashboardLayout::compute(Viewport::new(1280, 900), 10.0);
    assert_eq!(layout.summary_x, layout.scatter.x);
    assert!(layout.summary_y > layout.scatter.bottom());
    assert!(layout.legend.y > layout.summary_y);
}

#[test]
fn legend_grid_wraps_and_caps_rows() {
    let layout = DashboardLayout::compute(Viewport::new(1280, 900), 10.0);
    let legend = layout.legend;

    // (1280 - 2 * 70) / 100 items per row.
    assert_eq!(legend.items_per_row, 11);
    assert_eq!(legend.capacity(), 22);
    assert_eq!(legend.item_origin(0), Some((legend.x, legend.y)));
    assert_eq!(legend.item_origin(11), Some((legend.x, legend.y + 20.0)));
    assert_eq!(legend.item_origin(22), None);
}

#[test]
fn overview_places_stream_right_of_radar() {
    let layout = OverviewLayout::compute(Viewport::new(1280, 900), 10.0);

    assert!(layout.stream.x > layout.radar.area.right());
    assert!(layout.scatter.y > layout.radar.area.bottom());
    assert!(!overlaps(layout.scatter, layout.stream));
    let expected_radius = layout.radar.area.width.min(layout.radar.area.height) / 2.0 * 0.85;
    assert!((layout.radar.radius - expected_radius).abs() <= 1e-9);
}
