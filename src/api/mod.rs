mod axis_frame_builder;
mod bar_transition;
mod dashboard_config;
mod dashboard_frame_builder;
mod engine;
mod engine_snapshot;
mod layout;
mod legend_frame_builder;
mod overview;
mod plugin_registry;
mod radar_frame_builder;
mod scatter_projection;
mod tooltip_resolver;
mod view_models;

pub mod palette;

pub use bar_transition::{BarAnimator, BarTransition, ease_cubic_in_out};
pub use dashboard_config::DashboardConfig;
pub use dashboard_frame_builder::{
    RESET_BUTTON_LABEL, SCATTER_TITLE_BRUSH, SCATTER_TITLE_MULTI_CLICK, SUMMARY_PREFIX,
};
pub use engine::DashboardEngine;
pub use engine_snapshot::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1,
};
pub use layout::{DashboardLayout, LegendLayout, Margins, OverviewLayout, RadarArea};
pub use overview::{
    OVERVIEW_POINT_RADIUS, OVERVIEW_SCATTER_TITLE, OverviewChart, STREAM_TITLE,
    overview_point_tooltip,
};
pub use scatter_projection::ScatterProjection;
pub use tooltip_resolver::RESET_BUTTON_TOOLTIP;
pub use view_models::{
    BAR_DOMAIN_FALLBACK, BAR_TITLE_OVERALL, BarEntry, BarViewModel, RADAR_TITLE_GENERATIONS,
    RadarColorKey, RadarPolygon, RadarSource, RadarViewModel, SUMMARY_EMPTY_TEXT, SummaryView,
    ViewModels, bar_view, radar_view, record_tooltip, recompute_views, summary_text,
    summary_view,
};
