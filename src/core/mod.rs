pub mod aggregates;
pub mod dataset;
pub mod labels;
pub mod radar;
pub mod record;
pub mod scale;
pub mod stream;
pub mod types;

pub use aggregates::{
    AggregateRow, GroupKey, StreamTable, aggregate, generation_means, mean_of, overall_means,
    stat_means,
};
pub use dataset::{Dataset, LoadReport, parse_flag};
pub use radar::{RadarGeometry, RadarScaleDomain, RadarVertices};
pub use record::{Record, RecordId, StatBlock, StatKey};
pub use scale::{BandScale, LinearScale, PointScale};
pub use stream::{
    StackBand, StackedStream, StreamLayer, appearance_order, stack_stream, wiggle_baseline,
};
pub use types::{PlotRect, Viewport};
