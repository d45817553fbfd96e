#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{Dataset, LinearScale, Record, StatKey};
use crate::interaction::ScatterPoint;

/// Headroom above the largest attack/defense value.
const AXIS_HEADROOM: f64 = 1.05;

/// Attack/defense projection into scatter-local pixels (origin top-left of the
/// plot area, y growing downward).
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterProjection {
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub points: Vec<ScatterPoint>,
}

impl ScatterProjection {
    /// Projects every record in dataset order. `radius_of` picks the base
    /// radius per record.
    pub fn project<F>(dataset: &Dataset, width: f64, height: f64, radius_of: F) -> Self
    where
        F: Fn(&Record) -> f64 + Sync,
    {
        let max_attack = dataset.max_stat(StatKey::Attack).unwrap_or(0.0);
        let max_defense = dataset.max_stat(StatKey::Defense).unwrap_or(0.0);
        let x_scale = LinearScale::from_zero(max_attack * AXIS_HEADROOM, (0.0, width));
        let y_scale = LinearScale::from_zero(max_defense * AXIS_HEADROOM, (height, 0.0));

        let project_one = |(index, record): (usize, &Record)| ScatterPoint {
            index,
            id: record.id.clone(),
            cx: x_scale.apply(record.stat_or_zero(StatKey::Attack)),
            cy: y_scale.apply(record.stat_or_zero(StatKey::Defense)),
            radius: radius_of(record),
        };

        #[cfg(feature = "parallel-projection")]
        let points = {
            let records: Vec<&Record> = dataset.records().collect();
            records
                .into_par_iter()
                .enumerate()
                .map(project_one)
                .collect()
        };
        #[cfg(not(feature = "parallel-projection"))]
        let points = dataset.records().enumerate().map(project_one).collect();

        Self {
            x_scale,
            y_scale,
            points,
        }
    }

    #[must_use]
    pub fn point(&self, index: usize) -> Option<&ScatterPoint> {
        self.points.get(index)
    }
}
