use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::StatKey;

/// Smallest radar domain ever shown when data is present.
pub const RADAR_DOMAIN_FLOOR: f64 = 50.0;
/// Domain increment for the interactive radar.
pub const RADAR_DOMAIN_STEP: f64 = 25.0;
/// Domain when every displayed value is exactly zero.
pub const RADAR_DOMAIN_ALL_ZERO: f64 = 25.0;
/// Domain when nothing positive was found but not every value is zero.
pub const RADAR_DOMAIN_FALLBACK: f64 = 100.0;

/// Shared radial domain `[0, max]` for every polygon in one radar pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarScaleDomain {
    pub max: f64,
}

impl RadarScaleDomain {
    /// Derives the domain from the rows in view.
    ///
    /// Each row yields one value per radar axis, `None` for missing. Missing
    /// reads as zero when searching for the maximum.
    #[must_use]
    pub fn derive<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = Option<f64>>,
    {
        let mut raw_max = 0.0_f64;
        let mut any_row = false;
        let mut all_zero = true;
        for row in rows {
            any_row = true;
            for value in row {
                let value = value.unwrap_or(0.0);
                if value > raw_max {
                    raw_max = value;
                }
                if value != 0.0 {
                    all_zero = false;
                }
            }
        }

        Self {
            max: Self::domain_max(raw_max, any_row && all_zero, RADAR_DOMAIN_STEP),
        }
    }

    /// Domain for the static overview radar: ten-unit steps, never below the
    /// floor, no zero fallback.
    #[must_use]
    pub fn overview(raw_max: f64) -> Self {
        let rounded = if raw_max.is_finite() {
            (raw_max / 10.0).ceil() * 10.0
        } else {
            0.0
        };
        Self {
            max: RADAR_DOMAIN_FLOOR.max(rounded),
        }
    }

    /// Rounding rule of the interactive radar.
    #[must_use]
    pub fn domain_max(raw_max: f64, all_zero: bool, step: f64) -> f64 {
        if raw_max > 0.0 {
            RADAR_DOMAIN_FLOOR.max((raw_max / step).ceil() * step)
        } else if all_zero {
            RADAR_DOMAIN_ALL_ZERO
        } else {
            RADAR_DOMAIN_FALLBACK
        }
    }
}

/// Radar projection: axis geometry around a center for a fixed domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub domain: RadarScaleDomain,
}

pub type RadarVertices = SmallVec<[(f64, f64); 6]>;

impl RadarGeometry {
    #[must_use]
    pub fn axis_angle(axis_index: usize) -> f64 {
        let slice = 2.0 * PI / StatKey::RADAR.len() as f64;
        slice * axis_index as f64 - PI / 2.0
    }

    /// Radial pixel distance for a domain value, clamped at zero.
    #[must_use]
    pub fn radius_for(self, value: f64) -> f64 {
        if self.domain.max <= 0.0 {
            return 0.0;
        }
        value.max(0.0) / self.domain.max * self.radius
    }

    #[must_use]
    pub fn point_at(self, axis_index: usize, value: f64) -> (f64, f64) {
        let angle = Self::axis_angle(axis_index);
        let r = self.radius_for(value);
        (self.center_x + r * angle.cos(), self.center_y + r * angle.sin())
    }

    /// Polygon vertices for one row of radar values. Missing values plot at
    /// the center.
    #[must_use]
    pub fn polygon(self, values: &[Option<f64>]) -> RadarVertices {
        values
            .iter()
            .enumerate()
            .map(|(axis, value)| self.point_at(axis, value.unwrap_or(0.0)))
            .collect()
    }

    /// Radii of the concentric grid rings, innermost first.
    #[must_use]
    pub fn grid_radii(self, levels: usize) -> Vec<f64> {
        (0..levels)
            .map(|level| {
                let value = self.domain.max / levels as f64 * (level + 1) as f64;
                self.radius_for(value)
            })
            .collect()
    }
}
