//! Streamgraph stacking: appearance ordering plus wiggle baseline.
//!
//! Layers are stacked bottom-up in order of the column where each series first
//! peaks; the baseline of the bottom layer moves per column to minimise the
//! weighted slope of all layers.

use serde::{Deserialize, Serialize};

use crate::core::StreamTable;

/// Lower/upper bound of one layer at one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackBand {
    pub y0: f64,
    pub y1: f64,
}

/// One stacked layer (one category across all generations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamLayer {
    pub category: String,
    /// Position of this layer in the stacking order, 0 is the bottom.
    pub order: usize,
    pub bands: Vec<StackBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedStream {
    pub generations: Vec<u32>,
    /// Layers in category order (not stacking order).
    pub layers: Vec<StreamLayer>,
}

impl StackedStream {
    /// Lowest `y0` and highest `y1` over all layers, `(0, 0)` when empty.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        let mut bands = self.layers.iter().flat_map(|layer| layer.bands.iter());
        let Some(first) = bands.next() else {
            return (0.0, 0.0);
        };
        bands.fold((first.y0, first.y1), |(low, high), band| {
            (low.min(band.y0), high.max(band.y1))
        })
    }
}

/// Index of the first column holding the series maximum.
fn peak_index(values: &[f64]) -> usize {
    let mut peak = 0;
    let mut best = f64::NEG_INFINITY;
    for (index, value) in values.iter().enumerate() {
        if *value > best {
            best = *value;
            peak = index;
        }
    }
    peak
}

/// Series indices sorted by peak column. The sort is stable so ties keep
/// category order.
#[must_use]
pub fn appearance_order(series: &[Vec<f64>]) -> Vec<usize> {
    let peaks: Vec<usize> = series.iter().map(|values| peak_index(values)).collect();
    let mut order: Vec<usize> = (0..series.len()).collect();
    order.sort_by_key(|index| peaks[*index]);
    order
}

/// Per-column baseline of the bottom layer for the wiggle offset.
#[must_use]
pub fn wiggle_baseline(series: &[Vec<f64>], order: &[usize]) -> Vec<f64> {
    let columns = series.first().map_or(0, Vec::len);
    if columns == 0 {
        return Vec::new();
    }

    let mut baseline = Vec::with_capacity(columns);
    let mut y = 0.0_f64;
    for column in 1..columns {
        let mut total = 0.0_f64;
        let mut weighted_slope = 0.0_f64;
        for (position, &layer) in order.iter().enumerate() {
            let current = series[layer][column];
            let previous = series[layer][column - 1];
            let mut slope = (current - previous) / 2.0;
            for &below in &order[..position] {
                slope += series[below][column] - series[below][column - 1];
            }
            total += current;
            weighted_slope += slope * current;
        }
        baseline.push(y);
        if total != 0.0 {
            y -= weighted_slope / total;
        }
    }
    baseline.push(y);
    baseline
}

/// Stacks a count table into streamgraph layers.
#[must_use]
pub fn stack_stream(table: &StreamTable) -> StackedStream {
    let series: Vec<Vec<f64>> = table
        .counts
        .iter()
        .map(|row| row.iter().map(|count| f64::from(*count)).collect())
        .collect();
    let order = appearance_order(&series);
    let baseline = wiggle_baseline(&series, &order);

    let columns = table.generations.len();
    let mut bands: Vec<Vec<StackBand>> = vec![Vec::with_capacity(columns); series.len()];
    let mut floor = baseline;
    for &layer in &order {
        for (column, bottom) in floor.iter_mut().enumerate() {
            let top = *bottom + series[layer][column];
            bands[layer].push(StackBand {
                y0: *bottom,
                y1: top,
            });
            *bottom = top;
        }
    }

    let mut positions = vec![0; series.len()];
    for (position, &layer) in order.iter().enumerate() {
        positions[layer] = position;
    }

    let layers = table
        .categories
        .iter()
        .zip(bands)
        .enumerate()
        .map(|(index, (category, bands))| StreamLayer {
            category: category.clone(),
            order: positions[index],
            bands,
        })
        .collect();

    StackedStream {
        generations: table.generations.clone(),
        layers,
    }
}
