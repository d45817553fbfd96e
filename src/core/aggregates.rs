use serde::{Deserialize, Serialize};

use crate::core::labels::{format_mean, stat_lines};
use crate::core::{Dataset, Record, StatBlock, StatKey};

/// Grouping an aggregate row was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKey {
    Overall,
    Selection,
    Generation(u32),
}

/// Per-group attribute means. Recomputed on demand, never stored long-term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: GroupKey,
    pub count: usize,
    pub means: StatBlock,
    pub tooltip: String,
}

impl AggregateRow {
    #[must_use]
    pub fn mean(&self, key: StatKey) -> Option<f64> {
        self.means.get(key)
    }
}

/// Arithmetic mean of `key`, skipping records where the value is missing.
///
/// Returns `None` when no record contributes a value.
#[must_use]
pub fn mean_of<'a>(records: impl IntoIterator<Item = &'a Record>, key: StatKey) -> Option<f64> {
    let (sum, count) = records
        .into_iter()
        .filter_map(|record| record.stat(key))
        .fold((0.0_f64, 0_usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Means of every attribute over `records`.
#[must_use]
pub fn stat_means<'a, I>(records: I) -> StatBlock
where
    I: IntoIterator<Item = &'a Record>,
    I::IntoIter: Clone,
{
    let records = records.into_iter();
    let mut block = StatBlock::default();
    for key in StatKey::ALL {
        block.set(key, mean_of(records.clone(), key));
    }
    block
}

#[must_use]
pub fn aggregate<'a, I>(key: GroupKey, records: I) -> AggregateRow
where
    I: IntoIterator<Item = &'a Record>,
    I::IntoIter: Clone,
{
    let records = records.into_iter();
    let count = records.clone().count();
    let means = stat_means(records);
    let header = match key {
        GroupKey::Overall => "All records".to_owned(),
        GroupKey::Selection => format!("Selected ({count})"),
        GroupKey::Generation(generation) => format!("Gen {generation}"),
    };
    let tooltip = format!(
        "{header}\n{}",
        stat_lines(&StatKey::RADAR, |stat| means.get(stat), format_mean)
    );
    AggregateRow {
        key,
        count,
        means,
        tooltip,
    }
}

/// Means over the whole dataset.
#[must_use]
pub fn overall_means(dataset: &Dataset) -> AggregateRow {
    aggregate(GroupKey::Overall, dataset.records())
}

/// One row per generation, ascending by generation.
#[must_use]
pub fn generation_means(dataset: &Dataset) -> Vec<AggregateRow> {
    dataset
        .generations()
        .iter()
        .map(|&generation| {
            aggregate(
                GroupKey::Generation(generation),
                dataset
                    .records()
                    .filter(move |record| record.generation == generation),
            )
        })
        .collect()
}

/// Record counts per (category, generation). Categories sorted, generations
/// ascending; absent combinations count as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamTable {
    pub generations: Vec<u32>,
    pub categories: Vec<String>,
    /// `counts[category_index][generation_index]`.
    pub counts: Vec<Vec<u32>>,
}

impl StreamTable {
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let generations = dataset.generations().to_vec();
        let categories = dataset.categories().to_vec();
        let mut counts = vec![vec![0_u32; generations.len()]; categories.len()];

        for record in dataset.records() {
            let category = categories.binary_search(&record.category);
            let generation = generations.binary_search(&record.generation);
            if let (Ok(category), Ok(generation)) = (category, generation) {
                counts[category][generation] += 1;
            }
        }

        Self {
            generations,
            categories,
            counts,
        }
    }

    #[must_use]
    pub fn count(&self, category: &str, generation: u32) -> u32 {
        let category = self.categories.iter().position(|name| name == category);
        let generation = self.generations.iter().position(|g| *g == generation);
        match (category, generation) {
            (Some(category), Some(generation)) => self.counts[category][generation],
            _ => 0,
        }
    }

    #[must_use]
    pub fn column_total(&self, generation_index: usize) -> u32 {
        self.counts
            .iter()
            .filter_map(|row| row.get(generation_index))
            .sum()
    }
}
