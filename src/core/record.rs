use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric attribute carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKey {
    Hp,
    Attack,
    Defense,
    SpAtk,
    SpDef,
    Speed,
    Total,
}

impl StatKey {
    pub const COUNT: usize = 7;

    pub const ALL: [StatKey; Self::COUNT] = [
        StatKey::Hp,
        StatKey::Attack,
        StatKey::Defense,
        StatKey::SpAtk,
        StatKey::SpDef,
        StatKey::Speed,
        StatKey::Total,
    ];

    /// Attributes averaged by the bar chart, in display order.
    pub const BAR: [StatKey; 6] = [
        StatKey::Hp,
        StatKey::Attack,
        StatKey::Defense,
        StatKey::SpAtk,
        StatKey::SpDef,
        StatKey::Speed,
    ];

    /// Radar axes, clockwise from twelve o'clock.
    pub const RADAR: [StatKey; 5] = [
        StatKey::Hp,
        StatKey::Attack,
        StatKey::Defense,
        StatKey::SpAtk,
        StatKey::SpDef,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            StatKey::Hp => 0,
            StatKey::Attack => 1,
            StatKey::Defense => 2,
            StatKey::SpAtk => 3,
            StatKey::SpDef => 4,
            StatKey::Speed => 5,
            StatKey::Total => 6,
        }
    }
}

/// Stable record identifier, unique within a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Builds the load-order id: `rec_{index}_{name}` with whitespace runs
    /// collapsed to `_`.
    #[must_use]
    pub fn for_row(index: usize, name: &str) -> Self {
        let slug = name.split_whitespace().collect::<Vec<_>>().join("_");
        Self(format!("rec_{index}_{slug}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Per-record attribute values. `None` marks a missing or non-finite value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    values: [Option<f64>; StatKey::COUNT],
}

impl StatBlock {
    #[must_use]
    pub fn get(&self, key: StatKey) -> Option<f64> {
        self.values[key.index()]
    }

    pub fn set(&mut self, key: StatKey, value: Option<f64>) {
        self.values[key.index()] = value.filter(|v| v.is_finite());
    }

    #[must_use]
    pub fn with(mut self, key: StatKey, value: f64) -> Self {
        self.set(key, Some(value));
        self
    }
}

/// One immutable dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub secondary_category: Option<String>,
    pub stats: StatBlock,
    pub generation: u32,
    pub is_notable: bool,
}

impl Record {
    /// Creates a record with every attribute missing. Use [`Record::with_stat`]
    /// or [`Record::with_stats`] to fill values.
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        category: impl Into<String>,
        generation: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            secondary_category: None,
            stats: StatBlock::default(),
            generation,
            is_notable: false,
        }
    }

    #[must_use]
    pub fn with_stat(mut self, key: StatKey, value: f64) -> Self {
        self.stats.set(key, Some(value));
        self
    }

    /// Fills the six battle stats in `StatKey::BAR` order and derives `Total`.
    #[must_use]
    pub fn with_stats(mut self, values: [f64; 6]) -> Self {
        for (key, value) in StatKey::BAR.iter().zip(values) {
            self.stats.set(*key, Some(value));
        }
        self.stats.set(StatKey::Total, Some(values.iter().sum()));
        self
    }

    #[must_use]
    pub fn with_secondary_category(mut self, category: impl Into<String>) -> Self {
        self.secondary_category = Some(category.into());
        self
    }

    #[must_use]
    pub fn notable(mut self, is_notable: bool) -> Self {
        self.is_notable = is_notable;
        self
    }

    #[must_use]
    pub fn stat(&self, key: StatKey) -> Option<f64> {
        self.stats.get(key)
    }

    /// Value used when plotting this record on its own: missing reads as `0`.
    #[must_use]
    pub fn stat_or_zero(&self, key: StatKey) -> f64 {
        self.stat(key).unwrap_or(0.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
