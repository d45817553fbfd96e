use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::core::{Record, RecordId, StatKey};
use crate::error::{ChartError, ChartResult};

/// Raw CSV row. Every column is optional so that a missing value drops the row
/// instead of failing the whole load.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Type_1", default)]
    type_1: Option<String>,
    #[serde(rename = "Type_2", default)]
    type_2: Option<String>,
    #[serde(rename = "HP", default)]
    hp: Option<String>,
    #[serde(rename = "Attack", default)]
    attack: Option<String>,
    #[serde(rename = "Defense", default)]
    defense: Option<String>,
    #[serde(rename = "Sp_Atk", default)]
    sp_atk: Option<String>,
    #[serde(rename = "Sp_Def", default)]
    sp_def: Option<String>,
    #[serde(rename = "Speed", default)]
    speed: Option<String>,
    #[serde(rename = "Total", default)]
    total: Option<String>,
    #[serde(rename = "Generation", default)]
    generation: Option<String>,
    #[serde(rename = "isLegendary", default)]
    is_legendary: Option<String>,
}

/// Row accounting for one CSV load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}

/// Immutable record collection in load order, addressable by id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    records: IndexMap<RecordId, Record>,
    categories: Vec<String>,
    generations: Vec<u32>,
}

impl Dataset {
    /// Builds a dataset from already-typed records. Ids must be unique.
    pub fn new(records: Vec<Record>) -> ChartResult<Self> {
        let mut by_id = IndexMap::with_capacity(records.len());
        for record in records {
            if record.generation == 0 {
                return Err(ChartError::InvalidData(format!(
                    "record `{}` has generation 0; generations start at 1",
                    record.id
                )));
            }
            if by_id.contains_key(&record.id) {
                return Err(ChartError::InvalidData(format!(
                    "duplicate record id `{}`",
                    record.id
                )));
            }
            by_id.insert(record.id.clone(), record);
        }

        let categories: BTreeSet<String> =
            by_id.values().map(|record| record.category.clone()).collect();
        let generations: BTreeSet<u32> = by_id.values().map(|record| record.generation).collect();

        Ok(Self {
            records: by_id,
            categories: categories.into_iter().collect(),
            generations: generations.into_iter().collect(),
        })
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> ChartResult<(Self, LoadReport)> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            ChartError::DatasetLoad(format!("failed to open `{}`: {err}", path.display()))
        })?;
        Self::from_csv_reader(file)
    }

    /// Parses a headered CSV stream. Malformed rows are dropped and counted in
    /// the returned report; only I/O failures abort the load.
    pub fn from_csv_reader<Rd: Read>(reader: Rd) -> ChartResult<(Self, LoadReport)> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Fields)
            .from_reader(reader);

        let mut report = LoadReport::default();
        let mut records = Vec::new();
        for row in csv_reader.deserialize::<RawRow>() {
            report.rows_read += 1;
            let row = match row {
                Ok(row) => row,
                Err(err) if err.is_io_error() => {
                    return Err(ChartError::DatasetLoad(format!("failed to read csv: {err}")));
                }
                Err(err) => {
                    trace!(error = %err, row = report.rows_read, "dropping undecodable row");
                    report.rows_dropped += 1;
                    continue;
                }
            };
            match clean_row(row, records.len()) {
                Some(record) => records.push(record),
                None => report.rows_dropped += 1,
            }
        }
        report.rows_kept = records.len();

        let dataset = Self::new(records)?;
        info!(
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            rows_dropped = report.rows_dropped,
            "dataset loaded"
        );
        Ok((dataset, report))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl ExactSizeIterator<Item = &Record> + Clone {
        self.records.values()
    }

    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.get(id)
    }

    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Record> {
        self.records.get_index(index).map(|(_, record)| record)
    }

    #[must_use]
    pub fn index_of(&self, id: &RecordId) -> Option<usize> {
        self.records.get_index_of(id)
    }

    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.contains_key(id)
    }

    /// Distinct primary categories, sorted.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Distinct generations, ascending.
    #[must_use]
    pub fn generations(&self) -> &[u32] {
        &self.generations
    }

    /// Largest finite value of `key`, or `None` when no record carries it.
    #[must_use]
    pub fn max_stat(&self, key: StatKey) -> Option<f64> {
        self.records()
            .filter_map(|record| record.stat(key))
            .map(ordered_float::OrderedFloat)
            .max()
            .map(|value| value.0)
    }
}

fn clean_row(row: RawRow, index: usize) -> Option<Record> {
    let name = non_empty(row.name)?;
    let category = non_empty(row.type_1)?;
    let generation = parse_generation(row.generation.as_deref()?)?;

    let mut record = Record::new(RecordId::for_row(index, &name), name, category, generation);
    for (key, raw) in [
        (StatKey::Hp, row.hp),
        (StatKey::Attack, row.attack),
        (StatKey::Defense, row.defense),
        (StatKey::SpAtk, row.sp_atk),
        (StatKey::SpDef, row.sp_def),
        (StatKey::Speed, row.speed),
    ] {
        let value = parse_number(raw.as_deref()?)?;
        record.stats.set(key, Some(value));
    }
    record
        .stats
        .set(StatKey::Total, row.total.as_deref().and_then(parse_number));
    record.secondary_category = non_empty(row.type_2);
    record.is_notable = parse_flag(row.is_legendary.as_deref());

    if record.stat(StatKey::Total).is_none() {
        debug!(id = %record.id, "record has no total");
    }
    Some(record)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_generation(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let generation = match raw.parse::<u32>() {
        Ok(value) => value,
        Err(_) => {
            let value = parse_number(raw)?;
            if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
                return None;
            }
            value as u32
        }
    };
    (generation > 0).then_some(generation)
}

/// Accepts `True`, `true` and `1` as set; anything else is unset.
#[must_use]
pub fn parse_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some("True" | "true" | "1"))
}
