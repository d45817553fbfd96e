//! Dependent views derived from `(dataset, selection)`.
//!
//! Everything here is a pure function of its inputs: the same selection always
//! yields identical view models, and nothing is mutated.

use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::labels::{format_mean, format_raw, stat_label, stat_lines};
use crate::core::{
    Dataset, GroupKey, RadarScaleDomain, Record, RecordId, StatKey, aggregate, generation_means,
    overall_means,
};

pub const SUMMARY_EMPTY_TEXT: &str = "None";
pub const BAR_TITLE_OVERALL: &str = "Overall Average Stats";
pub const RADAR_TITLE_GENERATIONS: &str = "Average Stats by Generation";

/// Bar y-domain when no positive mean exists.
pub const BAR_DOMAIN_FALLBACK: f64 = 10.0;
const BAR_DOMAIN_HEADROOM: f64 = 1.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarEntry {
    pub key: StatKey,
    pub label: String,
    /// `None` when the averaged set has no value for this attribute.
    pub value: Option<f64>,
    pub tooltip: String,
}

impl BarEntry {
    /// Text drawn above the bar; empty for placeholders.
    #[must_use]
    pub fn value_label(&self) -> String {
        match self.value {
            Some(value) if value != 0.0 => format!("{value:.1}"),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarViewModel {
    pub title: String,
    pub entries: Vec<BarEntry>,
    /// Upper end of the `[0, y_max]` value axis.
    pub y_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadarSource {
    GenerationAverages,
    SelectedRecords,
}

/// What a polygon's stroke color is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadarColorKey {
    /// Position of the generation in ascending generation order.
    Generation(usize),
    Category(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarPolygon {
    pub label: String,
    pub color_key: RadarColorKey,
    /// One value per radar axis (`StatKey::RADAR` order).
    pub values: Vec<Option<f64>>,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarViewModel {
    pub title: String,
    pub source: RadarSource,
    pub polygons: Vec<RadarPolygon>,
    pub domain: RadarScaleDomain,
    /// Generation legend is shown only for the averaged view.
    pub legend_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    pub text: String,
    pub selected_count: usize,
}

/// The three views recomputed after every selection transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModels {
    pub bar: BarViewModel,
    pub radar: RadarViewModel,
    pub summary: SummaryView,
}

/// Recomputes every dependent view from scratch.
///
/// Ids in `selection` that are not in `dataset` are skipped.
#[must_use]
pub fn recompute_views(
    dataset: &Dataset,
    selection: &IndexSet<RecordId>,
    summary_name_limit: usize,
) -> ViewModels {
    let selected: Vec<&Record> = selection.iter().filter_map(|id| dataset.get(id)).collect();
    ViewModels {
        bar: bar_view(dataset, &selected),
        radar: radar_view(dataset, &selected),
        summary: summary_view(&selected, summary_name_limit),
    }
}

#[must_use]
pub fn bar_view(dataset: &Dataset, selected: &[&Record]) -> BarViewModel {
    let (title, row) = if selected.is_empty() {
        (BAR_TITLE_OVERALL.to_owned(), overall_means(dataset))
    } else {
        (
            format!("Avg Stats (Selected: {})", selected.len()),
            aggregate(GroupKey::Selection, selected.iter().copied()),
        )
    };

    let entries: Vec<BarEntry> = StatKey::BAR
        .iter()
        .map(|&key| {
            let value = row.mean(key);
            BarEntry {
                key,
                label: stat_label(key).to_owned(),
                value,
                tooltip: format!("{}: {}", stat_label(key), format_mean(value)),
            }
        })
        .collect();

    let max = entries
        .iter()
        .filter_map(|entry| entry.value)
        .map(OrderedFloat)
        .max()
        .map(|value| value.0 * BAR_DOMAIN_HEADROOM);
    let y_max = match max {
        Some(max) if max.is_finite() && max != 0.0 => max,
        _ => BAR_DOMAIN_FALLBACK,
    };

    BarViewModel {
        title,
        entries,
        y_max,
    }
}

#[must_use]
pub fn radar_view(dataset: &Dataset, selected: &[&Record]) -> RadarViewModel {
    if selected.is_empty() {
        let polygons: Vec<RadarPolygon> = generation_means(dataset)
            .into_iter()
            .enumerate()
            .map(|(position, row)| {
                let label = match row.key {
                    GroupKey::Generation(generation) => format!("Gen {generation}"),
                    _ => String::new(),
                };
                RadarPolygon {
                    label,
                    color_key: RadarColorKey::Generation(position),
                    values: StatKey::RADAR.iter().map(|key| row.mean(*key)).collect(),
                    tooltip: row.tooltip,
                }
            })
            .collect();
        let domain = RadarScaleDomain::derive(polygons.iter().map(|p| p.values.iter().copied()));
        return RadarViewModel {
            title: RADAR_TITLE_GENERATIONS.to_owned(),
            source: RadarSource::GenerationAverages,
            polygons,
            domain,
            legend_visible: true,
        };
    }

    let polygons: Vec<RadarPolygon> = selected
        .iter()
        .map(|record| RadarPolygon {
            label: record.name.clone(),
            color_key: RadarColorKey::Category(record.category.clone()),
            values: StatKey::RADAR.iter().map(|key| record.stat(*key)).collect(),
            tooltip: record_tooltip(record),
        })
        .collect();
    let domain = RadarScaleDomain::derive(polygons.iter().map(|p| p.values.iter().copied()));
    RadarViewModel {
        title: format!("Selected Stats (Count: {})", selected.len()),
        source: RadarSource::SelectedRecords,
        polygons,
        domain,
        legend_visible: false,
    }
}

/// `"{name} (Gen {g}, {category})"` followed by one line per radar axis.
#[must_use]
pub fn record_tooltip(record: &Record) -> String {
    format!(
        "{} (Gen {}, {})\n{}",
        record.name,
        record.generation,
        record.category,
        stat_lines(&StatKey::RADAR, |key| record.stat(key), format_raw)
    )
}

#[must_use]
pub fn summary_view(selected: &[&Record], name_limit: usize) -> SummaryView {
    SummaryView {
        text: summary_text(selected.iter().map(|record| record.name.as_str()), name_limit),
        selected_count: selected.len(),
    }
}

/// Comma-joined names truncated to `limit` with an `", and N more"` suffix;
/// `"None"` when empty.
#[must_use]
pub fn summary_text<'a>(names: impl IntoIterator<Item = &'a str>, limit: usize) -> String {
    let names: Vec<&str> = names.into_iter().collect();
    if names.is_empty() {
        return SUMMARY_EMPTY_TEXT.to_owned();
    }
    if names.len() <= limit {
        return names.join(", ");
    }
    format!(
        "{}, and {} more",
        names[..limit].join(", "),
        names.len() - limit
    )
}
