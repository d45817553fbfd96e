use crate::core::StatKey;

/// Display label for bar axes, legends and scatter tooltips.
#[must_use]
pub const fn stat_label(key: StatKey) -> &'static str {
    match key {
        StatKey::Hp => "HP",
        StatKey::Attack => "Attack",
        StatKey::Defense => "Defense",
        StatKey::SpAtk => "Sp. Atk",
        StatKey::SpDef => "Sp. Def",
        StatKey::Speed => "Speed",
        StatKey::Total => "Total",
    }
}

/// Compact label used on radar axes and polygon tooltips.
#[must_use]
pub const fn stat_short_label(key: StatKey) -> &'static str {
    match key {
        StatKey::SpAtk => "Sp.Atk",
        StatKey::SpDef => "Sp.Def",
        other => stat_label(other),
    }
}

pub const MISSING_VALUE_LABEL: &str = "N/A";

/// Formats an averaged value with one decimal, or the placeholder.
///
/// A mean of exactly zero is shown as the placeholder too, matching how
/// averaged tooltips have always read.
#[must_use]
pub fn format_mean(value: Option<f64>) -> String {
    match value {
        Some(value) if value != 0.0 => format!("{value:.1}"),
        _ => MISSING_VALUE_LABEL.to_owned(),
    }
}

/// Formats a raw record value without forcing decimals (`45`, `72.5`).
#[must_use]
pub fn format_raw(value: Option<f64>) -> String {
    match value {
        Some(value) if value != 0.0 => format!("{value}"),
        _ => MISSING_VALUE_LABEL.to_owned(),
    }
}

/// Multi-line `label: value` listing over `keys`.
#[must_use]
pub fn stat_lines(
    keys: &[StatKey],
    value_of: impl Fn(StatKey) -> Option<f64>,
    format: fn(Option<f64>) -> String,
) -> String {
    keys.iter()
        .map(|key| format!("{}: {}", stat_short_label(*key), format(value_of(*key))))
        .collect::<Vec<_>>()
        .join("\n")
}
