use std::sync::Arc;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::core::types::ScaleValue;

/// Host-supplied label formatter (`tickFormat`).
pub type TickFormatFn = Arc<dyn Fn(&ScaleValue) -> String + Send + Sync + 'static>;

/// Builds a formatter from any closure.
pub fn tick_format<F>(formatter: F) -> TickFormatFn
where
    F: Fn(&ScaleValue) -> String + Send + Sync + 'static,
{
    Arc::new(formatter)
}

/// Formatter rendering time values with a `chrono` strftime pattern.
///
/// Non-time values fall back to `default_tick_label`.
#[must_use]
pub fn time_format(pattern: &str) -> TickFormatFn {
    let pattern = pattern.to_owned();
    Arc::new(move |value: &ScaleValue| match value {
        ScaleValue::Time(time) => time.format(&pattern).to_string(),
        other => default_tick_label(other),
    })
}

/// Label used when no formatter is configured.
#[must_use]
pub fn default_tick_label(value: &ScaleValue) -> String {
    match value {
        ScaleValue::Number(number) => format_number(*number),
        ScaleValue::Time(time) => format_time_adaptive(*time),
        ScaleValue::Category(name) => name.clone(),
    }
}

/// Shortest decimal rendering with float noise removed (`0.30000000000000004` → `0.3`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let rounded = (value * 1e10).round() / 1e10;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    format!("{rounded}")
}

/// Picks the coarsest calendar unit that identifies the instant.
#[must_use]
pub fn format_time_adaptive(time: DateTime<Utc>) -> String {
    let midnight = time.hour() == 0 && time.minute() == 0 && time.second() == 0;
    if midnight && time.month() == 1 && time.day() == 1 {
        time.format("%Y").to_string()
    } else if midnight && time.day() == 1 {
        time.format("%B").to_string()
    } else if midnight {
        time.format("%b %d").to_string()
    } else {
        time.format("%H:%M").to_string()
    }
}

/// Title shown in tooltip content for a hovered key.
#[must_use]
pub fn tooltip_title(value: &ScaleValue) -> String {
    match value {
        ScaleValue::Time(time) => time.format("%b %d, %Y").to_string(),
        other => default_tick_label(other),
    }
}
