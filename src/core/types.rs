use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

/// Domain-typed value accepted and produced by every scale.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleValue {
    Number(f64),
    Time(DateTime<Utc>),
    Category(String),
}

impl ScaleValue {
    /// Numeric projection used for continuous arithmetic.
    ///
    /// Times project to fractional Unix seconds; categories have no projection.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Time(time) => Some(datetime_to_unix_seconds(*time)),
            Self::Category(_) => None,
        }
    }

    #[must_use]
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(time) => Some(*time),
            _ => None,
        }
    }

    /// Hashable identity used for keyed lookups and tick reconciliation.
    #[must_use]
    pub fn key(&self) -> ValueKey {
        match self {
            Self::Number(value) => ValueKey::Number(OrderedFloat(*value)),
            Self::Time(time) => ValueKey::Time(time.timestamp_millis()),
            Self::Category(name) => ValueKey::Category(name.clone()),
        }
    }
}

/// Hashable mirror of `ScaleValue`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKey {
    Number(OrderedFloat<f64>),
    Time(i64),
    Category(String),
}

impl From<f64> for ScaleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for ScaleValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

impl From<&str> for ScaleValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_owned())
    }
}

impl From<String> for ScaleValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

/// One `{key, value}` sample of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesItem {
    pub key: ScaleValue,
    pub value: f64,
}

impl SeriesItem {
    #[must_use]
    pub fn new(key: impl Into<ScaleValue>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn from_decimal(key: impl Into<ScaleValue>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            key: key.into(),
            value: decimal_to_f64(value, "series value")?,
        })
    }
}

/// Named sequence of items sharing the chart-wide x-domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub items: Vec<SeriesItem>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>, items: Vec<SeriesItem>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            items,
        }
    }

    /// Rejects items whose value cannot be drawn.
    pub fn validate(&self) -> ChartResult<()> {
        for (index, item) in self.items.iter().enumerate() {
            if !item.value.is_finite() {
                return Err(ChartError::InvalidInput(format!(
                    "series `{}` item {index} has a non-finite value",
                    self.name
                )));
            }
            if item.key.as_number().is_some_and(|number| !number.is_finite()) {
                return Err(ChartError::InvalidInput(format!(
                    "series `{}` item {index} has a non-finite key",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Bounding box of the anchor element in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AnchorRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

impl Default for AnchorRect {
    fn default() -> Self {
        Self::sized(0.0, 0.0)
    }
}

/// Pointer sample in viewport coordinates, as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerInput {
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Pointer position relative to the anchor's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerOffset {
    pub x: f64,
    pub y: f64,
}
