use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::types::ScaleValue;
use crate::error::{ChartError, ChartResult};

/// Family a scale belongs to; decides tick and hover-resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    Linear,
    Time,
    Point,
    Band,
}

impl ScaleKind {
    #[must_use]
    pub const fn is_continuous(self) -> bool {
        matches!(self, Self::Linear | Self::Time)
    }
}

/// Domain introspection result.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleDomain {
    Continuous(ScaleValue, ScaleValue),
    Ordinal(Vec<ScaleValue>),
}

impl ScaleDomain {
    /// Number of distinct keys; `None` for continuous domains.
    #[must_use]
    pub fn key_count(&self) -> Option<usize> {
        match self {
            Self::Continuous(..) => None,
            Self::Ordinal(keys) => Some(keys.len()),
        }
    }
}

/// Bidirectional mapping between domain values and pixel positions.
///
/// Implementations are pure: the same input always maps to the same output,
/// which is what lets independently mounted components agree on hover state.
pub trait Scale {
    fn kind(&self) -> ScaleKind;

    /// Maps a domain value to a pixel position. `None` when the value does not
    /// belong to this scale's domain type (or key set, for ordinal scales).
    fn to_position(&self, value: &ScaleValue) -> Option<f64>;

    /// Maps a pixel position back to a domain value.
    fn invert(&self, position: f64) -> Option<ScaleValue>;

    fn domain(&self) -> ScaleDomain;

    fn range(&self) -> (f64, f64);

    /// Zero-length domain or single-point range.
    fn is_degenerate(&self) -> bool;

    /// Tick values in natural domain order for the requested count.
    fn ticks(&self, count: usize) -> Vec<ScaleValue>;

    /// Offset added to `to_position` when drawing a tick (band centers).
    fn tick_offset(&self) -> f64 {
        0.0
    }
}

/// Scale handle shared by components that must agree on positions.
pub type SharedScale = Rc<dyn Scale>;

/// Continuous numeric scale with an unclamped linear mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Creates a scale over `[domain_start, domain_end]` mapped to `[0, 1]`.
    ///
    /// Equal bounds are accepted and produce a degenerate scale that maps
    /// every value to the range start.
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidInput(
                "scale domain must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
        })
    }

    /// Fits the domain to the extent of `values`.
    pub fn from_extent(values: impl IntoIterator<Item = f64>) -> ChartResult<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            if !value.is_finite() {
                return Err(ChartError::InvalidInput(
                    "extent values must be finite".to_owned(),
                ));
            }
            min = min.min(value);
            max = max.max(value);
        }
        if min > max {
            return Err(ChartError::InvalidInput(
                "cannot fit a scale to an empty extent".to_owned(),
            ));
        }
        Self::new(min, max)
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidInput(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    #[must_use]
    pub fn domain_bounds(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range_bounds(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return self.range_start;
        }
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    #[must_use]
    pub fn tick_values(self, count: usize) -> Vec<f64> {
        if self.is_degenerate() {
            return Vec::new();
        }
        continuous_tick_values(self.domain_start, self.domain_end, count)
    }

    /// Zero-length domain or single-point range.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end || self.range_start == self.range_end
    }
}

impl Scale for LinearScale {
    fn kind(&self) -> ScaleKind {
        ScaleKind::Linear
    }

    fn to_position(&self, value: &ScaleValue) -> Option<f64> {
        match value {
            ScaleValue::Number(number) if number.is_finite() => Some(self.domain_to_pixel(*number)),
            _ => None,
        }
    }

    fn invert(&self, position: f64) -> Option<ScaleValue> {
        position
            .is_finite()
            .then(|| ScaleValue::Number(self.pixel_to_domain(position)))
    }

    fn domain(&self) -> ScaleDomain {
        ScaleDomain::Continuous(
            ScaleValue::Number(self.domain_start),
            ScaleValue::Number(self.domain_end),
        )
    }

    fn range(&self) -> (f64, f64) {
        self.range_bounds()
    }

    fn is_degenerate(&self) -> bool {
        LinearScale::is_degenerate(*self)
    }

    fn ticks(&self, count: usize) -> Vec<ScaleValue> {
        self.tick_values(count)
            .into_iter()
            .map(ScaleValue::Number)
            .collect()
    }
}

/// Picks `count` values for a continuous domain.
///
/// Round "nice" values are used when they land on exactly `count` ticks;
/// otherwise the domain is split into `count - 1` equal steps so both
/// endpoints are ticks.
pub(crate) fn continuous_tick_values(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return Vec::new();
    }
    if count == 1 {
        return vec![start];
    }

    let nice = nice_tick_values(start, stop, count);
    if nice.len() == count {
        return nice;
    }
    evenly_spaced_values(start, stop, count)
}

pub(crate) fn evenly_spaced_values(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = count - 1;
            let denominator = last as f64;
            (0..count)
                .map(|index| {
                    if index == last {
                        stop
                    } else {
                        start + (stop - start) * (index as f64) / denominator
                    }
                })
                .collect()
        }
    }
}

/// Round tick values with a 1/2/5 × 10^k step near `span / count`.
fn nice_tick_values(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let reversed = stop < start;
    let (lo, hi) = if reversed { (stop, start) } else { (start, stop) };

    let raw_step = (hi - lo) / count as f64;
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return Vec::new();
    }
    let power = raw_step.log10().floor();
    let error = raw_step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    // Sub-unit steps divide by an integral inverse to keep values exact.
    let mut values: Vec<f64> = if power < 0.0 {
        let inverse = (10f64.powf(-power) / factor).round();
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        if last < first || last - first > (count as i64).saturating_mul(4) {
            return Vec::new();
        }
        (first..=last).map(|i| i as f64 / inverse).collect()
    } else {
        let step = factor * 10f64.powf(power);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        if last < first || last - first > (count as i64).saturating_mul(4) {
            return Vec::new();
        }
        (first..=last).map(|i| i as f64 * step).collect()
    };

    if reversed {
        values.reverse();
    }
    values
}
