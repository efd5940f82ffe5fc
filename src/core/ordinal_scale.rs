use indexmap::IndexMap;

use crate::core::scale::{Scale, ScaleDomain, ScaleKind};
use crate::core::types::{ScaleValue, ValueKey};
use crate::error::{ChartError, ChartResult};

/// Ordered, de-duplicated key set shared by point and band scales.
#[derive(Debug, Clone, PartialEq, Default)]
struct OrdinalKeys {
    keys: IndexMap<ValueKey, ScaleValue>,
}

impl OrdinalKeys {
    fn new(keys: impl IntoIterator<Item = ScaleValue>) -> Self {
        let mut map = IndexMap::new();
        for key in keys {
            map.entry(key.key()).or_insert(key);
        }
        Self { keys: map }
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn index_of(&self, value: &ScaleValue) -> Option<usize> {
        self.keys.get_index_of(&value.key())
    }

    fn get(&self, index: usize) -> Option<&ScaleValue> {
        self.keys.get_index(index).map(|(_, value)| value)
    }

    fn values(&self) -> Vec<ScaleValue> {
        self.keys.values().cloned().collect()
    }
}

fn validate_range(range_start: f64, range_end: f64) -> ChartResult<()> {
    if !range_start.is_finite() || !range_end.is_finite() {
        return Err(ChartError::InvalidInput(
            "scale range must be finite".to_owned(),
        ));
    }
    Ok(())
}

fn validate_padding(name: &str, value: f64) -> ChartResult<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ChartError::InvalidInput(format!(
            "{name} must be finite and in [0, 1]"
        )));
    }
    Ok(value)
}

/// Evenly spaced indices that always keep the first key and, for `count >= 2`,
/// the last one.
#[must_use]
pub fn subsample_indices(len: usize, count: usize) -> Vec<usize> {
    let target = count.min(len);
    match target {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let last_index = (len - 1) as f64;
            let denominator = (target - 1) as f64;
            (0..target)
                .map(|step| ((step as f64) * last_index / denominator).round() as usize)
                .collect()
        }
    }
}

/// Ordinal scale placing each key on an evenly spaced point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    keys: OrdinalKeys,
    range_start: f64,
    range_end: f64,
    padding: f64,
}

impl PointScale {
    /// Duplicate keys keep their first occurrence. Range defaults to `[0, 1]`.
    #[must_use]
    pub fn new(keys: impl IntoIterator<Item = ScaleValue>) -> Self {
        Self {
            keys: OrdinalKeys::new(keys),
            range_start: 0.0,
            range_end: 1.0,
            padding: 0.0,
        }
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        validate_range(range_start, range_end)?;
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    /// Outer padding expressed in multiples of the point step.
    pub fn with_padding(mut self, padding: f64) -> ChartResult<Self> {
        self.padding = validate_padding("point padding", padding)?;
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.len() == 0
    }

    /// Distance between adjacent points, always non-negative.
    #[must_use]
    pub fn step(&self) -> f64 {
        let n = self.keys.len() as f64;
        let (lo, hi) = sorted(self.range_start, self.range_end);
        (hi - lo) / (n - 1.0 + self.padding * 2.0).max(1.0)
    }

    #[must_use]
    pub fn position_at(&self, index: usize) -> Option<f64> {
        let n = self.keys.len();
        if index >= n {
            return None;
        }
        let (lo, hi) = sorted(self.range_start, self.range_end);
        let step = self.step();
        let start = lo + (hi - lo - step * (n - 1) as f64) * 0.5;
        let slot = if self.range_end < self.range_start {
            n - 1 - index
        } else {
            index
        };
        Some(start + step * slot as f64)
    }

    /// Index of the point nearest to `position`.
    #[must_use]
    pub fn nearest_index(&self, position: f64) -> Option<usize> {
        let n = self.keys.len();
        if n == 0 || !position.is_finite() {
            return None;
        }
        let first = self.position_at(0)?;
        let step = self.step();
        if step == 0.0 {
            return Some(0);
        }
        let direction = if self.range_end < self.range_start {
            -1.0
        } else {
            1.0
        };
        let raw = ((position - first) * direction / step).round();
        Some(raw.clamp(0.0, (n - 1) as f64) as usize)
    }
}

impl Scale for PointScale {
    fn kind(&self) -> ScaleKind {
        ScaleKind::Point
    }

    fn to_position(&self, value: &ScaleValue) -> Option<f64> {
        self.position_at(self.keys.index_of(value)?)
    }

    fn invert(&self, position: f64) -> Option<ScaleValue> {
        let index = self.nearest_index(position)?;
        self.keys.get(index).cloned()
    }

    fn domain(&self) -> ScaleDomain {
        ScaleDomain::Ordinal(self.keys.values())
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    fn is_degenerate(&self) -> bool {
        self.keys.len() == 0 || self.range_start == self.range_end
    }

    fn ticks(&self, count: usize) -> Vec<ScaleValue> {
        if self.is_degenerate() {
            return Vec::new();
        }
        subsample_indices(self.keys.len(), count)
            .into_iter()
            .filter_map(|index| self.keys.get(index).cloned())
            .collect()
    }
}

/// Ordinal scale partitioning the range into equal bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    keys: OrdinalKeys,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    #[must_use]
    pub fn new(keys: impl IntoIterator<Item = ScaleValue>) -> Self {
        Self {
            keys: OrdinalKeys::new(keys),
            range_start: 0.0,
            range_end: 1.0,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        validate_range(range_start, range_end)?;
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    pub fn with_padding(mut self, padding_inner: f64, padding_outer: f64) -> ChartResult<Self> {
        self.padding_inner = validate_padding("band inner padding", padding_inner)?;
        self.padding_outer = validate_padding("band outer padding", padding_outer)?;
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.len() == 0
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        let n = self.keys.len() as f64;
        let (lo, hi) = sorted(self.range_start, self.range_end);
        (hi - lo) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0)
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start edge of the band at `index`.
    #[must_use]
    pub fn band_start(&self, index: usize) -> Option<f64> {
        let n = self.keys.len();
        if index >= n {
            return None;
        }
        let (lo, hi) = sorted(self.range_start, self.range_end);
        let step = self.step();
        let start = lo + (hi - lo - step * (n as f64 - self.padding_inner)) * 0.5;
        let slot = if self.range_end < self.range_start {
            n - 1 - index
        } else {
            index
        };
        Some(start + step * slot as f64)
    }

    /// Index of the band containing `position`, clamped to the outer bands.
    #[must_use]
    pub fn band_index(&self, position: f64) -> Option<usize> {
        let n = self.keys.len();
        if n == 0 || !position.is_finite() {
            return None;
        }
        let step = self.step();
        if step == 0.0 {
            return Some(0);
        }
        let (lo, hi) = sorted(self.range_start, self.range_end);
        let start = lo + (hi - lo - step * (n as f64 - self.padding_inner)) * 0.5;
        let slot = ((position - start) / step)
            .floor()
            .clamp(0.0, (n - 1) as f64) as usize;
        if self.range_end < self.range_start {
            Some(n - 1 - slot)
        } else {
            Some(slot)
        }
    }
}

impl Scale for BandScale {
    fn kind(&self) -> ScaleKind {
        ScaleKind::Band
    }

    fn to_position(&self, value: &ScaleValue) -> Option<f64> {
        self.band_start(self.keys.index_of(value)?)
    }

    fn invert(&self, position: f64) -> Option<ScaleValue> {
        let index = self.band_index(position)?;
        self.keys.get(index).cloned()
    }

    fn domain(&self) -> ScaleDomain {
        ScaleDomain::Ordinal(self.keys.values())
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    fn is_degenerate(&self) -> bool {
        self.keys.len() == 0 || self.range_start == self.range_end
    }

    fn ticks(&self, count: usize) -> Vec<ScaleValue> {
        if self.is_degenerate() {
            return Vec::new();
        }
        subsample_indices(self.keys.len(), count)
            .into_iter()
            .filter_map(|index| self.keys.get(index).cloned())
            .collect()
    }

    fn tick_offset(&self) -> f64 {
        self.bandwidth() / 2.0
    }
}

fn sorted(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
