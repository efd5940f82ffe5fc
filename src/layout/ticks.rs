use tracing::warn;

use crate::core::{Scale, ScaleValue, TickFormatFn, ValueKey, default_tick_label};

/// Labeled marker derived from a scale; never stored beyond one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: ScaleValue,
    pub key: ValueKey,
    pub position: f64,
    pub label: String,
    /// Anchoring tick kept in layout but excluded from labels and emphasis.
    pub reserved: bool,
}

/// Inputs of one layout pass besides the scale.
#[derive(Clone, Default)]
pub struct TickLayoutOptions {
    pub count: usize,
    pub tick_format: Option<TickFormatFn>,
    pub reserve_first_tick: bool,
}

impl std::fmt::Debug for TickLayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickLayoutOptions")
            .field("count", &self.count)
            .field("tick_format", &self.tick_format.as_ref().map(|_| "<fn>"))
            .field("reserve_first_tick", &self.reserve_first_tick)
            .finish()
    }
}

impl TickLayoutOptions {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tick_format(mut self, tick_format: Option<TickFormatFn>) -> Self {
        self.tick_format = tick_format;
        self
    }

    #[must_use]
    pub fn with_reserve_first_tick(mut self, reserve_first_tick: bool) -> Self {
        self.reserve_first_tick = reserve_first_tick;
        self
    }
}

/// Ticks for `count` with default labels.
#[must_use]
pub fn compute_ticks<S: Scale + ?Sized>(scale: &S, count: usize) -> Vec<Tick> {
    compute_ticks_with(scale, &TickLayoutOptions::new(count))
}

/// Ticks in natural domain order; empty for a zero count or degenerate scale.
#[must_use]
pub fn compute_ticks_with<S: Scale + ?Sized>(scale: &S, options: &TickLayoutOptions) -> Vec<Tick> {
    if options.count == 0 || scale.is_degenerate() {
        return Vec::new();
    }

    let offset = scale.tick_offset();
    let mut ticks = Vec::with_capacity(options.count);
    for value in scale.ticks(options.count) {
        let Some(position) = scale.to_position(&value) else {
            warn!(?value, "tick value cannot be positioned; skipping");
            continue;
        };
        let label = match &options.tick_format {
            Some(format) => format(&value),
            None => default_tick_label(&value),
        };
        ticks.push(Tick {
            key: value.key(),
            value,
            position: position + offset,
            label,
            reserved: false,
        });
    }

    if options.reserve_first_tick {
        if let Some(first) = ticks.first_mut() {
            first.reserved = true;
        }
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::{TickLayoutOptions, compute_ticks, compute_ticks_with};
    use crate::core::{LinearScale, PointScale, ScaleValue, tick_format};

    #[test]
    fn zero_count_yields_no_ticks() {
        let scale = LinearScale::new(0.0, 10.0).expect("valid scale");
        assert!(compute_ticks(&scale, 0).is_empty());
    }

    #[test]
    fn degenerate_domain_yields_no_ticks() {
        let scale = LinearScale::new(5.0, 5.0).expect("valid scale");
        assert!(compute_ticks(&scale, 4).is_empty());
        let empty = PointScale::new(Vec::<ScaleValue>::new());
        assert!(compute_ticks(&empty, 4).is_empty());
    }

    #[test]
    fn formatter_and_reserved_flag_are_applied() {
        let scale = LinearScale::new(100.0, 500.0).expect("valid scale");
        let options = TickLayoutOptions::new(5)
            .with_tick_format(Some(tick_format(|value| {
                format!("${}", value.as_number().unwrap_or_default())
            })))
            .with_reserve_first_tick(true);
        let ticks = compute_ticks_with(&scale, &options);

        let labels: Vec<&str> = ticks.iter().map(|tick| tick.label.as_str()).collect();
        assert_eq!(labels, vec!["$100", "$200", "$300", "$400", "$500"]);
        assert!(ticks[0].reserved);
        assert!(ticks[1..].iter().all(|tick| !tick.reserved));
    }
}
