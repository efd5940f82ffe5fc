use indexmap::IndexMap;

use crate::core::ValueKey;
use crate::layout::Tick;

/// Tick present in both passes.
#[derive(Debug, Clone, PartialEq)]
pub struct TickUpdate {
    pub previous: Tick,
    pub current: Tick,
}

impl TickUpdate {
    #[must_use]
    pub fn moved(&self) -> bool {
        self.previous.position != self.current.position
    }
}

/// Keyed enter/update/exit split between two layout passes.
///
/// `enters` and `updates` follow the new order, `exits` the old order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickDiff {
    pub enters: Vec<Tick>,
    pub updates: Vec<TickUpdate>,
    pub exits: Vec<Tick>,
}

impl TickDiff {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.enters.is_empty()
            && self.exits.is_empty()
            && self.updates.iter().all(|update| update.previous == update.current)
    }
}

#[must_use]
pub fn diff_ticks(old: &[Tick], new: &[Tick]) -> TickDiff {
    let mut previous: IndexMap<&ValueKey, &Tick> =
        old.iter().map(|tick| (&tick.key, tick)).collect();

    let mut diff = TickDiff::default();
    for tick in new {
        match previous.shift_remove(&tick.key) {
            Some(prior) => diff.updates.push(TickUpdate {
                previous: prior.clone(),
                current: tick.clone(),
            }),
            None => diff.enters.push(tick.clone()),
        }
    }
    diff.exits = previous.into_values().cloned().collect();
    diff
}

#[cfg(test)]
mod tests {
    use super::diff_ticks;
    use crate::core::LinearScale;
    use crate::layout::compute_ticks;

    #[test]
    fn splits_by_tick_value() {
        let before = LinearScale::new(0.0, 4.0)
            .and_then(|scale| scale.with_range(0.0, 400.0))
            .expect("valid scale");
        let after = LinearScale::new(2.0, 6.0)
            .and_then(|scale| scale.with_range(0.0, 400.0))
            .expect("valid scale");

        let diff = diff_ticks(&compute_ticks(&before, 5), &compute_ticks(&after, 5));

        let labels = |ticks: Vec<&str>| ticks.into_iter().map(str::to_owned).collect::<Vec<_>>();
        assert_eq!(
            diff.enters.iter().map(|t| t.label.clone()).collect::<Vec<_>>(),
            labels(vec!["5", "6"])
        );
        assert_eq!(
            diff.updates
                .iter()
                .map(|u| u.current.label.clone())
                .collect::<Vec<_>>(),
            labels(vec!["2", "3", "4"])
        );
        assert_eq!(
            diff.exits.iter().map(|t| t.label.clone()).collect::<Vec<_>>(),
            labels(vec!["0", "1"])
        );
        assert!(diff.updates.iter().all(|update| update.moved()));
    }

    #[test]
    fn identical_passes_are_unchanged() {
        let scale = LinearScale::new(0.0, 4.0).expect("valid scale");
        let ticks = compute_ticks(&scale, 5);
        assert!(diff_ticks(&ticks, &ticks).is_unchanged());
    }
}
