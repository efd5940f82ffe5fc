use std::time::Duration;

use indexmap::IndexMap;
use tracing::debug;

use crate::animation::{FrameClock, TransitionScheduler, TransitionSink, TransitionSpec};
use crate::layout::{Tick, TickDiff, TickKey, diff_ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TickAttr {
    Opacity,
    Position,
}

pub(crate) type TickAttrKey = (TickKey, TickAttr);

/// Painted state of one tick group.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TickVisual {
    pub tick: Tick,
    pub opacity: f64,
    pub position: f64,
    pub exiting: bool,
}

#[derive(Debug, Default)]
struct TickVisuals {
    entries: IndexMap<TickKey, TickVisual>,
}

impl TransitionSink<TickAttrKey> for TickVisuals {
    fn on_frame(&mut self, (key, attr): &TickAttrKey, value: f64) {
        if let Some(visual) = self.entries.get_mut(key) {
            match attr {
                TickAttr::Opacity => visual.opacity = value,
                TickAttr::Position => visual.position = value,
            }
        }
    }

    fn on_complete(&mut self, key: &TickAttrKey, value: f64) {
        self.on_frame(key, value);
        let (key, attr) = key;
        let faded_out = *attr == TickAttr::Opacity
            && self.entries.get(key).is_some_and(|visual| visual.exiting);
        if faded_out {
            self.entries.shift_remove(key);
        }
    }
}

/// Enter/update/exit lifecycle of a tick set across layout passes.
///
/// Entering ticks fade 0 → 1, moved ticks slide to their new position and
/// exiting ticks fade to 0 before they are dropped.
pub(crate) struct TickTrack<C: FrameClock> {
    visuals: TickVisuals,
    scheduler: TransitionScheduler<TickAttrKey, C>,
}

impl<C: FrameClock> TickTrack<C> {
    pub(crate) fn new(clock: C, spec: TransitionSpec, disable_animation: bool) -> Self {
        Self {
            visuals: TickVisuals::default(),
            scheduler: TransitionScheduler::new(clock, spec).with_disabled(disable_animation),
        }
    }

    /// Ticks of the latest layout pass, in layout order.
    pub(crate) fn live_ticks(&self) -> impl Iterator<Item = &Tick> {
        self.visuals
            .entries
            .values()
            .filter(|visual| !visual.exiting)
            .map(|visual| &visual.tick)
    }

    pub(crate) fn live_len(&self) -> usize {
        self.live_ticks().count()
    }

    /// Every painted tick: live ones in layout order, then fading exits.
    pub(crate) fn visuals(&self) -> impl Iterator<Item = &TickVisual> {
        self.visuals.entries.values()
    }

    pub(crate) fn needs_frame(&self) -> bool {
        self.scheduler.needs_frame()
    }

    pub(crate) fn clock(&self) -> &C {
        self.scheduler.clock()
    }

    pub(crate) fn update(&mut self, ticks: Vec<Tick>) -> TickDiff {
        let previous: Vec<Tick> = self.live_ticks().cloned().collect();
        let diff = diff_ticks(&previous, &ticks);
        if !diff.is_unchanged() {
            debug!(
                enters = diff.enters.len(),
                updates = diff.updates.len(),
                exits = diff.exits.len(),
                "tick set reconciled"
            );
        }

        let mut pending: Vec<(TickAttrKey, f64, f64)> = Vec::new();
        for tick in &diff.exits {
            if let Some(visual) = self.visuals.entries.get_mut(&tick.key) {
                visual.exiting = true;
                pending.push(((tick.key.clone(), TickAttr::Opacity), visual.opacity, 0.0));
            }
        }

        let mut next = IndexMap::with_capacity(ticks.len());
        for tick in ticks {
            let key = tick.key.clone();
            let visual = match self.visuals.entries.shift_remove(&key) {
                Some(mut visual) => {
                    if visual.exiting {
                        visual.exiting = false;
                        pending.push(((key.clone(), TickAttr::Opacity), visual.opacity, 1.0));
                    }
                    if visual.position != tick.position {
                        pending.push((
                            (key.clone(), TickAttr::Position),
                            visual.position,
                            tick.position,
                        ));
                    }
                    visual.tick = tick;
                    visual
                }
                None => {
                    pending.push(((key.clone(), TickAttr::Opacity), 0.0, 1.0));
                    TickVisual {
                        position: tick.position,
                        tick,
                        opacity: 0.0,
                        exiting: false,
                    }
                }
            };
            next.insert(key, visual);
        }
        next.extend(self.visuals.entries.drain(..));
        self.visuals.entries = next;

        for (key, from, to) in pending {
            self.scheduler.animate(key, from, to, &mut self.visuals);
        }
        diff
    }

    pub(crate) fn advance(&mut self, now: Duration) {
        self.scheduler.advance(now, &mut self.visuals);
    }

    /// Stops every transition and drops ticks that were fading out.
    pub(crate) fn cancel_all(&mut self) {
        self.scheduler.cancel_all();
        self.visuals.entries.retain(|_, visual| !visual.exiting);
    }
}
