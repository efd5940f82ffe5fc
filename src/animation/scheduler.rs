use std::hash::Hash;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::animation::Easing;
use crate::core::primitives::lerp;

/// Handle returned by a host frame clock for one pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRequestId(pub u64);

/// Host per-frame callback registration (`requestAnimationFrame` and friends).
///
/// The scheduler only asks for frames; the host later calls
/// `TransitionScheduler::advance` with the frame timestamp.
pub trait FrameClock {
    fn request_frame(&mut self) -> FrameRequestId;
    fn cancel_frame(&mut self, id: FrameRequestId);

    /// Called when the scheduler consumes the frame behind `id`.
    fn frame_delivered(&mut self, _id: FrameRequestId) {}
}

/// Headless clock that only records requests.
///
/// Used by tests and by hosts that drive `advance` from their own loop.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManualFrameClock {
    next_id: u64,
    outstanding: Vec<FrameRequestId>,
    pub requested_total: u64,
    pub canceled_total: u64,
}

impl ManualFrameClock {
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        !self.outstanding.is_empty()
    }

    #[must_use]
    pub fn outstanding(&self) -> &[FrameRequestId] {
        &self.outstanding
    }
}

impl FrameClock for ManualFrameClock {
    fn request_frame(&mut self) -> FrameRequestId {
        self.next_id += 1;
        self.requested_total += 1;
        let id = FrameRequestId(self.next_id);
        self.outstanding.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        let before = self.outstanding.len();
        self.outstanding.retain(|pending| *pending != id);
        if self.outstanding.len() != before {
            self.canceled_total += 1;
        }
    }

    fn frame_delivered(&mut self, id: FrameRequestId) {
        self.outstanding.retain(|pending| *pending != id);
    }
}

/// Duration and curve of one attribute transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionSpec {
    #[must_use]
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(250),
            easing: Easing::Linear,
        }
    }
}

/// Receiver of interpolated attribute values.
pub trait TransitionSink<K> {
    fn on_frame(&mut self, key: &K, value: f64);

    /// Fires exactly once per transition that runs to completion.
    fn on_complete(&mut self, key: &K, value: f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveTransition {
    from: f64,
    to: f64,
    spec: TransitionSpec,
    started_at: Option<Duration>,
}

impl ActiveTransition {
    fn progress(&self, now: Duration) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        if self.spec.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(started_at);
        (elapsed.as_secs_f64() / self.spec.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn value_at_progress(&self, progress: f64) -> f64 {
        lerp(self.from, self.to, self.spec.easing.apply(progress))
    }
}

/// Keyed, last-write-wins interpolation of numeric attributes.
///
/// Starting a transition on a key that is still running cancels the old run
/// without its completion callback. At most one frame request is outstanding.
pub struct TransitionScheduler<K, C>
where
    K: Eq + Hash + Clone,
    C: FrameClock,
{
    clock: C,
    transitions: IndexMap<K, ActiveTransition>,
    pending_frame: Option<FrameRequestId>,
    default_spec: TransitionSpec,
    disabled: bool,
}

impl<K, C> TransitionScheduler<K, C>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    C: FrameClock,
{
    #[must_use]
    pub fn new(clock: C, default_spec: TransitionSpec) -> Self {
        Self {
            clock,
            transitions: IndexMap::new(),
            pending_frame: None,
            default_spec,
            disabled: false,
        }
    }

    /// With animation disabled every `animate` call lands on its target at once.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn default_spec(&self) -> TransitionSpec {
        self.default_spec
    }

    pub fn set_default_spec(&mut self, spec: TransitionSpec) {
        self.default_spec = spec;
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    #[must_use]
    pub fn is_active(&self, key: &K) -> bool {
        self.transitions.contains_key(key)
    }

    #[must_use]
    pub fn active_len(&self) -> usize {
        self.transitions.len()
    }

    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Target value of a running transition.
    #[must_use]
    pub fn target(&self, key: &K) -> Option<f64> {
        self.transitions.get(key).map(|transition| transition.to)
    }

    /// Interpolated value of `key` at `now` without advancing anything.
    #[must_use]
    pub fn sample(&self, key: &K, now: Duration) -> Option<f64> {
        let transition = self.transitions.get(key)?;
        Some(transition.value_at_progress(transition.progress(now)))
    }

    pub fn animate<S>(&mut self, key: K, from: f64, to: f64, sink: &mut S)
    where
        S: TransitionSink<K> + ?Sized,
    {
        let spec = self.default_spec;
        self.animate_with(key, from, to, spec, sink);
    }

    pub fn animate_with<S>(&mut self, key: K, from: f64, to: f64, spec: TransitionSpec, sink: &mut S)
    where
        S: TransitionSink<K> + ?Sized,
    {
        if !from.is_finite() || !to.is_finite() {
            warn!(?key, from, to, "ignoring transition with non-finite endpoint");
            return;
        }

        if self.transitions.shift_remove(&key).is_some() {
            trace!(?key, "superseding running transition");
        }

        if self.disabled || spec.duration.is_zero() {
            sink.on_frame(&key, to);
            sink.on_complete(&key, to);
            self.release_frame_if_idle();
            return;
        }

        self.transitions.insert(
            key,
            ActiveTransition {
                from,
                to,
                spec,
                started_at: None,
            },
        );
        self.ensure_frame();
    }

    /// Delivers one frame at host timestamp `now`.
    ///
    /// A transition's clock starts at the first frame it sees, so that frame
    /// reports its `from` value.
    pub fn advance<S>(&mut self, now: Duration, sink: &mut S)
    where
        S: TransitionSink<K> + ?Sized,
    {
        if let Some(id) = self.pending_frame.take() {
            self.clock.frame_delivered(id);
        }
        if self.transitions.is_empty() {
            return;
        }

        let mut finished: Vec<(K, f64)> = Vec::new();
        for (key, transition) in &mut self.transitions {
            let started_at = *transition.started_at.get_or_insert(now);
            let progress = transition.progress(now);
            let value = transition.value_at_progress(progress);
            trace!(?key, progress, value, ?started_at, "transition frame");
            sink.on_frame(key, value);
            if progress >= 1.0 {
                finished.push((key.clone(), transition.to));
            }
        }

        for (key, value) in finished {
            self.transitions.shift_remove(&key);
            sink.on_complete(&key, value);
        }

        if !self.transitions.is_empty() {
            self.ensure_frame();
        }
    }

    /// Stops `key` without invoking its completion callback.
    pub fn cancel(&mut self, key: &K) -> bool {
        let removed = self.transitions.shift_remove(key).is_some();
        if removed {
            trace!(?key, "transition canceled");
            self.release_frame_if_idle();
        }
        removed
    }

    /// Stops every transition and returns the pending frame to the clock.
    pub fn cancel_all(&mut self) {
        if !self.transitions.is_empty() {
            debug!(count = self.transitions.len(), "canceling all transitions");
        }
        self.transitions.clear();
        if let Some(id) = self.pending_frame.take() {
            self.clock.cancel_frame(id);
        }
    }

    fn ensure_frame(&mut self) {
        if self.pending_frame.is_none() {
            self.pending_frame = Some(self.clock.request_frame());
        }
    }

    fn release_frame_if_idle(&mut self) {
        if self.transitions.is_empty() {
            if let Some(id) = self.pending_frame.take() {
                self.clock.cancel_frame(id);
            }
        }
    }
}

impl<K, C> Drop for TransitionScheduler<K, C>
where
    K: Eq + Hash + Clone,
    C: FrameClock,
{
    fn drop(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.clock.cancel_frame(id);
        }
    }
}
