use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use approx::assert_abs_diff_eq;
use chart_primitives::animation::{
    Easing, FrameClock, FrameRequestId, ManualFrameClock, TransitionScheduler, TransitionSink,
    TransitionSpec,
};

#[derive(Debug, Default)]
struct ClockLog {
    next_id: u64,
    outstanding: Vec<FrameRequestId>,
    canceled: Vec<FrameRequestId>,
}

/// Clock whose bookkeeping outlives the scheduler that owns it.
#[derive(Debug, Clone, Default)]
struct SharedClock {
    log: Rc<RefCell<ClockLog>>,
}

impl FrameClock for SharedClock {
    fn request_frame(&mut self) -> FrameRequestId {
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        let id = FrameRequestId(log.next_id);
        log.outstanding.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        let mut log = self.log.borrow_mut();
        log.outstanding.retain(|pending| *pending != id);
        log.canceled.push(id);
    }

    fn frame_delivered(&mut self, id: FrameRequestId) {
        self.log.borrow_mut().outstanding.retain(|pending| *pending != id);
    }
}

#[derive(Debug, Default)]
struct Attrs {
    frames: Vec<(u8, f64)>,
    completed: Vec<(u8, f64)>,
}

impl TransitionSink<u8> for Attrs {
    fn on_frame(&mut self, key: &u8, value: f64) {
        self.frames.push((*key, value));
    }

    fn on_complete(&mut self, key: &u8, value: f64) {
        self.completed.push((*key, value));
    }
}

fn spec(millis: u64) -> TransitionSpec {
    TransitionSpec::new(Duration::from_millis(millis), Easing::Linear)
}

#[test]
fn disabled_animation_applies_final_value_synchronously() {
    let mut scheduler =
        TransitionScheduler::new(ManualFrameClock::default(), spec(250)).with_disabled(true);
    let mut attrs = Attrs::default();

    scheduler.animate(0, 0.0, 1.0, &mut attrs);

    assert_eq!(attrs.frames, vec![(0, 1.0)]);
    assert_eq!(attrs.completed, vec![(0, 1.0)]);
    assert_eq!(scheduler.clock().requested_total, 0);
    assert!(!scheduler.needs_frame());
}

#[test]
fn zero_duration_behaves_like_disabled() {
    let mut scheduler = TransitionScheduler::new(ManualFrameClock::default(), spec(0));
    let mut attrs = Attrs::default();

    scheduler.animate(3, 5.0, -5.0, &mut attrs);

    assert_eq!(attrs.completed, vec![(3, -5.0)]);
    assert!(!scheduler.clock().has_pending_frame());
}

#[test]
fn newer_transition_supersedes_without_completing_the_old_one() {
    let mut scheduler = TransitionScheduler::new(ManualFrameClock::default(), spec(100));
    let mut attrs = Attrs::default();

    scheduler.animate(0, 0.0, 1.0, &mut attrs);
    scheduler.advance(Duration::from_millis(0), &mut attrs);
    scheduler.advance(Duration::from_millis(40), &mut attrs);
    scheduler.animate(0, 0.4, 0.0, &mut attrs);
    assert_eq!(scheduler.target(&0), Some(0.0));

    scheduler.advance(Duration::from_millis(50), &mut attrs);
    scheduler.advance(Duration::from_millis(150), &mut attrs);

    assert_eq!(attrs.completed, vec![(0, 0.0)]);
    let (_, last) = attrs.frames[attrs.frames.len() - 1];
    assert_eq!(last, 0.0);
}

#[test]
fn concurrent_keys_share_a_single_frame_request() {
    let clock = SharedClock::default();
    let log = Rc::clone(&clock.log);
    let mut scheduler = TransitionScheduler::new(clock, spec(100));
    let mut attrs = Attrs::default();

    for key in 0..4 {
        scheduler.animate(key, 0.0, 1.0, &mut attrs);
        assert!(log.borrow().outstanding.len() <= 1);
    }
    assert_eq!(log.borrow().outstanding.len(), 1);

    scheduler.advance(Duration::from_millis(0), &mut attrs);
    assert_eq!(log.borrow().outstanding.len(), 1);
    scheduler.advance(Duration::from_millis(50), &mut attrs);
    let halfway: Vec<f64> = attrs.frames[4..8].iter().map(|(_, value)| *value).collect();
    for value in halfway {
        assert_abs_diff_eq!(value, 0.5, epsilon = 1e-12);
    }

    scheduler.advance(Duration::from_millis(100), &mut attrs);
    assert_eq!(attrs.completed.len(), 4);
    assert!(log.borrow().outstanding.is_empty());
}

#[test]
fn dropping_the_scheduler_cancels_its_pending_frame() {
    let clock = SharedClock::default();
    let log = Rc::clone(&clock.log);
    let mut attrs = Attrs::default();
    {
        let mut scheduler = TransitionScheduler::new(clock, spec(100));
        scheduler.animate(1, 0.0, 1.0, &mut attrs);
        assert_eq!(log.borrow().outstanding.len(), 1);
    }

    assert!(log.borrow().outstanding.is_empty());
    assert_eq!(log.borrow().canceled.len(), 1);
    assert!(attrs.completed.is_empty());
}

#[test]
fn cancel_stops_a_single_key_silently() {
    let mut scheduler = TransitionScheduler::new(ManualFrameClock::default(), spec(100));
    let mut attrs = Attrs::default();

    scheduler.animate(0, 0.0, 1.0, &mut attrs);
    scheduler.animate(1, 0.0, 1.0, &mut attrs);
    assert!(scheduler.cancel(&0));
    assert!(!scheduler.cancel(&0));
    assert!(scheduler.needs_frame());

    scheduler.advance(Duration::from_millis(0), &mut attrs);
    scheduler.advance(Duration::from_millis(100), &mut attrs);
    assert_eq!(attrs.completed, vec![(1, 1.0)]);
    assert!(attrs.frames.iter().all(|(key, _)| *key == 1));
}

#[test]
fn non_finite_endpoints_are_ignored() {
    let mut scheduler = TransitionScheduler::new(ManualFrameClock::default(), spec(100));
    let mut attrs = Attrs::default();

    scheduler.animate(0, f64::NAN, 1.0, &mut attrs);
    assert_eq!(scheduler.active_len(), 0);
    assert!(!scheduler.needs_frame());
    assert!(attrs.frames.is_empty());
}

#[test]
fn eased_transition_pins_its_endpoints() {
    let mut scheduler = TransitionScheduler::new(
        ManualFrameClock::default(),
        TransitionSpec::new(Duration::from_millis(200), Easing::CubicInOut),
    );
    let mut attrs = Attrs::default();

    scheduler.animate(7, 10.0, 20.0, &mut attrs);
    scheduler.advance(Duration::from_millis(1_000), &mut attrs);
    scheduler.advance(Duration::from_millis(1_100), &mut attrs);
    scheduler.advance(Duration::from_millis(1_200), &mut attrs);

    assert_eq!(attrs.frames.first(), Some(&(7, 10.0)));
    assert_abs_diff_eq!(attrs.frames[1].1, 15.0, epsilon = 1e-9);
    assert_eq!(attrs.completed, vec![(7, 20.0)]);
}
