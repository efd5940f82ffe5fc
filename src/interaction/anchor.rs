use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::core::{AnchorRect, PointerInput, PointerOffset};
use crate::interaction::pointer_offset;

/// Receiver of pointer events delivered over an anchor.
///
/// `bounds` is the anchor rectangle at dispatch time, so listeners never
/// cache geometry that a resize could invalidate.
pub trait PointerListener {
    fn pointer_enter(&mut self, input: PointerInput, bounds: AnchorRect) {
        self.pointer_move(input, bounds);
    }

    fn pointer_move(&mut self, input: PointerInput, bounds: AnchorRect);

    fn pointer_leave(&mut self);
}

struct AnchorInner {
    bounds: Cell<AnchorRect>,
    mounted: Cell<bool>,
    listeners: RefCell<Vec<Weak<RefCell<dyn PointerListener>>>>,
}

/// Read-only, cloneable view of the overlay's interaction rectangle.
///
/// Only the owning overlay can move the bounds or dispatch events; every
/// other holder can read geometry and register listeners.
#[derive(Clone)]
pub struct AnchorHandle {
    inner: Rc<AnchorInner>,
}

impl fmt::Debug for AnchorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorHandle")
            .field("bounds", &self.inner.bounds.get())
            .field("mounted", &self.inner.mounted.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl AnchorHandle {
    pub(crate) fn new(bounds: AnchorRect) -> Self {
        Self {
            inner: Rc::new(AnchorInner {
                bounds: Cell::new(bounds),
                mounted: Cell::new(true),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> AnchorRect {
        self.inner.bounds.get()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    #[must_use]
    pub fn offset_of(&self, input: PointerInput) -> PointerOffset {
        pointer_offset(input, self.bounds())
    }

    /// Registers `listener` for pointer events. The anchor holds it weakly.
    pub fn attach<L>(&self, listener: &Rc<RefCell<L>>) -> bool
    where
        L: PointerListener + 'static,
    {
        if !self.is_mounted() {
            debug!("anchor already unmounted; listener not attached");
            return false;
        }
        let listener: Rc<RefCell<dyn PointerListener>> = listener.clone();
        let mut listeners = self.inner.listeners.borrow_mut();
        listeners.retain(|weak| weak.strong_count() > 0);
        if listeners
            .iter()
            .any(|weak| std::ptr::addr_eq(weak.as_ptr(), Rc::as_ptr(&listener)))
        {
            return true;
        }
        listeners.push(Rc::downgrade(&listener));
        debug!(listeners = listeners.len(), "pointer listener attached");
        true
    }

    pub fn detach<L>(&self, listener: &Rc<RefCell<L>>) -> bool
    where
        L: PointerListener + 'static,
    {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|weak| {
            weak.strong_count() > 0 && !std::ptr::addr_eq(weak.as_ptr(), Rc::as_ptr(listener))
        });
        before != listeners.len()
    }

    /// Number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    #[must_use]
    pub fn same_anchor(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn set_bounds(&self, bounds: AnchorRect) {
        self.inner.bounds.set(bounds);
    }

    pub(crate) fn unmount(&self) {
        self.inner.mounted.set(false);
        self.inner.listeners.borrow_mut().clear();
    }

    pub(crate) fn dispatch_enter(&self, input: PointerInput) {
        let bounds = self.bounds();
        self.dispatch(|listener| listener.pointer_enter(input, bounds));
    }

    pub(crate) fn dispatch_move(&self, input: PointerInput) {
        let bounds = self.bounds();
        self.dispatch(|listener| listener.pointer_move(input, bounds));
    }

    pub(crate) fn dispatch_leave(&self) {
        self.dispatch(|listener| listener.pointer_leave());
    }

    fn dispatch(&self, mut deliver: impl FnMut(&mut dyn PointerListener)) {
        if !self.is_mounted() {
            return;
        }
        // Snapshot so listeners may attach or detach during delivery.
        let live: Vec<Rc<RefCell<dyn PointerListener>>> = {
            let mut listeners = self.inner.listeners.borrow_mut();
            listeners.retain(|weak| weak.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        trace!(listeners = live.len(), "dispatching pointer event");
        for listener in live {
            match listener.try_borrow_mut() {
                Ok(mut listener) => deliver(&mut *listener),
                Err(_) => warn!("pointer listener is busy; event dropped for it"),
            }
        }
    }
}

/// Attaches `listener` when an anchor is present.
///
/// Without an anchor nothing is attached and the listener's highlight state
/// stays idle for its whole lifetime.
pub fn mount_listener<L>(anchor: Option<&AnchorHandle>, listener: &Rc<RefCell<L>>) -> bool
where
    L: PointerListener + 'static,
{
    match anchor {
        Some(anchor) => anchor.attach(listener),
        None => {
            debug!("no anchor supplied; pointer listeners not attached");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{AnchorHandle, PointerListener, mount_listener};
    use crate::core::{AnchorRect, PointerInput};

    #[derive(Default)]
    struct Recorder {
        moves: Vec<f64>,
        leaves: usize,
    }

    impl PointerListener for Recorder {
        fn pointer_move(&mut self, input: PointerInput, bounds: AnchorRect) {
            self.moves.push(input.client_x - bounds.x);
        }

        fn pointer_leave(&mut self) {
            self.leaves += 1;
        }
    }

    #[test]
    fn dispatch_reaches_every_live_listener() {
        let anchor = AnchorHandle::new(AnchorRect::new(10.0, 0.0, 200.0, 100.0));
        let first = Rc::new(RefCell::new(Recorder::default()));
        let second = Rc::new(RefCell::new(Recorder::default()));
        assert!(anchor.attach(&first));
        assert!(anchor.attach(&second));
        assert!(anchor.attach(&first));
        assert_eq!(anchor.listener_count(), 2);

        anchor.dispatch_move(PointerInput::new(60.0, 5.0));
        anchor.dispatch_leave();
        assert_eq!(first.borrow().moves, vec![50.0]);
        assert_eq!(second.borrow().leaves, 1);

        drop(second);
        assert_eq!(anchor.listener_count(), 1);
        assert!(anchor.detach(&first));
        assert_eq!(anchor.listener_count(), 0);
    }

    #[test]
    fn missing_or_unmounted_anchor_attaches_nothing() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        assert!(!mount_listener(None, &recorder));

        let anchor = AnchorHandle::new(AnchorRect::sized(100.0, 50.0));
        anchor.unmount();
        assert!(!mount_listener(Some(&anchor), &recorder));
        anchor.dispatch_move(PointerInput::new(1.0, 1.0));
        assert!(recorder.borrow().moves.is_empty());
    }
}
