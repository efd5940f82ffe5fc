use serde::{Deserialize, Serialize};
use tracing::trace;

pub const ACTIVE_OPACITY: f64 = 1.0;
pub const RESTING_OPACITY: f64 = 0.5;

/// Hover state owned by a single consuming component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HighlightState {
    #[default]
    Idle,
    Hovering(usize),
}

/// Outcome of feeding one resolved index into the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightChange {
    /// Same state as before; callers must not start any transition.
    Unchanged,
    Activated {
        index: usize,
        previous: Option<usize>,
    },
    Cleared {
        previous: usize,
    },
}

impl HighlightChange {
    #[must_use]
    pub const fn is_unchanged(self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// Visual emphasis of one highlightable element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    pub opacity: f64,
    pub font_weight: FontWeight,
}

impl Emphasis {
    pub const ACTIVE: Self = Self {
        opacity: ACTIVE_OPACITY,
        font_weight: FontWeight::Bold,
    };

    pub const RESTING: Self = Self {
        opacity: RESTING_OPACITY,
        font_weight: FontWeight::Normal,
    };
}

impl Default for Emphasis {
    fn default() -> Self {
        Self::RESTING
    }
}

/// `Idle` / `Hovering(index)` state machine.
///
/// Re-resolving the current index is a no-op, and `None` always clears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightCoordinator {
    state: HighlightState,
}

impl HighlightCoordinator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: HighlightState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> HighlightState {
        self.state
    }

    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        match self.state {
            HighlightState::Idle => None,
            HighlightState::Hovering(index) => Some(index),
        }
    }

    /// Feeds the resolver output for one pointer event.
    pub fn apply(&mut self, resolved: Option<usize>) -> HighlightChange {
        let change = match (self.state, resolved) {
            (HighlightState::Hovering(current), Some(index)) if current == index => {
                HighlightChange::Unchanged
            }
            (HighlightState::Idle, None) => HighlightChange::Unchanged,
            (_, Some(index)) => {
                let previous = self.active_index();
                self.state = HighlightState::Hovering(index);
                HighlightChange::Activated { index, previous }
            }
            (HighlightState::Hovering(previous), None) => {
                self.state = HighlightState::Idle;
                HighlightChange::Cleared { previous }
            }
        };
        if !change.is_unchanged() {
            trace!(?change, "highlight state changed");
        }
        change
    }

    /// Pointer left the anchor.
    pub fn clear(&mut self) -> HighlightChange {
        self.apply(None)
    }

    /// Emphasis of element `index` in the current state.
    ///
    /// `Idle` leaves every element resting; `Hovering(i)` emphasizes only `i`.
    #[must_use]
    pub fn emphasis_for(&self, index: usize) -> Emphasis {
        match self.state {
            HighlightState::Hovering(active) if active == index => Emphasis::ACTIVE,
            _ => Emphasis::RESTING,
        }
    }
}
