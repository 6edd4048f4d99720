//=========================================================================
// Screen System
//=========================================================================
//
// Session screen state and the activity lifecycle contract.
//
// The session owns exactly one `Screen` at a time. Screen changes are
// requested through a `RequestQueue` and applied by the session at tick
// boundaries, with lifecycle hooks (`on_enter`/`on_exit`) invoked on the
// affected activity. `on_exit` is the teardown contract: an activity must
// cancel its pending timers there so nothing mutates state after the
// screen is gone.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::events::Outbox;

//=== Screen ==============================================================

/// The session's finite screen states.
///
/// Initial state is `Menu`; the two activities are entered from the menu
/// and left back to it. Nothing is persisted across a full session end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Menu,
    /// Biodiversity pair-matching game.
    Memorama,
    /// Timed quiz.
    Quiz,
}

impl Screen {
    /// Returns `true` for screens backed by an activity engine.
    pub fn is_activity(self) -> bool {
        !matches!(self, Screen::Menu)
    }
}

//=== ScreenRequest =======================================================

/// A queued screen-flow request.
///
/// Requests are commands, not transitions: the session validates them
/// against the current screen when the queue is processed and drops the
/// invalid ones with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenRequest {
    /// Enter an activity from the menu.
    Select(Screen),
    /// Leave the current activity back to the menu.
    Back,
    /// Restart the current activity without leaving it.
    Reset,
}

//=== RequestQueue ========================================================

/// Queue of screen requests processed at tick boundaries.
pub struct RequestQueue {
    queue: Vec<ScreenRequest>,
}

impl RequestQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a request for the next tick boundary.
    pub fn push(&mut self, request: ScreenRequest) {
        self.queue.push(request);
    }

    /// Returns `true` if no requests are queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued requests.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all queued requests in arrival order, leaving the queue empty.
    pub fn take(&mut self) -> Vec<ScreenRequest> {
        std::mem::take(&mut self.queue)
    }
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new()
    }
}

//=== Activity Trait ======================================================

/// Lifecycle contract implemented by both activity engines.
///
/// The session dispatches through this trait so entering, leaving, and
/// ticking a screen is uniform regardless of which engine backs it.
pub trait Activity {
    /// Called when the activity's screen becomes active.
    ///
    /// Implementations start from a fresh state (new deck, question zero)
    /// and announce it through the outbox.
    fn on_enter(&mut self, outbox: &mut Outbox);

    /// Called when the activity's screen is left.
    ///
    /// Implementations must cancel every pending timer here.
    fn on_exit(&mut self);

    /// Called once per session tick while the activity is on screen.
    fn tick(&mut self, dt: Duration, outbox: &mut Outbox);
}

//=========================================================================
// Unit Tests
//=========================================================================
