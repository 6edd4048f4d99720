//=========================================================================
// Timing
//=========================================================================
//
// Tick-driven timer primitives for the activity engines.
//
// The session loop advances at a fixed tick rate and passes the elapsed
// duration down to whichever activity is on screen. Engines never touch
// wall-clock time or OS timers directly: every delayed effect is a `Delay`
// or `Countdown` value stored alongside the engine state, so cancellation
// on screen teardown is an explicit, testable operation.
//
// Frame lifecycle: start()/restart() → tick(dt) until fired/expired → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Delay ===============================================================

/// One-shot cancellable delay handle.
///
/// Used for the memory game's mismatch display window and the quiz's
/// answer-lock window. The handle is inert until `start` is called and
/// fires exactly once when the accumulated tick time covers the window.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use antisana_games::core::timing::Delay;
///
/// let mut delay = Delay::idle();
/// delay.start(Duration::from_millis(800));
/// assert!(!delay.tick(Duration::from_millis(500)));
/// assert!(delay.tick(Duration::from_millis(300)));
/// assert!(!delay.is_pending());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delay {
    remaining: Option<Duration>,
}

impl Delay {
    /// Creates an inert delay that never fires until started.
    pub fn idle() -> Self {
        Self { remaining: None }
    }

    /// Arms the delay for the given window.
    ///
    /// Restarting a pending delay replaces the remaining time.
    pub fn start(&mut self, window: Duration) {
        self.remaining = Some(window);
    }

    /// Disarms the delay without firing it.
    ///
    /// Called on screen teardown so a dangling window cannot mutate state
    /// that no longer has a live view.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Returns `true` while the delay is armed and has not fired.
    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advances the delay by `dt`, returning `true` on the tick it fires.
    ///
    /// An idle or cancelled delay never fires. Once fired the delay
    /// returns to the idle state.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(left) => {
                let left = left.saturating_sub(dt);
                if left.is_zero() {
                    self.remaining = None;
                    true
                } else {
                    self.remaining = Some(left);
                    false
                }
            }
            None => false,
        }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::idle()
    }
}

//=== Countdown ===========================================================

/// Whole-second countdown budget.
///
/// Accumulates tick time and reports every full second crossed, so the
/// quiz decrements once per elapsed second regardless of the loop's tick
/// rate. Sub-second remainder of the budget is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    budget: u32,
    remaining: u32,
    accumulated: Duration,
}

impl Countdown {
    /// Creates a countdown with a whole-second budget.
    pub fn new(budget: Duration) -> Self {
        let budget = budget.as_secs() as u32;
        Self {
            budget,
            remaining: budget,
            accumulated: Duration::ZERO,
        }
    }

    /// Advances the countdown, returning how many whole seconds elapsed.
    ///
    /// Never reports more seconds than remain; an expired countdown stays
    /// at zero.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        if self.remaining == 0 {
            return 0;
        }

        self.accumulated += dt;
        let mut crossed = 0;

        while self.accumulated >= Duration::from_secs(1) && self.remaining > 0 {
            self.accumulated -= Duration::from_secs(1);
            self.remaining -= 1;
            crossed += 1;
        }

        crossed
    }

    /// Returns the whole seconds left on the budget.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns `true` once the budget is exhausted.
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Restores the full budget and discards accumulated tick time.
    pub fn restart(&mut self) {
        self.remaining = self.budget;
        self.accumulated = Duration::ZERO;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
