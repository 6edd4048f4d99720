//=========================================================================
// Event Outbox
//=========================================================================
//
// State-change notification contract between the engines and the view.
//
// Architecture:
//   Engines → publish() → Vec<GameEvent>
//                              ↓
//   Session ──dispatch()──→ every subscriber channel (tick boundary)
//
// Pattern: publish (during update) → dispatch (once per tick) → repeat
//
// The rendering layer is out of scope for this crate; it registers a
// subscriber and redraws from the event stream.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::deck::SpeciesId;
use crate::core::screen::Screen;

//=== GameEvent ===========================================================

/// State-change notification emitted by the session and its engines.
///
/// Events are snapshots, not live references: a subscriber can render from
/// them without touching engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The session switched screens.
    ScreenChanged(Screen),

    //--- Memory game ------------------------------------------------------
    /// A fresh shuffled deck was dealt (on enter and on reset).
    DeckDealt { cards: usize },
    /// A first card of a pending pair was turned face up.
    CardRevealed { position: usize, id: SpeciesId },
    /// Both face-up cards shared an id and are now permanently visible.
    PairResolved { id: SpeciesId, move_count: u32 },
    /// The face-up cards differed; they stay visible for the display
    /// window and further reveals are rejected until `MismatchCleared`.
    PairMismatched {
        first: usize,
        second: usize,
        move_count: u32,
    },
    /// The mismatch display window elapsed; the pending cards turned back.
    MismatchCleared,
    /// Every pair is resolved.
    GameCompleted { move_count: u32 },

    //--- Quiz ------------------------------------------------------------
    /// A question became the current one (on enter, reset, and advance).
    QuestionPresented { index: usize, total: usize },
    /// An answer was locked for the current question.
    AnswerLocked { option: usize, correct: bool },
    /// One whole second of the quiz budget elapsed.
    ClockTicked { remaining: u32 },
    /// The quiz reached its terminal state (questions exhausted or budget
    /// spent); only reset is accepted afterwards.
    QuizFinished { score: u32, total: usize },
}

//=== Outbox ==============================================================

/// Collects events during an update and fans them out at tick boundaries.
///
/// Subscribers are unbounded crossbeam channels so publishing can never
/// block the logic thread; a subscriber that hangs up is pruned on the
/// next dispatch.
pub struct Outbox {
    queue: Vec<GameEvent>,
    subscribers: Vec<Sender<GameEvent>>,
}

impl Outbox {
    /// Creates an outbox with no queued events and no subscribers.
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Queues an event for the next dispatch.
    pub fn publish(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    /// Returns the number of events queued since the last dispatch.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Delivers every queued event to every live subscriber, in order.
    ///
    /// Subscribers whose receiving end was dropped are removed. Events
    /// queued while no subscriber is registered are discarded.
    pub fn dispatch(&mut self) {
        let events = std::mem::take(&mut self.queue);

        for event in events {
            self.subscribers.retain(|tx| {
                if tx.send(event.clone()).is_ok() {
                    true
                } else {
                    debug!("Pruning disconnected event subscriber");
                    false
                }
            });
        }
    }
}

impl Default for Outbox {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
