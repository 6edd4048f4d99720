//=========================================================================
// Core Systems
//
// The activity engines and their supporting systems, independent of the
// session controller that schedules them.
//
// Responsibilities:
// - `memory` / `quiz`: the two activity state machines
// - `deck`, `timing`, `events`, `screen`: the mechanisms the engines
//   are built from (shuffled decks, delay windows, the event outbox,
//   the screen/lifecycle contract)
// - `content`, `stations`: fixed build-time data
//
// Notes:
// Everything here is synchronous and thread-agnostic: engines mutate
// only when told to (`reveal`, `answer`, `tick`) and announce changes
// through the outbox. Threading lives entirely in the session layer.
//
//=========================================================================

pub mod content;
pub mod deck;
pub mod events;
pub mod memory;
pub mod quiz;
pub mod screen;
pub mod stations;
pub mod timing;
