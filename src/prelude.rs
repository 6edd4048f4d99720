//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use antisana_games::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Session controller
pub use crate::session::{Session, SessionBuilder, SessionCommand, SessionHandle};

// Screen system
pub use crate::core::screen::{Activity, Screen};

// Event stream
pub use crate::core::events::{GameEvent, Outbox};

// Memory game
pub use crate::core::deck::{build_deck, Card, Species, SpeciesId};
pub use crate::core::memory::{MatchEngine, RevealOutcome};

// Quiz
pub use crate::core::quiz::{AnswerOutcome, Question, QuizEngine};

// Static content
pub use crate::core::content::{question_bank, species_catalog};
pub use crate::core::stations::{station_by_id, stations, Station, StationKind};
