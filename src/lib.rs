//=========================================================================
// Antisana Games — Library Root
//
// This crate defines the public API surface of the Antisana activity
// engine: the interactive games of the "Guardián del Agua" outreach site.
//
// Responsibilities:
// - Expose the session controller (`Session`, `SessionBuilder`) as the
//   main entry point
// - Expose the activity engines (`core`) for embedders that want to
//   drive a single game directly
// - Keep the crate headless: input interpretation and rendering belong
//   to the embedding view, which talks to the session through commands
//   and subscribes to its event stream
//
// Typical usage:
// ```no_run
// use antisana_games::prelude::*;
//
// fn main() {
//     let mut session = SessionBuilder::new().build();
//     let events = session.subscribe();
//     let handle = session.spawn();
//
//     handle.send(SessionCommand::Select(Screen::Memorama));
//     while let Ok(event) = events.recv() {
//         println!("{:?}", event);
//     }
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the activity engines and their supporting systems
// (deck, timing, events, static content). It is exposed publicly so a
// single engine can be embedded without the session controller, but
// normal application code will mostly use the top-level `Session` facade.
//
pub mod core;

//--- Internal Modules ----------------------------------------------------
//
// `session` defines the session controller, its builder, and the spawned
// logic loop. Its types are re-exported below; the module itself stays
// private.
//
mod session;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the session types as the main entry point for applications.
// This allows users to simply `use antisana_games::Session;` without
// having to know the internal module structure.
//
pub use session::{Session, SessionBuilder, SessionCommand, SessionHandle};

pub mod prelude;
