//=========================================================================
// Session Controller
//
// Top-level coordinator for the interactive activities.
//
// Architecture:
// ```text
//     SessionBuilder ──build()──> Session ──spawn()──> [logic thread]
//         │                          │
//         ├─ with_tick_rate()        ├─ handle(SessionCommand)
//         ├─ with_quiz_budget()      ├─ tick(dt)  (requests → engines →
//         └─ with_catalog()          │             event dispatch)
//                                    └─ subscribe() → Receiver<GameEvent>
// ```
//
// The session owns one `Screen` at a time plus both activity engines.
// Screen requests are queued and applied at tick boundaries; leaving a
// screen runs the activity's teardown so no pending timer outlives its
// view. The rendering layer drives the session with commands and redraws
// from the subscribed event stream.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::content;
use crate::core::deck::Species;
use crate::core::events::{GameEvent, Outbox};
use crate::core::memory::MatchEngine;
use crate::core::quiz::{Question, QuizEngine};
use crate::core::screen::{Activity, RequestQueue, Screen, ScreenRequest};

//=== SessionCommand ======================================================

/// Semantic user command fed to the session.
///
/// The out-of-scope view interprets raw pointer/keyboard input and sends
/// these; the session validates them against the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Enter an activity from the menu.
    Select(Screen),
    /// Leave the current activity back to the menu.
    Back,
    /// Restart the current activity without leaving it.
    Reset,
    /// Turn the memory-game card at this position face up.
    Reveal(usize),
    /// Submit this option for the current quiz question.
    Answer(usize),
    /// Stop the session loop (only meaningful for spawned sessions).
    Shutdown,
}

//=== SessionBuilder ======================================================

/// Builder for configuring and constructing a [`Session`].
///
/// # Default Values
///
/// - **Tick rate**: 60.0 updates per second (spawned loop)
/// - **Channel capacity**: 128 commands
/// - **Quiz budget**: 30 s for the whole quiz
/// - **Mismatch delay**: 800 ms
/// - **Lock delay**: 1.2 s
/// - **Catalog / questions**: the built-in Antisana content
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use antisana_games::prelude::*;
///
/// let mut session = SessionBuilder::new()
///     .with_quiz_budget(Duration::from_secs(30))
///     .build();
///
/// let events = session.subscribe();
/// session.handle(SessionCommand::Select(Screen::Memorama));
/// session.tick(Duration::from_millis(16));
///
/// assert_eq!(
///     events.try_recv().unwrap(),
///     GameEvent::ScreenChanged(Screen::Memorama)
/// );
/// ```
pub struct SessionBuilder {
    tick_rate: f64,
    channel_capacity: usize,
    quiz_budget: Duration,
    mismatch_delay: Duration,
    lock_delay: Duration,
    catalog: Vec<Species>,
    questions: Vec<Question>,
    deck_seed: Option<u64>,
}

impl SessionBuilder {
    /// Creates a builder with default settings and the built-in content.
    pub fn new() -> Self {
        Self {
            tick_rate: 60.0,
            channel_capacity: 128,
            quiz_budget: Duration::from_secs(30),
            mismatch_delay: Duration::from_millis(800),
            lock_delay: Duration::from_millis(1_200),
            catalog: content::species_catalog(),
            questions: content::question_bank(),
            deck_seed: None,
        }
    }

    /// Sets the spawned loop's update rate.
    ///
    /// # Panics
    ///
    /// Panics if `tick_rate <= 0.0`.
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        assert!(tick_rate > 0.0, "Tick rate must be positive, got {}", tick_rate);
        self.tick_rate = tick_rate;
        self
    }

    /// Sets the command-channel capacity for spawned sessions.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the whole-quiz countdown budget (whole seconds).
    pub fn with_quiz_budget(mut self, budget: Duration) -> Self {
        self.quiz_budget = budget;
        self
    }

    /// Sets how long a mismatched pair stays on display.
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    /// Sets how long a locked answer stays on display before advancing.
    pub fn with_lock_delay(mut self, delay: Duration) -> Self {
        self.lock_delay = delay;
        self
    }

    /// Replaces the built-in species catalog.
    pub fn with_catalog(mut self, catalog: Vec<Species>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replaces the built-in question bank.
    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }

    /// Seeds the deck RNG for reproducible shuffles (tests, replays).
    pub fn with_deck_seed(mut self, seed: u64) -> Self {
        self.deck_seed = Some(seed);
        self
    }

    /// Builds the session, starting on the menu screen.
    pub fn build(self) -> Session {
        info!(
            "Building session ({} species, {} questions, {:.0} ticks/s)",
            self.catalog.len(),
            self.questions.len(),
            self.tick_rate
        );

        let memory = match self.deck_seed {
            Some(seed) => MatchEngine::with_rng(
                self.catalog,
                self.mismatch_delay,
                StdRng::seed_from_u64(seed),
            ),
            None => MatchEngine::new(self.catalog, self.mismatch_delay),
        };

        Session {
            screen: Screen::Menu,
            requests: RequestQueue::new(),
            memory,
            quiz: QuizEngine::new(self.questions, self.quiz_budget, self.lock_delay),
            outbox: Outbox::new(),
            tick_rate: self.tick_rate,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Session =============================================================

/// The activity session: screen state plus both engines.
///
/// The synchronous API (`handle` + `tick`) is the whole behavior; the
/// spawned loop merely drives it at a fixed rate. Screen-flow commands
/// are queued and applied at the next tick boundary, while card reveals
/// and answers go straight to the active engine.
pub struct Session {
    screen: Screen,
    requests: RequestQueue,
    memory: MatchEngine,
    quiz: QuizEngine,
    outbox: Outbox,
    tick_rate: f64,
    channel_capacity: usize,
}

impl Session {
    //--- Observation ------------------------------------------------------

    /// Registers an event subscriber (do this before `spawn`).
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        self.outbox.subscribe()
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns the memory-game engine.
    pub fn memory(&self) -> &MatchEngine {
        &self.memory
    }

    /// Returns the quiz engine.
    pub fn quiz(&self) -> &QuizEngine {
        &self.quiz
    }

    //--- Command Intake ---------------------------------------------------

    /// Applies one user command.
    ///
    /// Screen-flow commands are queued for the next tick boundary; engine
    /// commands dispatch immediately and are dropped with a warning when
    /// the matching activity is not on screen. Because the screen only
    /// changes at the tick boundary, a `Reveal`/`Answer` sent in the same
    /// frame as the `Select` that would enable it is evaluated against the
    /// old screen and dropped.
    pub fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Select(target) => {
                self.requests.push(ScreenRequest::Select(target));
            }
            SessionCommand::Back => self.requests.push(ScreenRequest::Back),
            SessionCommand::Reset => self.requests.push(ScreenRequest::Reset),

            SessionCommand::Reveal(position) => {
                if self.screen == Screen::Memorama {
                    self.memory.reveal(position, &mut self.outbox);
                } else {
                    warn!("Reveal({}) dropped: not on the memory game", position);
                }
            }
            SessionCommand::Answer(option) => {
                if self.screen == Screen::Quiz {
                    self.quiz.answer(option, &mut self.outbox);
                } else {
                    warn!("Answer({}) dropped: not on the quiz", option);
                }
            }

            SessionCommand::Shutdown => {
                // Meaningful only to the spawned loop, which intercepts it
                debug!("Shutdown command ignored by a synchronous session");
            }
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the session by one tick.
    ///
    /// Processes queued screen requests, ticks the active engine, and
    /// dispatches the accumulated events to subscribers.
    pub fn tick(&mut self, dt: Duration) {
        self.process_requests();

        if let Some(activity) = active_activity(self.screen, &mut self.memory, &mut self.quiz) {
            activity.tick(dt, &mut self.outbox);
        }

        self.outbox.dispatch();
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_requests(&mut self) {
        for request in self.requests.take() {
            match request {
                ScreenRequest::Select(target) => {
                    if self.screen != Screen::Menu {
                        warn!(
                            "Select({:?}) dropped: activities are entered from the menu",
                            target
                        );
                        continue;
                    }
                    if !target.is_activity() {
                        warn!("Select({:?}) dropped: not an activity", target);
                        continue;
                    }
                    self.enter(target);
                }

                ScreenRequest::Back => {
                    if self.screen == Screen::Menu {
                        debug!("Back dropped: already on the menu");
                        continue;
                    }
                    self.leave();
                }

                ScreenRequest::Reset => match self.screen {
                    Screen::Memorama => self.memory.reset(&mut self.outbox),
                    Screen::Quiz => self.quiz.reset(&mut self.outbox),
                    Screen::Menu => debug!("Reset dropped: no activity on screen"),
                },
            }
        }
    }

    fn enter(&mut self, target: Screen) {
        debug!("Entering {:?}", target);
        self.screen = target;
        self.outbox.publish(GameEvent::ScreenChanged(target));

        if let Some(activity) = active_activity(self.screen, &mut self.memory, &mut self.quiz) {
            activity.on_enter(&mut self.outbox);
        }
    }

    fn leave(&mut self) {
        debug!("Leaving {:?}", self.screen);

        // Teardown before the screen changes: pending timers must not
        // fire into a view that is gone
        if let Some(activity) = active_activity(self.screen, &mut self.memory, &mut self.quiz) {
            activity.on_exit();
        }

        self.screen = Screen::Menu;
        self.outbox.publish(GameEvent::ScreenChanged(Screen::Menu));
    }

    //--- Spawned Execution --------------------------------------------------

    /// Moves the session onto a dedicated logic thread at the configured
    /// tick rate.
    ///
    /// Commands flow in through the returned handle; subscribers
    /// registered before spawning keep receiving events. The loop exits
    /// on [`SessionCommand::Shutdown`] or when every command sender is
    /// dropped.
    pub fn spawn(mut self) -> SessionHandle {
        let (tx, rx) = bounded(self.channel_capacity);
        let frame = Duration::from_secs_f64(1.0 / self.tick_rate);

        let thread = thread::spawn(move || {
            info!(
                "Session loop started ({:.1} ms per tick)",
                frame.as_secs_f64() * 1_000.0
            );
            let mut inbox = Vec::with_capacity(8);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather user commands --------------------------
                if let TickControl::Exit = collect_commands(&rx, &mut inbox, frame) {
                    info!("Session loop exiting");
                    break;
                }

                //--- Step 2: Apply commands and advance the session --------
                for command in inbox.drain(..) {
                    self.handle(command);
                }
                self.tick(frame);

                //--- Step 3: Maintain fixed pacing --------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame {
                    thread::sleep(frame - elapsed);
                }
            }
        });

        SessionHandle { commands: tx, thread }
    }
}

//=== TickControl =========================================================
//
// Control flow for the spawned loop: each tick either continues or
// terminates the session.
//
enum TickControl {
    Continue,
    Exit,
}

// Waits up to one frame for a command, then drains whatever else queued
// up. Shutdown and sender disconnection both terminate the loop.
fn collect_commands(
    receiver: &Receiver<SessionCommand>,
    inbox: &mut Vec<SessionCommand>,
    frame: Duration,
) -> TickControl {
    match receiver.recv_timeout(frame) {
        Ok(SessionCommand::Shutdown) => return TickControl::Exit,
        Ok(command) => inbox.push(command),
        Err(RecvTimeoutError::Disconnected) => return TickControl::Exit,
        Err(RecvTimeoutError::Timeout) => {}
    }

    while let Ok(command) = receiver.try_recv() {
        if matches!(command, SessionCommand::Shutdown) {
            return TickControl::Exit;
        }
        inbox.push(command);
    }

    TickControl::Continue
}

// Maps the current screen to its engine through the lifecycle trait.
fn active_activity<'a>(
    screen: Screen,
    memory: &'a mut MatchEngine,
    quiz: &'a mut QuizEngine,
) -> Option<&'a mut dyn Activity> {
    match screen {
        Screen::Menu => None,
        Screen::Memorama => Some(memory),
        Screen::Quiz => Some(quiz),
    }
}

//=== SessionHandle =======================================================

/// Handle to a spawned session loop.
pub struct SessionHandle {
    commands: Sender<SessionCommand>,
    thread: thread::JoinHandle<()>,
}

impl SessionHandle {
    /// Sends a command to the loop; returns `false` once the loop is gone.
    pub fn send(&self, command: SessionCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Returns a cloneable command sender for other threads.
    pub fn commands(&self) -> Sender<SessionCommand> {
        self.commands.clone()
    }

    /// Waits for the loop to terminate.
    pub fn join(self) {
        // Dropping our sender lets a command-less loop disconnect
        drop(self.commands);

        match self.thread.join() {
            Ok(()) => info!("Session thread terminated cleanly"),
            Err(e) => error!("Session thread panicked: {:?}", e),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
