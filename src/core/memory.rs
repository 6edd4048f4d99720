//=========================================================================
// Match Engine
//=========================================================================
//
// State machine for the biodiversity memory game (Memorama).
//
// Architecture:
//   reveal(position) → guards → face_up (≤ 2) → pair comparison
//                                    ↓
//            match: resolved set    mismatch: display delay, then clear
//
// Invariants:
// - At most two unresolved positions are face up at any moment.
// - While a mismatched pair is on display, every reveal is rejected.
// - A resolved pair never leaves the resolved set until reset.
//
// All misuse (double reveal, reveal during the mismatch window, reveal of
// a resolved card) is a silent no-op surfaced as `RevealOutcome::Ignored`;
// this is deliberate input debouncing, not an error.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::time::Duration;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::deck::{build_deck, Card, Species, SpeciesId};
use crate::core::events::{GameEvent, Outbox};
use crate::core::screen::Activity;
use crate::core::timing::Delay;

//=== RevealOutcome =======================================================

/// Result of a reveal operation, for callers and tests.
///
/// The engine also announces the same information through the outbox;
/// the outcome exists so misuse rejection is observable without events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// A precondition failed; state is unchanged.
    Ignored,
    /// First card of a pair turned face up.
    Revealed,
    /// Second card matched; the pair is resolved.
    Matched(SpeciesId),
    /// Second card differed; the pair stays visible for the display
    /// window, during which further reveals are rejected.
    Mismatched,
}

//=== MatchEngine =========================================================

/// Pair-matching game state over a shuffled deck.
///
/// Created fresh per session; `reset` deals a new deck. The engine is a
/// pure single-user state machine: the only time-dependent behavior is
/// the mismatch display window, driven by [`tick`](MatchEngine::tick).
pub struct MatchEngine {
    catalog: Vec<Species>,
    deck: Vec<Card>,
    face_up: Vec<usize>,
    resolved: HashSet<SpeciesId>,
    move_count: u32,
    mismatch_clear: Delay,
    mismatch_window: Duration,
    rng: StdRng,
}

impl MatchEngine {
    //--- Construction -----------------------------------------------------

    /// Creates an engine over the given catalog and deals the first deck.
    pub fn new(catalog: Vec<Species>, mismatch_window: Duration) -> Self {
        Self::with_rng(catalog, mismatch_window, StdRng::from_entropy())
    }

    /// Like [`new`](MatchEngine::new) with a caller-supplied RNG, so tests
    /// can deal deterministic decks.
    pub fn with_rng(catalog: Vec<Species>, mismatch_window: Duration, mut rng: StdRng) -> Self {
        let deck = build_deck(&catalog, &mut rng);
        Self {
            catalog,
            deck,
            face_up: Vec::new(),
            resolved: HashSet::new(),
            move_count: 0,
            mismatch_clear: Delay::idle(),
            mismatch_window,
            rng,
        }
    }

    //--- Operations -------------------------------------------------------

    /// Turns the card at `position` face up.
    ///
    /// Rejected (no-op) while a mismatched pair is on display, for a
    /// position already face up or already resolved, and for positions
    /// outside the deck. Revealing a second card counts one move and
    /// resolves or schedules the clearing of the pair.
    pub fn reveal(&mut self, position: usize, outbox: &mut Outbox) -> RevealOutcome {
        if self.mismatch_clear.is_pending() {
            debug!("Reveal of {} rejected: mismatch on display", position);
            return RevealOutcome::Ignored;
        }

        // The pair cap stands on its own: cancelling the display window
        // leaves the stale pair face up, and nothing may join it
        if self.face_up.len() >= 2 {
            debug!("Reveal of {} rejected: two cards already face up", position);
            return RevealOutcome::Ignored;
        }

        let Some(card) = self.deck.get(position) else {
            warn!(
                "Reveal of {} rejected: deck has {} cards",
                position,
                self.deck.len()
            );
            return RevealOutcome::Ignored;
        };
        let id = card.id;

        if self.resolved.contains(&id) {
            debug!("Reveal of {} rejected: pair already resolved", position);
            return RevealOutcome::Ignored;
        }

        if self.face_up.contains(&position) {
            debug!("Reveal of {} rejected: already face up", position);
            return RevealOutcome::Ignored;
        }

        self.face_up.push(position);

        if self.face_up.len() < 2 {
            outbox.publish(GameEvent::CardRevealed { position, id });
            return RevealOutcome::Revealed;
        }

        // Second card: one completed pair comparison
        self.move_count += 1;
        let first = self.face_up[0];
        let first_id = self.deck[first].id;

        if first_id == id {
            self.face_up.clear();
            self.resolved.insert(id);
            outbox.publish(GameEvent::PairResolved {
                id,
                move_count: self.move_count,
            });

            if self.is_complete() {
                outbox.publish(GameEvent::GameCompleted {
                    move_count: self.move_count,
                });
            }

            RevealOutcome::Matched(id)
        } else {
            self.mismatch_clear.start(self.mismatch_window);
            outbox.publish(GameEvent::PairMismatched {
                first,
                second: position,
                move_count: self.move_count,
            });

            RevealOutcome::Mismatched
        }
    }

    /// Drives the mismatch display window.
    ///
    /// When the window elapses the pending pair turns face down and
    /// reveals unblock.
    pub fn tick(&mut self, dt: Duration, outbox: &mut Outbox) {
        if self.mismatch_clear.tick(dt) {
            self.face_up.clear();
            outbox.publish(GameEvent::MismatchCleared);
        }
    }

    /// Clears all progress and deals a fresh shuffled deck.
    pub fn reset(&mut self, outbox: &mut Outbox) {
        self.face_up.clear();
        self.resolved.clear();
        self.move_count = 0;
        self.mismatch_clear.cancel();
        self.deck = build_deck(&self.catalog, &mut self.rng);

        outbox.publish(GameEvent::DeckDealt {
            cards: self.deck.len(),
        });
    }

    /// Aborts the pending mismatch window without clearing the pair.
    ///
    /// Screen teardown calls this so the delay cannot fire into a dead
    /// view. The stale pair stays face up and keeps reveals blocked;
    /// the reset on re-entry discards it.
    pub fn cancel_pending(&mut self) {
        self.mismatch_clear.cancel();
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the current deck in position order.
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// Returns the unresolved face-up positions (at most two).
    pub fn face_up(&self) -> &[usize] {
        &self.face_up
    }

    /// Returns the ids of resolved pairs.
    pub fn resolved(&self) -> &HashSet<SpeciesId> {
        &self.resolved
    }

    /// Returns the number of completed pair comparisons.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Returns `true` while a mismatched pair is on display.
    pub fn is_blocked(&self) -> bool {
        self.mismatch_clear.is_pending()
    }

    /// Returns `true` once every catalog species is resolved.
    ///
    /// The engine does not auto-reset on completion.
    pub fn is_complete(&self) -> bool {
        self.resolved.len() == self.catalog.len()
    }
}

//--- Activity Lifecycle ----------------------------------------------------

impl Activity for MatchEngine {
    fn on_enter(&mut self, outbox: &mut Outbox) {
        self.reset(outbox);
    }

    fn on_exit(&mut self) {
        self.cancel_pending();
    }

    fn tick(&mut self, dt: Duration, outbox: &mut Outbox) {
        MatchEngine::tick(self, dt, outbox);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(800);

    fn species(n: u32) -> Vec<Species> {
        (0..n)
            .map(|i| Species {
                id: SpeciesId(i),
                name: "especie",
                image: "img",
            })
            .collect()
    }

    /// Engine with a deterministic deck plus the positions of each id's
    /// two cards, so tests can reveal by id.
    fn engine(n: u32) -> (MatchEngine, Outbox) {
        let engine = MatchEngine::with_rng(species(n), WINDOW, StdRng::seed_from_u64(11));
        (engine, Outbox::new())
    }

    fn positions_of(engine: &MatchEngine, id: SpeciesId) -> (usize, usize) {
        let both: Vec<usize> = engine
            .deck()
            .iter()
            .filter(|c| c.id == id)
            .map(|c| c.position)
            .collect();
        (both[0], both[1])
    }

    /// Position of some card whose id differs from `id`.
    fn other_than(engine: &MatchEngine, id: SpeciesId) -> usize {
        engine
            .deck()
            .iter()
            .find(|c| c.id != id)
            .map(|c| c.position)
            .unwrap()
    }

    //=====================================================================
    // Reveal & Resolution
    //=====================================================================

    #[test]
    fn matching_pair_is_resolved_in_one_move() {
        let (mut engine, mut outbox) = engine(2);
        let (a, b) = positions_of(&engine, SpeciesId(0));

        assert_eq!(engine.reveal(a, &mut outbox), RevealOutcome::Revealed);
        assert_eq!(
            engine.reveal(b, &mut outbox),
            RevealOutcome::Matched(SpeciesId(0))
        );

        assert_eq!(engine.move_count(), 1);
        assert!(engine.resolved().contains(&SpeciesId(0)));
        // Resolved pairs stay visible via the resolved set, not face_up
        assert!(engine.face_up().is_empty());
        assert!(!engine.is_blocked());
    }

    #[test]
    fn mismatch_counts_a_move_but_resolves_nothing() {
        let (mut engine, mut outbox) = engine(2);
        let (a, _) = positions_of(&engine, SpeciesId(0));
        let b = other_than(&engine, SpeciesId(0));

        engine.reveal(a, &mut outbox);
        assert_eq!(engine.reveal(b, &mut outbox), RevealOutcome::Mismatched);

        assert_eq!(engine.move_count(), 1);
        assert!(engine.resolved().is_empty());
        assert_eq!(engine.face_up(), &[a, b]);
        assert!(engine.is_blocked());
    }

    #[test]
    fn mismatch_clears_after_display_window() {
        let (mut engine, mut outbox) = engine(2);
        let (a, _) = positions_of(&engine, SpeciesId(0));
        let b = other_than(&engine, SpeciesId(0));

        engine.reveal(a, &mut outbox);
        engine.reveal(b, &mut outbox);

        engine.tick(Duration::from_millis(799), &mut outbox);
        assert_eq!(engine.face_up(), &[a, b]);

        engine.tick(Duration::from_millis(1), &mut outbox);
        assert!(engine.face_up().is_empty());
        assert!(!engine.is_blocked());
    }

    #[test]
    fn third_reveal_rejected_while_mismatch_pending() {
        let (mut engine, mut outbox) = engine(3);
        let (a, a2) = positions_of(&engine, SpeciesId(0));
        let b = other_than(&engine, SpeciesId(0));

        engine.reveal(a, &mut outbox);
        engine.reveal(b, &mut outbox);

        // Any reveal during the window is a no-op, including the match
        assert_eq!(engine.reveal(a2, &mut outbox), RevealOutcome::Ignored);
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.face_up(), &[a, b]);

        // Once cleared, the same reveal is accepted again
        engine.tick(WINDOW, &mut outbox);
        assert_eq!(engine.reveal(a2, &mut outbox), RevealOutcome::Revealed);
    }

    #[test]
    fn double_reveal_of_same_position_is_ignored() {
        let (mut engine, mut outbox) = engine(2);
        let (a, _) = positions_of(&engine, SpeciesId(0));

        engine.reveal(a, &mut outbox);
        assert_eq!(engine.reveal(a, &mut outbox), RevealOutcome::Ignored);
        assert_eq!(engine.face_up(), &[a]);
        assert_eq!(engine.move_count(), 0);
    }

    #[test]
    fn resolved_card_cannot_be_revealed_again() {
        let (mut engine, mut outbox) = engine(2);
        let (a, b) = positions_of(&engine, SpeciesId(0));

        engine.reveal(a, &mut outbox);
        engine.reveal(b, &mut outbox);

        assert_eq!(engine.reveal(a, &mut outbox), RevealOutcome::Ignored);
        assert_eq!(engine.reveal(b, &mut outbox), RevealOutcome::Ignored);
    }

    #[test]
    fn out_of_bounds_reveal_is_ignored() {
        let (mut engine, mut outbox) = engine(2);
        assert_eq!(engine.reveal(99, &mut outbox), RevealOutcome::Ignored);
        assert!(engine.face_up().is_empty());
    }

    //=====================================================================
    // Completion
    //=====================================================================

    #[test]
    fn complete_iff_every_id_is_resolved() {
        for n in 1..=5 {
            let (mut engine, mut outbox) = engine(n);

            for i in 0..n {
                assert!(!engine.is_complete());
                let (a, b) = positions_of(&engine, SpeciesId(i));
                engine.reveal(a, &mut outbox);
                engine.reveal(b, &mut outbox);
            }

            assert!(engine.is_complete());
            assert_eq!(engine.move_count(), n);
        }
    }

    #[test]
    fn completion_emits_game_completed() {
        let (mut engine, mut outbox) = engine(1);
        let rx = outbox.subscribe();
        let (a, b) = positions_of(&engine, SpeciesId(0));

        engine.reveal(a, &mut outbox);
        engine.reveal(b, &mut outbox);
        outbox.dispatch();

        let events: Vec<GameEvent> = rx.try_iter().collect();
        assert!(events.contains(&GameEvent::GameCompleted { move_count: 1 }));
    }

    #[test]
    fn resolved_ids_reconstruct_the_catalog_multiset() {
        let (mut engine, mut outbox) = engine(4);

        for i in 0..4 {
            let (a, b) = positions_of(&engine, SpeciesId(i));
            engine.reveal(a, &mut outbox);
            engine.reveal(b, &mut outbox);
        }

        let mut resolved: Vec<SpeciesId> = engine.resolved().iter().copied().collect();
        resolved.sort();
        assert_eq!(resolved, (0..4).map(SpeciesId).collect::<Vec<_>>());
    }

    //=====================================================================
    // Reset & Teardown
    //=====================================================================

    #[test]
    fn reset_restores_documented_initial_state() {
        let (mut engine, mut outbox) = engine(3);
        let (a, b) = positions_of(&engine, SpeciesId(0));
        engine.reveal(a, &mut outbox);
        engine.reveal(b, &mut outbox);

        engine.reset(&mut outbox);

        assert!(engine.face_up().is_empty());
        assert!(engine.resolved().is_empty());
        assert_eq!(engine.move_count(), 0);
        assert!(!engine.is_blocked());
        assert_eq!(engine.deck().len(), 6);
    }

    #[test]
    fn reset_cancels_a_pending_mismatch() {
        let (mut engine, mut outbox) = engine(2);
        let (a, _) = positions_of(&engine, SpeciesId(0));
        let b = other_than(&engine, SpeciesId(0));
        engine.reveal(a, &mut outbox);
        engine.reveal(b, &mut outbox);

        engine.reset(&mut outbox);
        let before = outbox.pending();

        // The old window must not fire into the fresh game
        engine.tick(WINDOW, &mut outbox);
        assert_eq!(outbox.pending(), before);
        assert!(engine.face_up().is_empty());
    }

    #[test]
    fn cancel_pending_stops_the_display_window() {
        let (mut engine, mut outbox) = engine(2);
        let (a, _) = positions_of(&engine, SpeciesId(0));
        let b = other_than(&engine, SpeciesId(0));
        engine.reveal(a, &mut outbox);
        engine.reveal(b, &mut outbox);

        engine.cancel_pending();
        let before = outbox.pending();
        engine.tick(WINDOW, &mut outbox);

        assert_eq!(outbox.pending(), before);
    }

    #[test]
    fn face_up_stays_capped_after_cancel_pending() {
        let (mut engine, mut outbox) = engine(3);
        let (a, _) = positions_of(&engine, SpeciesId(0));
        let b = other_than(&engine, SpeciesId(0));
        engine.reveal(a, &mut outbox);
        engine.reveal(b, &mut outbox);

        engine.cancel_pending();

        // With the window gone, the pair cap alone must block a third
        // card from joining the stale mismatch
        let b_id = engine.deck()[b].id;
        let c = engine
            .deck()
            .iter()
            .find(|card| card.id != SpeciesId(0) && card.id != b_id)
            .map(|card| card.position)
            .unwrap();

        assert_eq!(engine.reveal(c, &mut outbox), RevealOutcome::Ignored);
        assert_eq!(engine.face_up(), &[a, b]);
        assert_eq!(engine.move_count(), 1);
    }

    #[test]
    fn reset_deals_a_valid_fresh_deck() {
        let (mut engine, mut outbox) = engine(4);
        engine.reset(&mut outbox);

        let mut ids: Vec<SpeciesId> = engine.deck().iter().map(|c| c.id).collect();
        ids.sort();
        let expected: Vec<SpeciesId> =
            (0..4).flat_map(|i| [SpeciesId(i), SpeciesId(i)]).collect();
        assert_eq!(ids, expected);
    }
}
