//=========================================================================
// Deck Builder
//=========================================================================
//
// Constructs the shuffled card deck for one memory-game session.
//
// Flow:
//   species catalog → duplicate → uniform shuffle → position-indexed cards
//
// The catalog is fixed, non-empty build-time data; the builder performs
// no validation beyond that assumption.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::seq::SliceRandom;
use rand::Rng;

//=== Species =============================================================

/// Stable identifier for a catalog species.
///
/// Shared by exactly two cards in every deck built from the catalog; pair
/// resolution compares these ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesId(pub u32);

/// One entry of the biodiversity catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Species {
    pub id: SpeciesId,
    /// Display name shown on the resolved card.
    pub name: &'static str,
    /// Opaque reference to the display asset.
    pub image: &'static str,
}

//=== Card ================================================================

/// One slot of a shuffled deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Matching-pair key; exactly two cards per deck carry each id.
    pub id: SpeciesId,
    /// Unique slot index in the shuffled deck (`0..2N`).
    pub position: usize,
    pub image: &'static str,
}

//=== Deck Construction ===================================================

/// Builds a shuffled deck of `2 × catalog.len()` cards.
///
/// Every catalog species is duplicated once and the doubled multiset is
/// uniformly permuted; each card's `position` is its index in the
/// permutation. The RNG is caller-supplied so game sessions draw from
/// entropy while tests seed deterministically.
pub fn build_deck<R: Rng + ?Sized>(catalog: &[Species], rng: &mut R) -> Vec<Card> {
    let mut doubled: Vec<&Species> = catalog.iter().chain(catalog.iter()).collect();
    doubled.shuffle(rng);

    doubled
        .into_iter()
        .enumerate()
        .map(|(position, species)| Card {
            id: species.id,
            position,
            image: species.image,
        })
        .collect()
}

//=========================================================================
// Unit Tests
//=========================================================================
