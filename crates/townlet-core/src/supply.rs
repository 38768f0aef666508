//! Resource supply: the shuffled draw deck and the visible offer.
//!
//! The supply is a closed loop. Taking a token from the offer refills the
//! offer from the deck's front and returns the taken token to the deck's
//! back, so `deck + offer` only shrinks when a token is sitting on the grid.

use crate::board::Resource;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of simultaneously visible (selectable) tokens
pub const OFFER_SIZE: usize = 3;

/// Copies of each resource in a fresh supply
pub const COPIES_PER_RESOURCE: usize = 3;

/// Receipt for a single draw, needed to invert it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakenToken {
    /// The resource that was taken from the offer
    pub resource: Resource,
    /// Whether the offer was refilled from the deck during this draw
    pub refilled: bool,
}

/// The draw deck plus the visible offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSupply {
    /// Draw order, front = next drawn
    deck: VecDeque<Resource>,
    /// Currently selectable tokens, at most [`OFFER_SIZE`]
    offer: Vec<Resource>,
}

impl ResourceSupply {
    /// Create a shuffled supply: 3 copies of each of the 5 resources, the
    /// first 3 moved into the offer, the remaining 12 forming the deck.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self::new_with_rng(&mut rng)
    }

    /// Create a supply with a provided RNG, for deterministic games
    pub fn new_with_rng<R: Rng>(rng: &mut R) -> Self {
        let mut pool = Vec::with_capacity(Resource::ALL.len() * COPIES_PER_RESOURCE);
        for resource in Resource::ALL {
            for _ in 0..COPIES_PER_RESOURCE {
                pool.push(resource);
            }
        }
        pool.shuffle(rng);

        let deck: VecDeque<Resource> = pool.split_off(OFFER_SIZE).into();
        Self { deck, offer: pool }
    }

    /// The currently selectable tokens
    pub fn offer(&self) -> &[Resource] {
        &self.offer
    }

    /// Tokens remaining in the draw deck
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Tokens in the supply (deck + offer). Constant except while a drawn
    /// token sits on the grid.
    pub fn total(&self) -> usize {
        self.deck.len() + self.offer.len()
    }

    /// Take the token at `slot` out of the offer.
    ///
    /// The offer collapses (later slots shift down), is refilled from the
    /// deck's front when possible, and the taken token goes to the deck's
    /// back. Returns `None` when `slot` is out of range; the supply is
    /// untouched in that case.
    pub fn take(&mut self, slot: usize) -> Option<TakenToken> {
        if slot >= self.offer.len() {
            return None;
        }
        let resource = self.offer.remove(slot);
        let refilled = match self.deck.pop_front() {
            Some(next) => {
                self.offer.push(next);
                true
            }
            None => false,
        };
        self.deck.push_back(resource);
        Some(TakenToken { resource, refilled })
    }

    /// Exact inverse of [`ResourceSupply::take`].
    ///
    /// The supply is a strict stack for undo purposes: this must be called
    /// with the receipt of the most recent un-undone `take`, in reverse
    /// order of the takes. Calling it out of order leaves the deck rotated
    /// relative to its real history.
    pub fn undo_take(&mut self, slot: usize, token: TakenToken) {
        let returned = self.deck.pop_back();
        debug_assert_eq!(
            returned,
            Some(token.resource),
            "undo_take out of order with the supply's take history"
        );
        if token.refilled {
            if let Some(drawn) = self.offer.pop() {
                self.deck.push_front(drawn);
            }
        }
        let slot = slot.min(self.offer.len());
        self.offer.insert(slot, token.resource);
    }
}

impl Default for ResourceSupply {
    fn default() -> Self {
        Self::new()
    }
}
