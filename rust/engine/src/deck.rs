use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// A 52-card deck owned by one hand at a time.
///
/// Cards leave the live sequence when dealt, removed or burned. A removed
/// card counts as dealt, so at any point
/// `dealt() + burned() + remaining() == 52` until the next [`Deck::reset`].
/// Shuffling draws from a caller-supplied RNG so hands are reproducible:
///
/// ```
/// use holdem_engine::deck::Deck;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let mut a = Deck::new();
/// let mut b = Deck::new();
/// a.shuffle(&mut ChaCha20Rng::seed_from_u64(7));
/// b.shuffle(&mut ChaCha20Rng::seed_from_u64(7));
/// assert_eq!(a.deal(5).unwrap(), b.deal(5).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    dealt: usize,
    burned: usize,
}

impl Deck {
    /// Creates a full deck in canonical order.
    pub fn new() -> Self {
        Self {
            cards: full_deck(),
            dealt: 0,
            burned: 0,
        }
    }

    /// Restores all 52 cards in canonical order.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.dealt = 0;
        self.burned = 0;
    }

    /// Fisher-Yates shuffle of the remaining cards.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns the top `n` cards.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.cards.len() {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        self.dealt += n;
        Ok(self.cards.drain(..n).collect())
    }

    /// Discards the top card without exposing it.
    pub fn burn(&mut self) -> Result<(), GameError> {
        if self.cards.is_empty() {
            return Err(GameError::DeckExhausted {
                requested: 1,
                remaining: 0,
            });
        }
        self.cards.remove(0);
        self.burned += 1;
        Ok(())
    }

    /// Takes a specific card out of the live deck and counts it as dealt.
    /// Returns false when the card was not in the deck.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|c| *c == card) {
            Some(i) => {
                self.cards.remove(i);
                self.dealt += 1;
                true
            }
            None => false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn dealt(&self) -> usize {
        self.dealt
    }

    pub fn burned(&self) -> usize {
        self.burned
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn new_deck_starts_in_canonical_order() {
        let mut deck = Deck::new();
        let first = deck.deal(2).unwrap();
        assert_eq!(first[0].to_string(), "2c");
        assert_eq!(first[1].to_string(), "3c");
    }

    #[test]
    fn accounting_adds_up_to_52() {
        let mut deck = Deck::new();
        deck.shuffle(&mut ChaCha20Rng::seed_from_u64(3));
        deck.deal(4).unwrap();
        deck.burn().unwrap();
        deck.deal(3).unwrap();
        assert_eq!(deck.dealt() + deck.burned() + deck.remaining(), 52);
        assert_eq!(deck.remaining(), 44);
    }

    #[test]
    fn burning_an_empty_deck_fails() {
        let mut deck = Deck::new();
        deck.deal(52).unwrap();
        assert!(deck.is_empty());
        assert_eq!(
            deck.burn(),
            Err(GameError::DeckExhausted {
                requested: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn remove_takes_exactly_one_card() {
        let mut deck = Deck::new();
        let ah = "Ah".parse().unwrap();
        assert!(deck.remove(ah));
        assert!(!deck.remove(ah));
        assert_eq!(deck.remaining(), 51);
        assert_eq!(deck.dealt(), 1);
    }

    #[test]
    fn removed_cards_keep_the_accounting_at_52() {
        let mut deck = Deck::new();
        for s in ["Ah", "Kh", "Qd", "Qc"] {
            assert!(deck.remove(s.parse().unwrap()));
        }
        deck.shuffle(&mut ChaCha20Rng::seed_from_u64(11));
        deck.burn().unwrap();
        deck.deal(3).unwrap();
        assert_eq!(deck.dealt() + deck.burned() + deck.remaining(), 52);
        assert_eq!(deck.dealt(), 7);
    }

    #[test]
    fn reset_restores_full_deck() {
        let mut deck = Deck::new();
        deck.deal(10).unwrap();
        deck.burn().unwrap();
        deck.reset();
        assert_eq!(deck.remaining(), 52);
        assert_eq!(deck.dealt(), 0);
        assert_eq!(deck.burned(), 0);
    }
}
