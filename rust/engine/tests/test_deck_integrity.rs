use std::collections::HashSet;

use holdem_engine::cards::{full_deck, Card};
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn four_players_two_cards_each() {
    let mut deck = Deck::new();
    deck.shuffle(&mut ChaCha20Rng::seed_from_u64(2024));
    let mut seen = HashSet::new();
    for _ in 0..4 {
        for card in deck.deal(2).expect("enough cards") {
            assert!(seen.insert(card), "{card} dealt twice");
        }
    }
    assert_eq!(seen.len(), 8);
    assert_eq!(deck.remaining(), 44);
}

#[test]
fn dealing_past_the_end_fails() {
    let mut deck = Deck::new();
    deck.deal(50).unwrap();
    assert_eq!(
        deck.deal(3),
        Err(GameError::DeckExhausted {
            requested: 3,
            remaining: 2
        })
    );
    // a failed deal takes nothing
    assert_eq!(deck.remaining(), 2);
    deck.burn().unwrap();
    deck.burn().unwrap();
    assert!(deck.burn().is_err());
}

#[test]
fn whole_hand_keeps_52_card_accounting() {
    let mut deck = Deck::new();
    deck.shuffle(&mut ChaCha20Rng::seed_from_u64(6));
    let mut seen: HashSet<Card> = deck.deal(2 * 9).unwrap().into_iter().collect();
    for n in [3, 1, 1] {
        deck.burn().unwrap();
        seen.extend(deck.deal(n).unwrap());
        assert_eq!(deck.dealt() + deck.burned() + deck.remaining(), 52);
    }
    assert_eq!(seen.len(), 18 + 5);
    assert_eq!(deck.burned(), 3);
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new();
    let mut d2 = Deck::new();
    d1.shuffle(&mut ChaCha20Rng::seed_from_u64(1));
    d2.shuffle(&mut ChaCha20Rng::seed_from_u64(2));
    assert_ne!(
        d1.deal(10).unwrap(),
        d2.deal(10).unwrap(),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn every_card_round_trips_through_text() {
    for card in full_deck() {
        let text = card.to_string();
        assert_eq!(text.len(), 2);
        assert_eq!(text.parse::<Card>().unwrap(), card);
    }
    assert_eq!("tD".parse::<Card>().unwrap().to_string(), "Td");
    for bad in ["", "A", "1h", "Ax", "Ahh", "10h"] {
        assert!(
            matches!(bad.parse::<Card>(), Err(GameError::InvalidCardFormat(_))),
            "{bad:?} should not parse"
        );
    }
}
