//! Hand strength evaluation.
//!
//! [`evaluate_hand`] classifies the best five-card hand out of up to seven
//! cards. [`HandEvaluator`] turns that classification into the oracle
//! convention the rest of the engine consumes through [`HandOracle`]: an
//! integer score where 1 is a royal flush and [`HAND_CLASSES`] is the worst
//! possible high card.

use std::cmp::Ordering;
use std::sync::LazyLock;

use crate::cards::{Card, Rank, Suit};

/// Number of distinct five-card hand classes.
pub const HAND_CLASSES: usize = 7462;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Category plus tiebreak ranks. The derived ordering compares category first,
/// then kickers, so a greater value is a stronger hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks, zero-filled
    pub kickers: [u8; 5],
}

/// Hand-strength oracle consumed by the betting engine, showdown and equity
/// estimator.
pub trait HandOracle {
    /// Scores hole cards plus board; lower is stronger, totally ordered
    /// across categories.
    fn score(&self, board: &[Card], hole: &[Card; 2]) -> u16;

    /// Fraction of hand classes ranking at or above `score`, in [0, 1].
    /// `1.0 - percentile` is the normalized strength of the hand.
    fn percentile(&self, score: u16) -> f64;
}

/// Oracle backed by [`evaluate_hand`] and a ranking of all 7462 classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandEvaluator;

impl HandEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Scores an arbitrary set of up to seven cards.
    pub fn score_cards(&self, cards: &[Card]) -> u16 {
        let strength = evaluate_hand(cards);
        let weaker = CLASSES.partition_point(|c| *c < strength);
        (HAND_CLASSES - weaker).clamp(1, HAND_CLASSES) as u16
    }
}

impl HandOracle for HandEvaluator {
    fn score(&self, board: &[Card], hole: &[Card; 2]) -> u16 {
        let mut cards = Vec::with_capacity(board.len() + 2);
        cards.extend_from_slice(board);
        cards.extend_from_slice(hole);
        self.score_cards(&cards)
    }

    fn percentile(&self, score: u16) -> f64 {
        (f64::from(score) / HAND_CLASSES as f64).clamp(0.0, 1.0)
    }
}

// Every distinct five-card class, weakest first.
static CLASSES: LazyLock<Vec<HandStrength>> = LazyLock::new(build_classes);

fn build_classes() -> Vec<HandStrength> {
    let ranks = crate::cards::all_ranks();
    let suits = crate::cards::all_suits();
    let mut classes = Vec::with_capacity(HAND_CLASSES);

    for a in 0..13 {
        for b in a..13 {
            for c in b..13 {
                for d in c..13 {
                    for e in d..13 {
                        if a == e {
                            continue;
                        }
                        let idx = [a, b, c, d, e];
                        let mut hand = [Card::new(Rank::Two, Suit::Clubs); 5];
                        for (i, &r) in idx.iter().enumerate() {
                            let occurrence = idx[..i].iter().filter(|&&x| x == r).count();
                            hand[i] = Card::new(ranks[r], suits[occurrence]);
                        }
                        let distinct = a < b && b < c && c < d && d < e;
                        if distinct {
                            // all suits equal above: the suited version
                            classes.push(evaluate_hand(&hand));
                            hand[4].suit = suits[1];
                        }
                        classes.push(evaluate_hand(&hand));
                    }
                }
            }
        }
    }

    classes.sort_unstable();
    classes.dedup();
    classes
}

/// Evaluates the best five-card hand contained in `cards` (up to seven).
///
/// Fewer than five cards are classified by whatever pairs they contain, with
/// missing kickers left as zero.
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    // Count ranks and suits
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_counts = [0u8; 4];
    let mut rank_mask: u16 = 0;
    let mut by_suit_mask = [0u16; 4];
    for &c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit_mask[s] |= 1u16 << r;
    }

    let flush_suit = suit_counts.iter().position(|&count| count >= 5);

    // Straight flush
    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(by_suit_mask[s]) {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    if let Some(s) = flush_suit {
        let mut k = [0u8; 5];
        let top = (2..=14u8)
            .rev()
            .filter(|&r| by_suit_mask[s] & (1u16 << r) != 0)
            .take(5);
        for (slot, r) in k.iter_mut().zip(top) {
            *slot = r;
        }
        return HandStrength {
            category: Category::Flush,
            kickers: k,
        };
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    // Three / Two pair / One pair / High card
    let (trips, pairs, singles) = classify_multiples(&rank_counts);
    if let Some(&t) = trips.first() {
        let mut k = [t, 0, 0, 0, 0];
        let mut rest: Vec<u8> = pairs.iter().chain(singles.iter()).copied().collect();
        rest.sort_unstable_by(|a, b| b.cmp(a));
        fill_kickers(&mut k[1..3], &rest);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }
    if pairs.len() >= 2 {
        let mut k = [pairs[0], pairs[1], 0, 0, 0];
        // a third pair can play as the kicker
        let mut rest: Vec<u8> = pairs[2..].iter().chain(singles.iter()).copied().collect();
        rest.sort_unstable_by(|a, b| b.cmp(a));
        fill_kickers(&mut k[2..3], &rest);
        return HandStrength {
            category: Category::TwoPair,
            kickers: k,
        };
    }
    if let Some(&p) = pairs.first() {
        let mut k = [p, 0, 0, 0, 0];
        fill_kickers(&mut k[1..4], &singles);
        return HandStrength {
            category: Category::OnePair,
            kickers: k,
        };
    }

    let mut k = [0u8; 5];
    fill_kickers(&mut k, &singles);
    HandStrength {
        category: Category::HighCard,
        kickers: k,
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn fill_kickers(slots: &mut [u8], ranks_desc: &[u8]) {
    for (slot, &r) in slots.iter_mut().zip(ranks_desc) {
        *slot = r;
    }
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low
    if (m & (1u16 << 14)) != 0 {
        m |= 1u16 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u8).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    let &trip = trips.first()?;
    // second set of trips plays as the pair
    let pair = trips.get(1).copied().max(pairs.first().copied())?;
    Some((trip, pair))
}

/// Returns (trips, pairs, singles), each ordered high -> low.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}
