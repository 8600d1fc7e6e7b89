//! Monte Carlo equity between two starting hands.
//!
//! Hands are written in the usual shorthand:
//!
//! | form   | meaning                        | combos |
//! |--------|--------------------------------|--------|
//! | `AhKh` | two exact cards                | 1      |
//! | `QQ`   | pocket pair                    | 6      |
//! | `AKs`  | suited, two different ranks    | 4      |
//! | `AKo`  | offsuit, two different ranks   | 12     |
//!
//! `QQo` is read as the pocket pair class. Each iteration draws one combo per
//! side, deals a five-card board from the rest of the deck and scores both
//! hands; equity is `(wins + ties / 2) / iterations` from the first hand's
//! point of view.
//!
//! ```
//! use holdem_engine::equity::calculate_equity;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(1);
//! let eq = calculate_equity("AhKh", "QdQc", 500, &mut rng).unwrap();
//! assert!((0.0..=1.0).contains(&eq));
//! ```

use std::thread;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cards::{all_suits, Card, Rank};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{HandEvaluator, HandOracle};

/// Tallies from the first hand's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityReport {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
    pub iterations: u64,
}

impl EquityReport {
    pub fn equity(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.ties as f64) / self.iterations as f64
    }

    pub fn merge(&mut self, other: &EquityReport) {
        self.wins += other.wins;
        self.ties += other.ties;
        self.losses += other.losses;
        self.iterations += other.iterations;
    }
}

/// Expands a hand descriptor into every concrete two-card combo it covers.
pub fn parse_hand_notation(notation: &str) -> Result<Vec<[Card; 2]>, GameError> {
    let invalid = || GameError::InvalidHandNotation(notation.to_string());
    let chars: Vec<char> = notation.trim().chars().collect();

    match chars.as_slice() {
        [r1, s1, r2, s2] => {
            let a: Card = format!("{r1}{s1}").parse().map_err(|_| invalid())?;
            let b: Card = format!("{r2}{s2}").parse().map_err(|_| invalid())?;
            if a == b {
                return Err(invalid());
            }
            Ok(vec![[a, b]])
        }
        [r1, r2] => {
            let (high, low) = parse_ranks(*r1, *r2).ok_or_else(invalid)?;
            if high != low {
                return Err(invalid());
            }
            Ok(pair_combos(high))
        }
        [r1, r2, flag] => {
            let (high, low) = parse_ranks(*r1, *r2).ok_or_else(invalid)?;
            match (flag.to_ascii_lowercase(), high == low) {
                ('s', true) => Err(invalid()),
                ('s', false) => Ok(all_suits()
                    .into_iter()
                    .map(|s| [Card::new(high, s), Card::new(low, s)])
                    .collect()),
                ('o', true) => Ok(pair_combos(high)),
                ('o', false) => {
                    let mut combos = Vec::with_capacity(12);
                    for s1 in all_suits() {
                        for s2 in all_suits() {
                            if s1 != s2 {
                                combos.push([Card::new(high, s1), Card::new(low, s2)]);
                            }
                        }
                    }
                    Ok(combos)
                }
                _ => Err(invalid()),
            }
        }
        _ => Err(invalid()),
    }
}

fn parse_ranks(a: char, b: char) -> Option<(Rank, Rank)> {
    let a = Rank::from_char(a)?;
    let b = Rank::from_char(b)?;
    Some(if a >= b { (a, b) } else { (b, a) })
}

fn pair_combos(rank: Rank) -> Vec<[Card; 2]> {
    let suits = all_suits();
    let mut combos = Vec::with_capacity(6);
    for (i, &s1) in suits.iter().enumerate() {
        for &s2 in &suits[i + 1..] {
            combos.push([Card::new(rank, s1), Card::new(rank, s2)]);
        }
    }
    combos
}

fn overlaps(a: &[Card; 2], b: &[Card; 2]) -> bool {
    a.iter().any(|c| b.contains(c))
}

/// Two parsed descriptors with every first-hand combo paired to the
/// second-hand combos it can coexist with.
#[derive(Debug, Clone)]
pub struct Matchup {
    pairings: Vec<([Card; 2], Vec<[Card; 2]>)>,
}

impl Matchup {
    pub fn new(hand1: &str, hand2: &str) -> Result<Self, GameError> {
        let first = parse_hand_notation(hand1)?;
        let second = parse_hand_notation(hand2)?;
        let pairings: Vec<_> = first
            .into_iter()
            .filter_map(|h1| {
                let options: Vec<[Card; 2]> = second
                    .iter()
                    .copied()
                    .filter(|h2| !overlaps(&h1, h2))
                    .collect();
                (!options.is_empty()).then_some((h1, options))
            })
            .collect();
        if pairings.is_empty() {
            return Err(GameError::InvalidHandNotation(format!(
                "{hand1} and {hand2} share every card combination"
            )));
        }
        Ok(Self { pairings })
    }

    /// Runs `iterations` independent deals.
    pub fn sample<O, R>(
        &self,
        iterations: u64,
        oracle: &O,
        rng: &mut R,
    ) -> Result<EquityReport, GameError>
    where
        O: HandOracle + ?Sized,
        R: Rng + ?Sized,
    {
        let mut report = EquityReport::default();
        for _ in 0..iterations {
            let Some((h1, options)) = self.pairings.choose(rng) else {
                break;
            };
            let Some(h2) = options.choose(rng) else {
                continue;
            };

            let mut deck = Deck::new();
            for card in h1.iter().chain(h2.iter()) {
                deck.remove(*card);
            }
            deck.shuffle(rng);
            let board = deck.deal(5)?;

            let s1 = oracle.score(&board, h1);
            let s2 = oracle.score(&board, h2);
            match s1.cmp(&s2) {
                std::cmp::Ordering::Less => report.wins += 1,
                std::cmp::Ordering::Equal => report.ties += 1,
                std::cmp::Ordering::Greater => report.losses += 1,
            }
            report.iterations += 1;
        }
        Ok(report)
    }
}

fn check_iterations(iterations: u64) -> Result<(), GameError> {
    if iterations == 0 {
        return Err(GameError::ConfigurationError(
            "iterations must be positive".into(),
        ));
    }
    Ok(())
}

/// Full tallies for `hand1` against `hand2` using `oracle`.
pub fn estimate_equity<O, R>(
    hand1: &str,
    hand2: &str,
    iterations: u64,
    oracle: &O,
    rng: &mut R,
) -> Result<EquityReport, GameError>
where
    O: HandOracle + ?Sized,
    R: Rng + ?Sized,
{
    check_iterations(iterations)?;
    Matchup::new(hand1, hand2)?.sample(iterations, oracle, rng)
}

/// Equity of `hand1` against `hand2`, in [0, 1].
pub fn calculate_equity<R: Rng + ?Sized>(
    hand1: &str,
    hand2: &str,
    iterations: u64,
    rng: &mut R,
) -> Result<f64, GameError> {
    estimate_equity(hand1, hand2, iterations, &HandEvaluator, rng).map(|r| r.equity())
}

/// Splits the work over `tasks` scoped threads.
///
/// Task `i` draws from a `ChaCha20Rng` seeded with `seed` on stream `i`, so
/// the result depends only on `(seed, tasks)`.
pub fn calculate_equity_parallel(
    hand1: &str,
    hand2: &str,
    iterations: u64,
    seed: u64,
    tasks: usize,
) -> Result<EquityReport, GameError> {
    check_iterations(iterations)?;
    if tasks == 0 {
        return Err(GameError::ConfigurationError(
            "at least one task is required".into(),
        ));
    }
    let matchup = Matchup::new(hand1, hand2)?;
    let tasks = tasks as u64;
    let base = iterations / tasks;
    let extra = iterations % tasks;

    let partials: Vec<Result<EquityReport, GameError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..tasks)
            .map(|task| {
                let share = base + u64::from(task < extra);
                let matchup = &matchup;
                scope.spawn(move || {
                    let mut rng = ChaCha20Rng::seed_from_u64(seed);
                    rng.set_stream(task);
                    trace!(task, iterations = share, "equity task started");
                    matchup.sample(share, &HandEvaluator, &mut rng)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    let mut total = EquityReport::default();
    for partial in partials {
        total.merge(&partial?);
    }
    Ok(total)
}
