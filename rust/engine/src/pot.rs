//! Showdown and pot distribution.
//!
//! There is a single pot; side pots are not computed. Winners split it by
//! integer division and any remainder is not credited to anyone.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandOracle;
use crate::player::Player;

/// Outcome of splitting the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotDistribution {
    /// Pot size before distribution.
    pub pot: u32,
    /// Chips credited to each winner.
    pub share: u32,
    /// Chips left over by the integer split.
    pub remainder: u32,
}

/// Indices of the active players holding the best (lowest) score against `board`.
///
/// Every player tied on the best score is a winner. Returns an empty list when
/// nobody is left contesting the pot.
pub fn showdown<O: HandOracle + ?Sized>(
    oracle: &O,
    board: &[Card],
    players: &[Player],
) -> Vec<usize> {
    let mut best: Option<u16> = None;
    let mut winners = Vec::new();
    for (idx, player) in players.iter().enumerate() {
        if !player.is_active() {
            continue;
        }
        let Some(hole) = player.hole_cards() else {
            continue;
        };
        let score = oracle.score(board, &hole);
        match best {
            Some(b) if score > b => {}
            Some(b) if score == b => winners.push(idx),
            _ => {
                best = Some(score);
                winners.clear();
                winners.push(idx);
            }
        }
    }
    winners
}

/// Splits `pot` evenly among `winners` and empties it.
pub fn distribute_pot(
    pot: &mut u32,
    winners: &[usize],
    players: &mut [Player],
) -> PotDistribution {
    let total = *pot;
    *pot = 0;
    if winners.is_empty() {
        return PotDistribution {
            pot: total,
            share: 0,
            remainder: total,
        };
    }

    let count = winners.len() as u32;
    let share = total / count;
    for &idx in winners {
        players[idx].add_chips(share);
    }
    PotDistribution {
        pot: total,
        share,
        remainder: total - share * count,
    }
}
