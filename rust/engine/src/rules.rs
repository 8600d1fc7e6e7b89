use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Represents a betting street in Texas Hold'em poker.
/// Streets are played strictly in declaration order and never re-entered.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// The street that follows this one, `None` after the river.
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Community cards dealt when this street opens.
    pub fn cards_dealt(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }

    /// Community cards on the board once this street has been dealt.
    pub fn board_size(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table state of the hand in flight: board, pot and the street's high-water bet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandState {
    pub community_cards: Vec<Card>,
    pub pot: u32,
    /// Highest `total_bet` of any player on the current street.
    pub current_bet: u32,
    pub street: Street,
}

impl HandState {
    pub fn new() -> Self {
        Self {
            community_cards: Vec::with_capacity(5),
            pot: 0,
            current_bet: 0,
            street: Street::Preflop,
        }
    }

    pub fn reset(&mut self) {
        self.community_cards.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.street = Street::Preflop;
    }

    /// Moves to the next street and clears the street's bet. Returns the new
    /// street, or `None` when the river is already done.
    pub fn advance(&mut self) -> Option<Street> {
        let next = self.street.next()?;
        self.street = next;
        self.current_bet = 0;
        Some(next)
    }
}

impl Default for HandState {
    fn default() -> Self {
        Self::new()
    }
}

/// How much of a requested payment a player actually commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payment {
    /// The full request is paid and chips remain behind.
    Exact(u32),
    /// The request reaches the stack; the whole stack goes in.
    AllIn(u32),
}

impl Payment {
    pub fn amount(self) -> u32 {
        match self {
            Payment::Exact(a) | Payment::AllIn(a) => a,
        }
    }
}

/// Caps a requested payment at the player's stack.
///
/// Any non-zero request that is at least the stack becomes an all-in for the
/// whole stack, so the paid amount is never more than the stack.
///
/// ```
/// use holdem_engine::rules::{validate_payment, Payment};
///
/// assert_eq!(validate_payment(1000, 50), Payment::Exact(50));
/// assert_eq!(validate_payment(80, 80), Payment::AllIn(80));
/// assert_eq!(validate_payment(80, 500), Payment::AllIn(80));
/// assert_eq!(validate_payment(0, 0), Payment::Exact(0));
/// ```
pub fn validate_payment(stack: u32, requested: u32) -> Payment {
    if requested > 0 && requested >= stack {
        Payment::AllIn(stack)
    } else {
        Payment::Exact(requested)
    }
}
