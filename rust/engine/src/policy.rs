//! Decision policies for seated players.
//!
//! A [`Policy`] is either the interactive stub used for human seats or the
//! heuristic [`AutoPolicy`]. The betting engine dispatches on the variant;
//! the automated variant owns its aggression and adapts it after each hand.
//!
//! The heuristic combines a hand-strength estimate with aggression into one
//! signal and picks the first matching branch:
//!
//! 1. strong signal, nothing to call, coin flip under aggression: bet half the pot
//! 2. good signal and can cover the call: call
//! 3. weak signal facing a bet, coin flip over aggression: fold
//! 4. otherwise check
//!
//! ```
//! use holdem_engine::policy::{AutoPolicy, Decision};
//!
//! let ai = AutoPolicy::new(0.5);
//! // strength 0.9 + 0.5 * 0.5 = 1.15, nothing to call, r below aggression
//! let d = ai.decide(0.9, 0, 1000, 60, 20, 0.1);
//! assert_eq!(d, Decision::Bet(30));
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::hand::HandOracle;
use crate::player::ActionKind;
use crate::rules::Street;

/// Initial aggression of a new automated player.
pub const DEFAULT_AGGRESSION: f64 = 0.5;

/// Aggression step after a hand that ended on a bet, raise or all-in.
pub const AGGRESSIVE_STEP: f64 = 0.05;

/// Aggression step after a hand that ended on a fold, check or call.
pub const PASSIVE_STEP: f64 = 0.02;

// Outcomes kept in an automated player's memory.
const MEMORY_LIMIT: usize = 256;

/// What a policy wants to do on its turn, before stack limits are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
}

/// Decision policy attached to a seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Policy {
    /// Interactive stub: calls whenever it can, folds when it can't, checks otherwise.
    Human,
    /// Heuristic player with adaptive aggression.
    Automated(AutoPolicy),
}

impl Policy {
    pub fn is_automated(&self) -> bool {
        matches!(self, Policy::Automated(_))
    }
}

/// The interactive stub's choice.
pub fn human_decision(to_call: u32, stack: u32) -> Decision {
    if to_call > 0 {
        if stack >= to_call {
            Decision::Call(to_call)
        } else {
            Decision::Fold
        }
    } else {
        Decision::Check
    }
}

/// Preflop strength from hole-card ranks alone.
pub fn preflop_strength(hole: &[Card; 2]) -> f64 {
    let (r1, r2) = (hole[0].rank, hole[1].rank);
    let (high, low) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
    if r1 == r2 && r1 >= Rank::Ten {
        0.9
    } else if high >= Rank::Queen && low >= Rank::Jack {
        0.8
    } else if high >= Rank::Jack {
        0.6
    } else {
        0.3
    }
}

/// Heuristic policy state. Aggression always stays within [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoPolicy {
    aggression: f64,
    #[serde(default)]
    memory: VecDeque<(ActionKind, bool)>,
}

impl AutoPolicy {
    pub fn new(aggression: f64) -> Self {
        Self {
            aggression: aggression.clamp(0.0, 1.0),
            memory: VecDeque::new(),
        }
    }

    pub fn aggression(&self) -> f64 {
        self.aggression
    }

    /// Most recent hand outcomes, oldest first.
    pub fn memory(&self) -> impl Iterator<Item = &(ActionKind, bool)> {
        self.memory.iter()
    }

    /// Strength estimate in [0, 1]: a rank heuristic preflop, the oracle's
    /// normalized strength afterwards.
    pub fn hand_strength<O: HandOracle + ?Sized>(
        &self,
        oracle: &O,
        street: Street,
        hole: &[Card; 2],
        board: &[Card],
    ) -> f64 {
        match street {
            Street::Preflop => preflop_strength(hole),
            _ => 1.0 - oracle.percentile(oracle.score(board, hole)),
        }
    }

    /// Picks an action from a strength estimate and one uniform draw `r`.
    ///
    /// The bet branch sizes at half the pot, one big blind into an empty pot,
    /// never more than the stack.
    pub fn decide(
        &self,
        strength: f64,
        to_call: u32,
        stack: u32,
        pot: u32,
        big_blind: u32,
        r: f64,
    ) -> Decision {
        let signal = strength + self.aggression * 0.5;
        if signal >= 1.0 && to_call == 0 && stack > 0 && r < self.aggression {
            let size = if pot > 0 { pot / 2 } else { big_blind };
            Decision::Bet(size.min(stack))
        } else if signal >= 0.7 && stack >= to_call {
            Decision::Call(to_call)
        } else if signal < 0.5 && to_call > 0 && r > self.aggression {
            Decision::Fold
        } else {
            Decision::Check
        }
    }

    /// Adapts aggression to how the last hand ended.
    ///
    /// Winning after an aggressive action raises aggression and losing lowers
    /// it; after a passive action the direction is inverted.
    pub fn learn(&mut self, last_action: ActionKind, won: bool) {
        let delta = match (last_action.is_aggressive(), won) {
            (true, true) => AGGRESSIVE_STEP,
            (true, false) => -AGGRESSIVE_STEP,
            (false, true) => -PASSIVE_STEP,
            (false, false) => PASSIVE_STEP,
        };
        self.aggression = (self.aggression + delta).clamp(0.0, 1.0);

        if self.memory.len() == MEMORY_LIMIT {
            self.memory.pop_front();
        }
        self.memory.push_back((last_action, won));
    }
}

impl Default for AutoPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_AGGRESSION)
    }
}
