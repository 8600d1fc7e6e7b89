use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{cards_to_string, Card};
use crate::policy::{AutoPolicy, Policy};
use crate::rules::{validate_payment, Payment, Street};

/// Kind of a recorded player action.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl ActionKind {
    /// Bet, raise and all-in put the player in the lead; fold, check and call don't.
    pub fn is_aggressive(self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all_in",
        }
    }
}

/// Immutable record of one action taken during a hand.
///
/// For a raise `amount` is the raise-to target; for every other kind it is
/// the number of chips paid.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerAction {
    pub player: String,
    pub kind: ActionKind,
    pub amount: u32,
    pub street: Street,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.player;
        match self.kind {
            ActionKind::Fold => write!(f, "{name} folds"),
            ActionKind::Check => write!(f, "{name} checks"),
            ActionKind::Call => write!(f, "{name} calls {}", self.amount),
            ActionKind::Bet => write!(f, "{name} bets {}", self.amount),
            ActionKind::Raise => write!(f, "{name} raises to {}", self.amount),
            ActionKind::AllIn => write!(f, "{name} all-in {}", self.amount),
        }
    }
}

/// Per-player counters accumulated across hands. Rates are derived on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hands_played: u32,
    pub hands_won: u32,
    pub total_profit: i64,
    /// Voluntarily put money in pot
    pub vpip_count: u32,
    /// Pre-flop raise
    pub pfr_count: u32,
    pub showdown_count: u32,
    pub fold_count: u32,
    pub total_bets: u32,
    pub total_raises: u32,
}

impl PlayerStats {
    pub fn win_rate(&self) -> f64 {
        self.rate(self.hands_won)
    }

    pub fn vpip(&self) -> f64 {
        self.rate(self.vpip_count)
    }

    pub fn pfr(&self) -> f64 {
        self.rate(self.pfr_count)
    }

    pub fn fold_rate(&self) -> f64 {
        self.rate(self.fold_count)
    }

    pub fn record_hand_result(&mut self, won: bool, profit: i64) {
        self.hands_played += 1;
        if won {
            self.hands_won += 1;
        }
        self.total_profit += profit;
    }

    pub fn record_showdown(&mut self) {
        self.showdown_count += 1;
    }

    fn rate(&self, count: u32) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            f64::from(count) / f64::from(self.hands_played)
        }
    }
}

/// A seat at the table: chips that persist across hands plus the state of
/// the hand in flight.
///
/// Action methods pay from the stack, never more than the stack; any request
/// that reaches the stack is recorded as an all-in.
///
/// ```
/// use holdem_engine::player::{ActionKind, Player};
/// use holdem_engine::rules::Street;
///
/// let mut p = Player::human("Alice", 100);
/// let action = p.bet(150, Street::Flop);
/// assert_eq!(action.kind, ActionKind::AllIn);
/// assert_eq!(action.amount, 100);
/// assert_eq!(p.stack(), 0);
/// assert!(p.is_all_in());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: String,
    stack: u32,
    hole: Option<[Card; 2]>,
    /// Chips committed on the current street
    total_bet: u32,
    is_active: bool,
    is_all_in: bool,
    last_action: Option<PlayerAction>,
    /// Paid chips voluntarily this hand
    voluntary: bool,
    /// Raised before the flop this hand
    raised_preflop: bool,
    policy: Policy,
    stats: PlayerStats,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u32, policy: Policy) -> Self {
        Self {
            name: name.into(),
            stack,
            hole: None,
            total_bet: 0,
            is_active: true,
            is_all_in: false,
            last_action: None,
            voluntary: false,
            raised_preflop: false,
            policy,
            stats: PlayerStats::default(),
        }
    }

    /// A player driven by the interactive stub policy.
    pub fn human(name: impl Into<String>, stack: u32) -> Self {
        Self::new(name, stack, Policy::Human)
    }

    /// A player driven by the heuristic policy at default aggression.
    pub fn automated(name: impl Into<String>, stack: u32) -> Self {
        Self::new(name, stack, Policy::Automated(AutoPolicy::default()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }
    pub fn total_bet(&self) -> u32 {
        self.total_bet
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    pub fn is_all_in(&self) -> bool {
        self.is_all_in
    }
    pub fn last_action(&self) -> Option<&PlayerAction> {
        self.last_action.as_ref()
    }
    pub fn policy(&self) -> &Policy {
        &self.policy
    }
    pub fn policy_mut(&mut self) -> &mut Policy {
        &mut self.policy
    }
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }
    pub fn stats_mut(&mut self) -> &mut PlayerStats {
        &mut self.stats
    }

    /// Aggression of an automated player, `None` for humans.
    pub fn aggression(&self) -> Option<f64> {
        match &self.policy {
            Policy::Human => None,
            Policy::Automated(ai) => Some(ai.aggression()),
        }
    }

    pub fn receive_cards(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    /// Clears every hand-scoped field; the stack is kept.
    pub fn clear_hand(&mut self) {
        self.hole = None;
        self.total_bet = 0;
        self.is_active = true;
        self.is_all_in = false;
        self.last_action = None;
        self.voluntary = false;
        self.raised_preflop = false;
    }

    /// Folds the finished hand into the stats. VPIP and PFR count at most
    /// once per hand.
    pub fn record_hand_result(&mut self, won: bool, profit: i64) {
        self.stats.record_hand_result(won, profit);
        if self.voluntary {
            self.stats.vpip_count += 1;
        }
        if self.raised_preflop {
            self.stats.pfr_count += 1;
        }
    }

    pub fn reset_street_bet(&mut self) {
        self.total_bet = 0;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.stack >= amount
    }

    /// Chips needed to match `current_bet`.
    pub fn call_amount(&self, current_bet: u32) -> u32 {
        current_bet.saturating_sub(self.total_bet)
    }

    /// Still contesting the pot and able to act.
    pub fn is_in_hand(&self) -> bool {
        self.is_active && !self.is_all_in
    }

    pub fn hand_string(&self) -> String {
        match &self.hole {
            Some(cards) => cards_to_string(cards),
            None => "No cards".to_string(),
        }
    }

    pub fn fold(&mut self, street: Street) -> PlayerAction {
        self.is_active = false;
        self.stats.fold_count += 1;
        self.record(ActionKind::Fold, 0, street)
    }

    pub fn check(&mut self, street: Street) -> PlayerAction {
        self.record(ActionKind::Check, 0, street)
    }

    pub fn call(&mut self, amount: u32, street: Street) -> PlayerAction {
        match validate_payment(self.stack, amount) {
            Payment::AllIn(_) => self.all_in(street),
            Payment::Exact(paid) => {
                self.commit(paid);
                if paid > 0 {
                    self.voluntary = true;
                }
                self.record(ActionKind::Call, paid, street)
            }
        }
    }

    pub fn bet(&mut self, amount: u32, street: Street) -> PlayerAction {
        match validate_payment(self.stack, amount) {
            Payment::AllIn(_) => self.all_in(street),
            Payment::Exact(paid) => {
                self.commit(paid);
                self.voluntary = true;
                self.stats.total_bets += 1;
                self.record(ActionKind::Bet, paid, street)
            }
        }
    }

    /// Raises this street's total to `target`, paying only the difference.
    pub fn raise_to(&mut self, target: u32, street: Street) -> PlayerAction {
        let increment = target.saturating_sub(self.total_bet);
        if street == Street::Preflop && increment > 0 {
            self.raised_preflop = true;
        }
        match validate_payment(self.stack, increment) {
            Payment::AllIn(_) => self.all_in(street),
            Payment::Exact(paid) => {
                self.commit(paid);
                self.voluntary = true;
                self.stats.total_raises += 1;
                self.record(ActionKind::Raise, self.total_bet, street)
            }
        }
    }

    pub fn all_in(&mut self, street: Street) -> PlayerAction {
        let amount = self.stack;
        self.commit(amount);
        self.is_all_in = true;
        if amount > 0 {
            self.voluntary = true;
        }
        self.record(ActionKind::AllIn, amount, street)
    }

    /// Pays a blind, capped at the stack. The blind counts toward this
    /// street's bet but is not a voluntary action. Returns the chips paid.
    pub fn post_blind(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.stack);
        self.commit(paid);
        self.mark_all_in_if_broke(paid);
        paid
    }

    /// Pays an ante, capped at the stack. Antes go to the pot without
    /// counting toward the street's bet.
    pub fn post_ante(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.mark_all_in_if_broke(paid);
        paid
    }

    fn commit(&mut self, paid: u32) {
        debug_assert!(paid <= self.stack);
        self.stack -= paid;
        self.total_bet += paid;
    }

    fn mark_all_in_if_broke(&mut self, paid: u32) {
        if paid > 0 && self.stack == 0 {
            self.is_all_in = true;
        }
    }

    fn record(&mut self, kind: ActionKind, amount: u32, street: Street) -> PlayerAction {
        let action = PlayerAction {
            player: self.name.clone(),
            kind,
            amount,
            street,
        };
        self.last_action = Some(action.clone());
        action
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${})", self.name, self.stack)
    }
}
