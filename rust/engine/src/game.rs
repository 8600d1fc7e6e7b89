use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::betting;
use crate::cards::cards_to_string;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{HandEvaluator, HandOracle};
use crate::logger::HandResult;
use crate::player::{ActionKind, Player, PlayerAction};
use crate::policy::Policy;
use crate::pot::{self, PotDistribution};
use crate::rules::{HandState, Street};

/// Most seats one deck can serve: 2 hole cards each plus 3 burns and 5 board cards.
pub const MAX_PLAYERS: usize = 22;

/// Forced bets for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    #[serde(default)]
    pub ante: u32,
}

impl HandConfig {
    pub fn new(small_blind: u32, big_blind: u32) -> Self {
        Self {
            small_blind,
            big_blind,
            ante: 0,
        }
    }

    pub fn with_ante(mut self, ante: u32) -> Self {
        self.ante = ante;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(GameError::ConfigurationError(
                "blinds must be positive".into(),
            ));
        }
        if self.small_blind > self.big_blind {
            return Err(GameError::ConfigurationError(format!(
                "small blind {} exceeds big blind {}",
                self.small_blind, self.big_blind
            )));
        }
        Ok(())
    }
}

impl Default for HandConfig {
    fn default() -> Self {
        Self::new(10, 20)
    }
}

/// Plays single hands of Texas Hold'em over a caller-owned table.
///
/// Seat 0 posts the small blind and seat 1 the big blind. Each hand runs
/// reset, deal, blinds and antes, four single-pass betting streets, showdown,
/// pot distribution and finally the automated players' learning update.
///
/// # Examples
///
/// ```
/// use holdem_engine::game::{HandConfig, PokerGame};
/// use holdem_engine::player::Player;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let mut game = PokerGame::new(HandConfig::new(10, 20)).unwrap();
/// let mut players = vec![Player::automated("A", 1000), Player::automated("B", 1000)];
/// let mut rng = ChaCha20Rng::seed_from_u64(42);
///
/// let result = game.play_hand(&mut players, &mut rng).unwrap();
/// assert_eq!(result.community_cards.len(), 5);
/// let total: u32 = players.iter().map(|p| p.stack()).sum();
/// assert_eq!(total + result.split_remainder, 2000);
/// ```
#[derive(Debug)]
pub struct PokerGame<O = HandEvaluator> {
    config: HandConfig,
    oracle: O,
    deck: Deck,
    state: HandState,
    history: Vec<PlayerAction>,
}

impl PokerGame<HandEvaluator> {
    pub fn new(config: HandConfig) -> Result<Self, GameError> {
        Self::with_oracle(config, HandEvaluator)
    }
}

impl<O: HandOracle> PokerGame<O> {
    pub fn with_oracle(config: HandConfig, oracle: O) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            oracle,
            deck: Deck::new(),
            state: HandState::new(),
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &HandConfig {
        &self.config
    }

    pub fn state(&self) -> &HandState {
        &self.state
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Actions of the current or last hand, blinds included.
    pub fn history(&self) -> &[PlayerAction] {
        &self.history
    }

    /// Plays one complete hand. Stacks of `players` carry the outcome.
    pub fn play_hand<R: Rng + ?Sized>(
        &mut self,
        players: &mut [Player],
        rng: &mut R,
    ) -> Result<HandResult, GameError> {
        validate_table(players)?;
        let stacks_before: Vec<u32> = players.iter().map(Player::stack).collect();

        self.reset_hand(players);
        self.deal_hole_cards(players, rng)?;
        self.post_blinds_and_antes(players);
        self.betting_round(players, rng);
        while let Some(street) = self.state.advance() {
            self.deal_community_cards(street.cards_dealt())?;
            for player in players.iter_mut() {
                player.reset_street_bet();
            }
            self.betting_round(players, rng);
        }

        let winners = pot::showdown(&self.oracle, &self.state.community_cards, players);
        let distribution = pot::distribute_pot(&mut self.state.pot, &winners, players);
        learn(players, &winners);
        record_stats(players, &winners, &stacks_before);

        let result = self.result(players, &winners, distribution);
        info!(
            winners = ?result.winners,
            pot = result.pot,
            remainder = result.split_remainder,
            board = %cards_to_string(&self.state.community_cards),
            "hand complete"
        );
        Ok(result)
    }

    /// Clears the board, pot and every player's hand-scoped state, and
    /// restores a full deck.
    pub fn reset_hand(&mut self, players: &mut [Player]) {
        self.deck.reset();
        self.state.reset();
        self.history.clear();
        for player in players.iter_mut() {
            player.clear_hand();
        }
    }

    /// Shuffles and deals two consecutive cards to each seat in order.
    pub fn deal_hole_cards<R: Rng + ?Sized>(
        &mut self,
        players: &mut [Player],
        rng: &mut R,
    ) -> Result<(), GameError> {
        self.deck.shuffle(rng);
        for player in players.iter_mut() {
            let cards = self.deck.deal(2)?;
            player.receive_cards([cards[0], cards[1]]);
        }
        Ok(())
    }

    /// Antes from every seat, then the small blind from seat 0 and the big
    /// blind from seat 1, each capped at the stack.
    pub fn post_blinds_and_antes(&mut self, players: &mut [Player]) {
        if self.config.ante > 0 {
            for player in players.iter_mut() {
                self.state.pot += player.post_ante(self.config.ante);
            }
        }
        if players.len() < 2 {
            return;
        }
        let blinds = [self.config.small_blind, self.config.big_blind];
        for (player, blind) in players.iter_mut().zip(blinds) {
            let paid = player.post_blind(blind);
            if paid == 0 {
                continue;
            }
            self.state.pot += paid;
            self.state.current_bet = self.state.current_bet.max(player.total_bet());
            let action = PlayerAction {
                player: player.name().to_string(),
                kind: ActionKind::Bet,
                amount: paid,
                street: Street::Preflop,
            };
            debug!(player = player.name(), amount = paid, "blind posted");
            self.history.push(action);
        }
    }

    /// Resolves the current street.
    pub fn betting_round<R: Rng + ?Sized>(&mut self, players: &mut [Player], rng: &mut R) {
        betting::play_street(
            &mut self.state,
            players,
            self.config.big_blind,
            &self.oracle,
            rng,
            &mut self.history,
        );
    }

    /// Burns one card and deals `count` cards to the board.
    pub fn deal_community_cards(&mut self, count: usize) -> Result<(), GameError> {
        self.deck.burn()?;
        let cards = self.deck.deal(count)?;
        self.state.community_cards.extend(cards);
        Ok(())
    }

    fn result(
        &self,
        players: &[Player],
        winners: &[usize],
        distribution: PotDistribution,
    ) -> HandResult {
        HandResult {
            winners: winners
                .iter()
                .map(|&i| players[i].name().to_string())
                .collect(),
            pot: distribution.pot,
            community_cards: self
                .state
                .community_cards
                .iter()
                .map(|c| c.to_string())
                .collect(),
            hand_history: self.history.iter().map(|a| a.to_string()).collect(),
            player_hands: players
                .iter()
                .map(|p| (p.name().to_string(), p.hand_string()))
                .collect(),
            split_remainder: distribution.remainder,
        }
    }
}

fn validate_table(players: &[Player]) -> Result<(), GameError> {
    if players.len() < 2 || players.len() > MAX_PLAYERS {
        return Err(GameError::ConfigurationError(format!(
            "a hand needs 2 to {MAX_PLAYERS} players, got {}",
            players.len()
        )));
    }
    let mut names = HashSet::new();
    for player in players {
        if !names.insert(player.name()) {
            return Err(GameError::ConfigurationError(format!(
                "duplicate player name {:?}",
                player.name()
            )));
        }
        if player.stack() == 0 {
            return Err(GameError::ConfigurationError(format!(
                "player {:?} has no chips",
                player.name()
            )));
        }
    }
    Ok(())
}

// Blinds are not voluntary actions, so a player who only posted learns from a check.
fn learn(players: &mut [Player], winners: &[usize]) {
    for (idx, player) in players.iter_mut().enumerate() {
        let last = player
            .last_action()
            .map(|a| a.kind)
            .unwrap_or(ActionKind::Check);
        if let Policy::Automated(ai) = player.policy_mut() {
            ai.learn(last, winners.contains(&idx));
        }
    }
}

fn record_stats(players: &mut [Player], winners: &[usize], stacks_before: &[u32]) {
    for (idx, player) in players.iter_mut().enumerate() {
        let won = winners.contains(&idx);
        let profit = i64::from(player.stack()) - i64::from(stacks_before[idx]);
        player.record_hand_result(won, profit);
        if player.is_active() {
            player.stats_mut().record_showdown();
        }
    }
}
