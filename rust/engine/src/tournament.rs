//! Freezeout tournament driver.
//!
//! Hands are played one after another at the current blind level until a
//! single player holds chips. Busted players leave the table for good, the
//! blind level climbs every `hands_per_level` hands and stays on the last
//! entry of the schedule once it gets there.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::GameError;
use crate::game::{HandConfig, PokerGame, MAX_PLAYERS};
use crate::logger::HandResult;
use crate::player::Player;

pub const DEFAULT_HANDS_PER_LEVEL: u64 = 20;
pub const DEFAULT_MAX_HANDS: u64 = 100_000;

/// Blind schedule doubling twice from `(small_blind, big_blind)`.
pub fn doubling_schedule(small_blind: u32, big_blind: u32) -> Vec<(u32, u32)> {
    vec![
        (small_blind, big_blind),
        (small_blind.saturating_mul(2), big_blind.saturating_mul(2)),
        (small_blind.saturating_mul(4), big_blind.saturating_mul(4)),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub players: usize,
    pub starting_stack: u32,
    /// `(small_blind, big_blind)` per level
    pub blind_schedule: Vec<(u32, u32)>,
    #[serde(default = "default_hands_per_level")]
    pub hands_per_level: u64,
    #[serde(default = "default_max_hands")]
    pub max_hands: u64,
    /// Zero-based seats played by the interactive stub instead of the heuristic
    #[serde(default)]
    pub human_seats: Vec<usize>,
}

fn default_hands_per_level() -> u64 {
    DEFAULT_HANDS_PER_LEVEL
}

fn default_max_hands() -> u64 {
    DEFAULT_MAX_HANDS
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            players: 4,
            starting_stack: 1000,
            blind_schedule: doubling_schedule(10, 20),
            hands_per_level: DEFAULT_HANDS_PER_LEVEL,
            max_hands: DEFAULT_MAX_HANDS,
            human_seats: Vec::new(),
        }
    }
}

impl TournamentConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        let fail = |msg: String| Err(GameError::ConfigurationError(msg));
        if self.players < 2 || self.players > MAX_PLAYERS {
            return fail(format!(
                "a tournament needs 2 to {MAX_PLAYERS} players, got {}",
                self.players
            ));
        }
        if self.starting_stack == 0 {
            return fail("starting stack must be positive".into());
        }
        if self.blind_schedule.is_empty() {
            return fail("blind schedule is empty".into());
        }
        for (level, &(sb, bb)) in self.blind_schedule.iter().enumerate() {
            HandConfig::new(sb, bb)
                .validate()
                .map_err(|e| GameError::ConfigurationError(format!("blind level {level}: {e}")))?;
        }
        if self.hands_per_level == 0 {
            return fail("hands per level must be positive".into());
        }
        if let Some(seat) = self.human_seats.iter().find(|&&s| s >= self.players) {
            return fail(format!("human seat {seat} is outside the table"));
        }
        Ok(())
    }
}

/// Summary of a finished tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub winner: String,
    pub winner_stack: u32,
    pub hands_played: u64,
    /// Index into the blind schedule in force when play stopped
    pub final_level: usize,
    /// Blind level used for each hand, in order
    pub levels_played: Vec<usize>,
    /// Players in the order they busted
    pub eliminated: Vec<String>,
}

#[derive(Debug)]
pub struct Tournament {
    config: TournamentConfig,
    players: Vec<Player>,
    level: usize,
    hands_played: u64,
    levels_played: Vec<usize>,
    eliminated: Vec<String>,
}

impl Tournament {
    /// Seats `"Player 1"`.. with the starting stack.
    pub fn new(config: TournamentConfig) -> Result<Self, GameError> {
        config.validate()?;
        let players = (0..config.players)
            .map(|i| {
                let name = format!("Player {}", i + 1);
                if config.human_seats.contains(&i) {
                    Player::human(name, config.starting_stack)
                } else {
                    Player::automated(name, config.starting_stack)
                }
            })
            .collect();
        Ok(Self {
            config,
            players,
            level: 0,
            hands_played: 0,
            levels_played: Vec::new(),
            eliminated: Vec::new(),
        })
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Players still seated, in current seating order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// `(small_blind, big_blind)` of the current level.
    pub fn blinds(&self) -> (u32, u32) {
        self.config.blind_schedule[self.level]
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    pub fn levels_played(&self) -> &[usize] {
        &self.levels_played
    }

    pub fn eliminated(&self) -> &[String] {
        &self.eliminated
    }

    pub fn solvent_players(&self) -> usize {
        self.players.iter().filter(|p| p.stack() > 0).count()
    }

    pub fn is_finished(&self) -> bool {
        self.solvent_players() <= 1
    }

    /// Plays one hand, or returns `None` once a single solvent player is left.
    pub fn play_next_hand<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<HandResult>, GameError> {
        self.drop_busted();
        if self.is_finished() {
            return Ok(None);
        }
        if self.hands_played >= self.config.max_hands {
            return Err(GameError::HandLimitReached {
                hands: self.hands_played,
            });
        }

        let (sb, bb) = self.blinds();
        let mut game = PokerGame::new(HandConfig::new(sb, bb))?;
        let result = game.play_hand(&mut self.players, rng)?;
        self.levels_played.push(self.level);
        self.hands_played += 1;

        if self.hands_played % self.config.hands_per_level == 0
            && self.level + 1 < self.config.blind_schedule.len()
        {
            self.level += 1;
            let (sb, bb) = self.blinds();
            info!(
                level = self.level,
                small_blind = sb,
                big_blind = bb,
                hands = self.hands_played,
                "blinds up"
            );
        }
        self.rotate_button();
        Ok(Some(result))
    }

    /// Plays until one player holds every remaining chip.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TournamentResult, GameError> {
        while self.play_next_hand(rng)?.is_some() {}

        let winner = self
            .players
            .iter()
            .find(|p| p.stack() > 0)
            .ok_or_else(|| GameError::ConfigurationError("no player has chips left".into()))?;
        info!(
            winner = winner.name(),
            stack = winner.stack(),
            hands = self.hands_played,
            "tournament complete"
        );
        Ok(TournamentResult {
            winner: winner.name().to_string(),
            winner_stack: winner.stack(),
            hands_played: self.hands_played,
            final_level: self.level,
            levels_played: self.levels_played.clone(),
            eliminated: self.eliminated.clone(),
        })
    }

    // Seat 0 posts the small blind, so moving everyone one seat left passes
    // the blinds round the table.
    fn rotate_button(&mut self) {
        if !self.players.is_empty() {
            self.players.rotate_left(1);
        }
    }

    fn drop_busted(&mut self) {
        let hands = self.hands_played;
        let eliminated = &mut self.eliminated;
        self.players.retain(|p| {
            if p.stack() > 0 {
                return true;
            }
            info!(player = p.name(), hands, "player eliminated");
            eliminated.push(p.name().to_string());
            false
        });
    }
}
