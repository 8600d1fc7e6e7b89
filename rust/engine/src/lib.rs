//! # holdem-engine: Texas Hold'em simulation core
//!
//! Plays complete hands of no-limit Texas Hold'em between automated and
//! stub-human players, runs freezeout tournaments with an escalating blind
//! schedule, and estimates equity between starting hands by Monte Carlo
//! sampling. All randomness comes from a caller-supplied [`rand::Rng`], so a
//! seeded `ChaCha20Rng` reproduces every shuffle, decision and sample.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text form
//! - [`deck`] - 52-card deck with shuffle, deal and burn
//! - [`hand`] - Hand evaluation and the [`hand::HandOracle`] scoring interface
//! - [`player`] - Player state, action ledger and statistics
//! - [`policy`] - Human stub and heuristic decision policies
//! - [`rules`] - Streets, per-hand state and payment capping
//! - [`betting`] - Single-pass betting street
//! - [`pot`] - Showdown and pot distribution
//! - [`game`] - Hand orchestration
//! - [`tournament`] - Multi-hand freezeout driver
//! - [`equity`] - Hand notation and Monte Carlo equity
//! - [`logger`] - Hand result records
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::game::{HandConfig, PokerGame};
//! use holdem_engine::player::Player;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut game = PokerGame::new(HandConfig::new(10, 20)).unwrap();
//! let mut players = vec![
//!     Player::automated("Player 1", 1000),
//!     Player::automated("Player 2", 1000),
//!     Player::human("Player 3", 1000),
//! ];
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let result = game.play_hand(&mut players, &mut rng).unwrap();
//! println!("{}", result.to_json_line().unwrap());
//! ```
//!
//! ## Hand Evaluation
//!
//! ```rust
//! use holdem_engine::cards::Card;
//! use holdem_engine::hand::{HandEvaluator, HandOracle};
//!
//! let board: Vec<Card> = ["Qh", "Jh", "Th", "2c", "3d"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! let hole = ["Ah".parse().unwrap(), "Kh".parse().unwrap()];
//!
//! assert_eq!(HandEvaluator.score(&board, &hole), 1);
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod equity;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod policy;
pub mod pot;
pub mod rules;
pub mod tournament;
