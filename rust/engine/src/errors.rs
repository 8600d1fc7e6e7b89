use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card format: {0:?}")]
    InvalidCardFormat(String),
    #[error("Cannot deal {requested} card(s), only {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("Invalid hand notation: {0:?}")]
    InvalidHandNotation(String),
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
    #[error("Tournament did not finish within {hands} hands")]
    HandLimitReached { hands: u64 },
}
