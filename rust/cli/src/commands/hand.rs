//! `hand`: plays a single hand and prints its record.

use std::io::Write;

use holdem_engine::game::PokerGame;

use crate::commands::{seat_players, seeded_rng};
use crate::config::Config;
use crate::error::CliError;

/// Plays one hand at the configured table and writes the result as one JSON
/// line to `out`.
pub fn handle_hand_command(
    cfg: &Config,
    human_seats: &[usize],
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut players = seat_players(cfg, human_seats)?;
    let mut game = PokerGame::new(cfg.hand_config())?;
    let mut rng = seeded_rng(cfg.seed);

    let result = game.play_hand(&mut players, &mut rng)?;
    writeln!(out, "{}", result.to_json_line()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::logger::HandResult;

    #[test]
    fn prints_one_parsable_record() {
        let cfg = Config {
            players: 3,
            seed: Some(42),
            ..Config::default()
        };
        let mut out = Vec::new();
        handle_hand_command(&cfg, &[], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let record: HandResult = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(record.player_hands.len(), 3);
        assert_eq!(record.community_cards.len(), 5);
    }

    #[test]
    fn rejects_human_seat_off_the_table() {
        let cfg = Config::default();
        let mut out = Vec::new();
        let e = handle_hand_command(&cfg, &[5], &mut out).unwrap_err();
        assert!(matches!(e, CliError::InvalidInput(_)));
    }
}
