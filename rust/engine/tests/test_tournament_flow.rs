use holdem_engine::tournament::{Tournament, TournamentConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn four_handed() -> TournamentConfig {
    TournamentConfig {
        players: 4,
        starting_stack: 1000,
        blind_schedule: vec![(10, 20), (20, 40), (40, 80)],
        ..TournamentConfig::default()
    }
}

#[test]
fn four_player_tournament_finishes_with_one_solvent_player() {
    let mut tournament = Tournament::new(four_handed()).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(20);
    let result = tournament.run(&mut rng).unwrap();

    assert_eq!(tournament.solvent_players(), 1);
    assert!(result.winner.starts_with("Player "));
    assert!(result.winner_stack > 0 && result.winner_stack <= 4000);
    assert_eq!(result.eliminated.len(), 3);
    assert!(!result.eliminated.contains(&result.winner));
    assert_eq!(result.hands_played as usize, result.levels_played.len());

    // one level step per 20 hands, clamped at the last level
    for (i, &level) in result.levels_played.iter().enumerate() {
        assert_eq!(level, (i / 20).min(2), "hand {i}");
    }
}

#[test]
fn stepping_hand_by_hand_matches_run() {
    let mut stepped = Tournament::new(four_handed()).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let mut hands = 0;
    while stepped.play_next_hand(&mut rng).unwrap().is_some() {
        hands += 1;
    }

    let mut whole = Tournament::new(four_handed()).unwrap();
    let result = whole.run(&mut ChaCha20Rng::seed_from_u64(8)).unwrap();
    assert_eq!(result.hands_played, hands);
    assert_eq!(result.eliminated, stepped.eliminated());
}
