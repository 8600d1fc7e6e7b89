use holdem_engine::cards::Card;
use holdem_engine::game::{HandConfig, PokerGame};
use holdem_engine::hand::HandEvaluator;
use holdem_engine::player::Player;
use holdem_engine::pot::{distribute_pot, showdown};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn table() -> Vec<Player> {
    vec![
        Player::automated("Player 1", 1000),
        Player::automated("Player 2", 1000),
        Player::human("Player 3", 1000),
        Player::automated("Player 4", 1000),
    ]
}

fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace().map(|c| c.parse().unwrap()).collect()
}

#[test]
fn chips_are_conserved_across_many_hands() {
    let mut game = PokerGame::new(HandConfig::new(10, 20).with_ante(1)).unwrap();
    let mut players = table();
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let mut lost_to_splits = 0u32;

    for _ in 0..300 {
        players.retain(|p| p.stack() > 0);
        if players.len() < 2 {
            break;
        }
        let before: u32 = players.iter().map(Player::stack).sum();
        let result = game.play_hand(&mut players, &mut rng).unwrap();
        let after: u32 = players.iter().map(Player::stack).sum();
        assert_eq!(before, after + result.split_remainder);
        assert_eq!(game.state().pot, 0);
        lost_to_splits += result.split_remainder;
    }

    let total: u32 = players.iter().map(Player::stack).sum();
    assert_eq!(total + lost_to_splits, 4000);
}

#[test]
fn result_record_describes_the_hand() {
    let mut game = PokerGame::new(HandConfig::new(10, 20)).unwrap();
    let mut players = table();
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let result = game.play_hand(&mut players, &mut rng).unwrap();

    assert_eq!(result.community_cards.len(), 5);
    assert_eq!(result.player_hands.len(), 4);
    assert!(result.player_hands.values().all(|h| h.split(' ').count() == 2));
    assert!(!result.winners.is_empty());
    assert_eq!(result.hand_history[0], "Player 1 bets 10");
    assert_eq!(result.hand_history[1], "Player 2 bets 20");
    for p in &players {
        assert_eq!(p.stats().hands_played, 1);
    }
    let won: u32 = players.iter().map(|p| p.stats().hands_won).sum();
    assert_eq!(won as usize, result.winners.len());
}

#[test]
fn two_player_showdown_pays_the_better_hand() {
    let board = cards("2c 7d 9h Jc Ks");
    let mut players = vec![Player::human("A", 500), Player::human("B", 500)];
    let a = cards("Ah Ad");
    let b = cards("3h 4d");
    players[0].receive_cards([a[0], a[1]]);
    players[1].receive_cards([b[0], b[1]]);

    let winners = showdown(&HandEvaluator, &board, &players);
    assert_eq!(winners, vec![0]);

    let mut pot = 240;
    let split = distribute_pot(&mut pot, &winners, &mut players);
    assert_eq!(players[0].stack(), 500 + 240);
    assert_eq!(players[1].stack(), 500);
    assert_eq!(split.remainder, 0);
    assert_eq!(pot, 0);
}

#[test]
fn checked_down_hand_moves_only_the_blinds() {
    // two stub humans complete the blind and check every street
    let mut game = PokerGame::new(HandConfig::new(10, 20)).unwrap();
    let mut players = vec![Player::human("A", 1000), Player::human("B", 1000)];
    let mut rng = ChaCha20Rng::seed_from_u64(12);
    let result = game.play_hand(&mut players, &mut rng).unwrap();

    assert_eq!(result.pot, 40);
    match result.winners.as_slice() {
        [w] => {
            let (winner, loser) = if w == "A" { (0, 1) } else { (1, 0) };
            assert_eq!(players[winner].stack(), 1020);
            assert_eq!(players[loser].stack(), 980);
        }
        _ => assert!(players.iter().all(|p| p.stack() == 1000)),
    }
}

#[test]
fn same_seed_gives_identical_hands() {
    let run = |seed: u64| -> Vec<String> {
        let mut game = PokerGame::new(HandConfig::new(10, 20)).unwrap();
        let mut players = table();
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        (0..40)
            .map_while(|_| {
                players.retain(|p| p.stack() > 0);
                if players.len() < 2 {
                    return None;
                }
                let result = game.play_hand(&mut players, &mut rng).unwrap();
                Some(result.to_json_line().unwrap())
            })
            .collect()
    };
    let a = run(31337);
    assert_eq!(a, run(31337));
    assert_ne!(a, run(31338));
}

#[test]
fn automated_players_learn_between_hands() {
    let mut game = PokerGame::new(HandConfig::new(10, 20)).unwrap();
    let mut players = table();
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    for _ in 0..25 {
        players.retain(|p| p.stack() > 0);
        if players.len() < 2 {
            break;
        }
        game.play_hand(&mut players, &mut rng).unwrap();
    }
    for p in &players {
        match p.aggression() {
            Some(a) => assert!((0.0..=1.0).contains(&a)),
            None => assert_eq!(p.name(), "Player 3"),
        }
    }
    assert!(players
        .iter()
        .filter_map(|p| p.aggression())
        .any(|a| (a - 0.5).abs() > 1e-9));
}
