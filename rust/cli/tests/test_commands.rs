use holdem_cli::run;

fn run_capture(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn help_lists_subcommands() {
    let (code, stdout, _) = run_capture(&["holdem", "--help"]);
    assert_eq!(code, 0);
    for cmd in ["hand", "sim", "tournament", "equity", "cfg"] {
        assert!(stdout.contains(cmd), "help should mention {cmd}");
    }
}

#[test]
fn unknown_subcommand_exits_2() {
    let (code, _, stderr) = run_capture(&["holdem", "deal"]);
    assert_eq!(code, 2);
    assert!(!stderr.is_empty());
}

#[test]
fn hand_is_reproducible_from_seed() {
    let args = ["holdem", "hand", "--players", "4", "--seed", "99"];
    let (code, first, stderr) = run_capture(&args);
    assert_eq!(code, 0, "stderr: {stderr}");
    let (_, second, _) = run_capture(&args);
    assert_eq!(first, second);

    let record: serde_json::Value = serde_json::from_str(first.trim()).unwrap();
    assert_eq!(record["community_cards"].as_array().unwrap().len(), 5);
    assert_eq!(record["player_hands"].as_object().unwrap().len(), 4);
}

#[test]
fn invalid_table_exits_2() {
    let (code, _, stderr) = run_capture(&["holdem", "hand", "--sb", "50", "--bb", "20"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Invalid configuration"), "{stderr}");

    let (code, _, stderr) = run_capture(&["holdem", "hand", "--human", "7"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Invalid input"), "{stderr}");
}

#[test]
fn sim_reports_hand_count() {
    let (code, stdout, _) =
        run_capture(&["holdem", "sim", "--hands", "15", "--players", "3", "--seed", "5"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Simulated: 15 hands"));
    assert!(stdout.contains("Player 3: stack"));
}

#[test]
fn tournament_names_a_winner() {
    let (code, stdout, stderr) = run_capture(&[
        "holdem",
        "tournament",
        "--players",
        "3",
        "--stack",
        "300",
        "--seed",
        "11",
    ]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Tournament winner: Player "));
}

#[test]
fn equity_command_outputs_and_validates() {
    let (code, stdout, _) = run_capture(&[
        "holdem",
        "equity",
        "AhKh",
        "QdQc",
        "--iterations",
        "300",
        "--seed",
        "2",
        "--tasks",
        "3",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("AhKh vs QdQc: "));

    let (code, _, stderr) = run_capture(&["holdem", "equity", "AKx", "QQ"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Invalid hand notation"), "{stderr}");

    let (code, _, _) = run_capture(&["holdem", "equity", "AA", "KK", "--iterations", "0"]);
    assert_eq!(code, 2);
}
