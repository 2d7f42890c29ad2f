use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_fleetcommand"))
        .args(["simulate", "--games", "3", "--seed", "12345", "--json"])
        .output()
        .expect("failed to run simulator");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    let games = v.as_array().expect("expected a list of games");
    assert_eq!(games.len(), 3);
    for game in games {
        assert!(game["winner"].is_string());
        assert!(game["ended_at"].is_string());
    }
}

#[test]
fn sim_binary_boards() {
    let output = Command::new(env!("CARGO_BIN_EXE_fleetcommand"))
        .args(["simulate", "--seed", "7", "--allow-draw", "--show-boards"])
        .output()
        .expect("failed to run simulator");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    assert!(stdout.contains("Game: "));
    assert!(stdout.contains("Created at: "));
    assert_eq!(stdout.matches("Joined at: ").count(), 2);
    assert_eq!(
        stdout
            .matches("Ships: Carrier, Battleship, Destroyer, Submarine, Patrol Boat")
            .count(),
        2
    );
    assert_eq!(stdout.matches("╔══════════╗").count(), 2);
}
