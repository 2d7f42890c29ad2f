#![allow(dead_code)]

use fleetcommand::{
    Coord, Engine, EngineConfig, GameId, GameOptions, GameRepository, InMemoryRepository,
    Orientation, Player, ShipType, StartingPlayerPolicy, UserId,
};

/// Anchors of the fixed test fleet: every ship horizontal, one per row.
pub const LAYOUT: [(ShipType, Coord); 5] = [
    (ShipType::Carrier, Coord::new(0, 0)),
    (ShipType::Battleship, Coord::new(0, 1)),
    (ShipType::Destroyer, Coord::new(0, 2)),
    (ShipType::Submarine, Coord::new(0, 3)),
    (ShipType::PatrolBoat, Coord::new(0, 4)),
];

/// The 17 cells of the fixed fleet, carrier first.
pub fn fleet_cells() -> Vec<Coord> {
    LAYOUT
        .iter()
        .flat_map(|(t, a)| (0..t.length() as u8).map(move |i| Coord::new(a.x + i, a.y)))
        .collect()
}

/// Cells in rows 5..=9, which the fixed fleet never touches.
pub fn water() -> Vec<Coord> {
    (5..10u8)
        .flat_map(|y| (0..10u8).map(move |x| Coord::new(x, y)))
        .collect()
}

pub fn engine() -> Engine<InMemoryRepository> {
    let config = EngineConfig::default()
        .with_seed(7)
        .with_starting_player(StartingPlayerPolicy::FirstJoined);
    Engine::new(InMemoryRepository::new(), config)
}

pub async fn seated_game<R: GameRepository>(
    engine: &Engine<R>,
    options: GameOptions,
) -> (GameId, Player, Player) {
    let game = engine.create_game(options).await.unwrap();
    let p1 = engine.join_game(game.id, UserId::new()).await.unwrap();
    let p2 = engine.join_game(game.id, UserId::new()).await.unwrap();
    (game.id, p1, p2)
}

pub async fn place_layout<R: GameRepository>(engine: &Engine<R>, player: &Player) {
    for (ship_type, anchor) in LAYOUT {
        engine
            .place_ship(player.id, ship_type, anchor, Orientation::Horizontal)
            .await
            .unwrap();
    }
}

/// A game with both fixed fleets placed; `p1` opens.
pub async fn active_game(
    options: GameOptions,
) -> (Engine<InMemoryRepository>, GameId, Player, Player) {
    let engine = engine();
    let (game, p1, p2) = seated_game(&engine, options).await;
    place_layout(&engine, &p1).await;
    place_layout(&engine, &p2).await;
    (engine, game, p1, p2)
}
