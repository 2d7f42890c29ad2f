use chrono::Utc;
use fleetcommand::{
    footprint, is_defeated, missing_types, random_placement, resolve, shot_mask, validate_placement,
    BoardView, Cell, Coord, Game, GameOptions, Orientation, PlayerId, Ship, ShipType, BOARD_SIZE,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_fleet(seed: u64) -> (Vec<Ship>, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let player = PlayerId::new();
    let mut fleet: Vec<Ship> = Vec::new();
    for t in missing_types(&fleet) {
        let (anchor, o) = random_placement(&mut rng, &fleet, player, t, 1_000).unwrap();
        fleet.push(Ship::new(player, t, anchor, o));
    }
    (fleet, rng)
}

fn active_game() -> Game {
    let mut game = Game::new(GameOptions::default(), Utc::now());
    game.seat_complete().unwrap();
    game.start(PlayerId::new(), Utc::now()).unwrap();
    game
}

fn ship_type() -> impl Strategy<Value = ShipType> {
    prop::sample::select(ShipType::ALL.to_vec())
}

fn orientation() -> impl Strategy<Value = Orientation> {
    prop::sample::select(Orientation::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn footprint_matches_length(
        x in 0..BOARD_SIZE,
        y in 0..BOARD_SIZE,
        t in ship_type(),
        o in orientation(),
    ) {
        let cells = footprint(Coord::new(x, y), o, t.length());
        prop_assert_eq!(cells.len(), t.length());
        let ship = Ship::new(PlayerId::new(), t, Coord::new(x, y), o);
        if validate_placement(&[], &ship, false).is_ok() {
            prop_assert!(cells.iter().all(|c| c.x < BOARD_SIZE && c.y < BOARD_SIZE));
            prop_assert_eq!(ship.mask().count(), t.length());
        }
    }

    #[test]
    fn random_fleets_are_valid(seed in any::<u64>()) {
        let (fleet, _) = random_fleet(seed);
        prop_assert_eq!(fleet.len(), ShipType::ALL.len());
        for (i, ship) in fleet.iter().enumerate() {
            prop_assert!(ship.is_on_board());
            for other in &fleet[i + 1..] {
                prop_assert!(!ship.overlaps(other));
            }
        }
    }

    #[test]
    fn sinks_exactly_when_covered(seed in any::<u64>()) {
        let (fleet, mut rng) = random_fleet(seed);
        let game = active_game();
        let target_ship = &fleet[rng.random_range(0..fleet.len())];
        let mut cells: Vec<Coord> = target_ship.footprint().into_iter().collect();
        cells.sort_by_key(|c| (c.y, c.x));

        let mut prior = Vec::new();
        for (i, cell) in cells.iter().enumerate() {
            let strike = resolve(&game, &fleet, &prior, *cell).unwrap();
            prop_assert!(strike.hit);
            if i + 1 == cells.len() {
                prop_assert_eq!(strike.sunk_ship, Some(target_ship.id));
            } else {
                prop_assert_eq!(strike.sunk_ship, None);
            }
            prior.push(*cell);
        }
        prop_assert!(!is_defeated(&fleet, &shot_mask(&prior)));
    }

    #[test]
    fn full_coverage_defeats(seed in any::<u64>(), extra in prop::collection::vec((0..BOARD_SIZE, 0..BOARD_SIZE), 0..20)) {
        let (fleet, _) = random_fleet(seed);
        let mut shots: Vec<Coord> = fleet.iter().flat_map(|s| s.footprint()).collect();
        shots.extend(extra.into_iter().map(|(x, y)| Coord::new(x, y)));
        prop_assert!(is_defeated(&fleet, &shot_mask(&shots)));

        // dropping any one fleet cell is enough to survive
        let survivor: Vec<Coord> = shots[1..].iter().copied().filter(|c| *c != shots[0]).collect();
        prop_assert!(!is_defeated(&fleet, &shot_mask(&survivor)));
    }

    #[test]
    fn board_view_counts_shots(seed in any::<u64>()) {
        let (fleet, _) = random_fleet(seed);
        let view = BoardView::project(&fleet, &[]);
        let ship_cells = BOARD_SIZE as usize * BOARD_SIZE as usize - view.count(Cell::Empty);
        prop_assert_eq!(ship_cells, 17);
        prop_assert_eq!(view.count(Cell::Hit) + view.count(Cell::Miss), 0);
    }
}
