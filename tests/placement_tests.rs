use fleetcommand::{
    missing_types, random_placement, validate_placement, Coord, Orientation, PlacementError,
    PlayerId, Ship, ShipType,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn ship(player: PlayerId, t: ShipType, x: u8, y: u8, o: Orientation) -> Ship {
    Ship::new(player, t, Coord::new(x, y), o)
}

#[test]
fn test_valid_placement() {
    let p = PlayerId::new();
    let fleet = vec![ship(p, ShipType::Carrier, 0, 0, Orientation::Horizontal)];
    let candidate = ship(p, ShipType::Battleship, 0, 1, Orientation::Horizontal);
    assert_eq!(validate_placement(&fleet, &candidate, false), Ok(()));
}

#[test]
fn test_out_of_bounds() {
    let p = PlayerId::new();
    let candidate = ship(p, ShipType::Carrier, 6, 0, Orientation::Horizontal);
    assert_eq!(
        validate_placement(&[], &candidate, false),
        Err(PlacementError::OutOfBounds)
    );
    let candidate = ship(p, ShipType::PatrolBoat, 0, 9, Orientation::Vertical);
    assert_eq!(
        validate_placement(&[], &candidate, false),
        Err(PlacementError::OutOfBounds)
    );
    // touching the far edge is fine
    let candidate = ship(p, ShipType::Carrier, 5, 9, Orientation::Horizontal);
    assert_eq!(validate_placement(&[], &candidate, false), Ok(()));
}

#[test]
fn test_second_battleship_is_duplicate() {
    let p = PlayerId::new();
    let fleet = vec![ship(p, ShipType::Battleship, 0, 0, Orientation::Horizontal)];
    let candidate = ship(p, ShipType::Battleship, 0, 5, Orientation::Horizontal);
    assert_eq!(
        validate_placement(&fleet, &candidate, false),
        Err(PlacementError::DuplicateType(ShipType::Battleship))
    );
}

#[test]
fn test_overlap() {
    let p = PlayerId::new();
    let fleet = vec![ship(p, ShipType::Carrier, 0, 3, Orientation::Horizontal)];
    let candidate = ship(p, ShipType::Destroyer, 2, 1, Orientation::Vertical);
    assert_eq!(
        validate_placement(&fleet, &candidate, false),
        Err(PlacementError::Overlap)
    );
}

#[test]
fn test_started_game_rejects_before_anything_else() {
    let p = PlayerId::new();
    let fleet = vec![ship(p, ShipType::Carrier, 0, 0, Orientation::Horizontal)];
    // would be a duplicate, an overlap and out of bounds
    let candidate = ship(p, ShipType::Carrier, 8, 0, Orientation::Horizontal);
    assert_eq!(
        validate_placement(&fleet, &candidate, true),
        Err(PlacementError::GameAlreadyStarted)
    );
}

#[test]
fn test_random_placement_fills_fleet() {
    let p = PlayerId::new();
    let mut rng = SmallRng::seed_from_u64(42);
    let mut fleet: Vec<Ship> = Vec::new();
    for t in missing_types(&fleet) {
        let (anchor, o) = random_placement(&mut rng, &fleet, p, t, 1_000).unwrap();
        let candidate = Ship::new(p, t, anchor, o);
        assert_eq!(validate_placement(&fleet, &candidate, false), Ok(()));
        fleet.push(candidate);
    }
    assert!(missing_types(&fleet).is_empty());
    let cells: usize = fleet.iter().map(|s| s.mask().count()).sum();
    assert_eq!(cells, 17);
}

#[test]
fn test_random_placement_exhausts() {
    let p = PlayerId::new();
    let mut rng = SmallRng::seed_from_u64(1);
    // two carriers per row cover every cell, so nothing fits
    let blockers: Vec<Ship> = (0..10u8)
        .map(|y| ship(p, ShipType::Carrier, 0, y, Orientation::Horizontal))
        .chain((0..10u8).map(|y| ship(p, ShipType::Carrier, 5, y, Orientation::Horizontal)))
        .collect();
    assert_eq!(
        random_placement(&mut rng, &blockers, p, ShipType::PatrolBoat, 50),
        Err(PlacementError::PlacementExhausted {
            ship_type: ShipType::PatrolBoat,
            attempts: 50
        })
    );
    assert_eq!(
        random_placement(&mut rng, &[], p, ShipType::PatrolBoat, 0),
        Err(PlacementError::PlacementExhausted {
            ship_type: ShipType::PatrolBoat,
            attempts: 0
        })
    );
}

#[test]
fn test_missing_types_in_fleet_order() {
    let p = PlayerId::new();
    let fleet = vec![
        ship(p, ShipType::Battleship, 0, 0, Orientation::Horizontal),
        ship(p, ShipType::Submarine, 0, 1, Orientation::Horizontal),
    ];
    assert_eq!(
        missing_types(&fleet),
        vec![ShipType::Carrier, ShipType::Destroyer, ShipType::PatrolBoat]
    );
}
