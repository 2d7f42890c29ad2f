use fleetcommand::{BitBoard, BitBoardError, Coord, Mask};

#[test]
fn test_try_new_sizes() {
    // Success for board that fits
    let ok = BitBoard::<u128, 10>::try_new();
    assert!(ok.is_ok());

    // Failure when board is too large
    let err = BitBoard::<u64, 10>::try_new();
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { .. })));
}

#[test]
fn test_set_contains_clear() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    bb.set(Coord::new(1, 2)).unwrap();
    assert!(bb.contains(Coord::new(1, 2)));
    assert!(!bb.contains(Coord::new(2, 1)));

    bb.clear(Coord::new(1, 2)).unwrap();
    assert!(bb.is_empty());

    assert_eq!(
        bb.set(Coord::new(4, 0)).unwrap_err(),
        BitBoardError::OutOfBounds(Coord::new(4, 0))
    );
    assert!(!bb.contains(Coord::new(9, 9)));
}

#[test]
fn test_cells_row_major() {
    let bb = BitBoard::<u16, 4>::from_cells([Coord::new(3, 0), Coord::new(0, 1), Coord::new(2, 3)])
        .unwrap();
    let cells: Vec<_> = bb.cells().collect();
    assert_eq!(cells, vec![Coord::new(3, 0), Coord::new(0, 1), Coord::new(2, 3)]);
}

#[test]
fn test_lossy_collect_drops_off_board() {
    let mask: Mask = [Coord::new(9, 9), Coord::new(10, 0), Coord::new(0, 12)]
        .into_iter()
        .collect();
    assert_eq!(mask.count(), 1);
    assert!(Mask::from_cells([Coord::new(10, 0)]).is_err());
}

#[test]
fn test_subset_and_complement() {
    let ship = Mask::from_cells([Coord::new(0, 0), Coord::new(1, 0)]).unwrap();
    let mut shots = Mask::from_cells([Coord::new(0, 0), Coord::new(5, 5)]).unwrap();
    assert!(!ship.is_subset_of(&shots));
    assert!(ship.intersects(&shots));
    shots.set(Coord::new(1, 0)).unwrap();
    assert!(ship.is_subset_of(&shots));

    let open = !shots;
    assert_eq!(open.count(), 100 - 3);
    assert!(!open.contains(Coord::new(5, 5)));
    assert!((open & shots).is_empty());
    assert_eq!((open | shots).count(), 100);
}
