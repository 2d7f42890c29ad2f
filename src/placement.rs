//! Fleet placement validation and random placement.

use rand::Rng;

use crate::common::PlacementError;
use crate::config::BOARD_SIZE;
use crate::geometry::{Coord, Orientation};
use crate::ids::PlayerId;
use crate::ship::{Ship, ShipType};

/// Check that `candidate` may join `existing_ships` (the same player's fleet).
///
/// Checks run in a fixed order: started game, bounds, duplicate type, overlap.
pub fn validate_placement(
    existing_ships: &[Ship],
    candidate: &Ship,
    game_started: bool,
) -> Result<(), PlacementError> {
    if game_started {
        return Err(PlacementError::GameAlreadyStarted);
    }
    if !candidate.is_on_board() {
        return Err(PlacementError::OutOfBounds);
    }
    let cells = candidate.footprint();
    if existing_ships
        .iter()
        .any(|s| s.player == candidate.player && s.ship_type == candidate.ship_type)
    {
        return Err(PlacementError::DuplicateType(candidate.ship_type));
    }
    if existing_ships
        .iter()
        .any(|s| !s.footprint().is_disjoint(&cells))
    {
        return Err(PlacementError::Overlap);
    }
    Ok(())
}

/// Draw anchors and orientations until one validates against `existing`.
///
/// Anchors are drawn over the whole board, so long ships near the far edges
/// are rejected and redrawn rather than clamped.
pub fn random_placement<R: Rng>(
    rng: &mut R,
    existing: &[Ship],
    player: PlayerId,
    ship_type: ShipType,
    max_attempts: u32,
) -> Result<(Coord, Orientation), PlacementError> {
    for _ in 0..max_attempts {
        let anchor = Coord::new(
            rng.random_range(0..BOARD_SIZE),
            rng.random_range(0..BOARD_SIZE),
        );
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let candidate = Ship::new(player, ship_type, anchor, orientation);
        if validate_placement(existing, &candidate, false).is_ok() {
            return Ok((anchor, orientation));
        }
    }
    Err(PlacementError::PlacementExhausted {
        ship_type,
        attempts: max_attempts,
    })
}

/// Ship types not yet present in `fleet`, in fleet order.
pub fn missing_types(fleet: &[Ship]) -> Vec<ShipType> {
    ShipType::ALL
        .into_iter()
        .filter(|t| !fleet.iter().any(|s| s.ship_type == *t))
        .collect()
}
