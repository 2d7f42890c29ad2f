//! Combat resolution: hit, sink and fleet-defeat detection.

use serde::{Deserialize, Serialize};

use crate::common::InvalidTransition;
use crate::config::Mask;
use crate::game::Game;
use crate::geometry::Coord;
use crate::ids::ShipId;
use crate::ship::{fleet_mask, Ship};

/// Result of one shot against the opponent's fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    pub hit: bool,
    /// Set only when the shot sank a ship and the game announces sinkings.
    pub sunk_ship: Option<ShipId>,
}

impl Strike {
    pub const MISS: Strike = Strike {
        hit: false,
        sunk_ship: None,
    };
}

/// Resolve a shot at `target`.
///
/// `prior_shots` are the submitter's earlier targets, excluding `target`.
/// Must only run after the turn order has been validated.
pub fn resolve(
    game: &Game,
    opponent_fleet: &[Ship],
    prior_shots: &[Coord],
    target: Coord,
) -> Result<Strike, InvalidTransition> {
    game.ensure_active("resolve a turn")?;

    let Some(ship) = opponent_fleet.iter().find(|s| s.occupies(target)) else {
        return Ok(Strike::MISS);
    };
    let shots: Mask = prior_shots.iter().copied().chain([target]).collect();
    let sinks = ship.mask().is_subset_of(&shots);
    Ok(Strike {
        hit: true,
        sunk_ship: (sinks && game.announce_sinking).then_some(ship.id),
    })
}

/// True when every cell of a non-empty `fleet` is covered by `opponent_shots`.
pub fn is_defeated(fleet: &[Ship], opponent_shots: &Mask) -> bool {
    !fleet.is_empty() && fleet_mask(fleet).is_subset_of(opponent_shots)
}

/// Ships of `fleet` whose whole footprint is covered by `opponent_shots`.
pub fn sunk_ships<'a>(fleet: &'a [Ship], opponent_shots: &Mask) -> Vec<&'a Ship> {
    fleet
        .iter()
        .filter(|s| s.mask().is_subset_of(opponent_shots))
        .collect()
}

/// Mask of the given targets; off-board targets are skipped.
pub fn shot_mask<'a, I>(targets: I) -> Mask
where
    I: IntoIterator<Item = &'a Coord>,
{
    targets.into_iter().copied().collect()
}
