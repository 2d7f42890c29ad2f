//! Ship catalogue and placed-ship records.

use core::fmt;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::{Mask, BOARD_SIZE};
use crate::geometry::{fits, footprint, Coord, Orientation};
use crate::ids::{PlayerId, ShipId};

/// The five fixed ship kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipType {
    Carrier,
    Battleship,
    Destroyer,
    Submarine,
    PatrolBoat,
}

impl ShipType {
    /// Every kind in fleet order.
    pub const ALL: [ShipType; 5] = [
        ShipType::Carrier,
        ShipType::Battleship,
        ShipType::Destroyer,
        ShipType::Submarine,
        ShipType::PatrolBoat,
    ];

    /// Number of cells the ship occupies.
    pub const fn length(self) -> usize {
        match self {
            ShipType::Carrier => 5,
            ShipType::Battleship => 4,
            ShipType::Destroyer => 3,
            ShipType::Submarine => 3,
            ShipType::PatrolBoat => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipType::Carrier => "Carrier",
            ShipType::Battleship => "Battleship",
            ShipType::Destroyer => "Destroyer",
            ShipType::Submarine => "Submarine",
            ShipType::PatrolBoat => "Patrol Boat",
        }
    }

    /// One-letter marker used on board views.
    pub const fn marker(self) -> char {
        match self {
            ShipType::Carrier => 'C',
            ShipType::Battleship => 'B',
            ShipType::Destroyer => 'D',
            ShipType::Submarine => 'S',
            ShipType::PatrolBoat => 'P',
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ship owned by a player. Never mutated after it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub player: PlayerId,
    pub ship_type: ShipType,
    pub anchor: Coord,
    pub orientation: Orientation,
}

impl Ship {
    pub fn new(player: PlayerId, ship_type: ShipType, anchor: Coord, orientation: Orientation) -> Self {
        Self {
            id: ShipId::new(),
            player,
            ship_type,
            anchor,
            orientation,
        }
    }

    /// Cells covered by the ship, possibly including off-board ones.
    pub fn footprint(&self) -> HashSet<Coord> {
        footprint(self.anchor, self.orientation, self.ship_type.length())
    }

    /// True when the whole footprint lies on the board.
    pub fn is_on_board(&self) -> bool {
        fits(self.anchor, self.orientation, self.ship_type.length(), BOARD_SIZE)
    }

    pub fn occupies(&self, cell: Coord) -> bool {
        self.footprint().contains(&cell)
    }

    /// Footprint as a board mask; off-board cells are dropped.
    pub fn mask(&self) -> Mask {
        self.footprint().into_iter().collect()
    }

    pub fn overlaps(&self, other: &Ship) -> bool {
        !self.footprint().is_disjoint(&other.footprint())
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} {:?}",
            self.ship_type, self.anchor, self.orientation
        )
    }
}

/// Combined mask of a fleet.
pub fn fleet_mask<'a, I>(fleet: I) -> Mask
where
    I: IntoIterator<Item = &'a Ship>,
{
    fleet
        .into_iter()
        .fold(Mask::new(), |acc, ship| acc | ship.mask())
}
