//! Board geometry: coordinates, orientation and ship footprints.

use core::fmt;
use core::str::FromStr;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::BOARD_SIZE;

/// A board cell. `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Cell `steps` cells away along `orientation`, or `None` past `u8::MAX`.
    pub fn step(self, orientation: Orientation, steps: usize) -> Option<Self> {
        let steps = u8::try_from(steps).ok()?;
        Some(match orientation {
            Orientation::Horizontal => Coord::new(self.x.checked_add(steps)?, self.y),
            Orientation::Vertical => Coord::new(self.x, self.y.checked_add(steps)?),
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Error returned when a coordinate string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate '{0}', expected \"x,y\"")]
pub struct ParseCoordError(String);

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Parses `"x,y"`, whitespace around either number is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Coord::new(x, y))
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];
}

/// Cells covered by a ship of `length` anchored at `anchor`.
///
/// Cells are produced even when they fall outside the board, so callers can
/// reject the placement with [`in_bounds`]. Cells past `u8::MAX` have no
/// `Coord` and are left out; such a footprint holds fewer than `length` cells
/// and never fits a board.
pub fn footprint(anchor: Coord, orientation: Orientation, length: usize) -> HashSet<Coord> {
    (0..length)
        .map_while(|i| anchor.step(orientation, i))
        .collect()
}

/// True when a ship of `length` at `anchor` lies wholly inside a board of
/// side `board_side`.
pub fn fits(anchor: Coord, orientation: Orientation, length: usize, board_side: u8) -> bool {
    let cells = footprint(anchor, orientation, length);
    cells.len() == length && cells.iter().all(|&c| in_bounds(c, board_side))
}

/// True iff both axes of `coord` lie in `[0, board_side - 1]`.
pub fn in_bounds(coord: Coord, board_side: u8) -> bool {
    coord.x < board_side && coord.y < board_side
}

/// [`in_bounds`] for the standard board.
pub fn on_board(coord: Coord) -> bool {
    in_bounds(coord, BOARD_SIZE)
}
