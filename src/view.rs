//! Read-only board projection for diagnostics and visualisation.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::BOARD_SIZE;
use crate::game::Turn;
use crate::geometry::{on_board, Coord};
use crate::ship::{Ship, ShipType};

const SIDE: usize = BOARD_SIZE as usize;

/// Content of one cell as seen by the board owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Ship(ShipType),
    Hit,
    Miss,
}

impl Cell {
    pub fn marker(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Ship(t) => t.marker(),
            Cell::Hit => 'X',
            Cell::Miss => 'o',
        }
    }
}

/// A player's own ships overlaid with the opponent's shots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    rows: [[Cell; SIDE]; SIDE],
}

impl BoardView {
    /// Shots are drawn over ship markers, so a hit cell shows `X`.
    pub fn project(fleet: &[Ship], opponent_turns: &[Turn]) -> Self {
        let mut rows = [[Cell::Empty; SIDE]; SIDE];
        for ship in fleet {
            for c in ship.footprint().into_iter().filter(|c| on_board(*c)) {
                rows[c.y as usize][c.x as usize] = Cell::Ship(ship.ship_type);
            }
        }
        for turn in opponent_turns.iter().filter(|t| on_board(t.target)) {
            let (x, y) = (turn.target.x as usize, turn.target.y as usize);
            rows[y][x] = if turn.hit { Cell::Hit } else { Cell::Miss };
        }
        Self { rows }
    }

    /// Cell at `coord`, or `None` when it is off the board.
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        self.rows
            .get(coord.y as usize)
            .and_then(|row| row.get(coord.x as usize))
            .copied()
    }

    pub fn rows(&self) -> &[[Cell; SIDE]; SIDE] {
        &self.rows
    }

    pub fn count(&self, wanted: Cell) -> usize {
        self.rows.iter().flatten().filter(|c| **c == wanted).count()
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔{}╗", "═".repeat(SIDE))?;
        for row in &self.rows {
            write!(f, "║")?;
            for cell in row {
                write!(f, "{}", cell.marker())?;
            }
            writeln!(f, "║")?;
        }
        write!(f, "╚{}╝", "═".repeat(SIDE))
    }
}
