//! Shot selection for automated players.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::config::{Mask, BOARD_SIZE};
use crate::geometry::Coord;

/// Interface implemented by automated shooters.
pub trait Targeting: Send {
    /// Choose the next cell given our own `fired` cells and which of them hit.
    /// Returns `None` once every cell has been fired at.
    fn select_target(&mut self, rng: &mut SmallRng, fired: &Mask, hits: &Mask) -> Option<Coord>;
}

fn pick<R: Rng>(rng: &mut R, cells: &[Coord]) -> Option<Coord> {
    if cells.is_empty() {
        None
    } else {
        Some(cells[rng.random_range(0..cells.len())])
    }
}

/// Uniformly random unfired cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTargeting;

impl Targeting for RandomTargeting {
    fn select_target(&mut self, rng: &mut SmallRng, fired: &Mask, _hits: &Mask) -> Option<Coord> {
        let open: Vec<Coord> = (!*fired).cells().collect();
        pick(rng, &open)
    }
}

/// Hunt on a checkerboard, then target the neighbours of known hits.
#[derive(Debug, Default, Clone, Copy)]
pub struct HuntTargeting;

impl HuntTargeting {
    fn neighbours(c: Coord) -> impl Iterator<Item = Coord> {
        let (x, y) = (c.x as i16, c.y as i16);
        [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
            .into_iter()
            .filter(|&(x, y)| (0..BOARD_SIZE as i16).contains(&x) && (0..BOARD_SIZE as i16).contains(&y))
            .map(|(x, y)| Coord::new(x as u8, y as u8))
    }
}

impl Targeting for HuntTargeting {
    fn select_target(&mut self, rng: &mut SmallRng, fired: &Mask, hits: &Mask) -> Option<Coord> {
        let open = !*fired;
        let targets: Vec<Coord> = hits
            .cells()
            .flat_map(Self::neighbours)
            .filter(|c| open.contains(*c))
            .collect();
        if let Some(c) = pick(rng, &targets) {
            return Some(c);
        }
        // Every ship is at least two long, so one colour of the checkerboard
        // is enough to find them all.
        let parity: Vec<Coord> = open.cells().filter(|c| (c.x + c.y) % 2 == 0).collect();
        pick(rng, &parity).or_else(|| pick(rng, &open.cells().collect::<Vec<_>>()))
    }
}
