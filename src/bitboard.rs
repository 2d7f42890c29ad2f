//! A fixed-size cell mask implementation using const generics.
//!
//! Boards are represented as an `N×N` grid packed into an unsigned integer
//! `T`, indexed by [`Coord`] with `y` as the row and `x` as the column. The
//! engine uses masks to answer coverage questions (is this ship sunk, is this
//! fleet defeated) without building intermediate sets.

use core::ops::{BitAnd, BitOr, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::geometry::Coord;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitBoardError {
    /// Requested board size N*N exceeds capacity of `T::BITS`.
    #[error("{n}x{n} board exceeds the {capacity} bits of the backing integer")]
    SizeTooLarge { n: usize, capacity: usize },
    /// Cell lies outside `[0..N)` on either axis.
    #[error("cell {0} is outside the board")]
    OutOfBounds(Coord),
}

/// A fixed-size N×N bitboard stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const BOARD_BITS: usize = N * N;

    #[inline]
    fn mask() -> T {
        if Self::BOARD_BITS == mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::BOARD_BITS) - T::one()
        }
    }

    /// Create a new empty bitboard without size check.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Fallible constructor: returns `Err(SizeTooLarge)` if N*N > T::BITS.
    pub fn try_new() -> Result<Self, BitBoardError> {
        let capacity = mem::size_of::<T>() * 8;
        if Self::BOARD_BITS > capacity {
            Err(BitBoardError::SizeTooLarge { n: N, capacity })
        } else {
            Ok(Self::new())
        }
    }

    /// Builds a mask from cells, failing on the first off-board cell.
    pub fn from_cells<I>(cells: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut board = Self::new();
        for cell in cells {
            board.set(cell)?;
        }
        Ok(board)
    }

    /// Builds a mask from cells, silently dropping off-board ones.
    pub fn from_cells_lossy<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut board = Self::new();
        for cell in cells {
            let _ = board.set(cell);
        }
        board
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Whether `cell` is set. Off-board cells are never set.
    pub fn contains(&self, cell: Coord) -> bool {
        match Self::index(cell) {
            Ok(idx) => ((self.bits >> idx) & T::one()) != T::zero(),
            Err(_) => false,
        }
    }

    pub fn set(&mut self, cell: Coord) -> Result<(), BitBoardError> {
        let idx = Self::index(cell)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    pub fn clear(&mut self, cell: Coord) -> Result<(), BitBoardError> {
        let idx = Self::index(cell)?;
        self.bits = self.bits & !(T::one() << idx);
        Ok(())
    }

    /// True when every cell of `self` is also set in `other`.
    #[inline]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        (self.bits & !other.bits).is_zero()
    }

    /// True when `self` and `other` share at least one cell.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.bits & other.bits).is_zero()
    }

    #[inline]
    fn index(cell: Coord) -> Result<usize, BitBoardError> {
        let (x, y) = (cell.x as usize, cell.y as usize);
        if x >= N || y >= N {
            Err(BitBoardError::OutOfBounds(cell))
        } else {
            Ok(y * N + x)
        }
    }

    /// Iterator over the set cells in row-major order.
    #[inline]
    pub fn cells(&self) -> Cells<'_, T, N> {
        Cells {
            board: self,
            idx: 0,
        }
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>:", N)?;
        for y in 0..N {
            for x in 0..N {
                let set = self.contains(Coord::new(x as u8, y as u8));
                write!(f, "{} ", if set { '■' } else { '□' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set cells of a bitboard.
#[derive(Clone, Copy)]
pub struct Cells<'a, T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T, N>,
    idx: usize,
}

impl<'a, T, const N: usize> Iterator for Cells<'a, T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coord;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if ((self.board.bits >> idx) & T::one()) != T::zero() {
                return Some(Coord::new((idx % N) as u8, (idx / N) as u8));
            }
        }
        None
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

/// Complement within board bounds.
impl<T, const N: usize> Not for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        BitBoard {
            bits: !self.bits & Self::mask(),
        }
    }
}

impl<T, const N: usize> FromIterator<Coord> for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Collects on-board cells; off-board cells are dropped.
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self::from_cells_lossy(iter)
    }
}
