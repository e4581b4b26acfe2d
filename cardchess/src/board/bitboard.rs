use std::fmt::{self, Debug};

use crate::bitset::bitset_traits;
use crate::Coordinate;

/// A set of cells packed into one `u64`, one bit per cell.
///
/// The board keeps one of these for occupancy, so that finding empty cells
/// does not need to walk the grid. Iterating yields the cells in row-major order.
///
/// [`Self::insert()`] and [`Self::remove()`] return the changed set and leave `self` alone.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard {
    /// Bit `z * 8 + x` is set when cell `(x, z)` is in the set.
    pub(crate) bits: u64,
}

bitset_traits!(BitBoard);

impl BitBoard {
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn full() -> Self {
        Self { bits: u64::MAX }
    }

    #[must_use]
    pub fn insert(self, coord: Coordinate) -> Self {
        Self {
            bits: self.bits | (1u64 << coord.index()),
        }
    }

    #[must_use]
    pub fn remove(self, coord: Coordinate) -> Self {
        Self {
            bits: self.bits & !(1u64 << coord.index()),
        }
    }

    pub fn contains(self, coord: Coordinate) -> bool {
        self.bits & (1u64 << coord.index()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn num_entries(self) -> u32 {
        self.bits.count_ones()
    }
}

impl FromIterator<Coordinate> for BitBoard {
    fn from_iter<T: IntoIterator<Item = Coordinate>>(iter: T) -> Self {
        let mut bits = 0;
        for coord in iter {
            bits |= 1u64 << coord.index();
        }
        Self { bits }
    }
}

impl Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Highest rank first, so it reads like the board from the first side's view
        let mut s = String::with_capacity(64 * 2);
        for z in (0..8).rev() {
            for x in 0..8 {
                let bit = (self.bits >> (z * 8 + x)) & 1;
                s.push(if bit == 1 { '1' } else { '.' });
                s.push(if x == 7 { '\n' } else { ' ' });
            }
        }
        write!(f, "{}", s)
    }
}

/// Iterator produced by [`BitBoard::into_iter()`].
pub struct BitBoardIter {
    bitboard: BitBoard,
}

impl IntoIterator for BitBoard {
    type Item = Coordinate;

    type IntoIter = BitBoardIter;

    fn into_iter(self) -> Self::IntoIter {
        BitBoardIter { bitboard: self }
    }
}

impl Iterator for BitBoardIter {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bitboard.is_empty() {
            None
        } else {
            let idx = self.bitboard.bits.trailing_zeros() as usize;
            // Lowest set bit first
            self.bitboard.bits ^= 1u64 << idx;
            Some(Coordinate::from_index(idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bitboard.num_entries() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitBoardIter {}
