use std::fmt::{Display, Formatter};

use ndarray::Ix;

pub(crate) type Coord = usize;

/// A cell `(x, y)` on a grid. The bottom left corner is `Coords(0, 0)`, matching the text layouts
/// accepted by [`Grid::from_rows`](crate::Grid::from_rows) where the first row is the highest `y`.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Coords(pub Coord, pub Coord);

impl Coords {
    /// Column, counted from the left.
    #[inline]
    pub fn x(&self) -> Coord {
        self.0
    }

    /// Row, counted from the bottom.
    #[inline]
    pub fn y(&self) -> Coord {
        self.1
    }

    /// Position in an `size`-by-`size` array laid out as printed, i.e. `(row, column)` with row 0 on top.
    pub(crate) fn as_index(&self, size: Coord) -> (Ix, Ix) {
        (size - 1 - self.1, self.0)
    }

    pub(crate) fn from_index(index: (Ix, Ix), size: Coord) -> Self {
        Self(index.1, size - 1 - index.0)
    }

    /// Offset of this cell within the block of grid columns of an exact cover row.
    #[inline]
    pub(crate) fn cell_offset(&self, size: Coord) -> usize {
        size * self.0 + self.1
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    #[inline]
    pub(crate) fn within(&self, size: Coord) -> bool {
        self.0 < size && self.1 < size
    }

    /// Whether `other` shares an edge with `self`.
    pub fn is_adjacent_to(&self, other: Coords) -> bool {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1) == 1
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
