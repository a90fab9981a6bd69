//! Moves between the cells of a square grid.

use ndarray::Array2;
use strum::VariantArray;

use crate::coords::Coords;

/// A single move between two edge-adjacent cells of a square grid.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards higher `y`.
    Up,
    /// Towards lower `y`.
    Down,
    /// Towards lower `x`.
    Left,
    /// Towards higher `x`.
    Right,
}

impl SquareStep {
    /// The directions which, stepping from one cell to another, lead to a cell ordered higher than the origin.
    /// [`Grid`](crate::Grid) adjacency edges are stored with these directions, from the lower cell.
    pub(crate) const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Up];

    /// Attempt the step from `coords` in the direction specified by `self`.
    ///
    /// The result may lie outside the grid (including wrapping below zero); callers check bounds.
    pub fn attempt_from(&self, coords: Coords) -> Coords {
        match self {
            Self::Up => coords.offset_by((0, 1)),
            Self::Down => coords.offset_by((0, -1)),
            Self::Left => coords.offset_by((-1, 0)),
            Self::Right => coords.offset_by((1, 0)),
        }
    }

    /// The opposite direction.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Determine the direction from `a` to `b`, or [`None`] if they are not adjacent.
    pub fn direction_to(a: Coords, b: Coords) -> Option<Self> {
        // steps wrap below zero, so rule out far apart cells first
        if !a.is_adjacent_to(b) {
            return None;
        }

        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }

    /// Dump the specified array one row per line.
    pub(crate) fn print(board: Array2<char>) -> String {
        let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

        for row in board.rows() {
            for col in row {
                out.push(*col);
            }
            out.push('\n');
        }

        out
    }
}
