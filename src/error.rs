use crate::colour::DotColour;
use crate::coords::Coords;

/// Reasons a grid may be rejected while building or parsing.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Grids must be at least 2 by 2.
    #[error("grid size must be at least 2, found {0}")]
    TooSmall(usize),
    /// A dot was placed outside the bounds of the grid.
    #[error("dot at {0} lies outside the grid")]
    DotOutOfBounds(Coords),
    /// A dot was placed on a cell already holding a dot.
    #[error("cell {0} already holds a dot")]
    DotOccupied(Coords),
    /// Both dots of a pair were placed on the same cell.
    #[error("{0} pair starts and ends on the same cell")]
    CoincidentDots(DotColour),
    /// The same colour was used for two pairs.
    #[error("colour {0} is used by more than one pair")]
    DuplicateColour(DotColour),
    /// A colour appeared in a text layout other than exactly twice.
    #[error("colour {colour} has {count} dots, expected 2")]
    UnpairedColour {
        /// The colour in question.
        colour: DotColour,
        /// How many of its dots were found.
        count: usize,
    },
    /// A text layout contained a character naming no colour.
    #[error("unknown dot character {0:?}")]
    UnknownDot(char),
    /// A text layout row did not have one character per column.
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        /// Zero based index of the row, top first.
        row: usize,
        /// Cells found in the row.
        len: usize,
        /// Cells expected, the number of rows.
        expected: usize,
    },
    /// There is nothing to solve.
    #[error("grid has no colour pairs")]
    NoColourPairs,
}

/// Precondition violations of [`Path::extend`](crate::Path::extend).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PathError {
    /// The new cell does not share an edge with the last one.
    #[error("{to} is not adjacent to {from}")]
    NotAdjacent {
        /// Last cell of the path.
        from: Coords,
        /// Cell the path was to be extended by.
        to: Coords,
    },
    /// The path would cross itself.
    #[error("{0} is already on the path")]
    AlreadyVisited(Coords),
    /// Nothing may follow the end dot.
    #[error("path has already reached its end")]
    AlreadyComplete,
}

/// Failure of path enumeration or matrix assembly.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The shared [`CancellationToken`](crate::CancellationToken) was triggered.
    #[error("search was cancelled")]
    Cancelled,
}

/// Failure reported by an [`ExactCoverSolver`](crate::ExactCoverSolver) backend.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ExactCoverError {
    /// The underlying solver failed; holds its description of the failure.
    #[error("exact cover backend failed: {0}")]
    Backend(String),
}

/// Reasons [`FlowSolver::solve`](crate::FlowSolver::solve) may fail.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SolveError {
    /// Building the matrix failed.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// Solving the matrix failed.
    #[error(transparent)]
    ExactCover(#[from] ExactCoverError),
    /// Every path was explored and no selection of them covers the grid.
    #[error("no solution exists")]
    Unsolvable,
    /// The configured maximum number of direction changes was reached without finding a solution.
    #[error("no solution found with at most {0} direction changes per path")]
    BudgetExhausted(usize),
}
