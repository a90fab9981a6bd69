#![warn(missing_docs)]

//! # `flowpaths`
//!
//! Path enumeration and exact cover matrix construction for [Flow Free](https://en.wikipedia.org/wiki/Flow_Free) puzzles.
//! Begin by building a grid with a [`GridBuilder`] or by parsing a text layout with [`Grid::from_rows`].
//! Then call [`solve()`](crate::Grid::solve), or drive a [`MatrixBuilder`] yourself and hand its rows to an exact cover solver of your choice.
//!
//! # Internals
//! A solution picks, for every colour pair, one simple path between its dots such that the paths are disjoint and cover every cell.
//! This is an exact cover problem: every candidate path becomes a row of a 0/1 matrix with one column per colour pair and one column per cell.
//! A row sets the column of its own pair and the column of every cell it visits.
//! Choosing rows which cover every column exactly once is choosing one path per pair with no cell left over or shared.
//!
//! Listing every simple path up front is hopeless on all but the smallest grids, so paths are enumerated under a budget on how often they may turn.
//! A path which would exceed the budget is not thrown away but kept as "stalled", together with the cells it could not step to.
//! When no cover exists among the rows found so far, the budget is raised by one and only the stalled paths are resumed.
//! Resuming continues exactly where the smaller budget stopped, so raising the budget step by step finds the same paths as one search with the final budget, never the same path twice.
//! Most puzzles are solved by paths with few turns, so the matrix usually stays small.
//!
//! Colour pairs are searched in parallel, one task per pair, on at most [`MatrixBuilderConfig::max_parallelism`] threads.
//! Every search polls a shared [`CancellationToken`]; a cancelled build returns [`SearchError::Cancelled`] and leaves the matrix untouched.
//!
//! The default exact cover solver, [`SatExactCover`], encodes the matrix as a Boolean satisfiability problem and defers to `varisat`.

pub use builder::GridBuilder;
pub use cancel::CancellationToken;
pub use colour::{ColourPair, ColourPairIndex, DotColour};
pub use coords::Coords;
pub use error::{ExactCoverError, GridError, PathError, SearchError, SolveError};
pub use exact_cover::{is_exact_cover, ExactCoverSolver, SatExactCover};
pub use finder::{PathFinder, DEFAULT_POLL_INTERVAL};
pub use grid::Grid;
pub use matrix::{MatrixBuilder, MatrixBuilderConfig, MatrixRow};
pub use path::Path;
pub use shape::SquareStep;
pub use solver::{FlowSolver, Solution, SolutionStats, SolverConfig};

pub mod builder;
pub(crate) mod cancel;
pub(crate) mod colour;
pub(crate) mod coords;
pub(crate) mod error;
pub(crate) mod exact_cover;
pub(crate) mod finder;
pub(crate) mod grid;
pub(crate) mod logic;
pub(crate) mod matrix;
pub(crate) mod path;
pub mod shape;
pub(crate) mod solver;
