use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

use log::debug;
use ndarray::Array2;

use crate::cancel::CancellationToken;
use crate::colour::ColourPair;
use crate::error::SolveError;
use crate::exact_cover::ExactCoverSolver;
use crate::grid::Grid;
use crate::matrix::{MatrixBuilder, MatrixBuilderConfig};
use crate::path::Path;
use crate::shape::SquareStep;

/// Configuration for a [`FlowSolver`].
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Direction change budget of the first attempt.
    pub initial_direction_changes: usize,
    /// Give up once an attempt with this budget fails. Unbounded if [`None`].
    pub max_direction_changes: Option<usize>,
    /// Passed on to the [`MatrixBuilder`].
    pub matrix: MatrixBuilderConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_direction_changes: 1,
            max_direction_changes: None,
            matrix: MatrixBuilderConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Start with a budget of `budget` direction changes.
    pub fn with_initial_direction_changes(mut self, budget: usize) -> Self {
        self.initial_direction_changes = budget;
        self
    }

    /// Give up after an attempt with `budget` fails, or never if [`None`].
    pub fn with_max_direction_changes(mut self, budget: Option<usize>) -> Self {
        self.max_direction_changes = budget;
        self
    }

    /// Replace the matrix building configuration.
    pub fn with_matrix(mut self, matrix: MatrixBuilderConfig) -> Self {
        self.matrix = matrix;
        self
    }
}

/// Figures describing how a [`Solution`] was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionStats {
    /// Rows of the matrix when it was solved.
    pub num_matrix_rows: usize,
    /// Columns of the matrix, one per colour pair and one per cell.
    pub num_matrix_columns: usize,
    /// Budget of the attempt which succeeded.
    pub max_direction_changes: usize,
    /// Total time spent enumerating paths and building rows, over all attempts.
    pub matrix_building_duration: Duration,
    /// Total time spent in the exact cover solver, over all attempts.
    pub matrix_solving_duration: Duration,
}

/// One path per colour pair, together covering the whole grid.
#[derive(Debug, Clone)]
pub struct Solution {
    size: usize,
    paths: Vec<(ColourPair, Path)>,
    stats: SolutionStats,
}

impl Solution {
    /// The path chosen for each colour pair, in colour pair index order.
    pub fn paths(&self) -> &[(ColourPair, Path)] {
        &self.paths
    }

    /// The path chosen for `colour_pair`.
    pub fn path_for(&self, colour_pair: &ColourPair) -> Option<&Path> {
        self.paths.iter()
            .find(|(pair, _)| pair.index() == colour_pair.index())
            .map(|(_, path)| path)
    }

    /// How the solution was found.
    pub fn stats(&self) -> &SolutionStats {
        &self.stats
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut cells = Array2::from_elem((self.size, self.size), '.');
        for (colour_pair, path) in &self.paths {
            let display = colour_pair.colour().as_char();
            for coords in path.coords() {
                cells[coords.as_index(self.size)] = match colour_pair.has_dot_at(*coords) {
                    true => display.to_ascii_uppercase(),
                    false => display.to_ascii_lowercase(),
                };
            }
        }

        write!(f, "{}", SquareStep::print(cells))
    }
}

/// Repeatedly builds the exact cover matrix of a grid with a growing direction change budget and hands it to an
/// [`ExactCoverSolver`] until a cover is found or the search space is exhausted.
#[derive(Debug, Clone, Default)]
pub struct FlowSolver {
    config: SolverConfig,
    cancel: CancellationToken,
}

impl FlowSolver {
    /// A solver which stops once `cancel` is triggered.
    pub fn new(config: SolverConfig, cancel: CancellationToken) -> Self {
        Self { config, cancel }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// A handle which cancels any solve in progress on this solver.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Solve `grid`, raising the budget by one after each failed attempt while paths remain stalled.
    ///
    /// Fails with [`SolveError::Unsolvable`] once no paths are stalled and no cover exists, or with
    /// [`SolveError::BudgetExhausted`] when the configured maximum budget fails.
    pub fn solve(&self, grid: &Grid, exact_cover: &mut impl ExactCoverSolver) -> Result<Solution, SolveError> {
        let mut builder = MatrixBuilder::with_config(grid, self.config.matrix.clone(), self.cancel.clone());
        let mut budget = self.config.initial_direction_changes;
        let mut matrix_building_duration = Duration::ZERO;
        let mut matrix_solving_duration = Duration::ZERO;

        loop {
            let started = Instant::now();
            builder.build_matrix(budget)?;
            matrix_building_duration += started.elapsed();

            self.cancel.check()?;

            let started = Instant::now();
            let selection = exact_cover.solve(builder.rows(), builder.num_columns())?;
            matrix_solving_duration += started.elapsed();

            debug!(
                "attempt with at most {} direction changes over {} rows: {}",
                budget,
                builder.num_rows(),
                if selection.is_some() { "solved" } else { "no cover" },
            );

            if let Some(selection) = selection {
                let mut paths = selection.into_iter()
                    .filter_map(|row_index| builder.colour_pair_and_path_for_row(row_index))
                    .map(|(colour_pair, path)| (*colour_pair, path.clone()))
                    .collect::<Vec<_>>();
                paths.sort_by_key(|(colour_pair, _)| colour_pair.index());

                return Ok(Solution {
                    size: grid.size(),
                    paths,
                    stats: SolutionStats {
                        num_matrix_rows: builder.num_rows(),
                        num_matrix_columns: builder.num_columns(),
                        max_direction_changes: budget,
                        matrix_building_duration,
                        matrix_solving_duration,
                    },
                });
            }

            if !builder.has_stalled_paths() {
                return Err(SolveError::Unsolvable);
            }

            if self.config.max_direction_changes.is_some_and(|max| budget >= max) {
                return Err(SolveError::BudgetExhausted(budget));
            }

            budget += 1;
        }
    }
}
