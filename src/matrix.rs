use std::num::NonZero;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use bitvec::{bitvec, slice::BitSlice, vec::BitVec};
use itertools::Itertools;
use log::debug;

use crate::cancel::CancellationToken;
use crate::colour::{ColourPair, ColourPairIndex};
use crate::error::SearchError;
use crate::finder::{PathFinder, DEFAULT_POLL_INTERVAL};
use crate::grid::Grid;
use crate::path::Path;

/// Configuration for a [`MatrixBuilder`].
#[derive(Debug, Clone)]
pub struct MatrixBuilderConfig {
    /// Most colour pairs searched at once.
    pub max_parallelism: NonZero<usize>,
    /// Search nodes visited between polls of the cancellation signal.
    pub cancellation_poll_interval: usize,
}

impl Default for MatrixBuilderConfig {
    fn default() -> Self {
        Self {
            max_parallelism: thread::available_parallelism().unwrap_or(NonZero::<usize>::MIN),
            cancellation_poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl MatrixBuilderConfig {
    /// Search at most `max` colour pairs at once.
    pub fn with_max_parallelism(mut self, max: NonZero<usize>) -> Self {
        self.max_parallelism = max;
        self
    }

    /// Poll for cancellation every `interval` search nodes. Values below 1 are treated as 1.
    pub fn with_cancellation_poll_interval(mut self, interval: usize) -> Self {
        self.cancellation_poll_interval = interval.max(1);
        self
    }
}

/// One candidate of the exact cover problem: a complete path for one colour pair.
///
/// The row has a column per colour pair, set only for its own pair, followed by a column per cell, set for
/// each cell on the path. Cell `(x, y)` is column `num_colour_pairs + size * x + y`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatrixRow {
    colour_pair: ColourPair,
    path: Path,
    columns: BitVec,
}

impl MatrixRow {
    fn new(grid: &Grid, colour_pair: ColourPair, path: Path) -> Self {
        let num_colour_pairs = grid.colour_pairs().len();
        let mut columns = bitvec![0; grid.num_columns()];

        columns.set(colour_pair.index(), true);
        for coords in path.coords() {
            columns.set(num_colour_pairs + coords.cell_offset(grid.size()), true);
        }

        Self { colour_pair, path, columns }
    }

    /// The pair whose column this row sets.
    pub fn colour_pair(&self) -> &ColourPair {
        &self.colour_pair
    }

    /// The complete path behind the row.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The row itself, [`Grid::num_columns`] bits wide.
    pub fn columns(&self) -> &BitSlice {
        &self.columns
    }
}

/// Drives a [`PathFinder`] over every colour pair of a [`Grid`] and accumulates the exact cover matrix.
///
/// Each colour pair keeps a frontier of stalled paths. [`Self::build_matrix`] resumes every non-empty frontier
/// with the given budget, turns the complete paths found into new rows, and replaces the frontiers with the
/// paths stalled again. Rows are never removed, so calling with increasing budgets only ever grows the matrix.
pub struct MatrixBuilder<'g> {
    grid: &'g Grid,
    config: MatrixBuilderConfig,
    cancel: CancellationToken,
    rows: Vec<MatrixRow>,
    stalled: Vec<Vec<Path>>,
}

impl<'g> MatrixBuilder<'g> {
    /// A builder for `grid` with the default configuration.
    pub fn new(grid: &'g Grid, cancel: CancellationToken) -> Self {
        Self::with_config(grid, MatrixBuilderConfig::default(), cancel)
    }

    /// A builder for `grid` whose every colour pair starts from its trivial path.
    pub fn with_config(grid: &'g Grid, config: MatrixBuilderConfig, cancel: CancellationToken) -> Self {
        Self {
            grid,
            config,
            cancel,
            rows: Vec::new(),
            stalled: grid.colour_pairs().iter().map(PathFinder::initial_paths).collect_vec(),
        }
    }

    /// Search every colour pair with stalled paths using at most `max_direction_changes` turns per path.
    ///
    /// Returns all rows accumulated so far, not only those added by this call.
    /// On cancellation nothing is added and the stalled paths are left as they were.
    pub fn build_matrix(&mut self, max_direction_changes: usize) -> Result<&[MatrixRow], SearchError> {
        self.cancel.check()?;

        let tasks = self.stalled.iter()
            .enumerate()
            .filter(|(_, paths)| !paths.is_empty())
            .collect_vec();

        let workers = self.config.max_parallelism.get().min(tasks.len());
        debug!(
            "building matrix with at most {} direction changes: {} colour pairs on {} workers",
            max_direction_changes,
            tasks.len(),
            workers,
        );

        let grid = self.grid;
        let cancel = &self.cancel;
        let poll_interval = self.config.cancellation_poll_interval;
        let tasks = &tasks;
        let next_task = &AtomicUsize::new(0);

        let mut found: Vec<(ColourPairIndex, Vec<Path>)> = thread::scope(|scope| {
            let handles = (0..workers)
                .map(|_| scope.spawn(move || -> Result<Vec<(ColourPairIndex, Vec<Path>)>, SearchError> {
                    let mut finder = PathFinder::new(grid, cancel).with_poll_interval(poll_interval);
                    let mut done = Vec::new();

                    while let Some((index, seeds)) = tasks.get(next_task.fetch_add(1, Ordering::Relaxed)) {
                        let end = grid.colour_pairs()[*index].end();
                        let paths = finder.find_all_paths(end, seeds.iter().cloned(), max_direction_changes)?;
                        done.push((*index, paths));
                    }

                    Ok(done)
                }))
                .collect_vec();

            handles.into_iter()
                .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .flatten_ok()
                .collect::<Result<Vec<_>, _>>()
        })?;

        // merge in index order so row order does not depend on scheduling
        found.sort_unstable_by_key(|(index, _)| *index);

        let rows_before = self.rows.len();
        for (index, paths) in found {
            let colour_pair = self.grid.colour_pairs()[index];
            let (complete, stalled): (Vec<Path>, Vec<Path>) = paths.into_iter().partition(Path::is_complete);

            self.rows.extend(complete.into_iter().map(|path| MatrixRow::new(self.grid, colour_pair, path)));
            self.stalled[index] = stalled;
        }

        debug!(
            "matrix has {} rows ({} new), {} stalled paths remain",
            self.rows.len(),
            self.rows.len() - rows_before,
            self.num_stalled_paths(),
        );

        Ok(&self.rows)
    }

    /// Whether some colour pair still has paths which a larger budget may complete.
    pub fn has_stalled_paths(&self) -> bool {
        self.stalled.iter().any(|paths| !paths.is_empty())
    }

    /// Stalled paths over all colour pairs.
    pub fn num_stalled_paths(&self) -> usize {
        self.stalled.iter().map(Vec::len).sum()
    }

    /// The stalled paths of the pair at `index`, which the next call resumes from.
    pub fn stalled_paths(&self, index: ColourPairIndex) -> &[Path] {
        self.stalled.get(index).map_or(&[][..], Vec::as_slice)
    }

    /// The colour pair and path behind the row at `row_index`, for drawing a selected row.
    pub fn colour_pair_and_path_for_row(&self, row_index: usize) -> Option<(&ColourPair, &Path)> {
        self.rows.get(row_index).map(|row| (&row.colour_pair, &row.path))
    }

    /// Every row found so far, in the order found.
    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    /// Number of rows found so far.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Width of every row, see [`Grid::num_columns`].
    pub fn num_columns(&self) -> usize {
        self.grid.num_columns()
    }

    /// The grid the matrix is built for.
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }
}
