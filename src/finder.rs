use std::collections::HashMap;

use bitvec::{bitvec, vec::BitVec};
use itertools::Itertools;
use log::trace;

use crate::cancel::CancellationToken;
use crate::colour::{ColourPair, ColourPairIndex};
use crate::coords::Coords;
use crate::error::SearchError;
use crate::grid::Grid;
use crate::path::Path;

/// Search nodes visited between polls of the cancellation signal, unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: usize = 256;

#[derive(Clone, Copy)]
struct Search {
    end: Coords,
    owner: ColourPairIndex,
    max_direction_changes: usize,
}

/// Enumerates the simple paths joining the dots of one colour pair under a direction change budget.
///
/// A path may not cross a dot of any other pair and may turn at most `max_direction_changes` times.
/// Whenever a step would exceed the budget, the path up to that point is kept as a stalled result, noting
/// the cells it could not step to; feeding stalled results back in with a larger budget continues the
/// search from exactly those steps. Finding paths with budget `B` in one call therefore yields the same
/// complete paths as calls with budgets `1, 2, ..., B` chained through their stalled results.
///
/// A finder is single threaded; use one per thread.
pub struct PathFinder<'a> {
    grid: &'a Grid,
    cancel: &'a CancellationToken,
    poll_interval: usize,
    since_poll: usize,
    visited: BitVec,
}

impl<'a> PathFinder<'a> {
    /// A finder over `grid` which stops once `cancel` is triggered.
    pub fn new(grid: &'a Grid, cancel: &'a CancellationToken) -> Self {
        Self {
            grid,
            cancel,
            poll_interval: DEFAULT_POLL_INTERVAL,
            since_poll: 0,
            visited: bitvec![0; grid.size() * grid.size()],
        }
    }

    /// Poll the cancellation signal every `interval` search nodes. Values below 1 are treated as 1.
    pub fn with_poll_interval(mut self, interval: usize) -> Self {
        self.poll_interval = interval.max(1);
        self
    }

    /// The seed of a fresh search: the single cell path at the pair's start.
    pub fn initial_paths(colour_pair: &ColourPair) -> Vec<Path> {
        vec![Path::new(colour_pair.start(), colour_pair.end())]
    }

    /// Find every path reachable from `seeds` ending on `target_end` with at most `max_direction_changes` turns.
    ///
    /// `seeds` are either [`Self::initial_paths`] or the stalled paths returned by an earlier call for the
    /// same pair. An empty collection of seeds starts afresh from the pair whose end dot is on `target_end`;
    /// if there is no such pair, nothing is found. Seeds which leave the grid or do not lead from that pair's start to `target_end` are ignored.
    ///
    /// Each returned path is either complete or stalled; paths which ran into a dead end are dropped.
    /// No two returned paths share a sequence of cells.
    pub fn find_all_paths(
        &mut self,
        target_end: Coords,
        seeds: impl IntoIterator<Item = Path>,
        max_direction_changes: usize,
    ) -> Result<Vec<Path>, SearchError> {
        self.cancel.check()?;

        let Some(owner) = self.grid.colour_pairs().iter().find(|pair| pair.end() == target_end).copied() else {
            return Ok(Vec::new());
        };

        let size = self.grid.size();
        let mut seeds = seeds.into_iter().peekable();
        let seeds = match seeds.peek() {
            None => Self::initial_paths(&owner),
            Some(_) => coalesce(seeds.filter(|seed| {
                let leads_here = seed.start() == owner.start()
                    && seed.end() == target_end
                    && seed.coords().iter().all(|coords| coords.within(size));
                if !leads_here {
                    trace!("ignoring seed {:?}, which does not lead from {} to {}", seed.coords(), owner.start(), target_end);
                }
                leads_here
            })),
        };

        let search = Search {
            end: target_end,
            owner: owner.index(),
            max_direction_changes,
        };

        let mut found = Vec::new();
        for seed in seeds {
            self.resume(seed, search, &mut found)?;
        }

        trace!(
            "{} with at most {} direction changes: {} complete, {} stalled",
            owner,
            max_direction_changes,
            found.iter().filter(|path| path.is_complete()).count(),
            found.iter().filter(|path| path.is_stalled()).count(),
        );

        Ok(found)
    }

    fn resume(&mut self, mut path: Path, search: Search, found: &mut Vec<Path>) -> Result<(), SearchError> {
        let pending = path.take_pending();
        if path.is_complete() {
            found.push(path);
            return Ok(());
        }

        let size = self.grid.size();
        self.visited.fill(false);
        for coords in path.coords() {
            self.visited.set(coords.cell_offset(size), true);
        }

        // a seed without pending cells has not been explored at all yet
        let only = match pending.is_empty() {
            true => None,
            false => Some(pending.as_slice()),
        };

        self.explore(&mut path, only, search, found)
    }

    fn explore(
        &mut self,
        path: &mut Path,
        only: Option<&[Coords]>,
        search: Search,
        found: &mut Vec<Path>,
    ) -> Result<(), SearchError> {
        self.poll()?;

        let grid = self.grid;
        let mut stalled_before = Vec::new();

        for (next, step) in grid.neighbours(path.last()) {
            if only.is_some_and(|only| !only.contains(&next)) {
                continue;
            }

            let cell = next.cell_offset(grid.size());
            if self.visited[cell] {
                continue;
            }

            // the budget is checked before occupancy, so a stalled path may be waiting on a cell it can never enter
            if path.direction_changes_after(step) > search.max_direction_changes {
                stalled_before.push(next);
                continue;
            }

            if grid.is_foreign_dot(next, search.owner) {
                continue;
            }

            path.push_step(next, step);
            if next == search.end {
                found.push(path.clone());
            } else {
                self.visited.set(cell, true);
                self.explore(path, None, search, found)?;
                self.visited.set(cell, false);
            }
            path.pop_step();
        }

        if !stalled_before.is_empty() {
            let mut stalled = path.clone();
            stalled.stall_before(stalled_before);
            found.push(stalled);
        }

        Ok(())
    }

    #[inline]
    fn poll(&mut self) -> Result<(), SearchError> {
        self.since_poll += 1;
        if self.since_poll >= self.poll_interval {
            self.since_poll = 0;
            self.cancel.check()?;
        }

        Ok(())
    }
}

/// Merge seeds sharing a sequence of cells, so that no prefix is searched twice.
fn coalesce(seeds: impl IntoIterator<Item = Path>) -> Vec<Path> {
    let mut coalesced: Vec<Path> = Vec::new();
    let mut positions: HashMap<Vec<Coords>, usize> = HashMap::new();

    for mut seed in seeds {
        match positions.get(seed.coords()) {
            Some(&position) => {
                let existing = &mut coalesced[position];
                let (mine, theirs) = (existing.take_pending(), seed.take_pending());
                // an unexplored seed subsumes any stalled one
                if !mine.is_empty() && !theirs.is_empty() {
                    existing.stall_before(mine.into_iter().chain(theirs).unique().collect_vec());
                }
            }
            None => {
                positions.insert(seed.coords().to_vec(), coalesced.len());
                coalesced.push(seed);
            }
        }
    }

    coalesced
}
