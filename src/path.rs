use itertools::Itertools;

use crate::coords::Coords;
use crate::error::PathError;
use crate::shape::SquareStep;

/// A route attempt for one colour pair, starting at the pair's start dot.
///
/// Besides its cells, a path tracks how often it turns and, once stalled by a
/// [`PathFinder`](crate::PathFinder), which neighbouring cells it could not step to without exceeding the
/// direction change budget in force at the time. Those pending cells are where a later search with a
/// larger budget resumes.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Path {
    coords: Vec<Coords>,
    steps: Vec<SquareStep>,
    end: Coords,
    direction_changes: usize,
    pending: Vec<Coords>,
}

impl Path {
    /// A path holding only `start`, heading for `end`.
    pub fn new(start: Coords, end: Coords) -> Self {
        Self {
            coords: vec![start],
            steps: Vec::new(),
            end,
            direction_changes: 0,
            pending: Vec::new(),
        }
    }

    /// Append `next`, which must share an edge with the last cell and not already be on the path.
    pub fn extend(&mut self, next: Coords) -> Result<(), PathError> {
        if self.is_complete() {
            return Err(PathError::AlreadyComplete);
        }

        let last = self.last();
        let step = SquareStep::direction_to(last, next).ok_or(PathError::NotAdjacent { from: last, to: next })?;
        if self.coords.contains(&next) {
            return Err(PathError::AlreadyVisited(next));
        }

        self.push_step(next, step);
        Ok(())
    }

    /// Direction changes this path would have after stepping in direction `step`.
    /// The first step of a path never counts as a change.
    #[inline]
    pub(crate) fn direction_changes_after(&self, step: SquareStep) -> usize {
        match self.steps.last() {
            Some(previous) if *previous != step => self.direction_changes + 1,
            _ => self.direction_changes,
        }
    }

    /// Unchecked [`Self::extend`] for searches which already know `next` is a fresh neighbour.
    pub(crate) fn push_step(&mut self, next: Coords, step: SquareStep) {
        self.direction_changes = self.direction_changes_after(step);
        self.coords.push(next);
        self.steps.push(step);
    }

    /// Undo the last [`Self::push_step`].
    pub(crate) fn pop_step(&mut self) {
        if let Some(step) = self.steps.pop() {
            self.coords.pop();
            if matches!(self.steps.last(), Some(previous) if *previous != step) {
                self.direction_changes -= 1;
            }
        }
    }

    /// Mark this path as stalled before the given cells.
    pub(crate) fn stall_before(&mut self, pending: Vec<Coords>) {
        self.pending = pending;
    }

    pub(crate) fn take_pending(&mut self) -> Vec<Coords> {
        std::mem::take(&mut self.pending)
    }

    /// True iff the last cell is the end the path is heading for.
    pub fn is_complete(&self) -> bool {
        self.last() == self.end
    }

    /// True iff the path was left incomplete because extending it would have exceeded the budget.
    pub fn is_stalled(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Every cell of the path, from the start dot onwards.
    pub fn coords(&self) -> &[Coords] {
        &self.coords
    }

    /// The start dot.
    pub fn start(&self) -> Coords {
        self.coords[0]
    }

    /// The dot this path is heading for, whether or not it has arrived.
    pub fn end(&self) -> Coords {
        self.end
    }

    /// The cell the path currently ends on.
    pub fn last(&self) -> Coords {
        // never empty; a path starts with one cell and pop_step stops there
        self.coords[self.coords.len() - 1]
    }

    /// Number of cells, the start included. Never zero.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// How often the path turns.
    pub fn direction_changes(&self) -> usize {
        self.direction_changes
    }

    /// Cells this stalled path could not step to under the last budget.
    pub fn pending(&self) -> &[Coords] {
        &self.pending
    }

    /// Whether `coords` is already on the path.
    pub fn contains(&self, coords: Coords) -> bool {
        self.coords.contains(&coords)
    }

    /// Consecutive pairs of cells, i.e. the moves made along this path.
    pub fn moves(&self) -> impl Iterator<Item = (Coords, Coords)> + '_ {
        self.coords.iter().copied().tuple_windows()
    }
}
