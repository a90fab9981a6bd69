use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;

use crate::builder::GridBuilder;
use crate::colour::{ColourPair, ColourPairIndex, DotColour};
use crate::coords::Coords;
use crate::error::{GridError, SolveError};
use crate::exact_cover::SatExactCover;
use crate::shape::SquareStep;
use crate::solver::{FlowSolver, Solution};

/// A square puzzle: its size and the dots of every colour pair.
///
/// [`Grid`]s are read-only once built and should be built using a [`GridBuilder`] or parsed with [`Grid::from_rows`].
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) size: usize,
    pub(crate) colour_pairs: Vec<ColourPair>,
    // which pair owns the dot on each cell, laid out as printed
    pub(crate) dots: Array2<Option<ColourPairIndex>>,
    // edge weights are the direction from the lower ordered cell
    pub(crate) graph: UnGraphMap<Coords, SquareStep>,
}

impl Grid {
    /// Parse a text layout, one string per row with the top row (highest `y`) first.
    ///
    /// A space or `.` is an empty cell and an upper case letter (see [`DotColour::as_char`]) is a dot.
    /// Pairs are indexed in order of first appearance, and the first dot seen of each colour is its start.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        let size = rows.len();
        let mut dots_by_colour: Vec<(DotColour, Vec<Coords>)> = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let cells = line.chars().collect_vec();
            if cells.len() != size {
                return Err(GridError::RaggedRow { row, len: cells.len(), expected: size });
            }

            for (x, c) in cells.into_iter().enumerate() {
                if c == ' ' || c == '.' {
                    continue;
                }

                let colour = DotColour::from_char(c).ok_or(GridError::UnknownDot(c))?;
                let coords = Coords::from_index((row, x), size);
                match dots_by_colour.iter_mut().find(|(seen, _)| *seen == colour) {
                    Some((_, dots)) => dots.push(coords),
                    None => dots_by_colour.push((colour, vec![coords])),
                }
            }
        }

        let mut builder = GridBuilder::with_size(size);
        for (colour, dots) in dots_by_colour {
            match dots.as_slice() {
                [start, end] => builder.add_colour_pair(colour, (*start, *end)),
                _ => return Err(GridError::UnpairedColour { colour, count: dots.len() }),
            };
        }

        builder.build()
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All colour pairs, in index order.
    pub fn colour_pairs(&self) -> &[ColourPair] {
        &self.colour_pairs
    }

    /// The colour pair with the given index, if there is one.
    pub fn colour_pair(&self, index: ColourPairIndex) -> Option<&ColourPair> {
        self.colour_pairs.get(index)
    }

    /// The pair with a dot on `coords`, if any.
    pub fn dot_at(&self, coords: Coords) -> Option<&ColourPair> {
        if !coords.within(self.size) {
            return None;
        }

        self.dots[coords.as_index(self.size)].and_then(|index| self.colour_pairs.get(index))
    }

    /// Whether `coords` holds a dot of a pair other than the one at `owner`.
    #[inline]
    pub(crate) fn is_foreign_dot(&self, coords: Coords, owner: ColourPairIndex) -> bool {
        matches!(self.dots[coords.as_index(self.size)], Some(index) if index != owner)
    }

    /// Width of an exact cover row: one column per colour pair followed by one per cell.
    pub fn num_columns(&self) -> usize {
        self.colour_pairs.len() + self.size * self.size
    }

    /// Cells sharing an edge with `coords`, with the direction of the step to reach each.
    pub fn neighbours(&self, coords: Coords) -> impl Iterator<Item = (Coords, SquareStep)> + '_ {
        self.graph.edges(coords).map(move |(n1, n2, step)| {
            let neighbour = if n1 == coords { n2 } else { n1 };
            // the stored direction runs from the lower ordered cell
            let direction = if coords < neighbour { *step } else { step.invert() };
            (neighbour, direction)
        })
    }

    /// Solve this grid with default settings, deferring to a [`FlowSolver`] backed by [`SatExactCover`].
    pub fn solve(&self) -> Result<Solution, SolveError> {
        FlowSolver::default().solve(self, &mut SatExactCover::default())
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", SquareStep::print(self.dots.map(|dot| match dot {
            Some(index) => self.colour_pairs[*index].colour.as_char(),
            None => '.',
        })))
    }
}
