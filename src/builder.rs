//! Validated construction of a [`Grid`].

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;

use crate::colour::{ColourPair, ColourPairIndex, DotColour};
use crate::coords::Coords;
use crate::error::GridError;
use crate::grid::Grid;
use crate::shape::SquareStep;

/// Builds a validated [`Grid`].
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// The first invalid operation is recorded; every later operation does nothing, and [`Self::build`] reports it.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    size: usize,
    dots: Array2<Option<ColourPairIndex>>,
    colour_pairs: Vec<ColourPair>,
    invalid_reasons: Vec<GridError>,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::with_size(5)
    }
}

impl GridBuilder {
    /// Construct a builder for a `size` by `size` grid with no dots.
    pub fn with_size(size: usize) -> Self {
        let mut invalid_reasons = Vec::new();
        if size < 2 {
            invalid_reasons.push(GridError::TooSmall(size));
        }

        Self {
            size,
            dots: Array2::from_elem((size, size), None),
            colour_pairs: Default::default(),
            invalid_reasons,
        }
    }

    /// Add the two dots of a flow. The next free index is assigned to the new pair.
    ///
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_colour_pair(&mut self, colour: DotColour, dots: (Coords, Coords)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let (start, end) = dots;
        for coords in [start, end] {
            if !coords.within(self.size) {
                self.invalid_reasons.push(GridError::DotOutOfBounds(coords));
                return self;
            }
        }

        if start == end {
            self.invalid_reasons.push(GridError::CoincidentDots(colour));
            return self;
        }

        if self.colour_pairs.iter().any(|pair| pair.colour == colour) {
            self.invalid_reasons.push(GridError::DuplicateColour(colour));
            return self;
        }

        for coords in [start, end] {
            if self.dots[coords.as_index(self.size)].is_some() {
                self.invalid_reasons.push(GridError::DotOccupied(coords));
                return self;
            }
        }

        let index = self.colour_pairs.len();
        self.colour_pairs.push(ColourPair { start, end, colour, index });
        for coords in [start, end] {
            self.dots[coords.as_index(self.size)] = Some(index);
        }

        self
    }

    /// Remove the most recently added colour pair.
    ///
    /// If the builder is in an invalid state or no pairs are present, this function does nothing.
    pub fn pop_colour_pair(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if let Some(pair) = self.colour_pairs.pop() {
            for coords in [pair.start, pair.end] {
                self.dots[coords.as_index(self.size)] = None;
            }
        }

        self
    }

    /// Everything that has gone wrong so far; empty if the builder is valid.
    pub fn invalid_reasons(&self) -> &[GridError] {
        &self.invalid_reasons
    }

    /// Convert the state of this builder into a [`Grid`].
    pub fn build(&self) -> Result<Grid, GridError> {
        if let Some(reason) = self.invalid_reasons.first() {
            return Err(reason.clone());
        }

        if self.colour_pairs.is_empty() {
            return Err(GridError::NoColourPairs);
        }

        let mut graph = UnGraphMap::with_capacity(
            self.size * self.size,
            // horizontal and vertical edges
            2 * self.size * (self.size - 1),
        );

        for x in 0..self.size {
            for y in 0..self.size {
                let coords = Coords(x, y);
                graph.add_node(coords);

                // add edges up and to the right, if possible; both lead to a higher ordered cell
                for step in SquareStep::FORWARD_VARIANTS {
                    let other = step.attempt_from(coords);
                    if other.within(self.size) {
                        graph.add_edge(coords, other, *step);
                    }
                }
            }
        }

        Ok(Grid {
            size: self.size,
            colour_pairs: self.colour_pairs.clone(),
            dots: self.dots.clone(),
            graph,
        })
    }
}
