use itertools::Itertools;
use log::trace;
use varisat::{CnfFormula, Lit, Solver, Var};

use crate::error::ExactCoverError;
use crate::logic::exactly_one_of;
use crate::matrix::MatrixRow;

/// Selects rows of a 0/1 matrix covering every column exactly once.
pub trait ExactCoverSolver {
    /// Returns the indices of a selection of `rows` covering each of the `num_columns` columns exactly once,
    /// or [`None`] if no such selection exists.
    fn solve(&mut self, rows: &[MatrixRow], num_columns: usize) -> Result<Option<Vec<usize>>, ExactCoverError>;
}

/// An [`ExactCoverSolver`] expressing the problem as Boolean satisfiability.
///
/// Row `i` is variable `i`; every column contributes the constraint that exactly one of the rows covering it is
/// selected. Columns covered by many rows are encoded with a sequential counter over auxiliary variables.
#[derive(Clone, Copy, Debug, Default)]
pub struct SatExactCover;

impl ExactCoverSolver for SatExactCover {
    fn solve(&mut self, rows: &[MatrixRow], num_columns: usize) -> Result<Option<Vec<usize>>, ExactCoverError> {
        let mut column_rows: Vec<Vec<Lit>> = vec![Vec::new(); num_columns];
        for (index, row) in rows.iter().enumerate() {
            for column in row.columns().iter_ones() {
                column_rows[column].push(Var::from_index(index).positive());
            }
        }

        // some column can never be covered; no need to ask the SAT solver
        if column_rows.iter().any(Vec::is_empty) {
            return Ok(None);
        }

        let mut next_var = rows.len();
        let clauses = column_rows.into_iter()
            .flat_map(|lits| exactly_one_of(lits, &mut next_var))
            .collect_vec();
        trace!("exact cover of {} rows as {} clauses over {} variables", rows.len(), clauses.len(), next_var);

        let mut solver = Solver::new();
        solver.add_formula(&CnfFormula::from(clauses));
        let satisfiable = solver.solve()
            .map_err(|err| ExactCoverError::Backend(format!("{:?}", err)))?;
        if !satisfiable {
            return Ok(None);
        }

        let model = solver.model()
            .ok_or_else(|| ExactCoverError::Backend("satisfiable formula without a model".to_owned()))?;

        Ok(Some(model.into_iter()
            .filter(|lit| lit.is_positive() && lit.var().index() < rows.len())
            .map(|lit| lit.var().index())
            .sorted()
            .collect_vec()))
    }
}

/// Whether `selection` covers every one of `num_columns` columns exactly once.
pub fn is_exact_cover(rows: &[MatrixRow], num_columns: usize, selection: &[usize]) -> bool {
    let mut counts = vec![0usize; num_columns];
    for index in selection {
        match rows.get(*index) {
            Some(row) => row.columns().iter_ones().for_each(|column| counts[column] += 1),
            None => return false,
        }
    }

    counts.into_iter().all(|count| count == 1)
}

