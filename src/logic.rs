use std::ops::Index;

use itertools::Itertools;
use varisat::{Lit, Var};

/// Columns covered by more rows than this use [`at_most_one_sequential`] instead of pairwise clauses.
pub(crate) const PAIRWISE_LIMIT: usize = 6;

fn invert(lit: Lit) -> Lit {
    match lit.is_negative() {
        true => lit.var().positive(),
        false => lit.var().negative(),
    }
}

pub(crate) fn exactly_one(vars: Vec<Lit>) -> Vec<Vec<Lit>> {
    let mut clauses = Vec::with_capacity(vars.len() * (vars.len() + 1) / 2 + 1);

    // no two are true; (!A + !B) * (!A + !C) * ...
    clauses.extend(vars.iter()
        .combinations(2)
        .map(|pair| vec![invert(**pair.index(0)), invert(**pair.index(1))])
    );
    // at least one var is true; A + B + C + ...
    clauses.push(vars);

    clauses
}

/// Sinz's sequential counter: at most one of `vars` is true, using `vars.len() - 1` fresh variables taken from `next_var`.
///
/// Register `s_i` means "one of the first `i + 1` vars is true".
pub(crate) fn at_most_one_sequential(vars: &[Lit], next_var: &mut usize) -> Vec<Vec<Lit>> {
    if vars.len() < 2 {
        return Vec::new();
    }

    let registers = (0..vars.len() - 1)
        .map(|offset| Var::from_index(*next_var + offset).positive())
        .collect_vec();
    *next_var += registers.len();

    let mut clauses = Vec::with_capacity(3 * vars.len());
    clauses.push(vec![invert(vars[0]), registers[0]]);
    for i in 1..vars.len() - 1 {
        clauses.push(vec![invert(vars[i]), registers[i]]);
        clauses.push(vec![invert(registers[i - 1]), registers[i]]);
        clauses.push(vec![invert(vars[i]), invert(registers[i - 1])]);
    }
    clauses.push(vec![invert(vars[vars.len() - 1]), invert(registers[vars.len() - 2])]);

    clauses
}

/// Exactly one of `vars` is true, choosing the encoding by length.
pub(crate) fn exactly_one_of(vars: Vec<Lit>, next_var: &mut usize) -> Vec<Vec<Lit>> {
    if vars.len() <= PAIRWISE_LIMIT {
        return exactly_one(vars);
    }

    let mut clauses = at_most_one_sequential(&vars, next_var);
    clauses.push(vars);
    clauses
}
