//! Unit propagation
//!
//! This is the naive whole-formula variant: every round rebuilds the reduct
//! of the (already reduced) clauses under the current assignment, then
//! assigns all literals of clauses that became unit. It stops as soon as a
//! round finds no unit clause. Each round either assigns a new literal or is
//! the last one, so there are at most `variables + 1` rounds.

use crate::{
    assignment::Assignment,
    clause::Clause,
    config,
    literal::Literal,
};

/// The fixpoint reached by [propagate](fn.propagate.html)
#[derive(Debug, Clone, PartialEq)]
pub struct Propagation {
    /// The clauses that are not satisfied, without their falsified literals
    pub reduced: Vec<Vec<Literal>>,
    /// The initial assignment plus all forced literals
    pub assignment: Assignment,
    /// The number of reduction rounds
    pub rounds: usize,
}

impl Propagation {
    /// Return true if some clause has all its literals falsified.
    pub fn has_falsified_clause(&self) -> bool {
        self.reduced.iter().any(Vec::is_empty)
    }
}

/// Propagate the unit clauses of `clauses` under `assignment` to a fixpoint.
pub fn propagate<'a>(
    clauses: impl IntoIterator<Item = &'a Clause>,
    mut assignment: Assignment,
) -> Propagation {
    let mut reduced: Vec<Vec<Literal>> = clauses
        .into_iter()
        .map(|clause| clause.literals().to_vec())
        .collect();
    let mut rounds = 0;
    loop {
        rounds += 1;
        reduced = reduct(reduced, &assignment);
        let units: Vec<Literal> = reduced
            .iter()
            .filter(|clause| clause.len() == 1)
            .map(|clause| clause[0])
            .collect();
        if units.is_empty() {
            break;
        }
        let mut progress = false;
        for unit in units {
            progress |= assignment.assign(unit);
        }
        invariant!(progress, "unit clause with an assigned literal");
    }
    let propagation = Propagation {
        reduced,
        assignment,
        rounds,
    };
    if config::CHECK_PROPAGATION_INVARIANTS {
        propagation_invariants(&propagation);
    }
    propagation
}

/// Drop satisfied clauses and falsified literals.
fn reduct(clauses: Vec<Vec<Literal>>, assignment: &Assignment) -> Vec<Vec<Literal>> {
    clauses
        .into_iter()
        .filter(|clause| !clause.iter().any(|&literal| assignment[literal]))
        .map(|mut clause| {
            clause.retain(|&literal| !assignment.falsifies(literal));
            clause
        })
        .collect()
}

/// At the fixpoint no clause is unit and no remaining literal is assigned.
fn propagation_invariants(propagation: &Propagation) {
    for clause in &propagation.reduced {
        invariant!(clause.len() != 1);
        for &literal in clause {
            invariant!(!propagation.assignment[literal]);
            invariant!(!propagation.assignment.falsifies(literal));
        }
    }
}
