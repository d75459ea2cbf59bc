//! Reverse unit propagation (RUP) checks

use crate::{
    assignment::Assignment,
    clause::Clause,
    literal::{Literal, Variable},
    propagation::propagate,
};
use std::fmt;

/// Why a clause is implied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    /// Propagation assigned both polarities of this variable.
    UnitConflict(Variable),
    /// Propagation falsified every literal of some clause.
    FalsifiedClause,
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Justification::UnitConflict(variable) => {
                write!(f, "conflict on variable {}", variable)
            }
            Justification::FalsifiedClause => write!(f, "falsified clause"),
        }
    }
}

/// The result of a RUP check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(Justification),
    /// Propagation reached a fixpoint without conflict.
    Rejected {
        /// All literals assigned at the fixpoint
        failing_model: Vec<Literal>,
    },
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        match self {
            Outcome::Accepted(_) => true,
            Outcome::Rejected { .. } => false,
        }
    }
}

/// Check whether `candidate` follows from `clauses` by unit propagation.
///
/// The negation of every literal of the candidate is assumed; the candidate
/// is implied iff propagation then runs into a conflict. No RAT check is
/// attempted if it is not.
pub fn check_rup<'a>(clauses: impl IntoIterator<Item = &'a Clause>, candidate: &Clause) -> Outcome {
    let assumptions = Assignment::from_literals(candidate.iter().map(|&literal| -literal));
    let propagation = propagate(clauses, assumptions);
    if let Some(variable) = propagation.assignment.conflict() {
        Outcome::Accepted(Justification::UnitConflict(variable))
    } else if propagation.has_falsified_clause() {
        Outcome::Accepted(Justification::FalsifiedClause)
    } else {
        Outcome::Rejected {
            failing_model: propagation.assignment.trail().to_vec(),
        }
    }
}

/// Return true if `candidate` is a RUP inference from `clauses`.
pub fn is_implied<'a>(clauses: impl IntoIterator<Item = &'a Clause>, candidate: &Clause) -> bool {
    check_rup(clauses, candidate).is_accepted()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clauses(clauses: &[&[i32]]) -> Vec<Clause> {
        clauses.iter().map(|c| Clause::from_dimacs(c)).collect()
    }

    #[test]
    fn empty_clause_by_chain() {
        let formula = clauses(&[&[1], &[-1, 2], &[-2]]);
        assert!(is_implied(&formula, &Clause::empty()));
    }

    #[test]
    fn empty_clause_needs_lemmas() {
        let formula = clauses(&[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]]);
        assert_eq!(
            check_rup(&formula, &Clause::empty()),
            Outcome::Rejected {
                failing_model: Vec::new()
            }
        );
        assert!(is_implied(&formula, &Clause::from_dimacs(&[2])));
        assert!(is_implied(&formula, &Clause::from_dimacs(&[-2])));
        let mut with_lemma = formula.clone();
        with_lemma.push(Clause::from_dimacs(&[2]));
        assert!(is_implied(&with_lemma, &Clause::empty()));
    }

    #[test]
    fn falsified_clause_justification() {
        let formula = clauses(&[&[1, 2, 3]]);
        assert_eq!(
            check_rup(&formula, &Clause::from_dimacs(&[1, 2, 3, 4])),
            Outcome::Accepted(Justification::FalsifiedClause)
        );
    }

    #[test]
    fn tautologies_are_implied() {
        assert!(is_implied(&Vec::<Clause>::new(), &Clause::from_dimacs(&[5, -5])));
    }

    #[test]
    fn largest_variable() {
        let formula = clauses(&[&[1, 2]]);
        let candidate = Clause::from_dimacs(&[i32::max_value()]);
        for _ in 0..1000 {
            assert!(!is_implied(&formula, &candidate));
        }
    }

    #[test]
    fn rat_lemmas_are_rejected() {
        // RAT on the fresh variable 3, but not RUP.
        let formula = clauses(&[&[1, 2]]);
        match check_rup(&formula, &Clause::from_dimacs(&[3, -1])) {
            Outcome::Rejected { failing_model } => {
                assert_eq!(failing_model, vec![Literal::new(1), Literal::new(-3)]);
            }
            outcome => panic!("unexpected outcome: {:?}", outcome),
        }
    }
}
