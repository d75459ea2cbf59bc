//! Remove redundant re-additions and deletions from a proof
//!
//! Solvers sometimes add a clause that is already present, and later delete
//! one of the copies. Both steps are noise for a checker that counts copies
//! anyway. We keep a reference count per clause (every distinct formula
//! clause starts at one, no matter how often it is listed) and only emit an
//! addition when the clause is not active, and a deletion when it removes the
//! last copy. Emitted steps keep their literals in the order they were
//! written.

use crate::{
    clause::{write_record, Clause, ProofRecord, ProofStep},
    error::{Error, Failure, Result},
    parser::Formula,
};
use std::{collections::HashMap, io::Write};

/// Counts of emitted and suppressed proof steps
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompactionStatistics {
    pub emitted_additions: usize,
    pub suppressed_additions: usize,
    pub emitted_deletions: usize,
    pub suppressed_deletions: usize,
}

/// Reference counts for the clauses seen so far
#[derive(Debug, Default, Clone)]
pub struct Compactor {
    /// Deleted clauses stay in here with count zero.
    counts: HashMap<Clause, usize>,
    pub statistics: CompactionStatistics,
}

impl Compactor {
    /// Seed a count of one for every distinct clause of the formula.
    pub fn new(formula: &Formula) -> Compactor {
        let mut compactor = Compactor::default();
        for clause in &formula.clauses {
            compactor.counts.insert(clause.clone(), 1);
        }
        compactor
    }
    /// The current count of a clause, `None` if it was never seen.
    pub fn count(&self, clause: &Clause) -> Option<usize> {
        self.counts.get(clause).cloned()
    }
    /// Update the counts for one step; returns true if the step has to be emitted.
    pub fn apply(&mut self, step: &ProofStep) -> Result<bool> {
        match step {
            ProofStep::Addition(clause) => {
                let count = self.counts.entry(clause.clone()).or_insert(0);
                *count += 1;
                let emit = *count == 1;
                if emit {
                    self.statistics.emitted_additions += 1;
                } else {
                    self.statistics.suppressed_additions += 1;
                }
                Ok(emit)
            }
            ProofStep::Deletion(clause) => {
                let count = self
                    .counts
                    .get_mut(clause)
                    .ok_or_else(|| Error::MissingClause(clause.clone()))?;
                *count = count
                    .checked_sub(1)
                    .ok_or_else(|| Error::Underflow(clause.clone()))?;
                let emit = *count == 0;
                if emit {
                    self.statistics.emitted_deletions += 1;
                } else {
                    self.statistics.suppressed_deletions += 1;
                }
                Ok(emit)
            }
        }
    }
    /// Write the compacted proof to `output`, stopping at the first bad step.
    pub fn compact(
        &mut self,
        proof: &[ProofRecord],
        output: &mut impl Write,
    ) -> std::result::Result<CompactionStatistics, Failure> {
        for (offset, record) in proof.iter().enumerate() {
            let emit = self
                .apply(&record.step)
                .map_err(|error| Failure::at(offset + 1, record.line, error))?;
            if emit {
                write_record(output, record)?;
            }
        }
        output.flush()?;
        Ok(self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{input::Input, parser::parse_proof};

    fn formula(clauses: &[&[i32]]) -> Formula {
        Formula {
            clauses: clauses.iter().map(|c| Clause::from_dimacs(c)).collect(),
            ..Formula::default()
        }
    }

    fn addition(literals: &[i32], line: usize) -> ProofRecord {
        ProofRecord::addition(Clause::from_dimacs(literals), line)
    }

    fn deletion(literals: &[i32], line: usize) -> ProofRecord {
        ProofRecord::deletion(Clause::from_dimacs(literals), line)
    }

    #[test]
    fn only_the_last_deletion_is_emitted() {
        let mut compactor = Compactor::new(&formula(&[&[1, 2]]));
        let proof = vec![addition(&[1, 2], 1), deletion(&[2, 1], 2), deletion(&[1, 2], 3)];
        let mut output = Vec::new();
        let statistics = compactor.compact(&proof, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "d 1 2 0\n");
        assert_eq!(compactor.count(&Clause::from_dimacs(&[1, 2])), Some(0));
        assert_eq!(
            statistics,
            CompactionStatistics {
                emitted_additions: 0,
                suppressed_additions: 1,
                emitted_deletions: 1,
                suppressed_deletions: 1,
            }
        );
    }

    #[test]
    fn too_many_deletions() {
        let mut compactor = Compactor::new(&formula(&[&[1, 2]]));
        let proof = vec![
            addition(&[1, 2], 1),
            deletion(&[1, 2], 2),
            deletion(&[1, 2], 3),
            deletion(&[1, 2], 4),
        ];
        let failure = compactor.compact(&proof, &mut Vec::new()).unwrap_err();
        assert!(matches!(failure.error, Error::Underflow(_)));
        assert_eq!(failure.proof_step, Some(4));
        assert_eq!(failure.line, Some(4));
    }

    #[test]
    fn deleting_an_unknown_clause() {
        let mut compactor = Compactor::new(&formula(&[]));
        assert!(matches!(
            compactor.apply(&ProofStep::Deletion(Clause::from_dimacs(&[7]))),
            Err(Error::MissingClause(_))
        ));
    }

    #[test]
    fn new_lemmas_are_kept() {
        let mut compactor = Compactor::new(&formula(&[&[1, 2], &[-1, 2]]));
        let proof = vec![
            addition(&[2, 3], 1),
            addition(&[3, 2], 2),
            deletion(&[-1, 2], 3),
            deletion(&[2, 3], 4),
            addition(&[2], 5),
            addition(&[], 6),
        ];
        let mut output = Vec::new();
        compactor.compact(&proof, &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "2 3 0\nd -1 2 0\n2 0\n0\n"
        );
        assert_eq!(compactor.count(&Clause::from_dimacs(&[2, 3])), Some(1));
    }

    #[test]
    fn repeated_formula_clauses_count_once() {
        let mut compactor = Compactor::new(&formula(&[&[1, 2], &[2, 1]]));
        assert_eq!(compactor.count(&Clause::from_dimacs(&[1, 2])), Some(1));
        let mut output = Vec::new();
        compactor.compact(&[deletion(&[1, 2], 1)], &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "d 1 2 0\n");
    }

    #[test]
    fn literal_order_is_preserved() {
        let mut compactor = Compactor::new(&formula(&[&[1, 2]]));
        let proof = parse_proof(Input::from_text("3 -1 0\n-1 3 0\nd 3 -1 0\nd 2 1 0\n")).unwrap();
        let mut output = Vec::new();
        compactor.compact(&proof, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "3 -1 0\nd 2 1 0\n");
    }

    #[test]
    fn clause_is_re_emitted_after_its_last_deletion() {
        let mut compactor = Compactor::new(&formula(&[&[1]]));
        let proof = vec![deletion(&[1], 1), addition(&[1], 2), deletion(&[1], 3)];
        let mut output = Vec::new();
        compactor.compact(&proof, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "d 1 0\n1 0\nd 1 0\n");
    }
}
