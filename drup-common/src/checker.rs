//! Forward DRUP proof checking
//!
//! The checker replays a proof against a [ClauseStore](../clausestore/struct.ClauseStore.html)
//! that starts out as the input formula. Deletions remove a copy of a clause,
//! additions must pass the RUP check before they are added. Once the proof is
//! exhausted, the empty clause must be a RUP inference of the remaining
//! clauses. The first step that fails decides the verdict.

use crate::{
    clause::{Clause, ProofRecord, ProofStep},
    clausestore::ClauseStore,
    error::{Error, Failure, Obligation},
    literal::Literal,
    memory::{format_memory_usage, HeapSpace},
    output::print_key_value,
    parser::Formula,
    rup::{check_rup, Outcome},
};

/// A failed step carries the failing model, if there is one.
type StepResult = Result<(), (Error, Vec<Literal>)>;

/// Where a checking run is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The store holds the formula, no proof step was applied yet.
    Ready,
    /// Some proof steps were applied successfully.
    Replaying,
    /// The empty clause was derived.
    Verified,
    /// Some step failed; nothing more can be applied.
    Failed,
}

/// The result of a checking run
#[derive(Debug)]
pub enum Verdict {
    Verified,
    Failed(Failure),
}

impl Verdict {
    pub fn is_verified(&self) -> bool {
        match self {
            Verdict::Verified => true,
            Verdict::Failed(_) => false,
        }
    }
    /// The exit code of `drup-check` for this verdict.
    pub fn exit_code(&self) -> i32 {
        if self.is_verified() {
            0
        } else {
            1
        }
    }
}

/// The proof checker
#[derive(Debug)]
pub struct Checker {
    /// The active clauses
    store: ClauseStore,
    state: State,
    /// How much to log: 0 is quiet, 1 prints one line per proof step.
    pub verbosity: u64,
    /// Number of proof steps that were applied.
    pub proof_steps: usize,
    /// Size of the input formula.
    pub premise_clauses: usize,
    /// Number of verified RUP inferences.
    pub rup_additions: usize,
    /// Number of deletions that were applied.
    pub deletions: usize,
}

impl Checker {
    /// Instantiate the checker with every clause of the formula active.
    pub fn new(formula: &Formula, verbosity: u64) -> Checker {
        Checker {
            store: ClauseStore::from_formula(formula),
            state: State::Ready,
            verbosity,
            proof_steps: 0,
            premise_clauses: formula.clauses.len(),
            rup_additions: 0,
            deletions: 0,
        }
    }
    pub fn state(&self) -> State {
        self.state
    }
    pub fn store(&self) -> &ClauseStore {
        &self.store
    }
    /// Apply a single proof step; `step` is its position in the proof,
    /// counting from 1.
    pub fn apply(&mut self, step: usize, record: &ProofRecord) -> Result<(), Failure> {
        requires!(self.state == State::Ready || self.state == State::Replaying);
        self.state = State::Replaying;
        self.proof_steps += 1;
        let result = match &record.step {
            ProofStep::Deletion(clause) => self.delete(clause),
            ProofStep::Addition(clause) => self.add(clause),
        };
        match result {
            Ok(()) => {
                log!(self, 1, "OK (active: {}) {}", self.store.len(), record.step);
                Ok(())
            }
            Err((error, failing_model)) => {
                log!(self, 1, "FAILED (active: {}) {}", self.store.len(), record.step);
                self.state = State::Failed;
                Err(Failure {
                    failing_model,
                    ..Failure::at(step, record.line, error)
                })
            }
        }
    }
    /// Check that the empty clause follows from the remaining clauses.
    pub fn finish(&mut self) -> Result<(), Failure> {
        requires!(self.state == State::Ready || self.state == State::Replaying);
        match check_rup(self.store.active_clauses(), &Clause::empty()) {
            Outcome::Accepted(justification) => {
                log!(self, 1, "empty clause: {}", justification);
                self.state = State::Verified;
                Ok(())
            }
            Outcome::Rejected { failing_model } => {
                self.state = State::Failed;
                Err(Failure {
                    failing_model,
                    ..Failure::global(Error::Verification(Obligation::EmptyClause))
                })
            }
        }
    }
    /// Replay the whole proof and decide.
    pub fn run(&mut self, proof: &[ProofRecord]) -> Verdict {
        for (offset, record) in proof.iter().enumerate() {
            if let Err(failure) = self.apply(offset + 1, record) {
                return Verdict::Failed(failure);
            }
        }
        match self.finish() {
            Ok(()) => Verdict::Verified,
            Err(failure) => Verdict::Failed(failure),
        }
    }
    fn delete(&mut self, clause: &Clause) -> StepResult {
        self.store.remove(clause).map_err(|error| (error, Vec::new()))?;
        self.deletions += 1;
        Ok(())
    }
    fn add(&mut self, clause: &Clause) -> StepResult {
        match check_rup(self.store.active_clauses(), clause) {
            Outcome::Accepted(justification) => {
                log!(self, 2, "{} is implied: {}", clause, justification);
                self.store.insert(clause);
                self.rup_additions += 1;
                Ok(())
            }
            Outcome::Rejected { failing_model } => Err((
                Error::Verification(Obligation::Lemma(clause.clone())),
                failing_model,
            )),
        }
    }
    /// Print the statistics as `c key: value` lines.
    pub fn print_statistics(&self) {
        print_key_value("premise clauses", self.premise_clauses);
        print_key_value("proof steps", self.proof_steps);
        print_key_value("RUP introductions", self.rup_additions);
        print_key_value("deletions", self.deletions);
        print_key_value("active clauses", self.store.len());
    }
    /// Print the memory held by the clause store.
    pub fn print_memory_usage(&self) {
        print_key_value(
            "memory-clause-store",
            format_memory_usage(self.store.heap_space()),
        );
    }
}

/// Check a proof for a formula, quietly.
pub fn check(formula: &Formula, proof: &[ProofRecord]) -> Verdict {
    Checker::new(formula, 0).run(proof)
}
