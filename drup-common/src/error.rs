//! Errors that end a checking or compaction run

use crate::{clause::Clause, literal::Literal};
use std::{fmt, io};
use thiserror::Error;

/// The clause that an inference check was asked to justify
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Obligation {
    /// A lemma added by the proof.
    Lemma(Clause),
    /// The empty clause, checked after the last proof step.
    EmptyClause,
}

impl fmt::Display for Obligation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Obligation::Lemma(clause) => write!(f, "addition not RUP-justified: {}", clause),
            Obligation::EmptyClause => write!(f, "final formula not shown unsatisfiable"),
        }
    }
}

/// Everything that can go wrong; all of these are fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// A malformed line in the formula or proof.
    #[error("{message} at line {line} column {column}")]
    Format {
        message: &'static str,
        line: usize,
        column: usize,
    },
    /// Deletion of a clause that is not active.
    #[error("deletion of clause never present: {0}")]
    MissingClause(Clause),
    /// A multiplicity that would drop below zero.
    #[error("more deletions than additions of clause: {0}")]
    Underflow(Clause),
    /// An inference that fails the RUP check.
    #[error("{0}")]
    Verification(Obligation),
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("failed to write report: {0}")]
    Report(#[from] toml::ser::Error),
}

impl Error {
    /// The clause that caused this error, if any.
    pub fn clause(&self) -> Option<&Clause> {
        match self {
            Error::MissingClause(clause)
            | Error::Underflow(clause)
            | Error::Verification(Obligation::Lemma(clause)) => Some(clause),
            Error::Verification(Obligation::EmptyClause) => None,
            Error::Format { .. } | Error::Io(_) | Error::Report(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// An error, together with the proof step that triggered it
#[derive(Debug)]
pub struct Failure {
    /// The offending proof step, counting from 1 (`None` for the final check)
    pub proof_step: Option<usize>,
    /// The line of that proof step in the proof file
    pub line: Option<usize>,
    pub error: Error,
    /// The assignment after propagation, when an inference check failed
    pub failing_model: Vec<Literal>,
}

impl Failure {
    /// A failure that cannot be attributed to a single proof step.
    pub fn global(error: Error) -> Failure {
        Failure {
            proof_step: None,
            line: None,
            error,
            failing_model: Vec::new(),
        }
    }
    /// A failure at the given (1-based) proof step.
    pub fn at(proof_step: usize, line: usize, error: Error) -> Failure {
        Failure {
            proof_step: Some(proof_step),
            line: Some(line),
            error,
            failing_model: Vec::new(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

impl From<Error> for Failure {
    fn from(error: Error) -> Failure {
        Failure::global(error)
    }
}

impl From<io::Error> for Failure {
    fn from(error: io::Error) -> Failure {
        Failure::global(Error::Io(error))
    }
}
