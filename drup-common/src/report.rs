//! Rejection reports
//!
//! When a proof is rejected, `drup-check --report` writes a small TOML
//! document that locates the failure and carries the failing model, so that
//! the rejection can be inspected without rerunning the checker.

use crate::{error::Failure, literal::Literal};
use serde_derive::{Deserialize, Serialize};
use std::io::Write;

/// A description of why a proof was rejected.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct RejectionReport {
    /// The offending proof step, counting from 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_step: Option<usize>,
    /// The line of the offending proof step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub reason: String,
    /// The clause that could not be added or deleted
    pub clause: Vec<Literal>,
    /// The assignment after propagation when the RUP check failed
    pub failing_model: Vec<Literal>,
}

impl RejectionReport {
    pub fn from_failure(failure: &Failure) -> RejectionReport {
        RejectionReport {
            proof_step: failure.proof_step,
            line: failure.line,
            reason: failure.error.to_string(),
            clause: failure
                .error
                .clause()
                .map_or_else(Vec::new, |clause| clause.literals().to_vec()),
            failing_model: failure.failing_model.clone(),
        }
    }
    /// Serialize as TOML.
    pub fn write(&self, output: &mut impl Write) -> crate::error::Result<()> {
        let text = toml::to_string(self)?;
        output.write_all(text.as_bytes())?;
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clause::Clause,
        error::{Error, Obligation},
    };

    #[test]
    fn report_of_a_failed_lemma() {
        let failure = Failure {
            failing_model: vec![Literal::new(-3), Literal::new(2)],
            ..Failure::at(
                4,
                7,
                Error::Verification(Obligation::Lemma(Clause::from_dimacs(&[3, -2]))),
            )
        };
        let report = RejectionReport::from_failure(&failure);
        assert_eq!(report.proof_step, Some(4));
        assert_eq!(report.line, Some(7));
        assert_eq!(report.clause, vec![Literal::new(-2), Literal::new(3)]);
        let mut output = Vec::new();
        report.write(&mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("proof_step = 4"));
        assert!(text.contains("reason = \"addition not RUP-justified: -2 3 0\""));
        let parsed: RejectionReport = toml::from_str(&text).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn report_of_the_final_check() {
        let failure = Failure::global(Error::Verification(Obligation::EmptyClause));
        let report = RejectionReport::from_failure(&failure);
        let text = toml::to_string(&report).unwrap();
        assert!(!text.contains("proof_step"));
        assert!(!text.contains("line"));
        assert!(text.contains("clause = []"));
        assert_eq!(toml::from_str::<RejectionReport>(&text).unwrap(), report);
    }
}
