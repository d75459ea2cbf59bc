//! Clauses and proof steps

use crate::{
    literal::Literal,
    memory::{HeapSpace, Offset},
};
use std::{
    fmt,
    hash::{Hash, Hasher},
    io::{self, Write},
    slice,
};

/// A disjunction of literals in canonical order
///
/// The literals are kept sorted and free of repetitions, so two clauses
/// compare equal exactly if they contain the same literals, no matter how
/// they were written in the input.
/// ```
/// # use drup_common::clause::Clause;
/// assert_eq!(Clause::from_dimacs(&[1, 2]), Clause::from_dimacs(&[2, 1, 2]));
/// assert!(Clause::from_dimacs(&[]).is_empty());
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Default)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Create a clause in canonical form.
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Clause {
        let mut literals: Vec<Literal> = literals.into_iter().collect();
        requires!(literals.iter().all(|literal| !literal.is_zero()));
        literals.sort_unstable();
        literals.dedup();
        literals.shrink_to_fit();
        Clause { literals }
    }
    /// Create a clause from signed integers, without terminating zero.
    pub fn from_dimacs(literals: &[i32]) -> Clause {
        Clause::new(literals.iter().cloned().map(Literal::new))
    }
    /// The clause without literals.
    pub fn empty() -> Clause {
        Clause::default()
    }
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }
    pub fn iter(&self) -> slice::Iter<'_, Literal> {
        self.literals.iter()
    }
    pub fn len(&self) -> usize {
        self.literals.len()
    }
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
    /// The literals in their signed representation.
    pub fn to_dimacs(&self) -> Vec<i32> {
        self.iter().map(|literal| literal.decode()).collect()
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = slice::Iter<'a, Literal>;
    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

/// Only the canonical literal sequence is hashed, so this agrees with `Eq`.
impl Hash for Clause {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        clause_hash(&self.literals).hash(hasher);
    }
}

impl HeapSpace for Clause {
    fn heap_space(&self) -> usize {
        self.literals.heap_space()
    }
}

/// Write the clause in DIMACS format, like `1 -2 0`.
impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for literal in &self.literals {
            write!(f, "{} ", literal)?;
        }
        write!(f, "0")
    }
}

/// Compute the hash of a clause. This is the same hash function `drat-trim` uses.
fn clause_hash(clause: &[Literal]) -> usize {
    let mut sum: usize = 0;
    let mut prod: usize = 1;
    let mut xor: usize = 0;
    for &literal in clause {
        prod = prod.wrapping_mul(literal.as_offset());
        sum = sum.wrapping_add(literal.as_offset());
        xor ^= literal.as_offset();
    }
    (1023usize.wrapping_mul(sum).wrapping_add(prod)) ^ (31usize.wrapping_mul(xor))
}

/// A clause introduction or deletion
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ProofStep {
    Addition(Clause),
    Deletion(Clause),
}

impl ProofStep {
    /// Return true if this proof step is a clause deletion.
    pub fn is_deletion(&self) -> bool {
        match self {
            ProofStep::Addition(_) => false,
            ProofStep::Deletion(_) => true,
        }
    }
    /// Return the clause that this proof step introduces or deletes.
    pub fn clause(&self) -> &Clause {
        match self {
            ProofStep::Addition(clause) | ProofStep::Deletion(clause) => clause,
        }
    }
}

/// Writes the step the way it appears in a proof file, like `d 1 2 0`.
impl fmt::Display for ProofStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProofStep::Addition(clause) => write!(f, "{}", clause),
            ProofStep::Deletion(clause) => write!(f, "d {}", clause),
        }
    }
}

/// A proof step together with the line it was read from.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ProofRecord {
    pub step: ProofStep,
    /// Line number in the proof file, starting at 1
    pub line: usize,
    /// The literals in the order they were written; the first one may be a
    /// RAT pivot.
    pub written: Vec<Literal>,
}

impl ProofRecord {
    /// Create a record from the literals of a proof line.
    pub fn parsed(deletion: bool, written: Vec<Literal>, line: usize) -> ProofRecord {
        let clause = Clause::new(written.iter().cloned());
        ProofRecord {
            step: if deletion {
                ProofStep::Deletion(clause)
            } else {
                ProofStep::Addition(clause)
            },
            line,
            written,
        }
    }
    pub fn addition(clause: Clause, line: usize) -> ProofRecord {
        ProofRecord {
            written: clause.literals().to_vec(),
            step: ProofStep::Addition(clause),
            line,
        }
    }
    pub fn deletion(clause: Clause, line: usize) -> ProofRecord {
        ProofRecord {
            written: clause.literals().to_vec(),
            step: ProofStep::Deletion(clause),
            line,
        }
    }
    pub fn is_deletion(&self) -> bool {
        self.step.is_deletion()
    }
    pub fn clause(&self) -> &Clause {
        self.step.clause()
    }
}

impl HeapSpace for ProofRecord {
    fn heap_space(&self) -> usize {
        self.clause().heap_space() + self.written.heap_space()
    }
}

/// Write a proof record in DRAT format with its literals as written,
/// followed by a newline.
pub fn write_record(file: &mut impl Write, record: &ProofRecord) -> io::Result<()> {
    if record.is_deletion() {
        write!(file, "d ")?;
    }
    write_clause(file, &record.written)?;
    writeln!(file)
}

/// Write some literals in DIMACS format.
///
/// Includes a terminating 0, but no newline.
pub fn write_clause<'a, T>(file: &mut impl Write, clause: T) -> io::Result<()>
where
    T: IntoIterator<Item = &'a Literal>,
{
    for &literal in clause {
        write!(file, "{} ", literal)?;
    }
    write!(file, "0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(clause: &Clause) -> u64 {
        let mut hasher = DefaultHasher::new();
        clause.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn literal_order_does_not_matter() {
        let a = Clause::from_dimacs(&[1, 2]);
        let b = Clause::from_dimacs(&[2, 1]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.to_dimacs(), vec![1, 2]);
    }

    #[test]
    fn repeated_literals_collapse() {
        let clause = Clause::from_dimacs(&[-3, 1, -3]);
        assert_eq!(clause.len(), 2);
        assert_eq!(clause.to_string(), "1 -3 0");
    }

    #[test]
    fn polarity_distinguishes_clauses() {
        assert_ne!(Clause::from_dimacs(&[1, -2]), Clause::from_dimacs(&[-1, 2]));
    }

    #[test]
    fn proof_steps_print_like_drat() {
        let clause = Clause::from_dimacs(&[2, -1]);
        assert_eq!(ProofStep::Addition(clause.clone()).to_string(), "-1 2 0");
        assert_eq!(ProofStep::Deletion(clause).to_string(), "d -1 2 0");
        assert_eq!(ProofStep::Addition(Clause::empty()).to_string(), "0");
        let mut buffer = Vec::new();
        write_clause(&mut buffer, Clause::from_dimacs(&[3, -4]).iter()).unwrap();
        assert_eq!(buffer, b"3 -4 0");
    }

    #[test]
    fn records_keep_the_written_order() {
        let literals = vec![Literal::new(3), Literal::new(-1), Literal::new(3)];
        let record = ProofRecord::parsed(true, literals, 7);
        assert_eq!(record.clause(), &Clause::from_dimacs(&[-1, 3]));
        let mut buffer = Vec::new();
        write_record(&mut buffer, &record).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "d 3 -1 3 0\n");
    }
}
