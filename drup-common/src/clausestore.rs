//! Multiset of active clauses

use crate::{
    clause::Clause,
    error::{Error, Result},
    memory::HeapSpace,
    parser::Formula,
};
use std::collections::HashMap;

/// Maps each active clause to the number of copies that are currently added.
///
/// A clause is active iff it has at least one copy. Copies beyond the first
/// carry no meaning for propagation, they only matter when counting
/// deletions. Every change goes through [`insert`](#method.insert) and
/// [`remove`](#method.remove), so a multiplicity can never become negative.
/// ```
/// # use drup_common::{clause::Clause, clausestore::ClauseStore};
/// let mut store = ClauseStore::new();
/// store.insert(&Clause::from_dimacs(&[1, 2]));
/// assert!(store.contains(&Clause::from_dimacs(&[2, 1])));
/// assert!(store.remove(&Clause::from_dimacs(&[2, 1])).is_ok());
/// assert!(store.remove(&Clause::from_dimacs(&[1, 2])).is_err());
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClauseStore {
    /// Clauses with multiplicity zero are not stored.
    multiplicity: HashMap<Clause, usize>,
    /// Sum of all multiplicities
    copies: usize,
}

impl ClauseStore {
    pub fn new() -> ClauseStore {
        ClauseStore::default()
    }
    /// Add one copy of each clause of the formula.
    pub fn from_formula(formula: &Formula) -> ClauseStore {
        let mut store = ClauseStore::new();
        for clause in &formula.clauses {
            store.insert(clause);
        }
        store
    }
    /// Add a copy of a clause.
    pub fn insert(&mut self, clause: &Clause) {
        match self.multiplicity.get_mut(clause) {
            Some(count) => *count += 1,
            None => {
                self.multiplicity.insert(clause.clone(), 1);
            }
        }
        self.copies += 1;
    }
    /// Remove a copy of a clause.
    ///
    /// Fails with [`Error::MissingClause`](../error/enum.Error.html) if the
    /// clause is not active.
    pub fn remove(&mut self, clause: &Clause) -> Result<()> {
        let remaining = match self.multiplicity.get_mut(clause) {
            None | Some(0) => return Err(Error::MissingClause(clause.clone())),
            Some(count) => {
                *count = count
                    .checked_sub(1)
                    .ok_or_else(|| Error::Underflow(clause.clone()))?;
                *count
            }
        };
        if remaining == 0 {
            self.multiplicity.remove(clause);
        }
        invariant!(self.copies > 0);
        self.copies -= 1;
        Ok(())
    }
    /// Return true if at least one copy of the clause is present.
    pub fn contains(&self, clause: &Clause) -> bool {
        self.multiplicity(clause) > 0
    }
    /// The number of copies of a clause.
    pub fn multiplicity(&self, clause: &Clause) -> usize {
        self.multiplicity.get(clause).cloned().unwrap_or(0)
    }
    /// Each active clause, once.
    pub fn active_clauses(&self) -> impl Iterator<Item = &Clause> {
        self.multiplicity
            .iter()
            .filter(|&(_clause, &count)| count > 0)
            .map(|(clause, _count)| clause)
    }
    /// The number of distinct active clauses.
    pub fn len(&self) -> usize {
        self.multiplicity.len()
    }
    pub fn is_empty(&self) -> bool {
        self.multiplicity.is_empty()
    }
    /// The number of copies of all active clauses.
    pub fn copies(&self) -> usize {
        self.copies
    }
}

impl HeapSpace for ClauseStore {
    fn heap_space(&self) -> usize {
        self.multiplicity.heap_space()
    }
}
