//! A partial assignment.

use crate::{
    literal::{Literal, Variable},
    memory::HeapSpace,
};
use std::{collections::HashSet, fmt, fmt::Display, ops::Index, slice};

/// An assignment comprising a set of literals plus a trail (stack of literals).
///
/// Literals are only ever added. It is valid to assign both a literal and its
/// negation - this is how we detect a conflict.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    /// The assigned literals; its size is bounded by the trail, not by the
    /// largest variable.
    assigned: HashSet<Literal>,
    /// Assigned literals, in chronologic order.
    trail: Vec<Literal>,
    /// The first variable that was assigned both ways
    conflict: Option<Variable>,
}

impl Assignment {
    /// Create an empty assignment.
    pub fn new() -> Assignment {
        Assignment::default()
    }
    /// Create an assignment where the given literals are true.
    pub fn from_literals(literals: impl IntoIterator<Item = Literal>) -> Assignment {
        let mut assignment = Assignment::new();
        for literal in literals {
            assignment.assign(literal);
        }
        assignment
    }
    /// Return the number of assigned literals.
    pub fn len(&self) -> usize {
        self.trail.len()
    }
    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }
    /// Assign a literal to true. Returns false if it was already assigned.
    pub fn assign(&mut self, literal: Literal) -> bool {
        requires!(!literal.is_zero());
        if !self.assigned.insert(literal) {
            return false;
        }
        self.trail.push(literal);
        if self.conflict.is_none() && self[-literal] {
            self.conflict = Some(literal.variable());
        }
        true
    }
    /// Return true if the literal is assigned false.
    pub fn falsifies(&self, literal: Literal) -> bool {
        self[-literal]
    }
    /// The first variable that has been assigned both polarities.
    pub fn conflict(&self) -> Option<Variable> {
        self.conflict
    }
    /// The assigned literals, oldest first.
    pub fn trail(&self) -> &[Literal] {
        &self.trail
    }
}

/// Iterate over the literals in the trail, from oldest to newest.
impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Literal;
    type IntoIter = slice::Iter<'a, Literal>;
    fn into_iter(self) -> Self::IntoIter {
        self.trail.iter()
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Assignment: {}", self.len())?;
        for literal in self {
            write!(f, " {}", literal)?;
        }
        Ok(())
    }
}

impl Index<Literal> for Assignment {
    type Output = bool;
    fn index(&self, literal: Literal) -> &bool {
        if self.assigned.contains(&literal) {
            &true
        } else {
            &false
        }
    }
}

impl HeapSpace for Assignment {
    fn heap_space(&self) -> usize {
        self.assigned.heap_space() + self.trail.heap_space()
    }
}
