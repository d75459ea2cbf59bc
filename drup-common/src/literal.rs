//! Variable and literal representations

use crate::memory::{HeapSpace, Offset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use static_assertions::const_assert;
use std::{fmt, fmt::Display, mem::size_of, ops};

/// A boolean variable, the magnitude of a literal.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash, Default)]
pub struct Variable(pub u32);

/// A signed reference to a variable.
///
/// Literal `v` is stored as `2 * |v| + (v < 0)`, so negation flips the lowest
/// bit and sorting keeps both polarities of a variable next to each other.
/// ```
/// # use drup_common::literal::Literal;
/// assert_eq!(-Literal::new(3), Literal::new(-3));
/// assert!(Literal::new(2) < Literal::new(-2));
/// assert!(Literal::new(-2) < Literal::new(3));
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Default)]
pub struct Literal {
    encoding: u32,
}

const_assert!(size_of::<Literal>() == 4);

impl Variable {
    pub fn new(value: u32) -> Variable {
        Variable(value)
    }
    /// The positive literal of this variable.
    pub fn literal(self) -> Literal {
        Literal::from_raw(self.0 * 2)
    }
}

impl Offset for Variable {
    fn as_offset(&self) -> usize {
        self.0 as usize
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Literal {
    /// The clause terminator. Never part of a clause.
    pub const ZERO: Literal = Literal { encoding: 0 };

    /// Construct a new literal from the usual signed representation.
    pub fn new(value: i32) -> Literal {
        Literal {
            encoding: value.unsigned_abs() * 2 + (value < 0) as u32,
        }
    }
    pub fn from_raw(encoding: u32) -> Literal {
        Literal { encoding }
    }
    /// Convert back to the signed representation.
    pub fn decode(self) -> i32 {
        let magnitude = self.variable().0 as i32;
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
    pub fn variable(self) -> Variable {
        Variable(self.encoding / 2)
    }
    pub fn is_negative(self) -> bool {
        self.encoding & 1 != 0
    }
    pub fn is_zero(self) -> bool {
        self.encoding == 0
    }
}

impl Offset for Literal {
    fn as_offset(&self) -> usize {
        self.encoding as usize
    }
}

impl HeapSpace for Literal {
    fn heap_space(&self) -> usize {
        0
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.decode())
    }
}

impl ops::Neg for Literal {
    type Output = Literal;
    fn neg(self) -> Literal {
        Literal {
            encoding: self.encoding ^ 1,
        }
    }
}

// Reports show literals the way DIMACS writes them.
impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.decode())
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Literal, D::Error> {
        i32::deserialize(deserializer).map(Literal::new)
    }
}
