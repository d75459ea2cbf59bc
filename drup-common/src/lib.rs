//! Internal modules for drup-check and the DRUP proof utilities

pub mod config;
#[macro_use]
pub mod macros;
pub mod output;
pub mod memory;
pub mod literal;
pub mod clause;
pub mod error;
pub mod input;
pub mod parser;
pub mod clausestore;
pub mod assignment;
pub mod propagation;
pub mod rup;
pub mod checker;
pub mod compactor;
pub mod report;

#[doc(hidden)]
pub use ansi_term;
