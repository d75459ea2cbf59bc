//! File reader

use crate::error::{Error, Result};
use std::iter::Peekable;

/// A peekable iterator for bytes that records line and column information.
pub struct Input<'a> {
    /// The source of the input data
    source: Peekable<Box<dyn Iterator<Item = u8> + 'a>>,
    /// The current line number
    line: usize,
    /// The current column
    column: usize,
}

impl<'a> Input<'a> {
    /// Create a new `Input` from some source
    pub fn new(source: Box<dyn Iterator<Item = u8> + 'a>) -> Self {
        Input {
            source: source.peekable(),
            line: 1,
            column: 1,
        }
    }
    /// Create an `Input` reading from a string, used for tests and small inputs.
    pub fn from_text(text: &'a str) -> Self {
        Input::new(Box::new(text.bytes()))
    }
    /// Look at the next byte without consuming it
    pub fn peek(&mut self) -> Option<u8> {
        self.source.peek().cloned()
    }
    /// The line of the next byte.
    pub fn line(&self) -> usize {
        self.line
    }
    /// Create a format error with the given message and position information.
    pub fn error(&self, why: &'static str) -> Error {
        Error::Format {
            message: why,
            line: self.line,
            column: self.column,
        }
    }

    /// Parse a decimal number.
    ///
    /// Consumes an optional minus sign and one or more decimal digits,
    /// returning the value of the resulting number on success. Fails if there
    /// is no digit, if the number is glued to something that is not
    /// whitespace, or if it does not lie within the range
    /// [-i32::MAX , i32::MAX].
    pub fn parse_dec32(&mut self) -> Result<i32> {
        let sign = self.peek() == Some(b'-');
        if sign {
            self.next();
        }
        if !self.peek().map_or(false, Self::is_digit) {
            return Err(self.error(Self::NUMBER));
        }
        let mut value: i32 = 0;
        while let Some(c) = self.peek() {
            if !Self::is_digit(c) {
                break;
            }
            // Does not unnecessarily overflow because of the order of operations
            value = value
                .checked_mul(10)
                .and_then(|val| val.checked_add(i32::from(c - b'0')))
                .ok_or_else(|| self.error(Self::OVERFLOW))?;
            self.next();
        }
        if self.peek().map_or(false, |c| !Self::is_space(c)) {
            return Err(self.error(Self::NUMBER));
        }
        // Does not unnecessarily overflow because the positive range is smaller than the negative range
        Ok(if sign { -value } else { value })
    }

    /// Like parse_dec32, but rejects negative numbers and allows the full `u64` range.
    pub fn parse_unsigned(&mut self) -> Result<u64> {
        if !self.peek().map_or(false, Self::is_digit) {
            return Err(self.error(Self::NUMBER));
        }
        let mut value: u64 = 0;
        while let Some(c) = self.peek() {
            if !Self::is_digit(c) {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|val| val.checked_add(u64::from(c - b'0')))
                .ok_or_else(|| self.error(Self::OVERFLOW))?;
            self.next();
        }
        if self.peek().map_or(false, |c| !Self::is_space(c)) {
            return Err(self.error(Self::NUMBER));
        }
        Ok(value)
    }

    /// Parse zero or more spaces or linebreaks.
    pub fn skip_any_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !Self::is_space(c) {
                break;
            }
            self.next();
        }
    }

    /// Parse zero or more spaces within the current line.
    pub fn skip_blanks(&mut self) {
        while let Some(c) = self.peek() {
            if !Self::is_blank(c) {
                break;
            }
            self.next();
        }
    }

    /// Skip blanks, returning an error if there was none.
    pub fn skip_some_blanks(&mut self) -> Result<()> {
        if !self.peek().map_or(false, Self::is_blank) {
            return Err(self.error(Self::SPACE));
        }
        self.skip_blanks();
        Ok(())
    }

    /// Consume the exact bytes in `expected`.
    pub fn expect(&mut self, expected: &[u8], why: &'static str) -> Result<()> {
        for &byte in expected {
            if self.peek() != Some(byte) {
                return Err(self.error(why));
            }
            self.next();
        }
        Ok(())
    }

    /// Consume trailing blanks and the line break, failing if anything else
    /// is left on this line.
    pub fn finish_line(&mut self) -> Result<()> {
        self.skip_blanks();
        match self.peek() {
            None => Ok(()),
            Some(b'\n') => {
                self.next();
                Ok(())
            }
            Some(_) => Err(self.error(Self::NEWLINE)),
        }
    }

    /// Consume everything up to and including the next line break.
    pub fn skip_line(&mut self) {
        while let Some(c) = self.next() {
            if c == b'\n' {
                return;
            }
        }
    }

    /// Returns true if the rest of the current line has no content.
    pub fn at_end_of_line(&mut self) -> bool {
        self.peek().map_or(true, |c| c == b'\n' || c == b'\r')
    }

    // Error messages.
    /// A numeric overflow. This should only happen for user input.
    pub const OVERFLOW: &'static str = "overflow while parsing number";
    /// Parser error (`expected ...`)
    pub const NUMBER: &'static str = "expected number";
    /// Parser error (`expected ...`)
    pub const SPACE: &'static str = "expected space";
    /// Parser error (`expected ...`)
    pub const P_CNF: &'static str = "expected \"p cnf\"";
    /// Parser error (`expected ...`)
    pub const DRAT: &'static str = "expected DRAT instruction";
    /// Parser error (`expected ...`)
    pub const NEWLINE: &'static str = "expected newline";
    /// Parser error (`expected ...`)
    pub const TERMINATOR: &'static str = "expected terminating 0";
    /// Parser error
    pub const DUPLICATE_HEADER: &'static str = "duplicate \"p cnf\" header";

    /// Check if a character is a decimal digit.
    pub fn is_digit(value: u8) -> bool {
        value >= b'0' && value <= b'9'
    }

    /// Check if a character is a decimal digit or a dash.
    pub fn is_digit_or_dash(value: u8) -> bool {
        Self::is_digit(value) || value == b'-'
    }

    /// Returns true if the character separates tokens within a line.
    pub fn is_blank(c: u8) -> bool {
        [b' ', b'\t', b'\r'].iter().any(|&s| s == c)
    }

    /// Returns true if the character is one of the whitespace characters we allow.
    pub fn is_space(c: u8) -> bool {
        c == b'\n' || Self::is_blank(c)
    }
}

impl Iterator for Input<'_> {
    type Item = u8;
    fn next(&mut self) -> Option<u8> {
        self.source.next().map(|c| {
            if c == b'\n' {
                self.line += 1;
                self.column = 0;
            }
            self.column += 1;
            c
        })
    }
}
