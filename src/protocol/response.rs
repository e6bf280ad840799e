//! Response definitions
//!
//! What a command hands back to the shell for printing.

use std::io::Write;

use crate::error::Result;

/// Output of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Value returned by `get`
    Value(i32),

    /// Rendered buffer from `dump`
    Dump(String),

    /// Commands that print nothing
    Empty,
}

impl Response {
    /// Write the response as a line, or nothing for `Empty`
    pub fn render<W: Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            Response::Value(value) => writeln!(writer, "{}", value)?,
            Response::Dump(text) => writeln!(writer, "{}", text)?,
            Response::Empty => {}
        }
        Ok(())
    }

    pub fn value(&self) -> Option<i32> {
        match self {
            Response::Value(value) => Some(*value),
            _ => None,
        }
    }
}
