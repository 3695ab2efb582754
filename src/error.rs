use thiserror::Error;

use crate::Part;

/// Why a day could not produce an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// A record of the input did not match the day's grammar.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The input parsed, but violates the shape the puzzle requires.
    #[error("{0}")]
    Structure(String),

    /// Overflow, division by zero or an inexact division.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    #[error("part {0} has no solution yet")]
    Unsolved(Part),
}

impl SolveError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure(message.into())
    }

    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self::Arithmetic(message.into())
    }
}

pub type Result<T, E = SolveError> = std::result::Result<T, E>;
