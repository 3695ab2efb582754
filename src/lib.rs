//! Solutions for the 2022 Advent of Code calendar.
//!
//! Every day lives in its own module under [`days`] and implements the
//! [`DaySolver`] contract. The [`registry`] binds day numbers to their
//! prompts, sample tests and solver, and the [`harness`] runs samples before
//! solving the real puzzle input.

pub mod days;
mod error;
pub mod harness;
pub mod helpers;
pub mod registry;
mod solver;
pub mod visualize;

pub use error::{Result, SolveError};
pub use solver::{Answer, DaySolver, Part};
pub use visualize::Visualization;

pub const ANSI_ITALIC: &str = "\x1b[3m";
pub const ANSI_BOLD: &str = "\x1b[1m";
pub const ANSI_RESET: &str = "\x1b[0m";

/// Prints a line, but only in debug builds.
#[macro_export]
macro_rules! debugln {
    ($($tt:tt)*) => {
        if cfg!(debug_assertions) {
            println!($($tt)*);
        }
    };
}

/// Prints without a newline, but only in debug builds.
#[macro_export]
macro_rules! debug {
    ($($tt:tt)*) => {
        if cfg!(debug_assertions) {
            print!($($tt)*);
        }
    };
}

/// Folds `\r\n` line endings into `\n`.
pub fn normalize_input(raw: &str) -> String {
    raw.replace("\r\n", "\n")
}
