use std::fmt;

use crate::{Result, Visualization};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Part {
    One,
    Two,
}

impl Part {
    pub const BOTH: [Part; 2] = [Part::One, Part::Two];

    pub fn number(self) -> u8 {
        match self {
            Part::One => 1,
            Part::Two => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Part::One),
            2 => Some(Part::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// The result of solving one part: the answer text, plus an optional
/// renderable view of how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub value: String,
    pub visualization: Option<Visualization>,
}

impl Answer {
    pub fn new(value: impl ToString) -> Self {
        Self {
            value: value.to_string(),
            visualization: None,
        }
    }

    pub fn with_visualization(mut self, visualization: Visualization) -> Self {
        self.visualization = Some(visualization);
        self
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// The two-part contract every day implements.
///
/// Solvers hold no state: each call parses `input` from scratch and drops its
/// model before returning.
pub trait DaySolver: Sync {
    fn part_one(&self, input: &str) -> Result<Answer>;

    fn part_two(&self, input: &str) -> Result<Answer>;

    fn solve(&self, part: Part, input: &str) -> Result<Answer> {
        match part {
            Part::One => self.part_one(input),
            Part::Two => self.part_two(input),
        }
    }
}
