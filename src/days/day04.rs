//! Day 4: Camp Cleanup

use std::fmt;
use std::ops::RangeInclusive;

use crate::helpers::parse;
use crate::{debugln, Answer, DaySolver, Result, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/04.txt");

/// The section IDs one elf is assigned to clean. `start <= end` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    range: RangeInclusive<u32>,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.range.start(), self.range.end())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub assignments: [Assignment; 2],
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.assignments[0], self.assignments[1])
    }
}

impl Assignment {
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start <= end).then(|| Self { range: start..=end })
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        let a = &self.range;
        let b = &other.range;
        !(a.start() > b.end() || b.start() > a.end())
    }

    pub fn fully_contains(&self, other: &Self) -> bool {
        let a = &self.range;
        let b = &other.range;
        a.start() <= b.start() && a.end() >= b.end()
    }
}

impl Pair {
    pub fn one_contains_the_other(&self) -> bool {
        let [a, b] = &self.assignments;
        a.fully_contains(b) || b.fully_contains(a)
    }

    pub fn overlapping(&self) -> bool {
        let [a, b] = &self.assignments;
        a.overlaps(b)
    }

    pub fn swapped(&self) -> Self {
        let [a, b] = self.assignments.clone();
        Self {
            assignments: [b, a],
        }
    }
}

pub fn parse_pairs(input: &str) -> Result<Vec<Pair>> {
    parse::lines(input, Pair::parser)
}

pub fn part_one(pairs: &[Pair]) -> usize {
    pairs
        .iter()
        .filter(|pair| pair.one_contains_the_other())
        .inspect(|pair| debugln!("containing pair: {pair}"))
        .count()
}

pub fn part_two(pairs: &[Pair]) -> usize {
    pairs
        .iter()
        .filter(|pair| pair.overlapping())
        .inspect(|pair| debugln!("overlapping pair: {pair}"))
        .count()
}

fn matching_pairs(pairs: &[Pair], matches: impl Fn(&Pair) -> bool) -> Visualization {
    let body = pairs
        .iter()
        .map(|pair| format!("{} {pair}", if matches(pair) { '*' } else { ' ' }))
        .collect::<Vec<_>>()
        .join("\n");
    Visualization::text("Assignment pairs (* = counted)", body)
}

pub struct CampCleanup;

impl DaySolver for CampCleanup {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let pairs = parse_pairs(input)?;
        let viz = matching_pairs(&pairs, Pair::one_contains_the_other);
        Ok(Answer::new(part_one(&pairs)).with_visualization(viz))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let pairs = parse_pairs(input)?;
        let viz = matching_pairs(&pairs, Pair::overlapping);
        Ok(Answer::new(part_two(&pairs)).with_visualization(viz))
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::*;
    }

    use c::error::StreamError;
    use c::stream::StreamErrorFor;
    use c::{ParseError, Parser, Stream};

    impl Assignment {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            (parse::decimal_integer(), c::token('-'), parse::decimal_integer()).and_then(
                |(start, _, end)| {
                    Assignment::new(start, end).ok_or_else(|| {
                        StreamErrorFor::<Input>::message_format(format!(
                            "range {start}-{end} ends before it starts"
                        ))
                    })
                },
            )
        }
    }

    impl Pair {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            (Assignment::parser(), c::token(','), Assignment::parser()).map(|(a, _, b)| Pair {
                assignments: [a, b],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolveError;
    use proptest::prelude::*;

    #[test]
    fn test_part_one() {
        let pairs = parse_pairs(EXAMPLE).unwrap();
        assert_eq!(part_one(&pairs), 2);
    }

    #[test]
    fn test_part_two() {
        let pairs = parse_pairs(EXAMPLE).unwrap();
        assert_eq!(part_two(&pairs), 4);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = parse_pairs("1-2,3-4\n5-3,1-1\n").unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn touching_ranges_overlap() {
        let pair = parse_pairs("5-7,7-9").unwrap().remove(0);
        assert!(pair.overlapping());
        assert!(!pair.one_contains_the_other());
    }

    fn assignment() -> impl Strategy<Value = Assignment> {
        (0u32..100, 0u32..100)
            .prop_map(|(a, b)| Assignment::new(a.min(b), a.max(b)).unwrap())
    }

    proptest! {
        #[test]
        fn checks_are_symmetric(a in assignment(), b in assignment()) {
            let pair = Pair { assignments: [a, b] };
            let swapped = pair.swapped();
            prop_assert_eq!(pair.one_contains_the_other(), swapped.one_contains_the_other());
            prop_assert_eq!(pair.overlapping(), swapped.overlapping());
        }

        #[test]
        fn display_parses_back(a in assignment(), b in assignment()) {
            let pair = Pair { assignments: [a, b] };
            prop_assert_eq!(parse_pairs(&pair.to_string()).unwrap(), vec![pair]);
        }
    }
}
