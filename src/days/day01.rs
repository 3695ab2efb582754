//! Day 1: Calorie Counting

use crate::helpers::{checked, paragraphs, parse, IteratorExt};
use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/01.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Elf {
    pub total_calories: u64,
}

/// One elf per blank-line separated group of calorie counts.
pub fn parse_elves(input: &str) -> Result<Vec<Elf>> {
    paragraphs(input)
        .map(|paragraph| {
            let mut total_calories = 0u64;
            for (line_number, line) in paragraph.numbered() {
                let calories = parse::numbered_line(line_number, line, parse::decimal_integer())?;
                total_calories = checked::add(total_calories, calories)?;
            }
            Ok(Elf { total_calories })
        })
        .collect()
}

/// Total calories carried by the elf carrying the most.
pub fn part_one(elves: &[Elf]) -> Option<u64> {
    elves.iter().max().map(|elf| elf.total_calories)
}

/// Total calories carried by the three elves carrying the most.
pub fn part_two(elves: &[Elf]) -> u64 {
    let top = elves.iter().copied().max_n(3);
    debugln!("Top three elves: {top:?}");
    top.into_iter().map(|elf| elf.total_calories).sum()
}

fn calorie_chart(elves: &[Elf]) -> Visualization {
    Visualization::bars(
        "Calories carried per elf",
        "elf",
        "calories",
        elves.iter().map(|elf| elf.total_calories as f64),
    )
}

pub struct CalorieCounting;

impl DaySolver for CalorieCounting {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let elves = parse_elves(input)?;
        let most = part_one(&elves).ok_or_else(|| SolveError::structure("no elves in the input"))?;
        Ok(Answer::new(most).with_visualization(calorie_chart(&elves)))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let elves = parse_elves(input)?;
        Ok(Answer::new(part_two(&elves)).with_visualization(calorie_chart(&elves)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_one() {
        let elves = parse_elves(EXAMPLE).unwrap();
        assert_eq!(elves.len(), 5);
        assert_eq!(part_one(&elves), Some(24000));
    }

    #[test]
    fn test_part_two() {
        let elves = parse_elves(EXAMPLE).unwrap();
        assert_eq!(part_two(&elves), 45000);
    }

    #[test]
    fn fewer_than_three_elves() {
        let elves = parse_elves("5\n\n7").unwrap();
        assert_eq!(part_two(&elves), 12);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(CalorieCounting.part_one("").is_err());
    }

    #[test]
    fn bad_line_is_reported() {
        let err = parse_elves("100\n\n200\n2x0\n").unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 4, .. }), "{err:?}");
    }
}
