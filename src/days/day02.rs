//! Day 2: Rock Paper Scissors

use crate::helpers::parse;
use crate::{debugln, Answer, DaySolver, Result, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/02.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rock,
    Paper,
    Scissors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Loss,
    Draw,
    Win,
}

/// The second column of the strategy guide, before it is given a meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub theirs: Shape,
    pub response: Response,
}

impl Shape {
    const ALL: [Shape; 3] = [Shape::Rock, Shape::Paper, Shape::Scissors];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// The shape this one defeats.
    #[inline]
    pub fn beats(self) -> Shape {
        Self::ALL[(self.index() + 2) % 3]
    }

    /// The shape that defeats this one.
    #[inline]
    pub fn beaten_by(self) -> Shape {
        Self::ALL[(self.index() + 1) % 3]
    }

    pub fn score(self) -> u32 {
        self.index() as u32 + 1
    }
}

impl Outcome {
    pub fn of(mine: Shape, theirs: Shape) -> Outcome {
        if mine.beats() == theirs {
            Outcome::Win
        } else if theirs.beats() == mine {
            Outcome::Loss
        } else {
            Outcome::Draw
        }
    }

    pub fn score(self) -> u32 {
        match self {
            Outcome::Loss => 0,
            Outcome::Draw => 3,
            Outcome::Win => 6,
        }
    }
}

fn round_score(mine: Shape, theirs: Shape) -> u32 {
    let outcome = Outcome::of(mine, theirs);
    let score = mine.score() + outcome.score();
    debugln!("{mine:?} vs. {theirs:?} = {outcome:?} ({score})");
    score
}

impl Instruction {
    /// Score when the response names the shape to play.
    pub fn score_as_shape(&self) -> u32 {
        let mine = match self.response {
            Response::X => Shape::Rock,
            Response::Y => Shape::Paper,
            Response::Z => Shape::Scissors,
        };
        round_score(mine, self.theirs)
    }

    /// Score when the response names the outcome to reach.
    pub fn score_as_outcome(&self) -> u32 {
        let mine = match self.response {
            Response::X => self.theirs.beats(),
            Response::Y => self.theirs,
            Response::Z => self.theirs.beaten_by(),
        };
        round_score(mine, self.theirs)
    }
}

pub fn parse_guide(input: &str) -> Result<Vec<Instruction>> {
    parse::lines(input, Instruction::parser)
}

pub fn part_one(guide: &[Instruction]) -> u32 {
    guide.iter().map(Instruction::score_as_shape).sum()
}

pub fn part_two(guide: &[Instruction]) -> u32 {
    guide.iter().map(Instruction::score_as_outcome).sum()
}

fn running_total(scores: impl Iterator<Item = u32>) -> Visualization {
    let totals = scores.scan(0u32, |total, score| {
        *total += score;
        Some(*total as f64)
    });
    Visualization::bars("Running score", "round", "score", totals)
}

pub struct RockPaperScissors;

impl DaySolver for RockPaperScissors {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let guide = parse_guide(input)?;
        let chart = running_total(guide.iter().map(Instruction::score_as_shape));
        Ok(Answer::new(part_one(&guide)).with_visualization(chart))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let guide = parse_guide(input)?;
        let chart = running_total(guide.iter().map(Instruction::score_as_outcome));
        Ok(Answer::new(part_two(&guide)).with_visualization(chart))
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::*;
    }

    use c::{ParseError, Parser, Stream};

    impl Shape {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            c::choice((
                c::token('A').map(|_| Self::Rock),
                c::token('B').map(|_| Self::Paper),
                c::token('C').map(|_| Self::Scissors),
            ))
        }
    }

    impl Response {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            c::choice((
                c::token('X').map(|_| Self::X),
                c::token('Y').map(|_| Self::Y),
                c::token('Z').map(|_| Self::Z),
            ))
        }
    }

    impl Instruction {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            (Shape::parser(), c::token(' '), Response::parser())
                .map(|(theirs, _, response)| Instruction { theirs, response })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolveError;

    #[test]
    fn test_part_one() {
        let guide = parse_guide(EXAMPLE).unwrap();
        assert_eq!(part_one(&guide), 15);
    }

    #[test]
    fn test_part_two() {
        let guide = parse_guide(EXAMPLE).unwrap();
        assert_eq!(part_two(&guide), 12);
    }

    #[test]
    fn shapes_form_a_cycle() {
        for shape in Shape::ALL {
            assert_eq!(shape.beats().beaten_by(), shape);
            assert_eq!(Outcome::of(shape, shape), Outcome::Draw);
            assert_eq!(Outcome::of(shape, shape.beats()), Outcome::Win);
            assert_eq!(Outcome::of(shape, shape.beaten_by()), Outcome::Loss);
        }
    }

    #[test]
    fn unknown_letter() {
        let err = parse_guide("A Y\nD X\n").unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 2, .. }));
    }
}
