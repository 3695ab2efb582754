//! Day 5: Supply Stacks

use std::fmt;

use crate::helpers::{paragraphs, parse, Paragraph};
use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/05.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crate(pub char);

impl fmt::Display for Crate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// Crates bottom to top.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stack(Vec<Crate>);

impl Stack {
    #[inline]
    pub fn height(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn get(&self, height: usize) -> Option<Crate> {
        self.0.get(height).copied()
    }

    #[inline]
    pub fn top(&self) -> Option<Crate> {
        self.0.last().copied()
    }
}

/// Which crane model executes the moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crane {
    /// Moves one crate at a time, reversing their order.
    CrateMover9000,
    /// Moves all crates at once, keeping their order.
    CrateMover9001,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub count: usize,
    pub from: usize,
    pub to: usize,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move {} from {} to {}", self.count, self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    stacks: Vec<Stack>,
}

impl Ship {
    pub fn new(stacks: Vec<Stack>) -> Self {
        Self { stacks }
    }

    fn stack_index(&self, number: usize) -> Result<usize> {
        if (1..=self.stacks.len()).contains(&number) {
            Ok(number - 1)
        } else {
            Err(SolveError::structure(format!(
                "there is no stack {number} (the ship has {})",
                self.stacks.len()
            )))
        }
    }

    pub fn apply(&mut self, m: Move, crane: Crane) -> Result<()> {
        let from = self.stack_index(m.from)?;
        let to = self.stack_index(m.to)?;

        let source = &mut self.stacks[from].0;
        if m.count > source.len() {
            return Err(SolveError::structure(format!(
                "cannot {m}: stack {} only holds {} crates",
                m.from,
                source.len()
            )));
        }
        let mut lifted = source.split_off(source.len() - m.count);
        if crane == Crane::CrateMover9000 {
            lifted.reverse();
        }
        self.stacks[to].0.extend(lifted);
        Ok(())
    }

    pub fn top_of_each_stack(&self) -> String {
        self.stacks
            .iter()
            .filter_map(|stack| stack.top())
            .map(|krate| krate.0)
            .collect()
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tallest = self.stacks.iter().map(Stack::height).max().unwrap_or(0);

        for height in (0..tallest).rev() {
            let row = self
                .stacks
                .iter()
                .map(|stack| match stack.get(height) {
                    Some(krate) => krate.to_string(),
                    None => "   ".to_owned(),
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", row.trim_end())?;
        }

        let numbers = (1..=self.stacks.len())
            .map(|n| format!("{n:^3}"))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", numbers.trim_end())
    }
}

/// The starting drawing and the rearrangement procedure.
#[derive(Debug, Clone)]
pub struct Procedure {
    pub ship: Ship,
    pub moves: Vec<Move>,
}

pub fn parse_procedure(input: &str) -> Result<Procedure> {
    let mut sections = paragraphs(input);
    let drawing = sections
        .next()
        .ok_or_else(|| SolveError::structure("the input has no crate drawing"))?;
    let ship = parse_drawing(&drawing)?;

    let mut moves = Vec::new();
    for section in sections {
        for (line_number, line) in section.numbered() {
            moves.push(parse::numbered_line(line_number, line, Move::parser())?);
        }
    }

    Ok(Procedure { ship, moves })
}

/// Reads crates column-wise: stack `k` sits at character `1 + 4k` of each row.
fn parse_drawing(drawing: &Paragraph<'_>) -> Result<Ship> {
    let Some((&labels, rows)) = drawing.lines.split_last() else {
        return Err(SolveError::structure("empty crate drawing"));
    };
    let labels_line = drawing.first_line + rows.len();

    let n_stacks: usize = labels
        .split_whitespace()
        .last()
        .ok_or_else(|| SolveError::parse(labels_line, "missing stack numbers"))?
        .parse()
        .map_err(|e| SolveError::parse(labels_line, format!("bad stack number: {e}")))?;
    debugln!("Drawing has {n_stacks} stacks and {} rows", rows.len());

    let mut stacks = vec![Stack::default(); n_stacks];
    for (i, row) in rows.iter().enumerate().rev() {
        let line_number = drawing.first_line + i;
        for (column, cell) in row.chars().skip(1).step_by(4).enumerate() {
            match cell {
                ' ' => {}
                c if c.is_ascii_uppercase() && column < n_stacks => {
                    stacks[column].0.push(Crate(c))
                }
                c => {
                    return Err(SolveError::parse(
                        line_number,
                        format!("unexpected {c:?} in stack column {}", column + 1),
                    ))
                }
            }
        }
    }

    Ok(Ship::new(stacks))
}

pub fn rearrange(procedure: &Procedure, crane: Crane) -> Result<Ship> {
    let mut ship = procedure.ship.clone();
    debugln!("BEGIN:\n{ship}");
    for &m in &procedure.moves {
        ship.apply(m, crane)?;
    }
    debugln!("END:\n{ship}");
    Ok(ship)
}

pub fn part_one(procedure: &Procedure) -> Result<String> {
    rearrange(procedure, Crane::CrateMover9000).map(|ship| ship.top_of_each_stack())
}

pub fn part_two(procedure: &Procedure) -> Result<String> {
    rearrange(procedure, Crane::CrateMover9001).map(|ship| ship.top_of_each_stack())
}

pub struct SupplyStacks;

impl SupplyStacks {
    fn solve_with(input: &str, crane: Crane) -> Result<Answer> {
        let procedure = parse_procedure(input)?;
        let ship = rearrange(&procedure, crane)?;
        Ok(Answer::new(ship.top_of_each_stack())
            .with_visualization(Visualization::text(format!("Stacks after {crane:?}"), &ship)))
    }
}

impl DaySolver for SupplyStacks {
    fn part_one(&self, input: &str) -> Result<Answer> {
        Self::solve_with(input, Crane::CrateMover9000)
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        Self::solve_with(input, Crane::CrateMover9001)
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::{parser::char::string, *};
    }

    use c::{ParseError, Parser, Stream};

    impl Move {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            (
                c::string("move "),
                parse::decimal_integer(),
                c::string(" from "),
                parse::decimal_integer(),
                c::string(" to "),
                parse::decimal_integer(),
            )
                .map(|(_, count, _, from, _, to)| Move { count, from, to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_one() {
        let procedure = parse_procedure(EXAMPLE).unwrap();
        assert_eq!(part_one(&procedure).unwrap(), "CMZ");
    }

    #[test]
    fn test_part_two() {
        let procedure = parse_procedure(EXAMPLE).unwrap();
        assert_eq!(part_two(&procedure).unwrap(), "MCD");
    }

    #[test]
    fn drawing_round_trips() {
        let procedure = parse_procedure(EXAMPLE).unwrap();
        let drawing: Vec<_> = EXAMPLE.lines().take(4).map(str::trim_end).collect();
        assert_eq!(procedure.ship.to_string(), drawing.join("\n"));
    }

    #[test]
    fn trimmed_rows_still_parse() {
        let input = "    [D]\n[N] [C]\n[Z] [M] [P]\n 1   2   3\n\nmove 1 from 2 to 1\n";
        let procedure = parse_procedure(input).unwrap();
        assert_eq!(procedure.ship, parse_procedure(EXAMPLE).unwrap().ship);
    }

    #[test]
    fn popping_an_empty_stack_fails() {
        let mut procedure = parse_procedure(EXAMPLE).unwrap();
        procedure.moves = vec![Move {
            count: 4,
            from: 1,
            to: 2,
        }];
        assert!(matches!(
            part_one(&procedure),
            Err(SolveError::Structure(_))
        ));
    }

    #[test]
    fn unknown_stack() {
        let mut procedure = parse_procedure(EXAMPLE).unwrap();
        procedure.moves = vec![Move {
            count: 1,
            from: 4,
            to: 1,
        }];
        assert!(part_two(&procedure).is_err());
    }

    #[test]
    fn bad_move_line() {
        let input = EXAMPLE.replace("move 2 from 2 to 1", "move two from 2 to 1");
        let err = parse_procedure(&input).unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 8, .. }), "{err:?}");
    }
}
