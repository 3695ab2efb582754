//! Day 10: Cathode-Ray Tube

use crate::helpers::parse;
use crate::{debugln, Answer, DaySolver, Result, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/10.txt");
pub(crate) const EXAMPLE_CRT: &str = include_str!("../../data/examples/10-crt.txt");

pub const KEY_CYCLES: [usize; 6] = [20, 60, 100, 140, 180, 220];
pub const CRT_WIDTH: usize = 40;
pub const CRT_HEIGHT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Addx(i32),
    Noop,
}

impl Instruction {
    /// The number of cycles it takes to run this instruction.
    pub fn cycles(self) -> u32 {
        match self {
            Instruction::Addx(_) => 2,
            Instruction::Noop => 1,
        }
    }
}

/// Runs a program, yielding the value of the `X` register *during* each
/// cycle. Once the program is exhausted the CPU idles and `X` stays put.
#[derive(Debug, Clone)]
pub struct Cpu<'a> {
    register: i32,
    program: std::slice::Iter<'a, Instruction>,
    /// The instruction in flight and how many cycles it still needs.
    running: Option<(Instruction, u32)>,
}

impl<'a> Cpu<'a> {
    pub fn new(program: &'a [Instruction]) -> Self {
        Self {
            register: 1,
            program: program.iter(),
            running: None,
        }
    }

    fn finish(&mut self, inst: Instruction) {
        match inst {
            Instruction::Addx(value) => self.register += value,
            Instruction::Noop => {}
        }
    }
}

impl Iterator for Cpu<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let (inst, remaining) = match self.running.take() {
            Some(running) => running,
            None => {
                let inst = self.program.next().copied().unwrap_or(Instruction::Noop);
                (inst, inst.cycles())
            }
        };

        let during = self.register;
        if remaining == 1 {
            self.finish(inst);
        } else {
            self.running = Some((inst, remaining - 1));
        }
        Some(during)
    }
}

pub fn parse_program(input: &str) -> Result<Vec<Instruction>> {
    parse::lines(input, Instruction::parser)
}

pub fn signal_strengths(program: &[Instruction]) -> Vec<i32> {
    let last = KEY_CYCLES[KEY_CYCLES.len() - 1];
    Cpu::new(program)
        .take(last)
        .enumerate()
        .map(|(i, x)| (i + 1, x))
        .filter(|(cycle, _)| KEY_CYCLES.contains(cycle))
        .map(|(cycle, x)| {
            debugln!("cycle {cycle}: X={x}");
            cycle as i32 * x
        })
        .collect()
}

pub fn part_one(program: &[Instruction]) -> i32 {
    signal_strengths(program).into_iter().sum()
}

/// Draws one pixel per cycle, lit when the 3-wide sprite centred on `X`
/// covers the column being drawn.
pub fn part_two(program: &[Instruction]) -> String {
    let pixels: Vec<char> = Cpu::new(program)
        .take(CRT_WIDTH * CRT_HEIGHT)
        .enumerate()
        .map(|(i, x)| {
            let col = (i % CRT_WIDTH) as i32;
            if (x - col).abs() <= 1 {
                '#'
            } else {
                '.'
            }
        })
        .collect();

    pixels
        .chunks(CRT_WIDTH)
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct CathodeRayTube;

impl DaySolver for CathodeRayTube {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let program = parse_program(input)?;
        let register = Cpu::new(&program)
            .take(KEY_CYCLES[KEY_CYCLES.len() - 1])
            .map(f64::from);
        let viz = Visualization::bars("X register per cycle", "cycle", "X", register);
        Ok(Answer::new(part_one(&program)).with_visualization(viz))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let program = parse_program(input)?;
        let screen = part_two(&program);
        let viz = Visualization::text("CRT", &screen);
        Ok(Answer::new(screen).with_visualization(viz))
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::{parser::char::string, *};
    }

    use c::{ParseError, Parser, Stream};

    impl Instruction {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            let addx = c::string("addx ")
                .with(parse::decimal_integer())
                .map(Instruction::Addx);
            let noop = c::string("noop").map(|_| Instruction::Noop);
            c::choice((addx, noop))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_program() {
        let program = parse_program("noop\naddx 3\naddx -5\n").unwrap();
        let during: Vec<i32> = Cpu::new(&program).take(7).collect();
        assert_eq!(during, vec![1, 1, 1, 4, 4, -1, -1]);
    }

    #[test]
    fn test_part_one() {
        let program = parse_program(EXAMPLE).unwrap();
        assert_eq!(
            signal_strengths(&program),
            vec![420, 1140, 1800, 2940, 2880, 3960]
        );
        assert_eq!(part_one(&program), 13140);
    }

    #[test]
    fn test_part_two() {
        let program = parse_program(EXAMPLE).unwrap();
        assert_eq!(part_two(&program), EXAMPLE_CRT.trim_end());
    }

    #[test]
    fn unknown_instruction() {
        assert!(parse_program("noop\nmul 3\n").is_err());
    }
}
