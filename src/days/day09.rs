//! Day 9: Rope Bridge

use std::collections::HashSet;
use std::fmt;

use glam::IVec2;

use crate::helpers::parse;
use crate::{Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/09.txt");
pub(crate) const LARGER_EXAMPLE: &str = include_str!("../../data/examples/09-larger.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl From<Direction> for IVec2 {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Up => IVec2::Y,
            Direction::Right => IVec2::X,
            Direction::Down => IVec2::NEG_Y,
            Direction::Left => IVec2::NEG_X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub direction: Direction,
    pub distance: u32,
}

/// A rope of knots, where each knot follows the one in front of it.
#[derive(Debug)]
pub struct Rope {
    knots: Vec<IVec2>,
    tail_visited: HashSet<IVec2>,
    lower_bound: IVec2,
    upper_bound: IVec2,
}

impl Rope {
    pub fn new(knot_count: usize) -> Result<Self> {
        if knot_count == 0 {
            return Err(SolveError::structure("a rope needs at least one knot"));
        }
        Ok(Self {
            knots: vec![IVec2::ZERO; knot_count],
            tail_visited: HashSet::from([IVec2::ZERO]),
            lower_bound: IVec2::ZERO,
            upper_bound: IVec2::ZERO,
        })
    }

    pub fn do_motion(&mut self, motion: Motion) {
        for _ in 0..motion.distance {
            self.move_head_one(motion.direction);
        }
    }

    fn move_head_one(&mut self, dir: Direction) {
        self.knots[0] += IVec2::from(dir);
        for i in 1..self.knots.len() {
            let leader = self.knots[i - 1];
            let follower = &mut self.knots[i];
            let gap = leader - *follower;
            if gap.abs().max_element() <= 1 {
                // Everything further back is already touching.
                break;
            }
            *follower += gap.clamp(IVec2::NEG_ONE, IVec2::ONE);
        }

        let head = self.knots[0];
        self.lower_bound = self.lower_bound.min(head);
        self.upper_bound = self.upper_bound.max(head);
        if let Some(&tail) = self.knots.last() {
            self.tail_visited.insert(tail);
        }
    }

    /// Number of distinct positions the tail has visited.
    pub fn tail_visited_count(&self) -> usize {
        self.tail_visited.len()
    }

    pub fn trail(&self) -> Trail<'_> {
        Trail(self)
    }
}

/// Renders the positions the tail visited, with `s` at the start.
pub struct Trail<'a>(&'a Rope);

impl fmt::Display for Trail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rope = self.0;
        for y in (rope.lower_bound.y..=rope.upper_bound.y).rev() {
            for x in rope.lower_bound.x..=rope.upper_bound.x {
                let pos = IVec2::new(x, y);
                let c = if pos == IVec2::ZERO {
                    's'
                } else if rope.tail_visited.contains(&pos) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{c}")?;
            }
            if y != rope.lower_bound.y {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

pub fn parse_motions(input: &str) -> Result<Vec<Motion>> {
    parse::lines(input, Motion::parser)
}

/// Simulates a rope of `knot_count` knots, returning it along with the
/// tail's visit count after each motion.
pub fn simulate(motions: &[Motion], knot_count: usize) -> Result<(Rope, Vec<usize>)> {
    let mut rope = Rope::new(knot_count)?;
    let mut progress = Vec::with_capacity(motions.len());
    for &motion in motions {
        rope.do_motion(motion);
        progress.push(rope.tail_visited_count());
    }
    Ok((rope, progress))
}

pub fn part_one(motions: &[Motion]) -> Result<usize> {
    simulate(motions, 2).map(|(rope, _)| rope.tail_visited_count())
}

pub fn part_two(motions: &[Motion]) -> Result<usize> {
    simulate(motions, 10).map(|(rope, _)| rope.tail_visited_count())
}

const MAX_TRAIL_AREA: i32 = 80 * 60;

fn solve(input: &str, knot_count: usize) -> Result<Answer> {
    let motions = parse_motions(input)?;
    let (rope, progress) = simulate(&motions, knot_count)?;
    let size = rope.upper_bound - rope.lower_bound + IVec2::ONE;
    let viz = if size.x * size.y <= MAX_TRAIL_AREA {
        Visualization::text(format!("Tail trail of a {knot_count}-knot rope"), rope.trail())
    } else {
        Visualization::bars(
            format!("Positions visited by the tail of a {knot_count}-knot rope"),
            "motion",
            "positions",
            progress.iter().map(|&n| n as f64),
        )
    };
    Ok(Answer::new(rope.tail_visited_count()).with_visualization(viz))
}

pub struct RopeBridge;

impl DaySolver for RopeBridge {
    fn part_one(&self, input: &str) -> Result<Answer> {
        solve(input, 2)
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        solve(input, 10)
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::*;
    }

    use c::{ParseError, Parser, Stream};

    impl Direction {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            c::choice((
                c::token('U').map(|_| Self::Up),
                c::token('R').map(|_| Self::Right),
                c::token('D').map(|_| Self::Down),
                c::token('L').map(|_| Self::Left),
            ))
        }
    }

    impl Motion {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            (Direction::parser(), c::token(' '), parse::decimal_integer())
                .map(|(direction, _, distance)| Motion { direction, distance })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_one() {
        let motions = parse_motions(EXAMPLE).unwrap();
        assert_eq!(part_one(&motions).unwrap(), 13);
    }

    #[test]
    fn test_part_two() {
        let motions = parse_motions(EXAMPLE).unwrap();
        assert_eq!(part_two(&motions).unwrap(), 1);

        let motions = parse_motions(LARGER_EXAMPLE).unwrap();
        assert_eq!(part_two(&motions).unwrap(), 36);
    }

    #[test]
    fn trail_rendering() {
        let motions = parse_motions(EXAMPLE).unwrap();
        let (rope, _) = simulate(&motions, 2).unwrap();
        let expected = "..##..\n...##.\n.####.\n....#.\ns###..";
        assert_eq!(rope.trail().to_string(), expected);
    }

    #[test]
    fn single_knot_follows_head() {
        let motions = parse_motions("R 3\nU 2\n").unwrap();
        let (rope, progress) = simulate(&motions, 1).unwrap();
        assert_eq!(progress, vec![4, 6]);
        assert_eq!(rope.tail_visited_count(), 6);
    }

    #[test]
    fn bad_direction() {
        let err = parse_motions("R 3\nX 2\n").unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 2, .. }));
    }
}
