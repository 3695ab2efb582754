//! Day 17: Pyroclastic Flow

use std::collections::HashMap;
use std::fmt;

use crate::helpers::checked;
use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/17.txt");

pub const CHAMBER_WIDTH: u32 = 7;

/// A row of the chamber, bit `x` set when column `x` (from the left) is
/// occupied.
type Row = u8;

const FULL_ROW: Row = (1 << CHAMBER_WIDTH) - 1;

/// Rock shapes as rows from the bottom up, already two columns in from the
/// left wall.
const ROCKS: [&[Row]; 5] = [
    // ####
    &[0b0111100],
    // .#.
    // ###
    // .#.
    &[0b0001000, 0b0011100, 0b0001000],
    // ..#
    // ..#
    // ###
    &[0b0011100, 0b0010000, 0b0010000],
    // #
    // #
    // #
    // #
    &[0b0000100; 4],
    // ##
    // ##
    &[0b0001100; 2],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jet {
    Left,
    Right,
}

pub fn parse_jets(input: &str) -> Result<Vec<Jet>> {
    let line = input.trim();
    if line.is_empty() {
        return Err(SolveError::structure("the jet pattern is empty"));
    }
    line.chars()
        .enumerate()
        .map(|(i, c)| match c {
            '<' => Ok(Jet::Left),
            '>' => Ok(Jet::Right),
            _ => Err(SolveError::parse(
                1,
                format!("{c:?} at column {} is not a jet", i + 1),
            )),
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct FallingRock {
    rows: [Row; 4],
    len: usize,
    bottom: usize,
}

impl FallingRock {
    fn rows(&self) -> impl Iterator<Item = (usize, Row)> + '_ {
        self.rows[..self.len]
            .iter()
            .enumerate()
            .map(move |(i, &row)| (self.bottom + i, row))
    }

    fn pushed(&self, jet: Jet) -> Option<Self> {
        let mut rows = self.rows;
        for row in &mut rows[..self.len] {
            *row = match jet {
                Jet::Left if *row & 1 == 0 => *row >> 1,
                Jet::Right if (*row << 1) & !FULL_ROW == 0 => *row << 1,
                _ => return None,
            };
        }
        Some(Self { rows, ..*self })
    }
}

/// What the top of the tower looks like: how far below the top each
/// column's highest rock sits.
type Surface = [usize; CHAMBER_WIDTH as usize];

#[derive(Debug, Clone)]
pub struct Chamber<'a> {
    rows: Vec<Row>,
    jets: &'a [Jet],
    next_jet: usize,
    next_rock: usize,
    pub rocks_dropped: u64,
}

impl<'a> Chamber<'a> {
    pub fn new(jets: &'a [Jet]) -> Self {
        Self {
            rows: Vec::new(),
            jets,
            next_jet: 0,
            next_rock: 0,
            rocks_dropped: 0,
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    fn fits(&self, rock: &FallingRock) -> bool {
        rock.rows()
            .all(|(y, row)| self.rows.get(y).map_or(true, |&occupied| occupied & row == 0))
    }

    /// Drops the next rock until it comes to rest.
    pub fn drop_rock(&mut self) {
        let shape = ROCKS[self.next_rock];
        self.next_rock = (self.next_rock + 1) % ROCKS.len();

        let mut rows = [0; 4];
        rows[..shape.len()].copy_from_slice(shape);
        let mut rock = FallingRock {
            rows,
            len: shape.len(),
            bottom: self.height() + 3,
        };

        loop {
            let jet = self.jets[self.next_jet];
            self.next_jet = (self.next_jet + 1) % self.jets.len();
            if let Some(pushed) = rock.pushed(jet).filter(|r| self.fits(r)) {
                rock = pushed;
            }

            let fallen = FallingRock {
                bottom: rock.bottom.wrapping_sub(1),
                ..rock
            };
            if rock.bottom == 0 || !self.fits(&fallen) {
                break;
            }
            rock = fallen;
        }

        for (y, row) in rock.rows() {
            if y >= self.rows.len() {
                self.rows.resize(y + 1, 0);
            }
            self.rows[y] |= row;
        }
        self.rocks_dropped += 1;
    }

    fn surface(&self) -> Surface {
        let mut surface = [self.height(); CHAMBER_WIDTH as usize];
        for (x, depth) in surface.iter_mut().enumerate() {
            if let Some(d) = self.rows.iter().rev().position(|row| row & (1 << x) != 0) {
                *depth = d;
            }
        }
        surface
    }

    /// The top `rows` rows of the tower.
    pub fn top(&self, rows: usize) -> TopOfTower<'_> {
        TopOfTower {
            rows: &self.rows[self.rows.len().saturating_sub(rows)..],
            complete: rows >= self.rows.len(),
        }
    }
}

pub struct TopOfTower<'a> {
    rows: &'a [Row],
    complete: bool,
}

impl fmt::Display for TopOfTower<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter().rev() {
            write!(f, "|")?;
            for x in 0..CHAMBER_WIDTH {
                let c = if row & (1 << x) != 0 { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f, "|")?;
        }
        if self.complete {
            write!(f, "+-------+")
        } else {
            write!(f, "|~~~~~~~|")
        }
    }
}

/// A repeating stretch of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    /// Rocks dropped when the repeated state was first seen.
    pub start: u64,
    pub rocks: u64,
    pub height: u64,
}

/// Tower height after `rocks` rocks, skipping ahead over whole cycles once
/// the jet index, rock index and surface shape repeat.
pub fn tower_height(jets: &[Jet], rocks: u64) -> Result<(u64, Option<Cycle>)> {
    let mut chamber = Chamber::new(jets);
    let mut seen: HashMap<(usize, usize, Surface), (u64, usize)> = HashMap::new();

    while chamber.rocks_dropped < rocks {
        chamber.drop_rock();

        let state = (chamber.next_jet, chamber.next_rock, chamber.surface());
        let now = (chamber.rocks_dropped, chamber.height());
        let Some(&(start, start_height)) = seen.get(&state) else {
            seen.insert(state, now);
            continue;
        };

        let cycle = Cycle {
            start,
            rocks: now.0 - start,
            height: (now.1 - start_height) as u64,
        };
        debugln!("Found {cycle:?}");

        let remaining = rocks - chamber.rocks_dropped;
        for _ in 0..remaining % cycle.rocks {
            chamber.drop_rock();
        }
        let skipped = checked::mul(remaining / cycle.rocks, cycle.height)?;
        let height = checked::add(chamber.height() as u64, skipped)?;
        return Ok((height, Some(cycle)));
    }

    Ok((chamber.height() as u64, None))
}

pub fn simulate(jets: &[Jet], rocks: u64) -> Chamber<'_> {
    let mut chamber = Chamber::new(jets);
    while chamber.rocks_dropped < rocks {
        chamber.drop_rock();
    }
    chamber
}

pub fn part_one(jets: &[Jet]) -> Chamber<'_> {
    simulate(jets, 2022)
}

pub fn part_two(jets: &[Jet]) -> Result<(u64, Option<Cycle>)> {
    tower_height(jets, 1_000_000_000_000)
}

pub struct PyroclasticFlow;

impl DaySolver for PyroclasticFlow {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let jets = parse_jets(input)?;
        let chamber = part_one(&jets);
        let viz = Visualization::text("Top of the tower", chamber.top(40));
        Ok(Answer::new(chamber.height()).with_visualization(viz))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let jets = parse_jets(input)?;
        let (height, cycle) = part_two(&jets)?;
        let body = match cycle {
            Some(Cycle {
                start,
                rocks,
                height,
            }) => format!(
                "after {start} rocks the tower repeats every {rocks} rocks, growing {height} rows"
            ),
            None => String::from("no repetition before the last rock"),
        };
        Ok(Answer::new(height).with_visualization(Visualization::text("Cycle", body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_one() {
        let jets = parse_jets(EXAMPLE).unwrap();
        assert_eq!(part_one(&jets).height(), 3068);
    }

    #[test]
    fn test_part_two() {
        let jets = parse_jets(EXAMPLE).unwrap();
        let (height, cycle) = part_two(&jets).unwrap();
        assert_eq!(height, 1514285714288);
        assert!(cycle.is_some());
    }

    #[test]
    fn skipping_cycles_matches_full_simulation() {
        let jets = parse_jets(EXAMPLE).unwrap();
        for rocks in [1, 10, 2022, 5000] {
            let (height, _) = tower_height(&jets, rocks).unwrap();
            assert_eq!(height, simulate(&jets, rocks).height() as u64, "{rocks} rocks");
        }
    }

    #[test]
    fn first_rocks() {
        let jets = parse_jets(EXAMPLE).unwrap();
        let chamber = simulate(&jets, 2);
        assert_eq!(
            chamber.top(10).to_string(),
            "\
|...#...|
|..###..|
|...#...|
|..####.|
+-------+"
        );
    }

    #[test]
    fn rows_never_overflow_the_walls() {
        let jets = parse_jets(EXAMPLE).unwrap();
        let chamber = simulate(&jets, 500);
        assert!(chamber.rows.iter().all(|&row| row & !FULL_ROW == 0));
    }

    #[test]
    fn walls_stop_sideways_pushes() {
        let rock = FallingRock {
            rows: [0b0111100, 0, 0, 0],
            len: 1,
            bottom: 0,
        };
        let right = rock.pushed(Jet::Right).unwrap();
        assert_eq!(right.rows[0], 0b1111000);
        assert!(right.pushed(Jet::Right).is_none());

        let left = rock.pushed(Jet::Left).unwrap().pushed(Jet::Left).unwrap();
        assert_eq!(left.rows[0], 0b0001111);
        assert!(left.pushed(Jet::Left).is_none());
    }

    #[test]
    fn bad_jet() {
        assert!(matches!(
            parse_jets(">><x"),
            Err(SolveError::Parse { line: 1, .. })
        ));
        assert!(matches!(parse_jets("\n"), Err(SolveError::Structure(_))));
    }
}
