//! Day 14: Regolith Reservoir

use std::fmt;

use itertools::Itertools;

use crate::helpers::parse;
use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/14.txt");

/// A position in the cave, with `x` increasing to the right and `y`
/// increasing going down.
type Pos = glam::IVec2;

pub const SAND_SOURCE: Pos = Pos { x: 500, y: 0 };

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    #[default]
    Air,
    Rock,
    Sand,
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Tile::Air => '.',
            Tile::Rock => '#',
            Tile::Sand => 'o',
        };
        write!(f, "{c}")
    }
}

/// One scanned line of rock: straight segments between consecutive points.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Path {
    pub points: Vec<Pos>,
}

impl Path {
    /// Every position the path covers, corners included once.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let segments = self.points.iter().tuple_windows().flat_map(|(&start, &end)| {
            let step = (end - start).clamp(Pos::NEG_ONE, Pos::ONE);
            let len = (end - start).abs().max_element();
            (1..=len).map(move |i| start + step * i)
        });
        self.points.first().copied().into_iter().chain(segments)
    }
}

/// What lies below the lowest rock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bottom {
    /// Nothing: sand falling past the lowest rock is lost.
    Abyss,
    /// An endless floor two rows below the lowest rock.
    Floor,
}

#[derive(Debug, Clone)]
pub struct Cave {
    grid: grid::Grid<Tile>,
    min: Pos,
    bottom: Bottom,
}

impl Cave {
    pub fn new(paths: &[Path], bottom: Bottom) -> Result<Self> {
        let rock = || paths.iter().flat_map(|path| path.positions());
        let max_y = rock()
            .map(|pos| pos.y)
            .max()
            .ok_or_else(|| SolveError::structure("the scan shows no rock"))?;
        let (mut min_x, mut max_x) = rock().fold((SAND_SOURCE.x, SAND_SOURCE.x), |(lo, hi), pos| {
            (lo.min(pos.x), hi.max(pos.x))
        });

        let floor_y = max_y + 2;
        let rows = match bottom {
            Bottom::Abyss => max_y + 1,
            Bottom::Floor => {
                // Sand piles up in a triangle at most `floor_y` wide on each side.
                min_x = min_x.min(SAND_SOURCE.x - floor_y);
                max_x = max_x.max(SAND_SOURCE.x + floor_y);
                floor_y + 1
            }
        };

        let mut cave = Self {
            grid: grid::Grid::new(rows as usize, (max_x - min_x + 1) as usize),
            min: Pos { x: min_x, y: 0 },
            bottom,
        };
        for pos in rock() {
            if let Some(tile) = cave.get_mut(pos) {
                *tile = Tile::Rock;
            }
        }
        if bottom == Bottom::Floor {
            for tile in cave.grid.iter_row_mut(floor_y as usize) {
                *tile = Tile::Rock;
            }
        }
        Ok(cave)
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Tile> {
        let (row, col) = self.row_col(pos)?;
        self.grid.get(row, col).copied()
    }

    #[inline]
    fn get_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        let (row, col) = self.row_col(pos)?;
        self.grid.get_mut(row, col)
    }

    #[inline(always)]
    fn row_col(&self, pos: Pos) -> Option<(usize, usize)> {
        let offset = pos - self.min;
        let row = offset.y.try_into().ok()?;
        let col = offset.x.try_into().ok()?;
        Some((row, col))
    }

    /// Drops one unit of sand from `from`.
    ///
    /// Returns where the sand comes to rest, or `None` if it leaves the cave.
    fn drop_sand(&self, from: Pos) -> Option<Pos> {
        let mut pos = from;
        'falling: loop {
            // Straight down, then down-left, then down-right.
            for step in [Pos::Y, Pos::Y - Pos::X, Pos::Y + Pos::X] {
                match self.get(pos + step) {
                    Some(Tile::Air) => {
                        pos += step;
                        continue 'falling;
                    }
                    None => return None,
                    Some(_) => {}
                }
            }
            return Some(pos);
        }
    }

    /// Pours sand until it starts falling out of the cave or the source is
    /// blocked. Returns the number of units at rest.
    pub fn fill(&mut self) -> Result<usize> {
        let mut units = 0;
        while self.get(SAND_SOURCE) == Some(Tile::Air) {
            let Some(rest) = self.drop_sand(SAND_SOURCE) else {
                match self.bottom {
                    Bottom::Abyss => break,
                    Bottom::Floor => {
                        return Err(SolveError::structure("sand fell past the floor"))
                    }
                }
            };
            if let Some(tile) = self.get_mut(rest) {
                *tile = Tile::Sand;
            }
            units += 1;
        }
        Ok(units)
    }
}

impl fmt::Display for Cave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.grid.rows() {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.grid.cols() {
                let tile = self.grid[row][col];
                let pos = self.min + Pos::new(col as i32, row as i32);
                if pos == SAND_SOURCE && tile == Tile::Air {
                    write!(f, "+")?;
                } else {
                    write!(f, "{tile}")?;
                }
            }
        }
        Ok(())
    }
}

pub fn parse_paths(input: &str) -> Result<Vec<Path>> {
    parse::lines(input, Path::parser)
}

fn simulate(paths: &[Path], bottom: Bottom) -> Result<(usize, Cave)> {
    let mut cave = Cave::new(paths, bottom)?;
    debugln!("==== START ====\n{cave}");
    let units = cave.fill()?;
    debugln!("==== END ====\n{cave}");
    Ok((units, cave))
}

pub fn part_one(paths: &[Path]) -> Result<(usize, Cave)> {
    simulate(paths, Bottom::Abyss)
}

pub fn part_two(paths: &[Path]) -> Result<(usize, Cave)> {
    simulate(paths, Bottom::Floor)
}

fn answer((units, cave): (usize, Cave)) -> Answer {
    Answer::new(units).with_visualization(Visualization::text("Sand at rest", cave))
}

pub struct RegolithReservoir;

impl DaySolver for RegolithReservoir {
    fn part_one(&self, input: &str) -> Result<Answer> {
        part_one(&parse_paths(input)?).map(answer)
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        part_two(&parse_paths(input)?).map(answer)
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::{parser::char::string, *};
    }

    use c::error::StreamError;
    use c::stream::StreamErrorFor;
    use c::{ParseError, Parser, Stream};

    impl Path {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            // "498,4"
            let point = (
                parse::decimal_integer::<_, u16>(),
                c::token(','),
                parse::decimal_integer::<_, u16>(),
            )
                .map(|(x, _, y)| Pos::new(x.into(), y.into()));

            c::sep_by1(point, c::string(" -> ")).and_then(|points: Vec<Pos>| {
                match points.iter().tuple_windows().find(|(a, b)| a.x != b.x && a.y != b.y) {
                    Some((a, b)) => Err(StreamErrorFor::<Input>::message_format(format!(
                        "segment {},{} -> {},{} is diagonal",
                        a.x, a.y, b.x, b.y
                    ))),
                    None => Ok(Self { points }),
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_one() {
        let paths = parse_paths(EXAMPLE).unwrap();
        let (units, cave) = part_one(&paths).unwrap();
        assert_eq!(units, 24);
        assert_eq!(
            cave.to_string(),
            "\
......+...
..........
......o...
.....ooo..
....#ooo##
...o#ooo#.
..###ooo#.
....oooo#.
.o.ooooo#.
#########."
        );
    }

    #[test]
    fn test_part_two() {
        let paths = parse_paths(EXAMPLE).unwrap();
        let (units, cave) = part_two(&paths).unwrap();
        assert_eq!(units, 93);
        assert_eq!(cave.get(SAND_SOURCE), Some(Tile::Sand));
    }

    #[test]
    fn path_positions() {
        let path = Path {
            points: vec![Pos::new(498, 4), Pos::new(498, 6), Pos::new(496, 6)],
        };
        assert_eq!(
            path.positions().collect::<Vec<_>>(),
            vec![
                Pos::new(498, 4),
                Pos::new(498, 5),
                Pos::new(498, 6),
                Pos::new(497, 6),
                Pos::new(496, 6),
            ]
        );
    }

    #[test]
    fn diagonal_segment_is_rejected() {
        let err = parse_paths("498,4 -> 498,6\n1,1 -> 2,2\n").unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn empty_scan() {
        assert!(matches!(
            part_one(&[]),
            Err(SolveError::Structure(_))
        ));
    }
}
