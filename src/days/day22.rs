//! Day 22: Monkey Map

use std::fmt;

use crate::helpers::{paragraphs, parse};
use crate::{debugln, Answer, DaySolver, Part, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/22.txt");

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Off the map.
    #[default]
    Void,
    Open,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Right,
    Down,
    Left,
    Up,
}

impl Facing {
    fn turned(self, turn: Turn) -> Self {
        use Facing::*;
        match (turn, self) {
            (Turn::Clockwise, Right) | (Turn::Counterclockwise, Left) => Down,
            (Turn::Clockwise, Down) | (Turn::Counterclockwise, Up) => Left,
            (Turn::Clockwise, Left) | (Turn::Counterclockwise, Right) => Up,
            (Turn::Clockwise, Up) | (Turn::Counterclockwise, Down) => Right,
        }
    }

    /// `(row, col)` change of one step.
    fn delta(self) -> (isize, isize) {
        match self {
            Facing::Right => (0, 1),
            Facing::Down => (1, 0),
            Facing::Left => (0, -1),
            Facing::Up => (-1, 0),
        }
    }

    pub fn value(self) -> usize {
        self as usize
    }

    fn glyph(self) -> char {
        match self {
            Facing::Right => '>',
            Facing::Down => 'v',
            Facing::Left => '<',
            Facing::Up => '^',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Clockwise,
    Counterclockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Forward(u32),
    Turn(Turn),
}

#[derive(Debug, Clone)]
pub struct Board {
    grid: grid::Grid<Tile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
    pub facing: Facing,
}

impl Position {
    pub fn password(&self) -> usize {
        1000 * (self.row + 1) + 4 * (self.col + 1) + self.facing.value()
    }
}

impl Board {
    fn parse(first_line: usize, lines: &[&str]) -> Result<Self> {
        let cols = lines.iter().map(|line| line.len()).max().unwrap_or(0);
        let mut tiles = Vec::with_capacity(cols * lines.len());
        for (i, line) in lines.iter().enumerate() {
            for c in line.chars() {
                tiles.push(match c {
                    ' ' => Tile::Void,
                    '.' => Tile::Open,
                    '#' => Tile::Wall,
                    _ => {
                        return Err(SolveError::parse(
                            first_line + i,
                            format!("{c:?} is not a map tile"),
                        ))
                    }
                });
            }
            tiles.resize((i + 1) * cols, Tile::Void);
        }
        Ok(Self {
            grid: grid::Grid::from_vec(tiles, cols),
        })
    }

    fn get(&self, row: usize, col: usize) -> Tile {
        self.grid.get(row, col).copied().unwrap_or_default()
    }

    /// The leftmost open tile of the top row, facing right.
    pub fn start(&self) -> Result<Position> {
        (0..self.grid.cols())
            .find(|&col| self.get(0, col) == Tile::Open)
            .map(|col| Position {
                row: 0,
                col,
                facing: Facing::Right,
            })
            .ok_or_else(|| SolveError::structure("the top row has no open tile"))
    }

    fn offset(&self, row: usize, col: usize, (dr, dc): (isize, isize)) -> Option<(usize, usize)> {
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        (row < self.grid.rows() && col < self.grid.cols()).then_some((row, col))
    }

    /// The tile one step ahead, wrapping to the far edge of the map when the
    /// step would leave it.
    fn ahead_flat(&self, pos: Position) -> (usize, usize) {
        let delta = pos.facing.delta();
        match self.offset(pos.row, pos.col, delta) {
            Some((row, col)) if self.get(row, col) != Tile::Void => (row, col),
            _ => {
                let back = (-delta.0, -delta.1);
                let mut at = (pos.row, pos.col);
                while let Some((row, col)) = self.offset(at.0, at.1, back) {
                    if self.get(row, col) == Tile::Void {
                        break;
                    }
                    at = (row, col);
                }
                at
            }
        }
    }

    /// Follows the path, wrapping flat around the edges. Returns the final
    /// position and the last facing on every tile visited.
    pub fn walk(&self, path: &[Instruction]) -> Result<(Position, Trail<'_>)> {
        let mut pos = self.start()?;
        let mut trail = Trail {
            board: self,
            marks: grid::Grid::new(self.grid.rows(), self.grid.cols()),
        };
        trail.mark(pos);

        for &instruction in path {
            match instruction {
                Instruction::Turn(turn) => pos.facing = pos.facing.turned(turn),
                Instruction::Forward(steps) => {
                    for _ in 0..steps {
                        let (row, col) = self.ahead_flat(pos);
                        if self.get(row, col) == Tile::Wall {
                            break;
                        }
                        pos.row = row;
                        pos.col = col;
                        trail.mark(pos);
                    }
                }
            }
            trail.mark(pos);
        }
        debugln!("Finished at {pos:?}");
        Ok((pos, trail))
    }
}

/// The board with the last facing drawn on each visited tile.
pub struct Trail<'a> {
    board: &'a Board,
    marks: grid::Grid<Option<Facing>>,
}

impl Trail<'_> {
    fn mark(&mut self, pos: Position) {
        if let Some(mark) = self.marks.get_mut(pos.row, pos.col) {
            *mark = Some(pos.facing);
        }
    }
}

impl fmt::Display for Trail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.board.grid.rows() {
            if row > 0 {
                writeln!(f)?;
            }
            let line: String = (0..self.board.grid.cols())
                .map(|col| {
                    let mark = self.marks.get(row, col).copied().flatten();
                    match (mark, self.board.get(row, col)) {
                        (Some(facing), _) => facing.glyph(),
                        (None, Tile::Void) => ' ',
                        (None, Tile::Open) => '.',
                        (None, Tile::Wall) => '#',
                    }
                })
                .collect();
            write!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

pub fn parse_notes(input: &str) -> Result<(Board, Vec<Instruction>)> {
    let mut sections = paragraphs(input);
    let (Some(board), Some(path), None) = (sections.next(), sections.next(), sections.next())
    else {
        return Err(SolveError::structure(
            "expected a map and a path separated by a blank line",
        ));
    };
    let board = Board::parse(board.first_line, &board.lines)?;
    let [line] = path.lines[..] else {
        return Err(SolveError::parse(
            path.first_line,
            "the path must be a single line",
        ));
    };
    let path = parse::numbered_line(path.first_line, line, parsing::path())?;
    Ok((board, path))
}

pub fn part_one<'a>(board: &'a Board, path: &[Instruction]) -> Result<(Position, Trail<'a>)> {
    board.walk(path)
}

pub struct MonkeyMap;

impl DaySolver for MonkeyMap {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let (board, path) = parse_notes(input)?;
        let (pos, trail) = part_one(&board, &path)?;
        let viz = Visualization::text("Path across the board", &trail);
        Ok(Answer::new(pos.password()).with_visualization(viz))
    }

    /// Folding the board into a cube is not implemented.
    fn part_two(&self, _input: &str) -> Result<Answer> {
        Err(SolveError::Unsolved(Part::Two))
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::*;
    }

    use c::{ParseError, Parser, Stream};

    /// "10R5L5R10L4R5L5"
    pub fn path<Input>() -> impl Parser<Input, Output = Vec<Instruction>>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        c::many1(c::choice((
            parse::decimal_integer().map(Instruction::Forward),
            c::token('R').map(|_| Instruction::Turn(Turn::Clockwise)),
            c::token('L').map(|_| Instruction::Turn(Turn::Counterclockwise)),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_one() {
        let (board, path) = parse_notes(EXAMPLE).unwrap();
        assert_eq!(path.len(), 13);
        let (pos, _) = part_one(&board, &path).unwrap();
        assert_eq!(
            pos,
            Position {
                row: 5,
                col: 7,
                facing: Facing::Right
            }
        );
        assert_eq!(pos.password(), 6032);
    }

    #[test]
    fn part_two_is_unsolved() {
        assert_eq!(
            MonkeyMap.part_two(EXAMPLE),
            Err(SolveError::Unsolved(Part::Two))
        );
    }

    #[test]
    fn wraps_past_the_far_edge() {
        // Up from the top row lands on the bottom of the column; left from the
        // start lands on the right end of the row.
        let (board, path) = parse_notes("  ...\n  .#.\n\nRRR1\n").unwrap();
        let (pos, _) = board.walk(&path).unwrap();
        assert_eq!((pos.row, pos.col, pos.facing), (1, 2, Facing::Up));
        let (board, path) = parse_notes("  ...\n  .#.\n\nRR1\n").unwrap();
        let (pos, _) = board.walk(&path).unwrap();
        assert_eq!((pos.row, pos.col, pos.facing), (0, 4, Facing::Left));
    }

    #[test]
    fn walls_stop_the_wrap() {
        let (board, path) = parse_notes("..#\n\nRR5\n").unwrap();
        let (pos, _) = board.walk(&path).unwrap();
        assert_eq!((pos.row, pos.col), (0, 0));
    }

    #[test]
    fn trail_render() {
        let (board, path) = parse_notes(" ..\n..#\n\n1R1\n").unwrap();
        let (_, trail) = board.walk(&path).unwrap();
        assert_eq!(trail.to_string(), " >v\n..#");
    }

    #[test]
    fn malformed_notes() {
        assert!(matches!(
            parse_notes("...\n"),
            Err(SolveError::Structure(_))
        ));
        assert!(matches!(
            parse_notes("..x\n\n1\n"),
            Err(SolveError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_notes("...\n\n1X\n"),
            Err(SolveError::Parse { line: 3, .. })
        ));
    }
}
