//! Day 8: Treetop Tree House

use std::fmt;

use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/08.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    #[inline]
    fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tree {
    pub height: u8,
    /// Indexed by [`Direction`]: whether the tree can be seen from outside the
    /// grid looking in from that side.
    visible_from: [bool; 4],
}

impl Tree {
    pub fn new(height: u8) -> Self {
        Self {
            height,
            visible_from: [false; 4],
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible_from.contains(&true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forest(grid::Grid<Tree>);

impl Forest {
    pub fn from_input(input: &str) -> Result<Self> {
        let mut cols = None;
        let mut trees = Vec::new();
        for (i, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match cols {
                None => cols = Some(line.len()),
                Some(n) if n != line.len() => {
                    return Err(SolveError::parse(
                        i + 1,
                        format!("row has {} trees, expected {n}", line.len()),
                    ))
                }
                Some(_) => {}
            }
            for c in line.chars() {
                let height = c
                    .to_digit(10)
                    .ok_or_else(|| SolveError::parse(i + 1, format!("{c:?} is not a tree height")))?;
                trees.push(Tree::new(height as u8));
            }
        }
        let cols = cols.ok_or_else(|| SolveError::structure("the forest is empty"))?;

        let mut this = Self(grid::Grid::from_vec(trees, cols));
        this.calculate_visibilities();
        Ok(this)
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.0.rows()
    }

    #[inline]
    pub fn col_count(&self) -> usize {
        self.0.cols()
    }

    fn calculate_visibilities(&mut self) {
        for row in 0..self.row_count() {
            Self::sweep(self.0.iter_row_mut(row), Direction::Left);
            Self::sweep(self.0.iter_row_mut(row).rev(), Direction::Right);
        }
        for col in 0..self.col_count() {
            Self::sweep(self.0.iter_col_mut(col), Direction::Up);
            Self::sweep(self.0.iter_col_mut(col).rev(), Direction::Down);
        }
    }

    /// Marks the trees that are taller than everything before them in `trees`.
    fn sweep<'a>(trees: impl Iterator<Item = &'a mut Tree>, from: Direction) {
        let mut tallest_so_far: Option<u8> = None;
        for tree in trees {
            let taller = tallest_so_far.map_or(true, |tallest| tree.height > tallest);
            tree.visible_from[from as usize] = taller;
            if taller {
                tallest_so_far = Some(tree.height);
            }
        }
    }

    pub fn visible_count(&self) -> usize {
        self.0.iter().filter(|tree| tree.is_visible()).count()
    }

    /// How many trees can be seen from `(row, col)` looking towards `dir`.
    fn viewing_distance(&self, row: usize, col: usize, dir: Direction) -> u32 {
        let height = self.0[row][col].height;
        let (dr, dc) = dir.offset();
        let (mut r, mut c) = (row as isize, col as isize);
        let mut distance = 0;
        loop {
            r += dr;
            c += dc;
            let Some(tree) = self.get(r, c) else {
                break;
            };
            distance += 1;
            if tree.height >= height {
                break;
            }
        }
        distance
    }

    fn get(&self, row: isize, col: isize) -> Option<&Tree> {
        if row < 0 || col < 0 {
            return None;
        }
        self.0.get(row as usize, col as usize)
    }

    pub fn scenic_score(&self, row: usize, col: usize) -> u32 {
        Direction::ALL
            .into_iter()
            .map(|dir| self.viewing_distance(row, col, dir))
            .product()
    }

    /// The position and score of the tree with the best view.
    pub fn best_view(&self) -> Option<((usize, usize), u32)> {
        let positions = (0..self.row_count()).flat_map(|r| (0..self.col_count()).map(move |c| (r, c)));
        positions
            .map(|(r, c)| ((r, c), self.scenic_score(r, c)))
            .max_by_key(|&(_, score)| score)
    }

    pub fn visibility_map(&self, highlight: Option<(usize, usize)>) -> formatting::VisibilityMap<'_> {
        formatting::VisibilityMap {
            forest: self,
            highlight,
        }
    }
}

pub fn part_one(forest: &Forest) -> usize {
    forest.visible_count()
}

pub fn part_two(forest: &Forest) -> u32 {
    forest.best_view().map_or(0, |(pos, score)| {
        debugln!("Best view at {pos:?}: {score}");
        score
    })
}

pub struct TreetopTreeHouse;

impl DaySolver for TreetopTreeHouse {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let forest = Forest::from_input(input)?;
        let map = Visualization::text("Visible trees (#)", forest.visibility_map(None));
        Ok(Answer::new(part_one(&forest)).with_visualization(map))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let forest = Forest::from_input(input)?;
        let best = forest.best_view();
        let map = Visualization::text(
            "Best tree house spot (*)",
            forest.visibility_map(best.map(|(pos, _)| pos)),
        );
        Ok(Answer::new(part_two(&forest)).with_visualization(map))
    }
}

mod formatting {
    use super::*;

    pub struct VisibilityMap<'a> {
        pub(super) forest: &'a Forest,
        pub(super) highlight: Option<(usize, usize)>,
    }

    impl fmt::Display for VisibilityMap<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for row in 0..self.forest.row_count() {
                if row > 0 {
                    writeln!(f)?;
                }
                for (col, tree) in self.forest.0.iter_row(row).enumerate() {
                    let c = if self.highlight == Some((row, col)) {
                        '*'
                    } else if tree.is_visible() {
                        '#'
                    } else {
                        '.'
                    };
                    write!(f, "{c}")?;
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_one() {
        let forest = Forest::from_input(EXAMPLE).unwrap();
        assert_eq!(part_one(&forest), 21);
    }

    #[test]
    fn test_part_two() {
        let forest = Forest::from_input(EXAMPLE).unwrap();
        assert_eq!(forest.scenic_score(1, 2), 4);
        assert_eq!(forest.scenic_score(3, 2), 8);
        assert_eq!(forest.best_view(), Some(((3, 2), 8)));
        assert_eq!(part_two(&forest), 8);
    }

    #[test]
    fn visibility_map() {
        let forest = Forest::from_input(EXAMPLE).unwrap();
        let expected = "#####\n###.#\n##.##\n#.#.#\n#####";
        assert_eq!(forest.visibility_map(None).to_string(), expected);
    }

    #[test]
    fn ragged_rows() {
        let err = Forest::from_input("123\n12\n").unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 2, .. }));
    }
}
