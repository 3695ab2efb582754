//! Day 12: Hill Climbing Algorithm

use std::collections::HashSet;
use std::fmt;

use pathfinding::directed::bfs::bfs;
use smallvec::SmallVec;

use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/12.txt");

type Pos = glam::UVec2;

/// The steepest climb allowed in a single step.
pub const MAX_CLIMB: u8 = 1;

/// The elevation map. Elevations run from 0 (`a`, and the start `S`) to 25
/// (`z`, and the end `E`).
#[derive(Debug, Clone)]
pub struct HeightMap {
    grid: grid::Grid<u8>,
    pub start: Pos,
    pub end: Pos,
}

impl HeightMap {
    pub fn parse(input: &str) -> Result<Self> {
        let mut heights = Vec::new();
        let mut cols = None;
        let mut start = None;
        let mut end = None;

        for (row, (i, line)) in input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .enumerate()
        {
            let line = line.trim_end();
            if *cols.get_or_insert(line.len()) != line.len() {
                return Err(SolveError::parse(i + 1, "rows have different lengths"));
            }
            for (col, c) in line.chars().enumerate() {
                let pos = Pos::new(col as u32, row as u32);
                let height = match c {
                    'S' => {
                        if start.replace(pos).is_some() {
                            return Err(SolveError::parse(i + 1, "second start marker"));
                        }
                        0
                    }
                    'E' => {
                        if end.replace(pos).is_some() {
                            return Err(SolveError::parse(i + 1, "second end marker"));
                        }
                        25
                    }
                    'a'..='z' => c as u8 - b'a',
                    _ => {
                        return Err(SolveError::parse(
                            i + 1,
                            format!("{c:?} is not an elevation"),
                        ))
                    }
                };
                heights.push(height);
            }
        }

        let cols = cols.ok_or_else(|| SolveError::structure("the map is empty"))?;
        Ok(Self {
            grid: grid::Grid::from_vec(heights, cols),
            start: start.ok_or_else(|| SolveError::structure("the map has no start"))?,
            end: end.ok_or_else(|| SolveError::structure("the map has no end"))?,
        })
    }

    #[inline]
    pub fn height(&self, pos: Pos) -> Option<u8> {
        self.grid.get(pos.y as usize, pos.x as usize).copied()
    }

    /// All in-bounds orthogonal neighbors of `pos`.
    pub fn neighbors(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        let mut neighbors = SmallVec::new();
        if pos.x >= 1 {
            neighbors.push(pos - Pos::X);
        }
        if (pos.x as usize) + 1 < self.grid.cols() {
            neighbors.push(pos + Pos::X);
        }
        if pos.y >= 1 {
            neighbors.push(pos - Pos::Y);
        }
        if (pos.y as usize) + 1 < self.grid.rows() {
            neighbors.push(pos + Pos::Y);
        }
        neighbors
    }

    /// Neighbors whose elevation is at most `max_climb` above `pos`.
    pub fn reachable_neighbors(&self, pos: Pos, max_climb: u8) -> SmallVec<[Pos; 4]> {
        let Some(height) = self.height(pos) else {
            return SmallVec::new();
        };
        self.neighbors(pos)
            .into_iter()
            .filter(|&next| {
                self.height(next)
                    .map_or(false, |h| h <= height.saturating_add(max_climb))
            })
            .collect()
    }

    /// The shortest path from `from` to the end, including both endpoints.
    /// `None` when the end cannot be reached.
    pub fn shortest_path(&self, from: Pos, max_climb: u8) -> Option<Vec<Pos>> {
        bfs(
            &from,
            |&pos| self.reachable_neighbors(pos, max_climb),
            |&pos| pos == self.end,
        )
    }

    /// Every position at the lowest elevation.
    pub fn lowest_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.grid.cols();
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, &h)| h == 0)
            .map(move |(i, _)| Pos::new((i % cols) as u32, (i / cols) as u32))
    }

    pub fn path_map<'a>(&'a self, path: &'a [Pos]) -> PathMap<'a> {
        PathMap { map: self, path }
    }
}

/// Step count of a path that includes its starting position.
fn steps(path: &[Pos]) -> usize {
    path.len().saturating_sub(1)
}

pub fn part_one(map: &HeightMap) -> Option<Vec<Pos>> {
    map.shortest_path(map.start, MAX_CLIMB)
}

/// The shortest path to the end from any lowest position.
pub fn part_two(map: &HeightMap) -> Option<Vec<Pos>> {
    let best = map
        .lowest_positions()
        .filter_map(|start| map.shortest_path(start, MAX_CLIMB))
        .min_by_key(|path| path.len());
    debugln!("Best hiking trail: {:?}", best.as_ref().map(|p| steps(p)));
    best
}

/// The map with the chosen path drawn over it.
pub struct PathMap<'a> {
    map: &'a HeightMap,
    path: &'a [Pos],
}

impl fmt::Display for PathMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_path: HashSet<Pos> = self.path.iter().copied().collect();
        for row in 0..self.map.grid.rows() {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.map.grid.cols() {
                let pos = Pos::new(col as u32, row as u32);
                let c = if pos == self.map.end {
                    'E'
                } else if on_path.contains(&pos) {
                    '#'
                } else {
                    let h = self.map.height(pos).unwrap_or(0);
                    (b'a' + h) as char
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

fn answer(map: &HeightMap, path: Option<Vec<Pos>>) -> Result<Answer> {
    let path = path.ok_or_else(|| SolveError::structure("the end cannot be reached"))?;
    let viz = Visualization::text("Shortest path (#)", map.path_map(&path));
    Ok(Answer::new(steps(&path)).with_visualization(viz))
}

pub struct HillClimbingAlgorithm;

impl DaySolver for HillClimbingAlgorithm {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let map = HeightMap::parse(input)?;
        let path = part_one(&map);
        answer(&map, path)
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let map = HeightMap::parse(input)?;
        let path = part_two(&map);
        answer(&map, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A snake of rising ground behind `z` walls: the only way to `E` climbs
    /// one letter per step.
    const SNAKE: &str = "\
Sbcdefg
zzzzzzh
onmlkji
pzzzzzz
qrstuvw
zzzzzzx
aaaaaEy
";

    #[test]
    fn test_part_one() {
        let map = HeightMap::parse(EXAMPLE).unwrap();
        assert_eq!(part_one(&map).map(|p| steps(&p)), Some(31));
    }

    #[test]
    fn test_part_two() {
        let map = HeightMap::parse(EXAMPLE).unwrap();
        assert_eq!(part_two(&map).map(|p| steps(&p)), Some(29));
    }

    #[test]
    fn detour_around_barrier() {
        let map = HeightMap::parse(SNAKE).unwrap();
        let manhattan = map.start.x.abs_diff(map.end.x) + map.start.y.abs_diff(map.end.y);
        assert_eq!(manhattan, 11);
        assert_eq!(part_one(&map).map(|p| steps(&p)), Some(25));
        assert_eq!(part_two(&map).map(|p| steps(&p)), Some(25));
    }

    #[test]
    fn path_length_grows_as_climb_shrinks() {
        let map = HeightMap::parse(SNAKE).unwrap();
        let lengths: Vec<Option<usize>> = [25, 10, 3, 2, 1, 0]
            .into_iter()
            .map(|climb| map.shortest_path(map.start, climb).map(|p| steps(&p)))
            .collect();
        assert_eq!(lengths[0], Some(11));
        assert_eq!(lengths[4], Some(25));
        assert_eq!(lengths[5], None);
        for pair in lengths.windows(2) {
            let as_cost = |len: Option<usize>| len.unwrap_or(usize::MAX);
            assert!(as_cost(pair[0]) <= as_cost(pair[1]), "{lengths:?}");
        }
    }

    #[test]
    fn unreachable_is_distinct_from_zero() {
        let map = HeightMap::parse("SaE\n").unwrap();
        assert_eq!(part_one(&map), None);
        assert!(matches!(
            HillClimbingAlgorithm.part_one("SaE\n"),
            Err(SolveError::Structure(_))
        ));
    }

    #[test]
    fn path_rendering() {
        let map = HeightMap::parse(SNAKE).unwrap();
        let path = part_one(&map).unwrap();
        let rendered = map.path_map(&path).to_string();
        assert_eq!(rendered.lines().next(), Some("#######"));
        assert_eq!(rendered.lines().last(), Some("aaaaaE#"));
    }

    #[test]
    fn missing_end() {
        assert!(matches!(
            HeightMap::parse("Sab\n"),
            Err(SolveError::Structure(_))
        ));
    }
}
