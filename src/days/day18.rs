//! Day 18: Boiling Boulders

use std::collections::{BTreeMap, HashSet};

use pathfinding::directed::bfs::bfs_reach;

use crate::helpers::parse;
use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/18.txt");

type Pos = glam::IVec3;

const FACES: [Pos; 6] = [
    Pos::new(1, 0, 0),
    Pos::new(-1, 0, 0),
    Pos::new(0, 1, 0),
    Pos::new(0, -1, 0),
    Pos::new(0, 0, 1),
    Pos::new(0, 0, -1),
];

#[derive(Debug, Clone)]
pub struct Droplet {
    cubes: HashSet<Pos>,
    min: Pos,
    max: Pos,
}

impl Droplet {
    pub fn new(cubes: impl IntoIterator<Item = Pos>) -> Result<Self> {
        let cubes: HashSet<Pos> = cubes.into_iter().collect();
        let mut iter = cubes.iter().copied();
        let first = iter
            .next()
            .ok_or_else(|| SolveError::structure("the scan shows no cubes"))?;
        let (min, max) = iter.fold((first, first), |(min, max), c| (min.min(c), max.max(c)));
        Ok(Self { cubes, min, max })
    }

    /// Faces of each cube not shared with another cube, found by `exposed`.
    fn faces<'a>(&'a self, exposed: impl Fn(Pos) -> bool + 'a) -> impl Iterator<Item = Pos> + 'a {
        self.cubes
            .iter()
            .flat_map(|&cube| FACES.iter().map(move |&face| (cube, cube + face)))
            .filter(move |&(_, neighbor)| exposed(neighbor))
            .map(|(cube, _)| cube)
    }

    /// The cube owning every face that touches anything but another cube.
    pub fn surface(&self) -> impl Iterator<Item = Pos> + '_ {
        self.faces(move |neighbor| !self.cubes.contains(&neighbor))
    }

    /// Air reachable from outside the droplet, within a box one larger than
    /// the droplet on every side.
    pub fn outside_air(&self) -> HashSet<Pos> {
        let (lo, hi) = (self.min - Pos::ONE, self.max + Pos::ONE);
        let in_box = move |p: Pos| p.cmpge(lo).all() && p.cmple(hi).all();
        bfs_reach(lo, |&p| {
            FACES
                .iter()
                .map(move |&face| p + face)
                .filter(|&n| in_box(n) && !self.cubes.contains(&n))
                .collect::<Vec<_>>()
        })
        .collect()
    }

    /// The cube owning every face that touches outside air.
    pub fn exterior(&self) -> impl Iterator<Item = Pos> + '_ {
        let air = self.outside_air();
        debugln!("{} cells of outside air", air.len());
        self.faces(move |neighbor| air.contains(&neighbor))
    }
}

fn faces_per_layer(faces: impl Iterator<Item = Pos>) -> Visualization {
    let mut layers: BTreeMap<i32, u32> = BTreeMap::new();
    for cube in faces {
        *layers.entry(cube.z).or_default() += 1;
    }
    Visualization::series(
        "Exposed faces per layer",
        "z",
        "faces",
        layers.into_iter().map(|(z, n)| (z as f64, n as f64)),
    )
}

pub fn parse_droplet(input: &str) -> Result<Droplet> {
    Droplet::new(parse::lines(input, parsing::cube)?)
}

pub fn part_one(droplet: &Droplet) -> usize {
    droplet.surface().count()
}

pub fn part_two(droplet: &Droplet) -> usize {
    droplet.exterior().count()
}

pub struct BoilingBoulders;

impl DaySolver for BoilingBoulders {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let droplet = parse_droplet(input)?;
        let viz = faces_per_layer(droplet.surface());
        Ok(Answer::new(part_one(&droplet)).with_visualization(viz))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let droplet = parse_droplet(input)?;
        let viz = faces_per_layer(droplet.exterior());
        Ok(Answer::new(part_two(&droplet)).with_visualization(viz))
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::*;
    }

    use c::{ParseError, Parser, Stream};

    pub fn cube<Input>() -> impl Parser<Input, Output = Pos>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        // "2,2,2"
        (
            parse::decimal_integer(),
            c::token(','),
            parse::decimal_integer(),
            c::token(','),
            parse::decimal_integer(),
        )
            .map(|(x, _, y, _, z)| Pos::new(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_one() {
        assert_eq!(part_one(&parse_droplet(EXAMPLE).unwrap()), 64);
    }

    #[test]
    fn test_part_two() {
        assert_eq!(part_two(&parse_droplet(EXAMPLE).unwrap()), 58);
    }

    #[test]
    fn two_touching_cubes() {
        let droplet = parse_droplet("1,1,1\n2,1,1\n").unwrap();
        assert_eq!(part_one(&droplet), 10);
        assert_eq!(part_two(&droplet), 10);
    }

    #[test]
    fn hollow_shell_hides_its_inside() {
        // A 3x3x3 block with the middle cube missing.
        let cubes = (0..27)
            .map(|i| Pos::new(i % 3, i / 3 % 3, i / 9))
            .filter(|&p| p != Pos::ONE);
        let droplet = Droplet::new(cubes).unwrap();
        assert_eq!(part_one(&droplet), 54 + 6);
        assert_eq!(part_two(&droplet), 54);
    }

    #[test]
    fn duplicate_cubes_count_once() {
        let droplet = parse_droplet("1,1,1\n1,1,1\n").unwrap();
        assert_eq!(part_one(&droplet), 6);
    }

    #[test]
    fn empty_scan() {
        assert!(matches!(parse_droplet(""), Err(SolveError::Structure(_))));
    }
}
