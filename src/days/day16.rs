//! Day 16: Proboscidea Volcanium

use std::collections::HashMap;
use std::fmt;

use bitvec::BitArr;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::helpers::{checked, parse};
use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/16.txt");

/// One bit per valve worth opening, indexed by [`Volcano::bit`].
type OpenSet = BitArr!(for 64, in u64);

pub const START: ValveName = ValveName('A', 'A');

/// Largest number of useful valves the two-explorer combination accepts.
const MAX_SHARED_VALVES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValveName(pub char, pub char);

impl fmt::Display for ValveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValveId(pub usize);

/// One line of the scan, before tunnel names are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLine {
    pub name: ValveName,
    pub flow_rate: u32,
    pub tunnels: Vec<ValveName>,
}

#[derive(Debug, Clone)]
pub struct Valve {
    pub name: ValveName,
    pub flow_rate: u32,
    pub tunnels: Vec<ValveId>,
}

#[derive(Debug)]
pub struct Volcano {
    /// Indexed by [`ValveId`].
    valves: Vec<Valve>,
    start: ValveId,
    /// Bit index of each valve with a nonzero flow rate.
    bits: Vec<Option<usize>>,
    /// The valves with a nonzero flow rate, by bit index.
    useful: Vec<ValveId>,
}

impl Volcano {
    pub fn new(scan: Vec<ScanLine>) -> Result<Self> {
        let mut ids = HashMap::new();
        for (i, line) in scan.iter().enumerate() {
            if ids.insert(line.name, ValveId(i)).is_some() {
                return Err(SolveError::structure(format!(
                    "valve {} is scanned twice",
                    line.name
                )));
            }
        }
        let start = *ids
            .get(&START)
            .ok_or_else(|| SolveError::structure(format!("there is no valve {START}")))?;

        let mut valves = Vec::with_capacity(scan.len());
        for line in scan {
            let tunnels = line
                .tunnels
                .iter()
                .map(|name| {
                    ids.get(name).copied().ok_or_else(|| {
                        SolveError::structure(format!(
                            "valve {} leads to unknown valve {name}",
                            line.name
                        ))
                    })
                })
                .collect::<Result<_>>()?;
            valves.push(Valve {
                name: line.name,
                flow_rate: line.flow_rate,
                tunnels,
            });
        }

        let useful: Vec<ValveId> = (0..valves.len())
            .map(ValveId)
            .filter(|id| valves[id.0].flow_rate > 0)
            .collect();
        if useful.len() > OpenSet::ZERO.len() {
            return Err(SolveError::structure(format!(
                "{} valves have flow, at most {} are supported",
                useful.len(),
                OpenSet::ZERO.len()
            )));
        }
        let mut bits = vec![None; valves.len()];
        for (bit, id) in useful.iter().enumerate() {
            bits[id.0] = Some(bit);
        }

        Ok(Self {
            valves,
            start,
            bits,
            useful,
        })
    }

    #[inline]
    pub fn valve(&self, id: ValveId) -> &Valve {
        &self.valves[id.0]
    }

    #[inline]
    pub fn bit(&self, id: ValveId) -> Option<usize> {
        self.bits[id.0]
    }

    pub fn useful_count(&self) -> usize {
        self.useful.len()
    }

    fn all_useful(&self) -> OpenSet {
        let mut all = OpenSet::ZERO;
        all[..self.useful.len()].fill(true);
        all
    }

    fn names(&self, set: u64) -> String {
        let set = OpenSet::new([set]);
        set.iter_ones()
            .filter_map(|bit| self.useful.get(bit))
            .map(|&id| self.valve(id).name)
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Move,
    Open,
}

/// A search state. `score` is the pressure the opened valves will have
/// released by the horizon, so it never changes while moving.
#[derive(Debug, Clone, Copy)]
struct Node {
    valve: ValveId,
    opened: OpenSet,
    score: u32,
    action: Action,
    parent: Option<usize>,
}

fn key(opened: OpenSet) -> u64 {
    opened.into_inner()[0]
}

/// Everything one explorer can achieve within a horizon.
#[derive(Debug, Clone)]
pub struct Exploration {
    pub best_score: u32,
    /// The steps of one best run, starting at the first valve.
    pub best_path: Vec<(ValveId, Action)>,
    /// The best score that leaves exactly the given set of valves open.
    pub best_per_open_set: HashMap<u64, u32>,
}

/// Breadth-first search one minute at a time. A state is dropped when a
/// state at the same valve with the same valves open has already been seen
/// with at least the same score: the earlier one can only do better.
pub fn explore(volcano: &Volcano, horizon: u32) -> Result<Exploration> {
    let all_open = volcano.all_useful();
    let mut arena = vec![Node {
        valve: volcano.start,
        opened: OpenSet::ZERO,
        score: 0,
        action: Action::Start,
        parent: None,
    }];
    let mut frontier = vec![0];
    let mut seen: HashMap<(ValveId, OpenSet), u32> = HashMap::new();
    seen.insert((volcano.start, OpenSet::ZERO), 0);
    let mut best_per_open_set = HashMap::from([(0, 0)]);
    let mut best = 0;

    for minute in 0..horizon {
        let remaining = horizon - minute - 1;
        let mut next: HashMap<(ValveId, OpenSet), usize> = HashMap::new();

        for &index in &frontier {
            let node = arena[index];
            if node.opened == all_open {
                continue;
            }
            let valve = volcano.valve(node.valve);

            let mut successors: SmallVec<[Node; 8]> = SmallVec::new();
            if let Some(bit) = volcano.bit(node.valve) {
                if !node.opened[bit] && remaining > 0 {
                    let mut opened = node.opened;
                    opened.set(bit, true);
                    successors.push(Node {
                        opened,
                        score: checked::add(
                            node.score,
                            checked::mul(valve.flow_rate, remaining)?,
                        )?,
                        action: Action::Open,
                        parent: Some(index),
                        ..node
                    });
                }
            }
            for &tunnel in &valve.tunnels {
                successors.push(Node {
                    valve: tunnel,
                    action: Action::Move,
                    parent: Some(index),
                    ..node
                });
            }

            for successor in successors {
                let signature = (successor.valve, successor.opened);
                if seen.get(&signature).map_or(false, |&s| s >= successor.score) {
                    continue;
                }
                seen.insert(signature, successor.score);
                let per_set = best_per_open_set.entry(key(successor.opened)).or_insert(0);
                *per_set = successor.score.max(*per_set);

                arena.push(successor);
                let new_index = arena.len() - 1;
                if successor.score > arena[best].score {
                    best = new_index;
                }
                next.insert(signature, new_index);
            }
        }

        frontier = next.into_values().collect();
        debugln!(
            "Minute {}: {} states, best so far {}",
            minute + 1,
            frontier.len(),
            arena[best].score
        );
    }

    let mut best_path = Vec::new();
    let mut cursor = Some(best);
    while let Some(index) = cursor {
        let node = arena[index];
        best_path.push((node.valve, node.action));
        cursor = node.parent;
    }
    best_path.reverse();

    Ok(Exploration {
        best_score: arena[best].score,
        best_path,
        best_per_open_set,
    })
}

/// The best combined score of two explorers opening disjoint sets of valves,
/// and the sets they open.
pub fn best_pair(volcano: &Volcano, exploration: &Exploration) -> Result<(u32, u64, u64)> {
    let k = volcano.useful_count();
    if k > MAX_SHARED_VALVES {
        return Err(SolveError::structure(format!(
            "{k} valves have flow, too many to split between two explorers"
        )));
    }

    // best_subset[mask] is the best score, and the set achieving it, among
    // all subsets of `mask`.
    let mut best_subset = vec![(0u32, 0u64); 1 << k];
    for (&set, &score) in &exploration.best_per_open_set {
        let slot = &mut best_subset[set as usize];
        if score > slot.0 {
            *slot = (score, set);
        }
    }
    for bit in 0..k {
        for mask in 0..best_subset.len() {
            if mask & (1 << bit) != 0 {
                let without = best_subset[mask ^ (1 << bit)];
                if without.0 > best_subset[mask].0 {
                    best_subset[mask] = without;
                }
            }
        }
    }

    let full = best_subset.len() - 1;
    let mut best = (0, 0, 0);
    for mask in 0..best_subset.len() {
        let (a, set_a) = best_subset[mask];
        let (b, set_b) = best_subset[full ^ mask];
        let score = checked::add(a, b)?;
        if score > best.0 {
            best = (score, set_a, set_b);
        }
    }
    Ok(best)
}

pub fn parse_scan(input: &str) -> Result<Vec<ScanLine>> {
    parse::lines(input, ScanLine::parser)
}

pub fn part_one(volcano: &Volcano) -> Result<Exploration> {
    explore(volcano, 30)
}

pub fn part_two(volcano: &Volcano) -> Result<(u32, u64, u64)> {
    let exploration = explore(volcano, 26)?;
    best_pair(volcano, &exploration)
}

/// `AA -> DD -> [DD] -> CC`, with opened valves in brackets.
pub fn describe_path(volcano: &Volcano, path: &[(ValveId, Action)]) -> String {
    path.iter()
        .map(|&(id, action)| {
            let name = volcano.valve(id).name;
            match action {
                Action::Open => format!("[{name}]"),
                Action::Start | Action::Move => name.to_string(),
            }
        })
        .join(" -> ")
}

pub struct ProboscideaVolcanium;

impl DaySolver for ProboscideaVolcanium {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let volcano = Volcano::new(parse_scan(input)?)?;
        let exploration = part_one(&volcano)?;
        let viz = Visualization::text(
            "Best route",
            describe_path(&volcano, &exploration.best_path),
        );
        Ok(Answer::new(exploration.best_score).with_visualization(viz))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let volcano = Volcano::new(parse_scan(input)?)?;
        let (score, mine, theirs) = part_two(&volcano)?;
        let viz = Visualization::text(
            "Valves opened",
            format!(
                "you: {}\nelephant: {}",
                volcano.names(mine),
                volcano.names(theirs)
            ),
        );
        Ok(Answer::new(score).with_visualization(viz))
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::{
            parser::char::{self, string},
            *,
        };
    }

    use c::{ParseError, Parser, Stream};

    impl ValveName {
        fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            (c::char::upper(), c::char::upper()).map(|(a, b)| ValveName(a, b))
        }
    }

    impl ScanLine {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            // "Valve AA has flow rate=0; tunnels lead to valves DD, II, BB"
            // "Valve HH has flow rate=22; tunnel leads to valve GG"
            let tunnels = c::choice((
                c::attempt(c::string("; tunnels lead to valves ")),
                c::string("; tunnel leads to valve "),
            ));
            (
                c::string("Valve "),
                ValveName::parser(),
                c::string(" has flow rate="),
                parse::decimal_integer(),
                tunnels,
                c::sep_by1(ValveName::parser(), c::string(", ")),
            )
                .map(|(_, name, _, flow_rate, _, tunnels)| ScanLine {
                    name,
                    flow_rate,
                    tunnels,
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Volcano {
        Volcano::new(parse_scan(EXAMPLE).unwrap()).unwrap()
    }

    #[test]
    fn parses_both_tunnel_phrasings() {
        let scan = parse_scan(EXAMPLE).unwrap();
        assert_eq!(scan.len(), 10);
        assert_eq!(
            scan[7],
            ScanLine {
                name: ValveName('H', 'H'),
                flow_rate: 22,
                tunnels: vec![ValveName('G', 'G')],
            }
        );
        assert_eq!(scan[0].tunnels.len(), 3);
    }

    #[test]
    fn test_part_one() {
        let volcano = example();
        let exploration = part_one(&volcano).unwrap();
        assert_eq!(exploration.best_score, 1651);
        let route = describe_path(&volcano, &exploration.best_path);
        assert!(route.starts_with("AA -> "), "{route}");
        assert!(route.contains("[DD]"), "{route}");
    }

    #[test]
    fn test_part_two() {
        let volcano = example();
        let (score, mine, theirs) = part_two(&volcano).unwrap();
        assert_eq!(score, 1707);
        assert_eq!(mine & theirs, 0);
    }

    #[test]
    fn short_horizons() {
        let volcano = example();
        // Walking to DD takes one minute and opening it another.
        assert_eq!(explore(&volcano, 2).unwrap().best_score, 0);
        assert_eq!(explore(&volcano, 3).unwrap().best_score, 20);
    }

    #[test]
    fn best_for_single_valve() {
        let volcano = example();
        let exploration = part_one(&volcano).unwrap();
        let dd = ValveId(3);
        let bit = volcano.bit(dd).unwrap();
        assert_eq!(exploration.best_per_open_set[&(1 << bit)], 20 * 28);
    }

    #[test]
    fn pressure_overflow_is_an_error() {
        let scan = parse_scan(
            "Valve AA has flow rate=4000000000; tunnel leads to valve BB\n\
             Valve BB has flow rate=0; tunnel leads to valve AA\n",
        )
        .unwrap();
        let volcano = Volcano::new(scan).unwrap();
        assert!(matches!(part_one(&volcano), Err(SolveError::Arithmetic(_))));
        assert_eq!(explore(&volcano, 1).unwrap().best_score, 0);
    }

    #[test]
    fn unknown_tunnel() {
        let scan = parse_scan("Valve AA has flow rate=0; tunnel leads to valve ZZ\n").unwrap();
        assert!(matches!(Volcano::new(scan), Err(SolveError::Structure(_))));
    }

    #[test]
    fn missing_start() {
        let scan = parse_scan("Valve BB has flow rate=1; tunnel leads to valve BB\n").unwrap();
        assert!(matches!(Volcano::new(scan), Err(SolveError::Structure(_))));
    }
}
