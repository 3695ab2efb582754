//! Day 19: Not Enough Minerals

use std::fmt;

use itertools::Itertools;

use crate::helpers::{checked, div_ceil, parse};
use crate::{debugln, Answer, DaySolver, Result, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/19.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Ore,
    Clay,
    Obsidian,
    Geode,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Ore,
        Resource::Clay,
        Resource::Obsidian,
        Resource::Geode,
    ];
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Ore => "ore",
            Resource::Clay => "clay",
            Resource::Obsidian => "obsidian",
            Resource::Geode => "geode",
        };
        f.write_str(name)
    }
}

/// A count per [`Resource`], indexed by `resource as usize`.
type Amounts = [u32; 4];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    pub id: u32,
    /// What each kind of robot costs, indexed by the resource it collects.
    pub costs: [Amounts; 4],
}

impl Blueprint {
    /// A factory builds one robot a minute, so collecting more of a resource
    /// per minute than the most expensive recipe needs is pointless.
    fn robot_caps(&self) -> Amounts {
        let mut caps = [u32::MAX; 4];
        for resource in [Resource::Ore, Resource::Clay, Resource::Obsidian] {
            let r = resource as usize;
            caps[r] = self.costs.iter().map(|cost| cost[r]).max().unwrap_or(0);
        }
        caps
    }
}

#[derive(Debug, Clone, Copy)]
struct State {
    minute: u32,
    resources: Amounts,
    robots: Amounts,
}

impl State {
    fn start() -> Self {
        Self {
            minute: 0,
            resources: [0; 4],
            robots: [1, 0, 0, 0],
        }
    }

    fn geodes_if_idle(&self, horizon: u32) -> u32 {
        let g = Resource::Geode as usize;
        self.resources[g] + self.robots[g] * (horizon - self.minute)
    }

    /// Minutes to wait before `cost` is affordable, or `None` if nothing
    /// collects one of the resources it needs.
    fn wait_for(&self, cost: &Amounts) -> Option<u32> {
        let mut wait = 0;
        for r in 0..cost.len() {
            if cost[r] > self.resources[r] {
                if self.robots[r] == 0 {
                    return None;
                }
                wait = wait.max(div_ceil(cost[r] - self.resources[r], self.robots[r]));
            }
        }
        Some(wait)
    }
}

/// One robot order: the minute it finished and what it collects.
pub type Build = (u32, Resource);

/// Depth-first search over which robot to save up for next.
struct Search<'a> {
    blueprint: &'a Blueprint,
    horizon: u32,
    caps: Amounts,
    plan: Vec<Build>,
    best: u32,
    best_plan: Vec<Build>,
}

impl Search<'_> {
    fn visit(&mut self, state: State) {
        let idle = state.geodes_if_idle(self.horizon);
        if idle > self.best {
            self.best = idle;
            self.best_plan = self.plan.clone();
        }

        // Even a new geode robot every remaining minute cannot win.
        let remaining = self.horizon - state.minute;
        let optimistic = idle + remaining * remaining.saturating_sub(1) / 2;
        if optimistic <= self.best {
            return;
        }

        for robot in Resource::ALL.into_iter().rev() {
            let kind = robot as usize;
            if state.robots[kind] >= self.caps[kind] {
                continue;
            }
            let cost = &self.blueprint.costs[kind];
            let Some(wait) = state.wait_for(cost) else {
                continue;
            };
            // The robot must be finished before time runs out.
            if wait >= remaining {
                continue;
            }

            let elapsed = wait + 1;
            let mut next = state;
            next.minute += elapsed;
            for r in 0..next.resources.len() {
                next.resources[r] = state.resources[r] + state.robots[r] * elapsed - cost[r];
            }
            next.robots[kind] += 1;

            self.plan.push((next.minute, robot));
            self.visit(next);
            self.plan.pop();
        }
    }
}

/// The most geodes `blueprint` can open within `horizon` minutes, and one
/// build order that achieves it.
pub fn max_geodes(blueprint: &Blueprint, horizon: u32) -> (u32, Vec<Build>) {
    let mut search = Search {
        blueprint,
        horizon,
        caps: blueprint.robot_caps(),
        plan: Vec::new(),
        best: 0,
        best_plan: Vec::new(),
    };
    search.visit(State::start());
    debugln!(
        "Blueprint {}: {} geodes in {horizon} minutes",
        blueprint.id,
        search.best
    );
    (search.best, search.best_plan)
}

pub fn parse_blueprints(input: &str) -> Result<Vec<Blueprint>> {
    parse::lines(input, Blueprint::parser)
}

/// Geodes per blueprint within 24 minutes, and the sum of quality levels.
pub fn part_one(blueprints: &[Blueprint]) -> Result<(Vec<u32>, u32)> {
    let geodes = blueprints
        .iter()
        .map(|blueprint| max_geodes(blueprint, 24).0)
        .collect_vec();
    let quality = blueprints
        .iter()
        .zip(&geodes)
        .try_fold(0u32, |sum, (blueprint, &geodes)| {
            checked::add(sum, checked::mul(blueprint.id, geodes)?)
        })?;
    Ok((geodes, quality))
}

/// Geodes for the first three blueprints within 32 minutes, and their
/// product.
pub fn part_two(blueprints: &[Blueprint]) -> Result<(Vec<u32>, u64)> {
    let geodes = blueprints
        .iter()
        .take(3)
        .map(|blueprint| max_geodes(blueprint, 32).0)
        .collect_vec();
    let product = geodes
        .iter()
        .try_fold(1u64, |product, &g| checked::mul(product, u64::from(g)))?;
    Ok((geodes, product))
}

fn geode_bars(geodes: &[u32]) -> Visualization {
    Visualization::bars(
        "Maximum geodes per blueprint",
        "blueprint",
        "geodes",
        geodes.iter().copied(),
    )
}

pub struct NotEnoughMinerals;

impl DaySolver for NotEnoughMinerals {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let (geodes, quality) = part_one(&parse_blueprints(input)?)?;
        Ok(Answer::new(quality).with_visualization(geode_bars(&geodes)))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let (geodes, product) = part_two(&parse_blueprints(input)?)?;
        Ok(Answer::new(product).with_visualization(geode_bars(&geodes)))
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

    fn sentence<Input>(text: &'static str) -> impl Parser<Input, Output = ()>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        c::char::spaces().with(c::string(text)).map(|_| ())
    }

    impl Blueprint {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            let id = sentence("Blueprint")
                .with(c::char::spaces())
                .with(parse::decimal_integer())
                .skip(c::token(':'));
            let ore = sentence("Each ore robot costs ")
                .with(parse::decimal_integer())
                .skip(c::string(" ore."));
            let clay = sentence("Each clay robot costs ")
                .with(parse::decimal_integer())
                .skip(c::string(" ore."));
            let obsidian = (
                sentence("Each obsidian robot costs "),
                parse::decimal_integer(),
                c::string(" ore and "),
                parse::decimal_integer(),
                c::string(" clay."),
            )
                .map(|(_, ore, _, clay, _)| (ore, clay));
            let geode = (
                sentence("Each geode robot costs "),
                parse::decimal_integer(),
                c::string(" ore and "),
                parse::decimal_integer(),
                c::string(" obsidian."),
            )
                .map(|(_, ore, _, obsidian, _)| (ore, obsidian));

            (id, ore, clay, obsidian, geode).map(
                |(id, ore, clay, (obsidian_ore, obsidian_clay), (geode_ore, geode_obsidian))| {
                    Blueprint {
                        id,
                        costs: [
                            [ore, 0, 0, 0],
                            [clay, 0, 0, 0],
                            [obsidian_ore, obsidian_clay, 0, 0],
                            [geode_ore, 0, geode_obsidian, 0],
                        ],
                    }
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolveError;

    /// Replays a build order minute by minute and counts the geodes.
    #[track_caller]
    fn replay(blueprint: &Blueprint, plan: &[Build], horizon: u32) -> u32 {
        let mut resources = [0u32; 4];
        let mut robots = [1u32, 0, 0, 0];
        let mut orders = plan.iter().peekable();
        for minute in 1..=horizon {
            let order = orders.next_if(|(finished, _)| *finished == minute);
            if let Some(&(_, robot)) = order {
                let cost = &blueprint.costs[robot as usize];
                for r in 0..4 {
                    assert!(resources[r] >= cost[r], "cannot afford {robot} at {minute}");
                    resources[r] -= cost[r];
                }
            }
            for r in 0..4 {
                resources[r] += robots[r];
            }
            if let Some(&(_, robot)) = order {
                robots[robot as usize] += 1;
            }
        }
        assert!(orders.next().is_none());
        resources[Resource::Geode as usize]
    }

    #[test]
    fn parses_costs() {
        let blueprints = parse_blueprints(EXAMPLE).unwrap();
        assert_eq!(blueprints.len(), 2);
        assert_eq!(
            blueprints[0],
            Blueprint {
                id: 1,
                costs: [[4, 0, 0, 0], [2, 0, 0, 0], [3, 14, 0, 0], [2, 0, 7, 0]],
            }
        );
    }

    #[test]
    fn test_part_one() {
        let blueprints = parse_blueprints(EXAMPLE).unwrap();
        assert_eq!(part_one(&blueprints).unwrap(), (vec![9, 12], 33));
    }

    #[test]
    fn test_part_two() {
        let blueprints = parse_blueprints(EXAMPLE).unwrap();
        assert_eq!(part_two(&blueprints).unwrap(), (vec![56, 62], 3472));
    }

    #[test]
    fn best_plan_replays() {
        let blueprints = parse_blueprints(EXAMPLE).unwrap();
        for blueprint in &blueprints {
            let (geodes, plan) = max_geodes(blueprint, 24);
            assert_eq!(replay(blueprint, &plan, 24), geodes);
        }
    }

    #[test]
    fn too_little_time() {
        let blueprints = parse_blueprints(EXAMPLE).unwrap();
        assert_eq!(max_geodes(&blueprints[0], 10).0, 0);
    }

    #[test]
    fn malformed_blueprint() {
        let input = EXAMPLE.replace("costs 3 ore and 8 clay", "costs 3 ore and eight clay");
        let err = parse_blueprints(&input).unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 2, .. }), "{err:?}");
    }
}
