//! Day 15: Beacon Exclusion Zone

use std::collections::HashSet;
use std::ops::RangeInclusive;

use itertools::Itertools;

use crate::helpers::parse;
use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/15.txt");

type Pos = glam::IVec2;

fn manhattan(a: Pos, b: Pos) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    pub pos: Pos,
    pub beacon: Pos,
}

impl Sensor {
    /// Distance to the closest beacon. No other beacon is this close.
    pub fn radius(&self) -> i32 {
        manhattan(self.pos, self.beacon)
    }

    pub fn covers(&self, pos: Pos) -> bool {
        manhattan(self.pos, pos) <= self.radius()
    }

    /// The columns of `row` within range of this sensor.
    pub fn coverage_on_row(&self, row: i32) -> Option<RangeInclusive<i32>> {
        let half = self.radius() - (self.pos.y - row).abs();
        (half >= 0).then(|| self.pos.x - half..=self.pos.x + half)
    }
}

/// Which row part one inspects and how far part two searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub row: i32,
    pub bound: i32,
}

impl Params {
    pub const SAMPLE: Params = Params { row: 10, bound: 20 };
    pub const PUZZLE: Params = Params {
        row: 2_000_000,
        bound: 4_000_000,
    };

    /// The sample report uses small coordinates; real reports are in the
    /// millions.
    pub fn for_sensors(sensors: &[Sensor]) -> Self {
        let small = sensors
            .iter()
            .flat_map(|s| [s.pos, s.beacon])
            .all(|p| p.x.abs() < 1000 && p.y.abs() < 1000);
        if small {
            Self::SAMPLE
        } else {
            Self::PUZZLE
        }
    }
}

pub fn parse_sensors(input: &str) -> Result<Vec<Sensor>> {
    parse::lines(input, Sensor::parser)
}

/// Covered columns of `row`, merged into disjoint ranges in ascending order.
pub fn coverage(sensors: &[Sensor], row: i32) -> Vec<RangeInclusive<i32>> {
    let mut merged: Vec<RangeInclusive<i32>> = Vec::new();
    let ranges = sensors
        .iter()
        .filter_map(|s| s.coverage_on_row(row))
        .sorted_by_key(|r| *r.start());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end() + 1 => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Positions on `row` that cannot hold an undetected beacon.
pub fn part_one(sensors: &[Sensor], row: i32) -> usize {
    let merged = coverage(sensors, row);
    let covered: usize = merged
        .iter()
        .map(|r| (r.end() - r.start() + 1) as usize)
        .sum();
    let beacons_on_row = sensors
        .iter()
        .map(|s| s.beacon)
        .filter(|b| b.y == row)
        .collect::<HashSet<_>>()
        .len();
    debugln!("Row {row}: {merged:?} minus {beacons_on_row} beacons");
    covered - beacons_on_row
}

/// The distress beacon is the only uncovered position in the search area,
/// so it sits just outside at least one sensor's range. Candidates are the
/// crossings of those boundary diagonals with each other and with the
/// edges of the area.
fn candidates(sensors: &[Sensor], bound: i32) -> impl Iterator<Item = Pos> + '_ {
    // Diagonals y - x = a and y + x = b.
    let rising: Vec<i32> = sensors
        .iter()
        .flat_map(|s| {
            let c = s.pos.y - s.pos.x;
            [c - s.radius() - 1, c + s.radius() + 1]
        })
        .collect();
    let falling: Vec<i32> = sensors
        .iter()
        .flat_map(|s| {
            let c = s.pos.y + s.pos.x;
            [c - s.radius() - 1, c + s.radius() + 1]
        })
        .collect();

    let crossings = rising
        .iter()
        .cartesian_product(falling.iter())
        .filter(|&(&a, &b)| (b - a) % 2 == 0)
        .map(|(&a, &b)| Pos::new((b - a) / 2, (a + b) / 2))
        .collect_vec();
    let edges = rising
        .iter()
        .flat_map(move |&a| {
            [
                Pos::new(0, a),
                Pos::new(bound, a + bound),
                Pos::new(-a, 0),
                Pos::new(bound - a, bound),
            ]
        })
        .chain(falling.iter().flat_map(move |&b| {
            [
                Pos::new(0, b),
                Pos::new(bound, b - bound),
                Pos::new(b, 0),
                Pos::new(b - bound, bound),
            ]
        }))
        .collect_vec();
    let corners = [
        Pos::new(0, 0),
        Pos::new(bound, 0),
        Pos::new(0, bound),
        Pos::new(bound, bound),
    ];

    crossings.into_iter().chain(edges).chain(corners)
}

pub fn find_distress_beacon(sensors: &[Sensor], bound: i32) -> Option<Pos> {
    let in_area = |p: &Pos| (0..=bound).contains(&p.x) && (0..=bound).contains(&p.y);
    candidates(sensors, bound)
        .filter(in_area)
        .find(|&p| !sensors.iter().any(|s| s.covers(p)))
}

pub fn tuning_frequency(pos: Pos) -> i64 {
    i64::from(pos.x) * 4_000_000 + i64::from(pos.y)
}

pub fn part_two(sensors: &[Sensor], bound: i32) -> Result<(Pos, i64)> {
    let pos = find_distress_beacon(sensors, bound).ok_or_else(|| {
        SolveError::structure(format!("every position within 0..={bound} is covered"))
    })?;
    debugln!("Distress beacon at {pos}");
    Ok((pos, tuning_frequency(pos)))
}

/// The inspected row drawn cell by cell (`#` covered, `B` beacon), or the
/// merged ranges when the row is too wide to draw.
fn row_picture(sensors: &[Sensor], row: i32) -> String {
    let merged = coverage(sensors, row);
    let (Some(first), Some(last)) = (merged.first(), merged.last()) else {
        return String::from("(nothing covered)");
    };
    let (lo, hi) = (*first.start(), *last.end());
    if hi - lo > 200 {
        return merged
            .iter()
            .map(|r| format!("{}..={}", r.start(), r.end()))
            .join("\n");
    }
    let beacons: HashSet<Pos> = sensors.iter().map(|s| s.beacon).collect();
    (lo..=hi)
        .map(|x| {
            if beacons.contains(&Pos::new(x, row)) {
                'B'
            } else if merged.iter().any(|r| r.contains(&x)) {
                '#'
            } else {
                '.'
            }
        })
        .collect()
}

pub struct BeaconExclusionZone;

impl DaySolver for BeaconExclusionZone {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let sensors = parse_sensors(input)?;
        let Params { row, .. } = Params::for_sensors(&sensors);
        let viz = Visualization::text(format!("Coverage of row {row}"), row_picture(&sensors, row));
        Ok(Answer::new(part_one(&sensors, row)).with_visualization(viz))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let sensors = parse_sensors(input)?;
        let Params { bound, .. } = Params::for_sensors(&sensors);
        let (pos, frequency) = part_two(&sensors, bound)?;
        let viz = Visualization::text(
            "Distress beacon",
            format!("x={}, y={} (searched 0..={bound})", pos.x, pos.y),
        );
        Ok(Answer::new(frequency).with_visualization(viz))
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::{parser::char::string, *};
    }

    use c::{ParseError, Parser, Stream};

    fn point<Input>(prefix: &'static str) -> impl Parser<Input, Output = Pos>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        (
            c::string(prefix),
            c::string("x="),
            parse::decimal_integer(),
            c::string(", y="),
            parse::decimal_integer(),
        )
            .map(|(_, _, x, _, y)| Pos::new(x, y))
    }

    impl Sensor {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            // "Sensor at x=2, y=18: closest beacon is at x=-2, y=15"
            (
                point("Sensor at "),
                point(": closest beacon is at "),
            )
                .map(|(pos, beacon)| Sensor { pos, beacon })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_detected() {
        let sensors = parse_sensors(EXAMPLE).unwrap();
        assert_eq!(Params::for_sensors(&sensors), Params::SAMPLE);
        let far = Sensor {
            pos: Pos::new(3_000_000, 10),
            beacon: Pos::new(3_000_100, 10),
        };
        assert_eq!(Params::for_sensors(&[far]), Params::PUZZLE);
    }

    #[test]
    fn test_part_one() {
        let sensors = parse_sensors(EXAMPLE).unwrap();
        assert_eq!(part_one(&sensors, 10), 26);
        assert_eq!(coverage(&sensors, 10), vec![-2..=24]);
    }

    #[test]
    fn test_part_two() {
        let sensors = parse_sensors(EXAMPLE).unwrap();
        let (pos, frequency) = part_two(&sensors, 20).unwrap();
        assert_eq!(pos, Pos::new(14, 11));
        assert_eq!(frequency, 56000011);
    }

    #[test]
    fn beacon_in_a_corner() {
        // Covers everything in 0..=2 except (2, 2).
        let sensor = Sensor {
            pos: Pos::new(0, 0),
            beacon: Pos::new(3, 0),
        };
        assert_eq!(find_distress_beacon(&[sensor], 2), Some(Pos::new(2, 2)));
    }

    #[test]
    fn sample_row_picture() {
        let sensors = parse_sensors(EXAMPLE).unwrap();
        let picture = row_picture(&sensors, 10);
        assert_eq!(picture.len(), 27);
        assert_eq!(picture.matches('B').count(), 1);
        assert_eq!(&picture[4..5], "B");
    }

    #[test]
    fn malformed_report() {
        let err = parse_sensors("Sensor at x=1, y=2: closest beacon is at x=3\n").unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 1, .. }));
    }
}
