//! Day 20: Grove Positioning System

use index_vec::IndexVec;
use itertools::Itertools;

use crate::helpers::{checked, parse};
use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/20.txt");

pub const DECRYPTION_KEY: i64 = 811_589_153;

/// How far past the zero the grove coordinates are read.
pub const COORDINATE_OFFSETS: [usize; 3] = [1000, 2000, 3000];

index_vec::define_index_type! {
    pub struct NodeId = u32;
}

#[derive(Debug, Clone, Copy)]
struct Node {
    value: i64,
    prev: NodeId,
    next: NodeId,
}

/// The encrypted file as a circular doubly-linked list. Nodes live in an
/// arena in their original order, which is also the order they move in.
#[derive(Debug, Clone)]
pub struct Mixer {
    nodes: IndexVec<NodeId, Node>,
    /// Where printing starts: the first number, or whatever followed it
    /// when it last moved.
    head: NodeId,
    zero: NodeId,
}

impl Mixer {
    pub fn new(values: &[i64]) -> Result<Self> {
        let n = values.len();
        if n == 0 {
            return Err(SolveError::structure("the file is empty"));
        }

        let mut zero = None;
        let mut nodes = IndexVec::with_capacity(n);
        for (i, &value) in values.iter().enumerate() {
            let id = nodes.push(Node {
                value,
                prev: NodeId::from_usize((i + n - 1) % n),
                next: NodeId::from_usize((i + 1) % n),
            });
            if value == 0 && zero.replace(id).is_some() {
                return Err(SolveError::structure(format!(
                    "a second zero appears at position {i}"
                )));
            }
        }
        let zero = zero.ok_or_else(|| SolveError::structure("the file contains no zero"))?;

        Ok(Self {
            nodes,
            head: NodeId::from_usize(0),
            zero,
        })
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Walks `steps` links forward, or backward when negative.
    fn walk(&self, from: NodeId, steps: i64) -> NodeId {
        let mut at = from;
        if steps >= 0 {
            for _ in 0..steps {
                at = self.nodes[at].next;
            }
        } else {
            for _ in 0..steps.unsigned_abs() {
                at = self.nodes[at].prev;
            }
        }
        at
    }

    fn unlink(&mut self, id: NodeId) {
        let Node { prev, next, .. } = self.nodes[id];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        if self.head == id {
            self.head = next;
        }
    }

    fn insert_after(&mut self, id: NodeId, dest: NodeId) {
        let next = self.nodes[dest].next;
        self.nodes[id].prev = dest;
        self.nodes[id].next = next;
        self.nodes[next].prev = id;
        self.nodes[dest].next = id;
    }

    /// One mixing pass: every number, in original order, moves forward by
    /// its value (backward if negative).
    ///
    /// With the number lifted out, the other `n - 1` form the cycle it
    /// moves around, so only the value modulo `n - 1` matters.
    pub fn mix(&mut self) {
        let n = self.len();
        if n < 2 {
            return;
        }
        let cycle = (n - 1) as i64;
        for id in self.nodes.indices() {
            let forward = self.nodes[id].value.rem_euclid(cycle);
            if forward == 0 {
                continue;
            }
            let before = self.nodes[id].prev;
            self.unlink(id);
            // Go whichever way round is shorter.
            let steps = if forward <= cycle / 2 {
                forward
            } else {
                forward - cycle
            };
            let dest = self.walk(before, steps);
            self.insert_after(id, dest);
        }
    }

    /// Multiplies every value by `key`.
    pub fn decrypt(&mut self, key: i64) -> Result<()> {
        for node in self.nodes.iter_mut() {
            node.value = checked::mul(node.value, key)?;
        }
        Ok(())
    }

    /// The values in list order, starting from the head.
    pub fn values(&self) -> Vec<i64> {
        let mut values = Vec::with_capacity(self.len());
        let mut at = self.head;
        for _ in 0..self.len() {
            values.push(self.nodes[at].value);
            at = self.nodes[at].next;
        }
        values
    }

    /// The values [`COORDINATE_OFFSETS`] places after the zero.
    pub fn grove_coordinates(&self) -> [i64; 3] {
        COORDINATE_OFFSETS.map(|offset| {
            let steps = (offset % self.len()) as i64;
            self.nodes[self.walk(self.zero, steps)].value
        })
    }
}

pub fn parse_file(input: &str) -> Result<Vec<i64>> {
    parse::lines(input, parse::decimal_integer)
}

fn decode(values: &[i64], key: i64, passes: usize) -> Result<(Mixer, [i64; 3], i64)> {
    let mut mixer = Mixer::new(values)?;
    mixer.decrypt(key)?;
    for pass in 1..=passes {
        mixer.mix();
        if mixer.len() <= 10 {
            debugln!("After {pass} rounds: {}", mixer.values().iter().join(", "));
        }
    }
    let coordinates = mixer.grove_coordinates();
    let sum = coordinates
        .iter()
        .try_fold(0i64, |sum, &c| checked::add(sum, c))?;
    Ok((mixer, coordinates, sum))
}

pub fn part_one(values: &[i64]) -> Result<(Mixer, [i64; 3], i64)> {
    decode(values, 1, 1)
}

pub fn part_two(values: &[i64]) -> Result<(Mixer, [i64; 3], i64)> {
    decode(values, DECRYPTION_KEY, 10)
}

fn answer((mixer, coordinates, sum): (Mixer, [i64; 3], i64)) -> Answer {
    let mut body = COORDINATE_OFFSETS
        .iter()
        .zip(coordinates)
        .map(|(offset, value)| format!("{offset} after 0: {value}"))
        .join("\n");
    if mixer.len() <= 20 {
        body = format!("{}\n\n{body}", mixer.values().iter().join(", "));
    }
    Answer::new(sum).with_visualization(Visualization::text("Grove coordinates", body))
}

pub struct GrovePositioningSystem;

impl DaySolver for GrovePositioningSystem {
    fn part_one(&self, input: &str) -> Result<Answer> {
        part_one(&parse_file(input)?).map(answer)
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        part_two(&parse_file(input)?).map(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_part_one() {
        let values = parse_file(EXAMPLE).unwrap();
        let (mixer, coordinates, sum) = part_one(&values).unwrap();
        assert_eq!(mixer.values(), vec![1, 2, -3, 4, 0, 3, -2]);
        assert_eq!(coordinates, [4, -3, 2]);
        assert_eq!(sum, 3);
    }

    #[test]
    fn test_part_two() {
        let values = parse_file(EXAMPLE).unwrap();
        let (_, coordinates, sum) = part_two(&values).unwrap();
        assert_eq!(coordinates, [811589153, 2434767459, -1623178306]);
        assert_eq!(sum, 1623178306);
    }

    #[test]
    fn zero_is_required_exactly_once() {
        assert!(matches!(Mixer::new(&[1, 2]), Err(SolveError::Structure(_))));
        assert!(matches!(
            Mixer::new(&[0, 1, 0]),
            Err(SolveError::Structure(_))
        ));
        assert!(matches!(Mixer::new(&[]), Err(SolveError::Structure(_))));
    }

    #[test]
    fn lone_zero() {
        let (_, coordinates, sum) = part_two(&[0]).unwrap();
        assert_eq!(coordinates, [0, 0, 0]);
        assert_eq!(sum, 0);
    }

    #[test]
    fn moving_by_a_full_lap_is_a_no_op() {
        // Five numbers: moving 4 places around the other four ends where it started.
        let mut mixer = Mixer::new(&[4, 0, 1, 2, 3]).unwrap();
        mixer.mix();
        let values = mixer.values();
        assert_eq!(values.len(), 5);
        let at = values.iter().position(|&v| v == 4).unwrap();
        assert_eq!(values[(at + 1) % 5], 0);
    }

    fn file() -> impl Strategy<Value = Vec<i64>> {
        (prop::collection::vec(prop_oneof![-50i64..0, 1i64..50], 0..12), any::<prop::sample::Index>())
            .prop_map(|(mut values, at)| {
                values.insert(at.index(values.len() + 1), 0);
                values
            })
    }

    proptest! {
        #[test]
        fn mixing_permutes_values(values in file(), passes in 1usize..4) {
            let mut mixer = Mixer::new(&values).unwrap();
            for _ in 0..passes {
                mixer.mix();
                let mixed = mixer.values();
                prop_assert_eq!(mixed.len(), values.len());
                let mut sorted = mixed.clone();
                sorted.sort_unstable();
                let mut expected = values.clone();
                expected.sort_unstable();
                prop_assert_eq!(sorted, expected);
            }
        }

        #[test]
        fn links_form_one_cycle(values in file()) {
            let mut mixer = Mixer::new(&values).unwrap();
            mixer.mix();
            let n = mixer.len();
            let mut seen = vec![false; n];
            let mut at = mixer.head;
            for _ in 0..n {
                prop_assert!(!seen[at.index()]);
                seen[at.index()] = true;
                let next = mixer.nodes[at].next;
                prop_assert_eq!(mixer.nodes[next].prev, at);
                at = next;
            }
            prop_assert_eq!(at, mixer.head);
        }
    }
}
