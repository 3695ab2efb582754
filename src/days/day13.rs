//! Day 13: Distress Signal

use std::cmp::Ordering;
use std::fmt;
use std::slice;

use itertools::Itertools;

use crate::helpers::{paragraphs, parse};
use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/13.txt");

/// A packet value: an integer, or a list of further values.
#[derive(Debug, Clone)]
pub enum Packet {
    Int(u32),
    List(Vec<Packet>),
}

impl Packet {
    /// `[[n]]`, the shape of the divider packets.
    pub fn divider(n: u32) -> Self {
        Packet::List(vec![Packet::List(vec![Packet::Int(n)])])
    }
}

impl Ord for Packet {
    /// Integers compare numerically and lists lexicographically, with a
    /// shorter list first when it is a prefix of the other. An integer
    /// compared against a list is treated as a one-element list.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Packet::Int(left), Packet::Int(right)) => left.cmp(right),
            (Packet::List(left), Packet::List(right)) => left.cmp(right),
            (Packet::Int(_), Packet::List(right)) => slice::from_ref(self).cmp(right.as_slice()),
            (Packet::List(left), Packet::Int(_)) => left.as_slice().cmp(slice::from_ref(other)),
        }
    }
}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality follows the ordering, so `[[1]]` equals `1`.
impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Packet {}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Packet::Int(i) => write!(f, "{i}"),
            Packet::List(items) => write!(f, "[{}]", items.iter().join(",")),
        }
    }
}

pub type PacketPair = (Packet, Packet);

pub fn parse_pairs(input: &str) -> Result<Vec<PacketPair>> {
    paragraphs(input)
        .map(|paragraph| {
            let packets = paragraph
                .numbered()
                .map(|(line_number, line)| {
                    parse::numbered_line(line_number, line, Packet::parser())
                })
                .collect::<Result<Vec<_>>>()?;
            packets.into_iter().collect_tuple().ok_or_else(|| {
                SolveError::parse(
                    paragraph.first_line,
                    format!("expected a pair of packets, found {}", paragraph.lines.len()),
                )
            })
        })
        .collect()
}

/// 1-based indices of the pairs that are already in the right order.
pub fn ordered_pairs(pairs: &[PacketPair]) -> Vec<usize> {
    pairs
        .iter()
        .enumerate()
        .filter(|(i, (left, right))| {
            let ordered = left < right;
            debugln!("== Pair {} == {left} vs {right}: {ordered}", i + 1);
            ordered
        })
        .map(|(i, _)| i + 1)
        .collect()
}

pub fn part_one(pairs: &[PacketPair]) -> usize {
    ordered_pairs(pairs).into_iter().sum()
}

/// The product of the 1-based positions the two divider packets would take
/// if every packet were sorted along with them.
pub fn part_two(pairs: &[PacketPair]) -> usize {
    let (first, second) = (Packet::divider(2), Packet::divider(6));
    let packets = pairs.iter().flat_map(|(left, right)| [left, right]);
    let (before_first, before_second) =
        packets.fold((0, 0), |(a, b), packet| {
            (a + usize::from(*packet < first), b + usize::from(*packet < second))
        });
    (before_first + 1) * (before_second + 2)
}

fn sorted_with_dividers(pairs: &[PacketPair]) -> String {
    let dividers = [Packet::divider(2), Packet::divider(6)];
    pairs
        .iter()
        .flat_map(|(left, right)| [(left, false), (right, false)])
        .chain(dividers.iter().map(|d| (d, true)))
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(packet, divider)| {
            if divider {
                format!("{packet}  <- divider")
            } else {
                packet.to_string()
            }
        })
        .join("\n")
}

pub struct DistressSignal;

impl DaySolver for DistressSignal {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let pairs = parse_pairs(input)?;
        let ordered = ordered_pairs(&pairs);
        let viz = Visualization::text(
            "Pairs in the right order",
            ordered.iter().map(|i| format!("pair {i}")).join("\n"),
        );
        Ok(Answer::new(part_one(&pairs)).with_visualization(viz))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let pairs = parse_pairs(input)?;
        let viz = Visualization::text("Sorted packets", sorted_with_dividers(&pairs));
        Ok(Answer::new(part_two(&pairs)).with_visualization(viz))
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::*;
    }

    use c::{ParseError, Parser, Stream};

    impl Packet {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            packet()
        }
    }

    fn packet_<Input>() -> impl Parser<Input, Output = Packet>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        let list = c::between(
            c::token('['),
            c::token(']'),
            c::sep_by(packet(), c::token(',')),
        );

        c::choice((
            parse::decimal_integer().map(Packet::Int),
            list.map(Packet::List),
        ))
    }

    c::parser! {
        fn packet[Input]()(Input) -> Packet
        where [Input: Stream<Token = char>]
        {
            packet_()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[track_caller]
    fn packet(s: &str) -> Packet {
        parse::from_str(s, Packet::parser()).unwrap()
    }

    #[test]
    fn test_part_one() {
        let pairs = parse_pairs(EXAMPLE).unwrap();
        assert_eq!(ordered_pairs(&pairs), vec![1, 2, 4, 6]);
        assert_eq!(part_one(&pairs), 13);
    }

    #[test]
    fn test_part_two() {
        let pairs = parse_pairs(EXAMPLE).unwrap();
        assert_eq!(part_two(&pairs), 140);
    }

    #[test]
    fn nested_structure() {
        let parsed = packet("[1,[2,3],4]");
        let Packet::List(items) = &parsed else {
            panic!("expected a list, got {parsed:?}");
        };
        assert!(matches!(items[..], [Packet::Int(1), Packet::List(_), Packet::Int(4)]));
        assert_eq!(parsed.to_string(), "[1,[2,3],4]");
    }

    #[test]
    fn comparisons() {
        assert!(packet("[[1],[2,3]]") < packet("[[1],[4]]"));
        assert!(packet("[9]") > packet("[[8,7,6]]"));
        assert!(packet("[]") < packet("[3]"));
        assert!(packet("[[[]]]") > packet("[[]]"));
        assert_eq!(packet("[[1]]"), packet("1"));
    }

    #[test]
    fn sorted_output_marks_dividers() {
        let pairs = parse_pairs(EXAMPLE).unwrap();
        let sorted = sorted_with_dividers(&pairs);
        let lines: Vec<_> = sorted.lines().collect();
        assert_eq!(lines.len(), 18);
        assert_eq!(lines[0], "[]");
        assert_eq!(lines[9], "[[2]]  <- divider");
        assert_eq!(lines[13], "[[6]]  <- divider");
    }

    #[test]
    fn odd_packet_out() {
        let err = parse_pairs("[1]\n[2]\n\n[3]\n").unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 4, .. }), "{err:?}");
        let err = parse_pairs("[1]\n[2,]\n").unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 2, .. }), "{err:?}");
    }

    fn any_packet() -> impl Strategy<Value = Packet> {
        let leaf = (0u32..20).prop_map(Packet::Int);
        leaf.prop_recursive(4, 32, 5, |inner| {
            prop::collection::vec(inner, 0..5).prop_map(Packet::List)
        })
    }

    proptest! {
        #[test]
        fn display_parses_back(p in any_packet()) {
            let text = p.to_string();
            prop_assert_eq!(packet(&text).to_string(), text);
        }

        #[test]
        fn ordering_is_antisymmetric(a in any_packet(), b in any_packet()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }
    }
}
