//! Day 3: Rucksack Reorganization

use std::fmt;

use bitvec::BitArr;
use itertools::Itertools;

use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/03.txt");

type PrioritySet = BitArr!(for 64, in u64);

/// An item type, identified by its priority (`a..=z` is 1-26, `A..=Z` 27-52).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Item {
    priority: u8,
}

impl TryFrom<char> for Item {
    type Error = char;

    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        let priority = match value {
            'a'..='z' => value as u8 - b'a' + 1,
            'A'..='Z' => value as u8 - b'A' + 27,
            _ => return Err(value),
        };
        Ok(Self { priority })
    }
}

impl Item {
    #[inline]
    pub fn priority(self) -> u32 {
        self.priority as u32
    }

    pub fn character(self) -> char {
        if self.priority <= 26 {
            (b'a' + self.priority - 1) as char
        } else {
            (b'A' + self.priority - 27) as char
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({})", self.character(), self.priority)
    }
}

/// The distinct item types present in some collection of items.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ItemSet(PrioritySet);

impl ItemSet {
    pub fn of(items: &[Item]) -> Self {
        let mut set = PrioritySet::ZERO;
        for item in items {
            set.set(item.priority as usize, true);
        }
        Self(set)
    }

    pub fn intersection(self, other: Self) -> Self {
        let [a] = self.0.into_inner();
        let [b] = other.0.into_inner();
        Self(PrioritySet::new([a & b]))
    }

    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.iter_ones().map(|priority| Item {
            priority: priority as u8,
        })
    }

    /// The single item in the set, or `None` if there are zero or several.
    pub fn only_item(&self) -> Option<Item> {
        self.items().exactly_one().ok()
    }
}

#[derive(Debug, Clone)]
pub struct Rucksack {
    items: Vec<Item>,
}

impl Rucksack {
    pub fn compartments(&self) -> (&[Item], &[Item]) {
        self.items.split_at(self.items.len() / 2)
    }

    pub fn item_set(&self) -> ItemSet {
        ItemSet::of(&self.items)
    }

    /// The item type packed into both compartments.
    pub fn misplaced_item(&self) -> Option<Item> {
        let (left, right) = self.compartments();
        ItemSet::of(left).intersection(ItemSet::of(right)).only_item()
    }
}

pub fn parse_rucksacks(input: &str) -> Result<Vec<Rucksack>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let line = line.trim_end();
            if line.len() % 2 != 0 {
                return Err(SolveError::parse(
                    i + 1,
                    format!("rucksack has an odd number of items ({})", line.len()),
                ));
            }
            let items = line
                .chars()
                .map(Item::try_from)
                .collect::<std::result::Result<_, _>>()
                .map_err(|c| SolveError::parse(i + 1, format!("{c:?} is not an item type")))?;
            Ok(Rucksack { items })
        })
        .collect()
}

pub fn misplaced_items(rucksacks: &[Rucksack]) -> Result<Vec<Item>> {
    rucksacks
        .iter()
        .enumerate()
        .map(|(i, rucksack)| {
            rucksack.misplaced_item().ok_or_else(|| {
                SolveError::structure(format!(
                    "rucksack {} does not have exactly one misplaced item type",
                    i + 1
                ))
            })
        })
        .collect()
}

pub fn badges(rucksacks: &[Rucksack]) -> Result<Vec<Item>> {
    if rucksacks.len() % 3 != 0 {
        return Err(SolveError::structure(format!(
            "{} rucksacks cannot be split into groups of three",
            rucksacks.len()
        )));
    }
    rucksacks
        .chunks(3)
        .enumerate()
        .map(|(group, elves)| {
            let common = elves
                .iter()
                .map(Rucksack::item_set)
                .reduce(ItemSet::intersection);
            debugln!("Group {group}: {:?}", common.map(|set| set.items().collect_vec()));
            common.and_then(|set| set.only_item()).ok_or_else(|| {
                SolveError::structure(format!(
                    "group {} does not share exactly one item type",
                    group + 1
                ))
            })
        })
        .collect()
}

fn priority_chart(title: &str, items: &[Item]) -> Visualization {
    Visualization::bars(title, "rucksack", "priority", items.iter().map(|item| item.priority()))
}

pub struct RucksackReorganization;

impl DaySolver for RucksackReorganization {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let items = misplaced_items(&parse_rucksacks(input)?)?;
        let sum: u32 = items.iter().map(|item| item.priority()).sum();
        Ok(Answer::new(sum).with_visualization(priority_chart("Misplaced item priorities", &items)))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let items = badges(&parse_rucksacks(input)?)?;
        let sum: u32 = items.iter().map(|item| item.priority()).sum();
        Ok(Answer::new(sum).with_visualization(priority_chart("Badge priorities", &items)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities() {
        for (c, p) in [('a', 1), ('z', 26), ('A', 27), ('Z', 52)] {
            let item = Item::try_from(c).unwrap();
            assert_eq!(item.priority(), p);
            assert_eq!(item.character(), c);
        }
        assert_eq!(Item::try_from('1'), Err('1'));
    }

    #[test]
    fn test_part_one() {
        let items = misplaced_items(&parse_rucksacks(EXAMPLE).unwrap()).unwrap();
        let chars: String = items.iter().map(|item| item.character()).collect();
        assert_eq!(chars, "pLPvts");
        assert_eq!(RucksackReorganization.part_one(EXAMPLE).unwrap().value, "157");
    }

    #[test]
    fn test_part_two() {
        let items = badges(&parse_rucksacks(EXAMPLE).unwrap()).unwrap();
        let chars: String = items.iter().map(|item| item.character()).collect();
        assert_eq!(chars, "rZ");
        assert_eq!(RucksackReorganization.part_two(EXAMPLE).unwrap().value, "70");
    }

    #[test]
    fn odd_length_rucksack() {
        let err = parse_rucksacks("abab\nabc\n").unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 2, .. }));
    }

    #[test]
    fn incomplete_group() {
        let rucksacks = parse_rucksacks("aa\nbb\n").unwrap();
        assert!(matches!(badges(&rucksacks), Err(SolveError::Structure(_))));
    }
}
