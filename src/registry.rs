//! The static table of registered days.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::days::*;
use crate::{normalize_input, DaySolver, Part};

/// A sample input and the answer it must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub input: &'static str,
    pub expected: &'static str,
}

const fn example(input: &'static str, expected: &'static str) -> Example {
    Example { input, expected }
}

pub struct Day {
    pub number: u8,
    pub title: &'static str,
    pub prompt_one: &'static str,
    pub prompt_two: &'static str,
    pub examples_one: &'static [Example],
    pub examples_two: &'static [Example],
    pub solver: &'static dyn DaySolver,
}

impl Day {
    pub fn examples(&self, part: Part) -> &'static [Example] {
        match part {
            Part::One => self.examples_one,
            Part::Two => self.examples_two,
        }
    }

    pub fn prompt(&self, part: Part) -> &'static str {
        match part {
            Part::One => self.prompt_one,
            Part::Two => self.prompt_two,
        }
    }

    /// `dir/NN.txt`
    pub fn input_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{:02}.txt", self.number))
    }

    /// Reads the day's puzzle input from `dir`, folding line endings.
    pub fn puzzle_input(&self, dir: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.input_path(dir)).map(|raw| normalize_input(&raw))
    }
}

impl fmt::Debug for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Day")
            .field("number", &self.number)
            .field("title", &self.title)
            .field("examples_one", &self.examples_one.len())
            .field("examples_two", &self.examples_two.len())
            .finish_non_exhaustive()
    }
}

pub fn days() -> &'static [Day] {
    DAYS
}

pub fn day(number: u8) -> Option<&'static Day> {
    DAYS.iter().find(|day| day.number == number)
}

pub static DAYS: &[Day] = &[
    Day {
        number: 1,
        title: "Calorie Counting",
        prompt_one: "Find the Elf carrying the most Calories. How many total Calories is that Elf carrying?",
        prompt_two: "Find the top three Elves carrying the most Calories. How many Calories are those Elves carrying in total?",
        examples_one: &[example(day01::EXAMPLE, "24000")],
        examples_two: &[example(day01::EXAMPLE, "45000")],
        solver: &day01::CalorieCounting,
    },
    Day {
        number: 2,
        title: "Rock Paper Scissors",
        prompt_one: "What would your total score be if everything goes exactly according to your strategy guide?",
        prompt_two: "Following the Elf's instructions for the second column, what would your total score be if everything goes exactly according to your strategy guide?",
        examples_one: &[example(day02::EXAMPLE, "15")],
        examples_two: &[example(day02::EXAMPLE, "12")],
        solver: &day02::RockPaperScissors,
    },
    Day {
        number: 3,
        title: "Rucksack Reorganization",
        prompt_one: "Find the item type that appears in both compartments of each rucksack. What is the sum of the priorities of those item types?",
        prompt_two: "Find the item type that corresponds to the badges of each three-Elf group. What is the sum of the priorities of those item types?",
        examples_one: &[example(day03::EXAMPLE, "157")],
        examples_two: &[example(day03::EXAMPLE, "70")],
        solver: &day03::RucksackReorganization,
    },
    Day {
        number: 4,
        title: "Camp Cleanup",
        prompt_one: "In how many assignment pairs does one range fully contain the other?",
        prompt_two: "In how many assignment pairs do the ranges overlap?",
        examples_one: &[example(day04::EXAMPLE, "2")],
        examples_two: &[example(day04::EXAMPLE, "4")],
        solver: &day04::CampCleanup,
    },
    Day {
        number: 5,
        title: "Supply Stacks",
        prompt_one: "After the rearrangement procedure completes, what crate ends up on top of each stack?",
        prompt_two: "After the rearrangement procedure completes, what crate ends up on top of each stack?",
        examples_one: &[example(day05::EXAMPLE, "CMZ")],
        examples_two: &[example(day05::EXAMPLE, "MCD")],
        solver: &day05::SupplyStacks,
    },
    Day {
        number: 6,
        title: "Tuning Trouble",
        prompt_one: "How many characters need to be processed before the first start-of-packet marker is detected?",
        prompt_two: "How many characters need to be processed before the first start-of-message marker is detected?",
        examples_one: &[
            example("mjqjpqmgbljsphdztnvjfqwrcgsmlb", "7"),
            example("bvwbjplbgvbhsrlpgdmjqwftvncz", "5"),
            example("nppdvjthqldpwncqszvftbrmjlhg", "6"),
            example("nznrnfrfntjfmvfwmzdfjlvtqnbhcprsg", "10"),
            example("zcfzfwzzqfrljwzlrfnpqdbhtmscgvjw", "11"),
        ],
        examples_two: &[
            example("mjqjpqmgbljsphdztnvjfqwrcgsmlb", "19"),
            example("bvwbjplbgvbhsrlpgdmjqwftvncz", "23"),
            example("nppdvjthqldpwncqszvftbrmjlhg", "23"),
            example("nznrnfrfntjfmvfwmzdfjlvtqnbhcprsg", "29"),
            example("zcfzfwzzqfrljwzlrfnpqdbhtmscgvjw", "26"),
        ],
        solver: &day06::TuningTrouble,
    },
    Day {
        number: 7,
        title: "No Space Left On Device",
        prompt_one: "Find all of the directories with a total size of at most 100000. What is the sum of the total sizes of those directories?",
        prompt_two: "Find the smallest directory that, if deleted, would free up enough space. What is the total size of that directory?",
        examples_one: &[example(day07::EXAMPLE, "95437")],
        examples_two: &[example(day07::EXAMPLE, "24933642")],
        solver: &day07::NoSpaceLeftOnDevice,
    },
    Day {
        number: 8,
        title: "Treetop Tree House",
        prompt_one: "How many trees are visible from outside the grid?",
        prompt_two: "What is the highest scenic score possible for any tree?",
        examples_one: &[example(day08::EXAMPLE, "21")],
        examples_two: &[example(day08::EXAMPLE, "8")],
        solver: &day08::TreetopTreeHouse,
    },
    Day {
        number: 9,
        title: "Rope Bridge",
        prompt_one: "Simulate your complete hypothetical series of motions. How many positions does the tail of the rope visit at least once?",
        prompt_two: "Simulate your complete series of motions on a larger rope with ten knots. How many positions does the tail of the rope visit at least once?",
        examples_one: &[example(day09::EXAMPLE, "13")],
        examples_two: &[
            example(day09::EXAMPLE, "1"),
            example(day09::LARGER_EXAMPLE, "36"),
        ],
        solver: &day09::RopeBridge,
    },
    Day {
        number: 10,
        title: "Cathode-Ray Tube",
        prompt_one: "Find the signal strength during the 20th, 60th, 100th, 140th, 180th, and 220th cycles. What is the sum of these six signal strengths?",
        prompt_two: "Render the image given by your program. What eight capital letters appear on your CRT?",
        examples_one: &[example(day10::EXAMPLE, "13140")],
        examples_two: &[example(day10::EXAMPLE, day10::EXAMPLE_CRT)],
        solver: &day10::CathodeRayTube,
    },
    Day {
        number: 11,
        title: "Monkey in the Middle",
        prompt_one: "What is the level of monkey business after 20 rounds of stuff-slinging simian shenanigans?",
        prompt_two: "What is the level of monkey business after 10000 rounds?",
        examples_one: &[example(day11::EXAMPLE, "10605")],
        examples_two: &[example(day11::EXAMPLE, "2713310158")],
        solver: &day11::MonkeyInTheMiddle,
    },
    Day {
        number: 12,
        title: "Hill Climbing Algorithm",
        prompt_one: "What is the fewest steps required to move from your current position to the location that should get the best signal?",
        prompt_two: "What is the fewest steps required to move starting from any square with elevation a to the location that should get the best signal?",
        examples_one: &[example(day12::EXAMPLE, "31")],
        examples_two: &[example(day12::EXAMPLE, "29")],
        solver: &day12::HillClimbingAlgorithm,
    },
    Day {
        number: 13,
        title: "Distress Signal",
        prompt_one: "Determine which pairs of packets are already in the right order. What is the sum of the indices of those pairs?",
        prompt_two: "Organize all of the packets into the correct order. What is the decoder key for the distress signal?",
        examples_one: &[example(day13::EXAMPLE, "13")],
        examples_two: &[example(day13::EXAMPLE, "140")],
        solver: &day13::DistressSignal,
    },
    Day {
        number: 14,
        title: "Regolith Reservoir",
        prompt_one: "How many units of sand come to rest before sand starts flowing into the abyss below?",
        prompt_two: "Using your scan, simulate the falling sand until the source of the sand becomes blocked. How many units of sand come to rest?",
        examples_one: &[example(day14::EXAMPLE, "24")],
        examples_two: &[example(day14::EXAMPLE, "93")],
        solver: &day14::RegolithReservoir,
    },
    Day {
        number: 15,
        title: "Beacon Exclusion Zone",
        prompt_one: "Consult the report from the sensors you just deployed. In the row where y=2000000, how many positions cannot contain a beacon?",
        prompt_two: "Find the only possible position for the distress beacon. What is its tuning frequency?",
        examples_one: &[example(day15::EXAMPLE, "26")],
        examples_two: &[example(day15::EXAMPLE, "56000011")],
        solver: &day15::BeaconExclusionZone,
    },
    Day {
        number: 16,
        title: "Proboscidea Volcanium",
        prompt_one: "Work out the steps to release the most pressure in 30 minutes. What is the most pressure you can release?",
        prompt_two: "With you and an elephant working together for 26 minutes, what is the most pressure you could release?",
        examples_one: &[example(day16::EXAMPLE, "1651")],
        examples_two: &[example(day16::EXAMPLE, "1707")],
        solver: &day16::ProboscideaVolcanium,
    },
    Day {
        number: 17,
        title: "Pyroclastic Flow",
        prompt_one: "How many units tall will the tower of rocks be after 2022 rocks have stopped falling?",
        prompt_two: "How many units tall will the tower be after 1000000000000 rocks have stopped?",
        examples_one: &[example(day17::EXAMPLE, "3068")],
        examples_two: &[example(day17::EXAMPLE, "1514285714288")],
        solver: &day17::PyroclasticFlow,
    },
    Day {
        number: 18,
        title: "Boiling Boulders",
        prompt_one: "What is the surface area of your scanned lava droplet?",
        prompt_two: "What is the exterior surface area of your scanned lava droplet?",
        examples_one: &[example(day18::EXAMPLE, "64")],
        examples_two: &[example(day18::EXAMPLE, "58")],
        solver: &day18::BoilingBoulders,
    },
    Day {
        number: 19,
        title: "Not Enough Minerals",
        prompt_one: "What do you get if you add up the quality level of all of the blueprints in your list?",
        prompt_two: "Determine the largest number of geodes you could open using each of the first three blueprints. What do you get if you multiply these numbers together?",
        examples_one: &[example(day19::EXAMPLE, "33")],
        examples_two: &[example(day19::EXAMPLE, "3472")],
        solver: &day19::NotEnoughMinerals,
    },
    Day {
        number: 20,
        title: "Grove Positioning System",
        prompt_one: "Mix your encrypted file exactly once. What is the sum of the three numbers that form the grove coordinates?",
        prompt_two: "Apply the decryption key and mix your encrypted file ten times. What is the sum of the three numbers that form the grove coordinates?",
        examples_one: &[example(day20::EXAMPLE, "3")],
        examples_two: &[example(day20::EXAMPLE, "1623178306")],
        solver: &day20::GrovePositioningSystem,
    },
    Day {
        number: 21,
        title: "Monkey Math",
        prompt_one: "What number will the monkey named root yell?",
        prompt_two: "What number do you yell to pass root's equality test?",
        examples_one: &[example(day21::EXAMPLE, "152")],
        examples_two: &[example(day21::EXAMPLE, "301")],
        solver: &day21::MonkeyMath,
    },
    Day {
        number: 22,
        title: "Monkey Map",
        prompt_one: "Follow the path given in the monkeys' notes. What is the final password?",
        prompt_two: "Fold the map into a cube, then follow the path given in the monkeys' notes. What is the final password?",
        examples_one: &[example(day22::EXAMPLE, "6032")],
        examples_two: &[],
        solver: &day22::MonkeyMap,
    },
];

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use maplit::btreeset;

    use super::*;

    #[test]
    fn numbered_in_order() {
        let numbers: Vec<u8> = days().iter().map(|day| day.number).collect();
        assert_eq!(numbers, (1..=22).collect::<Vec<_>>());
        assert_eq!(day(17).map(|d| d.title), Some("Pyroclastic Flow"));
        assert!(day(23).is_none());
        assert!(day(0).is_none());
    }

    #[test]
    fn every_part_has_a_prompt() {
        for day in days() {
            for part in Part::BOTH {
                assert!(!day.prompt(part).is_empty(), "day {} part {part}", day.number);
            }
        }
    }

    #[test]
    fn days_without_part_two_samples() {
        let missing: BTreeSet<u8> = days()
            .iter()
            .filter(|day| day.examples(Part::Two).is_empty())
            .map(|day| day.number)
            .collect();
        assert_eq!(missing, btreeset! {22});
    }

    #[test]
    fn input_paths_are_zero_padded() {
        let path = day(3).unwrap().input_path(Path::new("inputs"));
        assert_eq!(path, Path::new("inputs/03.txt"));
    }
}
