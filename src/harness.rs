//! Runs a day's sample tests, then its real puzzle input.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::registry::Day;
use crate::{debugln, normalize_input, Answer, Part, SolveError};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("sample {index} returned an error: {source}")]
    ExampleErrored {
        index: usize,
        #[source]
        source: SolveError,
    },

    #[error("sample {index} failed: expected {expected:?}, got {actual:?}")]
    ExampleFailed {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("could not read puzzle input {}: {source}", .path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Puzzle(#[from] SolveError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub skip_examples: bool,
}

/// The outcome of one successfully solved part.
#[derive(Debug, Clone)]
pub struct PartReport {
    pub day: u8,
    pub part: Part,
    pub examples_passed: usize,
    pub answer: Answer,
    pub elapsed: Duration,
}

/// Reads `DIR/NN.txt`, folding line endings.
pub fn load_input(day: &Day, dir: &Path) -> Result<String, HarnessError> {
    day.puzzle_input(dir)
        .map_err(|source| HarnessError::MissingInput {
            path: day.input_path(dir),
            source,
        })
}

fn answers_match(expected: &str, actual: &str) -> bool {
    fn lines(s: &str) -> Vec<&str> {
        s.trim_end().lines().map(str::trim_end).collect()
    }
    lines(expected) == lines(actual)
}

/// Runs the part's sample tests in order, stopping at the first failure.
///
/// Returns how many samples passed.
pub fn run_examples(day: &Day, part: Part) -> Result<usize, HarnessError> {
    let examples = day.examples(part);
    for (index, example) in examples.iter().enumerate() {
        debugln!("Day {} part {part}: sample {index}", day.number);
        let input = normalize_input(example.input);
        let answer = day
            .solver
            .solve(part, &input)
            .map_err(|source| HarnessError::ExampleErrored { index, source })?;
        if !answers_match(example.expected, &answer.value) {
            return Err(HarnessError::ExampleFailed {
                index,
                expected: example.expected.trim_end().to_owned(),
                actual: answer.value,
            });
        }
    }
    Ok(examples.len())
}

/// Runs the samples (unless skipped) and then solves `puzzle_input`.
pub fn run_part(
    day: &Day,
    part: Part,
    puzzle_input: &str,
    options: Options,
) -> Result<PartReport, HarnessError> {
    let examples_passed = if options.skip_examples {
        0
    } else {
        run_examples(day, part)?
    };

    let timer = Instant::now();
    let answer = day.solver.solve(part, puzzle_input)?;
    let elapsed = timer.elapsed();

    Ok(PartReport {
        day: day.number,
        part,
        examples_passed,
        answer,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{self, Example};
    use crate::{DaySolver, Result};

    struct Echo;

    impl DaySolver for Echo {
        fn part_one(&self, input: &str) -> Result<Answer> {
            Ok(Answer::new(input.trim()))
        }

        fn part_two(&self, _input: &str) -> Result<Answer> {
            Err(SolveError::structure("nope"))
        }
    }

    static ECHO_EXAMPLES: &[Example] = &[
        Example {
            input: "a\r\n",
            expected: "a\n",
        },
        Example {
            input: "b",
            expected: "c",
        },
        Example {
            input: "never run",
            expected: "never run",
        },
    ];

    static ECHO: Day = Day {
        number: 0,
        title: "Echo",
        prompt_one: "",
        prompt_two: "",
        examples_one: ECHO_EXAMPLES,
        examples_two: &[Example {
            input: "x",
            expected: "x",
        }],
        solver: &Echo,
    };

    #[test]
    fn first_mismatch_aborts() {
        let err = run_examples(&ECHO, Part::One).unwrap_err();
        match err {
            HarnessError::ExampleFailed {
                index,
                expected,
                actual,
            } => {
                assert_eq!(index, 1);
                assert_eq!(expected, "c");
                assert_eq!(actual, "b");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(run_part(&ECHO, Part::One, "puzzle", Options::default()).is_err());
    }

    #[test]
    fn skipping_examples_solves_puzzle() {
        let options = Options {
            skip_examples: true,
        };
        let report = run_part(&ECHO, Part::One, " puzzle ", options).unwrap();
        assert_eq!(report.answer.value, "puzzle");
        assert_eq!(report.examples_passed, 0);
    }

    #[test]
    fn errors_are_reported_with_index() {
        let err = run_examples(&ECHO, Part::Two).unwrap_err();
        assert!(matches!(err, HarnessError::ExampleErrored { index: 0, .. }));
    }

    #[test]
    fn missing_input_file() {
        let day = registry::day(1).unwrap();
        let err = load_input(day, Path::new("/nonexistent/inputs")).unwrap_err();
        match err {
            HarnessError::MissingInput { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/inputs/01.txt"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn input_line_endings_are_folded() {
        let dir = std::env::temp_dir().join(format!("advent2022-inputs-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("02.txt"), "A Y\r\nB X\r\n").unwrap();
        let day = registry::day(2).unwrap();
        let input = load_input(day, &dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(input, "A Y\nB X\n");
    }

    #[test]
    fn answers_compare_line_by_line() {
        assert!(answers_match("##..\n.##.\n", "##..  \n.##."));
        assert!(answers_match("42", "42\n\n"));
        assert!(!answers_match("##..\n.##.", "##..\n.###"));
    }
}
