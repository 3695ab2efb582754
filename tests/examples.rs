use advent2022::harness;
use advent2022::registry;
use advent2022::{Part, SolveError};

#[test]
fn every_sample_passes() {
    for day in registry::days() {
        for part in Part::BOTH {
            let passed = harness::run_examples(day, part)
                .unwrap_or_else(|err| panic!("day {} part {part}: {err}", day.number));
            assert_eq!(passed, day.examples(part).len());
        }
    }
}

#[test]
fn unsolved_part_is_reported() {
    let day = registry::day(22).unwrap();
    let err = day.solver.solve(Part::Two, "..\n\n1\n").unwrap_err();
    assert_eq!(err, SolveError::Unsolved(Part::Two));
}

#[test]
fn crlf_input_is_folded() {
    let day = registry::day(1).unwrap();
    let input = advent2022::normalize_input("1000\r\n2000\r\n\r\n4000\r\n");
    let answer = day.solver.solve(Part::One, &input).unwrap();
    assert_eq!(answer.value, "4000");
}
