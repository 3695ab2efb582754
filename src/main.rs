//! Command-line runner: `advent2022 [DAY...] [--part 1|2] [--inputs DIR]
//! [--skip-examples] [--show] [--all]`

use std::path::PathBuf;
use std::process::ExitCode;

use advent2022::harness::{self, HarnessError, Options, PartReport};
use advent2022::registry::{self, Day};
use advent2022::{Part, ANSI_BOLD, ANSI_ITALIC, ANSI_RESET};
use prettytable::{format, row, Table};
use rayon::prelude::*;

#[derive(Debug)]
struct Args {
    days: Vec<u8>,
    part: Option<Part>,
    inputs: PathBuf,
    options: Options,
    show: bool,
}

fn parse_part(s: &str) -> Result<Part, String> {
    s.parse()
        .ok()
        .and_then(Part::from_number)
        .ok_or_else(|| format!("there is no part {s:?}"))
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    let part = pargs.opt_value_from_fn("--part", parse_part)?;
    let inputs = pargs
        .opt_value_from_str("--inputs")?
        .unwrap_or_else(|| PathBuf::from("inputs"));
    let skip_examples = pargs.contains("--skip-examples");
    let show = pargs.contains("--show");
    let all = pargs.contains("--all");

    let mut days = Vec::new();
    while let Some(day) = pargs.opt_free_from_str::<u8>()? {
        days.push(day);
    }
    let rest = pargs.finish();
    if !rest.is_empty() {
        eprintln!("Warning: unused arguments left: {rest:?}");
    }
    if all {
        days.clear();
    }

    Ok(Args {
        days,
        part,
        inputs,
        options: Options { skip_examples },
        show,
    })
}

/// One row of the summary.
struct Outcome {
    day: &'static Day,
    part: Option<Part>,
    result: Result<PartReport, HarnessError>,
}

fn solve_day(day: &'static Day, args: &Args) -> Vec<Outcome> {
    let input = match harness::load_input(day, &args.inputs) {
        Ok(input) => input,
        Err(err) => {
            return vec![Outcome {
                day,
                part: None,
                result: Err(err),
            }]
        }
    };

    let parts = match args.part {
        Some(part) => vec![part],
        None => Part::BOTH.to_vec(),
    };
    parts
        .into_iter()
        .map(|part| Outcome {
            day,
            part: Some(part),
            result: harness::run_part(day, part, &input, args.options),
        })
        .collect()
}

fn selected_days(args: &Args) -> Result<Vec<&'static Day>, u8> {
    if args.days.is_empty() {
        return Ok(registry::days().iter().collect());
    }
    args.days
        .iter()
        .map(|&n| registry::day(n).ok_or(n))
        .collect()
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let days = match selected_days(&args) {
        Ok(days) => days,
        Err(n) => {
            eprintln!("Error: day {n} is not implemented");
            return ExitCode::FAILURE;
        }
    };

    let outcomes: Vec<Outcome> = days
        .par_iter()
        .flat_map_iter(|&day| solve_day(day, &args))
        .collect();

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Day", "Part", "Answer", "Time", "Status"]);
    let mut failed = false;
    for outcome in &outcomes {
        let part = outcome.part.map_or("-".to_owned(), |p| p.to_string());
        match &outcome.result {
            Ok(report) => {
                let status = if args.options.skip_examples {
                    "ok".to_owned()
                } else {
                    format!("ok ({} samples)", report.examples_passed)
                };
                table.add_row(row![
                    outcome.day.number,
                    part,
                    report.answer.value,
                    format!("{:.2?}", report.elapsed),
                    status
                ]);
            }
            Err(err) => {
                failed = true;
                table.add_row(row![outcome.day.number, part, "", "", err.to_string()]);
            }
        }
    }
    table.printstd();

    if args.show {
        for outcome in &outcomes {
            let (Some(part), Ok(report)) = (outcome.part, &outcome.result) else {
                continue;
            };
            println!(
                "\n{ANSI_BOLD}Day {} part {part}: {}{ANSI_RESET}",
                outcome.day.number, outcome.day.title
            );
            println!("{ANSI_ITALIC}{}{ANSI_RESET}", outcome.day.prompt(part));
            if let Some(viz) = &report.answer.visualization {
                println!("{viz}");
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
