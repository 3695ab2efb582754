//! Day 21: Monkey Math

use std::collections::HashMap;
use std::fmt;

use index_vec::IndexVec;
use itertools::Itertools;

use crate::helpers::{checked, parse};
use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/21.txt");

pub const ROOT: &str = "root";
pub const HUMAN: &str = "humn";

index_vec::define_index_type! {
    pub struct MonkeyId = u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn apply(self, left: i64, right: i64) -> Result<i64> {
        match self {
            Operator::Add => checked::add(left, right),
            Operator::Sub => checked::sub(left, right),
            Operator::Mul => checked::mul(left, right),
            Operator::Div => checked::div(left, right),
        }
    }

    /// The left operand that makes `left op right == target`.
    pub fn solve_left(self, target: i64, right: i64) -> Result<i64> {
        match self {
            Operator::Add => checked::sub(target, right),
            Operator::Sub => checked::add(target, right),
            Operator::Mul => checked::div_exact(target, right),
            Operator::Div => checked::mul(target, right),
        }
    }

    /// The right operand that makes `left op right == target`.
    pub fn solve_right(self, target: i64, left: i64) -> Result<i64> {
        match self {
            Operator::Add => checked::sub(target, left),
            Operator::Sub => checked::sub(left, target),
            Operator::Mul => checked::div_exact(target, left),
            Operator::Div => checked::div_exact(left, target),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        };
        write!(f, "{c}")
    }
}

/// An operand as written in the notes: another monkey, or a number given
/// inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Monkey(String),
    Number(i64),
}

/// A job as written in the notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawJob {
    Number(i64),
    Operation(Operand, Operator, Operand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Number(i64),
    Operation(MonkeyId, Operator, MonkeyId),
}

/// Which operand of an operation depends on the unknown monkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// One step of working back from a target value to the unknown monkey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inversion {
    pub monkey: String,
    pub target: i64,
}

#[derive(Debug, Clone)]
pub struct Monkeys {
    names: IndexVec<MonkeyId, String>,
    ids: HashMap<String, MonkeyId>,
    jobs: IndexVec<MonkeyId, Job>,
}

impl Monkeys {
    pub fn new(notes: Vec<(String, RawJob)>) -> Result<Self> {
        let mut names = IndexVec::with_capacity(notes.len());
        let mut ids = HashMap::new();
        for (name, _) in &notes {
            let id = names.push(name.clone());
            if ids.insert(name.clone(), id).is_some() {
                return Err(SolveError::structure(format!("monkey {name} has two jobs")));
            }
        }

        // Inline numbers become anonymous monkeys after the named ones.
        let mut literals = Vec::new();
        let mut operand = |operand: &Operand, by: &str| match operand {
            Operand::Monkey(name) => ids.get(name).copied().ok_or_else(|| {
                SolveError::structure(format!("{by} listens to unknown monkey {name}"))
            }),
            Operand::Number(n) => {
                literals.push(*n);
                Ok(MonkeyId::from_usize(notes.len() + literals.len() - 1))
            }
        };

        let mut jobs: IndexVec<MonkeyId, Job> = IndexVec::with_capacity(notes.len());
        for (name, job) in &notes {
            jobs.push(match job {
                RawJob::Number(n) => Job::Number(*n),
                RawJob::Operation(left, op, right) => {
                    Job::Operation(operand(left, name)?, *op, operand(right, name)?)
                }
            });
        }
        for n in literals {
            names.push(n.to_string());
            jobs.push(Job::Number(n));
        }

        Ok(Self { names, ids, jobs })
    }

    pub fn id(&self, name: &str) -> Result<MonkeyId> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| SolveError::structure(format!("there is no monkey {name}")))
    }

    pub fn name(&self, id: MonkeyId) -> &str {
        &self.names[id]
    }

    pub fn job(&self, id: MonkeyId) -> Job {
        self.jobs[id]
    }

    /// What `id` yells. Every operation resolved along the way is replaced by
    /// its number, so asking again is immediate.
    pub fn yell(&mut self, id: MonkeyId) -> Result<i64> {
        let mut in_progress = vec![false; self.jobs.len()];
        self.yell_memoized(id, &mut in_progress)
    }

    fn yell_memoized(&mut self, id: MonkeyId, in_progress: &mut [bool]) -> Result<i64> {
        let (left, op, right) = match self.jobs[id] {
            Job::Number(n) => return Ok(n),
            Job::Operation(left, op, right) => (left, op, right),
        };
        if std::mem::replace(&mut in_progress[id.index()], true) {
            return Err(self.cycle_error(id));
        }
        let value = op.apply(
            self.yell_memoized(left, in_progress)?,
            self.yell_memoized(right, in_progress)?,
        )?;
        self.jobs[id] = Job::Number(value);
        Ok(value)
    }

    /// What `id` yells, without remembering anything.
    pub fn yell_cold(&self, id: MonkeyId) -> Result<i64> {
        self.yell_cold_bounded(id, self.jobs.len())
    }

    fn yell_cold_bounded(&self, id: MonkeyId, depth: usize) -> Result<i64> {
        match self.jobs[id] {
            Job::Number(n) => Ok(n),
            Job::Operation(..) if depth == 0 => Err(self.cycle_error(id)),
            Job::Operation(left, op, right) => op.apply(
                self.yell_cold_bounded(left, depth - 1)?,
                self.yell_cold_bounded(right, depth - 1)?,
            ),
        }
    }

    fn cycle_error(&self, id: MonkeyId) -> SolveError {
        SolveError::structure(format!(
            "monkey {} ends up listening to itself",
            self.name(id)
        ))
    }

    /// Whether `id`'s number depends on `unknown`'s.
    fn depends_on(&self, id: MonkeyId, unknown: MonkeyId, depth: usize) -> Result<bool> {
        if id == unknown {
            return Ok(true);
        }
        match self.jobs[id] {
            Job::Number(_) => Ok(false),
            Job::Operation(..) if depth == 0 => Err(self.cycle_error(id)),
            Job::Operation(left, _, right) => Ok(self.depends_on(left, unknown, depth - 1)?
                || self.depends_on(right, unknown, depth - 1)?),
        }
    }

    /// Which operand of `id`'s operation depends on `unknown`. Exactly one of
    /// them must.
    fn unknown_side(&self, id: MonkeyId, unknown: MonkeyId) -> Result<(Side, Operator, MonkeyId, MonkeyId)> {
        let Job::Operation(left, op, right) = self.jobs[id] else {
            return Err(SolveError::structure(format!(
                "monkey {} yells a number, not the result of an operation",
                self.name(id)
            )));
        };
        let depth = self.jobs.len();
        let side = match (
            self.depends_on(left, unknown, depth)?,
            self.depends_on(right, unknown, depth)?,
        ) {
            (true, false) => Side::Left,
            (false, true) => Side::Right,
            (both, _) => {
                let which = if both { "both operands" } else { "neither operand" };
                return Err(SolveError::structure(format!(
                    "{which} of monkey {} depend on {}",
                    self.name(id),
                    self.name(unknown)
                )));
            }
        };
        let (unknown_branch, known_branch) = match side {
            Side::Left => (left, right),
            Side::Right => (right, left),
        };
        Ok((side, op, unknown_branch, known_branch))
    }

    /// The number `unknown` must yell for `id` to yell `target`.
    ///
    /// Walks from `id` down to `unknown`, solving the known operand of each
    /// operation and undoing the operation on the target. Returns each
    /// monkey on the way with the number it must yell; the last is `unknown`.
    pub fn invert(
        &mut self,
        id: MonkeyId,
        unknown: MonkeyId,
        target: i64,
    ) -> Result<Vec<Inversion>> {
        let mut steps = Vec::new();
        let (mut at, mut target) = (id, target);
        while at != unknown {
            steps.push(Inversion {
                monkey: self.name(at).to_owned(),
                target,
            });
            let (side, op, unknown_branch, known_branch) = self.unknown_side(at, unknown)?;
            let known = self.yell(known_branch)?;
            target = match side {
                Side::Left => op.solve_left(target, known)?,
                Side::Right => op.solve_right(target, known)?,
            };
            at = unknown_branch;
        }
        steps.push(Inversion {
            monkey: self.name(unknown).to_owned(),
            target,
        });
        Ok(steps)
    }

    /// The number `unknown` must yell so that both operands of `id` are
    /// equal.
    pub fn balance(&mut self, id: MonkeyId, unknown: MonkeyId) -> Result<Vec<Inversion>> {
        let (_, _, unknown_branch, known_branch) = self.unknown_side(id, unknown)?;
        let target = self.yell(known_branch)?;
        debugln!("{} must yell {target}", self.name(unknown_branch));
        let mut steps = self.invert(unknown_branch, unknown, target)?;
        steps.insert(
            0,
            Inversion {
                monkey: self.name(id).to_owned(),
                target,
            },
        );
        Ok(steps)
    }
}

pub fn parse_notes(input: &str) -> Result<Monkeys> {
    Monkeys::new(parse::lines(input, parsing::note)?)
}

pub fn part_one(monkeys: &mut Monkeys) -> Result<i64> {
    let root = monkeys.id(ROOT)?;
    monkeys.yell(root)
}

pub fn part_two(monkeys: &mut Monkeys) -> Result<Vec<Inversion>> {
    let root = monkeys.id(ROOT)?;
    let human = monkeys.id(HUMAN)?;
    monkeys.balance(root, human)
}

pub struct MonkeyMath;

impl DaySolver for MonkeyMath {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let mut monkeys = parse_notes(input)?;
        let root = monkeys.id(ROOT)?;
        let job = monkeys.job(root);
        let value = part_one(&mut monkeys)?;
        let body = match job {
            Job::Operation(left, op, right) => {
                let (left_value, right_value) = (monkeys.yell(left)?, monkeys.yell(right)?);
                format!(
                    "{ROOT}: {} ({left_value}) {op} {} ({right_value}) = {value}",
                    monkeys.name(left),
                    monkeys.name(right),
                )
            }
            Job::Number(_) => format!("{ROOT}: {value}"),
        };
        Ok(Answer::new(value).with_visualization(Visualization::text("Root job", body)))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let mut monkeys = parse_notes(input)?;
        let steps = part_two(&mut monkeys)?;
        let answer = steps.last().map_or(0, |step| step.target);
        let body = steps
            .iter()
            .map(|step| format!("{} = {}", step.monkey, step.target))
            .join("\n");
        Ok(Answer::new(answer).with_visualization(Visualization::text("Working back from root", body)))
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

    fn name<Input>() -> impl Parser<Input, Output = String>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        c::many1(c::char::lower())
    }

    fn operator<Input>() -> impl Parser<Input, Output = Operator>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        c::choice((
            c::token('+').map(|_| Operator::Add),
            c::token('-').map(|_| Operator::Sub),
            c::token('*').map(|_| Operator::Mul),
            c::token('/').map(|_| Operator::Div),
        ))
    }

    /// "root: pppw + sjmn", "ptdq: humn - 3" or "dbpl: 5"
    pub fn note<Input>() -> impl Parser<Input, Output = (String, RawJob)>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        let operand = || {
            c::choice((
                parse::decimal_integer::<_, i64>().map(Operand::Number),
                name().map(Operand::Monkey),
            ))
        };
        let operation = (operand(), c::token(' '), operator(), c::token(' '), operand())
            .map(|(left, _, op, _, right)| RawJob::Operation(left, op, right));
        let job = c::choice((
            c::attempt(operation),
            parse::decimal_integer().map(RawJob::Number),
        ));
        (name(), c::string(": "), job).map(|(name, _, job)| (name, job))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[track_caller]
    fn check_inversion(notes: &str, target: i64, expected: i64) {
        let mut monkeys = parse_notes(notes).unwrap();
        let (root, human) = (monkeys.id(ROOT).unwrap(), monkeys.id(HUMAN).unwrap());
        let steps = monkeys.invert(root, human, target).unwrap();
        assert_eq!(steps.last().unwrap().target, expected);

        // Feeding the answer back in reproduces the target.
        let mut check = parse_notes(notes).unwrap();
        check.jobs[human] = Job::Number(expected);
        assert_eq!(check.yell(root).unwrap(), target);
    }

    #[test]
    fn test_part_one() {
        let mut monkeys = parse_notes(EXAMPLE).unwrap();
        assert_eq!(part_one(&mut monkeys).unwrap(), 152);
    }

    #[test]
    fn test_part_two() {
        let mut monkeys = parse_notes(EXAMPLE).unwrap();
        let steps = part_two(&mut monkeys).unwrap();
        assert_eq!(steps.first().unwrap().monkey, "root");
        assert_eq!(steps.first().unwrap().target, 150);
        assert_eq!(steps.last().unwrap().monkey, "humn");
        assert_eq!(steps.last().unwrap().target, 301);
    }

    #[test]
    fn solve_for_root_value() {
        let notes = "root: a + b\na: 5\nb: humn * 2\nhumn: 0\n";
        check_inversion(notes, 15, 5);
        check_inversion(notes, 5, 0);
        check_inversion(notes, -1, -3);
    }

    #[test]
    fn each_operator_inverts_on_both_sides() {
        check_inversion("root: humn + k\nk: 3\nhumn: 0\n", 10, 7);
        check_inversion("root: k + humn\nk: 3\nhumn: 0\n", 10, 7);
        check_inversion("root: humn - k\nk: 3\nhumn: 0\n", 10, 13);
        check_inversion("root: k - humn\nk: 3\nhumn: 0\n", 10, -7);
        check_inversion("root: humn * k\nk: 3\nhumn: 0\n", 12, 4);
        check_inversion("root: k * humn\nk: 3\nhumn: 0\n", 12, 4);
        check_inversion("root: humn / k\nk: 3\nhumn: 0\n", 4, 12);
        check_inversion("root: k / humn\nk: 12\nhumn: 0\n", 4, 3);
    }

    #[test]
    fn inexact_division_is_an_error() {
        let mut monkeys = parse_notes("root: a + b\na: 5\nb: humn * 2\nhumn: 0\n").unwrap();
        let (root, human) = (monkeys.id(ROOT).unwrap(), monkeys.id(HUMAN).unwrap());
        assert!(matches!(
            monkeys.invert(root, human, 16),
            Err(SolveError::Arithmetic(_))
        ));
    }

    #[test]
    fn unknown_on_both_or_neither_side() {
        let mut monkeys = parse_notes("root: humn + b\nb: humn * 2\nhumn: 1\n").unwrap();
        let (root, human) = (monkeys.id(ROOT).unwrap(), monkeys.id(HUMAN).unwrap());
        assert!(matches!(
            monkeys.invert(root, human, 3),
            Err(SolveError::Structure(_))
        ));

        let mut monkeys = parse_notes("root: a + b\na: 1\nb: 2\nhumn: 1\n").unwrap();
        let (root, human) = (monkeys.id(ROOT).unwrap(), monkeys.id(HUMAN).unwrap());
        assert!(matches!(
            monkeys.balance(root, human),
            Err(SolveError::Structure(_))
        ));
    }

    #[test]
    fn inline_numbers_as_operands() {
        let mut monkeys = parse_notes("root: 3 * a\na: humn - 4\nhumn: 6\n").unwrap();
        assert_eq!(part_one(&mut monkeys).unwrap(), 6);
        assert_eq!(monkeys.name(MonkeyId::from_usize(3)), "3");
        assert!(monkeys.id("3").is_err());

        check_inversion("root: 3 * a\na: humn - 4\nhumn: 6\n", 12, 8);
        check_inversion("root: 10 - humn\nhumn: 0\n", 4, 6);
    }

    #[test]
    fn division_by_zero() {
        let mut monkeys = parse_notes("root: a / b\na: 1\nb: 0\n").unwrap();
        assert!(matches!(part_one(&mut monkeys), Err(SolveError::Arithmetic(_))));
    }

    #[test]
    fn cycles_and_unknown_names() {
        let mut monkeys = parse_notes("root: a + b\na: root - b\nb: 1\n").unwrap();
        assert!(matches!(part_one(&mut monkeys), Err(SolveError::Structure(_))));
        assert!(matches!(
            parse_notes("root: a + zzzz\na: 1\n"),
            Err(SolveError::Structure(_))
        ));
    }

    #[test]
    fn root_job_rendering() {
        let answer = MonkeyMath.part_one(EXAMPLE).unwrap();
        assert_eq!(answer.value, "152");
        assert_eq!(
            answer.visualization,
            Some(Visualization::text("Root job", "root: pppw (4) + sjmn (150) = 152"))
        );
    }

    #[test]
    fn memoization_replaces_jobs() {
        let mut monkeys = parse_notes(EXAMPLE).unwrap();
        let root = monkeys.id(ROOT).unwrap();
        assert!(matches!(monkeys.job(root), Job::Operation(..)));
        assert_eq!(monkeys.yell(root).unwrap(), 152);
        assert_eq!(monkeys.job(root), Job::Number(152));
        assert_eq!(monkeys.yell(root).unwrap(), 152);
    }

    proptest! {
        #[test]
        fn memoized_matches_cold(order in Just((0..15usize).collect::<Vec<_>>()).prop_shuffle()) {
            let cold_monkeys = parse_notes(EXAMPLE).unwrap();
            let mut monkeys = cold_monkeys.clone();
            for i in order {
                let id = MonkeyId::from_usize(i);
                let cold = cold_monkeys.yell_cold(id).unwrap();
                prop_assert_eq!(monkeys.yell(id).unwrap(), cold);
                prop_assert_eq!(monkeys.yell(id).unwrap(), cold);
            }
        }
    }
}
