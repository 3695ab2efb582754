//! Day 11: Monkey in the Middle

use std::fmt;

use itertools::Itertools;
use num_modular::ModularCoreOps;

use crate::helpers::{checked, parse, IteratorExt};
use crate::{debug, debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/11.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonkeyId(pub usize);

impl fmt::Display for MonkeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Old,
    Value(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add(Operand),
    Mul(Operand),
}

/// How worry levels are kept in check after each inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relief {
    /// Worry is divided by three.
    DivideByThree,
    /// Worry is only kept modulo the given number, which every monkey's
    /// divisor must divide.
    Modulo(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monkey {
    pub id: MonkeyId,
    pub items: Vec<u64>,
    pub operation: Operation,
    pub divisible_by: u64,
    pub if_true: MonkeyId,
    pub if_false: MonkeyId,
}

impl Operation {
    fn apply(self, old: u64, relief: Relief) -> Result<u64> {
        let operand = |operand| match operand {
            Operand::Old => old,
            Operand::Value(value) => value,
        };
        match (self, relief) {
            (Operation::Add(x), Relief::DivideByThree) => checked::add(old, operand(x)),
            (Operation::Mul(x), Relief::DivideByThree) => checked::mul(old, operand(x)),
            (Operation::Add(x), Relief::Modulo(m)) => Ok(old.addm(operand(x), &m)),
            (Operation::Mul(x), Relief::Modulo(m)) => Ok(old.mulm(operand(x), &m)),
        }
    }
}

impl Monkey {
    /// Inspects one item, returning its new worry level and who gets it next.
    fn inspect(&self, item: u64, relief: Relief) -> Result<(u64, MonkeyId)> {
        let worry = self.operation.apply(item, relief)?;
        let worry = match relief {
            Relief::DivideByThree => worry / 3,
            Relief::Modulo(_) => worry,
        };
        let recipient = if worry % self.divisible_by == 0 {
            self.if_true
        } else {
            self.if_false
        };
        Ok((worry, recipient))
    }
}

/// The troop of monkeys passing items around.
#[derive(Debug, Clone)]
pub struct Troop {
    monkeys: Vec<Monkey>,
    inspections: Vec<u64>,
}

impl Troop {
    pub fn new(monkeys: Vec<Monkey>) -> Result<Self> {
        let n = monkeys.len();
        if n == 0 {
            return Err(SolveError::structure("there are no monkeys"));
        }
        for (i, monkey) in monkeys.iter().enumerate() {
            if monkey.id.0 != i {
                return Err(SolveError::structure(format!(
                    "monkey {} is listed in position {i}",
                    monkey.id
                )));
            }
            if monkey.divisible_by == 0 {
                return Err(SolveError::structure(format!(
                    "monkey {i} tests divisibility by zero"
                )));
            }
            for target in [monkey.if_true, monkey.if_false] {
                if target.0 >= n || target.0 == i {
                    return Err(SolveError::structure(format!(
                        "monkey {i} throws to monkey {target}, which cannot catch"
                    )));
                }
            }
        }
        Ok(Self {
            monkeys,
            inspections: vec![0; n],
        })
    }

    /// The product of every monkey's divisor. Keeping worry modulo this
    /// preserves every divisibility test.
    pub fn common_modulus(&self) -> Result<u64> {
        self.monkeys
            .iter()
            .try_fold(1u64, |acc, monkey| checked::mul(acc, monkey.divisible_by))
    }

    pub fn round(&mut self, relief: Relief) -> Result<()> {
        for i in 0..self.monkeys.len() {
            let items = std::mem::take(&mut self.monkeys[i].items);
            self.inspections[i] += items.len() as u64;
            for item in items {
                let (worry, MonkeyId(recipient)) = self.monkeys[i].inspect(item, relief)?;
                self.monkeys[recipient].items.push(worry);
            }
        }
        Ok(())
    }

    pub fn inspections(&self) -> &[u64] {
        &self.inspections
    }

    /// The two largest inspection counts, multiplied together.
    pub fn monkey_business(&self) -> Result<u64> {
        let top = self.inspections.iter().copied().max_n(2);
        top.into_iter().try_fold(1u64, checked::mul)
    }

    fn debug_summary(&self, round: usize) {
        debugln!("== After round {round} ==");
        for (i, monkey) in self.monkeys.iter().enumerate() {
            debug!("Monkey {i}: ");
            debugln!("{}", monkey.items.iter().join(", "));
        }
    }
}

pub fn parse_monkeys(input: &str) -> Result<Vec<Monkey>> {
    parse::document(input, 1, Monkey::list_parser())
}

pub fn play(monkeys: Vec<Monkey>, rounds: usize, relief: Option<Relief>) -> Result<Troop> {
    let mut troop = Troop::new(monkeys)?;
    let relief = match relief {
        Some(relief) => relief,
        None => Relief::Modulo(troop.common_modulus()?),
    };
    for round in 1..=rounds {
        troop.round(relief)?;
        if round <= 20 || round % 1000 == 0 {
            troop.debug_summary(round);
        }
    }
    Ok(troop)
}

pub fn part_one(monkeys: Vec<Monkey>) -> Result<Troop> {
    play(monkeys, 20, Some(Relief::DivideByThree))
}

pub fn part_two(monkeys: Vec<Monkey>) -> Result<Troop> {
    play(monkeys, 10_000, None)
}

fn answer(troop: Troop) -> Result<Answer> {
    let viz = Visualization::bars(
        "Items inspected per monkey",
        "monkey",
        "inspections",
        troop.inspections().iter().map(|&n| n as f64),
    );
    Ok(Answer::new(troop.monkey_business()?).with_visualization(viz))
}

pub struct MonkeyInTheMiddle;

impl DaySolver for MonkeyInTheMiddle {
    fn part_one(&self, input: &str) -> Result<Answer> {
        answer(part_one(parse_monkeys(input)?)?)
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        answer(part_two(parse_monkeys(input)?)?)
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

    fn label<Input>(text: &'static str) -> impl Parser<Input, Output = ()>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        c::char::spaces().with(c::string(text)).map(|_| ())
    }

    impl Operand {
        fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            c::choice((
                c::string("old").map(|_| Operand::Old),
                parse::decimal_integer().map(Operand::Value),
            ))
        }
    }

    impl Operation {
        fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            // "Operation: new = old * 19"
            let op = c::choice((
                c::token('+').map(|_| Operation::Add as fn(Operand) -> Operation),
                c::token('*').map(|_| Operation::Mul as fn(Operand) -> Operation),
            ));
            (
                label("Operation: new = old "),
                op,
                c::token(' '),
                Operand::parser(),
            )
                .map(|(_, op, _, operand)| op(operand))
        }
    }

    impl Monkey {
        fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            let id = (label("Monkey "), parse::decimal_integer(), c::token(':'))
                .map(|(_, id, _)| MonkeyId(id));
            let items = label("Starting items: ")
                .with(c::sep_by(parse::decimal_integer::<_, u64>(), c::string(", ")));
            let test = label("Test: divisible by ").with(parse::decimal_integer());
            let if_true = label("If true: throw to monkey ").with(parse::decimal_integer());
            let if_false = label("If false: throw to monkey ").with(parse::decimal_integer());

            (id, items, Operation::parser(), test, if_true, if_false).map(
                |(id, items, operation, divisible_by, if_true, if_false)| Monkey {
                    id,
                    items,
                    operation,
                    divisible_by,
                    if_true: MonkeyId(if_true),
                    if_false: MonkeyId(if_false),
                },
            )
        }

        pub fn list_parser<Input>() -> impl Parser<Input, Output = Vec<Self>>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            c::many1(Monkey::parser())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_notes() {
        let monkeys = parse_monkeys(EXAMPLE).unwrap();
        assert_eq!(monkeys.len(), 4);
        assert_eq!(
            monkeys[2],
            Monkey {
                id: MonkeyId(2),
                items: vec![79, 60, 97],
                operation: Operation::Mul(Operand::Old),
                divisible_by: 13,
                if_true: MonkeyId(1),
                if_false: MonkeyId(3),
            }
        );
    }

    #[test]
    fn test_part_one() {
        let troop = part_one(parse_monkeys(EXAMPLE).unwrap()).unwrap();
        assert_eq!(troop.inspections(), &[101, 95, 7, 105]);
        assert_eq!(troop.monkey_business().unwrap(), 10605);
    }

    #[test]
    fn test_part_two() {
        let troop = part_two(parse_monkeys(EXAMPLE).unwrap()).unwrap();
        assert_eq!(troop.inspections(), &[52166, 47830, 1938, 52013]);
        assert_eq!(troop.monkey_business().unwrap(), 2713310158);
    }

    #[test]
    fn modulus_is_product_of_divisors() {
        let troop = Troop::new(parse_monkeys(EXAMPLE).unwrap()).unwrap();
        assert_eq!(troop.common_modulus().unwrap(), 23 * 19 * 13 * 17);
    }

    #[test]
    fn throwing_to_self_is_rejected() {
        let mut monkeys = parse_monkeys(EXAMPLE).unwrap();
        monkeys[0].if_false = MonkeyId(0);
        assert!(matches!(Troop::new(monkeys), Err(SolveError::Structure(_))));
    }

    #[test]
    fn malformed_note_reports_line() {
        let input = EXAMPLE.replace("Test: divisible by 13", "Test: divisible by thirteen");
        let err = parse_monkeys(&input).unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 18, .. }), "{err:?}");
    }
}
