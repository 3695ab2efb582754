//! Glue between [`combine`] parsers and [`SolveError`].

use std::str::FromStr;

use combine::{easy, stream::PointerOffset, EasyParser, ParseError, Parser, Stream};
use itertools::Itertools;

use crate::SolveError;

pub type EzParseError<'a> = easy::ParseError<&'a str>;
pub type Result<'a, T> = std::result::Result<T, EzParseError<'a>>;

mod c {
    pub use combine::{parser::char, *};
}

/// Runs `parser` over all of `s`, failing if anything is left over.
pub fn from_str<'a, P>(s: &'a str, parser: P) -> Result<'a, P::Output>
where
    P: Parser<easy::Stream<&'a str>>,
{
    (parser, c::eof())
        .map(|(output, _)| output)
        .easy_parse(s)
        .map(|(output, rest)| {
            debug_assert_eq!(rest, "");
            output
        })
}

/// Parses every non-blank line of `input` with a fresh parser from `make`.
///
/// The first line that fails is reported with its 1-based line number.
pub fn lines<'a, P, F>(input: &'a str, mut make: F) -> crate::Result<Vec<P::Output>>
where
    F: FnMut() -> P,
    P: Parser<easy::Stream<&'a str>>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| numbered_line(i + 1, line, make()))
        .collect()
}

/// Parses a single line whose number in the full input is already known.
pub fn numbered_line<'a, P>(line_number: usize, line: &'a str, parser: P) -> crate::Result<P::Output>
where
    P: Parser<easy::Stream<&'a str>>,
{
    from_str(line.trim_end(), parser).map_err(|err| SolveError::parse(line_number, describe(&err)))
}

/// Parses a whole multi-line document, ignoring trailing whitespace.
///
/// `first_line` is the line number of the first line of `input` within the
/// complete puzzle text.
pub fn document<'a, P>(input: &'a str, first_line: usize, parser: P) -> crate::Result<P::Output>
where
    P: Parser<easy::Stream<&'a str>>,
{
    let input = input.trim_end();
    from_str(input, parser).map_err(|err| {
        let line = first_line + line_offset(input, err.position);
        SolveError::parse(line, describe(&err))
    })
}

fn line_offset(input: &str, position: PointerOffset<str>) -> usize {
    let offset = position.translate_position(input).min(input.len());
    input.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
}

fn describe(err: &EzParseError<'_>) -> String {
    if err.errors.is_empty() {
        return "unexpected input".to_owned();
    }
    err.errors.iter().map(|e| e.to_string()).join(", ")
}

/// An optionally negative run of decimal digits, converted with [`FromStr`].
pub fn decimal_integer<Input, T>() -> impl Parser<Input, Output = T>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    c::from_str(c::parser::combinator::recognize::<String, _, _>((
        c::optional(c::token('-')),
        c::skip_many1(c::char::digit()),
    )))
}
