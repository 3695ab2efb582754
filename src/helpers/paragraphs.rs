use std::iter::{Enumerate, Peekable};
use std::str::Lines;

use itertools::Itertools;

/// A run of non-blank lines, remembering where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph<'a> {
    /// 1-based line number of the first line.
    pub first_line: usize,
    pub lines: Vec<&'a str>,
}

impl<'a> Paragraph<'a> {
    /// The lines paired with their 1-based line numbers.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(move |(i, line)| (self.first_line + i, *line))
    }
}

/// Iterator over the blank-line separated [`Paragraph`]s of some text.
pub struct Paragraphs<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
}

/// Splits `input` at blank lines. Runs of several blank lines separate just
/// like one, and leading or trailing blank lines produce nothing.
pub fn paragraphs(input: &str) -> Paragraphs<'_> {
    Paragraphs {
        lines: input.lines().enumerate().peekable(),
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

impl<'a> Iterator for Paragraphs<'a> {
    type Item = Paragraph<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.lines.next_if(|(_, line)| is_blank(line)).is_some() {}

        let &(first, _) = self.lines.peek()?;
        let lines = self
            .lines
            .peeking_take_while(|(_, line)| !is_blank(line))
            .map(|(_, line)| line)
            .collect();

        Some(Paragraph {
            first_line: first + 1,
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn check<'a>(input: &str, expected: impl IntoIterator<Item = (usize, Vec<&'a str>)>) {
        let actual: Vec<_> = paragraphs(input)
            .map(|p| (p.first_line, p.lines))
            .collect();
        assert_eq!(actual, expected.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn empty() {
        check("", []);
        check("\n\n", []);
    }

    #[test]
    fn simple() {
        check("a\nb\n\nc", [(1, vec!["a", "b"]), (4, vec!["c"])]);
    }

    #[test]
    fn repeated_and_edge_blanks() {
        check("\na\n\n\n b \n\n", [(2, vec!["a"]), (5, vec![" b "])]);
    }

    #[test]
    fn numbered_lines() {
        let p = paragraphs("x\n\ny\nz").nth(1).unwrap();
        assert_eq!(p.numbered().collect::<Vec<_>>(), vec![(3, "y"), (4, "z")]);
    }
}
