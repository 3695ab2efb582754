//! Plumbing shared by the day modules.
//!
//! Example import: `use crate::helpers::{parse, IteratorExt};`.

mod max_n;
mod num;
mod paragraphs;
pub mod parse;

pub use max_n::MaxN;
pub use num::{checked, div_ceil};
pub use paragraphs::{paragraphs, Paragraph, Paragraphs};

pub trait IteratorExt: Iterator {
    /// The `n` largest items, largest first.
    fn max_n(self, n: usize) -> Vec<Self::Item>
    where
        Self: Sized,
        Self::Item: Ord,
    {
        let mut max_n = MaxN::new(n);
        for item in self {
            max_n.accumulate(item);
        }
        max_n.into_sorted_vec()
    }
}

impl<I: Iterator> IteratorExt for I {}
