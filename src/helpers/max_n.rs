use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::debugln;

/// Keeps the `n` largest items seen so far.
///
/// Backed by a min-heap whose root is the smallest of the kept items, so each
/// accumulation costs `O(log n)`.
#[derive(Debug, Clone)]
pub struct MaxN<T> {
    n: usize,
    kept: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> MaxN<T> {
    #[inline]
    pub fn new(n: usize) -> Self {
        Self {
            n,
            kept: BinaryHeap::with_capacity(n + 1),
        }
    }

    pub fn accumulate(&mut self, item: T) {
        if self.n == 0 {
            return;
        }
        if self.kept.len() < self.n {
            self.kept.push(Reverse(item));
            return;
        }
        if let Some(mut smallest) = self.kept.peek_mut() {
            if item > smallest.0 {
                smallest.0 = item;
            } else {
                debugln!("Full, and the item is too small to keep");
            }
        }
    }

    /// The kept items, largest first.
    pub fn into_sorted_vec(self) -> Vec<T> {
        // Ascending order of `Reverse<T>` is descending order of `T`.
        self.kept
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(item)| item)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::helpers::IteratorExt;

    #[track_caller]
    fn check(input: impl IntoIterator<Item = u32>, n: usize, expected: impl IntoIterator<Item = u32>) {
        let actual = input.into_iter().max_n(n);
        assert_eq!(actual, expected.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn nothing_kept() {
        check([], 0, []);
        check([], 2, []);
        check([5, 6, 7], 0, []);
    }

    #[test]
    fn fewer_items_than_slots() {
        check([4, 9], 3, [9, 4]);
    }

    #[test]
    fn keeps_largest() {
        check([1, 2, 3], 1, [3]);
        check([3, 2, 1], 2, [3, 2]);
        check([7, 1, 8, 2, 9], 3, [9, 8, 7]);
    }

    #[test]
    fn duplicates() {
        check([1, 2, 3, 2], 3, [3, 2, 2]);
        check([5, 5, 5, 1], 2, [5, 5]);
    }
}
