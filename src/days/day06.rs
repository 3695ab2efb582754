//! Day 6: Tuning Trouble

use std::collections::VecDeque;

use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub const START_OF_PACKET_LEN: usize = 4;
pub const START_OF_MESSAGE_LEN: usize = 14;

/// A window over the datastream that knows how many distinct characters it
/// holds.
#[derive(Debug)]
struct Window {
    capacity: usize,
    chars: VecDeque<u8>,
    counts: [u16; 256],
    distinct: usize,
}

impl Window {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            chars: VecDeque::with_capacity(capacity + 1),
            counts: [0; 256],
            distinct: 0,
        }
    }

    fn push(&mut self, c: u8) {
        if self.counts[c as usize] == 0 {
            self.distinct += 1;
        }
        self.counts[c as usize] += 1;
        self.chars.push_back(c);

        if self.chars.len() > self.capacity {
            if let Some(old) = self.chars.pop_front() {
                self.counts[old as usize] -= 1;
                if self.counts[old as usize] == 0 {
                    self.distinct -= 1;
                }
            }
        }
    }

    #[inline]
    fn all_distinct(&self) -> bool {
        self.chars.len() == self.capacity && self.distinct == self.capacity
    }
}

/// Number of characters processed when the first window of `marker_len`
/// distinct characters is complete.
pub fn find_marker(stream: &[u8], marker_len: usize) -> Option<usize> {
    if marker_len == 0 {
        return Some(0);
    }
    let mut window = Window::new(marker_len);
    for (i, &c) in stream.iter().enumerate() {
        window.push(c);
        if window.all_distinct() {
            debugln!("Marker {:?} ends at {}", String::from_utf8_lossy(&stream[i + 1 - marker_len..=i]), i + 1);
            return Some(i + 1);
        }
    }
    None
}

fn solve(input: &str, marker_len: usize) -> Result<Answer> {
    let stream = input.trim().as_bytes();
    let end = find_marker(stream, marker_len).ok_or_else(|| {
        SolveError::structure(format!("no run of {marker_len} distinct characters"))
    })?;
    Ok(Answer::new(end).with_visualization(highlight(stream, end, marker_len)))
}

/// The stream around the marker, with the marker bracketed.
fn highlight(stream: &[u8], end: usize, marker_len: usize) -> Visualization {
    const CONTEXT: usize = 20;
    let start = end - marker_len;
    let before = String::from_utf8_lossy(&stream[start.saturating_sub(CONTEXT)..start]);
    let marker = String::from_utf8_lossy(&stream[start..end]);
    let after = String::from_utf8_lossy(&stream[end..(end + CONTEXT).min(stream.len())]);
    Visualization::text(
        format!("Marker ending after character {end}"),
        format!("...{before}[{marker}]{after}..."),
    )
}

pub struct TuningTrouble;

impl DaySolver for TuningTrouble {
    fn part_one(&self, input: &str) -> Result<Answer> {
        solve(input, START_OF_PACKET_LEN)
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        solve(input, START_OF_MESSAGE_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STREAMS: [(&str, usize, usize); 5] = [
        ("mjqjpqmgbljsphdztnvjfqwrcgsmlb", 7, 19),
        ("bvwbjplbgvbhsrlpgdmjqwftvncz", 5, 23),
        ("nppdvjthqldpwncqszvftbrmjlhg", 6, 23),
        ("nznrnfrfntjfmvfwmzdfjlvtqnbhcprsg", 10, 29),
        ("zcfzfwzzqfrljwzlrfnpqdbhtmscgvjw", 11, 26),
    ];

    #[test]
    fn test_part_one() {
        for (stream, packet, _) in STREAMS {
            assert_eq!(find_marker(stream.as_bytes(), START_OF_PACKET_LEN), Some(packet));
        }
    }

    #[test]
    fn test_part_two() {
        for (stream, _, message) in STREAMS {
            assert_eq!(find_marker(stream.as_bytes(), START_OF_MESSAGE_LEN), Some(message));
        }
    }

    #[test]
    fn no_marker() {
        assert_eq!(find_marker(b"aaaaaaa", 4), None);
        assert_eq!(find_marker(b"abc", 4), None);
        assert!(TuningTrouble.part_one("abab\n").is_err());
    }

    #[test]
    fn visualization_brackets_marker() {
        let answer = TuningTrouble.part_one("mjqjpqmgbljsphdztnvjfqwrcgsmlb\n").unwrap();
        let Some(Visualization::Text { body, .. }) = answer.visualization else {
            panic!("expected a text visualization");
        };
        assert!(body.starts_with("...mjq[jpqm]gbl"), "{body}");
    }
}
