//! Wrap-around literal search over a document's text
//!
//! Offsets are char indices. A search scans forward from the cursor to the
//! end of the text, then wraps once and scans the prefix it skipped.

use std::ops::Range;

use ropey::Rope;

use crate::util::chars_eq_ignore_case;

/// A located occurrence, as a char range. `end` is where the next search
/// should start so repeated calls step through successive matches.
pub type Match = Range<usize>;

/// Find `query` in `text` starting at `from`, wrapping around once.
///
/// Returns `None` when the text holds no occurrence at all, including for an
/// empty query.
pub fn locate(query: &str, text: &Rope, from: usize, case_sensitive: bool) -> Option<Match> {
    if query.is_empty() {
        return None;
    }
    let needle: Vec<char> = query.chars().collect();
    let haystack: Vec<char> = text.chars().collect();
    let from = from.min(haystack.len());

    find_in(&haystack, &needle, from, haystack.len(), case_sensitive)
        .or_else(|| find_in(&haystack, &needle, 0, from, case_sensitive))
        .map(|start| start..start + needle.len())
}

/// First match whose start lies in `[start, stop)`. The match itself may run
/// past `stop`.
fn find_in(
    haystack: &[char],
    needle: &[char],
    start: usize,
    stop: usize,
    case_sensitive: bool,
) -> Option<usize> {
    let last_start = haystack.len().checked_sub(needle.len())?;
    (start..stop.min(last_start + 1)).find(|&pos| {
        let window = &haystack[pos..pos + needle.len()];
        if case_sensitive {
            window == needle
        } else {
            window
                .iter()
                .zip(needle)
                .all(|(&a, &b)| chars_eq_ignore_case(a, b))
        }
    })
}

/// Number of non-overlapping literal occurrences, shown in the find status
pub fn count_occurrences(query: &str, text: &Rope, case_sensitive: bool) -> usize {
    if query.is_empty() {
        return 0;
    }
    let needle: Vec<char> = query.chars().collect();
    let haystack: Vec<char> = text.chars().collect();
    let mut count = 0;
    let mut pos = 0;
    while let Some(start) = find_in(&haystack, &needle, pos, haystack.len(), case_sensitive) {
        count += 1;
        pos = start + needle.len();
    }
    count
}
