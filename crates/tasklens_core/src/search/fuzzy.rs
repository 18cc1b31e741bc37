//! Approximate string matching.
//!
//! # Responsibility
//! - Define the pluggable similarity capability used by search ranking.
//! - Provide the default bitap-style matcher.
//!
//! # Invariants
//! - Distances are in `[0, 1]`; `0` means the pattern was found verbatim at
//!   the start of the text.
//! - Spans are `[start, end)` char offsets into the original text.

/// Best approximate occurrence of a pattern inside a text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    pub distance: f64,
    pub start: usize,
    pub end: usize,
}

/// Similarity capability used by [`crate::search::engine::SearchEngine`].
///
/// Implementations receive a trimmed pattern and raw field text; case folding
/// is up to the implementation and must treat both sides alike.
pub trait FuzzyMatcher {
    /// Returns the best alignment, or `None` when nothing acceptable exists.
    fn find(&self, pattern: &str, text: &str) -> Option<Alignment>;
}

impl<M: FuzzyMatcher + ?Sized> FuzzyMatcher for &M {
    fn find(&self, pattern: &str, text: &str) -> Option<Alignment> {
        (**self).find(pattern, text)
    }
}

/// Edit-distance matcher in the spirit of bitap approximate search.
///
/// Distance for an alignment is `errors / pattern_len + start / location_scale`
/// where `errors` is the edit distance between the pattern and the aligned
/// substring. Alignments above `max_distance` are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitapMatcher {
    pub max_distance: f64,
    /// Chars of offset that cost one full unit of distance.
    pub location_scale: f64,
}

impl Default for BitapMatcher {
    fn default() -> Self {
        Self {
            max_distance: 0.6,
            location_scale: 100.0,
        }
    }
}

impl FuzzyMatcher for BitapMatcher {
    fn find(&self, pattern: &str, text: &str) -> Option<Alignment> {
        let pattern = fold_case(pattern);
        if pattern.is_empty() {
            return None;
        }
        let text = fold_case(text);
        if text.is_empty() {
            return None;
        }

        let m = pattern.len();
        // cost[i]: edits to align pattern[..i] ending at the current text
        // position; start[i]: text offset where that alignment begins.
        let mut cost: Vec<usize> = (0..=m).collect();
        let mut start: Vec<usize> = vec![0; m + 1];
        let mut next_cost = vec![0usize; m + 1];
        let mut next_start = vec![0usize; m + 1];
        let mut best: Option<Alignment> = None;

        for (j, &tc) in text.iter().enumerate() {
            next_cost[0] = 0;
            next_start[0] = j + 1;
            for i in 1..=m {
                let substitute = cost[i - 1] + usize::from(pattern[i - 1] != tc);
                let skip_text = cost[i] + 1;
                let skip_pattern = next_cost[i - 1] + 1;

                let (value, origin) = if substitute <= skip_text && substitute <= skip_pattern {
                    (substitute, start[i - 1])
                } else if skip_pattern <= skip_text {
                    (skip_pattern, next_start[i - 1])
                } else {
                    (skip_text, start[i])
                };
                next_cost[i] = value;
                next_start[i] = origin;
            }
            std::mem::swap(&mut cost, &mut next_cost);
            std::mem::swap(&mut start, &mut next_start);

            let errors = cost[m];
            if errors >= m {
                continue;
            }
            let begin = start[m];
            let distance =
                (errors as f64 / m as f64 + begin as f64 / self.location_scale).min(1.0);
            let improves = best.map_or(true, |current| distance < current.distance);
            if improves {
                best = Some(Alignment {
                    distance,
                    start: begin,
                    end: j + 1,
                });
            }
        }

        best.filter(|alignment| alignment.distance <= self.max_distance)
    }
}

/// One lowercase char per input char, so offsets stay aligned with the
/// original text. Multi-char lowercase expansions keep their first char.
fn fold_case(value: &str) -> Vec<char> {
    value
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}
