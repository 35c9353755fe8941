//! Truncation point search.
//!
//! Every probe forces a layout of the candidate, so the search is a binary
//! search over character offsets rather than a trim-and-check loop:
//! `O(log n)` probes instead of `O(n)`.
//!
//! Offsets count grapheme clusters, so a cut never lands inside a
//! user-perceived character.
//!
//! # Monotonicity
//!
//! The search assumes that removing characters never makes the candidate
//! taller. Removed characters cannot add wrapped rows, so this holds for
//! any sane measurer. A host whose shaping breaks it (ligatures, bidi
//! reordering) gets a result that may not be the longest fitting one.

use super::budget::HeightBudget;
use crate::measure::grapheme_offsets;
use crate::oracle::HeightOracle;
use crate::types::TruncatePosition;

/// Input of one search.
#[derive(Debug, Clone, Copy)]
pub struct TruncationRequest<'a> {
    /// The untruncated text.
    pub content: &'a str,
    pub position: TruncatePosition,
    /// Ellipsis inserted at the cut.
    pub marker: &'a str,
    /// Trailing control, measured after every candidate but never returned.
    pub trailing_markup: &'a str,
    pub budget: HeightBudget,
}

/// Find the longest truncation of `request.content` that fits the budget.
///
/// Callers check first that the untouched content overflows; this function
/// always inserts the marker. Empty content yields the marker alone.
pub fn compute_truncated_text<O>(oracle: &mut O, request: &TruncationRequest<'_>) -> String
where
    O: HeightOracle + ?Sized,
{
    let mut search = Search {
        text: Chars::new(request.content),
        marker: request.marker,
        markup: request.trailing_markup,
        budget: request.budget,
        oracle,
        candidate: String::with_capacity(request.content.len() + request.marker.len()),
    };

    match request.position {
        TruncatePosition::End => search.end(),
        TruncatePosition::Start => search.start(),
        TruncatePosition::Middle => search.middle(),
    }
}

// =============================================================================
// Grapheme-indexed text
// =============================================================================

struct Chars<'a> {
    text: &'a str,
    offsets: Vec<usize>,
}

impl<'a> Chars<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            offsets: grapheme_offsets(text),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// First `k` characters.
    #[inline]
    fn head(&self, k: usize) -> &'a str {
        &self.text[..self.offsets[k]]
    }

    /// Characters from `k` to the end.
    #[inline]
    fn tail(&self, k: usize) -> &'a str {
        &self.text[self.offsets[k]..]
    }
}

// =============================================================================
// Search
// =============================================================================

struct Search<'a, 'o, O: HeightOracle + ?Sized> {
    text: Chars<'a>,
    marker: &'a str,
    markup: &'a str,
    budget: HeightBudget,
    oracle: &'o mut O,
    /// Reused between probes.
    candidate: String,
}

impl<O: HeightOracle + ?Sized> Search<'_, '_, O> {
    /// Build `head + marker + tail` and report whether it overflows.
    fn overflows(&mut self, head: usize, tail: Option<usize>) -> bool {
        self.candidate.clear();
        self.candidate.push_str(self.text.head(head));
        self.candidate.push_str(self.marker);
        if let Some(tail) = tail {
            self.candidate.push_str(self.text.tail(tail));
        }
        let height = self.oracle.height_of(&self.candidate, self.markup);
        !self.budget.fits(height)
    }

    fn assemble(&self, head: usize, tail: usize) -> String {
        let mut out = String::with_capacity(self.text.text.len() + self.marker.len());
        out.push_str(self.text.head(head));
        out.push_str(self.marker);
        out.push_str(self.text.tail(tail));
        out
    }

    /// `head[0..k] + marker`. `left` only moves to cuts that fit.
    fn end(mut self) -> String {
        let n = self.text.len();
        let (mut left, mut right) = (0, n);

        while right - left > 1 {
            let mid = (left + right).div_ceil(2);
            if self.overflows(mid, None) {
                right = mid;
            } else {
                left = mid;
            }
        }

        self.assemble(left, n)
    }

    /// `marker + text[k..]`. `right` only moves to cuts that fit.
    fn start(mut self) -> String {
        let n = self.text.len();
        let (mut left, mut right) = (0, n);

        while right - left > 1 {
            let mid = (left + right).div_ceil(2);
            if self.overflows(0, Some(mid)) {
                left = mid;
            } else {
                right = mid;
            }
        }

        self.assemble(0, right)
    }

    /// `text[..a] + marker + text[b..]`, narrowing both halves at once.
    ///
    /// The left range shrinks toward the start and the right range toward
    /// the end on overflow; on fit both widen back toward the middle. The
    /// outer bounds `left.0` and `right.1` only ever take values from a
    /// fitting probe.
    fn middle(mut self) -> String {
        let n = self.text.len();
        let half = n / 2;
        let (mut left, mut right) = ((0, half), (half, n));

        while left.1 - left.0 > 1 || right.1 - right.0 > 1 {
            let left_mid = (left.0 + left.1) / 2;
            let right_mid = (right.0 + right.1).div_ceil(2);

            if self.overflows(left_mid, Some(right_mid)) {
                left = (left.0, left_mid);
                right = (right_mid, right.1);
            } else {
                left = (left_mid, left.1);
                right = (right.0, right_mid);
            }
        }

        self.assemble(left.0, right.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_segmentation::UnicodeSegmentation;

    /// `chars_per_row` characters per row, one unit per row.
    struct GridOracle {
        chars_per_row: usize,
        probes: usize,
    }

    impl GridOracle {
        fn new(chars_per_row: usize) -> Self {
            Self {
                chars_per_row,
                probes: 0,
            }
        }
    }

    impl HeightOracle for GridOracle {
        fn height_of(&mut self, text: &str, markup: &str) -> f32 {
            self.probes += 1;
            let chars = text.graphemes(true).count() + markup.graphemes(true).count();
            chars.div_ceil(self.chars_per_row) as f32
        }
    }

    fn request(content: &str, position: TruncatePosition, budget: u32) -> TruncationRequest<'_> {
        TruncationRequest {
            content,
            position,
            marker: "...",
            trailing_markup: "",
            budget: HeightBudget::from_height(budget),
        }
    }

    #[test]
    fn test_end_keeps_longest_head() {
        let content = "A".repeat(100);
        let mut oracle = GridOracle::new(10);
        let out = compute_truncated_text(&mut oracle, &request(&content, TruncatePosition::End, 1));
        // 7 characters + "..." fill one 10-char row exactly.
        assert_eq!(out, format!("{}...", "A".repeat(7)));
    }

    #[test]
    fn test_start_keeps_longest_tail() {
        let content: String = ('a'..='z').collect();
        let mut oracle = GridOracle::new(10);
        let out = compute_truncated_text(&mut oracle, &request(&content, TruncatePosition::Start, 1));
        assert_eq!(out, "...tuvwxyz");
    }

    #[test]
    fn test_middle_keeps_both_ends() {
        let content: String = ('a'..='z').collect();
        let mut oracle = GridOracle::new(10);
        let out = compute_truncated_text(&mut oracle, &request(&content, TruncatePosition::Middle, 1));
        assert!(out.starts_with('a'));
        assert!(out.ends_with('z'));
        assert_eq!(out.matches("...").count(), 1);
        assert!(out.graphemes(true).count() <= 10);
    }

    #[test]
    fn test_markup_reserves_space() {
        let content = "A".repeat(100);
        let mut oracle = GridOracle::new(10);
        let req = TruncationRequest {
            trailing_markup: "more",
            ..request(&content, TruncatePosition::End, 1)
        };
        let out = compute_truncated_text(&mut oracle, &req);
        // 3 + "..." + "more" = 10
        assert_eq!(out, "AAA...");
    }

    #[test]
    fn test_multi_row_budget() {
        let content = "A".repeat(100);
        let mut oracle = GridOracle::new(10);
        let out = compute_truncated_text(&mut oracle, &request(&content, TruncatePosition::End, 3));
        assert_eq!(out.len(), 30);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_empty_content_is_marker() {
        let mut oracle = GridOracle::new(10);
        for position in [TruncatePosition::Start, TruncatePosition::Middle, TruncatePosition::End] {
            assert_eq!(compute_truncated_text(&mut oracle, &request("", position, 1)), "...");
        }
        assert_eq!(oracle.probes, 0);
    }

    #[test]
    fn test_probe_count_is_logarithmic() {
        let content = "A".repeat(1000);
        for position in [TruncatePosition::Start, TruncatePosition::End] {
            let mut oracle = GridOracle::new(40);
            compute_truncated_text(&mut oracle, &request(&content, position, 1));
            assert!(oracle.probes <= 10, "{position:?} took {} probes", oracle.probes);
        }

        let mut oracle = GridOracle::new(40);
        compute_truncated_text(&mut oracle, &request(&content, TruncatePosition::Middle, 1));
        assert!(oracle.probes <= 20, "middle took {} probes", oracle.probes);
    }

    #[test]
    fn test_never_splits_graphemes() {
        let content = "e\u{0301}".repeat(30);
        let mut oracle = GridOracle::new(10);
        let out = compute_truncated_text(&mut oracle, &request(&content, TruncatePosition::End, 1));
        assert_eq!(out, format!("{}...", "e\u{0301}".repeat(7)));
    }

    #[test]
    fn test_nothing_fits_converges_to_marker() {
        let content = "A".repeat(50);
        let mut oracle = GridOracle::new(2);
        for position in [TruncatePosition::Start, TruncatePosition::Middle, TruncatePosition::End] {
            let out = compute_truncated_text(&mut oracle, &request(&content, position, 1));
            assert_eq!(out, "...", "{position:?}");
        }
    }
}
