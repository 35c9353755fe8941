//! Line breaking for wrapped text.
//!
//! [`count_lines`] and [`wrap_lines`] walk the same layout. Counting keeps
//! no rows, since the search asks for heights many times per pass.

use unicode_segmentation::UnicodeSegmentation;

use super::width::grapheme_width;
use crate::types::TextWrap;

/// Where the layout walk puts its rows.
trait Rows {
    fn break_row(&mut self);
    fn push_str(&mut self, piece: &str);
}

struct RowCount(usize);

impl Rows for RowCount {
    fn break_row(&mut self) {
        self.0 += 1;
    }

    fn push_str(&mut self, _piece: &str) {}
}

impl Rows for Vec<String> {
    fn break_row(&mut self) {
        self.push(String::new());
    }

    fn push_str(&mut self, piece: &str) {
        if let Some(row) = self.last_mut() {
            row.push_str(piece);
        }
    }
}

/// Number of rows `text` occupies in a box `max_width` cells wide.
///
/// Every `\n` starts a new row. Empty text is 0 rows. A zero width box
/// cannot wrap, so only explicit newlines count.
pub fn count_lines(text: &str, max_width: usize, wrap: TextWrap) -> usize {
    if text.is_empty() {
        return 0;
    }
    let mut rows = RowCount(0);
    lay_out(text, max_width, wrap, &mut rows);
    rows.0
}

/// The rows [`count_lines`] counts, for hosts that draw the text.
///
/// Whitespace dropped at a wrap is not part of any row.
pub fn wrap_lines(text: &str, max_width: usize, wrap: TextWrap) -> Vec<String> {
    let mut rows = Vec::new();
    if !text.is_empty() {
        lay_out(text, max_width, wrap, &mut rows);
    }
    rows
}

fn lay_out(text: &str, max_width: usize, wrap: TextWrap, rows: &mut impl Rows) {
    for line in text.split('\n') {
        rows.break_row();
        if max_width == 0 || wrap == TextWrap::NoWrap {
            rows.push_str(line);
            continue;
        }
        match wrap {
            TextWrap::Word => word_rows(line, max_width, rows),
            _ => char_rows(line, max_width, rows),
        }
    }
}

/// One hard line, breaking at any grapheme.
fn char_rows(line: &str, max_width: usize, rows: &mut impl Rows) {
    let mut current = 0;
    for grapheme in line.graphemes(true) {
        advance(rows, &mut current, grapheme, max_width);
    }
}

/// One hard line, breaking at word bounds.
///
/// Words wider than the box are force-broken by grapheme. Whitespace that
/// would start a wrapped row is dropped.
fn word_rows(line: &str, max_width: usize, rows: &mut impl Rows) {
    let mut current = 0;

    for segment in line.split_word_bounds() {
        let width: usize = segment.graphemes(true).map(grapheme_width).sum();

        if current + width > max_width {
            if current > 0 {
                rows.break_row();
                current = 0;
            }
            if width > max_width {
                for grapheme in segment.graphemes(true) {
                    advance(rows, &mut current, grapheme, max_width);
                }
                continue;
            }
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
        }

        rows.push_str(segment);
        current += width;
    }
}

#[inline]
fn advance(rows: &mut impl Rows, current: &mut usize, grapheme: &str, max_width: usize) {
    let width = grapheme_width(grapheme);
    if *current + width > max_width && *current > 0 {
        rows.break_row();
        *current = 0;
    }
    rows.push_str(grapheme);
    *current += width;
}

/// Byte offsets of every grapheme boundary, including `0` and `text.len()`.
///
/// `offsets[k]` is where the `k`-th user-perceived character starts, so
/// `&text[..offsets[k]]` keeps the first `k` characters.
pub fn grapheme_offsets(text: &str) -> Vec<usize> {
    let mut offsets: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
    offsets.push(text.len());
    offsets
}
