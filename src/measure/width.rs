//! Terminal cell widths.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use super::ansi::strip_ansi;

/// Width of one codepoint. Pictographs are forced wide, terminals draw
/// them in two cells even where East Asian Width says otherwise.
#[inline]
fn char_width(c: char) -> usize {
    match c as u32 {
        0x2600..=0x27BF | 0x1F300..=0x1F64F | 0x1F680..=0x1F6FF | 0x1F900..=0x1F9FF
        | 0x1FA70..=0x1FAFF => 2,
        _ => c.width().unwrap_or(0),
    }
}

/// Width of a grapheme cluster in cells.
///
/// Flags, ZWJ sequences, keycaps, skin-tone and VS16 sequences are 2 cells.
/// A base with combining marks is as wide as the base.
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    let rest = chars.as_str();
    if rest.is_empty() {
        return char_width(first);
    }

    let is_flag = (0x1F1E6..=0x1F1FF).contains(&(first as u32));
    let is_emoji_sequence = rest
        .chars()
        .any(|c| matches!(c as u32, 0x200D | 0xFE0F | 0x20E3 | 0x1F3FB..=0x1F3FF));

    if is_flag || is_emoji_sequence {
        2
    } else {
        first.width().unwrap_or(0)
    }
}

/// Width of a string in cells, escapes excluded.
pub fn string_width(s: &str) -> usize {
    if s.is_ascii() && !s.contains('\x1b') {
        return s.bytes().filter(|b| (0x20..0x7f).contains(b)).count();
    }
    strip_ansi(s).graphemes(true).map(grapheme_width).sum()
}
