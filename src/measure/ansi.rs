//! ANSI escape stripping.
//!
//! Trailing controls are often styled (`\x1b[4mmore\x1b[0m`). The escape
//! bytes occupy no cells, so they are removed before measuring.

use std::borrow::Cow;

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Scanner state while walking an escape sequence.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Escape {
    /// Plain text.
    None,
    /// Just saw ESC, next char picks the sequence kind.
    Start,
    /// `ESC [` ... final byte in `@..=~`.
    Csi,
    /// `ESC ]`, `ESC P`, `ESC ^`, `ESC _` ... BEL or `ESC \`.
    Str,
    /// Saw ESC inside a string sequence, `\` ends it.
    StrEsc,
}

/// Remove ANSI escape sequences.
///
/// Borrows when the input holds no ESC. Unterminated sequences swallow the
/// rest of the input.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains(ESC) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut state = Escape::None;

    for c in s.chars() {
        state = match (state, c) {
            (Escape::None, ESC) => Escape::Start,
            (Escape::None, c) => {
                out.push(c);
                Escape::None
            }
            (Escape::Start, '[') => Escape::Csi,
            (Escape::Start, ']' | 'P' | '^' | '_') => Escape::Str,
            // Two-character sequence (ESC =, ESC 7, ...)
            (Escape::Start, _) => Escape::None,
            (Escape::Csi, '\x40'..='\x7e') => Escape::None,
            (Escape::Csi, '\x20'..='\x3f') => Escape::Csi,
            // Invalid byte aborts the CSI; the byte itself is text again.
            (Escape::Csi, c) => {
                if c == ESC {
                    Escape::Start
                } else {
                    out.push(c);
                    Escape::None
                }
            }
            (Escape::Str, BEL) => Escape::None,
            (Escape::Str, ESC) => Escape::StrEsc,
            (Escape::Str, _) => Escape::Str,
            (Escape::StrEsc, '\\') => Escape::None,
            (Escape::StrEsc, _) => Escape::Str,
        };
    }

    Cow::Owned(out)
}
