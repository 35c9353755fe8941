//! Cell-grid text measurement.
//!
//! Answers "how many rows does this text take in a box `n` cells wide?"
//! for the default [`CellMeasurer`](crate::oracle::CellMeasurer).
//!
//! - **Escapes**: ANSI sequences in trailing markup (styled controls) are
//!   zero-width and skipped
//! - **Width**: Unicode East Asian Width via `unicode-width`, emoji sequences
//!   as 2 cells
//! - **Graphemes**: wrapping and truncation never split a UAX #29 cluster

mod ansi;
mod width;
mod wrap;

pub use ansi::strip_ansi;
pub use width::{grapheme_width, string_width};
pub use wrap::{count_lines, grapheme_offsets, wrap_lines};
