//! Core types for spark-ellipsis.
//!
//! These describe the box a piece of text is fitted into and where the
//! ellipsis goes. Lengths are abstract layout units, the same convention
//! taffy uses: one terminal cell horizontally, `line_height` units per row.

use crate::error::EllipsisError;

// =============================================================================
// Truncation Position
// =============================================================================

/// Where the ellipsis marker is inserted when text overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(u8)]
pub enum TruncatePosition {
    /// `...tail of the text`
    Start = 0,
    /// `head of...the text`
    Middle = 1,
    /// `head of the text...`
    #[default]
    End = 2,
}

impl std::str::FromStr for TruncatePosition {
    type Err = EllipsisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "start" => Ok(Self::Start),
            "middle" => Ok(Self::Middle),
            "end" => Ok(Self::End),
            other => Err(EllipsisError::UnknownPosition(other.to_string())),
        }
    }
}

// =============================================================================
// Text Wrap
// =============================================================================

/// How text wraps inside the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(u8)]
pub enum TextWrap {
    /// Break at any grapheme boundary.
    #[default]
    Char = 0,
    /// Break at word boundaries, falling back to graphemes for long words.
    Word = 1,
    /// Only explicit newlines start a new line.
    NoWrap = 2,
}

// =============================================================================
// Edges
// =============================================================================

/// Per-side lengths (padding).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const ZERO: Self = Self::all(0.0);

    /// Same length on every side.
    pub const fn all(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Vertical and horizontal lengths.
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }
}

// =============================================================================
// Text Style
// =============================================================================

/// Computed text-layout style of a display surface.
///
/// This is everything a measurer needs to reproduce the surface's line
/// wrapping: the content width, the line height, the padding and the wrap
/// mode. A probe copies it wholesale so measured heights match the real box.
///
/// Widths are in cells. Line height and vertical padding are in the units
/// the measurer reports heights in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Content-box width (padding excluded).
    pub width: f32,
    pub line_height: f32,
    pub padding: Edges,
    pub wrap: TextWrap,
}

/// Height of one terminal row in layout units.
///
/// The height budget adds half a row of slack and rounds up. With a row
/// height of 1 the rounding turns that half row into a whole one, so
/// terminal rows are measured at a pixel-like 16 units. Any even row
/// height keeps the slack below one row.
pub const ROW_HEIGHT: f32 = 16.0;

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            width: 80.0,
            line_height: ROW_HEIGHT,
            padding: Edges::ZERO,
            wrap: TextWrap::Char,
        }
    }
}

impl TextStyle {
    /// Style with the given content width and defaults elsewhere.
    pub fn with_width(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Build a style from CSS-like `name: value` declarations.
    ///
    /// Recognised names: `width`, `line-height`, `padding`, `padding-top`,
    /// `padding-right`, `padding-bottom`, `padding-left`, `white-space`
    /// (`normal`/`pre-wrap` → word wrap, `nowrap`/`pre` → no wrap,
    /// `break-all` → char wrap). Unknown names are ignored, the same way a
    /// computed style carries properties irrelevant to text layout.
    pub fn from_declarations<'a, I>(declarations: I) -> Result<Self, EllipsisError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut style = Self::default();

        for (name, value) in declarations {
            let value = value.trim();
            match name.trim() {
                "width" => style.width = parse_length(value),
                "line-height" => style.line_height = parse_length(value),
                "padding" => style.padding = Edges::all(parse_length(value)),
                "padding-top" => style.padding.top = parse_length(value),
                "padding-right" => style.padding.right = parse_length(value),
                "padding-bottom" => style.padding.bottom = parse_length(value),
                "padding-left" => style.padding.left = parse_length(value),
                "white-space" => {
                    style.wrap = match value {
                        "normal" | "pre-wrap" | "pre-line" => TextWrap::Word,
                        "nowrap" | "pre" => TextWrap::NoWrap,
                        "break-all" => TextWrap::Char,
                        other => return Err(EllipsisError::UnknownWhiteSpace(other.to_string())),
                    }
                }
                _ => {}
            }
        }

        Ok(style)
    }
}

/// Parse a length such as `"24px"`, `"1.5"` or `"3cells"`.
///
/// Takes the leading unsigned decimal number and ignores the unit. Anything
/// without a leading number (`""`, `"auto"`, `"normal"`) is 0.
pub fn parse_length(value: &str) -> f32 {
    let value = value.trim();
    let end = value
        .char_indices()
        .scan(false, |seen_dot, (i, c)| {
            if c.is_ascii_digit() {
                Some(i + 1)
            } else if c == '.' && !*seen_dot {
                *seen_dot = true;
                Some(i + 1)
            } else {
                None
            }
        })
        .last()
        .unwrap_or(0);

    value[..end].parse::<f32>().unwrap_or(0.0)
}

// =============================================================================
// Layout Metrics
// =============================================================================

/// Line metrics used to turn a row count into a height ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutMetrics {
    pub line_height: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
}

impl From<&TextStyle> for LayoutMetrics {
    fn from(style: &TextStyle) -> Self {
        Self {
            line_height: style.line_height,
            padding_top: style.padding.top,
            padding_bottom: style.padding.bottom,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("24px"), 24.0);
        assert_eq!(parse_length("1.5"), 1.5);
        assert_eq!(parse_length(" 3cells "), 3.0);
        assert_eq!(parse_length(".5em"), 0.5);
        assert_eq!(parse_length("1.2.3"), 1.2);
        assert_eq!(parse_length(""), 0.0);
        assert_eq!(parse_length("auto"), 0.0);
        assert_eq!(parse_length("-4px"), 0.0);
    }

    #[test]
    fn test_position_from_str() {
        assert_eq!("start".parse::<TruncatePosition>().unwrap(), TruncatePosition::Start);
        assert_eq!("middle".parse::<TruncatePosition>().unwrap(), TruncatePosition::Middle);
        assert_eq!(" end".parse::<TruncatePosition>().unwrap(), TruncatePosition::End);
        assert!("center".parse::<TruncatePosition>().is_err());
        assert_eq!(TruncatePosition::default(), TruncatePosition::End);
    }

    #[test]
    fn test_style_from_declarations() {
        let style = TextStyle::from_declarations([
            ("width", "40px"),
            ("line-height", "24px"),
            ("padding", "2px"),
            ("padding-bottom", "4px"),
            ("white-space", "normal"),
            ("color", "red"),
        ])
        .unwrap();

        assert_eq!(style.width, 40.0);
        assert_eq!(style.line_height, 24.0);
        assert_eq!(style.padding.top, 2.0);
        assert_eq!(style.padding.bottom, 4.0);
        assert_eq!(style.padding.left, 2.0);
        assert_eq!(style.wrap, TextWrap::Word);
    }

    #[test]
    fn test_style_unknown_white_space() {
        let err = TextStyle::from_declarations([("white-space", "sideways")]).unwrap_err();
        assert!(matches!(err, EllipsisError::UnknownWhiteSpace(ref v) if v == "sideways"));
    }

    #[test]
    fn test_metrics_from_style() {
        let style = TextStyle {
            width: 10.0,
            line_height: 2.0,
            padding: Edges::symmetric(1.0, 3.0),
            wrap: TextWrap::NoWrap,
        };
        let metrics = LayoutMetrics::from(&style);
        assert_eq!(metrics.line_height, 2.0);
        assert_eq!(metrics.padding_top, 1.0);
        assert_eq!(metrics.padding_bottom, 1.0);
        assert_eq!(style.padding.horizontal(), 6.0);
    }
}
