//! Measurement Oracle - height of candidate text under a surface's layout.
//!
//! Two capabilities are injected by the host:
//!
//! - [`Surface`] - the live display box. Reports its computed [`TextStyle`]
//!   while attached, `None` while it cannot be measured yet.
//! - [`TextMeasurer`] - renders text under a style and reports its height.
//!   [`CellMeasurer`] does this for terminal cells; any
//!   `Fn(&str, &TextStyle) -> f32` works too, which keeps tests deterministic.
//!
//! A [`MeasureProbe`] ties them together for one computation: it clones the
//! surface style onto an offscreen element, then each probe is one content
//! mutation plus one height read.
//!
//! # Example
//!
//! ```
//! use spark_ellipsis::oracle::{CellMeasurer, FixedSurface, HeightOracle, MeasureProbe};
//! use spark_ellipsis::TextStyle;
//!
//! let surface = FixedSurface::new(TextStyle::with_width(10.0));
//! let measurer = CellMeasurer;
//!
//! let mut probe = MeasureProbe::attach(&surface, &measurer).unwrap();
//! assert_eq!(probe.height_of("hello world", ""), 32.0);
//! ```

mod probe;

pub use probe::{attached_probe_count, is_probe_attached, HeightOracle, MeasureProbe};

use std::cell::Cell;
use std::rc::Rc;

use crate::measure::{count_lines, strip_ansi};
use crate::types::TextStyle;

// =============================================================================
// Text Measurer
// =============================================================================

/// Reports the rendered height of `text` laid out under `style`.
///
/// The height includes vertical padding, like an element's offset height.
/// Implementations must be monotonic: removing characters never makes the
/// text taller. The truncation search relies on it and does not check.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> f32;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &TextStyle) -> f32,
{
    fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        self(text, style)
    }
}

/// Measures text on a terminal cell grid.
///
/// Escape sequences are stripped, the rest is wrapped to
/// `floor(style.width)` cells per row according to `style.wrap`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasurer;

impl TextMeasurer for CellMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        let visible = strip_ansi(text);
        let max_width = style.width.max(0.0).floor() as usize;
        let rows = count_lines(&visible, max_width, style.wrap);
        rows as f32 * style.line_height + style.padding.vertical()
    }
}

// =============================================================================
// Surface
// =============================================================================

/// A display box text is fitted into.
pub trait Surface {
    /// Computed style, or `None` while the box is not attached.
    fn computed_style(&self) -> Option<TextStyle>;
}

impl<S: Surface + ?Sized> Surface for &S {
    fn computed_style(&self) -> Option<TextStyle> {
        (**self).computed_style()
    }
}

impl<S: Surface + ?Sized> Surface for Rc<S> {
    fn computed_style(&self) -> Option<TextStyle> {
        (**self).computed_style()
    }
}

/// A free-standing surface the host positions by hand.
///
/// Clones share state, so the host can keep one to resize or detach the
/// box while a [`TextEllipsis`](crate::shell::TextEllipsis) owns another.
#[derive(Debug, Clone)]
pub struct FixedSurface {
    style: Rc<Cell<Option<TextStyle>>>,
}

impl FixedSurface {
    /// An attached surface with `style`.
    pub fn new(style: TextStyle) -> Self {
        Self {
            style: Rc::new(Cell::new(Some(style))),
        }
    }

    /// A surface that is not attached yet.
    pub fn detached() -> Self {
        Self {
            style: Rc::new(Cell::new(None)),
        }
    }

    pub fn attach(&self, style: TextStyle) {
        self.style.set(Some(style));
    }

    pub fn detach(&self) {
        self.style.set(None);
    }

    pub fn is_attached(&self) -> bool {
        self.style.get().is_some()
    }

    /// Change the content width. No-op while detached.
    pub fn set_width(&self, width: f32) {
        if let Some(mut style) = self.style.get() {
            style.width = width;
            self.style.set(Some(style));
        }
    }
}

impl Surface for FixedSurface {
    fn computed_style(&self) -> Option<TextStyle> {
        self.style.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Edges, TextWrap};

    #[test]
    fn test_cell_measurer_counts_rows() {
        let style = TextStyle {
            width: 10.0,
            line_height: 24.0,
            padding: Edges::symmetric(4.0, 1.0),
            wrap: TextWrap::Char,
        };
        assert_eq!(CellMeasurer.measure("", &style), 8.0);
        assert_eq!(CellMeasurer.measure("short", &style), 32.0);
        assert_eq!(CellMeasurer.measure(&"A".repeat(25), &style), 3.0 * 24.0 + 8.0);
    }

    #[test]
    fn test_cell_measurer_ignores_escapes() {
        let style = TextStyle::with_width(4.0);
        assert_eq!(CellMeasurer.measure("\x1b[4mmore\x1b[0m", &style), 16.0);
    }

    #[test]
    fn test_cell_measurer_fractional_width() {
        let style = TextStyle::with_width(4.9);
        assert_eq!(CellMeasurer.measure("abcde", &style), 32.0);
    }

    #[test]
    fn test_closure_measurer() {
        let fake = |text: &str, _: &TextStyle| text.len() as f32;
        assert_eq!(fake.measure("abc", &TextStyle::default()), 3.0);
    }

    #[test]
    fn test_fixed_surface_shared_state() {
        let surface = FixedSurface::detached();
        let host = surface.clone();
        assert!(surface.computed_style().is_none());

        host.attach(TextStyle::with_width(20.0));
        assert_eq!(surface.computed_style().map(|s| s.width), Some(20.0));

        host.set_width(12.0);
        assert_eq!(surface.computed_style().map(|s| s.width), Some(12.0));

        host.detach();
        host.set_width(30.0);
        assert!(!surface.is_attached());
    }
}
