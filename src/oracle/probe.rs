//! Offscreen measurement probe.
//!
//! The offscreen layer is a thread-local set of live probe ids, the same
//! bookkeeping a document keeps for its body children. A probe joins the
//! layer on [`MeasureProbe::attach`] and leaves it when dropped, so every
//! exit path of a computation (early return, `?`, panic unwind) disposes it.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use super::{Surface, TextMeasurer};
use crate::types::TextStyle;

// =============================================================================
// Offscreen Layer
// =============================================================================

thread_local! {
    /// Ids of probes currently inserted offscreen.
    static OFFSCREEN: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());

    /// Next probe id. Ids are never reused.
    static NEXT_PROBE_ID: Cell<usize> = const { Cell::new(0) };
}

fn insert_offscreen() -> usize {
    let id = NEXT_PROBE_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    OFFSCREEN.with(|layer| layer.borrow_mut().insert(id));
    id
}

fn remove_offscreen(id: usize) {
    OFFSCREEN.with(|layer| layer.borrow_mut().remove(&id));
}

/// Number of probes currently attached offscreen on this thread.
///
/// Zero whenever no computation is running.
pub fn attached_probe_count() -> usize {
    OFFSCREEN.with(|layer| layer.borrow().len())
}

/// Whether the probe with `id` is still attached.
pub fn is_probe_attached(id: usize) -> bool {
    OFFSCREEN.with(|layer| layer.borrow().contains(&id))
}

// =============================================================================
// Height Oracle
// =============================================================================

/// What the truncation search asks: how tall is `text` followed by `markup`?
///
/// `markup` is the trailing control rendered next to the text. It is part of
/// every measurement because it takes space the text has to give up.
pub trait HeightOracle {
    fn height_of(&mut self, text: &str, markup: &str) -> f32;
}

// =============================================================================
// Measure Probe
// =============================================================================

/// A detached copy of a surface used for repeated height reads.
///
/// Created per computation and never shared between computations.
pub struct MeasureProbe<'m, M: TextMeasurer + ?Sized> {
    id: usize,
    style: TextStyle,
    measurer: &'m M,
    content: String,
    measurements: usize,
}

impl<'m, M: TextMeasurer + ?Sized> MeasureProbe<'m, M> {
    /// Clone `surface`'s computed style onto a new offscreen probe.
    ///
    /// Returns `None` when the surface is not attached; the caller should
    /// try again on a later turn.
    pub fn attach<S: Surface + ?Sized>(surface: &S, measurer: &'m M) -> Option<Self> {
        let style = surface.computed_style()?;
        let id = insert_offscreen();
        log::trace!("probe {id} attached (width {}, line height {})", style.width, style.line_height);

        Some(Self {
            id,
            style,
            measurer,
            content: String::new(),
            measurements: 0,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// The style cloned from the surface.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Replace the content with `text` followed by `markup`.
    pub fn set_content(&mut self, text: &str, markup: &str) {
        self.content.clear();
        self.content.push_str(text);
        self.content.push_str(markup);
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Rendered height of the current content.
    pub fn offset_height(&mut self) -> f32 {
        self.measurements += 1;
        self.measurer.measure(&self.content, &self.style)
    }

    /// Height reads so far.
    pub fn measurements(&self) -> usize {
        self.measurements
    }
}

impl<M: TextMeasurer + ?Sized> HeightOracle for MeasureProbe<'_, M> {
    fn height_of(&mut self, text: &str, markup: &str) -> f32 {
        self.set_content(text, markup);
        self.offset_height()
    }
}

impl<M: TextMeasurer + ?Sized> Drop for MeasureProbe<'_, M> {
    fn drop(&mut self) {
        remove_offscreen(self.id);
        log::trace!("probe {} removed after {} measurements", self.id, self.measurements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{CellMeasurer, FixedSurface};

    #[test]
    fn test_probe_lifecycle() {
        let surface = FixedSurface::new(TextStyle::with_width(5.0));
        let before = attached_probe_count();

        let probe = MeasureProbe::attach(&surface, &CellMeasurer).unwrap();
        let id = probe.id();
        assert!(is_probe_attached(id));
        assert_eq!(attached_probe_count(), before + 1);

        drop(probe);
        assert!(!is_probe_attached(id));
        assert_eq!(attached_probe_count(), before);
    }

    #[test]
    fn test_detached_surface_creates_nothing() {
        let surface = FixedSurface::detached();
        let before = attached_probe_count();
        assert!(MeasureProbe::attach(&surface, &CellMeasurer).is_none());
        assert_eq!(attached_probe_count(), before);
    }

    #[test]
    fn test_probe_reuses_element() {
        let surface = FixedSurface::new(TextStyle::with_width(5.0));
        let mut probe = MeasureProbe::attach(&surface, &CellMeasurer).unwrap();

        assert_eq!(probe.height_of("hello", ""), 16.0);
        assert_eq!(probe.height_of("hello", " more"), 32.0);
        assert_eq!(probe.content(), "hello more");
        assert_eq!(probe.measurements(), 2);
    }

    #[test]
    fn test_probe_keeps_style_snapshot() {
        let surface = FixedSurface::new(TextStyle::with_width(5.0));
        let mut probe = MeasureProbe::attach(&surface, &CellMeasurer).unwrap();

        surface.set_width(50.0);
        assert_eq!(probe.style().width, 5.0);
        assert_eq!(probe.height_of("hello world", ""), 48.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let surface = FixedSurface::new(TextStyle::default());
        let before = attached_probe_count();
        let a = MeasureProbe::attach(&surface, &CellMeasurer).unwrap();
        let b = MeasureProbe::attach(&surface, &CellMeasurer).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(attached_probe_count(), before + 2);
    }
}
