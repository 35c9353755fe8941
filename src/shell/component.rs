//! TextEllipsis - the reactive component around the truncation pass.
//!
//! The component owns its props, the surface it renders into and the
//! measurer. Its state lives in signals:
//!
//! - `text` - collapsed text (truncated, or the content when it fits)
//! - `expanded` - whether the full content is shown
//! - `overflow` - whether the content needed truncating
//!
//! It holds no subscription to global events. The host calls
//! [`TextEllipsis::recompute`] (or a setter, or [`TextEllipsis::on_resize`])
//! whenever something the layout depends on changed.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use spark_signals::{batch, effect, signal, Signal};

use super::handle::ExpandHandle;
use super::props::{EllipsisProps, TrailingControl};
use super::reason::RecomputeReason;
use super::scheduler::{self, TaskId};
use super::Cleanup;
use crate::ellipsis::{compute_truncation, Computation, EllipsisPass, TruncationOutcome};
use crate::oracle::{CellMeasurer, Surface, TextMeasurer};
use crate::types::TruncatePosition;

// =============================================================================
// View
// =============================================================================

/// What the component displays right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EllipsisView {
    pub text: String,
    pub control: Option<String>,
}

impl fmt::Display for EllipsisView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        if let Some(control) = &self.control {
            f.write_str(control)?;
        }
        Ok(())
    }
}

// =============================================================================
// Component
// =============================================================================

/// Text clamped to `props.rows` rows of a surface.
///
/// # Example
///
/// ```
/// use spark_ellipsis::oracle::{CellMeasurer, FixedSurface};
/// use spark_ellipsis::shell::{EllipsisProps, TextEllipsis};
/// use spark_ellipsis::TextStyle;
///
/// let surface = FixedSurface::new(TextStyle::with_width(10.0));
/// let props = EllipsisProps::new("a".repeat(40)).labels("more", "less");
/// let ellipsis = TextEllipsis::mount(props, surface, CellMeasurer);
///
/// assert!(ellipsis.is_overflow());
/// assert_eq!(ellipsis.view().to_string(), "aaa...more");
///
/// ellipsis.click_action();
/// assert_eq!(ellipsis.view().control.as_deref(), Some("less"));
/// ```
pub struct TextEllipsis<S, M = CellMeasurer>
where
    S: Surface + 'static,
    M: TextMeasurer + 'static,
{
    inner: Rc<Inner<S, M>>,
}

struct Inner<S, M> {
    props: RefCell<EllipsisProps>,
    surface: S,
    measurer: M,
    text: Signal<String>,
    expanded: Signal<bool>,
    overflow: Signal<bool>,
    /// Bumped by every pass and by unmount. A deferred retry carries the
    /// generation it was scheduled in and does nothing once it is stale.
    generation: Cell<u64>,
    retry: Cell<Option<TaskId>>,
    mounted: Cell<bool>,
    last: RefCell<Option<TruncationOutcome>>,
}

impl<S, M> TextEllipsis<S, M>
where
    S: Surface + 'static,
    M: TextMeasurer + 'static,
{
    /// Create the component and run the first pass.
    ///
    /// If `surface` is not attached yet, the text is the untouched content
    /// until a retry on the next scheduler turn succeeds.
    pub fn mount(props: EllipsisProps, surface: S, measurer: M) -> Self {
        let inner = Rc::new(Inner {
            text: signal(props.content.clone()),
            expanded: signal(false),
            overflow: signal(false),
            props: RefCell::new(props),
            surface,
            measurer,
            generation: Cell::new(0),
            retry: Cell::new(None),
            mounted: Cell::new(true),
            last: RefCell::new(None),
        });
        inner.recompute(RecomputeReason::MOUNT);
        Self { inner }
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Collapsed text.
    pub fn text(&self) -> String {
        self.inner.text.get()
    }

    pub fn is_expanded(&self) -> bool {
        self.inner.expanded.get()
    }

    /// Whether the content needed truncating on the last pass.
    pub fn is_overflow(&self) -> bool {
        self.inner.overflow.get()
    }

    pub fn text_signal(&self) -> Signal<String> {
        self.inner.text.clone()
    }

    pub fn expanded_signal(&self) -> Signal<bool> {
        self.inner.expanded.clone()
    }

    pub fn overflow_signal(&self) -> Signal<bool> {
        self.inner.overflow.clone()
    }

    /// Result of the last pass that could measure.
    pub fn last_outcome(&self) -> Option<TruncationOutcome> {
        self.inner.last.borrow().clone()
    }

    pub fn props(&self) -> Ref<'_, EllipsisProps> {
        self.inner.props.borrow()
    }

    pub fn surface(&self) -> &S {
        &self.inner.surface
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    /// Full content while expanded, collapsed text otherwise, plus the
    /// trailing control.
    pub fn view(&self) -> EllipsisView {
        self.inner.view()
    }

    /// Call `f` with the current view now and whenever it changes.
    ///
    /// The returned cleanup stops the subscription. Dropping it without
    /// calling keeps the subscription alive until the component is gone.
    pub fn subscribe(&self, mut f: impl FnMut(&EllipsisView) + 'static) -> Cleanup {
        let weak: Weak<Inner<S, M>> = Rc::downgrade(&self.inner);
        let (text, expanded, overflow) = (
            self.inner.text.clone(),
            self.inner.expanded.clone(),
            self.inner.overflow.clone(),
        );

        let stop = effect(move || {
            // Track all three, whatever the view reads.
            let _ = (text.get(), expanded.get(), overflow.get());
            if let Some(inner) = weak.upgrade() {
                if inner.mounted.get() {
                    f(&inner.view());
                }
            }
        });
        Box::new(stop)
    }

    // =========================================================================
    // Expand / Collapse
    // =========================================================================

    /// Handle for toggling from outside the component.
    pub fn handle(&self) -> ExpandHandle {
        ExpandHandle::from_signal(self.inner.expanded.clone())
    }

    /// The trailing control was clicked: toggle, then notify.
    ///
    /// Returns the new expanded state. Suffix and hidden controls are not
    /// clickable, so the state is returned unchanged; use [`Self::handle`]
    /// to toggle from a custom suffix.
    pub fn click_action(&self) -> bool {
        if !self.inner.props.borrow().control.is_clickable() {
            return self.inner.expanded.get();
        }
        let expanded = self.handle().toggle();
        let callback = self.inner.props.borrow().on_click_action.clone();
        if let Some(callback) = callback {
            callback(expanded);
        }
        expanded
    }

    // =========================================================================
    // Recompute
    // =========================================================================

    /// Run a truncation pass now.
    pub fn recompute(&self, reason: RecomputeReason) {
        self.inner.recompute(reason);
    }

    /// The surface changed size. Call after a debounced resize.
    pub fn on_resize(&self) {
        self.recompute(RecomputeReason::RESIZE);
    }

    // =========================================================================
    // Props
    // =========================================================================

    pub fn set_content(&self, content: impl Into<String>) {
        let content = content.into();
        self.update(RecomputeReason::CONTENT, |props| replace(&mut props.content, content));
    }

    pub fn set_rows(&self, rows: u32) {
        self.update(RecomputeReason::ROWS, |props| replace(&mut props.rows, rows));
    }

    pub fn set_dots(&self, dots: impl Into<String>) {
        let dots = dots.into();
        self.update(RecomputeReason::MARKER, |props| replace(&mut props.dots, dots));
    }

    pub fn set_position(&self, position: TruncatePosition) {
        self.update(RecomputeReason::POSITION, |props| replace(&mut props.position, position));
    }

    pub fn set_labels(&self, expand: impl Into<String>, collapse: impl Into<String>) {
        let (expand, collapse) = (expand.into(), collapse.into());
        self.update(RecomputeReason::CONTROL, |props| {
            // Only the expand label is measured.
            props.collapse_text = collapse;
            replace(&mut props.expand_text, expand)
        });
    }

    pub fn set_control(&self, control: TrailingControl) {
        self.update(RecomputeReason::CONTROL, |props| {
            props.control = control;
            true
        });
    }

    pub fn set_row_slack(&self, slack: f32) {
        self.update(RecomputeReason::ROWS, |props| replace(&mut props.row_slack, slack));
    }

    pub fn set_on_click_action(&self, callback: impl Fn(bool) + 'static) {
        self.inner.props.borrow_mut().on_click_action = Some(Rc::new(callback));
    }

    fn update(&self, reason: RecomputeReason, apply: impl FnOnce(&mut EllipsisProps) -> bool) {
        let changed = apply(&mut self.inner.props.borrow_mut());
        if changed {
            self.recompute(reason);
        }
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Stop recomputing and cancel a pending retry. Also runs on drop.
    pub fn unmount(&self) {
        let inner = &self.inner;
        if !inner.mounted.replace(false) {
            return;
        }
        inner.generation.set(inner.generation.get().wrapping_add(1));
        if let Some(task) = inner.retry.take() {
            scheduler::cancel(task);
        }
        log::debug!("text ellipsis unmounted");
    }
}

impl<S, M> Drop for TextEllipsis<S, M>
where
    S: Surface + 'static,
    M: TextMeasurer + 'static,
{
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<S, M> fmt::Debug for TextEllipsis<S, M>
where
    S: Surface + 'static,
    M: TextMeasurer + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEllipsis")
            .field("props", &*self.inner.props.borrow())
            .field("text", &self.inner.text.get())
            .field("expanded", &self.inner.expanded.get())
            .field("overflow", &self.inner.overflow.get())
            .field("mounted", &self.inner.mounted.get())
            .finish()
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

// =============================================================================
// Pass
// =============================================================================

impl<S, M> Inner<S, M>
where
    S: Surface + 'static,
    M: TextMeasurer + 'static,
{
    fn view(&self) -> EllipsisView {
        let props = self.props.borrow();
        let expanded = self.expanded.get();
        let overflow = self.overflow.get();
        let text = if expanded { props.content.clone() } else { self.text.get() };

        EllipsisView {
            text,
            control: props.render_control(expanded, overflow),
        }
    }

    fn recompute(self: &Rc<Self>, reason: RecomputeReason) {
        if !self.mounted.get() {
            return;
        }

        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        if let Some(task) = self.retry.take() {
            scheduler::cancel(task);
        }

        // Renderers are user code; run them without holding the borrow.
        let props = self.props.borrow().clone();
        let fit_markup = props.render_control(false, false).unwrap_or_default();
        let overflow_markup = props.render_control(false, true).unwrap_or_default();

        let pass = EllipsisPass {
            content: &props.content,
            rows: props.rows,
            row_slack: props.row_slack,
            marker: &props.dots,
            position: props.position,
            fit_markup: &fit_markup,
            overflow_markup: &overflow_markup,
        };

        log::trace!("recompute {reason:?} (generation {generation})");

        match compute_truncation(&self.surface, &self.measurer, &pass) {
            Computation::Ready(outcome) => self.apply(outcome),
            Computation::Unavailable if reason.contains(RecomputeReason::RETRY) => {
                log::debug!("surface still not attached, waiting for the next trigger");
            }
            Computation::Unavailable => self.schedule_retry(generation, reason),
        }
    }

    fn schedule_retry(self: &Rc<Self>, generation: u64, reason: RecomputeReason) {
        let weak = Rc::downgrade(self);
        let task = scheduler::defer(move || {
            let Some(inner) = weak.upgrade() else { return };
            if inner.generation.get() != generation {
                log::trace!("dropping stale retry (generation {generation})");
                return;
            }
            inner.retry.set(None);
            inner.recompute(reason | RecomputeReason::RETRY);
        });
        self.retry.set(Some(task));
    }

    /// Publish a pass. Subscribers see `text` and `overflow` change together.
    fn apply(&self, outcome: TruncationOutcome) {
        let (text, overflow) = (outcome.text.clone(), outcome.overflow);
        batch(|| {
            *self.last.borrow_mut() = Some(outcome);
            self.text.set(text);
            self.overflow.set(overflow);
        });
    }
}
