//! One measurement pass: surface → budget → overflow gate → search.

use super::budget::{HeightBudget, ROW_SLACK};
use super::search::{compute_truncated_text, TruncationRequest};
use crate::oracle::{HeightOracle, MeasureProbe, Surface, TextMeasurer};
use crate::types::{LayoutMetrics, TruncatePosition};

// =============================================================================
// Pass Input
// =============================================================================

/// Everything one pass needs besides the surface and the measurer.
#[derive(Debug, Clone, Copy)]
pub struct EllipsisPass<'a> {
    pub content: &'a str,
    pub rows: u32,
    pub row_slack: f32,
    pub marker: &'a str,
    pub position: TruncatePosition,
    /// Trailing control as rendered when the content fits.
    pub fit_markup: &'a str,
    /// Trailing control as rendered once the content overflows.
    pub overflow_markup: &'a str,
}

impl<'a> EllipsisPass<'a> {
    /// One row, `"..."` at the end, no trailing control.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            rows: 1,
            row_slack: ROW_SLACK,
            marker: "...",
            position: TruncatePosition::End,
            fit_markup: "",
            overflow_markup: "",
        }
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    pub fn marker(mut self, marker: &'a str) -> Self {
        self.marker = marker;
        self
    }

    pub fn position(mut self, position: TruncatePosition) -> Self {
        self.position = position;
        self
    }

    /// Same trailing control whether or not the content overflows.
    pub fn markup(mut self, markup: &'a str) -> Self {
        self.fit_markup = markup;
        self.overflow_markup = markup;
        self
    }
}

// =============================================================================
// Pass Output
// =============================================================================

/// Result of a pass that could measure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationOutcome {
    /// Text to display in the collapsed state.
    pub text: String,
    /// Whether the untouched content did not fit.
    pub overflow: bool,
    /// Height reads taken.
    pub probes: usize,
    pub budget: HeightBudget,
}

/// Result of [`compute_truncation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Computation {
    Ready(TruncationOutcome),
    /// The surface is not attached. Nothing was measured; try again later.
    Unavailable,
}

impl Computation {
    pub fn ready(self) -> Option<TruncationOutcome> {
        match self {
            Self::Ready(outcome) => Some(outcome),
            Self::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

// =============================================================================
// Compute
// =============================================================================

/// Fit `pass.content` into `pass.rows` rows of `surface`.
///
/// 1. Clone the surface onto a probe (or report [`Computation::Unavailable`])
/// 2. Derive the budget from the probe's line metrics
/// 3. Untouched content plus control fits → return it unchanged
/// 4. Marker plus control alone overflows → return the marker alone
/// 5. Otherwise binary search the cut
///
/// The probe is dropped on return, whichever step returns.
pub fn compute_truncation<S, M>(surface: &S, measurer: &M, pass: &EllipsisPass<'_>) -> Computation
where
    S: Surface + ?Sized,
    M: TextMeasurer + ?Sized,
{
    let Some(mut probe) = MeasureProbe::attach(surface, measurer) else {
        log::debug!("surface not attached, measurement deferred");
        return Computation::Unavailable;
    };

    let metrics = LayoutMetrics::from(probe.style());
    let budget = HeightBudget::from_rows(pass.rows, &metrics, pass.row_slack);

    let outcome = |text: String, overflow: bool, probe: &MeasureProbe<'_, M>| TruncationOutcome {
        text,
        overflow,
        probes: probe.measurements(),
        budget,
    };

    if pass.content.is_empty() {
        return Computation::Ready(outcome(String::new(), false, &probe));
    }

    let height = probe.height_of(pass.content, pass.fit_markup);
    if budget.fits(height) {
        log::trace!("content fits ({height} <= {})", budget.get());
        return Computation::Ready(outcome(pass.content.to_string(), false, &probe));
    }

    let floor = probe.height_of(pass.marker, pass.overflow_markup);
    if !budget.fits(floor) {
        log::warn!(
            "trailing control alone is {floor} units tall, budget is {}; showing marker only",
            budget.get()
        );
        return Computation::Ready(outcome(pass.marker.to_string(), true, &probe));
    }

    let text = compute_truncated_text(
        &mut probe,
        &TruncationRequest {
            content: pass.content,
            position: pass.position,
            marker: pass.marker,
            trailing_markup: pass.overflow_markup,
            budget,
        },
    );

    log::debug!(
        "truncated {} → {} bytes at {:?} in {} probes",
        pass.content.len(),
        text.len(),
        pass.position,
        probe.measurements()
    );

    Computation::Ready(outcome(text, true, &probe))
}
