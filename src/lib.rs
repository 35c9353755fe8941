//! # spark-ellipsis
//!
//! Height-bounded text ellipsis for reactive terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactive state and [Taffy](https://github.com/DioxusLabs/taffy) for box
//! layout.
//!
//! ## Architecture
//!
//! Text is fitted into a number of rows of a display box by measuring
//! candidates, not by counting characters. The box's computed style is
//! cloned onto an offscreen probe and the truncation point is found by
//! binary search, one height read per step:
//!
//! ```text
//! Surface → MeasureProbe → HeightBudget → overflow gate → binary search → text
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (TextStyle, TruncatePosition, LayoutMetrics)
//! - [`measure`] - Terminal text metrics (width, wrapping, escapes)
//! - [`oracle`] - Surfaces, measurers and the offscreen probe
//! - [`ellipsis`] - Height budget and truncation search
//! - [`layout`] - Taffy viewport whose boxes are surfaces
//! - [`shell`] - The reactive component, expand handle and scheduling
//!
//! ## Example
//!
//! ```
//! use spark_ellipsis::{compute_truncation, EllipsisPass, TextStyle};
//! use spark_ellipsis::oracle::{CellMeasurer, FixedSurface};
//!
//! let surface = FixedSurface::new(TextStyle::with_width(20.0));
//! let content = "The quick brown fox jumps over the lazy dog";
//!
//! let outcome = compute_truncation(&surface, &CellMeasurer, &EllipsisPass::new(content))
//!     .ready()
//!     .unwrap();
//!
//! assert!(outcome.overflow);
//! assert_eq!(outcome.text, "The quick brown f...");
//! ```

pub mod ellipsis;
pub mod error;
pub mod layout;
pub mod measure;
pub mod oracle;
pub mod shell;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::EllipsisError;

pub use ellipsis::{
    compute_truncated_text, compute_truncation, Computation, EllipsisPass, HeightBudget,
    TruncationOutcome, TruncationRequest, ROW_SLACK,
};

pub use oracle::{
    attached_probe_count, CellMeasurer, FixedSurface, HeightOracle, MeasureProbe, Surface,
    TextMeasurer,
};

pub use layout::{BoxStyle, BoxSurface, Viewport};

pub use shell::{
    EllipsisProps, EllipsisView, ExpandHandle, RecomputeReason, ResizeDebouncer, TextEllipsis,
    TrailingControl,
};
