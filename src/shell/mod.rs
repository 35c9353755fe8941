//! Presentational shell - the component hosts interact with.
//!
//! - [`TextEllipsis`] - props, reactive state and the recompute entry point
//! - [`ExpandHandle`] - expand/collapse from outside the component
//! - [`scheduler`] - next-turn queue for passes deferred until the surface
//!   is attached
//! - [`ResizeDebouncer`] - turns a burst of terminal resizes into one
//!   [`TextEllipsis::on_resize`] call
//!
//! # Example
//!
//! ```
//! use spark_ellipsis::oracle::{CellMeasurer, FixedSurface};
//! use spark_ellipsis::shell::{EllipsisProps, TextEllipsis};
//! use spark_ellipsis::{TextStyle, TruncatePosition};
//!
//! let surface = FixedSurface::new(TextStyle::with_width(12.0));
//! let props = EllipsisProps::new("src/components/very/deep/module.rs")
//!     .position(TruncatePosition::Middle)
//!     .labels("", "");
//! let ellipsis = TextEllipsis::mount(props, surface, CellMeasurer);
//!
//! let text = ellipsis.text();
//! assert!(text.starts_with("src/"));
//! assert!(text.ends_with(".rs"));
//! ```

mod component;
mod handle;
mod props;
mod reason;
mod resize;
pub mod scheduler;

pub use component::{EllipsisView, TextEllipsis};
pub use handle::ExpandHandle;
pub use props::{ActionRenderer, ClickCallback, EllipsisProps, SuffixRenderer, TrailingControl};
pub use reason::RecomputeReason;
pub use resize::{ResizeDebouncer, RESIZE_QUIET};

/// Stops a subscription.
pub type Cleanup = Box<dyn FnOnce()>;
