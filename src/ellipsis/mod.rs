//! Ellipsis core - fit text into a fixed number of rows.
//!
//! ```text
//! rows + LayoutMetrics → HeightBudget
//! content + markup → overflow gate → binary search → truncated text
//! ```
//!
//! [`compute_truncation`] is the whole pass against a live surface.
//! [`compute_truncated_text`] is the search alone, against any
//! [`HeightOracle`](crate::oracle::HeightOracle).

mod budget;
mod compute;
mod search;

pub use budget::{HeightBudget, ROW_SLACK};
pub use compute::{compute_truncation, Computation, EllipsisPass, TruncationOutcome};
pub use search::{compute_truncated_text, TruncationRequest};
