//! Error type for host-side operations.
//!
//! The truncation core never fails: unavailable surfaces are deferred and
//! degenerate inputs have defined outputs. Errors only come from building
//! styles and managing viewport nodes.

use taffy::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EllipsisError {
    #[error("unknown truncation position `{0}` (expected start, middle or end)")]
    UnknownPosition(String),

    #[error("unsupported white-space value `{0}`")]
    UnknownWhiteSpace(String),

    #[error("node {0:?} does not belong to this viewport")]
    UnknownNode(NodeId),

    #[error("layout error: {0}")]
    Layout(#[from] taffy::TaffyError),
}

pub type Result<T> = std::result::Result<T, EllipsisError>;
