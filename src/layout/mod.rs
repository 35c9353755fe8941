//! Layout - flexbox boxes for text surfaces using Taffy.
//!
//! [`Viewport`] owns a [Taffy](https://github.com/DioxusLabs/taffy) tree
//! sized by the terminal. Each text box is handed to the ellipsis as a
//! [`BoxSurface`]: attached while it is in the tree, as wide as its computed
//! layout. Calling [`Viewport::resize`] on a terminal resize relays the tree
//! out, and the next truncation pass sees the new widths.

mod viewport;

pub use viewport::{BoxStyle, BoxSurface, Viewport};
