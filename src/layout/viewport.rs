//! Viewport - a taffy tree of text boxes sized by the terminal.
//!
//! The root is a column as wide as the terminal. Text boxes are its
//! children; a box without an explicit width stretches to the root, so a
//! terminal resize changes the width its text wraps at.
//!
//! Taffy panics on ids of removed nodes, so the viewport keeps its own set
//! of live nodes and checks it before every tree call.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use taffy::{
    AvailableSpace, Dimension, FlexDirection, LengthPercentage, NodeId, Rect, Size, Style, TaffyTree,
};

use crate::error::{EllipsisError, Result};
use crate::oracle::Surface;
use crate::types::{Edges, TextStyle, TextWrap, ROW_HEIGHT};

// =============================================================================
// Box Style
// =============================================================================

/// Layout of one text box. Lengths are in cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxStyle {
    /// Outer width. `None` stretches to the viewport.
    pub width: Option<f32>,
    /// Outer width limit.
    pub max_width: Option<f32>,
    /// Horizontal padding in cells, vertical padding in rows.
    pub padding: Edges,
    pub wrap: TextWrap,
}

impl BoxStyle {
    fn to_taffy(self) -> Style {
        let length = |cells: Option<f32>| cells.map_or(Dimension::Auto, Dimension::Length);

        Style {
            size: Size {
                width: length(self.width),
                height: Dimension::Auto,
            },
            max_size: Size {
                width: length(self.max_width),
                height: Dimension::Auto,
            },
            padding: Rect {
                top: LengthPercentage::Length(self.padding.top),
                right: LengthPercentage::Length(self.padding.right),
                bottom: LengthPercentage::Length(self.padding.bottom),
                left: LengthPercentage::Length(self.padding.left),
            },
            ..Default::default()
        }
    }
}

// =============================================================================
// Viewport
// =============================================================================

struct ViewportState {
    tree: TaffyTree<()>,
    root: NodeId,
    /// Live text boxes and their styles.
    boxes: HashMap<NodeId, BoxStyle>,
    size: (u16, u16),
}

impl ViewportState {
    fn root_style(columns: u16) -> Style {
        Style {
            flex_direction: FlexDirection::Column,
            size: Size {
                width: Dimension::Length(columns as f32),
                height: Dimension::Auto,
            },
            ..Default::default()
        }
    }

    fn relayout(&mut self) -> Result<()> {
        let (columns, rows) = self.size;
        let available = Size {
            width: AvailableSpace::Definite(columns as f32),
            height: AvailableSpace::Definite(rows as f32),
        };
        self.tree.compute_layout(self.root, available)?;
        Ok(())
    }

    fn check(&self, node: NodeId) -> Result<()> {
        if self.boxes.contains_key(&node) {
            Ok(())
        } else {
            Err(EllipsisError::UnknownNode(node))
        }
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.boxes.contains_key(&node) && self.tree.parent(node) == Some(self.root)
    }
}

/// Shared handle to a layout tree. Clones refer to the same tree.
///
/// # Example
///
/// ```
/// use spark_ellipsis::layout::{BoxStyle, Viewport};
/// use spark_ellipsis::oracle::Surface;
///
/// let viewport = Viewport::new(40, 10).unwrap();
/// let node = viewport.add_text_box(BoxStyle::default()).unwrap();
/// let surface = viewport.surface(node);
///
/// assert_eq!(surface.computed_style().map(|s| s.width), Some(40.0));
///
/// viewport.resize(20, 10).unwrap();
/// assert_eq!(surface.computed_style().map(|s| s.width), Some(20.0));
///
/// viewport.detach(node).unwrap();
/// assert!(surface.computed_style().is_none());
/// ```
#[derive(Clone)]
pub struct Viewport {
    state: Rc<RefCell<ViewportState>>,
}

impl Viewport {
    /// A viewport of `columns` x `rows` terminal cells.
    pub fn new(columns: u16, rows: u16) -> Result<Self> {
        let mut tree = TaffyTree::new();
        let root = tree.new_leaf(ViewportState::root_style(columns))?;
        let mut state = ViewportState {
            tree,
            root,
            boxes: HashMap::new(),
            size: (columns, rows),
        };
        state.relayout()?;

        Ok(Self {
            state: Rc::new(RefCell::new(state)),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        self.state.borrow().size
    }

    /// Change the terminal size and lay the tree out again.
    pub fn resize(&self, columns: u16, rows: u16) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.size == (columns, rows) {
            return Ok(());
        }
        let root = state.root;
        state.tree.set_style(root, ViewportState::root_style(columns))?;
        state.size = (columns, rows);
        state.relayout()?;
        log::debug!("viewport resized to {columns}x{rows}");
        Ok(())
    }

    /// Create a text box and attach it as the last child of the root.
    pub fn add_text_box(&self, style: BoxStyle) -> Result<NodeId> {
        let mut state = self.state.borrow_mut();
        let node = state.tree.new_leaf(style.to_taffy())?;
        let root = state.root;
        state.tree.add_child(root, node)?;
        state.boxes.insert(node, style);
        state.relayout()?;
        Ok(node)
    }

    /// Change a box's layout.
    pub fn set_box_style(&self, node: NodeId, style: BoxStyle) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.check(node)?;
        state.tree.set_style(node, style.to_taffy())?;
        state.boxes.insert(node, style);
        state.relayout()
    }

    /// Take a box out of the tree without destroying it.
    pub fn detach(&self, node: NodeId) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.check(node)?;
        if !state.is_attached(node) {
            return Ok(());
        }
        let root = state.root;
        state.tree.remove_child(root, node)?;
        state.relayout()
    }

    /// Put a detached box back as the last child of the root.
    pub fn attach(&self, node: NodeId) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.check(node)?;
        if state.is_attached(node) {
            return Ok(());
        }
        let root = state.root;
        state.tree.add_child(root, node)?;
        state.relayout()
    }

    /// Destroy a box. Surfaces pointing at it become unavailable.
    pub fn remove(&self, node: NodeId) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.check(node)?;
        state.tree.remove(node)?;
        state.boxes.remove(&node);
        state.relayout()
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.state.borrow().is_attached(node)
    }

    /// Surface for the text box `node`.
    pub fn surface(&self, node: NodeId) -> BoxSurface {
        BoxSurface {
            viewport: self.clone(),
            node,
        }
    }
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Viewport")
            .field("size", &state.size)
            .field("boxes", &state.boxes.len())
            .finish()
    }
}

// =============================================================================
// Box Surface
// =============================================================================

/// A text box of a [`Viewport`] seen as a [`Surface`].
///
/// The content width comes from the computed layout minus horizontal
/// padding. Vertical padding is converted from rows to layout units.
#[derive(Debug, Clone)]
pub struct BoxSurface {
    viewport: Viewport,
    node: NodeId,
}

impl BoxSurface {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

impl Surface for BoxSurface {
    fn computed_style(&self) -> Option<TextStyle> {
        let state = self.viewport.state.try_borrow().ok()?;
        if !state.is_attached(self.node) {
            return None;
        }
        let style = state.boxes.get(&self.node)?;
        let layout = state.tree.layout(self.node).ok()?;

        let padding = style.padding;
        Some(TextStyle {
            width: (layout.size.width - padding.horizontal()).max(0.0),
            line_height: ROW_HEIGHT,
            padding: Edges {
                top: padding.top * ROW_HEIGHT,
                right: padding.right,
                bottom: padding.bottom * ROW_HEIGHT,
                left: padding.left,
            },
            wrap: style.wrap,
        })
    }
}
