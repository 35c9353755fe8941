//! Component props - configuration with defaults.

use std::fmt;
use std::rc::Rc;

use crate::ellipsis::ROW_SLACK;
use crate::types::TruncatePosition;

// =============================================================================
// Callback Types
// =============================================================================

/// Renders an action control from the expanded state.
pub type ActionRenderer = Rc<dyn Fn(bool) -> String>;

/// Renders a suffix from the expanded state and whether the content overflows.
pub type SuffixRenderer = Rc<dyn Fn(bool, bool) -> String>;

/// Called after the control was clicked, with the new expanded state.
pub type ClickCallback = Rc<dyn Fn(bool)>;

// =============================================================================
// Trailing Control
// =============================================================================

/// What is rendered after the text.
///
/// Exactly one variant is active. The control takes space next to the text,
/// so its markup is part of every measurement.
#[derive(Clone, Default)]
pub enum TrailingControl {
    /// Nothing after the text.
    None,
    /// The expand/collapse labels, shown only when the content overflows.
    #[default]
    Text,
    /// A custom control, shown only when the content overflows.
    Action(ActionRenderer),
    /// A custom control that is always shown.
    Suffix(SuffixRenderer),
}

impl TrailingControl {
    pub fn action(render: impl Fn(bool) -> String + 'static) -> Self {
        Self::Action(Rc::new(render))
    }

    pub fn suffix(render: impl Fn(bool, bool) -> String + 'static) -> Self {
        Self::Suffix(Rc::new(render))
    }

    /// Resolve optional action and suffix renderers. A suffix wins.
    pub fn resolve(action: Option<ActionRenderer>, suffix: Option<SuffixRenderer>) -> Self {
        match (suffix, action) {
            (Some(suffix), _) => Self::Suffix(suffix),
            (None, Some(action)) => Self::Action(action),
            (None, None) => Self::Text,
        }
    }

    /// Rendered control, or `None` when nothing is shown.
    ///
    /// `label` is the expand or collapse text matching `expanded`.
    pub fn render(&self, label: &str, expanded: bool, overflow: bool) -> Option<String> {
        match self {
            Self::None => None,
            Self::Text => overflow.then(|| label.to_string()),
            Self::Action(render) => overflow.then(|| render(expanded)),
            Self::Suffix(render) => Some(render(expanded, overflow)),
        }
    }

    /// Whether clicking the control toggles the expanded state.
    pub fn is_clickable(&self) -> bool {
        matches!(self, Self::Text | Self::Action(_))
    }
}

impl fmt::Debug for TrailingControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Text => f.write_str("Text"),
            Self::Action(_) => f.write_str("Action(..)"),
            Self::Suffix(_) => f.write_str("Suffix(..)"),
        }
    }
}

// =============================================================================
// Props
// =============================================================================

/// Props for [`TextEllipsis`](super::TextEllipsis).
///
/// # Example
///
/// ```
/// use spark_ellipsis::shell::{EllipsisProps, TrailingControl};
/// use spark_ellipsis::TruncatePosition;
///
/// let props = EllipsisProps {
///     content: "A long description".to_string(),
///     rows: 2,
///     position: TruncatePosition::Middle,
///     ..Default::default()
/// }
/// .labels("more", "less");
///
/// assert!(matches!(props.control, TrailingControl::Text));
/// ```
#[derive(Clone)]
pub struct EllipsisProps {
    pub content: String,

    /// Rows the collapsed text may take (default: 1). 0 is treated as 1.
    pub rows: u32,

    /// Ellipsis marker (default: `"..."`).
    pub dots: String,

    pub position: TruncatePosition,

    /// Label shown while collapsed and overflowing.
    pub expand_text: String,

    /// Label shown while expanded.
    pub collapse_text: String,

    pub control: TrailingControl,

    /// Extra fraction of a row in the height budget.
    pub row_slack: f32,

    pub on_click_action: Option<ClickCallback>,
}

impl Default for EllipsisProps {
    fn default() -> Self {
        Self {
            content: String::new(),
            rows: 1,
            dots: "...".to_string(),
            position: TruncatePosition::End,
            expand_text: String::new(),
            collapse_text: String::new(),
            control: TrailingControl::Text,
            row_slack: ROW_SLACK,
            on_click_action: None,
        }
    }
}

impl EllipsisProps {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    pub fn dots(mut self, dots: impl Into<String>) -> Self {
        self.dots = dots.into();
        self
    }

    pub fn position(mut self, position: TruncatePosition) -> Self {
        self.position = position;
        self
    }

    pub fn labels(mut self, expand: impl Into<String>, collapse: impl Into<String>) -> Self {
        self.expand_text = expand.into();
        self.collapse_text = collapse.into();
        self
    }

    /// Use an action control, unless a suffix is already set.
    pub fn action(mut self, render: impl Fn(bool) -> String + 'static) -> Self {
        if !matches!(self.control, TrailingControl::Suffix(_)) {
            self.control = TrailingControl::action(render);
        }
        self
    }

    /// Use a suffix control. Replaces any action.
    pub fn suffix(mut self, render: impl Fn(bool, bool) -> String + 'static) -> Self {
        self.control = TrailingControl::suffix(render);
        self
    }

    pub fn row_slack(mut self, slack: f32) -> Self {
        self.row_slack = slack;
        self
    }

    pub fn on_click_action(mut self, callback: impl Fn(bool) + 'static) -> Self {
        self.on_click_action = Some(Rc::new(callback));
        self
    }

    /// Label matching `expanded`.
    pub fn label(&self, expanded: bool) -> &str {
        if expanded { &self.collapse_text } else { &self.expand_text }
    }

    /// The trailing control as rendered in the given state.
    pub fn render_control(&self, expanded: bool, overflow: bool) -> Option<String> {
        self.control.render(self.label(expanded), expanded, overflow)
    }
}

impl fmt::Debug for EllipsisProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EllipsisProps")
            .field("content", &self.content)
            .field("rows", &self.rows)
            .field("dots", &self.dots)
            .field("position", &self.position)
            .field("expand_text", &self.expand_text)
            .field("collapse_text", &self.collapse_text)
            .field("control", &self.control)
            .field("row_slack", &self.row_slack)
            .field("on_click_action", &self.on_click_action.is_some())
            .finish()
    }
}
