//! Expand/collapse handle.

use std::fmt;
use std::rc::Rc;

use spark_signals::Signal;

/// Imperative access to an expanded flag owned elsewhere.
///
/// The handle holds no state of its own; it reads and writes through the
/// injected callbacks, so it can drive a signal, a `Cell` or app state.
///
/// ```
/// use spark_signals::signal;
/// use spark_ellipsis::shell::ExpandHandle;
///
/// let expanded = signal(false);
/// let handle = ExpandHandle::from_signal(expanded.clone());
///
/// handle.toggle();
/// assert!(expanded.get());
/// handle.toggle_to(Some(true));
/// assert!(handle.is_expanded());
/// ```
#[derive(Clone)]
pub struct ExpandHandle {
    read: Rc<dyn Fn() -> bool>,
    write: Rc<dyn Fn(bool)>,
}

impl ExpandHandle {
    pub fn new(read: impl Fn() -> bool + 'static, write: impl Fn(bool) + 'static) -> Self {
        Self {
            read: Rc::new(read),
            write: Rc::new(write),
        }
    }

    pub fn from_signal(signal: Signal<bool>) -> Self {
        let writer = signal.clone();
        Self::new(move || signal.get(), move |value| {
            writer.set(value);
        })
    }

    pub fn is_expanded(&self) -> bool {
        (self.read)()
    }

    pub fn set_expanded(&self, expanded: bool) {
        (self.write)(expanded);
    }

    /// Flip the state. Returns the new state.
    pub fn toggle(&self) -> bool {
        self.toggle_to(None)
    }

    /// Set the state to `expanded`, or flip it when `None`. Returns the new state.
    pub fn toggle_to(&self, expanded: Option<bool>) -> bool {
        let next = expanded.unwrap_or_else(|| !self.is_expanded());
        self.set_expanded(next);
        next
    }
}

impl fmt::Debug for ExpandHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandHandle")
            .field("expanded", &self.is_expanded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_injected_callbacks() {
        let state = Rc::new(Cell::new(false));
        let (r, w) = (state.clone(), state.clone());
        let handle = ExpandHandle::new(move || r.get(), move |v| w.set(v));

        assert!(handle.toggle());
        assert!(state.get());
        assert!(!handle.toggle());
        assert!(!state.get());

        handle.set_expanded(true);
        assert!(handle.is_expanded());
    }

    #[test]
    fn test_toggle_to_explicit_value() {
        let state = Rc::new(Cell::new(true));
        let (r, w) = (state.clone(), state.clone());
        let handle = ExpandHandle::new(move || r.get(), move |v| w.set(v));

        assert!(handle.toggle_to(Some(true)));
        assert!(state.get());
        assert!(!handle.toggle_to(Some(false)));
        assert!(handle.toggle_to(None));
    }
}
