//! Debounced terminal resize.
//!
//! Terminals report a resize per intermediate size while a window is being
//! dragged. Recomputing on each would run a full truncation pass per event,
//! so resizes are coalesced and only the last size is delivered once the
//! terminal has been quiet for a moment.

use std::time::{Duration, Instant};

use crossterm::event::Event;

/// Default quiet period before a resize is delivered.
pub const RESIZE_QUIET: Duration = Duration::from_millis(100);

/// Coalesces [`Event::Resize`] into one size per burst.
///
/// ```
/// use std::time::{Duration, Instant};
/// use crossterm::event::Event;
/// use spark_ellipsis::shell::ResizeDebouncer;
///
/// let mut debouncer = ResizeDebouncer::new(Duration::from_millis(50));
/// let t0 = Instant::now();
/// debouncer.push_at(&Event::Resize(80, 24), t0);
/// debouncer.push_at(&Event::Resize(60, 24), t0 + Duration::from_millis(10));
///
/// assert_eq!(debouncer.poll_at(t0 + Duration::from_millis(30)), None);
/// assert_eq!(debouncer.poll_at(t0 + Duration::from_millis(70)), Some((60, 24)));
/// ```
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    quiet: Duration,
    pending: Option<(u16, u16)>,
    last_event: Option<Instant>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(RESIZE_QUIET)
    }
}

impl ResizeDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            last_event: None,
        }
    }

    /// Record `event` if it is a resize. Returns whether it was.
    pub fn push(&mut self, event: &Event) -> bool {
        self.push_at(event, Instant::now())
    }

    pub fn push_at(&mut self, event: &Event, now: Instant) -> bool {
        match *event {
            Event::Resize(columns, rows) => {
                self.pending = Some((columns, rows));
                self.last_event = Some(now);
                true
            }
            _ => false,
        }
    }

    /// The settled size, once the quiet period has passed.
    pub fn poll(&mut self) -> Option<(u16, u16)> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<(u16, u16)> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.last_event = None;
        self.pending.take()
    }

    /// When the pending resize settles. `None` when nothing is pending.
    ///
    /// Use it to bound the event loop's poll timeout.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending?;
        self.last_event.map(|at| at + self.quiet)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    const QUIET: Duration = Duration::from_millis(100);

    #[test]
    fn test_burst_yields_last_size() {
        let mut debouncer = ResizeDebouncer::new(QUIET);
        let t0 = Instant::now();
        for (i, width) in [100u16, 90, 80, 70].into_iter().enumerate() {
            debouncer.push_at(&Event::Resize(width, 30), t0 + Duration::from_millis(i as u64 * 20));
        }

        // The last event was at +60ms.
        assert_eq!(debouncer.poll_at(t0 + Duration::from_millis(150)), None);
        assert_eq!(debouncer.poll_at(t0 + Duration::from_millis(160)), Some((70, 30)));
        assert_eq!(debouncer.poll_at(t0 + Duration::from_millis(500)), None);
    }

    #[test]
    fn test_ignores_other_events() {
        let mut debouncer = ResizeDebouncer::default();
        let key = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!debouncer.push(&key));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn test_deadline_moves_with_each_event() {
        let mut debouncer = ResizeDebouncer::new(QUIET);
        let t0 = Instant::now();
        debouncer.push_at(&Event::Resize(10, 10), t0);
        assert_eq!(debouncer.deadline(), Some(t0 + QUIET));

        let t1 = t0 + Duration::from_millis(40);
        debouncer.push_at(&Event::Resize(12, 10), t1);
        assert_eq!(debouncer.deadline(), Some(t1 + QUIET));
    }
}
