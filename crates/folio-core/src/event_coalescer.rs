#![forbid(unsafe_code)]

//! Pointer-move coalescing.
//!
//! Terminals deliver a flood of pointer moves while the mouse sweeps across
//! the page. Only the latest position matters to the parallax layers, so
//! [`EventCoalescer`] keeps one pending move ("latest wins") and passes every
//! other event straight through.
//!
//! The caller is responsible for ordering: call [`EventCoalescer::flush`]
//! before dispatching a pass-through event, and once more at the end of each
//! input batch.
//!
//! ```
//! use folio_core::event::{Event, KeyCode};
//! use folio_core::event_coalescer::EventCoalescer;
//!
//! let mut coalescer = EventCoalescer::new();
//! assert!(coalescer.push(Event::pointer_moved(1, 1)).is_none());
//! assert!(coalescer.push(Event::pointer_moved(9, 4)).is_none());
//!
//! assert!(coalescer.push(Event::key(KeyCode::Enter)).is_some());
//! assert_eq!(coalescer.flush(), Some(Event::pointer_moved(9, 4)));
//! ```

use crate::event::{Event, MouseEvent, MouseEventKind};

/// Coalesces high-frequency pointer moves.
///
/// Not thread-safe; owned by the single event-processing loop.
#[derive(Debug, Clone, Default)]
pub struct EventCoalescer {
    pending_move: Option<MouseEvent>,
    coalesced: u64,
}

impl EventCoalescer {
    /// Create an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event.
    ///
    /// Returns `Some(event)` if it should be processed immediately, or `None`
    /// if it was absorbed as the pending pointer move.
    pub fn push(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => {
                if self.pending_move.replace(mouse).is_some() {
                    self.coalesced += 1;
                }
                None
            }
            other => Some(other),
        }
    }

    /// Take the pending pointer move, if any.
    #[must_use]
    pub fn flush(&mut self) -> Option<Event> {
        self.pending_move.take().map(Event::Mouse)
    }

    /// Whether a pointer move is pending.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_move.is_some()
    }

    /// Number of pointer moves dropped in favour of a later one.
    #[must_use]
    pub fn coalesced_count(&self) -> u64 {
        self.coalesced
    }

    /// Discard the pending move without delivering it.
    pub fn clear(&mut self) {
        self.pending_move = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyCode;

    #[test]
    fn latest_move_wins() {
        let mut c = EventCoalescer::new();
        for x in 0..10 {
            assert!(c.push(Event::pointer_moved(x, 0)).is_none());
        }
        assert_eq!(c.flush(), Some(Event::pointer_moved(9, 0)));
        assert_eq!(c.coalesced_count(), 9);
        assert!(!c.has_pending());
    }

    #[test]
    fn clicks_pass_through() {
        let mut c = EventCoalescer::new();
        assert_eq!(c.push(Event::click(2, 3)), Some(Event::click(2, 3)));
    }

    #[test]
    fn non_mouse_passes_through_without_flushing() {
        let mut c = EventCoalescer::new();
        c.push(Event::pointer_moved(4, 4));
        assert_eq!(
            c.push(Event::key(KeyCode::Tab)),
            Some(Event::key(KeyCode::Tab))
        );
        assert!(c.has_pending());
    }

    #[test]
    fn clear_drops_pending() {
        let mut c = EventCoalescer::new();
        c.push(Event::pointer_moved(4, 4));
        c.clear();
        assert_eq!(c.flush(), None);
    }
}
