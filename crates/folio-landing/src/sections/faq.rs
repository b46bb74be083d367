#![forbid(unsafe_code)]

//! FAQ accordion. At most one answer is open; opening another closes it.

use std::time::Duration;

use folio_core::geometry::{Rect, Sides};
use folio_render::{Frame, Style};

use super::hit;
use crate::content::{FAQ, FAQ_HEADING, FaqCopy};
use crate::theme;

/// Open and close both take this long.
pub const TOGGLE_DURATION: Duration = Duration::from_millis(300);

const HEADER_ROWS: u16 = 4;

/// Accordion state with per-item height animation.
#[derive(Debug, Clone, PartialEq)]
pub struct FaqState {
    open: Option<usize>,
    /// Expansion of each answer in `[0, 1]`.
    expansion: Vec<f32>,
}

impl Default for FaqState {
    fn default() -> Self {
        Self::new(FAQ.len())
    }
}

impl FaqState {
    /// `count` items with the first one open and fully expanded.
    pub fn new(count: usize) -> Self {
        let mut expansion = vec![0.0; count];
        if let Some(first) = expansion.first_mut() {
            *first = 1.0;
        }
        Self {
            open: (count > 0).then_some(0),
            expansion,
        }
    }

    pub fn open(&self) -> Option<usize> {
        self.open
    }

    pub fn len(&self) -> usize {
        self.expansion.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expansion.is_empty()
    }

    /// Toggle item `index`: an open item closes, a closed one opens and
    /// closes whatever was open. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.expansion.len() {
            tracing::warn!(index, "faq toggle ignored: no such item");
            return;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        tracing::debug!(open = ?self.open, "faq toggled");
    }

    /// Advance every answer toward its target height.
    pub fn tick(&mut self, dt: Duration) {
        let step = dt.as_secs_f32() / TOGGLE_DURATION.as_secs_f32();
        for (i, e) in self.expansion.iter_mut().enumerate() {
            let target = if self.open == Some(i) { 1.0 } else { 0.0 };
            *e = if *e < target {
                (*e + step).min(target)
            } else {
                (*e - step).max(target)
            };
        }
    }

    pub fn is_animating(&self) -> bool {
        self.expansion.iter().enumerate().any(|(i, &e)| {
            let target = if self.open == Some(i) { 1.0 } else { 0.0 };
            e != target
        })
    }

    pub fn expansion(&self, index: usize) -> f32 {
        self.expansion.get(index).copied().unwrap_or(0.0)
    }
}

fn answer_rows(copy: &FaqCopy, width: u16) -> u16 {
    super::wrapped_rows(copy.answer, width.saturating_sub(4))
}

fn shown_rows(state: &FaqState, index: usize, copy: &FaqCopy, width: u16) -> u16 {
    (f32::from(answer_rows(copy, width)) * state.expansion(index)).round() as u16
}

/// Rows the accordion needs right now; changes while an item animates.
pub fn measure(state: &FaqState, width: u16) -> u16 {
    let inner = width.saturating_sub(8);
    let items: u16 = FAQ
        .iter()
        .enumerate()
        .map(|(i, copy)| {
            let shown = shown_rows(state, i, copy, inner);
            2 + if shown > 0 { shown + 1 } else { 0 }
        })
        .sum();
    HEADER_ROWS + items + 1
}

pub fn paint(frame: &mut Frame, area: Rect, state: &FaqState) {
    frame.buffer.push_scissor(area);
    let inner = area.inner(Sides::horizontal(4));
    super::centered(frame, inner, area.y + 1, FAQ_HEADING, theme::heading());

    let mut y = area.y + HEADER_ROWS;
    for (i, copy) in FAQ.iter().enumerate() {
        let open = state.open() == Some(i);
        let row = Rect::new(inner.x, y, inner.width, 1);
        super::fill(frame, row, if open { theme::SURFACE_RAISED } else { theme::SURFACE });
        let chevron = if open { "−" } else { "+" };
        let question_style = if open {
            theme::heading()
        } else {
            theme::body()
        };
        frame.buffer.set_string(
            row.x + 1,
            y,
            &folio_render::text::truncate(copy.question, usize::from(row.width.saturating_sub(5))),
            question_style,
            row.right(),
        );
        frame.buffer.set_string(
            row.right().saturating_sub(2),
            y,
            chevron,
            Style::new().fg(theme::PRIMARY).bold(),
            row.right(),
        );
        super::clickable(frame, row, hit::FAQ_ITEM, i);
        y += 1;

        let shown = shown_rows(state, i, copy, inner.width);
        if shown > 0 {
            frame.buffer.push_opacity(state.expansion(i));
            let body = Rect::new(inner.x + 2, y + 1, inner.width.saturating_sub(4), shown);
            frame.buffer.push_scissor(body);
            super::paragraph(frame, body, body.y, copy.answer, theme::muted());
            frame.buffer.pop_scissor();
            frame.buffer.pop_opacity();
            y += shown + 1;
        }
        y += 1;
    }
    frame.buffer.pop_scissor();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_item_open_initially() {
        let state = FaqState::default();
        assert_eq!(state.open(), Some(0));
        assert_eq!(state.expansion(0), 1.0);
        assert!(!state.is_animating());
    }

    #[test]
    fn toggling_open_item_closes_it() {
        let mut state = FaqState::default();
        state.toggle(0);
        assert_eq!(state.open(), None);
        state.toggle(0);
        assert_eq!(state.open(), Some(0));
    }

    #[test]
    fn opening_another_closes_previous() {
        let mut state = FaqState::default();
        state.toggle(3);
        assert_eq!(state.open(), Some(3));
        state.tick(TOGGLE_DURATION);
        assert_eq!(state.expansion(0), 0.0);
        assert_eq!(state.expansion(3), 1.0);
        assert!(!state.is_animating());
    }

    #[test]
    fn height_animates_over_toggle_duration() {
        let mut state = FaqState::default();
        state.toggle(1);
        state.tick(TOGGLE_DURATION / 2);
        assert!((state.expansion(1) - 0.5).abs() < 1e-3);
        assert!((state.expansion(0) - 0.5).abs() < 1e-3);
        assert!(state.is_animating());
    }

    #[test]
    fn out_of_range_toggle_is_ignored() {
        let mut state = FaqState::default();
        state.toggle(42);
        assert_eq!(state.open(), Some(0));
    }

    #[test]
    fn paint_registers_question_hits() {
        let state = FaqState::default();
        let mut frame = Frame::new(100, measure(&state, 100));
        let area = frame.bounds();
        paint(&mut frame, area, &state);
        assert_eq!(frame.hit_test(10, HEADER_ROWS), Some((hit::FAQ_ITEM, 0)));
        assert!(frame.buffer.to_text().contains("natural language processing"));
    }

    #[test]
    fn measure_shrinks_when_closed() {
        let mut state = FaqState::default();
        let open = measure(&state, 100);
        state.toggle(0);
        state.tick(TOGGLE_DURATION);
        assert!(measure(&state, 100) < open);
    }
}
