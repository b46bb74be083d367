#![forbid(unsafe_code)]

//! Creation journey: five stages down a scroll-linked progress line.

use folio_core::geometry::{Rect, Sides};
use folio_render::Frame;
use serde::Serialize;

use crate::content::{JOURNEY_HEADING, JOURNEY_STAGES, JOURNEY_SUBHEADING};
use crate::theme;

/// The line starts filling when the section top reaches this fraction of
/// the viewport height...
pub const START_AT: f32 = 0.8;
/// ...and is full when the section bottom reaches this one.
pub const END_AT: f32 = 0.2;

const HEADER_ROWS: u16 = 6;
const STAGE_ROWS: u16 = 4;

/// Section scroll progress in `[0, 1]`.
///
/// `section` is in page rows; `window` is the visible slice of the page.
/// Non-decreasing as `window.y` grows.
pub fn progress(section: Rect, window: Rect) -> f32 {
    let wh = f32::from(window.height);
    let start = f32::from(section.y) - START_AT * wh;
    let end = f32::from(section.bottom()) - END_AT * wh;
    let span = end - start;
    if span <= 0.0 {
        return if f32::from(window.y) >= end { 1.0 } else { 0.0 };
    }
    ((f32::from(window.y) - start) / span).clamp(0.0, 1.0)
}

/// Position of stage `index` of `count` along the line, in `(0, 1)`.
pub fn stage_position(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 1.0;
    }
    (index as f32 + 0.5) / count as f32
}

/// One stage as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageSlot {
    pub index: usize,
    pub reached: bool,
}

/// Scroll-linked journey state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Journey {
    progress: f32,
}

impl Journey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from the current scroll window. Returns whether the
    /// number of reached stages changed.
    pub fn observe(&mut self, section: Rect, window: Rect) -> bool {
        let before = self.reached_count();
        self.progress = progress(section, window);
        before != self.reached_count()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn stages(&self) -> impl Iterator<Item = StageSlot> + '_ {
        (0..JOURNEY_STAGES.len()).map(move |index| StageSlot {
            index,
            reached: self.progress >= stage_position(index, JOURNEY_STAGES.len()),
        })
    }

    pub fn reached_count(&self) -> usize {
        self.stages().filter(|s| s.reached).count()
    }
}

pub fn measure(width: u16) -> u16 {
    let text_w = width.saturating_sub(14);
    let desc_rows: u16 = JOURNEY_STAGES
        .iter()
        .map(|s| super::wrapped_rows(s.description, text_w).max(1) + STAGE_ROWS - 1)
        .sum();
    HEADER_ROWS + desc_rows + 2
}

pub fn paint(frame: &mut Frame, area: Rect, journey: &Journey) {
    frame.buffer.push_scissor(area);
    let inner = area.inner(Sides::horizontal(4));
    super::centered(frame, inner, area.y + 1, JOURNEY_HEADING, theme::heading());
    super::centered_paragraph(frame, inner, area.y + 3, JOURNEY_SUBHEADING, theme::muted());

    let line_x = inner.x + 2;
    let top = area.y + HEADER_ROWS;
    let bottom = area.bottom().saturating_sub(2);
    let length = bottom.saturating_sub(top);
    let filled = (f32::from(length) * journey.progress()).round() as u16;
    for y in top..bottom {
        let t = f32::from(y - top) / f32::from(length.max(1));
        let color = if y - top < filled {
            theme::PRIMARY.mix(theme::SECONDARY, t)
        } else {
            theme::BORDER
        };
        frame.buffer.set_string(
            line_x,
            y,
            "│",
            folio_render::Style::new().fg(color),
            line_x + 1,
        );
    }

    let text = Rect::new(line_x + 4, top, inner.right().saturating_sub(line_x + 4), length);
    let mut y = top;
    for (slot, stage) in journey.stages().zip(JOURNEY_STAGES) {
        let (marker, title_style) = if slot.reached {
            (
                folio_render::Style::new()
                    .fg(theme::accent_at(stage.accent, 0.5))
                    .bold(),
                theme::heading(),
            )
        } else {
            (folio_render::Style::new().fg(theme::BORDER), theme::muted())
        };
        frame.buffer.set_string(line_x, y, "●", marker, line_x + 1);
        let label = format!("{:02}  {}", slot.index + 1, stage.title);
        frame.buffer.set_string(text.x, y, &label, title_style, text.right());
        let rows = super::paragraph(frame, text, y + 1, stage.description, theme::muted());
        y += rows.max(1) + STAGE_ROWS - 1;
    }
    frame.buffer.pop_scissor();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bounds() {
        let section = Rect::new(0, 100, 80, 40);
        assert_eq!(progress(section, Rect::new(0, 0, 80, 20)), 0.0);
        assert_eq!(progress(section, Rect::new(0, 500, 80, 20)), 1.0);
        let mid = progress(section, Rect::new(0, 110, 80, 20));
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn stages_reached_in_order() {
        let mut journey = Journey::new();
        let section = Rect::new(0, 100, 80, 40);
        let mut last = 0;
        for scroll in 0..200 {
            journey.observe(section, Rect::new(0, scroll, 80, 20));
            let reached: Vec<bool> = journey.stages().map(|s| s.reached).collect();
            // Reached stages form a prefix.
            assert!(reached.windows(2).all(|w| w[0] || !w[1]));
            assert!(journey.reached_count() >= last);
            last = journey.reached_count();
        }
        assert_eq!(last, JOURNEY_STAGES.len());
    }

    #[test]
    fn stage_positions_are_centred() {
        assert_eq!(stage_position(0, 5), 0.1);
        assert_eq!(stage_position(4, 5), 0.9);
    }

    #[test]
    fn paint_lists_every_stage() {
        let mut journey = Journey::new();
        journey.observe(Rect::new(0, 0, 80, 40), Rect::new(0, 100, 80, 20));
        let mut frame = Frame::new(80, measure(80));
        let area = frame.bounds();
        paint(&mut frame, area, &journey);
        let text = frame.buffer.to_text();
        for stage in JOURNEY_STAGES {
            assert!(text.contains(stage.title));
        }
    }
}
