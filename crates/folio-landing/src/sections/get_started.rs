#![forbid(unsafe_code)]

//! Get-started call to action: heading, subheading and an offer card with
//! an eight-item checklist beside a pitch, quote and button.
//!
//! The three blocks rise in once, the first time the section scrolls into
//! view, and stay put afterwards.

use std::time::Duration;

use folio_core::animation::{Animation, Pose, Transition, ease_reveal};
use folio_core::geometry::{Rect, Sides};
use folio_layout::{Constraint, Flex, ViewportClass};
use folio_render::{Frame, Style};

use super::{CellMetrics, hit};
use crate::content::{
    AccentToken, GET_STARTED_CHECKLIST, GET_STARTED_CTA, GET_STARTED_FOOTNOTE, GET_STARTED_HEADING,
    GET_STARTED_OFFER_FOOTER, GET_STARTED_OFFER_TITLE, GET_STARTED_PITCH, GET_STARTED_PITCH_TITLE,
    GET_STARTED_QUOTE, GET_STARTED_QUOTE_AUTHOR, GET_STARTED_QUOTE_HEADING, GET_STARTED_SUBHEADING,
};
use crate::theme;

pub const SUBHEADING_DELAY: Duration = Duration::from_millis(200);
pub const CARD_DELAY: Duration = Duration::from_millis(300);
pub const BLOCK_DURATION: Duration = Duration::from_millis(500);
/// Rise of each block entering view, in logical pixels.
pub const BLOCK_RISE_PX: f32 = 20.0;

const MAX_CARD_WIDTH: u16 = 96;
const PAD: u16 = 2;

/// One-shot reveal clock.
#[derive(Debug, Clone, Default)]
pub struct GetStarted {
    revealed: bool,
    elapsed: Duration,
}

/// Block poses at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockPoses {
    pub heading: Pose,
    pub subheading: Pose,
    pub card: Pose,
}

impl GetStarted {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether this call started the reveal. Leaving view never
    /// hides the section again.
    pub fn set_in_view(&mut self, in_view: bool) -> bool {
        if !in_view || self.revealed {
            return false;
        }
        tracing::trace!("get-started entered view");
        self.revealed = true;
        true
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.revealed {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.revealed && self.elapsed < reveal_length()
    }

    pub fn poses(&self) -> BlockPoses {
        if !self.revealed {
            return BlockPoses {
                heading: Pose::HIDDEN,
                subheading: Pose::HIDDEN,
                card: Pose::HIDDEN,
            };
        }
        BlockPoses {
            heading: rise(Duration::ZERO, self.elapsed),
            subheading: rise(SUBHEADING_DELAY, self.elapsed),
            card: rise(CARD_DELAY, self.elapsed),
        }
    }
}

fn rise(delay: Duration, elapsed: Duration) -> Pose {
    let mut tween = Transition::new(Pose::HIDDEN.with_y(BLOCK_RISE_PX), Pose::REST, BLOCK_DURATION)
        .delay(delay)
        .easing(ease_reveal)
        .start();
    tween.tick(elapsed);
    tween.pose()
}

/// Time until the card has settled.
pub fn reveal_length() -> Duration {
    CARD_DELAY.saturating_add(BLOCK_DURATION)
}

fn card_rect(area: Rect, top: u16, rows: u16) -> Rect {
    let inner = area.inner(Sides::horizontal(4));
    let width = inner.width.min(MAX_CARD_WIDTH);
    Rect::new(inner.x + (inner.width - width) / 2, top, width, rows)
}

/// The offer and pitch halves of a card `width` wide.
fn halves(class: ViewportClass, width: u16) -> (u16, u16) {
    match class {
        ViewportClass::Expanded => {
            let cols = Flex::horizontal()
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(Rect::new(0, 0, width, 1));
            (cols[0].width, cols[1].width)
        }
        ViewportClass::Compact => (width, width),
    }
}

fn offer_rows(width: u16) -> u16 {
    let text = width.saturating_sub(2 * PAD);
    let checklist: u16 = GET_STARTED_CHECKLIST
        .iter()
        .map(|item| super::wrapped_rows(item, text.saturating_sub(2)).max(1))
        .sum();
    1 + super::wrapped_rows(GET_STARTED_OFFER_TITLE, text) + 1 + checklist + 1 + 2 + 1
}

fn pitch_rows(width: u16) -> u16 {
    let text = width.saturating_sub(2 * PAD);
    1 + super::wrapped_rows(GET_STARTED_PITCH_TITLE, text)
        + 1
        + super::wrapped_rows(GET_STARTED_PITCH, text)
        + 1
        + 1
        + super::wrapped_rows(GET_STARTED_QUOTE, text)
        + 1
        + 1
        + 1
        + 1
        + super::wrapped_rows(GET_STARTED_FOOTNOTE, text)
        + 1
}

fn card_rows(class: ViewportClass, width: u16) -> u16 {
    let (left, right) = halves(class, width);
    match class {
        ViewportClass::Expanded => offer_rows(left).max(pitch_rows(right)),
        ViewportClass::Compact => offer_rows(left) + pitch_rows(right),
    }
}

fn header_rows(width: u16) -> u16 {
    let inner = width.saturating_sub(8);
    3 + super::wrapped_rows(GET_STARTED_SUBHEADING, inner) + 1
}

/// Rows the section needs at `width` columns.
pub fn measure(class: ViewportClass, width: u16) -> u16 {
    let card = card_rect(Rect::new(0, 0, width, 1), 0, 1);
    header_rows(width) + card_rows(class, card.width) + 1
}

/// Paint the section into `area`; the button registers a
/// [`hit::GET_STARTED_CTA`] region.
pub fn paint(
    frame: &mut Frame,
    area: Rect,
    state: &GetStarted,
    class: ViewportClass,
    metrics: CellMetrics,
) {
    frame.buffer.push_scissor(area);
    let poses = state.poses();
    let inner = area.inner(Sides::horizontal(4));

    super::with_pose(frame, metrics, poses.heading, |frame, _, dy| {
        let y = shift(area.y + 1, dy);
        super::centered(frame, inner, y, GET_STARTED_HEADING, theme::heading());
    });
    super::with_pose(frame, metrics, poses.subheading, |frame, _, dy| {
        let y = shift(area.y + 3, dy);
        super::centered_paragraph(frame, inner, y, GET_STARTED_SUBHEADING, theme::muted());
    });

    let top = area.y + header_rows(area.width);
    let width = card_rect(area, top, 1).width;
    let card = card_rect(area, top, card_rows(class, width));
    super::with_pose(frame, metrics, poses.card, |frame, _, dy| {
        let card = card.offset(0, dy);
        let (left, right) = halves(class, card.width);
        let (offer, pitch) = match class {
            ViewportClass::Expanded => (
                Rect::new(card.x, card.y, left, card.height),
                Rect::new(card.x + left, card.y, right, card.height),
            ),
            ViewportClass::Compact => {
                let offer_h = offer_rows(left);
                (
                    Rect::new(card.x, card.y, left, offer_h),
                    Rect::new(card.x, card.y + offer_h, right, card.height.saturating_sub(offer_h)),
                )
            }
        };
        paint_offer(frame, offer);
        paint_pitch(frame, pitch);
    });
    frame.buffer.pop_scissor();
}

fn shift(y: u16, dy: i16) -> u16 {
    (i32::from(y) + i32::from(dy)).max(0) as u16
}

fn paint_offer(frame: &mut Frame, area: Rect) {
    let fill = theme::accent_at(AccentToken::Primary, 0.5);
    super::fill(frame, area, fill);
    let text = area.inner(Sides::horizontal(PAD));
    let on_fill = Style::new().fg(theme::TEXT).bg(fill);

    let mut y = area.y + 1;
    y += super::paragraph(frame, text, y, GET_STARTED_OFFER_TITLE, on_fill.bold());
    y += 1;
    let item_area = Rect::new(text.x + 2, text.y, text.width.saturating_sub(2), text.height);
    for item in GET_STARTED_CHECKLIST {
        frame.buffer.set_string(text.x, y, "✓", on_fill, text.right());
        y += super::paragraph(frame, item_area, y, item, on_fill).max(1);
    }
    y += 1;
    let [access, start] = GET_STARTED_OFFER_FOOTER;
    frame.buffer.set_string(text.x, y, access, on_fill.fg(theme::MUTED), text.right());
    frame.buffer.set_string(text.x, y + 1, start, on_fill.bold(), text.right());
}

fn paint_pitch(frame: &mut Frame, area: Rect) {
    super::fill(frame, area, theme::SURFACE);
    let text = area.inner(Sides::horizontal(PAD));

    let mut y = area.y + 1;
    y += super::paragraph(frame, text, y, GET_STARTED_PITCH_TITLE, theme::heading());
    y += 1;
    y += super::paragraph(frame, text, y, GET_STARTED_PITCH, theme::muted());
    y += 1;
    frame
        .buffer
        .set_string(text.x, y, GET_STARTED_QUOTE_HEADING, theme::heading(), text.right());
    y += 1;
    y += super::paragraph(frame, text, y, GET_STARTED_QUOTE, theme::muted().italic());
    frame
        .buffer
        .set_string(text.x, y, GET_STARTED_QUOTE_AUTHOR, theme::body().bold(), text.right());
    y += 2;

    let label = format!("  {GET_STARTED_CTA}  ");
    let button = Rect::new(text.x, y, text.width, 1);
    super::fill(frame, button, theme::accent_at(AccentToken::Primary, 0.5));
    super::centered(frame, button, y, &label, theme::on_accent(AccentToken::Primary));
    super::clickable(frame, button, hit::GET_STARTED_CTA, 0);
    y += 2;
    super::centered_paragraph(frame, text, y, GET_STARTED_FOOTNOTE, theme::muted());
}
