#![forbid(unsafe_code)]

//! Feature grid: six cards in 3, 2 or 1 columns, revealed with a stagger
//! whenever the section scrolls into view.

use std::time::Duration;

use folio_core::animation::{Animation, Pose, Transition, ease_reveal};
use folio_core::geometry::{Rect, Sides};
use folio_core::parallax::{ParallaxLayer, PointerOffset};
use folio_layout::{Constraint, Flex};
use folio_render::Frame;

use super::CellMetrics;
use crate::content::{FEATURES, FEATURES_HEADING, FeatureCopy};
use crate::theme;

/// Gap between consecutive cards starting their reveal.
pub const CARD_STAGGER: Duration = Duration::from_millis(100);
/// Title starts after this, plus the card's stagger.
pub const TITLE_DELAY: Duration = Duration::from_millis(300);
/// Description follows its title by this much.
pub const DESCRIPTION_LAG: Duration = Duration::from_millis(100);
pub const CARD_DURATION: Duration = Duration::from_millis(500);
/// Rise of a card entering view, in logical pixels.
pub const CARD_RISE_PX: f32 = 20.0;

const CARD_ROWS: u16 = 7;
const HEADER_ROWS: u16 = 5;

/// Reveal clock for the grid. Unlike the showcase, the reveal replays
/// every time the section re-enters view.
#[derive(Debug, Clone, Default)]
pub struct FeatureGrid {
    in_view: bool,
    elapsed: Duration,
}

/// Per-card poses at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPoses {
    pub card: Pose,
    pub title: Pose,
    pub description: Pose,
}

impl FeatureGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the state changed.
    pub fn set_in_view(&mut self, in_view: bool) -> bool {
        if in_view == self.in_view {
            return false;
        }
        self.in_view = in_view;
        self.elapsed = Duration::ZERO;
        true
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.in_view {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }

    /// Whether any card is still moving.
    pub fn is_animating(&self) -> bool {
        self.in_view && self.elapsed < reveal_length(FEATURES.len())
    }

    /// Poses for card `index`. Out of view everything is hidden.
    pub fn poses(&self, index: usize) -> CardPoses {
        if !self.in_view {
            return CardPoses {
                card: Pose::HIDDEN,
                title: Pose::HIDDEN,
                description: Pose::HIDDEN,
            };
        }
        let stagger = CARD_STAGGER.saturating_mul(index as u32);
        let title_at = TITLE_DELAY.saturating_add(stagger);
        CardPoses {
            card: rise(Pose::HIDDEN.with_y(CARD_RISE_PX), stagger, self.elapsed),
            title: rise(Pose::HIDDEN.with_x(-10.0), title_at, self.elapsed),
            description: rise(
                Pose::HIDDEN,
                title_at.saturating_add(DESCRIPTION_LAG),
                self.elapsed,
            ),
        }
    }
}

fn rise(from: Pose, delay: Duration, elapsed: Duration) -> Pose {
    let mut tween = Transition::new(from, Pose::REST, CARD_DURATION)
        .delay(delay)
        .easing(ease_reveal)
        .start();
    tween.tick(elapsed);
    tween.pose()
}

/// Time until the last card's description has settled.
pub fn reveal_length(count: usize) -> Duration {
    let last = count.saturating_sub(1) as u32;
    TITLE_DELAY
        .saturating_add(CARD_STAGGER.saturating_mul(last))
        .saturating_add(DESCRIPTION_LAG)
        .saturating_add(CARD_DURATION)
}

/// Rows the section needs at `columns` columns.
pub fn measure(columns: u16) -> u16 {
    let columns = usize::from(columns.max(1));
    let rows = FEATURES.len().div_ceil(columns) as u16;
    HEADER_ROWS + rows * (CARD_ROWS + 1) + 1
}

/// Paint the heading, backdrop and card grid into `area`.
pub fn paint(
    frame: &mut Frame,
    area: Rect,
    grid: &FeatureGrid,
    columns: u16,
    pointer: Option<PointerOffset>,
    metrics: CellMetrics,
) {
    frame.buffer.push_scissor(area);
    let offset = pointer.unwrap_or(PointerOffset::CENTER);
    for (sign, anchor, color) in [
        (-1.0, (area.x + area.width / 6, area.y + area.height / 3), theme::BLOB_SECONDARY),
        (1.0, (area.x + 5 * area.width / 6, area.y + 2 * area.height / 3), theme::BLOB_PRIMARY),
    ] {
        let (dx, dy) = ParallaxLayer::FEATURE_BACKDROP.apply(offset);
        super::blob(
            frame,
            (
                i32::from(anchor.0) + i32::from(metrics.cols(sign * dx)),
                i32::from(anchor.1) + i32::from(metrics.rows(sign * dy)),
            ),
            ((area.width / 8).max(2), (area.height / 6).max(1)),
            color,
        );
    }

    let inner = area.inner(Sides::horizontal(2));
    super::centered(frame, inner, area.y + 1, "Features", theme::badge());
    super::centered_paragraph(frame, inner, area.y + 3, FEATURES_HEADING, theme::heading());

    let columns = columns.max(1);
    let constraints = (0..columns).map(|_| Constraint::Ratio(1, u32::from(columns)));
    let cols = Flex::horizontal()
        .constraints(constraints)
        .gap(2)
        .split(Rect::new(inner.x, 0, inner.width, 1));

    for (i, copy) in FEATURES.iter().enumerate() {
        let col = usize::from(columns);
        let Some(column) = cols.get(i % col) else {
            continue;
        };
        let row = (i / col) as u16;
        let card = Rect::new(
            column.x,
            area.y + HEADER_ROWS + row * (CARD_ROWS + 1),
            column.width,
            CARD_ROWS,
        );
        paint_card(frame, card, copy, grid.poses(i), metrics);
    }
    frame.buffer.pop_scissor();
}

fn paint_card(frame: &mut Frame, card: Rect, copy: &FeatureCopy, poses: CardPoses, metrics: CellMetrics) {
    super::with_pose(frame, metrics, poses.card, |frame, dx, dy| {
        let card = card.offset(dx, dy);
        super::fill(frame, card, theme::SURFACE);
        super::fill(frame, Rect::new(card.x, card.y, card.width, 1), theme::SURFACE_RAISED);
        let body = card.inner(Sides::all(1));
        super::with_pose(frame, metrics, poses.title, |frame, tx, _| {
            let title_area = body.offset(tx, 0);
            frame
                .buffer
                .set_string(title_area.x, body.y + 1, copy.title, theme::heading(), body.right());
        });
        super::with_pose(frame, metrics, poses.description, |frame, _, _| {
            let text_area = Rect::new(body.x, body.y + 2, body.width, body.height.saturating_sub(2));
            let lines = folio_render::text::wrap(copy.description, usize::from(text_area.width.max(1)));
            for (r, line) in lines.iter().take(usize::from(text_area.height)).enumerate() {
                frame.buffer.set_string(
                    text_area.x,
                    text_area.y + r as u16,
                    line,
                    theme::muted(),
                    text_area.right(),
                );
            }
        });
    });
}
