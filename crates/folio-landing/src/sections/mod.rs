#![forbid(unsafe_code)]

//! Page sections other than the showcase, plus the drawing helpers they
//! share with it.

pub mod faq;
pub mod features;
pub mod get_started;
pub mod hero;
pub mod journey;
pub mod navbar;

use folio_core::animation::Pose;
use folio_core::geometry::Rect;
use folio_layout::ViewportClassifier;
use folio_render::frame::HitId;
use folio_render::text::{display_width, wrap};
use folio_render::{Cell, Frame, PackedRgba, Style};

/// Hit region ids. `HitData` carries the item index.
pub mod hit {
    use folio_render::frame::HitId;

    pub const SHOWCASE_TAB: HitId = HitId::new(1);
    pub const FAQ_ITEM: HitId = HitId::new(2);
    pub const NAV_LINK: HitId = HitId::new(3);
    pub const HERO_CTA: HitId = HitId::new(4);
    pub const GET_STARTED_CTA: HitId = HitId::new(5);
}

/// Logical-pixel to cell conversion.
///
/// Terminal cells are roughly twice as tall as they are wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub px_per_col: f32,
    pub px_per_row: f32,
}

impl CellMetrics {
    pub fn new(classifier: ViewportClassifier) -> Self {
        let px = f32::from(classifier.px_per_cell());
        Self {
            px_per_col: px,
            px_per_row: px * 2.0,
        }
    }

    pub fn cols(&self, px: f32) -> i16 {
        to_cells(px, self.px_per_col)
    }

    pub fn rows(&self, px: f32) -> i16 {
        to_cells(px, self.px_per_row)
    }

    /// Cell offset of a pose.
    pub fn pose_offset(&self, pose: Pose) -> (i16, i16) {
        (self.cols(pose.x), self.rows(pose.y))
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(ViewportClassifier::default())
    }
}

fn to_cells(px: f32, per: f32) -> i16 {
    if per <= 0.0 || !px.is_finite() {
        return 0;
    }
    (px / per).round().clamp(-64.0, 64.0) as i16
}

/// Draw `text` horizontally centred in `area` on row `y`.
pub(crate) fn centered(frame: &mut Frame, area: Rect, y: u16, text: &str, style: Style) {
    let w = display_width(text) as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    frame.buffer.set_string(x, y, text, style, area.right());
}

/// Wrap and centre a paragraph; returns rows used.
pub(crate) fn centered_paragraph(
    frame: &mut Frame,
    area: Rect,
    y: u16,
    text: &str,
    style: Style,
) -> u16 {
    let lines = wrap(text, usize::from(area.width));
    for (i, line) in lines.iter().enumerate() {
        centered(frame, area, y + i as u16, line, style);
    }
    lines.len() as u16
}

/// Left-aligned wrapped paragraph; returns rows used.
pub(crate) fn paragraph(frame: &mut Frame, area: Rect, y: u16, text: &str, style: Style) -> u16 {
    let lines = wrap(text, usize::from(area.width));
    for (i, line) in lines.iter().enumerate() {
        frame
            .buffer
            .set_string(area.x, y + i as u16, line, style, area.right());
    }
    lines.len() as u16
}

pub(crate) fn wrapped_rows(text: &str, width: u16) -> u16 {
    wrap(text, usize::from(width)).len() as u16
}

/// Fill a rect with a background colour.
pub(crate) fn fill(frame: &mut Frame, rect: Rect, color: PackedRgba) {
    frame.buffer.fill(rect, Cell::from_char(' ').with_bg(color));
}

/// Soft backdrop blob: a translucent ellipse-ish block.
pub(crate) fn blob(frame: &mut Frame, center: (i32, i32), radius: (u16, u16), color: PackedRgba) {
    let (rx, ry) = (i32::from(radius.0.max(1)), i32::from(radius.1.max(1)));
    for dy in -ry..=ry {
        for dx in -rx..=rx {
            let nx = dx as f32 / rx as f32;
            let ny = dy as f32 / ry as f32;
            if nx * nx + ny * ny > 1.0 {
                continue;
            }
            let (x, y) = (center.0 + dx, center.1 + dy);
            if x < 0 || y < 0 || x > i32::from(u16::MAX) || y > i32::from(u16::MAX) {
                continue;
            }
            frame
                .buffer
                .set(x as u16, y as u16, Cell::from_char(' ').with_bg(color));
        }
    }
}

/// Run `paint` with `pose` applied as an opacity layer and cell offset.
pub(crate) fn with_pose(
    frame: &mut Frame,
    metrics: CellMetrics,
    pose: Pose,
    paint: impl FnOnce(&mut Frame, i16, i16),
) {
    if !pose.is_visible() {
        return;
    }
    let (dx, dy) = metrics.pose_offset(pose);
    frame.buffer.push_opacity(pose.opacity);
    paint(frame, dx, dy);
    frame.buffer.pop_opacity();
}

/// Register `rect` as clickable item `index` of `id`.
pub(crate) fn clickable(frame: &mut Frame, rect: Rect, id: HitId, index: usize) {
    frame.register_hit(rect, id, index as u64);
}
