#![forbid(unsafe_code)]

//! Hero: headline, calls to action, a drifting book and two floating stat
//! badges. Text fades and lifts as the hero scrolls away.

use folio_core::animation::Pose;
use folio_core::geometry::{Rect, Sides};
use folio_core::parallax::{ParallaxLayer, PointerOffset};
use folio_layout::ViewportClass;
use folio_render::text::display_width;
use folio_render::{Frame, Style};

use super::{CellMetrics, hit};
use crate::content::{
    HERO_BADGE, HERO_BODY, HERO_FLOATS, HERO_HEADLINE, HERO_PRIMARY_CTA, HERO_SCROLL_HINT,
    HERO_SECONDARY_CTA,
};
use crate::theme;

/// Fraction of the hero's scroll over which the text fades out.
pub const FADE_SPAN: f32 = 0.2;
/// Lift applied to the text at the end of the fade, in logical pixels.
pub const FADE_LIFT_PX: f32 = -50.0;

/// CTA hit indices.
pub const CTA_PRIMARY: usize = 0;
pub const CTA_SECONDARY: usize = 1;

/// Text pose for hero scroll progress `progress` in `[0, 1]`.
///
/// `progress` is 0 with the hero's top at the viewport top and 1 once its
/// bottom has scrolled past.
pub fn scroll_fade(progress: f32) -> Pose {
    let t = if progress.is_nan() {
        0.0
    } else {
        (progress / FADE_SPAN).clamp(0.0, 1.0)
    };
    Pose {
        opacity: 1.0 - t,
        x: 0.0,
        y: FADE_LIFT_PX * t,
        scale: 1.0,
    }
}

/// Hero scroll progress for `scroll_rows` of page scroll.
pub fn scroll_progress(scroll_rows: u16, hero_rows: u16) -> f32 {
    if hero_rows == 0 {
        return 1.0;
    }
    (f32::from(scroll_rows) / f32::from(hero_rows)).clamp(0.0, 1.0)
}

/// Paint the hero into `area`.
pub fn paint(
    frame: &mut Frame,
    area: Rect,
    class: ViewportClass,
    fade: Pose,
    pointer: Option<PointerOffset>,
    metrics: CellMetrics,
) {
    let offset = pointer.unwrap_or(PointerOffset::CENTER);
    frame.buffer.push_scissor(area);

    let w = i32::from(area.width);
    let h = i32::from(area.height);
    for (layer, anchor, color) in [
        (
            ParallaxLayer::BACKDROP_NEAR,
            (w / 5, h / 3),
            theme::BLOB_PRIMARY,
        ),
        (
            ParallaxLayer::BACKDROP_FAR,
            (4 * w / 5, 2 * h / 3),
            theme::BLOB_SECONDARY,
        ),
    ] {
        let (dx, dy) = layer.apply(offset);
        super::blob(
            frame,
            (
                i32::from(area.x) + anchor.0 + i32::from(metrics.cols(dx)),
                i32::from(area.y) + anchor.1 + i32::from(metrics.rows(dy)),
            ),
            ((area.width / 6).max(2), (area.height / 5).max(1)),
            color,
        );
    }

    let inner = area.inner(Sides::horizontal(4));
    let (text_col, art_col) = match class {
        ViewportClass::Expanded => {
            let half = inner.width / 2;
            (
                Rect::new(inner.x, inner.y, half.saturating_sub(2), inner.height),
                Some(Rect::new(inner.x + half + 2, inner.y, half.saturating_sub(2), inner.height)),
            )
        }
        ViewportClass::Compact => (inner, None),
    };

    let text_rows = text_height(text_col.width);
    let top = area.y + area.height.saturating_sub(text_rows) / 2;
    super::with_pose(frame, metrics, fade, |frame, _, dy| {
        let col = text_col.offset(0, dy);
        let mut y = (i32::from(top) + i32::from(dy)).max(0) as u16;
        frame.buffer.set_string(col.x, y, &format!(" {HERO_BADGE} "), theme::badge(), col.right());
        y += 2;
        y += super::paragraph(frame, col, y, HERO_HEADLINE, theme::heading().fg(theme::PRIMARY));
        y += 1;
        y += super::paragraph(frame, col, y, HERO_BODY, theme::muted());
        y += 1;

        let primary = format!("  {HERO_PRIMARY_CTA}  ");
        let primary_rect = Rect::new(col.x, y, display_width(&primary) as u16, 1);
        frame.buffer.set_string(primary_rect.x, y, &primary, theme::on_accent(crate::content::AccentToken::Primary), col.right());
        super::clickable(frame, primary_rect, hit::HERO_CTA, CTA_PRIMARY);

        let secondary = format!("  {HERO_SECONDARY_CTA}  ");
        let secondary_rect = Rect::new(primary_rect.right() + 2, y, display_width(&secondary) as u16, 1);
        if secondary_rect.right() <= col.right() {
            frame.buffer.set_string(
                secondary_rect.x,
                y,
                &secondary,
                Style::new().fg(theme::TEXT).bg(theme::SURFACE_RAISED),
                col.right(),
            );
            super::clickable(frame, secondary_rect, hit::HERO_CTA, CTA_SECONDARY);
        }
    });

    if let Some(art) = art_col {
        paint_book(frame, art, offset, metrics);
    }

    super::with_pose(frame, metrics, fade, |frame, _, _| {
        let hint_y = area.bottom().saturating_sub(2);
        super::centered(frame, area, hint_y, HERO_SCROLL_HINT, theme::muted());
        super::centered(frame, area, hint_y + 1, "⌄", theme::muted());
    });

    frame.buffer.pop_scissor();
}

fn text_height(width: u16) -> u16 {
    2 + super::wrapped_rows(HERO_HEADLINE, width) + 1 + super::wrapped_rows(HERO_BODY, width) + 1 + 1
}

fn paint_book(frame: &mut Frame, art: Rect, offset: PointerOffset, metrics: CellMetrics) {
    let book_w = (art.width / 2).clamp(10, 24);
    let book_h = (art.height / 2).clamp(6, 14);
    let (dx, dy) = ParallaxLayer::HERO_BOOK.apply(offset);
    let book = Rect::new(
        art.x + art.width.saturating_sub(book_w) / 2,
        art.y + art.height.saturating_sub(book_h) / 2,
        book_w,
        book_h,
    )
    .offset(metrics.cols(dx), metrics.rows(dy));

    for x in book.x..book.right() {
        let t = f32::from(x - book.x) / f32::from(book.width.max(2) - 1);
        super::fill(
            frame,
            Rect::new(x, book.y, 1, book.height),
            theme::accent_at(crate::content::AccentToken::Blue, t),
        );
    }
    // Spine.
    super::fill(frame, Rect::new(book.x, book.y, 1, book.height), theme::BORDER);
    super::centered(frame, book, book.y + book.height / 2, "AI", theme::heading());

    let floats = [ParallaxLayer::HERO_FLOAT_LEAD, ParallaxLayer::HERO_FLOAT_TRAIL];
    for (i, ((value, label), layer)) in HERO_FLOATS.iter().zip(floats).enumerate() {
        let (fx, fy) = layer.apply(offset);
        let text = format!(" {value} {label} ");
        let w = display_width(&text) as u16;
        let anchor = if i == 0 {
            Rect::new(book.x.saturating_sub(w / 2), book.y.saturating_sub(1), w, 1)
        } else {
            Rect::new(book.right().saturating_sub(w / 2), book.bottom(), w, 1)
        };
        let at = anchor.offset(metrics.cols(fx), metrics.rows(fy));
        frame.buffer.set_string(
            at.x,
            at.y,
            &text,
            Style::new().fg(theme::BG).bg(theme::TEXT).bold(),
            art.right().max(at.right()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_spans_first_fifth() {
        assert_eq!(scroll_fade(0.0), Pose::REST);
        let mid = scroll_fade(0.1);
        assert!((mid.opacity - 0.5).abs() < 1e-6);
        assert!((mid.y + 25.0).abs() < 1e-6);
        let done = scroll_fade(0.2);
        assert_eq!(done.opacity, 0.0);
        assert_eq!(done.y, -50.0);
        assert_eq!(scroll_fade(0.9), done);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(scroll_progress(0, 40), 0.0);
        assert_eq!(scroll_progress(80, 40), 1.0);
        assert_eq!(scroll_progress(3, 0), 1.0);
    }

    #[test]
    fn ctas_are_clickable() {
        let mut frame = Frame::new(120, 40);
        let area = frame.bounds();
        paint(
            &mut frame,
            area,
            ViewportClass::Expanded,
            Pose::REST,
            None,
            CellMetrics::default(),
        );
        let hits: Vec<_> = (0..40)
            .flat_map(|y| (0..120).map(move |x| (x, y)))
            .filter_map(|(x, y)| frame.hit_test(x, y))
            .filter(|(id, _)| *id == hit::HERO_CTA)
            .map(|(_, data)| data)
            .collect();
        assert!(hits.contains(&(CTA_PRIMARY as u64)));
        assert!(frame.buffer.to_text().contains("Scroll to explore"));
    }

    #[test]
    fn faded_text_registers_no_hits() {
        let mut frame = Frame::new(80, 30);
        let area = frame.bounds();
        paint(
            &mut frame,
            area,
            ViewportClass::Compact,
            scroll_fade(1.0),
            None,
            CellMetrics::default(),
        );
        assert!(!frame.buffer.to_text().contains("Get Started Now"));
        let any_hit = (0..30).any(|y| (0..80).any(|x| frame.hit_test(x, y).is_some()));
        assert!(!any_hit);
    }
}
