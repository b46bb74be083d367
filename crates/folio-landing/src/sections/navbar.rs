#![forbid(unsafe_code)]

//! Fixed top bar. Painted over the viewport rather than the page, so it
//! stays put while the page scrolls.

use folio_core::geometry::Rect;
use folio_render::text::display_width;
use folio_render::{Frame, Style};

use super::hit;
use crate::content::{BRAND, NAV_LINKS};
use crate::theme;

/// Scroll distance past which the bar turns solid, in logical pixels.
pub const SCROLLED_THRESHOLD_PX: f32 = 20.0;

pub const ROWS: u16 = 1;

/// Whether `scroll_px` of page scroll counts as scrolled.
pub fn is_scrolled(scroll_px: f32) -> bool {
    scroll_px > SCROLLED_THRESHOLD_PX
}

/// Paint the bar on row `area.y`. Links register `NAV_LINK` hits with their
/// index into [`NAV_LINKS`].
pub fn paint(frame: &mut Frame, area: Rect, scrolled: bool) {
    let bar = Rect::new(area.x, area.y, area.width, ROWS);
    if scrolled {
        super::fill(frame, bar, theme::SURFACE);
    }
    frame
        .buffer
        .set_string(bar.x + 2, bar.y, BRAND, theme::heading().fg(theme::PRIMARY), bar.right());

    let widths: Vec<u16> = NAV_LINKS.iter().map(|l| display_width(l) as u16).collect();
    let total: u16 = widths.iter().sum::<u16>() + 3 * widths.len().saturating_sub(1) as u16;
    let brand_end = bar.x + 2 + display_width(BRAND) as u16 + 2;
    let mut x = bar.right().saturating_sub(total + 2).max(brand_end);
    let style = if scrolled {
        theme::body()
    } else {
        Style::new().fg(theme::TEXT)
    };
    for (i, (link, w)) in NAV_LINKS.iter().zip(widths).enumerate() {
        if x + w > bar.right() {
            break;
        }
        frame.buffer.set_string(x, bar.y, link, style, bar.right());
        super::clickable(frame, Rect::new(x, bar.y, w, 1), hit::NAV_LINK, i);
        x += w + 3;
    }
}
