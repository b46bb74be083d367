#![forbid(unsafe_code)]

//! Fixed page palette.
//!
//! | Token | Use |
//! |-------|-----|
//! | `BG` | page background, also the presenter's compositing base |
//! | `SURFACE` | cards, tab bar |
//! | `TEXT` / `MUTED` | body copy |
//! | `PRIMARY` / `SECONDARY` | brand gradient |

use folio_render::{PackedRgba, Style};

use crate::content::AccentToken;

pub const BG: PackedRgba = PackedRgba::rgb(12, 10, 24);
pub const SURFACE: PackedRgba = PackedRgba::rgb(30, 26, 50);
pub const SURFACE_RAISED: PackedRgba = PackedRgba::rgb(44, 38, 72);
pub const BORDER: PackedRgba = PackedRgba::rgb(70, 64, 104);
pub const TEXT: PackedRgba = PackedRgba::rgb(240, 238, 250);
pub const MUTED: PackedRgba = PackedRgba::rgb(160, 156, 184);
pub const PRIMARY: PackedRgba = PackedRgba::rgb(124, 92, 255);
pub const SECONDARY: PackedRgba = PackedRgba::rgb(236, 72, 153);

/// Soft glow used for the parallax backdrop blobs.
pub const BLOB_PRIMARY: PackedRgba = PackedRgba::rgba(124, 92, 255, 48);
pub const BLOB_SECONDARY: PackedRgba = PackedRgba::rgba(236, 72, 153, 40);

/// Start and end colour of an accent gradient.
pub const fn accent_gradient(token: AccentToken) -> (PackedRgba, PackedRgba) {
    match token {
        AccentToken::Primary => (PRIMARY, SECONDARY),
        AccentToken::Blue => (PackedRgba::rgb(59, 130, 246), PackedRgba::rgb(79, 70, 229)),
        AccentToken::Purple => (PackedRgba::rgb(168, 85, 247), PackedRgba::rgb(219, 39, 119)),
        AccentToken::Green => (PackedRgba::rgb(34, 197, 94), PackedRgba::rgb(13, 148, 136)),
        AccentToken::Orange => (PackedRgba::rgb(249, 115, 22), PackedRgba::rgb(220, 38, 38)),
        AccentToken::Yellow => (PackedRgba::rgb(234, 179, 8), PackedRgba::rgb(217, 119, 6)),
    }
}

/// Colour at position `t` in `[0, 1]` along an accent gradient.
pub fn accent_at(token: AccentToken, t: f32) -> PackedRgba {
    let (from, to) = accent_gradient(token);
    from.mix(to, t)
}

pub const fn heading() -> Style {
    Style::new().fg(TEXT).bold()
}

pub const fn body() -> Style {
    Style::new().fg(TEXT)
}

pub const fn muted() -> Style {
    Style::new().fg(MUTED)
}

pub const fn badge() -> Style {
    Style::new().fg(PRIMARY).bg(SURFACE_RAISED).bold()
}

/// Style for text drawn on an accent fill.
pub fn on_accent(token: AccentToken) -> Style {
    Style::new().fg(PackedRgba::WHITE).bg(accent_at(token, 0.5)).bold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints() {
        let (from, to) = accent_gradient(AccentToken::Green);
        assert_eq!(accent_at(AccentToken::Green, 0.0), from);
        assert_eq!(accent_at(AccentToken::Green, 1.0), to);
    }

    #[test]
    fn palette_is_opaque() {
        for c in [BG, SURFACE, TEXT, MUTED, PRIMARY, SECONDARY] {
            assert_eq!(c.a(), 255);
        }
    }
}
