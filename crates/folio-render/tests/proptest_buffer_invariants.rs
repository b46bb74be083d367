//! Property-based invariant tests for Buffer and Frame.
//!
//! 1. Writes never land outside the active scissor.
//! 2. Text rendering always has `height` lines of `width` cells.
//! 3. Opacity stack product stays in [0, 1].
//! 4. Hit regions registered in a page survive a blit at any scroll offset.

use folio_core::geometry::Rect;
use folio_render::{Buffer, Cell, Frame, HitId, Style};
use proptest::prelude::*;

fn rect_in(w: u16, h: u16) -> impl Strategy<Value = Rect> {
    (0..w, 0..h, 0..=w, 0..=h).prop_map(|(x, y, rw, rh)| Rect::new(x, y, rw, rh))
}

proptest! {
    #[test]
    fn scissor_contains_all_writes(clip in rect_in(30, 10), text in "[a-z ]{0,40}", row in 0u16..10) {
        let mut buf = Buffer::new(30, 10);
        buf.push_scissor(clip);
        buf.set_string(0, row, &text, Style::new(), 30);
        buf.fill(Rect::new(0, 0, 30, 10), Cell::from_char('#'));
        buf.pop_scissor();

        for y in 0..10 {
            for x in 0..30 {
                let cell = buf.get(x, y).copied().unwrap_or_default();
                if !clip.contains(x, y) {
                    prop_assert_eq!(cell.content, ' ');
                }
            }
        }
    }

    #[test]
    fn text_shape_is_stable(w in 1u16..60, h in 1u16..20, text in "\\PC{0,30}") {
        let mut buf = Buffer::new(w, h);
        buf.set_string(0, 0, &text, Style::new(), w);
        let rendered = buf.to_text();
        prop_assert_eq!(rendered.lines().count(), h as usize);
    }

    #[test]
    fn opacity_stays_bounded(values in proptest::collection::vec(-1.0f32..2.0, 0..10)) {
        let mut buf = Buffer::new(1, 1);
        for v in values {
            buf.push_opacity(v);
            let o = buf.current_opacity();
            prop_assert!((0.0..=1.0).contains(&o));
        }
    }

    #[test]
    fn hits_follow_scroll(row in 0u16..40, scroll in 0u16..30) {
        let mut page = Frame::new(10, 40);
        page.register_hit(Rect::new(0, row, 10, 1), HitId::new(1), u64::from(row));
        let mut screen = Frame::new(10, 10);
        screen.blit_from(&page, Rect::new(0, scroll, 10, 10), 0, 0);

        let visible = row >= scroll && row < scroll + 10;
        let hit = screen.hit_test(5, row.wrapping_sub(scroll));
        if visible {
            prop_assert_eq!(hit, Some((HitId::new(1), u64::from(row))));
        }
    }
}
