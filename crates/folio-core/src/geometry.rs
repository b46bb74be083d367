#![forbid(unsafe_code)]

//! Cell-space rectangles. The page is laid out in rows and columns, so
//! everything here is `u16`, and subtraction saturates instead of wrapping.

/// Half-open cell rectangle, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `width` x `height` at the origin.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// One past the last column.
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the last row.
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// No cells at all.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap with `other`, or an empty rect.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Overlap with `other`, or `None` when they are disjoint.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Shrink by `margin` on each side.
    pub fn inner(&self, margin: Sides) -> Rect {
        Rect {
            x: self.x.saturating_add(margin.left),
            y: self.y.saturating_add(margin.top),
            width: self.width.saturating_sub(margin.horizontal_sum()),
            height: self.height.saturating_sub(margin.vertical_sum()),
        }
    }

    /// Nudge by a signed cell offset. Parallax and slide transitions move
    /// decorations by a few cells either way; the origin clamps.
    #[must_use]
    pub fn offset(&self, dx: i16, dy: i16) -> Rect {
        Rect {
            x: shift(self.x, dx),
            y: shift(self.y, dy),
            ..*self
        }
    }

    /// Share of this rect's cells inside `window`, in `[0, 1]`. Zero for an
    /// empty rect.
    #[must_use]
    pub fn visible_fraction(&self, window: &Rect) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let visible = self.intersection(window).area();
        visible as f32 / self.area() as f32
    }
}

fn shift(value: u16, delta: i16) -> u16 {
    if delta >= 0 {
        value.saturating_add(delta.unsigned_abs())
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}

/// Per-side padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    pub const fn all(val: u16) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Left and right only.
    pub const fn horizontal(val: u16) -> Self {
        Self {
            top: 0,
            right: val,
            bottom: 0,
            left: val,
        }
    }

    #[inline]
    pub const fn horizontal_sum(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    #[inline]
    pub const fn vertical_sum(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 5);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 7));
        assert!(!r.contains(6, 7));
        assert!(!r.contains(5, 8));
    }

    #[test]
    fn intersection_of_disjoint_is_empty() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(10, 10, 4, 4);
        assert!(a.intersection(&b).is_empty());
        assert_eq!(a.intersection_opt(&b), None);
    }

    #[test]
    fn inner_shrinks_by_margin() {
        let r = Rect::new(0, 0, 10, 6).inner(Sides::all(1));
        assert_eq!(r, Rect::new(1, 1, 8, 4));
    }

    #[test]
    fn inner_saturates() {
        let r = Rect::new(0, 0, 1, 1).inner(Sides::all(3));
        assert!(r.is_empty());
    }

    #[test]
    fn offset_saturates_at_origin() {
        let r = Rect::new(1, 1, 3, 3).offset(-5, 2);
        assert_eq!(r, Rect::new(0, 3, 3, 3));
    }

    #[test]
    fn visible_fraction_partial() {
        let section = Rect::new(0, 10, 10, 10);
        let window = Rect::new(0, 0, 10, 15);
        assert!((section.visible_fraction(&window) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn visible_fraction_of_empty_is_zero() {
        let window = Rect::new(0, 0, 10, 10);
        assert_eq!(Rect::new(0, 0, 0, 5).visible_fraction(&window), 0.0);
    }
}
