#![forbid(unsafe_code)]

//! Frame: a buffer plus a hit grid.
//!
//! Views draw into [`Frame::buffer`] and register clickable rectangles with
//! [`Frame::register_hit`]. Models that need to resolve clicks later keep a
//! copy of the [`HitGrid`] from their last render.

use folio_core::geometry::Rect;

use crate::buffer::Buffer;

/// Identifier for a clickable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque data attached to a hit region (e.g. a tab index).
pub type HitData = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct HitCell {
    id: Option<HitId>,
    data: HitData,
}

/// Maps cell positions to the region registered there last.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    /// Create an empty grid.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![HitCell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Register a region. Later registrations win where regions overlap.
    pub fn register(&mut self, rect: Rect, id: HitId, data: HitData) {
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize);
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize);
        if rect.x as usize >= x_end || rect.y as usize >= y_end {
            return;
        }

        let cell = HitCell { id: Some(id), data };
        for y in rect.y as usize..y_end {
            let row = y * self.width as usize;
            self.cells[row + rect.x as usize..row + x_end].fill(cell);
        }
    }

    /// Region registered at (x, y), if any.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitData)> {
        self.index(x, y)
            .and_then(|i| self.cells[i].id.map(|id| (id, self.cells[i].data)))
    }

    /// Remove all regions.
    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }

    /// Remove regions inside `rect`.
    pub fn clear_rect(&mut self, rect: Rect) {
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize);
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize);
        if rect.x as usize >= x_end {
            return;
        }
        for y in rect.y as usize..y_end {
            let row = y * self.width as usize;
            self.cells[row + rect.x as usize..row + x_end].fill(HitCell::default());
        }
    }
}

/// A render target: cells plus click regions.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Cell grid.
    pub buffer: Buffer,
    hits: HitGrid,
}

impl Frame {
    /// Create a blank frame.
    pub fn new(width: u16, height: u16) -> Self {
        let buffer = Buffer::new(width, height);
        let hits = HitGrid::new(buffer.width(), buffer.height());
        Self { buffer, hits }
    }

    /// Frame width.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Bounding rect.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Register a clickable region, clipped to the current scissor.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, data: HitData) {
        let clipped = self.buffer.current_scissor().intersection(&rect);
        self.hits.register(clipped, id, data);
    }

    /// Region at (x, y), if any.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitData)> {
        self.hits.hit_test(x, y)
    }

    /// Make `rect` unclickable, e.g. under an overlay about to be painted.
    pub fn clear_hits(&mut self, rect: Rect) {
        self.hits.clear_rect(rect);
    }

    /// The hit grid, for resolving clicks after the frame is gone.
    pub fn hits(&self) -> &HitGrid {
        &self.hits
    }

    /// Copy a window of `src` (cells and hit regions) to `(dst_x, dst_y)`.
    pub fn blit_from(&mut self, src: &Frame, src_rect: Rect, dst_x: u16, dst_y: u16) {
        self.buffer.copy_from(&src.buffer, src_rect, dst_x, dst_y);
        for dy in 0..src_rect.height {
            for dx in 0..src_rect.width {
                let (sx, sy) = (src_rect.x.saturating_add(dx), src_rect.y.saturating_add(dy));
                let (tx, ty) = (dst_x.saturating_add(dx), dst_y.saturating_add(dy));
                if let (Some(si), Some(ti)) = (src.hits.index(sx, sy), self.hits.index(tx, ty)) {
                    self.hits.cells[ti] = src.hits.cells[si];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_hit() {
        let mut frame = Frame::new(10, 5);
        frame.register_hit(Rect::new(2, 1, 3, 1), HitId::new(7), 42);
        assert_eq!(frame.hit_test(2, 1), Some((HitId::new(7), 42)));
        assert_eq!(frame.hit_test(4, 1), Some((HitId::new(7), 42)));
        assert_eq!(frame.hit_test(5, 1), None);
        assert_eq!(frame.hit_test(2, 2), None);
    }

    #[test]
    fn later_registration_wins() {
        let mut grid = HitGrid::new(4, 1);
        grid.register(Rect::new(0, 0, 4, 1), HitId::new(1), 0);
        grid.register(Rect::new(1, 0, 1, 1), HitId::new(2), 0);
        assert_eq!(grid.hit_test(1, 0).map(|h| h.0), Some(HitId::new(2)));
        assert_eq!(grid.hit_test(2, 0).map(|h| h.0), Some(HitId::new(1)));
    }

    #[test]
    fn out_of_bounds_registration_is_clipped() {
        let mut grid = HitGrid::new(3, 3);
        grid.register(Rect::new(2, 2, 10, 10), HitId::new(1), 0);
        assert!(grid.hit_test(2, 2).is_some());
        assert!(grid.hit_test(3, 3).is_none());
    }

    #[test]
    fn clear_rect_removes_only_inside() {
        let mut frame = Frame::new(6, 2);
        frame.register_hit(Rect::new(0, 0, 6, 2), HitId::new(3), 1);
        frame.clear_hits(Rect::new(0, 0, 6, 1));
        assert!(frame.hit_test(2, 0).is_none());
        assert_eq!(frame.hit_test(2, 1), Some((HitId::new(3), 1)));
    }

    #[test]
    fn scissor_clips_hits() {
        let mut frame = Frame::new(10, 1);
        frame.buffer.push_scissor(Rect::new(0, 0, 3, 1));
        frame.register_hit(Rect::new(0, 0, 10, 1), HitId::new(1), 0);
        frame.buffer.pop_scissor();
        assert!(frame.hit_test(2, 0).is_some());
        assert!(frame.hit_test(3, 0).is_none());
    }

    #[test]
    fn blit_translates_hits() {
        let mut page = Frame::new(5, 20);
        page.register_hit(Rect::new(0, 12, 5, 1), HitId::new(3), 9);
        let mut screen = Frame::new(5, 5);
        screen.blit_from(&page, Rect::new(0, 10, 5, 5), 0, 0);
        assert_eq!(screen.hit_test(0, 2), Some((HitId::new(3), 9)));
    }
}
