#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s with a scissor (clipping) stack and
//! an opacity stack for fading panels in and out.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Scissor stack intersection monotonically decreases on push
//! 4. Opacity stack product stays in `[0.0, 1.0]`
//! 5. Scissor/opacity stacks always have at least one element

use folio_core::geometry::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::{Cell, Style};

/// A 2D grid of terminal cells.
///
/// ```
/// use folio_render::buffer::Buffer;
/// use folio_render::cell::Cell;
///
/// let mut buffer = Buffer::new(80, 24);
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set(1, 0, Cell::from_char('i'));
/// ```
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    scissor_stack: Vec<Rect>,
    opacity_stack: Vec<f32>,
}

impl Buffer {
    /// Create a buffer filled with default cells.
    ///
    /// Zero dimensions are raised to 1.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
            scissor_stack: vec![Rect::from_size(width, height)],
            opacity_stack: vec![1.0],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rect of the entire buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Cell at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write a cell.
    ///
    /// - Respects the current scissor region and skips if outside
    /// - Applies the current opacity to both colours
    /// - Drops the write entirely when the effective opacity is zero
    /// - Wide characters are written atomically with continuation cells, or
    ///   not at all if they don't fit
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let opacity = self.current_opacity();
        if opacity <= 0.0 {
            return;
        }

        let width = cell.width().max(1) as u16;
        let scissor = self.current_scissor();
        for i in 0..width {
            let Some(cx) = x.checked_add(i) else {
                return;
            };
            if self.index(cx, y).is_none() || !scissor.contains(cx, y) {
                return;
            }
        }

        let Some(idx) = self.index(x, y) else {
            return;
        };
        let mut out = cell;
        if opacity < 1.0 {
            out.fg = out.fg.with_opacity(opacity);
            out.bg = out.bg.with_opacity(opacity);
        }
        out.bg = out.bg.over(self.cells[idx].bg);
        self.cells[idx] = out;

        for i in 1..width {
            if let Some(tail) = self.index(x + i, y) {
                self.cells[tail] = Cell {
                    bg: out.bg,
                    ..Cell::CONTINUATION
                };
            }
        }
    }

    /// Write a string starting at (x, y), clipped at `max_x` (exclusive).
    ///
    /// Text is segmented into grapheme clusters; each cluster is stored as its
    /// first scalar value. Returns the column after the last written cell.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let w = grapheme.width() as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > max_x {
                break;
            }
            let Some(ch) = grapheme.chars().next() else {
                continue;
            };
            let base = self.get(col, y).copied().unwrap_or_default();
            self.set(col, y, style.apply(Cell { content: ch, ..base }));
            col = col.saturating_add(w);
        }
        col
    }

    /// Fill a rectangular region. Respects scissor and opacity.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = self.current_scissor().intersection(&rect);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Raw access to the cell slice, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // ========== Scissor Stack ==========

    /// Push a clipping region; the effective scissor is the intersection of
    /// all pushed rects.
    pub fn push_scissor(&mut self, rect: Rect) {
        let next = self.current_scissor().intersection(&rect);
        self.scissor_stack.push(next);
    }

    /// Pop a clipping region. The base scissor is never popped.
    pub fn pop_scissor(&mut self) {
        if self.scissor_stack.len() > 1 {
            self.scissor_stack.pop();
        }
    }

    /// Current effective scissor region.
    #[inline]
    pub fn current_scissor(&self) -> Rect {
        self.scissor_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.bounds())
    }

    // ========== Opacity Stack ==========

    /// Push an opacity multiplier; values are clamped to `[0.0, 1.0]`.
    pub fn push_opacity(&mut self, opacity: f32) {
        let next = self.current_opacity() * opacity.clamp(0.0, 1.0);
        self.opacity_stack.push(next);
    }

    /// Pop an opacity multiplier. The base opacity is never popped.
    pub fn pop_opacity(&mut self) {
        if self.opacity_stack.len() > 1 {
            self.opacity_stack.pop();
        }
    }

    /// Current effective opacity.
    #[inline]
    pub fn current_opacity(&self) -> f32 {
        self.opacity_stack.last().copied().unwrap_or(1.0)
    }

    // ========== Copying ==========

    /// Copy `src_rect` from `src` to this buffer at `(dst_x, dst_y)`.
    ///
    /// Cells are copied verbatim: no compositing, scissor still applies.
    pub fn copy_from(&mut self, src: &Buffer, src_rect: Rect, dst_x: u16, dst_y: u16) {
        let scissor = self.current_scissor();
        for dy in 0..src_rect.height {
            for dx in 0..src_rect.width {
                let (tx, ty) = (dst_x.saturating_add(dx), dst_y.saturating_add(dy));
                if !scissor.contains(tx, ty) {
                    continue;
                }
                let cell = src.get(src_rect.x.saturating_add(dx), src_rect.y.saturating_add(dy));
                if let (Some(cell), Some(idx)) = (cell, self.index(tx, ty)) {
                    self.cells[idx] = *cell;
                }
            }
        }
    }

    /// Plain-text rendering, one line per row, continuation cells skipped.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            if y > 0 {
                out.push('\n');
            }
            let start = y as usize * self.width as usize;
            for cell in &self.cells[start..start + self.width as usize] {
                if !cell.is_continuation() {
                    out.push(cell.content);
                }
            }
        }
        out
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::PackedRgba;

    #[test]
    fn set_and_get() {
        let mut buf = Buffer::new(4, 2);
        buf.set(1, 1, Cell::from_char('x'));
        assert_eq!(buf.get(1, 1).map(|c| c.content), Some('x'));
        assert!(buf.get(4, 0).is_none());
    }

    #[test]
    fn zero_size_is_raised() {
        let buf = Buffer::new(0, 0);
        assert_eq!((buf.width(), buf.height()), (1, 1));
    }

    #[test]
    fn wide_char_writes_continuation() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('界'));
        assert!(buf.get(1, 0).is_some_and(Cell::is_continuation));
        assert_eq!(buf.to_text(), "界  ");
    }

    #[test]
    fn wide_char_at_edge_is_dropped() {
        let mut buf = Buffer::new(2, 1);
        buf.set(1, 0, Cell::from_char('界'));
        assert_eq!(buf.to_text(), "  ");
    }

    #[test]
    fn scissor_clips() {
        let mut buf = Buffer::new(5, 1);
        buf.push_scissor(Rect::new(1, 0, 2, 1));
        buf.fill(buf.bounds(), Cell::from_char('#'));
        buf.pop_scissor();
        assert_eq!(buf.to_text(), " ##  ");
    }

    #[test]
    fn zero_opacity_drops_writes() {
        let mut buf = Buffer::new(3, 1);
        buf.push_opacity(0.0);
        buf.set_string(0, 0, "abc", Style::new(), 3);
        buf.pop_opacity();
        assert_eq!(buf.to_text(), "   ");
    }

    #[test]
    fn partial_opacity_scales_alpha() {
        let mut buf = Buffer::new(1, 1);
        buf.push_opacity(0.5);
        buf.set(0, 0, Cell::from_char('a').with_fg(PackedRgba::WHITE));
        let a = buf.get(0, 0).map(|c| c.fg.a()).unwrap_or(0);
        assert!((127..=128).contains(&a));
    }

    #[test]
    fn set_string_clips_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.set_string(2, 0, "hello", Style::new(), 5);
        assert_eq!(end, 5);
        assert_eq!(buf.to_text(), "  hel     ");
    }

    #[test]
    fn copy_from_offsets() {
        let mut src = Buffer::new(3, 3);
        src.set_string(0, 1, "abc", Style::new(), 3);
        let mut dst = Buffer::new(3, 1);
        dst.copy_from(&src, Rect::new(0, 1, 3, 1), 0, 0);
        assert_eq!(dst.to_text(), "abc");
    }
}
