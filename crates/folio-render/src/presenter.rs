#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission through crossterm.
//!
//! The presenter remembers the last buffer it drew and, on the next frame,
//! only emits cells that changed. It tracks the terminal's current style and
//! cursor position so redundant SGR and cursor moves are skipped.
//!
//! Colours are stored with straight alpha; the presenter composites every
//! cell over a fixed page background before emitting 24-bit colour.
//!
//! ```ignore
//! let mut presenter = Presenter::new(std::io::stdout(), PackedRgba::BLACK);
//! presenter.present(&frame.buffer)?;
//! ```

use std::io::{self, BufWriter, Write};

use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};

const BUFFER_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pen {
    fg: PackedRgba,
    bg: PackedRgba,
    flags: StyleFlags,
}

/// Diffing ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    base: PackedRgba,
    previous: Option<Buffer>,
    pen: Option<Pen>,
    cursor: Option<(u16, u16)>,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter compositing over `base`.
    pub fn new(writer: W, base: PackedRgba) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            base,
            previous: None,
            pen: None,
            cursor: None,
        }
    }

    /// Forget the previous frame so the next present repaints everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
        self.pen = None;
        self.cursor = None;
    }

    /// Draw `buffer`, emitting only cells that differ from the last frame.
    pub fn present(&mut self, buffer: &Buffer) -> io::Result<()> {
        let full = match &self.previous {
            Some(prev) => prev.width() != buffer.width() || prev.height() != buffer.height(),
            None => true,
        };
        if full {
            queue!(self.writer, terminal::Clear(terminal::ClearType::All))?;
            self.pen = None;
            self.cursor = None;
        }

        let mut emitted = 0usize;
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                if cell.is_continuation() {
                    continue;
                }
                let unchanged = !full
                    && self
                        .previous
                        .as_ref()
                        .and_then(|prev| prev.get(x, y))
                        .is_some_and(|old| old == cell);
                if unchanged {
                    continue;
                }
                self.emit_cell(x, y, cell)?;
                emitted += 1;
            }
        }

        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        self.pen = None;
        self.writer.flush()?;
        folio_core::trace!(cells = emitted, full, "frame presented");

        self.previous = Some(buffer.clone());
        Ok(())
    }

    fn emit_cell(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(self.writer, cursor::MoveTo(x, y))?;
        }

        let bg = cell.bg.over(self.base);
        let pen = Pen {
            fg: cell.fg.over(bg),
            bg,
            flags: cell.flags,
        };
        if self.pen != Some(pen) {
            self.apply_pen(pen)?;
        }

        queue!(self.writer, Print(cell.content))?;
        self.cursor = Some((x.saturating_add(cell.width() as u16), y));
        Ok(())
    }

    fn apply_pen(&mut self, pen: Pen) -> io::Result<()> {
        let flags_changed = self.pen.is_none_or(|old| old.flags != pen.flags);
        if flags_changed {
            queue!(self.writer, SetAttribute(Attribute::Reset))?;
            for (flag, attr) in [
                (StyleFlags::BOLD, Attribute::Bold),
                (StyleFlags::DIM, Attribute::Dim),
                (StyleFlags::ITALIC, Attribute::Italic),
                (StyleFlags::UNDERLINE, Attribute::Underlined),
                (StyleFlags::REVERSE, Attribute::Reverse),
                (StyleFlags::STRIKETHROUGH, Attribute::CrossedOut),
            ] {
                if pen.flags.contains(flag) {
                    queue!(self.writer, SetAttribute(attr))?;
                }
            }
        }
        queue!(
            self.writer,
            SetForegroundColor(to_color(pen.fg)),
            SetBackgroundColor(to_color(pen.bg))
        )?;
        self.pen = Some(pen);
        Ok(())
    }

    /// Consume the presenter, returning the writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

fn to_color(c: PackedRgba) -> Color {
    Color::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Style;

    fn present_twice(first: &Buffer, second: &Buffer) -> (Vec<u8>, usize) {
        let mut p = Presenter::new(Vec::new(), PackedRgba::BLACK);
        p.present(first).expect("present");
        let first_len = p.writer.get_ref().len();
        p.present(second).expect("present");
        let out = p.into_inner().expect("inner");
        let second_len = out.len() - first_len;
        (out, second_len)
    }

    #[test]
    fn first_frame_contains_text() {
        let mut buf = Buffer::new(8, 1);
        buf.set_string(0, 0, "folio", Style::new(), 8);
        let mut p = Presenter::new(Vec::new(), PackedRgba::BLACK);
        p.present(&buf).expect("present");
        let out = String::from_utf8(p.into_inner().expect("inner")).expect("utf8");
        assert!(out.contains('f') && out.contains('o'));
        assert!(out.contains("\x1b[38;2;"));
    }

    #[test]
    fn identical_frame_emits_little() {
        let mut buf = Buffer::new(20, 4);
        buf.set_string(0, 0, "unchanged content", Style::new(), 20);
        let (_, second) = present_twice(&buf, &buf);
        // Only the trailing reset.
        assert!(second < 10, "second frame wrote {second} bytes");
    }

    #[test]
    fn changed_cell_is_emitted() {
        let a = Buffer::new(5, 1);
        let mut b = Buffer::new(5, 1);
        b.set(3, 0, Cell::from_char('z'));
        let (out, _) = present_twice(&a, &b);
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.ends_with("z\x1b[0m"), "got {text:?}");
    }
}
