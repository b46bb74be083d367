#![forbid(unsafe_code)]

//! Pointer parallax.
//!
//! A single pointer position is normalized into a bounded offset in
//! `[-1, 1]` per axis, then scaled by independent per-element multipliers so
//! that background blobs, foreground decoration, and tilted content appear to
//! move at different depths.
//!
//! [`normalize`] is the stateless mapper. [`PointerSignal`] is the one place
//! the latest pointer sample lives: a single writer publishes raw samples,
//! the offset is recomputed at most once per animation frame, and any number
//! of [`ParallaxLayer`]s read the frame's snapshot.

/// Normalized pointer offset, each axis in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    /// Pointer at the viewport centre.
    pub const CENTER: PointerOffset = PointerOffset { x: 0.0, y: 0.0 };

    /// Create an offset, clamping both axes to `[-1, 1]`.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
}

fn axis(coord: f32, dimension: f32) -> f32 {
    if dimension <= 0.0 || !dimension.is_finite() {
        return 0.0;
    }
    clamp_unit(2.0 * (coord / dimension) - 1.0)
}

/// Map a pointer position to a normalized offset.
///
/// Computes `2 * (coord / dimension) - 1` per axis: the viewport centre maps
/// to `(0, 0)`, the top-left corner to `(-1, -1)`, and the bottom-right
/// corner to `(1, 1)`. A zero dimension yields `0` on that axis.
#[must_use]
pub fn normalize(x: f32, y: f32, width: f32, height: f32) -> PointerOffset {
    PointerOffset {
        x: axis(x, width),
        y: axis(y, height),
    }
}

/// Map a pointer cell to a normalized offset.
///
/// Cells are addressed `0..cols`, so the last column is the right edge:
/// column `cols - 1` maps to `+1`.
#[must_use]
pub fn normalize_cell(col: u16, row: u16, cols: u16, rows: u16) -> PointerOffset {
    normalize(
        f32::from(col),
        f32::from(row),
        f32::from(cols.saturating_sub(1)),
        f32::from(rows.saturating_sub(1)),
    )
}

/// Per-element depth multipliers applied to a [`PointerOffset`].
///
/// Multipliers are in logical pixels (or degrees, for tilt layers).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    pub x: f32,
    pub y: f32,
}

impl ParallaxLayer {
    /// Far background blob, moving against the pointer.
    pub const BACKDROP_NEAR: ParallaxLayer = ParallaxLayer::new(-30.0, -30.0);
    /// Far background blob, moving with the pointer.
    pub const BACKDROP_FAR: ParallaxLayer = ParallaxLayer::new(30.0, 30.0);
    /// Softer backdrop used behind the feature grid.
    pub const FEATURE_BACKDROP: ParallaxLayer = ParallaxLayer::new(20.0, 20.0);
    /// Foreground decoration pinned to the image's top-right corner.
    pub const DECOR_LEAD: ParallaxLayer = ParallaxLayer::new(-15.0, -15.0);
    /// Foreground decoration pinned to the image's bottom-left corner.
    pub const DECOR_TRAIL: ParallaxLayer = ParallaxLayer::new(15.0, 15.0);
    /// Content tilt: `x` is rotate-Y degrees, `y` is rotate-X degrees.
    pub const CONTENT_TILT: ParallaxLayer = ParallaxLayer::new(5.0, -5.0);
    /// Hero book drift.
    pub const HERO_BOOK: ParallaxLayer = ParallaxLayer::new(20.0, 10.0);
    /// Hero floating badge, leading.
    pub const HERO_FLOAT_LEAD: ParallaxLayer = ParallaxLayer::new(-30.0, -15.0);
    /// Hero floating badge, trailing.
    pub const HERO_FLOAT_TRAIL: ParallaxLayer = ParallaxLayer::new(30.0, 15.0);

    /// Create a layer with the given multipliers.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale an offset into this layer's displacement.
    #[must_use]
    pub fn apply(&self, offset: PointerOffset) -> (f32, f32) {
        (offset.x * self.x, offset.y * self.y)
    }

    /// Displacement rounded to whole cells, given the logical size of a cell.
    #[must_use]
    pub fn apply_cells(&self, offset: PointerOffset, px_per_col: f32, px_per_row: f32) -> (i16, i16) {
        let (dx, dy) = self.apply(offset);
        (to_cells(dx, px_per_col), to_cells(dy, px_per_row))
    }
}

fn to_cells(px: f32, px_per_cell: f32) -> i16 {
    if px_per_cell <= 0.0 {
        return 0;
    }
    (px / px_per_cell).round().clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

/// Frame-gated holder of the latest pointer sample.
///
/// One writer calls [`publish`](Self::publish) for every pointer move; the
/// owner calls [`on_frame`](Self::on_frame) once per animation frame, which
/// recomputes the normalized offset only if something changed. Readers take
/// [`snapshot`](Self::snapshot), which is stable for the whole frame.
///
/// A detached signal (owner unmounted or off-screen) drops its sample and
/// reports `None`, so readers never consume a stale position.
#[derive(Debug, Clone, Default)]
pub struct PointerSignal {
    raw: Option<(u16, u16)>,
    viewport: (u16, u16),
    dirty: bool,
    snapshot: Option<PointerOffset>,
    attached: bool,
    recomputes: u64,
}

impl PointerSignal {
    /// Create an attached signal for the given viewport size.
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            viewport: (cols, rows),
            attached: true,
            ..Self::default()
        }
    }

    /// Record a raw pointer sample. Ignored while detached.
    pub fn publish(&mut self, col: u16, row: u16) {
        if !self.attached {
            return;
        }
        if self.raw != Some((col, row)) {
            self.raw = Some((col, row));
            self.dirty = true;
        }
    }

    /// Update the viewport used for normalization.
    pub fn set_viewport(&mut self, cols: u16, rows: u16) {
        if self.viewport != (cols, rows) {
            self.viewport = (cols, rows);
            self.dirty = self.raw.is_some();
        }
    }

    /// Advance to a new animation frame, recomputing at most once.
    ///
    /// Returns the snapshot for this frame.
    pub fn on_frame(&mut self) -> Option<PointerOffset> {
        if self.attached && self.dirty {
            self.snapshot = self
                .raw
                .map(|(c, r)| normalize_cell(c, r, self.viewport.0, self.viewport.1));
            self.dirty = false;
            self.recomputes += 1;
        }
        self.snapshot()
    }

    /// The offset computed at the last frame, or `None` when detached or
    /// no pointer sample has arrived yet.
    #[must_use]
    pub fn snapshot(&self) -> Option<PointerOffset> {
        if self.attached { self.snapshot } else { None }
    }

    /// Whether a published sample is waiting for the next frame.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.attached && self.dirty
    }

    /// Resume accepting samples.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop accepting samples and forget the current one.
    pub fn detach(&mut self) {
        self.attached = false;
        self.raw = None;
        self.snapshot = None;
        self.dirty = false;
    }

    /// Whether the signal is accepting samples.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Number of times the offset has been recomputed.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}
