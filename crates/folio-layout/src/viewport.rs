#![forbid(unsafe_code)]

//! Viewport classification.
//!
//! The page has exactly two layouts. Widths below 768 logical pixels get the
//! [`ViewportClass::Compact`] layout; everything else gets
//! [`ViewportClass::Expanded`]. Terminal columns are converted to logical
//! pixels with a configurable cell width.
//!
//! | Class      | Logical width | Cells at 8 px/cell |
//! |------------|---------------|--------------------|
//! | `Compact`  | < 768         | < 96               |
//! | `Expanded` | >= 768        | >= 96              |

/// Discrete layout mode chosen from viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    /// Narrow: stacked tab strip, vertical slide transitions.
    Compact,
    /// Wide: pill bar, two-column content with pointer parallax.
    Expanded,
}

impl ViewportClass {
    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ViewportClass::Compact => "compact",
            ViewportClass::Expanded => "expanded",
        }
    }
}

impl std::fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps cell widths to a [`ViewportClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportClassifier {
    px_per_cell: u16,
}

impl ViewportClassifier {
    /// Logical width below which the layout is compact.
    pub const COMPACT_BELOW_PX: u32 = 768;

    /// Default logical width of one terminal column.
    pub const DEFAULT_PX_PER_CELL: u16 = 8;

    /// Create a classifier. A zero cell width is treated as 1.
    #[must_use]
    pub const fn new(px_per_cell: u16) -> Self {
        Self {
            px_per_cell: if px_per_cell == 0 { 1 } else { px_per_cell },
        }
    }

    /// Logical width of one terminal column.
    #[must_use]
    pub const fn px_per_cell(&self) -> u16 {
        self.px_per_cell
    }

    /// Logical width of `cells` columns.
    #[must_use]
    pub const fn to_px(&self, cells: u16) -> u32 {
        cells as u32 * self.px_per_cell as u32
    }

    /// Classify a logical pixel width.
    #[must_use]
    pub const fn classify_px(width_px: u32) -> ViewportClass {
        if width_px < Self::COMPACT_BELOW_PX {
            ViewportClass::Compact
        } else {
            ViewportClass::Expanded
        }
    }

    /// Classify a width in cells.
    #[must_use]
    pub const fn classify(&self, width_cells: u16) -> ViewportClass {
        Self::classify_px(self.to_px(width_cells))
    }

    /// Number of columns the feature grid uses at this width: 3, 2, or 1.
    #[must_use]
    pub const fn grid_columns(&self, width_cells: u16) -> u16 {
        let px = self.to_px(width_cells);
        if px >= 1024 {
            3
        } else if px >= Self::COMPACT_BELOW_PX {
            2
        } else {
            1
        }
    }
}

impl Default for ViewportClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PX_PER_CELL)
    }
}

/// Tracks the current [`ViewportClass`] across resizes.
///
/// [`observe`](Self::observe) reports a class only when the width crosses the
/// threshold, so same-side resizes never trigger a re-layout.
#[derive(Debug, Clone, Copy)]
pub struct LayoutSelector {
    classifier: ViewportClassifier,
    current: ViewportClass,
}

impl LayoutSelector {
    /// Create a selector for the initial (mount-time) width.
    #[must_use]
    pub fn new(classifier: ViewportClassifier, width_cells: u16) -> Self {
        Self {
            classifier,
            current: classifier.classify(width_cells),
        }
    }

    /// Current class.
    #[must_use]
    pub fn current(&self) -> ViewportClass {
        self.current
    }

    /// The classifier in use.
    #[must_use]
    pub fn classifier(&self) -> ViewportClassifier {
        self.classifier
    }

    /// Feed a new width. Returns the new class if it flipped.
    pub fn observe(&mut self, width_cells: u16) -> Option<ViewportClass> {
        let next = self.classifier.classify(width_cells);
        if next == self.current {
            return None;
        }
        folio_core::debug!(from = %self.current, to = %next, width_cells, "viewport class changed");
        self.current = next;
        Some(next)
    }
}
