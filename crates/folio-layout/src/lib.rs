#![forbid(unsafe_code)]

//! Layout for the landing page.
//!
//! - [`Flex`] splits a rect along one axis (the feature grid columns, the
//!   showcase's text/image halves)
//! - [`viewport`] decides between the compact and expanded page layouts

pub mod viewport;

pub use folio_core::geometry::{Rect, Sides};
pub use viewport::{LayoutSelector, ViewportClass, ViewportClassifier};

/// Size of one slot along the split axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Exactly this many cells, if they fit.
    Fixed(u16),
    /// Share of the space left after gaps, `0.0..=100.0`.
    Percentage(f32),
    /// `n / d` of whatever Fixed and Percentage slots leave over.
    Ratio(u32, u32),
    /// Same as `Ratio(1, 1)`.
    Fill,
}

impl Constraint {
    /// Weight among the slots that share leftover space.
    fn weight(self) -> Option<u64> {
        const SCALE: u64 = 10_000;
        match self {
            Self::Ratio(n, d) => Some(u64::from(n) * SCALE / u64::from(d.max(1))),
            Self::Fill => Some(SCALE),
            Self::Fixed(_) | Self::Percentage(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

/// One-axis splitter.
#[derive(Debug, Clone, Default)]
pub struct Flex {
    direction: Direction,
    constraints: Vec<Constraint>,
    gap: u16,
}

impl Flex {
    pub fn vertical() -> Self {
        Self::default()
    }

    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Self::default()
        }
    }

    pub fn constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    /// Cells between adjacent slots.
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// One rect per constraint, packed from the start of `area`.
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        let count = self.constraints.len();
        if count == 0 {
            return Vec::new();
        }
        let extent = match self.direction {
            Direction::Horizontal => area.width,
            Direction::Vertical => area.height,
        };
        let gaps = u16::try_from(count - 1)
            .unwrap_or(u16::MAX)
            .saturating_mul(self.gap);
        let sizes = solve(&self.constraints, extent.saturating_sub(gaps));

        let mut pos = match self.direction {
            Direction::Horizontal => area.x,
            Direction::Vertical => area.y,
        };
        sizes
            .into_iter()
            .map(|size| {
                let rect = match self.direction {
                    Direction::Horizontal => Rect::new(pos, area.y, size, area.height),
                    Direction::Vertical => Rect::new(area.x, pos, area.width, size),
                };
                pos = pos.saturating_add(size).saturating_add(self.gap);
                rect
            })
            .collect()
    }
}

/// Sizes for `constraints` sharing `available` cells.
///
/// Fixed and Percentage slots are served first, in order, each capped by
/// what is left. Ratio and Fill slots then split the rest by weight; the
/// last of them absorbs rounding so the sizes sum to `available` whenever
/// any weighted slot exists.
pub fn solve(constraints: &[Constraint], available: u16) -> Vec<u16> {
    let mut remaining = available;
    let mut sizes: Vec<u16> = constraints
        .iter()
        .map(|&c| {
            let want = match c {
                Constraint::Fixed(n) => n,
                Constraint::Percentage(p) => {
                    (f32::from(available) * p / 100.0).round().clamp(0.0, f32::from(u16::MAX)) as u16
                }
                Constraint::Ratio(..) | Constraint::Fill => 0,
            };
            let got = want.min(remaining);
            remaining -= got;
            got
        })
        .collect();

    let weighted: Vec<(usize, u64)> = constraints
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.weight().map(|w| (i, w)))
        .collect();
    let total: u64 = weighted.iter().map(|&(_, w)| w).sum::<u64>().max(1);
    let pool = remaining;
    for (n, &(i, w)) in weighted.iter().enumerate() {
        let share = if n + 1 == weighted.len() {
            remaining
        } else {
            (u64::from(pool) * w / total).min(u64::from(remaining)) as u16
        };
        sizes[i] = share;
        remaining -= share;
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_then_fill() {
        let rects = Flex::horizontal()
            .constraints([Constraint::Fixed(10), Constraint::Fill])
            .split(Rect::new(0, 0, 50, 5));
        assert_eq!(rects, vec![Rect::new(0, 0, 10, 5), Rect::new(10, 0, 40, 5)]);
    }

    #[test]
    fn gap_comes_out_of_the_extent() {
        let rects = Flex::horizontal()
            .gap(2)
            .constraints([Constraint::Fill, Constraint::Fill])
            .split(Rect::new(0, 0, 22, 1));
        assert_eq!(rects[0].width, 10);
        assert_eq!(rects[1].x, 12);
        assert_eq!(rects[1].width, 10);
    }

    #[test]
    fn ratios_share_by_weight() {
        assert_eq!(solve(&[Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)], 90), vec![30, 60]);
    }

    #[test]
    fn equal_thirds_absorb_rounding_last() {
        let thirds = [Constraint::Ratio(1, 3); 3];
        assert_eq!(solve(&thirds, 100), vec![33, 33, 34]);
    }

    #[test]
    fn percentage_halves() {
        let sizes = solve(&[Constraint::Percentage(50.0), Constraint::Percentage(50.0)], 41);
        assert_eq!(sizes, vec![21, 20]);
    }

    #[test]
    fn fixed_is_capped_by_space() {
        assert_eq!(solve(&[Constraint::Fixed(30), Constraint::Fixed(30)], 40), vec![30, 10]);
    }

    #[test]
    fn vertical_split_stacks_rows() {
        let rects = Flex::vertical()
            .constraints([Constraint::Fixed(3), Constraint::Fill])
            .split(Rect::new(2, 1, 10, 10));
        assert_eq!(rects, vec![Rect::new(2, 1, 10, 3), Rect::new(2, 4, 10, 7)]);
    }

    #[test]
    fn no_constraints_no_rects() {
        assert!(Flex::horizontal().split(Rect::new(0, 0, 10, 1)).is_empty());
    }
}
