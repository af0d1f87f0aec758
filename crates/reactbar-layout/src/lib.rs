#![forbid(unsafe_code)]

//! Flow layout for reaction buttons.
//!
//! Buttons are packed into rows of a fixed maximum width. Packing is split
//! into two steps that always run in this order:
//!
//! 1. [`Flow::measure`] returns the natural size of the rows when wrapping
//!    at a constrained width. The embedding bubble uses the width to
//!    negotiate its own width with sibling content.
//! 2. [`Flow::arrange`] lays the same buttons out at the final bounding
//!    width and returns one frame per button.
//!
//! Both steps share [`Flow::rows`], so the row-breaking decisions of a
//! measurement and an arrangement at the same width are identical.
//!
//! # Wrap rule
//!
//! A button starts a new row when appending it (plus the item gap) to the
//! current row would exceed the bounding width. The first button of a row is
//! never wrapped, so a single over-wide button still gets a row of its own.

pub mod cache;
pub mod count;
pub mod measure;

pub use cache::{FlowCacheKey, FlowCacheStats, ReactionLayoutCache};
pub use count::compact_count;
pub use measure::{ButtonContentSpec, ButtonMetrics, GlyphAdvanceMeasurer, TextMeasurer};
pub use reactbar_core::geometry::{Point, Rect, Sides, Size};

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Horizontal packing direction, matching the side the bubble is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayAlignment {
    /// First button at the left edge; rows grow rightward.
    #[default]
    Left,
    /// First button at the right edge; rows grow leftward.
    Right,
}

/// Gaps and edge adjustments used by the packer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSpacing {
    /// Gap between adjacent buttons in a row.
    pub item_gap: f64,
    /// Gap between rows.
    pub row_gap: f64,
    /// The leading edge of every row sits this far outside the bounds.
    pub edge_outset: f64,
}

impl FlowSpacing {
    pub const DEFAULT: Self = Self {
        item_gap: 6.0,
        row_gap: 6.0,
        edge_outset: 1.0,
    };
}

impl Default for FlowSpacing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of [`Flow::arrange`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowArrangement {
    /// One frame per input size, in input order.
    pub frames: Vec<Rect>,
    /// Index ranges of the buttons in each row.
    pub rows: Vec<Range<usize>>,
    /// Height of all rows including row gaps.
    pub content_height: f64,
}

impl FlowArrangement {
    /// Index of the row holding button `index`.
    pub fn row_of(&self, index: usize) -> Option<usize> {
        self.rows.iter().position(|row| row.contains(&index))
    }
}

/// The flow packer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Flow {
    spacing: FlowSpacing,
}

impl Flow {
    pub fn new(spacing: FlowSpacing) -> Self {
        Self { spacing }
    }

    #[inline]
    pub fn spacing(&self) -> FlowSpacing {
        self.spacing
    }

    /// Split `sizes` into rows no wider than `bounding_width`.
    pub fn rows(&self, sizes: &[Size], bounding_width: f64) -> Vec<Range<usize>> {
        self.break_rows(sizes, bounding_width)
            .into_iter()
            .map(|(row, _)| row)
            .collect()
    }

    /// Rows with their widths.
    ///
    /// The width of a row is the running total the wrap test compared
    /// against, so packing at the widest row reproduces the same breaks.
    fn break_rows(&self, sizes: &[Size], bounding_width: f64) -> Vec<(Range<usize>, f64)> {
        let gap = self.spacing.item_gap;
        let mut rows = Vec::new();
        let mut start = 0;
        let mut row_width = 0.0;

        for (index, size) in sizes.iter().enumerate() {
            if index > start {
                let extended = row_width + gap + size.width;
                if extended > bounding_width {
                    rows.push((start..index, row_width));
                    start = index;
                    row_width = size.width;
                } else {
                    row_width = extended;
                }
            } else {
                row_width = size.width;
            }
        }
        if start < sizes.len() {
            rows.push((start..sizes.len(), row_width));
        }
        rows
    }

    /// Natural size of the rows when wrapping at `constrained_width`.
    ///
    /// The width is the widest row, not the constraint, so a short reaction
    /// list lets the bubble stay narrow.
    pub fn measure(&self, sizes: &[Size], constrained_width: f64) -> Size {
        let mut size = Size::ZERO;
        let rows = self.break_rows(sizes, constrained_width);
        for (row_index, (row, width)) in rows.into_iter().enumerate() {
            size.width = size.width.max(width);
            if row_index > 0 {
                size.height += self.spacing.row_gap;
            }
            size.height += row_height(&sizes[row]);
        }
        size
    }

    /// Lay out `sizes` at `bounding_width`, starting at `top`.
    ///
    /// Right alignment produces the horizontal mirror of the left layout
    /// inside `bounding_width`.
    pub fn arrange(
        &self,
        sizes: &[Size],
        bounding_width: f64,
        top: f64,
        alignment: DisplayAlignment,
    ) -> FlowArrangement {
        let rows = self.rows(sizes, bounding_width);
        let mut frames = Vec::with_capacity(sizes.len());
        let mut y = top;

        for (row_index, row) in rows.iter().enumerate() {
            if row_index > 0 {
                y += self.spacing.row_gap;
            }
            let mut x = -self.spacing.edge_outset;
            for size in &sizes[row.clone()] {
                let frame = Rect::new(x, y, size.width, size.height);
                frames.push(match alignment {
                    DisplayAlignment::Left => frame,
                    DisplayAlignment::Right => frame.mirrored_horizontally(bounding_width),
                });
                x += size.width + self.spacing.item_gap;
            }
            y += row_height(&sizes[row.clone()]);
        }

        FlowArrangement {
            frames,
            rows,
            content_height: y - top,
        }
    }
}

fn row_height(row_sizes: &[Size]) -> f64 {
    row_sizes.iter().fold(0.0, |acc, s| acc.max(s.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(widths: &[f64]) -> Vec<Size> {
        widths.iter().map(|&w| Size::new(w, 30.0)).collect()
    }

    #[test]
    fn each_button_gets_its_own_row_when_pairs_overflow() {
        let flow = Flow::default();
        assert_eq!(flow.rows(&sizes(&[60.0, 60.0, 60.0]), 100.0), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn gap_counts_towards_row_width() {
        let flow = Flow::default();
        // 50 + 6 + 50 = 106
        assert_eq!(flow.rows(&sizes(&[50.0, 50.0]), 106.0), vec![0..2]);
        assert_eq!(flow.rows(&sizes(&[50.0, 50.0]), 105.0), vec![0..1, 1..2]);
    }

    #[test]
    fn first_button_of_a_row_never_wraps() {
        let flow = Flow::default();
        let arrangement = flow.arrange(&sizes(&[200.0]), 50.0, 0.0, DisplayAlignment::Left);
        assert_eq!(arrangement.rows, vec![0..1]);
        assert_eq!(arrangement.frames, vec![Rect::new(-1.0, 0.0, 200.0, 30.0)]);
    }

    #[test]
    fn empty_input_measures_zero() {
        let flow = Flow::default();
        assert_eq!(flow.measure(&[], 100.0), Size::ZERO);
        let arrangement = flow.arrange(&[], 100.0, 0.0, DisplayAlignment::Left);
        assert!(arrangement.frames.is_empty());
        assert_eq!(arrangement.content_height, 0.0);
    }

    #[test]
    fn measure_reports_widest_row_and_total_height() {
        let flow = Flow::default();
        let size = flow.measure(&sizes(&[40.0, 50.0, 90.0]), 100.0);
        // Rows: [40, 50] = 96, [90] = 90.
        assert_eq!(size, Size::new(96.0, 66.0));
    }

    #[test]
    fn left_arrangement_advances_by_width_and_gap() {
        let flow = Flow::default();
        let input = sizes(&[40.0, 50.0, 90.0]);
        let arrangement = flow.arrange(&input, 100.0, 0.0, DisplayAlignment::Left);
        assert_eq!(
            arrangement.frames,
            vec![
                Rect::new(-1.0, 0.0, 40.0, 30.0),
                Rect::new(45.0, 0.0, 50.0, 30.0),
                Rect::new(-1.0, 36.0, 90.0, 30.0),
            ]
        );
        assert_eq!(arrangement.content_height, 66.0);
        assert_eq!(arrangement.row_of(2), Some(1));
    }

    #[test]
    fn right_arrangement_mirrors_left() {
        let flow = Flow::default();
        let input = sizes(&[40.0, 50.0, 90.0]);
        let left = flow.arrange(&input, 100.0, 0.0, DisplayAlignment::Left);
        let right = flow.arrange(&input, 100.0, 0.0, DisplayAlignment::Right);
        assert_eq!(left.rows, right.rows);
        assert_eq!(right.frames[0], Rect::new(61.0, 0.0, 40.0, 30.0));
        for (l, r) in left.frames.iter().zip(&right.frames) {
            assert_eq!(l.mirrored_horizontally(100.0), *r);
        }
    }

    #[test]
    fn row_height_is_tallest_button() {
        let flow = Flow::default();
        let input = vec![Size::new(20.0, 30.0), Size::new(20.0, 34.0), Size::new(90.0, 30.0)];
        let arrangement = flow.arrange(&input, 60.0, 0.0, DisplayAlignment::Left);
        assert_eq!(arrangement.frames[2].y, 40.0);
    }

    #[test]
    fn top_offset_shifts_every_row() {
        let flow = Flow::default();
        let arrangement = flow.arrange(&sizes(&[40.0]), 100.0, 4.0, DisplayAlignment::Left);
        assert_eq!(arrangement.frames[0].y, 4.0);
        assert_eq!(arrangement.content_height, 30.0);
    }

    #[test]
    fn spacing_fills_missing_fields_from_defaults() {
        let spacing: FlowSpacing = serde_json::from_str(r#"{"item_gap": 4.0}"#).expect("parse");
        assert_eq!(spacing.item_gap, 4.0);
        assert_eq!(spacing.row_gap, FlowSpacing::DEFAULT.row_gap);
        let alignment: DisplayAlignment = serde_json::from_str("\"right\"").expect("parse");
        assert_eq!(alignment, DisplayAlignment::Right);
    }
}
