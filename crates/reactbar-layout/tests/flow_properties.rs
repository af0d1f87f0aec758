//! Property tests for the flow packer.
//!
//! Run:
//!   cargo test -p reactbar-layout --test flow_properties

use proptest::prelude::*;
use reactbar_layout::{DisplayAlignment, Flow, FlowSpacing, Size};

fn size_strategy() -> impl Strategy<Value = Vec<Size>> {
    let size = (1.0f64..260.0).prop_map(|w| Size::new(w.round(), 30.0));
    prop::collection::vec(size, 0..24)
}

proptest! {
    #[test]
    fn rows_partition_all_buttons_in_order(sizes in size_strategy(), width in 20.0f64..400.0) {
        let rows = Flow::default().rows(&sizes, width);
        let mut next = 0;
        for row in &rows {
            prop_assert!(!row.is_empty());
            prop_assert_eq!(row.start, next);
            next = row.end;
        }
        prop_assert_eq!(next, sizes.len());
    }

    #[test]
    fn multi_button_rows_fit_the_bound(sizes in size_strategy(), width in 20.0f64..400.0) {
        let flow = Flow::default();
        let gap = FlowSpacing::default().item_gap;
        for row in flow.rows(&sizes, width) {
            if row.len() > 1 {
                let used: f64 = sizes[row.clone()].iter().map(|s| s.width).sum::<f64>()
                    + gap * (row.len() - 1) as f64;
                prop_assert!(used <= width);
            }
        }
    }

    #[test]
    fn next_button_would_not_have_fit(sizes in size_strategy(), width in 20.0f64..400.0) {
        let flow = Flow::default();
        let gap = FlowSpacing::default().item_gap;
        let rows = flow.rows(&sizes, width);
        for pair in rows.windows(2) {
            let row = &pair[0];
            let used: f64 = sizes[row.clone()].iter().map(|s| s.width).sum::<f64>()
                + gap * (row.len() - 1) as f64;
            prop_assert!(used + gap + sizes[pair[1].start].width > width);
        }
    }

    #[test]
    fn packing_at_measured_width_keeps_rows(
        widths in prop::collection::vec(1.0f64..120.0, 1..24),
        item_gap in 0.0f64..12.0,
        width in 120.0f64..600.0,
    ) {
        // Every button fits the constraint on its own.
        let flow = Flow::new(FlowSpacing { item_gap, ..FlowSpacing::default() });
        let sizes: Vec<Size> = widths.iter().map(|&w| Size::new(w, 30.0)).collect();
        let measured = flow.measure(&sizes, width);
        let at_constraint = flow.rows(&sizes, width);
        let at_measured = flow.rows(&sizes, measured.width);
        prop_assert_eq!(at_measured, at_constraint);
    }

    #[test]
    fn right_alignment_mirrors_left(sizes in size_strategy(), width in 20.0f64..400.0) {
        let flow = Flow::default();
        let left = flow.arrange(&sizes, width, 0.0, DisplayAlignment::Left);
        let right = flow.arrange(&sizes, width, 0.0, DisplayAlignment::Right);
        prop_assert_eq!(&left.rows, &right.rows);
        prop_assert_eq!(left.content_height, right.content_height);
        for (l, r) in left.frames.iter().zip(&right.frames) {
            prop_assert_eq!(l.y, r.y);
            prop_assert!((l.mirrored_horizontally(width).x - r.x).abs() < 1e-9);
        }
    }

    #[test]
    fn measurement_agrees_with_arrangement(sizes in size_strategy(), width in 20.0f64..400.0) {
        let flow = Flow::default();
        let measured = flow.measure(&sizes, width);
        let arranged = flow.arrange(&sizes, width, 0.0, DisplayAlignment::Left);
        prop_assert!((measured.height - arranged.content_height).abs() < 1e-9);
        let outset = FlowSpacing::default().edge_outset;
        let widest = arranged
            .frames
            .iter()
            .map(|f| f.right() + outset)
            .fold(0.0, f64::max);
        prop_assert!((measured.width - widest).abs() < 1e-9);
    }
}

#[test]
fn three_sixty_wide_buttons_stack_at_one_hundred() {
    let sizes = vec![Size::new(60.0, 30.0); 3];
    let arrangement = Flow::default().arrange(&sizes, 100.0, 0.0, DisplayAlignment::Left);
    assert_eq!(arrangement.rows, vec![0..1, 1..2, 2..3]);
    let ys: Vec<f64> = arrangement.frames.iter().map(|f| f.y).collect();
    assert_eq!(ys, vec![0.0, 36.0, 72.0]);
}

#[test]
fn fractional_gap_keeps_a_single_row_at_measured_width() {
    let flow = Flow::new(FlowSpacing {
        item_gap: 0.1,
        ..FlowSpacing::default()
    });
    let sizes = vec![Size::new(58.0, 30.0); 8];
    let measured = flow.measure(&sizes, 1_000.0);
    assert_eq!(measured.height, 30.0);
    assert_eq!(flow.rows(&sizes, measured.width), vec![0..8]);
}

#[test]
fn spacing_loads_from_partial_json() {
    let spacing: FlowSpacing = serde_json::from_str(r#"{"item_gap": 4.0}"#).expect("valid spacing");
    assert_eq!(spacing.item_gap, 4.0);
    assert_eq!(spacing.row_gap, 6.0);
    assert_eq!(spacing.edge_outset, 1.0);
}
