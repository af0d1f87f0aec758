#![forbid(unsafe_code)]

//! Property tests for keyed reconciliation across update sequences.

use std::collections::BTreeSet;

use proptest::prelude::*;

use reactbar_reactions::{
    ButtonChange, ButtonRegistry, LayoutContext, ReactionButtonsNode, ReactionEntry,
    ReactionLayoutEngine, ReactionRenderer, ReactionSet, Transition, UpdateAnimation, reconcile,
};
use reactbar_layout::Rect;
use reactbar_style::ChatTheme;

struct Handles;

impl ReactionRenderer for Handles {
    type Button = String;
    type Mask = String;

    fn create_button(&mut self, change: &ButtonChange, _: Transition) -> String {
        change.value.clone()
    }
    fn update_button(&mut self, button: &mut String, change: &ButtonChange, _: Transition) {
        assert_eq!(*button, change.value);
    }
    fn remove_button(&mut self, _: String, _: Transition) {}
    fn transition_button(&mut self, _: &mut String, _: Transition) {}
    fn create_mask(&mut self, _: Rect, _: f64, _: Transition) -> String {
        String::new()
    }
    fn update_mask(&mut self, _: &mut String, _: Rect, _: Transition) {}
    fn remove_mask(&mut self, _: String, _: Transition) {}
}

const VALUES: [&str; 8] = ["👍", "👎", "❤", "🔥", "🎉", "😁", "😢", "🤔"];

/// A deduplicated subset of `VALUES`, in a shuffled order.
fn value_set() -> impl Strategy<Value = Vec<(&'static str, u32)>> {
    proptest::sample::subsequence(VALUES.to_vec(), 0..=VALUES.len())
        .prop_shuffle()
        .prop_flat_map(|values| {
            let len = values.len();
            (Just(values), proptest::collection::vec(1u32..50_000, len))
        })
        .prop_map(|(values, counts)| values.into_iter().zip(counts).collect())
}

fn set(values: &[(&'static str, u32)]) -> ReactionSet {
    ReactionSet::new(
        values
            .iter()
            .map(|&(value, count)| ReactionEntry::new(value, count))
            .collect(),
    )
}

proptest! {
    #[test]
    fn diff_partitions_values(
        previous in value_set(),
        next in value_set(),
        width in 40.0f64..400.0,
    ) {
        let mut registry = ButtonRegistry::new();
        for (value, _) in &previous {
            registry.insert(*value, ());
        }
        let mut engine = ReactionLayoutEngine::default();
        let theme = ChatTheme::day();
        let prepared = engine.prepare(&set(&next), &LayoutContext::new(&theme), width);
        let layout = engine.layout(&prepared, width);
        let diff = reconcile(&registry, &layout);

        let before: BTreeSet<&str> = previous.iter().map(|(v, _)| *v).collect();
        let after: BTreeSet<&str> = next.iter().map(|(v, _)| *v).collect();
        let created: BTreeSet<&str> = diff.created().map(|c| c.value.as_str()).collect();
        let updated: BTreeSet<&str> = diff.updated().map(|c| c.value.as_str()).collect();
        let removed: BTreeSet<&str> = diff.removed.iter().map(String::as_str).collect();

        let expected_created: BTreeSet<&str> = after.difference(&before).copied().collect();
        let expected_updated: BTreeSet<&str> = after.intersection(&before).copied().collect();
        let expected_removed: BTreeSet<&str> = before.difference(&after).copied().collect();
        prop_assert_eq!(&created, &expected_created);
        prop_assert_eq!(&updated, &expected_updated);
        prop_assert_eq!(&removed, &expected_removed);
        prop_assert!(created.is_disjoint(&removed));
        prop_assert_eq!(diff.changes.len(), next.len());
    }

    #[test]
    fn masks_track_buttons_across_updates(
        sequence in proptest::collection::vec(value_set(), 1..6),
        width in 40.0f64..400.0,
        animated in any::<bool>(),
    ) {
        let mut node = ReactionButtonsNode::default();
        let mut renderer = Handles;
        let theme = ChatTheme::day();
        let context = LayoutContext::new(&theme);
        let animation = if animated {
            UpdateAnimation::animated(std::time::Duration::from_millis(200), Default::default())
        } else {
            UpdateAnimation::Immediate
        };

        for values in &sequence {
            let prepared = node.prepare_set(&set(values), &context, width);
            let layout = node.layout(&prepared, width);
            node.apply(&layout, animation, &mut renderer);

            prop_assert_eq!(node.values(), node.mask_values());
            let live: BTreeSet<&str> = node.values().into_iter().collect();
            let expected: BTreeSet<&str> = values.iter().map(|(v, _)| *v).collect();
            prop_assert_eq!(live, expected);
        }
    }
}
