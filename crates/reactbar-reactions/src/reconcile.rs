//! Keyed diff between the live buttons and a new layout.
//!
//! Buttons keep their identity across frames by reaction value. One pass
//! over a [`LayoutResult`] classifies each laid-out value as created or
//! updated, and lists registry values that are gone. The same [`Diff`]
//! drives both the button registry and its background-mask shadow, so the
//! two can never disagree about which values exist.

use rustc_hash::{FxHashMap, FxHashSet};

use reactbar_layout::Rect;

use crate::engine::{ButtonContent, LayoutResult};
use crate::registry::ButtonRegistry;

/// Whether a change introduces a new button or moves an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Updated,
}

/// One button to create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonChange {
    pub kind: ChangeKind,
    pub value: String,
    pub frame: Rect,
    /// Frame of the button's mask in the background's coordinate space.
    pub mask_frame: Rect,
    pub content: ButtonContent,
}

/// Changes that turn the previous frame into the new layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diff {
    /// Created and updated buttons in layout order.
    pub changes: Vec<ButtonChange>,
    /// Values to remove, in registry insertion order.
    pub removed: Vec<String>,
}

impl Diff {
    pub fn created(&self) -> impl Iterator<Item = &ButtonChange> {
        self.changes.iter().filter(|c| c.kind == ChangeKind::Created)
    }

    pub fn updated(&self) -> impl Iterator<Item = &ButtonChange> {
        self.changes.iter().filter(|c| c.kind == ChangeKind::Updated)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.removed.is_empty()
    }
}

/// Diff `layout` against the buttons in `previous`.
///
/// A value laid out twice keeps one change carrying the last occurrence's
/// frame and content.
pub fn reconcile<H>(previous: &ButtonRegistry<H>, layout: &LayoutResult) -> Diff {
    let mut changes: Vec<ButtonChange> = Vec::with_capacity(layout.items.len());
    let mut slots: FxHashMap<&str, usize> = FxHashMap::default();

    for item in &layout.items {
        let kind = if previous.contains(&item.value) {
            ChangeKind::Updated
        } else {
            ChangeKind::Created
        };
        let change = ButtonChange {
            kind,
            value: item.value.clone(),
            frame: item.frame,
            mask_frame: layout.mask_frame(item.frame),
            content: item.content.clone(),
        };
        match slots.get(item.value.as_str()) {
            Some(&index) => changes[index] = change,
            None => {
                slots.insert(item.value.as_str(), changes.len());
                changes.push(change);
            }
        }
    }

    let laid_out: FxHashSet<&str> = slots.into_keys().collect();
    let removed = previous
        .values()
        .into_iter()
        .filter(|value| !laid_out.contains(value))
        .map(str::to_owned)
        .collect();

    Diff { changes, removed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{LayoutContext, ReactionLayoutEngine};
    use crate::entry::{ReactionEntry, ReactionSet};
    use reactbar_style::ChatTheme;

    fn layout(values: &[(&str, u32)]) -> LayoutResult {
        let mut engine = ReactionLayoutEngine::default();
        let theme = ChatTheme::day();
        let set = ReactionSet::new(
            values
                .iter()
                .map(|&(value, count)| ReactionEntry::new(value, count))
                .collect(),
        );
        let prepared = engine.prepare(&set, &LayoutContext::new(&theme), 300.0);
        engine.layout(&prepared, 300.0)
    }

    fn registry(values: &[&str]) -> ButtonRegistry<()> {
        let mut registry = ButtonRegistry::new();
        for value in values {
            registry.insert(*value, ());
        }
        registry
    }

    fn values<'a>(changes: impl Iterator<Item = &'a ButtonChange>) -> Vec<&'a str> {
        changes.map(|c| c.value.as_str()).collect()
    }

    #[test]
    fn empty_registry_creates_everything() {
        let diff = reconcile(&registry(&[]), &layout(&[("a", 1), ("b", 1)]));
        assert_eq!(values(diff.created()), vec!["a", "b"]);
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn partition_of_overlapping_sets() {
        let diff = reconcile(
            &registry(&["A", "B", "C"]),
            &layout(&[("B", 1), ("C", 1), ("D", 1)]),
        );
        assert_eq!(values(diff.created()), vec!["D"]);
        assert_eq!(values(diff.updated()), vec!["B", "C"]);
        assert_eq!(diff.removed, vec!["A".to_string()]);
    }

    #[test]
    fn same_values_with_new_counts_only_update() {
        let diff = reconcile(&registry(&["a", "b"]), &layout(&[("a", 5), ("b", 900)]));
        assert_eq!(diff.created().count(), 0);
        assert!(diff.removed.is_empty());
        assert_eq!(values(diff.updated()), vec!["a", "b"]);
        assert_eq!(diff.changes[1].content.label.as_deref(), Some("900"));
    }

    #[test]
    fn removed_follow_registry_insertion_order() {
        let diff = reconcile(&registry(&["z", "y", "x", "w"]), &layout(&[("y", 1)]));
        assert_eq!(diff.removed, vec!["z", "x", "w"]);
    }

    #[test]
    fn mask_frames_are_offset_by_background_inset() {
        let diff = reconcile(&registry(&[]), &layout(&[("a", 1)]));
        let change = &diff.changes[0];
        assert_eq!(change.mask_frame, change.frame.offset_by(10.0, 10.0));
    }

    #[test]
    fn duplicate_values_collapse_to_last() {
        let diff = reconcile(&registry(&[]), &layout(&[("a", 1), ("b", 1), ("a", 7)]));
        assert_eq!(values(diff.created()), vec!["a", "b"]);
        assert_eq!(diff.changes[0].content.label.as_deref(), Some("7"));
    }

    #[test]
    fn empty_layout_removes_everything() {
        let diff = reconcile(&registry(&["a", "b"]), &layout(&[]));
        assert!(diff.changes.is_empty());
        assert_eq!(diff.removed, vec!["a", "b"]);
        assert!(!diff.is_empty());
    }
}
