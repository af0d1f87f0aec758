//! Recent-actor avatar guard.
//!
//! A button shows the avatars of the people who reacted instead of a count
//! label, but only when the avatars tell the whole story: every reaction on
//! the button has a recent-actor record, and every reaction on the message
//! is covered by a record. Otherwise a partial cluster would under-report
//! and the count label is shown.

use crate::entry::{ActorId, ReactionEntry, ReactionSet};

/// Avatars to display on `entry`, or an empty slice when the count label
/// should be shown instead.
pub fn visible_avatars<'a>(entry: &'a ReactionEntry, set: &ReactionSet) -> &'a [ActorId] {
    if avatars_cover(entry, set) {
        &entry.recent_actor_ids
    } else {
        &[]
    }
}

/// Whether the recent-actor records fully describe `entry` and the set.
pub fn avatars_cover(entry: &ReactionEntry, set: &ReactionSet) -> bool {
    if entry.recent_actor_ids.is_empty() {
        return false;
    }
    let entry_complete = entry.recent_actor_ids.len() as u64 == u64::from(entry.count);
    let set_complete = set.total_count() == set.recent_record_count as u64;
    entry_complete && set_complete
}
