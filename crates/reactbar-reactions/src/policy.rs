//! Interaction policy.

use crate::entry::{PeerKind, ReactionsAttribute};

/// Whether the list of users who reacted may be opened for this message.
///
/// The attribute must allow it, and the chat must be a group or a
/// non-broadcast channel. Direct chats and broadcast channels never open
/// the list.
pub fn can_view_reaction_list(attribute: &ReactionsAttribute, peer: PeerKind) -> bool {
    if !attribute.can_view_list {
        return false;
    }
    match peer {
        PeerKind::Group => true,
        PeerKind::Channel { broadcast } => !broadcast,
        PeerKind::User | PeerKind::Unknown => false,
    }
}
