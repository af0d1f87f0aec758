//! Reaction data as it arrives from the message layer.

use std::fmt;

/// Opaque identifier of a user who reacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub i64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

/// Opaque reference to a static reaction icon resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconId(pub u64);

/// One distinct reaction on a message, as displayed by one button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEntry {
    /// Unique key; identity of the button across frames.
    pub value: String,
    pub count: u32,
    /// The current user reacted with this value.
    pub is_selected: bool,
    /// Recent actors who reacted with this value, most recent first.
    pub recent_actor_ids: Vec<ActorId>,
}

impl ReactionEntry {
    pub fn new(value: impl Into<String>, count: u32) -> Self {
        Self {
            value: value.into(),
            count,
            is_selected: false,
            recent_actor_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    #[must_use]
    pub fn with_actors(mut self, actors: impl IntoIterator<Item = ActorId>) -> Self {
        self.recent_actor_ids = actors.into_iter().collect();
        self
    }
}

/// Aggregate count of one reaction value on a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReaction {
    pub value: String,
    pub count: u32,
    pub is_selected: bool,
}

/// A recent reaction record: who reacted, and with what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentActor {
    pub actor: ActorId,
    pub value: String,
}

/// The reactions attribute of a message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReactionsAttribute {
    /// Whether the list of reacting users may be opened.
    pub can_view_list: bool,
    pub reactions: Vec<MessageReaction>,
    pub recent_actors: Vec<RecentActor>,
}

/// Kind of chat the message lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PeerKind {
    User,
    Group,
    Channel { broadcast: bool },
    /// The chat peer is not loaded.
    #[default]
    Unknown,
}

impl PeerKind {
    #[inline]
    pub const fn is_broadcast(self) -> bool {
        matches!(self, Self::Channel { broadcast: true })
    }
}

/// A reaction the server offers, with its static icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableReaction {
    pub value: String,
    pub title: String,
    pub static_icon: IconId,
    pub is_enabled: bool,
}

/// The table of available reactions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvailableReactions {
    pub reactions: Vec<AvailableReaction>,
}

impl AvailableReactions {
    /// Static icon of `value`, if the server offers it.
    pub fn icon_for(&self, value: &str) -> Option<IconId> {
        self.reactions
            .iter()
            .find(|reaction| reaction.value == value)
            .map(|reaction| reaction.static_icon)
    }
}

/// Entries of one update plus what the avatar guard needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReactionSet {
    pub entries: Vec<ReactionEntry>,
    /// Number of recent actor records carried on the message.
    pub recent_record_count: usize,
}

impl ReactionSet {
    /// Build from entries whose actor lists are the complete record set.
    pub fn new(entries: Vec<ReactionEntry>) -> Self {
        let recent_record_count = entries.iter().map(|e| e.recent_actor_ids.len()).sum();
        Self {
            entries,
            recent_record_count,
        }
    }

    /// Build from a message attribute.
    ///
    /// Each entry collects the recent actors whose record names its value,
    /// in record order. Broadcast channels never collect actors.
    pub fn from_attribute(attribute: &ReactionsAttribute, peer: PeerKind) -> Self {
        let entries = attribute
            .reactions
            .iter()
            .map(|reaction| {
                let recent_actor_ids = if peer.is_broadcast() {
                    Vec::new()
                } else {
                    attribute
                        .recent_actors
                        .iter()
                        .filter(|record| record.value == reaction.value)
                        .map(|record| record.actor)
                        .collect()
                };
                ReactionEntry {
                    value: reaction.value.clone(),
                    count: reaction.count,
                    is_selected: reaction.is_selected,
                    recent_actor_ids,
                }
            })
            .collect();
        Self {
            entries,
            recent_record_count: attribute.recent_actors.len(),
        }
    }

    /// Sum of all entry counts.
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.count)).sum()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
