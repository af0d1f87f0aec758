#![forbid(unsafe_code)]

//! Reaction buttons under a chat message.
//!
//! # Role in reactbar
//! `reactbar-reactions` turns a message's reactions into positioned,
//! styled buttons and keeps them in sync with a renderer across updates.
//! Geometry comes from `reactbar-layout`; colors and pill backgrounds from
//! `reactbar-style`.
//!
//! # This crate provides
//! - [`ReactionSet`] and friends: reactions as the message layer delivers them.
//! - [`ReactionLayoutEngine`]: measure, then lay out at the final width.
//! - [`reconcile`]: the keyed created/updated/removed diff.
//! - [`ReactionButtonsNode`]: persistent state driving a [`ReactionRenderer`].
//! - [`ReactionsConfig`]: dimensions and cache sizes, loadable from files.

pub mod avatars;
pub mod config;
pub mod engine;
pub mod entry;
pub mod node;
pub mod policy;
pub mod reconcile;
pub mod registry;
pub mod transition;

pub use avatars::{avatars_cover, visible_avatars};
pub use config::{CacheConfig, ConfigError, FooterInsets, ReactionsConfig};
pub use engine::{
    ButtonContent, LayoutContext, LayoutResult, PreparedButton, PreparedReactions,
    ReactionLayoutEngine, RenderedButton,
};
pub use entry::{
    ActorId, AvailableReaction, AvailableReactions, IconId, MessageReaction, PeerKind,
    ReactionEntry, ReactionSet, ReactionsAttribute, RecentActor,
};
pub use node::{LiveButton, LongPress, ReactionButtonsNode, ReactionRenderer};
pub use policy::can_view_reaction_list;
pub use reconcile::{ButtonChange, ChangeKind, Diff, reconcile};
pub use registry::ButtonRegistry;
pub use transition::{COLLAPSED_SCALE, Curve, PropertyAnimation, Transition, UpdateAnimation};
