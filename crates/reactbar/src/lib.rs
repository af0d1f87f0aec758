#![forbid(unsafe_code)]

//! Reactbar public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates, wraps the reaction
//! node with checked entry points, and offers a lightweight prelude.
//!
//! ```
//! use reactbar::prelude::*;
//!
//! struct Noop;
//! impl ReactionRenderer for Noop {
//!     type Button = ();
//!     type Mask = ();
//!     fn create_button(&mut self, _: &ButtonChange, _: Transition) {}
//!     fn update_button(&mut self, _: &mut (), _: &ButtonChange, _: Transition) {}
//!     fn remove_button(&mut self, _: (), _: Transition) {}
//!     fn transition_button(&mut self, _: &mut (), _: Transition) {}
//!     fn create_mask(&mut self, _: Rect, _: f64, _: Transition) {}
//!     fn update_mask(&mut self, _: &mut (), _: Rect, _: Transition) {}
//!     fn remove_mask(&mut self, _: (), _: Transition) {}
//! }
//!
//! let theme = ChatTheme::day();
//! let mut bar = ReactionBar::<Noop>::new();
//! let set = ReactionSet::new(vec![ReactionEntry::new("👍", 3)]);
//!
//! let prepared = bar.measure(&set, &LayoutContext::new(&theme), 280.0)?;
//! let layout = bar.layout(&prepared, prepared.proposed_width())?;
//! let diff = bar.apply(&layout, UpdateAnimation::Immediate, &mut Noop);
//! assert_eq!(diff.created().count(), 1);
//! # Ok::<(), reactbar::Error>(())
//! ```

pub mod error;
pub mod footer;

pub use error::{Error, Result, validate_width};
pub use footer::{FooterLayout, FooterNeighbor, FooterPlacement, PreparedFooter};

// --- Geometry re-exports ---------------------------------------------------

pub use reactbar_core::{Point, Rect, Sides, Size};

// --- Style re-exports ------------------------------------------------------

pub use reactbar_style::{
    ButtonColors, ButtonState, ChatTheme, Color, DisplayType, PillBackground, ReactionColors,
    ThemeBuilder, reaction_colors,
};

// --- Layout re-exports -----------------------------------------------------

pub use reactbar_layout::{
    ButtonMetrics, DisplayAlignment, Flow, FlowSpacing, TextMeasurer, compact_count,
};

// --- Reaction re-exports ---------------------------------------------------

pub use reactbar_reactions::{
    ActorId, ButtonChange, ConfigError, Diff, LayoutContext, LayoutResult, LongPress, PeerKind,
    PreparedReactions, ReactionButtonsNode, ReactionEntry, ReactionLayoutEngine, ReactionRenderer,
    ReactionSet, ReactionsAttribute, ReactionsConfig, Transition, UpdateAnimation,
    can_view_reaction_list, reconcile,
};

// --- Bar facade ------------------------------------------------------------

/// A reaction node whose entry points check their widths.
#[derive(Debug)]
pub struct ReactionBar<R: ReactionRenderer> {
    node: ReactionButtonsNode<R>,
}

impl<R: ReactionRenderer> Default for ReactionBar<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ReactionRenderer> ReactionBar<R> {
    /// Bar with the stock configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            node: ReactionButtonsNode::default(),
        }
    }

    /// Bar with a validated configuration.
    pub fn from_config(config: ReactionsConfig) -> Result<Self> {
        let config = config.validated()?;
        Ok(Self {
            node: ReactionButtonsNode::new(ReactionLayoutEngine::new(config)),
        })
    }

    /// Bar with the stock configuration plus environment overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ReactionsConfig::from_env())
    }

    pub fn node(&self) -> &ReactionButtonsNode<R> {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut ReactionButtonsNode<R> {
        &mut self.node
    }

    /// Measure pre-built entries at `constrained_width`.
    pub fn measure(
        &mut self,
        set: &ReactionSet,
        context: &LayoutContext<'_>,
        constrained_width: f64,
    ) -> Result<PreparedReactions> {
        let width = validate_width(constrained_width)?;
        Ok(self.node.prepare_set(set, context, width))
    }

    /// Measure a message's reactions at `constrained_width`.
    pub fn measure_message(
        &mut self,
        attribute: &ReactionsAttribute,
        peer: PeerKind,
        context: LayoutContext<'_>,
        constrained_width: f64,
    ) -> Result<PreparedReactions> {
        let width = validate_width(constrained_width)?;
        Ok(self.node.prepare(attribute, peer, context, width))
    }

    /// Lay out measured reactions at `bounding_width`.
    pub fn layout(
        &mut self,
        prepared: &PreparedReactions,
        bounding_width: f64,
    ) -> Result<LayoutResult> {
        let width = validate_width(bounding_width)?;
        Ok(self.node.layout(prepared, width))
    }

    /// Measure a message's reactions as the footer of its bubble.
    ///
    /// The proposed width includes the bubble's horizontal insets.
    pub fn measure_footer(
        &mut self,
        attribute: &ReactionsAttribute,
        peer: PeerKind,
        context: LayoutContext<'_>,
        constrained_width: f64,
        placement: FooterPlacement,
    ) -> Result<PreparedFooter> {
        let reactions = self.measure_message(attribute, peer, context, constrained_width)?;
        Ok(PreparedFooter {
            reactions,
            placement,
        })
    }

    /// Lay out a footer inside a bubble of `bounding_width`.
    pub fn layout_footer(
        &mut self,
        prepared: &PreparedFooter,
        bounding_width: f64,
    ) -> Result<FooterLayout> {
        let width = validate_width(bounding_width)?;
        let inner = prepared.placement.inner_width(width);
        let bar = self.node.layout(&prepared.reactions, inner);
        Ok(footer::embed(&prepared.placement, bar))
    }

    /// Reconcile and render a layout.
    pub fn apply(
        &mut self,
        layout: &LayoutResult,
        animation: UpdateAnimation,
        renderer: &mut R,
    ) -> Diff {
        self.node.apply(layout, animation, renderer)
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ButtonChange, ChatTheme, DisplayAlignment, DisplayType, Error, FooterNeighbor,
        FooterPlacement, LayoutContext, PeerKind, Point, ReactionBar, ReactionEntry,
        ReactionRenderer, ReactionSet, ReactionsAttribute, Rect, Result, Size, Transition,
        UpdateAnimation,
    };

    pub use crate::{core, layout, reactions, style};
}

pub use reactbar_core as core;
pub use reactbar_layout as layout;
pub use reactbar_reactions as reactions;
pub use reactbar_style as style;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Noop;

    impl ReactionRenderer for Noop {
        type Button = ();
        type Mask = ();

        fn create_button(&mut self, _: &ButtonChange, _: Transition) {}
        fn update_button(&mut self, _: &mut (), _: &ButtonChange, _: Transition) {}
        fn remove_button(&mut self, _: (), _: Transition) {}
        fn transition_button(&mut self, _: &mut (), _: Transition) {}
        fn create_mask(&mut self, _: Rect, _: f64, _: Transition) {}
        fn update_mask(&mut self, _: &mut (), _: Rect, _: Transition) {}
        fn remove_mask(&mut self, _: (), _: Transition) {}
    }

    #[test]
    fn negative_widths_are_rejected_at_the_boundary() {
        let theme = ChatTheme::day();
        let mut bar = ReactionBar::<Noop>::new();
        let set = ReactionSet::new(vec![ReactionEntry::new("a", 1)]);
        assert!(matches!(
            bar.measure(&set, &LayoutContext::new(&theme), -1.0),
            Err(Error::InvalidWidth { .. })
        ));

        let prepared = bar
            .measure(&set, &LayoutContext::new(&theme), 100.0)
            .expect("valid width");
        assert!(matches!(
            bar.layout(&prepared, f64::NAN),
            Err(Error::InvalidWidth { .. })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ReactionsConfig::default();
        config.metrics.height = -30.0;
        let err = ReactionBar::<Noop>::from_config(config).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Validation(_))));
    }

    #[test]
    fn message_cycle_through_facade() {
        let theme = ChatTheme::day();
        let mut bar = ReactionBar::<Noop>::from_config(ReactionsConfig::default()).expect("valid");
        let attribute = ReactionsAttribute {
            can_view_list: true,
            reactions: vec![reactions::MessageReaction {
                value: "🔥".into(),
                count: 1_200,
                is_selected: false,
            }],
            recent_actors: Vec::new(),
        };
        let prepared = bar
            .measure_message(
                &attribute,
                PeerKind::Group,
                LayoutContext::new(&theme),
                200.0,
            )
            .expect("measure");
        let layout = bar.layout(&prepared, 200.0).expect("layout");
        bar.apply(&layout, UpdateAnimation::Immediate, &mut Noop);
        assert_eq!(bar.node().values(), vec!["🔥"]);
        assert_eq!(layout.items[0].content.label.as_deref(), Some("1.2K"));
        assert!(layout.items[0].content.gesture_enabled);
    }

    fn fire(count: u32) -> ReactionsAttribute {
        ReactionsAttribute {
            can_view_list: false,
            reactions: vec![reactions::MessageReaction {
                value: "🔥".into(),
                count,
                is_selected: false,
            }],
            recent_actors: Vec::new(),
        }
    }

    #[test]
    fn footer_below_text_adds_insets_and_bottom_allowance() {
        let theme = ChatTheme::day();
        let mut bar = ReactionBar::<Noop>::new();
        let footer = bar
            .measure_footer(
                &fire(3),
                PeerKind::User,
                LayoutContext::new(&theme),
                300.0,
                FooterPlacement::default(),
            )
            .expect("measure");
        assert_eq!(
            footer.proposed_width(),
            footer.reactions.proposed_width() + 24.0
        );

        let layout = bar.layout_footer(&footer, 200.0).expect("layout");
        assert_eq!(layout.bar.size, Size::new(176.0, 32.0));
        assert_eq!(layout.size, Size::new(200.0, 34.0));
        assert_eq!(layout.bar_frame, Rect::new(12.0, -2.0, 176.0, 32.0));
    }

    #[test]
    fn footer_below_media_is_pushed_down() {
        let theme = ChatTheme::day();
        let mut bar = ReactionBar::<Noop>::new();
        let placement = FooterPlacement::default().neighbor(FooterNeighbor::Media);
        let footer = bar
            .measure_footer(
                &fire(3),
                PeerKind::User,
                LayoutContext::new(&theme),
                300.0,
                placement,
            )
            .expect("measure");

        let layout = bar.layout_footer(&footer, 200.0).expect("layout");
        assert_eq!(layout.size, Size::new(200.0, 38.0));
        assert_eq!(layout.bar_frame.y, 2.0);
        assert_eq!(layout.bar_frame.x, 12.0);
    }

    #[test]
    fn footer_narrower_than_insets_lays_out_at_zero() {
        let theme = ChatTheme::day();
        let mut bar = ReactionBar::<Noop>::new();
        let footer = bar
            .measure_footer(
                &fire(3),
                PeerKind::User,
                LayoutContext::new(&theme),
                300.0,
                FooterPlacement::default(),
            )
            .expect("measure");
        let layout = bar.layout_footer(&footer, 10.0).expect("layout");
        assert_eq!(layout.bar.size.width, 0.0);
        assert_eq!(layout.bar.items.len(), 1);
        assert!(bar.layout_footer(&footer, -1.0).is_err());
    }
}
