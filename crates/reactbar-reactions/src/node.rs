#![forbid(unsafe_code)]

//! The reaction bar attached to a message.
//!
//! [`ReactionButtonsNode`] owns everything that persists between updates:
//! the layout engine, the button registry, and the mask registry that
//! shadows it. Drawing is delegated to a [`ReactionRenderer`]; the node only
//! tells it which handles to create, move, or remove and how to animate.
//!
//! # Update cycle
//!
//! ```text
//! prepare(attribute, context, constrained_width) -> PreparedReactions
//!     .proposed_width()                           (bubble negotiates width)
//! layout(&prepared, bounding_width)               -> LayoutResult
//! apply(&layout, animation, &mut renderer)        (reconcile + render)
//! ```

use std::fmt;
use std::time::Duration;

use tracing::{debug, debug_span, trace};

use reactbar_layout::{Point, Rect, Size};

use crate::engine::{LayoutContext, LayoutResult, PreparedReactions, ReactionLayoutEngine};
use crate::entry::{PeerKind, ReactionSet, ReactionsAttribute};
use crate::policy::can_view_reaction_list;
use crate::reconcile::{ButtonChange, ChangeKind, Diff, reconcile};
use crate::registry::ButtonRegistry;
use crate::transition::{COLLAPSED_SCALE, Curve, Transition, UpdateAnimation};

/// Draws reaction buttons, their background masks, and the freeform
/// background.
///
/// Handles are owned by the node while live. Removed handles are passed
/// back by value; the renderer plays the transition and then detaches them.
pub trait ReactionRenderer {
    type Button;
    type Mask;

    fn create_button(&mut self, change: &ButtonChange, transition: Transition) -> Self::Button;
    fn update_button(
        &mut self,
        button: &mut Self::Button,
        change: &ButtonChange,
        transition: Transition,
    );
    fn remove_button(&mut self, button: Self::Button, transition: Transition);

    /// Re-run a transition on a live button without changing its content.
    fn transition_button(&mut self, button: &mut Self::Button, transition: Transition);

    fn create_mask(&mut self, frame: Rect, corner_radius: f64, transition: Transition)
    -> Self::Mask;
    fn update_mask(&mut self, mask: &mut Self::Mask, frame: Rect, transition: Transition);
    fn remove_mask(&mut self, mask: Self::Mask, transition: Transition);

    /// Show, move, or (with `None`) remove the freeform bubble background.
    fn update_background(&mut self, frame: Option<Rect>, transition: Transition) {
        let _ = (frame, transition);
    }

    /// Where the bar sits inside the scrolling container, for a background
    /// that samples the wallpaper behind it.
    fn update_background_position(
        &mut self,
        rect: Rect,
        container: Size,
        transition: Transition,
    ) {
        let _ = (rect, container, transition);
    }

    /// Shift the background's wallpaper sampling while the list scrolls.
    fn offset_background(&mut self, offset: Point, duration: Duration, curve: Curve) {
        let _ = (offset, duration, curve);
    }

    /// Vertical spring shift of the background's wallpaper sampling.
    fn offset_background_spring(&mut self, value: f64, duration: Duration, damping: f64) {
        let _ = (value, duration, damping);
    }
}

/// A live button and what the node needs to know about it.
#[derive(Debug)]
pub struct LiveButton<B> {
    pub handle: B,
    pub frame: Rect,
    /// Frame of the leading icon, the fly-to target of reaction effects.
    pub icon_frame: Rect,
    pub gesture_enabled: bool,
}

/// Callback invoked with the value of a tapped button.
pub type ReactionSelected = Box<dyn FnMut(&str)>;
/// Callback invoked with the value of a long-pressed button.
pub type OpenReactionPreview = Box<dyn FnMut(&str)>;

/// Outcome of a long press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongPress {
    /// The preview callback was invoked.
    Opened,
    /// The button does not open the reaction list; the gesture should fail.
    Cancelled,
    /// No button under the point.
    Missed,
}

/// Reaction bar state that persists across updates.
pub struct ReactionButtonsNode<R: ReactionRenderer> {
    engine: ReactionLayoutEngine,
    buttons: ButtonRegistry<LiveButton<R::Button>>,
    masks: ButtonRegistry<R::Mask>,
    has_background: bool,
    /// Last position reported by the host: frame and container size.
    absolute_rect: Option<(Rect, Size)>,
    size: Size,
    on_reaction_selected: Option<ReactionSelected>,
    on_open_preview: Option<OpenReactionPreview>,
}

impl<R: ReactionRenderer> fmt::Debug for ReactionButtonsNode<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionButtonsNode")
            .field("engine", &self.engine)
            .field("buttons", &self.buttons.values())
            .field("has_background", &self.has_background)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<R: ReactionRenderer> Default for ReactionButtonsNode<R> {
    fn default() -> Self {
        Self::new(ReactionLayoutEngine::default())
    }
}

impl<R: ReactionRenderer> ReactionButtonsNode<R> {
    pub fn new(engine: ReactionLayoutEngine) -> Self {
        Self {
            engine,
            buttons: ButtonRegistry::new(),
            masks: ButtonRegistry::new(),
            has_background: false,
            absolute_rect: None,
            size: Size::ZERO,
            on_reaction_selected: None,
            on_open_preview: None,
        }
    }

    pub fn on_reaction_selected(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_reaction_selected = Some(Box::new(callback));
    }

    pub fn on_open_preview(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_open_preview = Some(Box::new(callback));
    }

    pub fn engine(&self) -> &ReactionLayoutEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ReactionLayoutEngine {
        &mut self.engine
    }

    /// Measure a message's reactions.
    ///
    /// Derives entries from the attribute, enables the list gesture when the
    /// chat allows it, and records the live values so the layout can flag
    /// new buttons.
    pub fn prepare(
        &mut self,
        attribute: &ReactionsAttribute,
        peer: PeerKind,
        context: LayoutContext<'_>,
        constrained_width: f64,
    ) -> PreparedReactions {
        let set = ReactionSet::from_attribute(attribute, peer);
        let context = context.gestures(can_view_reaction_list(attribute, peer));
        self.prepare_set(&set, &context, constrained_width)
    }

    /// Measure pre-built entries.
    pub fn prepare_set(
        &mut self,
        set: &ReactionSet,
        context: &LayoutContext<'_>,
        constrained_width: f64,
    ) -> PreparedReactions {
        self.engine
            .prepare(set, context, constrained_width)
            .with_existing(self.buttons.values())
    }

    /// Lay out prepared reactions at the final width.
    pub fn layout(&mut self, prepared: &PreparedReactions, bounding_width: f64) -> LayoutResult {
        self.engine.layout(prepared, bounding_width)
    }

    /// Reconcile `layout` against the live buttons and render the diff.
    pub fn apply(
        &mut self,
        layout: &LayoutResult,
        animation: UpdateAnimation,
        renderer: &mut R,
    ) -> Diff {
        let _span = debug_span!(
            "reactions_apply",
            items = layout.items.len(),
            animated = animation.is_animated()
        )
        .entered();

        let diff = reconcile(&self.buttons, layout);
        self.size = layout.size;
        self.apply_background(layout.background_frame, animation, renderer);

        let appear = Transition::appear(animation);
        let update = Transition::update(animation);
        let disappear = Transition::disappear(animation);
        let icon_size = self.engine.config().metrics.icon_size;
        let side_inset = self.engine.config().metrics.side_inset;

        for change in &diff.changes {
            let icon_frame = icon_frame_in(change.frame, side_inset, icon_size);
            match change.kind {
                ChangeKind::Created => {
                    trace!(value = %change.value, "button created");
                    let handle = renderer.create_button(change, appear);
                    self.buttons.insert(
                        change.value.clone(),
                        LiveButton {
                            handle,
                            frame: change.frame,
                            icon_frame,
                            gesture_enabled: change.content.gesture_enabled,
                        },
                    );
                    let mask =
                        renderer.create_mask(change.mask_frame, layout.mask_corner_radius, appear);
                    if let Some(stale) = self.masks.insert(change.value.clone(), mask) {
                        renderer.remove_mask(stale, Transition::IMMEDIATE);
                    }
                }
                ChangeKind::Updated => {
                    if let Some(live) = self.buttons.get_mut(&change.value) {
                        renderer.update_button(&mut live.handle, change, update);
                        live.frame = change.frame;
                        live.icon_frame = icon_frame;
                        live.gesture_enabled = change.content.gesture_enabled;
                    }
                    match self.masks.get_mut(&change.value) {
                        Some(mask) => renderer.update_mask(mask, change.mask_frame, update),
                        None => {
                            let mask = renderer.create_mask(
                                change.mask_frame,
                                layout.mask_corner_radius,
                                appear,
                            );
                            self.masks.insert(change.value.clone(), mask);
                        }
                    }
                }
            }
        }

        for value in &diff.removed {
            trace!(value = %value, "button removed");
            if let Some(mask) = self.masks.remove(value) {
                renderer.remove_mask(mask, disappear);
            }
            if let Some(live) = self.buttons.remove(value) {
                renderer.remove_button(live.handle, disappear);
            }
        }

        debug_assert_eq!(self.buttons.values(), self.masks.values());
        debug!(
            created = diff.created().count(),
            updated = diff.updated().count(),
            removed = diff.removed.len(),
            "reactions applied"
        );
        diff
    }

    /// Remove every button, mask and background immediately.
    pub fn teardown(&mut self, renderer: &mut R) {
        debug!(buttons = self.buttons.len(), "reactions teardown");
        for (_, mask) in self.masks.drain() {
            renderer.remove_mask(mask, Transition::IMMEDIATE);
        }
        for (_, live) in self.buttons.drain() {
            renderer.remove_button(live.handle, Transition::IMMEDIATE);
        }
        if self.has_background {
            renderer.update_background(None, Transition::IMMEDIATE);
            self.has_background = false;
        }
        self.size = Size::ZERO;
    }

    /// Scale every button up from collapsed, as the bar appears.
    pub fn animate_in(&mut self, animation: UpdateAnimation, renderer: &mut R) {
        let transition = Transition::scale_with(animation, COLLAPSED_SCALE, 1.0);
        for (_, live) in self.buttons.iter_mut() {
            renderer.transition_button(&mut live.handle, transition);
        }
    }

    /// Collapse every button, as the bar disappears.
    pub fn animate_out(&mut self, animation: UpdateAnimation, renderer: &mut R) {
        let transition = Transition::scale_with(animation, 1.0, COLLAPSED_SCALE);
        for (_, live) in self.buttons.iter_mut() {
            renderer.transition_button(&mut live.handle, transition);
        }
    }

    /// Record where the bar sits inside its scrolling container and pass
    /// it on to a live background.
    pub fn update_absolute_rect(
        &mut self,
        rect: Rect,
        container: Size,
        animation: UpdateAnimation,
        renderer: &mut R,
    ) {
        self.absolute_rect = Some((rect, container));
        if self.has_background {
            renderer.update_background_position(rect, container, Transition::update(animation));
        }
    }

    /// Shift the live background's wallpaper sampling.
    pub fn offset(&mut self, value: Point, duration: Duration, curve: Curve, renderer: &mut R) {
        if self.has_background {
            renderer.offset_background(value, duration, curve);
        }
    }

    /// Spring the live background's wallpaper sampling vertically.
    pub fn offset_spring(
        &mut self,
        value: f64,
        duration: Duration,
        damping: f64,
        renderer: &mut R,
    ) {
        if self.has_background {
            renderer.offset_background_spring(value, duration, damping);
        }
    }

    /// Value of the button under `point`, in node coordinates.
    pub fn button_at(&self, point: Point) -> Option<&str> {
        self.buttons
            .iter()
            .find(|(_, live)| live.frame.contains(point))
            .map(|(value, _)| value)
    }

    /// Icon frame of the button for `value`, where reaction effects land.
    pub fn target_frame(&self, value: &str) -> Option<Rect> {
        self.buttons.get(value).map(|live| live.icon_frame)
    }

    /// Frame of the button for `value`.
    pub fn button_frame(&self, value: &str) -> Option<Rect> {
        self.buttons.get(value).map(|live| live.frame)
    }

    pub fn button(&self, value: &str) -> Option<&LiveButton<R::Button>> {
        self.buttons.get(value)
    }

    pub fn mask(&self, value: &str) -> Option<&R::Mask> {
        self.masks.get(value)
    }

    /// Live values in creation order.
    pub fn values(&self) -> Vec<&str> {
        self.buttons.values()
    }

    /// Values with a live mask, in creation order.
    pub fn mask_values(&self) -> Vec<&str> {
        self.masks.values()
    }

    /// Size of the last applied layout.
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn has_background(&self) -> bool {
        self.has_background
    }

    /// Tap at `point`: selects the reaction under it.
    ///
    /// Returns the tapped value.
    pub fn tap(&mut self, point: Point) -> Option<String> {
        let value = self.button_at(point)?.to_owned();
        debug!(value = %value, "reaction tapped");
        if let Some(callback) = self.on_reaction_selected.as_mut() {
            callback(&value);
        }
        Some(value)
    }

    /// Long press at `point`: opens the reaction list preview when the
    /// button allows it.
    pub fn long_press(&mut self, point: Point) -> LongPress {
        let Some((value, enabled)) = self
            .buttons
            .iter()
            .find(|(_, live)| live.frame.contains(point))
            .map(|(value, live)| (value.to_owned(), live.gesture_enabled))
        else {
            return LongPress::Missed;
        };
        if !enabled {
            return LongPress::Cancelled;
        }
        debug!(value = %value, "reaction preview requested");
        match self.on_open_preview.as_mut() {
            Some(callback) => {
                callback(&value);
                LongPress::Opened
            }
            None => LongPress::Cancelled,
        }
    }

    fn apply_background(
        &mut self,
        frame: Option<Rect>,
        animation: UpdateAnimation,
        renderer: &mut R,
    ) {
        match (frame, self.has_background) {
            (Some(frame), false) => {
                renderer.update_background(Some(frame), Transition::IMMEDIATE);
                self.has_background = true;
                if let Some((rect, container)) = self.absolute_rect {
                    renderer.update_background_position(rect, container, Transition::IMMEDIATE);
                }
            }
            (Some(frame), true) => {
                let transition = Transition::update(animation);
                renderer.update_background(Some(frame), transition);
                if let Some((rect, container)) = self.absolute_rect {
                    renderer.update_background_position(rect, container, transition);
                }
            }
            (None, true) => {
                renderer.update_background(None, Transition::IMMEDIATE);
                self.has_background = false;
            }
            (None, false) => {}
        }
    }
}

fn icon_frame_in(button: Rect, side_inset: f64, icon_size: f64) -> Rect {
    Rect::new(
        button.x + side_inset,
        button.y + ((button.height - icon_size) / 2.0).floor(),
        icon_size,
        icon_size,
    )
}
