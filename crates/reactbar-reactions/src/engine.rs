#![forbid(unsafe_code)]

//! Measure-then-layout engine for a reaction bar.
//!
//! [`ReactionLayoutEngine::prepare`] sizes every button and measures the
//! rows at the constrained width. The embedding bubble reads
//! [`PreparedReactions::proposed_width`], settles its own width, and then
//! calls [`ReactionLayoutEngine::layout`] with the final bounding width.
//! A [`LayoutResult`] can only be produced from a [`PreparedReactions`], so
//! the two steps cannot run out of order.
//!
//! ```
//! use reactbar_reactions::{LayoutContext, ReactionEntry, ReactionLayoutEngine, ReactionSet};
//! use reactbar_style::ChatTheme;
//!
//! let mut engine = ReactionLayoutEngine::default();
//! let theme = ChatTheme::day();
//! let set = ReactionSet::new(vec![ReactionEntry::new("👍", 3), ReactionEntry::new("🔥", 12)]);
//!
//! let prepared = engine.prepare(&set, &LayoutContext::new(&theme), 240.0);
//! let width = prepared.proposed_width();
//! let layout = engine.layout(&prepared, width.max(120.0));
//! assert_eq!(layout.items.len(), 2);
//! ```

use std::hash::{Hash, Hasher};
use std::ops::Range;

use rustc_hash::{FxHashSet, FxHasher};
use tracing::{debug, debug_span, trace};

use reactbar_layout::{
    ButtonContentSpec, DisplayAlignment, Flow, GlyphAdvanceMeasurer, Point, ReactionLayoutCache,
    Rect, Size, TextMeasurer, compact_count,
};
use reactbar_style::{
    ButtonColors, ButtonState, ChatTheme, DisplayType, PillBackground, PillBackgroundCache,
    reaction_colors,
};

use crate::avatars::visible_avatars;
use crate::config::ReactionsConfig;
use crate::entry::{ActorId, AvailableReactions, IconId, ReactionSet};

/// Presentation inputs of one update.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub theme: &'a ChatTheme,
    pub has_wallpaper: bool,
    pub display: DisplayType,
    pub alignment: DisplayAlignment,
    /// Icon table; buttons have no icon without it.
    pub available: Option<&'a AvailableReactions>,
    /// Long-press opens the reaction list.
    pub gestures_enabled: bool,
    /// The host can draw a freeform bubble background.
    pub background_available: bool,
}

impl<'a> LayoutContext<'a> {
    /// Incoming, left-aligned bubble context with no icons.
    pub fn new(theme: &'a ChatTheme) -> Self {
        Self {
            theme,
            has_wallpaper: false,
            display: DisplayType::Incoming,
            alignment: DisplayAlignment::Left,
            available: None,
            gestures_enabled: false,
            background_available: false,
        }
    }

    #[must_use]
    pub fn display(mut self, display: DisplayType) -> Self {
        self.display = display;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: DisplayAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn wallpaper(mut self, has_wallpaper: bool) -> Self {
        self.has_wallpaper = has_wallpaper;
        self
    }

    #[must_use]
    pub fn available(mut self, available: &'a AvailableReactions) -> Self {
        self.available = Some(available);
        self
    }

    #[must_use]
    pub fn gestures(mut self, enabled: bool) -> Self {
        self.gestures_enabled = enabled;
        self
    }

    #[must_use]
    pub fn background(mut self, available: bool) -> Self {
        self.background_available = available;
        self
    }
}

/// What a button displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonContent {
    /// Compact count, absent when avatars are shown.
    pub label: Option<String>,
    pub icon: Option<IconId>,
    /// Recent actors to draw, capped at the metrics' avatar limit.
    pub avatars: Vec<ActorId>,
    pub state: ButtonState,
    pub colors: ButtonColors,
    pub background: PillBackground,
    pub gesture_enabled: bool,
}

/// A sized button awaiting placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedButton {
    pub value: String,
    pub size: Size,
    pub content: ButtonContent,
}

/// Measured buttons, ready to be laid out.
#[derive(Debug, Clone)]
pub struct PreparedReactions {
    buttons: Vec<PreparedButton>,
    sizes: Vec<Size>,
    measured: Size,
    alignment: DisplayAlignment,
    display: DisplayType,
    background_available: bool,
    existing: FxHashSet<String>,
}

impl PreparedReactions {
    /// Natural width of the rows at the constrained width.
    #[inline]
    pub fn proposed_width(&self) -> f64 {
        self.measured.width
    }

    /// Natural size of the rows at the constrained width, without insets.
    #[inline]
    pub fn content_size(&self) -> Size {
        self.measured
    }

    pub fn buttons(&self) -> &[PreparedButton] {
        &self.buttons
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Record which values already have a button, so the layout can flag
    /// the rest as new.
    #[must_use]
    pub fn with_existing<'v>(mut self, values: impl IntoIterator<Item = &'v str>) -> Self {
        self.existing = values.into_iter().map(str::to_owned).collect();
        self
    }
}

/// A placed button.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedButton {
    pub value: String,
    pub frame: Rect,
    /// No button existed for this value when the update was prepared.
    pub is_new: bool,
    pub content: ButtonContent,
}

impl RenderedButton {
    #[inline]
    pub fn size(&self) -> Size {
        self.frame.size()
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.frame.origin()
    }
}

/// Output of [`ReactionLayoutEngine::layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub items: Vec<RenderedButton>,
    /// Bounding width by inset content height.
    pub size: Size,
    /// Index ranges of `items` in each row.
    pub rows: Vec<Range<usize>>,
    pub alignment: DisplayAlignment,
    /// Freeform bubble background, outset past `size` on every side.
    pub background_frame: Option<Rect>,
    /// Offset from a button frame to its mask frame.
    pub mask_offset: f64,
    pub mask_corner_radius: f64,
}

impl LayoutResult {
    /// Mask frame of a button frame, in the background's coordinate space.
    #[inline]
    pub fn mask_frame(&self, frame: Rect) -> Rect {
        frame.offset_by(self.mask_offset, self.mask_offset)
    }
}

/// Sizes, measures and packs reaction buttons.
///
/// One engine belongs to one reaction bar; it owns the bar's layout and
/// pill caches.
pub struct ReactionLayoutEngine {
    config: ReactionsConfig,
    flow: Flow,
    measurer: Box<dyn TextMeasurer>,
    layout_cache: ReactionLayoutCache,
    pills: PillBackgroundCache,
    theme_fingerprint: Option<u64>,
}

impl std::fmt::Debug for ReactionLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionLayoutEngine")
            .field("config", &self.config)
            .field("layout_cache", &self.layout_cache.stats())
            .field("pills", &self.pills.stats())
            .finish_non_exhaustive()
    }
}

impl Default for ReactionLayoutEngine {
    fn default() -> Self {
        Self::new(ReactionsConfig::default())
    }
}

impl ReactionLayoutEngine {
    /// Engine measuring labels with a fixed glyph advance.
    pub fn new(config: ReactionsConfig) -> Self {
        Self::with_measurer(config, GlyphAdvanceMeasurer::default())
    }

    /// Engine measuring labels with the host's text stack.
    pub fn with_measurer(config: ReactionsConfig, measurer: impl TextMeasurer + 'static) -> Self {
        Self {
            flow: Flow::new(config.spacing),
            measurer: Box::new(measurer),
            layout_cache: ReactionLayoutCache::new(config.cache.layout_entries),
            pills: PillBackgroundCache::new(config.cache.pill_entries),
            theme_fingerprint: None,
            config,
        }
    }

    pub fn config(&self) -> &ReactionsConfig {
        &self.config
    }

    /// Natural width of `set` wrapped at `constrained_width`.
    pub fn compute_proposed_width(
        &mut self,
        set: &ReactionSet,
        context: &LayoutContext<'_>,
        constrained_width: f64,
    ) -> f64 {
        self.prepare(set, context, constrained_width).proposed_width()
    }

    /// Size every button of `set` and measure the rows.
    pub fn prepare(
        &mut self,
        set: &ReactionSet,
        context: &LayoutContext<'_>,
        constrained_width: f64,
    ) -> PreparedReactions {
        let _span = debug_span!(
            "reactions_prepare",
            entries = set.len(),
            constrained_width,
            display = ?context.display
        )
        .entered();

        self.sync_theme(context.theme);

        let colors = reaction_colors(context.theme, context.has_wallpaper, context.display);
        let metrics = self.config.metrics;
        let mut buttons = Vec::with_capacity(set.len());

        for entry in &set.entries {
            let visible = visible_avatars(entry, set);
            if visible.is_empty() && !entry.recent_actor_ids.is_empty() {
                trace!(value = %entry.value, count = entry.count, "avatars suppressed");
            }
            let avatars: Vec<ActorId> = visible.iter().take(metrics.max_avatars).copied().collect();
            let label = avatars.is_empty().then(|| compact_count(entry.count));
            let icon = context.available.and_then(|table| table.icon_for(&entry.value));

            let size = metrics.button_size(
                &ButtonContentSpec {
                    has_icon: icon.is_some(),
                    label: label.as_deref(),
                    avatar_count: avatars.len(),
                },
                self.measurer.as_ref(),
            );

            let state = ButtonState::from_selected(entry.is_selected);
            let button_colors = state.resolve(&colors);
            let background = self
                .pills
                .get_or_insert(button_colors.background, None, metrics.height);

            buttons.push(PreparedButton {
                value: entry.value.clone(),
                size,
                content: ButtonContent {
                    label,
                    icon,
                    avatars,
                    state,
                    colors: button_colors,
                    background,
                    gesture_enabled: context.gestures_enabled,
                },
            });
        }

        let sizes: Vec<Size> = buttons.iter().map(|button| button.size).collect();
        let measured = self.flow.measure(&sizes, constrained_width);
        debug!(width = measured.width, height = measured.height, "reactions measured");

        PreparedReactions {
            buttons,
            sizes,
            measured,
            alignment: context.alignment,
            display: context.display,
            background_available: context.background_available,
            existing: FxHashSet::default(),
        }
    }

    /// Place the prepared buttons inside `bounding_width`.
    pub fn layout(&mut self, prepared: &PreparedReactions, bounding_width: f64) -> LayoutResult {
        let _span = debug_span!(
            "reactions_layout",
            buttons = prepared.len(),
            bounding_width,
            alignment = ?prepared.alignment
        )
        .entered();

        let insets = self.config.insets;
        let arrangement = self.layout_cache.arrange(
            &self.flow,
            &prepared.sizes,
            bounding_width,
            insets.top,
            prepared.alignment,
        );

        let items: Vec<RenderedButton> = prepared
            .buttons
            .iter()
            .zip(&arrangement.frames)
            .map(|(button, &frame)| RenderedButton {
                value: button.value.clone(),
                frame,
                is_new: !prepared.existing.contains(&button.value),
                content: button.content.clone(),
            })
            .collect();

        let size = Size::new(
            bounding_width,
            insets.top + arrangement.content_height + insets.bottom,
        );
        let background_frame = (prepared.display.has_bubble_background()
            && prepared.background_available)
            .then(|| {
                Rect::from_size(size).inset_by(-insets.background, -insets.background)
            });

        debug!(rows = arrangement.rows.len(), height = size.height, "reactions laid out");

        LayoutResult {
            items,
            size,
            rows: arrangement.rows,
            alignment: prepared.alignment,
            background_frame,
            mask_offset: insets.background,
            mask_corner_radius: insets.mask_corner_radius,
        }
    }

    /// Drop memoized pills and arrangements. Call when the text measurer's
    /// font changes.
    pub fn invalidate_caches(&mut self) {
        self.layout_cache.invalidate_all();
        self.pills.invalidate_all();
    }

    pub fn layout_cache(&self) -> &ReactionLayoutCache {
        &self.layout_cache
    }

    pub fn pill_cache(&self) -> &PillBackgroundCache {
        &self.pills
    }

    fn sync_theme(&mut self, theme: &ChatTheme) {
        let mut hasher = FxHasher::default();
        theme.hash(&mut hasher);
        let fingerprint = hasher.finish();
        if self.theme_fingerprint != Some(fingerprint) {
            if self.theme_fingerprint.is_some() {
                debug!("theme changed; invalidating pill backgrounds");
                self.pills.invalidate_all();
            }
            self.theme_fingerprint = Some(fingerprint);
        }
    }
}
