#![forbid(unsafe_code)]

//! Display contexts and the color set each one resolves to.

use crate::color::Color;
use crate::theme::ChatTheme;

/// Where the reaction bar is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DisplayType {
    /// Inside an incoming message bubble.
    #[default]
    Incoming,
    /// Inside an outgoing message bubble.
    Outgoing,
    /// Standalone bar below a bubble-less message (stickers, round videos).
    Freeform,
}

impl DisplayType {
    /// Only freeform bars draw their own bubble background.
    #[inline]
    pub const fn has_bubble_background(self) -> bool {
        matches!(self, Self::Freeform)
    }

    /// Bubble display type for a message direction.
    #[inline]
    pub const fn for_bubble(incoming: bool) -> Self {
        if incoming { Self::Incoming } else { Self::Outgoing }
    }
}

/// Colors used by every button of one reaction bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactionColors {
    pub deselected_background: Color,
    pub selected_background: Color,
    pub deselected_foreground: Color,
    pub selected_foreground: Color,
    /// Background while the button is lifted into a context preview.
    pub extracted_background: Color,
    pub extracted_foreground: Color,
}

/// Resolve the reaction colors of a display context.
///
/// Bubble contexts read the reaction slots of their bubble side. The
/// freeform context takes its deselected background from the static fill
/// instead, since there is no bubble underneath to tint.
pub fn reaction_colors(
    theme: &ChatTheme,
    has_wallpaper: bool,
    display: DisplayType,
) -> ReactionColors {
    let components = match display {
        DisplayType::Incoming => theme.incoming.resolve(has_wallpaper),
        DisplayType::Outgoing => theme.outgoing.resolve(has_wallpaper),
        DisplayType::Freeform => theme.freeform.resolve(has_wallpaper),
    };
    let deselected_background = match display {
        DisplayType::Incoming | DisplayType::Outgoing => components.reaction_inactive_background,
        DisplayType::Freeform => theme.freeform_static_fill.resolve(has_wallpaper),
    };
    ReactionColors {
        deselected_background,
        selected_background: components.reaction_active_background,
        deselected_foreground: components.reaction_inactive_foreground,
        selected_foreground: components.reaction_active_foreground,
        extracted_background: theme.context_menu_background,
        extracted_foreground: theme.context_menu_primary,
    }
}
