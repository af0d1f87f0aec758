//! Button color variants for selection and preview states.
//!
//! A reaction button is drawn in one of three states: deselected, selected
//! (the current user reacted with it), or extracted (lifted into a context
//! preview while long-pressed). [`ButtonColors`] resolves the
//! background/foreground pair for a state from a [`ReactionColors`] set.
//!
//! # Example
//!
//! ```
//! use reactbar_style::{ButtonState, ChatTheme, DisplayType, reaction_colors};
//!
//! let colors = reaction_colors(&ChatTheme::day(), false, DisplayType::Incoming);
//! let pair = ButtonState::from_selected(true).resolve(&colors);
//! assert_eq!(pair.background, colors.selected_background);
//! ```

#![forbid(unsafe_code)]

use crate::color::Color;
use crate::display::ReactionColors;

/// The visual state of a reaction button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    /// The current user has not reacted with this value.
    #[default]
    Deselected,
    /// The current user reacted with this value.
    Selected,
    /// Lifted into a context preview.
    Extracted,
}

/// A resolved background/foreground pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonColors {
    pub background: Color,
    pub foreground: Color,
}

impl ButtonState {
    /// State of a button from its selection flag.
    #[inline]
    pub const fn from_selected(is_selected: bool) -> Self {
        if is_selected {
            Self::Selected
        } else {
            Self::Deselected
        }
    }

    /// Resolve the colors for this state.
    pub fn resolve(self, colors: &ReactionColors) -> ButtonColors {
        match self {
            Self::Deselected => ButtonColors {
                background: colors.deselected_background,
                foreground: colors.deselected_foreground,
            },
            Self::Selected => ButtonColors {
                background: colors.selected_background,
                foreground: colors.selected_foreground,
            },
            Self::Extracted => ButtonColors {
                background: colors.extracted_background,
                foreground: colors.extracted_foreground,
            },
        }
    }
}
