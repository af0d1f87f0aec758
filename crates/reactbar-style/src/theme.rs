#![forbid(unsafe_code)]

//! Chat theme tokens consumed by the reaction bar.
//!
//! Only the slots the reaction buttons read are modelled: the reaction
//! colors of incoming, outgoing and freeform bubbles (each in a with- and
//! without-wallpaper variant), the static fill used behind freeform
//! buttons, and the context menu colors used while a button is extracted
//! into a preview.

use crate::color::Color;

/// Reaction color slots of one bubble kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BubbleColorComponents {
    pub reaction_inactive_background: Color,
    pub reaction_active_background: Color,
    pub reaction_inactive_foreground: Color,
    pub reaction_active_foreground: Color,
}

/// A slot that differs depending on whether a chat wallpaper is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallpaperVariant<T> {
    pub with_wallpaper: T,
    pub without_wallpaper: T,
}

impl<T: Copy> WallpaperVariant<T> {
    /// Both variants share one value.
    pub const fn uniform(value: T) -> Self {
        Self {
            with_wallpaper: value,
            without_wallpaper: value,
        }
    }

    /// Pick the variant for the current wallpaper state.
    #[inline]
    pub fn resolve(&self, has_wallpaper: bool) -> T {
        if has_wallpaper {
            self.with_wallpaper
        } else {
            self.without_wallpaper
        }
    }
}

/// Theme tokens for the reaction bar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChatTheme {
    pub incoming: WallpaperVariant<BubbleColorComponents>,
    pub outgoing: WallpaperVariant<BubbleColorComponents>,
    pub freeform: WallpaperVariant<BubbleColorComponents>,
    /// Deselected fill behind freeform buttons.
    pub freeform_static_fill: WallpaperVariant<Color>,
    pub context_menu_background: Color,
    pub context_menu_primary: Color,
}

impl ChatTheme {
    /// Create a builder seeded with the day preset.
    pub fn builder() -> ThemeBuilder {
        ThemeBuilder::from_theme(Self::day())
    }

    /// Light preset.
    pub fn day() -> Self {
        let incoming = BubbleColorComponents {
            reaction_inactive_background: Color::argb(0xFFF0_F2F5),
            reaction_active_background: Color::argb(0xFF00_7AFF),
            reaction_inactive_foreground: Color::argb(0xFF00_7AFF),
            reaction_active_foreground: Color::WHITE,
        };
        let outgoing = BubbleColorComponents {
            reaction_inactive_background: Color::argb(0xFFC8_EBB4),
            reaction_active_background: Color::argb(0xFF2B_B33A),
            reaction_inactive_foreground: Color::argb(0xFF2B_B33A),
            reaction_active_foreground: Color::argb(0xFFE1_FFC7),
        };
        let freeform = BubbleColorComponents {
            reaction_inactive_background: Color::argb(0x33FF_FFFF),
            reaction_active_background: Color::WHITE,
            reaction_inactive_foreground: Color::WHITE,
            reaction_active_foreground: Color::argb(0xFF00_7AFF),
        };
        Self {
            incoming: WallpaperVariant::uniform(incoming),
            outgoing: WallpaperVariant::uniform(outgoing),
            freeform: WallpaperVariant {
                with_wallpaper: freeform,
                without_wallpaper: BubbleColorComponents {
                    reaction_inactive_background: Color::argb(0xFFE6_E9ED),
                    reaction_inactive_foreground: Color::argb(0xFF00_7AFF),
                    ..freeform
                },
            },
            freeform_static_fill: WallpaperVariant {
                with_wallpaper: Color::argb(0x4D00_0000),
                without_wallpaper: Color::argb(0xFFE6_E9ED),
            },
            context_menu_background: Color::argb(0xF9F9_F9F9),
            context_menu_primary: Color::BLACK,
        }
    }

    /// Dark preset.
    pub fn night() -> Self {
        let incoming = BubbleColorComponents {
            reaction_inactive_background: Color::argb(0xFF2C_2C2E),
            reaction_active_background: Color::argb(0xFF38_98FF),
            reaction_inactive_foreground: Color::argb(0xFF38_98FF),
            reaction_active_foreground: Color::WHITE,
        };
        let outgoing = BubbleColorComponents {
            reaction_inactive_background: Color::argb(0xFF3D_6A97),
            reaction_active_background: Color::WHITE,
            reaction_inactive_foreground: Color::WHITE,
            reaction_active_foreground: Color::argb(0xFF31_3D4A),
        };
        let freeform = BubbleColorComponents {
            reaction_inactive_background: Color::argb(0x33FF_FFFF),
            reaction_active_background: Color::WHITE,
            reaction_inactive_foreground: Color::WHITE,
            reaction_active_foreground: Color::BLACK,
        };
        Self {
            incoming: WallpaperVariant::uniform(incoming),
            outgoing: WallpaperVariant::uniform(outgoing),
            freeform: WallpaperVariant::uniform(freeform),
            freeform_static_fill: WallpaperVariant::uniform(Color::argb(0x6600_0000)),
            context_menu_background: Color::argb(0xF91C_1C1D),
            context_menu_primary: Color::WHITE,
        }
    }
}

impl Default for ChatTheme {
    fn default() -> Self {
        Self::day()
    }
}

/// Builder for [`ChatTheme`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ThemeBuilder {
    theme: ChatTheme,
}

impl ThemeBuilder {
    /// Start from an existing theme.
    pub fn from_theme(theme: ChatTheme) -> Self {
        Self { theme }
    }

    pub fn incoming(mut self, colors: BubbleColorComponents) -> Self {
        self.theme.incoming = WallpaperVariant::uniform(colors);
        self
    }

    pub fn outgoing(mut self, colors: BubbleColorComponents) -> Self {
        self.theme.outgoing = WallpaperVariant::uniform(colors);
        self
    }

    pub fn freeform(mut self, colors: WallpaperVariant<BubbleColorComponents>) -> Self {
        self.theme.freeform = colors;
        self
    }

    pub fn freeform_static_fill(mut self, fill: WallpaperVariant<Color>) -> Self {
        self.theme.freeform_static_fill = fill;
        self
    }

    pub fn context_menu(mut self, background: Color, primary: Color) -> Self {
        self.theme.context_menu_background = background;
        self.theme.context_menu_primary = primary;
        self
    }

    pub fn build(self) -> ChatTheme {
        self.theme
    }
}
