#![forbid(unsafe_code)]

//! Color and theme vocabulary for the reaction bar.
//!
//! # Role in reactbar
//! `reactbar-style` turns theme tokens into the colors a reaction button is
//! drawn with. It knows nothing about layout: the reactions crate asks it
//! for a [`ReactionColors`] set once per update and resolves per-button
//! pairs with [`ButtonState`].
//!
//! # This crate provides
//! - [`Color`], a packed ARGB value.
//! - [`ChatTheme`] with incoming/outgoing/freeform reaction slots.
//! - [`DisplayType`] and the pure [`reaction_colors`] mapping.
//! - [`ButtonState`] for selection and preview color resolution.
//! - [`PillBackgroundCache`] for memoized capsule backgrounds.

/// Packed ARGB color.
pub mod color;
/// Display contexts and reaction color sets.
pub mod display;
/// Button color states.
pub mod interactive;
/// Memoized pill backgrounds.
pub mod pill;
/// Theme tokens.
pub mod theme;

pub use color::Color;
pub use display::{DisplayType, ReactionColors, reaction_colors};
pub use interactive::{ButtonColors, ButtonState};
pub use pill::{PillBackground, PillBackgroundCache, PillCacheStats, PillKey, PillStroke};
pub use theme::{BubbleColorComponents, ChatTheme, ThemeBuilder, WallpaperVariant};
