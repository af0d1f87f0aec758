//! Intrinsic button sizing.
//!
//! A button is a capsule holding, left to right: an optional reaction icon,
//! then either a count label or a cluster of recent-actor avatars. Its width
//! is computed once per entry before packing and never depends on the
//! bounding width.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::Size;

/// Measures rendered text width.
///
/// Text shaping lives in the host's text stack; the layout only needs a
/// width for the count label.
pub trait TextMeasurer {
    fn text_width(&self, text: &str) -> f64;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str) -> f64,
{
    fn text_width(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Fixed advance per display column.
///
/// Count labels are digits with an optional `K`/`M` suffix, so a tabular
/// advance is a close stand-in for the real font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphAdvanceMeasurer {
    pub advance: f64,
}

impl Default for GlyphAdvanceMeasurer {
    fn default() -> Self {
        Self { advance: 8.0 }
    }
}

impl TextMeasurer for GlyphAdvanceMeasurer {
    fn text_width(&self, text: &str) -> f64 {
        text.width() as f64 * self.advance
    }
}

/// Dimensions of a reaction button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonMetrics {
    /// Capsule height; the corner radius is half of it.
    pub height: f64,
    /// Padding before the first and after the last element.
    pub side_inset: f64,
    pub icon_size: f64,
    /// Space between the icon and the label or avatars.
    pub icon_spacing: f64,
    pub avatar_size: f64,
    /// Horizontal step between overlapping avatars.
    pub avatar_step: f64,
    /// Avatars beyond this count are not drawn.
    pub max_avatars: usize,
}

impl ButtonMetrics {
    pub const DEFAULT: Self = Self {
        height: 30.0,
        side_inset: 10.0,
        icon_size: 18.0,
        icon_spacing: 4.0,
        avatar_size: 24.0,
        avatar_step: 16.0,
        max_avatars: 3,
    };

    /// Corner radius of the capsule.
    #[inline]
    pub fn corner_radius(&self) -> f64 {
        self.height / 2.0
    }

    /// Width of an avatar cluster of `count` avatars.
    pub fn avatar_cluster_width(&self, count: usize) -> f64 {
        let shown = count.min(self.max_avatars);
        if shown == 0 {
            0.0
        } else {
            self.avatar_size + (shown - 1) as f64 * self.avatar_step
        }
    }

    /// Intrinsic size of a button.
    pub fn button_size(
        &self,
        content: &ButtonContentSpec<'_>,
        measurer: &dyn TextMeasurer,
    ) -> Size {
        let trailing = if content.avatar_count > 0 {
            self.avatar_cluster_width(content.avatar_count)
        } else {
            content.label.map_or(0.0, |label| measurer.text_width(label).ceil())
        };

        let mut width = self.side_inset * 2.0;
        if content.has_icon {
            width += self.icon_size;
            if trailing > 0.0 {
                width += self.icon_spacing;
            }
        }
        width += trailing;

        Size::new(width.ceil(), self.height)
    }
}

impl Default for ButtonMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What a button shows, as far as its size is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonContentSpec<'a> {
    pub has_icon: bool,
    /// Count label, ignored when avatars are shown.
    pub label: Option<&'a str>,
    pub avatar_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_button_width() {
        let metrics = ButtonMetrics::default();
        let measurer = GlyphAdvanceMeasurer::default();
        let size = metrics.button_size(
            &ButtonContentSpec {
                has_icon: true,
                label: Some("12"),
                avatar_count: 0,
            },
            &measurer,
        );
        // 10 + 18 + 4 + 16 + 10
        assert_eq!(size, Size::new(58.0, 30.0));
    }

    #[test]
    fn avatars_replace_label() {
        let metrics = ButtonMetrics::default();
        let measurer = GlyphAdvanceMeasurer::default();
        let size = metrics.button_size(
            &ButtonContentSpec {
                has_icon: true,
                label: Some("2"),
                avatar_count: 2,
            },
            &measurer,
        );
        // 10 + 18 + 4 + (24 + 16) + 10
        assert_eq!(size.width, 82.0);
    }

    #[test]
    fn avatar_cluster_is_capped() {
        let metrics = ButtonMetrics::default();
        assert_eq!(metrics.avatar_cluster_width(0), 0.0);
        assert_eq!(metrics.avatar_cluster_width(1), 24.0);
        assert_eq!(metrics.avatar_cluster_width(3), 56.0);
        assert_eq!(metrics.avatar_cluster_width(10), 56.0);
    }

    #[test]
    fn icon_only_button_has_no_spacing() {
        let metrics = ButtonMetrics::default();
        let measurer = GlyphAdvanceMeasurer::default();
        let size = metrics.button_size(
            &ButtonContentSpec {
                has_icon: true,
                label: None,
                avatar_count: 0,
            },
            &measurer,
        );
        assert_eq!(size.width, 38.0);
    }

    #[test]
    fn closure_measurer_is_accepted() {
        let metrics = ButtonMetrics::default();
        let measurer = |text: &str| text.len() as f64 * 3.3;
        let size = metrics.button_size(
            &ButtonContentSpec {
                has_icon: false,
                label: Some("1.2K"),
                avatar_count: 0,
            },
            &measurer,
        );
        // label 13.2 rounds up to 14.
        assert_eq!(size.width, 34.0);
    }

    #[test]
    fn wide_glyphs_count_two_columns() {
        let measurer = GlyphAdvanceMeasurer { advance: 5.0 };
        assert_eq!(measurer.text_width("7"), 5.0);
        assert_eq!(measurer.text_width("日"), 10.0);
    }
}
