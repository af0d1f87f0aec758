//! Reaction bar embedded as the footer of a message bubble.
//!
//! The footer wraps the bar in the bubble's horizontal content insets and
//! adds a small vertical allowance. When the bubble content directly above
//! is media, the bar is pushed down so it does not touch the picture.

use reactbar_core::{Rect, Sides, Size};
use reactbar_reactions::{LayoutResult, PreparedReactions};

/// Extra height below the bar, on top of the bar's own bottom inset.
const FOOTER_BOTTOM: f64 = 2.0;
/// Top offset when media sits right above the footer.
const MEDIA_TOP_OFFSET: f64 = 4.0;

/// Content directly above the footer inside the bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FooterNeighbor {
    /// Text, a header, or nothing.
    #[default]
    Text,
    /// A photo, video, or other media item.
    Media,
}

/// How the footer sits inside its bubble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FooterPlacement {
    /// Bubble content insets; only left and right are used.
    pub bubble_insets: Sides,
    pub neighbor: FooterNeighbor,
}

impl Default for FooterPlacement {
    fn default() -> Self {
        Self {
            bubble_insets: Sides::new(6.0, 12.0, 6.0, 12.0),
            neighbor: FooterNeighbor::Text,
        }
    }
}

impl FooterPlacement {
    #[must_use]
    pub fn neighbor(mut self, neighbor: FooterNeighbor) -> Self {
        self.neighbor = neighbor;
        self
    }

    #[inline]
    pub fn top_offset(&self) -> f64 {
        match self.neighbor {
            FooterNeighbor::Media => MEDIA_TOP_OFFSET,
            FooterNeighbor::Text => 0.0,
        }
    }

    #[inline]
    fn horizontal(&self) -> f64 {
        self.bubble_insets.left + self.bubble_insets.right
    }

    /// Width the footer asks of its bubble.
    pub fn proposed_width(&self, prepared: &PreparedReactions) -> f64 {
        self.horizontal() + prepared.proposed_width()
    }

    /// Width left for the buttons inside a bubble of `bounding_width`.
    pub fn inner_width(&self, bounding_width: f64) -> f64 {
        (bounding_width - self.horizontal()).max(0.0)
    }
}

/// Measured footer, before the bubble settles its width.
#[derive(Debug, Clone)]
pub struct PreparedFooter {
    pub reactions: PreparedReactions,
    pub placement: FooterPlacement,
}

impl PreparedFooter {
    #[inline]
    pub fn proposed_width(&self) -> f64 {
        self.placement.proposed_width(&self.reactions)
    }
}

/// A laid-out footer.
#[derive(Debug, Clone, PartialEq)]
pub struct FooterLayout {
    /// Size the footer occupies in the bubble.
    pub size: Size,
    /// Where the button bar goes, in footer coordinates.
    pub bar_frame: Rect,
    pub bar: LayoutResult,
}

/// Wrap a bar layout in the footer's insets.
pub(crate) fn embed(placement: &FooterPlacement, bar: LayoutResult) -> FooterLayout {
    let top_offset = placement.top_offset();
    let size = Size::new(
        bar.size.width + placement.horizontal(),
        bar.size.height + top_offset + FOOTER_BOTTOM,
    );
    let bar_frame = Rect::new(
        placement.bubble_insets.left,
        top_offset - FOOTER_BOTTOM,
        bar.size.width,
        bar.size.height,
    );
    FooterLayout {
        size,
        bar_frame,
        bar,
    }
}
