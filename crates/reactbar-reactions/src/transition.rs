//! Animation descriptors handed to the renderer.
//!
//! The engine never runs animations itself. It decides which properties
//! move and for how long, and the renderer plays them on its own timeline.

use std::time::Duration;

/// Timing curve of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Curve {
    #[default]
    EaseInOut,
    Spring,
}

/// How an update is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpdateAnimation {
    /// Jump to the new state.
    #[default]
    Immediate,
    /// Animate frame changes with the host's list transition.
    Animated { duration: Duration, curve: Curve },
}

impl UpdateAnimation {
    pub const fn animated(duration: Duration, curve: Curve) -> Self {
        Self::Animated { duration, curve }
    }

    #[inline]
    pub const fn is_animated(self) -> bool {
        matches!(self, Self::Animated { .. })
    }
}

/// A scalar property animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyAnimation {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub curve: Curve,
    /// Keep the final value after completion. Set on disappearing content so
    /// it does not snap back before it is detached.
    pub hold_final_value: bool,
}

impl PropertyAnimation {
    pub const fn new(from: f64, to: f64, duration: Duration, curve: Curve) -> Self {
        Self {
            from,
            to,
            duration,
            curve,
            hold_final_value: false,
        }
    }

    #[must_use]
    pub const fn holding(mut self) -> Self {
        self.hold_final_value = true;
        self
    }
}

/// Scale the appear and disappear animations start from or end at.
pub const COLLAPSED_SCALE: f64 = 0.01;

const APPEAR_SCALE_DURATION: Duration = Duration::from_millis(400);
const APPEAR_ALPHA_DURATION: Duration = Duration::from_millis(200);
const DISAPPEAR_DURATION: Duration = Duration::from_millis(200);

/// Everything that moves when content changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transition {
    pub scale: Option<PropertyAnimation>,
    pub alpha: Option<PropertyAnimation>,
    /// Animate from the current frame to the new one.
    pub frame: Option<(Duration, Curve)>,
}

impl Transition {
    /// No animation; apply the final state directly.
    pub const IMMEDIATE: Self = Self {
        scale: None,
        alpha: None,
        frame: None,
    };

    /// Transition for content appearing under `animation`.
    ///
    /// Scales up with a spring over 0.4s while fading in over 0.2s.
    pub fn appear(animation: UpdateAnimation) -> Self {
        if !animation.is_animated() {
            return Self::IMMEDIATE;
        }
        Self {
            scale: Some(PropertyAnimation::new(
                COLLAPSED_SCALE,
                1.0,
                APPEAR_SCALE_DURATION,
                Curve::Spring,
            )),
            alpha: Some(PropertyAnimation::new(
                0.0,
                1.0,
                APPEAR_ALPHA_DURATION,
                Curve::EaseInOut,
            )),
            frame: None,
        }
    }

    /// Transition for content disappearing under `animation`.
    ///
    /// Scale and alpha both collapse over 0.2s and hold their final value;
    /// the renderer detaches the content when they complete.
    pub fn disappear(animation: UpdateAnimation) -> Self {
        if !animation.is_animated() {
            return Self::IMMEDIATE;
        }
        Self {
            scale: Some(
                PropertyAnimation::new(1.0, COLLAPSED_SCALE, DISAPPEAR_DURATION, Curve::EaseInOut)
                    .holding(),
            ),
            alpha: Some(
                PropertyAnimation::new(1.0, 0.0, DISAPPEAR_DURATION, Curve::EaseInOut).holding(),
            ),
            frame: None,
        }
    }

    /// Transition for content that stays and moves.
    pub fn update(animation: UpdateAnimation) -> Self {
        match animation {
            UpdateAnimation::Immediate => Self::IMMEDIATE,
            UpdateAnimation::Animated { duration, curve } => Self {
                frame: Some((duration, curve)),
                ..Self::IMMEDIATE
            },
        }
    }

    /// Scale change driven by the host's animation, used when the whole bar
    /// enters or leaves.
    pub fn scale_with(animation: UpdateAnimation, from: f64, to: f64) -> Self {
        match animation {
            UpdateAnimation::Immediate => Self {
                scale: Some(PropertyAnimation::new(to, to, Duration::ZERO, Curve::EaseInOut)),
                ..Self::IMMEDIATE
            },
            UpdateAnimation::Animated { duration, curve } => Self {
                scale: Some(PropertyAnimation::new(from, to, duration, curve)),
                ..Self::IMMEDIATE
            },
        }
    }

    #[inline]
    pub fn is_immediate(&self) -> bool {
        *self == Self::IMMEDIATE
    }
}
