//! Defaults for options a widget leaves unset.

use std::time::Duration;

use paneldom::{Easing, Rgb};

/// Default animation timing and appearance for expandable widgets.
///
/// Installed on a [`Surface`](crate::Surface) and read by widgets through
/// [`BuildContext::theme`](crate::BuildContext::theme). Options set on a
/// widget always take precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandableTheme {
    /// Duration of the cross-fade and size animation.
    pub animation_duration: Duration,
    /// Where in the timeline the two sides blend; see [`FadeInterval`](crate::FadeInterval).
    pub cross_fade_point: f32,
    /// Easing applied within each side's fade interval.
    pub fade_curve: Easing,
    /// Easing applied to the height animation.
    pub size_curve: Easing,
    /// Duration of the icon's rotation.
    pub icon_rotation_duration: Duration,
    /// Icon glyph color; `None` inherits the default foreground.
    pub icon_color: Option<Rgb>,
}

impl ExpandableTheme {
    pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);
    pub const DEFAULT_ICON_ROTATION_DURATION: Duration = Duration::from_millis(150);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    pub fn cross_fade_point(mut self, point: f32) -> Self {
        self.cross_fade_point = point;
        self
    }

    pub fn fade_curve(mut self, easing: Easing) -> Self {
        self.fade_curve = easing;
        self
    }

    pub fn size_curve(mut self, easing: Easing) -> Self {
        self.size_curve = easing;
        self
    }

    pub fn icon_rotation_duration(mut self, duration: Duration) -> Self {
        self.icon_rotation_duration = duration;
        self
    }

    pub fn icon_color(mut self, color: Rgb) -> Self {
        self.icon_color = Some(color);
        self
    }
}

impl Default for ExpandableTheme {
    fn default() -> Self {
        Self {
            animation_duration: Self::DEFAULT_ANIMATION_DURATION,
            cross_fade_point: 0.5,
            fade_curve: Easing::Linear,
            size_curve: Easing::FastOutSlowIn,
            icon_rotation_duration: Self::DEFAULT_ICON_ROTATION_DURATION,
            icon_color: None,
        }
    }
}
