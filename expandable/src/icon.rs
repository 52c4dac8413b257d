//! Rotating chevron that reflects and toggles the nearest controller.

use std::sync::Arc;
use std::time::Duration;

use paneldom::{Easing, Edges, Element, Rgb, Style, TransitionConfig};

use crate::context::BuildContext;
use crate::error::Result;
use crate::notifier::resolve;
use crate::widget::Widget;

/// Rotation of the chevron when expanded, in degrees.
const EXPANDED_ANGLE: f32 = 180.0;

/// Chevron glyph for a rotation angle in degrees.
///
/// 0° points down (collapsed), 180° points up (expanded); the quarter turn
/// in between shows a sideways chevron while animating.
pub fn chevron_glyph(angle: f32) -> char {
    let angle = angle.clamp(0.0, EXPANDED_ANGLE);
    if angle < 45.0 {
        '▼'
    } else if angle < 135.0 {
        '▶'
    } else {
        '▲'
    }
}

/// Chevron toggle button.
///
/// Points down while collapsed and up while expanded, rotating between the
/// two when the controller changes. Tapping it toggles the controller.
#[derive(Debug, Clone)]
pub struct ExpandableIcon {
    color: Option<Rgb>,
    padding: Edges,
    rotation_duration: Option<Duration>,
}

impl Default for ExpandableIcon {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpandableIcon {
    pub fn new() -> Self {
        Self {
            color: None,
            padding: Edges::symmetric(0, 1),
            rotation_duration: None,
        }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn rotation_duration(mut self, duration: Duration) -> Self {
        self.rotation_duration = Some(duration);
        self
    }
}

impl Widget for ExpandableIcon {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element> {
        let controller = resolve(cx, "ExpandableIcon", true)?;
        let id = cx.element_id("icon");

        let duration = self
            .rotation_duration
            .unwrap_or(cx.theme().icon_rotation_duration);
        let color = self.color.or(cx.theme().icon_color);
        let target = if controller.expanded() {
            EXPANDED_ANGLE
        } else {
            0.0
        };
        let angle = cx.animate(
            &format!("{id}:rotation"),
            target,
            TransitionConfig::new(duration, Easing::EaseInOut),
        );

        cx.on_tap(&id, Arc::new(move || controller.toggle()));

        let mut style = Style::new();
        if let Some(color) = color {
            style = style.foreground(color);
        }

        Ok(Element::text(chevron_glyph(angle).to_string())
            .id(id)
            .padding(self.padding)
            .style(style)
            .clickable(true))
    }
}
