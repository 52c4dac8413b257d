//! Cross-fading body that switches between collapsed and expanded content.

use std::time::Duration;

use paneldom::layout::intrinsic_size;
use paneldom::{Easing, Element, Interval, Size, TransitionConfig};

use crate::context::BuildContext;
use crate::controller::ExpandableController;
use crate::error::{ExpandableError, Result};
use crate::notifier::resolve;
use crate::widget::{Empty, Widget, WidgetRef, widget};

/// Portion of the timeline over which one side fades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeInterval {
    pub start: f32,
    pub end: f32,
}

impl FadeInterval {
    /// Derive the fade window from a cross-fade point in `[0, 1]`.
    ///
    /// Points below 0.5 fade over `[0, 2p]`, the rest over `[2p - 1, 1]`;
    /// both rules give `[0, 1]` at exactly 0.5. NaN and out-of-range points
    /// are rejected.
    pub fn from_cross_fade_point(point: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&point) {
            return Err(ExpandableError::InvalidCrossFadePoint(point));
        }
        Ok(if point < 0.5 {
            Self {
                start: 0.0,
                end: 2.0 * point,
            }
        } else {
            Self {
                start: 2.0 * point - 1.0,
                end: 1.0,
            }
        })
    }

    pub fn with_easing(self, easing: Easing) -> Interval {
        Interval::new(self.start, self.end, easing)
    }
}

/// Fade windows for both sides of a cross-fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossFadeTiming {
    pub collapsed: FadeInterval,
    pub expanded: FadeInterval,
}

impl CrossFadeTiming {
    /// Both sides share the same window derived from `point`.
    pub fn from_cross_fade_point(point: f32) -> Result<Self> {
        let interval = FadeInterval::from_cross_fade_point(point)?;
        Ok(Self {
            collapsed: interval,
            expanded: interval,
        })
    }

    /// Opacities of the (collapsed, expanded) sides at linear progress `t`,
    /// where 0 is fully collapsed and 1 fully expanded.
    pub fn opacities(&self, fade_curve: Easing, t: f32) -> (f32, f32) {
        let collapsed = 1.0 - self.collapsed.with_easing(fade_curve).apply(t);
        let expanded = self.expanded.with_easing(fade_curve).apply(t);
        (collapsed, expanded)
    }
}

/// Shows the collapsed or the expanded child depending on a controller.
///
/// On a state change both children are stacked while the outgoing one fades
/// out and the incoming one fades in, each within its own window of the
/// timeline, and the height eases between the two children's heights.
/// Missing children render as empty content.
///
/// The controller comes from [`Expandable::controller`] or, if unset, from
/// the nearest [`ExpandableNotifier`](crate::ExpandableNotifier).
#[derive(Clone, Default)]
pub struct Expandable {
    collapsed: Option<WidgetRef>,
    expanded: Option<WidgetRef>,
    controller: Option<ExpandableController>,
    animation_duration: Option<Duration>,
    cross_fade_point: Option<f32>,
    fade_curve: Option<Easing>,
    size_curve: Option<Easing>,
}

impl Expandable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collapsed(mut self, collapsed: impl Widget + 'static) -> Self {
        self.collapsed = Some(widget(collapsed));
        self
    }

    pub fn collapsed_ref(mut self, collapsed: WidgetRef) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    pub fn expanded(mut self, expanded: impl Widget + 'static) -> Self {
        self.expanded = Some(widget(expanded));
        self
    }

    pub fn expanded_ref(mut self, expanded: WidgetRef) -> Self {
        self.expanded = Some(expanded);
        self
    }

    pub fn controller(mut self, controller: ExpandableController) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = Some(duration);
        self
    }

    pub fn cross_fade_point(mut self, point: f32) -> Self {
        self.cross_fade_point = Some(point);
        self
    }

    pub fn fade_curve(mut self, easing: Easing) -> Self {
        self.fade_curve = Some(easing);
        self
    }

    pub fn size_curve(mut self, easing: Easing) -> Self {
        self.size_curve = Some(easing);
        self
    }
}

impl Widget for Expandable {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element> {
        let controller = match &self.controller {
            Some(controller) => {
                cx.depend_on(controller);
                controller.clone()
            }
            None => resolve(cx, "Expandable", true)?,
        };

        let theme = cx.theme();
        let duration = self.animation_duration.unwrap_or(theme.animation_duration);
        let fade_curve = self.fade_curve.unwrap_or(theme.fade_curve);
        let size_curve = self.size_curve.unwrap_or(theme.size_curve);
        let timing = CrossFadeTiming::from_cross_fade_point(
            self.cross_fade_point.unwrap_or(theme.cross_fade_point),
        )?;

        let id = cx.element_id("expandable");
        let fade_key = format!("{id}:fade");
        let size_key = format!("{id}:size");
        let expanded = controller.expanded();

        let collapsed = cx.keyed("collapsed", |cx| build_side(&self.collapsed, cx))?;
        let expanded_child = cx.keyed("expanded", |cx| build_side(&self.expanded, cx))?;

        let progress = cx.animate(
            &fade_key,
            if expanded { 1.0 } else { 0.0 },
            TransitionConfig::new(duration, Easing::Linear),
        );
        let target_height = if expanded {
            intrinsic_size(&expanded_child).1
        } else {
            intrinsic_size(&collapsed).1
        };
        let height = cx.animate(
            &size_key,
            target_height as f32,
            TransitionConfig::new(duration, size_curve),
        );

        if !cx.is_animating(&fade_key) && !cx.is_animating(&size_key) {
            let active = if expanded { expanded_child } else { collapsed };
            return Ok(Element::col().id(id).child(active));
        }

        let (collapsed_opacity, expanded_opacity) = timing.opacities(fade_curve, progress);
        Ok(Element::layers([
            fade(collapsed, collapsed_opacity).inert(expanded),
            fade(expanded_child, expanded_opacity).inert(!expanded),
        ])
        .id(id)
        .height(Size::Fixed(height.round().max(0.0) as u16))
        .clip(true))
    }
}

fn build_side(side: &Option<WidgetRef>, cx: &mut BuildContext<'_>) -> Result<Element> {
    match side {
        Some(child) => child.build(cx),
        None => Empty.build(cx),
    }
}

fn fade(element: Element, amount: f32) -> Element {
    let opacity = element.opacity * amount;
    element.opacity(opacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacities_swap_instantly_at_point_zero() {
        let timing = CrossFadeTiming::from_cross_fade_point(0.0).unwrap();
        assert_eq!(timing.opacities(Easing::Linear, 0.0), (1.0, 0.0));
        assert_eq!(timing.opacities(Easing::Linear, 0.01), (0.0, 1.0));
        assert_eq!(timing.opacities(Easing::Linear, 1.0), (0.0, 1.0));
    }

    #[test]
    fn opacities_blend_evenly_at_midpoint() {
        let timing = CrossFadeTiming::from_cross_fade_point(0.5).unwrap();
        let (collapsed, expanded) = timing.opacities(Easing::Linear, 0.25);
        assert!((collapsed - 0.75).abs() < 1e-6);
        assert!((expanded - 0.25).abs() < 1e-6);
    }
}
