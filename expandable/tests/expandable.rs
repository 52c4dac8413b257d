use std::time::{Duration, Instant};

use expandable::{
    CrossFadeTiming, Expandable, ExpandableController, ExpandableError, ExpandableTheme,
    FadeInterval, Surface,
};
use paneldom::element::{collect_text, find_element};
use paneldom::{Content, Easing, Element, Rgb, Size};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn fading(controller: &ExpandableController) -> Expandable {
    Expandable::new()
        .controller(controller.clone())
        .collapsed(Element::text("A").id("a"))
        .expanded(Element::text("B\nB").id("b"))
        .animation_duration(ms(100))
        .cross_fade_point(0.5)
        .fade_curve(Easing::Linear)
        .size_curve(Easing::Linear)
}

// =============================================================================
// Fade Interval Tests
// =============================================================================

#[test]
fn test_fade_interval_derivation() {
    let cases = [
        (0.0, 0.0, 0.0),
        (0.25, 0.0, 0.5),
        (0.5, 0.0, 1.0),
        (0.75, 0.5, 1.0),
        (1.0, 1.0, 1.0),
    ];
    for (point, start, end) in cases {
        assert_eq!(
            FadeInterval::from_cross_fade_point(point),
            Ok(FadeInterval { start, end }),
            "point {point}"
        );
    }
}

#[test]
fn test_both_sides_share_the_interval() {
    let timing = CrossFadeTiming::from_cross_fade_point(0.3).unwrap();
    assert_eq!(timing.collapsed, timing.expanded);
}

#[test]
fn test_invalid_cross_fade_points_are_rejected() {
    for point in [-0.1, 1.5] {
        assert_eq!(
            FadeInterval::from_cross_fade_point(point),
            Err(ExpandableError::InvalidCrossFadePoint(point))
        );
    }
    assert!(matches!(
        FadeInterval::from_cross_fade_point(f32::NAN),
        Err(ExpandableError::InvalidCrossFadePoint(_))
    ));
}

#[test]
fn test_late_cross_fade_holds_both_sides_opaque_early() {
    // Point 1.0 fades both sides at the very end.
    let timing = CrossFadeTiming::from_cross_fade_point(1.0).unwrap();
    assert_eq!(timing.opacities(Easing::Linear, 0.5), (1.0, 0.0));
    assert_eq!(timing.opacities(Easing::Linear, 1.0), (0.0, 1.0));
}

// =============================================================================
// Transition Tests
// =============================================================================

#[test]
fn test_settled_state_shows_only_active_side() {
    let controller = ExpandableController::new(false);
    let mut surface = Surface::new(fading(&controller));

    let buf = surface.frame(10, 3, Instant::now()).unwrap();
    let root = surface.element().unwrap();

    assert_eq!(root.id, "root/expandable");
    assert!(find_element(root, "a").is_some());
    assert!(find_element(root, "b").is_none());
    assert_eq!(collect_text(root), vec!["A".to_string()]);
    assert_eq!(buf.to_text(), "A\n\n");
}

#[test]
fn test_cross_fade_blends_sides_and_eases_height() {
    let controller = ExpandableController::new(false);
    let mut surface = Surface::new(fading(&controller));
    let t0 = Instant::now();
    surface.frame(10, 3, t0).unwrap();

    controller.expand();
    surface.frame(10, 3, t0).unwrap();
    {
        let root = surface.element().unwrap();
        assert!(matches!(root.content, Content::Layers(_)));
        assert!(root.clip);
        assert_eq!(root.height, Size::Fixed(1));

        let a = find_element(root, "a").unwrap();
        let b = find_element(root, "b").unwrap();
        assert_eq!(a.opacity, 1.0);
        assert_eq!(b.opacity, 0.0);
        assert!(a.inert, "outgoing side is not interactive");
        assert!(!b.inert);
    }

    let buf = surface.frame(10, 3, t0 + ms(50)).unwrap();
    {
        let root = surface.element().unwrap();
        assert_eq!(root.height, Size::Fixed(2)); // 1.5 rounds up
        let a = find_element(root, "a").unwrap();
        let b = find_element(root, "b").unwrap();
        assert!((a.opacity - 0.5).abs() < 1e-6);
        assert!((b.opacity - 0.5).abs() < 1e-6);
    }
    let cell = buf.get(0, 0).unwrap();
    assert_eq!(cell.char, 'B');
    assert!(cell.fg != Rgb::WHITE && cell.fg != Rgb::BLACK);

    let buf = surface.frame(10, 3, t0 + ms(100)).unwrap();
    let root = surface.element().unwrap();
    assert!(matches!(root.content, Content::Children(_)));
    assert!(find_element(root, "a").is_none());
    assert_eq!(buf.to_text(), "B\nB\n");
    assert!(!surface.needs_rebuild());
}

#[test]
fn test_reversal_mid_flight_starts_from_current_progress() {
    let controller = ExpandableController::new(false);
    let mut surface = Surface::new(fading(&controller));
    let t0 = Instant::now();
    surface.frame(10, 3, t0).unwrap();

    controller.expand();
    surface.frame(10, 3, t0).unwrap();
    surface.frame(10, 3, t0 + ms(60)).unwrap();

    controller.collapse();
    surface.frame(10, 3, t0 + ms(60)).unwrap();
    let root = surface.element().unwrap();
    let b = find_element(root, "b").unwrap();
    assert!((b.opacity - 0.6).abs() < 1e-3);
    assert!(b.inert, "expanded side is now outgoing");
}

#[test]
fn test_reversal_takes_only_the_distance_already_covered() {
    let controller = ExpandableController::new(false);
    let mut surface = Surface::new(fading(&controller));
    let t0 = Instant::now();
    surface.frame(10, 3, t0).unwrap();

    controller.expand();
    surface.frame(10, 3, t0).unwrap();
    surface.frame(10, 3, t0 + ms(60)).unwrap();

    // 60% of the way out, so the way back takes 60ms.
    controller.collapse();
    surface.frame(10, 3, t0 + ms(60)).unwrap();
    surface.frame(10, 3, t0 + ms(100)).unwrap();
    assert!(matches!(
        surface.element().unwrap().content,
        Content::Layers(_)
    ));

    let buf = surface.frame(10, 3, t0 + ms(125)).unwrap();
    assert!(matches!(
        surface.element().unwrap().content,
        Content::Children(_)
    ));
    assert_eq!(buf.to_text(), "A

");
}

#[test]
fn test_reduced_motion_swaps_immediately() {
    let controller = ExpandableController::new(false);
    let mut surface = Surface::new(fading(&controller));
    surface.set_reduced_motion(true);
    let t0 = Instant::now();
    surface.frame(10, 3, t0).unwrap();

    controller.expand();
    let buf = surface.frame(10, 3, t0).unwrap();

    assert_eq!(buf.to_text(), "B\nB\n");
    assert!(!surface.needs_rebuild());
}

#[test]
fn test_theme_supplies_unset_options() {
    let controller = ExpandableController::new(false);
    let expandable = Expandable::new()
        .controller(controller.clone())
        .collapsed(Element::text("A").id("a"))
        .expanded(Element::text("B").id("b"));
    let theme = ExpandableTheme::new()
        .animation_duration(ms(40))
        .cross_fade_point(0.0);
    let mut surface = Surface::new(expandable).with_theme(theme);
    let t0 = Instant::now();
    surface.frame(10, 1, t0).unwrap();

    controller.expand();
    surface.frame(10, 1, t0 + ms(1)).unwrap();
    let buf = surface.frame(10, 1, t0 + ms(20)).unwrap();
    assert_eq!(buf.row_text(0), "B");

    surface.frame(10, 1, t0 + ms(60)).unwrap();
    assert!(!surface.needs_rebuild());
}

#[test]
fn test_missing_sides_render_empty() {
    let controller = ExpandableController::new(true);
    let mut surface = Surface::new(
        Expandable::new()
            .controller(controller)
            .collapsed(Element::text("only collapsed")),
    );

    let buf = surface.frame(20, 2, Instant::now()).unwrap();

    assert_eq!(buf.to_text(), "\n");
    assert!(find_element(surface.element().unwrap(), "root/expanded/empty").is_some());
}

#[test]
fn test_invalid_cross_fade_point_fails_build() {
    let controller = ExpandableController::new(false);
    let mut surface = Surface::new(
        Expandable::new()
            .controller(controller)
            .cross_fade_point(1.5),
    );

    assert_eq!(
        surface.frame(10, 1, Instant::now()).unwrap_err(),
        ExpandableError::InvalidCrossFadePoint(1.5)
    );
}

#[test]
fn test_explicit_controller_schedules_rebuild() {
    let controller = ExpandableController::new(false);
    let mut surface = Surface::new(fading(&controller));
    surface.frame(10, 3, Instant::now()).unwrap();
    assert!(!surface.needs_rebuild());

    controller.toggle();

    assert!(surface.needs_rebuild());
}
