use std::sync::{Arc, Mutex};
use std::time::Instant;

use expandable::{
    BuildContext, Column, Expandable, ExpandableButton, ExpandableController, ExpandableError,
    ExpandableIcon, ExpandableNotifier, ExpandableTheme, Surface, Widget,
};
use paneldom::{AnimationState, Element};

/// Records which controller `ExpandableNotifier::of` resolved to.
#[derive(Clone)]
struct Lookup {
    seen: Arc<Mutex<Option<ExpandableController>>>,
    rebuild_on_change: bool,
}

impl Lookup {
    fn new(rebuild_on_change: bool) -> Self {
        Self {
            seen: Arc::new(Mutex::new(None)),
            rebuild_on_change,
        }
    }

    fn seen(&self) -> Option<ExpandableController> {
        self.seen.lock().unwrap().clone()
    }
}

impl Widget for Lookup {
    fn build(&self, cx: &mut BuildContext<'_>) -> expandable::Result<Element> {
        let controller = ExpandableNotifier::of(cx, self.rebuild_on_change)?;
        let label = if controller.expanded() { "open" } else { "closed" };
        *self.seen.lock().unwrap() = Some(controller);
        Ok(Element::text(label))
    }
}

// =============================================================================
// Resolution Tests
// =============================================================================

#[test]
fn test_nearest_provider_wins() {
    let outer = ExpandableController::new(false);
    let inner = ExpandableController::new(true);
    let lookup = Lookup::new(true);

    let tree = ExpandableNotifier::new(
        ExpandableNotifier::new(lookup.clone()).controller(inner.clone()),
    )
    .controller(outer.clone());

    let theme = ExpandableTheme::default();
    let mut animations = AnimationState::new();
    let mut cx = BuildContext::new(&theme, &mut animations, Instant::now());
    tree.build(&mut cx).unwrap();
    let output = cx.finish();

    assert!(lookup.seen().unwrap().ptr_eq(&inner));
    assert_eq!(output.dependencies.len(), 1);
    assert!(output.dependencies[0].ptr_eq(&inner));
}

#[test]
fn test_provider_scope_ends_after_child() {
    let controller = ExpandableController::new(false);
    let theme = ExpandableTheme::default();
    let mut animations = AnimationState::new();
    let mut cx = BuildContext::new(&theme, &mut animations, Instant::now());

    ExpandableNotifier::new(Element::text("inside"))
        .controller(controller)
        .build(&mut cx)
        .unwrap();

    assert!(cx.nearest_provider().is_none());
}

#[test]
fn test_missing_provider_is_an_error() {
    let theme = ExpandableTheme::default();
    let mut animations = AnimationState::new();
    let mut cx = BuildContext::new(&theme, &mut animations, Instant::now());

    assert_eq!(
        Lookup::new(true).build(&mut cx).unwrap_err(),
        ExpandableError::MissingProvider {
            widget: "ExpandableNotifier::of"
        }
    );
    assert_eq!(
        ExpandableIcon::new().build(&mut cx).unwrap_err(),
        ExpandableError::MissingProvider {
            widget: "ExpandableIcon"
        }
    );
    assert_eq!(
        ExpandableButton::new(Element::text("x"))
            .build(&mut cx)
            .unwrap_err(),
        ExpandableError::MissingProvider {
            widget: "ExpandableButton"
        }
    );
    assert!(matches!(
        Expandable::new().build(&mut cx),
        Err(ExpandableError::MissingProvider { .. })
    ));
}

#[test]
fn test_missing_provider_fails_the_frame() {
    let mut surface = Surface::new(Column::new().child(ExpandableIcon::new()));

    let result = surface.frame(10, 2, Instant::now());

    assert!(matches!(
        result,
        Err(ExpandableError::MissingProvider {
            widget: "ExpandableIcon"
        })
    ));
}

// =============================================================================
// Owned Controller Tests
// =============================================================================

#[test]
fn test_owned_controller_is_seeded_once() {
    let notifier = ExpandableNotifier::new(Element::text("x")).initial_expanded(true);

    let first = notifier.current_controller();
    assert!(first.expanded());

    first.collapse();
    let second = notifier.current_controller();
    assert!(second.ptr_eq(&first));
    assert!(!second.expanded());
}

#[test]
fn test_supplied_controller_ignores_initial_expanded() {
    let controller = ExpandableController::new(false);
    let notifier = ExpandableNotifier::new(Element::text("x"))
        .controller(controller.clone())
        .initial_expanded(true);

    assert!(notifier.current_controller().ptr_eq(&controller));
    assert!(!notifier.current_controller().expanded());
}

// =============================================================================
// Rebuild Subscription Tests
// =============================================================================

#[test]
fn test_subscribed_lookup_schedules_rebuild() {
    let controller = ExpandableController::new(false);
    let lookup = Lookup::new(true);
    let mut surface =
        Surface::new(ExpandableNotifier::new(lookup.clone()).controller(controller.clone()));
    let now = Instant::now();

    let buf = surface.frame(10, 1, now).unwrap();
    assert_eq!(buf.row_text(0), "closed");
    assert!(!surface.needs_rebuild());

    controller.toggle();
    assert!(surface.needs_rebuild());

    let buf = surface.frame(10, 1, now).unwrap();
    assert_eq!(buf.row_text(0), "open");
}

#[test]
fn test_read_once_lookup_does_not_schedule_rebuild() {
    let controller = ExpandableController::new(false);
    let lookup = Lookup::new(false);
    let mut surface =
        Surface::new(ExpandableNotifier::new(lookup.clone()).controller(controller.clone()));
    let now = Instant::now();

    surface.frame(10, 1, now).unwrap();
    assert_eq!(controller.listener_count(), 0);

    controller.toggle();

    assert!(!surface.needs_rebuild());
    assert_eq!(surface.frame(10, 1, now).unwrap().row_text(0), "closed");
}

#[test]
fn test_dropping_surface_unsubscribes() {
    let controller = ExpandableController::new(false);
    let mut surface = Surface::new(
        ExpandableNotifier::new(Lookup::new(true)).controller(controller.clone()),
    );
    surface.frame(10, 1, Instant::now()).unwrap();
    assert_eq!(controller.listener_count(), 1);

    drop(surface);

    assert_eq!(controller.listener_count(), 0);
}
