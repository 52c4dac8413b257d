//! Publishes a controller to a subtree.

use std::sync::OnceLock;

use paneldom::Element;

use crate::context::BuildContext;
use crate::controller::ExpandableController;
use crate::error::{ExpandableError, Result};
use crate::widget::{Widget, WidgetRef, widget};

/// Makes one [`ExpandableController`] available to every widget built
/// beneath it.
///
/// Without an explicit controller the notifier creates its own on first
/// build, seeded from `initial_expanded`, and keeps it for as long as the
/// notifier itself lives.
///
/// # Example
///
/// ```ignore
/// let notifier = ExpandableNotifier::new(
///     Column::new()
///         .child(ExpandableButton::new(Element::text("Toggle")))
///         .child(Expandable::new().collapsed(summary).expanded(details)),
/// );
/// ```
pub struct ExpandableNotifier {
    child: WidgetRef,
    controller: Option<ExpandableController>,
    initial_expanded: bool,
    owned: OnceLock<ExpandableController>,
}

impl ExpandableNotifier {
    pub fn new(child: impl Widget + 'static) -> Self {
        Self::from_ref(widget(child))
    }

    pub fn from_ref(child: WidgetRef) -> Self {
        Self {
            child,
            controller: None,
            initial_expanded: false,
            owned: OnceLock::new(),
        }
    }

    /// Publish an existing controller instead of creating one.
    pub fn controller(mut self, controller: ExpandableController) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Initial state of the notifier's own controller.
    ///
    /// Only read when the controller is created; ignored when one is supplied.
    pub fn initial_expanded(mut self, expanded: bool) -> Self {
        self.initial_expanded = expanded;
        self
    }

    /// The controller this notifier publishes.
    pub fn current_controller(&self) -> ExpandableController {
        match &self.controller {
            Some(controller) => controller.clone(),
            None => self
                .owned
                .get_or_init(|| ExpandableController::new(self.initial_expanded))
                .clone(),
        }
    }

    /// Resolve the nearest enclosing controller.
    ///
    /// With `rebuild_on_change` the current build depends on the controller
    /// and reruns whenever it changes; otherwise this is a one-time read.
    pub fn of(cx: &mut BuildContext<'_>, rebuild_on_change: bool) -> Result<ExpandableController> {
        resolve(cx, "ExpandableNotifier::of", rebuild_on_change)
    }
}

impl Widget for ExpandableNotifier {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element> {
        let controller = self.current_controller();
        cx.provide(controller, |cx| self.child.build(cx))
    }
}

/// Resolve the nearest controller on behalf of `widget`.
pub(crate) fn resolve(
    cx: &mut BuildContext<'_>,
    widget: &'static str,
    rebuild_on_change: bool,
) -> Result<ExpandableController> {
    let controller = cx
        .nearest_provider()
        .cloned()
        .ok_or(ExpandableError::MissingProvider { widget })?;
    if rebuild_on_change {
        cx.depend_on(&controller);
    }
    Ok(controller)
}
