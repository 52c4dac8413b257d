//! Tap target that toggles the nearest controller.

use std::sync::Arc;

use paneldom::Element;

use crate::context::BuildContext;
use crate::error::Result;
use crate::notifier::resolve;
use crate::widget::{Widget, WidgetRef, widget};

/// Wraps a child so that tapping it toggles the nearest controller.
///
/// Adds nothing visible; the wrapper takes on the child's width so a
/// full-width child stays full width.
#[derive(Clone)]
pub struct ExpandableButton {
    child: WidgetRef,
}

impl ExpandableButton {
    pub fn new(child: impl Widget + 'static) -> Self {
        Self::from_ref(widget(child))
    }

    pub fn from_ref(child: WidgetRef) -> Self {
        Self { child }
    }
}

impl Widget for ExpandableButton {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element> {
        let controller = resolve(cx, "ExpandableButton", true)?;
        let id = cx.element_id("button");
        let child = cx.keyed("button", |cx| self.child.build(cx))?;

        cx.on_tap(&id, Arc::new(move || controller.toggle()));

        Ok(Element::col()
            .id(id)
            .width(child.width)
            .clickable(true)
            .child(child))
    }
}
