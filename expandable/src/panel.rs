//! Self-contained expandable panel: header, toggle icon and animated body.

use std::sync::{Arc, OnceLock, RwLock};

use paneldom::{Align, Element, Size};

use crate::button::ExpandableButton;
use crate::context::BuildContext;
use crate::controller::ExpandableController;
use crate::error::Result;
use crate::expandable::Expandable;
use crate::icon::ExpandableIcon;
use crate::notifier::ExpandableNotifier;
use crate::widget::{Column, Empty, Widget, WidgetRef, widget};

/// Composes (collapsed, expanded) content into the panel body.
pub type ExpandableBuilder = Arc<dyn Fn(WidgetRef, WidgetRef) -> WidgetRef + Send + Sync>;

/// Default body: an instant swap (cross-fade point 0) between the two sides.
pub fn default_builder() -> ExpandableBuilder {
    Arc::new(|collapsed, expanded| {
        widget(
            Expandable::new()
                .collapsed_ref(collapsed)
                .expanded_ref(expanded)
                .cross_fade_point(0.0),
        )
    })
}

/// Which side of the header the toggle icon sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconPlacement {
    Left,
    #[default]
    Right,
}

/// Vertical alignment of header content against the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

impl From<HeaderAlignment> for Align {
    fn from(alignment: HeaderAlignment) -> Self {
        match alignment {
            HeaderAlignment::Top => Align::Start,
            HeaderAlignment::Center => Align::Center,
            HeaderAlignment::Bottom => Align::End,
        }
    }
}

/// Options for an [`ExpandablePanel`].
#[derive(Clone)]
pub struct PanelConfig {
    pub header: Option<WidgetRef>,
    pub collapsed: Option<WidgetRef>,
    pub expanded: Option<WidgetRef>,
    /// Shared controller; when unset the panel owns one.
    pub controller: Option<ExpandableController>,
    /// Seeds the panel's own controller on first build, and only then.
    pub initial_expanded: bool,
    pub tap_header_to_expand: bool,
    pub tap_body_to_collapse: bool,
    pub has_icon: bool,
    pub icon_placement: IconPlacement,
    pub header_alignment: HeaderAlignment,
    pub builder: ExpandableBuilder,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            header: None,
            collapsed: None,
            expanded: None,
            controller: None,
            initial_expanded: false,
            tap_header_to_expand: true,
            tap_body_to_collapse: false,
            has_icon: true,
            icon_placement: IconPlacement::Right,
            header_alignment: HeaderAlignment::Top,
            builder: default_builder(),
        }
    }
}

impl PanelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, header: impl Widget + 'static) -> Self {
        self.header = Some(widget(header));
        self
    }

    pub fn collapsed(mut self, collapsed: impl Widget + 'static) -> Self {
        self.collapsed = Some(widget(collapsed));
        self
    }

    pub fn expanded(mut self, expanded: impl Widget + 'static) -> Self {
        self.expanded = Some(widget(expanded));
        self
    }

    pub fn controller(mut self, controller: ExpandableController) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn initial_expanded(mut self, expanded: bool) -> Self {
        self.initial_expanded = expanded;
        self
    }

    pub fn tap_header_to_expand(mut self, enabled: bool) -> Self {
        self.tap_header_to_expand = enabled;
        self
    }

    pub fn tap_body_to_collapse(mut self, enabled: bool) -> Self {
        self.tap_body_to_collapse = enabled;
        self
    }

    pub fn has_icon(mut self, has_icon: bool) -> Self {
        self.has_icon = has_icon;
        self
    }

    pub fn icon_placement(mut self, placement: IconPlacement) -> Self {
        self.icon_placement = placement;
        self
    }

    pub fn header_alignment(mut self, alignment: HeaderAlignment) -> Self {
        self.header_alignment = alignment;
        self
    }

    pub fn builder<F>(mut self, builder: F) -> Self
    where
        F: Fn(WidgetRef, WidgetRef) -> WidgetRef + Send + Sync + 'static,
    {
        self.builder = Arc::new(builder);
        self
    }
}

/// Header, optional toggle icon and an animated body in one widget.
///
/// The panel publishes its controller to everything inside it, so headers
/// and bodies may themselves contain [`ExpandableButton`]s or
/// [`Expandable`]s that follow the panel's state.
///
/// # Example
///
/// ```ignore
/// let panel = ExpandablePanel::new(
///     PanelConfig::new()
///         .header(Element::text("Details"))
///         .collapsed(Element::text("Three items"))
///         .expanded(details_list())
///         .tap_body_to_collapse(true),
/// );
/// ```
pub struct ExpandablePanel {
    config: RwLock<PanelConfig>,
    controller: OnceLock<ExpandableController>,
}

impl ExpandablePanel {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config: RwLock::new(config),
            controller: OnceLock::new(),
        }
    }

    /// Replace the configuration.
    ///
    /// The panel's own controller survives, so a new `initial_expanded` has
    /// no effect once the panel has been built.
    pub fn set_config(&self, config: PanelConfig) {
        match self.config.write() {
            Ok(mut guard) => *guard = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }

    pub fn config(&self) -> PanelConfig {
        self.config
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// The controller driving this panel: the configured one, else the
    /// panel's own.
    pub fn controller(&self) -> ExpandableController {
        let config = self.config();
        config.controller.unwrap_or_else(|| {
            self.controller
                .get_or_init(|| ExpandableController::new(config.initial_expanded))
                .clone()
        })
    }
}

impl Widget for ExpandablePanel {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element> {
        let controller = self.controller();
        let content = compose(&self.config());
        ExpandableNotifier::from_ref(content)
            .controller(controller)
            .build(cx)
    }
}

fn compose(config: &PanelConfig) -> WidgetRef {
    let collapsed = config.collapsed.clone().unwrap_or_else(|| widget(Empty));
    let expanded = config.expanded.clone().unwrap_or_else(|| widget(Empty));
    let body = (config.builder)(collapsed, wrap_body(config, expanded));

    match &config.header {
        Some(header) => widget(
            Column::new()
                .align(Align::Start)
                .child_ref(wrap_header(config, header.clone()))
                .child_ref(body),
        ),
        None => wrap_header(config, body),
    }
}

fn wrap_header(config: &PanelConfig, child: WidgetRef) -> WidgetRef {
    let row = if config.has_icon {
        widget(HeaderRow {
            child,
            placement: config.icon_placement,
            alignment: config.header_alignment,
        })
    } else {
        child
    };

    if config.tap_header_to_expand {
        widget(ExpandableButton::from_ref(row))
    } else {
        row
    }
}

fn wrap_body(config: &PanelConfig, child: WidgetRef) -> WidgetRef {
    if config.tap_body_to_collapse {
        widget(ExpandableButton::from_ref(child))
    } else {
        child
    }
}

/// Header content stretched beside an [`ExpandableIcon`].
struct HeaderRow {
    child: WidgetRef,
    placement: IconPlacement,
    alignment: HeaderAlignment,
}

impl Widget for HeaderRow {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element> {
        let id = cx.element_id("header-row");
        let content = cx
            .keyed("content", |cx| self.child.build(cx))?
            .width(Size::Fill);
        let icon = cx.keyed("icon", |cx| ExpandableIcon::new().build(cx))?;

        let children = match self.placement {
            IconPlacement::Right => [content, icon],
            IconPlacement::Left => [icon, content],
        };

        Ok(Element::row()
            .id(id)
            .width(Size::Fill)
            .align(self.alignment.into())
            .children(children))
    }
}
