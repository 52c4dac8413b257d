//! Expandable and collapsible panels for `paneldom` terminal UIs.
//!
//! An [`ExpandableController`] holds the expanded/collapsed state. An
//! [`ExpandableNotifier`] publishes a controller to the widgets built beneath
//! it, where [`Expandable`] cross-fades between two children,
//! [`ExpandableButton`] and [`ExpandableIcon`] toggle it, and
//! [`ExpandablePanel`] bundles all of them behind one configuration.
//! A [`Surface`] rebuilds the tree whenever a controller it depends on
//! changes and drives the animations in between.
//!
//! ```ignore
//! use expandable::prelude::*;
//!
//! let panel = ExpandablePanel::new(
//!     PanelConfig::new()
//!         .header(Element::text("Release notes"))
//!         .collapsed(Element::text("3 changes"))
//!         .expanded(Element::text("- faster\n- smaller\n- nicer")),
//! );
//! let mut surface = Surface::new(panel);
//! let buf = surface.frame(40, 10, Instant::now())?;
//! ```

pub mod button;
pub mod context;
pub mod controller;
pub mod error;
pub mod expandable;
pub mod icon;
pub mod notifier;
pub mod panel;
pub mod surface;
pub mod theme;
pub mod widget;

pub use button::ExpandableButton;
pub use context::{BuildContext, BuildOutput, TapHandler, TapRegistry};
pub use controller::{ControllerId, ExpandableController, ListenerId};
pub use error::{ExpandableError, Result};
pub use expandable::{CrossFadeTiming, Expandable, FadeInterval};
pub use icon::{ExpandableIcon, chevron_glyph};
pub use notifier::ExpandableNotifier;
pub use panel::{
    ExpandableBuilder, ExpandablePanel, HeaderAlignment, IconPlacement, PanelConfig,
    default_builder,
};
pub use surface::Surface;
pub use theme::ExpandableTheme;
pub use widget::{Column, Empty, Row, Widget, WidgetRef, widget};

pub mod prelude {
    pub use crate::{
        Column, Expandable, ExpandableButton, ExpandableController, ExpandableError,
        ExpandableIcon, ExpandableNotifier, ExpandablePanel, ExpandableTheme, HeaderAlignment,
        IconPlacement, PanelConfig, Row, Surface, Widget, WidgetRef, widget,
    };

    pub use paneldom::{Easing, Edges, Element, Rgb, Style};
}
