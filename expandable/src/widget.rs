//! The widget trait and basic composition widgets.

use std::sync::Arc;

use paneldom::{Align, Content, Element, Size};

use crate::context::BuildContext;
use crate::error::Result;

/// Something that turns into an element tree for the current frame.
///
/// Builds run on every rebuild, so implementations read their state fresh
/// from the context each time instead of caching elements.
pub trait Widget: Send + Sync {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element>;
}

/// Shared, type-erased widget.
pub type WidgetRef = Arc<dyn Widget>;

/// Box a widget into a [`WidgetRef`].
pub fn widget(w: impl Widget + 'static) -> WidgetRef {
    Arc::new(w)
}

/// A plain element builds into a copy of itself.
///
/// Ids are unique within one build: when the same element is placed twice,
/// the later copy's ids are moved under the current key path.
impl Widget for Element {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element> {
        let mut element = self.clone();
        claim_ids(&mut element, cx);
        Ok(element)
    }
}

fn claim_ids(element: &mut Element, cx: &mut BuildContext<'_>) {
    if !cx.claim_element_id(&element.id) {
        element.id = cx.element_id(&element.id);
        cx.claim_element_id(&element.id);
    }
    if let Content::Children(children) | Content::Layers(children) = &mut element.content {
        for child in children {
            claim_ids(child, cx);
        }
    }
}

impl<W: Widget + ?Sized> Widget for Arc<W> {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element> {
        (**self).build(cx)
    }
}

/// Renders nothing. Stands in for absent content.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl Widget for Empty {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element> {
        Ok(Element::box_().id(cx.element_id("empty")))
    }
}

/// Vertical stack of child widgets.
#[derive(Clone)]
pub struct Column {
    children: Vec<WidgetRef>,
    gap: u16,
    align: Align,
    width: Size,
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Column {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            gap: 0,
            align: Align::Start,
            width: Size::Fill,
        }
    }

    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.children.push(widget(child));
        self
    }

    pub fn child_ref(mut self, child: WidgetRef) -> Self {
        self.children.push(child);
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }
}

impl Widget for Column {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element> {
        let id = cx.element_id("column");
        let children = build_children(&self.children, cx)?;
        Ok(Element::col()
            .id(id)
            .gap(self.gap)
            .align(self.align)
            .width(self.width)
            .children(children))
    }
}

/// Horizontal run of child widgets.
#[derive(Clone)]
pub struct Row {
    children: Vec<WidgetRef>,
    gap: u16,
    align: Align,
    width: Size,
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Row {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            gap: 0,
            align: Align::Start,
            width: Size::Fill,
        }
    }

    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.children.push(widget(child));
        self
    }

    pub fn child_ref(mut self, child: WidgetRef) -> Self {
        self.children.push(child);
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }
}

impl Widget for Row {
    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Element> {
        let id = cx.element_id("row");
        let children = build_children(&self.children, cx)?;
        Ok(Element::row()
            .id(id)
            .gap(self.gap)
            .align(self.align)
            .width(self.width)
            .children(children))
    }
}

fn build_children(children: &[WidgetRef], cx: &mut BuildContext<'_>) -> Result<Vec<Element>> {
    children
        .iter()
        .enumerate()
        .map(|(index, child)| cx.keyed(index, |cx| child.build(cx)))
        .collect()
}
