use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Align, Direction, Size};

pub type LayoutResult = HashMap<String, Rect>;

pub fn layout(element: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();

    let width = resolve_size(element.width, available.width, element, true);
    let height = resolve_size(element.height, available.height, element, false);
    let rect = Rect::new(available.x, available.y, width, height);
    result.insert(element.id.clone(), rect);
    layout_children(element, rect, &mut result);

    result
}

/// Natural (width, height) of an element, including padding.
///
/// Fixed sizes win over content; `Fill` measures as content.
pub fn intrinsic_size(element: &Element) -> (u16, u16) {
    (measure(element, true), measure(element, false))
}

fn layout_children(element: &Element, rect: Rect, result: &mut LayoutResult) {
    let inner = rect.shrink(
        element.padding.top,
        element.padding.right,
        element.padding.bottom,
        element.padding.left,
    );

    match &element.content {
        Content::Children(children) if !children.is_empty() => {
            layout_flex(element, children, inner, result)
        }
        Content::Layers(layers) => {
            for layer in layers {
                // Layers keep their natural height so a clipping parent can
                // reveal them gradually.
                let width = match layer.width {
                    Size::Fixed(n) => n.min(inner.width),
                    Size::Fill | Size::Auto => inner.width,
                };
                let height = match layer.height {
                    Size::Fixed(n) => n,
                    Size::Fill => inner.height,
                    Size::Auto => measure(layer, false),
                };
                let layer_rect = Rect::new(inner.x, inner.y, width, height);
                result.insert(layer.id.clone(), layer_rect);
                layout_children(layer, layer_rect, result);
            }
        }
        _ => {}
    }
}

fn layout_flex(element: &Element, children: &[Element], inner: Rect, result: &mut LayoutResult) {
    let is_row = element.direction == Direction::Row;
    let main_size = if is_row { inner.width } else { inner.height };
    let cross_size = if is_row { inner.height } else { inner.width };
    let gap_total = element.gap * children.len().saturating_sub(1) as u16;

    // First pass: fixed and natural sizes, count fill items
    let mut fixed_total = 0u16;
    let mut fill_count = 0u16;
    for child in children {
        match main_axis_size(child, is_row) {
            Size::Fixed(n) => fixed_total = fixed_total.saturating_add(n),
            Size::Auto => fixed_total = fixed_total.saturating_add(measure(child, is_row)),
            Size::Fill => fill_count += 1,
        }
    }

    let remaining = main_size.saturating_sub(fixed_total.saturating_add(gap_total));
    let fill_size = if fill_count > 0 {
        remaining / fill_count
    } else {
        0
    };

    // Second pass: assign rects
    let mut offset = 0u16;
    for child in children {
        let main = match main_axis_size(child, is_row) {
            Size::Fixed(n) => n,
            Size::Auto => measure(child, is_row),
            Size::Fill => fill_size,
        };

        let child_align = element.align;
        let cross = match cross_axis_size(child, is_row) {
            Size::Fixed(n) => n,
            Size::Fill => cross_size,
            Size::Auto => {
                if child_align == Align::Stretch {
                    cross_size
                } else {
                    measure(child, !is_row).min(cross_size)
                }
            }
        };

        let clamped_main = main.min(main_size.saturating_sub(offset));
        let clamped_cross = cross.min(cross_size);

        let cross_offset = match child_align {
            Align::Start | Align::Stretch => 0,
            Align::Center => cross_size.saturating_sub(clamped_cross) / 2,
            Align::End => cross_size.saturating_sub(clamped_cross),
        };

        let child_rect = if is_row {
            Rect::new(
                inner.x + offset,
                inner.y + cross_offset,
                clamped_main,
                clamped_cross,
            )
        } else {
            Rect::new(
                inner.x + cross_offset,
                inner.y + offset,
                clamped_cross,
                clamped_main,
            )
        };

        result.insert(child.id.clone(), child_rect);
        layout_children(child, child_rect, result);

        offset = offset.saturating_add(main).saturating_add(element.gap);
    }
}

fn axis_size(element: &Element, is_width: bool) -> Size {
    if is_width {
        element.width
    } else {
        element.height
    }
}

fn main_axis_size(element: &Element, is_row: bool) -> Size {
    axis_size(element, is_row)
}

fn cross_axis_size(element: &Element, is_row: bool) -> Size {
    axis_size(element, !is_row)
}

fn resolve_size(size: Size, available: u16, element: &Element, is_width: bool) -> u16 {
    match size {
        Size::Fixed(n) => n.min(available),
        Size::Fill => available,
        Size::Auto => measure(element, is_width).min(available),
    }
}

fn measure(element: &Element, is_width: bool) -> u16 {
    if let Size::Fixed(n) = axis_size(element, is_width) {
        return n;
    }

    let padding = if is_width {
        element.padding.horizontal_total()
    } else {
        element.padding.vertical_total()
    };

    let content_size = match &element.content {
        Content::None => 0,
        Content::Text(text) => {
            if is_width {
                text.lines().map(display_width).max().unwrap_or(0) as u16
            } else {
                text.lines().count().max(1) as u16
            }
        }
        Content::Children(children) => {
            let along_main = (element.direction == Direction::Row) == is_width;
            if along_main {
                let gap_total = element.gap * children.len().saturating_sub(1) as u16;
                children
                    .iter()
                    .map(|c| measure(c, is_width))
                    .fold(gap_total, u16::saturating_add)
            } else {
                children
                    .iter()
                    .map(|c| measure(c, is_width))
                    .max()
                    .unwrap_or(0)
            }
        }
        Content::Layers(layers) => layers
            .iter()
            .map(|c| measure(c, is_width))
            .max()
            .unwrap_or(0),
    };

    content_size.saturating_add(padding)
}
