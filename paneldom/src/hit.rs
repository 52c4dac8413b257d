use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};

/// Find the deepest clickable element at the given coordinates.
///
/// Inert subtrees and anything outside a clipping ancestor are skipped.
/// Returns None if no clickable element contains the point.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_test_element(layout, root, x, y, None)
}

fn hit_test_element(
    layout: &LayoutResult,
    element: &Element,
    x: u16,
    y: u16,
    clip: Option<Rect>,
) -> Option<String> {
    if element.inert || element.opacity <= 0.0 {
        return None;
    }

    let rect = layout.get(&element.id)?;
    let visible = clip.map_or(*rect, |c| c.intersect(*rect));
    if !visible.contains(x, y) {
        return None;
    }

    let child_clip = if element.clip { Some(visible) } else { clip };

    // Later children draw on top, so they get the first chance.
    let children: Vec<&Element> = match &element.content {
        Content::Layers(layers) => {
            let mut order: Vec<&Element> = layers.iter().rev().collect();
            order.sort_by(|a, b| b.opacity.total_cmp(&a.opacity));
            order
        }
        Content::Children(children) => children.iter().rev().collect(),
        Content::None | Content::Text(_) => Vec::new(),
    };
    for child in children {
        if let Some(id) = hit_test_element(layout, child, x, y, child_clip) {
            return Some(id);
        }
    }

    if element.clickable {
        Some(element.id.clone())
    } else {
        None
    }
}
