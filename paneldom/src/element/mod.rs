mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    root.content
        .children()
        .iter()
        .find_map(|child| find_element(child, id))
}

/// Collect the text of every text node in tree order.
pub fn collect_text(root: &Element) -> Vec<String> {
    let mut out = Vec::new();
    collect_text_recursive(root, &mut out);
    out
}

fn collect_text_recursive(element: &Element, out: &mut Vec<String>) {
    if let Content::Text(text) = &element.content {
        out.push(text.clone());
    }
    for child in element.content.children() {
        collect_text_recursive(child, out);
    }
}
