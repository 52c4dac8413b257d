use std::time::Instant;

use crate::buffer::Buffer;
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::text::char_width;
use crate::types::Rgb;

pub fn render_to_buffer(element: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    let start = Instant::now();
    let mut element_count = 0usize;

    render_element(element, layout, buf, 1.0, None, &mut element_count);

    log::debug!(
        "render: elements={} took={:>6.2}µs",
        element_count,
        start.elapsed().as_secs_f64() * 1_000_000.0,
    );
}

fn render_element(
    element: &Element,
    layout: &LayoutResult,
    buf: &mut Buffer,
    parent_opacity: f32,
    clip: Option<Rect>,
    element_count: &mut usize,
) {
    let Some(rect) = layout.get(&element.id).copied() else {
        return;
    };

    let opacity = parent_opacity * element.opacity;
    if opacity <= 0.0 {
        return;
    }
    *element_count += 1;

    let visible = clip.map_or(rect, |c| c.intersect(rect));
    if clip.is_some() && visible.is_empty() {
        // Clipped away entirely, and so is every descendant.
        return;
    }

    if let Some(bg) = element.style.background {
        fill_rect(buf, visible, bg, opacity);
    }

    let child_clip = if element.clip { Some(visible) } else { clip };

    match &element.content {
        Content::None => {}
        Content::Text(text) => render_text(text, element, rect, visible, opacity, buf),
        Content::Children(children) => {
            for child in children {
                render_element(child, layout, buf, opacity, child_clip, element_count);
            }
        }
        Content::Layers(layers) => {
            // The more opaque layer wins glyph conflicts, so draw it last.
            let mut order: Vec<&Element> = layers.iter().collect();
            order.sort_by(|a, b| a.opacity.total_cmp(&b.opacity));
            for layer in order {
                render_element(layer, layout, buf, opacity, child_clip, element_count);
            }
        }
    }
}

fn fill_rect(buf: &mut Buffer, rect: Rect, bg: Rgb, opacity: f32) {
    for y in rect.y..rect.bottom().min(buf.height()) {
        for x in rect.x..rect.right().min(buf.width()) {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.bg = cell.bg.mix(bg, opacity);
            }
        }
    }
}

fn render_text(
    text: &str,
    element: &Element,
    rect: Rect,
    visible: Rect,
    opacity: f32,
    buf: &mut Buffer,
) {
    let fg = element.style.foreground.unwrap_or(Rgb::WHITE);
    let inner = rect.shrink(
        element.padding.top,
        element.padding.right,
        element.padding.bottom,
        element.padding.left,
    );

    for (line_index, line) in text.lines().enumerate() {
        let y = inner.y.saturating_add(line_index as u16);
        if y >= inner.bottom() {
            break;
        }

        let mut x = inner.x;
        for ch in line.chars() {
            let width = char_width(ch).max(1) as u16;
            if x.saturating_add(width) > inner.right() {
                break;
            }

            if visible.contains(x, y) {
                if let Some(cell) = buf.get_mut(x, y) {
                    // Fading blends the glyph toward whatever is behind it.
                    cell.char = ch;
                    cell.fg = cell.bg.mix(fg, opacity);
                    cell.style = element.style.text_style;
                    cell.wide_continuation = false;
                }
                if width > 1 {
                    if let Some(cell) = buf.get_mut(x + 1, y) {
                        cell.char = ' ';
                        cell.wide_continuation = true;
                    }
                }
            }
            x += width;
        }
    }
}
