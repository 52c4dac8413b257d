use paneldom::layout::layout;
use paneldom::render::render_to_buffer;
use paneldom::{Buffer, Element, Rect, Rgb, Size, Style};

fn render(root: &Element, width: u16, height: u16) -> Buffer {
    let layout = layout(root, Rect::new(0, 0, width, height));
    let mut buf = Buffer::new(width, height);
    render_to_buffer(root, &layout, &mut buf);
    buf
}

// ============================================================================
// Text Tests
// ============================================================================

#[test]
fn test_text_renders_at_origin() {
    let root = Element::col()
        .width(Size::Fixed(10))
        .child(Element::text("hello"));

    let buf = render(&root, 10, 2);

    assert_eq!(buf.row_text(0), "hello");
    assert_eq!(buf.row_text(1), "");
}

#[test]
fn test_multiline_text_renders_each_line() {
    let buf = render(&Element::text("one\ntwo"), 10, 3);
    assert_eq!(buf.to_text(), "one\ntwo\n");
}

#[test]
fn test_wide_glyph_marks_continuation() {
    let buf = render(&Element::text("日x"), 5, 1);

    assert_eq!(buf.get(0, 0).unwrap().char, '日');
    assert!(buf.get(1, 0).unwrap().wide_continuation);
    assert_eq!(buf.get(2, 0).unwrap().char, 'x');
    assert_eq!(buf.row_text(0), "日x");
}

#[test]
fn test_background_fills_element_rect() {
    let red = Rgb::new(255, 0, 0);
    let root = Element::box_()
        .width(Size::Fixed(3))
        .height(Size::Fixed(1))
        .style(Style::new().background(red));

    let buf = render(&root, 5, 1);

    assert_eq!(buf.get(0, 0).unwrap().bg, red);
    assert_eq!(buf.get(2, 0).unwrap().bg, red);
    assert_eq!(buf.get(3, 0).unwrap().bg, Rgb::BLACK);
}

// ============================================================================
// Opacity Tests
// ============================================================================

#[test]
fn test_zero_opacity_draws_nothing() {
    let buf = render(&Element::text("hi").opacity(0.0), 5, 1);
    assert_eq!(buf.row_text(0), "");
}

#[test]
fn test_partial_opacity_blends_toward_background() {
    let buf = render(&Element::text("x").opacity(0.5), 5, 1);
    let cell = buf.get(0, 0).unwrap();

    assert_eq!(cell.char, 'x');
    assert_eq!(cell.fg, Rgb::BLACK.mix(Rgb::WHITE, 0.5));
    assert!(cell.fg.r > 0 && cell.fg.r < 255);
}

#[test]
fn test_opacity_multiplies_through_ancestors() {
    let root = Element::col()
        .opacity(0.5)
        .child(Element::text("x").opacity(0.5));

    let buf = render(&root, 5, 1);

    assert_eq!(buf.get(0, 0).unwrap().fg, Rgb::BLACK.mix(Rgb::WHITE, 0.25));
}

#[test]
fn test_full_opacity_keeps_foreground() {
    let green = Rgb::new(0, 200, 0);
    let root = Element::text("x").style(Style::new().foreground(green));

    let buf = render(&root, 5, 1);

    assert_eq!(buf.get(0, 0).unwrap().fg, green);
}

// ============================================================================
// Clip Tests
// ============================================================================

fn tall_layer(clip: bool) -> Element {
    Element::layers([Element::text("a\nb")])
        .width(Size::Fixed(5))
        .height(Size::Fixed(1))
        .clip(clip)
}

#[test]
fn test_clip_hides_overflowing_layer() {
    let buf = render(&tall_layer(true), 5, 3);

    assert_eq!(buf.row_text(0), "a");
    assert_eq!(buf.row_text(1), "");
}

#[test]
fn test_unclipped_layer_overflows() {
    let buf = render(&tall_layer(false), 5, 3);

    assert_eq!(buf.row_text(0), "a");
    assert_eq!(buf.row_text(1), "b");
}

// ============================================================================
// Layer Order Tests
// ============================================================================

#[test]
fn test_more_opaque_layer_draws_last() {
    let faded_first = Element::layers([
        Element::text("B").opacity(0.4),
        Element::text("A").opacity(1.0),
    ]);
    let faded_last = Element::layers([
        Element::text("A").opacity(1.0),
        Element::text("B").opacity(0.4),
    ]);

    assert_eq!(render(&faded_first, 3, 1).row_text(0), "A");
    assert_eq!(render(&faded_last, 3, 1).row_text(0), "A");
}

#[test]
fn test_equal_opacity_layers_keep_declared_order() {
    let root = Element::layers([
        Element::text("A").opacity(0.5),
        Element::text("B").opacity(0.5),
    ]);

    assert_eq!(render(&root, 3, 1).row_text(0), "B");
}

#[test]
fn test_hidden_layer_does_not_overwrite() {
    let root = Element::layers([Element::text("A"), Element::text("B").opacity(0.0)]);

    assert_eq!(render(&root, 3, 1).row_text(0), "A");
}
