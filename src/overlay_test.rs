use super::*;
use crate::camera::Point;
use crate::render::Color;

fn overlay() -> SelectionOverlay {
    SelectionOverlay::new(SelectionStyle::default())
}

#[test]
fn new_overlay_is_clear() {
    let o = overlay();
    assert!(o.is_clear());
    assert_eq!(o.commands(), [DrawCommand::Clear]);
}

#[test]
fn redraw_outlines_and_fills() {
    let mut o = overlay();
    o.redraw(&SelectionRect { start: Point::new(50.0, 50.0), end: Point::new(150.0, 120.0) });
    assert!(!o.is_clear());
    assert_eq!(
        o.commands(),
        [
            DrawCommand::Clear,
            DrawCommand::LineStyle { width: 2.0, color: Color(0x0066cc), alpha: 0.8 },
            DrawCommand::BeginFill { color: Color(0x0066cc), alpha: 0.1 },
            DrawCommand::Rect { x: 50.0, y: 50.0, width: 100.0, height: 70.0 },
            DrawCommand::EndFill,
        ]
    );
}

#[test]
fn redraw_keeps_negative_extent() {
    let mut o = overlay();
    o.redraw(&SelectionRect { start: Point::new(150.0, 150.0), end: Point::new(50.0, 100.0) });
    assert!(o.commands().contains(&DrawCommand::Rect { x: 150.0, y: 150.0, width: -100.0, height: -50.0 }));
}

#[test]
fn redraw_replaces_previous_drawing() {
    let mut o = overlay();
    o.redraw(&SelectionRect { start: Point::new(0.0, 0.0), end: Point::new(10.0, 10.0) });
    o.redraw(&SelectionRect { start: Point::new(0.0, 0.0), end: Point::new(20.0, 30.0) });
    let rects: Vec<_> = o
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Rect { .. }))
        .collect();
    assert_eq!(rects, [&DrawCommand::Rect { x: 0.0, y: 0.0, width: 20.0, height: 30.0 }]);
}

#[test]
fn clear_after_redraw() {
    let mut o = overlay();
    o.redraw(&SelectionRect::at(Point::new(3.0, 4.0)));
    o.clear();
    assert!(o.is_clear());
}

#[test]
fn custom_style_is_used() {
    let style = SelectionStyle { color: Color(0xff0000), stroke_width: 4.0, stroke_alpha: 1.0, fill_alpha: 0.5 };
    let mut o = SelectionOverlay::new(style);
    o.redraw(&SelectionRect::at(Point::new(0.0, 0.0)));
    assert_eq!(o.commands()[1], DrawCommand::LineStyle { width: 4.0, color: Color(0xff0000), alpha: 1.0 });
    assert_eq!(o.commands()[2], DrawCommand::BeginFill { color: Color(0xff0000), alpha: 0.5 });
}
