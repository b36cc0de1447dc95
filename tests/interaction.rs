//! End-to-end interaction properties, driven through the public engine API.

use canvas_editor::camera::Point;
use canvas_editor::config::EditorConfig;
use canvas_editor::engine::{Action, Engine, EngineCore};
use canvas_editor::input::{Button, Modifiers, SelectionRect, WheelDelta};
use canvas_editor::render::{DrawCommand, Recorder, SurfaceCall};
use canvas_editor::scene::Scene;
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-6;

fn core_with_camera(x: f64, y: f64, scale: f64) -> EngineCore {
    let mut core = EngineCore::new();
    core.set_viewport(1280.0, 720.0);
    core.camera.set_position(Point::new(x, y));
    core.camera.scale = scale;
    core
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Modifiers::default() }
}

fn coord() -> impl Strategy<Value = f64> {
    -5000.0..5000.0f64
}

fn zoom_level() -> impl Strategy<Value = f64> {
    0.1..=5.0f64
}

proptest! {
    #[test]
    fn zoom_wheel_keeps_scale_in_range(
        start in zoom_level(),
        deltas in prop::collection::vec(-1.0e6..1.0e6f64, 1..40),
        cx in coord(),
        cy in coord(),
    ) {
        let mut core = core_with_camera(0.0, 0.0, start);
        for dy in deltas {
            core.on_wheel(Point::new(cx, cy), WheelDelta { dx: 0.0, dy }, ctrl());
            prop_assert!(core.camera.scale >= 0.1 && core.camera.scale <= 5.0);
        }
    }

    #[test]
    fn zoom_keeps_world_point_under_cursor(
        x in coord(),
        y in coord(),
        start in zoom_level(),
        dy in -500.0..500.0f64,
        cx in 0.0..1280.0f64,
        cy in 0.0..720.0f64,
    ) {
        let mut core = core_with_camera(x, y, start);
        let cursor = Point::new(cx, cy);
        let before = core.camera.screen_to_world(cursor);
        core.on_wheel(cursor, WheelDelta { dx: 0.0, dy }, ctrl());
        let after = core.camera.screen_to_world(cursor);
        prop_assert!((before.x - after.x).abs() < TOLERANCE * before.x.abs().max(1.0) * 100.0);
        prop_assert!((before.y - after.y).abs() < TOLERANCE * before.y.abs().max(1.0) * 100.0);
    }

    #[test]
    fn pan_moves_camera_by_screen_delta_at_any_zoom(
        x in coord(),
        y in coord(),
        zoom in zoom_level(),
        sx in coord(),
        sy in coord(),
        dx in coord(),
        dy in coord(),
    ) {
        let mut core = core_with_camera(x, y, zoom);
        core.on_pointer_down(Point::new(sx, sy), Button::Middle);
        core.on_pointer_move(Point::new(sx + dx, sy + dy));
        core.on_pointer_up(Point::new(sx + dx, sy + dy), Button::Middle);
        prop_assert!((core.camera.x - (x + dx)).abs() < TOLERANCE);
        prop_assert!((core.camera.y - (y + dy)).abs() < TOLERANCE);
        prop_assert_eq!(core.camera.scale, zoom);
    }

    #[test]
    fn marquee_ends_at_last_move(
        x in coord(),
        y in coord(),
        zoom in zoom_level(),
        down in (coord(), coord()),
        moves in prop::collection::vec((coord(), coord()), 1..20),
        release in (coord(), coord()),
    ) {
        let mut core = core_with_camera(x, y, zoom);
        let down = Point::new(down.0, down.1);
        core.on_pointer_down(down, Button::Primary);
        let mut last = down;
        for (mx, my) in moves {
            last = Point::new(mx, my);
            core.on_pointer_move(last);
        }
        let actions = core.on_pointer_up(Point::new(release.0, release.1), Button::Primary);
        let expected = SelectionRect {
            start: core.camera.screen_to_world(down),
            end: core.camera.screen_to_world(last),
        };
        prop_assert_eq!(actions.first(), Some(&Action::SelectionCompleted(expected)));
        prop_assert!(core.overlay.is_clear());
        prop_assert!(core.input.is_idle());
    }
}

#[test]
fn demo_scene_marquee_round_trip() {
    let scene = Scene::from_json(
        r#"[
            {"id": "111", "type": "text", "text": "Hello"},
            {"id": "222", "type": "rectangle", "x": 100, "y": 100, "width": 200, "height": 100},
            {"id": "333", "type": "circle", "x": 300, "y": 300, "radius": 50},
            {"id": "444", "type": "sprite", "x": 400, "y": 400, "width": 100, "height": 100},
            {"id": "555", "type": "unknown"}
        ]"#,
    )
    .unwrap();

    let mut engine = Engine::new(Recorder::new(), EditorConfig::default()).unwrap();
    engine.set_viewport(800.0, 600.0);
    engine.set_items(scene.items().to_vec()).unwrap();
    engine.render().unwrap();

    engine.on_pointer_down(Point::new(50.0, 50.0), Button::Primary);
    engine.on_pointer_move(Point::new(150.0, 150.0));
    engine.render().unwrap();

    let frame = engine.surface().last_frame();
    // begin frame, text, rectangle, circle, sprite, overlay
    assert_eq!(frame.len(), 6);
    assert_eq!(
        frame.last(),
        Some(&SurfaceCall::Graphics(vec![
            DrawCommand::Clear,
            DrawCommand::LineStyle { width: 2.0, color: canvas_editor::render::Color(0x0066cc), alpha: 0.8 },
            DrawCommand::BeginFill { color: canvas_editor::render::Color(0x0066cc), alpha: 0.1 },
            DrawCommand::Rect { x: 50.0, y: 50.0, width: 100.0, height: 100.0 },
            DrawCommand::EndFill,
        ]))
    );

    let actions = engine.on_pointer_up(Point::new(150.0, 150.0), Button::Primary);
    assert_eq!(
        actions[0],
        Action::SelectionCompleted(SelectionRect { start: Point::new(50.0, 50.0), end: Point::new(150.0, 150.0) })
    );
    engine.render().unwrap();
    assert_eq!(
        engine.surface().last_frame().last(),
        Some(&SurfaceCall::Graphics(vec![DrawCommand::Clear]))
    );
}

#[test]
fn zoom_then_pan_then_select() {
    let mut engine = Engine::new(Recorder::new(), EditorConfig::default()).unwrap();
    engine.set_viewport(800.0, 600.0);

    engine.on_wheel(Point::new(0.0, 0.0), WheelDelta { dx: 0.0, dy: -1.0 }, ctrl());
    engine.on_wheel(Point::new(0.0, 0.0), WheelDelta { dx: 0.0, dy: -1.0 }, ctrl());
    assert!((engine.camera().scale - 1.2).abs() < 1e-9);

    engine.on_pointer_down(Point::new(0.0, 0.0), Button::Middle);
    engine.on_pointer_move(Point::new(120.0, 60.0));
    engine.on_pointer_up(Point::new(120.0, 60.0), Button::Middle);

    engine.on_pointer_down(Point::new(120.0, 60.0), Button::Primary);
    let selection = engine.selection().unwrap();
    assert!(selection.start.x.abs() < 1e-9);
    assert!(selection.start.y.abs() < 1e-9);
}
