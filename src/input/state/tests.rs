use super::*;
use crate::draw::{ObjectRole, Point, RED, Scene, Shape, WHITE};
use crate::input::tool::{BrushKind, Tool};
use crate::symmetry::SymmetryMode;

fn create_test_input_state(tool: Tool) -> InputState {
    InputState::with_defaults(tool, RED, 4.0, false, SymmetryMode::None, WHITE)
}

fn scene() -> Scene {
    Scene::new(200, 200, WHITE)
}

fn count(scene: &Scene, role: ObjectRole) -> usize {
    scene.objects().iter().filter(|obj| obj.role == role).count()
}

fn drag(state: &mut InputState, scene: &mut Scene, from: (f64, f64), to: (f64, f64)) -> Option<Commit> {
    state.on_pointer_down(scene, from.into());
    state.on_pointer_move(scene, to.into());
    state.on_pointer_up(scene, to.into())
}

#[test]
fn test_brush_stroke_commits_single_freehand_object() {
    let mut scene = scene();
    let mut state = create_test_input_state(Tool::Brush(BrushKind::Pencil));

    state.on_pointer_down(&mut scene, Point::new(10.0, 10.0));
    state.on_pointer_move(&mut scene, Point::new(40.0, 10.0));
    assert!(state.has_provisional());
    assert_eq!(scene.objects().len(), 0);

    let commit = state.on_pointer_up(&mut scene, Point::new(80.0, 10.0));
    assert!(matches!(commit, Some(Commit::Added(ref ids)) if ids.len() == 1));
    assert_eq!(count(&scene, ObjectRole::Content), 1);
    assert!(!state.is_gesture_active());

    match &scene.objects()[0].shape {
        Shape::Freehand { strands } => {
            assert_eq!(strands.len(), 1);
            assert_eq!(strands[0].last(), Some(&Point::new(80.0, 10.0)));
        }
        other => panic!("expected freehand, got {other:?}"),
    }
}

#[test]
fn test_brush_style_is_captured_at_stroke_start() {
    let mut scene = scene();
    let mut state = create_test_input_state(Tool::Brush(BrushKind::Marker));
    state.on_pointer_down(&mut scene, Point::new(10.0, 10.0));
    state.set_width(50.0);
    state.on_pointer_up(&mut scene, Point::new(30.0, 10.0));
    assert_eq!(scene.objects()[0].style.width, 6.0);
}

#[test]
fn test_quad_symmetry_brush_mirrors_into_same_object() {
    let mut scene = scene();
    let mut state = create_test_input_state(Tool::Brush(BrushKind::Pencil));
    state.set_symmetry(SymmetryMode::Quad);

    drag(&mut state, &mut scene, (20.0, 30.0), (60.0, 30.0));

    assert_eq!(count(&scene, ObjectRole::Content), 1);
    let Shape::Freehand { strands } = &scene.objects()[0].shape else {
        panic!("expected freehand");
    };
    assert_eq!(strands.len(), 4);
    assert_eq!(strands[3][0], Point::new(180.0, 170.0));
}

#[test]
fn test_rectangle_drag_uses_preview_then_promotes() {
    let mut scene = scene();
    let mut state = create_test_input_state(Tool::Rectangle);

    state.on_pointer_down(&mut scene, Point::new(50.0, 50.0));
    state.on_pointer_move(&mut scene, Point::new(20.0, 80.0));
    assert_eq!(count(&scene, ObjectRole::Preview), 1);
    assert_eq!(count(&scene, ObjectRole::Content), 0);

    state.on_pointer_up(&mut scene, Point::new(10.0, 90.0));
    assert_eq!(count(&scene, ObjectRole::Preview), 0);
    assert_eq!(
        scene.objects()[0].shape,
        Shape::Rect {
            left: 10.0,
            top: 50.0,
            width: 40.0,
            height: 40.0
        }
    );
}

#[test]
fn test_quad_symmetry_shape_adds_three_clones() {
    let mut scene = scene();
    let mut state = create_test_input_state(Tool::Circle);
    state.set_symmetry(SymmetryMode::Quad);

    let commit = drag(&mut state, &mut scene, (10.0, 10.0), (30.0, 30.0));
    assert!(matches!(commit, Some(Commit::Added(ref ids)) if ids.len() == 4));
    assert_eq!(count(&scene, ObjectRole::Content), 4);
}

#[test]
fn test_tool_switch_abandons_drag() {
    let mut scene = scene();
    let mut state = create_test_input_state(Tool::Rectangle);

    state.on_pointer_down(&mut scene, Point::new(10.0, 10.0));
    state.on_pointer_move(&mut scene, Point::new(50.0, 50.0));
    state.select_tool(&mut scene, Tool::Select);

    assert!(scene.objects().is_empty());
    assert!(!state.is_gesture_active());
    assert!(state.on_pointer_up(&mut scene, Point::new(50.0, 50.0)).is_none());
    assert!(scene.take_events().iter().all(|event| !event.touches_content()));
}

#[test]
fn test_polygon_needs_three_vertices() {
    let mut scene = scene();
    let mut state = create_test_input_state(Tool::Polygon);

    state.on_pointer_down(&mut scene, Point::new(10.0, 10.0));
    state.on_pointer_down(&mut scene, Point::new(50.0, 10.0));
    assert!(state.on_double_click(&mut scene, Point::new(50.0, 10.0)).is_none());
    assert_eq!(state.polygon.vertices.len(), 2);
    assert_eq!(count(&scene, ObjectRole::Marker), 2);
    assert_eq!(count(&scene, ObjectRole::Preview), 0);

    state.on_pointer_down(&mut scene, Point::new(30.0, 40.0));
    assert_eq!(count(&scene, ObjectRole::Preview), 1);

    let commit = state.on_double_click(&mut scene, Point::new(30.0, 40.0));
    assert!(matches!(commit, Some(Commit::Added(ref ids)) if ids.len() == 1));
    assert_eq!(scene.objects().len(), 1);
    assert_eq!(scene.objects()[0].role, ObjectRole::Content);
    assert!(state.polygon.is_empty());
}

#[test]
fn test_switching_away_from_polygon_discards_vertices() {
    let mut scene = scene();
    let mut state = create_test_input_state(Tool::Polygon);
    for (x, y) in [(10.0, 10.0), (50.0, 10.0), (30.0, 40.0)] {
        state.on_pointer_down(&mut scene, Point::new(x, y));
    }
    state.select_tool(&mut scene, Tool::Line);
    assert!(scene.objects().is_empty());
    assert!(state.polygon.is_empty());
}

#[test]
fn test_select_moves_object() {
    let mut scene = scene();
    let mut state = create_test_input_state(Tool::Rectangle);
    drag(&mut state, &mut scene, (10.0, 10.0), (30.0, 30.0));
    state.select_tool(&mut scene, Tool::Select);

    let commit = drag(&mut state, &mut scene, (20.0, 20.0), (70.0, 25.0));
    let id = scene.objects()[0].id;
    assert_eq!(commit, Some(Commit::Moved(id)));
    let bounds = scene.objects()[0].shape.bounds().unwrap();
    assert_eq!((bounds.left, bounds.top), (60.0, 15.0));

    assert!(drag(&mut state, &mut scene, (70.0, 20.0), (70.0, 20.0)).is_none());
    assert!(drag(&mut state, &mut scene, (150.0, 150.0), (160.0, 160.0)).is_none());
}

#[test]
fn test_cancelled_move_restores_position() {
    let mut scene = scene();
    let mut state = create_test_input_state(Tool::Line);
    drag(&mut state, &mut scene, (10.0, 10.0), (40.0, 10.0));
    let before = scene.objects()[0].shape.clone();

    state.select_tool(&mut scene, Tool::Select);
    state.on_pointer_down(&mut scene, Point::new(20.0, 10.0));
    state.on_pointer_move(&mut scene, Point::new(90.0, 90.0));
    state.select_tool(&mut scene, Tool::Circle);

    assert_eq!(scene.objects()[0].shape, before);
}

#[test]
fn test_width_is_clamped() {
    let mut state = create_test_input_state(Tool::default());
    assert_eq!(state.set_width(0.0), 1.0);
    assert_eq!(state.set_width(250.0), 100.0);
    assert_eq!(state.set_width(12.0), 12.0);
}

#[test]
fn test_non_finite_width_keeps_current() {
    let mut state = create_test_input_state(Tool::default());
    state.set_width(12.0);
    assert_eq!(state.set_width(f64::NAN), 12.0);
    assert_eq!(state.set_width(f64::INFINITY), 12.0);
    assert_eq!(state.current_width, 12.0);

    let fresh =
        InputState::with_defaults(Tool::Line, RED, f64::NAN, false, SymmetryMode::None, WHITE);
    assert_eq!(fresh.current_width, MIN_WIDTH);
}

#[test]
fn test_non_finite_pointer_events_are_ignored() {
    let mut scene = scene();
    let mut state = create_test_input_state(Tool::Rectangle);

    state.on_pointer_down(&mut scene, Point::new(f64::NAN, 10.0));
    assert!(!state.is_gesture_active());
    assert!(scene.objects().is_empty());

    state.on_pointer_down(&mut scene, Point::new(10.0, 10.0));
    state.on_pointer_move(&mut scene, Point::new(40.0, f64::INFINITY));
    assert!(state.on_pointer_up(&mut scene, Point::new(f64::NAN, f64::NAN)).is_none());
    assert!(state.is_gesture_active());

    state.on_pointer_up(&mut scene, Point::new(40.0, 40.0));
    let bounds = scene.objects()[0].shape.bounds().unwrap();
    assert_eq!(
        (bounds.left, bounds.top, bounds.width, bounds.height),
        (10.0, 10.0, 30.0, 30.0)
    );
}
