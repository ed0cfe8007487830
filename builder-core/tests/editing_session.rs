//! Integration tests for a full editing session (builder-core).
//!
//! Drives the canvas, surface and property editor together the way the
//! browser editor does.

use builder_core::{
    BuilderError, Canvas, CanvasSurface, DragState, ElementType, ElementUpdate, InputEvent,
    MemoryPageStore, MouseEvent, PageStore, PointerEvent, PointerPhase, PointerPosition, Property,
    PropertyEditor, TouchEvent, TouchPoint,
};

fn mouse(phase: PointerPhase, x: f32, y: f32) -> InputEvent {
    InputEvent::Mouse(MouseEvent {
        phase,
        client_x: x,
        client_y: y,
    })
}

fn touch(phase: PointerPhase, points: &[(f32, f32)]) -> InputEvent {
    InputEvent::Touch(TouchEvent::new(
        phase,
        points
            .iter()
            .zip(0u32..)
            .map(|(&(x, y), id)| TouchPoint {
                id,
                client_x: x,
                client_y: y,
            })
            .collect(),
    ))
}

fn feed(surface: &mut CanvasSurface, canvas: &mut Canvas, events: &[InputEvent]) {
    for event in events {
        if let Some(pointer) = event.to_pointer() {
            surface.handle(canvas, pointer);
        }
    }
}

// ==========================================================================
// Element model
// ==========================================================================

#[test]
fn test_add_text_then_edit_content() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Text).id();

    assert_eq!(canvas.len(), 1);
    let el = canvas.get_element(id).expect("element");
    assert_eq!(el.element_type(), ElementType::Text);
    assert_eq!(el.content(), "New text");
    assert_eq!(el.styles.z_index, 1);

    canvas
        .update_element(id, &ElementUpdate::content("Hello"))
        .expect("update");
    assert_eq!(canvas.get_element(id).map(|e| e.content()), Some("Hello"));
}

#[test]
fn test_update_position_reads_back_exactly() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Container).id();

    for (left, top) in [(0.0, 0.0), (17.25, 480.0), (1024.0, 3.5)] {
        canvas
            .update_element(id, &ElementUpdate::position(left, top))
            .expect("update");
        let s = &canvas.get_element(id).expect("element").styles;
        assert!((s.left - left).abs() < f32::EPSILON);
        assert!((s.top - top).abs() < f32::EPSILON);
    }

    canvas
        .update_element(id, &ElementUpdate::position(-1.0, -250.0))
        .expect("update");
    let s = &canvas.get_element(id).expect("element").styles;
    assert!(s.left.abs() < f32::EPSILON);
    assert!(s.top.abs() < f32::EPSILON);
}

#[test]
fn test_stale_ids_never_panic() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Button).id();
    canvas.delete_element(id).expect("delete");

    assert!(matches!(
        canvas.update_element(id, &ElementUpdate::content("gone")),
        Err(BuilderError::ElementNotFound(_))
    ));
    assert!(canvas.delete_element(id).is_err());
    canvas.select_element(Some(id));
    assert!(canvas.selected_id().is_none());
}

// ==========================================================================
// Surface + pointer adapters
// ==========================================================================

#[test]
fn test_mouse_drag_moves_element() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Text).id();
    let mut surface = CanvasSurface::with_defaults();

    feed(
        &mut surface,
        &mut canvas,
        &[
            mouse(PointerPhase::Down, 100.0, 100.0),
            mouse(PointerPhase::Move, 180.0, 160.0),
            mouse(PointerPhase::Move, 300.0, 250.0),
            mouse(PointerPhase::Up, 300.0, 250.0),
        ],
    );

    let s = &canvas.get_element(id).expect("element").styles;
    assert!((s.left - 225.0).abs() < 1e-4);
    assert!((s.top - 230.0).abs() < 1e-4);
    assert_eq!(surface.state(), DragState::Idle);
}

#[test]
fn test_touch_drag_uses_first_contact() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Text).id();
    let mut surface = CanvasSurface::with_defaults();

    feed(
        &mut surface,
        &mut canvas,
        &[
            touch(PointerPhase::Down, &[(100.0, 100.0)]),
            touch(PointerPhase::Move, &[(300.0, 250.0), (900.0, 900.0)]),
            touch(PointerPhase::Up, &[]),
        ],
    );

    let s = &canvas.get_element(id).expect("element").styles;
    assert!((s.left - 225.0).abs() < 1e-4);
    assert!((s.top - 230.0).abs() < 1e-4);
    assert!(!surface.is_dragging());
}

#[test]
fn test_editor_sees_live_drag_position() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::Button);
    let mut surface = CanvasSurface::with_defaults();
    let editor = PropertyEditor::new();

    surface.handle(
        &mut canvas,
        PointerEvent::Down(PointerPosition::new(110.0, 110.0)),
    );
    // Many moves in one frame: the last one wins.
    for step in 1..=30u8 {
        let x = 100.0 + f32::from(step) * 10.0;
        surface.handle(&mut canvas, PointerEvent::Move(PointerPosition::new(x, 120.0)));
    }

    let fields = editor.fields(&canvas).expect("selected");
    let left = fields
        .iter()
        .find(|f| f.property == Property::Left)
        .expect("left field");
    assert_eq!(left.value, "325");
}

#[test]
fn test_background_click_closes_editor() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::Text);
    let mut surface = CanvasSurface::with_defaults();
    let editor = PropertyEditor::new();
    assert!(editor.is_open(&canvas));

    feed(
        &mut surface,
        &mut canvas,
        &[
            mouse(PointerPhase::Down, 750.0, 20.0),
            mouse(PointerPhase::Up, 750.0, 20.0),
        ],
    );

    assert!(canvas.selected_id().is_none());
    assert!(!editor.is_open(&canvas));
    assert!(editor.fields(&canvas).is_none());
}

// ==========================================================================
// Save action
// ==========================================================================

#[test]
fn test_save_only_on_explicit_action() {
    let store = MemoryPageStore::new();
    let mut canvas = Canvas::new();
    let editor = PropertyEditor::new();

    canvas.add_element(ElementType::Text);
    editor
        .set(&mut canvas, Property::Content, "Draft")
        .expect("edit");
    assert!(store.list().expect("list").is_empty());

    store.save_canvas("draft", "Draft", &canvas).expect("save");
    let restored = store.load("draft").expect("load").into_canvas();
    assert_eq!(restored.elements(), canvas.elements());
}
