use glam::Vec3;
use label_editor::{EditorSession, GestureState, ResizeHandle};
use label_document::{InputEvent, MouseButton, ObjectClass};
use settings::{CameraView, UserSettings};

fn top_session() -> EditorSession {
    let mut settings = UserSettings::default();
    settings.camera.initial_view = CameraView::Top;
    EditorSession::new(settings, (800, 600))
}

fn screen(session: &EditorSession, world: Vec3) -> (f32, f32) {
    session
        .camera()
        .world_to_screen(world)
        .expect("point in front of camera")
}

fn down(session: &mut EditorSession, pointer_id: u32, world: Vec3) -> bool {
    let viewport_pos = screen(session, world);
    session
        .handle_input(&InputEvent::PointerDown {
            pointer_id,
            button: MouseButton::Left,
            viewport_pos,
        })
        .consumed
}

fn drag_to(session: &mut EditorSession, pointer_id: u32, world: Vec3) -> bool {
    let viewport_pos = screen(session, world);
    session
        .handle_input(&InputEvent::PointerMove {
            pointer_id,
            viewport_pos,
        })
        .consumed
}

fn up(session: &mut EditorSession, pointer_id: u32) -> bool {
    session
        .handle_input(&InputEvent::PointerUp {
            pointer_id,
            button: MouseButton::Left,
            viewport_pos: (0.0, 0.0),
        })
        .consumed
}

fn assert_close(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < 1e-2,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn click_on_ground_creates_selected_resting_box() {
    let mut s = top_session();

    assert!(down(&mut s, 1, Vec3::new(5.0, 0.0, 3.0)));
    assert_eq!(s.gesture(), GestureState::Creating);
    assert!(!s.camera().orbit_enabled());

    let created = s.document().selected_box().cloned().expect("new box is selected");
    assert_eq!(created.class, ObjectClass::Car);
    assert_eq!(created.size, Vec3::new(4.0, 2.0, 2.0));
    assert_close(created.position, Vec3::new(5.0, 1.0, 3.0));
    assert_eq!(s.document().history().cursor(), 1);

    assert!(up(&mut s, 1));
    assert_eq!(s.gesture(), GestureState::Idle);
    assert!(s.camera().orbit_enabled());
    assert_eq!(s.document().history().len(), 2);
}

#[test]
fn ground_click_without_armed_label_is_ignored() {
    let mut s = top_session();
    s.arm(None);
    assert!(!down(&mut s, 1, Vec3::new(5.0, 0.0, 3.0)));
    assert!(s.document().boxes().is_empty());
    assert_eq!(s.gesture(), GestureState::Idle);
}

#[test]
fn body_drag_moves_horizontally_and_commits_once() {
    let mut s = top_session();
    let id = s.add_box(Vec3::new(5.0, 1.0, 3.0), ObjectClass::Car);
    let cursor_before = s.document().history().cursor();

    assert!(down(&mut s, 1, Vec3::new(4.0, 1.0, 2.5)));
    assert_eq!(s.gesture(), GestureState::Moving(id));
    assert_eq!(s.selection(), Some(id));

    drag_to(&mut s, 1, Vec3::new(6.0, 0.0, 0.0));
    drag_to(&mut s, 1, Vec3::new(8.0, 0.0, -1.0));
    assert_eq!(s.document().history().cursor(), cursor_before);
    assert_close(s.document().get_box(id).unwrap().position, Vec3::new(8.0, 1.0, -1.0));

    up(&mut s, 1);
    assert_eq!(s.document().history().cursor(), cursor_before + 1);
    assert!(s.document().history().is_synced_with(s.document().boxes()));

    s.undo();
    assert_close(s.document().get_box(id).unwrap().position, Vec3::new(5.0, 1.0, 3.0));
}

#[test]
fn click_without_drag_selects_but_records_nothing() {
    let mut s = top_session();
    let id = s.add_box(Vec3::new(5.0, 1.0, 3.0), ObjectClass::Car);
    let len_before = s.document().history().len();

    down(&mut s, 1, Vec3::new(4.0, 1.0, 2.5));
    up(&mut s, 1);
    assert_eq!(s.selection(), Some(id));
    assert_eq!(s.document().history().len(), len_before);
}

#[test]
fn handle_drag_resizes_single_axis_around_fixed_center() {
    let mut s = top_session();
    let id = s.add_box(Vec3::new(5.0, 1.0, 3.0), ObjectClass::Car);
    s.select_box(id);

    assert!(down(&mut s, 1, Vec3::new(7.0, 1.0, 3.0)));
    assert_eq!(s.gesture(), GestureState::Resizing(id, ResizeHandle::PosX));

    drag_to(&mut s, 1, Vec3::new(8.0, 1.0, 3.0));
    let resized = s.document().get_box(id).unwrap().clone();
    assert_close(resized.size, Vec3::new(6.0, 2.0, 2.0));
    assert_close(resized.position, Vec3::new(5.0, 1.0, 3.0));

    drag_to(&mut s, 1, Vec3::new(-20.0, 1.0, 3.0));
    assert_eq!(s.document().get_box(id).unwrap().size.x, 0.5);

    up(&mut s, 1);
    assert!(s.document().history().is_synced_with(s.document().boxes()));
    assert!(s.camera().orbit_enabled());
}

#[test]
fn height_handle_drag_in_perspective_uses_vertical_plane() {
    let mut s = top_session();
    s.set_view(CameraView::Perspective);
    let id = s.add_box(Vec3::new(0.0, 1.0, 0.0), ObjectClass::Car);
    s.select_box(id);

    assert!(down(&mut s, 1, Vec3::new(0.0, 2.0, 0.0)));
    assert_eq!(s.gesture(), GestureState::Resizing(id, ResizeHandle::PosY));

    // The drag plane is z = 0 here: it holds the Y axis and faces the camera.
    drag_to(&mut s, 1, Vec3::new(0.0, 3.0, 0.0));
    let resized = s.document().get_box(id).unwrap().clone();
    assert_close(resized.size, Vec3::new(4.0, 4.0, 2.0));
    assert_eq!(resized.position.y, 1.0);

    up(&mut s, 1);
    assert!(s.document().history().is_synced_with(s.document().boxes()));
}

#[test]
fn height_handle_drag_from_top_view_leaves_box_untouched() {
    let mut s = top_session();
    let id = s.add_box(Vec3::new(0.0, 1.0, 0.0), ObjectClass::Car);
    s.select_box(id);
    let before = s.document().get_box(id).unwrap().clone();
    let len_before = s.document().history().len();

    assert!(down(&mut s, 1, Vec3::new(0.0, 2.0, 0.0)));
    assert_eq!(s.gesture(), GestureState::Resizing(id, ResizeHandle::PosY));

    // Looking straight down the Y axis there is no plane to drag on.
    assert!(!drag_to(&mut s, 1, Vec3::new(3.0, 2.0, 1.0)));
    assert_eq!(s.document().get_box(id).unwrap(), &before);

    up(&mut s, 1);
    assert_eq!(s.gesture(), GestureState::Idle);
    assert_eq!(s.document().history().len(), len_before);
}

#[test]
fn foreign_pointer_cannot_hijack_gesture() {
    let mut s = top_session();
    let id = s.add_box(Vec3::new(5.0, 1.0, 3.0), ObjectClass::Car);
    down(&mut s, 1, Vec3::new(4.0, 1.0, 2.5));
    assert_eq!(s.captured_pointer(), Some(1));

    assert!(!drag_to(&mut s, 2, Vec3::new(-8.0, 0.0, 0.0)));
    assert!(!up(&mut s, 2));
    assert!(!down(&mut s, 2, Vec3::new(-8.0, 0.0, 0.0)));
    assert_eq!(s.gesture(), GestureState::Moving(id));
    assert_close(s.document().get_box(id).unwrap().position, Vec3::new(5.0, 1.0, 3.0));

    up(&mut s, 1);
    assert_eq!(s.captured_pointer(), None);
}

#[test]
fn orbit_only_while_idle() {
    let mut s = top_session();
    s.set_view(CameraView::Perspective);
    let eye = s.camera().position();

    let right_down = InputEvent::PointerDown {
        pointer_id: 7,
        button: MouseButton::Right,
        viewport_pos: (400.0, 300.0),
    };
    let right_move = InputEvent::PointerMove {
        pointer_id: 7,
        viewport_pos: (460.0, 300.0),
    };
    let pressed = s.handle_input(&right_down);
    assert!(pressed.redraw && !pressed.consumed);
    assert!(s.handle_input(&right_move).redraw);
    assert!((s.camera().position() - eye).length() > 1e-3);
    s.handle_input(&InputEvent::PointerUp {
        pointer_id: 7,
        button: MouseButton::Right,
        viewport_pos: (460.0, 300.0),
    });

    s.set_view(CameraView::Perspective);
    let eye = s.camera().position();
    down(&mut s, 1, Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(s.gesture(), GestureState::Creating);
    assert!(!s.handle_input(&right_down).redraw);
    assert!(!s.handle_input(&InputEvent::Scroll { lines: 3.0 }).redraw);
    assert_close(s.camera().position(), eye);
}

#[test]
fn export_after_editing_lists_boxes_in_order() {
    let mut s = top_session();
    down(&mut s, 1, Vec3::new(0.0, 0.0, 0.0));
    up(&mut s, 1);
    s.arm(Some(ObjectClass::Cyclist));
    down(&mut s, 1, Vec3::new(-6.0, 0.0, 4.0));
    up(&mut s, 1);

    let json: serde_json::Value = serde_json::from_str(&s.export_labels().unwrap()).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["class"], "car");
    assert_eq!(records[1]["class"], "cyclist");
    assert!(records.iter().all(|r| r["rotation"] == 0));
    assert_eq!(records[1]["dimensions"], serde_json::json!([1.8, 1.8, 0.8]));
}
