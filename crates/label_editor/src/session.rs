use std::path::{Path, PathBuf};

use glam::Vec3;
use label_document::{
    export::now_epoch_ms, write_export, BoxId, ClassStats, Document, DocumentResult,
    HistoryConfig, InputEvent, InputResult, MouseButton, ObjectClass, PointerId,
};
use settings::UserSettings;
use tracing::{debug, info};
use viewport::{CameraController, CameraView};

use crate::gesture::{transition, Effect, GestureContext, GestureEvent, GestureState};
use crate::shortcuts::{command_for_key, EditorCommand};

/// One annotation session: the document, the active gesture, the camera and
/// the presentation toggles. Every operation goes through `&mut self`.
#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    gesture: GestureState,
    /// Pointer that owns the current gesture, if any.
    captured: Option<PointerId>,
    armed: Option<ObjectClass>,
    wireframe: bool,
    camera: CameraController,
    settings: UserSettings,
}

impl EditorSession {
    pub fn new(settings: UserSettings, viewport_size: (u32, u32)) -> Self {
        let settings = settings.sanitized();
        let history = HistoryConfig {
            max_entries: settings.editor.history_limit,
        };
        Self {
            document: Document::with_history("Untitled", history),
            gesture: GestureState::Idle,
            captured: None,
            armed: Some(settings.editor.default_class),
            wireframe: settings.editor.wireframe,
            camera: CameraController::new(&settings.camera, viewport_size),
            settings,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.captured
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        match event {
            InputEvent::KeyPress { key, modifiers } => match command_for_key(*key, *modifiers) {
                Some(command) => {
                    self.execute(command);
                    InputResult::consumed()
                }
                None => InputResult::ignored(),
            },
            InputEvent::PointerDown {
                pointer_id,
                button: MouseButton::Left,
                viewport_pos,
            } => {
                if self.captured.is_some() {
                    return InputResult::ignored();
                }
                let ray = self.camera.screen_ray(*viewport_pos);
                let result = self.step(*pointer_id, GestureEvent::Down(ray));
                if result.consumed {
                    return result;
                }
                // Nothing to grab: the press may still belong to the camera.
                self.camera_input(event)
            }
            InputEvent::PointerMove {
                pointer_id,
                viewport_pos,
            } if self.captured.is_some() => {
                if self.captured != Some(*pointer_id) {
                    return InputResult::ignored();
                }
                let ray = self.camera.screen_ray(*viewport_pos);
                self.step(*pointer_id, GestureEvent::Move(ray))
            }
            InputEvent::PointerUp {
                pointer_id,
                button: MouseButton::Left,
                ..
            } if self.captured.is_some() => {
                if self.captured != Some(*pointer_id) {
                    return InputResult::ignored();
                }
                self.step(*pointer_id, GestureEvent::Up)
            }
            _ => self.camera_input(event),
        }
    }

    /// Camera moves need a redraw but leave the event free for the host.
    fn camera_input(&mut self, event: &InputEvent) -> InputResult {
        if self.camera.handle_input(event, &self.settings.camera) {
            InputResult::redraw_only()
        } else {
            InputResult::ignored()
        }
    }

    fn step(&mut self, pointer_id: PointerId, event: GestureEvent) -> InputResult {
        let ctx = GestureContext {
            boxes: self.document.boxes(),
            selection: self.document.selection(),
            armed: self.armed,
            view_dir: self.camera.forward(),
            handle_radius: self.settings.editor.handle_radius,
        };
        let next = transition(self.gesture, &ctx, event);
        if next.state == self.gesture && next.effects.is_empty() {
            return InputResult::ignored();
        }
        if next.state != self.gesture {
            debug!(from = ?self.gesture, to = ?next.state, "gesture transition");
        }
        self.gesture = next.state;
        for effect in next.effects {
            self.apply(pointer_id, effect);
        }
        InputResult::consumed()
    }

    fn apply(&mut self, pointer_id: PointerId, effect: Effect) {
        match effect {
            Effect::CapturePointer => self.captured = Some(pointer_id),
            Effect::ReleasePointer => self.captured = None,
            Effect::CreateBox { position, class } => {
                let id = self.document.add_box(position, class);
                self.document.select_box(id);
            }
            Effect::Select(id) => self.document.select_box(id),
            Effect::MoveBox { id, position } => self.document.move_box(id, position),
            Effect::ResizeBox { id, size } => {
                self.document.set_box_size(id, size);
            }
            Effect::Commit => {
                if self.document.commit_pending() {
                    debug!(revision = self.document.metadata().revision(), "gesture committed");
                }
            }
            Effect::SetOrbit(enabled) => self.camera.set_orbit_enabled(enabled),
        }
    }

    /// History edits are held back while a gesture owns the pointer.
    pub fn execute(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::Arm(class) => self.arm(Some(class)),
            EditorCommand::ToggleWireframe => self.toggle_wireframe(),
            EditorCommand::DeleteSelected if self.gesture.is_idle() => {
                self.document.delete_selected()
            }
            EditorCommand::Undo if self.gesture.is_idle() => self.undo(),
            EditorCommand::Redo if self.gesture.is_idle() => self.redo(),
            EditorCommand::DeleteSelected | EditorCommand::Undo | EditorCommand::Redo => {
                debug!(?command, gesture = ?self.gesture, "command ignored during gesture");
            }
        }
    }

    pub fn add_box(&mut self, position: Vec3, class: ObjectClass) -> BoxId {
        self.document.add_box(position, class)
    }

    pub fn select_box(&mut self, id: BoxId) {
        self.document.select_box(id);
    }

    pub fn clear_selection(&mut self) {
        self.document.clear_selection();
    }

    pub fn selection(&self) -> Option<BoxId> {
        self.document.selection()
    }

    pub fn move_box(&mut self, id: BoxId, position: Vec3) {
        self.document.move_box(id, position);
    }

    pub fn resize_box(&mut self, id: BoxId, size: Vec3) {
        self.document.resize_box(id, size);
    }

    pub fn delete_box(&mut self, id: BoxId) {
        self.document.delete_box(id);
    }

    pub fn undo(&mut self) {
        self.document.undo();
        debug!(cursor = self.document.history().cursor(), "undo");
    }

    pub fn redo(&mut self) {
        self.document.redo();
        debug!(cursor = self.document.history().cursor(), "redo");
    }

    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    /// Serialized label file contents.
    pub fn export_labels(&self) -> DocumentResult<String> {
        self.document.export_json()
    }

    /// Write `labels_<millis>.json` into `dir`.
    pub fn write_labels(&mut self, dir: &Path) -> DocumentResult<PathBuf> {
        let path = write_export(dir, self.document.boxes(), now_epoch_ms())?;
        self.document.mark_clean();
        Ok(path)
    }

    pub fn arm(&mut self, class: Option<ObjectClass>) {
        if self.armed != class {
            info!(class = ?class, "armed label changed");
        }
        self.armed = class;
    }

    pub fn armed(&self) -> Option<ObjectClass> {
        self.armed
    }

    pub fn set_view(&mut self, view: CameraView) {
        self.camera.set_view(view);
    }

    pub fn view(&self) -> CameraView {
        self.camera.view()
    }

    pub fn update_viewport(&mut self, size: (u32, u32)) {
        self.camera.update_viewport((0, 0), size);
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
    }

    pub fn stats(&self) -> ClassStats {
        self.document.stats()
    }
}
