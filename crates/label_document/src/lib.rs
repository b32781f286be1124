pub mod annotation;
pub mod collection;
pub mod export;
pub mod history;
pub mod runtime;

use glam::Vec3;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub use annotation::{clamp_size, BoxId, LabelBox, LabelColor, ObjectClass, MIN_EXTENT};
pub use collection::{BoxCollection, ClassStats};
pub use export::{export_json, export_records, write_export, LabelRecord};
pub use history::{History, HistoryConfig};
pub use runtime::{InputEvent, InputResult, KeyCode, Modifiers, MouseButton, PointerId};

pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

/// The annotation document: live boxes, their snapshot history, and the selection.
///
/// Committing operations (`add_box`, `resize_box`, `delete_box`) push a
/// snapshot so that `history.current() == boxes` afterwards. Transient
/// operations (`move_box`, `set_box_size`) leave the history untouched until
/// the caller invokes [`Document::commit_pending`].
#[derive(Debug, Clone)]
pub struct Document {
    metadata: DocumentMetadata,
    boxes: BoxCollection,
    history: History,
    selection: Option<BoxId>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_history(name, HistoryConfig::default())
    }

    pub fn with_history(name: impl Into<String>, config: HistoryConfig) -> Self {
        Self {
            metadata: DocumentMetadata::new(name),
            boxes: BoxCollection::new(),
            history: History::with_config(config),
            selection: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn boxes(&self) -> &BoxCollection {
        &self.boxes
    }

    pub fn get_box(&self, id: BoxId) -> Option<&LabelBox> {
        self.boxes.get(id)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> Option<BoxId> {
        self.selection
    }

    pub fn selected_box(&self) -> Option<&LabelBox> {
        self.selection.and_then(|id| self.boxes.get(id))
    }

    /// Create a box of `class` centered at `position` and commit.
    pub fn add_box(&mut self, position: Vec3, class: ObjectClass) -> BoxId {
        let id = self.boxes.push(LabelBox::new(position, class));
        debug!(%id, %class, "added box");
        self.commit();
        id
    }

    pub fn select_box(&mut self, id: BoxId) {
        if self.boxes.contains(id) {
            self.selection = Some(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Transient position update; not recorded in history.
    pub fn move_box(&mut self, id: BoxId, position: Vec3) {
        if let Some(b) = self.boxes.get_mut(id) {
            b.position = position;
        }
    }

    /// Transient size update, clamped to [`MIN_EXTENT`]; not recorded in history.
    pub fn set_box_size(&mut self, id: BoxId, size: Vec3) -> bool {
        match self.boxes.get_mut(id) {
            Some(b) => {
                b.size = clamp_size(size);
                true
            }
            None => false,
        }
    }

    /// Size update, clamped to [`MIN_EXTENT`], committed immediately.
    pub fn resize_box(&mut self, id: BoxId, size: Vec3) {
        if self.set_box_size(id, size) {
            self.commit();
        }
    }

    pub fn delete_box(&mut self, id: BoxId) {
        if self.boxes.remove(id).is_none() {
            return;
        }
        debug!(%id, "deleted box");
        if self.selection == Some(id) {
            self.selection = None;
        }
        self.commit();
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selection {
            self.delete_box(id);
        }
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.boxes = snapshot.clone();
            self.restore_selection();
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.boxes = snapshot.clone();
            self.restore_selection();
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Commit only if the live boxes differ from the snapshot at the cursor.
    /// Returns whether a snapshot was pushed.
    pub fn commit_pending(&mut self) -> bool {
        if self.history.is_synced_with(&self.boxes) {
            return false;
        }
        self.commit();
        true
    }

    pub fn stats(&self) -> ClassStats {
        self.boxes.stats()
    }

    pub fn export_records(&self) -> Vec<LabelRecord> {
        export::export_records(&self.boxes)
    }

    pub fn export_json(&self) -> DocumentResult<String> {
        export::export_json(&self.boxes)
    }

    pub fn mark_clean(&mut self) {
        self.metadata.dirty = false;
    }

    fn commit(&mut self) {
        self.history.commit(&self.boxes);
        self.metadata.revision += 1;
        self.metadata.dirty = true;
    }

    fn restore_selection(&mut self) {
        if let Some(id) = self.selection {
            if !self.boxes.contains(id) {
                self.selection = None;
            }
        }
        self.metadata.dirty = true;
    }
}

/// Lightweight metadata block stored alongside the boxes.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    id: Uuid,
    name: String,
    revision: u64,
    dirty: bool,
}

impl DocumentMetadata {
    fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            revision: 0,
            dirty: false,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Edited since the last export.
    pub fn dirty(&self) -> bool {
        self.dirty
    }
}

/// Errors surfaced when exporting documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("label serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
