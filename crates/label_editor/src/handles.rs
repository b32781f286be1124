//! The five single-axis resize handles of a selected box.

use axes::{Axis, Face};
use glam::Vec3;
use label_document::{BoxCollection, BoxId, LabelBox, MIN_EXTENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    PosX,
    NegX,
    PosZ,
    NegZ,
    PosY,
}

impl ResizeHandle {
    /// There is no `-Y` handle: the bottom face sits on the ground.
    pub const ALL: [ResizeHandle; 5] = [
        ResizeHandle::PosX,
        ResizeHandle::NegX,
        ResizeHandle::PosZ,
        ResizeHandle::NegZ,
        ResizeHandle::PosY,
    ];

    pub const fn face(self) -> Face {
        match self {
            ResizeHandle::PosX => Face::max(Axis::X),
            ResizeHandle::NegX => Face::min(Axis::X),
            ResizeHandle::PosZ => Face::max(Axis::Z),
            ResizeHandle::NegZ => Face::min(Axis::Z),
            ResizeHandle::PosY => Face::max(Axis::Y),
        }
    }

    pub const fn axis(self) -> Axis {
        self.face().axis
    }

    /// Face center the handle sits on.
    pub fn anchor(self, label_box: &LabelBox) -> Vec3 {
        self.face().center(label_box.position, label_box.size)
    }

    /// Size after dragging this handle's face to `picked` along its axis.
    ///
    /// The center stays put, so the extent changes by twice the face displacement.
    pub fn resized(self, label_box: &LabelBox, picked: f32) -> Vec3 {
        let face = self.face();
        let current = face.coordinate(label_box.position, label_box.size);
        let delta = face.outward_offset(current, picked);
        let extent = (face.axis.get(label_box.size) + delta * 2.0).max(MIN_EXTENT);
        face.axis.with(label_box.size, extent)
    }
}

/// A handle placed on a concrete box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedHandle {
    pub box_id: BoxId,
    pub handle: ResizeHandle,
    pub position: Vec3,
}

/// Handles the user can grab right now. Only the selected box has any.
pub fn interactable_handles(selection: Option<BoxId>, boxes: &BoxCollection) -> Vec<PlacedHandle> {
    let Some(label_box) = selection.and_then(|id| boxes.get(id)) else {
        return Vec::new();
    };
    ResizeHandle::ALL
        .into_iter()
        .map(|handle| PlacedHandle {
            box_id: label_box.id,
            handle,
            position: handle.anchor(label_box),
        })
        .collect()
}
