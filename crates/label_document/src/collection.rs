//! Ordered box storage.

use crate::annotation::{BoxId, LabelBox, ObjectClass};

/// Boxes in insertion order. Order is used for display and export only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxCollection {
    boxes: Vec<LabelBox>,
}

impl BoxCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label_box: LabelBox) -> BoxId {
        let id = label_box.id;
        self.boxes.push(label_box);
        id
    }

    pub fn get(&self, id: BoxId) -> Option<&LabelBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BoxId) -> Option<&mut LabelBox> {
        self.boxes.iter_mut().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BoxId) -> bool {
        self.get(id).is_some()
    }

    /// Remove a box, returning it if it was present.
    pub fn remove(&mut self, id: BoxId) -> Option<LabelBox> {
        let index = self.boxes.iter().position(|b| b.id == id)?;
        Some(self.boxes.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelBox> {
        self.boxes.iter()
    }

    pub fn as_slice(&self) -> &[LabelBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn stats(&self) -> ClassStats {
        let mut stats = ClassStats::default();
        for b in &self.boxes {
            match b.class {
                ObjectClass::Car => stats.car += 1,
                ObjectClass::Pedestrian => stats.pedestrian += 1,
                ObjectClass::Cyclist => stats.cyclist += 1,
            }
        }
        stats
    }
}

impl<'a> IntoIterator for &'a BoxCollection {
    type Item = &'a LabelBox;
    type IntoIter = std::slice::Iter<'a, LabelBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

/// Per-class box counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassStats {
    pub car: usize,
    pub pedestrian: usize,
    pub cyclist: usize,
}

impl ClassStats {
    pub fn count(&self, class: ObjectClass) -> usize {
        match class {
            ObjectClass::Car => self.car,
            ObjectClass::Pedestrian => self.pedestrian,
            ObjectClass::Cyclist => self.cyclist,
        }
    }

    pub fn total(&self) -> usize {
        self.car + self.pedestrian + self.cyclist
    }
}
