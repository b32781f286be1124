//! Labeled box primitives.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest extent any box may have along any axis.
pub const MIN_EXTENT: f32 = 0.5;

/// Unique identifier for a box in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxId(pub Uuid);

impl BoxId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BoxId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Object classes an annotator can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectClass {
    Car,
    Pedestrian,
    Cyclist,
}

impl ObjectClass {
    pub const ALL: [ObjectClass; 3] = [
        ObjectClass::Car,
        ObjectClass::Pedestrian,
        ObjectClass::Cyclist,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ObjectClass::Car => "car",
            ObjectClass::Pedestrian => "pedestrian",
            ObjectClass::Cyclist => "cyclist",
        }
    }

    /// Default extents (width, height, depth) in world units.
    pub fn preset_size(self) -> Vec3 {
        match self {
            ObjectClass::Car => Vec3::new(4.0, 2.0, 2.0),
            ObjectClass::Pedestrian => Vec3::new(0.6, 1.8, 0.6),
            ObjectClass::Cyclist => Vec3::new(1.8, 1.8, 0.8),
        }
    }

    pub const fn color(self) -> LabelColor {
        match self {
            ObjectClass::Car => LabelColor::rgb(0x3b, 0x82, 0xf6),
            ObjectClass::Pedestrian => LabelColor::rgb(0xef, 0x44, 0x44),
            ObjectClass::Cyclist => LabelColor::rgb(0x22, 0xc5, 0x5e),
        }
    }

    /// Center for a box of this class resting on the ground at `ground`.
    pub fn resting_center(self, ground: Vec3) -> Vec3 {
        Vec3::new(ground.x, self.preset_size().y * 0.5, ground.z)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "car" => Some(ObjectClass::Car),
            "pedestrian" => Some(ObjectClass::Pedestrian),
            "cyclist" => Some(ObjectClass::Cyclist),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// sRGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LabelColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// An axis-aligned labeled cuboid.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBox {
    pub id: BoxId,
    /// Geometric center in world space.
    pub position: Vec3,
    /// Extents along X (width), Y (height) and Z (depth).
    pub size: Vec3,
    pub class: ObjectClass,
}

impl LabelBox {
    pub fn new(position: Vec3, class: ObjectClass) -> Self {
        Self {
            id: BoxId::new(),
            position,
            size: class.preset_size(),
            class,
        }
    }

    pub fn color(&self) -> LabelColor {
        self.class.color()
    }

    pub fn min(&self) -> Vec3 {
        self.position - self.size * 0.5
    }

    pub fn max(&self) -> Vec3 {
        self.position + self.size * 0.5
    }
}

/// Clamp every extent to [`MIN_EXTENT`].
pub fn clamp_size(size: Vec3) -> Vec3 {
    size.max(Vec3::splat(MIN_EXTENT))
}
