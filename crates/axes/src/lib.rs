//! World axes and the faces of an axis-aligned box.

use std::fmt;

use glam::Vec3;

/// One of the three world axes. Y is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn get(self, v: Vec3) -> f32 {
        v[self as usize]
    }

    /// Copy of `v` with this axis' component set to `value`.
    pub fn with(self, mut v: Vec3, value: f32) -> Vec3 {
        v[self as usize] = value;
        v
    }

    /// `v` with its component along this axis removed.
    pub fn reject(self, v: Vec3) -> Vec3 {
        self.with(v, 0.0)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Which end of an extent a face sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Min,
    Max,
}

impl Side {
    /// `-1.0` for [`Side::Min`], `1.0` for [`Side::Max`].
    pub const fn sign(self) -> f32 {
        match self {
            Side::Min => -1.0,
            Side::Max => 1.0,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Side::Min => Side::Max,
            Side::Max => Side::Min,
        }
    }
}

/// A face of a box described by center and size, e.g. `-X` for the left face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    pub axis: Axis,
    pub side: Side,
}

impl Face {
    pub const fn min(axis: Axis) -> Self {
        Self {
            axis,
            side: Side::Min,
        }
    }

    pub const fn max(axis: Axis) -> Self {
        Self {
            axis,
            side: Side::Max,
        }
    }

    pub const fn opposite(self) -> Self {
        Self {
            axis: self.axis,
            side: self.side.opposite(),
        }
    }

    /// Where this face lies along its axis.
    pub fn coordinate(self, center: Vec3, size: Vec3) -> f32 {
        self.axis.get(center) + self.side.sign() * self.axis.get(size) * 0.5
    }

    /// Center point of this face.
    pub fn center(self, center: Vec3, size: Vec3) -> Vec3 {
        self.axis.with(center, self.coordinate(center, size))
    }

    /// How far `to` lies outside `from` in the direction of the normal.
    pub fn outward_offset(self, from: f32, to: f32) -> f32 {
        self.side.sign() * (to - from)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.side {
            Side::Min => '-',
            Side::Max => '+',
        };
        write!(f, "{sign}{}", self.axis)
    }
}
