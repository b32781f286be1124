use glam::Vec3;
pub use settings::CameraView;

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Fixed framing for each named view. All views look at the world origin.
pub fn preset_pose(view: CameraView) -> CameraPose {
    match view {
        CameraView::Perspective => CameraPose {
            eye: Vec3::new(0.0, 8.0, 20.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        },
        // Looking straight down, so world Y cannot serve as up.
        CameraView::Top => CameraPose {
            eye: Vec3::new(0.0, 30.0, 0.0),
            target: Vec3::ZERO,
            up: Vec3::NEG_Z,
        },
        CameraView::Side => CameraPose {
            eye: Vec3::new(30.0, 5.0, 0.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        },
    }
}
