//! Camera framing and pointer picking for the 3D annotation viewport.

pub mod camera;
pub mod picking;
pub mod view;

pub use camera::CameraController;
pub use picking::{
    axis_drag_plane, intersect_plane, pick_axis_coordinate, pick_ground, ray_aabb, ray_sphere,
    Plane, Ray,
};
pub use view::{preset_pose, CameraPose, CameraView};
