use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use label_document::{InputEvent, MouseButton};
use settings::{CameraSettings, MouseButtonSetting};
use tracing::debug;

use crate::picking::Ray;
use crate::view::{preset_pose, CameraPose, CameraView};

const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;
const WORLD_UP: Vec3 = Vec3::Y;
/// |forward.y| above this is treated as looking straight up or down.
const POLE_LIMIT: f32 = 0.999;

#[derive(Debug)]
pub struct CameraController {
    target: Vec3,
    radius: f32,
    orientation: Quat,

    view: CameraView,

    fov_y_deg: f32,
    near: f32,
    far: f32,

    orbit_enabled: bool,
    orbiting: bool,
    last_cursor: Option<Vec2>,

    viewport_origin: (f32, f32),
    viewport_size: (u32, u32),
}

impl CameraController {
    pub fn new(settings: &CameraSettings, initial_viewport: (u32, u32)) -> Self {
        let mut controller = Self {
            target: Vec3::ZERO,
            radius: 1.0,
            orientation: Quat::IDENTITY,
            view: settings.initial_view,
            fov_y_deg: settings.fov_degrees,
            near: settings.near,
            far: settings.far,
            orbit_enabled: true,
            orbiting: false,
            last_cursor: None,
            viewport_origin: (0.0, 0.0),
            viewport_size: initial_viewport,
        };
        controller.apply_pose(preset_pose(settings.initial_view));
        controller
    }

    /// Snap to a named view, discarding any orbit or zoom offset.
    pub fn set_view(&mut self, view: CameraView) {
        self.view = view;
        self.orbiting = false;
        self.last_cursor = None;
        self.apply_pose(preset_pose(view));
        debug!(?view, "camera view changed");
    }

    pub fn view(&self) -> CameraView {
        self.view
    }

    fn apply_pose(&mut self, pose: CameraPose) {
        let offset = pose.target - pose.eye;
        let forward = offset.normalize_or_zero();
        let mut right = forward.cross(pose.up);
        if right.length_squared() < 1e-6 {
            right = Vec3::X;
        }
        let right = right.normalize();
        let up = right.cross(forward).normalize();

        let basis = Mat3::from_cols(right, up, -forward);
        self.orientation = Quat::from_mat3(&basis).normalize();
        self.target = pose.target;
        self.radius = offset.length();
    }

    /// Free orbit is allowed only while no gesture owns the pointer.
    pub fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit_enabled = enabled;
        if !enabled {
            self.orbiting = false;
            self.last_cursor = None;
        }
    }

    pub fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    /// Feed a pointer or scroll event. Returns true if the camera moved or changed mode.
    pub fn handle_input(&mut self, event: &InputEvent, settings: &CameraSettings) -> bool {
        let orbit_button = mouse_button_from_setting(settings.orbit_button);
        match event {
            InputEvent::PointerDown {
                button,
                viewport_pos,
                ..
            } if *button == orbit_button && self.orbit_enabled => {
                self.orbiting = true;
                self.last_cursor = Some(Vec2::new(viewport_pos.0, viewport_pos.1));
                true
            }
            InputEvent::PointerUp { button, .. } if *button == orbit_button && self.orbiting => {
                self.orbiting = false;
                self.last_cursor = None;
                true
            }
            InputEvent::PointerMove { viewport_pos, .. } if self.orbiting => {
                let position = Vec2::new(viewport_pos.0, viewport_pos.1);
                let changed = match self.last_cursor {
                    Some(last) => {
                        self.orbit_turntable(position - last, settings);
                        true
                    }
                    None => false,
                };
                self.last_cursor = Some(position);
                changed
            }
            InputEvent::Scroll { lines } if self.orbit_enabled => {
                self.zoom(*lines, settings);
                true
            }
            _ => false,
        }
    }

    /// Yaw around world up, pitch around camera right; pitch stops short of the poles.
    fn orbit_turntable(&mut self, delta: Vec2, settings: &CameraSettings) {
        let sens = settings.orbit_sensitivity * 0.01;
        let yaw_q = Quat::from_axis_angle(WORLD_UP, -delta.x * sens);
        let right = (self.orientation * Vec3::X).normalize_or_zero();
        let pitch_q = if right.length_squared() > 0.0 {
            Quat::from_axis_angle(right, -delta.y * sens)
        } else {
            Quat::IDENTITY
        };

        let current_pole = self.forward().y.abs();
        let pitched = (pitch_q * self.orientation).normalize();
        let pitched_pole = (pitched * Vec3::NEG_Z).y.abs();
        let base = if pitched_pole > POLE_LIMIT && pitched_pole > current_pole {
            self.orientation
        } else {
            pitched
        };
        self.orientation = (yaw_q * base).normalize();
    }

    fn zoom(&mut self, amount: f32, settings: &CameraSettings) {
        let direction = if settings.invert_zoom { 1.0 } else { -1.0 };
        let delta = amount * direction * settings.zoom_sensitivity;
        let lo = settings.min_distance.min(settings.max_distance);
        let hi = settings.min_distance.max(settings.max_distance);
        // max/min rather than clamp: bounds come straight from a user file.
        self.radius = (self.radius + delta).max(lo).min(hi);
    }

    pub fn update_viewport(&mut self, origin: (u32, u32), size: (u32, u32)) {
        self.viewport_origin = (origin.0 as f32, origin.1 as f32);
        self.viewport_size = size;
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        self.viewport_size
    }

    fn aspect(&self) -> f32 {
        let (w, h) = self.viewport_size;
        if w == 0 || h == 0 {
            1.0
        } else {
            w as f32 / h as f32
        }
    }

    fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(
            self.fov_y_deg * DEG_TO_RAD,
            self.aspect().max(0.001),
            self.near,
            self.far,
        );
        proj * self.view_matrix()
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position_vec(), self.target, self.orientation * Vec3::Y)
    }

    fn position_vec(&self) -> Vec3 {
        self.target - self.forward() * self.radius
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        (self.orientation * Vec3::NEG_Z).normalize_or_zero()
    }

    pub fn position(&self) -> Vec3 {
        self.position_vec()
    }

    /// Project a world position to viewport pixels (origin top-left, Y down).
    /// Returns `None` if the point is behind the camera.
    pub fn world_to_screen(&self, world_pos: Vec3) -> Option<(f32, f32)> {
        let (w, h) = self.viewport_size;
        let clip = self.view_proj() * world_pos.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let screen_x = (ndc.x + 1.0) * 0.5 * w as f32 + self.viewport_origin.0;
        let screen_y = (1.0 - ndc.y) * 0.5 * h as f32 + self.viewport_origin.1;
        Some((screen_x, screen_y))
    }

    /// World-space ray through a viewport pixel. `None` for an empty viewport.
    pub fn screen_ray(&self, viewport_pos: (f32, f32)) -> Option<Ray> {
        let (w, h) = self.viewport_size;
        if w == 0 || h == 0 {
            return None;
        }
        let ndc_x = (viewport_pos.0 - self.viewport_origin.0) / w as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - (viewport_pos.1 - self.viewport_origin.1) / h as f32 * 2.0;

        let inv = self.view_proj().inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        let direction = far - near;
        if !direction.is_finite() || direction.length_squared() == 0.0 {
            return None;
        }
        Some(Ray::new(near, direction))
    }
}

fn mouse_button_from_setting(setting: MouseButtonSetting) -> MouseButton {
    match setting {
        MouseButtonSetting::Left => MouseButton::Left,
        MouseButtonSetting::Middle => MouseButton::Middle,
        MouseButtonSetting::Right => MouseButton::Right,
    }
}
