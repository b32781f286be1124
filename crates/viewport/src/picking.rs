//! Ray casting against the ground plane, drag planes, boxes and handles.
//!
//! Everything here is a pure function of its inputs. A miss is `None`, never an
//! error: callers treat it as "nothing under the pointer".

use axes::Axis;
use glam::Vec3;

const PARALLEL_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    /// Unit normal.
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
        }
    }

    /// The Y=0 plane boxes rest on.
    pub fn ground() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y)
    }
}

/// Intersection of `ray` with `plane` in front of the ray origin.
pub fn intersect_plane(ray: &Ray, plane: &Plane) -> Option<Vec3> {
    let denom = plane.normal.dot(ray.direction);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (plane.point - ray.origin).dot(plane.normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(ray.at(t))
}

pub fn pick_ground(ray: &Ray) -> Option<Vec3> {
    intersect_plane(ray, &Plane::ground())
}

/// Plane through `anchor` that contains `axis` and faces the viewer as much as possible.
///
/// Returns `None` when the view direction is parallel to the axis, since every
/// plane containing the axis is then seen edge-on.
pub fn axis_drag_plane(axis: Axis, anchor: Vec3, view_dir: Vec3) -> Option<Plane> {
    let normal = axis.reject(view_dir);
    if normal.length_squared() < PARALLEL_EPSILON {
        return None;
    }
    Some(Plane::new(anchor, normal))
}

/// Coordinate along `axis` of the point under `ray` on the drag plane through `anchor`.
pub fn pick_axis_coordinate(
    ray: &Ray,
    axis: Axis,
    anchor: Vec3,
    view_dir: Vec3,
) -> Option<f32> {
    let plane = axis_drag_plane(axis, anchor, view_dir)?;
    intersect_plane(ray, &plane).map(|hit| axis.get(hit))
}

/// Slab test against an axis-aligned box. Returns the nearest non-negative `t`.
pub fn ray_aabb(ray: &Ray, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in Axis::ALL {
        let origin = axis.get(ray.origin);
        let dir = axis.get(ray.direction);
        let lo = axis.get(min);
        let hi = axis.get(max);

        if dir.abs() < PARALLEL_EPSILON {
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let mut t0 = (lo - origin) * inv;
        let mut t1 = (hi - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(if t_min >= 0.0 { t_min } else { t_max })
}

/// Nearest non-negative `t` where `ray` enters the sphere.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let near = -b - sqrt_disc;
    let far = -b + sqrt_disc;
    if far < 0.0 {
        return None;
    }
    Some(if near >= 0.0 { near } else { far })
}
