//! Resolves what a pointer-down lands on.

use glam::Vec3;
use label_document::{BoxCollection, BoxId};
use viewport::{pick_ground, ray_aabb, ray_sphere, Ray};

use crate::handles::{interactable_handles, ResizeHandle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget {
    Handle { box_id: BoxId, handle: ResizeHandle },
    Body(BoxId),
    Ground(Vec3),
    Nothing,
}

/// Handles of the selected box win over box bodies, which win over the ground.
/// Among candidates of the same kind the nearest along the ray is chosen.
pub fn hit_test(
    ray: &Ray,
    boxes: &BoxCollection,
    selection: Option<BoxId>,
    handle_radius: f32,
) -> HitTarget {
    let handle = interactable_handles(selection, boxes)
        .into_iter()
        .filter_map(|h| ray_sphere(ray, h.position, handle_radius).map(|t| (t, h)))
        .min_by(|a, b| a.0.total_cmp(&b.0));
    if let Some((_, h)) = handle {
        return HitTarget::Handle {
            box_id: h.box_id,
            handle: h.handle,
        };
    }

    let body = boxes
        .iter()
        .filter_map(|b| ray_aabb(ray, b.min(), b.max()).map(|t| (t, b.id)))
        .min_by(|a, b| a.0.total_cmp(&b.0));
    if let Some((_, id)) = body {
        return HitTarget::Body(id);
    }

    match pick_ground(ray) {
        Some(point) => HitTarget::Ground(point),
        None => HitTarget::Nothing,
    }
}
