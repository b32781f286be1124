//! Pointer gesture state machine.
//!
//! [`transition`] is a pure function: it looks at the current state, a
//! read-only view of the document and one pointer event, and returns the next
//! state plus the effects the session must apply. It never mutates anything.

use glam::Vec3;
use label_document::{BoxCollection, BoxId, ObjectClass};
use viewport::{pick_axis_coordinate, pick_ground, Ray};

use crate::handles::ResizeHandle;
use crate::hit::{hit_test, HitTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// A box was just placed; waiting for the button to come up.
    Creating,
    Moving(BoxId),
    Resizing(BoxId, ResizeHandle),
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }
}

/// What the transition function may read.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext<'a> {
    pub boxes: &'a BoxCollection,
    pub selection: Option<BoxId>,
    pub armed: Option<ObjectClass>,
    /// Unit camera view direction, used to orient resize drag planes.
    pub view_dir: Vec3,
    pub handle_radius: f32,
}

/// Primary-button pointer events, already converted to world rays.
/// A `None` ray means the pointer is outside a usable viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Down(Option<Ray>),
    Move(Option<Ray>),
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    CapturePointer,
    ReleasePointer,
    /// Add a box, select it and commit.
    CreateBox {
        position: Vec3,
        class: ObjectClass,
    },
    Select(BoxId),
    /// Transient position update.
    MoveBox {
        id: BoxId,
        position: Vec3,
    },
    /// Transient size update.
    ResizeBox {
        id: BoxId,
        size: Vec3,
    },
    /// Commit if the live boxes differ from the last snapshot.
    Commit,
    SetOrbit(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GestureState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: GestureState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn to(state: GestureState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }
}

pub fn transition(state: GestureState, ctx: &GestureContext<'_>, event: GestureEvent) -> Transition {
    match (state, event) {
        (GestureState::Idle, GestureEvent::Down(Some(ray))) => pointer_down(ctx, &ray),
        (GestureState::Moving(id), GestureEvent::Move(Some(ray))) => {
            let effects = drag_move(ctx, id, &ray).into_iter().collect();
            Transition::to(state, effects)
        }
        (GestureState::Resizing(id, handle), GestureEvent::Move(Some(ray))) => {
            let effects = drag_resize(ctx, id, handle, &ray).into_iter().collect();
            Transition::to(state, effects)
        }
        (GestureState::Creating, GestureEvent::Up) => Transition::to(
            GestureState::Idle,
            vec![Effect::ReleasePointer, Effect::SetOrbit(true)],
        ),
        (GestureState::Moving(_) | GestureState::Resizing(..), GestureEvent::Up) => {
            Transition::to(
                GestureState::Idle,
                vec![Effect::ReleasePointer, Effect::Commit, Effect::SetOrbit(true)],
            )
        }
        // Up without a down, a second down mid-gesture, moves while idle or creating,
        // and any event whose ray missed the viewport.
        _ => Transition::stay(state),
    }
}

fn pointer_down(ctx: &GestureContext<'_>, ray: &Ray) -> Transition {
    match hit_test(ray, ctx.boxes, ctx.selection, ctx.handle_radius) {
        HitTarget::Handle { box_id, handle } => Transition::to(
            GestureState::Resizing(box_id, handle),
            vec![Effect::CapturePointer, Effect::SetOrbit(false)],
        ),
        HitTarget::Body(id) => Transition::to(
            GestureState::Moving(id),
            vec![
                Effect::CapturePointer,
                Effect::Select(id),
                Effect::SetOrbit(false),
            ],
        ),
        HitTarget::Ground(point) => match ctx.armed {
            Some(class) => Transition::to(
                GestureState::Creating,
                vec![
                    Effect::CapturePointer,
                    Effect::CreateBox {
                        position: class.resting_center(point),
                        class,
                    },
                    Effect::SetOrbit(false),
                ],
            ),
            None => Transition::stay(GestureState::Idle),
        },
        HitTarget::Nothing => Transition::stay(GestureState::Idle),
    }
}

/// Horizontal drag on the ground plane. Height is preserved.
fn drag_move(ctx: &GestureContext<'_>, id: BoxId, ray: &Ray) -> Option<Effect> {
    let label_box = ctx.boxes.get(id)?;
    let ground = pick_ground(ray)?;
    Some(Effect::MoveBox {
        id,
        position: Vec3::new(ground.x, label_box.position.y, ground.z),
    })
}

fn drag_resize(
    ctx: &GestureContext<'_>,
    id: BoxId,
    handle: ResizeHandle,
    ray: &Ray,
) -> Option<Effect> {
    let label_box = ctx.boxes.get(id)?;
    let picked = pick_axis_coordinate(ray, handle.axis(), handle.anchor(label_box), ctx.view_dir)?;
    Some(Effect::ResizeBox {
        id,
        size: handle.resized(label_box, picked),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use label_document::LabelBox;

    const TOP_DOWN: Vec3 = Vec3::NEG_Y;

    fn down_at(x: f32, z: f32) -> Option<Ray> {
        Some(Ray::new(Vec3::new(x, 30.0, z), TOP_DOWN))
    }

    fn ctx<'a>(boxes: &'a BoxCollection, selection: Option<BoxId>) -> GestureContext<'a> {
        GestureContext {
            boxes,
            selection,
            armed: Some(ObjectClass::Car),
            view_dir: TOP_DOWN,
            handle_radius: 0.2,
        }
    }

    fn scene() -> (BoxCollection, BoxId) {
        let mut boxes = BoxCollection::new();
        let id = boxes.push(LabelBox::new(Vec3::new(0.0, 1.0, 0.0), ObjectClass::Car));
        (boxes, id)
    }

    #[test]
    fn ground_down_with_armed_label_creates_resting_box() {
        let boxes = BoxCollection::new();
        let t = transition(
            GestureState::Idle,
            &ctx(&boxes, None),
            GestureEvent::Down(down_at(5.0, 3.0)),
        );
        assert_eq!(t.state, GestureState::Creating);
        assert_eq!(
            t.effects,
            vec![
                Effect::CapturePointer,
                Effect::CreateBox {
                    position: Vec3::new(5.0, 1.0, 3.0),
                    class: ObjectClass::Car
                },
                Effect::SetOrbit(false),
            ]
        );

        let up = transition(t.state, &ctx(&boxes, None), GestureEvent::Up);
        assert_eq!(up.state, GestureState::Idle);
        assert_eq!(up.effects, vec![Effect::ReleasePointer, Effect::SetOrbit(true)]);
    }

    #[test]
    fn ground_down_without_armed_label_does_nothing() {
        let boxes = BoxCollection::new();
        let mut c = ctx(&boxes, None);
        c.armed = None;
        let t = transition(GestureState::Idle, &c, GestureEvent::Down(down_at(5.0, 3.0)));
        assert_eq!(t, Transition::stay(GestureState::Idle));
    }

    #[test]
    fn body_down_selects_and_starts_move() {
        let (boxes, id) = scene();
        let t = transition(
            GestureState::Idle,
            &ctx(&boxes, None),
            GestureEvent::Down(down_at(1.5, 0.5)),
        );
        assert_eq!(t.state, GestureState::Moving(id));
        assert_eq!(
            t.effects,
            vec![
                Effect::CapturePointer,
                Effect::Select(id),
                Effect::SetOrbit(false)
            ]
        );
    }

    #[test]
    fn move_keeps_height_and_follows_ground() {
        let (boxes, id) = scene();
        let t = transition(
            GestureState::Moving(id),
            &ctx(&boxes, Some(id)),
            GestureEvent::Move(down_at(7.0, -2.0)),
        );
        assert_eq!(t.state, GestureState::Moving(id));
        assert_eq!(
            t.effects,
            vec![Effect::MoveBox {
                id,
                position: Vec3::new(7.0, 1.0, -2.0)
            }]
        );
    }

    #[test]
    fn handle_down_starts_resize_and_move_resizes_one_axis() {
        let (boxes, id) = scene();
        let c = ctx(&boxes, Some(id));
        let t = transition(GestureState::Idle, &c, GestureEvent::Down(down_at(2.0, 0.0)));
        assert_eq!(t.state, GestureState::Resizing(id, ResizeHandle::PosX));
        assert_eq!(t.effects, vec![Effect::CapturePointer, Effect::SetOrbit(false)]);

        let drag = transition(t.state, &c, GestureEvent::Move(down_at(3.0, 4.0)));
        assert_eq!(
            drag.effects,
            vec![Effect::ResizeBox {
                id,
                size: Vec3::new(6.0, 2.0, 2.0)
            }]
        );
    }

    #[test]
    fn gesture_up_commits_once_and_reenables_orbit() {
        let (boxes, id) = scene();
        for state in [
            GestureState::Moving(id),
            GestureState::Resizing(id, ResizeHandle::NegZ),
        ] {
            let t = transition(state, &ctx(&boxes, Some(id)), GestureEvent::Up);
            assert_eq!(t.state, GestureState::Idle);
            assert_eq!(
                t.effects,
                vec![Effect::ReleasePointer, Effect::Commit, Effect::SetOrbit(true)]
            );
        }
    }

    #[test]
    fn stray_events_are_ignored() {
        let (boxes, id) = scene();
        let c = ctx(&boxes, Some(id));
        assert_eq!(
            transition(GestureState::Idle, &c, GestureEvent::Up),
            Transition::stay(GestureState::Idle)
        );
        assert_eq!(
            transition(GestureState::Idle, &c, GestureEvent::Move(down_at(1.0, 1.0))),
            Transition::stay(GestureState::Idle)
        );
        assert_eq!(
            transition(GestureState::Moving(id), &c, GestureEvent::Down(down_at(9.0, 9.0))),
            Transition::stay(GestureState::Moving(id))
        );
        assert_eq!(
            transition(GestureState::Idle, &c, GestureEvent::Down(None)),
            Transition::stay(GestureState::Idle)
        );
    }

    #[test]
    fn move_with_missed_pick_leaves_box_alone() {
        let (boxes, id) = scene();
        let skyward = Some(Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y));
        let t = transition(
            GestureState::Moving(id),
            &ctx(&boxes, Some(id)),
            GestureEvent::Move(skyward),
        );
        assert!(t.effects.is_empty());
    }

    #[test]
    fn vanished_target_produces_no_effects() {
        let boxes = BoxCollection::new();
        let ghost = BoxId::new();
        let t = transition(
            GestureState::Resizing(ghost, ResizeHandle::PosY),
            &ctx(&boxes, None),
            GestureEvent::Move(down_at(0.0, 0.0)),
        );
        assert!(t.effects.is_empty());
    }
}
