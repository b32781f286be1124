//! Interactive box annotation: resize handles, pointer gestures, shortcuts and
//! the session object that ties them to a document and a camera.

pub mod gesture;
pub mod handles;
pub mod hit;
pub mod session;
pub mod shortcuts;

pub use gesture::{transition, Effect, GestureContext, GestureEvent, GestureState, Transition};
pub use handles::{interactable_handles, PlacedHandle, ResizeHandle};
pub use hit::{hit_test, HitTarget};
pub use session::EditorSession;
pub use shortcuts::{command_for_key, EditorCommand};
