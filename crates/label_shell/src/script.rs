//! Scripted input for headless sessions.
//!
//! ```json
//! { "viewport": [800, 600],
//!   "steps": [ { "view": "top" },
//!              { "arm": "pedestrian" },
//!              { "pointer_down": { "x": 400, "y": 300 } },
//!              { "pointer_up": { "x": 400, "y": 300 } },
//!              { "key": { "key": "Z", "ctrl": true } } ] }
//! ```

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use label_document::{InputEvent, KeyCode, Modifiers, MouseButton, ObjectClass, PointerId};
use label_editor::EditorSession;
use serde::Deserialize;
use settings::CameraView;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionScript {
    #[serde(default = "default_viewport")]
    pub viewport: [u32; 2],
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

fn default_viewport() -> [u32; 2] {
    [800, 600]
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    View(CameraView),
    /// `null` disarms.
    Arm(Option<ObjectClass>),
    PointerDown(PointerStep),
    PointerMove(PointerStep),
    PointerUp(PointerStep),
    Scroll(f32),
    Key(KeyStep),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointerStep {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_button")]
    pub button: MouseButton,
    #[serde(default = "default_pointer")]
    pub pointer_id: PointerId,
}

fn default_button() -> MouseButton {
    MouseButton::Left
}

fn default_pointer() -> PointerId {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct KeyStep {
    pub key: KeyCode,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
}

impl SessionScript {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open script {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("invalid session script {}", path.display()))
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        (self.viewport[0], self.viewport[1])
    }

    /// Feed every step to `session`. Returns how many input events were consumed.
    pub fn replay(&self, session: &mut EditorSession) -> usize {
        let mut consumed = 0;
        for (index, step) in self.steps.iter().enumerate() {
            match step.to_input_event() {
                Some(event) => {
                    let result = session.handle_input(&event);
                    debug!(index, ?event, consumed = result.consumed, "replayed input");
                    if result.consumed {
                        consumed += 1;
                    }
                }
                None => match step {
                    ScriptStep::View(view) => session.set_view(*view),
                    ScriptStep::Arm(class) => session.arm(*class),
                    _ => {}
                },
            }
        }
        consumed
    }
}

impl ScriptStep {
    /// Steps that are plain input. View switches and arming are session calls.
    fn to_input_event(&self) -> Option<InputEvent> {
        match *self {
            ScriptStep::PointerDown(p) => Some(InputEvent::PointerDown {
                pointer_id: p.pointer_id,
                button: p.button,
                viewport_pos: (p.x, p.y),
            }),
            ScriptStep::PointerMove(p) => Some(InputEvent::PointerMove {
                pointer_id: p.pointer_id,
                viewport_pos: (p.x, p.y),
            }),
            ScriptStep::PointerUp(p) => Some(InputEvent::PointerUp {
                pointer_id: p.pointer_id,
                button: p.button,
                viewport_pos: (p.x, p.y),
            }),
            ScriptStep::Scroll(lines) => Some(InputEvent::Scroll { lines }),
            ScriptStep::Key(k) => Some(InputEvent::KeyPress {
                key: k.key,
                modifiers: Modifiers {
                    ctrl: k.ctrl,
                    meta: k.meta,
                    shift: k.shift,
                    text_input_focused: false,
                },
            }),
            ScriptStep::View(_) | ScriptStep::Arm(_) => None,
        }
    }
}
