use label_document::{KeyCode, Modifiers, ObjectClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Arm(ObjectClass),
    DeleteSelected,
    ToggleWireframe,
    Undo,
    Redo,
}

/// Map a key press to an editor command. Keys are ignored while a text field has focus.
pub fn command_for_key(key: KeyCode, modifiers: Modifiers) -> Option<EditorCommand> {
    if modifiers.text_input_focused {
        return None;
    }

    if modifiers.command() {
        return match key {
            KeyCode::Z if modifiers.shift => Some(EditorCommand::Redo),
            KeyCode::Z => Some(EditorCommand::Undo),
            _ => None,
        };
    }

    match key {
        KeyCode::C => Some(EditorCommand::Arm(ObjectClass::Car)),
        KeyCode::P => Some(EditorCommand::Arm(ObjectClass::Pedestrian)),
        KeyCode::B => Some(EditorCommand::Arm(ObjectClass::Cyclist)),
        KeyCode::Delete => Some(EditorCommand::DeleteSelected),
        KeyCode::W => Some(EditorCommand::ToggleWireframe),
        KeyCode::Z | KeyCode::Unknown => None,
    }
}
