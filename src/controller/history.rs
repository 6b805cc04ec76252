use crate::controller::command_types::{Command, CommandResult, Mode};
use crate::controller::key_handler::{KeyChord, KeySequence};
use crate::controller::shared_state::SharedEditorState;
use crate::document_model::Position;
use std::sync::Arc;

fn changes_feedback(count: usize, verb: &str) -> String {
    if count == 1 {
        format!("1 change {verb}")
    } else {
        format!("{count} changes {verb}")
    }
}

fn rest_on_char(state: &mut SharedEditorState) {
    let cursor = state.buffer.cursor();
    let last = state.buffer.line_length(cursor.row).saturating_sub(1);
    state.buffer.set_cursor(Position::new(cursor.row, cursor.col.min(last)));
}

/// `u`: revert the most recent undo group.
pub struct Undo;

impl Command for Undo {
    fn id(&self) -> &'static str {
        "history.undo"
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![vec![KeyChord::char('u')]]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn changes_content(&self) -> bool {
        true
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        let cursor = state.buffer.cursor();
        let Some(group) = state.undo_manager.undo(cursor) else {
            state.status_message = "Nothing to undo".to_string();
            return CommandResult::Ignored;
        };
        group.apply_reverse_to_buffer(&mut state.buffer);
        rest_on_char(state);
        state.status_message = changes_feedback(group.actions.len(), "undone");
        CommandResult::Executed
    }
}

/// `Ctrl-r`: reapply the most recently undone group.
pub struct Redo;

impl Command for Redo {
    fn id(&self) -> &'static str {
        "history.redo"
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![vec![KeyChord::ctrl('r')]]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn changes_content(&self) -> bool {
        true
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        let Some(group) = state.undo_manager.redo() else {
            state.status_message = "Nothing to redo".to_string();
            return CommandResult::Ignored;
        };
        group.apply_to_buffer(&mut state.buffer);
        rest_on_char(state);
        state.status_message = changes_feedback(group.actions.len(), "redone");
        CommandResult::Executed
    }
}

pub fn history_set() -> Vec<Arc<dyn Command>> {
    vec![Arc::new(Undo), Arc::new(Redo)]
}
