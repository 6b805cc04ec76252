use crate::controller::command_types::{Command, CommandResult, Mode};
use crate::controller::key_handler::{KeyChord, KeySequence};
use crate::controller::shared_state::SharedEditorState;
use crossterm::event::KeyCode;

/// Ask the host to take the current value. The controller turns the request
/// into a deferred message after the command returns.
pub struct Submit {
    mode: Mode,
}

impl Submit {
    pub fn normal() -> Self {
        Self { mode: Mode::Normal }
    }

    /// Enter submits from Insert mode too; used by single-line fields.
    pub fn insert() -> Self {
        Self { mode: Mode::Insert }
    }
}

impl Command for Submit {
    fn id(&self) -> &'static str {
        match self.mode {
            Mode::Normal => "submit",
            Mode::Insert => "insert.submit",
        }
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![vec![KeyChord::plain(KeyCode::Enter)]]
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        state.submit_requested = true;
        CommandResult::Executed
    }
}
