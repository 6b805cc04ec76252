use crate::controller::key_handler::KeySequence;
use crate::controller::shared_state::SharedEditorState;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
}

impl Mode {
    /// Short label for a status line.
    pub fn indicator(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Executed,
    Ignored,
}

/// A stateless editor command.
///
/// Commands only act through the state handle passed to [`Command::execute`].
/// The key sequences a command declares decide where it is registered:
/// single chords go to the direct table, two-chord sequences to the
/// operator-pending table.
pub trait Command: Send + Sync {
    /// Stable dotted identifier used in diagnostics.
    fn id(&self) -> &'static str;

    fn keys(&self) -> Vec<KeySequence>;

    /// The only mode this command may be dispatched in.
    fn mode(&self) -> Mode;

    fn is_undoable(&self) -> bool {
        false
    }

    fn changes_content(&self) -> bool {
        false
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult;
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id())
            .field("mode", &self.mode())
            .finish()
    }
}
