use crate::config::EditorConfig;
use crate::controller::command_types::Mode;
use crate::document_model::{Register, TextBuffer, UndoManager};

/// Mutable state every command executes against.
pub struct SharedEditorState {
    pub buffer: TextBuffer,
    pub mode: Mode,
    pub register: Register,
    pub undo_manager: UndoManager,
    pub vim_enabled: bool,
    /// Maximum buffer length in chars, 0 for unlimited
    pub char_limit: usize,
    pub status_message: String,
    pub submit_requested: bool,
}

impl SharedEditorState {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            buffer: TextBuffer::new(),
            mode: config.initial_mode(),
            register: Register::new(),
            undo_manager: UndoManager::new(),
            vim_enabled: config.vim_enabled,
            char_limit: config.char_limit,
            status_message: String::new(),
            submit_requested: false,
        }
    }

    /// Chars that can still be inserted, `None` when unlimited.
    pub fn remaining_capacity(&self) -> Option<usize> {
        if self.char_limit == 0 {
            None
        } else {
            Some(self.char_limit.saturating_sub(self.buffer.char_len()))
        }
    }

    pub fn has_room_for(&self, chars: usize) -> bool {
        self.remaining_capacity().is_none_or(|room| room >= chars)
    }
}
