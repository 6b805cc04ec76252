//! Entering, editing in, and leaving Insert mode.

use crate::controller::command_types::{Command, CommandResult, Mode};
use crate::controller::key_handler::{KeyChord, KeySequence};
use crate::controller::shared_state::SharedEditorState;
use crate::document_model::Position;
use crate::document_model::movement;
use crossterm::event::KeyCode;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertEntry {
    Before,        // i
    After,         // a
    LineEnd,       // A
    FirstNonBlank, // I
}

/// Switch from Normal to Insert, placing the cursor first.
pub struct EnterInsert {
    entry: InsertEntry,
}

impl EnterInsert {
    pub fn new(entry: InsertEntry) -> Self {
        Self { entry }
    }

    pub fn all() -> Vec<Arc<dyn Command>> {
        vec![
            Arc::new(Self::new(InsertEntry::Before)),
            Arc::new(Self::new(InsertEntry::After)),
            Arc::new(Self::new(InsertEntry::LineEnd)),
            Arc::new(Self::new(InsertEntry::FirstNonBlank)),
        ]
    }
}

impl Command for EnterInsert {
    fn id(&self) -> &'static str {
        match self.entry {
            InsertEntry::Before => "mode.insert",
            InsertEntry::After => "mode.append",
            InsertEntry::LineEnd => "mode.append_eol",
            InsertEntry::FirstNonBlank => "mode.insert_bol",
        }
    }

    fn keys(&self) -> Vec<KeySequence> {
        let key = match self.entry {
            InsertEntry::Before => 'i',
            InsertEntry::After => 'a',
            InsertEntry::LineEnd => 'A',
            InsertEntry::FirstNonBlank => 'I',
        };
        vec![vec![KeyChord::char(key)]]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        let cursor = state.buffer.cursor();
        let len = state.buffer.line_length(cursor.row);
        let col = match self.entry {
            InsertEntry::Before => cursor.col,
            InsertEntry::After => (cursor.col + 1).min(len),
            InsertEntry::LineEnd => len,
            InsertEntry::FirstNonBlank => movement::first_non_blank(state.buffer.current_line()),
        };
        state.buffer.set_cursor(Position::new(cursor.row, col));
        state.mode = Mode::Insert;
        CommandResult::Executed
    }
}

/// `o` / `O`: open an empty line and start inserting on it.
pub struct OpenLine {
    above: bool,
}

impl OpenLine {
    pub fn below() -> Self {
        Self { above: false }
    }

    pub fn above() -> Self {
        Self { above: true }
    }
}

impl Command for OpenLine {
    fn id(&self) -> &'static str {
        if self.above { "mode.open_above" } else { "mode.open_below" }
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![vec![KeyChord::char(if self.above { 'O' } else { 'o' })]]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn is_undoable(&self) -> bool {
        true
    }

    fn changes_content(&self) -> bool {
        true
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        if !state.has_room_for(1) {
            return CommandResult::Ignored;
        }
        let row = state.buffer.cursor().row;
        let at = if self.above { row } else { row + 1 };
        state.buffer.insert_lines(at, &[String::new()]);
        state.buffer.set_cursor(Position::new(at, 0));
        state.mode = Mode::Insert;
        CommandResult::Executed
    }
}

/// Esc in Insert mode: back to Normal with the cursor on the last char typed.
/// A non-modal field has nowhere to go, so it ignores it.
pub struct ExitInsert;

impl Command for ExitInsert {
    fn id(&self) -> &'static str {
        "mode.normal"
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![vec![KeyChord::plain(KeyCode::Esc)]]
    }

    fn mode(&self) -> Mode {
        Mode::Insert
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        if !state.vim_enabled {
            return CommandResult::Ignored;
        }
        state.mode = Mode::Normal;
        state.buffer.move_cursor_left();
        CommandResult::Executed
    }
}

pub struct InsertNewline;

impl Command for InsertNewline {
    fn id(&self) -> &'static str {
        "insert.newline"
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![vec![KeyChord::plain(KeyCode::Enter)]]
    }

    fn mode(&self) -> Mode {
        Mode::Insert
    }

    fn is_undoable(&self) -> bool {
        true
    }

    fn changes_content(&self) -> bool {
        true
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        if !state.has_room_for(1) {
            return CommandResult::Ignored;
        }
        let cursor = state.buffer.cursor();
        state.buffer.split_line(cursor);
        state.buffer.set_cursor(Position::new(cursor.row + 1, 0));
        CommandResult::Executed
    }
}

/// Delete the char before the cursor, joining with the previous line at column 0.
pub struct Backspace;

impl Command for Backspace {
    fn id(&self) -> &'static str {
        "insert.backspace"
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![
            vec![KeyChord::plain(KeyCode::Backspace)],
            vec![KeyChord::ctrl('h')],
        ]
    }

    fn mode(&self) -> Mode {
        Mode::Insert
    }

    fn is_undoable(&self) -> bool {
        true
    }

    fn changes_content(&self) -> bool {
        true
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        let cursor = state.buffer.cursor();
        if cursor.col > 0 {
            state.buffer.delete_range(cursor.row, cursor.col - 1, cursor.col);
            state.buffer.set_cursor(Position::new(cursor.row, cursor.col - 1));
            CommandResult::Executed
        } else if cursor.row > 0 {
            match state.buffer.join_with_next(cursor.row - 1) {
                Some(col) => {
                    state.buffer.set_cursor(Position::new(cursor.row - 1, col));
                    CommandResult::Executed
                }
                None => CommandResult::Ignored,
            }
        } else {
            CommandResult::Ignored
        }
    }
}

/// Delete the char under the cursor, joining the next line at end of line.
pub struct DeleteForward;

impl Command for DeleteForward {
    fn id(&self) -> &'static str {
        "insert.delete"
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![vec![KeyChord::plain(KeyCode::Delete)]]
    }

    fn mode(&self) -> Mode {
        Mode::Insert
    }

    fn is_undoable(&self) -> bool {
        true
    }

    fn changes_content(&self) -> bool {
        true
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        let cursor = state.buffer.cursor();
        if cursor.col < state.buffer.line_length(cursor.row) {
            state.buffer.delete_range(cursor.row, cursor.col, cursor.col + 1);
            CommandResult::Executed
        } else if state.buffer.join_with_next(cursor.row).is_some() {
            state.buffer.set_cursor(cursor);
            CommandResult::Executed
        } else {
            CommandResult::Ignored
        }
    }
}

/// Literal character typed in Insert mode. Built on the fly, never registered.
pub struct InsertChar(pub char);

impl Command for InsertChar {
    fn id(&self) -> &'static str {
        "insert.char"
    }

    fn keys(&self) -> Vec<KeySequence> {
        Vec::new()
    }

    fn mode(&self) -> Mode {
        Mode::Insert
    }

    fn is_undoable(&self) -> bool {
        true
    }

    fn changes_content(&self) -> bool {
        true
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        if !state.has_room_for(1) {
            return CommandResult::Ignored;
        }
        let mut encoded = [0; 4];
        let cursor = state.buffer.cursor();
        let end = state.buffer.insert_str(cursor, self.0.encode_utf8(&mut encoded));
        state.buffer.set_cursor(end);
        CommandResult::Executed
    }
}

/// Pasted text in Insert mode, truncated to what the char limit still allows.
pub struct InsertText(pub String);

impl Command for InsertText {
    fn id(&self) -> &'static str {
        "insert.text"
    }

    fn keys(&self) -> Vec<KeySequence> {
        Vec::new()
    }

    fn mode(&self) -> Mode {
        Mode::Insert
    }

    fn is_undoable(&self) -> bool {
        true
    }

    fn changes_content(&self) -> bool {
        true
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        let normalized = self.0.replace("\r\n", "\n").replace('\r', "\n");
        let text: String = match state.remaining_capacity() {
            Some(room) => normalized.chars().take(room).collect(),
            None => normalized,
        };
        if text.is_empty() {
            return CommandResult::Ignored;
        }
        let cursor = state.buffer.cursor();
        let end = state.buffer.insert_str(cursor, &text);
        state.buffer.set_cursor(end);
        CommandResult::Executed
    }
}

/// Registered Insert-mode control keys.
pub fn insert_set() -> Vec<Arc<dyn Command>> {
    vec![
        Arc::new(ExitInsert),
        Arc::new(InsertNewline),
        Arc::new(Backspace),
        Arc::new(DeleteForward),
    ]
}
