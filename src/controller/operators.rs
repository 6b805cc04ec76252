//! Delete and change operators. Both overwrite the register with what they remove.

use crate::controller::command_types::{Command, CommandResult, Mode};
use crate::controller::key_handler::{KeyChord, KeySequence};
use crate::controller::shared_state::SharedEditorState;
use crate::controller::yank_paste::{EOL_MOTION, Span, WORD_MOTION, eol_span, word_span};
use crate::document_model::movement;
use crate::document_model::{Position, RegisterType};
use crossterm::event::KeyCode;
use std::sync::Arc;

pub(crate) const DELETE: KeyChord = KeyChord::char('d');
pub(crate) const CHANGE: KeyChord = KeyChord::char('c');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorTarget {
    Line,
    Word,
    ToEndOfLine,
}

fn remove_span(state: &mut SharedEditorState, span: Span) -> String {
    let removed = state.buffer.delete_range(span.row, span.start, span.end);
    state.buffer.set_cursor(Position::new(span.row, span.start));
    removed
}

/// Keep the Normal-mode cursor on a character after text vanished under it.
fn rest_on_char(state: &mut SharedEditorState) {
    let cursor = state.buffer.cursor();
    let last = state.buffer.line_length(cursor.row).saturating_sub(1);
    state.buffer.set_cursor(Position::new(cursor.row, cursor.col.min(last)));
}

/// `dd`, `dw`, `d$` / `D`.
pub struct Delete {
    target: OperatorTarget,
}

impl Delete {
    pub fn new(target: OperatorTarget) -> Self {
        Self { target }
    }
}

impl Command for Delete {
    fn id(&self) -> &'static str {
        match self.target {
            OperatorTarget::Line => "delete.line",
            OperatorTarget::Word => "delete.word",
            OperatorTarget::ToEndOfLine => "delete.eol",
        }
    }

    fn keys(&self) -> Vec<KeySequence> {
        match self.target {
            OperatorTarget::Line => vec![vec![DELETE, DELETE]],
            OperatorTarget::Word => vec![vec![DELETE, WORD_MOTION]],
            OperatorTarget::ToEndOfLine => {
                vec![vec![DELETE, EOL_MOTION], vec![KeyChord::char('D')]]
            }
        }
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
        match self.target {
            OperatorTarget::Line => {
                let row = state.buffer.cursor().row;
                let removed = state.buffer.remove_line(row);
                state.register.store(removed, RegisterType::Line);
                let col = movement::first_non_blank(state.buffer.current_line());
                let row = state.buffer.cursor().row;
                state.buffer.set_cursor(Position::new(row, col));
                rest_on_char(state);
            }
            OperatorTarget::Word | OperatorTarget::ToEndOfLine => {
                let span = if self.target == OperatorTarget::Word {
                    word_span(state)
                } else {
                    eol_span(state)
                };
                if span.is_empty() {
                    return CommandResult::Ignored;
                }
                let removed = remove_span(state, span);
                state.register.store(removed, RegisterType::Character);
                rest_on_char(state);
            }
        }
        CommandResult::Executed
    }
}

/// `x` / Delete in Normal mode: remove the char under the cursor.
pub struct DeleteChar;

impl Command for DeleteChar {
    fn id(&self) -> &'static str {
        "delete.char"
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![
            vec![KeyChord::char('x')],
            vec![KeyChord::plain(KeyCode::Delete)],
        ]
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
        let cursor = state.buffer.cursor();
        if cursor.col >= state.buffer.line_length(cursor.row) {
            return CommandResult::Ignored;
        }
        let removed = state.buffer.delete_range(cursor.row, cursor.col, cursor.col + 1);
        state.register.store(removed, RegisterType::Character);
        rest_on_char(state);
        CommandResult::Executed
    }
}

/// `cc` / `S`, `cw`, `c$` / `C`: delete, then continue in Insert mode.
pub struct Change {
    target: OperatorTarget,
}

impl Change {
    pub fn new(target: OperatorTarget) -> Self {
        Self { target }
    }

    /// `cw` on a word stops at the word's end; on blanks it acts like `dw`.
    fn word_target(state: &SharedEditorState) -> Span {
        let cursor = state.buffer.cursor();
        let line = state.buffer.current_line();
        let on_blank = line
            .chars()
            .nth(cursor.col)
            .is_none_or(char::is_whitespace);
        if on_blank {
            word_span(state)
        } else {
            Span {
                row: cursor.row,
                start: cursor.col,
                end: movement::word_end(line, cursor.col),
            }
        }
    }
}

impl Command for Change {
    fn id(&self) -> &'static str {
        match self.target {
            OperatorTarget::Line => "change.line",
            OperatorTarget::Word => "change.word",
            OperatorTarget::ToEndOfLine => "change.eol",
        }
    }

    fn keys(&self) -> Vec<KeySequence> {
        match self.target {
            OperatorTarget::Line => vec![vec![CHANGE, CHANGE], vec![KeyChord::char('S')]],
            OperatorTarget::Word => vec![vec![CHANGE, WORD_MOTION]],
            OperatorTarget::ToEndOfLine => {
                vec![vec![CHANGE, EOL_MOTION], vec![KeyChord::char('C')]]
            }
        }
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
        match self.target {
            OperatorTarget::Line => {
                let row = state.buffer.cursor().row;
                let removed = state.buffer.current_line().to_string();
                state.buffer.set_line(row, "");
                state.buffer.set_cursor(Position::new(row, 0));
                state.register.store(removed, RegisterType::Line);
            }
            OperatorTarget::Word | OperatorTarget::ToEndOfLine => {
                let span = if self.target == OperatorTarget::Word {
                    Self::word_target(state)
                } else {
                    eol_span(state)
                };
                let removed = remove_span(state, span);
                state.register.store(removed, RegisterType::Character);
            }
        }
        state.mode = Mode::Insert;
        CommandResult::Executed
    }
}

pub fn delete_set() -> Vec<Arc<dyn Command>> {
    vec![
        Arc::new(Delete::new(OperatorTarget::Line)),
        Arc::new(Delete::new(OperatorTarget::Word)),
        Arc::new(Delete::new(OperatorTarget::ToEndOfLine)),
        Arc::new(DeleteChar),
    ]
}

pub fn change_set() -> Vec<Arc<dyn Command>> {
    vec![
        Arc::new(Change::new(OperatorTarget::Line)),
        Arc::new(Change::new(OperatorTarget::Word)),
        Arc::new(Change::new(OperatorTarget::ToEndOfLine)),
    ]
}
