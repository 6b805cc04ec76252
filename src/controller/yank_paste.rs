use crate::controller::command_types::{Command, CommandResult, Mode};
use crate::controller::key_handler::{KeyChord, KeySequence};
use crate::controller::shared_state::SharedEditorState;
use crate::document_model::movement;
use crate::document_model::{Position, RegisterType};
use std::sync::Arc;

pub(crate) const YANK: KeyChord = KeyChord::char('y');
pub(crate) const WORD_MOTION: KeyChord = KeyChord::char('w');
pub(crate) const EOL_MOTION: KeyChord = KeyChord::char('$');

/// Char columns `start..end` on the cursor row, the range a charwise operator acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub row: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Cursor to the start of the next word, or to end of line inside the last word.
pub(crate) fn word_span(state: &SharedEditorState) -> Span {
    let cursor = state.buffer.cursor();
    let line = state.buffer.current_line();
    let len = state.buffer.line_length(cursor.row);
    if cursor.col >= len {
        return Span { row: cursor.row, start: cursor.col, end: cursor.col };
    }
    Span {
        row: cursor.row,
        start: cursor.col,
        end: movement::next_word_start(line, cursor.col),
    }
}

/// Cursor to end of line.
pub(crate) fn eol_span(state: &SharedEditorState) -> Span {
    let cursor = state.buffer.cursor();
    let len = state.buffer.line_length(cursor.row);
    Span {
        row: cursor.row,
        start: cursor.col.min(len),
        end: len,
    }
}

pub(crate) fn yank_feedback(text: &str, register_type: RegisterType) -> String {
    let word_count = text.split_whitespace().count();
    let line_count = text.split('\n').count();

    if register_type == RegisterType::Line {
        if line_count > 1 {
            format!("{line_count} lines yanked")
        } else {
            "1 line yanked".to_string()
        }
    } else if word_count > 1 {
        format!("{word_count} words yanked")
    } else {
        "Text yanked".to_string()
    }
}

/// `yy`: the whole cursor line, linewise.
pub struct YankLine;

impl Command for YankLine {
    fn id(&self) -> &'static str {
        "yank.line"
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![vec![YANK, YANK]]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        let text = state.buffer.current_line().to_string();
        state.status_message = yank_feedback(&text, RegisterType::Line);
        state.register.store(text, RegisterType::Line);
        CommandResult::Executed
    }
}

/// `yw`: cursor to the start of the next word, charwise.
pub struct YankWord;

impl Command for YankWord {
    fn id(&self) -> &'static str {
        "yank.word"
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![vec![YANK, WORD_MOTION]]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        let span = word_span(state);
        let text = state.buffer.slice(span.row, span.start, span.end);
        state.status_message = yank_feedback(&text, RegisterType::Character);
        state.register.store(text, RegisterType::Character);
        CommandResult::Executed
    }
}

/// `y$` and its alias `Y`: cursor to end of line, charwise.
pub struct YankToEndOfLine;

impl Command for YankToEndOfLine {
    fn id(&self) -> &'static str {
        "yank.eol"
    }

    fn keys(&self) -> Vec<KeySequence> {
        vec![vec![YANK, EOL_MOTION], vec![KeyChord::char('Y')]]
    }

    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        let span = eol_span(state);
        let text = state.buffer.slice(span.row, span.start, span.end);
        state.status_message = yank_feedback(&text, RegisterType::Character);
        state.register.store(text, RegisterType::Character);
        CommandResult::Executed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteType {
    After,
    Before,
}

/// `p` / `P`: put the register back, as whole lines when it was yanked linewise.
pub struct Paste {
    paste_type: PasteType,
}

impl Paste {
    pub fn new(paste_type: PasteType) -> Self {
        Self { paste_type }
    }

    fn paste_line_wise(&self, state: &mut SharedEditorState, content: &str) -> CommandResult {
        let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        let added: usize = lines.iter().map(|l| l.chars().count() + 1).sum();
        if !state.has_room_for(added) {
            return CommandResult::Ignored;
        }

        let row = state.buffer.cursor().row;
        let insert_line = match self.paste_type {
            PasteType::After => row + 1,
            PasteType::Before => row,
        };
        state.buffer.insert_lines(insert_line, &lines);
        state.buffer.set_cursor(Position::new(insert_line, 0));
        CommandResult::Executed
    }

    fn paste_character_wise(&self, state: &mut SharedEditorState, content: &str) -> CommandResult {
        if content.is_empty() || !state.has_room_for(content.chars().count()) {
            return CommandResult::Ignored;
        }

        let cursor = state.buffer.cursor();
        let line_length = state.buffer.line_length(cursor.row);
        let insert_col = match self.paste_type {
            PasteType::After if line_length > 0 => (cursor.col + 1).min(line_length),
            _ => cursor.col,
        };

        let end = state
            .buffer
            .insert_str(Position::new(cursor.row, insert_col), content);
        // Rest on the last pasted char
        state
            .buffer
            .set_cursor(Position::new(end.row, end.col.saturating_sub(1)));
        CommandResult::Executed
    }
}

impl Command for Paste {
    fn id(&self) -> &'static str {
        match self.paste_type {
            PasteType::After => "paste.after",
            PasteType::Before => "paste.before",
        }
    }

    fn keys(&self) -> Vec<KeySequence> {
        let key = match self.paste_type {
            PasteType::After => 'p',
            PasteType::Before => 'P',
        };
        vec![vec![KeyChord::char(key)]]
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
        if state.register.is_empty() {
            return CommandResult::Ignored;
        }
        let content = state.register.content().to_string();
        if state.register.is_linewise() {
            self.paste_line_wise(state, &content)
        } else {
            self.paste_character_wise(state, &content)
        }
    }
}

pub fn yank_set() -> Vec<Arc<dyn Command>> {
    vec![
        Arc::new(YankLine),
        Arc::new(YankWord),
        Arc::new(YankToEndOfLine),
    ]
}

pub fn paste_set() -> Vec<Arc<dyn Command>> {
    vec![
        Arc::new(Paste::new(PasteType::After)),
        Arc::new(Paste::new(PasteType::Before)),
    ]
}
