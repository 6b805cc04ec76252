use crate::controller::command_types::{Command, CommandResult, Mode};
use crate::controller::key_handler::{KeyChord, KeySequence};
use crate::controller::shared_state::SharedEditorState;
use crate::document_model::Position;
use crate::document_model::movement;
use crossterm::event::KeyCode;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    FirstNonBlank,
    LineEnd,
    WordForward,
    WordBackward,
}

/// Cursor movement bound in one mode.
///
/// In Normal mode the cursor rests on a character; in Insert mode it may sit
/// just past the last one.
pub struct Motion {
    id: &'static str,
    mode: Mode,
    kind: MotionKind,
    keys: Vec<KeyChord>,
}

impl Motion {
    pub fn new(id: &'static str, mode: Mode, kind: MotionKind, keys: Vec<KeyChord>) -> Self {
        Self {
            id,
            mode,
            kind,
            keys,
        }
    }

    /// Normal-mode motions: hjkl, arrows, 0 ^ $, Home/End, w b.
    pub fn normal_set() -> Vec<Arc<dyn Command>> {
        let n = Mode::Normal;
        vec![
            Self::boxed(
                "motion.left",
                n,
                MotionKind::Left,
                vec![KeyChord::char('h'), KeyChord::plain(KeyCode::Left)],
            ),
            Self::boxed(
                "motion.right",
                n,
                MotionKind::Right,
                vec![KeyChord::char('l'), KeyChord::plain(KeyCode::Right)],
            ),
            Self::boxed(
                "motion.up",
                n,
                MotionKind::Up,
                vec![KeyChord::char('k'), KeyChord::plain(KeyCode::Up)],
            ),
            Self::boxed(
                "motion.down",
                n,
                MotionKind::Down,
                vec![KeyChord::char('j'), KeyChord::plain(KeyCode::Down)],
            ),
            Self::boxed(
                "motion.line_start",
                n,
                MotionKind::LineStart,
                vec![KeyChord::char('0'), KeyChord::plain(KeyCode::Home)],
            ),
            Self::boxed(
                "motion.first_non_blank",
                n,
                MotionKind::FirstNonBlank,
                vec![KeyChord::char('^')],
            ),
            Self::boxed(
                "motion.line_end",
                n,
                MotionKind::LineEnd,
                vec![KeyChord::char('$'), KeyChord::plain(KeyCode::End)],
            ),
            Self::boxed(
                "motion.word_forward",
                n,
                MotionKind::WordForward,
                vec![KeyChord::char('w')],
            ),
            Self::boxed(
                "motion.word_backward",
                n,
                MotionKind::WordBackward,
                vec![KeyChord::char('b')],
            ),
        ]
    }

    /// Navigation keys that pass through Insert mode.
    pub fn insert_set() -> Vec<Arc<dyn Command>> {
        let i = Mode::Insert;
        vec![
            Self::boxed(
                "insert.motion.left",
                i,
                MotionKind::Left,
                vec![KeyChord::plain(KeyCode::Left)],
            ),
            Self::boxed(
                "insert.motion.right",
                i,
                MotionKind::Right,
                vec![KeyChord::plain(KeyCode::Right)],
            ),
            Self::boxed("insert.motion.up", i, MotionKind::Up, vec![KeyChord::plain(KeyCode::Up)]),
            Self::boxed(
                "insert.motion.down",
                i,
                MotionKind::Down,
                vec![KeyChord::plain(KeyCode::Down)],
            ),
            Self::boxed(
                "insert.motion.line_start",
                i,
                MotionKind::LineStart,
                vec![KeyChord::plain(KeyCode::Home)],
            ),
            Self::boxed(
                "insert.motion.line_end",
                i,
                MotionKind::LineEnd,
                vec![KeyChord::plain(KeyCode::End)],
            ),
        ]
    }

    fn boxed(
        id: &'static str,
        mode: Mode,
        kind: MotionKind,
        keys: Vec<KeyChord>,
    ) -> Arc<dyn Command> {
        Arc::new(Self::new(id, mode, kind, keys))
    }

    fn target(&self, state: &SharedEditorState) -> Position {
        let buffer = &state.buffer;
        let cursor = buffer.cursor();
        let line = buffer.current_line();
        let len = buffer.line_length(cursor.row);
        let on_char = self.mode == Mode::Normal;
        let last_col = |len: usize| if on_char { len.saturating_sub(1) } else { len };

        match self.kind {
            MotionKind::Left => Position::new(cursor.row, cursor.col.saturating_sub(1)),
            MotionKind::Right => Position::new(cursor.row, (cursor.col + 1).min(last_col(len))),
            MotionKind::Up | MotionKind::Down => {
                let row = if self.kind == MotionKind::Up {
                    cursor.row.saturating_sub(1)
                } else {
                    (cursor.row + 1).min(buffer.line_count() - 1)
                };
                Position::new(row, cursor.col.min(last_col(buffer.line_length(row))))
            }
            MotionKind::LineStart => Position::new(cursor.row, 0),
            MotionKind::FirstNonBlank => {
                Position::new(cursor.row, movement::first_non_blank(line).min(last_col(len)))
            }
            MotionKind::LineEnd => Position::new(cursor.row, last_col(len)),
            MotionKind::WordForward => {
                let next = movement::next_word_start(line, cursor.col);
                if next < len {
                    Position::new(cursor.row, next)
                } else if cursor.row + 1 < buffer.line_count() {
                    let row = cursor.row + 1;
                    let below = buffer.line(row).unwrap_or_default();
                    let last = last_col(buffer.line_length(row));
                    Position::new(row, movement::first_non_blank(below).min(last))
                } else {
                    Position::new(cursor.row, last_col(len))
                }
            }
            MotionKind::WordBackward => {
                let prev = movement::prev_word_start(line, cursor.col);
                let has_word_before = movement::first_non_blank(line) < cursor.col.min(len);
                if has_word_before || cursor.row == 0 {
                    Position::new(cursor.row, prev)
                } else {
                    let row = cursor.row - 1;
                    let above = buffer.line(row).unwrap_or_default();
                    Position::new(row, movement::last_word_start(above).unwrap_or(0))
                }
            }
        }
    }
}

impl Command for Motion {
    fn id(&self) -> &'static str {
        self.id
    }

    fn keys(&self) -> Vec<KeySequence> {
        self.keys.iter().map(|chord| vec![*chord]).collect()
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn execute(&self, state: &mut SharedEditorState) -> CommandResult {
        let target = self.target(state);
        if target == state.buffer.cursor() {
            return CommandResult::Ignored;
        }
        state.buffer.set_cursor(target);
        CommandResult::Executed
    }
}
