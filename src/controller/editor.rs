use crate::config::EditorConfig;
use crate::controller::command_types::{Command, CommandResult, Mode};
use crate::controller::insert::{InsertChar, InsertText};
use crate::controller::key_handler::KeyChord;
use crate::controller::pending::{FeedResult, PendingBuilder};
use crate::controller::registry::CommandRegistry;
use crate::controller::shared_state::SharedEditorState;
use crate::document_model::{Position, Register, TextBuffer, UndoAction};
use crate::view::{BufferViewModel, RenderParams, View};
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Application-level messages an editor hands back to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMessage {
    /// The submit key fired; carries the full buffer text.
    Submit(String),
}

/// Outbound action returned from [`EditorController::update`]. Running it
/// yields the message; the host decides when.
pub struct DeferredMessage(Box<dyn FnOnce() -> EditorMessage + Send>);

impl DeferredMessage {
    pub fn new(f: impl FnOnce() -> EditorMessage + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn run(self) -> EditorMessage {
        (self.0)()
    }
}

impl fmt::Debug for DeferredMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeferredMessage")
    }
}

/// One modal input field: buffer, mode, register, history and the key
/// routing that drives them.
pub struct EditorController {
    shared_state: SharedEditorState,
    registry: Arc<CommandRegistry>,
    pending: PendingBuilder,
    view: View,
    config: EditorConfig,
    focused: bool,
}

impl EditorController {
    pub fn new(config: EditorConfig) -> Self {
        let registry = if config.submit_in_insert {
            CommandRegistry::single_line()
        } else {
            CommandRegistry::shared()
        };
        Self::with_registry(config, registry)
    }

    pub fn with_registry(config: EditorConfig, registry: Arc<CommandRegistry>) -> Self {
        Self {
            shared_state: SharedEditorState::new(&config),
            registry,
            pending: PendingBuilder::new(),
            view: View::new(config.max_height),
            config,
            focused: false,
        }
    }

    /// Consume one input event. Returns a deferred message when the event submitted the field.
    pub fn update(&mut self, event: &Event) -> Option<DeferredMessage> {
        if !self.focused {
            trace!("event ignored while blurred");
            return None;
        }

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Paste(text) => self.handle_paste(text),
            _ => {}
        }

        self.follow_cursor();
        self.take_submit()
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let chord = KeyChord::from_event(key);

        if !self.shared_state.vim_enabled {
            self.handle_literal_key(chord);
            return;
        }

        let mode = self.shared_state.mode;
        if self.pending.is_pending() || self.registry.pending().is_operator(mode, chord) {
            match self.pending.feed(self.registry.pending(), mode, chord) {
                FeedResult::Resolved(command) => self.dispatch(command.as_ref()),
                FeedResult::AwaitingMore | FeedResult::Canceled => {}
            }
            return;
        }

        if let Some(command) = self.registry.get(mode, chord) {
            self.dispatch(command.as_ref());
        } else if let (Mode::Insert, Some(c)) = (mode, chord.printable()) {
            self.dispatch(&InsertChar(c));
        } else {
            trace!(key = %chord, ?mode, "unbound key ignored");
        }
    }

    /// Non-modal input: Insert-mode bindings plus literal text, nothing else.
    fn handle_literal_key(&mut self, chord: KeyChord) {
        if let Some(command) = self.registry.get(Mode::Insert, chord) {
            self.dispatch(command.as_ref());
        } else if let Some(c) = chord.printable() {
            self.dispatch(&InsertChar(c));
        } else {
            trace!(key = %chord, "unbound key ignored");
        }
    }

    fn handle_paste(&mut self, text: &str) {
        self.pending.cancel();
        if self.shared_state.mode != Mode::Insert {
            trace!("paste ignored outside Insert mode");
            return;
        }
        self.dispatch(&InsertText(text.to_string()));
    }

    fn dispatch(&mut self, command: &dyn Command) {
        let state = &mut self.shared_state;
        if command.mode() != state.mode {
            trace!(command = command.id(), mode = ?state.mode, "command not valid in mode");
            return;
        }

        let snapshot = command
            .is_undoable()
            .then(|| (state.buffer.lines().to_vec(), state.buffer.cursor()));

        let result = command.execute(state);
        debug!(command = command.id(), ?result, "dispatched");

        if let (CommandResult::Executed, Some((before, cursor_before))) = (result, snapshot) {
            if let Some(action) = UndoAction::diff(&before, state.buffer.lines()) {
                if !state.undo_manager.is_group_open() {
                    state.undo_manager.start_group(cursor_before);
                }
                state.undo_manager.add_action(action);
            }
        }

        // An Insert session, including the change that opened it, undoes as one step
        if state.mode == Mode::Normal || !state.vim_enabled {
            state.undo_manager.end_group(state.buffer.cursor());
        }
    }

    fn take_submit(&mut self) -> Option<DeferredMessage> {
        if !std::mem::take(&mut self.shared_state.submit_requested) {
            return None;
        }
        let value = self.shared_state.buffer.as_string();
        debug!(chars = value.chars().count(), "submit");
        Some(DeferredMessage::new(move || EditorMessage::Submit(value)))
    }

    fn follow_cursor(&mut self) {
        let model = BufferViewModel::new(&self.shared_state.buffer);
        self.view.adjust_scroll_to_cursor(&model);
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.view.set_size(width, height);
        self.follow_cursor();
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Stop accepting input. Any half-typed operator is dropped.
    pub fn blur(&mut self) {
        self.focused = false;
        self.pending.cancel();
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn view(&self) -> String {
        let model = BufferViewModel::new(&self.shared_state.buffer);
        self.view.render(
            &model,
            &RenderParams {
                mode: self.shared_state.mode,
                focused: self.focused,
                placeholder: &self.config.placeholder,
            },
        )
    }

    pub fn mode_indicator(&self) -> &'static str {
        self.shared_state.mode.indicator()
    }

    pub fn value(&self) -> String {
        self.shared_state.buffer.as_string()
    }

    /// Replace the content, truncated to the char limit. Clears history and
    /// puts the cursor at the end of the text.
    pub fn set_value(&mut self, value: &str) {
        let value = value.replace("\r\n", "\n");
        let value: String = match self.config.char_limit {
            0 => value,
            limit => value.chars().take(limit).collect(),
        };
        let state = &mut self.shared_state;
        state.buffer = TextBuffer::from_string(&value);
        let row = state.buffer.line_count() - 1;
        let len = state.buffer.line_length(row);
        let col = match state.mode {
            Mode::Insert => len,
            Mode::Normal => len.saturating_sub(1),
        };
        state.buffer.set_cursor(Position::new(row, col));
        state.undo_manager.clear();
        self.pending.cancel();
        self.follow_cursor();
    }

    /// Back to a freshly constructed state. Focus and size are kept.
    pub fn reset(&mut self) {
        self.shared_state = SharedEditorState::new(&self.config);
        self.pending.cancel();
        self.follow_cursor();
    }

    pub fn lines(&self) -> &[String] {
        self.shared_state.buffer.lines()
    }

    pub fn cursor(&self) -> Position {
        self.shared_state.buffer.cursor()
    }

    pub fn mode(&self) -> Mode {
        self.shared_state.mode
    }

    pub fn register(&self) -> &Register {
        &self.shared_state.register
    }

    pub fn status_message(&self) -> &str {
        &self.shared_state.status_message
    }

    /// The operator waiting for its motion, if any.
    pub fn pending_operator(&self) -> Option<KeyChord> {
        self.pending.pending_operator()
    }

    pub fn can_undo(&self) -> bool {
        self.shared_state.undo_manager.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.shared_state.undo_manager.can_redo()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::registry::RegistryBuilder;
    use crate::document_model::RegisterType;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn editor_with(config: EditorConfig, content: &str) -> EditorController {
        crate::logging::test();
        let mut editor = EditorController::new(config);
        editor.set_value(content);
        editor.focus();
        editor
    }

    fn editor(content: &str) -> EditorController {
        let mut editor = editor_with(EditorConfig::default(), content);
        press(&mut editor, KeyCode::Char('0'));
        editor
    }

    fn press(editor: &mut EditorController, code: KeyCode) -> Option<DeferredMessage> {
        editor.update(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(editor: &mut EditorController, c: char) {
        editor.update(&Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)));
    }

    fn type_keys(editor: &mut EditorController, keys: &str) {
        for c in keys.chars() {
            let modifiers = if c.is_ascii_uppercase() {
                KeyModifiers::SHIFT
            } else {
                KeyModifiers::NONE
            };
            editor.update(&Event::Key(KeyEvent::new(KeyCode::Char(c), modifiers)));
        }
    }

    fn esc(editor: &mut EditorController) {
        press(editor, KeyCode::Esc);
    }

    #[test]
    fn test_starts_in_normal_mode_and_blurred() {
        let editor = EditorController::new(EditorConfig::default());
        assert_eq!(editor.mode(), Mode::Normal);
        assert_eq!(editor.mode_indicator(), "NORMAL");
        assert!(!editor.focused());
        assert_eq!(editor.lines(), [String::new()]);
    }

    #[test]
    fn test_blurred_editor_ignores_keys() {
        let mut editor = editor("hello");
        editor.blur();
        type_keys(&mut editor, "dd");
        assert_eq!(editor.value(), "hello");
        editor.focus();
        type_keys(&mut editor, "dd");
        assert_eq!(editor.value(), "");
    }

    #[test]
    fn test_blur_drops_pending_operator() {
        let mut editor = editor("hello world");
        type_keys(&mut editor, "d");
        assert_eq!(editor.pending_operator(), Some(KeyChord::char('d')));
        editor.blur();
        editor.focus();
        assert_eq!(editor.pending_operator(), None);
        type_keys(&mut editor, "w");
        assert_eq!(editor.value(), "hello world");
        assert_eq!(editor.cursor(), Position::new(0, 6));
    }

    #[test]
    fn test_yank_scenarios_through_keys() {
        let mut editor = editor("hello world");
        type_keys(&mut editor, "yy");
        assert_eq!(editor.register().content(), "hello world");
        assert!(editor.register().is_linewise());

        type_keys(&mut editor, "yw");
        assert_eq!(editor.register().content(), "hello ");
        assert!(!editor.register().is_linewise());

        type_keys(&mut editor, "w");
        assert_eq!(editor.cursor(), Position::new(0, 6));
        type_keys(&mut editor, "yw");
        assert_eq!(editor.register().content(), "world");
        type_keys(&mut editor, "y$");
        assert_eq!(editor.register().content(), "world");
        type_keys(&mut editor, "Y");
        assert_eq!(editor.register().content(), "world");
        assert_eq!(editor.cursor(), Position::new(0, 6));
        assert_eq!(editor.value(), "hello world");
    }

    #[test]
    fn test_unknown_motion_cancels_without_effect() {
        let mut editor = editor("hello world");
        type_keys(&mut editor, "yw");
        type_keys(&mut editor, "yz");
        assert_eq!(editor.register().content(), "hello ");
        assert_eq!(editor.pending_operator(), None);
        assert_eq!(editor.value(), "hello world");

        // The canceled motion key is discarded, not replayed as a command
        type_keys(&mut editor, "yl");
        assert_eq!(editor.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_escape_cancels_pending() {
        let mut editor = editor("hello");
        type_keys(&mut editor, "d");
        esc(&mut editor);
        type_keys(&mut editor, "w");
        assert_eq!(editor.value(), "hello");
        assert_eq!(editor.mode(), Mode::Normal);
    }

    #[test]
    fn test_new_operator_restarts_pending() {
        let mut editor = editor("one\ntwo");
        type_keys(&mut editor, "kydd");
        assert_eq!(editor.value(), "two");
        assert_eq!(editor.register().content(), "one");
    }

    #[test]
    fn test_insert_session_and_escape() {
        let mut editor = editor("");
        type_keys(&mut editor, "ihello");
        assert_eq!(editor.mode(), Mode::Insert);
        assert_eq!(editor.mode_indicator(), "INSERT");
        esc(&mut editor);
        assert_eq!(editor.value(), "hello");
        assert_eq!(editor.mode(), Mode::Normal);
        assert_eq!(editor.cursor(), Position::new(0, 4));
    }

    #[test]
    fn test_insert_mode_keys_are_literal() {
        let mut editor = editor("");
        type_keys(&mut editor, "iyy dd u");
        assert_eq!(editor.value(), "yy dd u");
        assert_eq!(editor.register().content(), "");
    }

    #[test]
    fn test_newline_and_backspace_in_insert() {
        let mut editor = editor("");
        type_keys(&mut editor, "iab");
        press(&mut editor, KeyCode::Enter);
        type_keys(&mut editor, "c");
        assert_eq!(editor.lines(), ["ab".to_string(), "c".to_string()]);
        press(&mut editor, KeyCode::Backspace);
        press(&mut editor, KeyCode::Backspace);
        assert_eq!(editor.value(), "ab");
        assert_eq!(editor.cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_undo_insert_session_as_one_step() {
        let mut editor = editor("");
        type_keys(&mut editor, "ihello");
        esc(&mut editor);
        type_keys(&mut editor, "A world");
        esc(&mut editor);
        assert_eq!(editor.value(), "hello world");

        type_keys(&mut editor, "u");
        assert_eq!(editor.value(), "hello");
        assert_eq!(editor.status_message(), "6 changes undone");
        type_keys(&mut editor, "u");
        assert_eq!(editor.value(), "");
        assert!(!editor.can_undo());

        ctrl(&mut editor, 'r');
        assert_eq!(editor.value(), "hello");
        ctrl(&mut editor, 'r');
        assert_eq!(editor.value(), "hello world");
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_undo_delete_restores_buffer_and_cursor() {
        let mut editor = editor("one\ntwo\nthree");
        type_keys(&mut editor, "kldd");
        assert_eq!(editor.value(), "one\nthree");
        assert_eq!(editor.register().register_type(), RegisterType::Line);
        type_keys(&mut editor, "u");
        assert_eq!(editor.value(), "one\ntwo\nthree");
        assert_eq!(editor.cursor(), Position::new(1, 1));
    }

    #[test]
    fn test_change_word_and_undo() {
        let mut editor = editor("hello world");
        type_keys(&mut editor, "cwbye");
        esc(&mut editor);
        assert_eq!(editor.value(), "bye world");
        assert_eq!(editor.register().content(), "hello");
        type_keys(&mut editor, "u");
        assert_eq!(editor.value(), "hello world");
        assert_eq!(editor.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_change_aliases() {
        let mut editor = editor("hello world");
        type_keys(&mut editor, "wCthere");
        esc(&mut editor);
        assert_eq!(editor.value(), "hello there");

        type_keys(&mut editor, "Snew");
        esc(&mut editor);
        assert_eq!(editor.value(), "new");
        assert_eq!(editor.register().content(), "hello there");
    }

    #[test]
    fn test_delete_paste_roundtrip() {
        let mut editor = editor("one\ntwo");
        type_keys(&mut editor, "kddp");
        assert_eq!(editor.value(), "two\none");
        assert_eq!(editor.cursor(), Position::new(1, 0));
        type_keys(&mut editor, "kP");
        assert_eq!(editor.value(), "one\ntwo\none");
    }

    #[test]
    fn test_delete_char_and_paste() {
        let mut editor = editor("abc");
        type_keys(&mut editor, "xp");
        assert_eq!(editor.value(), "bac");
        press(&mut editor, KeyCode::Delete);
        assert_eq!(editor.value(), "bc");
    }

    #[test]
    fn test_yank_does_not_touch_history() {
        let mut editor = editor("hello world");
        type_keys(&mut editor, "yyywy$Y");
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_open_line_and_undo() {
        let mut editor = editor("first");
        type_keys(&mut editor, "osecond");
        esc(&mut editor);
        type_keys(&mut editor, "Ozero");
        esc(&mut editor);
        assert_eq!(editor.value(), "first\nzero\nsecond");
        assert_eq!(editor.cursor(), Position::new(1, 3));

        type_keys(&mut editor, "u");
        assert_eq!(editor.value(), "first\nsecond");
        assert_eq!(editor.cursor(), Position::new(1, 5));

        ctrl(&mut editor, 'r');
        assert_eq!(editor.value(), "first\nzero\nsecond");
        assert_eq!(editor.cursor(), Position::new(1, 3));

        type_keys(&mut editor, "uu");
        assert_eq!(editor.value(), "first");
        assert_eq!(editor.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_paste_undo_and_redo() {
        let mut editor = editor("one two");
        type_keys(&mut editor, "ywP");
        assert_eq!(editor.value(), "one one two");
        assert_eq!(editor.cursor(), Position::new(0, 3));

        type_keys(&mut editor, "u");
        assert_eq!(editor.value(), "one two");
        assert_eq!(editor.cursor(), Position::new(0, 0));

        ctrl(&mut editor, 'r');
        assert_eq!(editor.value(), "one one two");
        assert_eq!(editor.cursor(), Position::new(0, 3));
    }

    #[test]
    fn test_linewise_paste_undo_and_redo() {
        let mut editor = editor("one\ntwo");
        type_keys(&mut editor, "yyp");
        assert_eq!(editor.value(), "one\ntwo\ntwo");
        assert_eq!(editor.cursor(), Position::new(2, 0));

        type_keys(&mut editor, "u");
        assert_eq!(editor.value(), "one\ntwo");
        assert_eq!(editor.cursor(), Position::new(1, 0));

        ctrl(&mut editor, 'r');
        assert_eq!(editor.value(), "one\ntwo\ntwo");
        assert_eq!(editor.cursor(), Position::new(2, 0));
    }

    #[test]
    fn test_control_chars_are_not_typed() {
        let mut editor = editor("");
        type_keys(&mut editor, "i\u{1b}\u{7}a");
        assert_eq!(editor.value(), "a");
    }

    #[test]
    fn test_arrow_keys_in_insert_mode() {
        let mut editor = editor("ac");
        type_keys(&mut editor, "a");
        press(&mut editor, KeyCode::Right);
        press(&mut editor, KeyCode::Left);
        type_keys(&mut editor, "b");
        assert_eq!(editor.value(), "abc");
    }

    #[test]
    fn test_char_limit() {
        let config = EditorConfig {
            char_limit: 5,
            ..EditorConfig::default()
        };
        let mut editor = editor_with(config, "");
        type_keys(&mut editor, "iabcdefg");
        assert_eq!(editor.value(), "abcde");
        press(&mut editor, KeyCode::Enter);
        assert_eq!(editor.value(), "abcde");
        esc(&mut editor);
        type_keys(&mut editor, "yyp");
        assert_eq!(editor.value(), "abcde");

        editor.set_value("far too long");
        assert_eq!(editor.value(), "far t");
    }

    #[test]
    fn test_paste_event_in_insert_mode() {
        let mut editor = editor("");
        editor.update(&Event::Paste("pasted\r\ntext".to_string()));
        assert_eq!(editor.value(), "");

        type_keys(&mut editor, "i");
        editor.update(&Event::Paste("pasted\r\ntext".to_string()));
        assert_eq!(editor.lines(), ["pasted".to_string(), "text".to_string()]);
        esc(&mut editor);
        type_keys(&mut editor, "u");
        assert_eq!(editor.value(), "");
    }

    #[test]
    fn test_key_release_and_repeat_are_ignored() {
        let mut editor = editor("abc");
        let mut event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            event.kind = kind;
            editor.update(&Event::Key(event));
        }
        assert_eq!(editor.value(), "abc");
    }

    #[test]
    fn test_submit_from_normal_mode() {
        let mut editor = editor("");
        type_keys(&mut editor, "ihi");
        assert!(press(&mut editor, KeyCode::Enter).is_none());
        esc(&mut editor);
        let message = press(&mut editor, KeyCode::Enter).map(DeferredMessage::run);
        assert_eq!(message, Some(EditorMessage::Submit("hi\n".to_string())));
        assert_eq!(editor.value(), "hi\n");
    }

    #[test]
    fn test_submit_in_insert_for_single_line_fields() {
        let config = EditorConfig {
            submit_in_insert: true,
            default_mode: Mode::Insert,
            ..EditorConfig::default()
        };
        let mut editor = editor_with(config, "");
        assert_eq!(editor.mode(), Mode::Insert);
        type_keys(&mut editor, "send me");
        let message = press(&mut editor, KeyCode::Enter).map(DeferredMessage::run);
        assert_eq!(message, Some(EditorMessage::Submit("send me".to_string())));
        assert_eq!(editor.lines().len(), 1);
    }

    #[test]
    fn test_vim_disabled_is_plain_input() {
        let config = EditorConfig {
            vim_enabled: false,
            ..EditorConfig::default()
        };
        let mut editor = editor_with(config, "");
        type_keys(&mut editor, "dd");
        esc(&mut editor);
        type_keys(&mut editor, "u");
        assert_eq!(editor.value(), "ddu");
        assert_eq!(editor.mode(), Mode::Insert);
        press(&mut editor, KeyCode::Backspace);
        assert_eq!(editor.value(), "dd");
    }

    #[test]
    fn test_ctrl_chords_never_type() {
        let mut editor = editor("");
        type_keys(&mut editor, "i");
        ctrl(&mut editor, 'x');
        assert_eq!(editor.value(), "");
    }

    #[test]
    fn test_custom_registry() {
        let registry = Arc::new(RegistryBuilder::standard().unregister("delete.line").build());
        let mut editor = EditorController::with_registry(EditorConfig::default(), registry);
        editor.set_value("keep");
        editor.focus();
        type_keys(&mut editor, "dd");
        assert_eq!(editor.value(), "keep");
        esc(&mut editor);
        type_keys(&mut editor, "0dw");
        assert_eq!(editor.value(), "");
    }

    #[test]
    fn test_reset() {
        let mut editor = editor("text");
        type_keys(&mut editor, "yyx");
        editor.reset();
        assert_eq!(editor.value(), "");
        assert!(editor.register().is_empty());
        assert!(!editor.can_undo());
        assert!(editor.focused());
    }

    #[test]
    fn test_view_renders_buffer() {
        let mut editor = editor("one\ntwo\nthree");
        editor.blur();
        editor.set_size(10, 2);
        assert_eq!(editor.view(), "two\nthree");
    }

    #[test]
    fn test_edge_keys_never_fault() {
        let mut editor = editor("");
        type_keys(&mut editor, "hjklwb0^$xXpPuDCdwywcwyy");
        press(&mut editor, KeyCode::Backspace);
        press(&mut editor, KeyCode::Delete);
        press(&mut editor, KeyCode::Tab);
        esc(&mut editor);
        assert_eq!(editor.lines().len(), 1);
    }
}
