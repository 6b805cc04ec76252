use super::text_buffer::{Position, TextBuffer};

/// A reversible edit: lines `start..start + before.len()` became `after`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoAction {
    pub start: usize,
    pub before: Vec<String>,
    pub after: Vec<String>,
}

impl UndoAction {
    /// Smallest line range that differs between `before` and `after`, if any.
    pub fn diff(before: &[String], after: &[String]) -> Option<UndoAction> {
        let prefix = before
            .iter()
            .zip(after.iter())
            .take_while(|(a, b)| a == b)
            .count();
        if prefix == before.len() && prefix == after.len() {
            return None;
        }

        let max_suffix = before.len().min(after.len()) - prefix;
        let suffix = before
            .iter()
            .rev()
            .zip(after.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        Some(UndoAction {
            start: prefix,
            before: before[prefix..before.len() - suffix].to_vec(),
            after: after[prefix..after.len() - suffix].to_vec(),
        })
    }

    /// Apply this action to a buffer (for redo operations)
    pub fn apply_to_buffer(&self, buffer: &mut TextBuffer) {
        buffer.replace_lines(self.start, self.before.len(), &self.after);
    }

    pub fn reverse(&self) -> UndoAction {
        UndoAction {
            start: self.start,
            before: self.after.clone(),
            after: self.before.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UndoGroup {
    pub actions: Vec<UndoAction>,
    pub cursor_before: Position,
    pub cursor_after: Position,
}

impl UndoGroup {
    pub fn new(cursor_pos: Position) -> Self {
        Self {
            actions: Vec::new(),
            cursor_before: cursor_pos,
            cursor_after: cursor_pos,
        }
    }

    pub fn add_action(&mut self, action: UndoAction) {
        self.actions.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Apply this undo group to a buffer (for redo operations)
    pub fn apply_to_buffer(&self, buffer: &mut TextBuffer) {
        for action in &self.actions {
            action.apply_to_buffer(buffer);
        }
        buffer.set_cursor(self.cursor_after);
    }

    /// Apply the reverse of this undo group to a buffer (for undo operations)
    pub fn apply_reverse_to_buffer(&self, buffer: &mut TextBuffer) {
        for action in self.actions.iter().rev() {
            action.reverse().apply_to_buffer(buffer);
        }
        buffer.set_cursor(self.cursor_before);
    }
}

#[derive(Debug, Clone)]
pub struct UndoManager {
    undo_stack: Vec<UndoGroup>,
    redo_stack: Vec<UndoGroup>,
    current_group: Option<UndoGroup>,
    max_undo_levels: usize,
}

impl UndoManager {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            current_group: None,
            max_undo_levels: 1000,
        }
    }

    pub fn is_group_open(&self) -> bool {
        self.current_group.is_some()
    }

    pub fn start_group(&mut self, cursor_pos: Position) {
        self.end_group(cursor_pos);
        self.current_group = Some(UndoGroup::new(cursor_pos));
    }

    pub fn add_action(&mut self, action: UndoAction) {
        self.current_group
            .get_or_insert_with(|| UndoGroup::new(Position::default()))
            .add_action(action);
    }

    pub fn end_group(&mut self, cursor_pos: Position) {
        if let Some(mut group) = self.current_group.take() {
            if !group.is_empty() {
                group.cursor_after = cursor_pos;
                self.push_undo_group(group);
            }
        }
    }

    fn push_undo_group(&mut self, group: UndoGroup) {
        self.undo_stack.push(group);

        if self.undo_stack.len() > self.max_undo_levels {
            self.undo_stack.remove(0);
        }

        // New edits invalidate anything that was undone
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || self.current_group.as_ref().is_some_and(|g| !g.is_empty())
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pop the latest group, closing any open one at `cursor_pos` first.
    pub fn undo(&mut self, cursor_pos: Position) -> Option<UndoGroup> {
        self.end_group(cursor_pos);

        let group = self.undo_stack.pop()?;
        self.redo_stack.push(group.clone());
        Some(group)
    }

    pub fn redo(&mut self) -> Option<UndoGroup> {
        let group = self.redo_stack.pop()?;
        self.undo_stack.push(group.clone());
        Some(group)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_group = None;
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_diff_identical_is_none() {
        let a = lines(&["one", "two"]);
        assert_eq!(UndoAction::diff(&a, &a), None);
    }

    #[test]
    fn test_diff_single_line_change() {
        let action = UndoAction::diff(&lines(&["a", "b", "c"]), &lines(&["a", "x", "c"])).unwrap();
        assert_eq!(action.start, 1);
        assert_eq!(action.before, lines(&["b"]));
        assert_eq!(action.after, lines(&["x"]));
    }

    #[test]
    fn test_diff_line_removed() {
        let action = UndoAction::diff(&lines(&["a", "b", "b"]), &lines(&["a", "b"])).unwrap();
        assert_eq!(action.start, 2);
        assert_eq!(action.before, lines(&["b"]));
        assert!(action.after.is_empty());
    }

    #[test]
    fn test_diff_line_inserted_at_front() {
        let action = UndoAction::diff(&lines(&["b"]), &lines(&["a", "b"])).unwrap();
        assert_eq!(action.start, 0);
        assert!(action.before.is_empty());
        assert_eq!(action.after, lines(&["a"]));
    }

    #[test]
    fn test_group_apply_and_reverse() {
        let before = lines(&["hello", "world"]);
        let after = lines(&["hello"]);
        let mut buffer = TextBuffer::from_lines(after.clone());

        let mut group = UndoGroup::new(Position::new(1, 2));
        group.add_action(UndoAction::diff(&before, &after).unwrap());
        group.cursor_after = Position::new(0, 0);

        group.apply_reverse_to_buffer(&mut buffer);
        assert_eq!(buffer.lines(), before.as_slice());
        assert_eq!(buffer.cursor(), Position::new(1, 2));

        group.apply_to_buffer(&mut buffer);
        assert_eq!(buffer.lines(), after.as_slice());
        assert_eq!(buffer.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_undo_redo_stacks() {
        let mut manager = UndoManager::new();
        assert!(!manager.can_undo());
        assert!(manager.undo(Position::default()).is_none());

        manager.start_group(Position::new(0, 0));
        manager.add_action(UndoAction::diff(&lines(&["a"]), &lines(&["ab"])).unwrap());
        manager.end_group(Position::new(0, 2));
        assert!(manager.can_undo());

        let group = manager.undo(Position::new(0, 2)).unwrap();
        assert_eq!(group.cursor_after, Position::new(0, 2));
        assert!(manager.can_redo());
        assert!(manager.redo().is_some());
        assert!(!manager.can_redo());
    }

    #[test]
    fn test_new_group_clears_redo() {
        let mut manager = UndoManager::new();
        manager.start_group(Position::default());
        manager.add_action(UndoAction::diff(&lines(&["a"]), &lines(&["b"])).unwrap());
        manager.end_group(Position::default());
        manager.undo(Position::default());
        assert!(manager.can_redo());

        manager.start_group(Position::default());
        manager.add_action(UndoAction::diff(&lines(&["a"]), &lines(&["c"])).unwrap());
        manager.end_group(Position::default());
        assert!(!manager.can_redo());
    }

    #[test]
    fn test_empty_group_is_dropped() {
        let mut manager = UndoManager::new();
        manager.start_group(Position::default());
        manager.end_group(Position::default());
        assert!(!manager.can_undo());
    }

    #[test]
    fn test_undo_closes_open_group() {
        let mut manager = UndoManager::new();
        manager.start_group(Position::new(0, 0));
        manager.add_action(UndoAction::diff(&lines(&[""]), &lines(&["x"])).unwrap());
        assert!(manager.is_group_open());

        let group = manager.undo(Position::new(0, 1)).unwrap();
        assert!(!manager.is_group_open());
        assert_eq!(group.cursor_after, Position::new(0, 1));
    }
}
