#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Byte offset of the `col`-th character, or the line length if `col` is past the end.
pub fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(offset, _)| offset)
}

/// Ordered lines plus the cursor addressing them.
///
/// Columns are counted in `char`s. The buffer always holds at least one line
/// and the cursor always satisfies `row < line_count` and `col <= line_length(row)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Position,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::default(),
        }
    }

    pub fn from_string(content: &str) -> Self {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        Self::from_lines(normalized.split('\n').map(str::to_string).collect())
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        let lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        Self {
            lines,
            cursor: Position::default(),
        }
    }

    pub fn as_string(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn current_line(&self) -> &str {
        self.line(self.cursor.row).unwrap_or_default()
    }

    pub fn line_length(&self, row: usize) -> usize {
        self.line(row).map_or(0, |line| line.chars().count())
    }

    /// Total length in chars, counting one char per line break.
    pub fn char_len(&self) -> usize {
        let text: usize = self.lines.iter().map(|line| line.chars().count()).sum();
        text + self.lines.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = pos;
        self.clamp_cursor();
    }

    pub fn clamp_cursor(&mut self) {
        let last_row = self.lines.len().saturating_sub(1);
        if self.cursor.row > last_row {
            self.cursor.row = last_row;
        }
        let len = self.line_length(self.cursor.row);
        if self.cursor.col > len {
            self.cursor.col = len;
        }
    }

    /// Text of `row` between char columns `start` and `end`, clamped to the line.
    pub fn slice(&self, row: usize, start: usize, end: usize) -> String {
        let Some(line) = self.line(row) else {
            return String::new();
        };
        if start >= end {
            return String::new();
        }
        line.chars().skip(start).take(end - start).collect()
    }

    /// Insert `text` (which may contain line breaks) at `pos`.
    /// Returns the position just past the inserted text.
    pub fn insert_str(&mut self, pos: Position, text: &str) -> Position {
        if pos.row >= self.lines.len() {
            return pos;
        }
        let col = pos.col.min(self.line_length(pos.row));
        let line = &mut self.lines[pos.row];
        let split_at = byte_index(line, col);
        let tail = line.split_off(split_at);

        let mut pieces = text.split('\n');
        let first = pieces.next().unwrap_or_default();
        line.push_str(first);

        let mut row = pos.row;
        let mut end_col = col + first.chars().count();
        for piece in pieces {
            row += 1;
            self.lines.insert(row, piece.to_string());
            end_col = piece.chars().count();
        }
        self.lines[row].push_str(&tail);
        Position::new(row, end_col)
    }

    /// Remove chars `start..end` of `row` and return them.
    pub fn delete_range(&mut self, row: usize, start: usize, end: usize) -> String {
        let len = self.line_length(row);
        let end = end.min(len);
        if row >= self.lines.len() || start >= end {
            return String::new();
        }
        let line = &mut self.lines[row];
        let start_byte = byte_index(line, start);
        let end_byte = byte_index(line, end);
        let removed: String = line.drain(start_byte..end_byte).collect();
        self.clamp_cursor();
        removed
    }

    /// Remove a whole line, leaving a single empty line if it was the last one.
    pub fn remove_line(&mut self, row: usize) -> String {
        if row >= self.lines.len() {
            return String::new();
        }
        let removed = if self.lines.len() == 1 {
            std::mem::take(&mut self.lines[0])
        } else {
            self.lines.remove(row)
        };
        self.clamp_cursor();
        removed
    }

    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            *line = text.to_string();
            self.clamp_cursor();
        }
    }

    pub fn insert_lines(&mut self, at: usize, new_lines: &[String]) {
        let at = at.min(self.lines.len());
        self.lines.splice(at..at, new_lines.iter().cloned());
    }

    /// Replace `remove` lines starting at `start` with `replacement`.
    pub fn replace_lines(&mut self, start: usize, remove: usize, replacement: &[String]) {
        let start = start.min(self.lines.len());
        let end = (start + remove).min(self.lines.len());
        self.lines.splice(start..end, replacement.iter().cloned());
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.clamp_cursor();
    }

    /// Split the line at `pos`, moving the tail to a new line below.
    pub fn split_line(&mut self, pos: Position) -> bool {
        if pos.row >= self.lines.len() {
            return false;
        }
        let col = pos.col.min(self.line_length(pos.row));
        let line = &mut self.lines[pos.row];
        let tail = line.split_off(byte_index(line, col));
        self.lines.insert(pos.row + 1, tail);
        true
    }

    /// Append line `row + 1` onto `row`. Returns the join column.
    pub fn join_with_next(&mut self, row: usize) -> Option<usize> {
        if row + 1 >= self.lines.len() {
            return None;
        }
        let join_col = self.line_length(row);
        let next = self.lines.remove(row + 1);
        self.lines[row].push_str(&next);
        self.clamp_cursor();
        Some(join_col)
    }

    pub fn move_cursor_left(&mut self) -> bool {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
