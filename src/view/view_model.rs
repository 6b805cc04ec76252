/// View Model - what the renderer needs from a buffer, without its internals
use crate::document_model::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

pub trait ViewModel {
    fn get_cursor_position(&self) -> CursorPosition;

    fn get_line_count(&self) -> usize;

    fn get_line(&self, line_number: usize) -> Option<&str>;

    fn is_empty(&self) -> bool {
        self.get_line_count() <= 1 && self.get_line(0).is_none_or(str::is_empty)
    }
}

pub struct BufferViewModel<'a> {
    buffer: &'a TextBuffer,
}

impl<'a> BufferViewModel<'a> {
    pub fn new(buffer: &'a TextBuffer) -> Self {
        Self { buffer }
    }
}

impl ViewModel for BufferViewModel<'_> {
    fn get_cursor_position(&self) -> CursorPosition {
        let cursor = self.buffer.cursor();
        CursorPosition {
            line: cursor.row,
            column: cursor.col,
        }
    }

    fn get_line_count(&self) -> usize {
        self.buffer.line_count()
    }

    fn get_line(&self, line_number: usize) -> Option<&str> {
        self.buffer.line(line_number)
    }
}
