/// Document model subsystem - Line storage, register and undo history
///
/// This module contains the state a single input field owns: its lines and
/// cursor, the yank register, and the grouped undo/redo stacks.

pub mod movement;
pub mod registers;
pub mod text_buffer;
pub mod undo;

// Re-export main types for convenience
pub use registers::{Register, RegisterType};
pub use text_buffer::{Position, TextBuffer};
pub use undo::{UndoAction, UndoGroup, UndoManager};
