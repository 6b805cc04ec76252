/// View subsystem - turns editor state into displayable text
///
/// Independent of buffer internals through the ViewModel trait.
pub mod renderer;
pub mod view_model;

pub use renderer::{RenderParams, View};
pub use view_model::{BufferViewModel, CursorPosition, ViewModel};
