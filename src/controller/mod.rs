/// Controller subsystem - key routing and command execution
///
/// Commands are stateless trait objects collected into immutable registries.
/// The editor controller owns one field's state and routes each key either
/// through the operator-pending builder or a direct registry lookup.
pub mod command_types;
pub mod editor;
pub mod history;
pub mod insert;
pub mod key_handler;
pub mod motions;
pub mod operators;
pub mod pending;
pub mod registry;
pub mod shared_state;
pub mod submit;
pub mod yank_paste;

// Re-export public interface
pub use command_types::{Command, CommandResult, Mode};
pub use editor::{DeferredMessage, EditorController, EditorMessage};
pub use key_handler::{KeyChord, KeySequence};
pub use pending::{FeedResult, PendingBuilder, PendingRegistry};
pub use registry::{CommandRegistry, RegistryBuilder};
pub use shared_state::SharedEditorState;
