//! A modal, vim-flavoured text input engine for terminal UIs.
//!
//! Each [`EditorController`] is one input field. Hosts feed it crossterm
//! events through [`EditorController::update`] and draw [`EditorController::view`].

pub mod config;
pub mod controller;
pub mod document_model;
pub mod error;
pub mod logging;
pub mod view;

pub use config::{EditorConfig, RcLoader};
pub use controller::{
    Command, CommandRegistry, CommandResult, DeferredMessage, EditorController, EditorMessage,
    KeyChord, Mode, RegistryBuilder, SharedEditorState,
};
pub use document_model::{Position, Register, RegisterType};
pub use error::{ConfigError, Error, Result};
