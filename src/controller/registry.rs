//! Immutable command tables shared by every editor instance.

use crate::controller::command_types::{Command, Mode};
use crate::controller::history::history_set;
use crate::controller::insert::{EnterInsert, OpenLine, insert_set};
use crate::controller::key_handler::KeyChord;
use crate::controller::motions::Motion;
use crate::controller::operators::{change_set, delete_set};
use crate::controller::pending::PendingRegistry;
use crate::controller::submit::Submit;
use crate::controller::yank_paste::{paste_set, yank_set};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Direct `(mode, chord)` bindings plus the operator-pending table.
pub struct CommandRegistry {
    primary: HashMap<(Mode, KeyChord), Arc<dyn Command>>,
    pending: PendingRegistry,
    commands: HashMap<&'static str, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// The standard command set, built once per process.
    pub fn shared() -> Arc<CommandRegistry> {
        static SHARED: OnceLock<Arc<CommandRegistry>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(RegistryBuilder::standard().build()))
            .clone()
    }

    /// Standard set with Enter submitting from Insert mode as well.
    pub fn single_line() -> Arc<CommandRegistry> {
        static SINGLE_LINE: OnceLock<Arc<CommandRegistry>> = OnceLock::new();
        SINGLE_LINE
            .get_or_init(|| {
                Arc::new(
                    RegistryBuilder::standard()
                        .register(Arc::new(Submit::insert()))
                        .build(),
                )
            })
            .clone()
    }

    pub fn get(&self, mode: Mode, chord: KeyChord) -> Option<Arc<dyn Command>> {
        self.primary.get(&(mode, chord)).cloned()
    }

    pub fn pending(&self) -> &PendingRegistry {
        &self.pending
    }

    pub fn command(&self, id: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.len())
            .field("bindings", &self.primary.len())
            .field("pending", &self.pending)
            .finish()
    }
}

/// Collects commands, then routes each key sequence to the table matching its length.
#[derive(Default)]
pub struct RegistryBuilder {
    commands: Vec<Arc<dyn Command>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut builder = Self::new();
        let open_lines: Vec<Arc<dyn Command>> =
            vec![Arc::new(OpenLine::below()), Arc::new(OpenLine::above())];
        for command in Motion::normal_set()
            .into_iter()
            .chain(Motion::insert_set())
            .chain(EnterInsert::all())
            .chain(open_lines)
            .chain(insert_set())
            .chain(yank_set())
            .chain(paste_set())
            .chain(delete_set())
            .chain(change_set())
            .chain(history_set())
        {
            builder = builder.register(command);
        }
        builder.register(Arc::new(Submit::normal()))
    }

    /// Add a command. Registering an id again replaces the earlier command.
    pub fn register(mut self, command: Arc<dyn Command>) -> Self {
        match self.commands.iter_mut().find(|c| c.id() == command.id()) {
            Some(existing) => *existing = command,
            None => self.commands.push(command),
        }
        self
    }

    pub fn unregister(mut self, id: &str) -> Self {
        self.commands.retain(|c| c.id() != id);
        self
    }

    pub fn build(self) -> CommandRegistry {
        let mut primary = HashMap::new();
        let mut pending = PendingRegistry::new();
        let mut commands = HashMap::new();

        for command in self.commands {
            let mode = command.mode();
            for sequence in command.keys() {
                match sequence.as_slice() {
                    [chord] => {
                        if let Some(previous) = primary.insert((mode, *chord), command.clone()) {
                            debug!(
                                key = %chord,
                                replaced = previous.id(),
                                by = command.id(),
                                "binding replaced"
                            );
                        }
                    }
                    [operator, motion] => {
                        pending.insert(mode, *operator, *motion, command.clone());
                    }
                    _ => {
                        warn!(
                            command = command.id(),
                            len = sequence.len(),
                            "unsupported key sequence length"
                        );
                    }
                }
            }
            commands.insert(command.id(), command);
        }

        CommandRegistry {
            primary,
            pending,
            commands,
        }
    }
}
