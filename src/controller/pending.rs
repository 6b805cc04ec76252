//! Two-stage operator + motion key sequences.

use crate::controller::command_types::{Command, Mode};
use crate::controller::key_handler::KeyChord;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Secondary table keyed by `(mode, operator, motion)`.
#[derive(Default)]
pub struct PendingRegistry {
    sequences: HashMap<(Mode, KeyChord, KeyChord), Arc<dyn Command>>,
    operators: HashSet<(Mode, KeyChord)>,
}

impl PendingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(
        &mut self,
        mode: Mode,
        operator: KeyChord,
        motion: KeyChord,
        command: Arc<dyn Command>,
    ) {
        self.operators.insert((mode, operator));
        self.sequences.insert((mode, operator, motion), command);
    }

    pub fn get(
        &self,
        mode: Mode,
        operator: KeyChord,
        motion: KeyChord,
    ) -> Option<Arc<dyn Command>> {
        self.sequences.get(&(mode, operator, motion)).cloned()
    }

    pub fn is_operator(&self, mode: Mode, chord: KeyChord) -> bool {
        self.operators.contains(&(mode, chord))
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl fmt::Debug for PendingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRegistry")
            .field("sequences", &self.sequences.len())
            .field("operators", &self.operators.len())
            .finish()
    }
}

#[derive(Debug)]
pub enum FeedResult {
    AwaitingMore,
    Resolved(Arc<dyn Command>),
    Canceled,
}

/// The one operator chord an editor instance may have in flight.
#[derive(Debug, Clone, Default)]
pub struct PendingBuilder {
    operator: Option<(Mode, KeyChord)>,
}

impl PendingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.operator.is_some()
    }

    pub fn pending_operator(&self) -> Option<KeyChord> {
        self.operator.map(|(_, chord)| chord)
    }

    pub fn cancel(&mut self) {
        self.operator = None;
    }

    pub fn feed(&mut self, registry: &PendingRegistry, mode: Mode, chord: KeyChord) -> FeedResult {
        let Some((pending_mode, operator)) = self.operator.take() else {
            if registry.is_operator(mode, chord) {
                trace!(operator = %chord, "operator pending");
                self.operator = Some((mode, chord));
                return FeedResult::AwaitingMore;
            }
            return FeedResult::Canceled;
        };

        if pending_mode != mode || chord.is_cancel() {
            trace!(operator = %operator, "pending sequence canceled");
            return FeedResult::Canceled;
        }
        if let Some(command) = registry.get(mode, operator, chord) {
            return FeedResult::Resolved(command);
        }
        if registry.is_operator(mode, chord) {
            trace!(from = %operator, to = %chord, "pending operator restarted");
            self.operator = Some((mode, chord));
            return FeedResult::AwaitingMore;
        }
        trace!(operator = %operator, motion = %chord, "unknown motion");
        FeedResult::Canceled
    }
}
