//! A synchronous [`Scheduler`] that runs every step on the calling
//! thread, used by tests that want deterministic ordering without a
//! real worker pool.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use dashmap::DashMap;

// Layer 3: Internal module imports
use super::{RelayOutcome, Scheduler};
use crate::cell::{ActorCell, StepOutcome};
use crate::director::Director;
use crate::envelope::Envelope;
use crate::error::internal_invariant;
use crate::id::ActorId;
use crate::payload::payload;

pub(crate) struct InlineScheduler {
    director: Director,
    actors: DashMap<ActorId, Arc<ActorCell>>,
}

impl InlineScheduler {
    pub(crate) fn new(director: Director) -> Self {
        Self {
            director,
            actors: DashMap::new(),
        }
    }
}

impl Scheduler for InlineScheduler {
    fn schedule(&self, actor: Arc<ActorCell>) {
        if self.actors.insert(actor.id, Arc::clone(&actor)).is_some() {
            internal_invariant(format!("actor {} scheduled twice on the same scheduler", actor.id));
        }
    }

    fn relay(&self, id: ActorId, envelope: Envelope) {
        let Some(cell) = self.actors.get(&id).map(|e| Arc::clone(e.value())) else {
            return;
        };

        let outcome = if cell.mailbox.try_offer(envelope) {
            RelayOutcome::Delivered
        } else {
            RelayOutcome::Overflowed
        };

        match outcome {
            RelayOutcome::Delivered => loop {
                match cell.step(&self.director) {
                    StepOutcome::Idle => break,
                    StepOutcome::Continued => continue,
                    StepOutcome::Died(reason) => {
                        self.director.kill(id, reason);
                        break;
                    }
                }
            },
            RelayOutcome::Overflowed => {
                self.director.kill(id, Some(payload("MailboxBlocked".to_string())));
            }
        }
    }

    fn stop(&self, id: ActorId) {
        self.actors.remove(&id);
    }
}
