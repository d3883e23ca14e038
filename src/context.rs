//! The execution context: the sole interface behaviors use to speak to
//! the runtime.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::behavior::Behavior;
use crate::cell::ActorCell;
use crate::director::Director;
use crate::envelope::Envelope;
use crate::error::RuntimeError;
use crate::id::{ActorId, WatchId};
use crate::payload::Payload;

/// Handed to a [`Behavior`] on every call to `apply`. Every operation
/// accepts and returns ids, never live actor references -- a
/// behavior never holds anything that outlives the step in which it was
/// obtained.
///
/// Holds its own strong reference to the currently-stepping actor's cell
/// so that `receive()` and `should_die()` keep working even if a
/// concurrent `kill` has already unlinked the actor from the registry by
/// the time this step reaches them.
pub struct ExecutionContext<'a> {
    self_id: ActorId,
    cell: Arc<ActorCell>,
    director: &'a Director,
}

impl<'a> ExecutionContext<'a> {
    pub(crate) fn new(cell: Arc<ActorCell>, director: &'a Director) -> Self {
        Self {
            self_id: cell.id,
            cell,
            director,
        }
    }

    /// This actor's own id.
    pub fn self_id(&self) -> ActorId {
        self.self_id
    }

    /// Update this actor's trap-exit flag.
    pub fn trap_exit(&self, trap: bool) {
        self.director.set_trap_exit(self.self_id, trap);
    }

    /// Enqueue `message` for `target`. An unknown target is a silent
    /// no-op.
    pub fn send(&self, target: ActorId, message: Payload) {
        self.director.send_message(target, message);
    }

    /// Create and schedule a new actor, returning once it is installed
    /// (it may already be dead by the time the caller observes it).
    pub fn create(
        &self,
        behavior: Box<dyn Behavior>,
        description: Option<String>,
        scheduler_name: Option<&str>,
    ) -> Result<ActorId, RuntimeError> {
        self.director.create_actor(behavior, description, scheduler_name)
    }

    /// Initiate death propagation of `target`.
    pub fn kill(&self, target: ActorId, reason: Option<Payload>) {
        self.director.kill(target, reason);
    }

    /// Begin observing `target`.
    pub fn watch(&self, target: ActorId) -> WatchId {
        self.director.add_watch(self.self_id, target)
    }

    /// Stop observing `target` via `watch_id`; idempotent, no
    /// notification.
    pub fn unwatch(&self, target: ActorId, watch_id: WatchId) {
        self.director.remove_watch(target, watch_id);
    }

    /// Link `self` and `other`.
    pub fn bind(&self, other: ActorId) {
        self.director.bind(self.self_id, other);
    }

    /// Link an arbitrary pair, not necessarily including `self`.
    pub fn bind_pair(&self, a: ActorId, b: ActorId) {
        self.director.bind(a, b);
    }

    /// Unlink `self` and `other`; best-effort, no notification.
    pub fn unbind(&self, other: ActorId) {
        self.director.unbind(self.self_id, other);
    }

    /// Unlink an arbitrary pair.
    pub fn unbind_pair(&self, a: ActorId, b: ActorId) {
        self.director.unbind(a, b);
    }

    /// Block until a message is available in this actor's own mailbox.
    ///
    /// Pins the worker thread for as long as the wait lasts and should
    /// be used sparingly. Returns [`RuntimeError::Interrupted`]
    /// if the actor is killed while blocked.
    pub fn receive(&self) -> Result<Envelope, RuntimeError> {
        self.cell.mailbox.take(self.self_id, &self.cell.should_die)
    }

    /// Lets a long-running computation voluntarily check whether it
    /// should abort.
    pub fn should_die(&self) -> bool {
        self.cell.should_die.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Put-if-absent alias registration; `true` iff `name` was unbound.
    pub fn register_alias(&self, name: impl Into<String>, id: ActorId) -> bool {
        self.director.register_alias(name.into(), id)
    }

    /// Compare-and-replace alias update; `true` iff `name` was bound to
    /// `old`.
    pub fn replace_alias(&self, name: &str, old: ActorId, new: ActorId) -> bool {
        self.director.replace_alias(name, old, new)
    }

    /// Remove an alias binding, if present.
    pub fn deregister_alias(&self, name: &str) {
        self.director.deregister_alias(name);
    }

    /// Look up an alias, returning [`ActorId::NONEXISTENT`] on a miss.
    pub fn lookup_alias(&self, name: &str) -> ActorId {
        self.director.lookup_alias(name)
    }
}
