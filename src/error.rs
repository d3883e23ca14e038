//! Error types for runtime operations.
//!
//! Failures split into two families: *programmer errors*, returned
//! synchronously to the caller so they can be handled or the program can
//! abort; and *actor-internal* failures, which never propagate to a
//! caller but instead become the dying actor's death reason and are
//! delivered to watchers/links via [`crate::envelope::Envelope`].
//!
//! Only the first family is represented here. `InternalInvariant`
//! conditions -- reachable only via a scheduler or registry bug,
//! never via ordinary misuse -- are raised as panics rather than
//! `Result::Err`, matching their fatal severity.

// Layer 1: Standard library
// (none)

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::id::ActorId;

/// Programmer-error conditions surfaced synchronously to the caller.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A required behavior was null.
    #[error("initial behavior must not be null")]
    NullBehavior,

    /// A message to send was null.
    #[error("message must not be null")]
    NullMessage,

    /// A mailbox capacity was not a positive integer.
    #[error("mailbox capacity must be positive, got {0}")]
    InvalidMailboxCapacity(usize),

    /// `createActor`/builders referenced a scheduler name that was never
    /// registered.
    #[error("unknown scheduler: {0}")]
    UnknownScheduler(String),

    /// `registerScheduler` was called twice for the same name.
    #[error("scheduler already registered: {0}")]
    DuplicateScheduler(String),

    /// `setDefaultScheduler` named a scheduler that isn't registered.
    #[error("cannot set default scheduler, not registered: {0}")]
    DefaultSchedulerUnknown(String),

    /// No default scheduler has ever been set and none was named explicitly.
    #[error("no default scheduler configured")]
    NoDefaultScheduler,

    /// The calling thread was interrupted while blocked in
    /// [`crate::context::ExecutionContext::receive`], because the actor
    /// was killed while waiting.
    #[error("actor {0} was killed while blocked in receive()")]
    Interrupted(ActorId),
}

impl RuntimeError {
    /// Whether this indicates the caller asked for something that will
    /// never exist (a configuration mistake), as opposed to a transient
    /// race (`Interrupted`).
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, RuntimeError::Interrupted(_))
    }
}

/// Panics with a message describing an internal invariant violation.
///
/// Used for conditions reachable only through a
/// scheduler or registry bug: a step invoked with no behavior, a link or
/// watch request naming two actors that both turned out to be
/// nonexistent, a scheduler asked to schedule an id it already owns.
#[track_caller]
pub(crate) fn internal_invariant(message: impl std::fmt::Display) -> ! {
    panic!("beamlet internal invariant violated: {message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_descriptive() {
        let err = RuntimeError::InvalidMailboxCapacity(0);
        assert!(err.to_string().contains('0'));

        let err = RuntimeError::UnknownScheduler("io".into());
        assert!(err.to_string().contains("io"));
    }

    #[test]
    fn interrupted_is_not_a_configuration_error() {
        let err = RuntimeError::Interrupted(ActorId::generate());
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn other_errors_are_configuration_errors() {
        assert!(RuntimeError::NullBehavior.is_configuration_error());
    }

    #[test]
    #[should_panic(expected = "beamlet internal invariant violated")]
    fn internal_invariant_panics() {
        internal_invariant("test");
    }
}
