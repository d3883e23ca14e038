//! The scheduler contract and its reference implementation.
//!
//! A scheduler is whatever drives actors onto worker threads. The core
//! only needs three operations from it; everything about how those
//! operations are fulfilled -- which thread pool, which fairness policy
//! -- is pluggable and, for anything beyond the reference implementation,
//! the host program's concern.

mod inline;
mod thread_pool;

pub(crate) use inline::InlineScheduler;
pub use thread_pool::{ThreadPoolScheduler, WorkerPool};

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::cell::ActorCell;
use crate::envelope::Envelope;
use crate::id::ActorId;

/// Drives actors onto worker threads.
///
/// Implementations are registered with a [`crate::director::Director`]
/// under a name and referenced from actor builders by that same name.
///
/// # Contract
///
/// - [`Scheduler::schedule`] is called exactly once per actor, at
///   creation, before the actor is reachable by any other name.
/// - [`Scheduler::relay`] must enqueue the message and guarantee the
///   actor is stepped at least once afterward; if the target id is not
///   one this scheduler owns, the message is silently dropped.
/// - [`Scheduler::stop`] is called exactly once, when the registry has
///   just removed the actor; the scheduler must stop driving further
///   steps and do what it can to interrupt an in-flight one.
pub trait Scheduler: Send + Sync {
    /// Register an actor with this scheduler. Must reject a duplicate
    /// id as an internal invariant violation -- it indicates the
    /// director routed the same id to a scheduler twice, which is a
    /// bug in the caller, not a recoverable condition.
    fn schedule(&self, actor: Arc<ActorCell>);

    /// Place `envelope` on `id`'s mailbox and ensure it will be stepped
    /// at least once thereafter. A target unknown to this scheduler is
    /// silently dropped.
    fn relay(&self, id: ActorId, envelope: Envelope);

    /// The actor has been removed from the registry; stop stepping it
    /// and signal any in-flight step to wind down.
    fn stop(&self, id: ActorId);
}

/// Returned by the reference scheduler's overflow path: the mailbox was
/// full, so the target must be killed with `MailboxBlocked` rather than
/// the message silently vanishing unnoticed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RelayOutcome {
    Delivered,
    Overflowed,
}
