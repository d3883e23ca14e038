//! The actor cell: behavior, mailbox, running-thread handle, death flag,
//! and the single-message step function.

// Layer 1: Standard library imports
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::thread::{self, Thread};
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::behavior::Behavior;
use crate::context::ExecutionContext;
use crate::director::Director;
use crate::error::internal_invariant;
use crate::id::ActorId;
use crate::mailbox::Mailbox;
use crate::payload::reason_from_panic;

/// What a single [`ActorCell::step`] decided.
pub(crate) enum StepOutcome {
    /// No message was available, or the actor was already marked for
    /// death; nothing happened.
    Idle,
    /// The behavior ran and returned a successor; it has been stored.
    Continued,
    /// The behavior returned `None`, threw, or the actor was already
    /// dying; the caller should now remove the actor from the registry
    /// with this reason (`None` is a clean exit).
    Died(Option<crate::payload::Payload>),
}

/// Per-actor behavior, mailbox, and death bookkeeping.
pub(crate) struct ActorCell {
    pub(crate) id: ActorId,
    pub(crate) description: Option<String>,
    behavior: StdMutex<Option<Box<dyn Behavior>>>,
    pub(crate) mailbox: Mailbox,
    running_thread: StdMutex<Option<Thread>>,
    pub(crate) should_die: AtomicBool,
}

impl ActorCell {
    pub(crate) fn new(
        id: ActorId,
        description: Option<String>,
        behavior: Box<dyn Behavior>,
        mailbox_capacity: usize,
    ) -> Self {
        Self {
            id,
            description,
            behavior: StdMutex::new(Some(behavior)),
            mailbox: Mailbox::new(mailbox_capacity),
            running_thread: StdMutex::new(None),
            should_die: AtomicBool::new(false),
        }
    }

    fn running_thread_lock(&self) -> std::sync::MutexGuard<'_, Option<Thread>> {
        self.running_thread.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn behavior_lock(&self) -> std::sync::MutexGuard<'_, Option<Box<dyn Behavior>>> {
        self.behavior.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mark the actor for death and do everything possible, short of
    /// forced thread termination, to wake it promptly: unblock a
    /// blocking `receive()` and `unpark` whatever thread is mid-step
    ///.
    pub(crate) fn mark_for_death(&self) {
        self.should_die.store(true, Ordering::SeqCst);
        self.mailbox.wake_all();
        if let Some(thread) = self.running_thread_lock().clone() {
            thread.unpark();
        }
    }

    /// Run at most one message through the current behavior.
    ///
    /// This is the scheduling unit: callers (normally a
    /// [`crate::scheduler::Scheduler`] implementation) invoke it once
    /// per relayed message, from any worker thread, but never
    /// concurrently for the same actor, which the scheduler's
    /// single-dispatch promise enforces. Takes `self` via `Arc` so
    /// the [`ExecutionContext`] built for the behavior can hold its own
    /// strong reference to the cell -- `receive()` and `should_die()`
    /// must keep working even if a concurrent `kill` has already
    /// unlinked this actor from the registry.
    pub(crate) fn step(self: &Arc<Self>, director: &Director) -> StepOutcome {
        // Step 1: discard a stale unpark token left by a death signal
        // that arrived after the previous step already finished.
        thread::park_timeout(Duration::ZERO);

        // Step 2: publish the running thread for the duration of this step.
        *self.running_thread_lock() = Some(thread::current());
        let outcome = self.step_inner(director);
        // Step 7: clear it again now that the step is over.
        *self.running_thread_lock() = None;
        outcome
    }

    fn step_inner(self: &Arc<Self>, director: &Director) -> StepOutcome {
        // Step 3: an actor marked for death drains and returns without
        // invoking the behavior, so stale wake-ups don't respawn it.
        if self.should_die.load(Ordering::SeqCst) {
            self.mailbox.drain();
            return StepOutcome::Died(None);
        }

        // Step 5: a spurious wake-up with nothing queued is a no-op.
        let message = match self.mailbox.poll() {
            Some(m) => m,
            None => return StepOutcome::Idle,
        };

        // Step 4: the scheduler contract guarantees a behavior is present
        // whenever a step actually runs one; its absence is a scheduler bug.
        let mut slot = self.behavior_lock();
        let current = slot
            .take()
            .unwrap_or_else(|| internal_invariant(format!("actor {} stepped with no behavior", self.id)));
        drop(slot);

        let ctx = ExecutionContext::new(Arc::clone(self), director);
        // An escaping panic becomes the death reason rather than
        // unwinding into the scheduler's worker thread.
        let result = panic::catch_unwind(AssertUnwindSafe(|| current.apply(&ctx, message)));

        match result {
            Ok(Some(next)) => {
                *self.behavior_lock() = Some(next);
                StepOutcome::Continued
            }
            Ok(None) => StepOutcome::Died(None),
            Err(panic_payload) => StepOutcome::Died(Some(reason_from_panic(panic_payload))),
        }
    }
}
