//! Reference [`Scheduler`] implementation wrapping an externally-supplied
//! worker pool.
//!
//! Keeps its own `id -> ActorCell` map, separate from the director's
//! supervision registry: the scheduler only needs to know how to reach
//! an actor's mailbox, not its links or watches.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};

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

/// An opaque unit-of-work submitter, supplied by the host program.
///
/// The runtime core never creates OS threads itself; it only hands
/// closures to whatever pool the host wires in.
pub trait WorkerPool: Send + Sync {
    /// Run `job` on a worker thread at some point in the future. Pools
    /// that are shutting down may drop `job` without running it.
    fn submit(&self, job: Box<dyn FnOnce() + Send + 'static>);
}

/// A [`WorkerPool`] backed by tokio's blocking-task pool.
///
/// `step()` is a synchronous, potentially-blocking call (it may invoke
/// `receive()`), so actor steps are submitted via
/// [`tokio::task::spawn_blocking`] rather than as ordinary async tasks --
/// the same bridge tokio-based programs use for any CPU-bound or
/// blocking work that must not stall the async executor.
pub struct TokioWorkerPool {
    handle: tokio::runtime::Handle,
}

impl TokioWorkerPool {
    /// Build a pool driven by the given runtime handle.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Build a pool driven by the handle of the currently running
    /// tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime context, exactly as
    /// [`tokio::runtime::Handle::current`] does.
    pub fn from_current() -> Self {
        Self::new(tokio::runtime::Handle::current())
    }
}

impl WorkerPool for TokioWorkerPool {
    fn submit(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        self.handle.spawn_blocking(job);
    }
}

/// The reference [`Scheduler`]: wraps a [`WorkerPool`] and submits one
/// job per relayed message, relying on the pool's own concurrency
/// guarantees plus an `is_running` gate so that at most one step per
/// actor is ever in flight.
pub struct ThreadPoolScheduler {
    pool: Arc<dyn WorkerPool>,
    director: Director,
    actors: DashMap<ActorId, Arc<ActorCell>>,
    running: DashMap<ActorId, Arc<AtomicBool>>,
    pending: DashMap<ActorId, Arc<AtomicBool>>,
    // A scheduler needs to resubmit work to itself from inside a worker
    // closure, which means it needs an `Arc<Self>`, not just `&self`.
    // Stashing a weak self-reference set right after construction is
    // the standard way to recover that from a `&self` trait method.
    self_weak: OnceLock<Weak<ThreadPoolScheduler>>,
}

impl ThreadPoolScheduler {
    /// Build a scheduler over `pool`, reporting overflow kills and death
    /// transitions back through `director`.
    pub fn new(pool: Arc<dyn WorkerPool>, director: Director) -> Arc<Self> {
        let this = Arc::new(Self {
            pool,
            director,
            actors: DashMap::new(),
            running: DashMap::new(),
            pending: DashMap::new(),
            self_weak: OnceLock::new(),
        });
        let _ = this.self_weak.set(Arc::downgrade(&this));
        this
    }

    fn self_arc(&self) -> Option<Arc<ThreadPoolScheduler>> {
        self.self_weak.get().and_then(Weak::upgrade)
    }

    fn submit_step(self: &Arc<Self>, id: ActorId, cell: Arc<ActorCell>) {
        let is_running = self
            .running
            .entry(id)
            .or_insert_with(|| Arc::new(AtomicBool::new(false)))
            .clone();
        let has_pending_wakeup = self
            .pending
            .entry(id)
            .or_insert_with(|| Arc::new(AtomicBool::new(false)))
            .clone();

        // Coalesce wake-ups: if a step is already in flight, mark that
        // another is pending and let that step's completion re-submit.
        if is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            has_pending_wakeup.store(true, Ordering::SeqCst);
            return;
        }

        let scheduler = Arc::clone(self);
        let director = self.director.clone();
        self.pool.submit(Box::new(move || {
            loop {
                match cell.step(&director) {
                    StepOutcome::Idle | StepOutcome::Continued => {}
                    StepOutcome::Died(reason) => {
                        director.kill(cell.id, reason);
                    }
                }
                // If another relay arrived mid-step, run one more pass
                // before releasing the is_running gate, so that wake-up
                // is never silently lost.
                if has_pending_wakeup.swap(false, Ordering::SeqCst) {
                    if !cell.mailbox.is_empty() && !cell.should_die.load(Ordering::SeqCst) {
                        continue;
                    }
                }
                is_running.store(false, Ordering::SeqCst);
                break;
            }
        }));
    }
}

impl Scheduler for ThreadPoolScheduler {
    fn schedule(&self, actor: Arc<ActorCell>) {
        if self.actors.insert(actor.id, Arc::clone(&actor)).is_some() {
            internal_invariant(format!("actor {} scheduled twice on the same scheduler", actor.id));
        }
    }

    fn relay(&self, id: ActorId, envelope: Envelope) {
        let Some(cell) = self.actors.get(&id).map(|e| Arc::clone(e.value())) else {
            return; // unknown target is a silent drop
        };

        let outcome = if cell.mailbox.try_offer(envelope) {
            RelayOutcome::Delivered
        } else {
            RelayOutcome::Overflowed
        };

        match outcome {
            RelayOutcome::Delivered => {
                if let Some(scheduler) = self.self_arc() {
                    scheduler.submit_step(id, cell);
                }
            }
            RelayOutcome::Overflowed => {
                self.director.kill(id, Some(payload("MailboxBlocked".to_string())));
            }
        }
    }

    fn stop(&self, id: ActorId) {
        self.actors.remove(&id);
        self.running.remove(&id);
        self.pending.remove(&id);
    }
}
