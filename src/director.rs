//! The director: the process-wide facade composing the registry, the
//! alias table, and the scheduler set.

// Layer 1: Standard library imports
use std::sync::{Arc, OnceLock};

// Layer 2: Third-party crate imports
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

// Layer 3: Internal module imports
use crate::alias::AliasTable;
use crate::behavior::Behavior;
use crate::cell::ActorCell;
use crate::config::{RuntimeConfig, DEFAULT_SCHEDULER_NAME};
use crate::envelope::Envelope;
use crate::error::RuntimeError;
use crate::id::{ActorId, WatchId};
use crate::payload::Payload;
use crate::registry::{ActorEntry, Registry};
use crate::scheduler::{InlineScheduler, Scheduler, ThreadPoolScheduler, WorkerPool};

struct Inner {
    registry: Registry,
    aliases: AliasTable,
    schedulers: DashMap<String, Arc<dyn Scheduler>>,
    default_scheduler: Mutex<Option<String>>,
    config: RuntimeConfig,
}

/// The entry point for bootstrapping and driving a runtime instance.
///
/// A cheap handle: cloning shares the same underlying registry, aliases,
/// and scheduler set -- an explicitly constructed value with a lifetime
/// tied to the embedding program, rather than implicit process-wide
/// state. [`Director::global`] is
/// provided as a convenience for programs that want a process-default
/// instance anyway.
#[derive(Clone)]
pub struct Director(Arc<Inner>);

static GLOBAL: OnceLock<Director> = OnceLock::new();

impl Director {
    /// A director with no schedulers registered; the caller must
    /// [`Director::register_scheduler`] at least one before
    /// [`Director::create_actor`] will succeed.
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Like [`Director::new`], with non-default runtime settings.
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self(Arc::new(Inner {
            registry: Registry::new(),
            aliases: AliasTable::new(),
            schedulers: DashMap::new(),
            default_scheduler: Mutex::new(None),
            config,
        }))
    }

    /// A process-default instance, lazily created on first use.
    ///
    /// Convenience only: prefer threading an explicit [`Director`]
    /// through the host program where practical.
    pub fn global() -> Director {
        GLOBAL.get_or_init(Director::new).clone()
    }

    /// A director wired to a [`ThreadPoolScheduler`] over `pool`,
    /// registered as [`crate::config::DEFAULT_SCHEDULER_NAME`] and set
    /// as the default.
    pub fn with_default_threadpool(pool: Arc<dyn WorkerPool>) -> Self {
        let director = Self::new();
        let scheduler = ThreadPoolScheduler::new(pool, director.clone());
        director
            .register_scheduler(DEFAULT_SCHEDULER_NAME, scheduler)
            .unwrap_or_else(|e| crate::error::internal_invariant(e));
        director
    }

    /// A director wired to a synchronous, single-threaded scheduler that
    /// runs every step on the caller's own thread. Intended for tests
    /// that need deterministic ordering without a real worker pool.
    pub fn with_inline_scheduler() -> Self {
        let director = Self::new();
        let scheduler: Arc<dyn Scheduler> = Arc::new(InlineScheduler::new(director.clone()));
        director
            .register_scheduler(DEFAULT_SCHEDULER_NAME, scheduler)
            .unwrap_or_else(|e| crate::error::internal_invariant(e));
        director
    }

    /// Register a named scheduler. Fails if the name is already taken
    ///.
    pub fn register_scheduler(&self, name: impl Into<String>, scheduler: Arc<dyn Scheduler>) -> Result<(), RuntimeError> {
        let name = name.into();
        match self.0.schedulers.entry(name.clone()) {
            Entry::Occupied(_) => Err(RuntimeError::DuplicateScheduler(name)),
            Entry::Vacant(slot) => {
                slot.insert(scheduler);
                Ok(())
            }
        }
    }

    /// Name the scheduler `createActor` should use when the caller
    /// doesn't name one explicitly. Fails if `name` isn't registered.
    pub fn set_default_scheduler(&self, name: &str) -> Result<(), RuntimeError> {
        if !self.0.schedulers.contains_key(name) {
            return Err(RuntimeError::DefaultSchedulerUnknown(name.to_string()));
        }
        *self.0.default_scheduler.lock() = Some(name.to_string());
        Ok(())
    }

    fn resolve_scheduler(&self, requested: Option<&str>) -> Result<Arc<dyn Scheduler>, RuntimeError> {
        let name = match requested {
            Some(name) => name.to_string(),
            None => self
                .0
                .default_scheduler
                .lock()
                .clone()
                .unwrap_or_else(|| DEFAULT_SCHEDULER_NAME.to_string()),
        };
        self.0
            .schedulers
            .get(&name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(if requested.is_some() {
                RuntimeError::UnknownScheduler(name)
            } else {
                RuntimeError::NoDefaultScheduler
            })
    }

    /// Create and schedule a new actor. `scheduler_name`
    /// selects a registered scheduler by name, falling back to the
    /// configured default when `None`.
    pub fn create_actor(
        &self,
        behavior: Box<dyn Behavior>,
        description: Option<String>,
        scheduler_name: Option<&str>,
    ) -> Result<ActorId, RuntimeError> {
        self.create_actor_with_capacity(behavior, description, scheduler_name, self.0.config.default_mailbox_capacity())
    }

    pub(crate) fn create_actor_with_capacity(
        &self,
        behavior: Box<dyn Behavior>,
        description: Option<String>,
        scheduler_name: Option<&str>,
        mailbox_capacity: usize,
    ) -> Result<ActorId, RuntimeError> {
        self.create_actor_full(behavior, description, scheduler_name, mailbox_capacity, false)
    }

    /// Full creation path used by [`crate::builder::ActorBuilder`] so
    /// that `trap_exit` is installed at the same time as the record
    /// itself, rather than in a separate call that would leave a window
    /// where a just-created actor doesn't yet have the flag it asked for.
    pub(crate) fn create_actor_full(
        &self,
        behavior: Box<dyn Behavior>,
        description: Option<String>,
        scheduler_name: Option<&str>,
        mailbox_capacity: usize,
        traps_exit: bool,
    ) -> Result<ActorId, RuntimeError> {
        if mailbox_capacity == 0 {
            return Err(RuntimeError::InvalidMailboxCapacity(mailbox_capacity));
        }
        let scheduler = self.resolve_scheduler(scheduler_name)?;
        let id = ActorId::generate_unique(|candidate| self.0.registry.exists(candidate));
        let cell = Arc::new(ActorCell::new(id, description, behavior, mailbox_capacity));
        let entry = Arc::new(ActorEntry::new(Arc::clone(&cell), Arc::clone(&scheduler), traps_exit));
        self.0.registry.insert(id, entry);
        // Scheduled exactly once, before the actor is reachable under
        // any other name -- it is already in the registry above, so
        // this ordering only matters for the scheduler's own bookkeeping.
        scheduler.schedule(cell);
        Ok(id)
    }

    /// Enqueue `message` for `target`. A dead or unknown target silently
    /// drops it.
    pub fn send_message(&self, target: ActorId, message: Payload) {
        self.0.registry.deliver(target, Envelope::User(message));
    }

    /// Initiate death propagation of `target`. Idempotent.
    pub fn kill(&self, target: ActorId, reason: Option<Payload>) {
        self.0.registry.kill(target, reason);
    }

    /// Begin observing `target` from `watcher`.
    pub fn add_watch(&self, watcher: ActorId, target: ActorId) -> WatchId {
        self.0.registry.add_watch(watcher, target)
    }

    /// Stop observing `target` via `watch_id`.
    pub fn remove_watch(&self, target: ActorId, watch_id: WatchId) {
        self.0.registry.remove_watch(target, watch_id);
    }

    /// Link two actors.
    pub fn bind(&self, a: ActorId, b: ActorId) {
        self.0.registry.bind(a, b);
    }

    /// Unlink two actors.
    pub fn unbind(&self, a: ActorId, b: ActorId) {
        self.0.registry.unbind(a, b);
    }

    /// Update an actor's trap-exit flag.
    pub fn set_trap_exit(&self, id: ActorId, traps_exit: bool) {
        self.0.registry.set_trap_exit(id, traps_exit);
    }

    /// Whether `id` is currently present in the registry.
    pub fn is_alive(&self, id: ActorId) -> bool {
        self.0.registry.exists(id)
    }

    /// Put-if-absent alias registration; `true` iff `name` was unbound.
    pub fn register_alias(&self, name: String, id: ActorId) -> bool {
        self.0.aliases.register(name, id)
    }

    /// Compare-and-replace alias update; `true` iff `name` was bound to `old`.
    pub fn replace_alias(&self, name: &str, old: ActorId, new: ActorId) -> bool {
        self.0.aliases.replace(name, old, new)
    }

    /// Remove an alias binding, if present.
    pub fn deregister_alias(&self, name: &str) {
        self.0.aliases.deregister(name);
    }

    /// Look up an alias, returning [`ActorId::NONEXISTENT`] on a miss.
    pub fn lookup_alias(&self, name: &str) -> ActorId {
        self.0.aliases.lookup(name)
    }
}

impl Default for Director {
    fn default() -> Self {
        Self::new()
    }
}
