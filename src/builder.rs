//! A thin convenience for assembling the actor builder configuration
//! recognized by [`crate::director::Director::create_actor`].
//!
//! There is exactly one required field (`initial_behavior`); everything
//! else defaults the same way `create_actor` already does, so `build` is
//! a direct translation, not an independent algorithm.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::behavior::Behavior;
use crate::config::DEFAULT_MAILBOX_CAPACITY;
use crate::director::Director;
use crate::error::RuntimeError;
use crate::id::ActorId;

/// Builds and creates one actor.
///
/// # Example
///
/// ```
/// use beamlet::{ActorBuilder, Director};
/// use beamlet::behavior::FnBehavior;
///
/// let director = Director::with_inline_scheduler();
/// let id = ActorBuilder::new(Box::new(FnBehavior::new(|_ctx, _msg| None)))
///     .description("greeter")
///     .trap_exit(true)
///     .build(&director)
///     .unwrap();
/// assert!(director.is_alive(id));
/// ```
pub struct ActorBuilder {
    behavior: Box<dyn Behavior>,
    description: Option<String>,
    trap_exit: bool,
    mailbox_capacity: usize,
    scheduler: Option<String>,
}

impl ActorBuilder {
    /// Start a builder with the one required field: the initial behavior.
    pub fn new(behavior: Box<dyn Behavior>) -> Self {
        Self {
            behavior,
            description: None,
            trap_exit: false,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            scheduler: None,
        }
    }

    /// Opaque description, purely diagnostic.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Initial trap-exit flag; default `false`.
    pub fn trap_exit(mut self, trap_exit: bool) -> Self {
        self.trap_exit = trap_exit;
        self
    }

    /// Mailbox capacity; must be positive. Default is
    /// [`DEFAULT_MAILBOX_CAPACITY`].
    pub fn mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    /// Scheduler to run this actor on, by name; default resolves to the
    /// director's configured default.
    pub fn scheduler(mut self, name: impl Into<String>) -> Self {
        self.scheduler = Some(name.into());
        self
    }

    /// Create the actor on `director`, installing `trap_exit` as part of
    /// the same registry insertion so there is no window where the
    /// actor exists without its requested flag.
    pub fn build(self, director: &Director) -> Result<ActorId, RuntimeError> {
        director.create_actor_full(
            self.behavior,
            self.description,
            self.scheduler.as_deref(),
            self.mailbox_capacity,
            self.trap_exit,
        )
    }
}
