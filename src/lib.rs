//! # beamlet - a lightweight, Erlang-inspired actor runtime
//!
//! An in-process actor model on OS threads: private mailboxes, behaviors
//! that consume one message and return the behavior for the next, links
//! and watches for supervision, and trap-exit semantics modeled closely
//! on the BEAM.
//!
//! # Quick start
//!
//! ```
//! use beamlet::{ActorBuilder, Behavior, Director, Envelope, ExecutionContext};
//! use beamlet::payload::payload;
//!
//! struct Echo;
//!
//! impl Behavior for Echo {
//!     fn apply(self: Box<Self>, ctx: &ExecutionContext, message: Envelope) -> Option<Box<dyn Behavior>> {
//!         if let Envelope::User(p) = message {
//!             if let Some(&target) = beamlet::payload::downcast::<beamlet::ActorId>(&p) {
//!                 ctx.send(target, payload(b"pong".to_vec()));
//!             }
//!         }
//!         None
//!     }
//! }
//!
//! let director = Director::with_inline_scheduler();
//! let id = ActorBuilder::new(Box::new(Echo)).build(&director).unwrap();
//! assert!(director.is_alive(id));
//! ```
//!
//! # Module organization
//!
//! ## Core runtime
//! - [`behavior`] - the `Behavior` trait actors are built from
//! - [`cell`] - per-actor mailbox, behavior slot, and step function
//! - [`context`] - the `ExecutionContext` passed to a behavior on each step
//! - [`director`] - the process-wide facade tying everything together
//! - [`registry`] - the live-actor directory and death-propagation algorithm
//! - [`scheduler`] - the pluggable seam between actors and worker threads
//!
//! ## Supporting types
//! - [`alias`] - string-to-id directory
//! - [`builder`] - convenience for assembling actor creation parameters
//! - [`config`] - process-wide runtime settings
//! - [`envelope`] - the mailbox entry type (user messages and termination
//!   notifications)
//! - [`error`] - synchronous failure conditions
//! - [`id`] - actor and watch identifiers
//! - [`mailbox`] - the bounded FIFO queue backing each actor
//! - [`payload`] - the type-erased value carried by messages and death
//!   reasons
//!
//! ## Ambient
//! - [`monitoring`] - optional, decoupled event observation a host program
//!   can wire in
//!
//! # Architecture principles
//!
//! - **Dynamic dispatch, deliberately.** Actors are `Box<dyn Behavior>`
//!   rather than a generic parameter threaded through the whole stack;
//!   this keeps the public API free of an actor-type parameter and lets
//!   one runtime host arbitrarily many unrelated behaviors.
//! - **Panics are a throwable.** A behavior that panics doesn't crash the
//!   worker thread -- [`cell::ActorCell::step`] catches the unwind and
//!   converts it into the actor's death reason, fanned out to watchers
//!   and link peers exactly like any other.
//! - **Ids, never live references, cross the public API.** Watching,
//!   linking, and killing all take [`ActorId`] rather than a handle to
//!   the cell itself, so a reference to a dead actor is never a dangling
//!   pointer, just a lookup miss.

pub mod alias;
pub mod behavior;
pub mod builder;
pub(crate) mod cell;
pub mod config;
pub mod context;
pub mod director;
pub mod envelope;
pub mod error;
pub mod id;
pub mod mailbox;
pub mod monitoring;
pub mod payload;
pub mod prelude;
pub(crate) mod registry;
pub mod scheduler;

pub use behavior::{Behavior, FnBehavior};
pub use builder::ActorBuilder;
pub use context::ExecutionContext;
pub use director::Director;
pub use envelope::Envelope;
pub use error::RuntimeError;
pub use id::{ActorId, WatchId};
pub use payload::Payload;
