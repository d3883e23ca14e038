//! Convenient imports for building actors with beamlet.
//!
//! ```
//! use beamlet::prelude::*;
//! ```
//!
//! # What's included
//!
//! ## Core runtime
//! - [`Director`] - the process-wide facade
//! - [`ActorBuilder`] - assembling actor creation parameters
//! - [`Behavior`] - the trait actors are built from
//! - [`FnBehavior`] - adapting a closure into a `Behavior`
//! - [`ExecutionContext`] - passed to a behavior on each step
//! - [`Envelope`] - mailbox entries (user messages and termination
//!   notifications)
//!
//! ## Identifiers and payloads
//! - [`ActorId`] - actor identifier
//! - [`WatchId`] - watch identifier
//! - [`Payload`] - type-erased message/death-reason value
//! - [`payload`] - wrap a value as a [`Payload`]
//! - [`downcast`] - view a [`Payload`] as a concrete type
//!
//! ## Errors
//! - [`RuntimeError`] - synchronous failure conditions
//!
//! ## Monitoring
//! - [`Monitor`] - core monitoring trait
//! - [`InMemoryMonitor`] - atomic-counter monitor implementation
//! - [`NoopMonitor`] - zero-overhead no-op monitor
//! - [`ActorEvent`], [`SupervisionEvent`] - event types a host can record

pub use crate::behavior::{Behavior, FnBehavior};
pub use crate::builder::ActorBuilder;
pub use crate::context::ExecutionContext;
pub use crate::director::Director;
pub use crate::envelope::Envelope;
pub use crate::error::RuntimeError;
pub use crate::id::{ActorId, WatchId};
pub use crate::monitoring::{ActorEvent, InMemoryMonitor, Monitor, NoopMonitor, SupervisionEvent};
pub use crate::payload::{downcast, payload, Payload};
