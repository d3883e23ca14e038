//! # Monitoring module
//!
//! Generic monitoring infrastructure for observing actor lifecycle and
//! supervision events. Decoupled from the runtime core by design: nothing
//! under [`crate::director`] or [`crate::cell`] records to a monitor
//! directly. A host program wires one of these in wherever it already has
//! visibility into the events it cares about.
//!
//! ## Features
//! - **Generic `Monitor<E>` trait**: works with any event type implementing
//!   [`MonitoringEvent`]
//! - **Zero-cost option**: [`NoopMonitor`] compiles away when disabled
//! - **Lock-free recording**: [`InMemoryMonitor`] uses atomic counters for
//!   concurrent event tracking
//!
//! ## Event types
//! - [`ActorEvent`]: actor lifecycle and message-handling outcomes
//! - [`SupervisionEvent`]: link and watch transitions
//!
//! ## Examples
//! ```
//! use beamlet::monitoring::{InMemoryMonitor, Monitor, MonitoringConfig, ActorEvent};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MonitoringConfig::default();
//! let monitor = InMemoryMonitor::<ActorEvent>::new(config);
//! let snapshot = monitor.snapshot().await?;
//! assert_eq!(snapshot.total_events, 0);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod in_memory;
mod noop;
pub mod traits;
pub mod types;

pub use error::MonitoringError;
pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;
pub use traits::{EventSeverity, Monitor, MonitoringEvent};
pub use types::{
    ActorEvent, ActorEventKind, MonitoringConfig, MonitoringSnapshot, SupervisionEvent,
    SupervisionEventKind,
};
