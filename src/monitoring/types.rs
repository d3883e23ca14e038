//! Monitoring event types and configuration structures for this runtime's
//! domain: actor lifecycle and supervision transitions.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::traits::{EventSeverity, MonitoringEvent};
use crate::id::{ActorId, WatchId};

/// Configuration for monitoring behavior.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringConfig {
    /// Whether monitoring is enabled.
    pub enabled: bool,

    /// Maximum number of events to keep in history.
    pub max_history_size: usize,

    /// Minimum severity level to record (events below this are filtered).
    pub severity_filter: EventSeverity,

    /// Interval for snapshot generation, if a host drives periodic snapshots.
    pub snapshot_interval: Duration,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history_size: 1000,
            severity_filter: EventSeverity::Info,
            snapshot_interval: Duration::from_secs(60),
        }
    }
}

/// Snapshot of monitoring state at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    pub timestamp: DateTime<Utc>,
    pub total_events: u64,
    pub trace_count: u64,
    pub debug_count: u64,
    pub info_count: u64,
    pub warning_count: u64,
    pub error_count: u64,
    pub critical_count: u64,
    /// Recent events, bounded by `max_history_size`.
    pub recent_events: Vec<E>,
}

// ============================================================================
// Actor events
// ============================================================================

/// Events related to one actor's lifecycle and message handling.
#[derive(Debug, Clone, Serialize)]
pub struct ActorEvent {
    pub timestamp: DateTime<Utc>,
    pub actor_id: ActorId,
    pub event_kind: ActorEventKind,
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for ActorEvent {
    const EVENT_TYPE: &'static str = "actor";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            ActorEventKind::Created => EventSeverity::Debug,
            ActorEventKind::MessageHandled => EventSeverity::Trace,
            ActorEventKind::Became => EventSeverity::Trace,
            ActorEventKind::CleanExit => EventSeverity::Info,
            ActorEventKind::Threw { .. } => EventSeverity::Error,
            ActorEventKind::MailboxBlocked => EventSeverity::Warning,
            ActorEventKind::Interrupted => EventSeverity::Info,
        }
    }
}

/// Specific kinds of actor event.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ActorEventKind {
    /// The actor was created and scheduled.
    Created,
    /// A step ran a message to completion without a `become` transition
    /// ending it (covers both `Continued` and terminal steps alike, at
    /// the granularity a host typically wants for tracing).
    MessageHandled,
    /// A step returned a successor behavior.
    Became,
    /// The actor exited cleanly (behavior returned `None`).
    CleanExit,
    /// The actor's behavior panicked.
    Threw {
        /// Best-effort rendering of the panic payload.
        reason: String,
    },
    /// The actor was killed because its mailbox overflowed.
    MailboxBlocked,
    /// The actor was interrupted while blocked in `receive()`.
    Interrupted,
}

// ============================================================================
// Supervision events
// ============================================================================

/// Events related to links and watches.
#[derive(Debug, Clone, Serialize)]
pub struct SupervisionEvent {
    pub timestamp: DateTime<Utc>,
    pub actor_id: ActorId,
    pub peer_id: Option<ActorId>,
    pub event_kind: SupervisionEventKind,
}

impl MonitoringEvent for SupervisionEvent {
    const EVENT_TYPE: &'static str = "supervision";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            SupervisionEventKind::WatchInstalled { .. } => EventSeverity::Trace,
            SupervisionEventKind::WatchFired { .. } => EventSeverity::Info,
            SupervisionEventKind::Linked => EventSeverity::Trace,
            SupervisionEventKind::Unlinked => EventSeverity::Trace,
            SupervisionEventKind::LinkFired { .. } => EventSeverity::Warning,
            SupervisionEventKind::TrapExitChanged { .. } => EventSeverity::Debug,
        }
    }
}

/// Specific kinds of supervision event.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum SupervisionEventKind {
    /// A watch was installed, carrying the id it was assigned.
    WatchInstalled { watch_id: WatchId },
    /// A watch fired because its target died (or never existed).
    WatchFired { watch_id: WatchId },
    /// A link was installed between `actor_id` and `peer_id`.
    Linked,
    /// A link was removed.
    Unlinked,
    /// A link peer died and this actor was notified instead of killed
    /// (its `trap_exit` flag was set).
    LinkFired { reason: Option<String> },
    /// This actor's trap-exit flag was changed.
    TrapExitChanged { enabled: bool },
}
