//! Type-erased values carried by messages and death reasons.
//!
//! The runtime never inspects user messages: it only moves them
//! between mailboxes and, for death reasons, clones a shared handle to
//! them out to every watcher and link peer. [`Payload`] is the common
//! currency for both: an `Arc`'d [`std::any::Any`], downcast by the
//! receiving behavior to whatever concrete type it expects.

// Layer 1: Standard library imports
use std::any::Any;
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// A type-erased, reference-counted value.
///
/// Used both for ordinary messages sent between actors and for death
/// reasons attached to [`crate::envelope::Envelope::WatchFired`] and
/// [`crate::envelope::Envelope::LinkFired`]. `Arc` rather than `Box` is
/// required here because a single death reason is fanned out, unmodified,
/// to every watcher and linked peer of the dying actor.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Wrap any `Send + Sync` value as a [`Payload`].
///
/// # Example
///
/// ```
/// use beamlet::payload::{payload, downcast};
///
/// let p = payload(42i32);
/// assert_eq!(downcast::<i32>(&p), Some(&42));
/// assert_eq!(downcast::<&str>(&p), None);
/// ```
pub fn payload<T: Any + Send + Sync>(value: T) -> Payload {
    Arc::new(value)
}

/// Attempt to view a [`Payload`] as a concrete type.
pub fn downcast<T: Any>(p: &Payload) -> Option<&T> {
    p.downcast_ref::<T>()
}

/// Best-effort rendering of a panic payload (as produced by
/// `std::panic::catch_unwind`) into a [`Payload`] death reason.
///
/// Panic payloads are `Box<dyn Any + Send>`, which is not `Sync` and so
/// cannot be fanned out to multiple watchers directly. Most panics carry
/// a `&'static str` or `String` message; those are extracted and
/// rewrapped. Anything else degrades to a generic message rather than
/// losing the panic entirely.
pub fn reason_from_panic(panic: Box<dyn Any + Send>) -> Payload {
    if let Some(s) = panic.downcast_ref::<&str>() {
        payload((*s).to_string())
    } else if let Some(s) = panic.downcast_ref::<String>() {
        payload(s.clone())
    } else {
        payload("behavior panicked with a non-string payload".to_string())
    }
}
