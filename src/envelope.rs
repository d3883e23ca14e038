//! Runtime-synthesized termination notifications and the mailbox envelope.
//!
//! `WatchFired` and `LinkFired` are the only two kinds of value the
//! runtime itself ever places in a mailbox; everything else is a
//! `User` message handed through unmodified.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::id::{ActorId, WatchId};
use crate::payload::Payload;

/// One entry in an actor's mailbox.
///
/// Behaviors pattern-match on this to distinguish ordinary messages from
/// the two termination notifications the runtime synthesizes.
#[derive(Debug, Clone)]
pub enum Envelope {
    /// An ordinary message sent via [`crate::context::ExecutionContext::send`]
    /// or [`crate::director::Director::send_message`].
    User(Payload),

    /// Delivered once to a watcher when the watched actor dies, or
    /// immediately with `reason: None` if the target did not exist at
    /// registration time.
    WatchFired {
        watch_id: WatchId,
        reason: Option<Payload>,
    },

    /// Delivered to a trap-exit link peer when the other end dies. A
    /// non-trap-exit peer is killed instead of receiving this.
    LinkFired {
        peer_id: ActorId,
        reason: Option<Payload>,
    },
}

impl Envelope {
    /// Borrow the user payload, if this is a [`Envelope::User`].
    pub fn as_user(&self) -> Option<&Payload> {
        match self {
            Envelope::User(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::payload;

    #[test]
    fn as_user_matches_only_user_variant() {
        let msg = Envelope::User(payload(1u32));
        assert!(msg.as_user().is_some());

        let fired = Envelope::WatchFired {
            watch_id: WatchId::generate(),
            reason: None,
        };
        assert!(fired.as_user().is_none());
    }
}
