//! Bounded FIFO mailbox.
//!
//! One mailbox per actor, capacity fixed at creation. Three operations:
//! non-blocking offer, non-blocking poll (the scheduler's normal path),
//! and blocking take (used only by [`crate::context::ExecutionContext::receive`]).
//! The queue itself is a plain `VecDeque` behind a `parking_lot` mutex --
//! the same "high-performance synchronization primitive" the host
//! program already depends on for its registry and alias table.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// Layer 2: Third-party crate imports
use parking_lot::{Condvar, Mutex};

// Layer 3: Internal module imports
use crate::envelope::Envelope;
use crate::error::RuntimeError;
use crate::id::ActorId;

/// How often a blocking [`Mailbox::take`] re-checks the death flag while
/// waiting for a wakeup. Kill always calls [`Mailbox::wake_all`]
/// immediately, so this is only a backstop against a missed notification.
const DEATH_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A bounded, single-consumer FIFO queue of [`Envelope`] values.
pub(crate) struct Mailbox {
    capacity: usize,
    queue: Mutex<VecDeque<Envelope>>,
    not_empty: Condvar,
}

impl Mailbox {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: Mutex::new(VecDeque::with_capacity(capacity.min(64))),
            not_empty: Condvar::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-blocking enqueue. Returns `false` iff the mailbox is full;
    /// the caller (scheduler or registry) is responsible for the
    /// overflow policy.
    pub(crate) fn try_offer(&self, envelope: Envelope) -> bool {
        let mut queue = self.queue.lock();
        if queue.len() >= self.capacity {
            return false;
        }
        queue.push_back(envelope);
        self.not_empty.notify_one();
        true
    }

    /// Non-blocking dequeue, used by the actor cell's step function.
    pub(crate) fn poll(&self) -> Option<Envelope> {
        self.queue.lock().pop_front()
    }

    /// Remove every queued message without processing it.
    pub(crate) fn drain(&self) {
        self.queue.lock().clear();
    }

    /// Wake any thread blocked in [`Mailbox::take`], e.g. because the
    /// actor was just killed.
    pub(crate) fn wake_all(&self) {
        self.not_empty.notify_all();
    }

    /// Block until a message is available or `should_die` becomes true.
    ///
    /// Used only by the in-behavior blocking receive primitive.
    /// Returns [`RuntimeError::Interrupted`] if the actor was killed
    /// while waiting.
    pub(crate) fn take(&self, id: ActorId, should_die: &AtomicBool) -> Result<Envelope, RuntimeError> {
        let mut queue = self.queue.lock();
        loop {
            if let Some(envelope) = queue.pop_front() {
                return Ok(envelope);
            }
            if should_die.load(Ordering::SeqCst) {
                return Err(RuntimeError::Interrupted(id));
            }
            self.not_empty.wait_for(&mut queue, DEATH_POLL_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::payload;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn msg(n: u32) -> Envelope {
        Envelope::User(payload(n))
    }

    #[test]
    fn offer_respects_capacity() {
        let mailbox = Mailbox::new(2);
        assert!(mailbox.try_offer(msg(1)));
        assert!(mailbox.try_offer(msg(2)));
        assert!(!mailbox.try_offer(msg(3)));
        assert_eq!(mailbox.len(), 2);
    }

    #[test]
    fn poll_is_fifo() {
        let mailbox = Mailbox::new(8);
        mailbox.try_offer(msg(1));
        mailbox.try_offer(msg(2));
        let first = mailbox.poll().unwrap();
        let second = mailbox.poll().unwrap();
        assert_eq!(
            crate::payload::downcast::<u32>(first.as_user().unwrap()),
            Some(&1)
        );
        assert_eq!(
            crate::payload::downcast::<u32>(second.as_user().unwrap()),
            Some(&2)
        );
        assert!(mailbox.poll().is_none());
    }

    #[test]
    fn drain_clears_queued_messages() {
        let mailbox = Mailbox::new(8);
        mailbox.try_offer(msg(1));
        mailbox.try_offer(msg(2));
        mailbox.drain();
        assert!(mailbox.is_empty());
    }

    #[test]
    fn take_blocks_until_offer() {
        let mailbox = Arc::new(Mailbox::new(8));
        let should_die = Arc::new(AtomicBool::new(false));
        let id = ActorId::generate();

        let reader = {
            let mailbox = Arc::clone(&mailbox);
            let should_die = Arc::clone(&should_die);
            thread::spawn(move || mailbox.take(id, &should_die))
        };

        thread::sleep(Duration::from_millis(20));
        mailbox.try_offer(msg(99));

        let received = reader.join().unwrap().unwrap();
        assert_eq!(
            crate::payload::downcast::<u32>(received.as_user().unwrap()),
            Some(&99)
        );
    }

    #[test]
    fn take_unblocks_on_death() {
        let mailbox = Arc::new(Mailbox::new(8));
        let should_die = Arc::new(AtomicBool::new(false));
        let id = ActorId::generate();

        let reader = {
            let mailbox = Arc::clone(&mailbox);
            let should_die = Arc::clone(&should_die);
            thread::spawn(move || mailbox.take(id, &should_die))
        };

        thread::sleep(Duration::from_millis(20));
        should_die.store(true, Ordering::SeqCst);
        mailbox.wake_all();

        let result = reader.join().unwrap();
        assert!(matches!(result, Err(RuntimeError::Interrupted(_))));
    }
}
