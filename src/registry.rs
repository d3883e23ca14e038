//! The supervision registry: the authoritative map from actor id to its
//! record, and the death-propagation algorithm.

// Layer 1: Standard library imports
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use dashmap::DashMap;
use parking_lot::Mutex;

// Layer 3: Internal module imports
use crate::cell::ActorCell;
use crate::envelope::Envelope;
use crate::error::internal_invariant;
use crate::id::{ActorId, WatchId};
use crate::payload::Payload;
use crate::scheduler::Scheduler;

/// Supervision bookkeeping for one live actor: trap-exit flag, symmetric
/// link set, and the watches currently observing it.
pub(crate) struct SupervisionState {
    pub(crate) traps_exit: bool,
    pub(crate) linkages: HashSet<ActorId>,
    pub(crate) watches: HashMap<WatchId, ActorId>,
}

impl SupervisionState {
    fn new(traps_exit: bool) -> Self {
        Self {
            traps_exit,
            linkages: HashSet::new(),
            watches: HashMap::new(),
        }
    }
}

/// Everything the registry holds for one live actor: its cell (behavior,
/// mailbox, death flag), the scheduler responsible for driving it, and
/// its supervision state.
pub(crate) struct ActorEntry {
    pub(crate) cell: Arc<ActorCell>,
    pub(crate) scheduler: Arc<dyn Scheduler>,
    pub(crate) supervision: Mutex<SupervisionState>,
}

impl ActorEntry {
    pub(crate) fn new(cell: Arc<ActorCell>, scheduler: Arc<dyn Scheduler>, traps_exit: bool) -> Self {
        Self {
            cell,
            scheduler,
            supervision: Mutex::new(SupervisionState::new(traps_exit)),
        }
    }
}

/// The directory of live actors (presence here *is* liveness) plus the
/// coarse lock serializing any mutation that touches more than one
/// record at once.
///
/// The map itself uses concurrent-map semantics ([`DashMap`]) for plain
/// lookups; `link_lock` is held only around the
/// critical sections of `kill`, `add_watch`, `remove_watch`, `bind`, and
/// `unbind` that read both endpoints of a relationship and then install
/// a change. This is a deliberately coarse-grained design -- there is no
/// fine-grained two-lock protocol for linking -- accepted in exchange
/// for never having to reason about lock ordering across two records.
pub(crate) struct Registry {
    actors: DashMap<ActorId, Arc<ActorEntry>>,
    link_lock: Mutex<()>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            actors: DashMap::new(),
            link_lock: Mutex::new(()),
        }
    }

    pub(crate) fn exists(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub(crate) fn get(&self, id: ActorId) -> Option<Arc<ActorEntry>> {
        self.actors.get(&id).map(|e| Arc::clone(e.value()))
    }

    pub(crate) fn insert(&self, id: ActorId, entry: Arc<ActorEntry>) {
        if self.actors.insert(id, entry).is_some() {
            internal_invariant(format!("actor id {id} inserted twice into the registry"));
        }
    }

    /// Route an envelope to a live actor's scheduler, which is
    /// responsible both for the enqueue and for the overflow
    /// policy (killing the target with `MailboxBlocked` if its mailbox
    /// is full). An unknown target is a silent no-op.
    pub(crate) fn deliver(&self, target: ActorId, envelope: Envelope) {
        if let Some(entry) = self.get(target) {
            entry.scheduler.relay(target, envelope);
        }
    }

    /// Death propagation. Idempotent: killing an id no longer
    /// present is a no-op.
    pub(crate) fn kill(&self, id: ActorId, reason: Option<Payload>) {
        // Step 1: removal from the map is the linearization point of death.
        let Some((_, entry)) = self.actors.remove(&id) else {
            return;
        };

        entry.cell.mark_for_death();
        entry.scheduler.stop(id);

        // Snapshot the watchers and linked peers under the coarse lock,
        // then release it before notifying them -- a non-trap-exit peer
        // is notified by recursing back into this function, and the
        // lock is not reentrant.
        let (watches, linkages) = {
            let _guard = self.link_lock.lock();
            let supervision = entry.supervision.lock();
            (
                supervision.watches.iter().map(|(&w, &a)| (w, a)).collect::<Vec<_>>(),
                supervision.linkages.iter().copied().collect::<Vec<_>>(),
            )
        };

        for (watch_id, watcher) in watches {
            self.deliver(
                watcher,
                Envelope::WatchFired {
                    watch_id,
                    reason: reason.clone(),
                },
            );
        }

        for peer_id in linkages {
            let peer_traps_exit = {
                let _guard = self.link_lock.lock();
                match self.actors.get(&peer_id) {
                    Some(peer) => peer.supervision.lock().traps_exit,
                    None => continue,
                }
            };
            if peer_traps_exit {
                self.deliver(
                    peer_id,
                    Envelope::LinkFired {
                        peer_id: id,
                        reason: reason.clone(),
                    },
                );
            } else {
                self.kill(peer_id, reason.clone());
            }
        }
    }

    pub(crate) fn set_trap_exit(&self, id: ActorId, traps_exit: bool) {
        if let Some(entry) = self.get(id) {
            entry.supervision.lock().traps_exit = traps_exit;
        }
    }

    /// If `target` doesn't exist, `watcher` is notified immediately
    /// with a `None` reason instead of the watch ever being installed.
    pub(crate) fn add_watch(&self, watcher: ActorId, target: ActorId) -> WatchId {
        // The lock must be released before `deliver` runs: under an
        // inline scheduler `deliver` steps the target synchronously on
        // this thread, and a behavior reacting to the delivered envelope
        // by calling back into the registry would self-deadlock on a
        // non-reentrant `link_lock` otherwise.
        let (watch_id, installed) = {
            let _guard = self.link_lock.lock();
            let watch_id = WatchId::generate_unique(|candidate| {
                self.actors
                    .iter()
                    .any(|e| e.supervision.lock().watches.contains_key(&candidate))
            });

            match self.get(target) {
                Some(entry) => {
                    entry.supervision.lock().watches.insert(watch_id, watcher);
                    (watch_id, true)
                }
                None => (watch_id, false),
            }
        };

        if !installed {
            self.deliver(
                watcher,
                Envelope::WatchFired {
                    watch_id,
                    reason: None,
                },
            );
        }
        watch_id
    }

    /// Idempotent, no notification.
    pub(crate) fn remove_watch(&self, target: ActorId, watch_id: WatchId) {
        let _guard = self.link_lock.lock();
        if let Some(entry) = self.get(target) {
            entry.supervision.lock().watches.remove(&watch_id);
        }
    }

    /// Linking two actors that are both already gone is reachable
    /// only via a race and is treated as an internal invariant failure;
    /// one side missing notifies the survivor instead, routed through the
    /// same trap-exit decision `kill`'s own link cascade uses: a
    /// trapping survivor gets a `LinkFired` envelope, a non-trapping one
    /// is killed outright rather than left running with an envelope
    /// nothing will ever handle.
    pub(crate) fn bind(&self, a: ActorId, b: ActorId) {
        enum Outcome {
            BothLinked,
            NotifySurvivor { survivor: ActorId, absent: ActorId },
            KillSurvivor(ActorId),
        }

        // The lock must be released before notifying: `deliver` and
        // `kill` can step a target synchronously under an inline
        // scheduler, and a behavior reacting by calling back into the
        // registry would self-deadlock on a non-reentrant `link_lock`
        // otherwise (mirrors how `kill` itself snapshots before
        // notifying).
        let outcome = {
            let _guard = self.link_lock.lock();
            let entry_a = self.get(a);
            let entry_b = self.get(b);

            match (entry_a, entry_b) {
                (Some(ea), Some(eb)) => {
                    // Each side stores the *other* peer's id.
                    ea.supervision.lock().linkages.insert(b);
                    eb.supervision.lock().linkages.insert(a);
                    Outcome::BothLinked
                }
                (Some(ea), None) => {
                    if ea.supervision.lock().traps_exit {
                        Outcome::NotifySurvivor { survivor: a, absent: b }
                    } else {
                        Outcome::KillSurvivor(a)
                    }
                }
                (None, Some(eb)) => {
                    if eb.supervision.lock().traps_exit {
                        Outcome::NotifySurvivor { survivor: b, absent: a }
                    } else {
                        Outcome::KillSurvivor(b)
                    }
                }
                (None, None) => internal_invariant(format!("bind between two nonexistent actors: {a}, {b}")),
            }
        };

        match outcome {
            Outcome::BothLinked => {}
            Outcome::NotifySurvivor { survivor, absent } => {
                self.deliver(survivor, Envelope::LinkFired { peer_id: absent, reason: None });
            }
            Outcome::KillSurvivor(survivor) => {
                self.kill(survivor, None);
            }
        }
    }

    /// Best-effort symmetric removal, no notification.
    pub(crate) fn unbind(&self, a: ActorId, b: ActorId) {
        let _guard = self.link_lock.lock();
        if let Some(ea) = self.get(a) {
            ea.supervision.lock().linkages.remove(&b);
        }
        if let Some(eb) = self.get(b) {
            eb.supervision.lock().linkages.remove(&a);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::FnBehavior;
    use crate::director::Director;
    use crate::payload::{downcast, payload};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn spawn_actor(director: &Director, behavior: Box<dyn crate::behavior::Behavior>) -> ActorId {
        director.create_actor(behavior, None, None).unwrap()
    }

    #[test]
    fn watch_nonexistent_target_fires_immediately() {
        let director = Director::with_inline_scheduler();
        let watcher_seen = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&watcher_seen);
        let watcher = spawn_actor(
            &director,
            Box::new(FnBehavior::new(move |_ctx, msg| {
                if let Envelope::WatchFired { reason, .. } = msg {
                    assert!(reason.is_none());
                    seen.fetch_add(1, Ordering::SeqCst);
                }
                None
            })),
        );
        let bogus = ActorId::generate();
        director.add_watch(watcher, bogus);
        director.send_message(watcher, payload(()));
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(watcher_seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn kill_is_idempotent() {
        let director = Director::with_inline_scheduler();
        let id = spawn_actor(&director, Box::new(FnBehavior::new(|_ctx, _msg| None)));
        director.kill(id, None);
        director.kill(id, None); // must not panic
        assert!(!director.is_alive(id));
    }

    #[test]
    fn downcast_reason_roundtrips() {
        let reason = payload("boom".to_string());
        assert_eq!(downcast::<String>(&reason).map(String::as_str), Some("boom"));
    }

    #[test]
    fn bind_against_nonexistent_peer_kills_a_non_trapping_survivor() {
        let director = Director::with_inline_scheduler();
        let survivor = spawn_actor(&director, Box::new(FnBehavior::new(|_ctx, _msg| None)));
        let absent = ActorId::generate();

        director.bind(survivor, absent);

        assert!(!director.is_alive(survivor));
    }

    #[test]
    fn bind_against_nonexistent_peer_notifies_a_trapping_survivor() {
        use crate::builder::ActorBuilder;

        let director = Director::with_inline_scheduler();
        let fired = Arc::new(AtomicUsize::new(0));
        let flag = Arc::clone(&fired);
        let survivor = ActorBuilder::new(Box::new(FnBehavior::new(move |_ctx, msg| {
            if matches!(msg, Envelope::LinkFired { reason: None, .. }) {
                flag.fetch_add(1, Ordering::SeqCst);
            }
            None
        })))
        .trap_exit(true)
        .build(&director)
        .unwrap();
        let absent = ActorId::generate();

        director.bind(survivor, absent);

        assert!(director.is_alive(survivor));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
