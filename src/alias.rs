//! The alias table: a string-to-id directory with atomic
//! put-if-absent/compare-and-replace/delete semantics.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

// Layer 3: Internal module imports
use crate::id::ActorId;

/// Maps string names to [`ActorId`]s.
///
/// `register_alias` returns a plain `bool` rather than the previously-
/// mapped id, and `lookup_alias` returns
/// the reserved [`ActorId::NONEXISTENT`] sentinel on a miss rather than
/// an `Option` the caller might mishandle -- matching how the rest of
/// the public API treats "no such actor".
pub(crate) struct AliasTable {
    table: DashMap<String, ActorId>,
}

impl AliasTable {
    pub(crate) fn new() -> Self {
        Self {
            table: DashMap::new(),
        }
    }

    /// Put-if-absent. Returns `true` iff `name` was unbound and is now
    /// bound to `id`.
    pub(crate) fn register(&self, name: String, id: ActorId) -> bool {
        match self.table.entry(name) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(id);
                true
            }
        }
    }

    /// Compare-and-replace. Returns `true` iff `name` was bound to
    /// `old` and is now bound to `new`.
    pub(crate) fn replace(&self, name: &str, old: ActorId, new: ActorId) -> bool {
        match self.table.get_mut(name) {
            Some(mut slot) if *slot == old => {
                *slot = new;
                true
            }
            _ => false,
        }
    }

    /// Remove a binding if present; a no-op if `name` was unbound.
    pub(crate) fn deregister(&self, name: &str) {
        self.table.remove(name);
    }

    /// Returns the bound id, or [`ActorId::NONEXISTENT`] on a miss.
    pub(crate) fn lookup(&self, name: &str) -> ActorId {
        self.table.get(name).map(|e| *e.value()).unwrap_or(ActorId::NONEXISTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_succeeds_only_when_unbound() {
        let table = AliasTable::new();
        let a = ActorId::generate();
        let b = ActorId::generate();
        assert!(table.register("svc".into(), a));
        assert!(!table.register("svc".into(), b));
        assert_eq!(table.lookup("svc"), a);
    }

    #[test]
    fn replace_requires_matching_old_value() {
        let table = AliasTable::new();
        let a = ActorId::generate();
        let b = ActorId::generate();
        let c = ActorId::generate();
        table.register("svc".into(), a);
        assert!(!table.replace("svc", b, c));
        assert!(table.replace("svc", a, c));
        assert_eq!(table.lookup("svc"), c);
    }

    #[test]
    fn deregister_is_idempotent() {
        let table = AliasTable::new();
        table.deregister("missing");
        table.register("svc".into(), ActorId::generate());
        table.deregister("svc");
        table.deregister("svc");
        assert_eq!(table.lookup("svc"), ActorId::NONEXISTENT);
    }

    #[test]
    fn lookup_miss_returns_nonexistent() {
        let table = AliasTable::new();
        assert_eq!(table.lookup("nope"), ActorId::NONEXISTENT);
    }
}
