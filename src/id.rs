//! Identifiers for actors and watches.
//!
//! Both id kinds share the same shape and generator: a random, non-zero
//! 64-bit integer. Zero is reserved to mean "nonexistent".

// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// The reserved id value meaning "no actor". Never issued to a real actor.
pub const NONEXISTENT_ID: u64 = 0;

fn random_nonzero() -> u64 {
    loop {
        let candidate: u64 = rand::random();
        if candidate != NONEXISTENT_ID {
            return candidate;
        }
    }
}

/// Unique identifier for a live actor.
///
/// Generated uniformly at random by [`ActorId::generate`]; the reserved
/// value [`NONEXISTENT_ID`] is never produced. Collisions with currently
/// live ids are possible but astronomically rare -- the registry detects
/// and retries them at insertion time via [`ActorId::generate_unique`].
///
/// # Example
///
/// ```
/// use beamlet::ActorId;
///
/// let a = ActorId::generate();
/// let b = ActorId::generate();
/// assert_ne!(a, b);
/// assert!(!a.is_nonexistent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// The reserved id meaning "no actor". Returned by alias lookups on miss.
    pub const NONEXISTENT: ActorId = ActorId(NONEXISTENT_ID);

    /// Generate a single random id, without checking for collisions.
    pub fn generate() -> Self {
        Self(random_nonzero())
    }

    /// Generate an id guaranteed not to collide with `exists`.
    ///
    /// `exists` should report whether a candidate id is currently live;
    /// the caller (normally the registry) retries on collision.
    pub fn generate_unique(mut exists: impl FnMut(ActorId) -> bool) -> Self {
        loop {
            let candidate = Self::generate();
            if !exists(candidate) {
                return candidate;
            }
        }
    }

    /// True iff this is the reserved [`NONEXISTENT_ID`] value.
    pub fn is_nonexistent(self) -> bool {
        self.0 == NONEXISTENT_ID
    }

    pub(crate) fn raw(self) -> u64 {
        self.0
    }
}

impl Default for ActorId {
    /// The reserved "nonexistent" id, not a fresh random one -- use
    /// [`ActorId::generate`] to allocate a real id.
    fn default() -> Self {
        Self::NONEXISTENT
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Unique identifier for an outstanding watch.
///
/// Structurally identical to [`ActorId`] but kept as a distinct type so a
/// watch id can never be confused with an actor id at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchId(u64);

impl WatchId {
    /// Generate a single random id, without checking for collisions.
    pub fn generate() -> Self {
        Self(random_nonzero())
    }

    /// Generate an id guaranteed not to collide with `exists`.
    pub fn generate_unique(mut exists: impl FnMut(WatchId) -> bool) -> Self {
        loop {
            let candidate = Self::generate();
            if !exists(candidate) {
                return candidate;
            }
        }
    }
}

impl Display for WatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
