//! The behavior contract: the single polymorphic value actors are built from.
//!
//! Modeled as a trait object rather than an inheritance hierarchy (Design
//! Notes, "dynamic dispatch via behavior objects"): a behavior consumes
//! one message and returns the behavior for the next one, or `None` to
//! terminate cleanly. Per-actor state is carried by returning a new
//! behavior value at each transition rather than through shared mutable
//! fields, which keeps behaviors unit-testable without a running runtime.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::context::ExecutionContext;
use crate::envelope::Envelope;

/// A behavior: the function applied to the next message in an actor's
/// mailbox.
///
/// `apply` takes `self` by value (boxed) because returning a *new*
/// behavior is how state is threaded across the `become` transition --
/// visible only to the step following the one that returned it.
///
/// # Example
///
/// ```
/// use beamlet::{Behavior, ExecutionContext, Envelope};
/// use beamlet::payload::downcast;
///
/// struct Echo;
///
/// impl Behavior for Echo {
///     fn apply(self: Box<Self>, ctx: &ExecutionContext, message: Envelope) -> Option<Box<dyn Behavior>> {
///         if let Envelope::User(payload) = message {
///             if let Some(&target) = downcast::<beamlet::ActorId>(&payload) {
///                 ctx.send(target, beamlet::payload::payload(7i32));
///             }
///         }
///         None // one message, then terminate
///     }
/// }
/// ```
pub trait Behavior: Send {
    /// Handle one message, returning the behavior that should handle the
    /// next one, or `None` to terminate cleanly.
    ///
    /// A panic escaping this call is caught by the actor cell's step
    /// function and becomes the actor's death reason, modeled as an
    /// arbitrary thrown value rather than a typed `Result` error, which
    /// a caught panic payload mirrors more directly than a typed error
    /// channel would.
    fn apply(self: Box<Self>, ctx: &ExecutionContext, message: Envelope) -> Option<Box<dyn Behavior>>;
}

/// Adapt a plain closure into a [`Behavior`] for simple, stateless or
/// single-shot actors.
///
/// # Example
///
/// ```
/// use beamlet::behavior::FnBehavior;
/// use beamlet::Behavior;
///
/// let _b: Box<dyn Behavior> = Box::new(FnBehavior::new(|_ctx, _msg| None));
/// ```
pub struct FnBehavior<F>(Option<F>);

impl<F> FnBehavior<F>
where
    F: FnOnce(&ExecutionContext, Envelope) -> Option<Box<dyn Behavior>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self(Some(f))
    }
}

impl<F> Behavior for FnBehavior<F>
where
    F: FnOnce(&ExecutionContext, Envelope) -> Option<Box<dyn Behavior>> + Send + 'static,
{
    fn apply(mut self: Box<Self>, ctx: &ExecutionContext, message: Envelope) -> Option<Box<dyn Behavior>> {
        let f = self.0.take().unwrap_or_else(|| {
            crate::error::internal_invariant("FnBehavior invoked twice")
        });
        f(ctx, message)
    }
}
