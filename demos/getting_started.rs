//! Getting Started - Your First Actor
//!
//! Demonstrates the complete workflow for building an actor with beamlet:
//! define a behavior, spawn it on a director, send it messages, and
//! watch it transition state through `become`.
//!
//! Run with: cargo run --example getting_started

use beamlet::payload::{downcast, payload};
use beamlet::prelude::*;

/// Step 1: define your messages as a plain enum. The runtime never
/// inspects them -- they travel as an opaque [`beamlet::Payload`].
#[derive(Debug, Clone)]
enum CounterMessage {
    Increment,
    Decrement,
    GetValue,
}

/// Step 2: implement a behavior. Each call to `apply` handles exactly
/// one message and returns the behavior for the next one -- state
/// (`value`) is threaded through the `become` transition rather than
/// mutated in place.
struct CounterActor {
    value: i32,
}

impl Behavior for CounterActor {
    fn apply(mut self: Box<Self>, ctx: &ExecutionContext, message: Envelope) -> Option<Box<dyn Behavior>> {
        let Envelope::User(body) = message else {
            return Some(self);
        };
        match downcast::<CounterMessage>(&body) {
            Some(CounterMessage::Increment) => {
                self.value += 1;
                println!("   counter incremented to {}", self.value);
            }
            Some(CounterMessage::Decrement) => {
                self.value -= 1;
                println!("   counter decremented to {}", self.value);
            }
            Some(CounterMessage::GetValue) => {
                println!("   current value: {}", self.value);
                let _ = ctx.self_id(); // behaviors always know their own id
            }
            None => {}
        }
        Some(self)
    }
}

fn main() {
    println!("=== Getting Started ===\n");

    // Step 3: a director needs at least one scheduler before it can
    // create actors. The inline scheduler runs every step on the
    // caller's own thread, handy for small demos and deterministic
    // tests alike.
    let director = Director::with_inline_scheduler();

    println!("1. Spawning the counter actor...");
    let counter = ActorBuilder::new(Box::new(CounterActor { value: 0 }))
        .description("getting-started counter")
        .build(&director)
        .expect("scheduler is registered");
    println!("   actor is alive: {}\n", director.is_alive(counter));

    println!("2. Sending messages...");
    for message in [
        CounterMessage::Increment,
        CounterMessage::Increment,
        CounterMessage::GetValue,
        CounterMessage::Decrement,
        CounterMessage::GetValue,
    ] {
        director.send_message(counter, payload(message));
    }

    println!("\n3. Killing the actor...");
    director.kill(counter, None);
    println!("   actor is alive: {}", director.is_alive(counter));

    println!("\n=== Example Complete ===");
}
