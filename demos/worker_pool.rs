//! Custom Worker Pool - Wiring an External Thread Pool
//!
//! The runtime core never spawns OS threads itself; it only submits
//! closures to whatever [`beamlet::scheduler::WorkerPool`] the host
//! provides. This demonstrates the smallest possible pool -- one OS
//! thread per submitted job -- wired in through
//! [`Director::with_default_threadpool`].
//!
//! Run with: cargo run --example worker_pool

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use beamlet::payload::{downcast, payload};
use beamlet::prelude::*;
use beamlet::scheduler::WorkerPool;

/// A worker pool that spawns a fresh OS thread per job. Fine for a demo;
/// a production host would more likely bridge into tokio's blocking
/// pool or a bounded rayon pool.
struct PerJobThreadPool;

impl WorkerPool for PerJobThreadPool {
    fn submit(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        thread::spawn(job);
    }
}

struct Logger(Arc<AtomicUsize>);

impl Behavior for Logger {
    fn apply(self: Box<Self>, _ctx: &ExecutionContext, message: Envelope) -> Option<Box<dyn Behavior>> {
        if let Envelope::User(body) = message {
            if let Some(&n) = downcast::<u64>(&body) {
                self.0.fetch_add(1, Ordering::SeqCst);
                println!("   processed message #{n} on {:?}", thread::current().id());
            }
        }
        Some(self)
    }
}

fn main() {
    let director = Director::with_default_threadpool(Arc::new(PerJobThreadPool));

    let processed = Arc::new(AtomicUsize::new(0));

    println!("=== Worker Pool ===\n");
    println!("1. Spawning an actor driven by a custom pool...");
    let worker = ActorBuilder::new(Box::new(Logger(Arc::clone(&processed))))
        .build(&director)
        .expect("scheduler registered");

    println!("\n2. Sending messages from the main thread...");
    for n in 0..5u64 {
        director.send_message(worker, payload(n));
    }

    // Steps run on worker-pool threads, concurrently with this one;
    // give them a moment to finish before reading the counter.
    thread::sleep(Duration::from_millis(100));

    println!("\n3. Messages processed: {}", processed.load(Ordering::SeqCst));
}
