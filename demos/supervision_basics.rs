//! Supervision Basics - Links, Watches, and Trap-Exit
//!
//! Demonstrates the three supervision primitives beamlet provides:
//! - Watches: one-shot, directed death notifications
//! - Links: symmetric supervision that cascades death by default
//! - Trap-exit: converts an incoming link-death into a message instead
//!   of a cascading kill
//!
//! Run with: cargo run --example supervision_basics

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use beamlet::payload::{downcast, payload};
use beamlet::prelude::*;

fn wait_briefly() {
    thread::sleep(Duration::from_millis(50));
}

fn main() {
    let director = Director::with_inline_scheduler();

    println!("=== Watches: one notification per watch, ever ===\n");
    let watch_fired = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&watch_fired);
    let watcher = ActorBuilder::new(Box::new(FnBehavior::new(move |_ctx, message| {
        if let Envelope::WatchFired { reason, .. } = message {
            let reason = reason.and_then(|r| downcast::<String>(&r).cloned());
            println!("   watcher notified: target died with reason {reason:?}");
            flag.store(true, Ordering::SeqCst);
        }
        None
    })))
    .build(&director)
    .expect("scheduler registered");

    let worker = ActorBuilder::new(Box::new(FnBehavior::new(|_ctx, _msg| None)))
        .description("worker")
        .build(&director)
        .unwrap();

    director.add_watch(watcher, worker);
    director.kill(worker, Some(payload("worker crashed".to_string())));
    wait_briefly();
    println!("   watch fired: {}\n", watch_fired.load(Ordering::SeqCst));

    println!("=== Links: death cascades to a non-trapping peer ===\n");
    let a = ActorBuilder::new(Box::new(FnBehavior::new(|_ctx, _msg| Some(Box::new(FnBehavior::new(|_c, _m| None)) as Box<dyn Behavior>))))
        .description("a")
        .build(&director)
        .unwrap();
    let b = ActorBuilder::new(Box::new(FnBehavior::new(|_ctx, _msg| Some(Box::new(FnBehavior::new(|_c, _m| None)) as Box<dyn Behavior>))))
        .description("b")
        .build(&director)
        .unwrap();
    director.bind(a, b);
    director.kill(a, Some(payload("a failed".to_string())));
    wait_briefly();
    println!("   a alive: {}, b alive: {} (b was pulled down with a)\n", director.is_alive(a), director.is_alive(b));

    println!("=== Trap-exit: a supervisor survives its child's death ===\n");
    let supervisor_saw_link_fired = Arc::new(AtomicBool::new(false));
    let sup_flag = Arc::clone(&supervisor_saw_link_fired);
    let supervisor = ActorBuilder::new(Box::new(FnBehavior::new(move |_ctx, message| {
        if let Envelope::LinkFired { peer_id, reason } = message {
            let reason = reason.and_then(|r| downcast::<String>(&r).cloned());
            println!("   supervisor notified: child {peer_id} died with reason {reason:?}");
            sup_flag.store(true, Ordering::SeqCst);
        }
        Some(Box::new(FnBehavior::new(|_c, _m| None)) as Box<dyn Behavior>)
    })))
    .description("supervisor")
    .trap_exit(true)
    .build(&director)
    .unwrap();

    let child = ActorBuilder::new(Box::new(FnBehavior::new(|_ctx, _msg| None)))
        .description("child")
        .build(&director)
        .unwrap();
    director.bind(supervisor, child);
    director.kill(child, Some(payload("child crashed".to_string())));
    wait_briefly();
    println!(
        "   supervisor alive: {} (trap_exit kept it up), saw LinkFired: {}",
        director.is_alive(supervisor),
        supervisor_saw_link_fired.load(Ordering::SeqCst)
    );
}
