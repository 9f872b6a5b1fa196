use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use lockgate_core::{ActivationFlag, GateConfig, SharedGate, SourceId};

#[test]
fn threads_lock_and_release_independent_sources() {
    let flag = Arc::new(ActivationFlag::new());
    let gate = Arc::new(SharedGate::new(flag.transition()));

    let handles: Vec<_> = (0u64..8)
        .map(|id| {
            let gate = Arc::clone(&gate);
            thread::spawn(move || {
                for _ in 0..100 {
                    gate.lock(id);
                    gate.release(id);
                }
                gate.lock(id);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(gate.holders().len(), 8);
    assert!(!flag.is_active());

    for id in 0u64..8 {
        gate.release(id);
    }
    assert!(flag.is_active());
    assert!(!gate.is_locked());
}

#[test]
fn callback_sequence_stays_consistent_under_contention() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let gate = Arc::new(SharedGate::new(move |active: bool| {
        sink.lock().unwrap().push(active);
    }));

    let handles: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|source| {
            let gate = Arc::clone(&gate);
            thread::spawn(move || {
                for _ in 0..50 {
                    gate.request(false, source);
                    gate.request(true, source);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let calls = calls.lock().unwrap();
    assert_eq!(calls.last(), Some(&true));
    assert_eq!(calls.iter().filter(|active| !**active).count(), 150);
}

#[test]
fn try_request_and_default_source_through_shared_gate() {
    let config = GateConfig::default().with_default_source("hud");
    let gate = SharedGate::with_config(|_active: bool| (), config);

    gate.request_default(false);
    assert!(gate.try_request(false, "hud").is_err());
    assert_eq!(gate.holders(), vec![SourceId::from("hud")]);

    gate.with_gate(|inner| {
        assert!(inner.is_held_by(&SourceId::from("hud")));
    });

    let inner = gate.into_inner();
    assert!(inner.is_locked());
}

#[test]
fn panicking_callback_leaves_bookkeeping_usable() {
    let armed = Arc::new(AtomicBool::new(true));
    let trip = Arc::clone(&armed);
    let gate = SharedGate::new(move |active: bool| {
        if !active && trip.swap(false, Ordering::SeqCst) {
            panic!("transition target unavailable");
        }
        active
    });

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| gate.lock("a")));
    assert!(outcome.is_err());
    assert!(!armed.load(Ordering::SeqCst));

    // The lock was recorded before the callback ran.
    assert_eq!(gate.holders(), vec![SourceId::from("a")]);
    assert!(gate.is_locked());

    assert_eq!(gate.lock("b"), Some(false));
    assert_eq!(gate.release("a"), None);
    assert_eq!(gate.release("b"), Some(true));
    assert!(gate.holders().is_empty());
}
