//! Mutual exclusion with many contenders.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use sourced_mutex::ExtendedMutex;

const THREADS: usize = 8;
const ROUNDS: usize = 500;

#[test]
fn try_lock_successes_never_overlap() {
    let mutex = Arc::new(ExtendedMutex::new());
    let holders = Arc::new(AtomicUsize::new(0));
    let acquired = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let mutex = Arc::clone(&mutex);
            let holders = Arc::clone(&holders);
            let acquired = Arc::clone(&acquired);
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    if mutex.try_lock() {
                        assert_eq!(holders.fetch_add(1, Ordering::SeqCst), 0);
                        thread::yield_now();
                        holders.fetch_sub(1, Ordering::SeqCst);
                        acquired.fetch_add(1, Ordering::SeqCst);
                        mutex.unlock().unwrap();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(acquired.load(Ordering::SeqCst) > 0);
    assert!(!mutex.is_locked());
}

#[test]
fn blocking_lock_serializes_updates() {
    let mutex = Arc::new(ExtendedMutex::new());
    // Split load/store so a lost update shows up if two holders overlap.
    let counter = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let mutex = Arc::clone(&mutex);
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    mutex.lock();
                    let value = counter.load(Ordering::SeqCst);
                    thread::yield_now();
                    counter.store(value + 1, Ordering::SeqCst);
                    mutex.unlock().unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counter.load(Ordering::SeqCst), THREADS * ROUNDS);
    assert!(!mutex.is_locked());
}

#[test]
fn timed_contenders_all_eventually_acquire() {
    let mutex = Arc::new(ExtendedMutex::new());
    let acquired = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let mutex = Arc::clone(&mutex);
            let acquired = Arc::clone(&acquired);
            thread::spawn(move || {
                mutex.lock_timeout(Duration::from_secs(10)).unwrap();
                acquired.fetch_add(1, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(1));
                mutex.unlock().unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(acquired.load(Ordering::SeqCst), THREADS);
}
