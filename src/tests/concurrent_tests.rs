use std::sync::{Arc, Barrier};
use std::thread;

use crate::tests::test_utils::{assert_ids_monotonic, assert_unique_and_monotonic};
use crate::*;

fn generate_concurrently(generator: Arc<Snowflake>, threads: usize, per_thread: usize) -> Vec<Vec<i64>> {
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let generator = Arc::clone(&generator);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut ids = Vec::with_capacity(per_thread);
                for _ in 0..per_thread {
                    ids.push(generator.next_id().unwrap());
                }
                ids
            })
        })
        .collect();

    handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect()
}

#[test]
fn test_two_producers_unique() {
    let generator = Arc::new(Snowflake::new(1, 1).unwrap());
    let per_thread = 200_000;

    let batches = generate_concurrently(generator, 2, per_thread);
    let all: Vec<i64> = batches.into_iter().flatten().collect();

    assert_unique_and_monotonic(all, 2 * per_thread);
}

#[test]
fn test_many_producers_unique() {
    let generator = Arc::new(Snowflake::new(7, 3).unwrap());
    let threads = 8;
    let per_thread = 20_000;

    let batches = generate_concurrently(generator, threads, per_thread);
    let all: Vec<i64> = batches.into_iter().flatten().collect();

    assert_unique_and_monotonic(all, threads * per_thread);
}

/// Calls made by one thread are ordered in real time, so its ids must increase
#[test]
fn test_per_thread_monotonic() {
    let generator = Arc::new(Snowflake::new(2, 9).unwrap());

    for batch in generate_concurrently(generator, 4, 50_000) {
        assert_ids_monotonic(&batch);
    }
}

#[test]
fn test_concurrent_ids_keep_node_and_worker() {
    let generator = Arc::new(Snowflake::new(30, 17).unwrap());
    let extract = generator.extract;

    for id in generate_concurrently(generator, 4, 5_000).into_iter().flatten() {
        assert_eq!(extract.node(id), 30);
        assert_eq!(extract.worker(id), 17);
    }
}

#[test]
fn test_distinct_workers_never_collide() {
    let a = Arc::new(Snowflake::new(1, 1).unwrap());
    let b = Arc::new(Snowflake::new(1, 2).unwrap());

    let ha = {
        let a = Arc::clone(&a);
        thread::spawn(move || (0..20_000).map(|_| a.next_id().unwrap()).collect::<Vec<_>>())
    };
    let hb = {
        let b = Arc::clone(&b);
        thread::spawn(move || (0..20_000).map(|_| b.next_id().unwrap()).collect::<Vec<_>>())
    };

    let mut all = ha.join().unwrap();
    all.extend(hb.join().unwrap());
    crate::tests::test_utils::assert_unique_ids(&all, 40_000);
}

/// Full-scale run: two producers issuing 100 million ids each.
/// Holds 200M `i64`s (1.6 GB) in memory and takes at least 49 s,
/// since one generator issues at most 4096 ids per millisecond.
#[test]
#[ignore = "long-running, run with --ignored"]
fn test_two_hundred_million_unique() {
    let generator = Arc::new(Snowflake::new(0, 0).unwrap());
    let per_thread = 100_000_000;

    let batches = generate_concurrently(generator, 2, per_thread);
    let mut all: Vec<i64> = batches.into_iter().flatten().collect();
    all.sort_unstable();
    all.dedup();

    assert_eq!(all.len(), 2 * per_thread);
}
