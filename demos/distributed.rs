use rand::{rng, Rng};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use flakeid::{IdGenerator, Snowflake};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // One generator per worker, all on node 1: no coordination, no collisions
    let generators: Vec<Arc<Snowflake>> = (0..4)
        .map(|worker| Arc::new(Snowflake::new(1, worker).unwrap()))
        .collect();

    // A shared generator needs no locking either
    let shared = Arc::new(Snowflake::new(2, 0).unwrap());

    let mut handles = vec![];
    for (worker, generator) in generators.into_iter().enumerate() {
        let shared = Arc::clone(&shared);
        handles.push(thread::spawn(move || {
            let mut ids = HashSet::new();
            let mut rng = rng();

            for i in 0..5 {
                let own = generator.next_id().unwrap();
                let common = shared.next_id().unwrap();
                let parts = generator.extract.decompose(own);

                println!(
                    "Worker {} generated ID {} (ts={}, node={}, worker={}, seq={}), shared {}",
                    worker, i, parts.timestamp, parts.node_id, parts.worker_id, parts.sequence, common
                );

                assert!(ids.insert(own), "Duplicate ID generated!");
                assert!(ids.insert(common), "Duplicate ID generated!");

                // Random delay to simulate work
                let delay = rng.random_range(0..=9);
                thread::sleep(Duration::from_millis(delay));
            }
            ids
        }));
    }

    let mut all_ids = HashSet::new();
    for handle in handles {
        let thread_ids = handle.join().unwrap();
        all_ids.extend(thread_ids);
    }

    println!("\nTotal unique IDs generated: {}", all_ids.len());
    assert_eq!(all_ids.len(), 4 * 5 * 2);
    println!("All IDs are unique!");
}
