use chrono::DateTime;
use flakeid::{IdGenerator, Snowflake};

fn main() -> Result<(), flakeid::IdError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Node 1, worker 2, default epoch
    let generator = Snowflake::new(1, 2)?;

    let id1 = generator.next_id()?;
    let id2 = generator.next_id()?;
    let id3 = generator.next_id()?;

    println!("Generated IDs (guaranteed to be monotonic):");
    print_id(id1, &generator);
    print_id(id2, &generator);
    print_id(id3, &generator);

    // Or extract components individually
    println!("\nComponents of ID2 (extracted individually):");
    println!("  Timestamp: {} ms since epoch", generator.extract.timestamp(id2));
    println!("  Node ID: {}", generator.extract.node(id2));
    println!("  Worker ID: {}", generator.extract.worker(id2));
    println!("  Sequence: {}", generator.extract.sequence(id2));

    Ok(())
}

fn print_id(id: i64, generator: &Snowflake) {
    let parts = generator.extract.decompose(id);
    let timestamp = parts.timestamp + generator.config.epoch().as_millis();
    let datetime = DateTime::from_timestamp_millis(timestamp)
        .map(|at| at.to_rfc3339())
        .unwrap_or_default();

    println!(
        "  ID: {id}, Timestamp: {timestamp}, Human date: {datetime}, Node ID: {}, Worker ID: {}, Sequence: {}",
        parts.node_id, parts.worker_id, parts.sequence
    );
}
