use flakeid::{build, IdError, IdGenerator};
use serde_json::json;

fn main() -> Result<(), IdError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let params = json!({
        "nodeId": 3,
        "workerId": 7,
        "epoch": "2024-01-01T00:00:00Z",
        "clockPolicy": "wait"
    });
    let Some(params) = params.as_object() else {
        unreachable!("json! object literal");
    };

    let generator = build("snowflake", params)?;
    println!("Built {} generator", generator.kind());
    for _ in 0..3 {
        println!("  {}", generator.next_id()?);
    }

    // Misconfigurations surface as typed errors
    let missing = json!({"workerId": 2});
    if let Some(missing) = missing.as_object() {
        match build("snowflake", missing) {
            Err(e) => println!("Expected failure: {e}"),
            Ok(_) => println!("Unexpected success"),
        }
    }
    if let Err(e) = build("uuid", params) {
        println!("Expected failure: {e}");
    }

    Ok(())
}
