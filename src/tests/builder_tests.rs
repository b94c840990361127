use serde_json::json;

use crate::registry::keys;
use crate::tests::test_utils::params;
use crate::*;

#[test]
fn test_build_snowflake() {
    let generator = build("snowflake", &params(json!({"nodeId": 1, "workerId": 2}))).unwrap();
    assert_eq!(generator.kind(), GeneratorKind::Snowflake);

    let id = generator.next_id().unwrap();
    let snowflake = generator.as_snowflake().unwrap();
    let parts = snowflake.extract.decompose(id);
    assert_eq!(parts.node_id, 1);
    assert_eq!(parts.worker_id, 2);
}

#[test]
fn test_build_unknown_type() {
    let err = build("unknown", &params(json!({}))).unwrap_err();
    assert_eq!(
        err,
        IdError::UnknownGeneratorType {
            name: "unknown".into()
        }
    );
}

#[test]
fn test_build_missing_node_id() {
    let err = build("snowflake", &params(json!({"workerId": 2}))).unwrap_err();
    assert_eq!(
        err,
        IdError::MissingParameter {
            key: keys::NODE_ID.into()
        }
    );
}

#[test]
fn test_build_missing_worker_id() {
    let err = build("snowflake", &params(json!({"nodeId": 2}))).unwrap_err();
    assert_eq!(
        err,
        IdError::MissingParameter {
            key: keys::WORKER_ID.into()
        }
    );
}

#[test]
fn test_build_invalid_parameter() {
    let err = build("snowflake", &params(json!({"nodeId": "one", "workerId": 2}))).unwrap_err();
    assert!(matches!(
        err,
        IdError::InvalidParameter { ref key, .. } if key == "nodeId"
    ));

    let err = build(
        "snowflake",
        &params(json!({"nodeId": 1, "workerId": 2, "clockPolicy": "sometimes"})),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        IdError::InvalidParameter { ref key, source: ValueError::Unparsable { .. } } if key == "clockPolicy"
    ));
}

#[test]
fn test_build_out_of_range_is_configuration_error() {
    let err = build("snowflake", &params(json!({"nodeId": 32, "workerId": 0}))).unwrap_err();
    assert_eq!(
        err,
        IdError::Configuration(ConfigError::NodeIdOutOfRange {
            node_id: 32,
            max: 31
        })
    );

    let err = build("snowflake", &params(json!({"nodeId": 0, "workerId": -1}))).unwrap_err();
    assert_eq!(
        err,
        IdError::Configuration(ConfigError::WorkerIdOutOfRange {
            worker_id: -1,
            max: 31
        })
    );

    let err = build("snowflake", &params(json!({"nodeId": 1000, "workerId": 0}))).unwrap_err();
    assert!(matches!(
        err,
        IdError::Configuration(ConfigError::NodeIdOutOfRange { node_id: 1000, .. })
    ));
}

#[test]
fn test_build_future_epoch() {
    let err = build(
        "snowflake",
        &params(json!({"nodeId": 1, "workerId": 1, "epoch": "2999-01-01T00:00:00Z"})),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        IdError::Configuration(ConfigError::EpochInFuture { .. })
    ));
}

#[test]
fn test_build_epoch_too_old() {
    let err = build(
        "snowflake",
        &params(json!({"nodeId": 1, "workerId": 1, "epoch": "1900-01-01T00:00:00Z"})),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        IdError::Configuration(ConfigError::EpochTooOld { .. })
    ));
}

#[test]
fn test_build_with_optional_parameters() {
    let generator = build(
        "Snowflake",
        &params(json!({
            "nodeId": "31",
            "workerId": 31.0,
            "epoch": "2024-01-01T00:00:00Z",
            "clockPolicy": "wait",
            "maxBackwardWaitMs": 12,
            "spinEnabled": false,
            "spinLoops": 0,
            "spinYieldEvery": 0
        })),
    )
    .unwrap();

    let config = generator.as_snowflake().unwrap().config;
    assert_eq!(config.node_id(), 31);
    assert_eq!(config.worker_id(), 31);
    assert_eq!(config.epoch().as_millis(), 1_704_067_200_000);
    assert_eq!(config.clock_policy(), ClockPolicy::Wait);
    assert_eq!(config.max_backward_wait_ms(), 12);
    assert!(!config.spin_enabled());

    assert!(generator.next_id().is_ok());
}

#[test]
fn test_build_default_epoch() {
    let generator = build("snowflake", &params(json!({"nodeId": 0, "workerId": 0}))).unwrap();
    assert_eq!(generator.as_snowflake().unwrap().config.epoch(), Epoch::TWITTER);
}

#[test]
fn test_build_via_kind() {
    let generator = GeneratorKind::Snowflake
        .build(&params(json!({"nodeId": 4, "workerId": 8})))
        .unwrap();
    let id = generator.next_id().unwrap();
    assert_eq!(generator.as_snowflake().unwrap().extract.worker(id), 8);
}
