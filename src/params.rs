//! Typed access to generator parameter maps
//!
//! Parameters arrive as a JSON-style string-keyed map. Each target type has
//! its own parsing function through [`FromParameter`], returning either the
//! typed value or a [`ValueError`] saying why the conversion failed.

use chrono::DateTime;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{ClockPolicy, Epoch};
use crate::error::IdError;

/// Parameter map consumed by the generator builder
pub type Parameters = Map<String, Value>;

/// Why a parameter value could not be converted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{value} does not fit in {target}")]
    OutOfRange { value: String, target: &'static str },
    #[error("{value:?} is not a valid {target}")]
    Unparsable { value: String, target: &'static str },
}

/// Conversion from a single parameter value
pub trait FromParameter: Sized {
    fn from_parameter(value: &Value) -> Result<Self, ValueError>;
}

/// Fetch `key` as `T`, `Ok(None)` when the key is absent
pub fn try_get<T: FromParameter>(params: &Parameters, key: &str) -> Result<Option<T>, IdError> {
    params
        .get(key)
        .map(|value| {
            T::from_parameter(value).map_err(|source| IdError::InvalidParameter {
                key: key.to_owned(),
                source,
            })
        })
        .transpose()
}

/// Fetch a required `key` as `T`
pub fn require<T: FromParameter>(params: &Parameters, key: &str) -> Result<T, IdError> {
    try_get(params, key)?.ok_or_else(|| IdError::MissingParameter {
        key: key.to_owned(),
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected(expected: &'static str, value: &Value) -> ValueError {
    ValueError::UnexpectedType {
        expected,
        found: type_name(value),
    }
}

/// Integers, integral floats and numeric strings all coerce
impl FromParameter for i64 {
    fn from_parameter(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(i);
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                        Ok(f as i64)
                    }
                    Some(f) if f.fract() != 0.0 => Err(ValueError::Unparsable {
                        value: n.to_string(),
                        target: "integer",
                    }),
                    _ => Err(ValueError::OutOfRange {
                        value: n.to_string(),
                        target: "i64",
                    }),
                }
            }
            Value::String(s) => s.trim().parse().map_err(|_| ValueError::Unparsable {
                value: s.clone(),
                target: "integer",
            }),
            other => Err(unexpected("integer", other)),
        }
    }
}

macro_rules! impl_from_parameter_narrow {
    ($($ty:ty),*) => {$(
        impl FromParameter for $ty {
            fn from_parameter(value: &Value) -> Result<Self, ValueError> {
                let wide = i64::from_parameter(value)?;
                <$ty>::try_from(wide).map_err(|_| ValueError::OutOfRange {
                    value: wide.to_string(),
                    target: stringify!($ty),
                })
            }
        }
    )*};
}

impl_from_parameter_narrow!(u8, u32, u64);

impl FromParameter for bool {
    fn from_parameter(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            Value::String(s) => Err(ValueError::Unparsable {
                value: s.clone(),
                target: "boolean",
            }),
            other => Err(unexpected("boolean", other)),
        }
    }
}

impl FromParameter for String {
    fn from_parameter(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(unexpected("string", other)),
        }
    }
}

/// Unix milliseconds, or an RFC 3339 timestamp string
impl FromParameter for Epoch {
    fn from_parameter(value: &Value) -> Result<Self, ValueError> {
        if let Value::String(s) = value {
            if let Ok(at) = DateTime::parse_from_rfc3339(s.trim()) {
                return Ok(Epoch::from_datetime(&at));
            }
        }
        match i64::from_parameter(value) {
            Ok(millis) => Ok(Epoch::from_millis(millis)),
            Err(ValueError::Unparsable { value, .. }) => Err(ValueError::Unparsable {
                value,
                target: "epoch",
            }),
            Err(e) => Err(e),
        }
    }
}

/// Enum variant by name
impl FromParameter for ClockPolicy {
    fn from_parameter(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::String(s) => s.parse().map_err(|_| ValueError::Unparsable {
                value: s.clone(),
                target: "clock policy",
            }),
            other => Err(unexpected("clock policy name", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Parameters {
        match value {
            Value::Object(map) => map,
            _ => panic!("parameters must be an object"),
        }
    }

    #[test]
    fn test_absent_key() {
        let p = params(json!({}));
        assert_eq!(try_get::<i64>(&p, "nodeId").unwrap(), None);
        assert_eq!(
            require::<i64>(&p, "nodeId").unwrap_err(),
            IdError::MissingParameter {
                key: "nodeId".into()
            }
        );
    }

    #[test]
    fn test_integer_coercion() {
        let p = params(json!({"a": 7, "b": "12", "c": 3.0, "d": " 5 "}));
        assert_eq!(require::<i64>(&p, "a").unwrap(), 7);
        assert_eq!(require::<i64>(&p, "b").unwrap(), 12);
        assert_eq!(require::<i64>(&p, "c").unwrap(), 3);
        assert_eq!(require::<u8>(&p, "d").unwrap(), 5);
    }

    #[test]
    fn test_integer_failures() {
        let p = params(json!({"frac": 1.5, "word": "one", "flag": true, "big": 300, "neg": -1}));

        assert!(matches!(
            require::<i64>(&p, "frac"),
            Err(IdError::InvalidParameter { source: ValueError::Unparsable { .. }, .. })
        ));
        assert!(matches!(
            require::<i64>(&p, "word"),
            Err(IdError::InvalidParameter { source: ValueError::Unparsable { .. }, .. })
        ));
        assert_eq!(
            require::<i64>(&p, "flag").unwrap_err(),
            IdError::InvalidParameter {
                key: "flag".into(),
                source: ValueError::UnexpectedType {
                    expected: "integer",
                    found: "boolean"
                },
            }
        );
        assert_eq!(
            require::<u8>(&p, "big").unwrap_err(),
            IdError::InvalidParameter {
                key: "big".into(),
                source: ValueError::OutOfRange {
                    value: "300".into(),
                    target: "u8"
                },
            }
        );
        assert!(require::<u64>(&p, "neg").is_err());
    }

    #[test]
    fn test_bool_and_string() {
        let p = params(json!({"on": true, "off": "FALSE", "name": "x", "num": 4}));
        assert!(require::<bool>(&p, "on").unwrap());
        assert!(!require::<bool>(&p, "off").unwrap());
        assert_eq!(require::<String>(&p, "name").unwrap(), "x");
        assert_eq!(require::<String>(&p, "num").unwrap(), "4");
        assert!(require::<bool>(&p, "name").is_err());
    }

    #[test]
    fn test_epoch_forms() {
        let p = params(json!({
            "millis": 1_288_834_974_657i64,
            "text": "1288834974657",
            "rfc3339": "2010-11-04T01:42:54.657Z",
            "bad": "yesterday",
        }));
        assert_eq!(require::<Epoch>(&p, "millis").unwrap(), Epoch::TWITTER);
        assert_eq!(require::<Epoch>(&p, "text").unwrap(), Epoch::TWITTER);
        assert_eq!(require::<Epoch>(&p, "rfc3339").unwrap(), Epoch::TWITTER);
        assert_eq!(
            require::<Epoch>(&p, "bad").unwrap_err(),
            IdError::InvalidParameter {
                key: "bad".into(),
                source: ValueError::Unparsable {
                    value: "yesterday".into(),
                    target: "epoch"
                },
            }
        );
    }

    #[test]
    fn test_enum_from_name() {
        let p = params(json!({"a": "wait", "b": "Reject", "c": "later", "d": 1}));
        assert_eq!(require::<ClockPolicy>(&p, "a").unwrap(), ClockPolicy::Wait);
        assert_eq!(require::<ClockPolicy>(&p, "b").unwrap(), ClockPolicy::Reject);
        assert!(matches!(
            require::<ClockPolicy>(&p, "c"),
            Err(IdError::InvalidParameter { source: ValueError::Unparsable { .. }, .. })
        ));
        assert!(matches!(
            require::<ClockPolicy>(&p, "d"),
            Err(IdError::InvalidParameter { source: ValueError::UnexpectedType { .. }, .. })
        ));
    }
}
