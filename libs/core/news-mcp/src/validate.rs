//! Generic argument validator
//!
//! Walks an operation's parameter table in declaration order and stops at the
//! first violation. Unknown keys are ignored.

use crate::error::ValidationError;
use crate::schema::{OperationSpec, ParamKind, ParamValue, ParameterSpec};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Arguments after validation and default filling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedArguments {
    values: BTreeMap<&'static str, ParamValue>,
}

impl ResolvedArguments {
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ParamValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(ParamValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Validate raw tool arguments against `spec`.
///
/// `null` is treated as an empty argument map.
pub fn validate(spec: &OperationSpec, raw: &Value) -> Result<ResolvedArguments, ValidationError> {
    let empty = Map::new();
    let args = match raw {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => return Err(ValidationError::NotAnObject),
    };

    let mut resolved = ResolvedArguments::default();
    for param in &spec.parameters {
        match args.get(param.key) {
            // Explicit nulls count as absent
            None | Some(Value::Null) => {
                if param.required {
                    return Err(ValidationError::MissingRequired {
                        key: param.key.to_string(),
                    });
                }
                if let Some(default) = &param.default {
                    resolved.values.insert(param.key, default.clone());
                }
            }
            Some(value) => {
                let value = check(param, value)?;
                resolved.values.insert(param.key, value);
            }
        }
    }

    Ok(resolved)
}

fn check(param: &ParameterSpec, value: &Value) -> Result<ParamValue, ValidationError> {
    let key = || param.key.to_string();

    match &param.kind {
        ParamKind::Text { min_len, max_len } => {
            let text = value.as_str().ok_or_else(|| ValidationError::InvalidType {
                key: key(),
                expected: "string",
            })?;
            let len = text.chars().count();
            let too_short = min_len.is_some_and(|min| len < min);
            let too_long = max_len.is_some_and(|max| len > max);
            if too_short || too_long {
                return Err(ValidationError::InvalidLength {
                    key: key(),
                    actual: len,
                    min: *min_len,
                    max: *max_len,
                });
            }
            Ok(ParamValue::Text(text.to_string()))
        }
        ParamKind::Integer { min, max } => {
            let n = as_integer(value).ok_or_else(|| ValidationError::InvalidType {
                key: key(),
                expected: "integer",
            })?;
            if n < *min || n > *max {
                return Err(ValidationError::OutOfRange {
                    key: key(),
                    actual: n,
                    min: *min,
                    max: *max,
                });
            }
            Ok(ParamValue::Integer(n))
        }
        ParamKind::Enum { allowed } => {
            let text = value.as_str().ok_or_else(|| ValidationError::InvalidType {
                key: key(),
                expected: "string",
            })?;
            if !allowed.iter().any(|candidate| *candidate == text) {
                return Err(ValidationError::InvalidEnum {
                    key: key(),
                    value: text.to_string(),
                    allowed: allowed.iter().map(|s| s.to_string()).collect(),
                });
            }
            Ok(ParamValue::Text(text.to_string()))
        }
    }
}

/// Accepts `5` and `5.0`, rejects `5.5` and non-numbers
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
