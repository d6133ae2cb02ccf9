use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::types::FieldValues;

/// Decodes raw form values into `T`, matching keys by serde field name.
///
/// Keys that are missing or `null` keep `T::default()`'s value. Loosely typed form input is
/// coerced where unambiguous (`"42"` into a number, `"true"` into a bool, a scalar into a
/// one-element list, a number into a string). A key that still does not fit is reported by name.
pub fn decode_values<T>(values: &FieldValues) -> Result<T, DecodeError>
where
    T: DeserializeOwned + Serialize + Default,
{
    let defaults = match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Err(DecodeError::NotAnObject),
        Err(e) => return Err(DecodeError::Other(e.to_string())),
    };

    let mut merged = defaults.clone();
    for (key, raw) in values {
        if raw.is_null() {
            continue;
        }
        let mut first_err = None;
        let mut accepted = None;
        for candidate in candidates(raw) {
            match probe::<T>(&defaults, key, &candidate) {
                Ok(()) => {
                    accepted = Some(candidate);
                    break;
                }
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        match accepted {
            Some(v) => {
                merged.insert(key.clone(), v);
            }
            None => {
                return Err(DecodeError::InvalidField {
                    field: key.clone(),
                    reason: first_err.unwrap_or_else(|| "no compatible representation".into()),
                })
            }
        }
    }

    serde_json::from_value(Value::Object(merged)).map_err(|e| DecodeError::Other(e.to_string()))
}

fn probe<T: DeserializeOwned>(defaults: &Map<String, Value>, key: &str, value: &Value) -> Result<(), String> {
    let mut m = defaults.clone();
    m.insert(key.to_string(), value.clone());
    serde_json::from_value::<T>(Value::Object(m))
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn candidates(raw: &Value) -> Vec<Value> {
    let mut out = vec![raw.clone()];
    match raw {
        Value::String(s) => {
            let t = s.trim();
            if let Ok(i) = t.parse::<i64>() {
                out.push(Value::from(i));
            } else if let Ok(u) = t.parse::<u64>() {
                out.push(Value::from(u));
            } else if let Some(n) = t.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                out.push(Value::Number(n));
            }
            match t {
                "true" => out.push(Value::Bool(true)),
                "false" => out.push(Value::Bool(false)),
                _ => {}
            }
            out.push(Value::Array(vec![raw.clone()]));
        }
        Value::Number(n) => {
            out.push(Value::String(n.to_string()));
            out.push(Value::Array(vec![raw.clone()]));
        }
        Value::Bool(b) => {
            out.push(Value::String(b.to_string()));
            out.push(Value::Array(vec![raw.clone()]));
        }
        _ => {}
    }
    out
}
