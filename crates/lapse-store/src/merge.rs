//! Recursive JSON merge used by backends to implement `merge_item`.

use serde_json::Value;

/// Merge `incoming` into `target`.
///
/// Objects merge key by key, recursing into nested objects. Any other
/// combination (arrays, scalars, mismatched types) replaces `target`.
pub fn merge_values(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(target), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match target.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, incoming) => *target = incoming,
    }
}

/// Merge two raw stored strings.
///
/// When both parse as JSON objects the result is their recursive merge.
/// Otherwise `incoming` replaces `existing` verbatim.
pub fn merge_json(existing: &str, incoming: &str) -> String {
    let parsed = (
        serde_json::from_str::<Value>(existing),
        serde_json::from_str::<Value>(incoming),
    );

    match parsed {
        (Ok(mut target @ Value::Object(_)), Ok(incoming @ Value::Object(_))) => {
            merge_values(&mut target, incoming);
            target.to_string()
        }
        _ => incoming.to_string(),
    }
}
