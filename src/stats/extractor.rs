use serde_json::Value;

use super::StatsError;

/// Walks `path` into `document` and reads the stat found there.
///
/// Returns `Ok(None)` when the walk misses: a key is absent or an
/// intermediate node is not an object. A terminal number is used as is, a
/// terminal object yields the sum of its numeric children, and any other
/// terminal kind (array, string, bool, null) counts as found with value 0.
///
/// Numbers that do not fit in an `i64` (including fractional ones) and sums
/// that overflow are reported as [`StatsError::Extraction`].
pub fn extract<S: AsRef<str>>(document: &Value, path: &[S]) -> Result<Option<i64>, StatsError> {
    let mut current = document;
    for key in path {
        match child(current, key.as_ref()) {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }

    let value = match current {
        Value::Number(_) => integer(current)?,
        Value::Object(map) => {
            let mut total: i64 = 0;
            for (key, leaf) in map {
                if !leaf.is_number() {
                    continue;
                }
                total = total.checked_add(integer(leaf)?).ok_or_else(|| {
                    StatsError::Extraction(format!("sum overflowed at key '{key}'"))
                })?;
            }
            total
        }
        _ => 0,
    };

    Ok(Some(value))
}

fn child<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.as_object().and_then(|map| map.get(key))
}

fn integer(node: &Value) -> Result<i64, StatsError> {
    node.as_i64()
        .ok_or_else(|| StatsError::Extraction(format!("{node} is not a 64-bit integer")))
}
