//! Flattening of a stats snapshot into dotted metric names.
//!
//! Pools come in two shapes. A scalar pool is emitted as `scheme.pool`. A
//! mapping pool contributes its entries directly under the scheme (the pool
//! name itself is dropped), except for per-server breakdowns, which are
//! emitted as `scheme.<server>.<counter>` with dots in the server name
//! replaced by underscores.

use crate::domain::errors::SnapshotError;
use crate::domain::metric::{Metric, MetricValue};
use crate::domain::snapshot::{StatsSnapshot, value_kind};
use serde_json::Value;

/// Rewrites `.` to `_` so a key cannot add levels to the metric hierarchy
pub fn mangle_key(key: &str) -> String {
    key.replace('.', "_")
}

/// Flattens every non-metadata entry of the snapshot, in document order.
///
/// Fails on the first value that is neither a number nor a string at a leaf
/// position, so a partially flattened snapshot is never returned.
pub fn flatten(snapshot: &StatsSnapshot, scheme: &str) -> Result<Vec<Metric>, SnapshotError> {
    let mut metrics = Vec::new();

    for (pool_key, pool_value) in snapshot.pools() {
        let Value::Object(entries) = pool_value else {
            let value = leaf_value(pool_value, || pool_key.to_string())?;
            metrics.push(Metric::new(format!("{}.{}", scheme, pool_key), value));
            continue;
        };

        for (key, value) in entries {
            match value {
                Value::Object(server) => {
                    let mangled = mangle_key(key);
                    for (server_key, server_value) in server {
                        let value = leaf_value(server_value, || {
                            format!("{}.{}.{}", pool_key, key, server_key)
                        })?;
                        metrics.push(Metric::new(
                            format!("{}.{}.{}", scheme, mangled, server_key),
                            value,
                        ));
                    }
                }
                _ => {
                    let value = leaf_value(value, || format!("{}.{}", pool_key, key))?;
                    metrics.push(Metric::new(format!("{}.{}", scheme, key), value));
                }
            }
        }
    }

    Ok(metrics)
}

fn leaf_value(value: &Value, path: impl FnOnce() -> String) -> Result<MetricValue, SnapshotError> {
    match value {
        Value::Number(n) => Ok(MetricValue::Number(n.clone())),
        Value::String(s) => Ok(MetricValue::Text(s.clone())),
        other => Err(SnapshotError::UnsupportedValue {
            path: path(),
            kind: value_kind(other),
        }),
    }
}
