mod commits;
mod pulls;
mod reports;
mod series;

pub use commits::normalize_commits;
pub use pulls::normalize_pull_requests;
pub use reports::normalize_reports;
pub use series::{time_series, velocity_trends};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Field deserializer that turns a value of the wrong type into `None`
/// instead of rejecting the whole record.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Maps every element of a JSON array through `convert`; anything other than
/// an array yields no records.
fn map_records<T>(records: &Value, convert: impl Fn(&Value) -> T) -> Vec<T> {
    records
        .as_array()
        .map(|items| items.iter().map(convert).collect())
        .unwrap_or_default()
}

/// Deserializes one record shape, falling back to an empty record when the
/// element is not even an object.
fn record_shape<T: DeserializeOwned + Default>(value: &Value) -> T {
    T::deserialize(value).unwrap_or_default()
}

fn has_object(value: &Value, field: &str) -> bool {
    value.get(field).is_some_and(Value::is_object)
}
