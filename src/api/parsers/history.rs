use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeMap;

/// Rating history payload: a flat object of `date -> rating`
pub fn parse_rating_history(data: Value) -> Result<BTreeMap<String, Value>> {
    match data {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => anyhow::bail!(
            "Expected rating history object, got {}",
            describe(&other)
        ),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
