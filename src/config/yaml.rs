//! YAML to JSON value conversion.

use serde_json::{Map, Number, Value as JsonValue};
use serde_yaml::Value as YamlValue;

/// Convert a YAML value into its JSON equivalent.
///
/// JSON objects only have string keys, so scalar mapping keys are rendered
/// as text (`1` becomes `"1"`, `true` becomes `"true"`, `~` becomes
/// `"null"`). Tags are dropped. Non-finite floats become `null`.
#[must_use]
pub fn yaml_to_json(value: YamlValue) -> JsonValue {
    match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(b),
        YamlValue::Number(n) => number_to_json(&n),
        YamlValue::String(s) => JsonValue::String(s),
        YamlValue::Sequence(items) => {
            JsonValue::Array(items.into_iter().map(yaml_to_json).collect())
        }
        YamlValue::Mapping(mapping) => JsonValue::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (key_to_string(key), yaml_to_json(value)))
                .collect::<Map<_, _>>(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn number_to_json(n: &serde_yaml::Number) -> JsonValue {
    if let Some(i) = n.as_i64() {
        JsonValue::from(i)
    } else if let Some(u) = n.as_u64() {
        JsonValue::from(u)
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(JsonValue::Null, JsonValue::Number)
    }
}

fn key_to_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Tagged(tagged) => key_to_string(tagged.value),
        complex => yaml_to_json(complex).to_string(),
    }
}
