use serde_json::{Map, Number, Value};

use super::yaml::{ScalarStyle, YamlNode, YamlValue};

/// Renders a metadata value as the string handed to consumers.
///
/// Scalars come back as written, null as `"null"`, collections as compact JSON.
pub fn render_value(node: &YamlNode) -> String {
    match &node.value {
        YamlValue::Null => "null".to_string(),
        YamlValue::Scalar { text, .. } => text.clone(),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => to_json(node).to_string(),
    }
}

/// Renders a mapping key. Non-scalar keys fall back to their JSON form.
pub fn render_key(node: &YamlNode) -> String {
    render_value(node)
}

fn to_json(node: &YamlNode) -> Value {
    match &node.value {
        YamlValue::Null => Value::Null,
        YamlValue::Scalar {
            text,
            style: ScalarStyle::Plain,
        } => plain_scalar(text),
        YamlValue::Scalar { text, .. } => Value::String(text.clone()),
        YamlValue::Sequence(items) => Value::Array(items.iter().map(to_json).collect()),
        YamlValue::Mapping(entries) => {
            let mut map = Map::new();
            for (key, value) in entries {
                map.insert(render_key(key), to_json(value));
            }
            Value::Object(map)
        }
    }
}

/// Core-schema typing for unquoted scalars.
fn plain_scalar(text: &str) -> Value {
    match text {
        "true" | "True" | "TRUE" => return Value::Bool(true),
        "false" | "False" | "FALSE" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = text.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Some(n) = text.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(text.to_string())
}
