//! Strict JSON schemas for OpenAI structured outputs.
//!
//! Strict mode only accepts closed objects whose every property is required,
//! and it does not resolve `$ref`. schemars emits shared types under
//! `definitions`, so those are substituted in place while the tree is walked.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Types that can be requested as structured output.
///
/// Implemented for every `JsonSchema + DeserializeOwned` type.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Strict OpenAI-compatible JSON schema for this type
    fn openai_schema() -> Value {
        let mut root = serde_json::to_value(schema_for!(Self)).unwrap_or_default();

        let definitions = match &mut root {
            Value::Object(map) => {
                map.remove("$schema");
                // The name travels next to the schema, not inside it
                map.remove("title");
                match map.remove("definitions") {
                    Some(Value::Object(defs)) => defs,
                    _ => Map::new(),
                }
            }
            _ => Map::new(),
        };

        make_strict(&mut root, &definitions);
        root
    }

    /// Schema name sent alongside the schema
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Resolve local references and close every object schema below `node`
fn make_strict(node: &mut Value, definitions: &Map<String, Value>) {
    if let Some(target) = referenced(node, definitions) {
        *node = target;
    }

    match node {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("object") {
                let required: Vec<Value> = map
                    .get("properties")
                    .and_then(Value::as_object)
                    .map(|props| props.keys().cloned().map(Value::String).collect())
                    .unwrap_or_default();
                map.insert("additionalProperties".into(), Value::Bool(false));
                map.insert("required".into(), Value::Array(required));
            }
            for child in map.values_mut() {
                make_strict(child, definitions);
            }
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                make_strict(child, definitions);
            }
        }
        _ => {}
    }
}

/// The definition a `{"$ref": "#/definitions/Name"}` node points at
fn referenced(node: &Value, definitions: &Map<String, Value>) -> Option<Value> {
    let name = node
        .get("$ref")?
        .as_str()?
        .strip_prefix("#/definitions/")?;
    definitions.get(name).cloned()
}
