//! Value - Loosely-typed attribute values and normalizer input
//!
//! Attribute maps come from configuration and API responses whose shape is only
//! known at runtime. `NameInput` is the closed form the name normalizer accepts;
//! anything that is not text becomes `NameInput::Absent` at this boundary.

use std::collections::HashMap;

use crate::error::{NameError, NameResult};

/// Attribute value of a resource
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    /// Number that is not an `i64` (floats, large unsigned), kept exactly
    Number(serde_json::Number),
    Bool(bool),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    /// Explicit null (e.g. an unset attribute in an API response)
    Null,
}

impl Value {
    /// Name of the variant, used in error messages and logs
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Int(_) => "Int",
            Value::Number(_) => "Number",
            Value::Bool(_) => "Bool",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Null => "Null",
        }
    }

    /// Convert a JSON document into a Value
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Number(n.clone()),
            },
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                let m: HashMap<_, _> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect();
                Value::Map(m)
            }
            serde_json::Value::Null => Value::Null,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(n) => serde_json::Value::Number((*n).into()),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => {
                let obj: serde_json::Map<_, _> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect();
                serde_json::Value::Object(obj)
            }
            Value::Null => serde_json::Value::Null,
        }
    }
}

/// Parse a JSON object of attributes
pub fn parse_attributes(content: &str) -> NameResult<HashMap<String, Value>> {
    let json: serde_json::Value = serde_json::from_str(content)?;
    match Value::from_json(&json) {
        Value::Map(map) => Ok(map),
        other => Err(NameError::NotAnAttributeMap(other.type_name())),
    }
}

/// Flatten nested maps into dotted keys (`alias` → `{name}` becomes `alias.name`)
///
/// Lists are kept as leaf values. When several entries flatten to the same
/// key (`"alias.name"` next to `alias` → `{name}`), the most deeply nested one
/// wins; entries of equal depth are ordered by their key path.
pub fn flatten_attributes(attributes: &HashMap<String, Value>) -> HashMap<String, Value> {
    let mut leaves = Vec::new();
    for (key, value) in attributes {
        flatten_into(vec![key.as_str()], value, &mut leaves);
    }
    leaves.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    let mut flat = HashMap::new();
    for (path, value) in leaves {
        flat.insert(path.join("."), value.clone());
    }
    flat
}

fn flatten_into<'a>(
    path: Vec<&'a str>,
    value: &'a Value,
    out: &mut Vec<(Vec<&'a str>, &'a Value)>,
) {
    match value {
        Value::Map(map) if !map.is_empty() => {
            for (k, v) in map {
                let mut child = path.clone();
                child.push(k.as_str());
                flatten_into(child, v, out);
            }
        }
        other => out.push((path, other)),
    }
}

/// Input accepted by the name normalizer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NameInput {
    /// No value, a null reference, or a value that is not text
    #[default]
    Absent,
    Text(String),
}

impl NameInput {
    /// Read an attribute value at the boundary
    ///
    /// Only `Value::String` is text; every other shape is `Absent`.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => NameInput::Text(s.clone()),
            _ => NameInput::Absent,
        }
    }

    /// The underlying text, or `""` when absent
    pub fn as_str(&self) -> &str {
        match self {
            NameInput::Absent => "",
            NameInput::Text(s) => s,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, NameInput::Absent)
    }
}

impl From<&str> for NameInput {
    fn from(s: &str) -> Self {
        NameInput::Text(s.to_string())
    }
}

impl From<String> for NameInput {
    fn from(s: String) -> Self {
        NameInput::Text(s)
    }
}

impl From<&String> for NameInput {
    fn from(s: &String) -> Self {
        NameInput::Text(s.clone())
    }
}

impl From<Option<&str>> for NameInput {
    fn from(s: Option<&str>) -> Self {
        s.map_or(NameInput::Absent, NameInput::from)
    }
}

impl From<Option<String>> for NameInput {
    fn from(s: Option<String>) -> Self {
        s.map_or(NameInput::Absent, NameInput::Text)
    }
}

impl From<&Value> for NameInput {
    fn from(value: &Value) -> Self {
        NameInput::from_value(Some(value))
    }
}

impl From<Option<&Value>> for NameInput {
    fn from(value: Option<&Value>) -> Self {
        NameInput::from_value(value)
    }
}
