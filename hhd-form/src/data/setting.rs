use serde_json::{Map, Number, Value};

use crate::data::{
    schema::SchemaError,
    value::{display_value, truthy, type_name},
};

/// Leaf setting parsed from the settings schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    /// Display label.
    pub title: String,
    /// Optional help text.
    pub hint: Option<String>,
    /// Type tag and its type-specific fields.
    pub kind: SettingKind,
}

/// Closed set of setting types a form can render.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingKind {
    /// Checkbox. `default` is already coerced to a boolean.
    Bool { default: bool },
    /// Numeric input with inclusive soft bounds.
    Int {
        default: Option<Number>,
        min: Option<Number>,
        max: Option<Number>,
    },
    /// Select over an ordered list of scalar values.
    Discrete {
        options: Vec<Value>,
        default: Option<Value>,
    },
    /// Select over `key -> label` pairs, in insertion order.
    Multiple {
        options: Vec<(String, String)>,
        default: Option<String>,
    },
    /// Any other type tag. Rendering skips these.
    Unrecognized(String),
}

impl SettingKind {
    /// The type tag as it appears in the schema.
    pub fn tag(&self) -> &str {
        match self {
            SettingKind::Bool { .. } => "bool",
            SettingKind::Int { .. } => "int",
            SettingKind::Discrete { .. } => "discrete",
            SettingKind::Multiple { .. } => "multiple",
            SettingKind::Unrecognized(tag) => tag,
        }
    }
}

impl Setting {
    /// Parse a setting from its JSON object.
    ///
    /// `path` is only used for error messages. Fields that have the wrong type
    /// but do not prevent rendering (an `int` default that is not a number, a
    /// non-string `hint`) are dropped. Option lists that cannot be iterated are
    /// errors.
    pub fn from_value(value: &Value, path: &str) -> Result<Self, SchemaError> {
        let Value::Object(obj) = value else {
            return Err(SchemaError::NotAnObject {
                path: path.to_string(),
                actual: type_name(value).to_string(),
            });
        };

        let title = match obj.get("title") {
            None | Some(Value::Null) => String::new(),
            Some(v) => display_value(v),
        };
        let hint = obj.get("hint").and_then(Value::as_str).map(String::from);

        let kind = match obj.get("type").and_then(Value::as_str) {
            Some("bool") => SettingKind::Bool {
                default: obj.get("default").is_some_and(truthy),
            },
            Some("int") => SettingKind::Int {
                default: number_field(obj, "default", path),
                min: number_field(obj, "min", path),
                max: number_field(obj, "max", path),
            },
            Some("discrete") => SettingKind::Discrete {
                options: discrete_options(obj, path)?,
                default: obj.get("default").filter(|v| !v.is_null()).cloned(),
            },
            Some("multiple") => SettingKind::Multiple {
                options: multiple_options(obj, path)?,
                default: obj
                    .get("default")
                    .and_then(Value::as_str)
                    .map(String::from),
            },
            Some(other) => SettingKind::Unrecognized(other.to_string()),
            None => SettingKind::Unrecognized(String::new()),
        };

        Ok(Setting { title, hint, kind })
    }
}

fn number_field(obj: &Map<String, Value>, field: &str, path: &str) -> Option<Number> {
    match obj.get(field) {
        Some(Value::Number(n)) => Some(n.clone()),
        None | Some(Value::Null) => None,
        Some(other) => {
            debug!(
                "{path}.{field}: ignoring non-numeric value {}",
                display_value(other)
            );
            None
        }
    }
}

fn discrete_options(obj: &Map<String, Value>, path: &str) -> Result<Vec<Value>, SchemaError> {
    match obj.get("options") {
        Some(Value::Array(arr)) => Ok(arr.clone()),
        other => Err(SchemaError::TypeMismatch {
            path: format!("{path}.options"),
            expected: "array".to_string(),
            actual: other.map_or("nothing", type_name).to_string(),
        }),
    }
}

/// Options of a `multiple` setting as `(key, label)` pairs.
///
/// An array is accepted as well and keyed by position.
fn multiple_options(
    obj: &Map<String, Value>,
    path: &str,
) -> Result<Vec<(String, String)>, SchemaError> {
    match obj.get("options") {
        Some(Value::Object(map)) => Ok(map
            .iter()
            .map(|(k, v)| (k.clone(), display_value(v)))
            .collect()),
        Some(Value::Array(arr)) => Ok(arr
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), display_value(v)))
            .collect()),
        other => Err(SchemaError::TypeMismatch {
            path: format!("{path}.options"),
            expected: "object".to_string(),
            actual: other.map_or("nothing", type_name).to_string(),
        }),
    }
}
