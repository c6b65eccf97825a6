use serde_json::{Map, Value};

use crate::data::{group::SettingsGroup, value::type_name};

/// Errors raised while interpreting a settings schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// A node that must be an object is something else.
    #[error("{path}: expected an object, found {actual}")]
    NotAnObject { path: String, actual: String },
    /// A field has an unusable type.
    #[error("Type mismatch at {path}: expected {expected}, got {actual}")]
    TypeMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

/// Root of the settings document: namespace -> section -> container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsSchema {
    root: Map<String, Value>,
}

impl TryFrom<Value> for SettingsSchema {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(SchemaError::NotAnObject {
                path: "<root>".to_string(),
                actual: type_name(&other).to_string(),
            }),
        }
    }
}

impl SettingsSchema {
    /// Build a schema from an already parsed root object.
    pub fn new(root: Map<String, Value>) -> Self {
        Self { root }
    }

    /// Parse a schema from JSON text.
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Ok(Self::try_from(value)?)
    }

    /// Top-level namespaces in document order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// Raw root object.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Follow `path` through nested objects.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get(*first)?;
        for key in rest {
            node = node.as_object()?.get(*key)?;
        }
        Some(node)
    }

    /// The `children` of the container at `path`, if it has any.
    ///
    /// Returns `None` when the path is missing, the node is not an object, or
    /// it carries no `children` object.
    pub fn children_at(&self, path: &[&str]) -> Option<SettingsGroup<'_>> {
        let children = self.lookup(path)?.as_object()?.get("children")?.as_object()?;
        Some(SettingsGroup::new(path.join("."), children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> SettingsSchema {
        SettingsSchema::try_from(json!({
            "hhd": {
                "http": {
                    "type": "container",
                    "children": {
                        "port": {"type": "int", "default": 5335}
                    }
                },
                "version": {"type": "version", "value": "abc"}
            },
            "controllers": {}
        }))
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let s = schema();
        assert!(s.lookup(&["hhd", "http"]).is_some());
        assert!(s.lookup(&["hhd", "missing"]).is_none());
        assert!(s.lookup(&["hhd", "version", "value", "deeper"]).is_none());
        assert!(s.lookup(&[]).is_none());
        assert_eq!(s.namespaces().collect::<Vec<_>>(), ["hhd", "controllers"]);
    }

    #[test]
    fn test_children_at() {
        let s = schema();
        let group = s.children_at(&["hhd", "http"]).unwrap();
        assert_eq!(group.path(), "hhd.http");
        assert_eq!(group.len(), 1);

        assert!(s.children_at(&["hhd", "version"]).is_none());
        assert!(s.children_at(&["controllers", "legion_go"]).is_none());
    }

    #[test]
    fn test_root_must_be_object() {
        let err = SettingsSchema::try_from(json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NotAnObject {
                path: "<root>".to_string(),
                actual: "array".to_string()
            }
        );
        assert!(SettingsSchema::from_json("not json").is_err());
    }
}
