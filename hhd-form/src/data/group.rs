use serde_json::{Map, Value};

use crate::data::{schema::SchemaError, setting::Setting, value::type_name};

/// Borrowed view of a container's `children` mapping.
///
/// Iteration follows the order keys appear in the served JSON.
#[derive(Debug, Clone)]
pub struct SettingsGroup<'a> {
    path: String,
    children: &'a Map<String, Value>,
}

/// One child of a [`SettingsGroup`].
#[derive(Debug)]
pub enum GroupEntry<'a> {
    /// A leaf setting.
    Setting(Setting),
    /// A nested container with its own `children`.
    Group(SettingsGroup<'a>),
    /// An entry that could not be parsed (null, a scalar, bad options).
    Invalid(SchemaError),
}

impl<'a> SettingsGroup<'a> {
    /// Wrap a `children` mapping. `path` prefixes error messages.
    pub fn new(path: impl Into<String>, children: &'a Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            children,
        }
    }

    /// Dot-separated path of this group inside the schema.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw children mapping.
    pub fn children(&self) -> &'a Map<String, Value> {
        self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Path of a child key inside this group.
    pub fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    /// Iterate over `(key, entry)` pairs in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, GroupEntry<'a>)> + '_ {
        self.children
            .iter()
            .map(|(key, value)| (key.as_str(), self.classify(key, value)))
    }

    fn classify(&self, key: &str, value: &'a Value) -> GroupEntry<'a> {
        let path = self.child_path(key);

        let Value::Object(obj) = value else {
            return GroupEntry::Invalid(SchemaError::NotAnObject {
                path,
                actual: type_name(value).to_string(),
            });
        };

        if obj.get("type").and_then(Value::as_str) == Some("container")
            && let Some(Value::Object(children)) = obj.get("children")
        {
            return GroupEntry::Group(SettingsGroup::new(path, children));
        }

        match Setting::from_value(value, &path) {
            Ok(setting) => GroupEntry::Setting(setting),
            Err(e) => GroupEntry::Invalid(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::setting::SettingKind;
    use serde_json::json;

    #[test]
    fn test_entries_classified_in_order() {
        let children = json!({
            "broken": null,
            "enable": {"type": "bool", "title": "Enable", "default": true},
            "nested": {"type": "container", "children": {"x": {"type": "bool"}}},
            "scalar": 12,
        });
        let map = children.as_object().unwrap();
        let group = SettingsGroup::new("hhd.http", map);
        let entries: Vec<_> = group.entries().collect();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].0, "broken");
        assert!(matches!(
            &entries[0].1,
            GroupEntry::Invalid(SchemaError::NotAnObject { path, .. }) if path == "hhd.http.broken"
        ));
        assert!(matches!(
            &entries[1].1,
            GroupEntry::Setting(s) if s.kind == SettingKind::Bool { default: true }
        ));
        match &entries[2].1 {
            GroupEntry::Group(g) => {
                assert_eq!(g.path(), "hhd.http.nested");
                assert_eq!(g.len(), 1);
            }
            other => panic!("expected a nested group, got {other:?}"),
        }
        assert!(matches!(&entries[3].1, GroupEntry::Invalid(_)));
    }

    #[test]
    fn test_container_without_children_is_a_setting() {
        let children = json!({"c": {"type": "container", "title": "Empty"}});
        let group = SettingsGroup::new("", children.as_object().unwrap());
        let (key, entry) = group.entries().next().unwrap();
        assert_eq!(key, "c");
        assert!(matches!(
            entry,
            GroupEntry::Setting(Setting { kind: SettingKind::Unrecognized(ref t), .. }) if t == "container"
        ));
    }
}
