//! Form sections built from a settings container.

use serde::Serialize;

use crate::{
    control::{Control, create_input_for_setting},
    data::group::{GroupEntry, SettingsGroup},
};

/// A labelled control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormRow {
    /// Schema key. Also the control id the label points at.
    pub key: String,
    /// Label text, taken from the setting title.
    pub label: String,
    /// Optional help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub control: Control,
}

/// One container of rows, rendered from a settings group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSection {
    /// Identifier of the section's container.
    pub id: String,
    pub rows: Vec<FormRow>,
}

impl FormRow {
    /// Identifier of the control, which the label refers to.
    pub fn control_id(&self) -> &str {
        &self.key
    }
}

impl FormSection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find a row by its schema key.
    pub fn row(&self, key: &str) -> Option<&FormRow> {
        self.rows.iter().find(|r| r.key == key)
    }
}

/// Build a section holding one row per renderable setting of `children`.
///
/// Entries that are not settings, fail to parse, or have no control are
/// skipped and logged; the rest of the section is still built.
pub fn create_form_section(children: &SettingsGroup<'_>, container_id: &str) -> FormSection {
    let mut rows = Vec::with_capacity(children.len());

    for (key, entry) in children.entries() {
        let setting = match entry {
            GroupEntry::Setting(setting) => setting,
            GroupEntry::Invalid(e) => {
                info!("Skipping invalid setting: {key} ({e})");
                continue;
            }
            GroupEntry::Group(group) => {
                debug!("Input not created for nested container: {}", group.path());
                continue;
            }
        };

        let Some(control) = create_input_for_setting(&setting) else {
            info!(
                "Input not created for setting: {key} (type {:?})",
                setting.kind.tag()
            );
            continue;
        };

        rows.push(FormRow {
            key: key.to_string(),
            label: setting.title,
            hint: setting.hint,
            control,
        });
    }

    FormSection {
        id: container_id.to_string(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ToggleControl;
    use serde_json::json;

    #[test]
    fn test_null_entry_is_skipped() {
        let _ = env_logger::builder().is_test(true).try_init();
        let children = json!({
            "gone": null,
            "foo": {"type": "bool", "title": "Foo", "default": true}
        });
        let group = SettingsGroup::new("hhd.http", children.as_object().unwrap());
        let section = create_form_section(&group, "hhd-http-form");

        assert_eq!(section.id, "hhd-http-form");
        assert_eq!(section.rows.len(), 1);
        assert_eq!(section.rows[0].key, "foo");
        assert_eq!(section.rows[0].control_id(), "foo");
    }

    #[test]
    fn test_rows_keep_schema_order_and_skip_unrenderable() {
        let children = json!({
            "tdp": {"type": "discrete", "title": "TDP", "options": [8, 15, 30], "default": 15},
            "reset": {"type": "event", "title": "Reset"},
            "broken_options": {"type": "multiple", "title": "Broken"},
            "nested": {"type": "container", "children": {}},
            "boost": {"type": "bool", "title": "Boost", "hint": "CPU boost", "default": false},
            "port": {"type": "int", "title": "Port", "default": 5335, "min": 1024, "max": 65535}
        });
        let group = SettingsGroup::new("", children.as_object().unwrap());
        let section = create_form_section(&group, "s");

        let keys: Vec<_> = section.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["tdp", "boost", "port"]);

        let boost = section.row("boost").unwrap();
        assert_eq!(boost.label, "Boost");
        assert_eq!(boost.hint.as_deref(), Some("CPU boost"));
        assert_eq!(
            boost.control,
            Control::Toggle(ToggleControl { checked: false })
        );
    }

    #[test]
    fn test_empty_children() {
        let children = serde_json::Map::new();
        let group = SettingsGroup::new("x", &children);
        let section = create_form_section(&group, "empty");
        assert!(section.is_empty());
    }

    #[test]
    fn test_section_serializes() {
        let children = json!({"foo": {"type": "bool", "title": "Foo", "default": true}});
        let group = SettingsGroup::new("", children.as_object().unwrap());
        let section = create_form_section(&group, "id");
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!({
                "id": "id",
                "rows": [{
                    "key": "foo",
                    "label": "Foo",
                    "control": {"kind": "toggle", "checked": true}
                }]
            })
        );
    }
}
