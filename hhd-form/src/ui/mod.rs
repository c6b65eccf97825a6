//! Cursive front end.
//!
//! Sections become panels of labelled rows: checkboxes for toggles, edit
//! boxes for numbers and popup selects for choices. Every control is named
//! `"{section id}.{row key}"` so its value can be read back on save.

use cursive::{
    Cursive,
    views::{Checkbox, Dialog, EditView, SelectView},
};
use serde_json::{Map, Value};

use crate::{control::Control, section::FormSection};

/// View construction.
pub mod views;

/// State kept in Cursive's user data while a form is open.
#[derive(Debug, Clone)]
pub struct FormApp {
    /// Sections on screen.
    pub sections: Vec<FormSection>,
    /// Values collected by the last save.
    pub saved: Option<Map<String, Value>>,
}

impl FormApp {
    pub fn new(sections: Vec<FormSection>) -> Self {
        Self {
            sections,
            saved: None,
        }
    }
}

/// Name under which a row's control is registered.
pub fn control_name(section_id: &str, key: &str) -> String {
    format!("{section_id}.{key}")
}

/// Quit the form without saving.
pub fn handle_quit(siv: &mut Cursive) {
    siv.quit();
}

/// Close the top dialog, or quit when only the form is left.
pub fn handle_back(siv: &mut Cursive) {
    if siv.screen().len() > 1 {
        siv.pop_layer();
    } else {
        siv.quit();
    }
}

/// Read every control and store the values in [`FormApp::saved`].
pub fn handle_save(siv: &mut Cursive) {
    let Some(sections) = siv.user_data::<FormApp>().map(|app| app.sections.clone()) else {
        return;
    };

    let values = collect_values(siv, &sections);
    let count = values.len();
    if let Some(app) = siv.user_data::<FormApp>() {
        app.saved = Some(values);
    }
    info!("Collected {count} setting values");
    siv.add_layer(Dialog::info(format!("Saved {count} values. Press q to leave.")));
}

/// Current value of every control, keyed `"{section id}.{row key}"`.
///
/// Numbers are clamped into their soft bounds; unparsable input falls back
/// to the initial value.
pub fn collect_values(siv: &mut Cursive, sections: &[FormSection]) -> Map<String, Value> {
    let mut out = Map::new();
    for section in sections {
        for row in &section.rows {
            let name = control_name(&section.id, &row.key);
            match read_control(siv, &name, &row.control) {
                Some(value) => {
                    out.insert(name, value);
                }
                None => warn!("Control {name} not found on screen"),
            }
        }
    }
    out
}

fn read_control(siv: &mut Cursive, name: &str, control: &Control) -> Option<Value> {
    match control {
        Control::Toggle(_) => siv.call_on_name(name, |v: &mut Checkbox| Value::Bool(v.is_checked())),
        Control::Number(n) => {
            let content = siv.call_on_name(name, |v: &mut EditView| v.get_content())?;
            Some(
                n.coerce(&content)
                    .map(Value::Number)
                    .unwrap_or_else(|| control.initial_value()),
            )
        }
        Control::Select(_) => siv
            .call_on_name(name, |v: &mut SelectView<String>| v.selection())
            .flatten()
            .map(|s| Value::String(s.as_ref().clone())),
    }
}
