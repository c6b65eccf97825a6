//! Control descriptors and the setting -> control mapping.
//!
//! A [`Control`] is plain data describing one interactive input. Front ends
//! ([`crate::html`], [`crate::ui`]) turn it into something on screen.

use serde::Serialize;
use serde_json::{Number, Value};

use crate::data::{
    setting::{Setting, SettingKind},
    value::{display_number, display_value, strict_eq},
};

/// An interactive form control.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Control {
    /// Checkbox.
    Toggle(ToggleControl),
    /// Numeric input.
    Number(NumberControl),
    /// Single-choice select.
    Select(SelectControl),
}

/// Checkbox state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleControl {
    pub checked: bool,
}

/// Numeric input with soft bounds.
///
/// Bounds are advisory: the initial value is kept even when it lies outside
/// them, and only front ends that accept user input apply them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberControl {
    pub value: Option<Number>,
    pub min: Option<Number>,
    pub max: Option<Number>,
}

/// Single-choice select.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectControl {
    pub options: Vec<SelectOption>,
}

/// One `<option>` of a select.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Displayed text.
    pub text: String,
    pub selected: bool,
}

/// Map a setting to its control.
///
/// Returns `None` for setting types no control exists for. The setting is
/// only read.
pub fn create_input_for_setting(setting: &Setting) -> Option<Control> {
    match &setting.kind {
        SettingKind::Bool { default } => Some(Control::Toggle(ToggleControl { checked: *default })),
        SettingKind::Int { default, min, max } => Some(Control::Number(NumberControl {
            value: default.clone(),
            min: min.clone(),
            max: max.clone(),
        })),
        SettingKind::Discrete { options, default } => {
            let chosen = default
                .as_ref()
                .and_then(|d| options.iter().rposition(|o| strict_eq(o, d)));
            let options = options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let text = display_value(option);
                    SelectOption {
                        value: text.clone(),
                        text,
                        selected: chosen == Some(i),
                    }
                })
                .collect();
            Some(Control::Select(SelectControl { options }))
        }
        SettingKind::Multiple { options, default } => {
            let options = options
                .iter()
                .map(|(key, label)| SelectOption {
                    value: key.clone(),
                    text: label.clone(),
                    selected: default.as_deref() == Some(key.as_str()),
                })
                .collect();
            Some(Control::Select(SelectControl { options }))
        }
        SettingKind::Unrecognized(_) => None,
    }
}

impl Control {
    /// The control's initial value as JSON.
    pub fn initial_value(&self) -> Value {
        match self {
            Control::Toggle(t) => Value::Bool(t.checked),
            Control::Number(n) => n.value.clone().map_or(Value::Null, Value::Number),
            Control::Select(s) => s
                .selected()
                .map_or(Value::Null, |o| Value::String(o.value.clone())),
        }
    }
}

impl NumberControl {
    /// Whether the initial value lies outside `min..=max`.
    pub fn default_out_of_bounds(&self) -> bool {
        let Some(v) = self.value.as_ref().and_then(Number::as_f64) else {
            return false;
        };
        let below = self.min.as_ref().and_then(Number::as_f64).is_some_and(|m| v < m);
        let above = self.max.as_ref().and_then(Number::as_f64).is_some_and(|m| v > m);
        below || above
    }

    /// Text shown in the input box.
    pub fn display(&self) -> String {
        self.value.as_ref().map(display_number).unwrap_or_default()
    }

    /// Interpret user input, clamped into the soft bounds.
    ///
    /// Returns `None` when the input is not a number.
    pub fn coerce(&self, input: &str) -> Option<Number> {
        let mut v: f64 = input.trim().parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        if let Some(min) = self.min.as_ref().and_then(Number::as_f64) {
            v = v.max(min);
        }
        if let Some(max) = self.max.as_ref().and_then(Number::as_f64) {
            v = v.min(max);
        }
        if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            Some(Number::from(v as i64))
        } else {
            Number::from_f64(v)
        }
    }
}

impl SelectControl {
    /// The selected option, if any option is marked.
    pub fn selected(&self) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.selected)
    }

    /// Position of the selected option.
    pub fn selected_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.selected)
    }
}
