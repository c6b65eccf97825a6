//! # hhd-form
//!
//! Form generation for Handheld Daemon settings.
//!
//! The daemon serves its settings as a nested JSON schema. This crate parses
//! that schema into typed settings, maps each setting to a control
//! descriptor, and groups the controls into form sections. Sections are plain
//! data; the [`html`] and [`ui`] modules put them on screen.
//!
//! ## Quick Start
//!
//! ```rust
//! use hhd_form::{create_form_section, data::SettingsSchema};
//!
//! let schema = SettingsSchema::from_json(
//!     r#"{"hhd": {"http": {"children": {
//!         "foo": {"type": "bool", "title": "Foo", "default": true}
//!     }}}}"#,
//! ).unwrap();
//!
//! let group = schema.children_at(&["hhd", "http"]).unwrap();
//! let section = create_form_section(&group, "hhd-http-form");
//! assert_eq!(section.rows[0].label, "Foo");
//!
//! let html = hhd_form::html::render_section(&section);
//! assert!(html.contains("checked"));
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Schema, groups and settings
//! - [`control`] - Setting to control mapping
//! - [`section`] - Form sections
//! - [`html`] - HTML rendering
//! - [`ui`] - Cursive views
//! - [`run`] - Interactive terminal form runner

#[macro_use]
extern crate log;

/// Settings schema data structures and parsing.
pub mod data;

/// Control descriptors built from settings.
pub mod control;

/// Form sections built from settings groups.
pub mod section;

/// HTML rendering of form sections.
pub mod html;

/// Cursive views for form sections.
pub mod ui;

/// Interactive terminal form runner.
pub mod run;

pub use control::{Control, create_input_for_setting};
pub use run::*;
pub use section::{FormRow, FormSection, create_form_section};
pub use serde_json::Value;
