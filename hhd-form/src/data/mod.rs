//! Settings data structures and schema parsing.
//!
//! This module turns the JSON served by Handheld Daemon at
//! `/api/v1/settings` into typed values:
//!
//! - [`schema`] - The schema root and path lookup
//! - [`group`] - A container's `children` mapping
//! - [`setting`] - Individual leaf settings
//! - [`value`] - Helpers for comparing and printing loosely typed JSON values

/// Schema root, path lookup and schema errors.
pub mod schema;

/// Ordered children of a settings container.
pub mod group;

/// Leaf settings and their closed set of types.
pub mod setting;

/// Loose JSON value semantics shared by the parsers and controls.
pub mod value;

pub use group::{GroupEntry, SettingsGroup};
pub use schema::{SchemaError, SettingsSchema};
pub use setting::{Setting, SettingKind};
