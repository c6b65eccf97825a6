//! # hhd-ui
//!
//! Terminal front end for Handheld Daemon.
//!
//! - **Settings**: fetches the daemon's settings schema and renders the known
//!   sections as forms, either as HTML or as an interactive TUI.
//! - **Controller tester**: polls gamepad state and renders a status panel
//!   whenever a button or axis changes.
//! - **Page state**: navigation, emulator overlay and the persisted SX mode.
//!
//! ## Modules
//!
//! - [`api`] - Settings schema sources
//! - [`config`] - `.hhd-ui.toml` loading
//! - [`controller`] - Gamepad polling and the status panel
//! - [`ctx`] - Application context
//! - [`loader`] - Settings page orchestration
//! - [`page`] - Page and SX mode state
//! - [`prefs`] - Persisted UI flags
//!
//! ## Example
//!
//! ```rust,no_run
//! use hhd_ui::{api::HttpSettingsSource, loader::{SettingsContainer, load_settings}};
//!
//! # async fn demo() {
//! let source = HttpSettingsSource::new("http://localhost:5335");
//! let mut container = SettingsContainer::default();
//! if load_settings(&source, &mut container).await.is_loaded() {
//!     println!("{}", container.to_html());
//! }
//! # }
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod ctx;
pub mod loader;
pub mod page;
pub mod prefs;

#[macro_use]
extern crate log;

pub use hhd_form;
