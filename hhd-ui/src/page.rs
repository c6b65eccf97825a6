//! Front page state: tabs, the emulator overlay and SX mode.

use serde::Serialize;

use crate::prefs::PrefStore;

/// Preference key holding `"on"` or `"off"`.
pub const SX_MODE_KEY: &str = "sxMode";

pub const LOGO_DEFAULT: &str = "xbox-logo.svg";
pub const LOGO_SX: &str = "xbox360-logo.svg";

/// Shown when a ROM file is picked.
pub const ROM_IMPORT_NOTICE: &str = "ROM upload feature coming soon!";

/// Section shown on a fresh page.
pub const DEFAULT_SECTION: &str = "library";

/// Visible state of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub active_section: String,
    pub overlay_visible: bool,
    pub sx_bar_visible: bool,
    pub sx_mode: bool,
    pub banner_visible: bool,
    pub logo: &'static str,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            active_section: DEFAULT_SECTION.to_string(),
            overlay_visible: false,
            sx_bar_visible: false,
            sx_mode: false,
            banner_visible: false,
            logo: LOGO_DEFAULT,
        }
    }
}

impl PageState {
    /// Fresh page with SX mode restored from `store`.
    pub fn restore(store: &PrefStore) -> Self {
        let mut page = Self::default();
        if store.get(SX_MODE_KEY) == Some("on") {
            page.apply_sx(true);
        }
        page
    }

    /// Switch to the section `href` points at (`#library` or `library`).
    pub fn navigate(&mut self, href: &str) {
        self.active_section = href.trim_start_matches('#').to_string();
        self.overlay_visible = false;
    }

    /// Open the emulator overlay.
    pub fn play(&mut self) {
        self.overlay_visible = true;
        self.sx_bar_visible = self.sx_mode;
    }

    pub fn close_emulator(&mut self) {
        self.overlay_visible = false;
    }

    pub fn import_rom(&self) -> &'static str {
        ROM_IMPORT_NOTICE
    }

    /// Turn SX mode on or off and persist the choice.
    pub fn set_sx_mode(&mut self, on: bool, store: &mut PrefStore) -> anyhow::Result<()> {
        self.apply_sx(on);
        if on {
            if self.overlay_visible {
                self.sx_bar_visible = true;
            }
        } else {
            self.sx_bar_visible = false;
        }
        store.set(SX_MODE_KEY, if on { "on" } else { "off" })
    }

    fn apply_sx(&mut self, on: bool) {
        self.sx_mode = on;
        self.banner_visible = on;
        self.logo = if on { LOGO_SX } else { LOGO_DEFAULT };
    }
}
