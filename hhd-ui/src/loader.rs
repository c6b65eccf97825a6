//! Settings page orchestration.
//!
//! Loading runs in two stages: a [`SettingsSource`] produces the schema, then
//! [`render_known_sections`] builds a form section for each known schema path
//! that has children. [`load_settings`] chains both and is the failure
//! boundary of the settings page: nothing it runs can make it return an
//! error.

use hhd_form::{FormSection, create_form_section, data::SettingsSchema, html};

use crate::api::SettingsSource;

/// Id of the element all settings sections are appended to.
pub const SETTINGS_CONTAINER_ID: &str = "settingsContainer";

/// A schema path rendered into its own section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownSection {
    /// Keys leading to the container, from the schema root.
    pub path: &'static [&'static str],
    /// Id given to the section's container.
    pub container_id: &'static str,
}

/// Paths rendered on the settings page, in display order.
pub const KNOWN_SECTIONS: &[KnownSection] = &[
    KnownSection {
        path: &["hhd", "http"],
        container_id: "hhd-http-form",
    },
    KnownSection {
        path: &["controllers", "legion_go"],
        container_id: "controllers-legion-go-form",
    },
];

/// A known path that could not be rendered. Logged, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaShapeError {
    #[error("No children present in {path} settings")]
    MissingChildren { path: String },
}

/// Output of the render stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedSections {
    /// Sections in [`KNOWN_SECTIONS`] order.
    pub sections: Vec<FormSection>,
    /// Known paths that were absent or had no children.
    pub skipped: Vec<SchemaShapeError>,
}

/// Render every known path of `schema` that has children.
pub fn render_known_sections(schema: &SettingsSchema) -> RenderedSections {
    render_sections(schema, KNOWN_SECTIONS)
}

/// Render the given paths of `schema`, in order.
pub fn render_sections(schema: &SettingsSchema, known: &[KnownSection]) -> RenderedSections {
    let mut out = RenderedSections::default();

    for section in known {
        let Some(group) = schema.children_at(section.path) else {
            let err = SchemaShapeError::MissingChildren {
                path: section.path.join("."),
            };
            info!("{err}");
            out.skipped.push(err);
            continue;
        };

        debug!("{} children: {}", group.path(), group.len());
        out.sections
            .push(create_form_section(&group, section.container_id));
    }

    out
}

/// The settings mount point. Sections are appended, never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsContainer {
    id: String,
    sections: Vec<FormSection>,
}

impl Default for SettingsContainer {
    fn default() -> Self {
        Self::new(SETTINGS_CONTAINER_ID)
    }
}

impl SettingsContainer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sections: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn append(&mut self, section: FormSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[FormSection] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<FormSection> {
        self.sections
    }

    /// Render the container and its sections as HTML.
    pub fn to_html(&self) -> String {
        html::render_container(&self.id, &self.sections)
    }
}

/// How a settings load ended.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The schema was fetched; `appended` sections were added.
    Loaded {
        appended: usize,
        skipped: Vec<SchemaShapeError>,
    },
    /// Fetching failed; the container was left untouched.
    Failed(String),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Fetch the schema and append one section per known path to `container`.
///
/// Errors are logged and reported through [`LoadOutcome::Failed`]; they are
/// never returned to the caller.
pub async fn load_settings<S: SettingsSource>(
    source: &S,
    container: &mut SettingsContainer,
) -> LoadOutcome {
    let schema = match source.fetch_settings().await {
        Ok(schema) => schema,
        Err(e) => {
            error!("Error loading settings: {e}");
            return LoadOutcome::Failed(e.to_string());
        }
    };

    let rendered = render_known_sections(&schema);
    let appended = rendered.sections.len();
    for section in rendered.sections {
        container.append(section);
    }

    LoadOutcome::Loaded {
        appended,
        skipped: rendered.skipped,
    }
}
