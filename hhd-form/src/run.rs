use anyhow::anyhow;
pub use cursive;
use cursive::{Cursive, CursiveExt, event::Key};
use serde_json::{Map, Value};

use crate::{
    section::FormSection,
    ui::{FormApp, handle_back, handle_quit, handle_save, views::form_view},
};

/// Show `sections` in an interactive terminal form.
///
/// Blocks until the user quits. Returns the values collected by the last
/// save, keyed `"{section id}.{row key}"`, or `None` when nothing was saved.
///
/// # Errors
///
/// Returns an error when the form state cannot be recovered after the UI
/// exits.
pub fn run_form(
    title: &str,
    sections: Vec<FormSection>,
) -> anyhow::Result<Option<Map<String, Value>>> {
    #[cfg(feature = "logging")]
    {
        cursive::logger::init();
        cursive::logger::set_filter_levels_from_env();
    }

    let mut siv = Cursive::default();

    siv.add_fullscreen_layer(form_view(title, &sections));
    siv.set_user_data(FormApp::new(sections));

    siv.add_global_callback('q', handle_quit);
    siv.add_global_callback('Q', handle_quit);
    siv.add_global_callback('s', handle_save);
    siv.add_global_callback('S', handle_save);
    siv.add_global_callback(Key::Esc, handle_back);
    siv.add_global_callback('~', Cursive::toggle_debug_console);

    siv.run();

    let app = siv
        .take_user_data::<FormApp>()
        .ok_or_else(|| anyhow!("form state missing after UI exit"))?;
    Ok(app.saved)
}
