use cursive::{
    View,
    traits::{Nameable, Resizable, Scrollable},
    views::{Checkbox, Dialog, DummyView, EditView, LinearLayout, Panel, SelectView, TextView},
};

use crate::{
    control::Control,
    section::{FormRow, FormSection},
    ui::control_name,
};

const LABEL_WIDTH: usize = 32;
const NUMBER_WIDTH: usize = 12;

/// Full-screen form: one panel per section plus a key help line.
pub fn form_view(title: &str, sections: &[FormSection]) -> impl View {
    let mut body = LinearLayout::vertical();
    if sections.is_empty() {
        body.add_child(TextView::new("No settings available."));
    }
    for section in sections {
        body.add_child(section_view(section));
    }

    let layout = LinearLayout::vertical()
        .child(body.scrollable().full_height())
        .child(DummyView)
        .child(TextView::new("s: save   q: quit   Esc: back"));

    Dialog::around(layout).title(title).full_screen()
}

/// A bordered panel holding the section's rows.
pub fn section_view(section: &FormSection) -> Panel<LinearLayout> {
    let mut rows = LinearLayout::vertical();
    for row in &section.rows {
        rows.add_child(row_view(&section.id, row));
    }
    Panel::new(rows).title(section.id.as_str())
}

/// Label, control and optional hint line for one row.
pub fn row_view(section_id: &str, row: &FormRow) -> LinearLayout {
    let name = control_name(section_id, &row.key);
    let line = LinearLayout::horizontal()
        .child(TextView::new(row.label.clone()).fixed_width(LABEL_WIDTH))
        .child(control_view(name, &row.control));

    let mut out = LinearLayout::vertical().child(line);
    if let Some(hint) = &row.hint {
        out.add_child(TextView::new(format!("  {hint}")));
    }
    out
}

fn control_view(name: String, control: &Control) -> Box<dyn View> {
    match control {
        Control::Toggle(t) => Box::new(Checkbox::new().with_checked(t.checked).with_name(name)),
        Control::Number(n) => Box::new(
            EditView::new()
                .content(n.display())
                .with_name(name)
                .fixed_width(NUMBER_WIDTH),
        ),
        Control::Select(s) => {
            let items = s.options.iter().map(|o| (o.text.clone(), o.value.clone()));
            Box::new(
                SelectView::<String>::new()
                    .popup()
                    .with_all(items)
                    .selected(s.selected_index().unwrap_or(0))
                    .with_name(name),
            )
        }
    }
}
