//! HTML front end.
//!
//! Renders sections into markup for the settings page:
//!
//! ```html
//! <div id="hhd-http-form">
//!   <div><label for="enable">Enable</label><input type="checkbox" id="enable" checked></div>
//! </div>
//! ```

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::{
    control::{Control, SelectControl},
    section::{FormRow, FormSection},
};

/// Render every section, in order, inside the settings mount point.
pub fn render_container(container_id: &str, sections: &[FormSection]) -> String {
    let mut out = format!("<div id=\"{}\">\n", attr(container_id));
    for section in sections {
        out.push_str(&render_section(section));
    }
    out.push_str("</div>\n");
    out
}

/// Render one section container and its rows.
pub fn render_section(section: &FormSection) -> String {
    let mut out = format!("<div id=\"{}\">\n", attr(&section.id));
    for row in &section.rows {
        out.push_str("  ");
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str("</div>\n");
    out
}

/// Render a label/control pair.
pub fn render_row(row: &FormRow) -> String {
    let id = attr(row.control_id());
    let mut out = String::from("<div>");
    let _ = write!(out, "<label for=\"{id}\"");
    if let Some(hint) = &row.hint {
        let _ = write!(out, " title=\"{}\"", attr(hint));
    }
    let _ = write!(out, ">{}</label>", text(&row.label));
    out.push_str(&render_control(&id, &row.control));
    out.push_str("</div>");
    out
}

/// Render a control with an already escaped id.
fn render_control(id: &str, control: &Control) -> String {
    match control {
        Control::Toggle(t) => format!(
            "<input type=\"checkbox\" id=\"{id}\"{}>",
            if t.checked { " checked" } else { "" }
        ),
        Control::Number(n) => {
            let mut out = format!(
                "<input type=\"number\" id=\"{id}\" value=\"{}\"",
                attr(&n.display())
            );
            if let Some(min) = &n.min {
                let _ = write!(out, " min=\"{min}\"");
            }
            if let Some(max) = &n.max {
                let _ = write!(out, " max=\"{max}\"");
            }
            out.push('>');
            out
        }
        Control::Select(s) => render_select(id, s),
    }
}

fn render_select(id: &str, select: &SelectControl) -> String {
    let mut out = format!("<select id=\"{id}\">");
    for option in &select.options {
        let _ = write!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            attr(&option.value),
            if option.selected { " selected" } else { "" },
            text(&option.text)
        );
    }
    out.push_str("</select>");
    out
}
