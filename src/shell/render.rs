//! Server-side HTML for the shell pages.

use std::fmt::Write;

use crate::forms::{self, FieldSpec};
use crate::models::Page;
use crate::symptoms::MAX_SYMPTOM_SLOTS;
use crate::vocabulary::{self, SYMPTOMS};

use super::{symptom_slot_key, symptom_slot_label, Outcome, PageView};

pub const MENU_TITLE: &str = "Multiple Disease Prediction System";
pub const MEDICINES_HEADING: &str = "Medicines for the predicted disease:";

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a complete page: sidebar, title, form, and outcome region.
pub fn render_page(view: &PageView) -> String {
    let page = view.page;
    let mut body = String::new();

    let _ = write!(body, "<h1>{}</h1>", escape_html(page.title()));
    let _ = write!(
        body,
        r#"<form method="post" action="/pages/{}"><div class="grid cols-{}">"#,
        page.as_str(),
        page.columns()
    );
    match page.target() {
        Some(target) => {
            for spec in forms::fields_for(target) {
                body.push_str(&text_field(spec, view.value(spec.key)));
            }
        }
        None => {
            for slot in 1..=MAX_SYMPTOM_SLOTS {
                body.push_str(&symptom_select(slot, view.value(&symptom_slot_key(slot))));
            }
        }
    }
    let _ = write!(
        body,
        r#"</div><button type="submit">{}</button></form>"#,
        escape_html(page.submit_label())
    );

    if let Some(outcome) = &view.outcome {
        body.push_str(&outcome_region(outcome));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
{sidebar}
<main>{body}</main>
</body>
</html>
"#,
        title = escape_html(page.menu_label()),
        sidebar = sidebar(page),
    )
}

fn sidebar(active: Page) -> String {
    let mut nav = format!(r#"<nav class="sidebar"><h2>{MENU_TITLE}</h2><ul>"#);
    for page in Page::ALL {
        let class = if *page == active { r#" class="active""# } else { "" };
        let _ = write!(
            nav,
            r#"<li{class}><a href="/pages/{}">{}</a></li>"#,
            page.as_str(),
            escape_html(page.menu_label())
        );
    }
    nav.push_str("</ul></nav>");
    nav
}

fn text_field(spec: &FieldSpec, value: &str) -> String {
    format!(
        r#"<label>{label}<input type="text" name="{key}" value="{value}"></label>"#,
        label = escape_html(spec.label),
        key = escape_html(spec.key),
        value = escape_html(value),
    )
}

fn symptom_select(slot: usize, submitted: &str) -> String {
    let submitted = submitted.trim();
    let selected = if vocabulary::is_symptom(submitted) {
        submitted
    } else {
        vocabulary::default_symptom()
    };

    let mut html = format!(
        r#"<label>{}<select name="{}">"#,
        escape_html(&symptom_slot_label(slot)),
        symptom_slot_key(slot)
    );
    // A repeated vocabulary entry is listed once per occurrence; only the
    // first copy carries the selection.
    let mut marked = false;
    for name in SYMPTOMS {
        let mark = !marked && name == selected;
        marked |= mark;
        let _ = write!(
            html,
            r#"<option value="{0}"{1}>{0}</option>"#,
            escape_html(name),
            if mark { " selected" } else { "" }
        );
    }
    html.push_str("</select></label>");
    html
}

fn outcome_region(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Binary { message, .. } => {
            format!(r#"<div class="result success">{}</div>"#, escape_html(message))
        }
        Outcome::Symptoms(diagnosis) => {
            let mut html = format!(
                r#"<div class="result success">The predicted disease is: {}</div>"#,
                escape_html(diagnosis.disease)
            );
            let _ = write!(html, r#"<div class="result info">{MEDICINES_HEADING}</div>"#);
            for medicine in &diagnosis.medicines {
                let _ = write!(
                    html,
                    r#"<div class="result success">- {}</div>"#,
                    escape_html(medicine)
                );
            }
            html
        }
        Outcome::Rejected(err) => {
            format!(
                r#"<div class="result error" role="alert">{}</div>"#,
                escape_html(&err.to_string())
            )
        }
    }
}

const STYLE: &str = r#"
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917; display: flex; min-height: 100vh;
    }
    .sidebar { width: 260px; background: #f0f2f6; padding: 24px 16px; }
    .sidebar h2 { font-size: 18px; margin-bottom: 16px; }
    .sidebar ul { list-style: none; }
    .sidebar li a {
      display: block; padding: 10px 12px; border-radius: 8px;
      color: #31333f; text-decoration: none;
    }
    .sidebar li.active a { background: #ff4b4b; color: white; }
    main { flex: 1; padding: 32px 48px; }
    h1 { font-size: 32px; margin-bottom: 24px; }
    .grid { display: grid; gap: 16px; margin-bottom: 24px; }
    .cols-3 { grid-template-columns: repeat(3, 1fr); }
    .cols-5 { grid-template-columns: repeat(5, 1fr); }
    label { display: flex; flex-direction: column; gap: 6px; font-size: 14px; }
    input, select {
      padding: 8px 10px; border: 1px solid #d6d3d1; border-radius: 8px; font-size: 15px;
    }
    button {
      padding: 10px 18px; border-radius: 8px; border: 1px solid #d6d3d1;
      background: white; cursor: pointer; font-size: 15px;
    }
    .result { margin-top: 16px; padding: 14px 16px; border-radius: 8px; }
    .result.success { background: #dcfce7; color: #166534; }
    .result.info { background: #dbeafe; color: #1e40af; }
    .result.error { background: #fee2e2; color: #991b1b; }
"#;
