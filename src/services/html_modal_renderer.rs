use crate::{
    application::{error::ApplicationError, services::TemplateRenderer},
    domain::{config::form::MetadataForm, models::field::FieldDescriptor},
};

/// Renders the metadata dialog as a plain HTML fragment.
#[derive(Debug, Default, Clone)]
pub struct HtmlModalRenderer;

impl HtmlModalRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_field(field: &FieldDescriptor) -> String {
        let name = escape(&field.name);
        let label = escape(field.label.as_deref().unwrap_or(&field.name));
        let id = format!("media-metadata-{}", name);
        let readonly = if field.is_reserved() { " readonly" } else { "" };

        let input = match field.field_type.as_str() {
            "textarea" => format!(
                r#"<textarea id="{id}" name="{name}"{readonly}></textarea>"#,
                id = id,
                name = name,
                readonly = readonly
            ),
            _ => format!(
                r#"<input type="text" id="{id}" name="{name}"{readonly}>"#,
                id = id,
                name = name,
                readonly = readonly
            ),
        };

        format!(
            r#"<div class="form-field" data-field-type="{ty}"><label for="{id}">{label}</label>{input}</div>"#,
            ty = escape(&field.field_type),
            id = id,
            label = label,
            input = input
        )
    }
}

impl TemplateRenderer for HtmlModalRenderer {
    fn render_modal(&self, form: &MetadataForm) -> Result<String, ApplicationError> {
        let mut html = String::from(
            r#"<div class="remodal" data-remodal-id="modal-admin-addon-media-metadata">"#,
        );

        if let Some(title) = form.title() {
            html.push_str(&format!("<h1>{}</h1>", escape(title)));
        }

        html.push_str(r#"<form class="media-metadata-form">"#);
        for field in &form.fields {
            html.push_str(&Self::render_field(field));
        }
        html.push_str(
            r#"<div class="button-bar"><button type="button" class="button" data-remodal-action="cancel">Cancel</button><button type="submit" class="button primary">Save</button></div>"#,
        );
        html.push_str("</form></div>");

        Ok(html)
    }
}

fn escape(raw: &str) -> String {
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
