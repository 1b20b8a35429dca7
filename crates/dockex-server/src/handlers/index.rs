use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::router::ExporterState;

pub async fn landing_page(State(state): State<Arc<ExporterState>>) -> Html<String> {
    Html(format!(
        "<html>\n\
         <head><title>Docker Exporter</title></head>\n\
         <body>\n\
         <h1>Docker Exporter</h1>\n\
         <p><a href=\"{path}\">Metrics</a></p>\n\
         </body>\n\
         </html>\n",
        path = escape_attribute(&state.telemetry_path)
    ))
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
