pub mod report;

use serde::Serialize;

use crate::controller::AppState;
use crate::model::Country;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    total: usize,
    matched: usize,
    search: &'a str,
    region: Option<&'a str>,
    population: String,
    countries: &'a [&'a Country],
}

pub fn render_text(records: &[&Country]) -> Vec<u8> {
    let mut out = String::new();
    for r in records {
        out.push_str(r.display_name());
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(state: &AppState<'_>) -> Vec<u8> {
    let export = JsonExport {
        total: state.dataset().len(),
        matched: state.view.filtered.len(),
        search: &state.criteria.text,
        region: state.criteria.region.as_deref(),
        population: state.criteria.band.to_string(),
        countries: &state.view.filtered,
    };
    serde_json::to_vec_pretty(&export).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render(format: OutputFormat, state: &AppState<'_>) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(&state.view.filtered),
        OutputFormat::Json => render_json(state),
        OutputFormat::Html => report::render_html(state),
    }
}
