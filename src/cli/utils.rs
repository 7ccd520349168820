use std::fmt::Write;

use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;

/// One line of `hubdocs hubs` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubRow {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub route: String,
    pub methods: usize,
    pub requires_auth: bool,
}

/// Render an empty collection in the appropriate format
pub fn render_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<String> {
    match output_format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            collection_name: []
        }))?),
        OutputFormat::Text => Ok(message.to_string()),
    }
}

/// Aligned table of hubs for text output
pub fn render_hub_table(rows: &[HubRow]) -> anyhow::Result<String> {
    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);
    let route_width = rows.iter().map(|r| r.route.len()).max().unwrap_or(0).max(5);

    let mut out = String::new();
    write!(out, "{:<name_width$}  {:<route_width$}  {:>7}  AUTH", "NAME", "ROUTE", "METHODS")?;
    for row in rows {
        write!(
            out,
            "\n{:<name_width$}  {:<route_width$}  {:>7}  {}",
            row.name,
            row.route,
            row.methods,
            if row.requires_auth { "yes" } else { "no" }
        )?;
    }
    Ok(out)
}
