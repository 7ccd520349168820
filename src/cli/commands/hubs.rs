use serde_json::json;

use crate::cli::utils::{render_empty_collection, render_hub_table, HubRow};
use crate::cli::OutputFormat;
use crate::services::{HubCatalog, HubDiscovery, HubInspector};

pub fn handle(catalog: &HubCatalog, output_format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(catalog, &output_format)?);
    Ok(())
}

fn render(catalog: &HubCatalog, output_format: &OutputFormat) -> anyhow::Result<String> {
    let discovered = catalog.discover();
    if discovered.is_empty() {
        return render_empty_collection(output_format, "hubs", "No hubs found in catalog");
    }

    let inspector = HubInspector::new(catalog.types());
    let rows: Vec<HubRow> = discovered
        .iter()
        .map(|found| {
            let info = inspector.inspect_hub(&found.hub, &found.route, false);
            HubRow {
                name: info.name.clone(),
                type_name: found.hub.full_name(),
                route: found.route.clone(),
                methods: info.methods.len(),
                requires_auth: info.requires_auth,
            }
        })
        .collect();

    match output_format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({ "hubs": rows }))?),
        OutputFormat::Text => render_hub_table(&rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::TypeRegistry;
    use crate::samples::sample_catalog;
    use serde_json::Value;

    #[test]
    fn test_hubs_json_lists_mounted_hubs() {
        let output = render(&sample_catalog(), &OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        let hubs = value["hubs"].as_array().unwrap();
        assert_eq!(hubs.len(), 2);
        assert_eq!(hubs[0]["name"], "Chat");
        assert_eq!(hubs[0]["type"], "HubDocs.Samples.Hubs.ChatHub");
        assert_eq!(hubs[0]["route"], "/hubs/chat");
        assert_eq!(hubs[0]["methods"], 5);
        assert_eq!(hubs[0]["requiresAuth"], false);
        assert_eq!(hubs[1]["name"], "Admin");
        assert_eq!(hubs[1]["requiresAuth"], true);
    }

    #[test]
    fn test_hubs_text_table() {
        let output = render(&sample_catalog(), &OutputFormat::Text).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].starts_with("Chat"));
        assert!(lines[1].contains("/hubs/chat"));
        assert!(lines[1].ends_with("no"));
        assert!(lines[2].starts_with("Admin"));
        assert!(lines[2].ends_with("yes"));
    }

    #[test]
    fn test_hubs_empty_catalog() {
        let catalog = HubCatalog::new(TypeRegistry::new());
        assert_eq!(
            render(&catalog, &OutputFormat::Text).unwrap(),
            "No hubs found in catalog"
        );
        let value: Value = serde_json::from_str(&render(&catalog, &OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(value["hubs"], serde_json::json!([]));
    }
}
