use clap::Args;

use crate::config::DocsOptions;
use crate::services::{HubCatalog, HubInspector};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long, help = "Document enum parameters as sent by name")]
    pub enum_as_string: bool,

    #[arg(long, help = "Emit single-line JSON")]
    pub compact: bool,
}

pub fn handle(args: GenerateArgs, catalog: &HubCatalog) -> anyhow::Result<()> {
    println!("{}", render(&args, catalog, DocsOptions::from_env())?);
    Ok(())
}

fn render(args: &GenerateArgs, catalog: &HubCatalog, mut options: DocsOptions) -> anyhow::Result<String> {
    options.send_enum_by_string |= args.enum_as_string;

    let inspector = HubInspector::new(catalog.types());
    let documentation = inspector.generate_documentation(catalog, &options);

    if args.compact {
        Ok(serde_json::to_string(&documentation)?)
    } else {
        Ok(documentation.to_pretty_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::sample_catalog;
    use serde_json::Value;

    fn args(enum_as_string: bool, compact: bool) -> GenerateArgs {
        GenerateArgs {
            enum_as_string,
            compact,
        }
    }

    fn history_priority(output: &str) -> Value {
        let value: Value = serde_json::from_str(output).unwrap();
        let chat = &value["hubs"][0];
        let history = chat["methods"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["name"] == "GetHistory")
            .unwrap()
            .clone();
        history["parameters"][1].clone()
    }

    #[test]
    fn test_generate_pretty_by_default() {
        let output = render(&args(false, false), &sample_catalog(), DocsOptions::default()).unwrap();
        assert!(output.contains('\n'));

        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["title"], "SignalR Hub Documentation");
        assert_eq!(value["hubs"].as_array().unwrap().len(), 2);
        assert_eq!(history_priority(&output)["sendEnumAsString"], false);
    }

    #[test]
    fn test_generate_compact_is_single_line() {
        let output = render(&args(false, true), &sample_catalog(), DocsOptions::default()).unwrap();
        assert!(!output.contains('\n'));
        assert!(output.starts_with("{\"title\":"));
    }

    #[test]
    fn test_generate_enum_as_string_flag() {
        let output = render(&args(true, false), &sample_catalog(), DocsOptions::default()).unwrap();
        let priority = history_priority(&output);
        assert_eq!(priority["name"], "minimumPriority");
        assert_eq!(priority["sendEnumAsString"], true);
    }

    #[test]
    fn test_generate_keeps_configured_enum_as_string() {
        let options = DocsOptions {
            send_enum_by_string: true,
            ..DocsOptions::default()
        };
        let output = render(&args(false, false), &sample_catalog(), options).unwrap();
        assert_eq!(history_priority(&output)["sendEnumAsString"], true);
    }
}
