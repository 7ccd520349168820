use std::fmt::Write;
use std::sync::Arc;

use anyhow::anyhow;
use clap::Args;

use crate::cli::OutputFormat;
use crate::models::HubInfo;
use crate::services::{DiscoveredHub, HubCatalog, HubDiscovery, HubInspector};

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[arg(help = "Hub type name, full type name, or display name")]
    pub hub: String,

    #[arg(long, help = "Document enum parameters as sent by name")]
    pub enum_as_string: bool,
}

pub fn handle(args: InspectArgs, catalog: &HubCatalog, output_format: OutputFormat) -> anyhow::Result<()> {
    let info = describe(&args, catalog)?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(info.as_ref())?),
        OutputFormat::Text => println!("{}", render_text(&info)?),
    }
    Ok(())
}

fn describe(args: &InspectArgs, catalog: &HubCatalog) -> anyhow::Result<Arc<HubInfo>> {
    let found = find_hub(catalog.discover(), &args.hub)
        .ok_or_else(|| anyhow!("Hub '{}' not found", args.hub))?;

    let inspector = HubInspector::new(catalog.types());
    Ok(inspector.inspect_hub(&found.hub, &found.route, args.enum_as_string))
}

fn find_hub(hubs: Vec<DiscoveredHub>, wanted: &str) -> Option<DiscoveredHub> {
    hubs.into_iter().find(|found| {
        found.hub.name == wanted || found.hub.full_name() == wanted || found.hub.display_name() == wanted
    })
}

fn render_text(info: &HubInfo) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "{} ({})", info.name, info.route)?;
    write!(out, "  {}", info.description)?;
    if info.requires_auth {
        write!(out, "\n  requires authentication")?;
    }

    for method in &info.methods {
        let params: Vec<String> = method
            .parameters
            .iter()
            .map(|p| {
                let marker = if p.is_optional { "?" } else { "" };
                format!("{}{}: {}", p.name, marker, p.friendly_type)
            })
            .collect();
        let lock = if method.requires_auth { " [auth]" } else { "" };
        write!(out, "\n  {}({}) -> {}{}", method.name, params.join(", "), method.return_type, lock)?;

        if let Some(roles) = method.required_roles.as_ref().filter(|r| !r.is_empty()) {
            write!(out, "\n      roles: {}", roles.join(", "))?;
        }
        if let Some(policies) = method.required_policies.as_ref().filter(|p| !p.is_empty()) {
            write!(out, "\n      policies: {}", policies.join(", "))?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::sample_catalog;

    fn args(hub: &str, enum_as_string: bool) -> InspectArgs {
        InspectArgs {
            hub: hub.to_string(),
            enum_as_string,
        }
    }

    #[test]
    fn test_find_hub_by_any_name() {
        let catalog = sample_catalog();
        for wanted in ["ChatHub", "HubDocs.Samples.Hubs.ChatHub", "Chat"] {
            let found = find_hub(catalog.discover(), wanted).unwrap();
            assert_eq!(found.route, "/hubs/chat", "lookup by {}", wanted);
        }
        assert_eq!(find_hub(catalog.discover(), "Admin").unwrap().route, "/hubs/admin");
        assert!(find_hub(catalog.discover(), "chat").is_none());
    }

    #[test]
    fn test_enum_as_string_honoured_for_display_name_lookup() {
        let catalog = sample_catalog();
        let info = describe(&args("Chat", true), &catalog).unwrap();

        let send = info.method("SendMessage").unwrap();
        assert!(send.parameters.iter().all(|p| p.send_enum_as_string));
        let history = info.method("GetHistory").unwrap();
        assert!(history.parameters[1].send_enum_as_string);
    }

    #[test]
    fn test_enum_as_string_off_by_default() {
        let info = describe(&args("AdminHub", false), &sample_catalog()).unwrap();
        let kick = info.method("Kick").unwrap();
        assert!(kick.parameters.iter().all(|p| !p.send_enum_as_string));
    }

    #[test]
    fn test_unknown_hub_is_an_error() {
        let err = describe(&args("MissingHub", false), &sample_catalog()).unwrap_err();
        assert_eq!(err.to_string(), "Hub 'MissingHub' not found");
    }

    #[test]
    fn test_text_summary() {
        let info = describe(&args("Admin", false), &sample_catalog()).unwrap();
        let text = render_text(&info).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Admin (/hubs/admin)");
        assert_eq!(lines[1], "  SignalR Hub: AdminHub");
        assert_eq!(lines[2], "  requires authentication");
        assert!(text.contains("  Kick(userId: Guid, reason?: String) -> void [auth]"));
        assert!(text.contains("      roles: Admin, Moderator"));
        assert!(text.contains("      policies: RequireOperator"));
    }
}
