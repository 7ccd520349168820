use serde::Serialize;

use super::hub::{default_protocols, HubInfo};
use crate::types::AuthScheme;

/// Top-level documentation payload served as `api.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Documentation {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub hubs: Vec<HubInfo>,
    pub supported_protocols: Vec<String>,
    pub supported_auth_schemes: Vec<AuthScheme>,
}

impl Default for Documentation {
    fn default() -> Self {
        Self {
            title: "SignalR API Documentation".to_string(),
            version: "1.0.0".to_string(),
            description: None,
            hubs: Vec::new(),
            supported_protocols: default_protocols(),
            supported_auth_schemes: Vec::new(),
        }
    }
}

impl Documentation {
    /// Pretty-printed, camelCase JSON.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
