use serde::Serialize;
use serde_json::Value;

use crate::schema::SchemaNode;

/// Protocols every hub is documented as speaking.
pub const DEFAULT_PROTOCOLS: &[&str] = &["json", "messagepack"];

pub fn default_protocols() -> Vec<String> {
    DEFAULT_PROTOCOLS.iter().map(|p| p.to_string()).collect()
}

/// Immutable description of one hub. Built once per hub type and cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubInfo {
    pub name: String,
    pub description: String,
    pub route: String,
    pub methods: Vec<HubMethodInfo>,
    pub requires_auth: bool,
    pub supported_protocols: Vec<String>,
    pub supported_auth_schemes: Vec<String>,
}

impl HubInfo {
    pub fn method(&self, name: &str) -> Option<&HubMethodInfo> {
        self.methods.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubMethodInfo {
    pub name: String,
    pub summary: String,
    pub description: String,
    pub tags: Vec<String>,
    pub return_type: String,
    pub parameters: Vec<HubParameterInfo>,
    pub requires_auth: bool,
    /// `None` when the method carries no authorization annotation.
    pub required_roles: Option<Vec<String>>,
    pub required_policies: Option<Vec<String>>,
    pub return_schema: Option<SchemaNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubParameterInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub friendly_type: String,
    pub is_optional: bool,
    pub default_value: Option<Value>,
    pub description: String,
    pub schema: Option<SchemaNode>,
    pub send_enum_as_string: bool,
}
