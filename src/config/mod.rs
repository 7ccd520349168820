use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::types::AuthScheme;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub docs: DocsOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Catalog file describing mounted hubs; the built-in sample catalog when unset.
    pub catalog_path: Option<PathBuf>,
    pub enable_cors: bool,
}

/// Options controlling what the documentation endpoints emit and where they live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocsOptions {
    pub route_prefix: String,
    pub title: String,
    pub version: String,
    pub description: String,
    pub send_enum_by_string: bool,
    pub supported_auth_schemes: Vec<AuthScheme>,
    #[serde(rename = "signalRClientVersion")]
    pub signalr_client_version: String,
    pub message_pack_client_version: String,
    #[serde(rename = "signalRCdnUrl")]
    pub signalr_cdn_url: String,
    pub message_pack_cdn_url: String,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            route_prefix: "/signalr-docs".to_string(),
            title: "SignalR Hub Documentation".to_string(),
            version: "1.0.0".to_string(),
            description: "Auto-generated SignalR hub documentation".to_string(),
            send_enum_by_string: false,
            supported_auth_schemes: Vec::new(),
            signalr_client_version: "8.0.0".to_string(),
            message_pack_client_version: "8.0.0".to_string(),
            signalr_cdn_url: "https://cdnjs.cloudflare.com/ajax/libs/microsoft-signalr".to_string(),
            message_pack_cdn_url: "https://cdn.jsdelivr.net/npm/@microsoft/signalr-protocol-msgpack".to_string(),
        }
    }
}

impl DocsOptions {
    pub fn from_env() -> Self {
        Self::default().with_overrides_from(|key| env::var(key).ok())
    }

    pub fn signalr_client_url(&self) -> String {
        format!("{}/{}/signalr.min.js", self.signalr_cdn_url, self.signalr_client_version)
    }

    pub fn messagepack_client_url(&self) -> String {
        format!(
            "{}@{}/dist/browser/signalr-protocol-msgpack.min.js",
            self.message_pack_cdn_url, self.message_pack_client_version
        )
    }

    /// Route prefix without a trailing slash; empty when mounted at the root.
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.route_prefix.trim_end_matches('/');
        if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }

    pub fn api_json_url(&self) -> String {
        format!("{}/api.json", self.normalized_prefix())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("HUBDOCS_ROUTE_PREFIX") {
            self.route_prefix = v;
        }
        if let Some(v) = lookup("HUBDOCS_TITLE") {
            self.title = v;
        }
        if let Some(v) = lookup("HUBDOCS_VERSION") {
            self.version = v;
        }
        if let Some(v) = lookup("HUBDOCS_DESCRIPTION") {
            self.description = v;
        }
        if let Some(v) = lookup("HUBDOCS_SEND_ENUM_BY_STRING") {
            self.send_enum_by_string = v.parse().unwrap_or(self.send_enum_by_string);
        }
        if let Some(v) = lookup("HUBDOCS_SIGNALR_CLIENT_VERSION") {
            self.signalr_client_version = v;
        }
        if let Some(v) = lookup("HUBDOCS_MESSAGEPACK_CLIENT_VERSION") {
            self.message_pack_client_version = v;
        }
        if let Some(v) = lookup("HUBDOCS_SIGNALR_CDN_URL") {
            self.signalr_cdn_url = v;
        }
        if let Some(v) = lookup("HUBDOCS_MESSAGEPACK_CDN_URL") {
            self.message_pack_cdn_url = v;
        }
        self
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("HUBDOCS_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let server = ServerConfig {
            port,
            catalog_path: lookup("HUBDOCS_CATALOG").filter(|v| !v.is_empty()).map(PathBuf::from),
            enable_cors: lookup("HUBDOCS_ENABLE_CORS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        };

        Self {
            server,
            docs: DocsOptions::default().with_overrides_from(&lookup),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_docs_options() {
        let options = DocsOptions::default();
        assert_eq!(options.route_prefix, "/signalr-docs");
        assert_eq!(options.title, "SignalR Hub Documentation");
        assert!(!options.send_enum_by_string);
        assert!(options.supported_auth_schemes.is_empty());
    }

    #[test]
    fn test_client_urls() {
        let options = DocsOptions::default();
        assert_eq!(
            options.signalr_client_url(),
            "https://cdnjs.cloudflare.com/ajax/libs/microsoft-signalr/8.0.0/signalr.min.js"
        );
        assert_eq!(
            options.messagepack_client_url(),
            "https://cdn.jsdelivr.net/npm/@microsoft/signalr-protocol-msgpack@8.0.0/dist/browser/signalr-protocol-msgpack.min.js"
        );
    }

    #[test]
    fn test_prefix_normalization() {
        let mut options = DocsOptions::default();
        options.route_prefix = "docs/".to_string();
        assert_eq!(options.normalized_prefix(), "/docs");
        assert_eq!(options.api_json_url(), "/docs/api.json");

        options.route_prefix = "/".to_string();
        assert_eq!(options.normalized_prefix(), "");
        assert_eq!(options.api_json_url(), "/api.json");
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("HUBDOCS_TITLE", "Chat API"),
            ("HUBDOCS_SEND_ENUM_BY_STRING", "true"),
            ("HUBDOCS_SIGNALR_CLIENT_VERSION", "7.0.5"),
        ]));
        assert_eq!(config.server.port, 8080);
        assert!(config.server.catalog_path.is_none());
        assert_eq!(config.docs.title, "Chat API");
        assert!(config.docs.send_enum_by_string);
        assert!(config.docs.signalr_client_url().contains("/7.0.5/"));
    }

    #[test]
    fn test_hubdocs_port_wins_and_bad_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("HUBDOCS_PORT", "9000"),
            ("PORT", "8080"),
            ("HUBDOCS_SEND_ENUM_BY_STRING", "maybe"),
        ]));
        assert_eq!(config.server.port, 9000);
        assert!(!config.docs.send_enum_by_string);

        let config = AppConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert_eq!(config.server.port, DEFAULT_PORT);
    }
}
