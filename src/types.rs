/// Shared value types used across the codebase

use serde::{Deserialize, Serialize};

/// How a client presents credentials when connecting to a hub
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthType {
    #[default]
    Bearer,
    ApiKey,
    QueryParam,
    Cookie,
    CustomHeader,
}

/// Authentication scheme advertised to the test console. Pure configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthScheme {
    pub name: String,
    #[serde(rename = "type")]
    pub auth_type: AuthType,
    pub header_name: Option<String>,
    pub query_param_name: Option<String>,
    pub cookie_name: Option<String>,
    pub description: String,
    pub is_default: bool,
}

impl AuthScheme {
    pub fn bearer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auth_type: AuthType::Bearer,
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn api_key(name: impl Into<String>, header_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auth_type: AuthType::ApiKey,
            header_name: Some(header_name.into()),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn custom_header(name: impl Into<String>, header_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auth_type: AuthType::CustomHeader,
            header_name: Some(header_name.into()),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn query_param(name: impl Into<String>, param_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auth_type: AuthType::QueryParam,
            query_param_name: Some(param_name.into()),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn cookie(name: impl Into<String>, cookie_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auth_type: AuthType::Cookie,
            cookie_name: Some(cookie_name.into()),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_values() {
        let scheme = AuthScheme::default();
        assert_eq!(scheme.name, "");
        assert_eq!(scheme.auth_type, AuthType::Bearer);
        assert!(scheme.header_name.is_none());
        assert!(scheme.query_param_name.is_none());
        assert!(scheme.cookie_name.is_none());
        assert_eq!(scheme.description, "");
        assert!(!scheme.is_default);
    }

    #[test]
    fn test_custom_header_configuration() {
        let scheme = AuthScheme::custom_header("ApiKey", "X-API-Key", "API key authentication");
        assert_eq!(scheme.auth_type, AuthType::CustomHeader);
        assert_eq!(scheme.header_name.as_deref(), Some("X-API-Key"));
    }

    #[test]
    fn test_query_param_and_cookie_configuration() {
        let query = AuthScheme::query_param("AccessToken", "access_token", "Token via query parameter");
        assert_eq!(query.query_param_name.as_deref(), Some("access_token"));

        let cookie = AuthScheme::cookie("SessionCookie", "auth_session", "Session cookie authentication");
        assert_eq!(cookie.auth_type, AuthType::Cookie);
        assert_eq!(cookie.cookie_name.as_deref(), Some("auth_session"));
    }

    #[test]
    fn test_wire_format() {
        let scheme = AuthScheme::bearer("Bearer", "JWT Bearer token authentication").as_default();
        let value = serde_json::to_value(&scheme).unwrap();
        assert_eq!(value["type"], "Bearer");
        assert_eq!(value["isDefault"], true);

        let parsed: AuthScheme = serde_json::from_value(json!({ "name": "Key", "type": "ApiKey", "headerName": "X-Key" })).unwrap();
        assert_eq!(parsed.auth_type, AuthType::ApiKey);
        assert_eq!(parsed.description, "");
    }
}
