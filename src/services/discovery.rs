use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::reflection::{HubType, ObjectDef, TypeRegistry};

/// Route reported for endpoints mounted without route metadata.
pub const UNKNOWN_ROUTE: &str = "Unknown";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Type defined more than once: {0}")]
    DuplicateType(String),
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

/// A hub type together with the route it is mounted on.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredHub {
    pub hub: HubType,
    pub route: String,
}

/// Yields every mounted hub endpoint, infrastructure endpoints excluded.
pub trait HubDiscovery: Send + Sync {
    fn discover(&self) -> Vec<DiscoveredHub>;
}

/// One mounted endpoint as registered with the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubEndpoint {
    #[serde(default)]
    pub route: Option<String>,
    pub hub: HubType,
    /// Connection negotiation endpoints share the hub type but are not documented.
    #[serde(default)]
    pub negotiate: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    types: Vec<ObjectDef>,
    hubs: Vec<HubEndpoint>,
}

/// In-memory endpoint table plus the object types hub methods refer to.
#[derive(Debug, Clone, Default)]
pub struct HubCatalog {
    types: Arc<TypeRegistry>,
    endpoints: Vec<HubEndpoint>,
}

impl HubCatalog {
    pub fn new(types: TypeRegistry) -> Self {
        Self {
            types: Arc::new(types),
            endpoints: Vec::new(),
        }
    }

    pub fn types(&self) -> Arc<TypeRegistry> {
        Arc::clone(&self.types)
    }

    pub fn endpoints(&self) -> &[HubEndpoint] {
        &self.endpoints
    }

    pub fn map(mut self, route: impl Into<String>, hub: HubType) -> Self {
        self.endpoints.push(HubEndpoint {
            route: Some(route.into()),
            hub,
            negotiate: false,
        });
        self
    }

    pub fn map_negotiate(mut self, route: impl Into<String>, hub: HubType) -> Self {
        self.endpoints.push(HubEndpoint {
            route: Some(route.into()),
            hub,
            negotiate: true,
        });
        self
    }

    /// Loads a catalog file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            other => Err(CatalogError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(contents)?;
        Self::from_file(file)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(contents)?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut types = TypeRegistry::new();
        for def in file.types {
            let full_name = def.full_name();
            if types.register(def).is_some() {
                return Err(CatalogError::DuplicateType(full_name));
            }
        }

        Ok(Self {
            types: Arc::new(types),
            endpoints: file.hubs,
        })
    }
}

impl HubDiscovery for HubCatalog {
    fn discover(&self) -> Vec<DiscoveredHub> {
        self.endpoints
            .iter()
            .filter(|endpoint| !endpoint.negotiate)
            .map(|endpoint| DiscoveredHub {
                hub: endpoint.hub.clone(),
                route: endpoint
                    .route
                    .clone()
                    .filter(|route| !route.is_empty())
                    .unwrap_or_else(|| UNKNOWN_ROUTE.to_string()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::{MethodDecl, TypeDesc};

    const CATALOG_YAML: &str = r#"
types:
  - namespace: Shop.Models
    name: Order
    properties:
      - name: Id
        type: { kind: scalar, scalar: Int32 }
hubs:
  - route: /hubs/orders
    hub:
      namespace: Shop.Hubs
      name: OrderHub
      methods:
        - name: GetOrder
          returns:
            kind: task
            result: { kind: object, namespace: Shop.Models, name: Order }
  - route: /hubs/orders/negotiate
    negotiate: true
    hub:
      namespace: Shop.Hubs
      name: OrderHub
  - hub:
      name: LegacyHub
"#;

    #[test]
    fn test_negotiate_endpoints_are_filtered() {
        let catalog = HubCatalog::new(TypeRegistry::new())
            .map("/hubs/chat", HubType::new("App", "ChatHub"))
            .map_negotiate("/hubs/chat/negotiate", HubType::new("App", "ChatHub"));

        let hubs = catalog.discover();
        assert_eq!(hubs.len(), 1);
        assert_eq!(hubs[0].route, "/hubs/chat");
    }

    #[test]
    fn test_yaml_catalog() {
        let catalog = HubCatalog::from_yaml_str(CATALOG_YAML).unwrap();
        assert!(catalog.types().contains("Shop.Models.Order"));
        assert_eq!(catalog.endpoints().len(), 3);

        let hubs = catalog.discover();
        assert_eq!(hubs.len(), 2);
        assert_eq!(hubs[0].hub.full_name(), "Shop.Hubs.OrderHub");
        assert_eq!(
            hubs[0].hub.methods[0].returns,
            TypeDesc::task_of(TypeDesc::object("Shop.Models", "Order"))
        );
        assert_eq!(hubs[1].route, UNKNOWN_ROUTE);
    }

    #[test]
    fn test_json_catalog() {
        let json = r#"{
            "hubs": [
                { "route": "/hubs/ping", "hub": { "name": "PingHub", "methods": [ { "name": "Ping" } ] } }
            ]
        }"#;
        let catalog = HubCatalog::from_json_str(json).unwrap();
        let hubs = catalog.discover();
        assert_eq!(hubs[0].hub.methods, vec![MethodDecl::new("Ping")]);
        assert!(catalog.types().is_empty());
    }

    #[test]
    fn test_duplicate_types_rejected() {
        let yaml = r#"
types:
  - { namespace: A, name: Dup }
  - { namespace: A, name: Dup }
"#;
        let err = HubCatalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateType(ref name) if name == "A.Dup"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "").unwrap();
        let err = HubCatalog::from_path(&path).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(ref ext) if ext == "toml"));
    }

    #[test]
    fn test_missing_file() {
        let err = HubCatalog::from_path("/nonexistent/catalog.yaml").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
