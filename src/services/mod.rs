pub mod discovery;
pub mod hub_inspector;
pub mod template_service;

pub use discovery::{CatalogError, DiscoveredHub, HubCatalog, HubDiscovery, HubEndpoint, UNKNOWN_ROUTE};
pub use hub_inspector::{HubInspector, FRAMEWORK_METHODS};
pub use template_service::{TemplateError, TemplateService};
