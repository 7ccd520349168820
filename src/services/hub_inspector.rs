use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::config::DocsOptions;
use crate::models::{default_protocols, Documentation, HubInfo, HubMethodInfo, HubParameterInfo};
use crate::reflection::{Authorize, HubType, MethodDecl, ParameterDecl, TypeDesc, TypeRegistry};
use crate::schema::{friendly_name, unwrap_completion, SchemaGenerator};
use crate::services::discovery::HubDiscovery;

/// Connection lifecycle and disposal hooks every hub inherits.
pub const FRAMEWORK_METHODS: &[&str] = &[
    "OnConnectedAsync",
    "OnDisconnectedAsync",
    "Dispose",
    "DisposeAsync",
];

/// Builds hub descriptors and caches them for the life of the process.
pub struct HubInspector {
    types: Arc<TypeRegistry>,
    cache: RwLock<HashMap<String, Arc<HubInfo>>>,
}

impl HubInspector {
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        Self {
            types,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Descriptor for `hub`, built on first request.
    ///
    /// Concurrent first requests may each build a descriptor; the first one stored
    /// wins and every caller receives that shared instance.
    pub fn inspect_hub(&self, hub: &HubType, route: &str, enum_as_string: bool) -> Arc<HubInfo> {
        let key = hub.full_name();

        // Fast path: check the cache with a read lock
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(info) = cache.get(&key) {
                return Arc::clone(info);
            }
        }

        // Build outside the lock; the work is pure so a lost race only wastes time
        let built = Arc::new(self.build(hub, route, enum_as_string));

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let stored = cache.entry(key).or_insert_with(|| {
            info!(
                "Cached descriptor for hub '{}' at {} ({} methods)",
                built.name,
                built.route,
                built.methods.len()
            );
            Arc::clone(&built)
        });
        Arc::clone(stored)
    }

    pub fn cached_hub_count(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Assembles the top-level documentation object for every discovered hub.
    pub fn generate_documentation(&self, discovery: &dyn HubDiscovery, options: &DocsOptions) -> Documentation {
        let hubs = discovery
            .discover()
            .iter()
            .map(|found| {
                self.inspect_hub(&found.hub, &found.route, options.send_enum_by_string)
                    .as_ref()
                    .clone()
            })
            .collect();

        Documentation {
            title: options.title.clone(),
            version: options.version.clone(),
            description: Some(options.description.clone()),
            hubs,
            supported_protocols: default_protocols(),
            supported_auth_schemes: options.supported_auth_schemes.clone(),
        }
    }

    fn build(&self, hub: &HubType, route: &str, enum_as_string: bool) -> HubInfo {
        let documentation = hub.documentation.as_ref();

        let name = hub.display_name();
        let description = documentation
            .and_then(|doc| doc.description.clone())
            .unwrap_or_else(|| format!("SignalR Hub: {}", hub.name));

        let mut seen = HashSet::new();
        let mut methods = Vec::new();
        for method in hub.declared_methods() {
            if FRAMEWORK_METHODS.contains(&method.name.as_str()) {
                continue;
            }
            if !seen.insert(method.name.as_str()) {
                warn!(
                    "Hub '{}' declares '{}' more than once; documenting the first declaration",
                    hub.full_name(),
                    method.name
                );
                continue;
            }
            methods.push(self.inspect_method(method, enum_as_string));
        }

        HubInfo {
            name,
            description,
            route: route.to_string(),
            methods,
            requires_auth: hub.authorize.is_some(),
            supported_protocols: default_protocols(),
            supported_auth_schemes: Vec::new(),
        }
    }

    fn inspect_method(&self, method: &MethodDecl, enum_as_string: bool) -> HubMethodInfo {
        let documentation = method.documentation.as_ref();
        let returns = unwrap_completion(&method.returns);
        let generator = SchemaGenerator::new(&self.types);

        let parameters = method
            .parameters
            .iter()
            .filter(|param| !matches!(param.ty, TypeDesc::CancellationToken))
            .map(|param| self.inspect_parameter(param, enum_as_string))
            .collect();

        let (required_roles, required_policies) = match &method.authorize {
            Some(authorize) => auth_requirements(authorize),
            None => (None, None),
        };

        HubMethodInfo {
            name: method.name.clone(),
            summary: documentation
                .and_then(|doc| doc.summary.clone())
                .unwrap_or_else(|| method.name.clone()),
            description: documentation
                .and_then(|doc| doc.description.clone())
                .unwrap_or_else(|| format!("Hub method: {}", method.name)),
            tags: documentation.map(|doc| doc.tags.clone()).unwrap_or_default(),
            return_type: friendly_name(&returns),
            parameters,
            requires_auth: method.authorize.is_some(),
            required_roles,
            required_policies,
            return_schema: generator.generate(&returns, enum_as_string),
        }
    }

    fn inspect_parameter(&self, param: &ParameterDecl, enum_as_string: bool) -> HubParameterInfo {
        let friendly_type = friendly_name(&param.ty);

        HubParameterInfo {
            name: param.name.clone().unwrap_or_default(),
            description: format!("Parameter of type {}", friendly_type),
            friendly_type,
            is_optional: param.is_optional(),
            default_value: param.default_value.clone(),
            schema: SchemaGenerator::new(&self.types).generate(&param.ty, enum_as_string),
            send_enum_as_string: enum_as_string,
        }
    }
}

fn auth_requirements(authorize: &Authorize) -> (Option<Vec<String>>, Option<Vec<String>>) {
    (Some(authorize.role_list()), Some(authorize.policy_list()))
}
