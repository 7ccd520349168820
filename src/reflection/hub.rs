use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::type_desc::{qualify, TypeDesc};

/// Type-level documentation annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubDocumentation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl HubDocumentation {
    pub fn new(name: Option<&str>, description: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
        }
    }
}

/// Method-level documentation annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDocumentation {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MethodDocumentation {
    pub fn new(summary: Option<&str>, description: Option<&str>) -> Self {
        Self {
            summary: summary.map(str::to_string),
            description: description.map(str::to_string),
            tags: Vec::new(),
        }
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Declared authorization requirement. Presence alone marks the target as protected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorize {
    /// Comma-separated role names, as declared.
    #[serde(default)]
    pub roles: Option<String>,
    #[serde(default)]
    pub policy: Option<String>,
}

impl Authorize {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roles(mut self, roles: impl Into<String>) -> Self {
        self.roles = Some(roles.into());
        self
    }

    pub fn policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    /// Trimmed role names; empty entries are dropped.
    pub fn role_list(&self) -> Vec<String> {
        self.roles
            .as_deref()
            .map(|roles| {
                roles
                    .split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn policy_list(&self) -> Vec<String> {
        match self.policy.as_deref() {
            Some(policy) if !policy.is_empty() => vec![policy.to_string()],
            _ => Vec::new(),
        }
    }
}

/// Parameter as declared on a hub method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDecl {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeDesc,
    /// Declared default; `Some(Value::Null)` is a null default, `None` means required.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn is_optional(&self) -> bool {
        self.default_value.is_some()
    }
}

/// Method as exposed by the hub's reflection surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    pub name: String,
    /// Full name of the declaring type; `None` means the hub itself.
    #[serde(default)]
    pub declaring_type: Option<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub is_static: bool,
    /// Compiler-generated members such as property accessors.
    #[serde(default)]
    pub is_special_name: bool,
    #[serde(default = "TypeDesc::void")]
    pub returns: TypeDesc,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(default)]
    pub documentation: Option<MethodDocumentation>,
    #[serde(default)]
    pub authorize: Option<Authorize>,
}

fn default_true() -> bool {
    true
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring_type: None,
            is_public: true,
            is_static: false,
            is_special_name: false,
            returns: TypeDesc::Void,
            parameters: Vec::new(),
            documentation: None,
            authorize: None,
        }
    }

    pub fn returns(mut self, ty: TypeDesc) -> Self {
        self.returns = ty;
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.parameters.push(ParameterDecl::new(name, ty));
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDecl) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn documented(mut self, documentation: MethodDocumentation) -> Self {
        self.documentation = Some(documentation);
        self
    }

    pub fn authorized(mut self, authorize: Authorize) -> Self {
        self.authorize = Some(authorize);
        self
    }

    pub fn declared_on(mut self, full_name: impl Into<String>) -> Self {
        self.declaring_type = Some(full_name.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn special_name(mut self) -> Self {
        self.is_special_name = true;
        self
    }
}

/// Reflection surface of a handler ("hub") type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubType {
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default)]
    pub documentation: Option<HubDocumentation>,
    #[serde(default)]
    pub authorize: Option<Authorize>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

const HUB_SUFFIX: &str = "Hub";

impl HubType {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
            documentation: None,
            authorize: None,
            methods: Vec::new(),
        }
    }

    pub fn documented(mut self, documentation: HubDocumentation) -> Self {
        self.documentation = Some(documentation);
        self
    }

    pub fn authorized(mut self, authorize: Authorize) -> Self {
        self.authorize = Some(authorize);
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn full_name(&self) -> String {
        qualify(self.namespace.as_deref(), &self.name)
    }

    /// Documented name, or the type name with a trailing `Hub` removed.
    pub fn display_name(&self) -> String {
        self.documentation
            .as_ref()
            .and_then(|doc| doc.name.clone())
            .unwrap_or_else(|| {
                self.name
                    .strip_suffix(HUB_SUFFIX)
                    .unwrap_or(&self.name)
                    .to_string()
            })
    }

    /// True when the method is declared by this hub rather than inherited.
    pub fn declares(&self, method: &MethodDecl) -> bool {
        match method.declaring_type.as_deref() {
            None => true,
            Some(declaring) => declaring == self.full_name(),
        }
    }

    /// Public, instance-level, non-special methods declared on this hub, in declaration order.
    pub fn declared_methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods
            .iter()
            .filter(move |m| m.is_public && !m.is_static && !m.is_special_name && self.declares(m))
    }
}
