use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::ReflectionError;
use super::type_desc::{qualify, TypeDesc};

/// Property declared on an object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDesc,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub is_static: bool,
}

/// Shape of an object type: its properties in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDef {
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default)]
    pub value_type: bool,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

fn default_true() -> bool {
    true
}

impl PropertyDef {
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
            is_public: true,
            is_static: false,
        }
    }
}

impl ObjectDef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
            value_type: false,
            properties: Vec::new(),
        }
    }

    pub fn property(mut self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.properties.push(PropertyDef::new(name, ty));
        self
    }

    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    pub fn full_name(&self) -> String {
        qualify(self.namespace.as_deref(), &self.name)
    }

    /// Descriptor that references this definition.
    pub fn type_desc(&self) -> TypeDesc {
        TypeDesc::Object {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            value_type: self.value_type,
        }
    }

    pub fn public_instance_properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties.iter().filter(|p| p.is_public && !p.is_static)
    }
}

/// Object definitions keyed by full type name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    objects: HashMap<String, ObjectDef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition, returning the one it replaced.
    pub fn register(&mut self, def: ObjectDef) -> Option<ObjectDef> {
        self.objects.insert(def.full_name(), def)
    }

    pub fn with(mut self, def: ObjectDef) -> Self {
        self.register(def);
        self
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.objects.contains_key(full_name)
    }

    /// Looks up the definition behind an `Object` descriptor.
    pub fn resolve(&self, ty: &TypeDesc) -> Result<&ObjectDef, ReflectionError> {
        match ty {
            TypeDesc::Object { .. } => {
                let full_name = ty.full_name();
                self.objects
                    .get(&full_name)
                    .ok_or(ReflectionError::UnresolvedType(full_name))
            }
            other => Err(ReflectionError::NotAnObject(other.full_name())),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
