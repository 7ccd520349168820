use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::reflection::{EnumDef, ReflectionError, Scalar, TypeDesc, TypeRegistry, PLATFORM_NAMESPACE};

use super::naming::{friendly_name, json_type, to_camel_case};
use super::{EnumValue, SchemaNode};

/// Framework namespaces whose types are never documented.
const FRAMEWORK_NAMESPACES: &[&str] = &["Microsoft"];

/// Types currently being expanded on the inference stack.
#[derive(Debug, Default)]
pub struct VisitedTypes {
    active: HashSet<TypeDesc>,
}

impl VisitedTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, ty: &TypeDesc) -> bool {
        self.active.contains(ty)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Marks `ty` as active until the returned guard is dropped.
    pub fn enter(&mut self, ty: &TypeDesc) -> VisitGuard<'_> {
        self.active.insert(ty.clone());
        VisitGuard {
            visited: self,
            ty: ty.clone(),
        }
    }
}

/// Scoped visited marker. Removal happens on drop, including early `?` returns.
pub struct VisitGuard<'a> {
    visited: &'a mut VisitedTypes,
    ty: TypeDesc,
}

impl Deref for VisitGuard<'_> {
    type Target = VisitedTypes;

    fn deref(&self) -> &VisitedTypes {
        self.visited
    }
}

impl DerefMut for VisitGuard<'_> {
    fn deref_mut(&mut self) -> &mut VisitedTypes {
        self.visited
    }
}

impl Drop for VisitGuard<'_> {
    fn drop(&mut self) {
        self.visited.active.remove(&self.ty);
    }
}

/// Cycle-guarded schema inference over a [`TypeRegistry`].
///
/// Inference never fails: a subtree that cannot be reflected comes back as `None`.
pub struct SchemaGenerator<'a> {
    types: &'a TypeRegistry,
}

impl<'a> SchemaGenerator<'a> {
    pub fn new(types: &'a TypeRegistry) -> Self {
        Self { types }
    }

    /// Infers a schema with a fresh visited set.
    pub fn generate(&self, ty: &TypeDesc, enum_as_string: bool) -> Option<SchemaNode> {
        let mut visited = VisitedTypes::new();
        self.generate_with(ty, enum_as_string, &mut visited)
    }

    pub fn generate_with(
        &self,
        ty: &TypeDesc,
        enum_as_string: bool,
        visited: &mut VisitedTypes,
    ) -> Option<SchemaNode> {
        if should_skip(ty) {
            return None;
        }

        let underlying = ty.strip_nullable();
        if is_simple(ty) && !underlying.is_enum() {
            return None;
        }

        match self.try_generate(underlying, enum_as_string, visited) {
            Ok(schema) => schema,
            Err(err) => {
                debug!(type_name = %friendly_name(underlying), error = %err, "schema degraded to absent");
                None
            }
        }
    }

    /// Like `generate_with`, falling back to a bare type tag when there is no structure.
    fn generate_or_tag(
        &self,
        ty: &TypeDesc,
        enum_as_string: bool,
        visited: &mut VisitedTypes,
    ) -> SchemaNode {
        self.generate_with(ty, enum_as_string, visited)
            .unwrap_or_else(|| SchemaNode::primitive(json_type(ty)))
    }

    fn try_generate(
        &self,
        ty: &TypeDesc,
        enum_as_string: bool,
        visited: &mut VisitedTypes,
    ) -> Result<Option<SchemaNode>, ReflectionError> {
        match ty {
            TypeDesc::Void => return Ok(None),
            TypeDesc::AsyncStream { item } | TypeDesc::ChannelReader { item } => {
                let item_schema = self.generate_or_tag(item, enum_as_string, visited);
                return Ok(Some(SchemaNode::Stream {
                    item_schema: Box::new(item_schema),
                }));
            }
            TypeDesc::Enum(def) => return enum_schema(def).map(Some),
            _ => {}
        }

        // Back-edge: collapse to a bare tag instead of recursing.
        if visited.contains(ty) {
            return Ok(Some(SchemaNode::primitive(json_type(ty))));
        }

        let mut scope = visited.enter(ty);

        let schema = match ty {
            TypeDesc::List { item } | TypeDesc::Enumerable { item } => SchemaNode::Array {
                items: Box::new(self.generate_or_tag(item, enum_as_string, &mut scope)),
            },
            TypeDesc::Task { result: Some(inner) } | TypeDesc::ValueTask { result: Some(inner) } => {
                return Ok(self.generate_with(inner, enum_as_string, &mut scope));
            }
            TypeDesc::Object {
                value_type: false, ..
            } => self.object_schema(ty, enum_as_string, &mut scope)?,
            other => SchemaNode::primitive(json_type(other)),
        };

        Ok(Some(schema))
    }

    fn object_schema(
        &self,
        ty: &TypeDesc,
        enum_as_string: bool,
        visited: &mut VisitedTypes,
    ) -> Result<SchemaNode, ReflectionError> {
        let def = self.types.resolve(ty)?;

        let mut properties: Vec<(String, SchemaNode)> = Vec::new();
        let mut required: Vec<String> = Vec::new();

        for prop in def.public_instance_properties() {
            let name = to_camel_case(&prop.name);
            let schema = self.generate_or_tag(&prop.ty, enum_as_string, visited);

            if !prop.ty.is_nullable() && !required.contains(&name) {
                required.push(name.clone());
            }

            match properties.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = schema,
                None => properties.push((name, schema)),
            }
        }

        Ok(SchemaNode::Object {
            properties,
            required,
        })
    }
}

fn enum_schema(def: &EnumDef) -> Result<SchemaNode, ReflectionError> {
    let values = def
        .members
        .iter()
        .map(|member| {
            i32::try_from(member.value)
                .map(|value| EnumValue {
                    name: member.name.clone(),
                    value,
                })
                .map_err(|_| ReflectionError::EnumValueOutOfRange {
                    enum_name: def.name.clone(),
                    member: member.name.clone(),
                    value: member.value,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SchemaNode::Enum {
        names: values.iter().map(|v| v.name.clone()).collect(),
        values,
    })
}

/// Namespace match on segment boundaries: `System` matches `System.Text`, not `Systematic`.
fn in_namespace(namespace: Option<&str>, root: &str) -> bool {
    namespace.is_some_and(|ns| {
        ns == root || ns.strip_prefix(root).is_some_and(|rest| rest.starts_with('.'))
    })
}

/// Platform types allowed through the skip filter for further unwrapping.
fn is_allowed_platform_type(ty: &TypeDesc) -> bool {
    matches!(
        ty,
        TypeDesc::Scalar {
            scalar: Scalar::String
                | Scalar::DateTime
                | Scalar::DateTimeOffset
                | Scalar::Guid
                | Scalar::TimeSpan
        } | TypeDesc::List { .. }
            | TypeDesc::Enumerable { .. }
            | TypeDesc::Task { result: Some(_) }
            | TypeDesc::ValueTask { result: Some(_) }
            | TypeDesc::AsyncStream { .. }
            | TypeDesc::ChannelReader { .. }
    )
}

fn should_skip(ty: &TypeDesc) -> bool {
    let underlying = ty.strip_nullable();
    let namespace = underlying.namespace();

    if in_namespace(namespace, PLATFORM_NAMESPACE)
        && !is_allowed_platform_type(underlying)
        && !underlying.is_primitive()
        && !underlying.is_enum()
    {
        return true;
    }

    FRAMEWORK_NAMESPACES
        .iter()
        .any(|root| in_namespace(namespace, root))
}

fn is_simple(ty: &TypeDesc) -> bool {
    let underlying = ty.strip_nullable();
    matches!(underlying, TypeDesc::Scalar { .. })
        || (in_namespace(underlying.namespace(), PLATFORM_NAMESPACE) && underlying.is_value_type())
}
