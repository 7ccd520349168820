use serde::{Deserialize, Serialize};

/// Root namespace of the host platform's built-in types.
pub const PLATFORM_NAMESPACE: &str = "System";

const TASKS_NAMESPACE: &str = "System.Threading.Tasks";
const COLLECTIONS_NAMESPACE: &str = "System.Collections.Generic";
const CHANNELS_NAMESPACE: &str = "System.Threading.Channels";
const THREADING_NAMESPACE: &str = "System.Threading";

/// Built-in scalar types of the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scalar {
    Boolean,
    Byte,
    SByte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    Char,
    String,
    DateTime,
    DateTimeOffset,
    Guid,
    TimeSpan,
    Uri,
}

impl Scalar {
    /// Canonical display name, e.g. `Int32`
    pub fn name(self) -> &'static str {
        match self {
            Scalar::Boolean => "Boolean",
            Scalar::Byte => "Byte",
            Scalar::SByte => "SByte",
            Scalar::Int16 => "Int16",
            Scalar::UInt16 => "UInt16",
            Scalar::Int32 => "Int32",
            Scalar::UInt32 => "UInt32",
            Scalar::Int64 => "Int64",
            Scalar::UInt64 => "UInt64",
            Scalar::Single => "Single",
            Scalar::Double => "Double",
            Scalar::Decimal => "Decimal",
            Scalar::Char => "Char",
            Scalar::String => "String",
            Scalar::DateTime => "DateTime",
            Scalar::DateTimeOffset => "DateTimeOffset",
            Scalar::Guid => "Guid",
            Scalar::TimeSpan => "TimeSpan",
            Scalar::Uri => "Uri",
        }
    }

    /// Platform primitives: booleans, integers, chars and binary floating point.
    /// `Decimal`, `String` and the date/identifier types are not primitives.
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            Scalar::Boolean
                | Scalar::Byte
                | Scalar::SByte
                | Scalar::Int16
                | Scalar::UInt16
                | Scalar::Int32
                | Scalar::UInt32
                | Scalar::Int64
                | Scalar::UInt64
                | Scalar::Single
                | Scalar::Double
                | Scalar::Char
        )
    }

    pub fn is_value_type(self) -> bool {
        !matches!(self, Scalar::String | Scalar::Uri)
    }
}

/// A named enumeration with its members in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumDef {
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default)]
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

impl EnumDef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, name: impl Into<String>, value: i64) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value,
        });
        self
    }
}

/// Structural description of a type as seen by the documentation engine.
///
/// Object types are referenced by name only; their properties live in a
/// [`TypeRegistry`](super::TypeRegistry), which is what allows a descriptor
/// graph to contain cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeDesc {
    Void,
    Scalar {
        scalar: Scalar,
    },
    Nullable {
        inner: Box<TypeDesc>,
    },
    Enum(EnumDef),
    /// Completion wrapper, with or without a result value.
    Task {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<Box<TypeDesc>>,
    },
    ValueTask {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<Box<TypeDesc>>,
    },
    List {
        item: Box<TypeDesc>,
    },
    Enumerable {
        item: Box<TypeDesc>,
    },
    /// Unbounded server-produced sequence.
    AsyncStream {
        item: Box<TypeDesc>,
    },
    ChannelReader {
        item: Box<TypeDesc>,
    },
    Generic {
        #[serde(default)]
        namespace: Option<String>,
        name: String,
        #[serde(default)]
        args: Vec<TypeDesc>,
    },
    Object {
        #[serde(default)]
        namespace: Option<String>,
        name: String,
        #[serde(default, rename = "valueType")]
        value_type: bool,
    },
    CancellationToken,
}

impl TypeDesc {
    pub fn void() -> Self {
        TypeDesc::Void
    }

    pub fn scalar(scalar: Scalar) -> Self {
        TypeDesc::Scalar { scalar }
    }

    pub fn string() -> Self {
        Self::scalar(Scalar::String)
    }

    pub fn int32() -> Self {
        Self::scalar(Scalar::Int32)
    }

    pub fn boolean() -> Self {
        Self::scalar(Scalar::Boolean)
    }

    pub fn nullable(inner: TypeDesc) -> Self {
        TypeDesc::Nullable {
            inner: Box::new(inner),
        }
    }

    pub fn enumeration(def: EnumDef) -> Self {
        TypeDesc::Enum(def)
    }

    /// Bare completion wrapper (no result value).
    pub fn task() -> Self {
        TypeDesc::Task { result: None }
    }

    pub fn task_of(result: TypeDesc) -> Self {
        TypeDesc::Task {
            result: Some(Box::new(result)),
        }
    }

    pub fn value_task() -> Self {
        TypeDesc::ValueTask { result: None }
    }

    pub fn value_task_of(result: TypeDesc) -> Self {
        TypeDesc::ValueTask {
            result: Some(Box::new(result)),
        }
    }

    pub fn list(item: TypeDesc) -> Self {
        TypeDesc::List {
            item: Box::new(item),
        }
    }

    pub fn enumerable(item: TypeDesc) -> Self {
        TypeDesc::Enumerable {
            item: Box::new(item),
        }
    }

    pub fn async_stream(item: TypeDesc) -> Self {
        TypeDesc::AsyncStream {
            item: Box::new(item),
        }
    }

    pub fn channel_reader(item: TypeDesc) -> Self {
        TypeDesc::ChannelReader {
            item: Box::new(item),
        }
    }

    pub fn generic(namespace: impl Into<String>, name: impl Into<String>, args: Vec<TypeDesc>) -> Self {
        TypeDesc::Generic {
            namespace: Some(namespace.into()),
            name: name.into(),
            args,
        }
    }

    /// Reference (class) type resolved through the registry.
    pub fn object(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDesc::Object {
            namespace: Some(namespace.into()),
            name: name.into(),
            value_type: false,
        }
    }

    /// Value (struct) type. Structs are never expanded into object schemas.
    pub fn value_object(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDesc::Object {
            namespace: Some(namespace.into()),
            name: name.into(),
            value_type: true,
        }
    }

    pub fn cancellation_token() -> Self {
        TypeDesc::CancellationToken
    }

    /// Raw type name without namespace or type arguments.
    pub fn name(&self) -> &str {
        match self {
            TypeDesc::Void => "Void",
            TypeDesc::Scalar { scalar } => scalar.name(),
            TypeDesc::Nullable { .. } => "Nullable",
            TypeDesc::Enum(def) => &def.name,
            TypeDesc::Task { .. } => "Task",
            TypeDesc::ValueTask { .. } => "ValueTask",
            TypeDesc::List { .. } => "List",
            TypeDesc::Enumerable { .. } => "IEnumerable",
            TypeDesc::AsyncStream { .. } => "IAsyncEnumerable",
            TypeDesc::ChannelReader { .. } => "ChannelReader",
            TypeDesc::Generic { name, .. } | TypeDesc::Object { name, .. } => name,
            TypeDesc::CancellationToken => "CancellationToken",
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            TypeDesc::Void | TypeDesc::Scalar { .. } | TypeDesc::Nullable { .. } => {
                Some(PLATFORM_NAMESPACE)
            }
            TypeDesc::Task { .. } | TypeDesc::ValueTask { .. } => Some(TASKS_NAMESPACE),
            TypeDesc::List { .. } | TypeDesc::Enumerable { .. } | TypeDesc::AsyncStream { .. } => {
                Some(COLLECTIONS_NAMESPACE)
            }
            TypeDesc::ChannelReader { .. } => Some(CHANNELS_NAMESPACE),
            TypeDesc::CancellationToken => Some(THREADING_NAMESPACE),
            TypeDesc::Enum(def) => def.namespace.as_deref(),
            TypeDesc::Generic { namespace, .. } | TypeDesc::Object { namespace, .. } => {
                namespace.as_deref()
            }
        }
    }

    pub fn full_name(&self) -> String {
        qualify(self.namespace(), self.name())
    }

    /// Unwraps one level of `Nullable`.
    pub fn strip_nullable(&self) -> &TypeDesc {
        match self {
            TypeDesc::Nullable { inner } => inner,
            other => other,
        }
    }

    /// Only an explicit `Nullable` wrapper makes a type nullable.
    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeDesc::Nullable { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, TypeDesc::Enum(_))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeDesc::Scalar { scalar } if scalar.is_primitive())
    }

    pub fn is_value_type(&self) -> bool {
        match self {
            TypeDesc::Scalar { scalar } => scalar.is_value_type(),
            TypeDesc::Object { value_type, .. } => *value_type,
            TypeDesc::Void
            | TypeDesc::Nullable { .. }
            | TypeDesc::Enum(_)
            | TypeDesc::ValueTask { .. }
            | TypeDesc::CancellationToken => true,
            TypeDesc::Task { .. }
            | TypeDesc::List { .. }
            | TypeDesc::Enumerable { .. }
            | TypeDesc::AsyncStream { .. }
            | TypeDesc::ChannelReader { .. }
            | TypeDesc::Generic { .. } => false,
        }
    }
}

/// Joins a namespace and a type name into a full name.
pub fn qualify(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{}.{}", ns, name),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_names() {
        assert_eq!(TypeDesc::int32().full_name(), "System.Int32");
        assert_eq!(TypeDesc::object("App.Models", "Person").full_name(), "App.Models.Person");
        assert_eq!(
            TypeDesc::Object { namespace: None, name: "Loose".into(), value_type: false }.full_name(),
            "Loose"
        );
    }

    #[test]
    fn test_strip_nullable_is_single_level() {
        let ty = TypeDesc::nullable(TypeDesc::int32());
        assert_eq!(ty.strip_nullable(), &TypeDesc::int32());
        assert!(ty.is_nullable());
        assert!(!TypeDesc::string().is_nullable());
    }

    #[test]
    fn test_deserialize_tagged_descriptor() {
        let json = serde_json::json!({
            "kind": "task",
            "result": { "kind": "list", "item": { "kind": "object", "namespace": "App", "name": "Person" } }
        });
        let ty: TypeDesc = serde_json::from_value(json).unwrap();
        assert_eq!(ty, TypeDesc::task_of(TypeDesc::list(TypeDesc::object("App", "Person"))));
    }

    #[test]
    fn test_deserialize_enum_descriptor() {
        let json = serde_json::json!({
            "kind": "enum",
            "namespace": "App",
            "name": "Color",
            "members": [{ "name": "Red", "value": 1 }]
        });
        let ty: TypeDesc = serde_json::from_value(json).unwrap();
        assert_eq!(ty, TypeDesc::enumeration(EnumDef::new("App", "Color").member("Red", 1)));
    }
}
