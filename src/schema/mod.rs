//! Structural schema inference over the type-descriptor model.

pub mod generator;
pub mod naming;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

pub use generator::{SchemaGenerator, VisitGuard, VisitedTypes};
pub use naming::{friendly_name, json_type, to_camel_case, unwrap_completion};

/// JSON type tag used as the terminal fallback of inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
}

impl JsonType {
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Object => "object",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i32,
}

/// Structural description of a type. Absence of structure is `Option::None`
/// at the call sites, never a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    Primitive {
        json_type: JsonType,
    },
    Array {
        items: Box<SchemaNode>,
    },
    Object {
        /// Camel-cased property names in declaration order.
        properties: Vec<(String, SchemaNode)>,
        required: Vec<String>,
    },
    Enum {
        names: Vec<String>,
        values: Vec<EnumValue>,
    },
    Stream {
        item_schema: Box<SchemaNode>,
    },
}

impl SchemaNode {
    pub fn primitive(json_type: JsonType) -> Self {
        SchemaNode::Primitive { json_type }
    }

    /// The `type` tag this node serializes with.
    pub fn type_tag(&self) -> &'static str {
        match self {
            SchemaNode::Primitive { json_type } => json_type.as_str(),
            SchemaNode::Array { .. } => "array",
            SchemaNode::Object { .. } => "object",
            SchemaNode::Enum { .. } => "string",
            SchemaNode::Stream { .. } => "stream",
        }
    }

    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Object { properties, .. } => {
                properties.iter().find(|(n, _)| n == name).map(|(_, s)| s)
            }
            _ => None,
        }
    }

    pub fn is_required(&self, name: &str) -> bool {
        matches!(self, SchemaNode::Object { required, .. } if required.iter().any(|r| r == name))
    }

    fn enum_description(values: &[EnumValue]) -> String {
        let listed: Vec<String> = values
            .iter()
            .map(|v| format!("{}({})", v.name, v.value))
            .collect();
        format!("Enum values: {}", listed.join(", "))
    }
}

struct OrderedProperties<'a>(&'a [(String, SchemaNode)]);

impl Serialize for OrderedProperties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, schema)| (name, schema)))
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SchemaNode::Primitive { json_type } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", json_type)?;
                map.end()
            }
            SchemaNode::Array { items } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", items)?;
                map.end()
            }
            SchemaNode::Object {
                properties,
                required,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "object")?;
                map.serialize_entry("properties", &OrderedProperties(properties))?;
                if !required.is_empty() {
                    map.serialize_entry("required", required)?;
                }
                map.end()
            }
            SchemaNode::Enum { names, values } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("type", "string")?;
                map.serialize_entry("enum", names)?;
                map.serialize_entry("enumValues", values)?;
                map.serialize_entry("description", &Self::enum_description(values))?;
                map.end()
            }
            SchemaNode::Stream { item_schema } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "stream")?;
                map.serialize_entry("description", "Server-to-client streaming")?;
                map.serialize_entry("itemSchema", item_schema)?;
                map.end()
            }
        }
    }
}
