use crate::reflection::{Scalar, TypeDesc};

use super::JsonType;

/// Short display name of a type, with completion, sequence and stream wrappers unwrapped.
pub fn friendly_name(ty: &TypeDesc) -> String {
    match ty {
        TypeDesc::Void
        | TypeDesc::Task { result: None }
        | TypeDesc::ValueTask { result: None } => "void".to_string(),
        TypeDesc::Task { result: Some(inner) } | TypeDesc::ValueTask { result: Some(inner) } => {
            friendly_name(inner)
        }
        TypeDesc::List { item } | TypeDesc::Enumerable { item } => {
            format!("{}[]", friendly_name(item))
        }
        TypeDesc::AsyncStream { item } | TypeDesc::ChannelReader { item } => friendly_name(item),
        TypeDesc::Nullable { inner } => format!("Nullable<{}>", friendly_name(inner)),
        TypeDesc::Generic { name, args, .. } if !args.is_empty() => {
            let args: Vec<String> = args.iter().map(friendly_name).collect();
            format!("{}<{}>", name, args.join(", "))
        }
        other => other.name().to_string(),
    }
}

/// Strips one completion wrapper; a bare wrapper becomes `Void`.
/// Streaming wrappers are left alone.
pub fn unwrap_completion(ty: &TypeDesc) -> TypeDesc {
    match ty {
        TypeDesc::Task { result } | TypeDesc::ValueTask { result } => match result {
            Some(inner) => (**inner).clone(),
            None => TypeDesc::Void,
        },
        other => other.clone(),
    }
}

pub fn json_type(ty: &TypeDesc) -> JsonType {
    match ty.strip_nullable() {
        TypeDesc::Scalar { scalar } => match scalar {
            Scalar::String
            | Scalar::DateTime
            | Scalar::DateTimeOffset
            | Scalar::Guid => JsonType::String,
            Scalar::SByte | Scalar::Int16 | Scalar::Int32 | Scalar::Int64 => JsonType::Integer,
            Scalar::Single | Scalar::Double | Scalar::Decimal => JsonType::Number,
            Scalar::Boolean => JsonType::Boolean,
            _ => JsonType::Object,
        },
        TypeDesc::Enum(_) => JsonType::String,
        _ => JsonType::Object,
    }
}

/// Lower-cases the first character when it is upper-case.
pub fn to_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
        _ => name.to_string(),
    }
}
