use thiserror::Error;

/// Failures while reading shape information out of the descriptor model.
///
/// These never escape schema inference; they only degrade one subtree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReflectionError {
    #[error("Unresolved type: {0}")]
    UnresolvedType(String),

    #[error("Not an object type: {0}")]
    NotAnObject(String),

    #[error("Enum value out of range: {enum_name}.{member} = {value}")]
    EnumValueOutOfRange {
        enum_name: String,
        member: String,
        value: i64,
    },
}
