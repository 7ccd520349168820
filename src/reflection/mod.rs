//! Language-neutral type-descriptor model and the hub reflection surface.
//!
//! Handlers and the types they exchange are described as plain data, either
//! built in code or loaded from a catalog file. Everything downstream
//! (schema inference, descriptor building) works on these values only.

pub mod describe;
pub mod error;
pub mod hub;
pub mod registry;
pub mod type_desc;

pub use describe::Describe;
pub use error::ReflectionError;
pub use hub::{Authorize, HubDocumentation, HubType, MethodDecl, MethodDocumentation, ParameterDecl};
pub use registry::{ObjectDef, PropertyDef, TypeRegistry};
pub use type_desc::{EnumDef, EnumMember, Scalar, TypeDesc, PLATFORM_NAMESPACE};
