//! Fixture hubs and types shared by unit tests.

use crate::reflection::{
    Authorize, EnumDef, HubDocumentation, HubType, MethodDecl, MethodDocumentation, ObjectDef, TypeDesc,
    TypeRegistry,
};

pub const FIXTURE_NAMESPACE: &str = "HubDocs.Tests";

pub fn priority_enum() -> TypeDesc {
    TypeDesc::enumeration(
        EnumDef::new("App.Models", "Priority")
            .member("Low", 0)
            .member("Normal", 1)
            .member("High", 2),
    )
}

pub fn person() -> TypeDesc {
    TypeDesc::object("App.Models", "Person")
}

/// Object types the fixture hubs refer to.
pub fn fixture_types() -> TypeRegistry {
    TypeRegistry::new().with(
        ObjectDef::new("App.Models", "Person")
            .property("Name", TypeDesc::string())
            .property("Age", TypeDesc::int32())
            .property("Nickname", TypeDesc::nullable(TypeDesc::string())),
    )
}

pub fn test_hub() -> HubType {
    HubType::new(FIXTURE_NAMESPACE, "TestHub")
        .method(MethodDecl::new("TestMethod").returns(TypeDesc::task()))
        .method(
            MethodDecl::new("MethodWithParameters")
                .param("message", TypeDesc::string())
                .param("count", TypeDesc::int32())
                .returns(TypeDesc::task()),
        )
        .method(MethodDecl::new("StreamingMethod").returns(TypeDesc::async_stream(TypeDesc::string())))
}

pub fn documented_hub() -> HubType {
    HubType::new(FIXTURE_NAMESPACE, "DocumentedHub")
        .documented(HubDocumentation::new(Some("Custom Hub Name"), Some("Custom hub description")))
        .method(
            MethodDecl::new("DocumentedMethod")
                .returns(TypeDesc::task())
                .documented(
                    MethodDocumentation::new(Some("Method summary"), Some("Method description"))
                        .tags(["tag1", "tag2"]),
                ),
        )
}

pub fn authorized_hub() -> HubType {
    HubType::new(FIXTURE_NAMESPACE, "AuthorizedHub")
        .authorized(Authorize::new())
        .method(MethodDecl::new("SecureMethod").returns(TypeDesc::task()))
        .method(
            MethodDecl::new("AdminMethod")
                .returns(TypeDesc::task())
                .authorized(Authorize::new().roles("Admin")),
        )
}

pub fn hub_with_framework_methods() -> HubType {
    let full_name = format!("{}.HubWithFrameworkMethods", FIXTURE_NAMESPACE);

    HubType::new(FIXTURE_NAMESPACE, "HubWithFrameworkMethods")
        .method(MethodDecl::new("UserMethod").returns(TypeDesc::task()))
        .method(
            MethodDecl::new("OnConnectedAsync")
                .returns(TypeDesc::task())
                .declared_on(full_name.clone()),
        )
        .method(
            MethodDecl::new("OnDisconnectedAsync")
                .param("exception", TypeDesc::nullable(TypeDesc::object("System", "Exception")))
                .returns(TypeDesc::task())
                .declared_on(full_name),
        )
        .method(MethodDecl::new("Dispose"))
}
