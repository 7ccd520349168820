//! Built-in sample catalog served when no catalog file is configured.

use serde_json::json;

use crate::reflection::{
    Authorize, EnumDef, HubDocumentation, HubType, MethodDecl, MethodDocumentation, ObjectDef,
    ParameterDecl, TypeDesc, TypeRegistry,
};
use crate::services::HubCatalog;

const MODELS: &str = "HubDocs.Samples.Models";
const HUBS: &str = "HubDocs.Samples.Hubs";

fn message_priority() -> TypeDesc {
    TypeDesc::enumeration(
        EnumDef::new(MODELS, "MessagePriority")
            .member("Low", 0)
            .member("Normal", 1)
            .member("High", 2)
            .member("Urgent", 10),
    )
}

fn chat_message() -> TypeDesc {
    TypeDesc::object(MODELS, "ChatMessage")
}

fn chat_user() -> TypeDesc {
    TypeDesc::object(MODELS, "ChatUser")
}

fn sample_types() -> TypeRegistry {
    TypeRegistry::new()
        .with(
            ObjectDef::new(MODELS, "ChatUser")
                .property("Id", TypeDesc::of::<uuid::Uuid>())
                .property("DisplayName", TypeDesc::of::<String>())
                .property("LastSeen", TypeDesc::of::<Option<chrono::DateTime<chrono::Utc>>>())
                .property("RecentMessages", TypeDesc::list(chat_message())),
        )
        .with(
            ObjectDef::new(MODELS, "ChatMessage")
                .property("Id", TypeDesc::of::<uuid::Uuid>())
                .property("Author", chat_user())
                .property("Text", TypeDesc::of::<String>())
                .property("Priority", message_priority())
                .property("SentAt", TypeDesc::of::<chrono::DateTime<chrono::Utc>>())
                .property("ReplyTo", TypeDesc::nullable(chat_message())),
        )
        .with(
            ObjectDef::new(MODELS, "ServerStats")
                .property("ConnectedClients", TypeDesc::of::<i32>())
                .property("MessagesPerMinute", TypeDesc::of::<f64>())
                .property("Uptime", TypeDesc::of::<std::time::Duration>()),
        )
}

fn chat_hub() -> HubType {
    HubType::new(HUBS, "ChatHub")
        .documented(HubDocumentation::new(
            Some("Chat"),
            Some("Real-time chat between connected clients"),
        ))
        .method(
            MethodDecl::new("SendMessage")
                .param("user", TypeDesc::of::<String>())
                .param("message", TypeDesc::of::<String>())
                .returns(TypeDesc::task())
                .documented(
                    MethodDocumentation::new(Some("Send a message"), Some("Sends a message to all clients"))
                        .tags(["messaging", "broadcast"]),
                ),
        )
        .method(
            MethodDecl::new("PostMessage")
                .param("message", chat_message())
                .returns(TypeDesc::task_of(chat_message())),
        )
        .method(
            MethodDecl::new("GetHistory")
                .param("count", TypeDesc::of::<i32>())
                .with_parameter(
                    ParameterDecl::new("minimumPriority", TypeDesc::nullable(message_priority()))
                        .with_default(json!(null)),
                )
                .returns(TypeDesc::task_of(TypeDesc::list(chat_message()))),
        )
        .method(
            MethodDecl::new("StreamNumbers")
                .param("count", TypeDesc::of::<i32>())
                .param("cancellationToken", TypeDesc::cancellation_token())
                .returns(TypeDesc::async_stream(TypeDesc::of::<i32>())),
        )
        .method(
            MethodDecl::new("WatchMessages")
                .returns(TypeDesc::channel_reader(chat_message())),
        )
        .method(MethodDecl::new("OnConnectedAsync").returns(TypeDesc::task()))
}

fn admin_hub() -> HubType {
    HubType::new(HUBS, "AdminHub")
        .authorized(Authorize::new())
        .method(
            MethodDecl::new("GetStats")
                .returns(TypeDesc::task_of(TypeDesc::object(MODELS, "ServerStats"))),
        )
        .method(
            MethodDecl::new("Kick")
                .param("userId", TypeDesc::of::<uuid::Uuid>())
                .with_parameter(
                    ParameterDecl::new("reason", TypeDesc::of::<String>()).with_default(json!("No reason given")),
                )
                .returns(TypeDesc::task())
                .authorized(Authorize::new().roles("Admin, Moderator")),
        )
        .method(
            MethodDecl::new("Shutdown")
                .returns(TypeDesc::task())
                .authorized(Authorize::new().policy("RequireOperator")),
        )
}

/// Chat and admin hubs, including the chat hub's negotiation endpoint.
pub fn sample_catalog() -> HubCatalog {
    HubCatalog::new(sample_types())
        .map("/hubs/chat", chat_hub())
        .map_negotiate("/hubs/chat/negotiate", chat_hub())
        .map("/hubs/admin", admin_hub())
}
