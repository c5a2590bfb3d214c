use crate::core::error::ChatError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod chat;
pub mod client;
pub mod consent;

pub use chat::HttpChatBackend;
pub use client::HttpClient;
pub use consent::HttpConsentBackend;

pub const CONSENT_PATH: &str = "/api/user/consent";
pub const EXPORT_PATH: &str = "/api/user/data-export";
pub const DELETE_PATH: &str = "/api/user/data-delete";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub specialist: String,
    pub session_id: Option<String>,
}

/// Body of a chat endpoint answer. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponseBody {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A completed HTTP exchange: the status and, when it parsed, the JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub status: u16,
    pub body: Option<ChatResponseBody>,
}

impl ChatReply {
    pub fn new(status: u16, body: Option<ChatResponseBody>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport for the chat endpoint. `Err` means the exchange itself failed;
/// any HTTP status, good or bad, comes back as `Ok`.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError>;
}

#[async_trait]
impl<T: ChatBackend + ?Sized> ChatBackend for Arc<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        (**self).send(request).await
    }
}

/// The three user-data endpoints.
#[async_trait]
pub trait ConsentBackend: Send + Sync {
    /// Stored consent flag, `None` when the server does not report one.
    async fn consent(&self) -> Result<Option<bool>, ChatError>;
    async fn set_consent(&self, consent: bool) -> Result<serde_json::Value, ChatError>;
    async fn export_data(&self) -> Result<Vec<u8>, ChatError>;
    async fn delete_data(&self) -> Result<(), ChatError>;
}

#[async_trait]
impl<T: ConsentBackend + ?Sized> ConsentBackend for Arc<T> {
    async fn consent(&self) -> Result<Option<bool>, ChatError> {
        (**self).consent().await
    }

    async fn set_consent(&self, consent: bool) -> Result<serde_json::Value, ChatError> {
        (**self).set_consent(consent).await
    }

    async fn export_data(&self) -> Result<Vec<u8>, ChatError> {
        (**self).export_data().await
    }

    async fn delete_data(&self) -> Result<(), ChatError> {
        (**self).delete_data().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_missing_session_as_null() {
        let request = ChatRequest {
            message: "Hola".into(),
            specialist: "general".into(),
            session_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "Hola", "specialist": "general", "session_id": null})
        );
    }

    #[test]
    fn response_body_tolerates_partial_and_null_fields() {
        let body: ChatResponseBody =
            serde_json::from_str(r#"{"response": "Hola", "sources": null, "extra": 1}"#).unwrap();
        assert_eq!(body.response.as_deref(), Some("Hola"));
        assert_eq!(body.sources, None);
        assert_eq!(body.error, None);
    }

    #[test]
    fn success_means_2xx() {
        assert!(ChatReply::new(200, None).is_success());
        assert!(ChatReply::new(204, None).is_success());
        assert!(!ChatReply::new(302, None).is_success());
        assert!(!ChatReply::new(401, None).is_success());
    }
}
