use super::{ChatBackend, ChatReply, ChatRequest, ChatResponseBody, HttpClient};
use crate::core::error::ChatError;
use async_trait::async_trait;
use tracing::debug;

pub const DEFAULT_CHAT_PATH: &str = "/chat";

/// Chat endpoint over HTTP. No timeout and no retry: one request, one reply.
#[derive(Clone)]
pub struct HttpChatBackend {
    client: HttpClient,
    path: String,
}

impl HttpChatBackend {
    pub fn new(client: HttpClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        self.client.url(&self.path)
    }
}

/// Parses a reply body leniently: anything that is not a JSON object yields `None`.
pub fn parse_reply_body(text: &str) -> Option<ChatResponseBody> {
    match serde_json::from_str::<ChatResponseBody>(text) {
        Ok(body) => Some(body),
        Err(e) => {
            if !text.trim().is_empty() {
                debug!("Unparseable chat reply body: {}", e);
            }
            None
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let response = self.client.post(&self.path, request).await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!(status, bytes = text.len(), "chat reply");
        Ok(ChatReply::new(status, parse_reply_body(&text)))
    }
}
