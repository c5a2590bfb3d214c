use crate::core::error::ChatError;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Shared HTTP plumbing for the chat and user-data endpoints.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(
        base_url: impl Into<String>,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Self, ChatError> {
        let mut headers = HeaderMap::new();
        for (key, value) in extra_headers.into_iter().flatten() {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ChatError::Config(format!("Invalid header name {}: {}", key, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ChatError::Config(format!("Invalid value for {}: {}", key, e)))?;
            headers.insert(name, value);
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str) -> Result<Response, ChatError> {
        let url = self.url(path);
        debug!(%url, "GET");
        Ok(self.client.get(&url).send().await?)
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, ChatError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn delete(&self, path: &str) -> Result<Response, ChatError> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        Ok(self.client.delete(&url).send().await?)
    }
}

/// Non-ok responses become `ChatError::Api` carrying the body text, or the status when it is empty.
pub async fn ensure_ok(response: Response) -> Result<Response, ChatError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    if text.trim().is_empty() {
        Err(ChatError::Api(format!("HTTP {}", status.as_u16())))
    } else {
        Err(ChatError::Api(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_doubled_slashes() {
        let client = HttpClient::new("http://127.0.0.1:5000/", None).unwrap();
        assert_eq!(client.url("/chat"), "http://127.0.0.1:5000/chat");
        assert_eq!(client.url("api/user/consent"), "http://127.0.0.1:5000/api/user/consent");
    }

    #[test]
    fn bad_header_names_are_config_errors() {
        let mut headers = HashMap::new();
        headers.insert("bad header".to_string(), "x".to_string());
        assert!(matches!(
            HttpClient::new("http://localhost", Some(&headers)),
            Err(ChatError::Config(_))
        ));
    }
}
