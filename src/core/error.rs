use std::io;
use thiserror::Error;

/// Unified error type for the chat widget and its terminal front-end
#[derive(Error, Debug)]
pub enum ChatError {
    /// HTTP 401 from the chat endpoint
    #[error("Session expired")]
    AuthExpired,

    /// HTTP 429 from the chat endpoint
    #[error("Rate limited")]
    RateLimited,

    /// HTTP 5xx from the chat endpoint
    #[error("Server fault: {0}")]
    ServerFault(u16),

    /// Any other non-ok status without a server-provided reason
    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    /// The server answered with an `error` field
    #[error("Server rejected the message: {0}")]
    Rejected(String),

    /// Response body missing, malformed, or carrying neither `response` nor `error`
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-ok answer from one of the user-data endpoints
    #[error("API error: {0}")]
    Api(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal input errors
    #[error("Input error: {0}")]
    Input(String),

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            ChatError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            ChatError::Protocol(format!("Undecodable body: {}", err))
        } else if err.is_builder() {
            ChatError::Config(format!("Invalid request: {}", err))
        } else {
            ChatError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for ChatError {
    fn from(err: serde_yml::Error) -> Self {
        ChatError::Serialization(format!("YAML error: {}", err))
    }
}

impl ChatError {
    /// True for the outcomes the chat endpoint itself produced, as opposed to local failures.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ChatError::AuthExpired
                | ChatError::RateLimited
                | ChatError::ServerFault(_)
                | ChatError::UnexpectedStatus(_)
                | ChatError::Rejected(_)
                | ChatError::Protocol(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_are_told_apart_from_local_ones() {
        assert!(ChatError::ServerFault(503).is_remote());
        assert!(ChatError::Rejected("Mensaje vacío".into()).is_remote());
        assert!(!ChatError::Network("dns".into()).is_remote());
        assert!(!ChatError::Input("eof".into()).is_remote());
    }

    #[test]
    fn io_errors_convert() {
        let err: ChatError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
