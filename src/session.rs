use crate::specialist::Specialist;
use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const SESSION_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Client-generated conversation token. Opaque to the backend, not a secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// `session-<unix-millis>-<9 base36 chars>`
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SESSION_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        SessionId(format!(
            "session-{}-{}",
            Utc::now().timestamp_millis(),
            suffix
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        SessionId(value.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// Only ever non-empty for bot messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    pub timestamp: String,
}

impl ChatMessage {
    fn new(role: Role, text: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            role,
            text: text.into(),
            sources,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text, Vec::new())
    }

    pub fn bot(text: impl Into<String>, sources: Vec<String>) -> Self {
        Self::new(Role::Bot, text, sources)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Role::Error, text, Vec::new())
    }
}

/// Mutable state of one widget instance. Owned by the widget and touched only through it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session_id: Option<SessionId>,
    pub typing: bool,
    pub specialist: Specialist,
    pub history: Vec<ChatMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_session(SessionId::generate())
    }

    /// Fresh state continuing a session the server already knows.
    pub fn with_session(session_id: SessionId) -> Self {
        Self {
            session_id: Some(session_id),
            ..Self::default()
        }
    }

    pub fn record(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// New chat and close-session: empty history under a fresh session id.
    pub fn restart(&mut self) {
        self.history.clear();
        self.session_id = Some(SessionId::generate());
    }

    /// Logout: empty history and no session id at all.
    pub fn end(&mut self) {
        self.history.clear();
        self.session_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_can_continue_a_known_session() {
        let state = AppState::with_session(SessionId::from("session-1"));
        assert_eq!(state.session_id.as_ref().map(SessionId::as_str), Some("session-1"));
        assert_eq!(state.specialist, Specialist::General);
        assert!(state.history.is_empty());
        assert!(!state.typing);
    }

    #[test]
    fn session_ids_follow_the_wire_shape() {
        let id = SessionId::generate();
        let parts: Vec<&str> = id.as_str().splitn(3, '-').collect();
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SESSION_SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn restart_clears_history_and_rotates_the_session() {
        let mut state = AppState::new();
        let before = state.session_id.clone();
        state.record(ChatMessage::user("Hola"));
        state.restart();
        assert!(state.history.is_empty());
        assert!(state.session_id.is_some());
        assert_ne!(state.session_id, before);
    }

    #[test]
    fn end_drops_the_session() {
        let mut state = AppState::new();
        state.record(ChatMessage::bot("Bienvenido", vec!["Art. 5".into()]));
        state.end();
        assert!(state.history.is_empty());
        assert_eq!(state.session_id, None);
    }

    #[test]
    fn user_messages_serialize_without_sources() {
        let json = serde_json::to_value(ChatMessage::user("Hola")).unwrap();
        assert_eq!(json["role"], "user");
        assert!(json.get("sources").is_none());
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
