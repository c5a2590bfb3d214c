//! Message and header markup.
//!
//! Everything that came from the user or the server goes through
//! [`escape_html`]; static specialist metadata and icons do not.

pub mod format;

pub use format::format_bot_response;

use crate::session::ChatMessage;
use crate::specialist::SpecialistInfo;
use chrono::Utc;

pub const TYPING_INDICATOR_ID: &str = "typing-indicator-chat";
pub const GOODBYE_ID: &str = "goodbyeMessage";
pub const SOURCES_HEADING: &str = "Fuentes consultadas";
pub const ERROR_HEADING: &str = "Ha ocurrido un error";
pub const TYPING_TEXT: &str = "JP_IA está escribiendo...";
pub const GOODBYE_TEXT: &str = "¡Gracias por usar JP_IA! Tu sesión ha sido cerrada exitosamente.";

const BOT_AVATAR: &str = r#"<div class="assistant-avatar-small"><svg viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="M12 2C13.1 2 14 2.9 14 4C14 5.1 13.1 6 12 6C10.9 6 10 5.1 10 4C10 2.9 10.9 2 12 2ZM21 9V7L15 1H5C3.89 1 3 1.89 3 3V19A2 2 0 0 0 5 21H19A2 2 0 0 0 21 19V9M19 9H14V4L19 9Z" fill="currentColor"/></svg></div>"#;

const ERROR_AVATAR: &str = r#"<div class="assistant-avatar-small avatar-error"><svg viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="M12 9V13M12 17H12.01M21 12C21 16.9706 16.9706 21 12 21C7.02944 21 3 16.9706 3 12C3 7.02944 7.02944 3 12 3C16.9706 3 21 7.02944 21 12Z" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg></div>"#;

const SOURCES_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="M19 3H5c-1.1 0-2 .9-2 2v14c0 1.1.9 2 2 2h14c1.1 0 2-.9 2-2V5c0-1.1-.9-2-2-2zm-5 14H7v-2h7v2zm3-4H7v-2h10v2zm0-4H7V7h10v2z" fill="currentColor"/></svg>"#;

/// Escape HTML special characters for safe embedding as element content.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    User,
    Bot,
    Error,
    Typing,
    Goodbye,
}

/// A rendered conversation node. `message` keeps the source data for views that do not speak HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: String,
    pub kind: FragmentKind,
    pub html: String,
    pub message: Option<ChatMessage>,
}

/// Builds conversation fragments with ids unique within the widget.
#[derive(Debug, Default)]
pub struct Renderer {
    sequence: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self, prefix: &str, suffix: &str) -> String {
        self.sequence += 1;
        format!(
            "{}-{}-{}{}",
            prefix,
            Utc::now().timestamp_millis(),
            self.sequence,
            suffix
        )
    }

    pub fn toast_id(&mut self) -> String {
        self.next_id("toast", "")
    }

    pub fn user_message(&mut self, message: &ChatMessage) -> Fragment {
        let id = self.next_id("msg", "-user");
        let html = format!(
            r#"<div class="message message-user" id="{id}"><div class="message-content"><div class="message-text">{text}</div></div></div>"#,
            id = id,
            text = escape_html(&message.text),
        );
        Fragment {
            id,
            kind: FragmentKind::User,
            html,
            message: Some(message.clone()),
        }
    }

    pub fn bot_message(&mut self, message: &ChatMessage) -> Fragment {
        let id = self.next_id("msg", "-bot");
        let html = format!(
            r#"<div class="message message-bot" id="{id}">{avatar}<div class="message-content"><div class="message-text">{text}</div>{sources}</div></div>"#,
            id = id,
            avatar = BOT_AVATAR,
            text = format_bot_response(&message.text),
            sources = sources_block(&message.sources),
        );
        Fragment {
            id,
            kind: FragmentKind::Bot,
            html,
            message: Some(message.clone()),
        }
    }

    pub fn error_message(&mut self, message: &ChatMessage) -> Fragment {
        let id = self.next_id("msg", "-error");
        let html = format!(
            r#"<div class="message message-bot" id="{id}">{avatar}<div class="message-content"><div class="message-text"><div class="error-message"><strong>{heading}</strong><p>{text}</p></div></div></div></div>"#,
            id = id,
            avatar = ERROR_AVATAR,
            heading = ERROR_HEADING,
            text = escape_html(&message.text),
        );
        Fragment {
            id,
            kind: FragmentKind::Error,
            html,
            message: Some(message.clone()),
        }
    }
}

/// The "Fuentes consultadas" block, or nothing when there are no sources.
pub fn sources_block(sources: &[String]) -> String {
    if sources.is_empty() {
        return String::new();
    }
    let items: String = sources
        .iter()
        .map(|source| format!(r#"<span class="source-item">{}</span>"#, escape_html(source)))
        .collect();
    format!(
        r#"<div class="message-sources"><div class="sources-header">{icon}{heading}</div><div class="sources-list">{items}</div></div>"#,
        icon = SOURCES_ICON,
        heading = SOURCES_HEADING,
        items = items,
    )
}

pub fn typing_indicator() -> Fragment {
    let html = format!(
        r#"<div class="message message-bot" id="{id}">{avatar}<div class="message-content"><div class="typing-animation"><div class="typing-dots"><div class="typing-dot"></div><div class="typing-dot"></div><div class="typing-dot"></div></div><span class="typing-text">{text}</span></div></div></div>"#,
        id = TYPING_INDICATOR_ID,
        avatar = BOT_AVATAR,
        text = TYPING_TEXT,
    );
    Fragment {
        id: TYPING_INDICATOR_ID.to_string(),
        kind: FragmentKind::Typing,
        html,
        message: None,
    }
}

pub fn goodbye() -> Fragment {
    let html = format!(
        r#"<div class="message message-bot" id="{id}"><div class="message-content"><div class="message-text"><p>{text}</p></div></div></div>"#,
        id = GOODBYE_ID,
        text = GOODBYE_TEXT,
    );
    Fragment {
        id: GOODBYE_ID.to_string(),
        kind: FragmentKind::Goodbye,
        html,
        message: None,
    }
}

/// Header title markup: icon then title, both static.
pub fn header_title(info: &SpecialistInfo) -> String {
    format!(r#"<i class="{}"></i> {}"#, info.icon, info.title)
}
