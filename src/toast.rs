use crate::render::escape_html;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Time between dismissing a toast and removing its node.
pub const TOAST_EXIT_ANIMATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Warning => "warning",
            ToastLevel::Error => "error",
        };
        f.write_str(class)
    }
}

/// A transient notification. Each toast carries its own timer; there is no shared queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn new(id: impl Into<String>, level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level,
            message: message.into(),
        }
    }

    pub fn markup(&self) -> String {
        format!(
            r#"<div class="toast {level}" id="{id}"><div class="toast-content"><span>{message}</span><button class="toast-close" data-toast="{id}"><i class="fas fa-times"></i></button></div></div>"#,
            level = self.level,
            id = self.id,
            message = escape_html(&self.message),
        )
    }
}
