use super::ChatWidget;
use crate::api::ChatBackend;
use crate::toast::ToastLevel;
use crate::view::{ChatView, SendButtonState};
use tracing::debug;

pub const TRUNCATED_TOAST: &str = "Mensaje truncado al límite máximo";

/// The send action is available for non-blank text within the limit while nothing is in flight.
pub fn send_enabled(text: &str, max_length: usize, typing: bool) -> bool {
    !text.trim().is_empty() && text.chars().count() <= max_length && !typing
}

/// The first `max_length` characters of `text`, or `None` when it already fits.
pub fn truncate_chars(text: &str, max_length: usize) -> Option<String> {
    text.char_indices()
        .nth(max_length)
        .map(|(cut, _)| text[..cut].to_string())
}

impl<B: ChatBackend, V: ChatView> ChatWidget<B, V> {
    /// Keystroke handler: resize, recompute the send button, hide the welcome once there is text.
    pub fn on_input(&mut self) {
        self.resize_input();
        self.refresh_send_button();

        if let Some(text) = self.view.input_value() {
            if !text.trim().is_empty() {
                self.view.set_welcome_visible(false);
            }
        }
    }

    /// Runs after pasted content has landed in the input.
    pub fn on_paste(&mut self) {
        if let Some(text) = self.view.input_value() {
            if let Some(truncated) = truncate_chars(&text, self.settings.max_message_length) {
                debug!(
                    from = text.chars().count(),
                    to = self.settings.max_message_length,
                    "Truncating pasted input"
                );
                self.view.set_input_value(&truncated);
                self.show_toast(TRUNCATED_TOAST, ToastLevel::Warning);
            }
        }
        self.resize_input();
        self.refresh_send_button();
    }

    /// Replaces the input with typed text.
    pub fn type_text(&mut self, text: &str) {
        if self.view.input_value().is_none() {
            return;
        }
        self.view.set_input_value(text);
        self.on_input();
    }

    /// Appends pasted text to the input.
    pub fn paste_text(&mut self, text: &str) {
        let Some(mut current) = self.view.input_value() else {
            return;
        };
        current.push_str(text);
        self.view.set_input_value(&current);
        self.on_paste();
    }

    pub fn clear_input(&mut self) {
        if self.view.input_value().is_none() {
            return;
        }
        self.view.set_input_value("");
        self.resize_input();
        self.refresh_send_button();
    }

    pub fn resize_input(&mut self) {
        if let Some(height) = self.view.input_content_height() {
            self.view
                .set_input_height(height.min(self.settings.max_input_height));
        }
    }

    pub fn refresh_send_button(&mut self) {
        let Some(text) = self.view.input_value() else {
            return;
        };
        let state = SendButtonState {
            enabled: send_enabled(&text, self.settings.max_message_length, self.state.typing),
            busy: self.state.typing,
        };
        self.view.set_send_button(state);
    }
}
