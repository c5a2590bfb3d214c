//! In-memory page model implementing [`ChatView`] and [`ConsentView`].
//!
//! `VirtualDom::new()` binds the full chat page; `VirtualDom::default()`
//! binds nothing, which is how a template without the widget looks.

use crate::consent::ConsentView;
use crate::core::error::ChatError;
use crate::render::{Fragment, header_title};
use crate::specialist::{Specialist, SpecialistInfo};
use crate::toast::Toast;
use crate::view::{ChatView, SendButtonState};

const DEFAULT_LINE_HEIGHT: u32 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBox {
    pub value: String,
    pub height_px: u32,
    pub line_height_px: u32,
    pub focused: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self {
            value: String::new(),
            height_px: DEFAULT_LINE_HEIGHT,
            line_height_px: DEFAULT_LINE_HEIGHT,
            focused: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendButton {
    pub disabled: bool,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    pub nodes: Vec<Fragment>,
    pub scroll_requests: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title_html: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub specialist: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastNode {
    pub toast: Toast,
    pub html: String,
    pub leaving: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidebar {
    pub open: bool,
    pub overlay_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivacyPanel {
    pub consent_checked: bool,
    pub feedback: String,
    /// What the next confirmation dialog answers.
    pub confirm_answer: bool,
    pub prompts: Vec<String>,
    pub downloads: Vec<(String, Vec<u8>)>,
}

#[derive(Debug, Clone, Default)]
pub struct VirtualDom {
    pub input: Option<InputBox>,
    pub send_button: Option<SendButton>,
    pub conversation: Option<Conversation>,
    pub welcome_visible: Option<bool>,
    pub inline_typing: Option<bool>,
    pub header: Option<Header>,
    pub nav_links: Vec<NavLink>,
    pub toasts: Option<Vec<ToastNode>>,
    pub sidebar: Option<Sidebar>,
    pub privacy: Option<PrivacyPanel>,
    pub location: Option<String>,
}

impl VirtualDom {
    /// The chat page with every element present and the welcome placeholder showing.
    pub fn new() -> Self {
        Self {
            input: Some(InputBox::default()),
            send_button: Some(SendButton {
                disabled: true,
                icon: crate::view::SEND_ICON,
            }),
            conversation: Some(Conversation::default()),
            welcome_visible: Some(true),
            inline_typing: Some(false),
            header: Some(Header {
                title_html: String::new(),
                subtitle: String::new(),
            }),
            nav_links: Specialist::all()
                .map(|specialist| NavLink {
                    specialist: specialist.id().to_string(),
                    active: false,
                })
                .collect(),
            toasts: Some(Vec::new()),
            sidebar: Some(Sidebar::default()),
            privacy: Some(PrivacyPanel::default()),
            location: None,
        }
    }

    pub fn nodes(&self) -> &[Fragment] {
        self.conversation
            .as_ref()
            .map(|conversation| conversation.nodes.as_slice())
            .unwrap_or_default()
    }

    pub fn fragment(&self, id: &str) -> Option<&Fragment> {
        self.nodes().iter().find(|fragment| fragment.id == id)
    }

    pub fn welcome_is_visible(&self) -> bool {
        self.welcome_visible.unwrap_or(false)
    }

    pub fn send_disabled(&self) -> Option<bool> {
        self.send_button.as_ref().map(|button| button.disabled)
    }

    pub fn toast_messages(&self) -> Vec<&str> {
        self.toasts
            .iter()
            .flatten()
            .map(|node| node.toast.message.as_str())
            .collect()
    }

    pub fn active_links(&self) -> Vec<&str> {
        self.nav_links
            .iter()
            .filter(|link| link.active)
            .map(|link| link.specialist.as_str())
            .collect()
    }

    pub fn feedback(&self) -> Option<&str> {
        self.privacy.as_ref().map(|panel| panel.feedback.as_str())
    }
}

impl ChatView for VirtualDom {
    fn input_value(&self) -> Option<String> {
        self.input.as_ref().map(|input| input.value.clone())
    }

    fn set_input_value(&mut self, value: &str) {
        if let Some(input) = self.input.as_mut() {
            input.value = value.to_string();
        }
    }

    fn input_content_height(&self) -> Option<u32> {
        self.input.as_ref().map(|input| {
            let lines = input.value.split('\n').count().max(1) as u32;
            lines * input.line_height_px
        })
    }

    fn set_input_height(&mut self, px: u32) {
        if let Some(input) = self.input.as_mut() {
            input.height_px = px;
        }
    }

    fn focus_input(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.focused = true;
        }
    }

    fn set_send_button(&mut self, state: SendButtonState) {
        if let Some(button) = self.send_button.as_mut() {
            button.disabled = !state.enabled;
            button.icon = state.icon();
        }
    }

    fn append_fragment(&mut self, fragment: Fragment) {
        if let Some(conversation) = self.conversation.as_mut() {
            conversation.nodes.push(fragment);
        }
    }

    fn remove_fragment(&mut self, id: &str) {
        if let Some(conversation) = self.conversation.as_mut() {
            conversation.nodes.retain(|fragment| fragment.id != id);
        }
    }

    fn clear_conversation(&mut self) {
        if let Some(conversation) = self.conversation.as_mut() {
            conversation.nodes.clear();
        }
    }

    fn scroll_to_bottom(&mut self) {
        if let Some(conversation) = self.conversation.as_mut() {
            conversation.scroll_requests += 1;
        }
    }

    fn set_welcome_visible(&mut self, visible: bool) {
        if let Some(welcome) = self.welcome_visible.as_mut() {
            *welcome = visible;
        }
    }

    fn set_inline_typing(&mut self, active: bool) {
        if let Some(typing) = self.inline_typing.as_mut() {
            *typing = active;
        }
    }

    fn set_header(&mut self, info: &SpecialistInfo) {
        if let Some(header) = self.header.as_mut() {
            header.title_html = header_title(info);
            header.subtitle = info.subtitle.to_string();
        }
    }

    fn set_active_specialist(&mut self, specialist: &str) {
        for link in &mut self.nav_links {
            link.active = link.specialist == specialist;
        }
    }

    fn insert_toast(&mut self, toast: &Toast) {
        if let Some(toasts) = self.toasts.as_mut() {
            toasts.push(ToastNode {
                toast: toast.clone(),
                html: toast.markup(),
                leaving: false,
            });
        }
    }

    fn start_toast_exit(&mut self, id: &str) {
        if let Some(node) = self
            .toasts
            .iter_mut()
            .flatten()
            .find(|node| node.toast.id == id)
        {
            node.leaving = true;
        }
    }

    fn remove_toast(&mut self, id: &str) {
        if let Some(toasts) = self.toasts.as_mut() {
            toasts.retain(|node| node.toast.id != id);
        }
    }

    fn toggle_sidebar(&mut self) {
        if let Some(sidebar) = self.sidebar.as_mut() {
            sidebar.open = !sidebar.open;
            sidebar.overlay_active = !sidebar.overlay_active;
        }
    }

    fn close_sidebar(&mut self) {
        if let Some(sidebar) = self.sidebar.as_mut() {
            sidebar.open = false;
            sidebar.overlay_active = false;
        }
    }

    fn navigate(&mut self, path: &str) {
        self.location = Some(path.to_string());
    }
}

impl ConsentView for VirtualDom {
    fn set_feedback(&mut self, message: &str) {
        if let Some(panel) = self.privacy.as_mut() {
            panel.feedback = message.to_string();
        }
    }

    fn set_consent_checked(&mut self, checked: bool) {
        if let Some(panel) = self.privacy.as_mut() {
            panel.consent_checked = checked;
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        match self.privacy.as_mut() {
            Some(panel) => {
                panel.prompts.push(prompt.to_string());
                panel.confirm_answer
            }
            None => false,
        }
    }

    fn save_download(&mut self, filename: &str, bytes: &[u8]) -> Result<(), ChatError> {
        match self.privacy.as_mut() {
            Some(panel) => {
                panel.downloads.push((filename.to_string(), bytes.to_vec()));
                Ok(())
            }
            None => Err(ChatError::Io {
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no download target"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_page_ignores_every_call() {
        let mut dom = VirtualDom::default();
        dom.set_input_value("hola");
        dom.set_send_button(SendButtonState {
            enabled: true,
            busy: false,
        });
        dom.append_fragment(crate::render::goodbye());
        dom.insert_toast(&Toast::new("t", crate::toast::ToastLevel::Info, "x"));
        dom.toggle_sidebar();
        assert_eq!(dom.input_value(), None);
        assert!(dom.nodes().is_empty());
        assert!(dom.toast_messages().is_empty());
        assert!(dom.sidebar.is_none());
        assert!(!dom.confirm("¿Seguro?"));
    }

    #[test]
    fn content_height_grows_with_lines() {
        let mut dom = VirtualDom::new();
        assert_eq!(dom.input_content_height(), Some(24));
        dom.set_input_value("a\nb\nc");
        assert_eq!(dom.input_content_height(), Some(72));
    }

    #[test]
    fn only_the_matching_link_is_active() {
        let mut dom = VirtualDom::new();
        dom.set_active_specialist("permisos");
        assert_eq!(dom.active_links(), vec!["permisos"]);
        dom.set_active_specialist("general");
        assert_eq!(dom.active_links(), vec!["general"]);
    }
}
