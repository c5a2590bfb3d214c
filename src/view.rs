//! The seam between the widget and whatever displays it.
//!
//! Implementations bind their elements once; any element may be missing,
//! in which case the corresponding call does nothing.

use crate::render::Fragment;
use crate::specialist::SpecialistInfo;
use crate::toast::Toast;

pub const SEND_ICON: &str = "fas fa-paper-plane";
pub const BUSY_ICON: &str = "fas fa-spinner fa-spin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendButtonState {
    pub enabled: bool,
    pub busy: bool,
}

impl SendButtonState {
    pub fn icon(&self) -> &'static str {
        if self.busy { BUSY_ICON } else { SEND_ICON }
    }
}

pub trait ChatView {
    /// Current input text, or `None` when there is no input element.
    fn input_value(&self) -> Option<String>;
    fn set_input_value(&mut self, value: &str);
    /// Height the input's content needs, in pixels.
    fn input_content_height(&self) -> Option<u32>;
    fn set_input_height(&mut self, px: u32);
    fn focus_input(&mut self);

    fn set_send_button(&mut self, state: SendButtonState);

    fn append_fragment(&mut self, fragment: Fragment);
    fn remove_fragment(&mut self, id: &str);
    fn clear_conversation(&mut self);
    fn scroll_to_bottom(&mut self);

    fn set_welcome_visible(&mut self, visible: bool);
    fn set_inline_typing(&mut self, active: bool);

    fn set_header(&mut self, info: &SpecialistInfo);
    /// Highlights the selector link for `specialist` and clears every other one.
    fn set_active_specialist(&mut self, specialist: &str);

    fn insert_toast(&mut self, toast: &Toast);
    fn start_toast_exit(&mut self, id: &str);
    fn remove_toast(&mut self, id: &str);

    fn toggle_sidebar(&mut self);
    fn close_sidebar(&mut self);

    fn navigate(&mut self, path: &str);
}
