use super::ChatWidget;
use crate::api::ChatBackend;
use crate::specialist::Specialist;
use crate::view::ChatView;
use tracing::info;

impl<B: ChatBackend, V: ChatView> ChatWidget<B, V> {
    /// Activates a specialist by id; unknown ids act as `general`.
    ///
    /// The conversation is only cleared when it has history, so the
    /// welcome placeholder a fresh page ships with stays in place.
    pub fn switch_specialist(&mut self, id: &str) -> Specialist {
        let specialist = Specialist::resolve(id);
        self.state.specialist = specialist;

        self.view.set_active_specialist(specialist.id());
        self.view.set_header(&specialist.info());

        if !self.state.history.is_empty() {
            self.clear_chat();
        }
        self.view.set_welcome_visible(true);

        info!(requested = id, %specialist, "Specialist switched");
        specialist
    }
}
