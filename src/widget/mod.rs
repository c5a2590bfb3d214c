//! The chat widget: one instance per page, owning its state, its renderer
//! and its pending timers, talking to a [`ChatBackend`] and a [`ChatView`].

pub mod dispatch;
pub mod input;
pub mod switcher;

use crate::api::{ChatBackend, ChatRequest};
use crate::render::{self, Renderer, TYPING_INDICATOR_ID};
use crate::session::{AppState, ChatMessage, SessionId};
use crate::specialist::Specialist;
use crate::timers::{DeferredAction, Timers};
use crate::toast::{TOAST_EXIT_ANIMATION, Toast, ToastLevel};
use crate::view::ChatView;
use dispatch::{Event, Inline, Phase, Rejection, Resolution, Step};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

pub const LOGOUT_PATH: &str = "/logout";
pub const RESPONSE_ERROR_TOAST: &str = "Error en la respuesta";
pub const UNEXPECTED_ERROR_TOAST: &str = "Error inesperado en la aplicación";
pub const LOGOUT_TOAST: &str = "Cerrando sesión...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSettings {
    pub max_message_length: usize,
    pub max_input_height: u32,
    pub toast_duration: Duration,
    pub auth_redirect_delay: Duration,
    pub logout_delay: Duration,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            max_message_length: 1000,
            max_input_height: 120,
            toast_duration: Duration::from_millis(3000),
            auth_redirect_delay: Duration::from_millis(2000),
            logout_delay: Duration::from_millis(1500),
        }
    }
}

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter { shift: bool },
    Escape,
    /// Ctrl+/
    FocusShortcut,
    Other,
}

pub struct ChatWidget<B, V> {
    backend: B,
    view: V,
    settings: WidgetSettings,
    state: AppState,
    renderer: Renderer,
    timers: Timers,
}

impl<B: ChatBackend, V: ChatView> ChatWidget<B, V> {
    /// Binds the widget to its view and runs page initialization.
    pub fn new(backend: B, view: V, settings: WidgetSettings) -> Self {
        Self::with_session(backend, view, settings, SessionId::generate())
    }

    /// Like [`ChatWidget::new`], but requests carry the given session id.
    pub fn with_session(
        backend: B,
        view: V,
        settings: WidgetSettings,
        session: SessionId,
    ) -> Self {
        let mut widget = Self {
            backend,
            view,
            settings,
            state: AppState::with_session(session),
            renderer: Renderer::new(),
            timers: Timers::new(),
        };
        widget.initialize();
        widget
    }

    fn initialize(&mut self) {
        self.resize_input();
        self.refresh_send_button();
        self.switch_specialist(Specialist::General.id());
        self.view.set_welcome_visible(true);
        info!(session = ?self.state.session_id, "Chat widget initialized");
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &WidgetSettings {
        &self.settings
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.state.history
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.state.session_id.as_ref()
    }

    pub fn specialist(&self) -> Specialist {
        self.state.specialist
    }

    pub fn is_typing(&self) -> bool {
        self.state.typing
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Sends the current input. Returns immediately when there is nothing sendable.
    pub async fn send(&mut self) {
        let Some(raw) = self.view.input_value() else {
            return;
        };

        let phase = Phase::from(self.state.typing);
        let message = match dispatch::transition(phase, Event::Submit(raw), &self.settings) {
            (_, Step::Dispatch(message)) => message,
            (_, Step::Reject(Rejection::TooLong)) => {
                self.show_toast(dispatch::TOO_LONG_TOAST, ToastLevel::Error);
                return;
            }
            _ => return,
        };

        self.clear_input();
        self.state.typing = true;
        self.refresh_send_button();

        let request = ChatRequest {
            message,
            specialist: self.state.specialist.id().to_string(),
            session_id: self.state.session_id.as_ref().map(|id| id.to_string()),
        };
        debug!(specialist = %request.specialist, "Sending chat message");

        self.add_user_message(&request.message);
        self.show_typing_indicator();
        let result = self.backend.send(&request).await;
        let failure = result
            .as_ref()
            .err()
            .map(|e| (e.is_remote(), e.to_string()));

        // Every branch below ends in the same cleanup; failures are values here, not early exits.
        let (phase, step) =
            dispatch::transition(Phase::Sending, Event::Settled(result), &self.settings);
        self.hide_typing_indicator();

        // Nothing is logged while the typing indicator is up.
        match failure {
            Some((true, e)) => warn!("Respuesta inválida del servidor: {}", e),
            Some((false, e)) => error!("Error enviando mensaje: {}", e),
            None => {}
        }
        if let Step::Render(resolution) = step {
            self.apply(resolution);
        }
        self.state.typing = phase == Phase::Sending;
        self.refresh_send_button();
    }

    fn apply(&mut self, resolution: Resolution) {
        if let Some((level, message)) = resolution.toast {
            self.show_toast(&message, level);
        }
        if let Some(redirect) = resolution.redirect {
            warn!(path = redirect.path, "Session expired, redirect scheduled");
            self.timers.schedule(
                Instant::now() + redirect.delay,
                DeferredAction::Navigate(redirect.path.to_string()),
            );
        }
        match resolution.inline {
            Inline::Bot(answer) => self.add_bot_message(answer.text, answer.sources),
            Inline::Error(text) => self.add_error_message(text),
        }
    }

    fn add_user_message(&mut self, text: &str) {
        let message = ChatMessage::user(text);
        let fragment = self.renderer.user_message(&message);
        self.append(fragment);
        self.state.record(message);
    }

    fn add_bot_message(&mut self, text: String, sources: Vec<String>) {
        let message = ChatMessage::bot(text, sources);
        let fragment = self.renderer.bot_message(&message);
        self.append(fragment);
        self.state.record(message);
    }

    fn add_error_message(&mut self, text: String) {
        let message = ChatMessage::error(text);
        let fragment = self.renderer.error_message(&message);
        self.append(fragment);
        self.state.record(message);
        self.show_toast(RESPONSE_ERROR_TOAST, ToastLevel::Error);
    }

    fn append(&mut self, fragment: render::Fragment) {
        self.view.set_welcome_visible(false);
        self.view.append_fragment(fragment);
        self.view.scroll_to_bottom();
    }

    fn show_typing_indicator(&mut self) {
        self.view.set_inline_typing(true);
        self.view.remove_fragment(TYPING_INDICATOR_ID);
        self.append(render::typing_indicator());
    }

    fn hide_typing_indicator(&mut self) {
        self.view.set_inline_typing(false);
        self.view.remove_fragment(TYPING_INDICATOR_ID);
    }

    /// Shows a toast that removes itself after the configured duration.
    pub fn show_toast(&mut self, message: &str, level: ToastLevel) -> String {
        let toast = Toast::new(self.renderer.toast_id(), level, message);
        self.view.insert_toast(&toast);
        self.timers.schedule(
            Instant::now() + self.settings.toast_duration,
            DeferredAction::ExpireToast(toast.id.clone()),
        );
        toast.id
    }

    /// Early dismissal from the close button.
    pub fn dismiss_toast(&mut self, id: &str) {
        self.dismiss_toast_at(id, Instant::now());
    }

    fn dismiss_toast_at(&mut self, id: &str, now: Instant) {
        self.view.start_toast_exit(id);
        self.timers
            .schedule(now + TOAST_EXIT_ANIMATION, DeferredAction::DropToast(id.to_string()));
    }

    /// Fires every deferred callback due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for action in self.timers.take_due(now) {
            match action {
                DeferredAction::ExpireToast(id) => self.dismiss_toast_at(&id, now),
                DeferredAction::DropToast(id) => self.view.remove_toast(&id),
                DeferredAction::Navigate(path) => {
                    info!(%path, "Navigating");
                    self.view.navigate(&path);
                }
            }
        }
    }

    /// When the next scheduled navigation fires, if one is pending.
    pub fn navigation_due(&self) -> Option<Instant> {
        self.timers.navigation_due()
    }

    fn clear_chat(&mut self) {
        self.view.clear_conversation();
        self.state.clear_history();
    }

    pub fn new_chat(&mut self) {
        self.view.clear_conversation();
        self.view.set_welcome_visible(true);
        self.clear_input();
        self.state.restart();
        info!(session = ?self.state.session_id, "New conversation");
    }

    pub fn close_session(&mut self) {
        self.view.clear_conversation();
        self.view.append_fragment(render::goodbye());
        self.clear_input();
        self.state.restart();
        info!(session = ?self.state.session_id, "Session closed");
    }

    pub fn logout(&mut self) {
        self.view.clear_conversation();
        self.view.append_fragment(render::goodbye());
        self.show_toast(LOGOUT_TOAST, ToastLevel::Info);
        self.state.end();
        self.timers.schedule(
            Instant::now() + self.settings.logout_delay,
            DeferredAction::Navigate(LOGOUT_PATH.to_string()),
        );
        info!("Logging out");
    }

    /// Places a canned query in the input and sends it.
    pub async fn quick_query(&mut self, query: &str) {
        if self.view.input_value().is_none() {
            return;
        }
        self.view.set_input_value(query);
        self.send().await;
    }

    pub async fn on_input_key(&mut self, key: Key) {
        match key {
            Key::Enter { shift: false } => self.send().await,
            Key::Escape => self.clear_input(),
            _ => {}
        }
    }

    pub fn on_document_key(&mut self, key: Key) {
        match key {
            Key::FocusShortcut => self.view.focus_input(),
            Key::Escape => self.view.close_sidebar(),
            _ => {}
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.view.toggle_sidebar();
    }

    /// Catch-all for failures nothing else handled.
    pub fn report_unexpected(&mut self, err: &dyn std::error::Error) {
        error!("Error global: {}", err);
        self.show_toast(UNEXPECTED_ERROR_TOAST, ToastLevel::Error);
    }
}
