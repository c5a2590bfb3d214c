//! The send cycle as a pure transition function.
//!
//! `Idle --Submit--> Sending --Settled--> Idle`. A submit while sending is
//! rejected, never queued. Network I/O happens between the two events and
//! stays outside this module.

use super::WidgetSettings;
use crate::api::ChatReply;
use crate::core::error::ChatError;
use crate::toast::ToastLevel;
use std::time::Duration;

pub const LOGIN_PATH: &str = "/login";

pub const TOO_LONG_TOAST: &str = "Mensaje demasiado largo";
pub const SESSION_EXPIRED_TOAST: &str = "Tu sesión ha expirado. Redirigiendo al login...";
pub const SESSION_EXPIRED: &str = "⏰ Sesión expirada. Redirigiendo al login...";
pub const RATE_LIMITED: &str =
    "⚠️ Demasiadas consultas. Por favor, espera un momento antes de continuar.";
pub const UNKNOWN_ERROR: &str = "Error desconocido";
pub const CONNECTION_ERROR: &str = "Error de conexión. Verifique su internet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Sending,
}

impl From<bool> for Phase {
    fn from(typing: bool) -> Self {
        if typing { Phase::Sending } else { Phase::Idle }
    }
}

#[derive(Debug)]
pub enum Event {
    /// The user asked to send whatever is in the input.
    Submit(String),
    /// The network exchange finished, one way or another.
    Settled(Result<ChatReply, ChatError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    TooLong,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Bot(Answer),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: &'static str,
    pub delay: Duration,
}

/// What to show once a send has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub inline: Inline,
    pub toast: Option<(ToastLevel, String)>,
    pub redirect: Option<Redirect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Start the exchange with this trimmed message.
    Dispatch(String),
    Reject(Rejection),
    Render(Resolution),
    /// A settle event with nothing in flight.
    Ignore,
}

pub fn transition(phase: Phase, event: Event, settings: &WidgetSettings) -> (Phase, Step) {
    match (phase, event) {
        (_, Event::Submit(raw)) => match validate(&raw, settings.max_message_length, phase) {
            Ok(message) => (Phase::Sending, Step::Dispatch(message)),
            Err(rejection) => (phase, Step::Reject(rejection)),
        },
        (Phase::Sending, Event::Settled(result)) => {
            (Phase::Idle, Step::Render(resolve(classify(result), settings)))
        }
        (Phase::Idle, Event::Settled(_)) => (Phase::Idle, Step::Ignore),
    }
}

/// Trims the input and checks it can be sent right now.
pub fn validate(raw: &str, max_length: usize, phase: Phase) -> Result<String, Rejection> {
    let message = raw.trim();
    if message.is_empty() {
        return Err(Rejection::Empty);
    }
    if phase == Phase::Sending {
        return Err(Rejection::Busy);
    }
    if message.chars().count() > max_length {
        return Err(Rejection::TooLong);
    }
    Ok(message.to_string())
}

/// Sorts a finished exchange into an answer or one of the failure kinds.
pub fn classify(result: Result<ChatReply, ChatError>) -> Result<Answer, ChatError> {
    let reply = result?;

    if reply.is_success() {
        let body = reply
            .body
            .ok_or_else(|| ChatError::Protocol("reply body is not a JSON object".to_string()))?;
        if let Some(text) = body.response.filter(|text| !text.is_empty()) {
            return Ok(Answer {
                text,
                sources: body.sources.unwrap_or_default(),
            });
        }
        return match body.error.filter(|error| !error.is_empty()) {
            Some(error) => Err(ChatError::Rejected(error)),
            None => Err(ChatError::Protocol(
                "reply carries neither response nor error".to_string(),
            )),
        };
    }

    match reply.status {
        401 => Err(ChatError::AuthExpired),
        429 => Err(ChatError::RateLimited),
        status if status >= 500 => Err(ChatError::ServerFault(status)),
        status => match reply
            .body
            .and_then(|body| body.error)
            .filter(|error| !error.is_empty())
        {
            Some(error) => Err(ChatError::Rejected(error)),
            None => Err(ChatError::UnexpectedStatus(status)),
        },
    }
}

pub fn resolve(outcome: Result<Answer, ChatError>, settings: &WidgetSettings) -> Resolution {
    let error = match outcome {
        Ok(answer) => {
            return Resolution {
                inline: Inline::Bot(answer),
                toast: None,
                redirect: None,
            };
        }
        Err(error) => error,
    };

    let mut resolution = Resolution {
        inline: Inline::Error(error_text(&error)),
        toast: None,
        redirect: None,
    };
    if let ChatError::AuthExpired = error {
        resolution.toast = Some((ToastLevel::Warning, SESSION_EXPIRED_TOAST.to_string()));
        resolution.redirect = Some(Redirect {
            path: LOGIN_PATH,
            delay: settings.auth_redirect_delay,
        });
    }
    resolution
}

/// The inline message shown for a failed send.
pub fn error_text(error: &ChatError) -> String {
    match error {
        ChatError::AuthExpired => SESSION_EXPIRED.to_string(),
        ChatError::RateLimited => RATE_LIMITED.to_string(),
        ChatError::ServerFault(status) => format!(
            "🔧 Error interno del servidor ({}). Intenta de nuevo en unos momentos.",
            status
        ),
        ChatError::UnexpectedStatus(status) => format!("Error del servidor: {}", status),
        ChatError::Rejected(reason) => reason.clone(),
        ChatError::Protocol(_) => UNKNOWN_ERROR.to_string(),
        _ => CONNECTION_ERROR.to_string(),
    }
}
