//! JP_IA chat widget core.
//!
//! A [`widget::ChatWidget`] wires an input, a conversation, a specialist
//! selector and toasts (all behind [`view::ChatView`]) to the chat
//! endpoint (behind [`api::ChatBackend`]). [`consent::ConsentPanel`] is the
//! separate user-data panel. [`dom::VirtualDom`] is an in-memory page for
//! embedding and tests.

pub mod api;
pub mod config;
pub mod consent;
pub mod core;
pub mod dom;
pub mod render;
pub mod session;
pub mod specialist;
pub mod timers;
pub mod toast;
pub mod view;
pub mod widget;

pub use crate::core::error::ChatError;
pub use crate::widget::{ChatWidget, Key, WidgetSettings};
