pub mod dispatcher;
pub mod handler;
pub mod registry;

pub use dispatcher::{CommandDispatcher, create_command_registry};

/// What a slash command asks the session loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Quit,
    Help,
    NewChat,
    CloseSession,
    Logout,
    /// `None` shows the active specialist.
    Specialist(Option<String>),
    ListSpecialists,
    History,
    /// `None` shows the current flag.
    Consent(Option<bool>),
    Export,
    Delete,
}
