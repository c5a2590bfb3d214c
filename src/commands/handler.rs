use super::SessionCommand;
use jpia_chat::ChatError;

pub trait CommandHandler {
    fn parse(&self, args: &[&str]) -> Result<SessionCommand, ChatError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct NewCommand;
pub struct CloseCommand;
pub struct LogoutCommand;
pub struct SpecialistCommand;
pub struct SpecialistsCommand;
pub struct HistoryCommand;
pub struct ConsentCommand;
pub struct ExportCommand;
pub struct DeleteCommand;

impl CommandHandler for QuitCommand {
    fn parse(&self, _args: &[&str]) -> Result<SessionCommand, ChatError> {
        Ok(SessionCommand::Quit)
    }

    fn help(&self) -> &'static str {
        "/quit - Exit the chat session"
    }
}

impl CommandHandler for HelpCommand {
    fn parse(&self, _args: &[&str]) -> Result<SessionCommand, ChatError> {
        Ok(SessionCommand::Help)
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

impl CommandHandler for NewCommand {
    fn parse(&self, _args: &[&str]) -> Result<SessionCommand, ChatError> {
        Ok(SessionCommand::NewChat)
    }

    fn help(&self) -> &'static str {
        "/new - Start a new conversation"
    }
}

impl CommandHandler for CloseCommand {
    fn parse(&self, _args: &[&str]) -> Result<SessionCommand, ChatError> {
        Ok(SessionCommand::CloseSession)
    }

    fn help(&self) -> &'static str {
        "/close - Close the conversation and start a fresh session"
    }
}

impl CommandHandler for LogoutCommand {
    fn parse(&self, _args: &[&str]) -> Result<SessionCommand, ChatError> {
        Ok(SessionCommand::Logout)
    }

    fn help(&self) -> &'static str {
        "/logout - End the session and leave"
    }
}

impl CommandHandler for SpecialistCommand {
    fn parse(&self, args: &[&str]) -> Result<SessionCommand, ChatError> {
        Ok(SessionCommand::Specialist(args.first().map(|id| id.to_string())))
    }

    fn help(&self) -> &'static str {
        "/specialist [id] - Show or switch the active specialist"
    }
}

impl CommandHandler for SpecialistsCommand {
    fn parse(&self, _args: &[&str]) -> Result<SessionCommand, ChatError> {
        Ok(SessionCommand::ListSpecialists)
    }

    fn help(&self) -> &'static str {
        "/specialists - List the available specialists"
    }
}

impl CommandHandler for HistoryCommand {
    fn parse(&self, _args: &[&str]) -> Result<SessionCommand, ChatError> {
        Ok(SessionCommand::History)
    }

    fn help(&self) -> &'static str {
        "/history - Show this conversation's messages"
    }
}

impl CommandHandler for ConsentCommand {
    fn parse(&self, args: &[&str]) -> Result<SessionCommand, ChatError> {
        let flag = match args.first().map(|arg| arg.to_lowercase()) {
            None => None,
            Some(arg) => match arg.as_str() {
                "on" | "yes" | "si" | "sí" | "true" => Some(true),
                "off" | "no" | "false" => Some(false),
                _ => {
                    return Err(ChatError::Input(format!(
                        "Expected on or off, got '{}'",
                        arg
                    )));
                }
            },
        };
        Ok(SessionCommand::Consent(flag))
    }

    fn help(&self) -> &'static str {
        "/consent [on|off] - Show or change whether conversations may be retained"
    }
}

impl CommandHandler for ExportCommand {
    fn parse(&self, _args: &[&str]) -> Result<SessionCommand, ChatError> {
        Ok(SessionCommand::Export)
    }

    fn help(&self) -> &'static str {
        "/export - Download your stored data as JSON"
    }
}

impl CommandHandler for DeleteCommand {
    fn parse(&self, _args: &[&str]) -> Result<SessionCommand, ChatError> {
        Ok(SessionCommand::Delete)
    }

    fn help(&self) -> &'static str {
        "/delete - Delete or anonymize your stored data"
    }
}
