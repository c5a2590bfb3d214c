use super::{
    SessionCommand,
    handler::{
        CloseCommand, ConsentCommand, DeleteCommand, ExportCommand, HelpCommand, HistoryCommand,
        LogoutCommand, NewCommand, QuitCommand, SpecialistCommand, SpecialistsCommand,
    },
    registry::CommandRegistry,
};
use console::style;
use jpia_chat::ChatError;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Parses a `/name arg...` line. Lines without the leading slash are not commands.
    pub fn parse_line(&self, line: &str) -> Option<Result<SessionCommand, ChatError>> {
        let rest = line.trim().strip_prefix('/')?;
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let (name, args) = parts.split_first()?;
        Some(self.registry.parse(name, args))
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.registry.get_command_names()
    }

    pub fn help_text(&self) -> String {
        let mut lines = vec![style("Available Commands").bold().underlined().to_string()];
        lines.extend(self.registry.help_lines().into_iter().map(String::from));
        lines.join("\n")
    }
}

pub fn create_command_registry() -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("quit", QuitCommand);
    registry.register("help", HelpCommand);
    registry.register("new", NewCommand);
    registry.register("close", CloseCommand);
    registry.register("logout", LogoutCommand);
    registry.register("specialist", SpecialistCommand);
    registry.register("specialists", SpecialistsCommand);
    registry.register("history", HistoryCommand);
    registry.register("consent", ConsentCommand);
    registry.register("export", ExportCommand);
    registry.register("delete", DeleteCommand);

    CommandDispatcher::new(Arc::new(registry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_parse_into_commands() {
        let dispatcher = create_command_registry();
        assert_eq!(dispatcher.parse_line("hola").map(|r| r.is_ok()), None);
        assert_eq!(
            dispatcher.parse_line("/specialist permisos").unwrap().unwrap(),
            SessionCommand::Specialist(Some("permisos".into()))
        );
        assert_eq!(
            dispatcher.parse_line("  /consent off ").unwrap().unwrap(),
            SessionCommand::Consent(Some(false))
        );
        assert_eq!(dispatcher.parse_line("/new").unwrap().unwrap(), SessionCommand::NewChat);
        assert!(matches!(
            dispatcher.parse_line("/nope").unwrap(),
            Err(ChatError::Input(_))
        ));
        assert_eq!(dispatcher.parse_line("/").map(|r| r.is_ok()), None);
    }

    #[test]
    fn help_lists_every_command() {
        let dispatcher = create_command_registry();
        let help = dispatcher.help_text();
        for name in dispatcher.get_command_names() {
            assert!(help.contains(&format!("/{}", name)), "missing /{}", name);
        }
    }
}
