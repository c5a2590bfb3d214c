use super::SessionCommand;
use super::handler::CommandHandler;
use jpia_chat::ChatError;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct CommandRegistry {
    handlers: BTreeMap<String, Arc<dyn CommandHandler + Send + Sync>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    pub fn register<C: CommandHandler + Send + Sync + 'static>(&mut self, name: &str, command: C) {
        self.handlers.insert(name.to_string(), Arc::new(command));
    }

    pub fn parse(&self, name: &str, args: &[&str]) -> Result<SessionCommand, ChatError> {
        self.handlers
            .get(name)
            .ok_or_else(|| ChatError::Input(format!("Unknown command: /{}", name)))
            .and_then(|handler| handler.parse(args))
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    pub fn help_lines(&self) -> Vec<&'static str> {
        self.handlers.values().map(|handler| handler.help()).collect()
    }
}
