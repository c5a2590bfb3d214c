use crate::cli::Args;
use crate::commands::{CommandDispatcher, SessionCommand};
use crate::display::{self, TerminalView};
use crate::input;
use console::style;
use is_terminal::IsTerminal;
use jpia_chat::ChatError;
use jpia_chat::api::{HttpChatBackend, HttpConsentBackend};
use jpia_chat::consent::{ConsentPanel, ConsentView};
use jpia_chat::widget::ChatWidget;
use std::io::{self, Read};
use std::time::Instant;
use tracing::debug;

pub struct Application {
    pub args: Args,
    pub widget: ChatWidget<HttpChatBackend, TerminalView>,
    pub consent: ConsentPanel<HttpConsentBackend>,
    pub command_dispatcher: CommandDispatcher,
}

/// Whether the loop keeps reading after a command.
enum Flow {
    Continue,
    Stop,
}

impl Application {
    pub fn new(
        args: Args,
        widget: ChatWidget<HttpChatBackend, TerminalView>,
        consent: ConsentPanel<HttpConsentBackend>,
        command_dispatcher: CommandDispatcher,
    ) -> Self {
        Self {
            args,
            widget,
            consent,
            command_dispatcher,
        }
    }

    pub async fn run(&mut self) -> Result<(), ChatError> {
        let context = if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| ChatError::Input(format!("Failed to read from stdin: {}", e)))?;
            Some(buffer)
        } else {
            None
        };

        if self.args.chat || (self.args.query.is_none() && context.is_none()) {
            self.handle_chat_mode().await
        } else {
            self.handle_single_query(context).await
        }
    }

    async fn handle_single_query(&mut self, context: Option<String>) -> Result<(), ChatError> {
        self.widget.view_mut().set_echo_user(true);
        if let Some(query) = self.args.query.clone() {
            self.widget.type_text(&query);
        }
        if let Some(piped) = context {
            if self.args.query.is_some() {
                self.widget.paste_text("\n\n");
            }
            self.widget.paste_text(&piped);
        }

        self.widget.send().await;
        self.settle().await;
        Ok(())
    }

    async fn handle_chat_mode(&mut self) -> Result<(), ChatError> {
        self.consent.initialize(self.widget.view_mut()).await;

        println!(
            "Entering chat mode. Type '/help' for available commands. Press Ctrl+D or type /quit to exit."
        );

        let mut editor = input::create_editor(self.command_dispatcher.clone())?;

        loop {
            let line = match input::read_input(&mut editor, self.widget.specialist())? {
                Some(line) => line,
                None => break,
            };
            self.widget.tick(Instant::now());

            let flow = match self.command_dispatcher.parse_line(&line) {
                Some(Ok(command)) => self.handle_command(command).await,
                Some(Err(e)) => {
                    display::display_failure(&e);
                    Flow::Continue
                }
                None => {
                    if !line.trim().is_empty() {
                        self.widget.type_text(&line);
                        self.widget.send().await;
                    }
                    Flow::Continue
                }
            };

            self.widget.tick(Instant::now());
            if self.settle().await || matches!(flow, Flow::Stop) {
                break;
            }
        }

        Ok(())
    }

    async fn handle_command(&mut self, command: SessionCommand) -> Flow {
        debug!(?command, "Slash command");
        match command {
            SessionCommand::Quit => return Flow::Stop,
            SessionCommand::Help => println!("{}", self.command_dispatcher.help_text()),
            SessionCommand::NewChat => self.widget.new_chat(),
            SessionCommand::CloseSession => self.widget.close_session(),
            SessionCommand::Logout => self.widget.logout(),
            SessionCommand::Specialist(Some(id)) => {
                self.widget.switch_specialist(&id);
            }
            SessionCommand::Specialist(None) => {
                let info = self.widget.specialist().info();
                println!("{} - {}", style(info.title).bold(), info.subtitle);
            }
            SessionCommand::ListSpecialists => {
                display::display_specialists(self.widget.specialist())
            }
            SessionCommand::History => display::display_history(self.widget.history()),
            SessionCommand::Consent(Some(flag)) => {
                if self.consent.set_consent(self.widget.view_mut(), flag).await.is_some() {
                    self.widget.view_mut().set_consent_checked(flag);
                }
            }
            SessionCommand::Consent(None) => {
                let status = match self.widget.view().consent() {
                    Some(true) => "activado",
                    Some(false) => "desactivado",
                    None => "desconocido",
                };
                println!("Consentimiento: {}", style(status).bold());
            }
            SessionCommand::Export => self.consent.export_data(self.widget.view_mut()).await,
            SessionCommand::Delete => self.consent.delete_data(self.widget.view_mut()).await,
        }
        Flow::Continue
    }

    /// Waits out a scheduled navigation, if any. Returns `true` once the widget has navigated.
    async fn settle(&mut self) -> bool {
        if let Some(due) = self.widget.navigation_due() {
            tokio::time::sleep_until(due.into()).await;
            self.widget.tick(Instant::now());
        }
        self.widget.view().location().is_some()
    }
}
