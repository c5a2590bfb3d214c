use crate::commands::CommandDispatcher;
use jpia_chat::ChatError;
use jpia_chat::specialist::Specialist;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, EditMode, Editor, Helper};

/// Completes slash-command names and specialist ids.
pub struct ChatCompleter {
    commands: CommandDispatcher,
}

impl ChatCompleter {
    pub fn new(commands: CommandDispatcher) -> Self {
        Self { commands }
    }

    fn candidates(&self, line: &str, pos: usize) -> Option<(usize, Vec<Pair>)> {
        let typed = line.get(..pos)?;
        let rest = typed.strip_prefix('/')?;

        if let Some(partial) = rest.strip_prefix("specialist ") {
            let start = pos - partial.len();
            let matches = Specialist::all()
                .map(|specialist| specialist.id())
                .filter(|id| id.starts_with(partial))
                .map(to_pair)
                .collect();
            return Some((start, matches));
        }

        if rest.contains(' ') {
            return None;
        }
        let matches = self
            .commands
            .get_command_names()
            .iter()
            .filter(|name| name.starts_with(rest))
            .map(|name| to_pair(name))
            .collect();
        Some((1, matches))
    }
}

fn to_pair(value: &str) -> Pair {
    Pair {
        display: value.to_string(),
        replacement: value.to_string(),
    }
}

impl Completer for ChatCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos).unwrap_or((pos, Vec::new())))
    }
}

pub struct ChatHelper {
    completer: ChatCompleter,
    hinter: HistoryHinter,
}

impl ChatHelper {
    pub fn new(commands: CommandDispatcher) -> Self {
        Self {
            completer: ChatCompleter::new(commands),
            hinter: HistoryHinter {},
        }
    }
}

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ChatHelper {}

impl Validator for ChatHelper {}

pub type ChatEditor = Editor<ChatHelper, DefaultHistory>;

/// Line editor for the chat loop. History lives in memory only.
pub fn create_editor(commands: CommandDispatcher) -> Result<ChatEditor, ChatError> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)
        .map_err(|e| ChatError::Input(format!("Failed to create line editor: {}", e)))?;
    editor.set_helper(Some(ChatHelper::new(commands)));

    Ok(editor)
}

/// Reads one line. `None` on Ctrl-C or Ctrl-D.
pub fn read_input(
    editor: &mut ChatEditor,
    specialist: Specialist,
) -> Result<Option<String>, ChatError> {
    let prompt = if cfg!(windows) && std::env::var("PSModulePath").is_ok() {
        format!("[{}] > ", specialist)
    } else {
        format!(
            "{} {} ",
            style(format!("[{}]", specialist)).dim(),
            style(">").bold().cyan()
        )
    };
    match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                editor
                    .add_history_entry(line.as_str())
                    .map_err(|e| ChatError::Input(format!("Failed to add history entry: {}", e)))?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Exiting...");
            Ok(None)
        }
        Err(err) => Err(ChatError::Input(format!("Input error: {}", err))),
    }
}
