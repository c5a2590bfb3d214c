use console::{Term, style};
use jpia_chat::ChatError;
use jpia_chat::consent::ConsentView;
use jpia_chat::render::{
    Fragment, FragmentKind, GOODBYE_TEXT, SOURCES_HEADING, TYPING_INDICATOR_ID, TYPING_TEXT,
};
use jpia_chat::session::{ChatMessage, Role};
use jpia_chat::specialist::{Specialist, SpecialistInfo};
use jpia_chat::toast::{Toast, ToastLevel};
use jpia_chat::view::{ChatView, SendButtonState};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use termimad::MadSkin;

const WELCOME_TEXT: &str =
    "Bienvenido a JP_IA. Pregunta sobre los Reglamentos de Planificación o escribe /help.";

/// Terminal rendition of the chat page. The "input" is the line just read from the editor.
pub struct TerminalView {
    input: String,
    echo_user: bool,
    /// Off whenever logs share the terminal; the indicator is erased by cursor position.
    draw_typing: bool,
    typing_shown: bool,
    welcome_visible: bool,
    origin: String,
    location: Option<String>,
    download_dir: PathBuf,
    auto_confirm: bool,
    consent: Option<bool>,
    skin: MadSkin,
}

impl TerminalView {
    pub fn new(
        origin: impl Into<String>,
        download_dir: PathBuf,
        auto_confirm: bool,
        draw_typing: bool,
    ) -> Self {
        Self {
            input: String::new(),
            echo_user: false,
            draw_typing,
            typing_shown: false,
            welcome_visible: false,
            origin: origin.into(),
            location: None,
            download_dir,
            auto_confirm,
            consent: None,
            skin: MadSkin::default(),
        }
    }

    /// Echo user messages back; only useful when the text was not typed at a prompt.
    pub fn set_echo_user(&mut self, echo: bool) {
        self.echo_user = echo;
    }

    /// Absolute URL of the last navigation, if the widget asked to leave.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn consent(&self) -> Option<bool> {
        self.consent
    }

    fn terminal_width() -> usize {
        let width = Term::stdout().size().1 as usize;
        width.saturating_sub(4).clamp(40, 100)
    }

    fn rule(&self, label: &str) -> String {
        let width = Self::terminal_width();
        let used = console::measure_text_width(label) + 4;
        format!("┌─ {} {}", label, "─".repeat(width.saturating_sub(used)))
    }
}

pub fn display_user(message: &ChatMessage) {
    println!("\n{} {}", style("👤").bold(), style(&message.text).bold().white());
}

pub fn display_bot(skin: &MadSkin, rule: &str, message: &ChatMessage) {
    println!("\n{}", style(rule).dim().blue());
    skin.print_text(&message.text);
    if !message.sources.is_empty() {
        println!("{}", style(format!("📚 {}", SOURCES_HEADING)).bold().cyan());
        for source in &message.sources {
            println!("  {} {}", style("•").cyan(), source);
        }
    }
}

pub fn display_error(message: &ChatMessage) {
    println!(
        "\n{} {}",
        style("❌ Ha ocurrido un error:").bold().red(),
        style(&message.text).red()
    );
}

pub fn display_history(history: &[ChatMessage]) {
    if history.is_empty() {
        println!("{}", style("(sin mensajes en esta conversación)").dim());
        return;
    }
    for message in history {
        let role = match message.role {
            Role::User => style("Tú").bold().cyan(),
            Role::Bot => style("JP_IA").bold().blue(),
            Role::Error => style("Error").bold().red(),
        };
        println!("{} {}: {}", style(&message.timestamp).dim(), role, message.text);
    }
}

pub fn display_specialists(active: Specialist) {
    for specialist in Specialist::all() {
        let info = specialist.info();
        let marker = if specialist == active { "●" } else { " " };
        println!(
            "{} {:<15} {} - {}",
            style(marker).green(),
            style(specialist.id()).bold(),
            info.title,
            style(info.subtitle).dim()
        );
    }
}

pub fn display_failure(err: &ChatError) {
    eprintln!("{} {}", style("Error:").bold().red(), err);
}

impl ChatView for TerminalView {
    fn input_value(&self) -> Option<String> {
        Some(self.input.clone())
    }

    fn set_input_value(&mut self, value: &str) {
        self.input = value.to_string();
    }

    fn input_content_height(&self) -> Option<u32> {
        None
    }

    fn set_input_height(&mut self, _px: u32) {}

    fn focus_input(&mut self) {}

    fn set_send_button(&mut self, _state: SendButtonState) {}

    fn append_fragment(&mut self, fragment: Fragment) {
        self.typing_shown = false;
        match (fragment.kind, fragment.message.as_ref()) {
            (FragmentKind::User, Some(message)) if self.echo_user => display_user(message),
            (FragmentKind::Bot, Some(message)) => {
                let rule = self.rule("🤖 JP_IA");
                display_bot(&self.skin, &rule, message);
            }
            (FragmentKind::Error, Some(message)) => display_error(message),
            (FragmentKind::Typing, _) if self.draw_typing => {
                println!("{}", style(TYPING_TEXT).dim().italic());
                self.typing_shown = true;
            }
            (FragmentKind::Goodbye, _) => println!("\n{}", style(GOODBYE_TEXT).bold().green()),
            _ => {}
        }
        io::stdout().flush().ok();
    }

    fn remove_fragment(&mut self, id: &str) {
        if id == TYPING_INDICATOR_ID && self.typing_shown {
            Term::stdout().clear_last_lines(1).ok();
            self.typing_shown = false;
        }
    }

    fn clear_conversation(&mut self) {
        self.typing_shown = false;
    }

    fn scroll_to_bottom(&mut self) {}

    fn set_welcome_visible(&mut self, visible: bool) {
        if visible && !self.welcome_visible {
            println!("{}", style(WELCOME_TEXT).dim());
        }
        self.welcome_visible = visible;
    }

    fn set_inline_typing(&mut self, _active: bool) {}

    fn set_header(&mut self, info: &SpecialistInfo) {
        println!(
            "\n{} {}",
            style(info.title).bold().magenta(),
            style(format!("· {}", info.subtitle)).dim()
        );
    }

    fn set_active_specialist(&mut self, _specialist: &str) {}

    fn insert_toast(&mut self, toast: &Toast) {
        let line = match toast.level {
            ToastLevel::Info => style(format!("ℹ {}", toast.message)).cyan(),
            ToastLevel::Success => style(format!("✔ {}", toast.message)).green(),
            ToastLevel::Warning => style(format!("⚠ {}", toast.message)).yellow(),
            ToastLevel::Error => style(format!("✖ {}", toast.message)).red(),
        };
        eprintln!("{}", line);
    }

    fn start_toast_exit(&mut self, _id: &str) {}

    fn remove_toast(&mut self, _id: &str) {}

    fn toggle_sidebar(&mut self) {}

    fn close_sidebar(&mut self) {}

    fn navigate(&mut self, path: &str) {
        let url = format!("{}{}", self.origin, path);
        println!(
            "\n{} {}",
            style("↪ Continúa en el navegador:").bold().yellow(),
            style(&url).underlined()
        );
        self.location = Some(url);
    }
}

impl ConsentView for TerminalView {
    fn set_feedback(&mut self, message: &str) {
        println!("{} {}", style("🔒").bold(), message);
    }

    fn set_consent_checked(&mut self, checked: bool) {
        self.consent = Some(checked);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.auto_confirm {
            return true;
        }
        println!(
            "\n{} {} {}",
            style("❓").bold().yellow(),
            style(prompt).bold().cyan(),
            style("[s/N]").dim()
        );
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes")
    }

    fn save_download(&mut self, filename: &str, bytes: &[u8]) -> Result<(), ChatError> {
        fs::create_dir_all(&self.download_dir)?;
        let path = self.download_dir.join(filename);
        fs::write(&path, bytes)?;
        println!("{} {}", style("💾").bold(), path.display());
        Ok(())
    }
}
