use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod commands;
mod display;
mod input;

use crate::app::Application;
use crate::cli::Args;
use crate::commands::create_command_registry;
use crate::display::{TerminalView, display_failure};
use jpia_chat::ChatError;
use jpia_chat::api::{HttpChatBackend, HttpClient, HttpConsentBackend};
use jpia_chat::config::{Config, resolve_origin};
use jpia_chat::consent::ConsentPanel;
use jpia_chat::widget::ChatWidget;

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        "jpia_chat=debug,jpia=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn merge_config_with_args(mut config: Config, args: &Args) -> Config {
    if let Some(endpoint) = &args.endpoint {
        config.base_url = Some(endpoint.clone());
    }
    if let Some(specialist) = &args.specialist {
        config.specialist = specialist.clone();
    }
    config
}

async fn run(args: Args) -> Result<(), ChatError> {
    let config = merge_config_with_args(Config::load(args.config.as_deref()), &args);
    let origin = resolve_origin(config.base_url.as_deref());

    let client = HttpClient::new(origin.clone(), Some(&config.headers))?;
    let chat_backend = HttpChatBackend::new(client.clone(), config.chat_path.clone());
    let consent = ConsentPanel::new(HttpConsentBackend::new(client));

    let quiet = !args.verbose && std::env::var_os("RUST_LOG").is_none();
    let view = TerminalView::new(origin, config.download_dir(), args.yes, quiet);
    let mut widget = ChatWidget::new(chat_backend, view, config.widget_settings());
    if config.specialist != widget.specialist().id() {
        widget.switch_specialist(&config.specialist);
    }

    let mut app = Application::new(args, widget, consent, create_command_registry());
    app.run().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        display_failure(&e);
        std::process::exit(1);
    }
}
