use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "JP_IA planning-regulations chat client", long_about = None)]
pub struct Args {
    /// Question to send once; read from stdin when piped
    pub query: Option<String>,

    /// Stay in an interactive chat session
    #[arg(short, long)]
    pub chat: bool,

    /// Server origin, e.g. https://jp.example.org
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Specialist to start with (general, procedimientos, tecnico, ...)
    #[arg(short, long)]
    pub specialist: Option<String>,

    /// Answer yes to the data-deletion confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Config file to use instead of ~/.jpia.yaml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log request flow to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
