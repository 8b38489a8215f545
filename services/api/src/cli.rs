use crate::documents::{run_documents, DocumentsArgs};
use crate::prompt::PromptError;
use crate::server;
use clap::{Args, Parser, Subcommand};
use residence_docs::error::AppError;
use std::fmt;

#[derive(Parser, Debug)]
#[command(
    name = "Residence Renewal Document Navigator",
    about = "Look up the documents required for a residence-period renewal application",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP form server (default command)
    Serve(ServeArgs),
    /// Resolve the required documents from flags, or interactively
    Documents(DocumentsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Debug)]
pub enum CliError {
    App(AppError),
    Prompt(PromptError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::App(err) => write!(f, "{err}"),
            CliError::Prompt(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::App(err) => Some(err),
            CliError::Prompt(err) => Some(err),
        }
    }
}

impl From<AppError> for CliError {
    fn from(value: AppError) -> Self {
        Self::App(value)
    }
}

impl From<PromptError> for CliError {
    fn from(value: PromptError) -> Self {
        Self::Prompt(value)
    }
}

pub(crate) async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await.map_err(CliError::from),
        Command::Documents(args) => run_documents(args),
    }
}
