mod cli;
mod documents;
mod infra;
mod page;
mod prompt;
mod routes;
mod server;

use cli::CliError;

pub async fn run() -> Result<(), CliError> {
    cli::run().await
}
