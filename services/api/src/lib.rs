mod cli;
mod commands;
mod demo;
mod infra;
mod routes;
mod server;

use indra::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
