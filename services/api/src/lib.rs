mod cli;
mod infra;
mod redact;
mod routes;
mod score;
mod server;

use zenguard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
