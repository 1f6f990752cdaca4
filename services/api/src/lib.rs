mod cli;
mod evaluate;
mod infra;
mod routes;
mod server;

use clause_audit::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
