mod cli;
mod infra;
mod review;
mod routes;
mod server;

use amend_claim::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
