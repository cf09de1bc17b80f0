mod cli;
mod infra;
mod reports;
mod routes;
mod server;

use lead_insight::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
