use database::{
    config::DatabaseConfig,
    db::{bootstrap, create_connection},
};
use log::{error, info};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let config = match DatabaseConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let db = match create_connection(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = bootstrap(&db).await {
        error!("Failed to provision schema: {e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = db.close().await {
        error!("Failed to close connection: {e}");
        return ExitCode::FAILURE;
    }

    info!("Database initialized");
    ExitCode::SUCCESS
}
