use std::process::ExitCode;

use tracing::{error, info};
use wsrelay::config::load_config;
use wsrelay::transport::start_websocket_server;
use wsrelay::utils::error::RelayError;
use wsrelay::utils::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("info");
            error!("{}", RelayError::from(e));
            return ExitCode::FAILURE;
        }
    };
    logging::init(&settings.log.level);

    tokio::select! {
        result = start_websocket_server(&settings) => {
            match result {
                Ok(()) => error!("WebSocket server exited unexpectedly."),
                Err(e) => error!("Server failed: {e}"),
            }
            ExitCode::FAILURE
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
            ExitCode::SUCCESS
        }
    }
}
