// pricepredict/src/main.rs
use clap::Parser;
use pricepredict::cli::{self, output, Cli};
use pricepredict::monitoring::{init_tracing, LogConfig};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Keep the guard alive so file logs are flushed on exit
    let _log_guard = match init_tracing(&LogConfig::from_env()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let cli = Cli::parse();
    match cli::run(cli).await {
        Ok(code) => code,
        Err(err) => {
            output::failure(&err.to_string());
            ExitCode::FAILURE
        }
    }
}
