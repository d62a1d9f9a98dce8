use crate::server::ServerConfig;
use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod health;
mod logs;
mod server;
mod utils;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments
    let cli = cli::Cli::parse();
    // Run the specified command
    let result = match cli.command {
        cli::Commands::Start {
            bind_address,
            json_logs,
        } => {
            // Create the server config
            let config = ServerConfig {
                bind_address,
                json_logs,
            };
            server::start_server(config).await
        }
    };
    exit_code(result)
}

/// Map a command result onto the process exit code. Failures are already
/// logged by the server, so nothing is printed here.
fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
