mod config;
mod constants;
mod core_cli;
mod core_command;
mod core_fs;
mod core_log;
mod core_reply;
mod server;
mod session;

use crate::config::Config;
use crate::core_cli::Cli;
use crate::core_log::logger::init_logger;
use anyhow::Result;
use clap::Parser;
use log::error;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    init_logger(args.verbose);

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            return Err(e);
        }
    };

    // CLI overrides
    if let Some(port) = args.listen_port {
        config.server.listen_port = port;
    }
    if let Some(start_dir) = args.start_dir {
        config.server.start_dir = Some(start_dir);
    }

    if let Err(e) = server::run(config).await {
        error!("Fatal error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
