use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "rouillenav",
    about = "A line-oriented remote directory navigation server written in Rust."
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Port to listen on, overrides the configuration file
    #[arg(short = 'p', long)]
    pub listen_port: Option<u16>,

    /// Directory new sessions start in, overrides the configuration file
    #[arg(short, long)]
    pub start_dir: Option<PathBuf>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
