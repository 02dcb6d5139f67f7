use crate::config::{Config, ServerConfig};
use crate::core_fs::{Filesystem, LocalFilesystem};
use crate::session::{handle_connection, Session};
use anyhow::{bail, Context, Result};
use log::{error, info};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

// Pause after a failed accept so a persistent failure (EMFILE) does not spin.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Runs the server with the provided configuration.
///
/// Resolves the start and root directories, binds the listening socket and
/// then accepts connections until the process is terminated.
///
/// # Arguments
///
/// * `config` - The server configuration.
///
/// # Returns
///
/// Result<(), anyhow::Error> carrying the startup failure (invalid start or
/// root directory, bind error). Never returns once the server is listening.
pub async fn run(config: Config) -> Result<()> {
    info!("Starting server with config: {:?}", config);
    let settings = Arc::new(config.server);

    let fs = build_filesystem(&settings)?;
    let start_dir = resolve_start_dir(&settings)?;
    if let Some(root) = fs.root() {
        if !start_dir.starts_with(root) {
            bail!(
                "Start directory {} is outside the root directory {}",
                start_dir.display(),
                root.display()
            );
        }
    }
    info!("Sessions start in {}", start_dir.display());

    let endpoint = settings.listen_endpoint();
    let listener = TcpListener::bind(&endpoint)
        .await
        .with_context(|| format!("Failed to bind {}", endpoint))?;
    info!("Server listening on {}", listener.local_addr()?);

    serve(listener, Arc::new(fs), start_dir, settings).await
}

/// Accept loop. Every connection gets its own session task starting in
/// `start_dir`; accept errors are logged and retried after a short pause.
///
/// # Arguments
///
/// * `listener` - The bound listening socket.
/// * `fs` - The filesystem adapter shared by all sessions.
/// * `start_dir` - Canonical working directory of every new session.
/// * `config` - Server settings handed to each session.
///
/// # Returns
///
/// Runs until the process is terminated.
pub async fn serve(
    listener: TcpListener,
    fs: Arc<dyn Filesystem>,
    start_dir: PathBuf,
    config: Arc<ServerConfig>,
) -> Result<()> {
    loop {
        let (socket, addr) =
            accept_with_backoff(|| listener.accept(), ACCEPT_ERROR_BACKOFF).await;
        info!("New connection from {}", addr);

        let fs = Arc::clone(&fs);
        let config = Arc::clone(&config);
        let mut session = Session::new(start_dir.clone(), addr.to_string());

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, &mut session, fs, config).await {
                error!("[{}] Connection error: {}", session.peer, e);
            }
            info!(
                "Connection closed for {} after {} command(s) in {}s",
                session.peer,
                session.commands_handled,
                session.elapsed().num_seconds()
            );
        });
    }
}

/// Calls `accept` until it succeeds, logging each failure and sleeping
/// `backoff` before the next attempt.
async fn accept_with_backoff<F, Fut, T>(mut accept: F, backoff: Duration) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<T>>,
{
    loop {
        match accept().await {
            Ok(connection) => return connection,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                tokio::time::sleep(backoff).await;
            }
        }
    }
}

fn build_filesystem(config: &ServerConfig) -> Result<LocalFilesystem> {
    match &config.root_dir {
        Some(root) => {
            let root = root
                .canonicalize()
                .with_context(|| format!("Invalid root directory: {}", root.display()))?;
            if !root.is_dir() {
                bail!("Root directory is not a directory: {}", root.display());
            }
            info!("Sessions are confined to {}", root.display());
            Ok(LocalFilesystem::confined_to(root))
        }
        None => Ok(LocalFilesystem::new()),
    }
}

fn resolve_start_dir(config: &ServerConfig) -> Result<PathBuf> {
    let start_dir = match &config.start_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to read the process working directory")?,
    };
    let start_dir = start_dir
        .canonicalize()
        .with_context(|| format!("Invalid start directory: {}", start_dir.display()))?;
    if !start_dir.is_dir() {
        bail!("Start directory is not a directory: {}", start_dir.display());
    }
    Ok(start_dir)
}
