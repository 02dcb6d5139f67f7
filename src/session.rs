use crate::config::ServerConfig;
use crate::core_command::{strip_line_terminator, Command};
use crate::core_fs::Filesystem;
use crate::core_reply::Reply;
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// State of one client connection.
#[derive(Debug)]
pub struct Session {
    pub current_dir: PathBuf,
    pub peer: String,
    pub commands_handled: u64,
    pub connected_at: DateTime<Local>,
}

impl Session {
    pub fn new(start_dir: PathBuf, peer: impl Into<String>) -> Self {
        Self {
            current_dir: start_dir,
            peer: peer.into(),
            commands_handled: 0,
            connected_at: Local::now(),
        }
    }

    /// Decodes one chunk and runs it. Always yields exactly one reply.
    pub fn respond(&mut self, fs: &dyn Filesystem, chunk: &[u8]) -> Reply {
        self.commands_handled += 1;
        match Command::decode(chunk) {
            Ok(command) => self.execute(fs, command),
            Err(e) => {
                warn!("[{}] {}", self.peer, e);
                e.to_reply()
            }
        }
    }

    pub fn execute(&mut self, fs: &dyn Filesystem, command: Command) -> Reply {
        debug!("[{}] {} in {:?}", self.peer, command.verb(), self.current_dir);

        match command {
            Command::ChangeDirectory(path) => match fs.change_directory(&self.current_dir, &path) {
                Ok(new_dir) => {
                    info!("[{}] Directory changed to {:?}", self.peer, new_dir);
                    self.current_dir = new_dir;
                    Reply::Ok
                }
                Err(e) => {
                    warn!(
                        "[{}] Failed to change directory to {:?}: {}",
                        self.peer,
                        String::from_utf8_lossy(&path),
                        e
                    );
                    e.to_reply()
                }
            },
            // A failed listing still ends with the blank line.
            Command::ListDirectory => match fs.list_entries(&self.current_dir) {
                Ok(names) => Reply::listing(names),
                Err(e) => {
                    warn!("[{}] Failed to list directory: {}", self.peer, e);
                    Reply::Listing(Vec::new())
                }
            },
            Command::PrintWorkingDirectory => match fs.working_directory(&self.current_dir) {
                Ok(path) => Reply::path(path),
                Err(e) => {
                    warn!("[{}] Failed to report working directory: {}", self.peer, e);
                    e.to_reply()
                }
            },
        }
    }

    pub fn elapsed(&self) -> chrono::Duration {
        Local::now().signed_duration_since(self.connected_at)
    }
}

/// Runs the read/dispatch/respond loop until the client goes away.
///
/// Each successful read is one command and gets one reply. Filesystem
/// failures are answered in-band; only transport errors end the loop early.
/// `stream` is dropped on every exit path.
///
/// # Arguments
///
/// * `stream` - The client connection, owned by the loop for its lifetime.
/// * `session` - Per-connection state, including the working directory.
/// * `fs` - The shared filesystem adapter.
/// * `config` - Server settings (read buffer size, terminator trimming).
///
/// # Returns
///
/// `Ok(())` when the client closes the connection, or the I/O error that
/// ended it.
pub async fn handle_connection<S>(
    mut stream: S,
    session: &mut Session,
    fs: Arc<dyn Filesystem>,
    config: Arc<ServerConfig>,
) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; config.read_buffer_size()];

    loop {
        let n = stream.read(&mut buffer).await?;
        if n == 0 {
            info!("[{}] Client disconnected", session.peer);
            break;
        }

        let mut chunk = &buffer[..n];
        if config.trim_line_terminator {
            chunk = strip_line_terminator(chunk);
        }

        let reply = session.respond(fs.as_ref(), chunk);
        stream.write_all(&reply.encode()).await?;
        stream.flush().await?;
    }

    Ok(())
}
