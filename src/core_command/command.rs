use crate::constants::{ARG_SEPARATOR, LINE_TERMINATOR, VERB_CD, VERB_DIR, VERB_PWD};
use crate::core_command::error::ProtocolError;

// Longest verb echoed back into the logs for an unknown command.
const MAX_LOGGED_VERB: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListDirectory,
    /// Raw argument bytes; only the filesystem decides whether they name a directory.
    ChangeDirectory(Vec<u8>),
    PrintWorkingDirectory,
}

impl Command {
    /// Decodes one received chunk into a command.
    ///
    /// The chunk is taken as a whole: `CD` followed by one space takes the
    /// rest of the chunk verbatim as its path (trailing terminators
    /// included), `DIR` and `PWD` only need to prefix the chunk. Matching is
    /// case-sensitive and never reads past the end of `chunk`.
    pub fn decode(chunk: &[u8]) -> Result<Command, ProtocolError> {
        if let Some(rest) = chunk.strip_prefix(VERB_CD) {
            if let Some((&ARG_SEPARATOR, path)) = rest.split_first() {
                return Ok(Command::ChangeDirectory(path.to_vec()));
            }
        }

        if chunk.starts_with(VERB_DIR) {
            return Ok(Command::ListDirectory);
        }

        if chunk.starts_with(VERB_PWD) {
            return Ok(Command::PrintWorkingDirectory);
        }

        Err(ProtocolError::UnknownCommand(leading_word(chunk)))
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Command::ListDirectory => "DIR",
            Command::ChangeDirectory(_) => "CD",
            Command::PrintWorkingDirectory => "PWD",
        }
    }
}

/// Removes a single trailing `\r\n` or `\n`, if any.
pub fn strip_line_terminator(chunk: &[u8]) -> &[u8] {
    chunk
        .strip_suffix(LINE_TERMINATOR)
        .or_else(|| chunk.strip_suffix(b"\n"))
        .unwrap_or(chunk)
}

fn leading_word(chunk: &[u8]) -> String {
    let word = chunk
        .split(|b| *b == ARG_SEPARATOR || *b == b'\r' || *b == b'\n')
        .next()
        .unwrap_or_default();
    let word = &word[..word.len().min(MAX_LOGGED_VERB)];
    String::from_utf8_lossy(word).into_owned()
}
