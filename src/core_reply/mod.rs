use crate::constants::{LINE_TERMINATOR, REPLY_ERROR, REPLY_OK};
use std::ffi::OsString;

/// A reply to exactly one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Error,
    /// Directory listing, one name per line followed by a blank line.
    Listing(Vec<Vec<u8>>),
    /// Working directory, sent raw without terminator.
    Path(Vec<u8>),
}

impl Reply {
    pub fn listing(names: Vec<OsString>) -> Self {
        Reply::Listing(names.into_iter().map(wire_bytes).collect())
    }

    pub fn path(path: OsString) -> Self {
        Reply::Path(wire_bytes(path))
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Reply::Ok => REPLY_OK.to_vec(),
            Reply::Error => REPLY_ERROR.to_vec(),
            Reply::Listing(names) => {
                let size = names
                    .iter()
                    .map(|name| name.len() + LINE_TERMINATOR.len())
                    .sum::<usize>()
                    + LINE_TERMINATOR.len();
                let mut out = Vec::with_capacity(size);
                for name in names {
                    out.extend_from_slice(name);
                    out.extend_from_slice(LINE_TERMINATOR);
                }
                out.extend_from_slice(LINE_TERMINATOR);
                out
            }
            Reply::Path(path) => path.clone(),
        }
    }
}

// Names go out exactly as the OS stores them so that a listed name can be
// sent back in a `CD`.
#[cfg(unix)]
fn wire_bytes(name: OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStringExt;
    name.into_vec()
}

#[cfg(not(unix))]
fn wire_bytes(name: OsString) -> Vec<u8> {
    name.to_string_lossy().into_owned().into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tokens() {
        assert_eq!(Reply::Ok.encode(), b"OK");
        assert_eq!(Reply::Error.encode(), b"ERROR");
    }

    #[test]
    fn test_listing_has_trailing_blank_line() {
        let reply = Reply::listing(vec![OsString::from("a.txt"), OsString::from("src")]);
        assert_eq!(reply.encode(), b"a.txt\r\nsrc\r\n\r\n");
    }

    #[test]
    fn test_empty_listing_is_a_lone_terminator() {
        assert_eq!(Reply::Listing(Vec::new()).encode(), b"\r\n");
    }

    #[test]
    fn test_path_is_raw() {
        assert_eq!(Reply::path(OsString::from("/tmp")).encode(), b"/tmp");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_are_sent_unchanged() {
        use std::os::unix::ffi::OsStringExt;

        let name = OsString::from_vec(b"caf\xe9".to_vec());
        assert_eq!(Reply::listing(vec![name.clone()]).encode(), b"caf\xe9\r\n\r\n");
        assert_eq!(Reply::path(name).encode(), b"caf\xe9");
    }
}
