// src/constants.rs

pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 1202;
pub const DEFAULT_READ_BUFFER_SIZE: usize = 512;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/rouillenav.conf";

// Wire tokens
pub const VERB_CD: &[u8] = b"CD";
pub const VERB_DIR: &[u8] = b"DIR";
pub const VERB_PWD: &[u8] = b"PWD";
pub const ARG_SEPARATOR: u8 = b' ';

pub const REPLY_OK: &[u8] = b"OK";
pub const REPLY_ERROR: &[u8] = b"ERROR";
pub const LINE_TERMINATOR: &[u8] = b"\r\n";
