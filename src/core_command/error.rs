// Errors raised while decoding a client chunk
use thiserror::Error;

use crate::core_reply::Reply;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unknown command: {0:?}")]
    UnknownCommand(String),
}

impl ProtocolError {
    pub fn to_reply(&self) -> Reply {
        Reply::Error
    }
}
