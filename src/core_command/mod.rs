// Here's the list of the commands understood by the server
pub mod command;
pub mod error;

pub use command::{strip_line_terminator, Command};
pub use error::ProtocolError;
