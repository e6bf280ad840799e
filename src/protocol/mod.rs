//! Protocol Module
//!
//! Defines the text command protocol driven by the shell.
//!
//! ### Commands
//! - `init <page_size> <number_of_pages>` - create a fresh map
//! - `get <key>`                          - prints the value
//! - `put <key> <value>`
//! - `delete <key>`
//! - `dump`                               - prints the buffer in hex
//!
//! Any other keyword is an invalid command.

mod codec;
mod command;
mod response;

pub use codec::{decode_commands, encode_command, CommandReader};
pub use command::{Command, CommandType};
pub use response::Response;
