//! Command definitions
//!
//! Represents commands read from the input stream.

use std::fmt;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Init,
    Get,
    Put,
    Delete,
    Dump,
}

impl CommandType {
    /// Keyword as typed on the input stream
    pub fn keyword(self) -> &'static str {
        match self {
            CommandType::Init => "init",
            CommandType::Get => "get",
            CommandType::Put => "put",
            CommandType::Delete => "delete",
            CommandType::Dump => "dump",
        }
    }

    /// Look up a keyword (exact, case-sensitive)
    pub fn from_keyword(token: &str) -> Option<Self> {
        match token {
            "init" => Some(CommandType::Init),
            "get" => Some(CommandType::Get),
            "put" => Some(CommandType::Put),
            "delete" => Some(CommandType::Delete),
            "dump" => Some(CommandType::Dump),
            _ => None,
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parsed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Replace the current map with a fresh one
    Init { page_size: u32, number_of_pages: u32 },

    /// Get a value by key
    Get { key: i32 },

    /// Put a key-value pair
    Put { key: i32, value: i32 },

    /// Delete a key
    Delete { key: i32 },

    /// Print the buffer
    Dump,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Init { .. } => CommandType::Init,
            Command::Get { .. } => CommandType::Get,
            Command::Put { .. } => CommandType::Put,
            Command::Delete { .. } => CommandType::Delete,
            Command::Dump => CommandType::Dump,
        }
    }
}
