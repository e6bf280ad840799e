//! Protocol codec
//!
//! Text encoding of commands.
//!
//! ## Input Format
//! Whitespace-separated tokens; line breaks carry no meaning.
//! ```text
//! init <page_size:u32> <number_of_pages:u32>
//! get <key:i32>
//! put <key:i32> <value:i32>
//! delete <key:i32>
//! dump
//! ```

use std::collections::VecDeque;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::{PagedKvError, Result};

use super::{Command, CommandType};

// =============================================================================
// Encoding
// =============================================================================

/// Render a command as it would be typed
pub fn encode_command(command: &Command) -> String {
    let keyword = command.command_type().keyword();
    match command {
        Command::Init {
            page_size,
            number_of_pages,
        } => format!("{} {} {}", keyword, page_size, number_of_pages),
        Command::Get { key } | Command::Delete { key } => format!("{} {}", keyword, key),
        Command::Put { key, value } => format!("{} {} {}", keyword, key, value),
        Command::Dump => keyword.to_string(),
    }
}

/// Parse every command in a string, stopping at the first error
pub fn decode_commands(input: &str) -> Result<Vec<Command>> {
    CommandReader::new(input.as_bytes()).collect()
}

// =============================================================================
// Stream Decoding
// =============================================================================

/// Reads commands from a token stream
///
/// Yields one item per command keyword. A bad keyword or argument yields an
/// error and reading resumes with the next token; an I/O error ends the stream.
///
/// Input is split on ASCII whitespace as raw bytes, so a token that is not
/// valid UTF-8 is reported like any other unknown keyword or unparseable
/// argument. An unparseable argument is consumed along with its command; it
/// is not retried as the next keyword.
pub struct CommandReader<R> {
    reader: R,
    /// Tokens left over from the current line
    pending: VecDeque<Vec<u8>>,
    done: bool,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Next whitespace-separated token, refilling from the reader as needed
    fn next_token(&mut self) -> Result<Option<Vec<u8>>> {
        while self.pending.is_empty() {
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(
                line.split(u8::is_ascii_whitespace)
                    .filter(|token| !token.is_empty())
                    .map(<[u8]>::to_vec),
            );
        }
        Ok(self.pending.pop_front())
    }

    fn argument<T>(&mut self, command: CommandType) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let keyword = command.keyword();
        let token = self
            .next_token()?
            .ok_or(PagedKvError::MissingArgument { command: keyword })?;
        let text = std::str::from_utf8(&token).map_err(|_| PagedKvError::InvalidArgument {
            command: keyword,
            reason: format!("{:?}: not valid UTF-8", String::from_utf8_lossy(&token)),
        })?;
        text.parse::<T>()
            .map_err(|e| PagedKvError::InvalidArgument {
                command: keyword,
                reason: format!("{:?}: {}", text, e),
            })
    }

    /// Parse the command introduced by `keyword`
    fn read_command(&mut self, keyword: &[u8]) -> Result<Command> {
        let command = std::str::from_utf8(keyword)
            .ok()
            .and_then(CommandType::from_keyword)
            .ok_or_else(|| {
                PagedKvError::InvalidCommand(String::from_utf8_lossy(keyword).into_owned())
            })?;

        match command {
            CommandType::Init => {
                let page_size = self.argument(command)?;
                let number_of_pages = self.argument(command)?;
                Ok(Command::Init {
                    page_size,
                    number_of_pages,
                })
            }
            CommandType::Get => Ok(Command::Get {
                key: self.argument(command)?,
            }),
            CommandType::Put => {
                let key = self.argument(command)?;
                let value = self.argument(command)?;
                Ok(Command::Put { key, value })
            }
            CommandType::Delete => Ok(Command::Delete {
                key: self.argument(command)?,
            }),
            CommandType::Dump => Ok(Command::Dump),
        }
    }
}

impl<R: BufRead> Iterator for CommandReader<R> {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let keyword = match self.next_token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        let result = self.read_command(&keyword);
        if matches!(result, Err(PagedKvError::Io(_))) {
            self.done = true;
        }
        Some(result)
    }
}
