//! Command Shell
//!
//! Drives an engine from a token stream and prints results.

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::config::ShellConfig;
use crate::engine::Engine;
use crate::error::{PagedKvError, Result};
use crate::protocol::{Command, CommandReader, Response};

/// Printed by `get` when no map exists yet
pub const UNINITIALIZED_GET_SENTINEL: i32 = -1;

/// Outcome of a shell run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellSummary {
    /// Commands read, failed ones included
    pub commands: usize,

    /// Commands that reported an error
    pub errors: usize,

    /// Whether `stop_on_error` ended the run before end of input
    pub stopped_early: bool,
}

/// Reads commands, executes them and writes their output
pub struct Shell {
    engine: Arc<Engine>,
    config: ShellConfig,
}

impl Shell {
    /// Create a shell, initializing the map first if the config asks for it
    pub fn new(engine: Arc<Engine>, config: ShellConfig) -> Result<Self> {
        if let Some(map_config) = config.preinit {
            engine.init(map_config)?;
        }
        Ok(Self { engine, config })
    }

    /// Run until end of input
    ///
    /// Command errors are logged and counted; only I/O errors end the run
    /// early, unless `stop_on_error` is set.
    pub fn run<R: BufRead, W: Write>(&self, reader: R, writer: &mut W) -> Result<ShellSummary> {
        let mut summary = ShellSummary::default();

        for item in CommandReader::new(reader) {
            summary.commands += 1;

            let outcome = match item {
                Ok(command) => {
                    tracing::trace!(?command, "executing");
                    self.execute(command, writer)
                }
                Err(e) => Err(e),
            };

            match outcome {
                Ok(()) => {}
                Err(e) if !e.is_recoverable() => return Err(e),
                Err(e) => {
                    summary.errors += 1;
                    tracing::error!("{}", e);
                    if self.config.stop_on_error {
                        summary.stopped_early = true;
                        break;
                    }
                }
            }
        }

        writer.flush()?;
        Ok(summary)
    }

    fn execute<W: Write>(&self, command: Command, writer: &mut W) -> Result<()> {
        match self.engine.execute(command) {
            Ok(response) => response.render(writer),
            Err(PagedKvError::UninitializedMap) if matches!(command, Command::Get { .. }) => {
                Response::Value(UNINITIALIZED_GET_SENTINEL).render(writer)?;
                Err(PagedKvError::UninitializedMap)
            }
            Err(e) => Err(e),
        }
    }
}
