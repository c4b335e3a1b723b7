//! Key dispatch.
//!
//! Each key goes to the caller's active session if there is one. Otherwise
//! it is looked up as a fixed-key command, checked against the long-command
//! prefix, and finally treated as a request for help.

use std::any::Any;
use std::fmt;

use keyline_types::error::{KeylineError, Result};
use keyline_types::key;

use crate::command::{CommandArg, FixedCommand};
use crate::editor::{EditStep, Session};
use crate::help;
use crate::registry::CommandRegistry;

/// Routes keys and long-command lines to the commands of a registry.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r CommandRegistry,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r CommandRegistry {
        self.registry
    }

    /// Process one key.
    ///
    /// `slot` is the caller's storage for the session handle and must
    /// persist between calls. Without it, keys that need a session (a
    /// parameterized command or the long-command prefix) fail with
    /// [`KeylineError::InvalidArgument`]. `context` is passed through to
    /// handlers untouched.
    pub fn process(
        &self,
        mut slot: Option<&mut Option<Session>>,
        key: u8,
        out: &mut dyn fmt::Write,
        context: Option<&dyn Any>,
    ) -> Result<()> {
        log::trace!("Dispatching key {key:#04x}");

        if let Some(active) = slot.as_mut()
            && active.is_some()
        {
            if key == key::RELEASE {
                return Ok(());
            }
            return self.process_edit(active, key, out, context);
        }

        if let Some(cmd) = self.registry.find_command(key) {
            if !cmd.flags().requires_param {
                let arg = CommandArg {
                    key,
                    name: None,
                    param: None,
                    complete: true,
                    context,
                };
                return match cmd.handler() {
                    Some(handler) => handler.invoke(out, &arg),
                    None => Ok(()),
                };
            }

            let Some(slot) = slot else {
                log::warn!("Session slot is required for command '{}'", cmd.display_name());
                return Err(KeylineError::InvalidArgument(format!(
                    "session slot required for command '{}'",
                    cmd.display_name()
                )));
            };
            *slot = Some(Session::for_command(cmd, self.registry.config().buffer_capacity)?);
            log::debug!("Session opened for key {key:#04x}");

            // Digits start the parameter; any other trigger key is dropped.
            let first = if key.is_ascii_digit() {
                key
            } else {
                key::RELEASE
            };
            return self.process_edit(slot, first, out, context);
        }

        let config = self.registry.config();
        if key == config.long_prefix_key() {
            write!(out, "\n{}\n", config.long_prompt)?;

            let Some(slot) = slot else {
                log::warn!("Session slot is required for long commands");
                return Err(KeylineError::InvalidArgument(
                    "session slot required for long commands".to_string(),
                ));
            };
            *slot = Some(Session::long(config.buffer_capacity)?);
            log::debug!("Long command session opened");
            return Ok(());
        }

        if key == key::RELEASE {
            return Ok(());
        }

        self.print_help(out)
    }

    /// Parse a complete long-command line and run the named command.
    ///
    /// An unknown name is reported to `out` and is not an error.
    pub fn process_long_line(
        &self,
        line: &str,
        out: &mut dyn fmt::Write,
        context: Option<&dyn Any>,
    ) -> Result<()> {
        if line.is_empty() {
            return Err(KeylineError::InvalidArgument(
                "long command line is empty".to_string(),
            ));
        }

        let Some(split) = self.registry.splitter().split(line) else {
            log::warn!("Could not split long command line {line:?}");
            return Err(KeylineError::Parse(format!(
                "no command name in {line:?}"
            )));
        };

        match self.registry.find_long_command(split.name) {
            Some(cmd) => {
                let arg = CommandArg {
                    key: 0,
                    name: Some(split.name),
                    param: split.param,
                    complete: true,
                    context,
                };
                cmd.handler().invoke(out, &arg)
            },
            None => {
                writeln!(out, "command not found ({})", split.name)?;
                Ok(())
            },
        }
    }

    /// Write the help listing to `out`.
    pub fn print_help(&self, out: &mut dyn fmt::Write) -> Result<()> {
        help::print_help(self.registry, out)
    }

    /// Feed a key to the session in `slot`, closing the session when the key
    /// ends it, whether or not the handler succeeds.
    fn process_edit(
        &self,
        slot: &mut Option<Session>,
        key: u8,
        out: &mut dyn fmt::Write,
        context: Option<&dyn Any>,
    ) -> Result<()> {
        let Some(session) = slot.as_mut() else {
            return Err(KeylineError::InvalidArgument(
                "no active session".to_string(),
            ));
        };

        let result = self.edit(session, key, out, context);

        if matches!(key, key::ENTER | key::ESC) {
            *slot = None;
            log::debug!("Session closed");
        }
        result
    }

    fn edit(
        &self,
        session: &mut Session,
        key: u8,
        out: &mut dyn fmt::Write,
        context: Option<&dyn Any>,
    ) -> Result<()> {
        let step = session.edit(key, out, self.registry.config())?;
        let complete = match step {
            EditStep::Cancel => return Ok(()),
            EditStep::Complete => true,
            EditStep::Continue => false,
        };

        match session.command() {
            None => {
                if complete {
                    self.process_long_line(&session.text(), out, context)?;
                }
                Ok(())
            },
            Some(cmd) if complete || cmd.flags().progressive => {
                report(cmd, &session.text(), complete, out, context)
            },
            Some(_) => Ok(()),
        }
    }
}

/// Invoke a parameterized command with the collected text.
fn report(
    cmd: &FixedCommand,
    text: &str,
    complete: bool,
    out: &mut dyn fmt::Write,
    context: Option<&dyn Any>,
) -> Result<()> {
    let Some(handler) = cmd.handler() else {
        return Ok(());
    };
    let arg = CommandArg {
        key: cmd.key(),
        name: None,
        param: Some(text),
        complete,
        context,
    };
    handler.invoke(out, &arg)
}
