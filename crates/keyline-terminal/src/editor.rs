//! Edit sessions: collecting a parameter or a long command one key at a time.

use std::fmt;

use keyline_types::config::KeylineConfig;
use keyline_types::error::Result;
use keyline_types::key;

use crate::buffer::InputBuffer;
use crate::command::FixedCommand;

/// What a single key did to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStep {
    /// Still editing.
    Continue,
    /// Enter was pressed; the input is ready.
    Complete,
    /// Escape was pressed; the input is discarded.
    Cancel,
}

impl EditStep {
    /// Whether the session ends after this step.
    pub fn is_final(self) -> bool {
        !matches!(self, EditStep::Continue)
    }
}

/// Transient state of an in-progress parameter or long-command entry.
///
/// A session exclusively owns its buffer; dropping the session releases it.
#[derive(Debug)]
pub struct Session {
    buffer: InputBuffer,
    command: Option<FixedCommand>,
}

impl Session {
    /// Start collecting the parameter of `command`.
    pub fn for_command(command: &FixedCommand, capacity: usize) -> Result<Self> {
        Ok(Self {
            buffer: InputBuffer::with_capacity(capacity)?,
            command: Some(command.clone()),
        })
    }

    /// Start collecting a long command line.
    pub fn long(capacity: usize) -> Result<Self> {
        Ok(Self {
            buffer: InputBuffer::with_capacity(capacity)?,
            command: None,
        })
    }

    /// The fixed command being edited, or `None` in long mode.
    pub fn command(&self) -> Option<&FixedCommand> {
        self.command.as_ref()
    }

    pub fn is_long(&self) -> bool {
        self.command.is_none()
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    /// Current input as text.
    pub fn text(&self) -> String {
        self.buffer.snapshot()
    }

    /// Apply one key to the buffer and echo the result to `out`.
    ///
    /// The release key changes nothing but still echoes.
    pub fn edit(
        &mut self,
        input: u8,
        out: &mut dyn fmt::Write,
        config: &KeylineConfig,
    ) -> Result<EditStep> {
        let step = match input {
            key::ESC => {
                write!(out, "\n{}\n", config.cancel_text)?;
                return Ok(EditStep::Cancel);
            },
            key::ENTER => EditStep::Complete,
            key::RELEASE => EditStep::Continue,
            k if key::is_erase(k) => {
                self.buffer.erase();
                EditStep::Continue
            },
            k => {
                self.buffer.write_u8(k)?;
                EditStep::Continue
            },
        };

        self.echo(out, config)?;
        if step == EditStep::Complete {
            out.write_char('\n')?;
        }
        Ok(step)
    }

    fn echo(&self, out: &mut dyn fmt::Write, config: &KeylineConfig) -> fmt::Result {
        let text = self.buffer.snapshot();
        if self.is_long() {
            write!(out, "\r{text}")
        } else {
            let width = config.preview_width;
            let skip = text.chars().count().saturating_sub(width);
            let preview: String = text.chars().skip(skip).collect();
            write!(out, "\r> {preview:>width$}")
        }
    }
}
