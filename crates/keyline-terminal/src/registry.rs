//! The command registry: fixed-key blocks, long commands, and the settings
//! the dispatcher needs to drive them.

use std::fmt;

use keyline_types::config::KeylineConfig;
use keyline_types::error::Result;

use crate::command::{CommandBlock, FixedCommand, LongCommand};
use crate::dispatcher::Dispatcher;
use crate::long_table::LongCommandTable;
use crate::splitter::{LineSplitter, RegexSplitter};
use crate::table::CommandTable;

/// Registry of every command reachable from the keyboard.
///
/// Create one at startup and hand it to a [`Dispatcher`] for each key.
/// Registration takes `&mut self`, so register and unregister at setup and
/// teardown rather than from inside a handler.
pub struct CommandRegistry {
    config: KeylineConfig,
    commands: CommandTable,
    long_commands: LongCommandTable,
    splitter: Box<dyn LineSplitter>,
}

impl CommandRegistry {
    /// Create an empty registry with default settings.
    pub fn new() -> Self {
        Self::from_valid_config(KeylineConfig::default())
    }

    /// Create an empty registry with `config`, rejecting settings the
    /// dispatcher cannot honour.
    pub fn with_config(config: KeylineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: KeylineConfig) -> Self {
        Self {
            config,
            commands: CommandTable::new(),
            long_commands: LongCommandTable::new(),
            splitter: Box::new(RegexSplitter::new()),
        }
    }

    /// Replace the long-command line splitter.
    pub fn with_splitter(mut self, splitter: Box<dyn LineSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn config(&self) -> &KeylineConfig {
        &self.config
    }

    pub fn splitter(&self) -> &dyn LineSplitter {
        self.splitter.as_ref()
    }

    /// Dispatcher borrowing this registry.
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(self)
    }

    // -- Fixed-key commands --

    /// Register a block of fixed-key commands.
    pub fn register_commands(&mut self, block: &CommandBlock) -> Result<()> {
        self.commands.register(block)
    }

    /// Unregister a block. Unknown blocks are ignored.
    pub fn unregister_commands(&mut self, block: &CommandBlock) {
        self.commands.unregister(block);
    }

    /// Command bound to `key`, honouring block precedence.
    pub fn find_command(&self, key: u8) -> Option<&FixedCommand> {
        self.commands.find_by_key(key)
    }

    pub fn is_registered(&self, block: &CommandBlock) -> bool {
        self.commands.is_registered(block)
    }

    pub fn block_count(&self) -> usize {
        self.commands.block_count()
    }

    /// Total entries across all registered blocks.
    pub fn command_count(&self) -> usize {
        self.commands.command_count()
    }

    // -- Long commands --

    /// Register long commands. Stops at the first duplicate name.
    pub fn register_long_commands(&mut self, entries: &[LongCommand]) -> Result<()> {
        self.long_commands.register(entries)
    }

    pub fn unregister_long_commands(&mut self, entries: &[LongCommand]) {
        self.long_commands.unregister(entries);
    }

    /// Case-insensitive lookup of a long command.
    pub fn find_long_command(&self, name: &str) -> Option<&LongCommand> {
        self.long_commands.find_by_name(name)
    }

    /// Long commands in display order.
    pub fn long_commands(&self) -> impl Iterator<Item = &LongCommand> {
        self.long_commands.iter()
    }

    pub fn long_count(&self) -> usize {
        self.long_commands.len()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("config", &self.config)
            .field("commands", &self.commands)
            .field("long_commands", &self.long_commands)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandArg, CommandFlags};
    use crate::splitter::SplitLine;
    use keyline_types::error::KeylineError;

    fn noop(_: &mut dyn fmt::Write, _: &CommandArg<'_>) -> Result<()> {
        Ok(())
    }

    #[test]
    fn empty_registry() {
        let reg = CommandRegistry::new();
        assert_eq!(reg.block_count(), 0);
        assert_eq!(reg.command_count(), 0);
        assert_eq!(reg.long_count(), 0);
        assert!(reg.find_command(b'a').is_none());
        assert!(reg.find_long_command("a").is_none());
    }

    #[test]
    fn fixed_and_long_are_independent() {
        let mut reg = CommandRegistry::new();
        let block = CommandBlock::new(vec![FixedCommand::new(
            b'a',
            CommandFlags::NONE,
            "Answer",
            noop,
        )]);
        let long = [LongCommand::new("answer", CommandFlags::NONE, "Answer", noop)];
        reg.register_commands(&block).unwrap();
        reg.register_long_commands(&long).unwrap();

        reg.unregister_commands(&block);
        assert!(reg.find_command(b'a').is_none());
        assert!(reg.find_long_command("ANSWER").is_some());

        reg.unregister_long_commands(&long);
        assert_eq!(reg.long_count(), 0);
    }

    #[test]
    fn config_is_kept() {
        let config = KeylineConfig {
            long_prefix: ':',
            ..KeylineConfig::default()
        };
        let reg = CommandRegistry::with_config(config).unwrap();
        assert_eq!(reg.config().long_prefix_key(), b':');
    }

    #[test]
    fn invalid_config_rejected() {
        for long_prefix in ['é', '\u{2192}', '\t'] {
            let config = KeylineConfig {
                long_prefix,
                ..KeylineConfig::default()
            };
            let err = CommandRegistry::with_config(config).unwrap_err();
            assert!(matches!(err, KeylineError::InvalidArgument(_)));
        }
    }

    struct EqualsSplitter;

    impl LineSplitter for EqualsSplitter {
        fn split<'a>(&self, line: &'a str) -> Option<SplitLine<'a>> {
            let (name, param) = line.split_once('=')?;
            Some(SplitLine {
                name,
                param: Some(param),
            })
        }
    }

    #[test]
    fn custom_splitter() {
        let reg = CommandRegistry::new().with_splitter(Box::new(EqualsSplitter));
        let split = reg.splitter().split("volume=5").unwrap();
        assert_eq!(split.name, "volume");
        assert_eq!(split.param, Some("5"));
    }
}
