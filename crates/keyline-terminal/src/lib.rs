//! Keystroke command layer.
//!
//! Single keys are bound to handlers in blocks; named ("long") commands are
//! typed after a prefix key. The dispatcher routes each key either to the
//! caller's active edit session or to a registered command, collecting
//! parameters and long command lines one key at a time.

mod buffer;
mod command;
mod dispatcher;
mod editor;
pub mod help;
mod long_table;
mod registry;
#[cfg(test)]
mod scenarios;
pub mod splitter;
mod table;

/// Growable byte buffer with a write cursor.
pub use buffer::InputBuffer;
/// Argument passed to a handler on invocation.
pub use command::CommandArg;
/// Group of fixed-key commands registered together.
pub use command::CommandBlock;
/// Behaviour flags (parameter, progressive).
pub use command::CommandFlags;
/// Invocable command handler trait.
pub use command::CommandHandler;
/// Handler bound to a single key.
pub use command::FixedCommand;
/// Handler bound to a typed name.
pub use command::LongCommand;
/// Routes keys to sessions and commands.
pub use dispatcher::Dispatcher;
/// Result of feeding one key to a session.
pub use editor::EditStep;
/// In-progress parameter or long-command entry.
pub use editor::Session;
/// Write the help listing to a sink.
pub use help::print_help;
/// Registry of fixed-key blocks and long commands.
pub use registry::CommandRegistry;
/// Long-command line splitting.
pub use splitter::{LineSplitter, RegexSplitter, SplitLine};
