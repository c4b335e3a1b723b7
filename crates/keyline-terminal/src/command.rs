//! Command definitions: handlers, flags, fixed-key commands, blocks, and
//! long commands.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use keyline_types::error::Result;
use keyline_types::key;

/// Argument handed to a command handler on invocation.
#[derive(Clone, Copy)]
pub struct CommandArg<'a> {
    /// Key that triggered the command. Zero for long commands.
    pub key: u8,
    /// Name typed for a long command.
    pub name: Option<&'a str>,
    /// Collected parameter text, if the command takes one.
    pub param: Option<&'a str>,
    /// `false` for the intermediate calls of a progressive command.
    pub complete: bool,
    /// Opaque value supplied by the caller of `process`.
    pub context: Option<&'a dyn Any>,
}

impl<'a> CommandArg<'a> {
    /// Downcast the caller context to a concrete type.
    pub fn context<T: Any>(&self) -> Option<&'a T> {
        self.context.and_then(|c| c.downcast_ref::<T>())
    }
}

impl fmt::Debug for CommandArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandArg")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("param", &self.param)
            .field("complete", &self.complete)
            .field("context", &self.context.is_some())
            .finish()
    }
}

/// Something that can be invoked as a command.
///
/// Implemented for every `Fn(&mut dyn fmt::Write, &CommandArg) -> Result<()>`,
/// so plain closures work as handlers.
pub trait CommandHandler {
    /// Run the command, writing any response to `out`.
    fn invoke(&self, out: &mut dyn fmt::Write, arg: &CommandArg<'_>) -> Result<()>;
}

impl<F> CommandHandler for F
where
    F: Fn(&mut dyn fmt::Write, &CommandArg<'_>) -> Result<()>,
{
    fn invoke(&self, out: &mut dyn fmt::Write, arg: &CommandArg<'_>) -> Result<()> {
        self(out, arg)
    }
}

/// Behaviour flags of a command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandFlags {
    /// The command collects a free-form parameter before running.
    pub requires_param: bool,
    /// The handler is also called on every keystroke while the parameter is
    /// being typed.
    pub progressive: bool,
}

impl CommandFlags {
    /// Run immediately on the key press.
    pub const NONE: Self = Self {
        requires_param: false,
        progressive: false,
    };

    /// Collect a parameter, run on Enter.
    pub const PARAM: Self = Self {
        requires_param: true,
        progressive: false,
    };

    /// Collect a parameter, run on every keystroke and again on Enter.
    pub const PROGRESSIVE: Self = Self {
        requires_param: true,
        progressive: true,
    };
}

/// A handler bound to a single keystroke.
#[derive(Clone)]
pub struct FixedCommand {
    key: u8,
    flags: CommandFlags,
    description: String,
    handler: Option<Rc<dyn CommandHandler>>,
}

impl FixedCommand {
    /// Bind a closure to `key`.
    pub fn new<F>(key: u8, flags: CommandFlags, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut dyn fmt::Write, &CommandArg<'_>) -> Result<()> + 'static,
    {
        Self::with_handler(key, flags, description, Rc::new(handler))
    }

    /// Bind a shared handler to `key`.
    pub fn with_handler(
        key: u8,
        flags: CommandFlags,
        description: impl Into<String>,
        handler: Rc<dyn CommandHandler>,
    ) -> Self {
        Self {
            key,
            flags,
            description: description.into(),
            handler: Some(handler),
        }
    }

    /// An entry without a handler. Never matched by key lookup and never
    /// listed in help.
    pub fn inert(key: u8, description: impl Into<String>) -> Self {
        Self {
            key,
            flags: CommandFlags::NONE,
            description: description.into(),
            handler: None,
        }
    }

    pub fn key(&self) -> u8 {
        self.key
    }

    pub fn flags(&self) -> CommandFlags {
        self.flags
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn handler(&self) -> Option<&Rc<dyn CommandHandler>> {
        self.handler.as_ref()
    }

    /// Whether key lookup may return this command.
    pub fn is_live(&self) -> bool {
        self.handler.is_some()
    }

    /// Help-listing name of the key.
    pub fn display_name(&self) -> String {
        key::key_name(self.key, self.flags.requires_param)
    }
}

impl fmt::Debug for FixedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedCommand")
            .field("key", &self.key)
            .field("flags", &self.flags)
            .field("description", &self.description)
            .field("live", &self.is_live())
            .finish()
    }
}

/// A group of fixed commands registered and unregistered together.
///
/// Cloning a block yields a handle to the same block; registration identity
/// is the shared allocation, not the contents.
#[derive(Debug, Clone)]
pub struct CommandBlock {
    commands: Rc<[FixedCommand]>,
}

impl CommandBlock {
    pub fn new(commands: Vec<FixedCommand>) -> Self {
        Self {
            commands: commands.into(),
        }
    }

    pub fn commands(&self) -> &[FixedCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether both handles refer to the same block.
    pub fn same_block(&self, other: &CommandBlock) -> bool {
        Rc::ptr_eq(&self.commands, &other.commands)
    }
}

impl From<Vec<FixedCommand>> for CommandBlock {
    fn from(commands: Vec<FixedCommand>) -> Self {
        Self::new(commands)
    }
}

/// A handler bound to a typed name.
///
/// Like [`CommandBlock`], clones are handles to the same entry. Entries
/// built separately are distinct even when name and handler match.
#[derive(Clone)]
pub struct LongCommand {
    name: String,
    flags: CommandFlags,
    description: String,
    handler: Rc<dyn CommandHandler>,
    identity: Rc<()>,
}

impl LongCommand {
    pub fn new<F>(
        name: impl Into<String>,
        flags: CommandFlags,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        F: Fn(&mut dyn fmt::Write, &CommandArg<'_>) -> Result<()> + 'static,
    {
        Self::with_handler(name, flags, description, Rc::new(handler))
    }

    pub fn with_handler(
        name: impl Into<String>,
        flags: CommandFlags,
        description: impl Into<String>,
        handler: Rc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            flags,
            description: description.into(),
            handler,
            identity: Rc::new(()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> CommandFlags {
        self.flags
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn handler(&self) -> &Rc<dyn CommandHandler> {
        &self.handler
    }

    /// Whether both handles refer to the same entry.
    pub fn same_entry(&self, other: &LongCommand) -> bool {
        Rc::ptr_eq(&self.identity, &other.identity)
    }
}

impl fmt::Debug for LongCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LongCommand")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("description", &self.description)
            .finish()
    }
}
