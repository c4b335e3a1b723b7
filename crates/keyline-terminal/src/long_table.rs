//! Name-keyed long command table.
//!
//! Names are unique under ASCII case-insensitive comparison. The table is
//! kept sorted by that comparison, ascending, which is also the order the
//! help listing uses.

use std::cmp::Ordering;

use keyline_types::error::{KeylineError, Result};

use crate::command::LongCommand;

/// Registry of long commands in display order.
#[derive(Debug, Default)]
pub struct LongCommandTable {
    commands: Vec<LongCommand>,
}

impl LongCommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register each entry in turn.
    ///
    /// Stops at the first name that is already taken. Entries before it stay
    /// registered.
    pub fn register(&mut self, entries: &[LongCommand]) -> Result<()> {
        for entry in entries {
            if self.find_by_name(entry.name()).is_some() {
                log::warn!("long command '{}' already registered", entry.name());
                return Err(KeylineError::AlreadyRegistered(format!(
                    "long command '{}'",
                    entry.name()
                )));
            }
            self.commands.try_reserve(1)?;
            let pos = self
                .commands
                .partition_point(|c| compare_names(c.name(), entry.name()) == Ordering::Less);
            self.commands.insert(pos, entry.clone());
            log::debug!("Registered long command '{}'", entry.name());
        }
        Ok(())
    }

    /// Unregister each entry. Only the registered entry itself (or a clone
    /// of it) is removed; another entry of the same name is left alone.
    pub fn unregister(&mut self, entries: &[LongCommand]) {
        for entry in entries {
            let Some(pos) = self.position(entry.name()) else {
                continue;
            };
            if self.commands[pos].same_entry(entry) {
                self.commands.remove(pos);
                log::debug!("Unregistered long command '{}'", entry.name());
            }
        }
    }

    /// Case-insensitive exact lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&LongCommand> {
        self.position(name).map(|pos| &self.commands[pos])
    }

    /// Registered commands in display order.
    pub fn iter(&self) -> impl Iterator<Item = &LongCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.commands
            .binary_search_by(|c| compare_names(c.name(), name))
            .ok()
    }
}

/// ASCII case-insensitive total order on command names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}
