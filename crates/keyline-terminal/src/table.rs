//! Fixed-key command table.
//!
//! Blocks are kept in registration order. Each key has its own stack of
//! bindings, one per block that defines a live command for that key, so the
//! most recently registered block wins without scanning every block.

use keyline_types::error::{KeylineError, Result};

use crate::command::{CommandBlock, FixedCommand};

/// Number of distinct key codes.
const KEY_SPACE: usize = 256;

#[derive(Debug)]
struct Registered {
    id: u64,
    block: CommandBlock,
}

/// Binding of a key to one entry of a registered block.
#[derive(Debug)]
struct Binding {
    block_id: u64,
    block: CommandBlock,
    index: usize,
}

/// Registry of fixed-key command blocks.
#[derive(Debug)]
pub struct CommandTable {
    blocks: Vec<Registered>,
    by_key: Vec<Vec<Binding>>,
    next_id: u64,
}

impl CommandTable {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            by_key: (0..KEY_SPACE).map(|_| Vec::new()).collect(),
            next_id: 0,
        }
    }

    /// Register a block. Fails if the block is empty or already registered.
    pub fn register(&mut self, block: &CommandBlock) -> Result<()> {
        if block.is_empty() {
            return Err(KeylineError::InvalidArgument(
                "command block is empty".to_string(),
            ));
        }
        if self.is_registered(block) {
            return Err(KeylineError::AlreadyRegistered(format!(
                "command block with {} commands",
                block.len()
            )));
        }

        // Reserve everything up front so a failed allocation leaves the
        // table untouched.
        self.blocks.try_reserve(1)?;
        let keys = first_live_entries(block);
        for &(key, _) in &keys {
            self.by_key[usize::from(key)].try_reserve(1)?;
        }

        let id = self.next_id;
        self.next_id += 1;
        for (key, index) in keys {
            self.by_key[usize::from(key)].push(Binding {
                block_id: id,
                block: block.clone(),
                index,
            });
        }
        self.blocks.push(Registered {
            id,
            block: block.clone(),
        });
        log::debug!("Registered command block ({} commands)", block.len());
        Ok(())
    }

    /// Unregister a block. Unknown blocks are ignored.
    pub fn unregister(&mut self, block: &CommandBlock) {
        let Some(pos) = self.blocks.iter().position(|r| r.block.same_block(block)) else {
            return;
        };
        let removed = self.blocks.remove(pos);
        for bindings in &mut self.by_key {
            bindings.retain(|b| b.block_id != removed.id);
        }
        log::debug!("Unregistered command block ({} commands)", block.len());
    }

    /// Live command bound to `key`, taken from the most recently registered
    /// block that defines one.
    pub fn find_by_key(&self, key: u8) -> Option<&FixedCommand> {
        self.by_key[usize::from(key)]
            .last()
            .map(|b| &b.block.commands()[b.index])
    }

    pub fn is_registered(&self, block: &CommandBlock) -> bool {
        self.blocks.iter().any(|r| r.block.same_block(block))
    }

    /// Number of registered blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total number of entries across all registered blocks.
    pub fn command_count(&self) -> usize {
        self.blocks.iter().map(|r| r.block.len()).sum()
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

/// For each key defined in `block`, the index of its first live entry.
fn first_live_entries(block: &CommandBlock) -> Vec<(u8, usize)> {
    let mut seen = [false; KEY_SPACE];
    let mut out = Vec::new();
    for (index, cmd) in block.commands().iter().enumerate() {
        let slot = &mut seen[usize::from(cmd.key())];
        if cmd.is_live() && !*slot {
            *slot = true;
            out.push((cmd.key(), index));
        }
    }
    out
}
