//! Growable byte buffer backing an edit session.

use keyline_types::error::Result;

/// Byte buffer with a write cursor at its end.
///
/// Bytes are appended at the cursor. Erasing removes the byte before the
/// cursor, so the next write lands on the erased position. The allocation
/// is kept across erasures.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    data: Vec<u8>,
}

impl InputBuffer {
    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve(capacity)?;
        Ok(Self { data })
    }

    /// Append one byte at the cursor.
    pub fn write_u8(&mut self, byte: u8) -> Result<()> {
        self.data.try_reserve(1)?;
        self.data.push(byte);
        Ok(())
    }

    /// Remove the byte before the cursor.
    ///
    /// Returns `false` when the buffer was already empty.
    pub fn erase(&mut self) -> bool {
        self.data.pop().is_some()
    }

    /// Cursor position.
    pub fn pos(&self) -> usize {
        self.data.len()
    }

    /// Logical length of the content.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy of the content as text. Invalid UTF-8 is replaced.
    pub fn snapshot(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}
