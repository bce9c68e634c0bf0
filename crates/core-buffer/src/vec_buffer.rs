//! Contiguous in-memory `ByteBuffer`.

use crate::{BufferError, ByteBuffer, Detached, check_range};
use tracing::trace;

/// A `ByteBuffer` backed by a single `Vec<u8>`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct VecBuffer {
    data: Vec<u8>,
}

impl VecBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { data: bytes.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl std::fmt::Debug for VecBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VecBuffer")
            .field("size", &self.data.len())
            .finish()
    }
}

impl ByteBuffer for VecBuffer {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn read_range(&self, offset: usize, len: usize) -> Vec<u8> {
        let start = offset.min(self.data.len());
        let end = offset.saturating_add(len).min(self.data.len());
        self.data[start..end].to_vec()
    }

    fn insert_byte(&mut self, offset: usize, byte: u8) -> Result<(), BufferError> {
        check_range(offset, 0, self.data.len())?;
        self.data.insert(offset, byte);
        trace!(target: "buffer", offset, size = self.data.len(), "insert_byte");
        Ok(())
    }

    fn remove_range(&mut self, offset: usize, len: usize) -> Result<(), BufferError> {
        check_range(offset, len, self.data.len())?;
        self.data.drain(offset..offset + len);
        trace!(target: "buffer", offset, len, size = self.data.len(), "remove_range");
        Ok(())
    }

    fn cut_range(&mut self, offset: usize, len: usize) -> Result<Detached, BufferError> {
        check_range(offset, len, self.data.len())?;
        let removed: Vec<u8> = self.data.drain(offset..offset + len).collect();
        trace!(target: "buffer", offset, len, size = self.data.len(), "cut_range");
        Ok(Detached::from(removed))
    }

    fn copy_range(&self, offset: usize, len: usize) -> Result<Detached, BufferError> {
        check_range(offset, len, self.data.len())?;
        Ok(Detached::from(&self.data[offset..offset + len]))
    }

    fn paste_at(&mut self, offset: usize, content: &Detached) -> Result<(), BufferError> {
        check_range(offset, 0, self.data.len())?;
        self.data
            .splice(offset..offset, content.as_bytes().iter().copied());
        trace!(target: "buffer", offset, len = content.len(), size = self.data.len(), "paste_at");
        Ok(())
    }
}
