//! Byte sequence abstraction consumed by the edit-state core.
//!
//! The editing layers never touch storage directly. Everything flows through
//! [`ByteBuffer`], a narrow range-oriented contract: size, random-access
//! reads, single-byte insert, range removal, and the three clipboard-shaped
//! range operations (cut / copy / paste of a [`Detached`] snapshot).
//!
//! Detachment:
//! * A `Detached` value owns its bytes. Later mutations of the buffer it was
//!   taken from can never be observed through it, so clipboard slots and undo
//!   records may hold one indefinitely (including across a storage rebuild
//!   performed by a persistence layer).
//! * Cloning a `Detached` is cheap (shared immutable allocation).
//!
//! Offsets:
//! * Addresses are byte offsets in `0..=size()`. `size()` itself is the append
//!   position; it is valid for `insert_byte` / `paste_at` but never the start
//!   of a non-empty range.
//! * `read_range` tolerates short reads at end-of-data; every mutating call
//!   validates its range and reports [`BufferError::OutOfBounds`] without
//!   modifying anything.
//!
//! [`VecBuffer`] is the in-memory implementation used by the binary and the
//! test suites. Large-file, versioned storage engines implement the same trait.

use std::fmt;
use std::sync::Arc;

mod vec_buffer;
pub use vec_buffer::VecBuffer;

/// Failure reported by a [`ByteBuffer`] when a request does not fit the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("range {offset}+{len} exceeds buffer size {size}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },
}

/// Immutable byte snapshot independent of the buffer it came from.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Detached {
    bytes: Arc<[u8]>,
}

impl Detached {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for Detached {
    fn from(v: Vec<u8>) -> Self {
        Self::new(v)
    }
}

impl From<&[u8]> for Detached {
    fn from(v: &[u8]) -> Self {
        Self::new(v)
    }
}

// Snapshots can be large; log lengths, not payloads.
impl fmt::Debug for Detached {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detached").field("len", &self.len()).finish()
    }
}

/// Range-oriented mutable byte sequence.
///
/// Implementations are single-threaded and must not be mutated re-entrantly.
pub trait ByteBuffer {
    /// Number of bytes currently stored.
    fn size(&self) -> usize;

    /// Read up to `len` bytes starting at `offset`. Short (or empty) reads at
    /// end-of-data are not an error.
    fn read_range(&self, offset: usize, len: usize) -> Vec<u8>;

    /// Insert one byte at `offset`, shifting later data right. `offset` may
    /// equal `size()`.
    fn insert_byte(&mut self, offset: usize, byte: u8) -> Result<(), BufferError>;

    /// Remove `[offset, offset+len)`, shifting later data left.
    fn remove_range(&mut self, offset: usize, len: usize) -> Result<(), BufferError>;

    /// Atomically remove `[offset, offset+len)` and return it detached.
    fn cut_range(&mut self, offset: usize, len: usize) -> Result<Detached, BufferError>;

    /// Snapshot `[offset, offset+len)` without mutating.
    fn copy_range(&self, offset: usize, len: usize) -> Result<Detached, BufferError>;

    /// Insert external content at `offset` (which may equal `size()`).
    fn paste_at(&mut self, offset: usize, content: &Detached) -> Result<(), BufferError>;

    /// Single byte at `offset`, `None` at or past end-of-data.
    fn read_byte(&self, offset: usize) -> Option<u8> {
        self.read_range(offset, 1).first().copied()
    }
}

/// Validate that `[offset, offset+len)` lies inside a buffer of `size` bytes.
pub fn check_range(offset: usize, len: usize, size: usize) -> Result<(), BufferError> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(BufferError::OutOfBounds { offset, len, size }),
    }
}
