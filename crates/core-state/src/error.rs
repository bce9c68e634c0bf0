use core_buffer::BufferError;

/// Recoverable failures surfaced to the caller for display.
///
/// A failed operation leaves the buffer, undo history, and clipboard exactly
/// as they were.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The requested range is empty.
    #[error("invalid range: nothing selected")]
    InvalidRange,
    /// The requested range does not fit inside the buffer.
    #[error("range {offset}+{size} out of bounds for {len} byte buffer")]
    RangeOutOfBounds {
        offset: usize,
        size: usize,
        len: usize,
    },
    /// The buffer refused an edit the core believed valid.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}
