/// Per-stream mutable record of how far the pass has progressed.
///
/// Created once per run, mutated by every engine call, discarded after
/// the final flush. Invariants held between calls:
///
/// ```text
///   avail_out ∈ [0, C]           (C = chunk capacity)
///   out_cursor + avail_out == C  (used bytes + free space fill the chunk)
///   in_cursor + avail_in <= blob length
///   cursors only move forward within their buffers
/// ```
///
/// `pending_out` mirrors the engine's report from the most recent call
/// and is only meaningful during the drain phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriveState {
    /// Bytes of the current slice not yet consumed by the engine.
    pub avail_in: usize,
    /// Free capacity remaining in the chunk buffer.
    pub avail_out: usize,
    /// Position of the next unread byte in the blob.
    pub in_cursor: usize,
    /// Position of the next free byte in the chunk buffer.
    pub out_cursor: usize,
    /// Bytes the engine reports it still holds internally.
    pub pending_out: usize,
}

impl DriveState {
    /// Fresh state for a chunk buffer of `chunk_capacity` bytes.
    #[must_use]
    pub fn new(chunk_capacity: usize) -> Self {
        Self {
            avail_in: 0,
            avail_out: chunk_capacity,
            in_cursor: 0,
            out_cursor: 0,
            pending_out: 0,
        }
    }

    /// Bytes currently buffered in the chunk and not yet flushed.
    #[must_use]
    pub fn chunk_used(&self, chunk_capacity: usize) -> usize {
        chunk_capacity - self.avail_out
    }
}
