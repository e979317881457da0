use std::io::Write;

use chute_engine::DecompressEngine;

use crate::error::DriveError;
use crate::state::DriveState;

/// Default chunk buffer capacity, in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Upper bound on drain-phase engine calls.
///
/// Each drain call moves at least part of the engine's internally
/// buffered output (bounded by its block size) into the chunk buffer, so
/// even a tiny chunk empties the backlog well inside this bound. An
/// engine still reporting pending output after this many calls is not
/// converging; the driver fails with [`DriveError::DrainStalled`] rather
/// than looping forever.
pub const MAX_DRAIN_CALLS: usize = 65_536;

/// Counters accumulated over one complete pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveSummary {
    /// Compressed bytes the engine consumed.
    pub bytes_in: u64,
    /// Decoded bytes flushed to the sink.
    pub bytes_out: u64,
    /// Number of full chunk-size flushes.
    pub full_flushes: u64,
    /// Number of engine calls made during the drain phase.
    pub drain_calls: u64,
}

/// Drives one complete decompression pass over a fully-buffered blob,
/// producing output into a sink one fixed-size chunk at a time.
///
/// The driver owns an input cursor over the blob, an output cursor over
/// the chunk buffer, and repeatedly invokes the engine until every input
/// slice is consumed and all pending output is drained and flushed:
///
/// ```text
///   Feeding(slice 0) → … → Feeding(slice n) → Draining → Finalizing → Done
///        │                      │                 │           │
///        │  advance(last=false) per call          │           │
///        │  flush C bytes whenever the chunk fills│           │
///        │                 advance(last=true) until pending=0 │
///        │                              flush the partial chunk once
///        ▼
///   first EngineFault / ShortWrite short-circuits the whole pass
/// ```
///
/// One engine call may consume less than the offered input and produce
/// less than the free output space; the driver never assumes full
/// consumption per call. Everything is synchronous and blocking, with
/// exclusive ownership of engine, chunk buffer, and sink for the run.
pub struct StreamDriver<'a, E, W> {
    engine: &'a mut E,
    blob: &'a [u8],
    sink: W,
    chunk: Box<[u8]>,
    state: DriveState,
    summary: DriveSummary,
}

impl<'a, E: DecompressEngine, W: Write> StreamDriver<'a, E, W> {
    /// Driver over `blob` with the default chunk capacity.
    pub fn new(engine: &'a mut E, blob: &'a [u8], sink: W) -> Self {
        // DEFAULT_CHUNK_SIZE is nonzero, so this cannot fail.
        match Self::with_chunk_size(engine, blob, sink, DEFAULT_CHUNK_SIZE) {
            Ok(driver) => driver,
            Err(_) => unreachable!("default chunk size is nonzero"),
        }
    }

    /// Driver with an explicit chunk capacity `c`.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::ZeroChunkCapacity`] when `c` is zero — a
    /// zero-capacity chunk could never fill or flush.
    pub fn with_chunk_size(
        engine: &'a mut E,
        blob: &'a [u8],
        sink: W,
        c: usize,
    ) -> Result<Self, DriveError> {
        if c == 0 {
            return Err(DriveError::ZeroChunkCapacity);
        }
        Ok(Self {
            engine,
            blob,
            sink,
            chunk: vec![0u8; c].into_boxed_slice(),
            state: DriveState::new(c),
            summary: DriveSummary::default(),
        })
    }

    /// Current drive state (cursor positions, window sizes).
    #[must_use]
    pub fn state(&self) -> &DriveState {
        &self.state
    }

    /// Chunk buffer capacity `C`.
    #[must_use]
    pub fn chunk_capacity(&self) -> usize {
        self.chunk.len()
    }

    /// Make exactly one engine call over the current input and output
    /// windows, then flush the chunk if it filled to the brim.
    ///
    /// Post-conditions on success: `avail_in`/`avail_out` are decremented
    /// by the consumed/produced amounts and the cursors advance by the
    /// same; if `avail_out` reached exactly zero, the full chunk was
    /// written to the sink, `avail_out` reset to `C`, and `out_cursor`
    /// rewound to the buffer start.
    ///
    /// # Errors
    ///
    /// - [`DriveError::Engine`] on any non-success engine status.
    /// - [`DriveError::InputOverrun`] / [`DriveError::OutputOverrun`] if
    ///   the engine reports progress past the offered windows.
    /// - [`DriveError::ShortWrite`] / [`DriveError::Sink`] if the flush
    ///   fails.
    pub fn advance(&mut self, last_slice: bool) -> Result<(), DriveError> {
        let input = &self.blob[self.state.in_cursor..self.state.in_cursor + self.state.avail_in];
        let output =
            &mut self.chunk[self.state.out_cursor..self.state.out_cursor + self.state.avail_out];

        let step = self.engine.decompress(input, output, last_slice)?;

        if step.consumed > self.state.avail_in {
            return Err(DriveError::InputOverrun {
                consumed: step.consumed,
                offered: self.state.avail_in,
            });
        }
        if step.produced > self.state.avail_out {
            return Err(DriveError::OutputOverrun {
                produced: step.produced,
                offered: self.state.avail_out,
            });
        }

        self.state.avail_in -= step.consumed;
        self.state.avail_out -= step.produced;
        self.state.in_cursor += step.consumed;
        self.state.out_cursor += step.produced;
        self.state.pending_out = step.pending_out;
        self.summary.bytes_in += step.consumed as u64;

        if self.state.avail_out == 0 {
            self.flush(self.chunk.len())?;
            self.summary.full_flushes += 1;
        }

        Ok(())
    }

    /// Feed the next `len` bytes of the blob to the engine, calling
    /// [`advance`](Self::advance) until the whole slice is consumed.
    ///
    /// Slices are strictly ordered and contiguous: each one starts where
    /// the previous ended.
    ///
    /// # Errors
    ///
    /// [`DriveError::SliceOutOfBounds`] if the slice extends past the end
    /// of the blob, plus anything `advance` can return.
    pub fn feed_slice(&mut self, len: usize) -> Result<(), DriveError> {
        let in_bounds = self
            .state
            .in_cursor
            .checked_add(len)
            .is_some_and(|end| end <= self.blob.len());
        if !in_bounds {
            return Err(DriveError::SliceOutOfBounds {
                offset: self.state.in_cursor,
                len,
                blob_len: self.blob.len(),
            });
        }

        self.state.avail_in = len;
        while self.state.avail_in > 0 {
            self.advance(false)?;
        }
        Ok(())
    }

    /// Drain, finalize, and return the pass counters along with the sink.
    ///
    /// The drain phase signals end-of-stream to the engine until it
    /// reports no pending output (an engine reporting nonzero pending N
    /// times drains in exactly N+1 calls). Afterwards, a partially
    /// filled chunk — the only flush allowed to be shorter than `C` — is
    /// written once.
    ///
    /// # Errors
    ///
    /// Anything `advance` can return, plus [`DriveError::DrainStalled`]
    /// if pending output never reaches zero within [`MAX_DRAIN_CALLS`].
    pub fn finish(mut self) -> Result<(DriveSummary, W), DriveError> {
        loop {
            self.advance(true)?;
            self.summary.drain_calls += 1;
            if self.state.pending_out == 0 {
                break;
            }
            if self.summary.drain_calls as usize >= MAX_DRAIN_CALLS {
                return Err(DriveError::DrainStalled {
                    calls: MAX_DRAIN_CALLS,
                });
            }
        }

        let used = self.chunk.len() - self.state.avail_out;
        if used > 0 {
            self.flush(used)?;
        }

        Ok((self.summary, self.sink))
    }

    /// Feed every slice in order, then drain and finalize.
    ///
    /// A zero-length slice is the end marker: it terminates the feeding
    /// loop without being fed. Callers may also simply omit the sentinel.
    ///
    /// # Errors
    ///
    /// Anything [`feed_slice`](Self::feed_slice) or
    /// [`finish`](Self::finish) can return.
    pub fn run<I>(mut self, slices: I) -> Result<(DriveSummary, W), DriveError>
    where
        I: IntoIterator<Item = usize>,
    {
        for len in slices {
            if len == 0 {
                break;
            }
            self.feed_slice(len)?;
        }
        self.finish()
    }

    /// Write the first `len` buffered bytes to the sink and reset the
    /// output window. A single sink call must accept all `len` bytes.
    fn flush(&mut self, len: usize) -> Result<(), DriveError> {
        let written = self.sink.write(&self.chunk[..len])?;
        if written != len {
            return Err(DriveError::ShortWrite {
                written,
                expected: len,
            });
        }
        self.state.avail_out = self.chunk.len();
        self.state.out_cursor = 0;
        self.summary.bytes_out += len as u64;
        Ok(())
    }
}
