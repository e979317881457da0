use chute_engine::EngineFault;

/// Errors that can abort a decompression pass.
///
/// All variants are terminal for the run: the driver surfaces the first
/// error encountered and makes no further engine calls or sink writes.
/// Session teardown is the session guard's job and still runs.
///
/// ```text
/// ┌──────────────────┬────────────────────────────────────────────────┐
/// │ Variant          │ Cause                                          │
/// ├──────────────────┼────────────────────────────────────────────────┤
/// │ Engine           │ Engine reported any non-success status         │
/// │ ShortWrite       │ Sink accepted fewer bytes than requested       │
/// │ InputOverrun     │ Engine claimed to consume past its window      │
/// │ OutputOverrun    │ Engine claimed to produce past its window      │
/// │ SliceOutOfBounds │ Slice extends past the end of the blob         │
/// │ DrainStalled     │ pending_out never reached 0 within the bound   │
/// │ ZeroChunkCapacity│ Driver constructed with a zero-byte chunk      │
/// │ Sink             │ I/O error from the sink itself                 │
/// └──────────────────┴────────────────────────────────────────────────┘
/// ```
///
/// The two overrun variants exist because an engine that overshoots its
/// window has already written past a buffer it was never given; clamping
/// the counters would only hide the corruption.
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error(transparent)]
    Engine(#[from] EngineFault),

    #[error("short write: sink accepted {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    #[error("engine consumed {consumed} bytes but only {offered} were offered")]
    InputOverrun { consumed: usize, offered: usize },

    #[error("engine produced {produced} bytes into a {offered}-byte window")]
    OutputOverrun { produced: usize, offered: usize },

    #[error("slice of {len} bytes at offset {offset} overruns the {blob_len}-byte blob")]
    SliceOutOfBounds {
        offset: usize,
        len: usize,
        blob_len: usize,
    },

    #[error("drain phase still had pending output after {calls} calls")]
    DrainStalled { calls: usize },

    #[error("chunk capacity must be nonzero")]
    ZeroChunkCapacity,

    #[error(transparent)]
    Sink(#[from] std::io::Error),
}
