/// Report from a single engine call.
///
/// Both `consumed` and `produced` may be less than the windows the caller
/// offered — partial progress per call is the normal case, and the driver
/// must never assume a call swallowed a whole slice. `pending_out` is the
/// number of bytes the engine holds internally because they did not fit
/// into the last output window; it is only meaningful once the caller has
/// signalled end-of-stream and is draining.
///
/// ```text
/// ┌─────────────┬─────────────────────────────────────────────────────┐
/// │ Field       │ Meaning                                             │
/// ├─────────────┼─────────────────────────────────────────────────────┤
/// │ consumed    │ Input bytes read this call (<= offered input)       │
/// │ produced    │ Output bytes written this call (<= offered output)  │
/// │ pending_out │ Bytes buffered inside the engine, drain phase only  │
/// └─────────────┴─────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStep {
    pub consumed: usize,
    pub produced: usize,
    pub pending_out: usize,
}

/// A non-success status reported by the engine.
///
/// Any fault is terminal for the whole decompression pass — the driver
/// makes no further calls and performs no partial-failure recovery. The
/// upstream caller decides whether to retry the entire run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("engine reported status {code}: {detail}")]
pub struct EngineFault {
    /// Backend status code (native-library convention: negative = failure).
    pub code: i32,
    /// Human-readable description of the failure.
    pub detail: String,
}

/// Call contract for an externally-owned decompression engine.
///
/// One call hands the engine an input window and an output window and gets
/// back how far it actually got. `last_slice` tells the engine that no
/// input follows the current window, which lets it flush fully-decoded but
/// internally-buffered output.
///
/// ```text
/// decompress(input, output, last_slice)
///     ──▶ Ok(EngineStep { consumed, produced, pending_out })
///     ──▶ Err(EngineFault { code, .. })        (terminal)
/// ```
///
/// Calls are synchronous and blocking; the engine holds no reference to
/// the buffers between calls. Implementations own whatever native handle
/// or internal state the algorithm needs — the handle is passed explicitly
/// through `&mut self`, never kept as process-global state, so independent
/// runs can coexist in one process.
pub trait DecompressEngine {
    /// Run one decompression step over the given windows.
    ///
    /// # Errors
    ///
    /// Returns [`EngineFault`] for any non-success engine status. Faults
    /// are terminal; the engine must not be called again afterwards.
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        last_slice: bool,
    ) -> Result<EngineStep, EngineFault>;
}
