use std::io;

use zstd::stream::raw::{Decoder, InBuffer, Operation, OutBuffer};

use crate::engine::{DecompressEngine, EngineFault, EngineStep};

/// Status code for a rejected or corrupt input stream.
const STATUS_FAIL: i32 = -1;

/// Status code for a stream that ended mid-frame.
const STATUS_TRUNCATED: i32 = -2;

/// Software decompression engine over the raw zstd streaming decoder.
///
/// This is the always-available backend implementation of
/// [`DecompressEngine`]. Each instance owns its own `Decoder`, so two
/// engines never share native state. The raw API (rather than
/// `zstd::decode_all`) is used because the driver feeds irregular input
/// windows and drains into a fixed-size output window — exactly the
/// in-buffer/out-buffer shape `Decoder::run` exposes.
///
/// `pending_out` is mapped from the decoder's input-size hint: a nonzero
/// hint after end-of-stream means the decoder still expects to emit (or
/// receive) more bytes for the current frame.
pub struct ZstdEngine {
    decoder: Decoder<'static>,
    /// Set once the frame has fully decoded. Further calls report no
    /// progress and no pending output instead of asking the decoder to
    /// start a new frame.
    finished: bool,
}

impl ZstdEngine {
    /// Create a fresh engine with its own decoder context.
    ///
    /// # Errors
    ///
    /// Returns an error if the zstd context cannot be allocated.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            decoder: Decoder::new()?,
            finished: false,
        })
    }
}

impl DecompressEngine for ZstdEngine {
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        last_slice: bool,
    ) -> Result<EngineStep, EngineFault> {
        if self.finished {
            // Input offered after the frame ended can never be consumed;
            // reporting zero progress here would leave the caller spinning.
            if !input.is_empty() {
                return Err(EngineFault {
                    code: STATUS_FAIL,
                    detail: "trailing data after end of frame".to_string(),
                });
            }
            return Ok(EngineStep::default());
        }

        let mut src = InBuffer::around(input);
        let mut dst = OutBuffer::around(output);

        let hint = self.decoder.run(&mut src, &mut dst).map_err(|e| EngineFault {
            code: STATUS_FAIL,
            detail: e.to_string(),
        })?;

        // A zero hint from the raw decoder means the frame is complete
        // and everything has been flushed.
        if hint == 0 {
            self.finished = true;
        }

        // No more input is coming, the decoder made no progress, and it
        // still expects bytes: the frame is incomplete. Without this check
        // a truncated stream would leave the drain phase spinning.
        if last_slice && input.is_empty() && dst.pos() == 0 && hint != 0 {
            return Err(EngineFault {
                code: STATUS_TRUNCATED,
                detail: "incomplete frame: decoder expects more input".to_string(),
            });
        }

        Ok(EngineStep {
            consumed: src.pos,
            produced: dst.pos(),
            pending_out: hint,
        })
    }
}
