/// Implementation of `chute decompress`.
///
/// Loads the source blob fully into memory, establishes a session over
/// the software backend, then drives one complete decompression pass:
/// feed each slice, drain, flush the final partial chunk, tear the
/// session down. Teardown is guaranteed by the session guard on every
/// exit path, including engine faults mid-stream.
///
/// ```text
///   source file ──▶ blob ──▶ [slice, slice, …] ──▶ StreamDriver ──▶ output file
///                                                       │
///                                              Session(SoftwareBackend)
/// ```
use std::fs::File;
use std::io::Write as _;

use anyhow::{Context as _, Result, anyhow};
use chute_driver::StreamDriver;
use chute_session::{ConfigOverrides, Direction, Session, SoftwareBackend};

use crate::DecompressArgs;
use crate::source;

/// Run the `chute decompress` command.
///
/// # Errors
///
/// Returns an error if the source cannot be fully loaded, the slice list
/// is malformed or does not sum to the file size, the session cannot be
/// established, or the driver aborts the pass.
pub fn run(args: &DecompressArgs, verbose: bool) -> Result<()> {
    let blob = source::load(&args.file)?;
    if verbose {
        println!("loaded {} ({} bytes)", args.file.display(), blob.len());
    }

    let slices = match args.slices.as_deref() {
        Some(spec) => parse_slices(spec, blob.len())?,
        None => vec![blob.len()],
    };

    let backend = SoftwareBackend::new().context("cannot allocate decompression backend")?;
    let overrides = ConfigOverrides {
        direction: Some(Direction::Decompress),
        output_hint: Some(64 * 1024),
        software_fallback: Some(false),
    };
    let mut session = Session::establish(backend, overrides)?;

    let sink = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;

    let mut driver =
        StreamDriver::with_chunk_size(session.engine_mut(), &blob, sink, args.chunk_size)?;

    for len in &slices {
        if *len == 0 {
            break;
        }
        if verbose {
            println!("new slice of size {len}");
        }
        driver.feed_slice(*len)?;
    }
    let (summary, mut sink) = driver.finish()?;
    sink.flush().context("cannot flush output")?;

    println!(
        "decompressed {} -> {} bytes ({} full chunks, {} drain calls)",
        summary.bytes_in, summary.bytes_out, summary.full_flushes, summary.drain_calls
    );
    Ok(())
}

// ── Flag parsers ──────────────────────────────────────────────────────────────

/// Parses a comma-separated `--slices` list and checks it against the
/// blob length.
///
/// Lengths after an explicit `0` end marker are rejected rather than
/// silently ignored. The accepted lengths must sum to exactly
/// `blob_len` — the slices are a partition of the blob, not a window
/// onto it.
///
/// # Errors
///
/// Returns an error for unparsable entries, lengths after a `0` marker,
/// or a sum that differs from the blob length.
fn parse_slices(spec: &str, blob_len: usize) -> Result<Vec<usize>> {
    let mut slices = Vec::new();
    let mut ended = false;

    for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if ended {
            return Err(anyhow!("slice length after the 0 end marker: {token:?}"));
        }
        let len: usize = token
            .parse()
            .map_err(|_| anyhow!("invalid slice length {token:?}"))?;
        if len == 0 {
            ended = true;
        }
        slices.push(len);
    }

    let total: usize = slices.iter().sum();
    if total != blob_len {
        return Err(anyhow!(
            "slice lengths sum to {total} but the file is {blob_len} bytes"
        ));
    }

    Ok(slices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_partition() {
        let slices = parse_slices("20416, 64, 20416", 40896).unwrap();
        assert_eq!(slices, vec![20416, 64, 20416]);
    }

    #[test]
    fn accepts_a_trailing_end_marker() {
        let slices = parse_slices("4,6,0", 10).unwrap();
        assert_eq!(slices, vec![4, 6, 0]);
    }

    #[test]
    fn rejects_lengths_after_the_end_marker() {
        assert!(parse_slices("4,0,6", 10).is_err());
    }

    #[test]
    fn rejects_a_partition_that_does_not_cover_the_blob() {
        assert!(parse_slices("4,4", 10).is_err());
    }

    #[test]
    fn rejects_garbage_tokens() {
        assert!(parse_slices("4,banana", 10).is_err());
    }
}
