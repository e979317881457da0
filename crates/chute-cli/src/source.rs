use std::fs::{self, File};
use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// The source file yielded fewer bytes than its reported length.
///
/// A short read is fatal before the driver runs: the blob must be fully
/// buffered, and a truncated load would surface later as a confusing
/// engine fault instead of a clear I/O problem.
#[derive(Debug, thiserror::Error)]
#[error("short read: got {got} of {expected} bytes from {}", path.display())]
pub struct ReadError {
    pub path: PathBuf,
    pub got: usize,
    pub expected: u64,
}

/// Load the entire source file into memory.
///
/// # Errors
///
/// Returns an error if the file cannot be stat'ed or opened, and a
/// [`ReadError`] if fewer bytes than the reported file length arrive.
pub fn load(path: &Path) -> anyhow::Result<Vec<u8>> {
    let expected = fs::metadata(path)
        .with_context(|| format!("cannot stat {}", path.display()))?
        .len();

    let mut file =
        File::open(path).with_context(|| format!("cannot open {}", path.display()))?;

    #[allow(clippy::cast_possible_truncation)]
    let mut blob = Vec::with_capacity(expected as usize);
    let got = file
        .read_to_end(&mut blob)
        .with_context(|| format!("cannot read {}", path.display()))?;

    if got as u64 != expected {
        return Err(ReadError {
            path: path.to_path_buf(),
            got,
            expected,
        }
        .into());
    }

    Ok(blob)
}
