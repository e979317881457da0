/// Implementation of `chute probe`.
///
/// A lightweight sanity check before committing to a full pass: loads
/// the file, prints its size, and reports whether it starts with a zstd
/// frame magic.
use anyhow::Result;

use crate::ProbeArgs;
use crate::source;

/// First four bytes of every zstd frame, little-endian 0xFD2FB528.
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Run the `chute probe` command.
///
/// # Errors
///
/// Returns an error if the file cannot be fully loaded.
pub fn run(args: &ProbeArgs) -> Result<()> {
    let blob = source::load(&args.file)?;

    println!("{}: {} bytes", args.file.display(), blob.len());
    if blob.len() >= ZSTD_MAGIC.len() && blob[..4] == ZSTD_MAGIC {
        println!("starts with a zstd frame magic");
    } else {
        println!("no zstd frame magic at offset 0");
    }

    Ok(())
}
