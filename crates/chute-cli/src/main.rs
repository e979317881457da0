/// Chute command-line tool — run a streaming decompression pass over a
/// compressed file, one fixed-size chunk at a time.
///
/// # Command overview
///
/// ```text
/// chute <COMMAND> [OPTIONS]
///
/// Commands:
///   decompress   Decompress a file through the stream driver
///   probe        Print basic facts about a compressed file
///   help         Print help information
///
/// Global options:
///   -v, --verbose    Print the per-slice feed trace
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, engine fault, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_decompress;
mod cmd_probe;
mod source;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The chute streaming-decompression command-line tool.
#[derive(Parser)]
#[command(name = "chute", version, about = "Streaming decompression driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print the per-slice feed trace while decompressing.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decompress a file through the stream driver.
    Decompress(DecompressArgs),
    /// Print basic facts about a compressed file.
    Probe(ProbeArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `chute decompress`.
///
/// The source file is loaded fully into memory, partitioned into ordered
/// slices, and fed to the driver slice by slice. By default the whole blob
/// is one slice; `--slices` injects an explicit partition (for example one
/// derived from real container or frame boundaries).
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                                │
/// ├──────────────┼───────────────────────────────────────────────────────┤
/// │ -o / --output│ Destination file for the decoded bytes                │
/// │ --chunk-size │ Output chunk capacity C in bytes (default 4096)       │
/// │ --slices     │ Comma-separated slice lengths; must sum to file size  │
/// └──────────────┴───────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecompressArgs {
    /// Path to the compressed source file.
    pub file: PathBuf,

    /// Destination file for the decompressed output.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output chunk capacity, in bytes.
    #[arg(long, default_value_t = chute_driver::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Comma-separated slice lengths (e.g. `20416,64,20416`). A trailing
    /// `0` acts as an explicit end marker. When omitted, the whole file
    /// is fed as a single slice.
    #[arg(long)]
    pub slices: Option<String>,
}

/// Arguments for `chute probe`.
///
/// Prints the file size and whether the file starts with a zstd frame
/// magic — a quick sanity check before running a full pass.
#[derive(clap::Args)]
pub struct ProbeArgs {
    /// Path to the file to probe.
    pub file: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decompress(args) => cmd_decompress::run(&args, cli.verbose),
        Commands::Probe(args) => cmd_probe::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
